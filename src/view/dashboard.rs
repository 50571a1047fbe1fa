use std::io::{self, Write, stdout};

use crossterm::{
    queue,
    style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor},
};

use super::shared::{level_color, progress_bar, writeln};
use crate::config::Config;
use crate::model::SystemSnapshot;
use crate::samplers::process::HIGH_CPU_THRESHOLD;

const RULE: &str = "==================================================";
const THIN_RULE: &str = "--------------------------------------------------";

pub fn render(snapshot: &SystemSnapshot, config: &Config) -> io::Result<()> {
    let mut out = stdout();

    if config.color {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    writeln(&mut out, RULE)?;
    writeln(&mut out, "    SYSTEM VITALS")?;
    writeln(&mut out, RULE)?;
    if config.color {
        queue!(out, SetAttribute(Attribute::Reset))?;
    }
    writeln(&mut out, &format!("Last Update: {}", snapshot.time))?;
    writeln(&mut out, THIN_RULE)?;

    label(&mut out, config, Color::Green, "Uptime:")?;
    writeln(&mut out, &format!(" {}", snapshot.uptime.uptime))?;
    label(&mut out, config, Color::Blue, "Load Average:")?;
    writeln(&mut out, &format!(" {}", snapshot.uptime.load_avg))?;

    let cpu = &snapshot.cpu;
    label(&mut out, config, level_color(cpu.percent, 50.0, 80.0), "CPU:")?;
    writeln(
        &mut out,
        &format!(
            " {:.1}% ({} cores)  {}",
            cpu.percent,
            cpu.cores,
            progress_bar(cpu.percent, 20)
        ),
    )?;

    let procs = &snapshot.processes;
    label(&mut out, config, Color::Blue, "Processes:")?;
    writeln(
        &mut out,
        &format!(
            " {} total, {} high CPU (≥{}%)",
            procs.total,
            procs.high_cpu.len(),
            HIGH_CPU_THRESHOLD
        ),
    )?;
    for p in &procs.high_cpu {
        write!(out, "   └─ ")?;
        label(&mut out, config, Color::Red, &p.name)?;
        writeln(&mut out, &format!(" (PID {}, {:.1}% CPU)", p.pid, p.cpu))?;
    }

    let mem = &snapshot.memory;
    label(
        &mut out,
        config,
        level_color(mem.percent_used, 60.0, 80.0),
        "Memory:",
    )?;
    writeln(
        &mut out,
        &format!(
            " {}MB / {}MB ({:.1}%)  {}",
            mem.used_mb,
            mem.total_mb,
            mem.percent_used,
            progress_bar(mem.percent_used, 20)
        ),
    )?;

    writeln(&mut out, THIN_RULE)?;
    writeln(
        &mut out,
        &format!(
            "Refresh interval: {}s | q, Esc or Ctrl+C to quit",
            config.interval.as_secs()
        ),
    )?;

    out.flush()
}

fn label(out: &mut impl Write, config: &Config, color: Color, text: &str) -> io::Result<()> {
    if config.color {
        queue!(out, SetForegroundColor(color))?;
        write!(out, "{text}")?;
        queue!(out, ResetColor)?;
    } else {
        write!(out, "{text}")?;
    }
    Ok(())
}
