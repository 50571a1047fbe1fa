use std::io;
use std::thread;
use std::time::Duration;

use crate::collectors::{CpuSummary, ProcfsSource};
use crate::model::CpuUtilization;

/// Default window between the two tick readings. One second keeps the
/// quantization noise of the low-rate tick counters acceptable without
/// making the dashboard feel stalled.
pub const SAMPLE_WAIT: Duration = Duration::from_secs(1);

/// Cumulative CPU tick counters from the aggregate `cpu ` line. Only the
/// first seven fields take part in the derivation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CpuTicks {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
}

impl CpuTicks {
    /// Parse the aggregate line out of raw `stat` content.
    pub fn parse(stat: &str) -> Option<Self> {
        let line = stat.lines().find(|l| l.starts_with("cpu "))?;
        let mut fields = line.split_whitespace().skip(1);
        let mut next = || fields.next()?.parse::<u64>().ok();
        Some(Self {
            user: next()?,
            nice: next()?,
            system: next()?,
            idle: next()?,
            iowait: next()?,
            irq: next()?,
            softirq: next()?,
        })
    }

    fn total(&self) -> u64 {
        self.user + self.nice + self.system + self.idle + self.iowait + self.irq + self.softirq
    }

    fn idle_total(&self) -> u64 {
        // iowait counts as idle: the CPU was only waiting on I/O.
        self.idle + self.iowait
    }
}

/// Percent busy between two readings, rounded to one decimal and clamped
/// to [0, 100]. Counters can wrap or go momentarily inconsistent, so the
/// arithmetic saturates instead of trusting the deltas.
pub fn busy_percent(before: CpuTicks, after: CpuTicks) -> f64 {
    let total_delta = after.total().saturating_sub(before.total());
    if total_delta == 0 {
        return 0.0;
    }
    let idle_delta = after.idle_total().saturating_sub(before.idle_total());
    let busy = total_delta.saturating_sub(idle_delta) as f64 / total_delta as f64 * 100.0;
    round1(busy.clamp(0.0, 100.0))
}

/// Sample CPU utilization: read the tick counters, wait, read again, and
/// derive the busy percentage. If the tick source is unusable at any point,
/// fall back to the external summary; if that fails too, report 0%.
/// The contract is "always return a number".
pub fn sample(
    src: &ProcfsSource,
    fallback: &dyn CpuSummary,
    cores: usize,
    wait: Duration,
) -> CpuUtilization {
    match read_ticks(src) {
        Ok(before) => {
            thread::sleep(wait);
            match read_ticks(src) {
                Ok(after) => {
                    return CpuUtilization {
                        percent: busy_percent(before, after),
                        cores,
                    };
                }
                Err(err) => tracing::warn!(%err, "second tick reading failed"),
            }
        }
        Err(err) => tracing::warn!(%err, "tick counters unreadable, trying summary fallback"),
    }

    match fallback.capture() {
        Ok(text) => {
            if let Some(idle) = parse_summary_idle(&text) {
                return CpuUtilization {
                    percent: round1((100.0 - idle).clamp(0.0, 100.0)),
                    cores,
                };
            }
            tracing::warn!("summary fallback output had no idle field");
        }
        Err(err) => tracing::warn!(%err, "summary fallback failed"),
    }

    CpuUtilization {
        percent: 0.0,
        cores,
    }
}

fn read_ticks(src: &ProcfsSource) -> io::Result<CpuTicks> {
    let stat = src.stat()?;
    CpuTicks::parse(&stat)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "no aggregate cpu line"))
}

/// Pull the idle percentage out of a `top -bn1` style summary: the
/// `%Cpu(s):` line is comma-separated, and the idle figure sits in the
/// part tagged "id".
fn parse_summary_idle(text: &str) -> Option<f64> {
    let line = text
        .lines()
        .find(|l| l.contains("%Cpu(s):") && l.contains("id"))?;
    for part in line.split(',') {
        if part.contains("id") {
            return part.split_whitespace().next()?.parse().ok();
        }
    }
    None
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
