use std::io::{self, Write};

use crossterm::style::Color;

/// Raw-mode friendly line ending; renders identically in cooked mode.
pub fn writeln(out: &mut impl Write, text: &str) -> io::Result<()> {
    write!(out, "{}\r\n", text)
}

pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    let empty = width - filled;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

/// Traffic-light color for a percentage: red above `crit`, yellow above
/// `warn`, green otherwise.
pub fn level_color(percent: f64, warn: f64, crit: f64) -> Color {
    if percent > crit {
        Color::Red
    } else if percent > warn {
        Color::Yellow
    } else {
        Color::Green
    }
}
