use std::collections::HashSet;
use std::thread;
use std::time::Duration;

use crate::collectors::{ProcessListing, ProcfsSource};
use crate::model::{HighCpuProcess, ProcessSnapshot};

/// A process qualifies as a high-CPU outlier at or above this instantaneous
/// percentage.
pub const HIGH_CPU_THRESHOLD: f64 = 90.0;

/// The listing utility samples instantaneous CPU and can miss short-lived
/// spikes, so we capture it a few times.
pub const LIST_ATTEMPTS: usize = 3;
pub const RETRY_DELAY: Duration = Duration::from_millis(100);

/// Census the process table and flag high-CPU outliers.
///
/// The total count comes straight from the process-table namespace and
/// stays valid even when every listing attempt fails; in that case the
/// outlier list is simply empty.
pub fn sample(src: &ProcfsSource, listing: &dyn ProcessListing) -> ProcessSnapshot {
    sample_with(src, listing, LIST_ATTEMPTS, RETRY_DELAY)
}

pub fn sample_with(
    src: &ProcfsSource,
    listing: &dyn ProcessListing,
    attempts: usize,
    retry_delay: Duration,
) -> ProcessSnapshot {
    let total = match src.pid_count() {
        Ok(n) => n,
        Err(err) => {
            tracing::warn!(%err, "process table enumeration failed");
            0
        }
    };

    let mut seen = HashSet::new();
    let mut high_cpu = Vec::new();
    for attempt in 0..attempts {
        match listing.capture() {
            Ok(table) => merge_outliers(&table, &mut seen, &mut high_cpu),
            Err(err) => tracing::debug!(attempt, %err, "listing attempt skipped"),
        }
        if attempt + 1 < attempts {
            thread::sleep(retry_delay);
        }
    }

    // The listing utility can catch itself mid-spike; drop that entry.
    high_cpu.retain(|p| p.name != listing.tool_name());

    ProcessSnapshot { total, high_cpu }
}

/// Fold one captured table into the outlier list. Rows: field[1] = pid,
/// field[2] = cpu percent, field[10] = first token of the command. The
/// first observation of a pid wins across attempts.
fn merge_outliers(table: &str, seen: &mut HashSet<String>, out: &mut Vec<HighCpuProcess>) {
    for line in table.lines().skip(1) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 11 {
            continue;
        }
        let Ok(cpu) = fields[2].parse::<f64>() else {
            continue;
        };
        if cpu < HIGH_CPU_THRESHOLD {
            continue;
        }
        let pid = fields[1];
        if !seen.insert(pid.to_string()) {
            continue;
        }
        let command = fields[10];
        let name = command.rsplit('/').next().unwrap_or(command);
        out.push(HighCpuProcess {
            pid: pid.to_string(),
            name: name.to_string(),
            cpu,
        });
    }
}
