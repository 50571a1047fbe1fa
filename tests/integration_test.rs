//! End-to-end tests of the sampling core over fixture counter trees.
//! No live /proc and no live subprocesses — sources are fixture-backed.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use tempfile::TempDir;

use vitals::collectors::{CpuSummary, ProcessListing, ProcfsSource};
use vitals::controller::Monitor;
use vitals::model::{CpuUtilization, MemoryStats, ProcessSnapshot, UptimeInfo};
use vitals::samplers;

const MEMINFO: &str = "MemTotal: 16000000 kB\n\
                       MemFree: 1000000 kB\n\
                       MemAvailable: 8000000 kB\n\
                       Buffers: 400000 kB\n\
                       Cached: 3000000 kB\n";

const STAT: &str = "cpu  100 0 50 800 20 0 0 0 0 0\n\
                    cpu0 50 0 25 400 10 0 0 0 0 0\n\
                    intr 123456\n";

const PS_TABLE: &str = "USER PID %CPU %MEM VSZ RSS TTY STAT START TIME COMMAND\n\
                        root 123 99.5 0.4 10000 5000 ? R 09:58 1:02 /usr/local/bin/cruncher -j 8\n\
                        root 124 12.0 0.1 8000 2000 ? S 09:58 0:01 idleish\n";

fn write_fixture_tree(dir: &Path) {
    fs::write(dir.join("uptime"), "90000.50 180000.00\n").unwrap();
    fs::write(dir.join("loadavg"), "0.52 0.58 0.59 1/312 4242\n").unwrap();
    fs::write(dir.join("stat"), STAT).unwrap();
    fs::write(dir.join("meminfo"), MEMINFO).unwrap();
    // Process-table namespace: three live pids and some non-pid entries.
    for pid in ["1", "123", "124"] {
        fs::create_dir(dir.join(pid)).unwrap();
    }
    fs::create_dir(dir.join("sys")).unwrap();
    fs::write(dir.join("version"), "Linux version 6.1.0\n").unwrap();
}

struct FixtureListing(&'static str);

impl ProcessListing for FixtureListing {
    fn capture(&self) -> io::Result<String> {
        Ok(self.0.to_string())
    }

    fn tool_name(&self) -> &str {
        "ps"
    }
}

struct NoSummary;

impl CpuSummary for NoSummary {
    fn capture(&self) -> io::Result<String> {
        Err(io::Error::other("unavailable"))
    }
}

fn fixture_monitor(root: &Path) -> Monitor {
    Monitor::with_sources(
        ProcfsSource::with_root(root),
        Box::new(FixtureListing(PS_TABLE)),
        Box::new(NoSummary),
        4,
        Duration::ZERO,
    )
}

#[test]
fn monitor_assembles_full_snapshot_from_fixtures() {
    let dir = TempDir::new().unwrap();
    write_fixture_tree(dir.path());

    let mut monitor = fixture_monitor(dir.path());
    monitor.update();
    let snapshot = monitor.last_snapshot.expect("snapshot after update");

    assert_eq!(snapshot.uptime.uptime, "1d 1h 0m");
    assert_eq!(snapshot.uptime.load_avg, "0.52, 0.58, 0.59");

    // Static fixture: both tick readings identical, so zero busy.
    assert_eq!(snapshot.cpu.percent, 0.0);
    assert_eq!(snapshot.cpu.cores, 4);

    assert_eq!(snapshot.processes.total, 3);
    assert_eq!(snapshot.processes.high_cpu.len(), 1);
    assert_eq!(snapshot.processes.high_cpu[0].pid, "123");
    assert_eq!(snapshot.processes.high_cpu[0].name, "cruncher");

    assert_eq!(snapshot.memory.total_mb, 15_625);
    assert_eq!(snapshot.memory.used_mb, 7_812);
    assert_eq!(snapshot.memory.percent_used, 50.0);
}

#[test]
fn sampling_a_static_fixture_is_idempotent() {
    let dir = TempDir::new().unwrap();
    write_fixture_tree(dir.path());
    let src = ProcfsSource::with_root(dir.path());

    let mem_a = samplers::memory::sample(&src);
    let mem_b = samplers::memory::sample(&src);
    assert_eq!(format!("{mem_a:?}"), format!("{mem_b:?}"));

    let up_a = samplers::uptime::sample(&src);
    let up_b = samplers::uptime::sample(&src);
    assert_eq!(up_a.uptime, up_b.uptime);
    assert_eq!(up_a.load_avg, up_b.load_avg);

    let listing = FixtureListing(PS_TABLE);
    let proc_a = samplers::process::sample_with(&src, &listing, 1, Duration::ZERO);
    let proc_b = samplers::process::sample_with(&src, &listing, 1, Duration::ZERO);
    assert_eq!(proc_a.total, proc_b.total);
    assert_eq!(proc_a.high_cpu.len(), proc_b.high_cpu.len());
}

#[test]
fn missing_counter_files_degrade_per_metric() {
    // Root exists but holds no counter files: every sampler falls back to
    // its sentinel while pid enumeration still works.
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("42")).unwrap();

    let mut monitor = fixture_monitor(dir.path());
    monitor.update();
    let snapshot = monitor.last_snapshot.unwrap();

    assert_eq!(snapshot.uptime.uptime, "N/A");
    assert_eq!(snapshot.cpu.percent, 0.0);
    assert_eq!(snapshot.memory.total_mb, 0);
    assert_eq!(snapshot.processes.total, 1);
    assert_eq!(snapshot.processes.high_cpu.len(), 1);
}

#[test]
fn pid_count_ignores_non_decimal_entries() {
    let dir = TempDir::new().unwrap();
    write_fixture_tree(dir.path());
    let src = ProcfsSource::with_root(dir.path());
    assert_eq!(src.pid_count().unwrap(), 3);
}

#[test]
fn snapshot_serializes_to_json() {
    let dir = TempDir::new().unwrap();
    write_fixture_tree(dir.path());

    let mut monitor = fixture_monitor(dir.path());
    monitor.update();
    let snapshot = monitor.last_snapshot.unwrap();

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["memory"]["total_mb"], 15_625);
    assert_eq!(json["processes"]["total"], 3);
    assert_eq!(json["uptime"]["uptime"], "1d 1h 0m");
}

#[test]
fn model_defaults_are_zeroed_sentinels() {
    let cpu = CpuUtilization::default();
    assert_eq!(cpu.percent, 0.0);
    assert_eq!(cpu.cores, 1);

    let mem = MemoryStats::default();
    assert_eq!(mem.total_mb, 0);
    assert_eq!(mem.percent_used, 0.0);

    let procs = ProcessSnapshot::default();
    assert_eq!(procs.total, 0);
    assert!(procs.high_cpu.is_empty());

    let uptime = UptimeInfo::unavailable();
    assert_eq!(uptime.uptime, "N/A");
}
