//! Snapshot assembly: one `update()` runs the four samplers in sequence
//! and bundles their records into a single [`SystemSnapshot`].

use std::time::Duration;

use chrono::Local;
use sysinfo::System;

use crate::collectors::{CpuSummary, ProcessListing, ProcfsSource, PsListing, TopSummary};
use crate::model::SystemSnapshot;
use crate::samplers;

pub struct Monitor {
    procfs: ProcfsSource,
    listing: Box<dyn ProcessListing>,
    cpu_fallback: Box<dyn CpuSummary>,
    core_count: usize,
    cpu_wait: Duration,
    pub last_snapshot: Option<SystemSnapshot>,
}

impl Monitor {
    pub fn new() -> Self {
        // Logical core count is fixed for the life of the process; read it
        // once here rather than on every cycle.
        let sys = System::new_all();
        let core_count = sys.cpus().len().max(1);

        Self::with_sources(
            ProcfsSource::new(),
            Box::new(PsListing::default()),
            Box::new(TopSummary::default()),
            core_count,
            samplers::cpu::SAMPLE_WAIT,
        )
    }

    /// Construct with explicit sources. Tests inject fixture-backed
    /// implementations and a zero CPU wait here.
    pub fn with_sources(
        procfs: ProcfsSource,
        listing: Box<dyn ProcessListing>,
        cpu_fallback: Box<dyn CpuSummary>,
        core_count: usize,
        cpu_wait: Duration,
    ) -> Self {
        Self {
            procfs,
            listing,
            cpu_fallback,
            core_count,
            cpu_wait,
            last_snapshot: None,
        }
    }

    /// Run one sampling cycle. Each sampler absorbs its own failures, so
    /// this always produces a snapshot. Blocks for the CPU sample window.
    pub fn update(&mut self) {
        let uptime = samplers::uptime::sample(&self.procfs);
        let cpu = samplers::cpu::sample(
            &self.procfs,
            self.cpu_fallback.as_ref(),
            self.core_count,
            self.cpu_wait,
        );
        let processes = samplers::process::sample(&self.procfs, self.listing.as_ref());
        let memory = samplers::memory::sample(&self.procfs);

        self.last_snapshot = Some(SystemSnapshot {
            time: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            uptime,
            cpu,
            processes,
            memory,
        });
    }
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new()
    }
}
