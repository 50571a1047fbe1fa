use serde::Serialize;

// --- Per-metric records ---

/// Uptime and load average, already formatted for display.
#[derive(Clone, Debug, Serialize)]
pub struct UptimeInfo {
    pub uptime: String,
    pub load_avg: String,
}

impl UptimeInfo {
    /// Sentinel returned when the uptime counters cannot be read.
    pub fn unavailable() -> Self {
        Self {
            uptime: "N/A".to_string(),
            load_avg: "N/A".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct CpuUtilization {
    /// Percent of CPU time spent busy over the sample window, in [0, 100].
    pub percent: f64,
    pub cores: usize,
}

impl Default for CpuUtilization {
    fn default() -> Self {
        Self {
            percent: 0.0,
            cores: 1,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct HighCpuProcess {
    pub pid: String,
    pub name: String,
    pub cpu: f64,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ProcessSnapshot {
    /// Live process count from the process-table namespace.
    pub total: usize,
    /// Processes at or above the flagging threshold, one entry per pid,
    /// in the order they were first observed.
    pub high_cpu: Vec<HighCpuProcess>,
}

#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct MemoryStats {
    pub total_mb: u64,
    pub used_mb: u64,
    pub free_mb: u64,
    pub percent_used: f64,
}

// --- Aggregated snapshot, one per sampling cycle ---

#[derive(Clone, Debug, Serialize)]
pub struct SystemSnapshot {
    pub time: String,
    pub uptime: UptimeInfo,
    pub cpu: CpuUtilization,
    pub processes: ProcessSnapshot,
    pub memory: MemoryStats,
}
