use crate::collectors::ProcfsSource;
use crate::model::MemoryStats;

/// Raw kibibyte counters as exposed by the memory pseudo-file.
#[derive(Clone, Copy, Debug)]
pub struct MemCounters {
    pub total_kb: u64,
    pub free_kb: u64,
    pub available_kb: Option<u64>,
    // Parsed for parity with the kernel file; not yet surfaced.
    #[allow(dead_code)]
    pub buffers_kb: u64,
    #[allow(dead_code)]
    pub cached_kb: u64,
}

impl MemCounters {
    /// Kibibytes in use: total minus available, falling back to free on
    /// kernels without an availability estimate.
    fn used_kb(&self) -> u64 {
        self.total_kb
            .saturating_sub(self.available_kb.unwrap_or(self.free_kb))
    }
}

/// Sample memory usage. Missing keys, malformed numbers, or a zero total
/// all collapse to the all-zero record.
pub fn sample(src: &ProcfsSource) -> MemoryStats {
    let counters = match src.meminfo() {
        Ok(text) => parse_meminfo(&text),
        Err(err) => {
            tracing::warn!(%err, "memory counters unreadable");
            None
        }
    };
    counters.map(derive_stats).unwrap_or_default()
}

/// Parse "Key: value kB" lines for the five keys of interest. Returns
/// `None` when MemTotal or MemFree is absent or a matched value fails to
/// parse.
pub fn parse_meminfo(text: &str) -> Option<MemCounters> {
    let mut total = None;
    let mut free = None;
    let mut available = None;
    let mut buffers = None;
    let mut cached = None;

    for line in text.lines() {
        let mut parts = line.split_whitespace();
        let Some(key) = parts.next() else { continue };
        let slot = match key {
            "MemTotal:" => &mut total,
            "MemFree:" => &mut free,
            "MemAvailable:" => &mut available,
            "Buffers:" => &mut buffers,
            "Cached:" => &mut cached,
            _ => continue,
        };
        *slot = Some(parts.next()?.parse::<u64>().ok()?);
    }

    Some(MemCounters {
        total_kb: total?,
        free_kb: free?,
        available_kb: available,
        buffers_kb: buffers.unwrap_or(0),
        cached_kb: cached.unwrap_or(0),
    })
}

/// Derive the display record: kB → MB by integer division, used percentage
/// to one decimal.
pub fn derive_stats(c: MemCounters) -> MemoryStats {
    if c.total_kb == 0 {
        return MemoryStats::default();
    }
    let used_kb = c.used_kb();
    let percent = (used_kb as f64 / c.total_kb as f64 * 1000.0).round() / 10.0;
    MemoryStats {
        total_mb: c.total_kb / 1024,
        used_mb: used_kb / 1024,
        free_mb: c.available_kb.unwrap_or(c.free_kb) / 1024,
        percent_used: percent,
    }
}
