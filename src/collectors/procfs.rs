use std::fs;
use std::io;
use std::path::PathBuf;

/// Reader for the kernel counter pseudo-files.
///
/// Every accessor re-reads its file on each call; the kernel regenerates
/// the content per open. The root is injectable so tests can point the
/// reader at a fixture tree instead of a live `/proc`.
pub struct ProcfsSource {
    root: PathBuf,
}

impl ProcfsSource {
    pub fn new() -> Self {
        Self::with_root("/proc")
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read(&self, name: &str) -> io::Result<String> {
        fs::read_to_string(self.root.join(name))
    }

    /// Raw `uptime` content: first field is seconds since boot, fractional.
    pub fn uptime(&self) -> io::Result<String> {
        self.read("uptime")
    }

    /// Raw `loadavg` content: first three fields are the 1/5/15-minute
    /// load averages as decimal text.
    pub fn loadavg(&self) -> io::Result<String> {
        self.read("loadavg")
    }

    /// Raw `stat` content; the aggregate `cpu ` line carries the cumulative
    /// tick counters.
    pub fn stat(&self) -> io::Result<String> {
        self.read("stat")
    }

    /// Raw `meminfo` content: "Key: value kB" lines.
    pub fn meminfo(&self) -> io::Result<String> {
        self.read("meminfo")
    }

    /// Count live processes: entries in the root whose name is all-decimal.
    pub fn pid_count(&self) -> io::Result<usize> {
        let mut count = 0;
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !name.is_empty() && name.chars().all(|c| c.is_ascii_digit()) {
                count += 1;
            }
        }
        Ok(count)
    }
}

impl Default for ProcfsSource {
    fn default() -> Self {
        Self::new()
    }
}
