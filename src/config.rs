use std::time::Duration;

/// Immutable runtime settings, assembled once from the command line and
/// passed to the loop and renderer.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// How long to sleep between sampling cycles.
    pub interval: Duration,
    /// Whether to emit colors and text attributes.
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            color: true,
        }
    }
}
