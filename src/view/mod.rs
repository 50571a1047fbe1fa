mod dashboard;
mod shared;

pub use shared::{level_color, progress_bar};

use std::io;

use crate::config::Config;
use crate::model::SystemSnapshot;

pub struct Presenter;

impl Presenter {
    /// Draw one dashboard frame from the current cursor position. Clearing
    /// the screen is the caller's concern: the loop clears per frame, the
    /// one-shot mode prints inline.
    pub fn render(snapshot: &SystemSnapshot, config: &Config) -> io::Result<()> {
        dashboard::render(snapshot, config)
    }
}
