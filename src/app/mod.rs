//! Terminal lifecycle and the serialize loop:
//! sample → render → wait-for-interval, with a cooperative shutdown flag.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};

use crate::config::Config;
use crate::controller::Monitor;
use crate::view::Presenter;

/// Restore the terminal to normal mode. Safe to call multiple times.
pub fn restore_terminal() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    let _ = disable_raw_mode();
}

/// Run the refreshing dashboard until a quit key is pressed or the shutdown
/// flag flips (signal handler side). Sets up the terminal and restores it
/// on exit.
pub fn run(config: Config, should_quit: Arc<AtomicBool>) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;

    let result = run_loop(config, &should_quit);

    restore_terminal();
    result
}

fn run_loop(config: Config, should_quit: &AtomicBool) -> io::Result<()> {
    let mut monitor = Monitor::new();
    let tick_rate = config.interval;
    // Force an immediate first sample.
    let mut last_tick = Instant::now() - tick_rate;

    loop {
        if should_quit.load(Ordering::Relaxed) {
            break;
        }

        let now = Instant::now();
        if now.duration_since(last_tick) >= tick_rate {
            monitor.update();
            last_tick = now;

            if let Some(ref snapshot) = monitor.last_snapshot {
                execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
                Presenter::render(snapshot, &config)?;
            }
        }

        let timeout = tick_rate.saturating_sub(now.elapsed());
        if event::poll(timeout.min(Duration::from_millis(100)))? {
            if let Event::Key(KeyEvent {
                code, modifiers, ..
            }) = event::read()?
            {
                if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                    break;
                }
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    _ => {}
                }
            }
        }
    }

    Ok(())
}
