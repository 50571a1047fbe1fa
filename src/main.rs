use std::io;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use clap::Parser;
use signal_hook::consts::{SIGINT, SIGTERM};
use tracing_subscriber::EnvFilter;

use vitals::app;
use vitals::config::Config;
use vitals::controller::Monitor;
use vitals::view::Presenter;

#[derive(Parser)]
#[command(
    name = "vitals",
    version,
    about = "Terminal dashboard for single-host system vitals"
)]
struct Cli {
    /// Update interval in seconds
    #[arg(short, long, default_value_t = 60)]
    interval: u64,

    /// Disable colored output
    #[arg(short = 'n', long)]
    no_color: bool,

    /// Sample once, print the dashboard, and exit
    #[arg(long)]
    once: bool,

    /// With --once, emit the snapshot as JSON instead of the dashboard
    #[arg(long, requires = "once")]
    json: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging();

    let config = Config {
        interval: Duration::from_secs(cli.interval.max(1)),
        color: !cli.no_color,
    };

    if cli.once {
        let mut monitor = Monitor::new();
        monitor.update();
        if let Some(ref snapshot) = monitor.last_snapshot {
            if cli.json {
                let json = serde_json::to_string_pretty(snapshot).map_err(io::Error::other)?;
                println!("{json}");
            } else {
                Presenter::render(snapshot, &config)?;
            }
        }
        return Ok(());
    }

    let should_quit = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(&should_quit))?;
    }

    let result = app::run(config, should_quit);
    println!("vitals stopped.");
    result
}

/// Route diagnostics to a file (the dashboard owns stdout), filtered by
/// RUST_LOG, default warn.
fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let appender = tracing_appender::rolling::never(std::env::temp_dir(), "vitals.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    guard
}
