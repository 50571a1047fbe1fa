use std::io::{self, Read};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use super::{CpuSummary, ProcessListing};

/// `ps aux` behind the [`ProcessListing`] trait.
pub struct PsListing {
    timeout: Duration,
}

impl PsListing {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for PsListing {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl ProcessListing for PsListing {
    fn capture(&self) -> io::Result<String> {
        run_with_timeout("ps", &["aux"], self.timeout)
    }

    fn tool_name(&self) -> &str {
        "ps"
    }
}

/// `top -bn1` behind the [`CpuSummary`] trait.
pub struct TopSummary {
    timeout: Duration,
}

impl TopSummary {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TopSummary {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

impl CpuSummary for TopSummary {
    fn capture(&self) -> io::Result<String> {
        run_with_timeout("top", &["-bn1"], self.timeout)
    }
}

/// Run a one-shot utility, capturing stdout, killing the child if it
/// outlives `timeout`. A timeout or non-zero exit is an error; the child
/// handle is reaped on every path.
fn run_with_timeout(program: &str, args: &[&str], timeout: Duration) -> io::Result<String> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()?;

    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| io::Error::other("child stdout not captured"))?;

    // Drain stdout on a separate thread so a chatty child cannot deadlock
    // against a full pipe while we poll for exit.
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = String::new();
        let result = stdout.read_to_string(&mut buf).map(|_| buf);
        let _ = tx.send(result);
    });

    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait()? {
            Some(status) if status.success() => {
                return match rx.recv_timeout(timeout) {
                    Ok(Ok(output)) => Ok(output),
                    Ok(Err(err)) => Err(err),
                    Err(_) => Err(io::Error::new(
                        io::ErrorKind::TimedOut,
                        format!("{program}: output not drained in time"),
                    )),
                };
            }
            Some(status) => {
                return Err(io::Error::other(format!("{program} exited with {status}")));
            }
            None => {
                if Instant::now() >= deadline {
                    kill_and_reap(&mut child);
                    return Err(io::Error::new(
                        io::ErrorKind::TimedOut,
                        format!("{program} timed out after {timeout:?}"),
                    ));
                }
                thread::sleep(Duration::from_millis(10));
            }
        }
    }
}

fn kill_and_reap(child: &mut Child) {
    if let Err(err) = child.kill() {
        tracing::debug!(%err, "failed to kill timed-out child");
    }
    let _ = child.wait();
}
