//! The sampling-and-derivation core: free functions that read raw kernel
//! counters through a source, take deltas across a window where needed, and
//! derive the display-ready records in [`crate::model`].
//!
//! Samplers never fail outright: every read, spawn, or parse failure is
//! absorbed into that metric's documented sentinel/zero value and logged.
//! One broken counter never takes down the monitoring session.

pub mod cpu;
pub mod memory;
pub mod process;
pub mod uptime;
