//! Structured logging for lab sessions
//!
//! The engine wraps each public operation (`run_command`, `apply_preset`)
//! in `log_op_start!` and `log_op_end!`/`log_op_error!`. Inside the core
//! only `tracing::debug!` detail is emitted: parse counts, clamp
//! saturation, sampled series sizes.
//!
//! Binaries call [`init`] once with the configured [`Profile`]. Tests
//! install an in-memory collector with [`init_test_capture`] instead.

use std::time::Instant;

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};

/// Whole milliseconds since `started`, saturating at `u64::MAX`.
pub fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
