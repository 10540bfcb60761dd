//! Boundary event macros
//!
//! An operation logs `start` on entry and exactly one of `end` or
//! `end_error` on exit. Exit events take the `Instant` captured at entry
//! and report `duration_ms` from it. Extra `key = value` fields follow
//! the fixed ones using ordinary `tracing` field syntax.

/// Log entry into an operation.
///
/// ```
/// # use vlab_core::log_op_start;
/// log_op_start!("run_command");
/// log_op_start!("apply_preset", domain = "bh", title = "Rapid Kerr");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = vlab_core_types::schema::EVENT_START
            $(, $($field)+)?
        )
    };
}

/// Log a successful exit.
///
/// ```
/// # use vlab_core::log_op_end;
/// let started = std::time::Instant::now();
/// log_op_end!("run_command", since = started, applied_len = 2);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, since = $started:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = vlab_core_types::schema::EVENT_END,
            duration_ms = $crate::logging_facility::elapsed_ms($started)
            $(, $($field)+)?
        )
    };
}

/// Log a failed exit. `$err` is anything convertible into `ExError`; its
/// kind, stable code and message become fields of the event.
///
/// ```
/// # use vlab_core::{log_op_error, errors::VlabError};
/// let started = std::time::Instant::now();
/// let err = VlabError::UnknownDomain { value: "optics".to_string() };
/// log_op_error!("switch_domain", err, since = started);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, since = $started:expr $(, $($field:tt)+)?) => {{
        let ex_err: $crate::errors::ExError = ::std::convert::From::from($err);
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = vlab_core_types::schema::EVENT_END_ERROR,
            duration_ms = $crate::logging_facility::elapsed_ms($started),
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            err.message = ex_err.message()
            $(, $($field)+)?
        )
    }};
}
