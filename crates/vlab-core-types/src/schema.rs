//! Names used in vlab's structured log events
//!
//! Boundary events are emitted by the `log_op_*` macros in `vlab-core`.
//! Each carries `component`, `op` and `event`; end events add the elapsed
//! time and whatever counters the operation reports.

/// `event` value on entry to an operation.
pub const EVENT_START: &str = "start";
/// `event` value when an operation returns `Ok`.
pub const EVENT_END: &str = "end";
/// `event` value when an operation returns `Err`.
pub const EVENT_END_ERROR: &str = "end_error";

pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_SOURCE: &str = "source";
pub const FIELD_DOMAIN: &str = "domain";

/// Counters on the end event of `run_command`.
pub const RUN_COMMAND_COUNTERS: [&str; 3] = ["actions_len", "applied_len", "samples_len"];

/// Whether `field` belongs on every boundary event regardless of op.
pub fn is_boundary_field(field: &str) -> bool {
    matches!(field, FIELD_COMPONENT | FIELD_OP | FIELD_EVENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_distinct() {
        let events = [EVENT_START, EVENT_END, EVENT_END_ERROR];
        for (i, a) in events.iter().enumerate() {
            for b in &events[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_boundary_fields() {
        assert!(is_boundary_field("op"));
        assert!(!is_boundary_field(FIELD_DOMAIN));
        assert!(!RUN_COMMAND_COUNTERS.contains(&FIELD_DURATION_MS));
    }
}
