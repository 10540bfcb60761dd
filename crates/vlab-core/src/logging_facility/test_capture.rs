//! In-memory event collection for tests
//!
//! [`init_test_capture`] makes a recording layer the process-wide
//! subscriber. All tests in a binary share it, so assertions should key on
//! something unique to the test: an op name, or the request id a test
//! passes to `Lab::run_command_with`.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use vlab_core_types::schema::{
    is_boundary_field, FIELD_COMPONENT, FIELD_EVENT, FIELD_OP, FIELD_REQUEST_ID,
};

/// One recorded event. Every field value is kept in its rendered form;
/// `message` holds the event's format text.
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn from_fields(level: Level, fields: HashMap<String, String>) -> Self {
        Self {
            level,
            component: fields.get(FIELD_COMPONENT).cloned(),
            op: fields.get(FIELD_OP).cloned(),
            event: fields.get(FIELD_EVENT).cloned(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn is(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }

    /// Field names beyond component/op/event, sorted.
    pub fn payload_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .fields
            .keys()
            .map(String::as_str)
            .filter(|k| !is_boundary_field(k))
            .collect();
        keys.sort_unstable();
        keys
    }
}

#[derive(Default)]
struct Recorder(HashMap<String, String>);

impl Visit for Recorder {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_owned(), value.to_owned());
    }

    // Numbers and bools arrive here too; their Debug form matches Display.
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        self.0.insert(field.name().to_owned(), format!("{:?}", value));
    }
}

type Store = Arc<Mutex<Vec<CapturedEvent>>>;

struct CaptureLayer {
    store: Store,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut recorder = Recorder::default();
        event.record(&mut recorder);
        let captured = CapturedEvent::from_fields(*event.metadata().level(), recorder.0);
        if let Ok(mut events) = self.store.lock() {
            events.push(captured);
        }
    }
}

/// Read side of the shared capture.
#[derive(Clone)]
pub struct TestCapture {
    store: Store,
}

impl TestCapture {
    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.store.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn find(&self, op: &str, event: &str) -> Vec<CapturedEvent> {
        self.matching(|e| e.is(op, event))
    }

    /// Boundary events of `op` that carry `request_id`.
    pub fn for_request(&self, op: &str, event: &str, request_id: &str) -> Vec<CapturedEvent> {
        self.matching(|e| e.is(op, event) && e.field(FIELD_REQUEST_ID) == Some(request_id))
    }

    pub fn matching<F>(&self, predicate: F) -> Vec<CapturedEvent>
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.store
            .lock()
            .map(|events| events.iter().filter(|e| predicate(e)).cloned().collect())
            .unwrap_or_default()
    }

    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.matching(predicate).len()
    }

    /// # Panics
    ///
    /// When no `op`/`event` pair has been recorded.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let seen = self.find(op, event).len();
        assert!(
            seen > 0,
            "no `{}` event for op `{}` among {} captured",
            event,
            op,
            self.events().len()
        );
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.store.lock() {
            events.clear();
        }
    }
}

static SHARED: OnceLock<TestCapture> = OnceLock::new();

/// Install the recording layer on first use and hand back the shared
/// capture.
///
/// ```
/// use vlab_core::logging_facility::test_capture::init_test_capture;
/// use vlab_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_capture_op", domain = "ohm");
/// capture.assert_event_exists("doc_capture_op", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    SHARED
        .get_or_init(|| {
            let store = Store::default();
            let layer = CaptureLayer {
                store: Arc::clone(&store),
            };
            // Another global subscriber means nothing will be recorded;
            // assertions then fail with the empty-capture message.
            tracing_subscriber::registry().with(layer).try_init().ok();
            TestCapture { store }
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_with(pairs: &[(&str, &str)]) -> CapturedEvent {
        let fields = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CapturedEvent::from_fields(Level::INFO, fields)
    }

    #[test]
    fn test_boundary_fields_are_lifted() {
        let event = event_with(&[
            ("component", "vlab_engine::lab"),
            ("op", "run_command"),
            ("event", "end"),
            ("samples_len", "601"),
        ]);
        assert!(event.is("run_command", "end"));
        assert_eq!(event.component.as_deref(), Some("vlab_engine::lab"));
        assert_eq!(event.field("samples_len"), Some("601"));
        assert_eq!(event.payload_keys(), vec!["samples_len"]);
    }

    #[test]
    fn test_missing_op_never_matches() {
        let event = event_with(&[("message", "series sampled")]);
        assert!(!event.is("run_command", "start"));
        assert!(event.op.is_none());
    }
}
