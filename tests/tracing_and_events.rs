//! Integration tests for the `tracing` events emitted on registration and
//! lookup.
//!
//! Events are captured with a thread-local `fmt` subscriber writing into a
//! shared buffer, so tests running in parallel do not see each other's output.

use rawconv::{impl_encodable, marshal, BoxError, MarshalFunc, Marshaler, TypeKey};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::Level;

struct Traced;
struct Missing;

impl_encodable!(Traced, Missing);

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with every event down to TRACE captured, one line per event.
fn capture_events(f: impl FnOnce()) -> Vec<String> {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_ansi(false)
        .without_time()
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let raw = capture.0.lock().unwrap().clone();
    String::from_utf8(raw)
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

fn containing<'a>(events: &'a [String], needle: &str) -> Vec<&'a str> {
    events
        .iter()
        .filter(|line| line.contains(needle))
        .map(String::as_str)
        .collect()
}

#[test]
fn test_register_event_reports_replacement() {
    let events = capture_events(|| {
        let mut m = Marshaler::new();
        m.register(TypeKey::of::<Traced>(), MarshalFunc::new(|_| Ok("a".into())));
        m.register_fn(|_: &Traced| Ok::<_, BoxError>("b".into()));
    });

    let registered = containing(&events, "registered marshal func");
    assert_eq!(registered.len(), 2, "{events:#?}");
    assert!(registered[0].contains("DEBUG"));
    assert!(registered[0].contains(r#"type_name="tracing_and_events::Traced""#));
    assert!(registered[0].ends_with("replaced=false"));
    assert!(registered[1].ends_with("replaced=true"));
}

#[test]
fn test_own_hit_event() {
    let mut m = Marshaler::new();
    m.register_fn(|_: &Traced| Ok::<_, BoxError>("traced".into()));

    let events = capture_events(|| {
        assert!(m.func(TypeKey::of::<Traced>()).is_some());
    });

    let hits = containing(&events, "marshal func found on marshaler");
    assert_eq!(hits.len(), 1, "{events:#?}");
    assert!(hits[0].contains("TRACE"));
    assert!(hits[0].contains(r#"type_name="tracing_and_events::Traced""#));
    // an own hit never reaches the default marshaler
    assert!(containing(&events, "lookup on default marshaler").is_empty());
}

#[test]
fn test_default_miss_event() {
    let events = capture_events(|| {
        assert!(Marshaler::new().func(TypeKey::of::<Missing>()).is_none());
    });

    let lookups = containing(&events, "marshal func lookup on default marshaler");
    assert_eq!(lookups.len(), 1, "{events:#?}");
    assert!(lookups[0].contains(r#"type_name="tracing_and_events::Missing""#));
    assert!(lookups[0].ends_with("found=false"));
}

#[test]
fn test_default_hit_event_on_marshal() {
    let events = capture_events(|| {
        assert_eq!(marshal(&Duration::from_secs(2)).unwrap(), "2s");
    });

    let lookups = containing(&events, r#"type_name="core::time::Duration" found="#);
    assert_eq!(lookups.last().copied().map(|l| l.ends_with("found=true")), Some(true));
}
