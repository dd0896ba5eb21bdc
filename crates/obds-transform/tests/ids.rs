//! Tests for identifier conversion and its log output.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use obds_transform::{REDACTED_VALUE, convert_id};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// In-memory log sink shared with the subscriber.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Runs `f` under a TRACE subscriber and returns what it logged.
fn logs_of<T>(f: impl FnOnce() -> T) -> (T, String) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(Level::TRACE)
        .with_ansi(false)
        .without_time()
        .finish();
    let value = tracing::subscriber::with_default(subscriber, f);
    (value, logs.contents())
}

#[test]
fn unconvertible_id_is_returned_with_warning() {
    let (converted, logs) = logs_of(|| convert_id("12345"));
    assert_eq!(converted, "12345");
    let warning = logs
        .lines()
        .find(|line| line.contains("does not have 9 digits"))
        .expect("warning logged");
    assert!(warning.contains("WARN"));
}

#[test]
fn convertible_id_logs_no_warning() {
    let (converted, logs) = logs_of(|| convert_id("000123456789"));
    assert_eq!(converted, "123456789");
    assert!(!logs.contains("WARN"));
    assert!(!logs.contains("does not have 9 digits"));
}

#[test]
fn raw_id_is_redacted_at_trace_level() {
    let (converted, logs) = logs_of(|| convert_id("PATIENT-SECRET-42"));
    assert_eq!(converted, "PATIENT-SECRET-42");
    assert!(!logs.contains("PATIENT-SECRET-42"));
    assert!(logs.contains(REDACTED_VALUE));
}
