//! Unit tests for the Engine logging singleton
//!
//! LOGGER is a global shared by every test in the crate, so each test is #[serial].

use crate::ge::{Engine, Error};
use crate::ge::log::{Logger, LogEntry, LogSeverity};
use std::sync::{Arc, Mutex};
use serial_test::serial;

struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn capture() -> Arc<Mutex<Vec<LogEntry>>> {
    let entries = Arc::new(Mutex::new(Vec::new()));
    Engine::set_logger(CaptureLogger { entries: entries.clone() });
    entries
}

#[test]
#[serial]
fn test_log_reaches_custom_logger() {
    let entries = capture();

    Engine::log(LogSeverity::Info, "ge::Engine", "hello".to_string());

    let entries = entries.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].source, "ge::Engine");
    assert_eq!(entries[0].message, "hello");
    assert!(entries[0].file.is_none());
    drop(entries);
    Engine::reset_logger();
}

#[test]
#[serial]
fn test_log_detailed_carries_location() {
    let entries = capture();

    Engine::log_detailed(LogSeverity::Error, "ge::dx11", "boom".to_string(), "file.rs", 12);

    let entries = entries.lock().unwrap();
    assert_eq!(entries[0].file, Some("file.rs"));
    assert_eq!(entries[0].line, Some(12));
    drop(entries);
    Engine::reset_logger();
}

#[test]
#[serial]
fn test_macros_route_through_engine() {
    let entries = capture();

    crate::engine_trace!("ge::test", "t {}", 1);
    crate::engine_debug!("ge::test", "d {}", 2);
    crate::engine_info!("ge::test", "i {}", 3);
    crate::engine_warn!("ge::test", "w {}", 4);
    crate::engine_error!("ge::test", "e {}", 5);

    let entries = entries.lock().unwrap();
    let severities: Vec<LogSeverity> = entries.iter().map(|e| e.severity).collect();
    assert_eq!(
        severities,
        vec![
            LogSeverity::Trace,
            LogSeverity::Debug,
            LogSeverity::Info,
            LogSeverity::Warn,
            LogSeverity::Error,
        ]
    );
    assert_eq!(entries[4].message, "e 5");
    assert!(entries[4].line.is_some());
    drop(entries);
    Engine::reset_logger();
}

#[test]
#[serial]
fn test_engine_err_logs_and_builds_backend_error() {
    let entries = capture();

    let err = crate::engine_err!("ge::dx11", "lost device {}", 7);
    match err {
        Error::BackendError(msg) => assert_eq!(msg, "lost device 7"),
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(entries.lock().unwrap().len(), 1);
    Engine::reset_logger();
}

#[test]
#[serial]
fn test_engine_bail_returns_early() {
    let entries = capture();

    fn check(value: u32) -> crate::ge::Result<u32> {
        if value == 0 {
            crate::engine_bail!("ge::dx11", "value must be non-zero");
        }
        Ok(value)
    }

    assert!(check(0).is_err());
    assert_eq!(check(3).unwrap(), 3);
    assert_eq!(entries.lock().unwrap().len(), 1);
    Engine::reset_logger();
}
