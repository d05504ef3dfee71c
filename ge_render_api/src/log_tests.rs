//! Unit tests for log.rs
//!
//! Tests LogSeverity ordering, LogEntry construction and the DefaultLogger filter.

use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use std::sync::Mutex;
use std::time::SystemTime;

fn entry(severity: LogSeverity, message: &str) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "ge::dx11".to_string(),
        message: message.to_string(),
        file: None,
        line: None,
    }
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_debug_names() {
    assert_eq!(format!("{:?}", LogSeverity::Trace), "Trace");
    assert_eq!(format!("{:?}", LogSeverity::Warn), "Warn");
    assert_eq!(format!("{:?}", LogSeverity::Error), "Error");
}

// ============================================================================
// LOG ENTRY TESTS
// ============================================================================

#[test]
fn test_log_entry_with_location() {
    let e = LogEntry {
        severity: LogSeverity::Error,
        timestamp: SystemTime::now(),
        source: "ge::dx11".to_string(),
        message: "CreateBuffer failed".to_string(),
        file: Some("render_api.rs"),
        line: Some(42),
    };

    assert_eq!(e.file, Some("render_api.rs"));
    assert_eq!(e.line, Some(42));
    let copy = e.clone();
    assert_eq!(copy.message, "CreateBuffer failed");
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_default_logger_prints_every_severity() {
    let logger = DefaultLogger::new(LogSeverity::Trace);
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        logger.log(&entry(severity, "message"));
    }
}

#[test]
fn test_default_logger_multiline_message() {
    let logger = DefaultLogger::new(LogSeverity::Trace);
    let mut e = entry(LogSeverity::Error, "basic.hlsl(3,1): error X3000\nbasic.hlsl(4,1): error X3004");
    e.file = Some("shader.rs");
    e.line = Some(7);
    logger.log(&e);
}

#[test]
fn test_default_logger_default_threshold() {
    let logger = DefaultLogger::default();
    if cfg!(debug_assertions) {
        assert_eq!(logger.min_severity, LogSeverity::Debug);
    } else {
        assert_eq!(logger.min_severity, LogSeverity::Info);
    }
}

// ============================================================================
// LOGGER TRAIT TESTS
// ============================================================================

struct CountingLogger {
    min: LogSeverity,
    count: Mutex<usize>,
}

impl Logger for CountingLogger {
    fn log(&self, entry: &LogEntry) {
        if entry.severity >= self.min {
            *self.count.lock().unwrap() += 1;
        }
    }
}

#[test]
fn test_custom_logger_threshold() {
    let logger = CountingLogger { min: LogSeverity::Warn, count: Mutex::new(0) };
    logger.log(&entry(LogSeverity::Debug, "skipped"));
    logger.log(&entry(LogSeverity::Warn, "kept"));
    logger.log(&entry(LogSeverity::Error, "kept"));
    assert_eq!(*logger.count.lock().unwrap(), 2);
}

#[test]
fn test_logger_as_trait_object() {
    let logger: Box<dyn Logger> = Box::new(DefaultLogger::new(LogSeverity::Error));
    logger.log(&entry(LogSeverity::Info, "filtered out"));
}
