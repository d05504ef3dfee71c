//! Logging for the geEngine render API
//!
//! Backends never print directly. Every message goes through the [`Logger`]
//! registered on the [`Engine`](crate::ge::Engine) singleton:
//! - custom sinks implement the Logger trait
//! - severities Trace, Debug, Info, Warn, Error
//! - the default sink prints coloured lines with a local timestamp
//! - Error entries carry the file:line of the call site

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Logger trait for custom log sinks
///
/// # Example
///
/// ```no_run
/// use ge_render_api::ge::log::{Logger, LogEntry};
///
/// struct FileLogger {
///     file: std::fs::File,
/// }
///
/// impl Logger for FileLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Write to file...
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    ///
    /// # Arguments
    ///
    /// * `entry` - The log entry to process
    fn log(&self, entry: &LogEntry);
}

/// A single log record
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level
    pub severity: LogSeverity,

    /// Timestamp when the entry was created
    pub timestamp: SystemTime,

    /// Source module (e.g., "ge::Engine", "ge::dx11")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for detailed ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for detailed ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Per-call native tracing
    Trace,

    /// Development information (resource creation, include resolution)
    Debug,

    /// Lifecycle events (device created, swap chain resized)
    Info,

    /// Recoverable problems (bad config value, falling back)
    Warn,

    /// Failures surfaced to the caller (compile errors, native failures)
    Error,
}

/// Console logger with coloured output
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
///
/// Entries below `min_severity` are dropped.
pub struct DefaultLogger {
    /// Lowest severity that is printed
    pub min_severity: LogSeverity,
}

impl DefaultLogger {
    /// Create a console logger printing `min_severity` and above
    pub fn new(min_severity: LogSeverity) -> Self {
        Self { min_severity }
    }
}

impl Default for DefaultLogger {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::new(LogSeverity::Debug)
        } else {
            Self::new(LogSeverity::Info)
        }
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        if entry.severity < self.min_severity {
            return;
        }

        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let severity_str = match entry.severity {
            LogSeverity::Trace => "TRACE".bright_black(),
            LogSeverity::Debug => "DEBUG".cyan(),
            LogSeverity::Info => "INFO ".green(),
            LogSeverity::Warn => "WARN ".yellow(),
            LogSeverity::Error => "ERROR".red().bold(),
        };

        let source = entry.source.bright_blue();

        // Compiler diagnostics span several lines; indent the continuation
        let message = entry.message.replace('\n', "\n    ");

        if let (Some(file), Some(line)) = (entry.file, entry.line) {
            println!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp, severity_str, source, message, file, line
            );
        } else {
            println!("[{}] [{}] [{}] {}", timestamp, severity_str, source, message);
        }
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message
///
/// # Example
///
/// ```no_run
/// # use ge_render_api::engine_trace;
/// engine_trace!("ge::dx11", "IASetVertexBuffers slot {}", 0);
/// ```
#[macro_export]
macro_rules! engine_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::ge::Engine::log(
            $crate::ge::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message
///
/// # Example
///
/// ```no_run
/// # use ge_render_api::engine_debug;
/// engine_debug!("ge::dx11", "Created texture {}x{}", 256, 256);
/// ```
#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::ge::Engine::log(
            $crate::ge::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message
///
/// # Example
///
/// ```no_run
/// # use ge_render_api::engine_info;
/// engine_info!("ge::dx11", "Device created on adapter {}", 0);
/// ```
#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::ge::Engine::log(
            $crate::ge::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message
///
/// # Example
///
/// ```no_run
/// # use ge_render_api::engine_warn;
/// engine_warn!("ge::dx11", "Invalid adapter index {}, using the first one", 3);
/// ```
#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::ge::Engine::log(
            $crate::ge::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
///
/// # Example
///
/// ```no_run
/// # use ge_render_api::engine_error;
/// engine_error!("ge::dx11", "Could not compile shader {}", "Data/Shaders/basic.hlsl");
/// ```
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::ge::Engine::log_detailed(
            $crate::ge::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

/// Log an ERROR message and evaluate to an `Error::BackendError` with the same text
///
/// # Example
///
/// ```no_run
/// # use ge_render_api::engine_err;
/// # use ge_render_api::ge::Result;
/// fn open() -> Result<()> {
///     Err(engine_err!("ge::dx11", "Swap chain not created"))
/// }
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::ge::Engine::log_detailed(
            $crate::ge::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::ge::Error::BackendError(message)
    }};
}

/// Log an ERROR message and return early with an `Error::BackendError`
///
/// # Example
///
/// ```no_run
/// # use ge_render_api::engine_bail;
/// # use ge_render_api::ge::Result;
/// fn check(count: u32) -> Result<()> {
///     if count == 0 {
///         engine_bail!("ge::dx11", "Buffer count must be non-zero");
///     }
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
