//! Error types for the geEngine render API
//!
//! This module defines the error types shared by the abstract render API and
//! its backends: native driver failures, initialization failures, and
//! resource validation errors.

use std::fmt;

/// Result type for render API operations
pub type Result<T> = std::result::Result<T, Error>;

/// Render API errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error without a native failure code
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (texture, buffer, shader, etc.)
    InvalidResource(String),

    /// Initialization failed (no adapter, device or swap chain)
    InitializationFailed(String),

    /// A format has no native counterpart for the requested usage
    InvalidFormat(String),

    /// A native driver call failed with the given result code
    DeviceError {
        /// Descriptive message, including the formatted result code
        message: String,
        /// Raw native result code (HRESULT bits)
        code: u32,
    },
}

impl Error {
    /// Native failure code carried by this error, if any
    pub fn native_code(&self) -> Option<u32> {
        match self {
            Error::DeviceError { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidFormat(msg) => write!(f, "Invalid format: {}", msg),
            Error::DeviceError { message, .. } => write!(f, "Device error: {}", message),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
