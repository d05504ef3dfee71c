//! Unit tests for error.rs
//!
//! Covers Display output, the native code accessor and `?` propagation.

use crate::error::{Error, Result};

// ============================================================================
// DISPLAY
// ============================================================================

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("swap chain lost".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Backend error"));
    assert!(display.contains("swap chain lost"));
}

#[test]
fn test_out_of_memory_display() {
    assert_eq!(format!("{}", Error::OutOfMemory), "Out of GPU memory");
}

#[test]
fn test_invalid_format_display() {
    let err = Error::InvalidFormat("R8G8B8A8_UNORM cannot be bound as depth".to_string());
    let display = format!("{}", err);
    assert!(display.starts_with("Invalid format"));
    assert!(display.contains("R8G8B8A8_UNORM"));
}

#[test]
fn test_device_error_display_keeps_message() {
    let err = Error::DeviceError {
        message: "CreateTexture2D failed\n(HRESULT: 0x8007000E)".to_string(),
        code: 0x8007_000E,
    };
    let display = format!("{}", err);
    assert!(display.contains("CreateTexture2D failed"));
    assert!(display.contains("0x8007000E"));
}

#[test]
fn test_initialization_failed_display() {
    let err = Error::InitializationFailed("No graphic adapters found".to_string());
    assert!(format!("{}", err).contains("No graphic adapters found"));
}

// ============================================================================
// ACCESSORS
// ============================================================================

#[test]
fn test_native_code_only_on_device_error() {
    let err = Error::DeviceError { message: "x".to_string(), code: 0x8007_0057 };
    assert_eq!(err.native_code(), Some(0x8007_0057));

    assert_eq!(Error::OutOfMemory.native_code(), None);
    assert_eq!(Error::InvalidFormat("f".to_string()).native_code(), None);
}

#[test]
fn test_error_is_std_error() {
    let err = Error::OutOfMemory;
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_clone_preserves_code() {
    let err = Error::DeviceError { message: "map".to_string(), code: 0x887A_0001 };
    let copy = err.clone();
    assert_eq!(copy.native_code(), Some(0x887A_0001));
    assert_eq!(format!("{}", err), format!("{}", copy));
}

// ============================================================================
// PROPAGATION
// ============================================================================

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<u32> {
        Err(Error::DeviceError { message: "inner".to_string(), code: 0x8000_4005 })
    }

    fn outer() -> Result<u32> {
        let value = inner()?;
        Ok(value + 1)
    }

    match outer() {
        Err(Error::DeviceError { code, .. }) => assert_eq!(code, 0x8000_4005),
        other => panic!("unexpected result: {:?}", other),
    }
}
