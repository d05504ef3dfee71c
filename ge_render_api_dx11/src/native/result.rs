/// HRESULT-style native result codes

use std::fmt;

/// Native result code (`HRESULT`)
///
/// Negative values are failures.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HResult(pub i32);

impl HResult {
    pub const S_OK: HResult = HResult(0);
    pub const S_FALSE: HResult = HResult(1);
    pub const E_FAIL: HResult = HResult(0x8000_4005_u32 as i32);
    pub const E_INVALIDARG: HResult = HResult(0x8007_0057_u32 as i32);
    pub const E_OUTOFMEMORY: HResult = HResult(0x8007_000E_u32 as i32);
    pub const E_NOTIMPL: HResult = HResult(0x8000_4001_u32 as i32);
    pub const DXGI_ERROR_NOT_FOUND: HResult = HResult(0x887A_0002_u32 as i32);
    pub const DXGI_ERROR_INVALID_CALL: HResult = HResult(0x887A_0001_u32 as i32);
    pub const DXGI_ERROR_WAS_STILL_DRAWING: HResult = HResult(0x887A_000A_u32 as i32);
    pub const DXGI_ERROR_DEVICE_REMOVED: HResult = HResult(0x887A_0005_u32 as i32);

    /// Returns true for failure codes
    pub fn failed(self) -> bool {
        self.0 < 0
    }

    /// Returns true for success codes
    pub fn succeeded(self) -> bool {
        self.0 >= 0
    }

    /// The code as an unsigned 32-bit value, as printed by debuggers
    pub fn code(self) -> u32 {
        self.0 as u32
    }

    /// Turn a success code into `Ok(())`
    pub fn ok(self) -> NativeResult<()> {
        if self.failed() {
            Err(self)
        } else {
            Ok(())
        }
    }

    fn symbol(self) -> Option<&'static str> {
        Some(match self {
            HResult::S_OK => "S_OK",
            HResult::S_FALSE => "S_FALSE",
            HResult::E_FAIL => "E_FAIL",
            HResult::E_INVALIDARG => "E_INVALIDARG",
            HResult::E_OUTOFMEMORY => "E_OUTOFMEMORY",
            HResult::E_NOTIMPL => "E_NOTIMPL",
            HResult::DXGI_ERROR_NOT_FOUND => "DXGI_ERROR_NOT_FOUND",
            HResult::DXGI_ERROR_INVALID_CALL => "DXGI_ERROR_INVALID_CALL",
            HResult::DXGI_ERROR_WAS_STILL_DRAWING => "DXGI_ERROR_WAS_STILL_DRAWING",
            HResult::DXGI_ERROR_DEVICE_REMOVED => "DXGI_ERROR_DEVICE_REMOVED",
            _ => return None,
        })
    }
}

impl fmt::Debug for HResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol() {
            Some(name) => write!(f, "{}(0x{:08X})", name, self.code()),
            None => write!(f, "HResult(0x{:08X})", self.code()),
        }
    }
}

impl fmt::Display for HResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.code())
    }
}

/// Result of a native call; the error is the failing code
pub type NativeResult<T> = Result<T, HResult>;
