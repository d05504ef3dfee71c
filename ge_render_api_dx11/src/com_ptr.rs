/// Owning native handle wrappers

use std::fmt;
use std::sync::{Arc, RwLock};

use crate::native::{NativeDevice, RawHandle};

// ============================================================================
// COMPTR
// ============================================================================

/// Owns exactly one reference to a native object
///
/// Cloning adds a reference, dropping releases one. This is the only place
/// the backend releases native references.
pub struct ComPtr {
    raw: RawHandle,
    device: Arc<dyn NativeDevice>,
}

impl ComPtr {
    /// Take ownership of a reference the caller already holds
    ///
    /// Every native call that returns a handle has added that reference.
    pub fn from_raw(raw: RawHandle, device: Arc<dyn NativeDevice>) -> Self {
        Self { raw, device }
    }

    /// Wrap an optional handle returned by a native getter
    pub fn from_raw_opt(raw: Option<RawHandle>, device: &Arc<dyn NativeDevice>) -> Option<Self> {
        raw.map(|raw| Self::from_raw(raw, device.clone()))
    }

    /// Borrow the raw handle for a native call
    pub fn raw(&self) -> RawHandle {
        self.raw
    }

    pub fn device(&self) -> &Arc<dyn NativeDevice> {
        &self.device
    }

    pub fn set_debug_name(&self, name: &str) {
        self.device.set_debug_name(self.raw, name);
    }
}

impl Clone for ComPtr {
    fn clone(&self) -> Self {
        self.device.add_ref(self.raw);
        Self { raw: self.raw, device: self.device.clone() }
    }
}

impl Drop for ComPtr {
    fn drop(&mut self) {
        self.device.release(self.raw);
    }
}

impl PartialEq for ComPtr {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for ComPtr {}

impl fmt::Debug for ComPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComPtr").field(&self.raw.0).finish()
    }
}

/// Raw handle of an optional pointer, for native calls that accept null
pub fn raw_of(ptr: Option<&ComPtr>) -> Option<RawHandle> {
    ptr.map(ComPtr::raw)
}

// ============================================================================
// RESOURCE CELL
// ============================================================================

/// Interior slot holding a wrapper's native objects until released
///
/// Lets `release(&self)` run once through a shared `Arc`, and lets the back
/// buffer be rebuilt in place after a swap-chain resize.
pub struct ResourceCell<T> {
    inner: RwLock<Option<T>>,
}

impl<T> ResourceCell<T> {
    pub fn new(value: T) -> Self {
        Self { inner: RwLock::new(Some(value)) }
    }

    pub fn empty() -> Self {
        Self { inner: RwLock::new(None) }
    }

    /// Run `f` on the live value; `None` once released
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        guard.as_ref().map(f)
    }

    /// Install a new value, dropping the previous one
    pub fn replace(&self, value: T) {
        let old = {
            let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
            guard.replace(value)
        };
        drop(old);
    }

    /// Remove the value; dropping it releases the native objects
    pub fn take(&self) -> Option<T> {
        self.inner.write().unwrap_or_else(|e| e.into_inner()).take()
    }

    pub fn is_set(&self) -> bool {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).is_some()
    }
}

// ============================================================================
// NATIVE RESOURCE ACCESS
// ============================================================================

/// Wrappers that own a copyable, mappable native resource
pub(crate) trait NativeResource {
    /// Raw handle of the resource; `None` once released
    fn native_resource(&self) -> Option<RawHandle>;
}

#[cfg(test)]
#[path = "com_ptr_tests.rs"]
mod tests;
