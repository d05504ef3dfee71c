/// Buffers - D3D11 vertex, index, constant and stream-output buffers

use std::sync::{Arc, RwLock, Weak};

use ge_render_api::ge::render::{
    CpuAccessFlags, IndexBufferFormat, LogicalResource, ResourceKind, ResourceUsage,
    StreamOutputDeclaration, VertexDeclaration,
};
use ge_render_api::ge::Result;

use crate::com_ptr::{ComPtr, NativeResource, ResourceCell};
use crate::dx11::throw_if_failed;
use crate::native::{BindFlag, BufferDesc, NativeDevice, RawHandle, ResourceMiscFlag, SubresourceData};
use crate::translate;

// ============================================================================
// NATIVE BUFFER
// ============================================================================

/// Native buffer shared by every buffer kind
pub(crate) struct NativeBuffer {
    buffer: ResourceCell<ComPtr>,
    size: usize,
    usage: ResourceUsage,
    cpu_access: CpuAccessFlags,
    stride: u32,
    name: RwLock<String>,
}

impl NativeBuffer {
    /// Create the native buffer
    ///
    /// # Panics
    ///
    /// If `size` is zero or above `u32::MAX`, or `bind_flags` is empty
    pub(crate) fn create(
        device: &Arc<dyn NativeDevice>,
        size: usize,
        initial_data: Option<&[u8]>,
        usage: ResourceUsage,
        bind_flags: BindFlag,
        stride: u32,
    ) -> Result<Self> {
        assert!(size > 0, "buffer size must be non-zero");
        assert!(size <= u32::MAX as usize, "buffer size must fit in 32 bits");
        assert!(!bind_flags.is_empty(), "buffer bind flags must not be empty");

        let cpu_access = if usage == ResourceUsage::Dynamic {
            CpuAccessFlags::WRITE
        } else {
            CpuAccessFlags::empty()
        };

        let desc = BufferDesc {
            byte_width: size as u32,
            usage: translate::usage(usage),
            bind_flags,
            cpu_access_flags: translate::cpu_access(cpu_access),
            misc_flags: ResourceMiscFlag::empty(),
            structure_byte_stride: 0,
        };
        let initial = initial_data.map(|data| SubresourceData { data, row_pitch: 0, slice_pitch: 0 });

        let raw = throw_if_failed(
            device.create_buffer(&desc, initial.as_ref()),
            &format!("Could not create a {} byte buffer ({:?})", size, bind_flags),
        )?;

        Ok(Self {
            buffer: ResourceCell::new(ComPtr::from_raw(raw, device.clone())),
            size,
            usage,
            cpu_access,
            stride,
            name: RwLock::new(String::new()),
        })
    }

    fn raw(&self) -> Option<RawHandle> {
        self.buffer.with(ComPtr::raw)
    }

    fn name(&self) -> String {
        self.name.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set_debug_name(&self, name: &str) {
        *self.name.write().unwrap_or_else(|e| e.into_inner()) = name.to_string();
        self.buffer.with(|b| b.set_debug_name(name));
    }

    fn release(&self) {
        drop(self.buffer.take());
    }
}

/// Shared accessors and the `LogicalResource` contract for a buffer type
macro_rules! buffer_resource {
    ($ty:ident, $kind:ident) => {
        impl $ty {
            /// Size in bytes
            pub fn size(&self) -> usize {
                self.inner.size
            }

            pub fn usage(&self) -> ResourceUsage {
                self.inner.usage
            }

            /// CPU access the buffer was created with
            pub fn cpu_access(&self) -> CpuAccessFlags {
                self.inner.cpu_access
            }

            /// Bytes per element (0 for constant buffers)
            pub fn stride(&self) -> u32 {
                self.inner.stride
            }

            pub(crate) fn raw(&self) -> Option<RawHandle> {
                self.inner.raw()
            }
        }

        impl NativeResource for $ty {
            fn native_resource(&self) -> Option<RawHandle> {
                self.inner.raw()
            }
        }

        impl LogicalResource for $ty {
            fn kind(&self) -> ResourceKind {
                ResourceKind::$kind
            }

            fn name(&self) -> String {
                self.inner.name()
            }

            fn set_debug_name(&self, name: &str) {
                self.inner.set_debug_name(name);
            }

            fn memory_usage(&self) -> usize {
                self.inner.size
            }

            fn release(&self) {
                self.inner.release();
            }

            fn is_loaded(&self) -> bool {
                self.inner.buffer.is_set()
            }
        }
    };
}

// ============================================================================
// BUFFER KINDS
// ============================================================================

/// Vertex buffer; the stride comes from its declaration
pub struct Dx11VertexBuffer {
    pub(crate) inner: NativeBuffer,
    declaration: Weak<VertexDeclaration>,
}

impl Dx11VertexBuffer {
    pub(crate) fn new(inner: NativeBuffer, declaration: &Arc<VertexDeclaration>) -> Self {
        Self { inner, declaration: Arc::downgrade(declaration) }
    }

    /// Declaration the buffer was created for, while it is still alive
    pub fn declaration(&self) -> Option<Arc<VertexDeclaration>> {
        self.declaration.upgrade()
    }
}

buffer_resource!(Dx11VertexBuffer, VertexBuffer);

/// Index buffer of 16 or 32-bit indices
pub struct Dx11IndexBuffer {
    pub(crate) inner: NativeBuffer,
    format: IndexBufferFormat,
}

impl Dx11IndexBuffer {
    pub(crate) fn new(inner: NativeBuffer, format: IndexBufferFormat) -> Self {
        Self { inner, format }
    }

    pub fn format(&self) -> IndexBufferFormat {
        self.format
    }
}

buffer_resource!(Dx11IndexBuffer, IndexBuffer);

/// Shader constant buffer
pub struct Dx11ConstantBuffer {
    pub(crate) inner: NativeBuffer,
}

impl Dx11ConstantBuffer {
    pub(crate) fn new(inner: NativeBuffer) -> Self {
        Self { inner }
    }
}

buffer_resource!(Dx11ConstantBuffer, ConstantBuffer);

/// Stream-output target, also bindable as a vertex buffer
pub struct Dx11StreamOutputBuffer {
    pub(crate) inner: NativeBuffer,
    declaration: Weak<StreamOutputDeclaration>,
}

impl Dx11StreamOutputBuffer {
    pub(crate) fn new(inner: NativeBuffer, declaration: &Arc<StreamOutputDeclaration>) -> Self {
        Self { inner, declaration: Arc::downgrade(declaration) }
    }

    pub fn declaration(&self) -> Option<Arc<StreamOutputDeclaration>> {
        self.declaration.upgrade()
    }
}

buffer_resource!(Dx11StreamOutputBuffer, StreamOutputBuffer);

#[cfg(test)]
#[path = "dx11_buffer_tests.rs"]
mod tests;
