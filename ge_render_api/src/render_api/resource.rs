/// Resource kinds, usage flags and the common resource contract

use bitflags::bitflags;
use std::path::Path;

// ============================================================================
// FLAGS
// ============================================================================

bitflags! {
    /// Pipeline stages a resource may be bound to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BindFlags: u32 {
        const VERTEX_BUFFER = 0x1;
        const INDEX_BUFFER = 0x2;
        const CONSTANT_BUFFER = 0x4;
        const SHADER_RESOURCE = 0x8;
        const STREAM_OUTPUT = 0x10;
        const RENDER_TARGET = 0x20;
        const DEPTH_STENCIL = 0x40;
        const UNORDERED_ACCESS = 0x80;
    }
}

bitflags! {
    /// CPU access granted to a resource
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CpuAccessFlags: u32 {
        const WRITE = 0x1;
        const READ = 0x2;
    }
}

bitflags! {
    /// Which planes a depth-stencil clear touches
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u32 {
        const DEPTH = 0x1;
        const STENCIL = 0x2;
    }
}

bitflags! {
    /// Hints for partial resource writes
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CopyFlags: u32 {
        const NO_OVERWRITE = 0x1;
        const DISCARD = 0x2;
    }
}

bitflags! {
    /// Flags for mapping a resource for CPU reads
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MapFlags: u32 {
        const DO_NOT_WAIT = 0x1;
    }
}

/// Expected update frequency and CPU/GPU access pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResourceUsage {
    /// GPU read/write, CPU updates through explicit copies
    #[default]
    Default,
    /// GPU read only, contents fixed at creation
    Immutable,
    /// GPU read, CPU write every frame
    Dynamic,
    /// CPU readback and upload only
    Staging,
}

// ============================================================================
// RESOURCE DATA
// ============================================================================

/// Destination region of a partial write, in texels (or bytes for buffers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphicsBox {
    pub left: u32,
    pub top: u32,
    pub front: u32,
    pub right: u32,
    pub bottom: u32,
    pub back: u32,
}

impl GraphicsBox {
    /// Box covering `[left, right) x [top, bottom)` on a single slice
    pub fn rect(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self { left, top, front: 0, right, bottom, back: 1 }
    }
}

/// CPU-visible copy of a mapped subresource
///
/// An empty `data` vector is the "nothing mapped" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MappedSubresource {
    pub data: Vec<u8>,
    pub row_pitch: u32,
    pub depth_pitch: u32,
}

impl MappedSubresource {
    /// The sentinel returned when no resource was mapped
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if nothing was mapped
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Copy the mapped bytes out as typed texels
    ///
    /// # Example
    ///
    /// ```
    /// use ge_render_api::ge::render::MappedSubresource;
    ///
    /// let mapped = MappedSubresource { data: vec![0, 0, 128, 63], row_pitch: 4, depth_pitch: 4 };
    /// assert_eq!(mapped.texels::<f32>(), vec![1.0f32]);
    /// ```
    pub fn texels<T: bytemuck::Pod>(&self) -> Vec<T> {
        let whole = self.data.len() - self.data.len() % std::mem::size_of::<T>().max(1);
        bytemuck::pod_collect_to_vec(&self.data[..whole])
    }

    /// The bytes of one row, or an empty slice past the end
    pub fn row(&self, y: u32) -> &[u8] {
        let start = (y * self.row_pitch) as usize;
        let end = (start + self.row_pitch as usize).min(self.data.len());
        self.data.get(start..end).unwrap_or(&[])
    }
}

// ============================================================================
// RESOURCE CONTRACT
// ============================================================================

/// Category of a logical resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Texture,
    VertexBuffer,
    IndexBuffer,
    ConstantBuffer,
    StreamOutputBuffer,
    InputLayout,
    Shader,
    RasterizerState,
    DepthStencilState,
    BlendState,
    SamplerState,
}

/// Contract shared by every backend resource wrapper
///
/// Wrappers own their native handles and release them exactly once, either
/// through `release()` or on drop.
pub trait LogicalResource: Send + Sync {
    /// Resource category
    fn kind(&self) -> ResourceKind;

    /// Debug name last assigned with `set_debug_name` (empty if none)
    fn name(&self) -> String;

    /// Attach a debug name to every native object the wrapper owns
    fn set_debug_name(&self, name: &str);

    /// Approximate GPU memory held, in bytes
    fn memory_usage(&self) -> usize;

    /// Release the native objects now; later calls are no-ops
    fn release(&self);

    /// GPU resources cannot be loaded from disk directly
    fn load(&self, _path: &Path) -> bool {
        false
    }

    /// Nothing to unload for GPU resources
    fn unload(&self) {}

    /// True while the native objects are alive
    fn is_loaded(&self) -> bool;
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
