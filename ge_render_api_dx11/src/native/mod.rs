//! Native graphics API seam
//!
//! Object-safe traits shaped after the D3D11 / DXGI / D3DCompiler entry points
//! the backend calls. Handles are opaque reference-counted ids: every call
//! that hands out a handle has already added the reference the caller owns.
//! The software driver in [`crate::reference`] implements every trait, and on
//! Windows so does the Direct3D 11 driver in `crate::d3d11`.

mod format;
mod include;
mod result;
mod types;

pub use format::DxgiFormat;
pub use include::expand_includes;
pub use result::{HResult, NativeResult};
pub use types::*;

use std::any::Any;
use std::sync::Arc;

use ge_render_api::ge::render::ShaderStage;
use raw_window_handle::RawWindowHandle;

/// Opaque id of a native object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RawHandle(pub u64);

/// One entry of a live-object report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveObject {
    pub handle: RawHandle,
    /// Native interface name ("ID3D11Texture2D", ...)
    pub kind: &'static str,
    pub name: String,
    pub ref_count: u32,
}

/// Shader bound to a stage plus its class instances
pub type BoundShader = (Option<RawHandle>, Vec<RawHandle>);

// ============================================================================
// FACTORY
// ============================================================================

/// Adapter enumeration, device and swap-chain creation, window queries
pub trait NativeFactory: Send + Sync {
    /// Adapters in preference order
    fn enum_adapters(&self) -> Vec<AdapterDesc>;

    /// Create a device and its immediate context on an adapter
    fn create_device(
        &self,
        adapter: usize,
        flags: CreateDeviceFlag,
        feature_levels: &[FeatureLevel],
    ) -> NativeResult<(Arc<dyn NativeDevice>, Arc<dyn NativeContext>, FeatureLevel)>;

    /// Create a swap chain presenting to a window
    fn create_swap_chain(
        &self,
        device: &Arc<dyn NativeDevice>,
        window: &RawWindowHandle,
        desc: &SwapChainDesc,
    ) -> NativeResult<Box<dyn NativeSwapChain>>;

    /// Client-area size of a window
    fn client_size(&self, window: &RawWindowHandle) -> NativeResult<(u32, u32)>;

    /// Desktop size of the adapter's first output, if it has one
    fn output_desktop_size(&self, adapter: usize) -> Option<(u32, u32)>;

    /// Size of the primary screen
    fn primary_screen_size(&self) -> (u32, u32);

    /// Frames the CPU may queue ahead of the GPU
    fn set_maximum_frame_latency(&self, device: &Arc<dyn NativeDevice>, latency: u32) -> NativeResult<()>;

    /// The shader compiler shipped with this driver
    fn compiler(&self) -> Arc<dyn NativeCompiler>;
}

// ============================================================================
// DEVICE
// ============================================================================

/// Object creation, capability queries and lifetime management
pub trait NativeDevice: Send + Sync {
    /// Concrete driver object, for factories that need their own device back
    fn as_any(&self) -> &dyn Any;

    /// Add a reference; returns the new count
    fn add_ref(&self, handle: RawHandle) -> u32;

    /// Drop a reference; returns the new count (0 destroys the object)
    fn release(&self, handle: RawHandle) -> u32;

    /// Attach a debug name (`WKPDID_D3DDebugObjectName`)
    fn set_debug_name(&self, handle: RawHandle, name: &str);

    fn check_format_support(&self, format: DxgiFormat) -> NativeResult<FormatSupport>;

    /// Quality levels for a sample count; 0 means unsupported
    fn check_multisample_quality_levels(&self, format: DxgiFormat, sample_count: u32) -> NativeResult<u32>;

    /// Create a 2D texture; `initial_data` holds one entry per subresource
    fn create_texture_2d(
        &self,
        desc: &Texture2dDesc,
        initial_data: Option<&[SubresourceData<'_>]>,
    ) -> NativeResult<RawHandle>;

    /// Description of an existing texture
    fn texture_2d_desc(&self, texture: RawHandle) -> NativeResult<Texture2dDesc>;

    /// `None` describes the whole first mip in the resource's format
    fn create_render_target_view(
        &self,
        resource: RawHandle,
        desc: Option<&RenderTargetViewDesc>,
    ) -> NativeResult<RawHandle>;

    fn create_depth_stencil_view(&self, resource: RawHandle, desc: &DepthStencilViewDesc) -> NativeResult<RawHandle>;

    fn create_shader_resource_view(&self, resource: RawHandle, desc: &ShaderResourceViewDesc) -> NativeResult<RawHandle>;

    fn create_unordered_access_view(&self, resource: RawHandle, desc: &UnorderedAccessViewDesc) -> NativeResult<RawHandle>;

    fn create_buffer(&self, desc: &BufferDesc, initial_data: Option<&SubresourceData<'_>>) -> NativeResult<RawHandle>;

    /// Create an input layout validated against a vertex shader's signature
    fn create_input_layout(&self, elements: &[InputElementDesc], vs_bytecode: &[u8]) -> NativeResult<RawHandle>;

    fn create_rasterizer_state(&self, desc: &RasterizerDesc1) -> NativeResult<RawHandle>;

    fn create_depth_stencil_state(&self, desc: &DepthStencilDesc) -> NativeResult<RawHandle>;

    fn create_blend_state(&self, desc: &BlendDesc1) -> NativeResult<RawHandle>;

    fn create_sampler_state(&self, desc: &SamplerDesc) -> NativeResult<RawHandle>;

    /// Create a shader object from compiled bytecode for one stage
    fn create_shader(&self, stage: ShaderStage, bytecode: &[u8]) -> NativeResult<RawHandle>;

    fn create_geometry_shader_with_stream_output(
        &self,
        bytecode: &[u8],
        entries: &[SoDeclarationEntry],
        strides: &[u32],
        rasterized_stream: u32,
    ) -> NativeResult<RawHandle>;

    /// Every object still alive (`ID3D11Debug::ReportLiveDeviceObjects`)
    fn live_objects(&self) -> Vec<LiveObject>;
}

// ============================================================================
// CONTEXT
// ============================================================================

/// Immediate-context entry points
///
/// Setters take `None` to unbind. Getters add a reference to every handle
/// they return.
pub trait NativeContext: Send + Sync {
    // ===== PER-STAGE =====

    fn vs_set_shader(&self, shader: Option<RawHandle>, class_instances: &[RawHandle]);
    fn ps_set_shader(&self, shader: Option<RawHandle>, class_instances: &[RawHandle]);
    fn gs_set_shader(&self, shader: Option<RawHandle>, class_instances: &[RawHandle]);
    fn hs_set_shader(&self, shader: Option<RawHandle>, class_instances: &[RawHandle]);
    fn ds_set_shader(&self, shader: Option<RawHandle>, class_instances: &[RawHandle]);
    fn cs_set_shader(&self, shader: Option<RawHandle>, class_instances: &[RawHandle]);

    fn vs_set_shader_resources(&self, start_slot: u32, views: &[Option<RawHandle>]);
    fn ps_set_shader_resources(&self, start_slot: u32, views: &[Option<RawHandle>]);
    fn gs_set_shader_resources(&self, start_slot: u32, views: &[Option<RawHandle>]);
    fn hs_set_shader_resources(&self, start_slot: u32, views: &[Option<RawHandle>]);
    fn ds_set_shader_resources(&self, start_slot: u32, views: &[Option<RawHandle>]);
    fn cs_set_shader_resources(&self, start_slot: u32, views: &[Option<RawHandle>]);

    fn vs_set_constant_buffers(&self, start_slot: u32, buffers: &[Option<RawHandle>]);
    fn ps_set_constant_buffers(&self, start_slot: u32, buffers: &[Option<RawHandle>]);
    fn gs_set_constant_buffers(&self, start_slot: u32, buffers: &[Option<RawHandle>]);
    fn hs_set_constant_buffers(&self, start_slot: u32, buffers: &[Option<RawHandle>]);
    fn ds_set_constant_buffers(&self, start_slot: u32, buffers: &[Option<RawHandle>]);
    fn cs_set_constant_buffers(&self, start_slot: u32, buffers: &[Option<RawHandle>]);

    fn vs_set_samplers(&self, start_slot: u32, samplers: &[Option<RawHandle>]);
    fn ps_set_samplers(&self, start_slot: u32, samplers: &[Option<RawHandle>]);
    fn gs_set_samplers(&self, start_slot: u32, samplers: &[Option<RawHandle>]);
    fn hs_set_samplers(&self, start_slot: u32, samplers: &[Option<RawHandle>]);
    fn ds_set_samplers(&self, start_slot: u32, samplers: &[Option<RawHandle>]);
    fn cs_set_samplers(&self, start_slot: u32, samplers: &[Option<RawHandle>]);

    fn cs_set_unordered_access_views(&self, start_slot: u32, views: &[Option<RawHandle>]);

    fn vs_get_shader(&self, max_class_instances: usize) -> BoundShader;
    fn ps_get_shader(&self, max_class_instances: usize) -> BoundShader;
    fn gs_get_shader(&self, max_class_instances: usize) -> BoundShader;
    fn ps_get_shader_resources(&self, start_slot: u32, count: u32) -> Vec<Option<RawHandle>>;
    fn ps_get_samplers(&self, start_slot: u32, count: u32) -> Vec<Option<RawHandle>>;
    fn vs_get_constant_buffers(&self, start_slot: u32, count: u32) -> Vec<Option<RawHandle>>;

    // ===== INPUT ASSEMBLER =====

    fn ia_set_input_layout(&self, layout: Option<RawHandle>);
    fn ia_set_primitive_topology(&self, topology: PrimitiveTopology);
    /// One `(buffer, stride, offset)` per slot starting at `start_slot`
    fn ia_set_vertex_buffers(&self, start_slot: u32, buffers: &[(Option<RawHandle>, u32, u32)]);
    fn ia_set_index_buffer(&self, buffer: Option<RawHandle>, format: DxgiFormat, offset: u32);

    fn ia_get_input_layout(&self) -> Option<RawHandle>;
    fn ia_get_primitive_topology(&self) -> PrimitiveTopology;
    fn ia_get_vertex_buffers(&self, start_slot: u32, count: u32) -> Vec<(Option<RawHandle>, u32, u32)>;
    fn ia_get_index_buffer(&self) -> (Option<RawHandle>, DxgiFormat, u32);

    // ===== RASTERIZER =====

    fn rs_set_state(&self, state: Option<RawHandle>);
    fn rs_set_viewports(&self, viewports: &[Viewport]);
    fn rs_set_scissor_rects(&self, rects: &[Rect]);

    fn rs_get_state(&self) -> Option<RawHandle>;
    fn rs_get_viewports(&self, max: usize) -> Vec<Viewport>;
    fn rs_get_scissor_rects(&self, max: usize) -> Vec<Rect>;

    // ===== OUTPUT MERGER =====

    fn om_set_render_targets(&self, views: &[Option<RawHandle>], depth_stencil: Option<RawHandle>);
    fn om_set_blend_state(&self, state: Option<RawHandle>, blend_factor: [f32; 4], sample_mask: u32);
    fn om_set_depth_stencil_state(&self, state: Option<RawHandle>, stencil_ref: u32);

    fn om_get_blend_state(&self) -> (Option<RawHandle>, [f32; 4], u32);
    fn om_get_depth_stencil_state(&self) -> (Option<RawHandle>, u32);

    // ===== STREAM OUTPUT =====

    /// One `(buffer, offset)` per slot
    fn so_set_targets(&self, targets: &[(Option<RawHandle>, u32)]);

    // ===== SUBMISSION =====

    fn draw(&self, vertex_count: u32, start_vertex: u32);
    fn draw_indexed(&self, index_count: u32, start_index: u32, base_vertex: i32);
    fn draw_instanced(&self, vertex_count_per_instance: u32, instance_count: u32, start_vertex: u32, start_instance: u32);
    fn draw_auto(&self);
    fn dispatch(&self, x: u32, y: u32, z: u32);

    // ===== DATA =====

    #[allow(clippy::too_many_arguments)]
    fn update_subresource(
        &self,
        resource: RawHandle,
        subresource: u32,
        dst_box: Option<&NativeBox>,
        data: &[u8],
        row_pitch: u32,
        depth_pitch: u32,
        flags: CopyFlag,
    );

    fn map(&self, resource: RawHandle, subresource: u32, map_type: MapType, flags: MapFlag) -> NativeResult<MappedSubresource>;
    fn unmap(&self, resource: RawHandle, subresource: u32);
    fn copy_resource(&self, destination: RawHandle, source: RawHandle);
    fn resolve_subresource(
        &self,
        destination: RawHandle,
        dst_subresource: u32,
        source: RawHandle,
        src_subresource: u32,
        format: DxgiFormat,
    );
    fn generate_mips(&self, view: RawHandle);
    fn clear_render_target_view(&self, view: RawHandle, color: [f32; 4]);
    fn clear_depth_stencil_view(&self, view: RawHandle, flags: ClearFlag, depth: f32, stencil: u8);
    fn discard_view(&self, view: RawHandle);

    /// Unbind everything and reset every slot to its default
    fn clear_state(&self);
}

// ============================================================================
// SWAP CHAIN
// ============================================================================

pub trait NativeSwapChain: Send + Sync {
    fn desc(&self) -> SwapChainDesc;

    /// Back buffer texture; the returned handle carries a new reference
    fn get_buffer(&self, index: u32) -> NativeResult<RawHandle>;

    /// Fails with `DXGI_ERROR_INVALID_CALL` while any back-buffer reference
    /// is still held outside the swap chain
    fn resize_buffers(&self, buffer_count: u32, width: u32, height: u32, format: DxgiFormat, flags: u32) -> NativeResult<()>;

    fn present(&self, sync_interval: u32, flags: u32) -> NativeResult<()>;
}

/// `DXGI_SWAP_CHAIN_FLAG_ALLOW_MODE_SWITCH`
pub const SWAP_CHAIN_FLAG_ALLOW_MODE_SWITCH: u32 = 0x2;

// ============================================================================
// COMPILER
// ============================================================================

/// Resolves `#include` directives during compilation
pub trait IncludeHandler {
    fn open(&self, include_type: IncludeType, file_name: &str) -> NativeResult<Vec<u8>>;
}

/// HLSL compiler and bytecode reflection
pub trait NativeCompiler: Send + Sync {
    #[allow(clippy::too_many_arguments)]
    fn compile(
        &self,
        source: &[u8],
        source_name: &str,
        defines: &[ShaderDefine],
        include: Option<&dyn IncludeHandler>,
        entry_point: &str,
        target: &str,
        flags: CompileFlag,
    ) -> Result<Vec<u8>, CompileError>;

    /// Input signature of a compiled shader
    fn reflect_input_signature(&self, bytecode: &[u8]) -> NativeResult<Vec<SignatureParameterDesc>>;
}
