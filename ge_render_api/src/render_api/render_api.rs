/// RenderApi trait - the abstract rendering device surface

use std::sync::Arc;

use crate::error::Result;
use crate::render_api::{
    BlendDesc, ClearFlags, CopyFlags, DepthStencilDesc, GraphicsBox, GraphicsFormat,
    IndexBufferFormat, LinearColor, LogicalResource, MapFlags, MappedSubresource,
    MsaaSampleDesc, PrimitiveTopology, RasterizerDesc, RenderTarget, ResourceUsage,
    SamplerDesc, ShaderDesc, ShaderStage, StreamOutputDeclaration, StreamOutputElement,
    TextureDesc, VertexDeclaration, VertexElement, Viewport,
};

// ============================================================================
// Resource references
// ============================================================================

/// Closed set of resources accepted by the generic data operations
/// (write, map, copy)
pub enum GraphicsResource<'a, R: RenderApi + ?Sized> {
    Texture(&'a R::Texture),
    VertexBuffer(&'a R::VertexBuffer),
    IndexBuffer(&'a R::IndexBuffer),
    ConstantBuffer(&'a R::ConstantBuffer),
    StreamOutputBuffer(&'a R::StreamOutputBuffer),
}

impl<R: RenderApi + ?Sized> Clone for GraphicsResource<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: RenderApi + ?Sized> Copy for GraphicsResource<'_, R> {}

impl<'a, R: RenderApi + ?Sized> GraphicsResource<'a, R> {
    /// The resource viewed through the common contract
    pub fn as_logical(&self) -> &'a dyn LogicalResource {
        match *self {
            GraphicsResource::Texture(r) => r,
            GraphicsResource::VertexBuffer(r) => r,
            GraphicsResource::IndexBuffer(r) => r,
            GraphicsResource::ConstantBuffer(r) => r,
            GraphicsResource::StreamOutputBuffer(r) => r,
        }
    }
}

// ============================================================================
// RenderApi trait
// ============================================================================

/// Abstract rendering device
///
/// Implemented by backend plugins (e.g. `Dx11RenderApi`). The backend is the
/// only component allowed to create or bind native objects; everything it
/// hands out is a backend resource wrapper behind an `Arc`.
///
/// Conventions shared by every method:
/// - `Ok(None)` from a creation call is an expected empty outcome (bad
///   format, empty element list, shader compile failure), never a crash.
/// - `None` passed to a binding call unbinds the slot.
/// - `None` passed to a data operation makes it a no-op.
///
/// Backends construct themselves with their own `initialize` function,
/// because window and driver types are backend specific.
pub trait RenderApi {
    type Texture: LogicalResource + 'static;
    type VertexBuffer: LogicalResource + 'static;
    type IndexBuffer: LogicalResource + 'static;
    type ConstantBuffer: LogicalResource + 'static;
    type StreamOutputBuffer: LogicalResource + 'static;
    type InputLayout: LogicalResource + 'static;
    type Shader: LogicalResource + 'static;
    type RasterizerState: LogicalResource + 'static;
    type DepthStencilState: LogicalResource + 'static;
    type BlendState: LogicalResource + 'static;
    type SamplerState: LogicalResource + 'static;
    /// Opaque capture of every bound pipeline slot
    type PipelineState;

    // ===== LIFECYCLE =====

    /// Resize the swap chain buffers; the back buffer keeps its identity
    ///
    /// # Returns
    ///
    /// `true` on success
    fn resize_swap_chain(&self, width: u32, height: u32) -> Result<bool>;

    /// Present the back buffer
    fn present(&self) -> Result<()>;

    /// Dump the driver's live-object report (debug layer only)
    fn report_live_objects(&self);

    // ===== CAPABILITIES =====

    /// Highest multisample configuration for a format, memoized per format
    ///
    /// # Returns
    ///
    /// `None` when the format cannot be multisampled
    fn is_msaa_format_supported(&self, format: GraphicsFormat) -> Option<MsaaSampleDesc>;

    /// The swap chain back buffer
    fn back_buffer(&self) -> Arc<Self::Texture>;

    // ===== CREATION =====

    /// Create a 2D texture with all its views
    ///
    /// # Arguments
    ///
    /// * `desc` - Texture descriptor; `mip_levels == 0` requests a full,
    ///   automatically generated chain
    ///
    /// # Returns
    ///
    /// `Ok(None)` when depth binding is requested on a format without a
    /// depth decomposition
    fn create_texture(&self, desc: &TextureDesc) -> Result<Option<Arc<Self::Texture>>>;

    /// Create a vertex declaration; `None` for an empty element list
    fn create_vertex_declaration(&self, elements: &[VertexElement]) -> Option<Arc<VertexDeclaration>> {
        VertexDeclaration::new(elements).map(Arc::new)
    }

    /// Create a stream-output declaration; `None` for an empty element list
    fn create_stream_output_declaration(
        &self,
        elements: &[StreamOutputElement],
    ) -> Option<Arc<StreamOutputDeclaration>> {
        StreamOutputDeclaration::new(elements).map(Arc::new)
    }

    /// Create an input layout matching a declaration against a vertex shader
    fn create_input_layout(
        &self,
        declaration: &Arc<VertexDeclaration>,
        vertex_shader: &Self::Shader,
    ) -> Result<Option<Arc<Self::InputLayout>>>;

    /// Create an input layout from a vertex shader's reflected input signature
    ///
    /// System-value inputs are skipped and elements are packed without padding.
    fn create_input_layout_from_shader(
        &self,
        vertex_shader: &Self::Shader,
    ) -> Result<Option<Arc<Self::InputLayout>>>;

    /// Create a vertex buffer whose stride comes from `declaration`
    ///
    /// # Panics
    ///
    /// If `size` is zero
    fn create_vertex_buffer(
        &self,
        declaration: &Arc<VertexDeclaration>,
        size: usize,
        initial_data: Option<&[u8]>,
        usage: ResourceUsage,
    ) -> Result<Arc<Self::VertexBuffer>>;

    /// Create an index buffer
    ///
    /// # Panics
    ///
    /// If `size` is zero
    fn create_index_buffer(
        &self,
        size: usize,
        initial_data: Option<&[u8]>,
        format: IndexBufferFormat,
        usage: ResourceUsage,
    ) -> Result<Arc<Self::IndexBuffer>>;

    /// Create a constant buffer
    ///
    /// # Panics
    ///
    /// If `size` is zero
    fn create_constant_buffer(
        &self,
        size: usize,
        initial_data: Option<&[u8]>,
        usage: ResourceUsage,
    ) -> Result<Arc<Self::ConstantBuffer>>;

    /// Create a stream-output target buffer
    ///
    /// # Panics
    ///
    /// If `size` is zero
    fn create_stream_output_buffer(
        &self,
        declaration: &Arc<StreamOutputDeclaration>,
        size: usize,
        usage: ResourceUsage,
    ) -> Result<Arc<Self::StreamOutputBuffer>>;

    fn create_rasterizer_state(&self, desc: &RasterizerDesc) -> Result<Arc<Self::RasterizerState>>;

    fn create_depth_stencil_state(&self, desc: &DepthStencilDesc) -> Result<Arc<Self::DepthStencilState>>;

    /// Create a blend state; factor and mask are re-supplied on every bind
    fn create_blend_state(
        &self,
        desc: &BlendDesc,
        blend_factor: glam::Vec4,
        sample_mask: u32,
    ) -> Result<Arc<Self::BlendState>>;

    fn create_sampler_state(&self, desc: &SamplerDesc) -> Result<Arc<Self::SamplerState>>;

    /// Compile and create a shader for one stage
    ///
    /// # Returns
    ///
    /// `Ok(None)` when compilation fails; diagnostics go to the log
    fn create_shader(&self, stage: ShaderStage, desc: &ShaderDesc) -> Result<Option<Arc<Self::Shader>>>;

    /// Compile a geometry shader that writes to stream output
    fn create_geometry_shader_with_stream_output(
        &self,
        desc: &ShaderDesc,
        declaration: &StreamOutputDeclaration,
    ) -> Result<Option<Arc<Self::Shader>>>;

    // ===== MUTATION =====

    /// Upload data into a subresource
    fn write_to_resource(
        &self,
        resource: Option<GraphicsResource<'_, Self>>,
        subresource: u32,
        dst_box: Option<&GraphicsBox>,
        data: &[u8],
        row_pitch: u32,
        depth_pitch: u32,
        flags: CopyFlags,
    );

    /// Map a subresource for CPU reads; blocks until the data is available
    ///
    /// # Returns
    ///
    /// An empty `MappedSubresource` when `resource` is `None`
    fn map_to_read(
        &self,
        resource: Option<GraphicsResource<'_, Self>>,
        subresource: u32,
        flags: MapFlags,
    ) -> Result<MappedSubresource>;

    fn unmap(&self, resource: Option<GraphicsResource<'_, Self>>, subresource: u32);

    fn copy_resource(
        &self,
        source: Option<GraphicsResource<'_, Self>>,
        destination: Option<GraphicsResource<'_, Self>>,
    );

    fn generate_mips(&self, texture: Option<&Self::Texture>);

    fn clear_render_target(&self, texture: Option<&Self::Texture>, color: LinearColor);

    fn clear_depth_stencil(&self, texture: Option<&Self::Texture>, flags: ClearFlags, depth: f32, stencil: u8);

    /// Hint that the contents of a target are no longer needed
    fn discard_view(&self, texture: Option<&Self::Texture>);

    /// Resolve a multisampled texture into a single-sampled one
    fn msaa_resolve_render_target(&self, source: Option<&Self::Texture>, destination: Option<&Self::Texture>);

    // ===== BINDING =====

    /// Route subsequent calls to the immediate context
    fn set_immediate_context(&self);

    fn set_topology(&self, topology: PrimitiveTopology);

    fn set_viewports(&self, viewports: &[Viewport]);

    fn set_input_layout(&self, layout: Option<&Self::InputLayout>);

    fn set_rasterizer_state(&self, state: Option<&Self::RasterizerState>);

    fn set_depth_stencil_state(&self, state: Option<&Self::DepthStencilState>, stencil_ref: u32);

    fn set_blend_state(&self, state: Option<&Self::BlendState>);

    fn set_vertex_buffer(&self, buffer: Option<&Self::VertexBuffer>, slot: u32, offset: u32);

    fn set_index_buffer(&self, buffer: Option<&Self::IndexBuffer>, offset: u32);

    /// Bind a shader program to a stage
    fn set_program(&self, stage: ShaderStage, shader: Option<&Self::Shader>);

    fn set_shader_resource(&self, stage: ShaderStage, texture: Option<&Self::Texture>, slot: u32);

    fn set_constant_buffer(&self, stage: ShaderStage, buffer: Option<&Self::ConstantBuffer>, slot: u32);

    fn set_sampler(&self, stage: ShaderStage, sampler: Option<&Self::SamplerState>, slot: u32);

    /// Bind mip 0 of a texture as a compute-shader UAV
    fn cs_set_unordered_access_view(&self, texture: Option<&Self::Texture>, slot: u32);

    fn set_render_targets(
        &self,
        targets: &[RenderTarget<'_, Self::Texture>],
        depth_stencil: Option<&Self::Texture>,
    );

    fn set_stream_output_target(&self, buffer: Option<&Self::StreamOutputBuffer>);

    // ===== SUBMISSION =====

    fn draw(&self, vertex_count: u32, start_vertex: u32);

    fn draw_indexed(&self, index_count: u32, start_index: u32, base_vertex: i32);

    fn draw_instanced(
        &self,
        vertex_count_per_instance: u32,
        instance_count: u32,
        start_vertex: u32,
        start_instance: u32,
    );

    /// Draw whatever the bound stream-output buffer holds
    fn draw_auto(&self);

    fn dispatch(&self, x: u32, y: u32, z: u32);

    // ===== STATE CAPTURE =====

    /// Capture every bound pipeline slot
    fn save_pipeline_state(&self) -> Self::PipelineState;

    /// Rebind a captured pipeline state; `None` is a no-op
    fn restore_pipeline_state(&self, state: Option<&Self::PipelineState>);

    /// Wrap the bound rasterizer state; `None` when nothing is bound
    fn current_rasterizer_state(&self) -> Option<Arc<Self::RasterizerState>>;

    /// Wrap the bound depth-stencil state; `None` when nothing is bound
    fn current_depth_stencil_state(&self) -> Option<Arc<Self::DepthStencilState>>;

    /// Wrap the bound blend state with its factor and sample mask
    fn current_blend_state(&self) -> Option<Arc<Self::BlendState>>;

    /// Wrap the pixel-stage sampler bound at `slot`
    fn current_sampler_state(&self, slot: u32) -> Option<Arc<Self::SamplerState>>;
}
