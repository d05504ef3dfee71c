/// Dx11RenderApi - D3D11 implementation of the RenderApi trait

use std::sync::{Arc, RwLock};

use raw_window_handle::RawWindowHandle;

use ge_render_api::ge::config::RenderApiConfig;
use ge_render_api::ge::fs::FileSystem;
use ge_render_api::ge::render::{
    BindFlags, BlendDesc, ClearFlags, CopyFlags, DepthStencilDesc, GraphicsBox, GraphicsFormat,
    GraphicsResource, IndexBufferFormat, LinearColor, LogicalResource, MapFlags,
    MappedSubresource, MsaaSampleDesc, PrimitiveTopology, RasterizerDesc, RenderTarget,
    ResourceUsage, SamplerDesc, ShaderDesc, ShaderSource, ShaderStage, StreamOutputDeclaration,
    TextureData, TextureDesc, VertexDeclaration, VertexElement, Viewport,
};
use ge_render_api::ge::{Error, RenderApi, Result};
use ge_render_api::glam::Vec4;
use ge_render_api::{engine_debug, engine_error, engine_info, engine_trace, engine_warn};

use crate::com_ptr::{ComPtr, NativeResource};
use crate::debug;
use crate::dx11_buffer::{
    Dx11ConstantBuffer, Dx11IndexBuffer, Dx11StreamOutputBuffer, Dx11VertexBuffer, NativeBuffer,
};
use crate::dx11_input_layout::Dx11InputLayout;
use crate::dx11_msaa_cache::MsaaSupportCache;
use crate::dx11_pipeline_state::Dx11PipelineState;
use crate::dx11_shader::{Dx11Shader, ShaderIncludeResolver};
use crate::dx11_shader_stage::stage_functions;
use crate::dx11_state::{Dx11BlendState, Dx11DepthStencilState, Dx11RasterizerState, Dx11SamplerState};
use crate::dx11_texture::{self, subresource_pitch, texture_info, Dx11Texture, TextureObjects, ViewPlan};
use crate::native::{
    AdapterDesc, AlphaMode, BindFlag, CompileFlag, CpuAccessFlag, CreateDeviceFlag, DxgiFormat,
    FeatureLevel, FormatSupport, HResult, InputClassification, InputElementDesc, MapType,
    NativeCompiler, NativeContext, NativeDevice, NativeFactory, NativeResult, NativeSwapChain,
    RawHandle, ResourceMiscFlag, SampleDesc, ShaderDefine, SubresourceData, SwapChainDesc,
    Texture2dDesc, SO_NO_RASTERIZED_STREAM, SWAP_CHAIN_FLAG_ALLOW_MODE_SWITCH,
    USAGE_RENDER_TARGET_OUTPUT,
};
use crate::translate;

// ============================================================================
// ERRORS
// ============================================================================

/// Turn a failed native call into a `DeviceError` carrying the failure code
///
/// The message ends with the code formatted as `(HRESULT: 0x%08X)`.
pub(crate) fn throw_if_failed<T>(result: NativeResult<T>, message: &str) -> Result<T> {
    result.map_err(|code| {
        let message = format!("{}\n(HRESULT: 0x{:08X})", message, code.code());
        engine_error!("ge::dx11", "{}", message);
        Error::DeviceError { message, code: code.code() }
    })
}

fn initialization_failed(message: &str, code: HResult) -> Error {
    let message = format!("{}\n(HRESULT: 0x{:08X})", message, code.code());
    engine_error!("ge::dx11", "{}", message);
    Error::InitializationFailed(message)
}

// ============================================================================
// DX11 RENDER API
// ============================================================================

/// D3D11 rendering device
///
/// Owns the native device, the immediate context and the swap chain for its
/// whole lifetime. Every native object it creates is handed out inside a
/// resource wrapper.
pub struct Dx11RenderApi {
    /// Swap chain back buffer, rebuilt in place on resize
    back_buffer: Arc<Dx11Texture>,
    swap_chain: Box<dyn NativeSwapChain>,
    msaa_cache: MsaaSupportCache,
    include_resolver: ShaderIncludeResolver,
    compiler: Arc<dyn NativeCompiler>,
    /// Context every binding and data call goes to
    active_context: RwLock<Arc<dyn NativeContext>>,
    immediate_context: Arc<dyn NativeContext>,
    device: Arc<dyn NativeDevice>,
    adapter: AdapterDesc,
    feature_level: FeatureLevel,
    config: RenderApiConfig,
}

impl Dx11RenderApi {
    /// Create the device, the swap chain and the back buffer for a window
    ///
    /// # Arguments
    ///
    /// * `factory` - Native driver entry points
    /// * `window` - Window presented to
    /// * `fullscreen` - Size the swap chain to the output instead of the window
    /// * `config` - Render API settings, read once
    /// * `file_system` - Source of shader files and includes
    ///
    /// # Returns
    ///
    /// `Error::InitializationFailed` when no adapter exists or the device or
    /// swap chain cannot be created
    pub fn initialize(
        factory: Arc<dyn NativeFactory>,
        window: RawWindowHandle,
        fullscreen: bool,
        config: &RenderApiConfig,
        file_system: Arc<dyn FileSystem>,
    ) -> Result<Self> {
        // ===== ADAPTER =====
        let adapters = factory.enum_adapters();
        if adapters.is_empty() {
            engine_error!("ge::dx11", "No graphics adapter found");
            return Err(Error::InitializationFailed("No graphics adapter found".to_string()));
        }

        let requested = config.adapter_index.max(0) as usize;
        let adapter_index = if requested < adapters.len() {
            requested
        } else {
            engine_warn!(
                "ge::dx11",
                "Invalid adapter index {} ({} adapters), using the first one",
                config.adapter_index,
                adapters.len()
            );
            0
        };
        let adapter = adapters[adapter_index].clone();

        // ===== DEVICE =====
        let mut flags = CreateDeviceFlag::BGRA_SUPPORT;
        if config.enable_debug_layer {
            flags |= CreateDeviceFlag::DEBUG;
        }
        let (device, immediate_context, feature_level) = factory
            .create_device(adapter_index, flags, &[FeatureLevel::Level11_1])
            .map_err(|code| initialization_failed("Could not create the D3D11 device", code))?;

        engine_info!(
            "ge::dx11",
            "Device created on adapter {} '{}' ({:?})",
            adapter_index,
            adapter.description,
            feature_level
        );

        // ===== SWAP CHAIN =====
        let (width, height) = if fullscreen {
            factory
                .output_desktop_size(adapter_index)
                .unwrap_or_else(|| factory.primary_screen_size())
        } else {
            factory
                .client_size(&window)
                .map_err(|code| initialization_failed("Could not query the window size", code))?
        };

        let swap_chain_desc = SwapChainDesc {
            width,
            height,
            format: DxgiFormat::R8G8B8A8_UNORM,
            stereo: false,
            sample_desc: SampleDesc::default(),
            buffer_usage: USAGE_RENDER_TARGET_OUTPUT,
            buffer_count: config.buffer_count,
            scaling: translate::scaling(config.scaling),
            swap_effect: translate::swap_effect(config.flip_mode),
            alpha_mode: AlphaMode::Unspecified,
            flags: SWAP_CHAIN_FLAG_ALLOW_MODE_SWITCH,
            windowed: !fullscreen,
        };
        let swap_chain = factory
            .create_swap_chain(&device, &window, &swap_chain_desc)
            .map_err(|code| initialization_failed("Could not create the swap chain", code))?;

        throw_if_failed(
            factory.set_maximum_frame_latency(&device, config.max_frame_latency),
            "Could not set the maximum frame latency",
        )?;

        // ===== BACK BUFFER =====
        let (objects, info) = create_back_buffer_objects(&device, &*swap_chain)?;
        let back_buffer = Arc::new(Dx11Texture::new(objects, info));
        back_buffer.set_debug_name("BackBuffer");

        engine_info!(
            "ge::dx11",
            "Swap chain created: {}x{}, {} buffers, {}",
            width,
            height,
            config.buffer_count,
            if fullscreen { "fullscreen" } else { "windowed" }
        );

        let api = Self {
            back_buffer,
            swap_chain,
            msaa_cache: MsaaSupportCache::new(),
            include_resolver: ShaderIncludeResolver::new(file_system, &config.shader_include_dirs),
            compiler: factory.compiler(),
            active_context: RwLock::new(immediate_context.clone()),
            immediate_context,
            device,
            adapter,
            feature_level,
            config: config.clone(),
        };
        api.bind_back_buffer();
        Ok(api)
    }

    /// [`Dx11RenderApi::initialize`] on the system's Direct3D 11 runtime
    #[cfg(windows)]
    pub fn initialize_native(
        window: RawWindowHandle,
        fullscreen: bool,
        config: &RenderApiConfig,
        file_system: Arc<dyn FileSystem>,
    ) -> Result<Self> {
        let factory = crate::d3d11::D3D11Factory::new()
            .map_err(|code| initialization_failed("Could not create the DXGI factory", code))?;
        Self::initialize(Arc::new(factory), window, fullscreen, config, file_system)
    }

    // ===== ACCESSORS =====

    pub fn adapter(&self) -> &AdapterDesc {
        &self.adapter
    }

    pub fn feature_level(&self) -> FeatureLevel {
        self.feature_level
    }

    pub fn config(&self) -> &RenderApiConfig {
        &self.config
    }

    /// Search path used for shader files and `#include` directives
    pub fn include_resolver(&self) -> &ShaderIncludeResolver {
        &self.include_resolver
    }

    pub fn msaa_cache(&self) -> &MsaaSupportCache {
        &self.msaa_cache
    }

    // ===== INTERNALS =====

    fn context(&self) -> Arc<dyn NativeContext> {
        self.active_context.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn wrap(&self, raw: RawHandle) -> ComPtr {
        ComPtr::from_raw(raw, self.device.clone())
    }

    /// Full-size viewport and back buffer as the only render target
    fn bind_back_buffer(&self) {
        let info = self.back_buffer.info();
        let context = self.context();
        let viewport = Viewport::new(info.width as f32, info.height as f32);
        context.rs_set_viewports(&[translate::viewport(&viewport)]);
        context.om_set_render_targets(&[self.back_buffer.render_target_view(0)], None);
    }

    /// Compile a shader, logging diagnostics on failure
    fn compile(&self, stage: ShaderStage, desc: &ShaderDesc) -> Option<Vec<u8>> {
        let (name, source) = match &desc.source {
            ShaderSource::File(path) => match self.include_resolver.read_source(path) {
                Ok((resolved, bytes)) => (resolved.display().to_string(), bytes),
                Err(error) => {
                    engine_error!("ge::dx11", "Could not read shader '{}': {}", path.display(), error);
                    return None;
                }
            },
            ShaderSource::Code { name, text } => (name.clone(), text.as_bytes().to_vec()),
        };

        let defines: Vec<ShaderDefine> = desc
            .macros
            .iter()
            .map(|m| ShaderDefine { name: m.name.clone(), definition: m.definition.clone() })
            .collect();

        let mut flags = CompileFlag::ENABLE_STRICTNESS;
        if cfg!(debug_assertions) {
            flags |= CompileFlag::DEBUG;
        }
        let target = stage.target(&desc.shader_model);

        match self.compiler.compile(
            &source,
            &name,
            &defines,
            Some(&self.include_resolver),
            &desc.entry_point,
            &target,
            flags,
        ) {
            Ok(bytecode) => {
                engine_debug!("ge::dx11", "Compiled shader '{}' {} ({})", name, desc.entry_point, target);
                Some(bytecode)
            }
            Err(error) => {
                engine_error!(
                    "ge::dx11",
                    "Could not compile shader '{}' {} ({}):\n{}",
                    name,
                    desc.entry_point,
                    target,
                    error.diagnostics
                );
                None
            }
        }
    }

    fn create_input_layout_from_elements(
        &self,
        elements: &[InputElementDesc],
        declaration: Arc<VertexDeclaration>,
        vertex_shader: &Dx11Shader,
    ) -> Result<Option<Arc<Dx11InputLayout>>> {
        if vertex_shader.stage() != ShaderStage::Vertex {
            engine_error!(
                "ge::dx11",
                "Input layouts need a vertex shader, got a {:?} shader",
                vertex_shader.stage()
            );
            return Ok(None);
        }

        let raw = throw_if_failed(
            self.device.create_input_layout(elements, vertex_shader.bytecode()),
            "Could not create input layout",
        )?;
        Ok(Some(Arc::new(Dx11InputLayout::new(self.wrap(raw), declaration))))
    }
}

impl Drop for Dx11RenderApi {
    fn drop(&mut self) {
        self.immediate_context.clear_state();
        self.back_buffer.release();
        engine_info!("ge::dx11", "Device destroyed");
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Back buffer storage, its render-target view and its info
fn create_back_buffer_objects(
    device: &Arc<dyn NativeDevice>,
    swap_chain: &dyn NativeSwapChain,
) -> Result<(TextureObjects, ge_render_api::ge::render::TextureInfo)> {
    let raw = throw_if_failed(swap_chain.get_buffer(0), "Could not get the swap chain back buffer")?;
    let texture = ComPtr::from_raw(raw, device.clone());
    let desc = throw_if_failed(device.texture_2d_desc(raw), "Could not describe the back buffer")?;
    let info = texture_info(&desc, translate::to_abstract(desc.format), false);
    let objects = TextureObjects::back_buffer(device, texture)?;
    Ok((objects, info))
}

/// One subresource per mip and slice, slice-major
///
/// Mip 0 of each slice comes from `data` (zeros when a slice has none);
/// the other mips start zeroed.
fn initial_subresources(desc: &TextureDesc, data: &TextureData, mip_levels: u32, array_size: u32) -> Vec<(Vec<u8>, u32, u32)> {
    let mut subresources = Vec::with_capacity((mip_levels * array_size) as usize);
    for slice in 0..array_size {
        for mip in 0..mip_levels {
            let (row_pitch, slice_pitch) = subresource_pitch(desc.format, desc.width, desc.height, mip);
            let mut bytes = vec![0u8; slice_pitch as usize];
            if mip == 0 {
                if let Some(source) = data.layer(slice) {
                    let count = source.len().min(bytes.len());
                    bytes[..count].copy_from_slice(&source[..count]);
                }
            }
            subresources.push((bytes, row_pitch, slice_pitch));
        }
    }
    subresources
}

/// Semantic names reserved for system-generated values
fn is_system_value(semantic_name: &str) -> bool {
    semantic_name.get(..3).is_some_and(|prefix| prefix.eq_ignore_ascii_case("SV_"))
}

/// Native resource behind a generic resource reference
fn native_resource(resource: Option<GraphicsResource<'_, Dx11RenderApi>>) -> Option<RawHandle> {
    match resource? {
        GraphicsResource::Texture(texture) => texture.native_resource(),
        GraphicsResource::VertexBuffer(buffer) => buffer.native_resource(),
        GraphicsResource::IndexBuffer(buffer) => buffer.native_resource(),
        GraphicsResource::ConstantBuffer(buffer) => buffer.native_resource(),
        GraphicsResource::StreamOutputBuffer(buffer) => buffer.native_resource(),
    }
}

// ============================================================================
// RENDER API
// ============================================================================

impl RenderApi for Dx11RenderApi {
    type Texture = Dx11Texture;
    type VertexBuffer = Dx11VertexBuffer;
    type IndexBuffer = Dx11IndexBuffer;
    type ConstantBuffer = Dx11ConstantBuffer;
    type StreamOutputBuffer = Dx11StreamOutputBuffer;
    type InputLayout = Dx11InputLayout;
    type Shader = Dx11Shader;
    type RasterizerState = Dx11RasterizerState;
    type DepthStencilState = Dx11DepthStencilState;
    type BlendState = Dx11BlendState;
    type SamplerState = Dx11SamplerState;
    type PipelineState = Dx11PipelineState;

    // ===== LIFECYCLE =====

    fn resize_swap_chain(&self, width: u32, height: u32) -> Result<bool> {
        engine_info!("ge::dx11", "Resizing swap chain to {}x{}", width, height);

        // Every back-buffer reference must be gone before the native resize
        self.back_buffer.release();
        self.context().clear_state();

        let desc = self.swap_chain.desc();
        let resized = throw_if_failed(
            self.swap_chain.resize_buffers(
                desc.buffer_count,
                width,
                height,
                desc.format,
                SWAP_CHAIN_FLAG_ALLOW_MODE_SWITCH,
            ),
            "Could not resize the swap chain",
        );

        let (objects, info) = create_back_buffer_objects(&self.device, &*self.swap_chain)?;
        self.back_buffer.rebuild(objects, info);
        self.bind_back_buffer();

        resized.map(|()| true)
    }

    fn present(&self) -> Result<()> {
        throw_if_failed(self.swap_chain.present(1, 0), "Present failed")
    }

    fn report_live_objects(&self) {
        if !self.config.enable_debug_layer {
            engine_debug!("ge::dx11", "Live object report needs the debug layer");
            return;
        }
        let objects = self.device.live_objects();
        for object in &objects {
            engine_debug!("ge::dx11", "Live object: {}", debug::describe(object));
        }
        debug::print_live_objects_report(&objects);
    }

    // ===== CAPABILITIES =====

    fn is_msaa_format_supported(&self, format: GraphicsFormat) -> Option<MsaaSampleDesc> {
        self.msaa_cache.get_or_query(&*self.device, format).sample_desc()
    }

    fn back_buffer(&self) -> Arc<Dx11Texture> {
        self.back_buffer.clone()
    }

    // ===== CREATION =====

    fn create_texture(&self, desc: &TextureDesc) -> Result<Option<Arc<Dx11Texture>>> {
        let format = translate::to_native(desc.format);

        let (storage_format, shader_resource_format, depth_stencil_format) =
            if desc.bind_flags.contains(BindFlags::DEPTH_STENCIL) {
                match translate::depth_format_triple(format) {
                    Some(triple) => triple,
                    None => {
                        engine_error!(
                            "ge::dx11",
                            "Invalid format: {} cannot be bound as a depth stencil",
                            desc.format
                        );
                        return Ok(None);
                    }
                }
            } else {
                (format, format, format)
            };

        let support = self.device.check_format_support(format).unwrap_or(FormatSupport::empty());
        let generate_mips = desc.mip_levels == 0
            && desc.usage != ResourceUsage::Staging
            && support.contains(FormatSupport::MIP_AUTOGEN);
        let mip_levels = if desc.mip_levels == 0 { desc.full_mip_chain() } else { desc.mip_levels };
        let array_size = desc.real_array_size();

        let mut bind_flags = translate::bind_flags(desc.bind_flags);
        if desc.bind_flags.contains(BindFlags::DEPTH_STENCIL) {
            // Depth textures are always readable through the read-view format
            bind_flags |= BindFlag::SHADER_RESOURCE;
        }
        let mut misc_flags = ResourceMiscFlag::empty();
        if generate_mips {
            bind_flags |= BindFlag::RENDER_TARGET | BindFlag::SHADER_RESOURCE;
            misc_flags |= ResourceMiscFlag::GENERATE_MIPS;
        }
        if desc.is_cube_map {
            misc_flags |= ResourceMiscFlag::TEXTURECUBE;
        }

        let mut cpu_access = translate::cpu_access(desc.cpu_access);
        if desc.usage == ResourceUsage::Dynamic {
            cpu_access |= CpuAccessFlag::WRITE;
        }

        let native_desc = Texture2dDesc {
            width: desc.width,
            height: desc.height,
            mip_levels,
            array_size,
            format: storage_format,
            sample_desc: SampleDesc { count: desc.sample_count.max(1), quality: desc.sample_quality },
            usage: translate::usage(desc.usage),
            bind_flags,
            cpu_access_flags: cpu_access,
            misc_flags,
        };

        let initial = desc
            .data
            .as_ref()
            .map(|data| initial_subresources(desc, data, mip_levels, array_size));
        let subresources: Option<Vec<SubresourceData<'_>>> = initial.as_ref().map(|list| {
            list.iter()
                .map(|(bytes, row_pitch, slice_pitch)| SubresourceData {
                    data: bytes,
                    row_pitch: *row_pitch,
                    slice_pitch: *slice_pitch,
                })
                .collect()
        });

        let raw = throw_if_failed(
            self.device.create_texture_2d(&native_desc, subresources.as_deref()),
            &format!("Could not create texture {}x{} {}", desc.width, desc.height, desc.format),
        )?;
        let storage = self.wrap(raw);
        let created = throw_if_failed(self.device.texture_2d_desc(raw), "Could not describe texture")?;

        let plan = ViewPlan {
            color_format: format,
            shader_resource_format,
            depth_stencil_format,
            bind_flags: created.bind_flags,
            mip_levels: created.mip_levels,
            array_size: created.array_size,
            is_cube_map: desc.is_cube_map,
            is_multisampled: desc.is_msaa || created.sample_desc.count > 1,
        };
        let objects = TextureObjects::create(&self.device, storage, &plan)?;

        if generate_mips {
            if let Some(view) = objects.shader_resource_views.first() {
                self.context().generate_mips(view.raw());
            }
        }

        let info = texture_info(&created, desc.format, desc.is_cube_map);
        engine_debug!(
            "ge::dx11",
            "Created texture {}x{} {} ({} mips, {} slices, {} bytes)",
            info.width,
            info.height,
            info.format,
            info.mip_levels,
            info.array_size,
            dx11_texture::texture_memory_usage(&info)
        );
        Ok(Some(Arc::new(Dx11Texture::new(objects, info))))
    }

    fn create_input_layout(
        &self,
        declaration: &Arc<VertexDeclaration>,
        vertex_shader: &Dx11Shader,
    ) -> Result<Option<Arc<Dx11InputLayout>>> {
        let elements: Vec<InputElementDesc> = declaration
            .elements()
            .iter()
            .map(|element| InputElementDesc {
                semantic_name: translate::semantic_name(element.semantic).to_string(),
                semantic_index: element.semantic_index,
                format: translate::vertex_element_format(element.element_type),
                input_slot: element.stream_index,
                aligned_byte_offset: element.offset,
                input_slot_class: if element.instance_step_rate > 0 {
                    InputClassification::PerInstanceData
                } else {
                    InputClassification::PerVertexData
                },
                instance_data_step_rate: element.instance_step_rate,
            })
            .collect();

        self.create_input_layout_from_elements(&elements, declaration.clone(), vertex_shader)
    }

    fn create_input_layout_from_shader(&self, vertex_shader: &Dx11Shader) -> Result<Option<Arc<Dx11InputLayout>>> {
        let signature = throw_if_failed(
            self.compiler.reflect_input_signature(vertex_shader.bytecode()),
            "Could not reflect the vertex shader input signature",
        )?;

        let mut elements = Vec::new();
        let mut native_elements = Vec::new();
        let mut offset = 0;
        for parameter in signature.iter().filter(|p| !is_system_value(&p.semantic_name)) {
            let element_type = translate::input_element_type(parameter.component_type, parameter.mask);
            elements.push(VertexElement::new(
                offset,
                element_type,
                translate::semantic_from_name(&parameter.semantic_name),
                parameter.semantic_index,
            ));
            native_elements.push(InputElementDesc {
                semantic_name: parameter.semantic_name.clone(),
                semantic_index: parameter.semantic_index,
                format: translate::vertex_element_format(element_type),
                input_slot: 0,
                aligned_byte_offset: offset,
                input_slot_class: InputClassification::PerVertexData,
                instance_data_step_rate: 0,
            });
            offset += element_type.size();
        }

        let Some(declaration) = VertexDeclaration::new(&elements) else {
            engine_warn!("ge::dx11", "Vertex shader has no vertex inputs, no input layout created");
            return Ok(None);
        };
        self.create_input_layout_from_elements(&native_elements, Arc::new(declaration), vertex_shader)
    }

    fn create_vertex_buffer(
        &self,
        declaration: &Arc<VertexDeclaration>,
        size: usize,
        initial_data: Option<&[u8]>,
        usage: ResourceUsage,
    ) -> Result<Arc<Dx11VertexBuffer>> {
        let stride = declaration.vertex_size(0);
        let buffer = NativeBuffer::create(&self.device, size, initial_data, usage, BindFlag::VERTEX_BUFFER, stride)?;
        Ok(Arc::new(Dx11VertexBuffer::new(buffer, declaration)))
    }

    fn create_index_buffer(
        &self,
        size: usize,
        initial_data: Option<&[u8]>,
        format: IndexBufferFormat,
        usage: ResourceUsage,
    ) -> Result<Arc<Dx11IndexBuffer>> {
        let buffer = NativeBuffer::create(&self.device, size, initial_data, usage, BindFlag::INDEX_BUFFER, format.stride())?;
        Ok(Arc::new(Dx11IndexBuffer::new(buffer, format)))
    }

    fn create_constant_buffer(
        &self,
        size: usize,
        initial_data: Option<&[u8]>,
        usage: ResourceUsage,
    ) -> Result<Arc<Dx11ConstantBuffer>> {
        let buffer = NativeBuffer::create(&self.device, size, initial_data, usage, BindFlag::CONSTANT_BUFFER, 0)?;
        Ok(Arc::new(Dx11ConstantBuffer::new(buffer)))
    }

    fn create_stream_output_buffer(
        &self,
        declaration: &Arc<StreamOutputDeclaration>,
        size: usize,
        usage: ResourceUsage,
    ) -> Result<Arc<Dx11StreamOutputBuffer>> {
        let stride = declaration.component_count_for_output_slot(0) * 4;
        let buffer = NativeBuffer::create(
            &self.device,
            size,
            None,
            usage,
            BindFlag::STREAM_OUTPUT | BindFlag::VERTEX_BUFFER,
            stride,
        )?;
        Ok(Arc::new(Dx11StreamOutputBuffer::new(buffer, declaration)))
    }

    fn create_rasterizer_state(&self, desc: &RasterizerDesc) -> Result<Arc<Dx11RasterizerState>> {
        let raw = throw_if_failed(
            self.device.create_rasterizer_state(&translate::rasterizer_desc(desc)),
            "Could not create rasterizer state",
        )?;
        Ok(Arc::new(Dx11RasterizerState::new(self.wrap(raw))))
    }

    fn create_depth_stencil_state(&self, desc: &DepthStencilDesc) -> Result<Arc<Dx11DepthStencilState>> {
        let raw = throw_if_failed(
            self.device.create_depth_stencil_state(&translate::depth_stencil_desc(desc)),
            "Could not create depth stencil state",
        )?;
        Ok(Arc::new(Dx11DepthStencilState::new(self.wrap(raw))))
    }

    fn create_blend_state(&self, desc: &BlendDesc, blend_factor: Vec4, sample_mask: u32) -> Result<Arc<Dx11BlendState>> {
        let raw = throw_if_failed(
            self.device.create_blend_state(&translate::blend_desc(desc)),
            "Could not create blend state",
        )?;
        Ok(Arc::new(Dx11BlendState::new(self.wrap(raw), blend_factor, sample_mask)))
    }

    fn create_sampler_state(&self, desc: &SamplerDesc) -> Result<Arc<Dx11SamplerState>> {
        let raw = throw_if_failed(
            self.device.create_sampler_state(&translate::sampler_desc(desc)),
            "Could not create sampler state",
        )?;
        Ok(Arc::new(Dx11SamplerState::new(self.wrap(raw))))
    }

    fn create_shader(&self, stage: ShaderStage, desc: &ShaderDesc) -> Result<Option<Arc<Dx11Shader>>> {
        let Some(bytecode) = self.compile(stage, desc) else {
            return Ok(None);
        };
        let raw = throw_if_failed(
            self.device.create_shader(stage, &bytecode),
            &format!("Could not create {:?} shader '{}'", stage, desc.entry_point),
        )?;
        Ok(Some(Arc::new(Dx11Shader::new(self.wrap(raw), stage, bytecode))))
    }

    fn create_geometry_shader_with_stream_output(
        &self,
        desc: &ShaderDesc,
        declaration: &StreamOutputDeclaration,
    ) -> Result<Option<Arc<Dx11Shader>>> {
        let Some(bytecode) = self.compile(ShaderStage::Geometry, desc) else {
            return Ok(None);
        };

        let entries: Vec<_> = declaration.elements().iter().map(translate::so_declaration_entry).collect();
        let strides = [declaration.component_count_for_output_slot(0) * 4];
        let raw = throw_if_failed(
            self.device.create_geometry_shader_with_stream_output(&bytecode, &entries, &strides, SO_NO_RASTERIZED_STREAM),
            &format!("Could not create stream-output geometry shader '{}'", desc.entry_point),
        )?;
        Ok(Some(Arc::new(Dx11Shader::new(self.wrap(raw), ShaderStage::Geometry, bytecode))))
    }

    // ===== MUTATION =====

    fn write_to_resource(
        &self,
        resource: Option<GraphicsResource<'_, Self>>,
        subresource: u32,
        dst_box: Option<&GraphicsBox>,
        data: &[u8],
        row_pitch: u32,
        depth_pitch: u32,
        flags: CopyFlags,
    ) {
        let Some(raw) = native_resource(resource) else { return };
        let native_box = dst_box.map(translate::graphics_box);
        self.context().update_subresource(
            raw,
            subresource,
            native_box.as_ref(),
            data,
            row_pitch,
            depth_pitch,
            translate::copy_flags(flags),
        );
    }

    fn map_to_read(
        &self,
        resource: Option<GraphicsResource<'_, Self>>,
        subresource: u32,
        flags: MapFlags,
    ) -> Result<MappedSubresource> {
        let Some(raw) = native_resource(resource) else {
            return Ok(MappedSubresource::empty());
        };
        let mapped = throw_if_failed(
            self.context().map(raw, subresource, MapType::Read, translate::map_flags(flags)),
            &format!("Could not map subresource {} for reading", subresource),
        )?;
        Ok(MappedSubresource {
            data: mapped.data,
            row_pitch: mapped.row_pitch,
            depth_pitch: mapped.depth_pitch,
        })
    }

    fn unmap(&self, resource: Option<GraphicsResource<'_, Self>>, subresource: u32) {
        if let Some(raw) = native_resource(resource) {
            self.context().unmap(raw, subresource);
        }
    }

    fn copy_resource(&self, source: Option<GraphicsResource<'_, Self>>, destination: Option<GraphicsResource<'_, Self>>) {
        if let (Some(source), Some(destination)) = (native_resource(source), native_resource(destination)) {
            self.context().copy_resource(destination, source);
        }
    }

    fn generate_mips(&self, texture: Option<&Dx11Texture>) {
        if let Some(view) = texture.and_then(|t| t.shader_resource_view(0)) {
            self.context().generate_mips(view);
        }
    }

    fn clear_render_target(&self, texture: Option<&Dx11Texture>, color: LinearColor) {
        if let Some(view) = texture.and_then(|t| t.render_target_view(0)) {
            self.context().clear_render_target_view(view, color.to_array());
        }
    }

    fn clear_depth_stencil(&self, texture: Option<&Dx11Texture>, flags: ClearFlags, depth: f32, stencil: u8) {
        if let Some(view) = texture.and_then(|t| t.depth_stencil_view()) {
            self.context().clear_depth_stencil_view(view, translate::clear_flags(flags), depth, stencil);
        }
    }

    fn discard_view(&self, texture: Option<&Dx11Texture>) {
        let Some(texture) = texture else { return };
        if let Some(view) = texture.render_target_view(0).or_else(|| texture.depth_stencil_view()) {
            self.context().discard_view(view);
        }
    }

    fn msaa_resolve_render_target(&self, source: Option<&Dx11Texture>, destination: Option<&Dx11Texture>) {
        let (Some(source), Some(destination)) = (source, destination) else { return };
        if let (Some(src), Some(dst)) = (source.native_resource(), destination.native_resource()) {
            let format = translate::to_native(destination.info().format);
            self.context().resolve_subresource(dst, 0, src, 0, format);
        }
    }

    // ===== BINDING =====

    fn set_immediate_context(&self) {
        *self.active_context.write().unwrap_or_else(|e| e.into_inner()) = self.immediate_context.clone();
    }

    fn set_topology(&self, topology: PrimitiveTopology) {
        self.context().ia_set_primitive_topology(translate::topology(topology));
    }

    fn set_viewports(&self, viewports: &[Viewport]) {
        let viewports: Vec<_> = viewports.iter().map(translate::viewport).collect();
        self.context().rs_set_viewports(&viewports);
    }

    fn set_input_layout(&self, layout: Option<&Dx11InputLayout>) {
        self.context().ia_set_input_layout(layout.and_then(Dx11InputLayout::raw));
    }

    fn set_rasterizer_state(&self, state: Option<&Dx11RasterizerState>) {
        self.context().rs_set_state(state.and_then(Dx11RasterizerState::raw));
    }

    fn set_depth_stencil_state(&self, state: Option<&Dx11DepthStencilState>, stencil_ref: u32) {
        self.context().om_set_depth_stencil_state(state.and_then(Dx11DepthStencilState::raw), stencil_ref);
    }

    fn set_blend_state(&self, state: Option<&Dx11BlendState>) {
        match state {
            Some(state) => self.context().om_set_blend_state(
                state.raw(),
                state.blend_factor().to_array(),
                state.sample_mask(),
            ),
            None => self.context().om_set_blend_state(None, [0.0; 4], 0xffff_ffff),
        }
    }

    fn set_vertex_buffer(&self, buffer: Option<&Dx11VertexBuffer>, slot: u32, offset: u32) {
        let binding = match buffer {
            Some(buffer) => (buffer.raw(), buffer.stride(), offset),
            None => (None, 0, 0),
        };
        self.context().ia_set_vertex_buffers(slot, &[binding]);
    }

    fn set_index_buffer(&self, buffer: Option<&Dx11IndexBuffer>, offset: u32) {
        match buffer {
            Some(buffer) => self.context().ia_set_index_buffer(buffer.raw(), translate::index_format(buffer.format()), offset),
            None => self.context().ia_set_index_buffer(None, DxgiFormat::R32_UINT, 0),
        }
    }

    fn set_program(&self, stage: ShaderStage, shader: Option<&Dx11Shader>) {
        let shader = match shader {
            Some(shader) if shader.stage() != stage => {
                engine_warn!(
                    "ge::dx11",
                    "Cannot bind a {:?} shader to the {:?} stage, unbinding the stage",
                    shader.stage(),
                    stage
                );
                None
            }
            shader => shader,
        };
        (stage_functions(stage).set_shader)(&*self.context(), shader.and_then(Dx11Shader::raw), &[]);
    }

    fn set_shader_resource(&self, stage: ShaderStage, texture: Option<&Dx11Texture>, slot: u32) {
        let view = texture.and_then(|t| t.shader_resource_view(0));
        (stage_functions(stage).set_shader_resources)(&*self.context(), slot, &[view]);
    }

    fn set_constant_buffer(&self, stage: ShaderStage, buffer: Option<&Dx11ConstantBuffer>, slot: u32) {
        (stage_functions(stage).set_constant_buffers)(&*self.context(), slot, &[buffer.and_then(Dx11ConstantBuffer::raw)]);
    }

    fn set_sampler(&self, stage: ShaderStage, sampler: Option<&Dx11SamplerState>, slot: u32) {
        (stage_functions(stage).set_samplers)(&*self.context(), slot, &[sampler.and_then(Dx11SamplerState::raw)]);
    }

    fn cs_set_unordered_access_view(&self, texture: Option<&Dx11Texture>, slot: u32) {
        let view = texture.and_then(|t| t.unordered_access_view(0));
        self.context().cs_set_unordered_access_views(slot, &[view]);
    }

    fn set_render_targets(&self, targets: &[RenderTarget<'_, Dx11Texture>], depth_stencil: Option<&Dx11Texture>) {
        let views: Vec<Option<RawHandle>> = targets
            .iter()
            .map(|target| target.texture.and_then(|t| t.render_target_view(target.mip_level)))
            .collect();
        let depth_view = depth_stencil.and_then(Dx11Texture::depth_stencil_view);
        self.context().om_set_render_targets(&views, depth_view);
    }

    fn set_stream_output_target(&self, buffer: Option<&Dx11StreamOutputBuffer>) {
        self.context().so_set_targets(&[(buffer.and_then(Dx11StreamOutputBuffer::raw), 0)]);
    }

    // ===== SUBMISSION =====

    fn draw(&self, vertex_count: u32, start_vertex: u32) {
        engine_trace!("ge::dx11", "Draw {} vertices from {}", vertex_count, start_vertex);
        self.context().draw(vertex_count, start_vertex);
    }

    fn draw_indexed(&self, index_count: u32, start_index: u32, base_vertex: i32) {
        self.context().draw_indexed(index_count, start_index, base_vertex);
    }

    fn draw_instanced(&self, vertex_count_per_instance: u32, instance_count: u32, start_vertex: u32, start_instance: u32) {
        self.context().draw_instanced(vertex_count_per_instance, instance_count, start_vertex, start_instance);
    }

    fn draw_auto(&self) {
        self.context().draw_auto();
    }

    fn dispatch(&self, x: u32, y: u32, z: u32) {
        self.context().dispatch(x, y, z);
    }

    // ===== STATE CAPTURE =====

    fn save_pipeline_state(&self) -> Dx11PipelineState {
        Dx11PipelineState::capture(&*self.context(), &self.device)
    }

    fn restore_pipeline_state(&self, state: Option<&Dx11PipelineState>) {
        if let Some(state) = state {
            state.apply(&*self.context());
        }
    }

    fn current_rasterizer_state(&self) -> Option<Arc<Dx11RasterizerState>> {
        let state = ComPtr::from_raw_opt(self.context().rs_get_state(), &self.device)?;
        Some(Arc::new(Dx11RasterizerState::new(state)))
    }

    fn current_depth_stencil_state(&self) -> Option<Arc<Dx11DepthStencilState>> {
        let (state, _stencil_ref) = self.context().om_get_depth_stencil_state();
        let state = ComPtr::from_raw_opt(state, &self.device)?;
        Some(Arc::new(Dx11DepthStencilState::new(state)))
    }

    fn current_blend_state(&self) -> Option<Arc<Dx11BlendState>> {
        let (state, blend_factor, sample_mask) = self.context().om_get_blend_state();
        let state = ComPtr::from_raw_opt(state, &self.device)?;
        Some(Arc::new(Dx11BlendState::new(state, Vec4::from_array(blend_factor), sample_mask)))
    }

    fn current_sampler_state(&self, slot: u32) -> Option<Arc<Dx11SamplerState>> {
        let sampler = self.context().ps_get_samplers(slot, 1).into_iter().next().flatten();
        let sampler = ComPtr::from_raw_opt(sampler, &self.device)?;
        Some(Arc::new(Dx11SamplerState::new(sampler)))
    }
}

#[cfg(test)]
#[path = "dx11_tests.rs"]
mod tests;
