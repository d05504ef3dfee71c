use super::*;
use std::num::NonZeroIsize;

use raw_window_handle::Win32WindowHandle;

use ge_render_api::ge::fs::MemoryFileSystem;
use ge_render_api::ge::render::{CpuAccessFlags, CullMode, VertexElementSemantic, VertexElementType};

use crate::reference::{DrawCall, ReferenceConfig, ReferenceDriver, ReferenceFactory};

const VERTEX_SHADER: &str = r#"
struct VSIn {
    float3 position : POSITION;
    float2 uv : TEXCOORD0;
    uint id : SV_VertexID;
};

float4 main(VSIn input) : SV_Position {
    return float4(input.position, 1.0);
}
"#;

const PIXEL_SHADER: &str = "float4 main() : SV_Target { return float4(1, 0, 0, 1); }";

fn window() -> RawWindowHandle {
    RawWindowHandle::Win32(Win32WindowHandle::new(NonZeroIsize::new(1).unwrap()))
}

fn file_system() -> Arc<MemoryFileSystem> {
    Arc::new(
        MemoryFileSystem::new("/game")
            .with_file("Data/Shaders/common.hlsl", "struct VSIn { float3 position : POSITION; };")
            .with_file("Data/Shaders/mesh.hlsl", "#include \"common.hlsl\"\nfloat4 main(VSIn v) : SV_Position { return 0; }"),
    )
}

fn create_with(reference: ReferenceConfig, config: &RenderApiConfig, fullscreen: bool) -> Result<(Dx11RenderApi, ReferenceDriver)> {
    let factory = ReferenceFactory::new(reference);
    let driver = factory.driver();
    let api = Dx11RenderApi::initialize(Arc::new(factory), window(), fullscreen, config, file_system())?;
    Ok((api, driver))
}

fn create() -> (Dx11RenderApi, ReferenceDriver) {
    create_with(ReferenceConfig::default(), &RenderApiConfig::default(), false).unwrap()
}

fn shader(api: &Dx11RenderApi, stage: ShaderStage, source: &str) -> Arc<Dx11Shader> {
    api.create_shader(stage, &ShaderDesc::from_code("test.hlsl", source, "main"))
        .unwrap()
        .unwrap()
}

fn texture_resource(texture: &Dx11Texture) -> Option<GraphicsResource<'_, Dx11RenderApi>> {
    Some(GraphicsResource::Texture(texture))
}

fn render_target(width: u32, height: u32) -> TextureDesc {
    TextureDesc {
        bind_flags: BindFlags::RENDER_TARGET | BindFlags::SHADER_RESOURCE,
        ..TextureDesc::new(width, height, GraphicsFormat::R8G8B8A8_UNORM)
    }
}

// ============================================================================
// INITIALIZATION
// ============================================================================

#[test]
fn test_initialize_binds_back_buffer() {
    let (api, driver) = create();

    let back_buffer = api.back_buffer();
    assert_eq!((back_buffer.info().width, back_buffer.info().height), (800, 600));
    assert_eq!(back_buffer.name(), "BackBuffer");
    assert_eq!(api.feature_level(), FeatureLevel::Level11_1);
    assert_eq!(api.adapter().description, "Reference Adapter");
    assert_eq!(driver.frame_latency(), Some(1));

    let flags = driver.device_flags().unwrap();
    assert!(flags.contains(CreateDeviceFlag::BGRA_SUPPORT));
    assert_eq!(flags.contains(CreateDeviceFlag::DEBUG), cfg!(debug_assertions));

    let slots = driver.bound_slots();
    assert_eq!(slots.render_targets[0], back_buffer.render_target_view(0));
    assert_eq!((slots.viewports[0].width, slots.viewports[0].height), (800.0, 600.0));

    let swap_chains = driver.swap_chains();
    let swap_chain = &swap_chains[0];
    assert_eq!(swap_chain.buffer_count, 2);
    assert_eq!(swap_chain.format, DxgiFormat::R8G8B8A8_UNORM);
    assert!(swap_chain.windowed);
}

#[test]
fn test_fullscreen_uses_output_size() {
    let (api, _driver) = create_with(ReferenceConfig::default(), &RenderApiConfig::default(), true).unwrap();
    let info = api.back_buffer().info();
    assert_eq!((info.width, info.height), (1920, 1080));
}

#[test]
fn test_fullscreen_without_output_uses_primary_screen() {
    let reference = ReferenceConfig { output_size: None, screen_size: (1280, 720), ..Default::default() };
    let (api, _driver) = create_with(reference, &RenderApiConfig::default(), true).unwrap();
    let info = api.back_buffer().info();
    assert_eq!((info.width, info.height), (1280, 720));
}

#[test]
fn test_invalid_adapter_index_falls_back_to_first() {
    let config = RenderApiConfig { adapter_index: 5, ..Default::default() };
    let (api, _driver) = create_with(ReferenceConfig::default(), &config, false).unwrap();
    assert_eq!(api.adapter().description, "Reference Adapter");
}

#[test]
fn test_no_adapter_fails() {
    let reference = ReferenceConfig { adapters: Vec::new(), ..Default::default() };
    let result = create_with(reference, &RenderApiConfig::default(), false);
    assert!(matches!(result, Err(Error::InitializationFailed(_))));
}

#[test]
fn test_device_creation_failure() {
    let reference = ReferenceConfig { fail_device_creation: true, ..Default::default() };
    let result = create_with(reference, &RenderApiConfig::default(), false);
    assert!(matches!(result, Err(Error::InitializationFailed(_))));
}

#[test]
fn test_invalid_frame_latency_fails() {
    let config = RenderApiConfig { max_frame_latency: 0, ..Default::default() };
    let result = create_with(ReferenceConfig::default(), &config, false);
    let Err(Error::DeviceError { code, .. }) = result else {
        panic!("expected a device error");
    };
    assert_eq!(code, HResult::E_INVALIDARG.code());
}

#[test]
fn test_drop_clears_state_and_releases_back_buffer() {
    let (api, driver) = create();
    let calls = driver.clear_state_calls();

    drop(api);

    assert_eq!(driver.clear_state_calls(), calls + 1);
    assert_eq!(driver.live_count("ID3D11RenderTargetView"), 0);
}

// ============================================================================
// SWAP CHAIN
// ============================================================================

#[test]
fn test_resize_keeps_back_buffer_identity() {
    let (api, driver) = create();
    let back_buffer = api.back_buffer();
    let live_textures = driver.live_count("ID3D11Texture2D");
    let live_views = driver.live_count("ID3D11RenderTargetView");
    let created_textures = driver.created("ID3D11Texture2D");
    let created_views = driver.created("ID3D11RenderTargetView");

    assert!(api.resize_swap_chain(1920, 1080).unwrap());

    // The old back buffer and its view are released before the new ones exist
    assert_eq!(driver.live_count("ID3D11Texture2D"), live_textures);
    assert_eq!(driver.live_count("ID3D11RenderTargetView"), live_views);
    assert_eq!(driver.created("ID3D11Texture2D"), created_textures + 1);
    assert_eq!(driver.created("ID3D11RenderTargetView"), created_views + 1);

    assert!(Arc::ptr_eq(&back_buffer, &api.back_buffer()));
    assert_eq!((back_buffer.info().width, back_buffer.info().height), (1920, 1080));
    assert!(back_buffer.is_loaded());
    assert_eq!(driver.resize_count(), 1);

    let slots = driver.bound_slots();
    assert_eq!(slots.render_targets[0], back_buffer.render_target_view(0));
    assert_eq!((slots.viewports[0].width, slots.viewports[0].height), (1920.0, 1080.0));
}

#[test]
fn test_present_uses_vsync() {
    let (api, driver) = create();

    api.present().unwrap();
    api.present().unwrap();

    assert_eq!(driver.present_count(), 2);
    assert_eq!(driver.last_sync_interval(), Some(1));
}

// ============================================================================
// TEXTURES
// ============================================================================

#[test]
fn test_render_target_texture() {
    let (api, driver) = create();

    let texture = api.create_texture(&render_target(256, 256)).unwrap().unwrap();

    assert_eq!(texture.memory_usage(), 262_144);
    assert_eq!(texture.render_target_view_count(), 1);
    assert_eq!(texture.shader_resource_view_count(), 1);
    assert!(!texture.has_depth_stencil_views());
    assert_eq!(driver.live_count("ID3D11RenderTargetView"), 2);
}

#[test]
fn test_depth_formats_get_depth_views() {
    let (api, driver) = create();

    for format in [GraphicsFormat::D32_FLOAT, GraphicsFormat::D24_UNORM_S8_UINT, GraphicsFormat::D16_UNORM] {
        let desc = TextureDesc {
            bind_flags: BindFlags::DEPTH_STENCIL,
            ..TextureDesc::new(64, 64, format)
        };
        let texture = api.create_texture(&desc).unwrap().unwrap();

        assert!(texture.has_depth_stencil_views(), "{format}");
        assert!(texture.read_only_depth_stencil_view().is_some());
        assert_eq!(texture.shader_resource_view_count(), 1);
        assert_eq!(texture.info().format, format);
        assert!(texture.info().bind_flags.contains(BindFlags::SHADER_RESOURCE));
        assert_eq!(driver.live_count("ID3D11DepthStencilView"), 2);

        texture.release();
    }
}

#[test]
fn test_depth_only_texture_is_readable() {
    let (api, driver) = create();
    let views = driver.live_count("ID3D11ShaderResourceView");
    let desc = TextureDesc {
        bind_flags: BindFlags::DEPTH_STENCIL,
        ..TextureDesc::new(64, 64, GraphicsFormat::D32_FLOAT)
    };

    let texture = api.create_texture(&desc).unwrap().unwrap();

    assert_eq!(texture.shader_resource_view_count(), 1);
    assert_eq!(driver.live_count("ID3D11ShaderResourceView"), views + 1);
    assert_eq!(texture.info().bind_flags, BindFlags::DEPTH_STENCIL | BindFlags::SHADER_RESOURCE);
    let native = driver.texture_desc(texture.native_resource().unwrap()).unwrap();
    assert!(native.bind_flags.contains(BindFlag::SHADER_RESOURCE));
}

#[test]
fn test_depth_binding_with_color_format_returns_none() {
    let (api, driver) = create();
    let textures = driver.live_count("ID3D11Texture2D");
    let desc = TextureDesc {
        bind_flags: BindFlags::DEPTH_STENCIL,
        ..TextureDesc::new(64, 64, GraphicsFormat::R8G8B8A8_UNORM)
    };

    assert!(api.create_texture(&desc).unwrap().is_none());
    assert_eq!(driver.live_count("ID3D11Texture2D"), textures);
}

#[test]
fn test_full_mip_chain_is_generated() {
    let (api, driver) = create();
    let desc = TextureDesc { mip_levels: 0, ..TextureDesc::new(256, 256, GraphicsFormat::R8G8B8A8_UNORM) };

    let texture = api.create_texture(&desc).unwrap().unwrap();

    assert_eq!(texture.info().mip_levels, 9);
    assert_eq!(texture.shader_resource_view_count(), 9);
    assert_eq!(texture.render_target_view_count(), 9);
    assert_eq!(driver.generate_mips_calls(), 1);
}

#[test]
fn test_cube_map_slices() {
    let (api, _driver) = create();
    let desc = TextureDesc { is_cube_map: true, ..TextureDesc::new(32, 32, GraphicsFormat::R8G8B8A8_UNORM) };

    let texture = api.create_texture(&desc).unwrap().unwrap();

    assert!(texture.info().is_cube_map);
    assert_eq!(texture.info().array_size, 6);
    assert_eq!(texture.shader_resource_view_count(), 1);
}

#[test]
fn test_dynamic_texture_gets_cpu_write() {
    let (api, _driver) = create();
    let desc = TextureDesc { usage: ResourceUsage::Dynamic, ..TextureDesc::new(16, 16, GraphicsFormat::R8G8B8A8_UNORM) };

    let texture = api.create_texture(&desc).unwrap().unwrap();

    assert!(texture.info().cpu_access.contains(CpuAccessFlags::WRITE));
}

#[test]
fn test_initial_data_reaches_mip_zero() {
    let (api, driver) = create();
    let pixels: Vec<u8> = (0..16u8).collect();
    let desc = TextureDesc {
        data: Some(TextureData::Single(pixels.clone())),
        ..TextureDesc::new(2, 2, GraphicsFormat::R8G8B8A8_UNORM)
    };

    let texture = api.create_texture(&desc).unwrap().unwrap();

    assert_eq!(driver.subresource(texture.native_resource().unwrap(), 0), Some(pixels));
}

#[test]
fn test_initial_data_is_filtered_down_the_mip_chain() {
    let (api, driver) = create();
    let pixels: Vec<u8> = [200u8, 100, 50, 255].repeat(64);
    let desc = TextureDesc {
        mip_levels: 0,
        data: Some(TextureData::Single(pixels)),
        ..TextureDesc::new(8, 8, GraphicsFormat::R8G8B8A8_UNORM)
    };

    let texture = api.create_texture(&desc).unwrap().unwrap();
    let raw = texture.native_resource().unwrap();

    assert_eq!(texture.info().mip_levels, 4);
    assert_eq!(driver.generate_mips_calls(), 1);
    let mip_two = driver.subresource(raw, 2).unwrap();
    assert_eq!(mip_two.len(), 16);
    assert_eq!(&mip_two[..4], &[200, 100, 50, 255]);
    assert!(mip_two.chunks_exact(4).all(|texel| texel == [200, 100, 50, 255]));
}

#[test]
fn test_staging_readback() {
    let (api, _driver) = create();
    let source = api.create_texture(&render_target(4, 4)).unwrap().unwrap();
    let staging = api
        .create_texture(&TextureDesc {
            bind_flags: BindFlags::empty(),
            usage: ResourceUsage::Staging,
            cpu_access: CpuAccessFlags::READ,
            ..TextureDesc::new(4, 4, GraphicsFormat::R8G8B8A8_UNORM)
        })
        .unwrap()
        .unwrap();

    api.clear_render_target(Some(&source), LinearColor::new(1.0, 0.0, 0.0, 1.0));
    api.copy_resource(texture_resource(&source), texture_resource(&staging));
    let mapped = api.map_to_read(texture_resource(&staging), 0, MapFlags::empty()).unwrap();
    api.unmap(texture_resource(&staging), 0);

    assert_eq!(mapped.row_pitch, 16);
    assert_eq!(&mapped.data[..4], &[255, 0, 0, 255]);
    assert_eq!(mapped.data.len(), 64);
}

#[test]
fn test_map_without_resource_is_empty() {
    let (api, _driver) = create();
    let mapped = api.map_to_read(None, 0, MapFlags::empty()).unwrap();
    assert!(mapped.is_empty());
}

#[test]
fn test_map_of_gpu_texture_fails() {
    let (api, _driver) = create();
    let texture = api.create_texture(&render_target(4, 4)).unwrap().unwrap();

    let result = api.map_to_read(texture_resource(&texture), 0, MapFlags::empty());

    assert!(matches!(result, Err(Error::DeviceError { .. })));
}

#[test]
fn test_write_to_buffer() {
    let (api, driver) = create();
    let buffer = api.create_constant_buffer(16, None, ResourceUsage::Default).unwrap();
    let raw = buffer.native_resource().unwrap();
    let data: Vec<u8> = (1..=16).collect();
    let resource: Option<GraphicsResource<'_, Dx11RenderApi>> = Some(GraphicsResource::ConstantBuffer(&*buffer));

    api.write_to_resource(resource, 0, None, &data, 0, 0, CopyFlags::empty());
    api.write_to_resource(None, 0, None, &[0; 16], 0, 0, CopyFlags::empty());

    assert_eq!(driver.buffer_data(raw), Some(data));
}

#[test]
fn test_discard_view_prefers_render_target() {
    let (api, driver) = create();
    let texture = api.create_texture(&render_target(8, 8)).unwrap().unwrap();

    api.discard_view(Some(&texture));
    api.discard_view(None);

    assert_eq!(driver.discarded_views(), vec![texture.render_target_view(0).unwrap()]);
}

#[test]
fn test_release_frees_native_objects() {
    let (api, driver) = create();
    let texture = api.create_texture(&render_target(64, 64)).unwrap().unwrap();
    let raw = texture.native_resource().unwrap();
    assert_eq!(driver.ref_count(raw), Some(3));

    texture.release();

    assert_eq!(driver.ref_count(raw), None);
    assert!(!texture.is_loaded());
}

// ============================================================================
// MSAA
// ============================================================================

#[test]
fn test_msaa_support_is_memoized() {
    let (api, driver) = create();

    let first = api.is_msaa_format_supported(GraphicsFormat::R8G8B8A8_UNORM);
    let queries = driver.multisample_queries();
    let second = api.is_msaa_format_supported(GraphicsFormat::R8G8B8A8_UNORM);

    assert_eq!(first, second);
    assert!(first.is_some());
    assert_eq!(driver.multisample_queries(), queries);
}

// ============================================================================
// BUFFERS
// ============================================================================

#[test]
fn test_index_buffer() {
    let (api, _driver) = create();

    let buffer = api.create_index_buffer(600, None, IndexBufferFormat::R16, ResourceUsage::Default).unwrap();

    assert_eq!(buffer.memory_usage(), 600);
    assert_eq!(buffer.stride(), 2);
}

#[test]
fn test_vertex_buffer_stride_follows_declaration() {
    let (api, _driver) = create();
    let declaration = api
        .create_vertex_declaration(&[
            VertexElement::new(0, VertexElementType::Float3, VertexElementSemantic::Position, 0),
            VertexElement::new(12, VertexElementType::Float2, VertexElementSemantic::TexCoord, 0),
        ])
        .unwrap();

    let buffer = api.create_vertex_buffer(&declaration, 200, None, ResourceUsage::Dynamic).unwrap();

    assert_eq!(buffer.stride(), 20);
    assert_eq!(buffer.memory_usage(), 200);
}

// ============================================================================
// SHADERS AND INPUT LAYOUTS
// ============================================================================

#[test]
fn test_compile_failure_returns_none() {
    let (api, driver) = create();
    let desc = ShaderDesc::from_code("broken.hlsl", PIXEL_SHADER, "missing_entry");

    assert!(api.create_shader(ShaderStage::Pixel, &desc).unwrap().is_none());
    assert_eq!(driver.live_count("ID3D11PixelShader"), 0);
}

#[test]
fn test_shader_from_file_with_include() {
    let (api, driver) = create();
    let desc = ShaderDesc::from_file("mesh.hlsl", "main");

    let shader = api.create_shader(ShaderStage::Vertex, &desc).unwrap().unwrap();

    assert_eq!(shader.stage(), ShaderStage::Vertex);
    assert_eq!(driver.live_count("ID3D11VertexShader"), 1);
}

#[test]
fn test_missing_shader_file_returns_none() {
    let (api, _driver) = create();
    let desc = ShaderDesc::from_file("missing.hlsl", "main");
    assert!(api.create_shader(ShaderStage::Vertex, &desc).unwrap().is_none());
}

#[test]
fn test_input_layout_from_shader_skips_system_values() {
    let (api, _driver) = create();
    let vertex_shader = shader(&api, ShaderStage::Vertex, VERTEX_SHADER);

    let layout = api.create_input_layout_from_shader(&vertex_shader).unwrap().unwrap();

    let elements = layout.declaration().elements();
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0].semantic, VertexElementSemantic::Position);
    assert_eq!(elements[0].element_type, VertexElementType::Float3);
    assert_eq!(elements[1].offset, 12);
    assert_eq!(elements[1].element_type, VertexElementType::Float2);
    assert_eq!(layout.declaration().vertex_size(0), 20);
}

#[test]
fn test_input_layout_needs_vertex_shader() {
    let (api, driver) = create();
    let pixel_shader = shader(&api, ShaderStage::Pixel, PIXEL_SHADER);
    let declaration = api
        .create_vertex_declaration(&[VertexElement::new(0, VertexElementType::Float3, VertexElementSemantic::Position, 0)])
        .unwrap();

    assert!(api.create_input_layout(&declaration, &pixel_shader).unwrap().is_none());
    assert_eq!(driver.live_count("ID3D11InputLayout"), 0);
}

#[test]
fn test_input_layout_missing_input_fails() {
    let (api, _driver) = create();
    let vertex_shader = shader(&api, ShaderStage::Vertex, VERTEX_SHADER);
    let declaration = api
        .create_vertex_declaration(&[VertexElement::new(0, VertexElementType::Float3, VertexElementSemantic::Position, 0)])
        .unwrap();

    let result = api.create_input_layout(&declaration, &vertex_shader);

    assert!(matches!(result, Err(Error::DeviceError { .. })));
}

// ============================================================================
// BINDING
// ============================================================================

#[test]
fn test_set_program_rejects_stage_mismatch() {
    let (api, driver) = create();
    let vertex_shader = shader(&api, ShaderStage::Vertex, VERTEX_SHADER);
    let pixel_shader = shader(&api, ShaderStage::Pixel, PIXEL_SHADER);

    api.set_program(ShaderStage::Vertex, Some(&vertex_shader));
    assert_eq!(driver.bound_slots().stages[ShaderStage::Vertex.index()].shader, vertex_shader.raw());

    // A mismatched shader leaves the stage empty rather than stale
    api.set_program(ShaderStage::Vertex, Some(&pixel_shader));
    assert_eq!(driver.bound_slots().stages[ShaderStage::Vertex.index()].shader, None);

    api.set_program(ShaderStage::Pixel, Some(&pixel_shader));
    assert_eq!(driver.bound_slots().stages[ShaderStage::Pixel.index()].shader, pixel_shader.raw());

    api.set_program(ShaderStage::Pixel, None);
    assert_eq!(driver.bound_slots().stages[ShaderStage::Pixel.index()].shader, None);
}

#[test]
fn test_unbinding_with_none() {
    let (api, driver) = create();
    let texture = api.create_texture(&render_target(8, 8)).unwrap().unwrap();
    let blend = api.create_blend_state(&BlendDesc::alpha_blend(), Vec4::new(0.5, 0.5, 0.5, 1.0), 0xff).unwrap();

    api.set_shader_resource(ShaderStage::Pixel, Some(&texture), 2);
    api.set_blend_state(Some(&blend));
    let slots = driver.bound_slots();
    assert_eq!(slots.stages[ShaderStage::Pixel.index()].shader_resources[2], texture.shader_resource_view(0));
    assert_eq!(slots.blend_factor, [0.5, 0.5, 0.5, 1.0]);
    assert_eq!(slots.sample_mask, 0xff);

    api.set_shader_resource(ShaderStage::Pixel, None, 2);
    api.set_blend_state(None);
    api.set_index_buffer(None, 0);
    let slots = driver.bound_slots();
    assert_eq!(slots.stages[ShaderStage::Pixel.index()].shader_resources[2], None);
    assert_eq!(slots.blend_state, None);
    assert_eq!(slots.blend_factor, [0.0; 4]);
    assert_eq!(slots.sample_mask, 0xffff_ffff);
    assert_eq!(slots.index_buffer, (None, DxgiFormat::R32_UINT, 0));
}

#[test]
fn test_render_targets_by_mip() {
    let (api, driver) = create();
    let desc = TextureDesc { mip_levels: 3, ..render_target(64, 64) };
    let texture = api.create_texture(&desc).unwrap().unwrap();
    let depth = api
        .create_texture(&TextureDesc {
            bind_flags: BindFlags::DEPTH_STENCIL,
            ..TextureDesc::new(64, 64, GraphicsFormat::D32_FLOAT)
        })
        .unwrap()
        .unwrap();

    api.set_render_targets(&[RenderTarget::new(Some(&*texture), 2), RenderTarget::new(None, 0)], Some(&depth));

    let slots = driver.bound_slots();
    assert_eq!(slots.render_targets[0], texture.render_target_view(2));
    assert_eq!(slots.render_targets[1], None);
    assert_eq!(slots.depth_stencil_view, depth.depth_stencil_view());
}

#[test]
fn test_draw_calls_reach_the_context() {
    let (api, driver) = create();

    api.set_topology(PrimitiveTopology::TriangleList);
    api.draw(3, 0);
    api.draw_indexed(6, 0, 0);
    api.dispatch(8, 8, 1);

    assert_eq!(
        driver.draw_calls(),
        vec![
            DrawCall::Draw { vertex_count: 3, start_vertex: 0 },
            DrawCall::DrawIndexed { index_count: 6, start_index: 0, base_vertex: 0 },
            DrawCall::Dispatch { x: 8, y: 8, z: 1 },
        ]
    );
}

// ============================================================================
// STATE CAPTURE
// ============================================================================

#[test]
fn test_save_and_restore_pipeline_state() {
    let (api, driver) = create();
    let rasterizer = api
        .create_rasterizer_state(&RasterizerDesc { cull_mode: CullMode::None, ..Default::default() })
        .unwrap();
    let depth_stencil = api.create_depth_stencil_state(&DepthStencilDesc::default()).unwrap();
    let sampler = api.create_sampler_state(&SamplerDesc::default()).unwrap();
    let texture = api.create_texture(&render_target(8, 8)).unwrap().unwrap();
    let pixel_shader = shader(&api, ShaderStage::Pixel, PIXEL_SHADER);
    let index_buffer = api.create_index_buffer(12, None, IndexBufferFormat::R16, ResourceUsage::Default).unwrap();

    api.set_topology(PrimitiveTopology::TriangleStrip);
    api.set_rasterizer_state(Some(&rasterizer));
    api.set_depth_stencil_state(Some(&depth_stencil), 3);
    api.set_sampler(ShaderStage::Pixel, Some(&sampler), 0);
    api.set_shader_resource(ShaderStage::Pixel, Some(&texture), 0);
    api.set_program(ShaderStage::Pixel, Some(&pixel_shader));
    api.set_index_buffer(Some(&index_buffer), 4);
    let before = driver.bound_slots();

    let snapshot = api.save_pipeline_state();
    assert!(snapshot.held_references() >= 6);

    api.set_topology(PrimitiveTopology::PointList);
    api.set_rasterizer_state(None);
    api.set_depth_stencil_state(None, 0);
    api.set_sampler(ShaderStage::Pixel, None, 0);
    api.set_shader_resource(ShaderStage::Pixel, None, 0);
    api.set_program(ShaderStage::Pixel, None);
    api.set_index_buffer(None, 0);
    api.set_viewports(&[Viewport::new(16.0, 16.0)]);
    assert_ne!(driver.bound_slots(), before);

    api.restore_pipeline_state(Some(&snapshot));
    assert_eq!(driver.bound_slots(), before);

    // a snapshot can be applied more than once
    api.set_topology(PrimitiveTopology::LineList);
    api.restore_pipeline_state(Some(&snapshot));
    assert_eq!(driver.bound_slots(), before);

    api.restore_pipeline_state(None);
    assert_eq!(driver.bound_slots(), before);
}

#[test]
fn test_dropping_snapshot_releases_references() {
    let (api, driver) = create();
    let rasterizer = api.create_rasterizer_state(&RasterizerDesc::default()).unwrap();
    let raw = rasterizer.raw().unwrap();
    api.set_rasterizer_state(Some(&rasterizer));
    assert_eq!(driver.ref_count(raw), Some(2));

    let snapshot = api.save_pipeline_state();
    assert_eq!(driver.ref_count(raw), Some(3));

    drop(snapshot);
    assert_eq!(driver.ref_count(raw), Some(2));
}

#[test]
fn test_current_state_getters() {
    let (api, driver) = create();
    assert!(api.current_rasterizer_state().is_none());
    assert!(api.current_blend_state().is_none());

    let rasterizer = api.create_rasterizer_state(&RasterizerDesc::default()).unwrap();
    let blend = api.create_blend_state(&BlendDesc::default(), Vec4::ONE, 0xf).unwrap();
    let sampler = api.create_sampler_state(&SamplerDesc::default()).unwrap();
    api.set_rasterizer_state(Some(&rasterizer));
    api.set_blend_state(Some(&blend));
    api.set_sampler(ShaderStage::Pixel, Some(&sampler), 1);

    let current = api.current_rasterizer_state().unwrap();
    assert_eq!(current.raw(), rasterizer.raw());
    assert_eq!(driver.ref_count(rasterizer.raw().unwrap()), Some(3));
    drop(current);
    assert_eq!(driver.ref_count(rasterizer.raw().unwrap()), Some(2));

    let current = api.current_blend_state().unwrap();
    assert_eq!(current.raw(), blend.raw());
    assert_eq!(current.sample_mask(), 0xf);
    assert_eq!(current.blend_factor(), Vec4::ONE);

    assert_eq!(api.current_sampler_state(1).unwrap().raw(), sampler.raw());
    assert!(api.current_sampler_state(0).is_none());
}

// ============================================================================
// HELPERS
// ============================================================================

#[test]
fn test_system_value_detection() {
    assert!(is_system_value("SV_Position"));
    assert!(is_system_value("sv_vertexid"));
    assert!(!is_system_value("POSITION"));
    assert!(!is_system_value("SV"));
}

#[test]
fn test_initial_subresources_are_slice_major() {
    let desc = TextureDesc { array_size: 2, ..TextureDesc::new(4, 4, GraphicsFormat::R8G8B8A8_UNORM) };
    let data = TextureData::Layers(vec![ge_render_api::ge::render::TextureLayerData { layer: 1, data: vec![7; 64] }]);

    let subresources = initial_subresources(&desc, &data, 2, 2);

    assert_eq!(subresources.len(), 4);
    assert_eq!(subresources[0].0, vec![0; 64]);
    assert_eq!(subresources[1].1, 8);
    assert_eq!(subresources[2].0, vec![7; 64]);
    assert_eq!(subresources[3].0, vec![0; 16]);
}

#[test]
fn test_device_error_carries_code() {
    let error = throw_if_failed::<()>(Err(HResult::E_FAIL), "Could not present").unwrap_err();
    assert_eq!(error.to_string(), "Device error: Could not present\n(HRESULT: 0x80004005)");
    assert_eq!(error.native_code(), Some(0x8000_4005));
}
