use super::*;
use crate::native::NativeFactory;
use crate::reference::{ReferenceCompiler, ReferenceDriver, ReferenceFactory};

fn device() -> (Arc<dyn NativeDevice>, Arc<dyn NativeContext>, ReferenceDriver) {
    let factory = ReferenceFactory::default();
    let (device, context, _) = factory.create_device(0, CreateDeviceFlag::empty(), &[]).unwrap();
    (device, context, factory.driver())
}

fn texture_desc(width: u32, height: u32, format: DxgiFormat, bind: BindFlag) -> Texture2dDesc {
    Texture2dDesc {
        width,
        height,
        mip_levels: 1,
        array_size: 1,
        format,
        sample_desc: SampleDesc::default(),
        usage: Usage::Default,
        bind_flags: bind,
        cpu_access_flags: CpuAccessFlag::empty(),
        misc_flags: ResourceMiscFlag::empty(),
    }
}

fn vs_bytecode(source: &str) -> Vec<u8> {
    ReferenceCompiler.compile(source.as_bytes(), "t.hlsl", &[], None, "main", "vs_5_0", CompileFlag::empty()).unwrap()
}

#[test]
fn test_format_support_classes() {
    let rgba = format_support(DxgiFormat::R8G8B8A8_UNORM).unwrap();
    assert!(rgba.contains(FormatSupport::MIP_AUTOGEN | FormatSupport::RENDER_TARGET | FormatSupport::DISPLAY));

    let bc1 = format_support(DxgiFormat::BC1_UNORM).unwrap();
    assert!(bc1.contains(FormatSupport::SHADER_SAMPLE));
    assert!(!bc1.contains(FormatSupport::RENDER_TARGET));

    let depth = format_support(DxgiFormat::D24_UNORM_S8_UINT).unwrap();
    assert!(depth.contains(FormatSupport::DEPTH_STENCIL));
    assert!(!depth.contains(FormatSupport::MIP_AUTOGEN));

    let index = format_support(DxgiFormat::R16_UINT).unwrap();
    assert!(index.contains(FormatSupport::IA_INDEX_BUFFER));

    assert_eq!(format_support(DxgiFormat::UNKNOWN), Err(HResult::E_FAIL));
}

#[test]
fn test_multisample_quality_levels() {
    assert_eq!(multisample_quality_levels(DxgiFormat::R8G8B8A8_UNORM, 4), 1);
    assert_eq!(multisample_quality_levels(DxgiFormat::R8G8B8A8_UNORM, 16), 0);
    assert_eq!(multisample_quality_levels(DxgiFormat::BC3_UNORM, 4), 0);
    assert_eq!(multisample_quality_levels(DxgiFormat::BC3_UNORM, 1), 1);
}

#[test]
fn test_texture_zero_mips_resolves_full_chain() {
    let (device, _, driver) = device();
    let mut desc = texture_desc(256, 64, DxgiFormat::R8G8B8A8_UNORM, BindFlag::SHADER_RESOURCE);
    desc.mip_levels = 0;

    let texture = device.create_texture_2d(&desc, None).unwrap();

    assert_eq!(device.texture_2d_desc(texture).unwrap().mip_levels, 9);
    // 21847 texels over the chain
    assert_eq!(driver.allocated_bytes(), 87388);
}

#[test]
fn test_texture_validation_failures() {
    let (device, _, driver) = device();
    let bad = [
        texture_desc(0, 16, DxgiFormat::R8G8B8A8_UNORM, BindFlag::SHADER_RESOURCE),
        texture_desc(16, 16, DxgiFormat::UNKNOWN, BindFlag::SHADER_RESOURCE),
        texture_desc(16, 16, DxgiFormat::R8G8B8A8_UNORM, BindFlag::DEPTH_STENCIL),
        texture_desc(16, 16, DxgiFormat::BC1_UNORM, BindFlag::RENDER_TARGET),
        Texture2dDesc { misc_flags: ResourceMiscFlag::GENERATE_MIPS, ..texture_desc(16, 16, DxgiFormat::R8G8B8A8_UNORM, BindFlag::SHADER_RESOURCE) },
        Texture2dDesc { usage: Usage::Staging, cpu_access_flags: CpuAccessFlag::READ, ..texture_desc(16, 16, DxgiFormat::R8G8B8A8_UNORM, BindFlag::SHADER_RESOURCE) },
        Texture2dDesc { sample_desc: SampleDesc { count: 4, quality: 0 }, mip_levels: 2, ..texture_desc(16, 16, DxgiFormat::R8G8B8A8_UNORM, BindFlag::RENDER_TARGET) },
        Texture2dDesc { misc_flags: ResourceMiscFlag::TEXTURECUBE, array_size: 4, ..texture_desc(16, 16, DxgiFormat::R8G8B8A8_UNORM, BindFlag::SHADER_RESOURCE) },
    ];

    for desc in &bad {
        assert_eq!(device.create_texture_2d(desc, None), Err(HResult::E_INVALIDARG), "{:?}", desc);
    }
    assert_eq!(driver.live_object_count(), 0);
}

#[test]
fn test_texture_out_of_memory() {
    let (device, _, driver) = device();
    driver.set_memory_budget(1024);

    let desc = texture_desc(64, 64, DxgiFormat::R8G8B8A8_UNORM, BindFlag::SHADER_RESOURCE);
    assert_eq!(device.create_texture_2d(&desc, None), Err(HResult::E_OUTOFMEMORY));
}

#[test]
fn test_texture_initial_data_respects_row_pitch() {
    let (device, _, driver) = device();
    let desc = texture_desc(2, 2, DxgiFormat::R8_UNORM, BindFlag::SHADER_RESOURCE);
    let pixels = [1u8, 2, 0xee, 0xee, 3, 4, 0xee, 0xee];
    let data = [SubresourceData { data: &pixels, row_pitch: 4, slice_pitch: 8 }];

    let texture = device.create_texture_2d(&desc, Some(&data)).unwrap();

    assert_eq!(driver.subresource(texture, 0).unwrap(), vec![1, 2, 3, 4]);
}

#[test]
fn test_views_hold_resource_reference() {
    let (device, _, driver) = device();
    let desc = texture_desc(16, 16, DxgiFormat::R8G8B8A8_UNORM, BindFlag::RENDER_TARGET | BindFlag::SHADER_RESOURCE);
    let texture = device.create_texture_2d(&desc, None).unwrap();

    let rtv = device.create_render_target_view(texture, None).unwrap();
    assert_eq!(driver.ref_count(texture), Some(2));

    device.release(texture);
    assert_eq!(driver.ref_count(texture), Some(1));

    device.release(rtv);
    assert_eq!(driver.ref_count(texture), None);
    assert_eq!(driver.live_object_count(), 0);
}

#[test]
fn test_view_bind_flag_checks() {
    let (device, _, _) = device();
    let desc = texture_desc(16, 16, DxgiFormat::R8G8B8A8_UNORM, BindFlag::SHADER_RESOURCE);
    let texture = device.create_texture_2d(&desc, None).unwrap();

    assert_eq!(device.create_render_target_view(texture, None), Err(HResult::E_INVALIDARG));
    let uav = UnorderedAccessViewDesc { format: DxgiFormat::R8G8B8A8_UNORM, dimension: UavDimension::Texture2d { mip_slice: 0 } };
    assert_eq!(device.create_unordered_access_view(texture, &uav), Err(HResult::E_INVALIDARG));
}

#[test]
fn test_depth_views_need_typed_depth_format() {
    let (device, _, _) = device();
    let desc = texture_desc(16, 16, DxgiFormat::R32_TYPELESS, BindFlag::DEPTH_STENCIL | BindFlag::SHADER_RESOURCE);
    let texture = device.create_texture_2d(&desc, None).unwrap();

    let dsv = DepthStencilViewDesc {
        format: DxgiFormat::D32_FLOAT,
        flags: DsvFlag::empty(),
        dimension: DsvDimension::Texture2d { mip_slice: 0 },
    };
    assert!(device.create_depth_stencil_view(texture, &dsv).is_ok());

    let wrong = DepthStencilViewDesc { format: DxgiFormat::R32_FLOAT, ..dsv };
    assert_eq!(device.create_depth_stencil_view(texture, &wrong), Err(HResult::E_INVALIDARG));

    let srv = ShaderResourceViewDesc {
        format: DxgiFormat::R32_FLOAT,
        dimension: SrvDimension::Texture2d { most_detailed_mip: 0, mip_levels: 1 },
    };
    assert!(device.create_shader_resource_view(texture, &srv).is_ok());
    let typeless = ShaderResourceViewDesc { format: DxgiFormat::R32_TYPELESS, ..srv };
    assert_eq!(device.create_shader_resource_view(texture, &typeless), Err(HResult::E_INVALIDARG));
}

#[test]
fn test_cube_view_requires_cube_texture() {
    let (device, _, _) = device();
    let desc = Texture2dDesc { array_size: 6, ..texture_desc(8, 8, DxgiFormat::R8G8B8A8_UNORM, BindFlag::SHADER_RESOURCE) };
    let texture = device.create_texture_2d(&desc, None).unwrap();

    let cube = ShaderResourceViewDesc {
        format: DxgiFormat::R8G8B8A8_UNORM,
        dimension: SrvDimension::TextureCube { most_detailed_mip: 0, mip_levels: 1 },
    };
    assert_eq!(device.create_shader_resource_view(texture, &cube), Err(HResult::E_INVALIDARG));
}

#[test]
fn test_buffer_validation() {
    let (device, _, driver) = device();
    let desc = |width, bind, usage| BufferDesc {
        byte_width: width,
        usage,
        bind_flags: bind,
        cpu_access_flags: CpuAccessFlag::empty(),
        misc_flags: ResourceMiscFlag::empty(),
        structure_byte_stride: 0,
    };

    assert_eq!(device.create_buffer(&desc(0, BindFlag::VERTEX_BUFFER, Usage::Default), None), Err(HResult::E_INVALIDARG));
    assert_eq!(device.create_buffer(&desc(20, BindFlag::CONSTANT_BUFFER, Usage::Default), None), Err(HResult::E_INVALIDARG));
    assert_eq!(device.create_buffer(&desc(64, BindFlag::VERTEX_BUFFER, Usage::Immutable), None), Err(HResult::E_INVALIDARG));
    assert_eq!(device.create_buffer(&desc(64, BindFlag::VERTEX_BUFFER, Usage::Dynamic), None), Err(HResult::E_INVALIDARG));

    let buffer = device.create_buffer(&desc(600, BindFlag::INDEX_BUFFER, Usage::Default), None).unwrap();
    assert_eq!(driver.allocated_bytes(), 600);
    device.release(buffer);
    assert_eq!(driver.allocated_bytes(), 0);
}

#[test]
fn test_input_layout_must_feed_signature() {
    let (device, _, _) = device();
    let bytecode = vs_bytecode("float4 main(float3 p : POSITION, float2 uv : TEXCOORD0, uint id : SV_VertexID) : SV_Position { return 0; }");
    let element = |name: &str, format| InputElementDesc {
        semantic_name: name.to_string(),
        semantic_index: 0,
        format,
        input_slot: 0,
        aligned_byte_offset: 0,
        input_slot_class: InputClassification::PerVertexData,
        instance_data_step_rate: 0,
    };

    let full = [element("POSITION", DxgiFormat::R32G32B32_FLOAT), element("texcoord", DxgiFormat::R32G32_FLOAT)];
    assert!(device.create_input_layout(&full, &bytecode).is_ok());

    let missing = [element("POSITION", DxgiFormat::R32G32B32_FLOAT)];
    assert_eq!(device.create_input_layout(&missing, &bytecode), Err(HResult::E_INVALIDARG));

    let duplicate = [full[0].clone(), full[0].clone(), full[1].clone()];
    assert_eq!(device.create_input_layout(&duplicate, &bytecode), Err(HResult::E_INVALIDARG));
}

#[test]
fn test_shader_stage_must_match_bytecode() {
    let (device, _, driver) = device();
    let bytecode = vs_bytecode("float4 main() : SV_Position { return 0; }");

    assert!(device.create_shader(ShaderStage::Vertex, &bytecode).is_ok());
    assert_eq!(device.create_shader(ShaderStage::Pixel, &bytecode), Err(HResult::E_INVALIDARG));
    assert_eq!(device.create_shader(ShaderStage::Vertex, b"garbage"), Err(HResult::E_INVALIDARG));
    assert_eq!(driver.created("ID3D11VertexShader"), 1);
}

#[test]
fn test_sampler_anisotropy_range() {
    let (device, _, _) = device();
    let desc = SamplerDesc {
        filter: Filter::ANISOTROPIC,
        address_u: TextureAddressMode::Wrap,
        address_v: TextureAddressMode::Wrap,
        address_w: TextureAddressMode::Wrap,
        mip_lod_bias: 0.0,
        max_anisotropy: 32,
        comparison_func: ComparisonFunc::Never,
        border_color: [0.0; 4],
        min_lod: 0.0,
        max_lod: f32::MAX,
    };
    assert_eq!(device.create_sampler_state(&desc), Err(HResult::E_INVALIDARG));
    assert!(device.create_sampler_state(&SamplerDesc { max_anisotropy: 16, ..desc }).is_ok());
}

#[test]
fn test_live_objects_report_names() {
    let (device, _, _) = device();
    let desc = texture_desc(4, 4, DxgiFormat::R8G8B8A8_UNORM, BindFlag::SHADER_RESOURCE);
    let texture = device.create_texture_2d(&desc, None).unwrap();
    device.set_debug_name(texture, "albedo");

    let live = device.live_objects();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].kind, "ID3D11Texture2D");
    assert_eq!(live[0].name, "albedo");
    assert_eq!(live[0].ref_count, 1);
}
