//! Direct3D 11 driver tests
//!
//! All tests require a D3D11 capable adapter and are marked with #[ignore].
//!
//! Run with: cargo test --test d3d11_driver_tests -- --ignored
#![cfg(windows)]

use std::sync::Arc;

use ge_render_api::ge::render::ShaderStage;
use ge_render_api_dx11::d3d11::D3D11Factory;
use ge_render_api_dx11::native::*;

fn device() -> (D3D11Factory, Arc<dyn NativeDevice>, Arc<dyn NativeContext>) {
    let factory = D3D11Factory::new().expect("Failed to create DXGI factory");
    let (device, context, _) = factory
        .create_device(0, CreateDeviceFlag::BGRA_SUPPORT, &[FeatureLevel::Level11_1, FeatureLevel::Level11_0])
        .expect("Failed to create D3D11 device");
    (factory, device, context)
}

fn staging_desc(width: u32, height: u32) -> Texture2dDesc {
    Texture2dDesc {
        width,
        height,
        mip_levels: 1,
        array_size: 1,
        format: DxgiFormat::R8G8B8A8_UNORM,
        sample_desc: SampleDesc::default(),
        usage: Usage::Staging,
        bind_flags: BindFlag::empty(),
        cpu_access_flags: CpuAccessFlag::READ,
        misc_flags: ResourceMiscFlag::empty(),
    }
}

#[test]
#[ignore] // Requires GPU
fn test_enumerates_adapters() {
    let factory = D3D11Factory::new().unwrap();
    let adapters = factory.enum_adapters();
    assert!(!adapters.is_empty());
    assert!(!adapters[0].description.is_empty());
}

#[test]
#[ignore] // Requires GPU
fn test_texture_lifetime_is_tracked() {
    let (_factory, device, _context) = device();
    let texture = device.create_texture_2d(&staging_desc(4, 4), None).unwrap();
    device.set_debug_name(texture, "Readback");

    let live = device.live_objects();
    let entry = live.iter().find(|o| o.handle == texture).unwrap();
    assert_eq!(entry.kind, "ID3D11Texture2D");
    assert_eq!(entry.name, "Readback");
    assert_eq!(device.texture_2d_desc(texture).unwrap(), staging_desc(4, 4));

    assert_eq!(device.add_ref(texture), 2);
    assert_eq!(device.release(texture), 1);
    assert_eq!(device.release(texture), 0);
    assert!(device.live_objects().iter().all(|o| o.handle != texture));
}

#[test]
#[ignore] // Requires GPU
fn test_clear_copy_and_map() {
    let (_factory, device, context) = device();
    let target_desc = Texture2dDesc {
        usage: Usage::Default,
        bind_flags: BindFlag::RENDER_TARGET,
        cpu_access_flags: CpuAccessFlag::empty(),
        ..staging_desc(4, 4)
    };
    let target = device.create_texture_2d(&target_desc, None).unwrap();
    let view = device.create_render_target_view(target, None).unwrap();
    let readback = device.create_texture_2d(&staging_desc(4, 4), None).unwrap();

    context.clear_render_target_view(view, [0.0, 1.0, 0.0, 1.0]);
    context.copy_resource(readback, target);
    let mapped = context.map(readback, 0, MapType::Read, MapFlag::empty()).unwrap();
    context.unmap(readback, 0);

    assert!(mapped.row_pitch >= 16);
    assert_eq!(&mapped.data[..4], &[0, 255, 0, 255]);

    for handle in [view, target, readback] {
        device.release(handle);
    }
}

#[test]
#[ignore] // Requires GPU
fn test_compile_and_reflect_vertex_shader() {
    let (factory, device, _context) = device();
    let source = b"float4 main(float3 position : POSITION, float2 uv : TEXCOORD0) : SV_Position { return float4(position + float3(uv, 0), 1); }";

    let bytecode = factory
        .compiler()
        .compile(source, "quad.hlsl", &[], None, "main", "vs_5_0", CompileFlag::ENABLE_STRICTNESS)
        .unwrap();
    let inputs = factory.compiler().reflect_input_signature(&bytecode).unwrap();

    assert_eq!(inputs.len(), 2);
    assert_eq!(inputs[0].semantic_name, "POSITION");
    assert_eq!(inputs[1].semantic_name, "TEXCOORD");
    assert_eq!(inputs[1].component_type, RegisterComponentType::Float32);

    let shader = device.create_shader(ShaderStage::Vertex, &bytecode).unwrap();
    assert_eq!(device.release(shader), 0);
}

#[test]
#[ignore] // Requires GPU
fn test_compile_errors_carry_diagnostics() {
    let (factory, _device, _context) = device();
    let error = factory
        .compiler()
        .compile(b"float4 main() : SV_Target { return 0 }", "broken.hlsl", &[], None, "main", "ps_5_0", CompileFlag::empty())
        .unwrap_err();

    assert!(error.code.failed());
    assert!(error.diagnostics.contains("broken.hlsl"));
}
