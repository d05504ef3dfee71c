//! Unit tests for shader and pipeline helper types

use crate::render_api::{LinearColor, ShaderDesc, ShaderSource, ShaderStage, Viewport};

#[test]
fn test_shader_stage_table_order() {
    for (i, stage) in ShaderStage::ALL.iter().enumerate() {
        assert_eq!(stage.index(), i);
    }
}

#[test]
fn test_shader_stage_targets() {
    assert_eq!(ShaderStage::Vertex.target("5_0"), "vs_5_0");
    assert_eq!(ShaderStage::Compute.target("5_0"), "cs_5_0");
    assert_eq!(ShaderStage::Domain.target_prefix(), "ds");
}

#[test]
fn test_shader_desc_builders() {
    let desc = ShaderDesc::from_code("blit", "float4 main() : SV_Target { return 0; }", "main")
        .with_macro("USE_GAMMA", "1");

    assert_eq!(desc.shader_model, "5_0");
    assert_eq!(desc.macros.len(), 1);
    assert_eq!(desc.macros[0].name, "USE_GAMMA");
    assert!(matches!(desc.source, ShaderSource::Code { ref name, .. } if name == "blit"));

    let file = ShaderDesc::from_file("Shaders/blit.hlsl", "vs_main");
    assert!(matches!(file.source, ShaderSource::File(_)));
}

#[test]
fn test_viewport_full_depth_range() {
    let vp = Viewport::new(800.0, 600.0);
    assert_eq!((vp.x, vp.y), (0.0, 0.0));
    assert_eq!((vp.min_depth, vp.max_depth), (0.0, 1.0));
}

#[test]
fn test_linear_color_from_vec4() {
    let color = LinearColor::from(glam::Vec4::new(0.25, 0.5, 0.75, 1.0));
    assert_eq!(color.to_array(), [0.25, 0.5, 0.75, 1.0]);
    assert_eq!(LinearColor::BLACK.to_array(), [0.0, 0.0, 0.0, 1.0]);
}
