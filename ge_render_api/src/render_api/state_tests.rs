//! Unit tests for state descriptor defaults

use crate::render_api::{
    BlendDesc, Blend, ColorWriteMask, ComparisonFunc, CullMode, DepthStencilDesc, Filter,
    FilterReduction, FilterType, RasterizerDesc, SamplerDesc,
};

#[test]
fn test_rasterizer_defaults() {
    let desc = RasterizerDesc::default();
    assert_eq!(desc.cull_mode, CullMode::Back);
    assert!(desc.depth_clip_enable);
    assert!(!desc.scissor_enable);
    assert_eq!(desc.forced_sample_count, 0);
}

#[test]
fn test_depth_stencil_defaults() {
    let desc = DepthStencilDesc::default();
    assert!(desc.depth_enable);
    assert_eq!(desc.depth_func, ComparisonFunc::Less);
    assert_eq!(desc.stencil_read_mask, 0xff);
    assert_eq!(desc.front_face.func, ComparisonFunc::Always);
}

#[test]
fn test_blend_defaults_write_all_channels() {
    let desc = BlendDesc::default();
    for target in &desc.render_targets {
        assert!(!target.blend_enable);
        assert_eq!(target.write_mask, ColorWriteMask::ALL);
    }
    assert_eq!(ColorWriteMask::ALL.bits(), 0xf);
}

#[test]
fn test_alpha_blend_preset() {
    let desc = BlendDesc::alpha_blend();
    assert!(desc.render_targets.iter().all(|t| t.blend_enable));
    assert_eq!(desc.render_targets[3].src_blend, Blend::SrcAlpha);
    assert_eq!(desc.render_targets[3].dest_blend, Blend::InvSrcAlpha);
}

#[test]
fn test_filter_presets() {
    assert_eq!(Filter::MIN_MAG_MIP_POINT.min, FilterType::Point);
    assert!(Filter::ANISOTROPIC.anisotropic);

    let comparison = Filter::MIN_MAG_MIP_LINEAR.with_reduction(FilterReduction::Comparison);
    assert_eq!(comparison.reduction, FilterReduction::Comparison);
    assert_eq!(comparison.mip, FilterType::Linear);
}

#[test]
fn test_sampler_defaults() {
    let desc = SamplerDesc::default();
    assert_eq!(desc.filter, Filter::MIN_MAG_MIP_LINEAR);
    assert_eq!(desc.max_anisotropy, 1);
    assert_eq!(desc.max_lod, f32::MAX);
}
