//! Unit tests for the format translator

use ge_render_api::ge::render::{
    BindFlags, BlendDesc, CpuAccessFlags, Filter, FilterReduction, GraphicsFormat,
    IndexBufferFormat, PrimitiveTopology, SamplerDesc, VertexElementSemantic, VertexElementType,
};

use crate::native::{self, DxgiFormat, RegisterComponentType};
use crate::translate::*;

// ============================================================================
// PIXEL FORMATS
// ============================================================================

#[test]
fn test_abstract_native_abstract_round_trip() {
    for &format in GraphicsFormat::ALL {
        assert_eq!(to_abstract(to_native(format)), format, "{}", format);
    }
}

#[test]
fn test_native_abstract_native_round_trip() {
    for &format in GraphicsFormat::ALL {
        let native = to_native(format);
        assert_eq!(to_native(to_abstract(native)), native, "{:?}", native);
    }
}

#[test]
fn test_native_values_match_dxgi() {
    assert_eq!(to_native(GraphicsFormat::R8G8B8A8_UNORM).raw(), 28);
    assert_eq!(to_native(GraphicsFormat::D24_UNORM_S8_UINT).raw(), 45);
    assert_eq!(to_native(GraphicsFormat::BC7_UNORM_SRGB).raw(), 99);
    assert_eq!(to_native(GraphicsFormat::OPAQUE_420).raw(), 106);
    assert_eq!(to_native(GraphicsFormat::P208).raw(), 130);
}

#[test]
fn test_unmapped_native_formats_give_unknown() {
    assert_eq!(to_abstract(DxgiFormat::A4B4G4R4_UNORM), GraphicsFormat::UNKNOWN);
    assert_eq!(to_abstract(DxgiFormat::FORCE_UINT), GraphicsFormat::UNKNOWN);
    assert_eq!(to_abstract(DxgiFormat::from_raw(120)), GraphicsFormat::UNKNOWN);
}

#[test]
fn test_bits_per_pixel_positive_for_reachable_formats() {
    let opaque = [
        GraphicsFormat::UNKNOWN,
        GraphicsFormat::SAMPLER_FEEDBACK_MIN_MIP_OPAQUE,
        GraphicsFormat::SAMPLER_FEEDBACK_MIP_REGION_USED_OPAQUE,
    ];
    for &format in GraphicsFormat::ALL.iter().filter(|f| !opaque.contains(f)) {
        assert!(bits_per_pixel(to_native(format)) > 0, "{}", format);
    }
    assert_eq!(bits_per_pixel(DxgiFormat::UNKNOWN), 0);
    assert_eq!(bits_per_pixel(DxgiFormat::FORCE_UINT), 0);
    assert_eq!(bits_per_pixel(DxgiFormat::A4B4G4R4_UNORM), 16);
}

#[test]
fn test_depth_format_triples() {
    assert_eq!(
        depth_format_triple(DxgiFormat::D32_FLOAT),
        Some((DxgiFormat::R32_TYPELESS, DxgiFormat::R32_FLOAT, DxgiFormat::D32_FLOAT))
    );
    assert_eq!(
        depth_format_triple(DxgiFormat::D24_UNORM_S8_UINT),
        Some((DxgiFormat::R24G8_TYPELESS, DxgiFormat::R24_UNORM_X8_TYPELESS, DxgiFormat::D24_UNORM_S8_UINT))
    );
    assert_eq!(
        depth_format_triple(DxgiFormat::D16_UNORM),
        Some((DxgiFormat::R16_TYPELESS, DxgiFormat::R16_UNORM, DxgiFormat::D16_UNORM))
    );
    assert_eq!(depth_format_triple(DxgiFormat::R8G8B8A8_UNORM), None);
}

#[test]
fn test_index_formats() {
    assert_eq!(index_format(IndexBufferFormat::R16), DxgiFormat::R16_UINT);
    assert_eq!(index_format(IndexBufferFormat::R32), DxgiFormat::R32_UINT);
}

// ============================================================================
// VERTEX ELEMENTS
// ============================================================================

#[test]
fn test_vertex_element_formats() {
    assert_eq!(vertex_element_format(VertexElementType::Float3), DxgiFormat::R32G32B32_FLOAT);
    assert_eq!(vertex_element_format(VertexElementType::Color), DxgiFormat::R8G8B8A8_UNORM);
    assert_eq!(vertex_element_format(VertexElementType::ColorArgb), DxgiFormat::R8G8B8A8_UNORM);
    assert_eq!(vertex_element_format(VertexElementType::UByte4), DxgiFormat::R8G8B8A8_UINT);
    assert_eq!(vertex_element_format(VertexElementType::Short2), DxgiFormat::R16G16_SINT);
    assert_eq!(vertex_element_format(VertexElementType::UInt3), DxgiFormat::R32G32B32_UINT);
    assert_eq!(vertex_element_format(VertexElementType::Unknown), DxgiFormat::R32G32B32A32_FLOAT);
}

#[test]
fn test_semantic_names_round_trip() {
    let semantics = [
        VertexElementSemantic::Position,
        VertexElementSemantic::BlendWeight,
        VertexElementSemantic::BlendIndices,
        VertexElementSemantic::Normal,
        VertexElementSemantic::PointSize,
        VertexElementSemantic::TexCoord,
        VertexElementSemantic::Tangent,
        VertexElementSemantic::Bitangent,
        VertexElementSemantic::PositionT,
        VertexElementSemantic::Color,
        VertexElementSemantic::Custom,
    ];
    for semantic in semantics {
        assert_eq!(semantic_from_name(semantic_name(semantic)), semantic);
    }
    assert_eq!(semantic_name(VertexElementSemantic::Bitangent), "BINORMAL");
}

#[test]
fn test_unknown_semantic_defaults_to_position() {
    assert_eq!(semantic_from_name("WORLDMATRIX"), VertexElementSemantic::Position);
    assert_eq!(semantic_from_name("normal"), VertexElementSemantic::Position);
}

#[test]
fn test_input_element_type_from_mask() {
    assert_eq!(input_element_type(RegisterComponentType::Float32, 0b1), VertexElementType::Float1);
    assert_eq!(input_element_type(RegisterComponentType::Float32, 0b11), VertexElementType::Float2);
    assert_eq!(input_element_type(RegisterComponentType::Sint32, 0b111), VertexElementType::Int3);
    assert_eq!(input_element_type(RegisterComponentType::Uint32, 0b1111), VertexElementType::UInt4);
    assert_eq!(input_element_type(RegisterComponentType::Unknown, 0b1111), VertexElementType::Unknown);
}

// ============================================================================
// FLAGS AND STATE
// ============================================================================

#[test]
fn test_bind_and_cpu_flags() {
    let flags = BindFlags::SHADER_RESOURCE | BindFlags::RENDER_TARGET;
    let native = bind_flags(flags);
    assert_eq!(native, native::BindFlag::SHADER_RESOURCE | native::BindFlag::RENDER_TARGET);
    assert_eq!(bind_flags_to_abstract(native), flags);

    assert_eq!(cpu_access(CpuAccessFlags::WRITE), native::CpuAccessFlag::WRITE);
    assert_eq!(cpu_access(CpuAccessFlags::READ).bits(), 0x20000);
    assert_eq!(cpu_access_to_abstract(native::CpuAccessFlag::READ), CpuAccessFlags::READ);
}

#[test]
fn test_topology_values() {
    assert_eq!(topology(PrimitiveTopology::TriangleList).0, 4);
    assert_eq!(topology(PrimitiveTopology::LineStripAdj).0, 11);
    assert_eq!(topology(PrimitiveTopology::PatchList(1)).0, 33);
    assert_eq!(topology(PrimitiveTopology::PatchList(32)).0, 64);
}

#[test]
fn test_filter_encoding() {
    assert_eq!(filter(&Filter::MIN_MAG_MIP_POINT), native::Filter::MIN_MAG_MIP_POINT);
    assert_eq!(filter(&Filter::MIN_MAG_MIP_LINEAR), native::Filter::MIN_MAG_MIP_LINEAR);
    assert_eq!(filter(&Filter::ANISOTROPIC), native::Filter::ANISOTROPIC);
    assert_eq!(
        filter(&Filter::MIN_MAG_MIP_LINEAR.with_reduction(FilterReduction::Comparison)),
        native::Filter::COMPARISON_MIN_MAG_MIP_LINEAR
    );
    assert_eq!(filter(&Filter::MIN_MAG_LINEAR_MIP_POINT).0, 0x14);
}

#[test]
fn test_state_descriptor_copies() {
    let sampler = sampler_desc(&SamplerDesc::default());
    assert_eq!(sampler.address_u, native::TextureAddressMode::Clamp);
    assert_eq!(sampler.comparison_func, native::ComparisonFunc::Never);

    let blend = blend_desc(&BlendDesc::alpha_blend());
    assert!(blend.render_target[7].blend_enable);
    assert_eq!(blend.render_target[0].src_blend, native::Blend::SrcAlpha);
    assert_eq!(blend.render_target[0].render_target_write_mask, 0xf);
}
