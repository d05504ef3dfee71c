/// Seam descriptors to Win32 descriptor structs
///
/// Seam enums already carry the native numeric values, so most conversions
/// wrap the value in the matching Win32 newtype.

use std::ffi::CString;

use windows::core::PCSTR;
use windows::Win32::Foundation::RECT;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D11::*;
use windows::Win32::Graphics::Dxgi::Common::{DXGI_FORMAT, DXGI_SAMPLE_DESC};
use windows::Win32::Graphics::Dxgi::{DXGI_SWAP_CHAIN_DESC1, DXGI_USAGE};

use crate::native::{self, DxgiFormat};

// ============================================================================
// SCALARS
// ============================================================================

pub(crate) fn format(format: DxgiFormat) -> DXGI_FORMAT {
    DXGI_FORMAT(format.raw() as _)
}

pub(crate) fn from_format(format: DXGI_FORMAT) -> DxgiFormat {
    DxgiFormat::from_raw(format.0 as u32)
}

pub(crate) fn sample_desc(desc: native::SampleDesc) -> DXGI_SAMPLE_DESC {
    DXGI_SAMPLE_DESC { Count: desc.count, Quality: desc.quality }
}

pub(crate) fn usage(usage: native::Usage) -> D3D11_USAGE {
    D3D11_USAGE(usage as _)
}

fn from_usage(usage: D3D11_USAGE) -> native::Usage {
    match usage {
        D3D11_USAGE_IMMUTABLE => native::Usage::Immutable,
        D3D11_USAGE_DYNAMIC => native::Usage::Dynamic,
        D3D11_USAGE_STAGING => native::Usage::Staging,
        _ => native::Usage::Default,
    }
}

pub(crate) fn feature_level(level: native::FeatureLevel) -> D3D_FEATURE_LEVEL {
    D3D_FEATURE_LEVEL(level as _)
}

pub(crate) fn from_feature_level(level: D3D_FEATURE_LEVEL) -> native::FeatureLevel {
    match level {
        D3D_FEATURE_LEVEL_11_1 => native::FeatureLevel::Level11_1,
        D3D_FEATURE_LEVEL_11_0 => native::FeatureLevel::Level11_0,
        D3D_FEATURE_LEVEL_10_1 => native::FeatureLevel::Level10_1,
        _ => native::FeatureLevel::Level10_0,
    }
}

pub(crate) fn topology(topology: native::PrimitiveTopology) -> D3D_PRIMITIVE_TOPOLOGY {
    D3D_PRIMITIVE_TOPOLOGY(topology.0 as _)
}

pub(crate) fn from_topology(topology: D3D_PRIMITIVE_TOPOLOGY) -> native::PrimitiveTopology {
    native::PrimitiveTopology(topology.0 as u32)
}

pub(crate) fn viewport(viewport: &native::Viewport) -> D3D11_VIEWPORT {
    D3D11_VIEWPORT {
        TopLeftX: viewport.top_left_x,
        TopLeftY: viewport.top_left_y,
        Width: viewport.width,
        Height: viewport.height,
        MinDepth: viewport.min_depth,
        MaxDepth: viewport.max_depth,
    }
}

pub(crate) fn from_viewport(viewport: &D3D11_VIEWPORT) -> native::Viewport {
    native::Viewport {
        top_left_x: viewport.TopLeftX,
        top_left_y: viewport.TopLeftY,
        width: viewport.Width,
        height: viewport.Height,
        min_depth: viewport.MinDepth,
        max_depth: viewport.MaxDepth,
    }
}

pub(crate) fn rect(rect: &native::Rect) -> RECT {
    RECT { left: rect.left, top: rect.top, right: rect.right, bottom: rect.bottom }
}

pub(crate) fn from_rect(rect: &RECT) -> native::Rect {
    native::Rect { left: rect.left, top: rect.top, right: rect.right, bottom: rect.bottom }
}

pub(crate) fn native_box(b: &native::NativeBox) -> D3D11_BOX {
    D3D11_BOX { left: b.left, top: b.top, front: b.front, right: b.right, bottom: b.bottom, back: b.back }
}

// ============================================================================
// RESOURCES
// ============================================================================

pub(crate) fn texture_2d_desc(desc: &native::Texture2dDesc) -> D3D11_TEXTURE2D_DESC {
    D3D11_TEXTURE2D_DESC {
        Width: desc.width,
        Height: desc.height,
        MipLevels: desc.mip_levels,
        ArraySize: desc.array_size,
        Format: format(desc.format),
        SampleDesc: sample_desc(desc.sample_desc),
        Usage: usage(desc.usage),
        BindFlags: desc.bind_flags.bits() as _,
        CPUAccessFlags: desc.cpu_access_flags.bits() as _,
        MiscFlags: desc.misc_flags.bits() as _,
    }
}

pub(crate) fn from_texture_2d_desc(desc: &D3D11_TEXTURE2D_DESC) -> native::Texture2dDesc {
    native::Texture2dDesc {
        width: desc.Width,
        height: desc.Height,
        mip_levels: desc.MipLevels,
        array_size: desc.ArraySize,
        format: from_format(desc.Format),
        sample_desc: native::SampleDesc { count: desc.SampleDesc.Count, quality: desc.SampleDesc.Quality },
        usage: from_usage(desc.Usage),
        bind_flags: native::BindFlag::from_bits_truncate(desc.BindFlags as u32),
        cpu_access_flags: native::CpuAccessFlag::from_bits_truncate(desc.CPUAccessFlags as u32),
        misc_flags: native::ResourceMiscFlag::from_bits_truncate(desc.MiscFlags as u32),
    }
}

pub(crate) fn buffer_desc(desc: &native::BufferDesc) -> D3D11_BUFFER_DESC {
    D3D11_BUFFER_DESC {
        ByteWidth: desc.byte_width,
        Usage: usage(desc.usage),
        BindFlags: desc.bind_flags.bits() as _,
        CPUAccessFlags: desc.cpu_access_flags.bits() as _,
        MiscFlags: desc.misc_flags.bits() as _,
        StructureByteStride: desc.structure_byte_stride,
    }
}

/// The returned struct borrows `data.data`
pub(crate) fn subresource_data(data: &native::SubresourceData<'_>) -> D3D11_SUBRESOURCE_DATA {
    D3D11_SUBRESOURCE_DATA {
        pSysMem: data.data.as_ptr().cast(),
        SysMemPitch: data.row_pitch,
        SysMemSlicePitch: data.slice_pitch,
    }
}

// ============================================================================
// VIEWS
// ============================================================================

pub(crate) fn render_target_view_desc(desc: &native::RenderTargetViewDesc) -> D3D11_RENDER_TARGET_VIEW_DESC {
    use native::RtvDimension::*;
    let (dimension, anonymous) = match desc.dimension {
        Texture2d { mip_slice } => (
            D3D11_RTV_DIMENSION_TEXTURE2D,
            D3D11_RENDER_TARGET_VIEW_DESC_0 { Texture2D: D3D11_TEX2D_RTV { MipSlice: mip_slice } },
        ),
        Texture2dArray { mip_slice, first_array_slice, array_size } => (
            D3D11_RTV_DIMENSION_TEXTURE2DARRAY,
            D3D11_RENDER_TARGET_VIEW_DESC_0 {
                Texture2DArray: D3D11_TEX2D_ARRAY_RTV {
                    MipSlice: mip_slice,
                    FirstArraySlice: first_array_slice,
                    ArraySize: array_size,
                },
            },
        ),
        Texture2dMs => (D3D11_RTV_DIMENSION_TEXTURE2DMS, D3D11_RENDER_TARGET_VIEW_DESC_0::default()),
        Texture2dMsArray { first_array_slice, array_size } => (
            D3D11_RTV_DIMENSION_TEXTURE2DMSARRAY,
            D3D11_RENDER_TARGET_VIEW_DESC_0 {
                Texture2DMSArray: D3D11_TEX2DMS_ARRAY_RTV { FirstArraySlice: first_array_slice, ArraySize: array_size },
            },
        ),
    };
    D3D11_RENDER_TARGET_VIEW_DESC { Format: format(desc.format), ViewDimension: dimension, Anonymous: anonymous }
}

pub(crate) fn depth_stencil_view_desc(desc: &native::DepthStencilViewDesc) -> D3D11_DEPTH_STENCIL_VIEW_DESC {
    use native::DsvDimension::*;
    let (dimension, anonymous) = match desc.dimension {
        Texture2d { mip_slice } => (
            D3D11_DSV_DIMENSION_TEXTURE2D,
            D3D11_DEPTH_STENCIL_VIEW_DESC_0 { Texture2D: D3D11_TEX2D_DSV { MipSlice: mip_slice } },
        ),
        Texture2dArray { mip_slice, first_array_slice, array_size } => (
            D3D11_DSV_DIMENSION_TEXTURE2DARRAY,
            D3D11_DEPTH_STENCIL_VIEW_DESC_0 {
                Texture2DArray: D3D11_TEX2D_ARRAY_DSV {
                    MipSlice: mip_slice,
                    FirstArraySlice: first_array_slice,
                    ArraySize: array_size,
                },
            },
        ),
        Texture2dMs => (D3D11_DSV_DIMENSION_TEXTURE2DMS, D3D11_DEPTH_STENCIL_VIEW_DESC_0::default()),
        Texture2dMsArray { first_array_slice, array_size } => (
            D3D11_DSV_DIMENSION_TEXTURE2DMSARRAY,
            D3D11_DEPTH_STENCIL_VIEW_DESC_0 {
                Texture2DMSArray: D3D11_TEX2DMS_ARRAY_DSV { FirstArraySlice: first_array_slice, ArraySize: array_size },
            },
        ),
    };
    D3D11_DEPTH_STENCIL_VIEW_DESC {
        Format: format(desc.format),
        ViewDimension: dimension,
        Flags: desc.flags.bits() as _,
        Anonymous: anonymous,
    }
}

pub(crate) fn shader_resource_view_desc(desc: &native::ShaderResourceViewDesc) -> D3D11_SHADER_RESOURCE_VIEW_DESC {
    use native::SrvDimension::*;
    let (dimension, anonymous) = match desc.dimension {
        Texture2d { most_detailed_mip, mip_levels } => (
            D3D11_SRV_DIMENSION_TEXTURE2D,
            D3D11_SHADER_RESOURCE_VIEW_DESC_0 {
                Texture2D: D3D11_TEX2D_SRV { MostDetailedMip: most_detailed_mip, MipLevels: mip_levels },
            },
        ),
        Texture2dArray { most_detailed_mip, mip_levels, first_array_slice, array_size } => (
            D3D11_SRV_DIMENSION_TEXTURE2DARRAY,
            D3D11_SHADER_RESOURCE_VIEW_DESC_0 {
                Texture2DArray: D3D11_TEX2D_ARRAY_SRV {
                    MostDetailedMip: most_detailed_mip,
                    MipLevels: mip_levels,
                    FirstArraySlice: first_array_slice,
                    ArraySize: array_size,
                },
            },
        ),
        Texture2dMs => (D3D11_SRV_DIMENSION_TEXTURE2DMS, D3D11_SHADER_RESOURCE_VIEW_DESC_0::default()),
        Texture2dMsArray { first_array_slice, array_size } => (
            D3D11_SRV_DIMENSION_TEXTURE2DMSARRAY,
            D3D11_SHADER_RESOURCE_VIEW_DESC_0 {
                Texture2DMSArray: D3D11_TEX2DMS_ARRAY_SRV { FirstArraySlice: first_array_slice, ArraySize: array_size },
            },
        ),
        TextureCube { most_detailed_mip, mip_levels } => (
            D3D11_SRV_DIMENSION_TEXTURECUBE,
            D3D11_SHADER_RESOURCE_VIEW_DESC_0 {
                TextureCube: D3D11_TEXCUBE_SRV { MostDetailedMip: most_detailed_mip, MipLevels: mip_levels },
            },
        ),
        TextureCubeArray { most_detailed_mip, mip_levels, first_2d_array_face, num_cubes } => (
            D3D11_SRV_DIMENSION_TEXTURECUBEARRAY,
            D3D11_SHADER_RESOURCE_VIEW_DESC_0 {
                TextureCubeArray: D3D11_TEXCUBE_ARRAY_SRV {
                    MostDetailedMip: most_detailed_mip,
                    MipLevels: mip_levels,
                    First2DArrayFace: first_2d_array_face,
                    NumCubes: num_cubes,
                },
            },
        ),
    };
    D3D11_SHADER_RESOURCE_VIEW_DESC { Format: format(desc.format), ViewDimension: dimension, Anonymous: anonymous }
}

pub(crate) fn unordered_access_view_desc(desc: &native::UnorderedAccessViewDesc) -> D3D11_UNORDERED_ACCESS_VIEW_DESC {
    use native::UavDimension::*;
    let (dimension, anonymous) = match desc.dimension {
        Texture2d { mip_slice } => (
            D3D11_UAV_DIMENSION_TEXTURE2D,
            D3D11_UNORDERED_ACCESS_VIEW_DESC_0 { Texture2D: D3D11_TEX2D_UAV { MipSlice: mip_slice } },
        ),
        Texture2dArray { mip_slice, first_array_slice, array_size } => (
            D3D11_UAV_DIMENSION_TEXTURE2DARRAY,
            D3D11_UNORDERED_ACCESS_VIEW_DESC_0 {
                Texture2DArray: D3D11_TEX2D_ARRAY_UAV {
                    MipSlice: mip_slice,
                    FirstArraySlice: first_array_slice,
                    ArraySize: array_size,
                },
            },
        ),
    };
    D3D11_UNORDERED_ACCESS_VIEW_DESC { Format: format(desc.format), ViewDimension: dimension, Anonymous: anonymous }
}

// ============================================================================
// SEMANTIC STRINGS
// ============================================================================

/// NUL-terminated semantic names kept alive next to the structs that point at them
#[derive(Default)]
pub(crate) struct SemanticNames {
    names: Vec<CString>,
}

impl SemanticNames {
    /// Pointer valid for as long as `self` lives; interior NULs truncate the name
    pub fn intern(&mut self, name: &str) -> PCSTR {
        let name = name.split('\0').next().unwrap_or_default();
        let owned = CString::new(name).unwrap_or_default();
        let pointer = PCSTR(owned.as_ptr().cast());
        self.names.push(owned);
        pointer
    }
}

pub(crate) fn input_element_desc(element: &native::InputElementDesc, names: &mut SemanticNames) -> D3D11_INPUT_ELEMENT_DESC {
    D3D11_INPUT_ELEMENT_DESC {
        SemanticName: names.intern(&element.semantic_name),
        SemanticIndex: element.semantic_index,
        Format: format(element.format),
        InputSlot: element.input_slot,
        AlignedByteOffset: element.aligned_byte_offset,
        InputSlotClass: D3D11_INPUT_CLASSIFICATION(element.input_slot_class as _),
        InstanceDataStepRate: element.instance_data_step_rate,
    }
}

pub(crate) fn so_declaration_entry(entry: &native::SoDeclarationEntry, names: &mut SemanticNames) -> D3D11_SO_DECLARATION_ENTRY {
    D3D11_SO_DECLARATION_ENTRY {
        Stream: entry.stream,
        SemanticName: names.intern(&entry.semantic_name),
        SemanticIndex: entry.semantic_index,
        StartComponent: entry.start_component,
        ComponentCount: entry.component_count,
        OutputSlot: entry.output_slot,
    }
}

// ============================================================================
// FIXED-FUNCTION STATE
// ============================================================================

fn comparison(func: native::ComparisonFunc) -> D3D11_COMPARISON_FUNC {
    D3D11_COMPARISON_FUNC(func as _)
}

pub(crate) fn rasterizer_desc(desc: &native::RasterizerDesc1) -> D3D11_RASTERIZER_DESC1 {
    D3D11_RASTERIZER_DESC1 {
        FillMode: D3D11_FILL_MODE(desc.fill_mode as _),
        CullMode: D3D11_CULL_MODE(desc.cull_mode as _),
        FrontCounterClockwise: desc.front_counter_clockwise.into(),
        DepthBias: desc.depth_bias,
        DepthBiasClamp: desc.depth_bias_clamp,
        SlopeScaledDepthBias: desc.slope_scaled_depth_bias,
        DepthClipEnable: desc.depth_clip_enable.into(),
        ScissorEnable: desc.scissor_enable.into(),
        MultisampleEnable: desc.multisample_enable.into(),
        AntialiasedLineEnable: desc.antialiased_line_enable.into(),
        ForcedSampleCount: desc.forced_sample_count,
    }
}

fn stencil_op(desc: &native::DepthStencilOpDesc) -> D3D11_DEPTH_STENCILOP_DESC {
    D3D11_DEPTH_STENCILOP_DESC {
        StencilFailOp: D3D11_STENCIL_OP(desc.stencil_fail_op as _),
        StencilDepthFailOp: D3D11_STENCIL_OP(desc.stencil_depth_fail_op as _),
        StencilPassOp: D3D11_STENCIL_OP(desc.stencil_pass_op as _),
        StencilFunc: comparison(desc.stencil_func),
    }
}

pub(crate) fn depth_stencil_desc(desc: &native::DepthStencilDesc) -> D3D11_DEPTH_STENCIL_DESC {
    D3D11_DEPTH_STENCIL_DESC {
        DepthEnable: desc.depth_enable.into(),
        DepthWriteMask: D3D11_DEPTH_WRITE_MASK(desc.depth_write_mask as _),
        DepthFunc: comparison(desc.depth_func),
        StencilEnable: desc.stencil_enable.into(),
        StencilReadMask: desc.stencil_read_mask,
        StencilWriteMask: desc.stencil_write_mask,
        FrontFace: stencil_op(&desc.front_face),
        BackFace: stencil_op(&desc.back_face),
    }
}

pub(crate) fn blend_desc(desc: &native::BlendDesc1) -> D3D11_BLEND_DESC1 {
    let target = |t: &native::RenderTargetBlendDesc1| D3D11_RENDER_TARGET_BLEND_DESC1 {
        BlendEnable: t.blend_enable.into(),
        LogicOpEnable: t.logic_op_enable.into(),
        SrcBlend: D3D11_BLEND(t.src_blend as _),
        DestBlend: D3D11_BLEND(t.dest_blend as _),
        BlendOp: D3D11_BLEND_OP(t.blend_op as _),
        SrcBlendAlpha: D3D11_BLEND(t.src_blend_alpha as _),
        DestBlendAlpha: D3D11_BLEND(t.dest_blend_alpha as _),
        BlendOpAlpha: D3D11_BLEND_OP(t.blend_op_alpha as _),
        LogicOp: D3D11_LOGIC_OP(t.logic_op as _),
        RenderTargetWriteMask: t.render_target_write_mask,
    };
    D3D11_BLEND_DESC1 {
        AlphaToCoverageEnable: desc.alpha_to_coverage_enable.into(),
        IndependentBlendEnable: desc.independent_blend_enable.into(),
        RenderTarget: desc.render_target.each_ref().map(target),
    }
}

pub(crate) fn sampler_desc(desc: &native::SamplerDesc) -> D3D11_SAMPLER_DESC {
    D3D11_SAMPLER_DESC {
        Filter: D3D11_FILTER(desc.filter.0 as _),
        AddressU: D3D11_TEXTURE_ADDRESS_MODE(desc.address_u as _),
        AddressV: D3D11_TEXTURE_ADDRESS_MODE(desc.address_v as _),
        AddressW: D3D11_TEXTURE_ADDRESS_MODE(desc.address_w as _),
        MipLODBias: desc.mip_lod_bias,
        MaxAnisotropy: desc.max_anisotropy,
        ComparisonFunc: comparison(desc.comparison_func),
        BorderColor: desc.border_color,
        MinLOD: desc.min_lod,
        MaxLOD: desc.max_lod,
    }
}

// ============================================================================
// SWAP CHAIN
// ============================================================================

pub(crate) fn swap_chain_desc(desc: &native::SwapChainDesc) -> DXGI_SWAP_CHAIN_DESC1 {
    use windows::Win32::Graphics::Dxgi::{DXGI_ALPHA_MODE, DXGI_SCALING, DXGI_SWAP_EFFECT};
    DXGI_SWAP_CHAIN_DESC1 {
        Width: desc.width,
        Height: desc.height,
        Format: format(desc.format),
        Stereo: desc.stereo.into(),
        SampleDesc: sample_desc(desc.sample_desc),
        BufferUsage: DXGI_USAGE(desc.buffer_usage as _),
        BufferCount: desc.buffer_count,
        Scaling: DXGI_SCALING(desc.scaling as _),
        SwapEffect: DXGI_SWAP_EFFECT(desc.swap_effect as _),
        AlphaMode: DXGI_ALPHA_MODE(desc.alpha_mode as _),
        Flags: desc.flags as _,
    }
}

/// UTF-16 adapter description up to its terminator
pub(crate) fn wide_string(text: &[u16]) -> String {
    let end = text.iter().position(|&c| c == 0).unwrap_or(text.len());
    String::from_utf16_lossy(&text[..end])
}

#[cfg(test)]
#[path = "convert_tests.rs"]
mod tests;
