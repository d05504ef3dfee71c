/// Format Translator - abstract engine types to native D3D11 values and back
///
/// Every function is pure and total.

use ge_render_api::ge::config::{FlipMode, ScalingMode};
use ge_render_api::ge::render::{
    BindFlags, Blend, BlendDesc, BlendOp, ClearFlags, ColorWriteMask, ComparisonFunc, CopyFlags,
    CpuAccessFlags, CullMode, DepthStencilDesc, DepthStencilOpDesc, DepthWriteMask, FillMode,
    Filter, FilterReduction, FilterType, GraphicsBox, GraphicsFormat, IndexBufferFormat,
    LogicOp, MapFlags, PrimitiveTopology, RasterizerDesc, RenderTargetBlendDesc, ResourceUsage,
    SamplerDesc, StencilOp, StreamOutputElement, TextureAddressMode, VertexElementSemantic,
    VertexElementType, Viewport,
};

use crate::native::{self, DxgiFormat, RegisterComponentType};

// ============================================================================
// PIXEL FORMATS
// ============================================================================

macro_rules! format_table {
    ($($name:ident),* $(,)?) => {
        /// Native counterpart of an abstract format
        pub fn to_native(format: GraphicsFormat) -> DxgiFormat {
            match format {
                $(GraphicsFormat::$name => DxgiFormat::$name,)*
            }
        }

        /// Abstract counterpart of a native format; formats the engine does
        /// not know give `UNKNOWN`
        pub fn to_abstract(format: DxgiFormat) -> GraphicsFormat {
            match format {
                $(DxgiFormat::$name => GraphicsFormat::$name,)*
                _ => GraphicsFormat::UNKNOWN,
            }
        }
    };
}

format_table! {
    UNKNOWN,
    R32G32B32A32_TYPELESS, R32G32B32A32_FLOAT, R32G32B32A32_UINT, R32G32B32A32_SINT,
    R32G32B32_TYPELESS, R32G32B32_FLOAT, R32G32B32_UINT, R32G32B32_SINT,
    R16G16B16A16_TYPELESS, R16G16B16A16_FLOAT, R16G16B16A16_UNORM, R16G16B16A16_UINT,
    R16G16B16A16_SNORM, R16G16B16A16_SINT,
    R32G32_TYPELESS, R32G32_FLOAT, R32G32_UINT, R32G32_SINT,
    R32G8X24_TYPELESS, D32_FLOAT_S8X24_UINT, R32_FLOAT_X8X24_TYPELESS, X32_TYPELESS_G8X24_UINT,
    R10G10B10A2_TYPELESS, R10G10B10A2_UNORM, R10G10B10A2_UINT, R11G11B10_FLOAT,
    R8G8B8A8_TYPELESS, R8G8B8A8_UNORM, R8G8B8A8_UNORM_SRGB, R8G8B8A8_UINT, R8G8B8A8_SNORM,
    R8G8B8A8_SINT,
    R16G16_TYPELESS, R16G16_FLOAT, R16G16_UNORM, R16G16_UINT, R16G16_SNORM, R16G16_SINT,
    R32_TYPELESS, D32_FLOAT, R32_FLOAT, R32_UINT, R32_SINT,
    R24G8_TYPELESS, D24_UNORM_S8_UINT, R24_UNORM_X8_TYPELESS, X24_TYPELESS_G8_UINT,
    R8G8_TYPELESS, R8G8_UNORM, R8G8_UINT, R8G8_SNORM, R8G8_SINT,
    R16_TYPELESS, R16_FLOAT, D16_UNORM, R16_UNORM, R16_UINT, R16_SNORM, R16_SINT,
    R8_TYPELESS, R8_UNORM, R8_UINT, R8_SNORM, R8_SINT, A8_UNORM, R1_UNORM,
    R9G9B9E5_SHAREDEXP, R8G8_B8G8_UNORM, G8R8_G8B8_UNORM,
    BC1_TYPELESS, BC1_UNORM, BC1_UNORM_SRGB, BC2_TYPELESS, BC2_UNORM, BC2_UNORM_SRGB,
    BC3_TYPELESS, BC3_UNORM, BC3_UNORM_SRGB, BC4_TYPELESS, BC4_UNORM, BC4_SNORM,
    BC5_TYPELESS, BC5_UNORM, BC5_SNORM,
    B5G6R5_UNORM, B5G5R5A1_UNORM, B8G8R8A8_UNORM, B8G8R8X8_UNORM, R10G10B10_XR_BIAS_A2_UNORM,
    B8G8R8A8_TYPELESS, B8G8R8A8_UNORM_SRGB, B8G8R8X8_TYPELESS, B8G8R8X8_UNORM_SRGB,
    BC6H_TYPELESS, BC6H_UF16, BC6H_SF16, BC7_TYPELESS, BC7_UNORM, BC7_UNORM_SRGB,
    AYUV, Y410, Y416, NV12, P010, P016, OPAQUE_420, YUY2, Y210, Y216, NV11, AI44, IA44, P8,
    A8P8, B4G4R4A4_UNORM, P208, V208, V408,
    SAMPLER_FEEDBACK_MIN_MIP_OPAQUE, SAMPLER_FEEDBACK_MIP_REGION_USED_OPAQUE,
}

/// Bits per texel of a native format; 0 for unknown values
pub fn bits_per_pixel(format: DxgiFormat) -> u32 {
    match format {
        DxgiFormat::A4B4G4R4_UNORM => 16,
        DxgiFormat::FORCE_UINT => 0,
        other => to_abstract(other).bits_per_pixel(),
    }
}

/// Storage, shader-read and depth-view formats of a depth format
///
/// # Returns
///
/// `None` for formats without a depth decomposition
pub fn depth_format_triple(format: DxgiFormat) -> Option<(DxgiFormat, DxgiFormat, DxgiFormat)> {
    match format {
        DxgiFormat::D32_FLOAT => Some((DxgiFormat::R32_TYPELESS, DxgiFormat::R32_FLOAT, DxgiFormat::D32_FLOAT)),
        DxgiFormat::D24_UNORM_S8_UINT => Some((
            DxgiFormat::R24G8_TYPELESS,
            DxgiFormat::R24_UNORM_X8_TYPELESS,
            DxgiFormat::D24_UNORM_S8_UINT,
        )),
        DxgiFormat::D16_UNORM => Some((DxgiFormat::R16_TYPELESS, DxgiFormat::R16_UNORM, DxgiFormat::D16_UNORM)),
        _ => None,
    }
}

/// Native index format of an index buffer
pub fn index_format(format: IndexBufferFormat) -> DxgiFormat {
    to_native(format.graphics_format())
}

// ============================================================================
// VERTEX ELEMENTS
// ============================================================================

/// Native format of a vertex element type; unsupported types fall back to
/// four 32-bit floats
pub fn vertex_element_format(element_type: VertexElementType) -> DxgiFormat {
    match element_type {
        VertexElementType::Color
        | VertexElementType::ColorAbgr
        | VertexElementType::ColorArgb
        | VertexElementType::UByte4Norm => DxgiFormat::R8G8B8A8_UNORM,
        VertexElementType::Float1 => DxgiFormat::R32_FLOAT,
        VertexElementType::Float2 => DxgiFormat::R32G32_FLOAT,
        VertexElementType::Float3 => DxgiFormat::R32G32B32_FLOAT,
        VertexElementType::Float4 => DxgiFormat::R32G32B32A32_FLOAT,
        VertexElementType::UShort1 => DxgiFormat::R16_UINT,
        VertexElementType::UShort2 => DxgiFormat::R16G16_UINT,
        VertexElementType::UShort4 => DxgiFormat::R16G16B16A16_UINT,
        VertexElementType::Short1 => DxgiFormat::R16_SINT,
        VertexElementType::Short2 => DxgiFormat::R16G16_SINT,
        VertexElementType::Short4 => DxgiFormat::R16G16B16A16_SINT,
        VertexElementType::UInt1 => DxgiFormat::R32_UINT,
        VertexElementType::UInt2 => DxgiFormat::R32G32_UINT,
        VertexElementType::UInt3 => DxgiFormat::R32G32B32_UINT,
        VertexElementType::UInt4 => DxgiFormat::R32G32B32A32_UINT,
        VertexElementType::Int1 => DxgiFormat::R32_SINT,
        VertexElementType::Int2 => DxgiFormat::R32G32_SINT,
        VertexElementType::Int3 => DxgiFormat::R32G32B32_SINT,
        VertexElementType::Int4 => DxgiFormat::R32G32B32A32_SINT,
        VertexElementType::UByte4 => DxgiFormat::R8G8B8A8_UINT,
        VertexElementType::Unknown => DxgiFormat::R32G32B32A32_FLOAT,
    }
}

/// Semantic of a shader input name (case-sensitive)
///
/// Unknown names give `Position`, so this direction is lossy.
pub fn semantic_from_name(name: &str) -> VertexElementSemantic {
    match name {
        "BLENDINDICES" => VertexElementSemantic::BlendIndices,
        "BLENDWEIGHT" => VertexElementSemantic::BlendWeight,
        "COLOR" => VertexElementSemantic::Color,
        "NORMAL" => VertexElementSemantic::Normal,
        "POSITION" => VertexElementSemantic::Position,
        "TEXCOORD" => VertexElementSemantic::TexCoord,
        "BINORMAL" => VertexElementSemantic::Bitangent,
        "TANGENT" => VertexElementSemantic::Tangent,
        "POSITIONT" => VertexElementSemantic::PositionT,
        "PSIZE" => VertexElementSemantic::PointSize,
        "CUSTOM" => VertexElementSemantic::Custom,
        _ => VertexElementSemantic::Position,
    }
}

/// HLSL semantic name of a vertex semantic
pub fn semantic_name(semantic: VertexElementSemantic) -> &'static str {
    match semantic {
        VertexElementSemantic::BlendIndices => "BLENDINDICES",
        VertexElementSemantic::BlendWeight => "BLENDWEIGHT",
        VertexElementSemantic::Color => "COLOR",
        VertexElementSemantic::Normal => "NORMAL",
        VertexElementSemantic::Position => "POSITION",
        VertexElementSemantic::TexCoord => "TEXCOORD",
        VertexElementSemantic::Bitangent => "BINORMAL",
        VertexElementSemantic::Tangent => "TANGENT",
        VertexElementSemantic::PositionT => "POSITIONT",
        VertexElementSemantic::PointSize => "PSIZE",
        VertexElementSemantic::Custom => "CUSTOM",
    }
}

/// Vertex element type of a reflected input parameter
///
/// The mask is read as a component count threshold: 1, up to 3, up to 7,
/// up to 15.
pub fn input_element_type(component_type: RegisterComponentType, mask: u8) -> VertexElementType {
    let pick = |uint, sint, float| match component_type {
        RegisterComponentType::Uint32 => uint,
        RegisterComponentType::Sint32 => sint,
        RegisterComponentType::Float32 => float,
        RegisterComponentType::Unknown => VertexElementType::Unknown,
    };

    match mask {
        1 => pick(VertexElementType::UInt1, VertexElementType::Int1, VertexElementType::Float1),
        0..=3 => pick(VertexElementType::UInt2, VertexElementType::Int2, VertexElementType::Float2),
        4..=7 => pick(VertexElementType::UInt3, VertexElementType::Int3, VertexElementType::Float3),
        8..=15 => pick(VertexElementType::UInt4, VertexElementType::Int4, VertexElementType::Float4),
        _ => VertexElementType::Unknown,
    }
}

/// Native stream-output entry
pub fn so_declaration_entry(element: &StreamOutputElement) -> native::SoDeclarationEntry {
    native::SoDeclarationEntry {
        stream: element.stream,
        semantic_name: semantic_name(element.semantic).to_string(),
        semantic_index: element.semantic_index,
        start_component: element.start_component,
        component_count: element.component_count,
        output_slot: element.output_slot,
    }
}

// ============================================================================
// RESOURCE FLAGS
// ============================================================================

pub fn bind_flags(flags: BindFlags) -> native::BindFlag {
    let pairs = [
        (BindFlags::VERTEX_BUFFER, native::BindFlag::VERTEX_BUFFER),
        (BindFlags::INDEX_BUFFER, native::BindFlag::INDEX_BUFFER),
        (BindFlags::CONSTANT_BUFFER, native::BindFlag::CONSTANT_BUFFER),
        (BindFlags::SHADER_RESOURCE, native::BindFlag::SHADER_RESOURCE),
        (BindFlags::STREAM_OUTPUT, native::BindFlag::STREAM_OUTPUT),
        (BindFlags::RENDER_TARGET, native::BindFlag::RENDER_TARGET),
        (BindFlags::DEPTH_STENCIL, native::BindFlag::DEPTH_STENCIL),
        (BindFlags::UNORDERED_ACCESS, native::BindFlag::UNORDERED_ACCESS),
    ];
    pairs
        .iter()
        .filter(|(engine, _)| flags.contains(*engine))
        .fold(native::BindFlag::empty(), |acc, (_, n)| acc | *n)
}

pub fn bind_flags_to_abstract(flags: native::BindFlag) -> BindFlags {
    BindFlags::from_bits_truncate(flags.bits())
}

pub fn usage(usage: ResourceUsage) -> native::Usage {
    match usage {
        ResourceUsage::Default => native::Usage::Default,
        ResourceUsage::Immutable => native::Usage::Immutable,
        ResourceUsage::Dynamic => native::Usage::Dynamic,
        ResourceUsage::Staging => native::Usage::Staging,
    }
}

pub fn usage_to_abstract(usage: native::Usage) -> ResourceUsage {
    match usage {
        native::Usage::Default => ResourceUsage::Default,
        native::Usage::Immutable => ResourceUsage::Immutable,
        native::Usage::Dynamic => ResourceUsage::Dynamic,
        native::Usage::Staging => ResourceUsage::Staging,
    }
}

pub fn cpu_access(flags: CpuAccessFlags) -> native::CpuAccessFlag {
    let mut out = native::CpuAccessFlag::empty();
    if flags.contains(CpuAccessFlags::WRITE) {
        out |= native::CpuAccessFlag::WRITE;
    }
    if flags.contains(CpuAccessFlags::READ) {
        out |= native::CpuAccessFlag::READ;
    }
    out
}

pub fn cpu_access_to_abstract(flags: native::CpuAccessFlag) -> CpuAccessFlags {
    let mut out = CpuAccessFlags::empty();
    if flags.contains(native::CpuAccessFlag::WRITE) {
        out |= CpuAccessFlags::WRITE;
    }
    if flags.contains(native::CpuAccessFlag::READ) {
        out |= CpuAccessFlags::READ;
    }
    out
}

pub fn clear_flags(flags: ClearFlags) -> native::ClearFlag {
    native::ClearFlag::from_bits_truncate(flags.bits())
}

pub fn copy_flags(flags: CopyFlags) -> native::CopyFlag {
    native::CopyFlag::from_bits_truncate(flags.bits())
}

pub fn map_flags(flags: MapFlags) -> native::MapFlag {
    if flags.contains(MapFlags::DO_NOT_WAIT) {
        native::MapFlag::DO_NOT_WAIT
    } else {
        native::MapFlag::empty()
    }
}

pub fn graphics_box(b: &GraphicsBox) -> native::NativeBox {
    native::NativeBox {
        left: b.left,
        top: b.top,
        front: b.front,
        right: b.right,
        bottom: b.bottom,
        back: b.back,
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

pub fn topology(topology: PrimitiveTopology) -> native::PrimitiveTopology {
    match topology {
        PrimitiveTopology::Undefined => native::PrimitiveTopology::UNDEFINED,
        PrimitiveTopology::PointList => native::PrimitiveTopology::POINTLIST,
        PrimitiveTopology::LineList => native::PrimitiveTopology::LINELIST,
        PrimitiveTopology::LineStrip => native::PrimitiveTopology::LINESTRIP,
        PrimitiveTopology::TriangleList => native::PrimitiveTopology::TRIANGLELIST,
        PrimitiveTopology::TriangleStrip => native::PrimitiveTopology::TRIANGLESTRIP,
        PrimitiveTopology::LineListAdj => native::PrimitiveTopology::LINELIST_ADJ,
        PrimitiveTopology::LineStripAdj => native::PrimitiveTopology::LINESTRIP_ADJ,
        PrimitiveTopology::TriangleListAdj => native::PrimitiveTopology::TRIANGLELIST_ADJ,
        PrimitiveTopology::TriangleStripAdj => native::PrimitiveTopology::TRIANGLESTRIP_ADJ,
        PrimitiveTopology::PatchList(points) => {
            native::PrimitiveTopology::patch_list(u32::from(points.clamp(1, 32)))
        }
    }
}

pub fn viewport(vp: &Viewport) -> native::Viewport {
    native::Viewport {
        top_left_x: vp.x,
        top_left_y: vp.y,
        width: vp.width,
        height: vp.height,
        min_depth: vp.min_depth,
        max_depth: vp.max_depth,
    }
}

// ============================================================================
// FIXED-FUNCTION STATE
// ============================================================================

pub fn comparison_func(func: ComparisonFunc) -> native::ComparisonFunc {
    match func {
        ComparisonFunc::Never => native::ComparisonFunc::Never,
        ComparisonFunc::Less => native::ComparisonFunc::Less,
        ComparisonFunc::Equal => native::ComparisonFunc::Equal,
        ComparisonFunc::LessEqual => native::ComparisonFunc::LessEqual,
        ComparisonFunc::Greater => native::ComparisonFunc::Greater,
        ComparisonFunc::NotEqual => native::ComparisonFunc::NotEqual,
        ComparisonFunc::GreaterEqual => native::ComparisonFunc::GreaterEqual,
        ComparisonFunc::Always => native::ComparisonFunc::Always,
    }
}

pub fn rasterizer_desc(desc: &RasterizerDesc) -> native::RasterizerDesc1 {
    native::RasterizerDesc1 {
        fill_mode: match desc.fill_mode {
            FillMode::Wireframe => native::FillMode::Wireframe,
            FillMode::Solid => native::FillMode::Solid,
        },
        cull_mode: match desc.cull_mode {
            CullMode::None => native::CullMode::None,
            CullMode::Front => native::CullMode::Front,
            CullMode::Back => native::CullMode::Back,
        },
        front_counter_clockwise: desc.front_counter_clockwise,
        depth_bias: desc.depth_bias,
        depth_bias_clamp: desc.depth_bias_clamp,
        slope_scaled_depth_bias: desc.slope_scaled_depth_bias,
        depth_clip_enable: desc.depth_clip_enable,
        scissor_enable: desc.scissor_enable,
        multisample_enable: desc.multisample_enable,
        antialiased_line_enable: desc.antialiased_line_enable,
        forced_sample_count: desc.forced_sample_count,
    }
}

fn stencil_op(op: StencilOp) -> native::StencilOp {
    match op {
        StencilOp::Keep => native::StencilOp::Keep,
        StencilOp::Zero => native::StencilOp::Zero,
        StencilOp::Replace => native::StencilOp::Replace,
        StencilOp::IncrSat => native::StencilOp::IncrSat,
        StencilOp::DecrSat => native::StencilOp::DecrSat,
        StencilOp::Invert => native::StencilOp::Invert,
        StencilOp::Incr => native::StencilOp::Incr,
        StencilOp::Decr => native::StencilOp::Decr,
    }
}

fn stencil_face(face: &DepthStencilOpDesc) -> native::DepthStencilOpDesc {
    native::DepthStencilOpDesc {
        stencil_fail_op: stencil_op(face.fail_op),
        stencil_depth_fail_op: stencil_op(face.depth_fail_op),
        stencil_pass_op: stencil_op(face.pass_op),
        stencil_func: comparison_func(face.func),
    }
}

pub fn depth_stencil_desc(desc: &DepthStencilDesc) -> native::DepthStencilDesc {
    native::DepthStencilDesc {
        depth_enable: desc.depth_enable,
        depth_write_mask: match desc.depth_write_mask {
            DepthWriteMask::Zero => native::DepthWriteMask::Zero,
            DepthWriteMask::All => native::DepthWriteMask::All,
        },
        depth_func: comparison_func(desc.depth_func),
        stencil_enable: desc.stencil_enable,
        stencil_read_mask: desc.stencil_read_mask,
        stencil_write_mask: desc.stencil_write_mask,
        front_face: stencil_face(&desc.front_face),
        back_face: stencil_face(&desc.back_face),
    }
}

fn blend(b: Blend) -> native::Blend {
    match b {
        Blend::Zero => native::Blend::Zero,
        Blend::One => native::Blend::One,
        Blend::SrcColor => native::Blend::SrcColor,
        Blend::InvSrcColor => native::Blend::InvSrcColor,
        Blend::SrcAlpha => native::Blend::SrcAlpha,
        Blend::InvSrcAlpha => native::Blend::InvSrcAlpha,
        Blend::DestAlpha => native::Blend::DestAlpha,
        Blend::InvDestAlpha => native::Blend::InvDestAlpha,
        Blend::DestColor => native::Blend::DestColor,
        Blend::InvDestColor => native::Blend::InvDestColor,
        Blend::SrcAlphaSat => native::Blend::SrcAlphaSat,
        Blend::BlendFactor => native::Blend::BlendFactor,
        Blend::InvBlendFactor => native::Blend::InvBlendFactor,
        Blend::Src1Color => native::Blend::Src1Color,
        Blend::InvSrc1Color => native::Blend::InvSrc1Color,
        Blend::Src1Alpha => native::Blend::Src1Alpha,
        Blend::InvSrc1Alpha => native::Blend::InvSrc1Alpha,
    }
}

fn blend_op(op: BlendOp) -> native::BlendOp {
    match op {
        BlendOp::Add => native::BlendOp::Add,
        BlendOp::Subtract => native::BlendOp::Subtract,
        BlendOp::RevSubtract => native::BlendOp::RevSubtract,
        BlendOp::Min => native::BlendOp::Min,
        BlendOp::Max => native::BlendOp::Max,
    }
}

fn logic_op(op: LogicOp) -> native::LogicOp {
    match op {
        LogicOp::Clear => native::LogicOp::Clear,
        LogicOp::Set => native::LogicOp::Set,
        LogicOp::Copy => native::LogicOp::Copy,
        LogicOp::CopyInverted => native::LogicOp::CopyInverted,
        LogicOp::Noop => native::LogicOp::Noop,
        LogicOp::Invert => native::LogicOp::Invert,
        LogicOp::And => native::LogicOp::And,
        LogicOp::Nand => native::LogicOp::Nand,
        LogicOp::Or => native::LogicOp::Or,
        LogicOp::Nor => native::LogicOp::Nor,
        LogicOp::Xor => native::LogicOp::Xor,
        LogicOp::Equiv => native::LogicOp::Equiv,
        LogicOp::AndReverse => native::LogicOp::AndReverse,
        LogicOp::AndInverted => native::LogicOp::AndInverted,
        LogicOp::OrReverse => native::LogicOp::OrReverse,
        LogicOp::OrInverted => native::LogicOp::OrInverted,
    }
}

fn render_target_blend(desc: &RenderTargetBlendDesc) -> native::RenderTargetBlendDesc1 {
    native::RenderTargetBlendDesc1 {
        blend_enable: desc.blend_enable,
        logic_op_enable: desc.logic_op_enable,
        src_blend: blend(desc.src_blend),
        dest_blend: blend(desc.dest_blend),
        blend_op: blend_op(desc.blend_op),
        src_blend_alpha: blend(desc.src_blend_alpha),
        dest_blend_alpha: blend(desc.dest_blend_alpha),
        blend_op_alpha: blend_op(desc.blend_op_alpha),
        logic_op: logic_op(desc.logic_op),
        render_target_write_mask: (desc.write_mask & ColorWriteMask::ALL).bits(),
    }
}

pub fn blend_desc(desc: &BlendDesc) -> native::BlendDesc1 {
    native::BlendDesc1 {
        alpha_to_coverage_enable: desc.alpha_to_coverage_enable,
        independent_blend_enable: desc.independent_blend_enable,
        render_target: desc.render_targets.map(|t| render_target_blend(&t)),
    }
}

pub fn filter(filter: &Filter) -> native::Filter {
    let reduction = match filter.reduction {
        FilterReduction::Standard => 0,
        FilterReduction::Comparison => 1,
        FilterReduction::Minimum => 2,
        FilterReduction::Maximum => 3,
    };
    if filter.anisotropic {
        return native::Filter::encode_anisotropic(reduction);
    }
    let kind = |t: FilterType| match t {
        FilterType::Point => 0,
        FilterType::Linear => 1,
    };
    native::Filter::encode_basic(kind(filter.min), kind(filter.mag), kind(filter.mip), reduction)
}

fn address_mode(mode: TextureAddressMode) -> native::TextureAddressMode {
    match mode {
        TextureAddressMode::Wrap => native::TextureAddressMode::Wrap,
        TextureAddressMode::Mirror => native::TextureAddressMode::Mirror,
        TextureAddressMode::Clamp => native::TextureAddressMode::Clamp,
        TextureAddressMode::Border => native::TextureAddressMode::Border,
        TextureAddressMode::MirrorOnce => native::TextureAddressMode::MirrorOnce,
    }
}

pub fn sampler_desc(desc: &SamplerDesc) -> native::SamplerDesc {
    native::SamplerDesc {
        filter: filter(&desc.filter),
        address_u: address_mode(desc.address_u),
        address_v: address_mode(desc.address_v),
        address_w: address_mode(desc.address_w),
        mip_lod_bias: desc.mip_lod_bias,
        max_anisotropy: desc.max_anisotropy,
        comparison_func: comparison_func(desc.comparison_func),
        border_color: desc.border_color,
        min_lod: desc.min_lod,
        max_lod: desc.max_lod,
    }
}

// ============================================================================
// SWAP CHAIN SETTINGS
// ============================================================================

pub fn scaling(mode: ScalingMode) -> native::Scaling {
    match mode {
        ScalingMode::None => native::Scaling::None,
        ScalingMode::Stretch => native::Scaling::Stretch,
        ScalingMode::AspectRatioStretch => native::Scaling::AspectRatioStretch,
    }
}

pub fn swap_effect(mode: FlipMode) -> native::SwapEffect {
    match mode {
        FlipMode::Sequential => native::SwapEffect::FlipSequential,
        FlipMode::Discard => native::SwapEffect::FlipDiscard,
    }
}

#[cfg(test)]
#[path = "translate_tests.rs"]
mod tests;
