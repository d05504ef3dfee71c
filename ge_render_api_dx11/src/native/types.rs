/// D3D11-shaped native descriptors, enums and flags
///
/// Numeric values follow the native headers so a Win32 driver can pass them
/// through unchanged.

use bitflags::bitflags;

use super::DxgiFormat;

// ============================================================================
// RESOURCE FLAGS
// ============================================================================

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BindFlag: u32 {
        const VERTEX_BUFFER = 0x1;
        const INDEX_BUFFER = 0x2;
        const CONSTANT_BUFFER = 0x4;
        const SHADER_RESOURCE = 0x8;
        const STREAM_OUTPUT = 0x10;
        const RENDER_TARGET = 0x20;
        const DEPTH_STENCIL = 0x40;
        const UNORDERED_ACCESS = 0x80;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CpuAccessFlag: u32 {
        const WRITE = 0x10000;
        const READ = 0x20000;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ResourceMiscFlag: u32 {
        const GENERATE_MIPS = 0x1;
        const SHARED = 0x2;
        const TEXTURECUBE = 0x4;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Usage {
    Default = 0,
    Immutable = 1,
    Dynamic = 2,
    Staging = 3,
}

bitflags! {
    /// Per-format capabilities reported by the device
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FormatSupport: u32 {
        const BUFFER = 0x1;
        const IA_VERTEX_BUFFER = 0x2;
        const IA_INDEX_BUFFER = 0x4;
        const SO_BUFFER = 0x8;
        const TEXTURE2D = 0x20;
        const TEXTURECUBE = 0x80;
        const SHADER_LOAD = 0x100;
        const SHADER_SAMPLE = 0x200;
        const MIP = 0x1000;
        const MIP_AUTOGEN = 0x2000;
        const RENDER_TARGET = 0x4000;
        const BLENDABLE = 0x8000;
        const DEPTH_STENCIL = 0x10000;
        const CPU_LOCKABLE = 0x20000;
        const MULTISAMPLE_RESOLVE = 0x40000;
        const DISPLAY = 0x80000;
        const MULTISAMPLE_RENDERTARGET = 0x200000;
        const TYPED_UNORDERED_ACCESS_VIEW = 0x2000000;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CreateDeviceFlag: u32 {
        const SINGLETHREADED = 0x1;
        const DEBUG = 0x2;
        const BGRA_SUPPORT = 0x20;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum FeatureLevel {
    Level10_0 = 0xa000,
    Level10_1 = 0xa100,
    Level11_0 = 0xb000,
    Level11_1 = 0xb100,
}

// ============================================================================
// TEXTURES AND VIEWS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleDesc {
    pub count: u32,
    pub quality: u32,
}

impl Default for SampleDesc {
    fn default() -> Self {
        Self { count: 1, quality: 0 }
    }
}

/// `D3D11_TEXTURE2D_DESC`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture2dDesc {
    pub width: u32,
    pub height: u32,
    pub mip_levels: u32,
    pub array_size: u32,
    pub format: DxgiFormat,
    pub sample_desc: SampleDesc,
    pub usage: Usage,
    pub bind_flags: BindFlag,
    pub cpu_access_flags: CpuAccessFlag,
    pub misc_flags: ResourceMiscFlag,
}

/// Initial contents of one subresource
#[derive(Debug, Clone, Copy)]
pub struct SubresourceData<'a> {
    pub data: &'a [u8],
    pub row_pitch: u32,
    pub slice_pitch: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtvDimension {
    Texture2d { mip_slice: u32 },
    Texture2dArray { mip_slice: u32, first_array_slice: u32, array_size: u32 },
    Texture2dMs,
    Texture2dMsArray { first_array_slice: u32, array_size: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTargetViewDesc {
    pub format: DxgiFormat,
    pub dimension: RtvDimension,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DsvFlag: u32 {
        const READ_ONLY_DEPTH = 0x1;
        const READ_ONLY_STENCIL = 0x2;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DsvDimension {
    Texture2d { mip_slice: u32 },
    Texture2dArray { mip_slice: u32, first_array_slice: u32, array_size: u32 },
    Texture2dMs,
    Texture2dMsArray { first_array_slice: u32, array_size: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthStencilViewDesc {
    pub format: DxgiFormat,
    pub flags: DsvFlag,
    pub dimension: DsvDimension,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SrvDimension {
    Texture2d { most_detailed_mip: u32, mip_levels: u32 },
    Texture2dArray { most_detailed_mip: u32, mip_levels: u32, first_array_slice: u32, array_size: u32 },
    Texture2dMs,
    Texture2dMsArray { first_array_slice: u32, array_size: u32 },
    TextureCube { most_detailed_mip: u32, mip_levels: u32 },
    TextureCubeArray { most_detailed_mip: u32, mip_levels: u32, first_2d_array_face: u32, num_cubes: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderResourceViewDesc {
    pub format: DxgiFormat,
    pub dimension: SrvDimension,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UavDimension {
    Texture2d { mip_slice: u32 },
    Texture2dArray { mip_slice: u32, first_array_slice: u32, array_size: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnorderedAccessViewDesc {
    pub format: DxgiFormat,
    pub dimension: UavDimension,
}

// ============================================================================
// BUFFERS AND INPUT LAYOUT
// ============================================================================

/// `D3D11_BUFFER_DESC`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferDesc {
    pub byte_width: u32,
    pub usage: Usage,
    pub bind_flags: BindFlag,
    pub cpu_access_flags: CpuAccessFlag,
    pub misc_flags: ResourceMiscFlag,
    pub structure_byte_stride: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum InputClassification {
    PerVertexData = 0,
    PerInstanceData = 1,
}

/// `D3D11_INPUT_ELEMENT_DESC`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputElementDesc {
    pub semantic_name: String,
    pub semantic_index: u32,
    pub format: DxgiFormat,
    pub input_slot: u32,
    pub aligned_byte_offset: u32,
    pub input_slot_class: InputClassification,
    pub instance_data_step_rate: u32,
}

/// `D3D11_SO_DECLARATION_ENTRY`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoDeclarationEntry {
    pub stream: u32,
    pub semantic_name: String,
    pub semantic_index: u32,
    pub start_component: u8,
    pub component_count: u8,
    pub output_slot: u8,
}

/// Value of `rasterized_stream` that disables rasterization
pub const SO_NO_RASTERIZED_STREAM: u32 = 0xffff_ffff;

// ============================================================================
// FIXED-FUNCTION STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum FillMode {
    Wireframe = 2,
    Solid = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum CullMode {
    None = 1,
    Front = 2,
    Back = 3,
}

/// `D3D11_RASTERIZER_DESC1`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterizerDesc1 {
    pub fill_mode: FillMode,
    pub cull_mode: CullMode,
    pub front_counter_clockwise: bool,
    pub depth_bias: i32,
    pub depth_bias_clamp: f32,
    pub slope_scaled_depth_bias: f32,
    pub depth_clip_enable: bool,
    pub scissor_enable: bool,
    pub multisample_enable: bool,
    pub antialiased_line_enable: bool,
    pub forced_sample_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ComparisonFunc {
    Never = 1,
    Less = 2,
    Equal = 3,
    LessEqual = 4,
    Greater = 5,
    NotEqual = 6,
    GreaterEqual = 7,
    Always = 8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum DepthWriteMask {
    Zero = 0,
    All = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum StencilOp {
    Keep = 1,
    Zero = 2,
    Replace = 3,
    IncrSat = 4,
    DecrSat = 5,
    Invert = 6,
    Incr = 7,
    Decr = 8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthStencilOpDesc {
    pub stencil_fail_op: StencilOp,
    pub stencil_depth_fail_op: StencilOp,
    pub stencil_pass_op: StencilOp,
    pub stencil_func: ComparisonFunc,
}

/// `D3D11_DEPTH_STENCIL_DESC`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthStencilDesc {
    pub depth_enable: bool,
    pub depth_write_mask: DepthWriteMask,
    pub depth_func: ComparisonFunc,
    pub stencil_enable: bool,
    pub stencil_read_mask: u8,
    pub stencil_write_mask: u8,
    pub front_face: DepthStencilOpDesc,
    pub back_face: DepthStencilOpDesc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Blend {
    Zero = 1,
    One = 2,
    SrcColor = 3,
    InvSrcColor = 4,
    SrcAlpha = 5,
    InvSrcAlpha = 6,
    DestAlpha = 7,
    InvDestAlpha = 8,
    DestColor = 9,
    InvDestColor = 10,
    SrcAlphaSat = 11,
    BlendFactor = 14,
    InvBlendFactor = 15,
    Src1Color = 16,
    InvSrc1Color = 17,
    Src1Alpha = 18,
    InvSrc1Alpha = 19,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum BlendOp {
    Add = 1,
    Subtract = 2,
    RevSubtract = 3,
    Min = 4,
    Max = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum LogicOp {
    Clear = 0,
    Set,
    Copy,
    CopyInverted,
    Noop,
    Invert,
    And,
    Nand,
    Or,
    Nor,
    Xor,
    Equiv,
    AndReverse,
    AndInverted,
    OrReverse,
    OrInverted,
}

/// `D3D11_RENDER_TARGET_BLEND_DESC1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTargetBlendDesc1 {
    pub blend_enable: bool,
    pub logic_op_enable: bool,
    pub src_blend: Blend,
    pub dest_blend: Blend,
    pub blend_op: BlendOp,
    pub src_blend_alpha: Blend,
    pub dest_blend_alpha: Blend,
    pub blend_op_alpha: BlendOp,
    pub logic_op: LogicOp,
    pub render_target_write_mask: u8,
}

/// `D3D11_BLEND_DESC1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendDesc1 {
    pub alpha_to_coverage_enable: bool,
    pub independent_blend_enable: bool,
    pub render_target: [RenderTargetBlendDesc1; 8],
}

/// Encoded `D3D11_FILTER` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Filter(pub u32);

impl Filter {
    pub const MIN_MAG_MIP_POINT: Filter = Filter(0x0);
    pub const MIN_MAG_MIP_LINEAR: Filter = Filter(0x15);
    pub const ANISOTROPIC: Filter = Filter(0x55);
    pub const COMPARISON_MIN_MAG_MIP_LINEAR: Filter = Filter(0x95);

    const ANISOTROPIC_BIT: u32 = 0x40;

    /// `D3D11_ENCODE_BASIC_FILTER`; filter types are 0 (point) or 1 (linear)
    pub const fn encode_basic(min: u32, mag: u32, mip: u32, reduction: u32) -> Filter {
        Filter(((min & 1) << 4) | ((mag & 1) << 2) | (mip & 1) | ((reduction & 3) << 7))
    }

    /// `D3D11_ENCODE_ANISOTROPIC_FILTER`
    pub const fn encode_anisotropic(reduction: u32) -> Filter {
        Filter(Self::ANISOTROPIC_BIT | Self::encode_basic(1, 1, 1, reduction).0)
    }

    /// `D3D11_DECODE_FILTER_REDUCTION`
    pub const fn reduction(self) -> u32 {
        (self.0 >> 7) & 3
    }

    pub const fn is_anisotropic(self) -> bool {
        self.0 & Self::ANISOTROPIC_BIT != 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum TextureAddressMode {
    Wrap = 1,
    Mirror = 2,
    Clamp = 3,
    Border = 4,
    MirrorOnce = 5,
}

/// `D3D11_SAMPLER_DESC`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerDesc {
    pub filter: Filter,
    pub address_u: TextureAddressMode,
    pub address_v: TextureAddressMode,
    pub address_w: TextureAddressMode,
    pub mip_lod_bias: f32,
    pub max_anisotropy: u32,
    pub comparison_func: ComparisonFunc,
    pub border_color: [f32; 4],
    pub min_lod: f32,
    pub max_lod: f32,
}

// ============================================================================
// INPUT ASSEMBLER AND RASTERIZER SLOTS
// ============================================================================

/// `D3D11_PRIMITIVE_TOPOLOGY` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PrimitiveTopology(pub u32);

impl PrimitiveTopology {
    pub const UNDEFINED: PrimitiveTopology = PrimitiveTopology(0);
    pub const POINTLIST: PrimitiveTopology = PrimitiveTopology(1);
    pub const LINELIST: PrimitiveTopology = PrimitiveTopology(2);
    pub const LINESTRIP: PrimitiveTopology = PrimitiveTopology(3);
    pub const TRIANGLELIST: PrimitiveTopology = PrimitiveTopology(4);
    pub const TRIANGLESTRIP: PrimitiveTopology = PrimitiveTopology(5);
    pub const LINELIST_ADJ: PrimitiveTopology = PrimitiveTopology(10);
    pub const LINESTRIP_ADJ: PrimitiveTopology = PrimitiveTopology(11);
    pub const TRIANGLELIST_ADJ: PrimitiveTopology = PrimitiveTopology(12);
    pub const TRIANGLESTRIP_ADJ: PrimitiveTopology = PrimitiveTopology(13);

    /// `D3D11_PRIMITIVE_TOPOLOGY_n_CONTROL_POINT_PATCHLIST`
    pub const fn patch_list(control_points: u32) -> PrimitiveTopology {
        PrimitiveTopology(32 + control_points)
    }
}

/// `D3D11_VIEWPORT`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub top_left_x: f32,
    pub top_left_y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

/// `D3D11_RECT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// `D3D11_BOX`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NativeBox {
    pub left: u32,
    pub top: u32,
    pub front: u32,
    pub right: u32,
    pub bottom: u32,
    pub back: u32,
}

/// Maximum viewports and scissor rectangles per pipeline
pub const VIEWPORT_AND_SCISSORRECT_OBJECT_COUNT_PER_PIPELINE: usize = 16;

/// Maximum class instances returned by a shader getter
pub const MAX_CLASS_INSTANCES: usize = 256;

// ============================================================================
// DATA TRANSFER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum MapType {
    Read = 1,
    Write = 2,
    ReadWrite = 3,
    WriteDiscard = 4,
    WriteNoOverwrite = 5,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MapFlag: u32 {
        const DO_NOT_WAIT = 0x100000;
    }
}

bitflags! {
    /// `D3D11_COPY_FLAGS` for `UpdateSubresource1`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CopyFlag: u32 {
        const NO_OVERWRITE = 0x1;
        const DISCARD = 0x2;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlag: u32 {
        const DEPTH = 0x1;
        const STENCIL = 0x2;
    }
}

/// CPU copy of a mapped subresource
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MappedSubresource {
    pub data: Vec<u8>,
    pub row_pitch: u32,
    pub depth_pitch: u32,
}

// ============================================================================
// ADAPTERS AND SWAP CHAINS
// ============================================================================

/// `DXGI_ADAPTER_DESC1` subset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterDesc {
    pub description: String,
    pub vendor_id: u32,
    pub device_id: u32,
    pub dedicated_video_memory: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Scaling {
    Stretch = 0,
    None = 1,
    AspectRatioStretch = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum SwapEffect {
    Discard = 0,
    Sequential = 1,
    FlipSequential = 3,
    FlipDiscard = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum AlphaMode {
    Unspecified = 0,
    Premultiplied = 1,
    Straight = 2,
    Ignore = 3,
}

/// `DXGI_USAGE_RENDER_TARGET_OUTPUT`
pub const USAGE_RENDER_TARGET_OUTPUT: u32 = 0x20;

/// `DXGI_SWAP_CHAIN_DESC1` plus the fullscreen switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapChainDesc {
    pub width: u32,
    pub height: u32,
    pub format: DxgiFormat,
    pub stereo: bool,
    pub sample_desc: SampleDesc,
    pub buffer_usage: u32,
    pub buffer_count: u32,
    pub scaling: Scaling,
    pub swap_effect: SwapEffect,
    pub alpha_mode: AlphaMode,
    pub flags: u32,
    pub windowed: bool,
}

// ============================================================================
// SHADER COMPILATION
// ============================================================================

bitflags! {
    /// `D3DCOMPILE_*` flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CompileFlag: u32 {
        const DEBUG = 0x1;
        const SKIP_VALIDATION = 0x2;
        const SKIP_OPTIMIZATION = 0x4;
        const ENABLE_STRICTNESS = 0x800;
        const OPTIMIZATION_LEVEL3 = 0x8000;
        const WARNINGS_ARE_ERRORS = 0x40000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncludeType {
    /// `#include "file"`
    Local,
    /// `#include <file>`
    System,
}

/// `D3D_REGISTER_COMPONENT_TYPE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RegisterComponentType {
    Unknown = 0,
    Uint32 = 1,
    Sint32 = 2,
    Float32 = 3,
}

/// `D3D11_SIGNATURE_PARAMETER_DESC` subset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureParameterDesc {
    pub semantic_name: String,
    pub semantic_index: u32,
    pub register: u32,
    pub component_type: RegisterComponentType,
    /// Bit per used component (x = 1, y = 2, z = 4, w = 8)
    pub mask: u8,
}

/// Preprocessor definition handed to the compiler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderDefine {
    pub name: String,
    pub definition: String,
}

/// Failed compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    pub code: super::HResult,
    /// Compiler diagnostic text
    pub diagnostics: String,
}
