/// Abstract pixel format enumeration

macro_rules! graphics_formats {
    ($($variant:ident => $name:literal,)*) => {
        /// API-agnostic pixel format
        ///
        /// Every value except `UNKNOWN` has exactly one native counterpart in
        /// each backend.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[allow(non_camel_case_types)]
        pub enum GraphicsFormat {
            $($variant,)*
        }

        impl GraphicsFormat {
            /// Every format, in declaration order
            pub const ALL: &'static [GraphicsFormat] = &[$(GraphicsFormat::$variant,)*];

            /// Canonical upper-case name ("R8G8B8A8_UNORM")
            pub fn name(self) -> &'static str {
                match self {
                    $(GraphicsFormat::$variant => $name,)*
                }
            }

            /// Parse a canonical name; unknown names give `UNKNOWN`
            pub fn from_name(name: &str) -> GraphicsFormat {
                match name {
                    $($name => GraphicsFormat::$variant,)*
                    _ => GraphicsFormat::UNKNOWN,
                }
            }
        }
    };
}

graphics_formats! {
    UNKNOWN => "UNKNOWN",
    R32G32B32A32_TYPELESS => "R32G32B32A32_TYPELESS",
    R32G32B32A32_FLOAT => "R32G32B32A32_FLOAT",
    R32G32B32A32_UINT => "R32G32B32A32_UINT",
    R32G32B32A32_SINT => "R32G32B32A32_SINT",
    R32G32B32_TYPELESS => "R32G32B32_TYPELESS",
    R32G32B32_FLOAT => "R32G32B32_FLOAT",
    R32G32B32_UINT => "R32G32B32_UINT",
    R32G32B32_SINT => "R32G32B32_SINT",
    R16G16B16A16_TYPELESS => "R16G16B16A16_TYPELESS",
    R16G16B16A16_FLOAT => "R16G16B16A16_FLOAT",
    R16G16B16A16_UNORM => "R16G16B16A16_UNORM",
    R16G16B16A16_UINT => "R16G16B16A16_UINT",
    R16G16B16A16_SNORM => "R16G16B16A16_SNORM",
    R16G16B16A16_SINT => "R16G16B16A16_SINT",
    R32G32_TYPELESS => "R32G32_TYPELESS",
    R32G32_FLOAT => "R32G32_FLOAT",
    R32G32_UINT => "R32G32_UINT",
    R32G32_SINT => "R32G32_SINT",
    R32G8X24_TYPELESS => "R32G8X24_TYPELESS",
    D32_FLOAT_S8X24_UINT => "D32_FLOAT_S8X24_UINT",
    R32_FLOAT_X8X24_TYPELESS => "R32_FLOAT_X8X24_TYPELESS",
    X32_TYPELESS_G8X24_UINT => "X32_TYPELESS_G8X24_UINT",
    R10G10B10A2_TYPELESS => "R10G10B10A2_TYPELESS",
    R10G10B10A2_UNORM => "R10G10B10A2_UNORM",
    R10G10B10A2_UINT => "R10G10B10A2_UINT",
    R11G11B10_FLOAT => "R11G11B10_FLOAT",
    R8G8B8A8_TYPELESS => "R8G8B8A8_TYPELESS",
    R8G8B8A8_UNORM => "R8G8B8A8_UNORM",
    R8G8B8A8_UNORM_SRGB => "R8G8B8A8_UNORM_SRGB",
    R8G8B8A8_UINT => "R8G8B8A8_UINT",
    R8G8B8A8_SNORM => "R8G8B8A8_SNORM",
    R8G8B8A8_SINT => "R8G8B8A8_SINT",
    R16G16_TYPELESS => "R16G16_TYPELESS",
    R16G16_FLOAT => "R16G16_FLOAT",
    R16G16_UNORM => "R16G16_UNORM",
    R16G16_UINT => "R16G16_UINT",
    R16G16_SNORM => "R16G16_SNORM",
    R16G16_SINT => "R16G16_SINT",
    R32_TYPELESS => "R32_TYPELESS",
    D32_FLOAT => "D32_FLOAT",
    R32_FLOAT => "R32_FLOAT",
    R32_UINT => "R32_UINT",
    R32_SINT => "R32_SINT",
    R24G8_TYPELESS => "R24G8_TYPELESS",
    D24_UNORM_S8_UINT => "D24_UNORM_S8_UINT",
    R24_UNORM_X8_TYPELESS => "R24_UNORM_X8_TYPELESS",
    X24_TYPELESS_G8_UINT => "X24_TYPELESS_G8_UINT",
    R8G8_TYPELESS => "R8G8_TYPELESS",
    R8G8_UNORM => "R8G8_UNORM",
    R8G8_UINT => "R8G8_UINT",
    R8G8_SNORM => "R8G8_SNORM",
    R8G8_SINT => "R8G8_SINT",
    R16_TYPELESS => "R16_TYPELESS",
    R16_FLOAT => "R16_FLOAT",
    D16_UNORM => "D16_UNORM",
    R16_UNORM => "R16_UNORM",
    R16_UINT => "R16_UINT",
    R16_SNORM => "R16_SNORM",
    R16_SINT => "R16_SINT",
    R8_TYPELESS => "R8_TYPELESS",
    R8_UNORM => "R8_UNORM",
    R8_UINT => "R8_UINT",
    R8_SNORM => "R8_SNORM",
    R8_SINT => "R8_SINT",
    A8_UNORM => "A8_UNORM",
    R1_UNORM => "R1_UNORM",
    R9G9B9E5_SHAREDEXP => "R9G9B9E5_SHAREDEXP",
    R8G8_B8G8_UNORM => "R8G8_B8G8_UNORM",
    G8R8_G8B8_UNORM => "G8R8_G8B8_UNORM",
    BC1_TYPELESS => "BC1_TYPELESS",
    BC1_UNORM => "BC1_UNORM",
    BC1_UNORM_SRGB => "BC1_UNORM_SRGB",
    BC2_TYPELESS => "BC2_TYPELESS",
    BC2_UNORM => "BC2_UNORM",
    BC2_UNORM_SRGB => "BC2_UNORM_SRGB",
    BC3_TYPELESS => "BC3_TYPELESS",
    BC3_UNORM => "BC3_UNORM",
    BC3_UNORM_SRGB => "BC3_UNORM_SRGB",
    BC4_TYPELESS => "BC4_TYPELESS",
    BC4_UNORM => "BC4_UNORM",
    BC4_SNORM => "BC4_SNORM",
    BC5_TYPELESS => "BC5_TYPELESS",
    BC5_UNORM => "BC5_UNORM",
    BC5_SNORM => "BC5_SNORM",
    B5G6R5_UNORM => "B5G6R5_UNORM",
    B5G5R5A1_UNORM => "B5G5R5A1_UNORM",
    B8G8R8A8_UNORM => "B8G8R8A8_UNORM",
    B8G8R8X8_UNORM => "B8G8R8X8_UNORM",
    R10G10B10_XR_BIAS_A2_UNORM => "R10G10B10_XR_BIAS_A2_UNORM",
    B8G8R8A8_TYPELESS => "B8G8R8A8_TYPELESS",
    B8G8R8A8_UNORM_SRGB => "B8G8R8A8_UNORM_SRGB",
    B8G8R8X8_TYPELESS => "B8G8R8X8_TYPELESS",
    B8G8R8X8_UNORM_SRGB => "B8G8R8X8_UNORM_SRGB",
    BC6H_TYPELESS => "BC6H_TYPELESS",
    BC6H_UF16 => "BC6H_UF16",
    BC6H_SF16 => "BC6H_SF16",
    BC7_TYPELESS => "BC7_TYPELESS",
    BC7_UNORM => "BC7_UNORM",
    BC7_UNORM_SRGB => "BC7_UNORM_SRGB",
    AYUV => "AYUV",
    Y410 => "Y410",
    Y416 => "Y416",
    NV12 => "NV12",
    P010 => "P010",
    P016 => "P016",
    OPAQUE_420 => "420_OPAQUE",
    YUY2 => "YUY2",
    Y210 => "Y210",
    Y216 => "Y216",
    NV11 => "NV11",
    AI44 => "AI44",
    IA44 => "IA44",
    P8 => "P8",
    A8P8 => "A8P8",
    B4G4R4A4_UNORM => "B4G4R4A4_UNORM",
    P208 => "P208",
    V208 => "V208",
    V408 => "V408",
    SAMPLER_FEEDBACK_MIN_MIP_OPAQUE => "SAMPLER_FEEDBACK_MIN_MIP_OPAQUE",
    SAMPLER_FEEDBACK_MIP_REGION_USED_OPAQUE => "SAMPLER_FEEDBACK_MIP_REGION_USED_OPAQUE",
}

impl GraphicsFormat {
    /// True for the formats a depth-stencil view can be created with
    pub fn is_depth(self) -> bool {
        matches!(
            self,
            GraphicsFormat::D32_FLOAT
                | GraphicsFormat::D24_UNORM_S8_UINT
                | GraphicsFormat::D16_UNORM
                | GraphicsFormat::D32_FLOAT_S8X24_UINT
        )
    }

    /// Average bits per texel (block-compressed formats report the per-texel average)
    pub fn bits_per_pixel(self) -> u32 {
        use GraphicsFormat::*;
        match self {
            R32G32B32A32_TYPELESS | R32G32B32A32_FLOAT | R32G32B32A32_UINT | R32G32B32A32_SINT => 128,

            R32G32B32_TYPELESS | R32G32B32_FLOAT | R32G32B32_UINT | R32G32B32_SINT => 96,

            R16G16B16A16_TYPELESS | R16G16B16A16_FLOAT | R16G16B16A16_UNORM | R16G16B16A16_UINT
            | R16G16B16A16_SNORM | R16G16B16A16_SINT | R32G32_TYPELESS | R32G32_FLOAT
            | R32G32_UINT | R32G32_SINT | R32G8X24_TYPELESS | D32_FLOAT_S8X24_UINT
            | R32_FLOAT_X8X24_TYPELESS | X32_TYPELESS_G8X24_UINT | Y416 | Y210 | Y216 => 64,

            R10G10B10A2_TYPELESS | R10G10B10A2_UNORM | R10G10B10A2_UINT | R11G11B10_FLOAT
            | R8G8B8A8_TYPELESS | R8G8B8A8_UNORM | R8G8B8A8_UNORM_SRGB | R8G8B8A8_UINT
            | R8G8B8A8_SNORM | R8G8B8A8_SINT | R16G16_TYPELESS | R16G16_FLOAT | R16G16_UNORM
            | R16G16_UINT | R16G16_SNORM | R16G16_SINT | R32_TYPELESS | D32_FLOAT | R32_FLOAT
            | R32_UINT | R32_SINT | R24G8_TYPELESS | D24_UNORM_S8_UINT | R24_UNORM_X8_TYPELESS
            | X24_TYPELESS_G8_UINT | R9G9B9E5_SHAREDEXP | R8G8_B8G8_UNORM | G8R8_G8B8_UNORM
            | B8G8R8A8_UNORM | B8G8R8X8_UNORM | R10G10B10_XR_BIAS_A2_UNORM | B8G8R8A8_TYPELESS
            | B8G8R8A8_UNORM_SRGB | B8G8R8X8_TYPELESS | B8G8R8X8_UNORM_SRGB | AYUV | Y410
            | YUY2 => 32,

            P010 | P016 | V408 => 24,

            R8G8_TYPELESS | R8G8_UNORM | R8G8_UINT | R8G8_SNORM | R8G8_SINT | R16_TYPELESS
            | R16_FLOAT | D16_UNORM | R16_UNORM | R16_UINT | R16_SNORM | R16_SINT
            | B5G6R5_UNORM | B5G5R5A1_UNORM | A8P8 | B4G4R4A4_UNORM | P208 | V208 => 16,

            NV12 | OPAQUE_420 | NV11 => 12,

            R8_TYPELESS | R8_UNORM | R8_UINT | R8_SNORM | R8_SINT | A8_UNORM | AI44 | IA44
            | P8 | BC2_TYPELESS | BC2_UNORM | BC2_UNORM_SRGB | BC3_TYPELESS | BC3_UNORM
            | BC3_UNORM_SRGB | BC5_TYPELESS | BC5_UNORM | BC5_SNORM | BC6H_TYPELESS
            | BC6H_UF16 | BC6H_SF16 | BC7_TYPELESS | BC7_UNORM | BC7_UNORM_SRGB => 8,

            BC1_TYPELESS | BC1_UNORM | BC1_UNORM_SRGB | BC4_TYPELESS | BC4_UNORM | BC4_SNORM => 4,

            R1_UNORM => 1,

            UNKNOWN | SAMPLER_FEEDBACK_MIN_MIP_OPAQUE | SAMPLER_FEEDBACK_MIP_REGION_USED_OPAQUE => 0,
        }
    }

    /// True for block-compressed formats (4x4 texel blocks)
    pub fn is_block_compressed(self) -> bool {
        self.name().starts_with("BC")
    }
}

impl std::fmt::Display for GraphicsFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
