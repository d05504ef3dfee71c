/// Buffer-specific descriptor types

/// Width of one index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexBufferFormat {
    /// 16-bit unsigned indices
    R16,
    /// 32-bit unsigned indices
    R32,
}

impl IndexBufferFormat {
    /// Bytes per index
    pub fn stride(self) -> u32 {
        match self {
            IndexBufferFormat::R16 => 2,
            IndexBufferFormat::R32 => 4,
        }
    }

    /// Format tag of a bound index buffer
    pub fn graphics_format(self) -> super::GraphicsFormat {
        match self {
            IndexBufferFormat::R16 => super::GraphicsFormat::R16_UINT,
            IndexBufferFormat::R32 => super::GraphicsFormat::R32_UINT,
        }
    }
}

/// Multisample configuration supported for a format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MsaaSampleDesc {
    /// Highest supported sample count
    pub samples: u32,
    /// Highest quality level for that count
    pub quality: u32,
}
