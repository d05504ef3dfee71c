/// Texture descriptor, initial data and reported texture info

use super::{BindFlags, CpuAccessFlags, GraphicsFormat, ResourceUsage};

// ===== TEXTURE DATA =====

/// Mip 0 contents of one array slice
#[derive(Debug, Clone)]
pub struct TextureLayerData {
    /// Target array slice (0-based, cube faces included)
    pub layer: u32,
    /// Tightly packed texel rows
    pub data: Vec<u8>,
}

/// Data to upload at texture creation time
#[derive(Debug, Clone)]
pub enum TextureData {
    /// Contents of slice 0
    Single(Vec<u8>),

    /// Contents of the listed slices only; the rest start zeroed
    Layers(Vec<TextureLayerData>),
}

impl TextureData {
    /// Data for a given slice, if any was supplied
    pub fn layer(&self, layer: u32) -> Option<&[u8]> {
        match self {
            TextureData::Single(data) => (layer == 0).then_some(data.as_slice()),
            TextureData::Layers(layers) => layers
                .iter()
                .find(|l| l.layer == layer)
                .map(|l| l.data.as_slice()),
        }
    }
}

// ===== TEXTURE DESC =====

/// Descriptor for creating a 2D texture (optionally array, cube or MSAA)
#[derive(Debug, Clone)]
pub struct TextureDesc {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Logical pixel format
    pub format: GraphicsFormat,
    /// Requested pipeline bindings
    pub bind_flags: BindFlags,
    /// Mip count; 0 requests a full chain
    pub mip_levels: u32,
    /// Update pattern
    pub usage: ResourceUsage,
    /// CPU access (dynamic usage always adds `WRITE`)
    pub cpu_access: CpuAccessFlags,
    /// Samples per pixel
    pub sample_count: u32,
    /// Sample quality level
    pub sample_quality: u32,
    /// Force multisample view dimensions even with one sample
    pub is_msaa: bool,
    /// Six faces per array element
    pub is_cube_map: bool,
    /// Array elements (cube maps count cubes, not faces)
    pub array_size: u32,
    /// Optional mip 0 contents
    pub data: Option<TextureData>,
}

impl Default for TextureDesc {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            format: GraphicsFormat::R8G8B8A8_UNORM,
            bind_flags: BindFlags::SHADER_RESOURCE,
            mip_levels: 1,
            usage: ResourceUsage::Default,
            cpu_access: CpuAccessFlags::empty(),
            sample_count: 1,
            sample_quality: 0,
            is_msaa: false,
            is_cube_map: false,
            array_size: 1,
            data: None,
        }
    }
}

impl TextureDesc {
    /// Shader-readable texture with default settings
    pub fn new(width: u32, height: u32, format: GraphicsFormat) -> Self {
        Self { width, height, format, ..Default::default() }
    }

    /// Number of native array slices (six per cube)
    pub fn real_array_size(&self) -> u32 {
        if self.is_cube_map {
            self.array_size * 6
        } else {
            self.array_size
        }
    }

    /// Mip count of a full chain down to 1x1
    pub fn full_mip_chain(&self) -> u32 {
        let largest = self.width.max(self.height).max(1);
        u32::BITS - largest.leading_zeros()
    }
}

// ===== TEXTURE INFO =====

/// Read-only properties of a created texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
    /// Logical format the texture was requested with
    pub format: GraphicsFormat,
    /// Mip count actually allocated
    pub mip_levels: u32,
    /// Native slice count (six per cube)
    pub array_size: u32,
    pub sample_count: u32,
    pub sample_quality: u32,
    pub usage: ResourceUsage,
    /// Bindings actually allocated (may exceed the requested ones)
    pub bind_flags: BindFlags,
    pub cpu_access: CpuAccessFlags,
    pub is_cube_map: bool,
}

impl TextureInfo {
    /// Returns true if this texture has more than one slice
    pub fn is_array(&self) -> bool {
        self.array_size > 1
    }

    /// Returns true if this texture stores more than one sample per pixel
    pub fn is_multisampled(&self) -> bool {
        self.sample_count > 1
    }
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
