/// Texel encoding for clears and mip generation

use crate::native::DxgiFormat;

/// How the driver reads and writes one texel of a format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TexelLayout {
    Unorm8 { channels: usize },
    Unorm16 { channels: usize },
    Float32 { channels: usize },
    /// Opaque bytes; filtered by point sampling
    Raw { bytes: usize },
}

impl TexelLayout {
    pub fn of(format: DxgiFormat) -> TexelLayout {
        use DxgiFormat::*;
        match format {
            R8G8B8A8_UNORM | R8G8B8A8_UNORM_SRGB | R8G8B8A8_TYPELESS | B8G8R8A8_UNORM
            | B8G8R8A8_UNORM_SRGB | B8G8R8A8_TYPELESS | B8G8R8X8_UNORM | B8G8R8X8_UNORM_SRGB
            | B8G8R8X8_TYPELESS => TexelLayout::Unorm8 { channels: 4 },
            R8G8_UNORM | R8G8_TYPELESS => TexelLayout::Unorm8 { channels: 2 },
            R8_UNORM | R8_TYPELESS | A8_UNORM => TexelLayout::Unorm8 { channels: 1 },
            R16G16B16A16_UNORM | R16G16B16A16_TYPELESS => TexelLayout::Unorm16 { channels: 4 },
            R16G16_UNORM | R16G16_TYPELESS => TexelLayout::Unorm16 { channels: 2 },
            R16_UNORM | R16_TYPELESS | D16_UNORM => TexelLayout::Unorm16 { channels: 1 },
            R32G32B32A32_FLOAT | R32G32B32A32_TYPELESS => TexelLayout::Float32 { channels: 4 },
            R32G32B32_FLOAT | R32G32B32_TYPELESS => TexelLayout::Float32 { channels: 3 },
            R32G32_FLOAT | R32G32_TYPELESS => TexelLayout::Float32 { channels: 2 },
            R32_FLOAT | R32_TYPELESS | D32_FLOAT => TexelLayout::Float32 { channels: 1 },
            other => TexelLayout::Raw { bytes: (crate::translate::bits_per_pixel(other) / 8).max(1) as usize },
        }
    }

    pub fn texel_size(self) -> usize {
        match self {
            TexelLayout::Unorm8 { channels } => channels,
            TexelLayout::Unorm16 { channels } => channels * 2,
            TexelLayout::Float32 { channels } => channels * 4,
            TexelLayout::Raw { bytes } => bytes,
        }
    }

    fn channels(self) -> usize {
        match self {
            TexelLayout::Unorm8 { channels }
            | TexelLayout::Unorm16 { channels }
            | TexelLayout::Float32 { channels } => channels,
            TexelLayout::Raw { .. } => 0,
        }
    }

    fn read(self, texel: &[u8], channel: usize) -> f32 {
        match self {
            TexelLayout::Unorm8 { .. } => texel[channel] as f32 / 255.0,
            TexelLayout::Unorm16 { .. } => {
                bytemuck::pod_read_unaligned::<u16>(&texel[channel * 2..channel * 2 + 2]) as f32 / 65535.0
            }
            TexelLayout::Float32 { .. } => bytemuck::pod_read_unaligned::<f32>(&texel[channel * 4..channel * 4 + 4]),
            TexelLayout::Raw { .. } => 0.0,
        }
    }

    fn write(self, texel: &mut [u8], channel: usize, value: f32) {
        match self {
            TexelLayout::Unorm8 { .. } => {
                texel[channel] = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
            }
            TexelLayout::Unorm16 { .. } => {
                let v = (value.clamp(0.0, 1.0) * 65535.0).round() as u16;
                texel[channel * 2..channel * 2 + 2].copy_from_slice(bytemuck::bytes_of(&v));
            }
            TexelLayout::Float32 { .. } => {
                texel[channel * 4..channel * 4 + 4].copy_from_slice(bytemuck::bytes_of(&value));
            }
            TexelLayout::Raw { .. } => {}
        }
    }

    /// One texel holding `color`
    pub fn encode(self, color: [f32; 4]) -> Vec<u8> {
        let mut texel = vec![0u8; self.texel_size()];
        for channel in 0..self.channels().min(4) {
            self.write(&mut texel, channel, color[channel]);
        }
        texel
    }
}

/// Fill every texel of a subresource with the same encoded value
pub(crate) fn fill(data: &mut [u8], texel: &[u8]) {
    if texel.is_empty() {
        return;
    }
    for chunk in data.chunks_exact_mut(texel.len()) {
        chunk.copy_from_slice(texel);
    }
}

/// 2x2 box filter from one mip level to the next
///
/// `src` is tightly packed `src_w * src_h` texels. Edge texels of odd sizes
/// are clamped.
pub(crate) fn downsample(layout: TexelLayout, src: &[u8], src_w: u32, src_h: u32) -> Vec<u8> {
    let dst_w = (src_w / 2).max(1) as usize;
    let dst_h = (src_h / 2).max(1) as usize;
    let (src_w, src_h) = (src_w as usize, src_h as usize);
    let size = layout.texel_size();
    let mut dst = vec![0u8; dst_w * dst_h * size];
    if src.len() < src_w * src_h * size {
        return dst;
    }

    let texel = |x: usize, y: usize| {
        let at = (y.min(src_h - 1) * src_w + x.min(src_w - 1)) * size;
        &src[at..at + size]
    };

    for y in 0..dst_h {
        for x in 0..dst_w {
            let out = &mut dst[(y * dst_w + x) * size..(y * dst_w + x + 1) * size];
            let taps = [
                texel(2 * x, 2 * y),
                texel(2 * x + 1, 2 * y),
                texel(2 * x, 2 * y + 1),
                texel(2 * x + 1, 2 * y + 1),
            ];
            if let TexelLayout::Raw { .. } = layout {
                out.copy_from_slice(taps[0]);
                continue;
            }
            for channel in 0..layout.channels() {
                let sum: f32 = taps.iter().map(|t| layout.read(t, channel)).sum();
                layout.write(out, channel, sum / 4.0);
            }
        }
    }
    dst
}

/// Depth and stencil bytes of one depth texel; `None` keeps the old part
pub(crate) fn encode_depth_stencil(
    format: DxgiFormat,
    old: &[u8],
    depth: Option<f32>,
    stencil: Option<u8>,
) -> Vec<u8> {
    let mut texel = old.to_vec();
    match format {
        DxgiFormat::D32_FLOAT | DxgiFormat::R32_TYPELESS => {
            if let Some(depth) = depth {
                texel.copy_from_slice(bytemuck::bytes_of(&depth));
            }
        }
        DxgiFormat::D16_UNORM | DxgiFormat::R16_TYPELESS => {
            if let Some(depth) = depth {
                let v = (depth.clamp(0.0, 1.0) * 65535.0).round() as u16;
                texel.copy_from_slice(bytemuck::bytes_of(&v));
            }
        }
        DxgiFormat::D24_UNORM_S8_UINT | DxgiFormat::R24G8_TYPELESS => {
            let mut packed = bytemuck::pod_read_unaligned::<u32>(&texel[..4]);
            if let Some(depth) = depth {
                let v = (depth.clamp(0.0, 1.0) * 16_777_215.0).round() as u32;
                packed = (packed & 0xff00_0000) | v;
            }
            if let Some(stencil) = stencil {
                packed = (packed & 0x00ff_ffff) | ((stencil as u32) << 24);
            }
            texel.copy_from_slice(bytemuck::bytes_of(&packed));
        }
        _ => {}
    }
    texel
}

#[cfg(test)]
#[path = "texels_tests.rs"]
mod tests;
