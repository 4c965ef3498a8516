//! Descriptors of 2D textures and of the samplers reading them.
use serde::{Deserialize, Serialize};

use crate::math::Color;

/// List of all the possible storage formats of a texture.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum TextureFormat {
    Unknown,
    RGBA8UIntNorm,
    RGBA16UIntNorm,
    RGBA32Float,
    RGB32Float,
    BGRA8UIntNorm,
    DXT1,
    DXT3,
    DXT5,
    Depth16,
    Depth32,
    Depth24Stencil8,
}

impl TextureFormat {
    #[inline]
    pub fn is_depth(self) -> bool {
        match self {
            TextureFormat::Depth16 | TextureFormat::Depth32 | TextureFormat::Depth24Stencil8 => {
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn is_stencil(self) -> bool {
        self == TextureFormat::Depth24Stencil8
    }

    /// Returns true for the block-compressed formats.
    #[inline]
    pub fn is_compressed(self) -> bool {
        match self {
            TextureFormat::DXT1 | TextureFormat::DXT3 | TextureFormat::DXT5 => true,
            _ => false,
        }
    }

    /// Returns the size in bytes of a pixel, or of a 4x4 block for the
    /// compressed formats.
    pub fn block_size(self) -> usize {
        match self {
            TextureFormat::Unknown => 0,
            TextureFormat::Depth16 => 2,
            TextureFormat::RGBA8UIntNorm
            | TextureFormat::BGRA8UIntNorm
            | TextureFormat::Depth32
            | TextureFormat::Depth24Stencil8 => 4,
            TextureFormat::RGBA16UIntNorm | TextureFormat::DXT1 => 8,
            TextureFormat::RGB32Float => 12,
            TextureFormat::RGBA32Float | TextureFormat::DXT3 | TextureFormat::DXT5 => 16,
        }
    }

    /// Returns the size in bytes of an image with the given dimensions.
    pub fn size(self, width: u32, height: u32) -> usize {
        let (w, h) = (width as usize, height as usize);
        if self.is_compressed() {
            ((w + 3) / 4) * ((h + 3) / 4) * self.block_size()
        } else {
            w * h * self.block_size()
        }
    }
}

/// Returns the length of the full mip chain of an image, down to 1x1.
pub fn mip_levels(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Returns the dimensions of the mip `level` of an image.
pub fn mip_dimensions(width: u32, height: u32, level: u32) -> (u32, u32) {
    ((width >> level).max(1), (height >> level).max(1))
}

/// Specify how a texture is filtered whenever it is sampled.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum TextureFilter {
    /// Returns the value of the nearest texture element.
    Point,
    /// Returns the weighted average of the four closest texture elements.
    Linear,
    Anisotropic,
}

/// Sets the wrap parameter for texture coordinates outside [0, 1].
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum AddressMode {
    /// Samples at coord x + 1 map to coord x.
    Wrap,
    /// Samples at coord x + 1 map to coord 1 - x.
    Mirror,
    /// Samples at coord x + 1 map to coord 1.
    Clamp,
    /// Samples outside the texture return the border color.
    Border,
}

#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum SamplerType {
    Normal,
    /// Compares the sampled depth against the reference with `comparison`.
    Comparison,
}

/// Specify the comparison function used by depth tests, stencil tests and
/// comparison samplers.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Comparison {
    Never,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Equal,
    NotEqual,
    Always,
}

/// The immutable description of a sampler object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplerInfo {
    pub min_filter: TextureFilter,
    pub mag_filter: TextureFilter,
    pub mip_filter: TextureFilter,
    pub address_u: AddressMode,
    pub address_v: AddressMode,
    pub address_w: AddressMode,
    pub mip_lod_bias: f32,
    pub max_anisotropy: u32,
    pub border_color: Color,
    pub min_lod: f32,
    pub max_lod: f32,
    pub sampler_type: SamplerType,
    pub comparison: Comparison,
}

impl Default for SamplerInfo {
    fn default() -> Self {
        SamplerInfo {
            min_filter: TextureFilter::Linear,
            mag_filter: TextureFilter::Linear,
            mip_filter: TextureFilter::Linear,
            address_u: AddressMode::Wrap,
            address_v: AddressMode::Wrap,
            address_w: AddressMode::Wrap,
            mip_lod_bias: 0.0,
            max_anisotropy: 0,
            border_color: Color::transparent(),
            min_lod: -1000.0,
            max_lod: 1000.0,
            sampler_type: SamplerType::Normal,
            comparison: Comparison::Never,
        }
    }
}

impl SamplerInfo {
    /// Returns true if anisotropic filtering is requested for minification or
    /// magnification.
    #[inline]
    pub fn is_anisotropic(&self) -> bool {
        self.min_filter == TextureFilter::Anisotropic
            || self.mag_filter == TextureFilter::Anisotropic
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mips() {
        assert_eq!(mip_levels(256, 256), 9);
        assert_eq!(mip_levels(256, 17), 9);
        assert_eq!(mip_levels(1, 1), 1);
        assert_eq!(mip_levels(3, 1), 2);
        assert_eq!(mip_dimensions(256, 64, 7), (2, 1));
    }

    #[test]
    fn format() {
        assert_eq!(TextureFormat::RGBA8UIntNorm.size(4, 4), 64);
        assert_eq!(TextureFormat::DXT1.size(5, 4), 16);
        assert_eq!(TextureFormat::DXT5.size(1, 1), 16);
        assert!(TextureFormat::Depth24Stencil8.is_depth());
        assert!(TextureFormat::Depth24Stencil8.is_stencil());
        assert!(!TextureFormat::Depth16.is_stencil());
        assert!(TextureFormat::DXT3.is_compressed());
    }
}
