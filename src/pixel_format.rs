use crate::{FormatId, ImageSize, StrictApi as _, memory_aligned_step};
use std::ops::Range;

/// Maximum number of channels a pixel can have
pub const MAX_CHANNELS: usize = 5;

/// Semantic meaning of a format's channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PixelType {
    R,
    Rg,
    Rgb,
    Rgba,
    Bgr,
    Bgra,
    Grey,
    Stencil,
    GreyStencil,
    Yuv,
    Yuva,
}

impl PixelType {
    /// RGB, BGR, RGBA or BGRA
    pub fn is_rgb_family(self) -> bool {
        matches!(
            self,
            PixelType::Rgb | PixelType::Rgba | PixelType::Bgr | PixelType::Bgra
        )
    }

    /// YUV or YUVA
    pub fn is_yuv_family(self) -> bool {
        matches!(self, PixelType::Yuv | PixelType::Yuva)
    }
}

/// Byte layout of a pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout {
    /// Bytes occupied by a group of `group_pixels` pixels
    pub bytes: u32,
    pub channels: u32,
    /// Number of pixels sharing `bytes`, 1 unless pixels are packed below byte granularity
    pub group_pixels: u32,
    /// Channels hold normalized floating point values
    pub normalized: bool,
}

/// Per channel bit depths, ordered plane-major
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Planar {
    pub channel_bits: &'static [u8],
    pub is_planar: bool,
}

/// Exact rational scale factor of a plane's dimension in relation to the image's dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ratio {
    pub num: u32,
    pub den: u32,
}

impl Ratio {
    pub const ONE: Ratio = Ratio { num: 1, den: 1 };
    pub const HALF: Ratio = Ratio { num: 1, den: 2 };

    /// Scale `v` by the ratio, truncating
    #[inline(always)]
    pub fn scale(self, v: usize) -> usize {
        v.strict_mul_(self.num as usize) / self.den as usize
    }
}

/// Description of one plane of a format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Plane {
    pub width_ratio: Ratio,
    pub height_ratio: Ratio,
    /// Rows are padded to a multiple of this many bits
    pub row_alignment: u32,
    pub channels: u32,
}

impl Plane {
    /// Single byte aligned plane without sub sampling
    pub const fn packed(channels: u32) -> Self {
        Self {
            width_ratio: Ratio::ONE,
            height_ratio: Ratio::ONE,
            row_alignment: 8,
            channels,
        }
    }
}

/// Describes how pixels of a format are laid out in memory.
///
/// Equality is structural, two formats only compare equal if type, layout, bit depths and every
/// plane (including its row alignment) are identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelFormat {
    pub pixel_type: PixelType,
    pub layout: Layout,
    pub planar: Planar,
    pub planes: &'static [Plane],
}

impl PixelFormat {
    pub fn is_planar(&self) -> bool {
        self.planar.is_planar
    }

    pub fn plane_count(&self) -> usize {
        self.planes.len()
    }

    pub fn channel_count(&self) -> usize {
        self.layout.channels as usize
    }

    /// Bit depth of the channel at index `channel` (plane-major order)
    pub fn channel_bits(&self, channel: usize) -> u32 {
        u32::from(self.planar.channel_bits[channel])
    }

    /// Range of indices into the plane-major channel list belonging to `plane`
    pub fn plane_channels(&self, plane: usize) -> Range<usize> {
        let start: usize = self.planes[..plane]
            .iter()
            .map(|plane| plane.channels as usize)
            .sum();

        start..start + self.planes[plane].channels as usize
    }

    /// Sum of the bit depths of all channels stored in `plane`
    pub fn plane_pixel_bits(&self, plane: usize) -> usize {
        self.planar.channel_bits[self.plane_channels(plane)]
            .iter()
            .map(|&bits| bits as usize)
            .sum()
    }

    /// Minimum number of bits required to store one row of `plane`, without alignment padding
    pub fn min_row_bits(&self, plane: usize, width: usize) -> usize {
        if self.is_planar() {
            let plane_width = self.planes[plane].width_ratio.scale(width);

            plane_width.strict_mul_(self.plane_pixel_bits(plane))
        } else {
            width
                .strict_mul_(self.layout.bytes as usize)
                .strict_mul_(8)
                / self.layout.group_pixels as usize
        }
    }

    /// Calculate the minimum row step (in bytes) of every plane for an image of the given width
    #[deny(clippy::arithmetic_side_effects)]
    pub fn packed_steps(&self, width: usize) -> Vec<usize> {
        self.planes
            .iter()
            .enumerate()
            .map(|(i, plane)| memory_aligned_step(self.min_row_bits(i, width), plane.row_alignment))
            .collect()
    }

    /// Calculate the required buffer size in bytes for an image of the given size with minimal steps
    #[deny(clippy::arithmetic_side_effects)]
    pub fn buffer_size(&self, size: ImageSize) -> usize {
        let mut total = 0usize;

        for (plane, step) in self.planes.iter().zip(self.packed_steps(size.width)) {
            total = total.strict_add_(step.strict_mul_(plane.height_ratio.scale(size.height)));
        }

        total
    }

    /// Check the internal invariants of the descriptor
    ///
    /// The plane channel counts must add up to the layout's channel count, one bit depth must exist for
    /// every channel, and every plane must have a non zero ratio denominator.
    pub fn is_consistent(&self) -> bool {
        let plane_channels: u32 = self.planes.iter().map(|plane| plane.channels).sum();

        !self.planes.is_empty()
            && self.channel_count() <= MAX_CHANNELS
            && plane_channels == self.layout.channels
            && self.planar.channel_bits.len() == self.channel_count()
            && self.layout.group_pixels != 0
            && self
                .planes
                .iter()
                .all(|plane| plane.width_ratio.den != 0 && plane.height_ratio.den != 0)
            && (self.is_planar() || self.planes.len() == 1)
    }

    /// Find the catalog entry which is equal to this format
    pub fn id(&self) -> Option<FormatId> {
        FormatId::variants()
            .into_iter()
            .find(|id| id.format() == self)
    }
}
