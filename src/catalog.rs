//! Catalog of every supported pixel format
//!
//! Each format is a process wide constant. [`FormatId`] names them so they can be enumerated and
//! looked up by tag.

use crate::pixel_format::{Layout, PixelFormat, PixelType, Planar, Plane, Ratio};

const PACKED_1: [Plane; 1] = [Plane::packed(1)];
const PACKED_2: [Plane; 1] = [Plane::packed(2)];
const PACKED_3: [Plane; 1] = [Plane::packed(3)];
const PACKED_4: [Plane; 1] = [Plane::packed(4)];

const fn packed(
    pixel_type: PixelType,
    bytes: u32,
    normalized: bool,
    channel_bits: &'static [u8],
    planes: &'static [Plane],
) -> PixelFormat {
    PixelFormat {
        pixel_type,
        layout: Layout {
            bytes,
            channels: channel_bits.len() as u32,
            group_pixels: 1,
            normalized,
        },
        planar: Planar {
            channel_bits,
            is_planar: false,
        },
        planes,
    }
}

const fn sub_sampled(width_ratio: Ratio, height_ratio: Ratio) -> Plane {
    Plane {
        width_ratio,
        height_ratio,
        row_alignment: 8,
        channels: 1,
    }
}

/// Plane 0 carries luma, interleaved with alpha for the YUVA formats
const fn luma(channels: u32) -> Plane {
    Plane {
        width_ratio: Ratio::ONE,
        height_ratio: Ratio::ONE,
        row_alignment: 8,
        channels,
    }
}

const I420_PLANES: [Plane; 3] = [
    luma(1),
    sub_sampled(Ratio::HALF, Ratio::HALF),
    sub_sampled(Ratio::HALF, Ratio::HALF),
];
const I420A_PLANES: [Plane; 3] = [
    luma(2),
    sub_sampled(Ratio::HALF, Ratio::HALF),
    sub_sampled(Ratio::HALF, Ratio::HALF),
];
const I422_PLANES: [Plane; 3] = [
    luma(1),
    sub_sampled(Ratio::HALF, Ratio::ONE),
    sub_sampled(Ratio::HALF, Ratio::ONE),
];
const I422A_PLANES: [Plane; 3] = [
    luma(2),
    sub_sampled(Ratio::HALF, Ratio::ONE),
    sub_sampled(Ratio::HALF, Ratio::ONE),
];
const I444_PLANES: [Plane; 3] = [
    luma(1),
    sub_sampled(Ratio::ONE, Ratio::ONE),
    sub_sampled(Ratio::ONE, Ratio::ONE),
];
const I444A_PLANES: [Plane; 3] = [
    luma(2),
    sub_sampled(Ratio::ONE, Ratio::ONE),
    sub_sampled(Ratio::ONE, Ratio::ONE),
];

const fn planar(
    pixel_type: PixelType,
    bytes: u32,
    group_pixels: u32,
    channel_bits: &'static [u8],
    planes: &'static [Plane],
) -> PixelFormat {
    PixelFormat {
        pixel_type,
        layout: Layout {
            bytes,
            channels: channel_bits.len() as u32,
            group_pixels,
            normalized: false,
        },
        planar: Planar {
            channel_bits,
            is_planar: true,
        },
        planes,
    }
}

/// Single red channel, 8 bit
pub const R8: PixelFormat = packed(PixelType::R, 1, false, &[8], &PACKED_1);

/// Interleaved red and green, 8 bit per channel
pub const RG8: PixelFormat = packed(PixelType::Rg, 2, false, &[8, 8], &PACKED_2);

/// Single red channel, 16 bit
pub const R16: PixelFormat = packed(PixelType::R, 2, false, &[16], &PACKED_1);

/// Interleaved red and green, 16 bit per channel
pub const RG16: PixelFormat = packed(PixelType::Rg, 4, false, &[16, 16], &PACKED_2);

/// Single red channel, 32 bit float
pub const R32F: PixelFormat = packed(PixelType::R, 4, true, &[32], &PACKED_1);

/// Interleaved red and green, 32 bit float per channel
pub const RG32F: PixelFormat = packed(PixelType::Rg, 8, true, &[32, 32], &PACKED_2);

/// Single red channel, 64 bit float
pub const R64F: PixelFormat = packed(PixelType::R, 8, true, &[64], &PACKED_1);

/// Interleaved red and green, 64 bit float per channel
pub const RG64F: PixelFormat = packed(PixelType::Rg, 16, true, &[64, 64], &PACKED_2);

/// Interleaved R G B, 8 bit per channel
pub const RGB8: PixelFormat = packed(PixelType::Rgb, 3, false, &[8, 8, 8], &PACKED_3);

/// Interleaved R G B A, 8 bit per channel
pub const RGBA8: PixelFormat = packed(PixelType::Rgba, 4, false, &[8, 8, 8, 8], &PACKED_4);

/// Interleaved B G R, 8 bit per channel
pub const BGR8: PixelFormat = packed(PixelType::Bgr, 3, false, &[8, 8, 8], &PACKED_3);

/// Interleaved B G R A, 8 bit per channel
pub const BGRA8: PixelFormat = packed(PixelType::Bgra, 4, false, &[8, 8, 8, 8], &PACKED_4);

/// Interleaved R G B, 16 bit per channel
pub const RGB16: PixelFormat = packed(PixelType::Rgb, 6, false, &[16, 16, 16], &PACKED_3);

/// Interleaved R G B A, 16 bit per channel
pub const RGBA16: PixelFormat = packed(PixelType::Rgba, 8, false, &[16, 16, 16, 16], &PACKED_4);

/// Interleaved B G R, 16 bit per channel
pub const BGR16: PixelFormat = packed(PixelType::Bgr, 6, false, &[16, 16, 16], &PACKED_3);

/// Interleaved B G R A, 16 bit per channel
pub const BGRA16: PixelFormat = packed(PixelType::Bgra, 8, false, &[16, 16, 16, 16], &PACKED_4);

/// Interleaved R G B, 32 bit float per channel
pub const RGB32F: PixelFormat = packed(PixelType::Rgb, 12, true, &[32, 32, 32], &PACKED_3);

/// Interleaved R G B A, 32 bit float per channel
pub const RGBA32F: PixelFormat = packed(PixelType::Rgba, 16, true, &[32, 32, 32, 32], &PACKED_4);

/// Interleaved B G R, 32 bit float per channel
pub const BGR32F: PixelFormat = packed(PixelType::Bgr, 12, true, &[32, 32, 32], &PACKED_3);

/// Interleaved B G R A, 32 bit float per channel
pub const BGRA32F: PixelFormat = packed(PixelType::Bgra, 16, true, &[32, 32, 32, 32], &PACKED_4);

/// Interleaved R G B, 64 bit float per channel
pub const RGB64F: PixelFormat = packed(PixelType::Rgb, 24, true, &[64, 64, 64], &PACKED_3);

/// Interleaved R G B A, 64 bit float per channel
pub const RGBA64F: PixelFormat = packed(PixelType::Rgba, 32, true, &[64, 64, 64, 64], &PACKED_4);

/// Interleaved B G R, 64 bit float per channel
pub const BGR64F: PixelFormat = packed(PixelType::Bgr, 24, true, &[64, 64, 64], &PACKED_3);

/// Interleaved B G R A, 64 bit float per channel
pub const BGRA64F: PixelFormat = packed(PixelType::Bgra, 32, true, &[64, 64, 64, 64], &PACKED_4);

/// Grey scale, 8 bit
pub const GREY8: PixelFormat = packed(PixelType::Grey, 1, false, &[8], &PACKED_1);

/// Grey scale, 16 bit
pub const GREY16: PixelFormat = packed(PixelType::Grey, 2, false, &[16], &PACKED_1);

/// Grey scale, 32 bit float
pub const GREY32F: PixelFormat = packed(PixelType::Grey, 4, true, &[32], &PACKED_1);

/// Grey scale, 64 bit float
pub const GREY64F: PixelFormat = packed(PixelType::Grey, 8, true, &[64], &PACKED_1);

/// 8 bit stencil
pub const STENCIL8: PixelFormat = packed(PixelType::Stencil, 1, false, &[8], &PACKED_1);

/// 16 bit grey followed by an 8 bit stencil
pub const GREY_STENCIL_16_8: PixelFormat = packed(
    PixelType::GreyStencil,
    3,
    false,
    &[16, 8],
    &PACKED_2,
);

/// 24 bit grey followed by an 8 bit stencil
pub const GREY_STENCIL_24_8: PixelFormat = packed(
    PixelType::GreyStencil,
    4,
    false,
    &[24, 8],
    &PACKED_2,
);

/// 32 bit float grey followed by an 8 bit stencil, padded to 8 bytes
pub const GREY_STENCIL_32F_8: PixelFormat = packed(
    PixelType::GreyStencil,
    8,
    true,
    &[32, 8],
    &PACKED_2,
);

/// Y, U and V planes, 4:2:0 sub sampling, 8 bits per sample
pub const YUV420P: PixelFormat = planar(PixelType::Yuv, 6, 4, &[8, 8, 8], &I420_PLANES);

/// Y+A, U and V planes, 4:2:0 sub sampling, 8 bits per sample
pub const YUVA420P: PixelFormat = planar(PixelType::Yuva, 10, 4, &[8, 8, 8, 8], &I420A_PLANES);

/// Y, U and V planes, 4:2:2 sub sampling, 8 bits per sample
pub const YUV422P: PixelFormat = planar(PixelType::Yuv, 4, 2, &[8, 8, 8], &I422_PLANES);

/// Y+A, U and V planes, 4:2:2 sub sampling, 8 bits per sample
pub const YUVA422P: PixelFormat = planar(PixelType::Yuva, 6, 2, &[8, 8, 8, 8], &I422A_PLANES);

/// Y, U and V planes, 4:4:4 sub sampling, 8 bits per sample
pub const YUV444P: PixelFormat = planar(PixelType::Yuv, 3, 1, &[8, 8, 8], &I444_PLANES);

/// Y+A, U and V planes, 4:4:4 sub sampling, 8 bits per sample
pub const YUVA444P: PixelFormat = planar(PixelType::Yuva, 4, 1, &[8, 8, 8, 8], &I444A_PLANES);

/// Tag naming every entry of the format catalog
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormatId {
    R8,
    RG8,
    R16,
    RG16,
    R32F,
    RG32F,
    R64F,
    RG64F,
    RGB8,
    RGBA8,
    BGR8,
    BGRA8,
    RGB16,
    RGBA16,
    BGR16,
    BGRA16,
    RGB32F,
    RGBA32F,
    BGR32F,
    BGRA32F,
    RGB64F,
    RGBA64F,
    BGR64F,
    BGRA64F,
    GREY8,
    GREY16,
    GREY32F,
    GREY64F,
    STENCIL8,
    GREY_STENCIL_16_8,
    GREY_STENCIL_24_8,
    GREY_STENCIL_32F_8,
    YUV420P,
    YUVA420P,
    YUV422P,
    YUVA422P,
    YUV444P,
    YUVA444P,
}

impl FormatId {
    /// The format descriptor behind the tag
    pub fn format(self) -> &'static PixelFormat {
        match self {
            Self::R8 => &R8,
            Self::RG8 => &RG8,
            Self::R16 => &R16,
            Self::RG16 => &RG16,
            Self::R32F => &R32F,
            Self::RG32F => &RG32F,
            Self::R64F => &R64F,
            Self::RG64F => &RG64F,
            Self::RGB8 => &RGB8,
            Self::RGBA8 => &RGBA8,
            Self::BGR8 => &BGR8,
            Self::BGRA8 => &BGRA8,
            Self::RGB16 => &RGB16,
            Self::RGBA16 => &RGBA16,
            Self::BGR16 => &BGR16,
            Self::BGRA16 => &BGRA16,
            Self::RGB32F => &RGB32F,
            Self::RGBA32F => &RGBA32F,
            Self::BGR32F => &BGR32F,
            Self::BGRA32F => &BGRA32F,
            Self::RGB64F => &RGB64F,
            Self::RGBA64F => &RGBA64F,
            Self::BGR64F => &BGR64F,
            Self::BGRA64F => &BGRA64F,
            Self::GREY8 => &GREY8,
            Self::GREY16 => &GREY16,
            Self::GREY32F => &GREY32F,
            Self::GREY64F => &GREY64F,
            Self::STENCIL8 => &STENCIL8,
            Self::GREY_STENCIL_16_8 => &GREY_STENCIL_16_8,
            Self::GREY_STENCIL_24_8 => &GREY_STENCIL_24_8,
            Self::GREY_STENCIL_32F_8 => &GREY_STENCIL_32F_8,
            Self::YUV420P => &YUV420P,
            Self::YUVA420P => &YUVA420P,
            Self::YUV422P => &YUV422P,
            Self::YUVA422P => &YUVA422P,
            Self::YUV444P => &YUV444P,
            Self::YUVA444P => &YUVA444P,
        }
    }

    pub fn variants() -> impl IntoIterator<Item = Self> {
        [
            Self::R8,
            Self::RG8,
            Self::R16,
            Self::RG16,
            Self::R32F,
            Self::RG32F,
            Self::R64F,
            Self::RG64F,
            Self::RGB8,
            Self::RGBA8,
            Self::BGR8,
            Self::BGRA8,
            Self::RGB16,
            Self::RGBA16,
            Self::BGR16,
            Self::BGRA16,
            Self::RGB32F,
            Self::RGBA32F,
            Self::BGR32F,
            Self::BGRA32F,
            Self::RGB64F,
            Self::RGBA64F,
            Self::BGR64F,
            Self::BGRA64F,
            Self::GREY8,
            Self::GREY16,
            Self::GREY32F,
            Self::GREY64F,
            Self::STENCIL8,
            Self::GREY_STENCIL_16_8,
            Self::GREY_STENCIL_24_8,
            Self::GREY_STENCIL_32F_8,
            Self::YUV420P,
            Self::YUVA420P,
            Self::YUV422P,
            Self::YUVA422P,
            Self::YUV444P,
            Self::YUVA444P,
        ]
    }
}
