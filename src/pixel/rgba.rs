use super::{ChannelMap, Interpreter, PixelData, RgbaPixel};
use crate::primitive::Primitive;
use crate::{PixelFormat, PixelType};

/// Interprets raw samples as red, green, blue and alpha.
///
/// BGR(A) channels are reordered, grey and stencil values are replicated into all three colors.
/// The stencil of grey and stencil formats is not part of the view, writes leave it untouched.
/// YUV formats are not converted, luma and chroma read as red, green and blue. YUVA alpha maps
/// onto alpha. Formats without an alpha channel read as fully opaque. On write, a raw channel
/// shared by several fields takes the value of the first one.
#[derive(Debug, Clone, Copy)]
pub struct RgbaInterpreter {
    map: ChannelMap,
}

impl Interpreter for RgbaInterpreter {
    type Pixel<T: Primitive> = RgbaPixel<T>;

    fn new(format: &PixelFormat) -> Self {
        let map = match format.pixel_type {
            PixelType::Bgr => ChannelMap::new(format, [Some(2), Some(1), Some(0), None]),
            PixelType::Bgra => ChannelMap::new(format, [Some(2), Some(1), Some(0), Some(3)]),
            PixelType::Grey | PixelType::Stencil | PixelType::GreyStencil => {
                ChannelMap::new(format, [Some(0), Some(0), Some(0), None])
            }
            PixelType::Yuva => ChannelMap::new(format, [Some(0), Some(2), Some(3), Some(1)]),
            PixelType::R
            | PixelType::Rg
            | PixelType::Rgb
            | PixelType::Rgba
            | PixelType::Yuv => ChannelMap::positional(format),
        };

        Self { map }
    }

    #[inline]
    fn interpret<T: Primitive>(&self, raw: &PixelData<u64>) -> RgbaPixel<T> {
        let [r, g, b, a] = self.map.read(raw);

        RgbaPixel { r, g, b, a }
    }

    #[inline]
    fn raw<T: Primitive>(&self, pixel: &RgbaPixel<T>) -> PixelData<u64> {
        self.map.write([pixel.r, pixel.g, pixel.b, pixel.a])
    }

    #[inline]
    fn is_mapped(&self, channel: usize) -> bool {
        self.map.is_mapped(channel)
    }
}
