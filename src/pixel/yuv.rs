use super::{ChannelMap, Interpreter, PixelData, YuvPixel};
use crate::primitive::Primitive;
use crate::{PixelFormat, PixelType};

/// Interprets raw samples as luma, two chroma values and alpha.
///
/// YUVA formats store luma and alpha together in the first plane, so their raw order is
/// `y, a, u, v`. YUV formats read as fully opaque. Other formats map positionally.
#[derive(Debug, Clone, Copy)]
pub struct YuvInterpreter {
    map: ChannelMap,
}

impl Interpreter for YuvInterpreter {
    type Pixel<T: Primitive> = YuvPixel<T>;

    fn new(format: &PixelFormat) -> Self {
        let map = match format.pixel_type {
            PixelType::Yuva => ChannelMap::new(format, [Some(0), Some(2), Some(3), Some(1)]),
            _ => ChannelMap::positional(format),
        };

        Self { map }
    }

    #[inline]
    fn interpret<T: Primitive>(&self, raw: &PixelData<u64>) -> YuvPixel<T> {
        let [y, u, v, a] = self.map.read(raw);

        YuvPixel { y, u, v, a }
    }

    #[inline]
    fn raw<T: Primitive>(&self, pixel: &YuvPixel<T>) -> PixelData<u64> {
        self.map.write([pixel.y, pixel.u, pixel.v, pixel.a])
    }

    #[inline]
    fn is_mapped(&self, channel: usize) -> bool {
        self.map.is_mapped(channel)
    }
}
