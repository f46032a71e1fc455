use super::{Interpreter, PixelData};
use crate::addressing::{Point, plane_pixel_address_from};
use crate::bits::write_data_masked;
use crate::primitive::Primitive;
use crate::{Image, ImageMetaData, plane_start_address};
use std::marker::PhantomData;

/// Writes raw channel samples of any format from `T`.
///
/// Samples are expected right aligned. When a channel is wider than `T` the sample is stored in the
/// channel's most significant bits and the remaining low bits are cleared.
#[derive(Debug)]
pub struct Writer<'a, T> {
    meta: &'a ImageMetaData,
    buffer: &'a mut [u8],
    plane_starts: Vec<usize>,
    cursor: Point,
    _m: PhantomData<T>,
}

impl<'a, T: Primitive> Writer<'a, T> {
    pub fn new<S: AsRef<[u8]> + AsMut<[u8]>>(image: &'a mut Image<S>) -> Self {
        let (meta, buffer) = image.parts_mut();

        Self::from_parts(meta, buffer)
    }

    pub(crate) fn from_parts(meta: &'a ImageMetaData, buffer: &'a mut [u8]) -> Self {
        let plane_starts = (0..meta.format().plane_count())
            .map(|plane| plane_start_address(meta, plane))
            .collect();

        Self {
            meta,
            buffer,
            plane_starts,
            cursor: Point::default(),
            _m: PhantomData,
        }
    }

    /// Write `value` to the pixel at `pt`, which must lie inside the image.
    ///
    /// `value` must hold one sample per channel of the format.
    pub fn at(&mut self, value: &PixelData<T>, pt: Point) {
        self.write_channels(value, pt, |_| true);
    }

    /// Write `value` at the cursor and advance it in row major order.
    ///
    /// Returns false without writing once every pixel has been written, until [`Writer::reset`] is called.
    pub fn next(&mut self, value: &PixelData<T>) -> bool {
        self.next_channels(value, |_| true)
    }

    /// Write the channels of `value` for which `keep` holds, the others stay untouched
    pub(crate) fn write_channels(
        &mut self,
        value: &PixelData<T>,
        pt: Point,
        keep: impl Fn(usize) -> bool,
    ) {
        let format = self.meta.format();

        debug_assert_eq!(value.len(), format.channel_count());

        for (plane, &start) in self.plane_starts.iter().enumerate() {
            let mut bit = plane_pixel_address_from(pt, self.meta, plane, start).bits();

            for channel in format.plane_channels(plane) {
                let depth = format.channel_bits(channel);

                if keep(channel) {
                    write_channel(self.buffer, bit, depth, value[channel]);
                }

                bit += depth as usize;
            }
        }
    }

    pub(crate) fn next_channels(
        &mut self,
        value: &PixelData<T>,
        keep: impl Fn(usize) -> bool,
    ) -> bool {
        let size = self.meta.size();

        if self.cursor.y >= size.height || size.width == 0 {
            return false;
        }

        self.write_channels(value, self.cursor, keep);

        self.cursor.x += 1;
        if self.cursor.x >= size.width {
            self.cursor.x = 0;
            self.cursor.y += 1;
        }

        true
    }

    /// Rewind to the first pixel
    pub fn reset(&mut self) {
        self.cursor = Point::default();
    }
}

#[inline(always)]
fn write_channel<T: Primitive>(buffer: &mut [u8], bit: usize, depth: u32, value: T) {
    if depth > T::BITS {
        let low = depth - T::BITS;

        write_data_masked(buffer, bit, low, 0u64);
        write_data_masked(buffer, bit + low as usize, T::BITS, value);
    } else {
        write_data_masked(buffer, bit, depth, value);
    }
}

/// [`Writer`] which accepts pixels as seen through the interpreter `I`.
///
/// Channels the interpreter does not map a field onto keep their previous contents.
#[derive(Debug)]
pub struct TypedWriter<'a, T, I> {
    writer: Writer<'a, u64>,
    interpreter: I,
    _m: PhantomData<T>,
}

impl<'a, T: Primitive, I: Interpreter> TypedWriter<'a, T, I> {
    pub fn new<S: AsRef<[u8]> + AsMut<[u8]>>(image: &'a mut Image<S>) -> Self {
        let interpreter = I::new(image.format());

        Self {
            writer: Writer::new(image),
            interpreter,
            _m: PhantomData,
        }
    }

    pub fn at(&mut self, pixel: &I::Pixel<T>, pt: Point) {
        let raw = self.interpreter.raw(pixel);
        let interpreter = &self.interpreter;

        self.writer
            .write_channels(&raw, pt, |channel| interpreter.is_mapped(channel));
    }

    pub fn next(&mut self, pixel: &I::Pixel<T>) -> bool {
        let raw = self.interpreter.raw(pixel);
        let interpreter = &self.interpreter;

        self.writer
            .next_channels(&raw, |channel| interpreter.is_mapped(channel))
    }

    pub fn reset(&mut self) {
        self.writer.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::*;
    use crate::pixel::{Reader, ReaderYuv, RgbaPixel, WriterRgba, WriterYuv, YuvPixel};
    use crate::{ImageSize, PixelFormat};

    #[test]
    fn rgba8_at() {
        let mut image = Image::create(ImageSize::new(2, 2), RGBA8);

        let mut writer = Writer::<u8>::new(&mut image);
        writer.at(&PixelData::from_slice(&[1, 2, 3, 4]), Point::new(1, 1));

        assert_eq!(&image.buffer()[12..], &[1, 2, 3, 4]);
        assert!(image.buffer()[..12].iter().all(|&b| b == 0));
    }

    #[test]
    fn next_fills_every_pixel_once() {
        let mut image = Image::create(ImageSize::new(3, 2), GREY8);

        let mut writer = Writer::<u8>::new(&mut image);
        let mut value = 0;

        while writer.next(&PixelData::from_slice(&[value])) {
            value += 1;
        }

        assert_eq!(value, 6);
        assert!(!writer.next(&PixelData::from_slice(&[0xFF])));

        writer.reset();
        assert!(writer.next(&PixelData::from_slice(&[42])));

        assert_eq!(image.buffer(), &[42, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn wide_channel_clears_low_bits() {
        let mut image = Image::from_buffer(
            crate::ImageMetaData::packed(ImageSize::new(1, 1), RGB16),
            vec![0xFF; 6],
        )
        .unwrap();

        let mut writer = Writer::<u8>::new(&mut image);
        writer.at(&PixelData::from_slice(&[0x12, 0x34, 0x56]), Point::new(0, 0));

        assert_eq!(image.buffer(), &[0x00, 0x12, 0x00, 0x34, 0x00, 0x56]);
    }

    #[test]
    fn bgra_reorder_on_write() {
        let mut image = Image::create(ImageSize::new(1, 1), BGRA8);

        WriterRgba::<u8>::new(&mut image).at(
            &RgbaPixel {
                r: 1,
                g: 2,
                b: 3,
                a: 4,
            },
            Point::new(0, 0),
        );

        assert_eq!(image.buffer(), &[3, 2, 1, 4]);
    }

    #[test]
    fn rgba_u16_into_rgb8() {
        let mut image = Image::create(ImageSize::new(1, 1), RGB8);

        WriterRgba::<u16>::new(&mut image).at(
            &RgbaPixel {
                r: 0x12FF,
                g: 0x3400,
                b: 0xFF00,
                a: 0,
            },
            Point::new(0, 0),
        );

        assert_eq!(image.buffer(), &[0x12, 0x34, 0xFF]);
    }

    #[test]
    fn f64_into_float32_channels() {
        let mut image = Image::create(ImageSize::new(1, 1), RGBA32F);

        WriterRgba::<f64>::new(&mut image).at(
            &RgbaPixel {
                r: 0.5,
                g: 0.25,
                b: 2.0,
                a: 1.0,
            },
            Point::new(0, 0),
        );

        let expected: Vec<u8> = [0.5f32, 0.25, 2.0, 1.0]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();

        assert_eq!(image.buffer(), &expected[..]);
    }

    #[test]
    fn f32_into_float64_channels() {
        let mut image = Image::create(ImageSize::new(1, 1), RGBA64F);

        WriterRgba::<f32>::new(&mut image).at(
            &RgbaPixel {
                r: 0.5,
                g: 0.25,
                b: 0.75,
                a: 1.0,
            },
            Point::new(0, 0),
        );

        let expected: Vec<u8> = [0.5f64, 0.25, 0.75, 1.0]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();

        assert_eq!(image.buffer(), &expected[..]);
    }

    #[test]
    fn u8_into_float_channels() {
        let mut image = Image::create(ImageSize::new(1, 1), RGB32F);

        WriterRgba::<u8>::new(&mut image).at(
            &RgbaPixel {
                r: 255,
                g: 0,
                b: 51,
                a: 0,
            },
            Point::new(0, 0),
        );

        let values: Vec<f32> = image
            .buffer()
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();

        assert_eq!(values, [1.0, 0.0, 0.2]);
    }

    #[test]
    fn unmapped_channels_are_kept() {
        let mut image = Image::create(ImageSize::new(1, 1), GREY_STENCIL_24_8);
        Writer::<u32>::new(&mut image).at(&PixelData::from_slice(&[0, 0x5A]), Point::new(0, 0));

        WriterRgba::<u8>::new(&mut image).at(
            &RgbaPixel {
                r: 0xAB,
                g: 0,
                b: 0,
                a: 0,
            },
            Point::new(0, 0),
        );

        assert_eq!(image.buffer(), &[0x00, 0x00, 0xAB, 0x5A]);
    }

    #[test]
    fn yuva420_write_then_read() {
        let mut image = Image::create(ImageSize::new(2, 2), YUVA420P);

        let mut writer = WriterYuv::<u8>::new(&mut image);
        for i in 0..4 {
            assert!(writer.next(&YuvPixel {
                y: 10 + i,
                u: 128,
                v: 64,
                a: 90 + i,
            }));
        }

        assert_eq!(image.buffer(), &[10, 90, 11, 91, 12, 92, 13, 93, 128, 64]);

        let pixels: Vec<_> = ReaderYuv::<u8>::new(&image).collect();
        assert_eq!(pixels[3].y, 13);
        assert_eq!(pixels[3].a, 93);
    }

    #[test]
    fn yuv420_last_write_wins_for_chroma() {
        let mut image = Image::create(ImageSize::new(2, 2), YUV420P);

        let mut writer = WriterYuv::<u8>::new(&mut image);
        for i in 0..4 {
            writer.next(&YuvPixel {
                y: i,
                u: i * 10,
                v: i * 20,
                a: 0,
            });
        }

        assert_eq!(image.buffer(), &[0, 1, 2, 3, 30, 60]);
    }

    #[test]
    fn sub_byte_channels() {
        // Two 4 bit channels per pixel, planar with a single plane
        const GREY_STENCIL_4_4: PixelFormat = PixelFormat {
            pixel_type: crate::PixelType::GreyStencil,
            layout: crate::Layout {
                bytes: 1,
                channels: 2,
                group_pixels: 1,
                normalized: false,
            },
            planar: crate::Planar {
                channel_bits: &[4, 4],
                is_planar: true,
            },
            planes: &[crate::Plane::packed(2)],
        };

        let mut image = Image::create(ImageSize::new(2, 1), GREY_STENCIL_4_4);

        let mut writer = Writer::<u8>::new(&mut image);
        writer.next(&PixelData::from_slice(&[0xA, 0x1]));
        writer.next(&PixelData::from_slice(&[0xB, 0x2]));

        assert_eq!(image.buffer(), &[0x1A, 0x2B]);

        let reader = Reader::<u8>::new(&image);
        assert_eq!(&*reader.at(Point::new(1, 0)), &[0xB, 0x2]);
    }
}
