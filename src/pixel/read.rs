use super::{Interpreter, PixelData};
use crate::addressing::{Point, plane_pixel_address_from};
use crate::bits::get_data_masked;
use crate::primitive::Primitive;
use crate::{Image, ImageMetaData, plane_start_address};
use std::marker::PhantomData;

/// Reads raw channel samples of any format into `T`.
///
/// Samples are right aligned. A channel wider than `T` is truncated to its most significant bits.
#[derive(Debug, Clone)]
pub struct Reader<'a, T> {
    meta: &'a ImageMetaData,
    buffer: &'a [u8],
    plane_starts: Vec<usize>,
    cursor: Point,
    _m: PhantomData<T>,
}

impl<'a, T: Primitive> Reader<'a, T> {
    pub fn new<S: AsRef<[u8]>>(image: &'a Image<S>) -> Self {
        Self::from_parts(image.meta(), image.buffer())
    }

    pub(crate) fn from_parts(meta: &'a ImageMetaData, buffer: &'a [u8]) -> Self {
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

    /// Read the pixel at `pt`, which must lie inside the image
    pub fn at(&self, pt: Point) -> PixelData<T> {
        let format = self.meta.format();
        let mut pixel = PixelData::new();

        for (plane, &start) in self.plane_starts.iter().enumerate() {
            let mut bit = plane_pixel_address_from(pt, self.meta, plane, start).bits();

            for channel in format.plane_channels(plane) {
                let depth = format.channel_bits(channel);

                pixel.push(read_channel(self.buffer, bit, depth));
                bit += depth as usize;
            }
        }

        pixel
    }

    /// Rewind to the first pixel
    pub fn reset(&mut self) {
        self.cursor = Point::default();
    }
}

#[inline(always)]
fn read_channel<T: Primitive>(buffer: &[u8], bit: usize, depth: u32) -> T {
    if depth > T::BITS {
        get_data_masked(buffer, bit + (depth - T::BITS) as usize, T::BITS)
    } else {
        get_data_masked(buffer, bit, depth)
    }
}

/// Yields every pixel in row major order, then `None` until [`Reader::reset`] is called
impl<T: Primitive> Iterator for Reader<'_, T> {
    type Item = PixelData<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let size = self.meta.size();

        if self.cursor.y >= size.height || size.width == 0 {
            return None;
        }

        let pixel = self.at(self.cursor);

        self.cursor.x += 1;
        if self.cursor.x >= size.width {
            self.cursor.x = 0;
            self.cursor.y += 1;
        }

        Some(pixel)
    }
}

/// [`Reader`] which yields pixels as seen through the interpreter `I`
#[derive(Debug, Clone)]
pub struct TypedReader<'a, T, I> {
    reader: Reader<'a, u64>,
    interpreter: I,
    _m: PhantomData<T>,
}

impl<'a, T: Primitive, I: Interpreter> TypedReader<'a, T, I> {
    pub fn new<S: AsRef<[u8]>>(image: &'a Image<S>) -> Self {
        Self {
            reader: Reader::new(image),
            interpreter: I::new(image.format()),
            _m: PhantomData,
        }
    }

    pub fn at(&self, pt: Point) -> I::Pixel<T> {
        self.interpreter.interpret(&self.reader.at(pt))
    }

    pub fn reset(&mut self) {
        self.reader.reset();
    }
}

impl<T: Primitive, I: Interpreter> Iterator for TypedReader<'_, T, I> {
    type Item = I::Pixel<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = self.reader.next()?;

        Some(self.interpreter.interpret(&raw))
    }
}
