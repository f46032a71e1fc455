//! Packed and planar pixel formats with bit exact pixel access and RGB/YUV conversion
//!
//! Every supported format is a constant [`PixelFormat`] in the catalog, named by [`FormatId`].
//! An [`Image`] owns a buffer laid out as described by its [`ImageMetaData`]. [`Reader`] and
//! [`Writer`] access the raw channels of any format, [`ReaderRgba`], [`ReaderYuv`], [`WriterRgba`]
//! and [`WriterYuv`] through a semantic view. [`color_convert`] converts between the RGB and YUV
//! families.

pub use addressing::{
    PixelOffset, Point, interpreted_plane_img_size, interpreted_point, plane_pixel_address,
    plane_start_address,
};
pub use bits::{Word, create_bit_mask, get_data_masked, write_data_masked};
pub use catalog::*;
#[cfg(feature = "codec")]
pub use codec::{CodecError, ContainerFormat, decode, encode, read_image, write_image};
pub use convert::{color_convert, flip_y, rgb_to_yuv, yuv_to_rgb};
pub use container::{Image, ImageError, ImageMetaData, ImageSize, assign, memory_aligned_step};
#[cfg(feature = "multi-thread")]
pub use multi_thread::color_convert_multi_thread;
pub use pixel::{
    Interpreter, PixelData, Reader, ReaderRgba, ReaderYuv, RgbaInterpreter, RgbaPixel,
    TypedReader, TypedWriter, Writer, WriterRgba, WriterYuv, YuvInterpreter, YuvPixel,
};
pub use pixel_format::{Layout, MAX_CHANNELS, PixelFormat, PixelType, Planar, Plane, Ratio};
pub use planes::AnySlice;
pub use primitive::Primitive;

pub(crate) use util::StrictApi;

mod addressing;
mod bits;
mod catalog;
#[cfg(feature = "codec")]
mod codec;
mod container;
mod convert;
#[cfg(feature = "multi-thread")]
mod multi_thread;
mod pixel;
mod pixel_format;
mod planes;
mod primitive;
mod util;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_format_creates_a_valid_image() {
        let size = ImageSize::new(18, 10);

        for id in FormatId::variants() {
            let format = *id.format();
            let image = Image::create(size, format);

            assert_eq!(image.buffer().len(), format.buffer_size(size), "{id:?}");
            assert_eq!(image.buffer().len(), image.meta().buffer_size(), "{id:?}");

            let last = Point::new(size.width - 1, size.height - 1);
            let pixel = Reader::<u64>::new(&image).at(last);

            assert_eq!(pixel.len(), format.channel_count(), "{id:?}");
            assert!(pixel.iter().all(|&v| v == 0), "{id:?}");
        }
    }

    #[test]
    fn every_format_round_trips_through_reader_and_writer() {
        let size = ImageSize::new(5, 4);

        for id in FormatId::variants() {
            let format = *id.format();
            let mut image = Image::create(size, format);

            let value: PixelData<u8> = (1..=format.channel_count() as u8).map(|v| v * 17).collect();
            Writer::<u8>::new(&mut image).at(&value, Point::new(2, 2));

            let read = Reader::<u8>::new(&image).at(Point::new(2, 2));
            assert_eq!(read, value, "{id:?}");
        }
    }
}
