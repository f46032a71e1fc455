use crate::catalog::{RGB8, RGBA8, YUV444P};
use crate::pixel::{ReaderRgba, ReaderYuv, RgbaPixel, WriterRgba, WriterYuv, YuvPixel};
use crate::planes::read_planes;
use crate::{Image, PixelFormat};

pub(crate) mod rows;
mod transform;

pub use transform::{rgb_to_yuv, yuv_to_rgb};

/// Conversions between 8 bit packed RGB(A) and YUV 4:4:4 which work directly on the plane rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FastPath {
    RgbToYuv444 { channels: usize },
    Yuv444ToRgb { channels: usize },
}

impl FastPath {
    pub(crate) fn select(src: &PixelFormat, dest: &PixelFormat) -> Option<Self> {
        let rgb_channels = |format: &PixelFormat| {
            if *format == RGBA8 {
                Some(4)
            } else if *format == RGB8 {
                Some(3)
            } else {
                None
            }
        };

        if *dest == YUV444P {
            rgb_channels(src).map(|channels| FastPath::RgbToYuv444 { channels })
        } else if *src == YUV444P {
            rgb_channels(dest).map(|channels| FastPath::Yuv444ToRgb { channels })
        } else {
            None
        }
    }

    fn run<S, D>(self, src: &Image<S>, dest: &mut Image<D>)
    where
        S: AsRef<[u8]>,
        D: AsRef<[u8]> + AsMut<[u8]>,
    {
        let size = src.size();

        if size.width == 0 || size.height == 0 {
            return;
        }

        match self {
            FastPath::RgbToYuv444 { channels } => {
                let src_step = src.steps()[0];
                let Some([(y, y_step), (u, u_step), (v, v_step)]) = read_planes(dest.planes_mut())
                else {
                    return;
                };

                let lines = src
                    .buffer()
                    .chunks(src_step)
                    .zip(y.chunks_mut(y_step))
                    .zip(u.chunks_mut(u_step))
                    .zip(v.chunks_mut(v_step))
                    .take(size.height);

                for (((src, y), u), v) in lines {
                    rows::rgb_to_yuv444_row(channels, size.width, src, [y, u, v]);
                }
            }
            FastPath::Yuv444ToRgb { channels } => {
                let dest_step = dest.steps()[0];
                let Some([(y, y_step), (u, u_step), (v, v_step)]) = read_planes(src.planes())
                else {
                    return;
                };

                let lines = y
                    .chunks(y_step)
                    .zip(u.chunks(u_step))
                    .zip(v.chunks(v_step))
                    .zip(dest.buffer_mut().chunks_mut(dest_step))
                    .take(size.height);

                for (((y, u), v), dest) in lines {
                    rows::yuv444_to_rgb_row(channels, size.width, [y, u, v], dest);
                }
            }
        }
    }
}

/// Convert `src` into the format of `dest`, both images must have the same size.
///
/// 8 bit RGB and RGBA to and from YUV 4:4:4 take a direct path over the plane rows. Every other
/// pair of an RGB family format (RGB, RGBA, BGR, BGRA) and a YUV family format is converted pixel by
/// pixel through a reader and writer, carrying alpha through.
///
/// Returns false if no conversion between the two formats exists, `dest` is left untouched.
#[inline(never)]
pub fn color_convert<S, D>(src: &Image<S>, dest: &mut Image<D>) -> bool
where
    S: AsRef<[u8]>,
    D: AsRef<[u8]> + AsMut<[u8]>,
{
    debug_assert_eq!(src.size(), dest.size());

    if let Some(path) = FastPath::select(src.format(), dest.format()) {
        tracing::trace!(?path, "converting over plane rows");

        path.run(src, dest);
        return true;
    }

    let src_type = src.format().pixel_type;
    let dest_type = dest.format().pixel_type;

    if src_type.is_rgb_family() && dest_type.is_yuv_family() {
        rgb_to_yuv_pixels(src, dest);
        return true;
    }

    if src_type.is_yuv_family() && dest_type.is_rgb_family() {
        yuv_to_rgb_pixels(src, dest);
        return true;
    }

    tracing::debug!(
        src = ?src.format().id(),
        dest = ?dest.format().id(),
        "no conversion available"
    );

    false
}

fn rgb_to_yuv_pixels<S, D>(src: &Image<S>, dest: &mut Image<D>)
where
    S: AsRef<[u8]>,
    D: AsRef<[u8]> + AsMut<[u8]>,
{
    let mut writer = WriterYuv::<u8>::new(dest);

    for RgbaPixel { r, g, b, a } in ReaderRgba::<u8>::new(src) {
        let (y, u, v) = rgb_to_yuv(r, g, b);

        if !writer.next(&YuvPixel { y, u, v, a }) {
            break;
        }
    }
}

fn yuv_to_rgb_pixels<S, D>(src: &Image<S>, dest: &mut Image<D>)
where
    S: AsRef<[u8]>,
    D: AsRef<[u8]> + AsMut<[u8]>,
{
    let mut writer = WriterRgba::<u8>::new(dest);

    for YuvPixel { y, u, v, a } in ReaderYuv::<u8>::new(src) {
        let (r, g, b) = yuv_to_rgb(y, u, v);

        if !writer.next(&RgbaPixel { r, g, b, a }) {
            break;
        }
    }
}

/// Copy the rows of the first plane of `src` into `dest` in reverse vertical order.
///
/// Both images must have equal metadata. Planes after the first are not touched.
pub fn flip_y<S, D>(src: &Image<S>, dest: &mut Image<D>)
where
    S: AsRef<[u8]>,
    D: AsRef<[u8]> + AsMut<[u8]>,
{
    debug_assert_eq!(src.meta(), dest.meta());

    let step = src.steps()[0];
    let len = src.meta().plane_len(0);

    if step == 0 {
        return;
    }

    let src_rows = src.buffer()[..len].chunks_exact(step);
    let dest_rows = dest.buffer_mut()[..len].chunks_exact_mut(step).rev();

    for (src, dest) in src_rows.zip(dest_rows) {
        dest.copy_from_slice(src);
    }
}
