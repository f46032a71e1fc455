use crate::convert::{FastPath, color_convert, rows};
use crate::planes::read_planes;
use crate::Image;
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
use rayon::slice::{ParallelSlice, ParallelSliceMut};

/// Same as [`color_convert`] but converts rows in parallel where possible.
///
/// Only the direct 8 bit RGB(A) to and from YUV 4:4:4 conversions are split across threads,
/// every other pair is converted on the calling thread.
#[inline(never)]
pub fn color_convert_multi_thread<S, D>(src: &Image<S>, dest: &mut Image<D>) -> bool
where
    S: AsRef<[u8]>,
    D: AsRef<[u8]> + AsMut<[u8]>,
{
    debug_assert_eq!(src.size(), dest.size());

    let Some(path) = FastPath::select(src.format(), dest.format()) else {
        tracing::debug!("no parallel conversion, converting on the calling thread");
        return color_convert(src, dest);
    };

    if num_cpus::get() == 1 {
        tracing::debug!("single cpu, converting on the calling thread");
        return color_convert(src, dest);
    }

    let size = src.size();

    if size.width == 0 || size.height == 0 {
        return true;
    }

    match path {
        FastPath::RgbToYuv444 { channels } => {
            let src_step = src.steps()[0];
            let Some([(y, y_step), (u, u_step), (v, v_step)]) = read_planes(dest.planes_mut())
            else {
                return false;
            };

            src.buffer()
                .par_chunks(src_step)
                .zip(y.par_chunks_mut(y_step))
                .zip(u.par_chunks_mut(u_step))
                .zip(v.par_chunks_mut(v_step))
                .take(size.height)
                .for_each(|(((src, y), u), v)| {
                    rows::rgb_to_yuv444_row(channels, size.width, src, [y, u, v]);
                });
        }
        FastPath::Yuv444ToRgb { channels } => {
            let dest_step = dest.steps()[0];
            let Some([(y, y_step), (u, u_step), (v, v_step)]) = read_planes(src.planes()) else {
                return false;
            };

            y.par_chunks(y_step)
                .zip(u.par_chunks(u_step))
                .zip(v.par_chunks(v_step))
                .zip(dest.buffer_mut().par_chunks_mut(dest_step))
                .take(size.height)
                .for_each(|(((y, u), v), dest)| {
                    rows::yuv444_to_rgb_row(channels, size.width, [y, u, v], dest);
                });
        }
    }

    true
}
