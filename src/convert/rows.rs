//! Row kernels of the byte aligned 8 bit fast paths

use super::{rgb_to_yuv, yuv_to_rgb};

/// Convert `width` packed RGB(A) pixels of `src` into one row of each YUV 4:4:4 plane
#[inline]
pub(crate) fn rgb_to_yuv444_row(
    channels: usize,
    width: usize,
    src: &[u8],
    [y, u, v]: [&mut [u8]; 3],
) {
    let pixels = src[..width * channels].chunks_exact(channels);

    for (((px, y), u), v) in pixels
        .zip(&mut y[..width])
        .zip(&mut u[..width])
        .zip(&mut v[..width])
    {
        (*y, *u, *v) = rgb_to_yuv(px[0], px[1], px[2]);
    }
}

/// Convert one row of each YUV 4:4:4 plane into `width` packed RGB(A) pixels, alpha is opaque
#[inline]
pub(crate) fn yuv444_to_rgb_row(
    channels: usize,
    width: usize,
    [y, u, v]: [&[u8]; 3],
    dest: &mut [u8],
) {
    let pixels = dest[..width * channels].chunks_exact_mut(channels);

    for (((px, &y), &u), &v) in pixels.zip(&y[..width]).zip(&u[..width]).zip(&v[..width]) {
        let (r, g, b) = yuv_to_rgb::<u8>(y, u, v);

        px[..3].copy_from_slice(&[r, g, b]);

        if let Some(a) = px.get_mut(3) {
            *a = u8::MAX;
        }
    }
}
