use crate::primitive::{Primitive, PrimitiveInternal};

/// Convert an RGB triple to full range 8 bit YUV.
///
/// Samples wider than 8 bit are truncated to their 8 most significant bits first.
#[inline(always)]
pub fn rgb_to_yuv<T: Primitive>(r: T, g: T, b: T) -> (u8, u8, u8) {
    let r = i32::from(r.to_u8_range());
    let g = i32::from(g.to_u8_range());
    let b = i32::from(b.to_u8_range());

    let y = (77 * r + 150 * g + 29 * b + 128) >> 8;
    let u = ((-43 * r - 84 * g + 127 * b + 128) >> 8) + 128;
    let v = ((127 * r - 106 * g - 21 * b + 128) >> 8) + 128;

    (clamp_u8(y), clamp_u8(u), clamp_u8(v))
}

/// Convert full range 8 bit YUV to an RGB triple.
///
/// The result is computed in the 8 bit range and placed in the most significant bits of `T`.
#[inline(always)]
pub fn yuv_to_rgb<T: Primitive>(y: u8, u: u8, v: u8) -> (T, T, T) {
    let y = f64::from(y);
    let u = f64::from(u) - 128.0;
    let v = f64::from(v) - 128.0;

    let r = y + 1.370705 * v;
    let g = y - 0.698001 * v - 0.337633 * u;
    let b = y + 1.732446 * u;

    (channel(r), channel(g), channel(b))
}

#[inline(always)]
fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

#[inline(always)]
fn channel<T: Primitive>(v: f64) -> T {
    T::from_u8_range(v.clamp(0.0, 255.0) as u8)
}
