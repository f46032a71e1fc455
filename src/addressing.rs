//! Resolution of pixel coordinates into byte and bit offsets inside an image buffer

use crate::{ImageMetaData, ImageSize, StrictApi as _};

/// Pixel coordinate, x grows to the right and y downwards
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Location of a pixel inside a plane, relative to the start of the image buffer
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelOffset {
    pub address: usize,
    /// Residual bit offset inside the byte at `address`, always in `0..8`
    pub bit_offset: u32,
}

impl PixelOffset {
    /// Offset in bits from the start of the buffer
    pub fn bits(&self) -> usize {
        self.address.strict_mul_(8).strict_add_(self.bit_offset as usize)
    }
}

/// Map an image coordinate onto the coordinate space of `plane`.
///
/// Planar formats scale the point by the plane's ratios, truncating. Packed formats return `pt`.
pub fn interpreted_point(pt: Point, meta: &ImageMetaData, plane: usize) -> Point {
    let format = meta.format();

    if !format.is_planar() {
        return pt;
    }

    let plane = &format.planes[plane];

    Point {
        x: plane.width_ratio.scale(pt.x),
        y: plane.height_ratio.scale(pt.y),
    }
}

/// Size of `plane` in pixels
pub fn interpreted_plane_img_size(meta: &ImageMetaData, plane: usize) -> ImageSize {
    let size = meta.size();
    let Point { x, y } = interpreted_point(Point::new(size.width, size.height), meta, plane);

    ImageSize::new(x, y)
}

/// Byte offset of the first row of `plane` from the start of the buffer
pub fn plane_start_address(meta: &ImageMetaData, plane: usize) -> usize {
    (0..plane).fold(0, |start, prev| start.strict_add_(meta.plane_len(prev)))
}

/// Resolve the location of the pixel at `pt` in `plane`
pub fn plane_pixel_address(pt: Point, meta: &ImageMetaData, plane: usize) -> PixelOffset {
    plane_pixel_address_from(pt, meta, plane, plane_start_address(meta, plane))
}

/// [`plane_pixel_address`] with the start address of the plane already known
#[inline]
pub(crate) fn plane_pixel_address_from(
    pt: Point,
    meta: &ImageMetaData,
    plane: usize,
    plane_start: usize,
) -> PixelOffset {
    let format = meta.format();

    if !format.is_planar() {
        let layout = format.layout;

        let row = meta.steps()[0].strict_mul_(pt.y);
        let column = pt.x.strict_mul_(layout.bytes as usize) / layout.group_pixels as usize;

        return PixelOffset {
            address: row.strict_add_(column),
            bit_offset: 0,
        };
    }

    let scaled = interpreted_point(pt, meta, plane);
    let column_bits = scaled.x.strict_mul_(format.plane_pixel_bits(plane));

    PixelOffset {
        address: plane_start
            .strict_add_(meta.steps()[plane].strict_mul_(scaled.y))
            .strict_add_(column_bits / 8),
        bit_offset: (column_bits % 8) as u32,
    }
}
