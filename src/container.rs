use crate::planes::split_planes;
use crate::{PixelFormat, StrictApi as _, plane_start_address};

/// Width and height of an image in pixels
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageSize {
    pub width: usize,
    pub height: usize,
}

impl ImageSize {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

/// Everything that can go wrong when constructing an image or copying into one
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("got invalid number of row steps, expected {expected} (one per plane) but got {got}")]
    InvalidNumberOfSteps { expected: usize, got: usize },

    #[error("invalid row step at plane {plane}, expected it to be at least {minimum}, but got {got}")]
    InvalidStep {
        plane: usize,
        minimum: usize,
        got: usize,
    },

    #[error("buffer too small, expected it to be at least {minimum} bytes, but got {got}")]
    InvalidBufferSize { minimum: usize, got: usize },
}

/// Round `row_bits` up to the next multiple of `alignment_bits` and return the row step in bytes.
///
/// An alignment of zero is treated as byte alignment.
#[deny(clippy::arithmetic_side_effects)]
pub fn memory_aligned_step(row_bits: usize, alignment_bits: u32) -> usize {
    let alignment = match alignment_bits {
        0 => 8,
        n => n as usize,
    };

    row_bits.next_multiple_of(alignment).div_ceil(8)
}

/// Size, format and per plane row steps of an image.
///
/// Immutable after construction, the steps are guaranteed to be large enough for the format and width.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageMetaData {
    size: ImageSize,
    format: PixelFormat,
    steps: Vec<usize>,
}

impl ImageMetaData {
    /// Create the metadata, computing the minimal row steps if `steps` is `None`.
    ///
    /// Given steps are validated against the format's minimum, never adjusted.
    pub fn new(
        size: ImageSize,
        format: PixelFormat,
        steps: Option<Vec<usize>>,
    ) -> Result<Self, ImageError> {
        let minimum = format.packed_steps(size.width);

        let steps = match steps {
            None => minimum,
            Some(steps) => {
                if steps.len() != minimum.len() {
                    return Err(ImageError::InvalidNumberOfSteps {
                        expected: minimum.len(),
                        got: steps.len(),
                    });
                }

                for (plane, (&got, &minimum)) in steps.iter().zip(&minimum).enumerate() {
                    if got < minimum {
                        return Err(ImageError::InvalidStep {
                            plane,
                            minimum,
                            got,
                        });
                    }
                }

                steps
            }
        };

        Ok(Self {
            size,
            format,
            steps,
        })
    }

    /// Metadata with the minimal row steps for `format`
    pub fn packed(size: ImageSize, format: PixelFormat) -> Self {
        Self {
            size,
            format,
            steps: format.packed_steps(size.width),
        }
    }

    pub fn size(&self) -> ImageSize {
        self.size
    }

    pub fn format(&self) -> &PixelFormat {
        &self.format
    }

    /// Row step in bytes of every plane
    pub fn steps(&self) -> &[usize] {
        &self.steps
    }

    /// Height in rows of `plane`
    pub fn plane_height(&self, plane: usize) -> usize {
        if self.format.is_planar() {
            self.format.planes[plane].height_ratio.scale(self.size.height)
        } else {
            self.size.height
        }
    }

    /// Number of bytes occupied by `plane`
    pub fn plane_len(&self, plane: usize) -> usize {
        self.steps[plane].strict_mul_(self.plane_height(plane))
    }

    /// Number of bytes required to hold every plane of the image
    pub fn buffer_size(&self) -> usize {
        (0..self.steps.len()).fold(0, |size, plane| size.strict_add_(self.plane_len(plane)))
    }
}

/// Owns an image buffer and the metadata describing its layout.
///
/// Planes are stored back to back, plane N starts directly after the last row of plane N-1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image<S = Vec<u8>> {
    meta: ImageMetaData,
    buffer: S,
}

impl Image<Vec<u8>> {
    /// Allocate a zeroed image with minimal row steps
    pub fn create(size: ImageSize, format: PixelFormat) -> Self {
        Self::blank(ImageMetaData::packed(size, format))
    }

    /// Allocate a zeroed image with the given row steps
    pub fn create_with_steps(
        size: ImageSize,
        format: PixelFormat,
        steps: Vec<usize>,
    ) -> Result<Self, ImageError> {
        Ok(Self::blank(ImageMetaData::new(size, format, Some(steps))?))
    }

    /// Allocate a zeroed image for the given metadata
    pub fn blank(meta: ImageMetaData) -> Self {
        Self {
            buffer: vec![0u8; meta.buffer_size()],
            meta,
        }
    }
}

impl<S: AsRef<[u8]>> Image<S> {
    /// Wrap an existing buffer, which must be large enough for every plane described by `meta`
    pub fn from_buffer(meta: ImageMetaData, buffer: S) -> Result<Self, ImageError> {
        let minimum = meta.buffer_size();
        let got = buffer.as_ref().len();

        if got < minimum {
            return Err(ImageError::InvalidBufferSize { minimum, got });
        }

        Ok(Self { meta, buffer })
    }

    pub fn meta(&self) -> &ImageMetaData {
        &self.meta
    }

    pub fn size(&self) -> ImageSize {
        self.meta.size
    }

    pub fn format(&self) -> &PixelFormat {
        &self.meta.format
    }

    pub fn steps(&self) -> &[usize] {
        &self.meta.steps
    }

    pub fn buffer(&self) -> &[u8] {
        self.buffer.as_ref()
    }

    pub fn into_buffer(self) -> S {
        self.buffer
    }

    /// Byte offset of the first row of `plane` inside the buffer
    pub fn plane_start_address(&self, plane: usize) -> usize {
        plane_start_address(&self.meta, plane)
    }

    /// Returns an iterator yielding every plane with its associated row step
    pub fn planes(&self) -> impl Iterator<Item = (&[u8], usize)> + '_ {
        split_planes(&self.meta, self.buffer.as_ref())
    }
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> Image<S> {
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        self.buffer.as_mut()
    }

    /// Returns an iterator yielding every plane mutably with its associated row step
    pub fn planes_mut(&mut self) -> impl Iterator<Item = (&mut [u8], usize)> + '_ {
        split_planes(&self.meta, self.buffer.as_mut())
    }

    /// Borrow metadata and buffer at the same time
    pub(crate) fn parts_mut(&mut self) -> (&ImageMetaData, &mut [u8]) {
        (&self.meta, self.buffer.as_mut())
    }
}

/// Copy `size.height` rows from a foreign buffer into `dest`.
///
/// Rows are copied as a single block when both steps are equal, otherwise row by row copying
/// `min(src_step, dest_step)` bytes of each row.
#[deny(clippy::arithmetic_side_effects)]
pub fn assign(
    size: ImageSize,
    src_step: usize,
    src: &[u8],
    dest_step: usize,
    dest: &mut [u8],
) -> Result<(), ImageError> {
    let dest_minimum = size.height.strict_mul_(dest_step);

    if dest.len() < dest_minimum {
        return Err(ImageError::InvalidBufferSize {
            minimum: dest_minimum,
            got: dest.len(),
        });
    }

    if src_step == dest_step {
        let n = size.height.strict_mul_(src_step);

        if src.len() < n {
            return Err(ImageError::InvalidBufferSize {
                minimum: n,
                got: src.len(),
            });
        }

        dest[..n].copy_from_slice(&src[..n]);

        return Ok(());
    }

    let n = src_step.min(dest_step);

    // The last row doesn't need to carry its padding
    let src_minimum = match size.height.checked_sub(1) {
        Some(rows) => rows.strict_mul_(src_step).strict_add_(n),
        None => 0,
    };

    if src.len() < src_minimum {
        return Err(ImageError::InvalidBufferSize {
            minimum: src_minimum,
            got: src.len(),
        });
    }

    for y in 0..size.height {
        let src_start = y.strict_mul_(src_step);
        let dest_start = y.strict_mul_(dest_step);

        dest[dest_start..dest_start.strict_add_(n)]
            .copy_from_slice(&src[src_start..src_start.strict_add_(n)]);
    }

    Ok(())
}
