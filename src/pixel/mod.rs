//! Format agnostic pixel access
//!
//! [`Reader`] and [`Writer`] move raw channel samples ([`PixelData`]) in and out of an image of any
//! catalog format. An [`Interpreter`] turns those raw samples into a semantic view like
//! [`RgbaPixel`] or [`YuvPixel`] and back.

use crate::PixelFormat;
use crate::pixel_format::MAX_CHANNELS;
use crate::primitive::{Primitive, PrimitiveInternal};
use std::fmt;
use std::ops::{Deref, DerefMut};

mod read;
mod rgba;
mod write;
mod yuv;

pub use read::{Reader, TypedReader};
pub use rgba::RgbaInterpreter;
pub use write::{TypedWriter, Writer};
pub use yuv::YuvInterpreter;

pub type ReaderRgba<'a, T> = TypedReader<'a, T, RgbaInterpreter>;
pub type ReaderYuv<'a, T> = TypedReader<'a, T, YuvInterpreter>;
pub type WriterRgba<'a, T> = TypedWriter<'a, T, RgbaInterpreter>;
pub type WriterYuv<'a, T> = TypedWriter<'a, T, YuvInterpreter>;

/// Raw channel samples of a single pixel, in the format's plane-major channel order
#[derive(Clone, Copy)]
pub struct PixelData<T> {
    samples: [T; MAX_CHANNELS],
    len: usize,
}

impl<T: Primitive> PixelData<T> {
    pub fn new() -> Self {
        Self {
            samples: [T::default(); MAX_CHANNELS],
            len: 0,
        }
    }

    /// Zeroed samples for `len` channels
    ///
    /// # Panics
    ///
    /// If `len` exceeds [`MAX_CHANNELS`]
    pub fn zeroed(len: usize) -> Self {
        assert!(len <= MAX_CHANNELS, "a pixel has at most {MAX_CHANNELS} channels");

        Self {
            samples: [T::default(); MAX_CHANNELS],
            len,
        }
    }

    /// # Panics
    ///
    /// If `samples` holds more than [`MAX_CHANNELS`] values
    pub fn from_slice(samples: &[T]) -> Self {
        let mut data = Self::zeroed(samples.len());
        data.samples[..samples.len()].copy_from_slice(samples);
        data
    }

    /// # Panics
    ///
    /// If the pixel is already full
    pub fn push(&mut self, sample: T) {
        assert!(self.len < MAX_CHANNELS, "a pixel has at most {MAX_CHANNELS} channels");

        self.samples[self.len] = sample;
        self.len += 1;
    }
}

impl<T: Primitive> Default for PixelData<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for PixelData<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.samples[..self.len]
    }
}

impl<T> DerefMut for PixelData<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.samples[..self.len]
    }
}

impl<T: PartialEq> PartialEq for PixelData<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: fmt::Debug> fmt::Debug for PixelData<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Primitive> FromIterator<T> for PixelData<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut data = Self::new();

        for sample in iter {
            data.push(sample);
        }

        data
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RgbaPixel<T> {
    pub r: T,
    pub g: T,
    pub b: T,
    pub a: T,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct YuvPixel<T> {
    pub y: T,
    pub u: T,
    pub v: T,
    pub a: T,
}

/// Conversion between raw channel samples and a semantic pixel view.
///
/// Raw samples are the right aligned bit patterns of every channel, as produced by
/// [`Reader<u64>`](Reader). The interpreter scales them into `T` using the channel depth, and
/// reads floating point channels by value.
pub trait Interpreter {
    type Pixel<T: Primitive>: Copy;

    fn new(format: &PixelFormat) -> Self;

    fn interpret<T: Primitive>(&self, raw: &PixelData<u64>) -> Self::Pixel<T>;

    /// Raw samples of `pixel`, channels not backed by a field are zero
    fn raw<T: Primitive>(&self, pixel: &Self::Pixel<T>) -> PixelData<u64>;

    /// Whether a field of the pixel view is stored in `channel`
    fn is_mapped(&self, channel: usize) -> bool;
}

/// Maps the four fields of a pixel view onto the raw channels of a format.
///
/// Fields without a channel read as zero, except the last (alpha) field which reads as fully opaque.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ChannelMap {
    fields: [Option<usize>; 4],
    bits: [u32; MAX_CHANNELS],
    float: [bool; MAX_CHANNELS],
    channels: usize,
}

impl ChannelMap {
    pub(crate) fn new(format: &PixelFormat, fields: [Option<usize>; 4]) -> Self {
        let channels = format.channel_count();
        let mut bits = [0; MAX_CHANNELS];
        let mut float = [false; MAX_CHANNELS];

        for channel in 0..channels {
            bits[channel] = format.channel_bits(channel);
            // Stencil channels of float depth formats stay integers
            float[channel] = format.layout.normalized && matches!(bits[channel], 32 | 64);
        }

        Self {
            fields,
            bits,
            float,
            channels,
        }
    }

    /// The first `channels` fields map onto the raw channels in order
    pub(crate) fn positional(format: &PixelFormat) -> Self {
        let channels = format.channel_count();
        let field = |i: usize| (i < channels).then_some(i);

        Self::new(format, [field(0), field(1), field(2), field(3)])
    }

    #[inline]
    fn load<T: Primitive>(&self, channel: usize, raw: u64) -> T {
        let bits = self.bits[channel];

        if !self.float[channel] {
            return T::from_int_channel(raw, bits);
        }

        let value = if bits == 32 {
            f64::from(f32::from_bits(raw as u32))
        } else {
            f64::from_bits(raw)
        };

        T::from_f64(value)
    }

    #[inline]
    fn store<T: Primitive>(&self, channel: usize, value: T) -> u64 {
        let bits = self.bits[channel];

        if !self.float[channel] {
            return value.to_int_channel(bits);
        }

        if bits == 32 {
            u64::from((value.to_f64() as f32).to_bits())
        } else {
            value.to_f64().to_bits()
        }
    }

    pub(crate) fn read<T: Primitive>(&self, raw: &PixelData<u64>) -> [T; 4] {
        let mut out = [T::default(); 4];

        for (i, field) in self.fields.iter().enumerate() {
            out[i] = match *field {
                Some(channel) => self.load(channel, raw[channel]),
                None if i == 3 => T::MAX,
                None => T::default(),
            };
        }

        out
    }

    pub(crate) fn write<T: Primitive>(&self, values: [T; 4]) -> PixelData<u64> {
        let mut raw = PixelData::zeroed(self.channels);
        let mut written = [false; MAX_CHANNELS];

        for (field, value) in self.fields.iter().zip(values) {
            let Some(channel) = *field else {
                continue;
            };

            if !written[channel] {
                raw[channel] = self.store(channel, value);
                written[channel] = true;
            }
        }

        raw
    }

    pub(crate) fn is_mapped(&self, channel: usize) -> bool {
        self.fields.contains(&Some(channel))
    }
}
