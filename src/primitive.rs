use crate::bits::Word;
use std::fmt::Debug;

/// Numeric type a caller can read channel samples into or write them from.
///
/// Implemented for `u8`, `u16`, `u32`, `u64`, `f32` and `f64`. Floating point samples are moved
/// through the bit engine as their same-width unsigned bit pattern, never as a numeric cast.
#[allow(private_bounds)]
pub trait Primitive:
    PrimitiveInternal + Copy + Default + PartialEq + Debug + Send + Sync + 'static
{
    /// Width of the sample in bits
    const BITS: u32;

    /// Fully saturated sample, used as synthesized alpha for formats without an alpha channel.
    ///
    /// The integer maximum for integer samples, 1.0 for floating point samples.
    const MAX: Self;
}

pub(crate) trait PrimitiveInternal: Sized {
    type Word: Word;

    fn to_word(self) -> Self::Word;
    fn from_word(word: Self::Word) -> Self;

    /// Convert the right aligned value of an integer channel `bits` wide.
    ///
    /// Integers keep the channel's most significant bits in their own most significant bits,
    /// floats are normalized into `0.0..=1.0`.
    fn from_int_channel(raw: u64, bits: u32) -> Self;

    /// Inverse of [`PrimitiveInternal::from_int_channel`]
    fn to_int_channel(self, bits: u32) -> u64;

    /// Numeric value of a floating point channel, integers map `0.0..=1.0` onto their full range
    fn from_f64(v: f64) -> Self;

    /// Inverse of [`PrimitiveInternal::from_f64`]
    fn to_f64(self) -> f64;

    /// Top 8 bits of the sample
    fn to_u8_range(self) -> u8;

    /// Place an 8 bit value into the top bits of the sample, low bits are zero
    fn from_u8_range(v: u8) -> Self;
}

/// Largest value of an unsigned integer `bits` wide, as float
#[inline(always)]
fn int_channel_max(bits: u32) -> f64 {
    if bits >= u64::BITS {
        u64::MAX as f64
    } else {
        ((1u64 << bits) - 1) as f64
    }
}

macro_rules! impl_int_primitive {
    ($($t:ty),*) => {$(
        impl Primitive for $t {
            const BITS: u32 = <$t>::BITS;
            const MAX: Self = <$t>::MAX;
        }

        impl PrimitiveInternal for $t {
            type Word = $t;

            #[inline(always)]
            fn to_word(self) -> Self::Word {
                self
            }

            #[inline(always)]
            fn from_word(word: Self::Word) -> Self {
                word
            }

            #[inline(always)]
            fn from_int_channel(raw: u64, bits: u32) -> Self {
                if bits == 0 {
                    0
                } else if bits >= <$t>::BITS {
                    (raw >> (bits - <$t>::BITS)) as $t
                } else {
                    (raw as $t) << (<$t>::BITS - bits)
                }
            }

            #[inline(always)]
            fn to_int_channel(self, bits: u32) -> u64 {
                if bits == 0 {
                    0
                } else if bits >= <$t>::BITS {
                    u64::from(self) << (bits - <$t>::BITS)
                } else {
                    u64::from(self >> (<$t>::BITS - bits))
                }
            }

            #[inline(always)]
            fn from_f64(v: f64) -> Self {
                (v.clamp(0.0, 1.0) * <$t>::MAX as f64).round() as $t
            }

            #[inline(always)]
            fn to_f64(self) -> f64 {
                self as f64 / <$t>::MAX as f64
            }

            #[inline(always)]
            fn to_u8_range(self) -> u8 {
                (self >> (<$t>::BITS - 8)) as u8
            }

            #[inline(always)]
            fn from_u8_range(v: u8) -> Self {
                <$t>::from(v) << (<$t>::BITS - 8)
            }
        }
    )*};
}

impl_int_primitive!(u8, u16, u32, u64);

macro_rules! impl_float_primitive {
    ($($t:ty => $word:ty),*) => {$(
        impl Primitive for $t {
            const BITS: u32 = <$word>::BITS;
            const MAX: Self = 1.0;
        }

        impl PrimitiveInternal for $t {
            type Word = $word;

            #[inline(always)]
            fn to_word(self) -> Self::Word {
                self.to_bits()
            }

            #[inline(always)]
            fn from_word(word: Self::Word) -> Self {
                <$t>::from_bits(word)
            }

            #[inline(always)]
            fn from_int_channel(raw: u64, bits: u32) -> Self {
                if bits == 0 {
                    return 0.0;
                }

                (raw as f64 / int_channel_max(bits)) as $t
            }

            #[inline(always)]
            fn to_int_channel(self, bits: u32) -> u64 {
                if bits == 0 {
                    return 0;
                }

                (f64::from(self).clamp(0.0, 1.0) * int_channel_max(bits)).round() as u64
            }

            #[inline(always)]
            fn from_f64(v: f64) -> Self {
                v as $t
            }

            #[inline(always)]
            fn to_f64(self) -> f64 {
                f64::from(self)
            }

            #[inline(always)]
            fn to_u8_range(self) -> u8 {
                (self.clamp(0.0, 1.0) * 255.0).round() as u8
            }

            #[inline(always)]
            fn from_u8_range(v: u8) -> Self {
                <$t>::from(v) / 255.0
            }
        }
    )*};
}

impl_float_primitive!(f32 => u32, f64 => u64);
