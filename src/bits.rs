//! Masked bit level reads and writes into byte buffers
//!
//! Every access is expressed as a bit offset from the start of a byte slice plus a bit depth.
//! Bits are counted inside words of the sample's width, words are assembled from the slice in
//! little endian byte order. A range which straddles a word boundary is split between the word
//! and the one directly following it.

use crate::primitive::Primitive;
use std::fmt::Debug;
use std::ops::{BitAnd, BitOr, Not};

/// Unsigned integer used as unit of access by the bit engine
pub trait Word:
    Copy
    + Eq
    + Debug
    + Not<Output = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Send
    + Sync
    + 'static
{
    const BITS: u32;
    const BYTES: usize;
    const ZERO: Self;
    const ONES: Self;

    /// Left shift, shifting by the width of the word or more yields zero
    fn shl_or_zero(self, rhs: u32) -> Self;

    /// Right shift, shifting by the width of the word or more yields zero
    fn shr_or_zero(self, rhs: u32) -> Self;

    /// Assemble a word from `bytes[at..]`, bytes past the end of the slice read as zero
    fn load(bytes: &[u8], at: usize) -> Self;

    /// Store the word at `bytes[at..]`, bytes which would land past the end of the slice are dropped
    fn store(self, bytes: &mut [u8], at: usize);
}

macro_rules! impl_word {
    ($($t:ty),*) => {$(
        impl Word for $t {
            const BITS: u32 = <$t>::BITS;
            const BYTES: usize = size_of::<$t>();
            const ZERO: Self = 0;
            const ONES: Self = <$t>::MAX;

            #[inline(always)]
            fn shl_or_zero(self, rhs: u32) -> Self {
                self.checked_shl(rhs).unwrap_or(0)
            }

            #[inline(always)]
            fn shr_or_zero(self, rhs: u32) -> Self {
                self.checked_shr(rhs).unwrap_or(0)
            }

            #[inline(always)]
            fn load(bytes: &[u8], at: usize) -> Self {
                let mut word = [0u8; size_of::<$t>()];

                if let Some(src) = bytes.get(at..) {
                    let n = src.len().min(word.len());
                    word[..n].copy_from_slice(&src[..n]);
                }

                <$t>::from_le_bytes(word)
            }

            #[inline(always)]
            fn store(self, bytes: &mut [u8], at: usize) {
                let word = self.to_le_bytes();

                if let Some(dst) = bytes.get_mut(at..) {
                    let n = dst.len().min(word.len());
                    dst[..n].copy_from_slice(&word[..n]);
                }
            }
        }
    )*};
}

impl_word!(u8, u16, u32, u64);

/// Create a mask of `depth` ones starting at bit `offset`.
///
/// `depth` is clamped to the width of `W` first. Bits shifted past the top of the word are dropped.
#[inline(always)]
pub fn create_bit_mask<W: Word>(offset: u32, depth: u32) -> W {
    let depth = depth.min(W::BITS);

    if depth == 0 {
        return W::ZERO;
    }

    W::ONES.shr_or_zero(W::BITS - depth).shl_or_zero(offset)
}

/// Extract `bit_depth` bits starting `bit_offset` bits after the start of `data`.
///
/// The value is right aligned and zero extended into `T`. Floating point `T` receive the raw bit
/// pattern. `bit_depth` is clamped to the width of `T`.
#[inline(always)]
pub fn get_data_masked<T: Primitive>(data: &[u8], bit_offset: usize, bit_depth: u32) -> T {
    let word_bits = <T::Word as Word>::BITS;
    let depth = bit_depth.min(word_bits);

    let at = (bit_offset / word_bits as usize) * <T::Word as Word>::BYTES;
    let word_offset = (bit_offset % word_bits as usize) as u32;

    let first = <T::Word as Word>::load(data, at);
    let mut value = (first & create_bit_mask::<T::Word>(word_offset, depth)).shr_or_zero(word_offset);

    if word_offset + depth > word_bits {
        let taken = word_bits - word_offset;
        let second = <T::Word as Word>::load(data, at + <T::Word as Word>::BYTES);

        value = value | (second & create_bit_mask::<T::Word>(0, depth - taken)).shl_or_zero(taken);
    }

    T::from_word(value)
}

/// Write the low `bit_depth` bits of `value` at `bit_offset` bits after the start of `data`.
///
/// All bits outside of the target range are preserved. `bit_depth` is clamped to the width of `T`.
#[inline(always)]
pub fn write_data_masked<T: Primitive>(data: &mut [u8], bit_offset: usize, bit_depth: u32, value: T) {
    let word_bits = <T::Word as Word>::BITS;
    let depth = bit_depth.min(word_bits);

    let at = (bit_offset / word_bits as usize) * <T::Word as Word>::BYTES;
    let word_offset = (bit_offset % word_bits as usize) as u32;

    let masked = value.to_word() & create_bit_mask::<T::Word>(0, depth);

    let mask = create_bit_mask::<T::Word>(word_offset, depth);
    let first = <T::Word as Word>::load(data, at);
    ((first & !mask) | (mask & masked.shl_or_zero(word_offset))).store(data, at);

    if word_offset + depth > word_bits {
        let taken = word_bits - word_offset;
        let at = at + <T::Word as Word>::BYTES;

        let mask = create_bit_mask::<T::Word>(0, depth - taken);
        let second = <T::Word as Word>::load(data, at);
        ((second & !mask) | (mask & masked.shr_or_zero(taken))).store(data, at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u16_bytes(words: &[u16]) -> Vec<u8> {
        words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    #[test]
    fn bit_mask() {
        assert_eq!(create_bit_mask::<u16>(0, 16), 0xFFFF);
        assert_eq!(create_bit_mask::<u16>(0, 0), 0x0000);
        assert_eq!(create_bit_mask::<u16>(0, 8), 0x00FF);
        assert_eq!(create_bit_mask::<u16>(4, 8), 0x0FF0);
        assert_eq!(create_bit_mask::<u16>(4, 16), 0xFFF0);
        assert_eq!(create_bit_mask::<u32>(8, 8), 0x0000_FF00);
        assert_eq!(create_bit_mask::<u8>(0, 20), 0xFF);
        assert_eq!(create_bit_mask::<u64>(8, 8), 0x0000_0000_0000_FF00);
        assert_eq!(create_bit_mask::<u8>(8, 4), 0);
    }

    #[test]
    fn get_masked_u16() {
        let data = u16_bytes(&[0x0000, 0x000F, 0xF001, 0xF001]);

        assert_eq!(get_data_masked::<u16>(&data, 0, 8), 0x0000);
        assert_eq!(get_data_masked::<u16>(&data, 16, 16), 0x000F);
        assert_eq!(get_data_masked::<u16>(&data, 32, 16), 0xF001);

        assert_eq!(get_data_masked::<u16>(&data, 44, 4), 0x000F);
        assert_eq!(get_data_masked::<u16>(&data, 17, 2), 0x0003);
        assert_eq!(get_data_masked::<u16>(&data, 16, 4), 0x000F);

        // Straddles the boundary between the third and fourth word
        assert_eq!(get_data_masked::<u16>(&data, 45, 8), 0x000F);
    }

    #[test]
    fn get_masked_float_is_bit_pattern() {
        let data: Vec<u8> = [1.0f32, 2.0, 3.0, 4.0]
            .iter()
            .flat_map(|f| f.to_le_bytes())
            .collect();

        assert_eq!(get_data_masked::<f32>(&data, 32, 32), 2.0);
        assert_eq!(get_data_masked::<f32>(&data, 96, 32), 4.0);
    }

    #[test]
    fn get_masked_past_end_reads_zero() {
        let data = [0xAB];

        assert_eq!(get_data_masked::<u64>(&data, 0, 64), 0xAB);
        assert_eq!(get_data_masked::<u32>(&data, 4, 4), 0xA);
    }

    #[test]
    fn write_masked_u8() {
        let mut data = [0x11, 0x22, 0x33, 0x44];
        write_data_masked(&mut data, 0, 8, 0xFFu8);
        assert_eq!(data, [0xFF, 0x22, 0x33, 0x44]);

        let mut data = [0x11, 0x22, 0x33, 0x44];
        write_data_masked(&mut data, 0, 4, 0xFFu8);
        assert_eq!(data[0], 0x1F);
        write_data_masked(&mut data[1..], 4, 4, 0xFFu8);
        assert_eq!(data, [0x1F, 0xF2, 0x33, 0x44]);

        let mut data = [0x11, 0x22, 0x33, 0x44];
        write_data_masked(&mut data, 1, 5, 0xFFu8);
        assert_eq!(data, [0b0011_1111, 0x22, 0x33, 0x44]);

        let mut data = [0x11, 0x22, 0x33, 0x44];
        write_data_masked(&mut data, 4, 8, 0xEEu8);
        assert_eq!(data, [0xE1, 0x2E, 0x33, 0x44]);
    }

    #[test]
    fn write_masked_u16_straddle() {
        let mut data = [0x11, 0x22, 0x33, 0x44];
        write_data_masked(&mut data, 4, 16, 0xFFEEu16);
        assert_eq!(data, [0xE1, 0xFE, 0x3F, 0x44]);

        // Depth is clamped to 16 bits, the result is the same as above
        let mut data = [0x11, 0x22, 0x33, 0x44];
        write_data_masked(&mut data, 4, 20, 0xFFEEu16);
        assert_eq!(data, [0xE1, 0xFE, 0x3F, 0x44]);
    }

    #[test]
    fn write_masked_float() {
        let mut data: Vec<u8> = [1.0f32, 2.0].iter().flat_map(|f| f.to_le_bytes()).collect();

        write_data_masked(&mut data, 0, 32, 12.0f32);

        assert_eq!(f32::from_le_bytes(data[..4].try_into().unwrap()), 12.0);
        assert_eq!(f32::from_le_bytes(data[4..].try_into().unwrap()), 2.0);
    }

    #[test]
    fn write_masked_past_end_is_dropped() {
        let mut data = [0x00, 0x00, 0x00];

        write_data_masked(&mut data, 8, 16, 0xBEEFu64);

        assert_eq!(data, [0x00, 0xEF, 0xBE]);
    }

    fn check_round_trip<T>(offset: usize, depth: u32, value: T, pattern: u8)
    where
        T: Primitive,
    {
        let mut data = vec![pattern; 24];
        let before = data.clone();

        write_data_masked(&mut data, offset, depth, value);
        assert_eq!(get_data_masked::<T>(&data, offset, depth), value);

        for bit in 0..data.len() * 8 {
            if bit >= offset && bit < offset + depth as usize {
                continue;
            }

            let (byte, shift) = (bit / 8, bit % 8);
            assert_eq!(
                (data[byte] >> shift) & 1,
                (before[byte] >> shift) & 1,
                "bit {bit} changed writing depth {depth} at offset {offset}"
            );
        }
    }

    #[test]
    fn round_trip_preserves_surrounding_bits() {
        for pattern in [0x00, 0xFF, 0xA5] {
            for offset in 0..40 {
                for depth in 1..=8 {
                    let value = create_bit_mask::<u8>(0, depth) & 0b1011_0110;
                    check_round_trip::<u8>(offset, depth, value, pattern);
                }

                for depth in [1, 7, 12, 16] {
                    let value = create_bit_mask::<u16>(0, depth) & 0xB6D5;
                    check_round_trip::<u16>(offset, depth, value, pattern);
                }

                for depth in [3, 24, 32] {
                    let value = create_bit_mask::<u32>(0, depth) & 0xDEAD_BEEF;
                    check_round_trip::<u32>(offset, depth, value, pattern);
                }

                check_round_trip::<u64>(offset, 64, 0x0123_4567_89AB_CDEF, pattern);
            }
        }
    }
}
