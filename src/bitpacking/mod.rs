// Copyright (c) 2024-present, parquet-core contributors
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Bit-packing primitives shared by every delta codec (spec §4.3).
//!
//! A "block" here is always [`BLOCK_SIZE`] signed integers, split into
//! [`NUM_MINI_BLOCKS`] mini-blocks of [`MINI_BLOCK_SIZE`] values, each with
//! its own bit width. These are plain functions, not methods, per the
//! polymorphism guidance: codecs compose them, they don't own state.

use std::cmp::Ordering;

/// Values per delta-packed block.
pub const BLOCK_SIZE: usize = 128;
/// Values per mini-block.
pub const MINI_BLOCK_SIZE: usize = 32;
/// Mini-blocks per block.
pub const NUM_MINI_BLOCKS: usize = 4;

/// A signed fixed-width integer that can ride through the delta/bit-packing
/// passes. Implemented for `i32` and `i64`; every other width the spec names
/// (byte-array length/prefix streams) reuses the `i32` instance.
pub trait DeltaInt: Copy + Ord + std::fmt::Debug {
    /// Bit width of this type (32 or 64); the widest bit-width a mini-block
    /// built from it can ever report.
    const BITS: u32;

    /// Wrapping (mod 2^BITS) subtraction.
    #[must_use]
    fn wrapping_sub(self, rhs: Self) -> Self;

    /// Wrapping (mod 2^BITS) addition.
    #[must_use]
    fn wrapping_add(self, rhs: Self) -> Self;

    /// Reinterprets the value's bit pattern as an unsigned magnitude, zero
    /// extended into a `u64`. Used to compute bit widths and to feed the
    /// tight bit-packer, which only ever deals in unsigned magnitudes.
    #[must_use]
    fn to_unsigned(self) -> u64;

    /// Inverse of [`Self::to_unsigned`].
    #[must_use]
    fn from_unsigned(v: u64) -> Self;

    /// The additive identity.
    #[must_use]
    fn zero() -> Self;

    /// Zigzag-encodes into the non-negative integers (spec §4.3, §6).
    #[must_use]
    fn zigzag_encode(self) -> u64;

    /// Inverse of [`Self::zigzag_encode`].
    #[must_use]
    fn zigzag_decode(v: u64) -> Self;
}

impl DeltaInt for i32 {
    const BITS: u32 = 32;

    fn wrapping_sub(self, rhs: Self) -> Self {
        i32::wrapping_sub(self, rhs)
    }

    fn wrapping_add(self, rhs: Self) -> Self {
        i32::wrapping_add(self, rhs)
    }

    fn to_unsigned(self) -> u64 {
        u64::from(self.cast_unsigned())
    }

    fn from_unsigned(v: u64) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        (v as u32).cast_signed()
    }

    fn zero() -> Self {
        0
    }

    fn zigzag_encode(self) -> u64 {
        u64::from(crate::varint::zigzag_encode_32(self))
    }

    fn zigzag_decode(v: u64) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        crate::varint::zigzag_decode_32(v as u32)
    }
}

impl DeltaInt for i64 {
    const BITS: u32 = 64;

    fn wrapping_sub(self, rhs: Self) -> Self {
        i64::wrapping_sub(self, rhs)
    }

    fn wrapping_add(self, rhs: Self) -> Self {
        i64::wrapping_add(self, rhs)
    }

    fn to_unsigned(self) -> u64 {
        self.cast_unsigned()
    }

    fn from_unsigned(v: u64) -> Self {
        v.cast_signed()
    }

    fn zero() -> Self {
        0
    }

    fn zigzag_encode(self) -> u64 {
        crate::varint::zigzag_encode_64(self)
    }

    fn zigzag_decode(v: u64) -> Self {
        crate::varint::zigzag_decode_64(v)
    }
}

/// In-place delta transform (spec §4.3): `block[i] -= block[i-1]` for
/// `i >= 1`, `block[0] -= last_value`. Returns the block's last value
/// *before* mutation, to seed the next block's `last_value`.
///
/// Walking the block back-to-front lets every subtraction read an
/// unmodified predecessor without a temporary copy.
pub fn delta_pass<T: DeltaInt>(block: &mut [T], last_value: T) -> T {
    assert_eq!(block.len(), BLOCK_SIZE, "delta_pass requires a full block");

    #[allow(clippy::indexing_slicing)]
    let new_last = block[BLOCK_SIZE - 1];

    for i in (1..block.len()).rev() {
        #[allow(clippy::indexing_slicing)]
        {
            block[i] = block[i].wrapping_sub(block[i - 1]);
        }
    }

    #[allow(clippy::indexing_slicing)]
    {
        block[0] = block[0].wrapping_sub(last_value);
    }

    new_last
}

/// Returns the signed minimum across `block`.
pub fn min_pass<T: DeltaInt>(block: &[T]) -> T {
    #[allow(clippy::indexing_slicing)]
    let mut m = block[0];
    for &v in &block[1..] {
        if v.cmp(&m) == Ordering::Less {
            m = v;
        }
    }
    m
}

/// In-place: subtracts `m` from every element.
pub fn sub_pass<T: DeltaInt>(block: &mut [T], m: T) {
    for v in block.iter_mut() {
        *v = v.wrapping_sub(m);
    }
}

/// Zeros `block[valid_len..]`. Used when the final block of a stream has
/// fewer than [`BLOCK_SIZE`] real values.
pub fn clear_tail<T: DeltaInt>(block: &mut [T], valid_len: usize) {
    #[allow(clippy::indexing_slicing)]
    for v in &mut block[valid_len..] {
        *v = T::zero();
    }
}

/// Minimal number of bits needed to represent an unsigned magnitude.
fn bits_needed(value: u64) -> u8 {
    if value == 0 {
        0
    } else {
        #[allow(clippy::cast_possible_truncation)]
        (u64::BITS - value.leading_zeros()) as u8
    }
}

/// Computes the per-mini-block bit width across a full block (spec §4.3).
pub fn mini_block_bit_widths<T: DeltaInt>(block: &[T]) -> [u8; NUM_MINI_BLOCKS] {
    assert_eq!(block.len(), BLOCK_SIZE, "requires a full block");

    let mut widths = [0u8; NUM_MINI_BLOCKS];
    for (mb_idx, w) in widths.iter_mut().enumerate() {
        let start = mb_idx * MINI_BLOCK_SIZE;
        #[allow(clippy::indexing_slicing)]
        let mini = &block[start..start + MINI_BLOCK_SIZE];

        let max_u = mini.iter().map(|v| v.to_unsigned()).max().unwrap_or(0);
        *w = bits_needed(max_u);
    }
    widths
}

/// Packs a mini-block (any length; [`MINI_BLOCK_SIZE`] for the canonical
/// 128/4/32 layout, but the decoder also uses this for non-canonical
/// conforming headers) as `bit_width` tightly-packed little-endian bits,
/// appending to `dst`. Appends nothing when `bit_width == 0`.
pub fn mini_block_pack<T: DeltaInt>(dst: &mut Vec<u8>, mini_block: &[T], bit_width: u8) {
    if bit_width == 0 {
        return;
    }

    let mut acc: u128 = 0;
    let mut acc_bits: u32 = 0;

    for v in mini_block {
        acc |= u128::from(v.to_unsigned()) << acc_bits;
        acc_bits += u32::from(bit_width);

        while acc_bits >= 8 {
            #[allow(clippy::cast_possible_truncation)]
            dst.push((acc & 0xFF) as u8);
            acc >>= 8;
            acc_bits -= 8;
        }
    }

    debug_assert_eq!(
        acc_bits, 0,
        "mini-block length * bit_width is always a multiple of 8"
    );
}

/// Unpacks a mini-block's worth of tightly-packed little-endian bits.
///
/// `src` must have exactly `dst.len() * bit_width / 8` bytes. A `bit_width`
/// of 0 fills `dst` with zeros and ignores `src`.
pub fn mini_block_unpack<T: DeltaInt>(dst: &mut [T], src: &[u8], bit_width: u8) {
    if bit_width == 0 {
        for v in dst.iter_mut() {
            *v = T::zero();
        }
        return;
    }

    assert_eq!(src.len(), dst.len() * usize::from(bit_width) / 8);

    let mask: u128 = if bit_width == 64 {
        u128::from(u64::MAX)
    } else {
        (1u128 << bit_width) - 1
    };

    let mut acc: u128 = 0;
    let mut acc_bits: u32 = 0;
    let mut bytes = src.iter();

    for out in dst.iter_mut() {
        while acc_bits < u32::from(bit_width) {
            #[allow(clippy::expect_used)]
            let byte = *bytes.next().expect("src length checked above");
            acc |= u128::from(byte) << acc_bits;
            acc_bits += 8;
        }

        #[allow(clippy::cast_possible_truncation)]
        {
            *out = T::from_unsigned((acc & mask) as u64);
        }
        acc >>= bit_width;
        acc_bits -= u32::from(bit_width);
    }
}
