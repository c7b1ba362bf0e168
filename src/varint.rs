// Copyright (c) 2024-present, parquet-core contributors
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Zigzag + uvarint helpers layered on top of `varint_rs` (spec §4.3, §4.4).
//!
//! `varint_rs` only speaks unsigned varints; DELTA_BINARY_PACKED's header and
//! per-block minimum delta are signed zigzag-varints, so the mapping lives
//! here rather than being repeated in every codec module.

use crate::coding::DecodeError;
use std::io::Read;
use varint_rs::VarintReader;

/// Maps a signed 32-bit value onto the non-negative integers, smallest
/// magnitude first: `0, -1, 1, -2, 2, ...` (standard Protobuf-style zigzag).
#[must_use]
pub fn zigzag_encode_32(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

/// Inverse of [`zigzag_encode_32`].
#[must_use]
pub fn zigzag_decode_32(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}

/// Maps a signed 64-bit value onto the non-negative integers (spec §4.3).
#[must_use]
pub fn zigzag_encode_64(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`zigzag_encode_64`].
#[must_use]
pub fn zigzag_decode_64(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Reads a plain (non-zigzag) uvarint `u64` header field.
pub fn read_uvarint_64<R: Read>(
    reader: &mut R,
    encoding: &'static str,
) -> Result<u64, DecodeError> {
    reader
        .read_u64_varint()
        .map_err(|_| DecodeError::TruncatedInput { encoding })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use test_log::test;

    #[test]
    fn zigzag_32_known_vectors() {
        assert_eq!(zigzag_encode_32(0), 0);
        assert_eq!(zigzag_encode_32(-1), 1);
        assert_eq!(zigzag_encode_32(1), 2);
        assert_eq!(zigzag_encode_32(-2), 3);
        assert_eq!(zigzag_encode_32(2), 4);
    }

    #[test]
    fn zigzag_64_known_vectors() {
        assert_eq!(zigzag_encode_64(0), 0);
        assert_eq!(zigzag_encode_64(-1), 1);
        assert_eq!(zigzag_encode_64(1), 2);
        assert_eq!(zigzag_encode_64(-2), 3);
    }

    #[test]
    fn zigzag_32_round_trips_extremes() {
        for v in [0, 1, -1, i32::MAX, i32::MIN, 12345, -98765] {
            assert_eq!(zigzag_decode_32(zigzag_encode_32(v)), v);
        }
    }

    #[test]
    fn zigzag_64_round_trips_extremes() {
        for v in [0, 1, -1, i64::MAX, i64::MIN, 123_456_789, -987_654_321] {
            assert_eq!(zigzag_decode_64(zigzag_encode_64(v)), v);
        }
    }

    #[test]
    fn read_uvarint_on_truncated_input_errors() {
        let mut cursor = Cursor::new(Vec::<u8>::new());
        assert!(matches!(
            read_uvarint_64(&mut cursor, "TEST"),
            Err(DecodeError::TruncatedInput { encoding: "TEST" })
        ));
    }
}
