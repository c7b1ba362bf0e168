// Copyright (c) 2024-present, parquet-core contributors
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Value-to-filter adapter (spec §4.2.4): turns a Parquet primitive value
//! into the canonical little-endian bytes that get fed to [`crate::hash::sum64`].

use crate::hash::sum64;

/// A Parquet primitive value, in the shape the bloom filter adapter needs.
///
/// Covers exactly the eight primitive kinds spec §4.2.4 names. Byte arrays
/// borrow their content; everything else is a plain Rust scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrimitiveValue<'a> {
    /// `BOOLEAN`, hashed as a single canonical byte (`0x00`/`0x01`).
    Boolean(bool),
    /// `INT32` backed by `i8` (sub-byte Parquet logical types still occupy
    /// a full `i32` on the wire, but the adapter also accepts the narrower
    /// Rust types directly for convenience).
    Int8(i8),
    /// `INT32` backed by `i16`.
    Int16(i16),
    /// `INT32`.
    Int32(i32),
    /// `INT64`.
    Int64(i64),
    /// `INT96`, the legacy 12-byte timestamp representation.
    Int96([u8; 12]),
    /// `FLOAT`.
    Float32(f32),
    /// `DOUBLE`.
    Float64(f64),
    /// `BYTE_ARRAY`, hashed directly with no length prefix.
    ByteArray(&'a [u8]),
    /// `FIXED_LEN_BYTE_ARRAY`, hashed directly with no length prefix.
    FixedLenByteArray(&'a [u8]),
}

impl PrimitiveValue<'_> {
    /// Computes `XXH64(canonical_little_endian_bytes(self))` (spec §4.2.4).
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        match self {
            Self::Boolean(b) => sum64(&[u8::from(*b)]),
            Self::Int8(v) => sum64(&v.to_le_bytes()),
            Self::Int16(v) => sum64(&v.to_le_bytes()),
            Self::Int32(v) => sum64(&v.to_le_bytes()),
            Self::Int64(v) => sum64(&v.to_le_bytes()),
            Self::Int96(bytes) => sum64(bytes),
            Self::Float32(v) => sum64(&v.to_le_bytes()),
            Self::Float64(v) => sum64(&v.to_le_bytes()),
            Self::ByteArray(bytes) | Self::FixedLenByteArray(bytes) => sum64(bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn boolean_canonical_form_is_one_byte() {
        assert_eq!(
            PrimitiveValue::Boolean(true).fingerprint(),
            sum64(&[0x01])
        );
        assert_eq!(
            PrimitiveValue::Boolean(false).fingerprint(),
            sum64(&[0x00])
        );
    }

    #[test]
    fn int96_hashes_raw_twelve_bytes() {
        let bytes = [1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        assert_eq!(PrimitiveValue::Int96(bytes).fingerprint(), sum64(&bytes));
    }

    #[test]
    fn floats_hash_ieee754_bit_pattern() {
        let v = 3.5_f32;
        assert_eq!(
            PrimitiveValue::Float32(v).fingerprint(),
            sum64(&v.to_le_bytes())
        );

        let v = 3.5_f64;
        assert_eq!(
            PrimitiveValue::Float64(v).fingerprint(),
            sum64(&v.to_le_bytes())
        );
    }

    #[test]
    fn byte_array_hashes_content_with_no_length_prefix() {
        let bytes = b"hello world";
        assert_eq!(
            PrimitiveValue::ByteArray(bytes).fingerprint(),
            sum64(bytes)
        );
        assert_eq!(
            PrimitiveValue::FixedLenByteArray(bytes).fingerprint(),
            sum64(bytes)
        );
    }

    #[test]
    fn distinct_int_widths_of_same_value_hash_differently() {
        // i8(1), i16(1), i32(1), i64(1) all have different canonical byte
        // lengths, so their fingerprints must differ.
        let h8 = PrimitiveValue::Int8(1).fingerprint();
        let h16 = PrimitiveValue::Int16(1).fingerprint();
        let h32 = PrimitiveValue::Int32(1).fingerprint();
        let h64 = PrimitiveValue::Int64(1).fingerprint();

        assert_ne!(h8, h16);
        assert_ne!(h16, h32);
        assert_ne!(h32, h64);
    }
}
