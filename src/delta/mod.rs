// Copyright (c) 2024-present, parquet-core contributors
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! The DELTA codec family (spec §4.4, §4.5): `DELTA_BINARY_PACKED`,
//! `DELTA_LENGTH_BYTE_ARRAY`, and `DELTA_BYTE_ARRAY`.
//!
//! Each codec is a pair of plain functions, not a trait object — the
//! "capability set" the external collaborator contract (spec §6, §9) calls
//! for is just `encode_X`/`decode_X` per Parquet primitive type; callers
//! pick the right pair for their column's physical type.

pub mod binary_packed;
pub mod byte_array;
pub mod length_byte_array;

use crate::coding::{trace_decode_failure, DecodeError, EncodeError};

/// Encodes a sequence of `i32` values as `DELTA_BINARY_PACKED`.
pub fn encode_i32(dst: &mut Vec<u8>, values: &[i32]) -> Result<(), EncodeError> {
    binary_packed::encode(dst, values)
}

/// Decodes a `DELTA_BINARY_PACKED` stream into `i32` values.
pub fn decode_i32(src: &[u8]) -> Result<Vec<i32>, DecodeError> {
    binary_packed::decode(src).inspect_err(|e| trace_decode_failure("DELTA_BINARY_PACKED", e))
}

/// Encodes a sequence of `i64` values as `DELTA_BINARY_PACKED`.
pub fn encode_i64(dst: &mut Vec<u8>, values: &[i64]) -> Result<(), EncodeError> {
    binary_packed::encode(dst, values)
}

/// Decodes a `DELTA_BINARY_PACKED` stream into `i64` values.
pub fn decode_i64(src: &[u8]) -> Result<Vec<i64>, DecodeError> {
    binary_packed::decode(src).inspect_err(|e| trace_decode_failure("DELTA_BINARY_PACKED", e))
}

/// Encodes a byte-array page as `DELTA_LENGTH_BYTE_ARRAY`.
pub fn encode_delta_length_byte_array(
    dst: &mut Vec<u8>,
    page: &crate::byte_array_page::ByteArrayPage,
) -> Result<(), EncodeError> {
    length_byte_array::encode(dst, page)
}

/// Decodes a `DELTA_LENGTH_BYTE_ARRAY` stream.
pub fn decode_delta_length_byte_array(
    src: &[u8],
) -> Result<crate::byte_array_page::ByteArrayPage, DecodeError> {
    length_byte_array::decode(src)
        .inspect_err(|e| trace_decode_failure("DELTA_LENGTH_BYTE_ARRAY", e))
}

/// Encodes a byte-array page as `DELTA_BYTE_ARRAY` (common-prefix
/// compression).
pub fn encode_delta_byte_array(
    dst: &mut Vec<u8>,
    page: &crate::byte_array_page::ByteArrayPage,
) -> Result<(), EncodeError> {
    byte_array::encode(dst, page)
}

/// Decodes a `DELTA_BYTE_ARRAY` stream.
pub fn decode_delta_byte_array(
    src: &[u8],
) -> Result<crate::byte_array_page::ByteArrayPage, DecodeError> {
    byte_array::decode(src).inspect_err(|e| trace_decode_failure("DELTA_BYTE_ARRAY", e))
}
