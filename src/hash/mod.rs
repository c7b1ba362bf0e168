// Copyright (c) 2024-present, parquet-core contributors
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! XXH64 fingerprint hashing (spec §4.1).
//!
//! [`sum64`] is the scalar entry point used everywhere a single value needs
//! hashing (e.g. a byte-array column value). The `multi_sum_*` family
//! batches the same scalar algorithm over many fixed-width values laid out
//! contiguously — the feeder for [`crate::bloom`]'s bulk insert path.
//!
//! Every function here is a leaf operation: no allocation, no suspension,
//! safe to call concurrently from many threads over disjoint buffers.

use crate::coding::DecodeError;

const ENCODING: &str = "MULTI_SUM";

/// Computes the canonical XXH64 digest of `bytes` with seed `0`.
///
/// This is the only seed this crate needs; Parquet's bloom filter and its
/// multi-hash feeders always hash with a zero seed.
#[must_use]
pub fn sum64(bytes: &[u8]) -> u64 {
    xxhash_rust::xxh64::xxh64(bytes, 0)
}

/// Hashes `n = min(dst.len(), src.len())` single bytes, writing
/// `dst[i] = sum64(&[src[i]])`.
pub fn multi_sum_u8(dst: &mut [u64], src: &[u8]) -> usize {
    let n = dst.len().min(src.len());
    for i in 0..n {
        #[allow(clippy::indexing_slicing)]
        {
            dst[i] = sum64(&[src[i]]);
        }
    }
    n
}

/// Hashes `n = min(dst.len(), src.len())` `u16` values in their canonical
/// little-endian byte form.
pub fn multi_sum_u16(dst: &mut [u64], src: &[u16]) -> usize {
    let n = dst.len().min(src.len());
    for i in 0..n {
        #[allow(clippy::indexing_slicing)]
        {
            dst[i] = sum64(&src[i].to_le_bytes());
        }
    }
    n
}

/// Hashes `n = min(dst.len(), src.len())` `u32` values in their canonical
/// little-endian byte form.
pub fn multi_sum_u32(dst: &mut [u64], src: &[u32]) -> usize {
    let n = dst.len().min(src.len());
    for i in 0..n {
        #[allow(clippy::indexing_slicing)]
        {
            dst[i] = sum64(&src[i].to_le_bytes());
        }
    }
    n
}

/// Hashes `n = min(dst.len(), src.len())` `u64` values in their canonical
/// little-endian byte form.
pub fn multi_sum_u64(dst: &mut [u64], src: &[u64]) -> usize {
    let n = dst.len().min(src.len());
    for i in 0..n {
        #[allow(clippy::indexing_slicing)]
        {
            dst[i] = sum64(&src[i].to_le_bytes());
        }
    }
    n
}

/// Hashes `n = min(dst.len(), src.len())` raw 16-byte values (e.g. `i128`'s
/// canonical little-endian form, or any other 128-bit fixed-width type).
pub fn multi_sum_u128(dst: &mut [u64], src: &[[u8; 16]]) -> usize {
    let n = dst.len().min(src.len());
    for i in 0..n {
        #[allow(clippy::indexing_slicing)]
        {
            dst[i] = sum64(&src[i]);
        }
    }
    n
}

/// Fixed element widths (in bytes) the `multi_sum_*` family supports.
const SUPPORTED_WIDTHS: [usize; 5] = [1, 2, 4, 8, 16];

/// Dispatches to the `multi_sum_*` function matching a raw buffer's
/// fixed-width element size, for callers that only know the column's
/// physical width at runtime (e.g. a generic bulk-insert path driven by a
/// Parquet physical type tag) rather than at compile time.
///
/// `width` must be one of `1`, `2`, `4`, `8`, or `16` bytes — the widths of
/// the Parquet primitive types this crate's bloom filter hashes (spec
/// §4.2.4). `src.len()` must be an exact multiple of `width`.
pub fn multi_sum_dispatch(dst: &mut [u64], src: &[u8], width: usize) -> Result<usize, DecodeError> {
    if !SUPPORTED_WIDTHS.contains(&width) {
        return Err(DecodeError::NotSupported {
            encoding: ENCODING,
            type_name: "fixed-width element (must be 1, 2, 4, 8, or 16 bytes)",
        });
    }
    if src.len() % width != 0 {
        return Err(DecodeError::InvalidInputSize {
            encoding: ENCODING,
            op: "multi_sum_dispatch",
            type_name: "fixed-width element",
            n: src.len(),
        });
    }

    let n = dst.len().min(src.len() / width);
    for (slot, chunk) in dst.iter_mut().zip(src.chunks_exact(width)).take(n) {
        *slot = sum64(chunk);
    }
    Ok(n)
}
