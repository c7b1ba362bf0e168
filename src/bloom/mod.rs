// Copyright (c) 2024-present, parquet-core contributors
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Parquet's Split Block Bloom Filter (SBBF), spec §4.2.
//!
//! A filter is an ordered sequence of 32-byte [`block`]s. Insert and check
//! route a fingerprint to exactly one block via [`block_index`], then
//! probe/set up to 8 bits inside it — one cache line touched per operation,
//! which is the entire point of the "split block" design.

pub mod block;
pub mod value;

pub use value::PrimitiveValue;

use crate::coding::{Decode, DecodeError, Encode, EncodeError};
use crate::hash::sum64;
use block::BLOCK_BYTES;
use std::io::{Read, Seek, SeekFrom, Write};

/// Maps a 64-bit fingerprint to a block index in `0..num_blocks` (spec §4.2.2).
///
/// Uses the high 32 bits of `fp` so the mapping is independent of the low 32
/// bits `block::mask` consumes; all arithmetic is 64-bit with no modulo.
#[must_use]
pub fn block_index(fp: u64, num_blocks: u64) -> u64 {
    if num_blocks == 0 {
        return 0;
    }
    ((fp >> 32) * num_blocks) >> 32
}

/// Minimum number of blocks needed to hold `num_values` values at
/// `bits_per_value` bits each (spec §4.2.3). Always at least 1.
#[must_use]
pub fn num_blocks_for(num_values: usize, bits_per_value: u32) -> usize {
    let total_bits = (num_values as u128) * (bits_per_value as u128);
    let blocks = total_bits.div_ceil(8).div_ceil(BLOCK_BYTES as u128);

    #[allow(clippy::cast_possible_truncation)]
    blocks.max(1) as usize
}

/// A Split Block Bloom Filter: `N` 32-byte blocks, stored as one flat
/// little-endian byte buffer (spec §3).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SplitBlockFilter {
    /// Flat buffer of `32 * num_blocks` bytes.
    data: Vec<u8>,
}

impl SplitBlockFilter {
    /// Builds an empty (all-zero) filter with exactly `num_blocks` blocks.
    ///
    /// `num_blocks` is clamped to at least 1, matching the invariant that a
    /// filter always has `N >= 1` blocks.
    #[must_use]
    pub fn with_num_blocks(num_blocks: usize) -> Self {
        let num_blocks = num_blocks.max(1);

        #[cfg(feature = "tracing")]
        tracing::debug!(num_blocks, bytes = num_blocks * BLOCK_BYTES, "constructing split block bloom filter");

        Self {
            data: vec![0u8; num_blocks * BLOCK_BYTES],
        }
    }

    /// Builds an empty filter sized to hold `num_values` values at
    /// `bits_per_value` bits per value (spec §4.2.3).
    #[must_use]
    pub fn with_capacity(num_values: usize, bits_per_value: u32) -> Self {
        Self::with_num_blocks(num_blocks_for(num_values, bits_per_value))
    }

    /// Number of 32-byte blocks in this filter.
    #[must_use]
    pub fn num_blocks(&self) -> usize {
        self.data.len() / BLOCK_BYTES
    }

    fn block_mut(&mut self, idx: u64) -> &mut [u8] {
        #[allow(clippy::cast_possible_truncation)]
        let start = (idx as usize) * BLOCK_BYTES;
        #[allow(clippy::indexing_slicing)]
        &mut self.data[start..start + BLOCK_BYTES]
    }

    fn block(&self, idx: u64) -> &[u8] {
        #[allow(clippy::cast_possible_truncation)]
        let start = (idx as usize) * BLOCK_BYTES;
        #[allow(clippy::indexing_slicing)]
        &self.data[start..start + BLOCK_BYTES]
    }

    /// Inserts a fingerprint (spec §4.2.3). No false negative will ever
    /// follow from this for the same fingerprint.
    pub fn insert(&mut self, fp: u64) {
        let idx = block_index(fp, self.num_blocks() as u64);
        block::insert(self.block_mut(idx), fp);
    }

    /// Hashes and inserts a typed primitive value (spec §4.2.4).
    pub fn insert_value(&mut self, value: PrimitiveValue<'_>) {
        self.insert(value.fingerprint());
    }

    /// Inserts many fingerprints, processing them four at a time for
    /// locality of mask computation (spec §4.2.3). Produces byte-identical
    /// results to looping [`Self::insert`] regardless of how fingerprints
    /// alias onto the same block within a group.
    pub fn bulk_insert(&mut self, fps: &[u64]) {
        let num_blocks = self.num_blocks() as u64;
        let mut chunks = fps.chunks_exact(4);

        for chunk in &mut chunks {
            #[allow(clippy::indexing_slicing)]
            let targets = [
                (
                    block_index(chunk[0], num_blocks),
                    #[allow(clippy::cast_possible_truncation)]
                    block::mask(chunk[0] as u32),
                ),
                (
                    block_index(chunk[1], num_blocks),
                    #[allow(clippy::cast_possible_truncation)]
                    block::mask(chunk[1] as u32),
                ),
                (
                    block_index(chunk[2], num_blocks),
                    #[allow(clippy::cast_possible_truncation)]
                    block::mask(chunk[2] as u32),
                ),
                (
                    block_index(chunk[3], num_blocks),
                    #[allow(clippy::cast_possible_truncation)]
                    block::mask(chunk[3] as u32),
                ),
            ];

            for (idx, m) in targets {
                block::merge_mask(self.block_mut(idx), &m);
            }
        }

        // Tail: fewer than 4 fingerprints remain.
        for &fp in chunks.remainder() {
            self.insert(fp);
        }
    }

    /// Returns `true` if `fp` may have been inserted. Never a false negative.
    #[must_use]
    pub fn check(&self, fp: u64) -> bool {
        let idx = block_index(fp, self.num_blocks() as u64);
        block::check(self.block(idx), fp)
    }

    /// Hashes and checks a typed primitive value.
    #[must_use]
    pub fn check_value(&self, value: PrimitiveValue<'_>) -> bool {
        self.check(value.fingerprint())
    }

    /// Zeroes every block.
    pub fn reset(&mut self) {
        self.data.fill(0);
    }

    /// The filter's flat little-endian byte representation (spec §4.2.3).
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Rebuilds a filter from its on-disk byte representation.
    ///
    /// `bytes.len()` must be a non-zero multiple of 32.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, DecodeError> {
        if bytes.is_empty() || bytes.len() % BLOCK_BYTES != 0 {
            let err = DecodeError::InvalidFilterSize { n: bytes.len() };
            #[cfg(feature = "tracing")]
            tracing::debug!(error = ?err, "split block bloom filter decode failed");
            return Err(err);
        }
        Ok(Self { data: bytes })
    }

    /// Checks a fingerprint against a serialized filter without holding the
    /// whole thing in memory (spec §4.2.3): seeks to the single 32-byte
    /// block the fingerprint maps to and reads just that block.
    ///
    /// `total_bytes` must be a non-zero multiple of 32, matching the
    /// on-disk filter size; otherwise `InvalidFilterSize` is returned.
    pub fn check_serialized<R: Read + Seek>(
        reader: &mut R,
        total_bytes: u64,
        fp: u64,
    ) -> Result<bool, DecodeError> {
        #[allow(clippy::cast_possible_truncation)]
        if total_bytes == 0 || total_bytes % (BLOCK_BYTES as u64) != 0 {
            let err = DecodeError::InvalidFilterSize {
                n: total_bytes as usize,
            };
            #[cfg(feature = "tracing")]
            tracing::debug!(error = ?err, "check_serialized rejected filter size");
            return Err(err);
        }

        let num_blocks = total_bytes / (BLOCK_BYTES as u64);
        let idx = block_index(fp, num_blocks);
        let offset = idx * (BLOCK_BYTES as u64);

        reader.seek(SeekFrom::Start(offset))?;

        let mut buf = [0u8; BLOCK_BYTES];
        reader.read_exact(&mut buf)?;

        Ok(block::check(&buf, fp))
    }

    /// Computes the fingerprint of an arbitrary byte value (spec §3: "a
    /// 64-bit unsigned integer produced by XXH64 of a value's canonical
    /// little-endian byte form").
    #[must_use]
    pub fn fingerprint(bytes: &[u8]) -> u64 {
        sum64(bytes)
    }
}

impl Encode for SplitBlockFilter {
    fn encode_into<W: Write>(&self, writer: &mut W) -> Result<(), EncodeError> {
        writer.write_all(&self.data)?;
        Ok(())
    }
}

impl Decode for SplitBlockFilter {
    fn decode_from<R: Read>(reader: &mut R) -> Result<Self, DecodeError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }
}
