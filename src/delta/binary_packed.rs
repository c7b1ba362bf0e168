// Copyright (c) 2024-present, parquet-core contributors
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! `DELTA_BINARY_PACKED` (spec §4.4): a varint header, then zero or more
//! fixed-size blocks of delta/min/bit-packed mini-blocks.

use crate::bitpacking::{self, DeltaInt, BLOCK_SIZE, NUM_MINI_BLOCKS};
use crate::coding::{DecodeError, EncodeError};
use crate::varint;
use std::io::{Cursor, Read, Write};
use varint_rs::{VarintReader, VarintWriter};

const ENCODING: &str = "DELTA_BINARY_PACKED";

/// Header's `block_size` field is guarded against unbounded allocation
/// (spec §4.4).
const MAX_BLOCK_SIZE: u64 = 65_536;

/// Encodes `values` as `DELTA_BINARY_PACKED`, appending to `dst`.
pub fn encode<T: DeltaInt>(dst: &mut Vec<u8>, values: &[T]) -> Result<(), EncodeError> {
    #[allow(clippy::cast_possible_truncation)]
    dst.write_u64_varint(BLOCK_SIZE as u64)?;
    dst.write_u64_varint(NUM_MINI_BLOCKS as u64)?;
    #[allow(clippy::cast_possible_truncation)]
    dst.write_u64_varint(values.len() as u64)?;

    let first_value = values.first().copied().unwrap_or_else(T::zero);
    dst.write_u64_varint(first_value.zigzag_encode())?;

    if values.len() < 2 {
        return Ok(());
    }

    let mini_block_size = BLOCK_SIZE / NUM_MINI_BLOCKS;
    let mut last = first_value;

    #[allow(clippy::indexing_slicing)]
    let remaining = &values[1..];

    for chunk in remaining.chunks(BLOCK_SIZE) {
        let mut block = vec![T::zero(); BLOCK_SIZE];
        #[allow(clippy::indexing_slicing)]
        block[..chunk.len()].copy_from_slice(chunk);
        let valid_len = chunk.len();

        last = bitpacking::delta_pass(&mut block, last);

        let m = bitpacking::min_pass(&block);
        bitpacking::sub_pass(&mut block, m);
        bitpacking::clear_tail(&mut block, valid_len);

        let bit_widths = bitpacking::mini_block_bit_widths(&block);

        dst.write_u64_varint(m.zigzag_encode())?;
        dst.write_all(&bit_widths)?;

        for (mb_idx, &bw) in bit_widths.iter().enumerate() {
            if bw == 0 {
                continue;
            }
            let start = mb_idx * mini_block_size;
            #[allow(clippy::indexing_slicing)]
            let mini = &block[start..start + mini_block_size];
            bitpacking::mini_block_pack(dst, mini, bw);
        }
    }

    Ok(())
}

/// Decodes a `DELTA_BINARY_PACKED` stream.
pub fn decode<T: DeltaInt>(src: &[u8]) -> Result<Vec<T>, DecodeError> {
    let mut cursor = Cursor::new(src);
    decode_from_reader(&mut cursor)
}

/// Decodes a `DELTA_BINARY_PACKED` stream from an arbitrary reader,
/// consuming exactly its own bytes. Lets a composed codec (length or byte
/// array streams) keep reading its own payload immediately afterward from
/// the same cursor, without needing to know the stream's length up front.
pub fn decode_from_reader<T: DeltaInt, R: Read>(cursor: &mut R) -> Result<Vec<T>, DecodeError> {
    let block_size = varint::read_uvarint_64(cursor, ENCODING)?;
    let num_mini_blocks = varint::read_uvarint_64(cursor, ENCODING)?;
    let total_values = varint::read_uvarint_64(cursor, ENCODING)?;
    let first_value = T::zigzag_decode(varint::read_uvarint_64(cursor, ENCODING)?);

    validate_header(block_size, num_mini_blocks, total_values)?;

    let mut out = Vec::with_capacity(total_values.min(1 << 20) as usize);
    if total_values == 0 {
        return Ok(out);
    }
    out.push(first_value);
    if total_values == 1 {
        return Ok(out);
    }

    #[allow(clippy::cast_possible_truncation)]
    let mini_block_size = (block_size / num_mini_blocks) as usize;
    let mut last = first_value;
    let mut remaining = total_values - 1;

    while remaining > 0 {
        let m = T::zigzag_decode(varint::read_uvarint_64(cursor, ENCODING)?);

        let mut bit_widths = vec![0u8; num_mini_blocks as usize];
        cursor
            .read_exact(&mut bit_widths)
            .map_err(|_| DecodeError::TruncatedInput { encoding: ENCODING })?;

        for &bw in &bit_widths {
            if remaining == 0 {
                break;
            }

            let mut mini = vec![T::zero(); mini_block_size];
            if bw > 0 {
                let byte_len = mini_block_size * usize::from(bw) / 8;
                let mut payload = vec![0u8; byte_len];
                cursor
                    .read_exact(&mut payload)
                    .map_err(|_| DecodeError::TruncatedInput { encoding: ENCODING })?;
                bitpacking::mini_block_unpack(&mut mini, &payload, bw);
            }

            for v in &mut mini {
                *v = v.wrapping_add(m);
            }

            for v in mini {
                if remaining == 0 {
                    break;
                }
                last = last.wrapping_add(v);
                out.push(last);
                remaining -= 1;
            }
        }
    }

    Ok(out)
}

fn validate_header(
    block_size: u64,
    num_mini_blocks: u64,
    total_values: u64,
) -> Result<(), DecodeError> {
    if num_mini_blocks == 0 {
        return Err(DecodeError::InvalidHeader {
            encoding: ENCODING,
            detail: "num_mini_blocks must be > 0",
        });
    }
    if block_size == 0 || block_size % 128 != 0 {
        return Err(DecodeError::InvalidHeader {
            encoding: ENCODING,
            detail: "block_size must be a positive multiple of 128",
        });
    }
    if num_mini_blocks > block_size {
        return Err(DecodeError::InvalidHeader {
            encoding: ENCODING,
            detail: "num_mini_blocks must not exceed block_size",
        });
    }
    if (block_size / num_mini_blocks) % 32 != 0 {
        return Err(DecodeError::InvalidHeader {
            encoding: ENCODING,
            detail: "block_size / num_mini_blocks must be a multiple of 32",
        });
    }
    if total_values > u64::from(i32::MAX as u32) {
        return Err(DecodeError::InvalidHeader {
            encoding: ENCODING,
            detail: "total_values exceeds i32::MAX",
        });
    }
    if block_size > MAX_BLOCK_SIZE {
        return Err(DecodeError::InvalidHeader {
            encoding: ENCODING,
            detail: "block_size exceeds the maximum of 65536",
        });
    }

    Ok(())
}
