// Copyright (c) 2024-present, parquet-core contributors
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! `DELTA_LENGTH_BYTE_ARRAY` (spec §4.5.1): a delta-packed length stream
//! followed by the concatenated raw value bytes.

use super::binary_packed;
use crate::byte_array_page::ByteArrayPage;
use crate::coding::{DecodeError, EncodeError};
use std::io::Cursor;

const ENCODING: &str = "DELTA_LENGTH_BYTE_ARRAY";

/// Encodes a byte-array page, appending to `dst`.
pub fn encode(dst: &mut Vec<u8>, page: &ByteArrayPage) -> Result<(), EncodeError> {
    let lengths: Vec<i32> = page
        .offsets()
        .windows(2)
        .map(|w| {
            #[allow(clippy::cast_possible_wrap)]
            {
                (w[1] - w[0]) as i32
            }
        })
        .collect();

    binary_packed::encode(dst, &lengths)?;
    dst.extend_from_slice(page.payload());
    Ok(())
}

/// Decodes a `DELTA_LENGTH_BYTE_ARRAY` stream into a [`ByteArrayPage`].
pub fn decode(src: &[u8]) -> Result<ByteArrayPage, DecodeError> {
    let mut cursor = Cursor::new(src);
    let lengths: Vec<i32> = binary_packed::decode_from_reader(&mut cursor)?;

    let mut offsets = Vec::with_capacity(lengths.len() + 1);
    offsets.push(0u32);
    let mut total: i64 = 0;

    for &len in &lengths {
        if len < 0 {
            return Err(DecodeError::NegativeLength {
                encoding: ENCODING,
                n: i64::from(len),
            });
        }
        total += i64::from(len);
        #[allow(clippy::cast_possible_truncation)]
        offsets.push(total as u32);
    }

    #[allow(clippy::cast_possible_truncation)]
    let payload_start = cursor.position() as usize;
    let payload_len = src.len().saturating_sub(payload_start);

    #[allow(clippy::cast_sign_loss)]
    let total = total as usize;
    if total > payload_len {
        return Err(DecodeError::ValueLengthOutOfBounds {
            encoding: ENCODING,
            n: total,
            max: payload_len,
        });
    }

    #[allow(clippy::indexing_slicing)]
    let payload = src[payload_start..payload_start + total].to_vec();

    Ok(ByteArrayPage::from_raw(offsets, payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn round_trips_typical_values() {
        let page = ByteArrayPage::from_values([
            b"parsley".as_slice(),
            b"parse",
            b"parses",
            b"parsing",
            b"",
        ]);

        let mut buf = Vec::new();
        encode(&mut buf, &page).unwrap();
        let decoded = decode(&buf).unwrap();

        assert_eq!(page, decoded);
    }

    #[test]
    fn round_trips_empty_page() {
        let page = ByteArrayPage::from_values(std::iter::empty());
        let mut buf = Vec::new();
        encode(&mut buf, &page).unwrap();
        let decoded = decode(&buf).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn rejects_truncated_payload() {
        let page = ByteArrayPage::from_values([b"hello world".as_slice()]);
        let mut buf = Vec::new();
        encode(&mut buf, &page).unwrap();
        buf.truncate(buf.len() - 3);

        assert!(matches!(
            decode(&buf),
            Err(DecodeError::ValueLengthOutOfBounds { .. })
        ));
    }
}
