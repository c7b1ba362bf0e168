// Copyright (c) 2024-present, parquet-core contributors
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! `DELTA_BYTE_ARRAY` (spec §4.5.2): incremental/common-prefix compression.
//! Two delta-packed `i32` streams (prefix lengths, suffix lengths) followed
//! by the concatenated suffix bytes.

use super::binary_packed;
use crate::byte_array_page::ByteArrayPage;
use crate::coding::{DecodeError, EncodeError};
use std::io::Cursor;

const ENCODING: &str = "DELTA_BYTE_ARRAY";

/// Previous values at or below this length use a linear scan to find the
/// common prefix; longer ones use binary search (spec §4.5.2). Either
/// strategy must return the exact longest common prefix.
const LINEAR_SCAN_THRESHOLD: usize = 64;

/// Encodes a byte-array page with common-prefix compression, appending to
/// `dst`.
pub fn encode(dst: &mut Vec<u8>, page: &ByteArrayPage) -> Result<(), EncodeError> {
    let mut prefix_lengths = crate::scratch::take_i32_buf();
    let mut suffix_lengths = crate::scratch::take_i32_buf();
    let mut suffixes = crate::scratch::take_byte_buf();

    let mut prev: &[u8] = &[];
    for cur in page.iter() {
        let p = common_prefix_len(prev, cur);

        #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
        {
            prefix_lengths.push(p as i32);
            suffix_lengths.push((cur.len() - p) as i32);
        }

        #[allow(clippy::indexing_slicing)]
        suffixes.extend_from_slice(&cur[p..]);
        prev = cur;
    }

    binary_packed::encode(dst, &prefix_lengths)?;
    binary_packed::encode(dst, &suffix_lengths)?;
    dst.extend_from_slice(&suffixes);

    Ok(())
}

/// Longest common prefix between `prev` (the previously encoded value) and
/// `cur`, switching strategy on `prev`'s length per spec §4.5.2.
fn common_prefix_len(prev: &[u8], cur: &[u8]) -> usize {
    if prev.len() <= LINEAR_SCAN_THRESHOLD {
        linear_common_prefix(prev, cur)
    } else {
        binary_search_common_prefix(prev, cur)
    }
}

fn linear_common_prefix(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

fn binary_search_common_prefix(a: &[u8], b: &[u8]) -> usize {
    let max = a.len().min(b.len());
    let mut lo = 0usize;
    let mut hi = max;

    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        #[allow(clippy::indexing_slicing)]
        if a[..mid] == b[..mid] {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }

    lo
}

/// Decodes a `DELTA_BYTE_ARRAY` stream into a [`ByteArrayPage`].
pub fn decode(src: &[u8]) -> Result<ByteArrayPage, DecodeError> {
    let mut cursor = Cursor::new(src);
    let prefix_lengths: Vec<i32> = binary_packed::decode_from_reader(&mut cursor)?;
    let suffix_lengths: Vec<i32> = binary_packed::decode_from_reader(&mut cursor)?;

    if prefix_lengths.len() != suffix_lengths.len() {
        return Err(DecodeError::PrefixSuffixLengthMismatch {
            prefix_count: prefix_lengths.len(),
            suffix_count: suffix_lengths.len(),
        });
    }

    #[allow(clippy::cast_possible_truncation)]
    let payload_start = cursor.position() as usize;
    #[allow(clippy::indexing_slicing)]
    let payload = &src[payload_start.min(src.len())..];

    let mut values: Vec<Vec<u8>> = Vec::with_capacity(prefix_lengths.len());
    let mut consumed = 0usize;
    let mut prev: Vec<u8> = Vec::new();

    for (&p, &s) in prefix_lengths.iter().zip(suffix_lengths.iter()) {
        if p < 0 {
            return Err(DecodeError::NegativeLength {
                encoding: ENCODING,
                n: i64::from(p),
            });
        }
        if s < 0 {
            return Err(DecodeError::NegativeLength {
                encoding: ENCODING,
                n: i64::from(s),
            });
        }

        #[allow(clippy::cast_sign_loss)]
        let p = p as usize;
        #[allow(clippy::cast_sign_loss)]
        let s = s as usize;

        if p > prev.len() {
            return Err(DecodeError::PrefixLengthOutOfBounds {
                encoding: ENCODING,
                prefix_len: p,
                last_len: prev.len(),
            });
        }
        if consumed + s > payload.len() {
            return Err(DecodeError::ValueLengthOutOfBounds {
                encoding: ENCODING,
                n: consumed + s,
                max: payload.len(),
            });
        }

        let mut value = Vec::with_capacity(p + s);
        #[allow(clippy::indexing_slicing)]
        value.extend_from_slice(&prev[..p]);
        #[allow(clippy::indexing_slicing)]
        value.extend_from_slice(&payload[consumed..consumed + s]);
        consumed += s;

        prev = value.clone();
        values.push(value);
    }

    Ok(ByteArrayPage::from_values(
        values.iter().map(std::vec::Vec::as_slice),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn scenario_prefix_compression_known_vector() {
        // spec §8 scenario 4
        let page =
            ByteArrayPage::from_values([b"parsley".as_slice(), b"parse", b"parses", b"parsing"]);

        let mut prev: &[u8] = &[];
        let mut prefix_lengths = Vec::new();
        for cur in page.iter() {
            prefix_lengths.push(common_prefix_len(prev, cur));
            prev = cur;
        }
        assert_eq!(prefix_lengths, vec![0, 4, 5, 4]);

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
        assert!(decode(&buf).unwrap().is_empty());
    }

    #[test]
    fn round_trips_with_no_shared_prefixes() {
        let page = ByteArrayPage::from_values([b"aaa".as_slice(), b"bbb", b"ccc"]);
        let mut buf = Vec::new();
        encode(&mut buf, &page).unwrap();
        assert_eq!(decode(&buf).unwrap(), page);
    }

    #[test]
    fn linear_and_binary_search_strategies_agree() {
        let long_prev = vec![b'x'; 200];
        let mut long_cur = long_prev.clone();
        long_cur.truncate(150);
        long_cur.push(b'y');

        assert_eq!(
            linear_common_prefix(&long_prev, &long_cur),
            binary_search_common_prefix(&long_prev, &long_cur)
        );
        assert_eq!(linear_common_prefix(&long_prev, &long_cur), 150);
    }

    #[test]
    fn rejects_mismatched_stream_lengths() {
        // Hand-assemble a stream where the suffix-length stream claims one
        // fewer value than the prefix-length stream.
        let mut buf = Vec::new();
        binary_packed::encode(&mut buf, &[0i32, 4, 5]).unwrap();
        binary_packed::encode(&mut buf, &[3i32, 1]).unwrap();

        assert!(matches!(
            decode(&buf),
            Err(DecodeError::PrefixSuffixLengthMismatch { .. })
        ));
    }

    #[test]
    fn rejects_prefix_longer_than_previous_value() {
        let mut buf = Vec::new();
        binary_packed::encode(&mut buf, &[0i32, 100]).unwrap();
        binary_packed::encode(&mut buf, &[3i32, 1]).unwrap();
        buf.extend_from_slice(b"abcd");

        assert!(matches!(
            decode(&buf),
            Err(DecodeError::PrefixLengthOutOfBounds { .. })
        ));
    }

    #[test]
    fn round_trips_long_values_using_binary_search_path() {
        let a = vec![b'a'; 200];
        let mut b = a.clone();
        b[150] = b'z';
        let page = ByteArrayPage::from_values([a.as_slice(), b.as_slice()]);

        let mut buf = Vec::new();
        encode(&mut buf, &page).unwrap();
        assert_eq!(decode(&buf).unwrap(), page);
    }
}
