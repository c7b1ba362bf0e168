// Copyright (c) 2024-present, parquet-core contributors
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Byte-array page layout (spec §3, §6): the buffer shape both the
//! byte-array delta codecs and the bloom-filter value adapter read from.
//!
//! Layout: `u32 L`, then `L+1` little-endian `u32` offsets, then the
//! concatenated raw value bytes. `offsets[i]..offsets[i+1]` is value `i`.

use crate::coding::DecodeError;
use byteorder::{ByteOrder, LittleEndian};

const ENCODING: &str = "BYTE_ARRAY_PAGE";

/// A decoded or about-to-be-encoded byte-array page.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct ByteArrayPage {
    /// Monotonically non-decreasing offsets into `payload`, length `L + 1`.
    offsets: Vec<u32>,
    /// Concatenated raw value bytes.
    payload: Vec<u8>,
}

impl ByteArrayPage {
    /// Builds a page from an iterator of values, computing offsets as it
    /// concatenates their bytes.
    pub fn from_values<'a, I: IntoIterator<Item = &'a [u8]>>(values: I) -> Self {
        let mut offsets = vec![0u32];
        let mut payload = Vec::new();

        for v in values {
            #[allow(clippy::cast_possible_truncation)]
            payload.extend_from_slice(v);
            #[allow(clippy::cast_possible_truncation)]
            offsets.push(payload.len() as u32);
        }

        Self { offsets, payload }
    }

    /// Builds a page directly from already-validated offsets and payload.
    /// Used by decoders that have already checked the invariants themselves
    /// (e.g. against a payload slice borrowed from a larger buffer).
    pub(crate) fn from_raw(offsets: Vec<u32>, payload: Vec<u8>) -> Self {
        Self { offsets, payload }
    }

    /// Number of values in the page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Whether the page holds zero values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrows value `i`'s raw bytes.
    #[must_use]
    pub fn value(&self, i: usize) -> &[u8] {
        #[allow(clippy::indexing_slicing)]
        let (start, end) = (self.offsets[i] as usize, self.offsets[i + 1] as usize);
        #[allow(clippy::indexing_slicing)]
        &self.payload[start..end]
    }

    /// Iterates over every value's raw bytes in order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        (0..self.len()).map(move |i| self.value(i))
    }

    /// The page's offsets, `L + 1` little-endian `u32`s.
    #[must_use]
    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    /// The page's concatenated raw value bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Serializes the page into its on-wire layout (spec §6): `u32 L`,
    /// `L+1` offsets, then the payload.
    #[must_use]
    pub fn encode_into_vec(&self) -> Vec<u8> {
        #[allow(clippy::cast_possible_truncation)]
        let l = self.len() as u32;

        let mut out = Vec::with_capacity(4 + 4 * self.offsets.len() + self.payload.len());
        let mut u32_buf = [0u8; 4];

        LittleEndian::write_u32(&mut u32_buf, l);
        out.extend_from_slice(&u32_buf);

        for &offset in &self.offsets {
            LittleEndian::write_u32(&mut u32_buf, offset);
            out.extend_from_slice(&u32_buf);
        }

        out.extend_from_slice(&self.payload);
        out
    }

    /// Parses a page from its on-wire layout, validating every invariant in
    /// spec §3: `offsets[0] == 0`, each offset non-decreasing, the final
    /// offset fits in 31 bits, and the payload is exactly that long.
    pub fn decode_from_slice(src: &[u8]) -> Result<Self, DecodeError> {
        if src.len() < 4 {
            return Err(DecodeError::TruncatedInput { encoding: ENCODING });
        }
        #[allow(clippy::indexing_slicing)]
        let l = LittleEndian::read_u32(&src[0..4]) as usize;

        let offsets_start = 4;
        let offsets_len_bytes = (l + 1) * 4;
        let payload_start = offsets_start + offsets_len_bytes;

        if src.len() < payload_start {
            return Err(DecodeError::TruncatedInput { encoding: ENCODING });
        }

        let mut offsets = Vec::with_capacity(l + 1);
        for i in 0..=l {
            let start = offsets_start + i * 4;
            #[allow(clippy::indexing_slicing)]
            offsets.push(LittleEndian::read_u32(&src[start..start + 4]));
        }

        #[allow(clippy::indexing_slicing)]
        if offsets[0] != 0 {
            return Err(DecodeError::InvalidArgument {
                encoding: ENCODING,
                message: "offsets[0] must be 0",
            });
        }
        for pair in offsets.windows(2) {
            #[allow(clippy::indexing_slicing)]
            if pair[0] > pair[1] {
                return Err(DecodeError::InvalidArgument {
                    encoding: ENCODING,
                    message: "offsets must be non-decreasing",
                });
            }
        }

        #[allow(clippy::indexing_slicing)]
        let total = offsets[l] as usize;
        if total > (1usize << 31) - 1 {
            return Err(DecodeError::InvalidArgument {
                encoding: ENCODING,
                message: "final offset exceeds 2^31 - 1",
            });
        }
        if src.len() < payload_start + total {
            return Err(DecodeError::TruncatedInput { encoding: ENCODING });
        }

        #[allow(clippy::indexing_slicing)]
        let payload = src[payload_start..payload_start + total].to_vec();

        Ok(Self { offsets, payload })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn round_trips_through_wire_layout() {
        let page = ByteArrayPage::from_values([b"parsley".as_slice(), b"parse", b"parses", b""]);
        let bytes = page.encode_into_vec();
        let decoded = ByteArrayPage::decode_from_slice(&bytes).unwrap();

        assert_eq!(page, decoded);
        assert_eq!(decoded.len(), 4);
        assert_eq!(decoded.value(0), b"parsley");
        assert_eq!(decoded.value(3), b"");
    }

    #[test]
    fn empty_page_has_one_offset() {
        let page = ByteArrayPage::from_values(std::iter::empty());
        assert!(page.is_empty());
        assert_eq!(page.offsets(), &[0]);

        let bytes = page.encode_into_vec();
        assert_eq!(bytes.len(), 8); // L=0 + one offset, no payload
        let decoded = ByteArrayPage::decode_from_slice(&bytes).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn rejects_nonzero_first_offset() {
        let mut bytes = ByteArrayPage::from_values([b"ab".as_slice()]).encode_into_vec();
        // offsets[0] lives at byte 4..8
        bytes[4] = 1;
        assert!(matches!(
            ByteArrayPage::decode_from_slice(&bytes),
            Err(DecodeError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn rejects_decreasing_offsets() {
        let mut bytes = ByteArrayPage::from_values([b"ab".as_slice(), b"cd"]).encode_into_vec();
        // offsets[2] (final) lives right after offsets[1]; corrupt it below offsets[1].
        let offsets_2_start = 4 + 2 * 4;
        LittleEndian::write_u32(&mut bytes[offsets_2_start..offsets_2_start + 4], 0);
        assert!(matches!(
            ByteArrayPage::decode_from_slice(&bytes),
            Err(DecodeError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn rejects_truncated_payload() {
        let mut bytes = ByteArrayPage::from_values([b"hello".as_slice()]).encode_into_vec();
        bytes.truncate(bytes.len() - 2);
        assert!(matches!(
            ByteArrayPage::decode_from_slice(&bytes),
            Err(DecodeError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn iter_yields_every_value_in_order() {
        let values: Vec<&[u8]> = vec![b"a", b"bb", b"ccc"];
        let page = ByteArrayPage::from_values(values.clone());
        let collected: Vec<&[u8]> = page.iter().collect();
        assert_eq!(collected, values);
    }
}
