// Copyright (c) 2024-present, parquet-core contributors
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Split block bloom filters, XXH64 fingerprint hashing, and the DELTA
//! columnar codecs for the Apache Parquet on-disk format.
//!
//! This crate covers exactly the core kernels: it does not parse Thrift
//! metadata, assemble rows, wrap compression codecs, or lay out
//! pages/column-chunks — it implements the bit-exact algorithms those
//! higher layers call into.
//!
//! ##### About
//!
//! - [`hash`] — scalar XXH64 and the batched multi-hash variants.
//! - [`bloom`] — the Split Block Bloom Filter (construct, insert, check,
//!   serialize).
//! - [`bitpacking`] — the delta/min/sub passes and tight bit-packing
//!   primitives every delta codec is built from.
//! - [`delta`] — `DELTA_BINARY_PACKED`, `DELTA_LENGTH_BYTE_ARRAY`, and
//!   `DELTA_BYTE_ARRAY`.
//! - [`byte_array_page`] — the offset/payload layout byte-array columns and
//!   the bloom value adapter both read from.
//!
//! # Example usage
//!
//! ```
//! use parquet_core::bloom::SplitBlockFilter;
//! use parquet_core::delta;
//! use parquet_core::byte_array_page::ByteArrayPage;
//!
//! // Build a filter sized for 1000 values at 10 bits/value and probe it.
//! let mut filter = SplitBlockFilter::with_capacity(1_000, 10);
//! let fp = SplitBlockFilter::fingerprint(b"some-row-key");
//! filter.insert(fp);
//! assert!(filter.check(fp));
//!
//! // Round-trip a column of signed integers through DELTA_BINARY_PACKED.
//! let values = vec![-1, 0, 1, 0, 2, 3, 4, 5, 6, 2_147_483_647, 2_147_483_647, 0];
//! let mut encoded = Vec::new();
//! delta::encode_i32(&mut encoded, &values)?;
//! assert_eq!(delta::decode_i32(&encoded)?, values);
//!
//! // Round-trip a byte-array column through DELTA_BYTE_ARRAY.
//! let page = ByteArrayPage::from_values([b"parsley".as_slice(), b"parse", b"parses"]);
//! let mut encoded = Vec::new();
//! delta::encode_delta_byte_array(&mut encoded, &page)?;
//! assert_eq!(delta::decode_delta_byte_array(&encoded)?, page);
//! #
//! # Ok::<(), parquet_core::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all, missing_docs, clippy::cargo)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![warn(clippy::multiple_crate_versions)]
#![allow(clippy::option_if_let_else)]

pub mod bitpacking;
pub mod bloom;
pub mod byte_array_page;
mod coding;
pub mod delta;
mod error;
pub mod hash;
mod scratch;
mod varint;

pub use coding::{Decode, DecodeError, Encode, EncodeError};
pub use error::{Error, Result};
