// Copyright (c) 2024-present, parquet-core contributors
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Serialization traits and error kinds shared by every encoding in this crate.
//!
//! Every codec entry point (spec §6) returns a [`DecodeError`] on the decode
//! side; [`Encode`]/[`Decode`] are the narrower reader/writer based traits
//! used by the bloom filter wire format, which is a single flat byte blob
//! rather than a value sequence.

use std::io::{Read, Write};

/// Error during serialization.
///
/// Encoders write into an in-memory `Vec<u8>`, so in practice this can only
/// be produced when a caller supplies their own [`Write`] implementation that
/// fails.
#[derive(Debug)]
pub enum EncodeError {
    /// I/O error.
    Io(std::io::Error),
}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EncodeError({})",
            match self {
                Self::Io(e) => e.to_string(),
            }
        )
    }
}

impl From<std::io::Error> for EncodeError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
        }
    }
}

/// Every error kind a decode routine in this crate can produce (spec §7).
///
/// Each variant carries the `encoding` name that produced it, so a caller
/// juggling several codecs at once can tell them apart without downcasting.
#[derive(Debug)]
pub enum DecodeError {
    /// The value type is not handled by this encoding.
    NotSupported {
        /// Name of the encoding that rejected the value.
        encoding: &'static str,
        /// Name of the unsupported type.
        type_name: &'static str,
    },

    /// An invalid parameter was supplied (e.g. a negative fixed-length size).
    InvalidArgument {
        /// Name of the encoding that rejected the argument.
        encoding: &'static str,
        /// What was wrong with it.
        message: &'static str,
    },

    /// Input size was not a multiple of the element size.
    InvalidInputSize {
        /// Name of the encoding.
        encoding: &'static str,
        /// The operation that detected the mismatch.
        op: &'static str,
        /// Name of the expected element type.
        type_name: &'static str,
        /// The offending byte length.
        n: usize,
    },

    /// Decoder needed more input bytes than were provided.
    TruncatedInput {
        /// Name of the encoding.
        encoding: &'static str,
    },

    /// A delta header field failed a validation rule (spec §4.4).
    InvalidHeader {
        /// Name of the encoding.
        encoding: &'static str,
        /// Which rule failed.
        detail: &'static str,
    },

    /// A length or prefix field decoded to a negative value.
    NegativeLength {
        /// Name of the encoding.
        encoding: &'static str,
        /// The offending value.
        n: i64,
    },

    /// Sum of lengths exceeds available payload.
    ValueLengthOutOfBounds {
        /// Name of the encoding.
        encoding: &'static str,
        /// Requested length.
        n: usize,
        /// Bytes actually available.
        max: usize,
    },

    /// A prefix was longer than the previous value.
    PrefixLengthOutOfBounds {
        /// Name of the encoding.
        encoding: &'static str,
        /// Requested prefix length.
        prefix_len: usize,
        /// Length of the previous decoded value.
        last_len: usize,
    },

    /// Mismatched prefix/suffix counts in `DELTA_BYTE_ARRAY`.
    PrefixSuffixLengthMismatch {
        /// Number of decoded prefix lengths.
        prefix_count: usize,
        /// Number of decoded suffix lengths.
        suffix_count: usize,
    },

    /// Serialized bloom filter size was not a multiple of 32.
    InvalidFilterSize {
        /// The offending byte length.
        n: usize,
    },

    /// Underlying I/O error (e.g. from a caller-supplied `check_serialized` reader).
    Io(std::io::Error),
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DecodeError({self:?})")
    }
}

impl From<std::io::Error> for DecodeError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Logs a single coarse-grained event when a decode call fails, carrying the
/// encoding name and the error kind (spec §10.2 AMBIENT STACK: "a single
/// `tracing::debug!` when a decode fails"). A no-op unless the `tracing`
/// feature is enabled; never called from inside a hot per-value loop.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
pub(crate) fn trace_decode_failure(encoding: &'static str, err: &DecodeError) {
    #[cfg(feature = "tracing")]
    tracing::debug!(encoding, error = ?err, "decode failed");
}

/// Trait to serialize stuff into a byte stream.
pub trait Encode {
    /// Serializes into writer.
    fn encode_into<W: Write>(&self, writer: &mut W) -> Result<(), EncodeError>;

    /// Serializes into a freshly allocated vector.
    fn encode_into_vec(&self) -> Vec<u8> {
        let mut v = vec![];
        self.encode_into(&mut v)
            .expect("writing to a Vec cannot fail");
        v
    }
}

/// Trait to deserialize stuff from a byte stream.
pub trait Decode {
    /// Deserializes from reader.
    fn decode_from<R: Read>(reader: &mut R) -> Result<Self, DecodeError>
    where
        Self: Sized;
}
