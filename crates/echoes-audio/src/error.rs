//! Error types for WAV encoding and header decoding.

use std::io;

use thiserror::Error;

/// Errors produced while packaging PCM into a WAV container.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A format parameter is zero or does not fit its header field.
    #[error("invalid audio format: {field} {reason}")]
    InvalidFormat {
        /// Name of the offending parameter.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// The payload is larger than a RIFF size field can describe.
    #[error("PCM payload of {0} bytes exceeds the 4 GiB WAV size limit")]
    PayloadTooLarge(usize),

    /// The underlying writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl EncodeError {
    pub(crate) fn non_positive(field: &'static str) -> Self {
        EncodeError::InvalidFormat {
            field,
            reason: "must be positive",
        }
    }

    pub(crate) fn overflow(field: &'static str) -> Self {
        EncodeError::InvalidFormat {
            field,
            reason: "overflows its WAV header field",
        }
    }

    /// Returns true for the "invalid audio format" class of errors.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, EncodeError::InvalidFormat { .. })
    }
}

/// Errors produced while reading back a WAV header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Fewer bytes than the canonical 44-byte header.
    #[error("WAV data too short: {0} bytes (minimum 44 required)")]
    TooShort(usize),

    /// A fixed four-character code did not match.
    #[error("invalid {expected} identifier at offset {offset}")]
    BadIdentifier {
        /// The identifier that was expected there.
        expected: &'static str,
        /// Byte offset of the identifier.
        offset: usize,
    },

    /// A required chunk never appeared.
    #[error("missing {0} chunk")]
    MissingChunk(&'static str),

    /// A chunk claims more bytes than the buffer holds.
    #[error("truncated {chunk} chunk at offset {offset}")]
    Truncated {
        /// Chunk identifier.
        chunk: &'static str,
        /// Byte offset of the chunk header.
        offset: usize,
    },
}
