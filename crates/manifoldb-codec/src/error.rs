//! Error types for the codec crate.

use thiserror::Error;

/// Result alias used throughout the codec.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors produced while packing or unpacking values.
///
/// Buffers keep the first error they see and turn every later call into a
/// no-op, so a caller normally only meets one of these at
/// [`PutBuffer::finish`](crate::PutBuffer::finish),
/// [`GetBuffer::done`](crate::GetBuffer::done) or
/// [`KeyBuffer::finish`](crate::KeyBuffer::finish).
#[derive(Debug, Error)]
pub enum CodecError {
    /// A varint ran past 64 bits or the input ended in the middle of one.
    #[error("malformed varint")]
    MalformedVarint,

    /// Too few bytes remained for a fixed-width or length-prefixed read.
    #[error("unexpected end of data: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEndOfData {
        /// Bytes the read required.
        needed: usize,
        /// Bytes that were left.
        remaining: usize,
    },

    /// The decode buffer was not fully consumed.
    #[error("the get buffer has not been completely emptied: {remaining} bytes left")]
    TrailingData {
        /// Unconsumed bytes.
        remaining: usize,
    },

    /// A packed string was not valid UTF-8.
    #[error("invalid UTF-8 in packed string: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// A packed timestamp is outside the representable range.
    #[error("timestamp out of range: {0} seconds since epoch")]
    InvalidTimestamp(i64),

    /// A length prefix exceeded the configured maximum field length.
    #[error("field length {len} exceeds limit of {max} bytes")]
    LengthLimitExceeded {
        /// Length read from the prefix.
        len: u64,
        /// Configured limit.
        max: usize,
    },

    /// An error handed to a buffer by the caller.
    #[error(transparent)]
    External(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl CodecError {
    /// Wraps an application error so it can be stored in a buffer.
    #[must_use]
    pub fn external<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Self::External(err.into())
    }

    /// Shorthand for [`CodecError::UnexpectedEndOfData`].
    #[must_use]
    pub const fn end_of_data(needed: usize, remaining: usize) -> Self {
        Self::UnexpectedEndOfData { needed, remaining }
    }

    /// Returns a short, stable name for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MalformedVarint => "malformed_varint",
            Self::UnexpectedEndOfData { .. } => "unexpected_end_of_data",
            Self::TrailingData { .. } => "trailing_data",
            Self::InvalidUtf8(_) => "invalid_utf8",
            Self::InvalidTimestamp(_) => "invalid_timestamp",
            Self::LengthLimitExceeded { .. } => "length_limit_exceeded",
            Self::External(_) => "external",
        }
    }
}
