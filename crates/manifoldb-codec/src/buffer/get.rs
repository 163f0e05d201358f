//! Sequential decode buffer.

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::config::{CodecConfig, DEFAULT_MAX_FIELD_LEN};
use crate::encoding::varint::{decode_uvarint, decode_varint};
use crate::error::{CodecError, CodecResult};

/// Unpacks values from bytes produced by a [`PutBuffer`](crate::PutBuffer).
///
/// Each get call consumes a prefix of the remaining input and writes the
/// decoded value into the location the caller passes in. If the call fails,
/// or an earlier call already failed, the location is left untouched.
///
/// The get sequence must mirror the put sequence. The buffer only checks
/// structure (varint termination, length prefixes, remaining byte counts),
/// so a mismatched sequence either yields wrong values or fails at the first
/// short read or at [`done`](Self::done).
#[derive(Debug)]
pub struct GetBuffer<'a> {
    rest: &'a [u8],
    offset: usize,
    max_field_len: usize,
    err: Option<CodecError>,
}

impl<'a> GetBuffer<'a> {
    /// Creates a buffer reading from `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { rest: data, offset: 0, max_field_len: DEFAULT_MAX_FIELD_LEN, err: None }
    }

    /// Creates a buffer reading from `data` with limits from `config`.
    #[must_use]
    pub fn with_config(data: &'a [u8], config: &CodecConfig) -> Self {
        Self { max_field_len: config.max_field_len, ..Self::new(data) }
    }

    fn fail(&mut self, err: CodecError) {
        trace!(kind = err.kind(), offset = self.offset, "get buffer error recorded");
        self.err = Some(err);
    }

    fn advance(&mut self, n: usize) -> &'a [u8] {
        let (head, tail) = self.rest.split_at(n);
        self.rest = tail;
        self.offset += n;
        head
    }

    fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        if self.err.is_some() {
            return None;
        }
        if self.rest.len() < n {
            self.fail(CodecError::end_of_data(n, self.rest.len()));
            return None;
        }
        Some(self.advance(n))
    }

    fn read_uvarint(&mut self) -> Option<u64> {
        if self.err.is_some() {
            return None;
        }
        match decode_uvarint(self.rest) {
            Ok((value, read)) => {
                self.advance(read);
                Some(value)
            }
            Err(err) => {
                self.fail(err);
                None
            }
        }
    }

    fn read_varint(&mut self) -> Option<i64> {
        if self.err.is_some() {
            return None;
        }
        match decode_varint(self.rest) {
            Ok((value, read)) => {
                self.advance(read);
                Some(value)
            }
            Err(err) => {
                self.fail(err);
                None
            }
        }
    }

    /// Reads a length prefix and checks it against the field limit.
    fn read_len(&mut self) -> Option<usize> {
        let len = self.read_uvarint()?;
        match usize::try_from(len) {
            Ok(n) if n <= self.max_field_len => Some(n),
            _ => {
                self.fail(CodecError::LengthLimitExceeded { len, max: self.max_field_len });
                None
            }
        }
    }

    fn read_field(&mut self) -> Option<&'a [u8]> {
        let len = self.read_len()?;
        self.take(len)
    }

    /// Unpacks a `u64`.
    pub fn get_u64(&mut self, out: &mut u64) -> &mut Self {
        if let Some(value) = self.read_uvarint() {
            *out = value;
        }
        self
    }

    /// Unpacks an `i64`.
    pub fn get_i64(&mut self, out: &mut i64) -> &mut Self {
        if let Some(value) = self.read_varint() {
            *out = value;
        }
        self
    }

    /// Unpacks a `u32`.
    ///
    /// A wider value written in its place is truncated to 32 bits.
    pub fn get_u32(&mut self, out: &mut u32) -> &mut Self {
        if let Some(value) = self.read_uvarint() {
            *out = value as u32;
        }
        self
    }

    /// Unpacks an `i32`.
    ///
    /// A wider value written in its place is truncated to 32 bits.
    pub fn get_i32(&mut self, out: &mut i32) -> &mut Self {
        if let Some(value) = self.read_varint() {
            *out = value as i32;
        }
        self
    }

    /// Unpacks a `u16`.
    pub fn get_u16(&mut self, out: &mut u16) -> &mut Self {
        if let Some(value) = self.read_uvarint() {
            *out = value as u16;
        }
        self
    }

    /// Unpacks an `i16`.
    pub fn get_i16(&mut self, out: &mut i16) -> &mut Self {
        if let Some(value) = self.read_varint() {
            *out = value as i16;
        }
        self
    }

    /// Unpacks a `u8` from one raw byte.
    pub fn get_u8(&mut self, out: &mut u8) -> &mut Self {
        if let Some(bytes) = self.take(1) {
            *out = bytes[0];
        }
        self
    }

    /// Unpacks an `i8` from one raw byte.
    pub fn get_i8(&mut self, out: &mut i8) -> &mut Self {
        if let Some(bytes) = self.take(1) {
            *out = bytes[0] as i8;
        }
        self
    }

    /// Unpacks a `bool`; any non-zero byte reads as `true`.
    pub fn get_bool(&mut self, out: &mut bool) -> &mut Self {
        if let Some(bytes) = self.take(1) {
            *out = bytes[0] != 0;
        }
        self
    }

    /// Unpacks a count written by [`PutBuffer::put_len`](crate::PutBuffer::put_len).
    ///
    /// Counts above the configured field limit are rejected with
    /// [`CodecError::LengthLimitExceeded`].
    pub fn get_len(&mut self, out: &mut usize) -> &mut Self {
        if let Some(len) = self.read_len() {
            *out = len;
        }
        self
    }

    /// Unpacks a length-prefixed UTF-8 string.
    pub fn get_str(&mut self, out: &mut String) -> &mut Self {
        if let Some(bytes) = self.read_field() {
            match String::from_utf8(bytes.to_vec()) {
                Ok(text) => *out = text,
                Err(err) => self.fail(err.into()),
            }
        }
        self
    }

    /// Unpacks a length-prefixed byte vector.
    pub fn get_bytes(&mut self, out: &mut Vec<u8>) -> &mut Self {
        if let Some(bytes) = self.read_field() {
            out.clear();
            out.extend_from_slice(bytes);
        }
        self
    }

    /// Unpacks a timestamp written as seconds since the Unix epoch.
    pub fn get_timestamp(&mut self, out: &mut DateTime<Utc>) -> &mut Self {
        if let Some(secs) = self.read_varint() {
            match DateTime::from_timestamp(secs, 0) {
                Some(ts) => *out = ts,
                None => self.fail(CodecError::InvalidTimestamp(secs)),
            }
        }
        self
    }

    /// Stores an error, replacing whatever was recorded before.
    ///
    /// Later gets are ignored and [`done`](Self::done) returns this error.
    pub fn set_error(&mut self, err: impl Into<CodecError>) {
        let err = err.into();
        debug!(kind = err.kind(), replaced = self.err.is_some(), "get buffer error set by caller");
        self.err = Some(err);
    }

    /// Returns the stored error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&CodecError> {
        self.err.as_ref()
    }

    /// Returns `true` if no error has been stored.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.err.is_none()
    }

    /// Number of bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rest.len()
    }

    /// Number of bytes consumed so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Finishes decoding.
    ///
    /// # Errors
    ///
    /// Returns the stored error if one was recorded, otherwise
    /// [`CodecError::TrailingData`] if input remains unconsumed.
    pub fn done(self) -> CodecResult<()> {
        if let Some(err) = self.err {
            return Err(err);
        }
        if !self.rest.is_empty() {
            debug!(remaining = self.rest.len(), offset = self.offset, "get buffer not emptied");
            return Err(CodecError::TrailingData { remaining: self.rest.len() });
        }
        Ok(())
    }
}
