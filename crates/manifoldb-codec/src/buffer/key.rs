//! Fixed-width key buffer.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::CodecConfig;
use crate::encoding::keys::{
    key_bytes, key_i16, key_i32, key_i64, key_i8, key_str, key_timestamp, key_u16, key_u32,
    key_u64, key_u8,
};
use crate::error::{CodecError, CodecResult};

/// Builds sortable index keys out of fixed-width segments.
///
/// Unlike [`PutBuffer`](crate::PutBuffer), every field (including strings and
/// byte slices) occupies a fixed number of bytes, and signed integers use
/// excess representation. Keys built with the same sequence of calls compare
/// bytewise in the same order as the values they were built from, field by
/// field.
///
/// # Example
///
/// ```
/// use manifoldb_codec::KeyBuffer;
///
/// let key = |a: i64, name: &str| {
///     let mut kb = KeyBuffer::new();
///     kb.put_i64(a).put_str(name, 8);
///     kb.finish().unwrap()
/// };
///
/// assert!(key(-3, "zed") < key(10, "abc"));
/// assert!(key(10, "abc") < key(10, "abd"));
/// ```
#[derive(Debug, Default)]
pub struct KeyBuffer {
    buf: Vec<u8>,
    err: Option<CodecError>,
}

impl KeyBuffer {
    /// Creates an empty key buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty key buffer with room for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { buf: Vec::with_capacity(capacity), err: None }
    }

    /// Creates an empty key buffer sized by `config`.
    #[must_use]
    pub fn with_config(config: &CodecConfig) -> Self {
        Self::with_capacity(config.initial_capacity)
    }

    #[inline]
    fn write(&mut self, segment: &[u8]) -> &mut Self {
        if self.err.is_none() {
            self.buf.extend_from_slice(segment);
        }
        self
    }

    /// Appends a timestamp as 8 bytes of whole seconds.
    pub fn put_timestamp(&mut self, ts: &DateTime<Utc>) -> &mut Self {
        self.write(&key_timestamp(ts))
    }

    /// Appends a `u64` as 8 bytes.
    pub fn put_u64(&mut self, value: u64) -> &mut Self {
        self.write(&key_u64(value))
    }

    /// Appends an `i64` as 8 bytes.
    pub fn put_i64(&mut self, value: i64) -> &mut Self {
        self.write(&key_i64(value))
    }

    /// Appends a `u32` as 4 bytes.
    pub fn put_u32(&mut self, value: u32) -> &mut Self {
        self.write(&key_u32(value))
    }

    /// Appends an `i32` as 4 bytes.
    pub fn put_i32(&mut self, value: i32) -> &mut Self {
        self.write(&key_i32(value))
    }

    /// Appends a `u16` as 2 bytes.
    pub fn put_u16(&mut self, value: u16) -> &mut Self {
        self.write(&key_u16(value))
    }

    /// Appends an `i16` as 2 bytes.
    pub fn put_i16(&mut self, value: i16) -> &mut Self {
        self.write(&key_i16(value))
    }

    /// Appends a `u8` as 1 byte.
    pub fn put_u8(&mut self, value: u8) -> &mut Self {
        self.write(&[key_u8(value)])
    }

    /// Appends an `i8` as 1 byte.
    pub fn put_i8(&mut self, value: i8) -> &mut Self {
        self.write(&[key_i8(value)])
    }

    /// Appends `text` truncated or space-padded to `width` bytes.
    pub fn put_str(&mut self, text: &str, width: usize) -> &mut Self {
        if self.err.is_none() {
            key_str(text, width, &mut self.buf);
        }
        self
    }

    /// Appends `data` truncated or zero-padded to `width` bytes.
    pub fn put_bytes(&mut self, data: &[u8], width: usize) -> &mut Self {
        if self.err.is_none() {
            key_bytes(data, width, &mut self.buf);
        }
        self
    }

    /// Stores an error, replacing whatever was recorded before.
    pub fn set_error(&mut self, err: impl Into<CodecError>) {
        let err = err.into();
        debug!(kind = err.kind(), replaced = self.err.is_some(), "key buffer error set by caller");
        self.err = Some(err);
    }

    /// Returns the stored error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&CodecError> {
        self.err.as_ref()
    }

    /// Length of the key built so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if no segment has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the key built so far, or `None` if an error is stored.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.err.is_none().then_some(self.buf.as_slice())
    }

    /// Clears the key and any stored error so the buffer can be reused.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.err = None;
    }

    /// Consumes the buffer and returns the key.
    ///
    /// # Errors
    ///
    /// Returns the stored error, in which case no key is returned.
    pub fn finish(self) -> CodecResult<Vec<u8>> {
        match self.err {
            None => Ok(self.buf),
            Some(err) => Err(err),
        }
    }
}
