//! Sequential encode buffer.

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::config::{CodecConfig, DEFAULT_MAX_FIELD_LEN};
use crate::encoding::varint::{encode_uvarint, encode_varint};
use crate::error::{CodecError, CodecResult};

/// Packs a sequence of values into one compact byte vector.
///
/// Integers wider than eight bits are varint encoded (zig-zag for signed
/// types), strings and byte slices are prefixed with their varint length, and
/// 8-bit values are written as single raw bytes. Nothing describes the
/// fields, so the matching [`GetBuffer`](crate::GetBuffer) calls must mirror
/// the put calls in type and order.
///
/// Once an error is stored every put becomes a no-op, so a long run of calls
/// only needs checking once, at [`finish`](Self::finish).
///
/// Strings, byte slices and counts longer than the configured
/// `max_field_len` are refused with [`CodecError::LengthLimitExceeded`], the
/// same limit a [`GetBuffer`](crate::GetBuffer) enforces when reading.
///
/// # Example
///
/// ```
/// use manifoldb_codec::{GetBuffer, PutBuffer};
///
/// let mut put = PutBuffer::new();
/// put.put_u32(7).put_i64(-3).put_str("seven");
/// let data = put.finish().unwrap();
///
/// let (mut a, mut b, mut c) = (0u32, 0i64, String::new());
/// let mut get = GetBuffer::new(&data);
/// get.get_u32(&mut a).get_i64(&mut b).get_str(&mut c);
/// get.done().unwrap();
/// assert_eq!((a, b, c.as_str()), (7, -3, "seven"));
/// ```
#[derive(Debug)]
pub struct PutBuffer {
    buf: Vec<u8>,
    max_field_len: usize,
    err: Option<CodecError>,
}

impl Default for PutBuffer {
    fn default() -> Self {
        Self { buf: Vec::new(), max_field_len: DEFAULT_MAX_FIELD_LEN, err: None }
    }
}

impl PutBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with room for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { buf: Vec::with_capacity(capacity), ..Self::default() }
    }

    /// Creates an empty buffer sized and limited by `config`.
    #[must_use]
    pub fn with_config(config: &CodecConfig) -> Self {
        Self { max_field_len: config.max_field_len, ..Self::with_capacity(config.initial_capacity) }
    }

    #[inline]
    fn is_live(&self) -> bool {
        self.err.is_none()
    }

    fn fail(&mut self, err: CodecError) {
        trace!(kind = err.kind(), offset = self.buf.len(), "put buffer error recorded");
        self.err = Some(err);
    }

    /// Records an error unless `len` fits within the field limit.
    fn check_len(&mut self, len: usize) -> bool {
        if !self.is_live() {
            return false;
        }
        if len > self.max_field_len {
            self.fail(CodecError::LengthLimitExceeded { len: len as u64, max: self.max_field_len });
            return false;
        }
        true
    }

    /// Packs a `u64`.
    pub fn put_u64(&mut self, value: u64) -> &mut Self {
        if self.is_live() {
            encode_uvarint(value, &mut self.buf);
        }
        self
    }

    /// Packs an `i64`.
    pub fn put_i64(&mut self, value: i64) -> &mut Self {
        if self.is_live() {
            encode_varint(value, &mut self.buf);
        }
        self
    }

    /// Packs a `u32`.
    pub fn put_u32(&mut self, value: u32) -> &mut Self {
        self.put_u64(u64::from(value))
    }

    /// Packs an `i32`.
    pub fn put_i32(&mut self, value: i32) -> &mut Self {
        self.put_i64(i64::from(value))
    }

    /// Packs a `u16`.
    pub fn put_u16(&mut self, value: u16) -> &mut Self {
        self.put_u64(u64::from(value))
    }

    /// Packs an `i16`.
    pub fn put_i16(&mut self, value: i16) -> &mut Self {
        self.put_i64(i64::from(value))
    }

    /// Packs a `u8` as one raw byte.
    pub fn put_u8(&mut self, value: u8) -> &mut Self {
        if self.is_live() {
            self.buf.push(value);
        }
        self
    }

    /// Packs an `i8` as one raw two's complement byte.
    pub fn put_i8(&mut self, value: i8) -> &mut Self {
        self.put_u8(value as u8)
    }

    /// Packs a `bool` as one byte, `0` or `1`.
    pub fn put_bool(&mut self, value: bool) -> &mut Self {
        self.put_u8(u8::from(value))
    }

    /// Packs a collection length or other count.
    ///
    /// This is the count prefix written ahead of repeated elements; see
    /// [`encoding::collections`](crate::encoding::collections).
    pub fn put_len(&mut self, len: usize) -> &mut Self {
        if self.check_len(len) {
            encode_uvarint(len as u64, &mut self.buf);
        }
        self
    }

    /// Packs a string as a varint length followed by its UTF-8 bytes.
    pub fn put_str(&mut self, value: &str) -> &mut Self {
        self.put_bytes(value.as_bytes())
    }

    /// Packs a byte slice as a varint length followed by the bytes.
    pub fn put_bytes(&mut self, value: &[u8]) -> &mut Self {
        if self.check_len(value.len()) {
            encode_uvarint(value.len() as u64, &mut self.buf);
            self.buf.extend_from_slice(value);
        }
        self
    }

    /// Packs a timestamp as zig-zag varint seconds since the Unix epoch.
    ///
    /// Sub-second precision is discarded.
    pub fn put_timestamp(&mut self, ts: &DateTime<Utc>) -> &mut Self {
        self.put_i64(ts.timestamp())
    }

    /// Stores an error, replacing whatever was recorded before.
    ///
    /// Later puts are ignored and [`finish`](Self::finish) returns this error.
    pub fn set_error(&mut self, err: impl Into<CodecError>) {
        let err = err.into();
        debug!(kind = err.kind(), replaced = self.err.is_some(), "put buffer error set by caller");
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
        self.is_live()
    }

    /// Number of bytes packed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been packed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the packed bytes, or `None` if an error is stored.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.is_live().then_some(self.buf.as_slice())
    }

    /// Clears packed content and any stored error, keeping the allocation.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.err = None;
    }

    /// Consumes the buffer and returns the packed bytes.
    ///
    /// # Errors
    ///
    /// Returns the stored error, in which case no bytes are returned.
    pub fn finish(self) -> CodecResult<Vec<u8>> {
        match self.err {
            None => Ok(self.buf),
            Some(err) => Err(err),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn empty_buffer_finishes_empty() {
        let put = PutBuffer::new();
        assert!(put.is_empty());
        assert_eq!(put.finish().unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn integers_use_varints() {
        let mut put = PutBuffer::new();
        put.put_u64(300).put_i64(-1).put_u32(127).put_i32(64).put_u16(128).put_i16(-65);
        assert_eq!(put.finish().unwrap(), [0xAC, 0x02, 0x01, 0x7F, 0x80, 0x01, 0x80, 0x01, 0x81, 0x01]);
    }

    #[test]
    fn eight_bit_values_are_raw_bytes() {
        let mut put = PutBuffer::new();
        put.put_u8(212).put_i8(-34).put_bool(true).put_bool(false);
        assert_eq!(put.finish().unwrap(), [212, 0xDE, 1, 0]);
    }

    #[test]
    fn strings_and_bytes_are_length_prefixed() {
        let mut put = PutBuffer::new();
        put.put_str("example").put_bytes(&[42, 41, 40]).put_str("");
        let mut expected = vec![7];
        expected.extend_from_slice(b"example");
        expected.extend_from_slice(&[3, 42, 41, 40, 0]);
        assert_eq!(put.finish().unwrap(), expected);
    }

    #[test]
    fn long_string_prefix_is_multi_byte() {
        let text = "x".repeat(200);
        let mut put = PutBuffer::new();
        put.put_str(&text);
        let data = put.finish().unwrap();
        assert_eq!(&data[..2], &[0xC8, 0x01]);
        assert_eq!(data.len(), 202);
    }

    #[test]
    fn timestamp_is_signed_seconds() {
        let ts = Utc.with_ymd_and_hms(1969, 12, 31, 23, 59, 59).unwrap();
        let mut put = PutBuffer::new();
        put.put_timestamp(&ts);
        assert_eq!(put.finish().unwrap(), [0x01]);
    }

    #[test]
    fn set_error_discards_output() {
        let mut put = PutBuffer::new();
        put.put_i8(-2);
        put.set_error(CodecError::external("test error"));
        assert!(put.error().is_some());
        assert!(put.as_bytes().is_none());
        let err = put.finish().unwrap_err();
        assert_eq!(err.to_string(), "test error");
    }

    #[test]
    fn puts_after_error_are_ignored() {
        let mut put = PutBuffer::new();
        put.put_u8(1);
        put.set_error(CodecError::external("stop"));
        put.put_u64(99).put_str("ignored");
        assert_eq!(put.len(), 1);
    }

    #[test]
    fn set_error_overwrites() {
        let mut put = PutBuffer::new();
        put.set_error(CodecError::external("first"));
        put.set_error(CodecError::MalformedVarint);
        assert!(matches!(put.finish(), Err(CodecError::MalformedVarint)));
    }

    #[test]
    fn reset_clears_content_and_error() {
        let mut put = PutBuffer::with_capacity(16);
        put.put_u64(5);
        put.set_error(CodecError::external("boom"));
        put.reset();
        assert!(put.is_ok());
        assert!(put.is_empty());
        put.put_u8(9);
        assert_eq!(put.as_bytes(), Some(&[9u8][..]));
    }

    #[test]
    fn field_over_limit_is_refused() {
        let config = CodecConfig::default().with_max_field_len(16);
        let mut put = PutBuffer::with_config(&config);
        put.put_bytes(&[7u8; 16]);
        assert!(put.is_ok());
        put.put_bytes(&[7u8; 17]).put_u8(1);
        assert_eq!(put.len(), 17);
        assert!(matches!(put.finish(), Err(CodecError::LengthLimitExceeded { len: 17, max: 16 })));
    }

    #[test]
    fn count_over_limit_is_refused() {
        let config = CodecConfig::default().with_max_field_len(2);
        let mut put = PutBuffer::with_config(&config);
        put.put_len(3);
        assert!(put.is_empty());
        assert!(matches!(put.error(), Some(CodecError::LengthLimitExceeded { len: 3, max: 2 })));
    }

    #[test]
    fn first_recorded_error_wins() {
        let config = CodecConfig::default().with_max_field_len(4);
        let mut put = PutBuffer::with_config(&config);
        put.put_str("too long");
        put.put_len(99).put_str("also too long").put_bytes(&[0; 5]);
        assert!(matches!(put.finish(), Err(CodecError::LengthLimitExceeded { len: 8, max: 4 })));
    }

    #[test]
    fn config_sets_capacity() {
        let config = CodecConfig::default().with_initial_capacity(512);
        let put = PutBuffer::with_config(&config);
        assert!(put.buf.capacity() >= 512);
    }
}
