//! Fixed-width, order-preserving key encoding.
//!
//! Every function here produces a segment whose unsigned lexicographic byte
//! order matches the natural order of the source value, so composite keys
//! built by concatenating segments sort correctly with a single `memcmp`.
//!
//! # Segment Formats
//!
//! | Source            | Width     | Encoding                                  |
//! |-------------------|-----------|-------------------------------------------|
//! | `u64/u32/u16/u8`  | 8/4/2/1   | big-endian                                |
//! | `i64/i32/i16/i8`  | 8/4/2/1   | excess-2^(N-1), big-endian                |
//! | timestamp         | 8         | `i64` seconds since the Unix epoch        |
//! | text              | caller    | truncated or padded with `0x20`           |
//! | bytes             | caller    | truncated or padded with `0x00`           |
//!
//! ## Signed Integers
//!
//! Signed integers use excess (offset binary) representation: adding
//! `2^(N-1)` maps the most negative value to all zero bits and the most
//! positive value to all one bits. Modulo `2^N` that is the same as flipping
//! the sign bit, which is how it is computed.
//!
//! ## Text and Bytes
//!
//! Segments carry no length or terminator. Values longer than the width are
//! truncated, so two values sharing their first `width` bytes produce the
//! same segment. Width is measured in bytes of the UTF-8 encoding; truncation
//! may therefore split a multi-byte character.
//!
//! # Example
//!
//! ```
//! use manifoldb_codec::encoding::keys::{key_i64, key_str};
//!
//! assert!(key_i64(-1) < key_i64(1));
//!
//! let mut key = Vec::new();
//! key.extend_from_slice(&key_i64(-3));
//! key_str("do", 4, &mut key);
//! assert_eq!(&key[8..], b"do  ");
//! ```

use chrono::{DateTime, Utc};

/// Fill byte for text segments shorter than their width.
pub const TEXT_PAD: u8 = b' ';
/// Fill byte for byte segments shorter than their width.
pub const BYTES_PAD: u8 = 0x00;

const SIGN_FLIP_I64: u64 = 1 << 63;
const SIGN_FLIP_I32: u32 = 1 << 31;
const SIGN_FLIP_I16: u16 = 1 << 15;
const SIGN_FLIP_I8: u8 = 1 << 7;

/// Encode a `u64` as an 8-byte key segment.
#[inline]
#[must_use]
pub const fn key_u64(value: u64) -> [u8; 8] {
    value.to_be_bytes()
}

/// Encode an `i64` as an 8-byte key segment.
#[inline]
#[must_use]
pub const fn key_i64(value: i64) -> [u8; 8] {
    key_u64(value as u64 ^ SIGN_FLIP_I64)
}

/// Encode a `u32` as a 4-byte key segment.
#[inline]
#[must_use]
pub const fn key_u32(value: u32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Encode an `i32` as a 4-byte key segment.
#[inline]
#[must_use]
pub const fn key_i32(value: i32) -> [u8; 4] {
    key_u32(value as u32 ^ SIGN_FLIP_I32)
}

/// Encode a `u16` as a 2-byte key segment.
#[inline]
#[must_use]
pub const fn key_u16(value: u16) -> [u8; 2] {
    value.to_be_bytes()
}

/// Encode an `i16` as a 2-byte key segment.
#[inline]
#[must_use]
pub const fn key_i16(value: i16) -> [u8; 2] {
    key_u16(value as u16 ^ SIGN_FLIP_I16)
}

/// Encode a `u8` as a single key byte.
#[inline]
#[must_use]
pub const fn key_u8(value: u8) -> u8 {
    value
}

/// Encode an `i8` as a single key byte.
#[inline]
#[must_use]
pub const fn key_i8(value: i8) -> u8 {
    value as u8 ^ SIGN_FLIP_I8
}

/// Encode a timestamp as an 8-byte key segment.
///
/// Only whole seconds are kept; sub-second precision is discarded.
#[inline]
#[must_use]
pub fn key_timestamp(ts: &DateTime<Utc>) -> [u8; 8] {
    key_i64(ts.timestamp())
}

/// Append `text` to `buf` as a segment of exactly `width` bytes.
///
/// Longer text is truncated; shorter text is padded with [`TEXT_PAD`].
#[inline]
pub fn key_str(text: &str, width: usize, buf: &mut Vec<u8>) {
    put_fixed(text.as_bytes(), width, TEXT_PAD, buf);
}

/// Append `data` to `buf` as a segment of exactly `width` bytes.
///
/// Longer data is truncated; shorter data is padded with [`BYTES_PAD`].
#[inline]
pub fn key_bytes(data: &[u8], width: usize, buf: &mut Vec<u8>) {
    put_fixed(data, width, BYTES_PAD, buf);
}

fn put_fixed(data: &[u8], width: usize, pad: u8, buf: &mut Vec<u8>) {
    if data.len() >= width {
        buf.extend_from_slice(&data[..width]);
    } else {
        buf.extend_from_slice(data);
        buf.resize(buf.len() + (width - data.len()), pad);
    }
}

// ============================================================================
// Segment Decoding
// ============================================================================

/// Decode an 8-byte key segment produced by [`key_i64`].
#[inline]
#[must_use]
pub const fn decode_key_i64(segment: [u8; 8]) -> i64 {
    (u64::from_be_bytes(segment) ^ SIGN_FLIP_I64) as i64
}

/// Decode a 4-byte key segment produced by [`key_i32`].
#[inline]
#[must_use]
pub const fn decode_key_i32(segment: [u8; 4]) -> i32 {
    (u32::from_be_bytes(segment) ^ SIGN_FLIP_I32) as i32
}

/// Decode a 2-byte key segment produced by [`key_i16`].
#[inline]
#[must_use]
pub const fn decode_key_i16(segment: [u8; 2]) -> i16 {
    (u16::from_be_bytes(segment) ^ SIGN_FLIP_I16) as i16
}

/// Decode a key byte produced by [`key_i8`].
#[inline]
#[must_use]
pub const fn decode_key_i8(byte: u8) -> i8 {
    (byte ^ SIGN_FLIP_I8) as i8
}

/// Decode an 8-byte key segment produced by [`key_timestamp`].
///
/// Returns `None` if the seconds fall outside the range `chrono` can hold.
#[inline]
#[must_use]
pub fn decode_key_timestamp(segment: [u8; 8]) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(decode_key_i64(segment), 0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // ========================================================================
    // Excess representation
    // ========================================================================

    #[test]
    fn signed_extremes_map_to_all_zero_and_all_one_bits() {
        assert_eq!(key_i64(i64::MIN), [0x00; 8]);
        assert_eq!(key_i64(i64::MAX), [0xFF; 8]);
        assert_eq!(key_i32(i32::MIN), [0x00; 4]);
        assert_eq!(key_i32(i32::MAX), [0xFF; 4]);
        assert_eq!(key_i16(i16::MIN), [0x00; 2]);
        assert_eq!(key_i16(i16::MAX), [0xFF; 2]);
        assert_eq!(key_i8(i8::MIN), 0x00);
        assert_eq!(key_i8(i8::MAX), 0xFF);
    }

    #[test]
    fn zero_sits_at_half_range() {
        assert_eq!(key_i64(0), [0x80, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(key_i32(0), [0x80, 0, 0, 0]);
        assert_eq!(key_i16(0), [0x80, 0]);
        assert_eq!(key_i8(0), 0x80);
    }

    #[test]
    fn known_segments() {
        assert_eq!(key_u64(3_565_123_234_760), [0x00, 0x00, 0x03, 0x3E, 0x11, 0xE7, 0x6B, 0xC8]);
        assert_eq!(key_i64(-50_496_192_383), [0x7F, 0xFF, 0xFF, 0xF4, 0x3E, 0x31, 0x40, 0x81]);
        assert_eq!(key_u32(5_470_129), [0x00, 0x53, 0x77, 0xB1]);
        assert_eq!(key_i32(-50_129), [0x7F, 0xFF, 0x3C, 0x2F]);
        assert_eq!(key_u16(45_092), [0xB0, 0x24]);
        assert_eq!(key_i16(-30_901), [0x07, 0x4B]);
        assert_eq!(key_i8(-34), 0x5E);
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    #[test]
    fn sign_crossing_pairs_order() {
        assert!(key_i64(-1) < key_i64(1));
        assert!(key_i64(-1) < key_i64(0));
        assert!(key_i32(-1) < key_i32(1));
        assert!(key_i16(-1) < key_i16(1));
        assert!(key_i8(-1) < key_i8(1));
    }

    #[test]
    fn sorted_values_produce_sorted_keys() {
        let values = [i64::MIN, -1_000_000, -2, -1, 0, 1, 2, 1_000_000, i64::MAX];
        let keys: Vec<_> = values.iter().map(|&v| key_i64(v)).collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn timestamps_order_across_epoch() {
        let before = Utc.with_ymd_and_hms(1969, 7, 20, 20, 17, 0).unwrap();
        let epoch = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(1997, 11, 28, 12, 0, 0).unwrap();
        assert!(key_timestamp(&before) < key_timestamp(&epoch));
        assert!(key_timestamp(&epoch) < key_timestamp(&after));
        assert_eq!(key_timestamp(&after), [0x80, 0x00, 0x00, 0x00, 0x34, 0x7E, 0xB2, 0x40]);
    }

    #[test]
    fn timestamp_drops_sub_second_precision() {
        let whole = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let fractional = whole + chrono::Duration::milliseconds(750);
        assert_eq!(key_timestamp(&whole), key_timestamp(&fractional));
    }

    // ========================================================================
    // Fixed-width text and bytes
    // ========================================================================

    #[test]
    fn text_truncates_to_width() {
        let mut buf = Vec::new();
        key_str("example", 4, &mut buf);
        assert_eq!(buf, b"exam");
    }

    #[test]
    fn text_pads_with_spaces() {
        let mut buf = Vec::new();
        key_str("do", 4, &mut buf);
        assert_eq!(buf, b"do  ");
    }

    #[test]
    fn text_exact_width_is_unchanged() {
        let mut buf = Vec::new();
        key_str("abcd", 4, &mut buf);
        assert_eq!(buf, b"abcd");
    }

    #[test]
    fn zero_width_emits_nothing() {
        let mut buf = Vec::new();
        key_str("abc", 0, &mut buf);
        key_bytes(&[1, 2], 0, &mut buf);
        assert!(buf.is_empty());
    }

    #[test]
    fn bytes_pad_with_zero() {
        let mut buf = Vec::new();
        key_bytes(&[1, 2, 3, 4, 5], 4, &mut buf);
        key_bytes(&[1, 2], 4, &mut buf);
        assert_eq!(buf, [1, 2, 3, 4, 1, 2, 0, 0]);
    }

    #[test]
    fn width_counts_utf8_bytes() {
        let mut buf = Vec::new();
        // "é" is two bytes; a width of 3 keeps "aé" and nothing more.
        key_str("aéz", 3, &mut buf);
        assert_eq!(buf, "aé".as_bytes());
    }

    #[test]
    fn truncation_collides_on_shared_prefix() {
        // Known boundary: values equal in their first `width` bytes are
        // indistinguishable once encoded.
        let mut a = Vec::new();
        let mut b = Vec::new();
        key_str("rstuvwxyz", 8, &mut a);
        key_str("rstuvwxy!", 8, &mut b);
        assert_eq!(a, b);
    }

    // ========================================================================
    // Decoding
    // ========================================================================

    #[test]
    fn signed_segments_decode() {
        for v in [i64::MIN, -1, 0, 1, i64::MAX] {
            assert_eq!(decode_key_i64(key_i64(v)), v);
        }
        for v in [i32::MIN, -50_129, 0, i32::MAX] {
            assert_eq!(decode_key_i32(key_i32(v)), v);
        }
        for v in [i16::MIN, -30_901, 0, i16::MAX] {
            assert_eq!(decode_key_i16(key_i16(v)), v);
        }
        for v in [i8::MIN, -34, 0, i8::MAX] {
            assert_eq!(decode_key_i8(key_i8(v)), v);
        }
    }

    #[test]
    fn timestamp_segment_decodes() {
        let ts = Utc.with_ymd_and_hms(1997, 11, 28, 12, 0, 0).unwrap();
        assert_eq!(decode_key_timestamp(key_timestamp(&ts)), Some(ts));
        assert_eq!(decode_key_timestamp(key_i64(i64::MAX)), None);
    }
}
