//! Variable-length integer encoding.
//!
//! Unsigned values use base-128 continuation encoding (LEB128): each byte
//! carries seven value bits, least-significant group first, and the high bit
//! is set on every byte except the last.
//!
//! | Value range              | Bytes |
//! |--------------------------|-------|
//! | 0 - 127                  | 1     |
//! | 128 - 16383              | 2     |
//! | 16384 - 2097151          | 3     |
//! | ...                      | ...   |
//! | 2^63 - u64::MAX          | 10    |
//!
//! Signed values are zig-zag mapped first so that small magnitudes of either
//! sign stay short:
//!
//! ```text
//!  0 -> 0    -1 -> 1    1 -> 2    -2 -> 3    2 -> 4 ...
//! ```
//!
//! # Example
//!
//! ```
//! use manifoldb_codec::encoding::varint::{decode_uvarint, encode_uvarint};
//!
//! let mut buf = Vec::new();
//! assert_eq!(encode_uvarint(300, &mut buf), 2);
//! assert_eq!(buf, [0xAC, 0x02]);
//!
//! let (value, read) = decode_uvarint(&buf).unwrap();
//! assert_eq!((value, read), (300, 2));
//! ```

use crate::error::{CodecError, CodecResult};

/// Longest encoding of a 64-bit value.
pub const MAX_VARINT_LEN: usize = 10;

const CONTINUATION: u8 = 0x80;
const PAYLOAD_MASK: u8 = 0x7F;

/// Number of bytes [`encode_uvarint`] emits for `value`.
#[inline]
#[must_use]
pub const fn uvarint_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    if bits == 0 {
        1
    } else {
        (bits + 6) / 7
    }
}

/// Number of bytes [`encode_varint`] emits for `value`.
#[inline]
#[must_use]
pub const fn varint_len(value: i64) -> usize {
    uvarint_len(zigzag_encode(value))
}

/// Maps a signed value onto an unsigned one, keeping small magnitudes small.
#[inline]
#[must_use]
pub const fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`zigzag_encode`].
#[inline]
#[must_use]
pub const fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Appends the unsigned varint encoding of `value` to `buf`.
///
/// Returns the number of bytes written.
pub fn encode_uvarint(mut value: u64, buf: &mut Vec<u8>) -> usize {
    let start = buf.len();
    while value >= u64::from(CONTINUATION) {
        buf.push((value as u8 & PAYLOAD_MASK) | CONTINUATION);
        value >>= 7;
    }
    buf.push(value as u8);
    buf.len() - start
}

/// Appends the zig-zag varint encoding of `value` to `buf`.
///
/// Returns the number of bytes written.
#[inline]
pub fn encode_varint(value: i64, buf: &mut Vec<u8>) -> usize {
    encode_uvarint(zigzag_encode(value), buf)
}

/// Decodes an unsigned varint from the front of `bytes`.
///
/// Returns the value and the number of bytes consumed.
///
/// # Errors
///
/// - [`CodecError::UnexpectedEndOfData`] if `bytes` is empty
/// - [`CodecError::MalformedVarint`] if the input ends before a terminating
///   byte, or the value does not fit in 64 bits
pub fn decode_uvarint(bytes: &[u8]) -> CodecResult<(u64, usize)> {
    if bytes.is_empty() {
        return Err(CodecError::end_of_data(1, 0));
    }

    let mut value = 0u64;
    let mut shift = 0u32;
    for (i, &byte) in bytes.iter().enumerate() {
        if i == MAX_VARINT_LEN {
            return Err(CodecError::MalformedVarint);
        }
        if byte < CONTINUATION {
            // The tenth byte may only contribute the top bit.
            if i == MAX_VARINT_LEN - 1 && byte > 1 {
                return Err(CodecError::MalformedVarint);
            }
            return Ok((value | (u64::from(byte) << shift), i + 1));
        }
        value |= u64::from(byte & PAYLOAD_MASK) << shift;
        shift += 7;
    }

    Err(CodecError::MalformedVarint)
}

/// Decodes a zig-zag varint from the front of `bytes`.
///
/// # Errors
///
/// Same as [`decode_uvarint`].
#[inline]
pub fn decode_varint(bytes: &[u8]) -> CodecResult<(i64, usize)> {
    let (raw, read) = decode_uvarint(bytes)?;
    Ok((zigzag_decode(raw), read))
}
