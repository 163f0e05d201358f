//! Encoding and decoding traits for application records.

use chrono::{DateTime, Utc};

use crate::buffer::{GetBuffer, PutBuffer};
use crate::error::CodecResult;

/// A type that packs itself into a [`PutBuffer`].
///
/// Implementations write their fields one put call at a time. The matching
/// [`Decoder`] implementation must read them back with the same calls in the
/// same order; keeping both next to the type definition makes that easy.
pub trait Encoder {
    /// Append this value's fields to `put`.
    fn encode_to(&self, put: &mut PutBuffer);

    /// Encode this value on its own.
    ///
    /// # Errors
    ///
    /// Returns any error stored in the buffer during encoding.
    fn encode(&self) -> CodecResult<Vec<u8>> {
        let mut put = PutBuffer::new();
        self.encode_to(&mut put);
        put.finish()
    }
}

/// A type that unpacks itself from a [`GetBuffer`].
///
/// `decode_from` fills an existing value in place, so fields read before a
/// failure keep their decoded contents and later fields keep their previous
/// ones.
pub trait Decoder: Default {
    /// Read this value's fields from `get`.
    fn decode_from(&mut self, get: &mut GetBuffer<'_>);

    /// Decode a value that occupies all of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns the first decoding error, or
    /// [`CodecError::TrailingData`](crate::CodecError::TrailingData) if
    /// `bytes` is longer than the encoded value.
    fn decode(bytes: &[u8]) -> CodecResult<Self> {
        let mut value = Self::default();
        let mut get = GetBuffer::new(bytes);
        value.decode_from(&mut get);
        get.done()?;
        Ok(value)
    }
}

macro_rules! impl_scalar_codec {
    ($($ty:ty => $put:ident, $get:ident;)*) => {
        $(
            impl Encoder for $ty {
                #[inline]
                fn encode_to(&self, put: &mut PutBuffer) {
                    put.$put(*self);
                }
            }

            impl Decoder for $ty {
                #[inline]
                fn decode_from(&mut self, get: &mut GetBuffer<'_>) {
                    get.$get(self);
                }
            }
        )*
    };
}

impl_scalar_codec! {
    u64 => put_u64, get_u64;
    i64 => put_i64, get_i64;
    u32 => put_u32, get_u32;
    i32 => put_i32, get_i32;
    u16 => put_u16, get_u16;
    i16 => put_i16, get_i16;
    u8 => put_u8, get_u8;
    i8 => put_i8, get_i8;
    bool => put_bool, get_bool;
}

impl Encoder for String {
    fn encode_to(&self, put: &mut PutBuffer) {
        put.put_str(self);
    }
}

impl Decoder for String {
    fn decode_from(&mut self, get: &mut GetBuffer<'_>) {
        get.get_str(self);
    }
}

impl Encoder for Vec<u8> {
    fn encode_to(&self, put: &mut PutBuffer) {
        put.put_bytes(self);
    }
}

impl Decoder for Vec<u8> {
    fn decode_from(&mut self, get: &mut GetBuffer<'_>) {
        get.get_bytes(self);
    }
}

impl Encoder for DateTime<Utc> {
    fn encode_to(&self, put: &mut PutBuffer) {
        put.put_timestamp(self);
    }
}

impl Decoder for DateTime<Utc> {
    fn decode_from(&mut self, get: &mut GetBuffer<'_>) {
        get.get_timestamp(self);
    }
}
