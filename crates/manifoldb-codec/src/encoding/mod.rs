//! The two byte-level codecs and the traits that tie records to them.
//!
//! # Packed Encoding
//!
//! The [`varint`] module implements base-128 varints with zig-zag mapping for
//! signed values. [`PutBuffer`](crate::PutBuffer) and
//! [`GetBuffer`](crate::GetBuffer) build on it to pack whole records: no
//! field tags, no schema, just values in call order.
//!
//! # Key Encoding
//!
//! The [`keys`] module produces fixed-width segments whose byte order
//! matches value order. [`KeyBuffer`](crate::KeyBuffer) concatenates them into
//! composite index keys.
//!
//! # Record Traits
//!
//! - [`Encoder`] - pack a record through a put buffer
//! - [`Decoder`] - unpack it through a get buffer
//!
//! The [`collections`] module holds the count-prefix convention for
//! sequences and maps.

pub mod collections;
pub mod keys;
mod traits;
pub mod varint;


pub use traits::{Decoder, Encoder};
