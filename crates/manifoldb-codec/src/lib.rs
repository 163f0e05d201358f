//! `ManifoldDB` Codec
//!
//! Compact conversion of application records to and from byte sequences,
//! without runtime reflection and without self-describing metadata.
//!
//! # Overview
//!
//! Two encodings are provided:
//!
//! - **Packed values**: [`PutBuffer`] writes integers as varints (zig-zag for
//!   signed types) and strings/bytes with a varint length prefix.
//!   [`GetBuffer`] reads them back with mirrored calls.
//! - **Sortable keys**: [`KeyBuffer`] writes fixed-width, big-endian segments
//!   (excess representation for signed integers, truncated or padded text)
//!   so that keys compare bytewise in the same order as their fields.
//!
//! Buffers record the first error they meet and ignore every later call, so
//! a run of puts or gets needs a single check at the end.
//!
//! # Example
//!
//! ```
//! use manifoldb_codec::{GetBuffer, KeyBuffer, PutBuffer};
//!
//! let mut put = PutBuffer::new();
//! put.put_u64(3_565_123_234_760).put_i64(-50_496_192_383).put_str("example");
//! let data = put.finish().unwrap();
//!
//! let (mut a, mut b, mut c) = (0u64, 0i64, String::new());
//! let mut get = GetBuffer::new(&data);
//! get.get_u64(&mut a).get_i64(&mut b).get_str(&mut c);
//! get.done().unwrap();
//! assert_eq!((a, b, c.as_str()), (3_565_123_234_760, -50_496_192_383, "example"));
//!
//! let mut kb = KeyBuffer::new();
//! kb.put_i64(-1).put_str("abc", 8);
//! let low = kb.finish().unwrap();
//! let mut kb = KeyBuffer::new();
//! kb.put_i64(1).put_str("abc", 8);
//! assert!(low < kb.finish().unwrap());
//! ```
//!
//! # Modules
//!
//! - [`encoding`] - varint and key codecs, record traits, collection helpers
//! - [`buffer`] - put, get and key buffers
//! - [`config`] - buffer configuration ([`CodecConfig`])
//! - [`error`] - error types ([`CodecError`])

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod buffer;
pub mod config;
pub mod encoding;
pub mod error;

// Re-export commonly used types
pub use buffer::{GetBuffer, KeyBuffer, PutBuffer};
pub use config::CodecConfig;
pub use encoding::{Decoder, Encoder};
pub use error::{CodecError, CodecResult};
