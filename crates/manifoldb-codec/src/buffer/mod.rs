//! Buffers that sequence many codec calls into one byte vector and back.
//!
//! - [`PutBuffer`] - packs values with the varint codec
//! - [`GetBuffer`] - unpacks them again, in the same order
//! - [`KeyBuffer`] - builds sortable keys with the fixed-width key codec
//!
//! All three keep the first error they encounter and ignore later calls, so
//! errors surface once, at `finish` or `done`. A caller may also hand a
//! buffer its own error with `set_error`; that always replaces the stored one.

mod get;
mod key;
mod put;

pub use get::GetBuffer;
pub use key::KeyBuffer;
pub use put::PutBuffer;
