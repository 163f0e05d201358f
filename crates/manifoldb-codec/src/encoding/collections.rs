//! Count-prefixed sequences and maps.
//!
//! The packed format has no collection types of its own. A sequence is
//! stored as its element count (via [`PutBuffer::put_len`]) followed by each
//! element in order; a map is the entry count followed by alternating keys
//! and values. These helpers spell out that convention for any element type
//! implementing [`Encoder`] and [`Decoder`]; writing the same put and get
//! calls by hand produces identical bytes.
//!
//! Map entries are written in the map's iteration order. Use a `BTreeMap`
//! when the packed bytes must be deterministic.
//!
//! ```
//! use std::collections::BTreeMap;
//! use manifoldb_codec::encoding::collections::{get_map, put_map};
//! use manifoldb_codec::{GetBuffer, PutBuffer};
//!
//! let mut tags = BTreeMap::new();
//! tags.insert(String::from("key1"), String::from("value1"));
//!
//! let mut put = PutBuffer::new();
//! put_map(&mut put, &tags);
//! let data = put.finish().unwrap();
//!
//! let mut restored = BTreeMap::new();
//! let mut get = GetBuffer::new(&data);
//! get_map(&mut get, &mut restored);
//! get.done().unwrap();
//! assert_eq!(restored, tags);
//! ```

use crate::buffer::{GetBuffer, PutBuffer};

use super::traits::{Decoder, Encoder};

/// Packs `items` as a count followed by each element.
pub fn put_seq<T: Encoder>(put: &mut PutBuffer, items: &[T]) {
    put.put_len(items.len());
    for item in items {
        item.encode_to(put);
    }
}

/// Unpacks a sequence written by [`put_seq`], appending to `out`.
///
/// Stops at the first error; elements decoded before it stay in `out`.
pub fn get_seq<T: Decoder>(get: &mut GetBuffer<'_>, out: &mut Vec<T>) {
    let mut count = 0usize;
    get.get_len(&mut count);
    // Every element takes at least one byte, so the remaining input bounds
    // how much is worth reserving.
    out.reserve(count.min(get.remaining()));
    for _ in 0..count {
        if !get.is_ok() {
            break;
        }
        let mut item = T::default();
        item.decode_from(get);
        if get.is_ok() {
            out.push(item);
        }
    }
}

/// Packs a map as an entry count followed by alternating keys and values.
pub fn put_map<'a, K, V, M>(put: &mut PutBuffer, map: &'a M)
where
    K: Encoder + 'a,
    V: Encoder + 'a,
    &'a M: IntoIterator<Item = (&'a K, &'a V)>,
    <&'a M as IntoIterator>::IntoIter: ExactSizeIterator,
{
    let entries = map.into_iter();
    put.put_len(entries.len());
    for (key, value) in entries {
        key.encode_to(put);
        value.encode_to(put);
    }
}

/// Unpacks a map written by [`put_map`] into any extendable collection.
///
/// Stops at the first error; entries decoded before it stay in `out`.
pub fn get_map<K, V, M>(get: &mut GetBuffer<'_>, out: &mut M)
where
    K: Decoder,
    V: Decoder,
    M: Extend<(K, V)>,
{
    let mut count = 0usize;
    get.get_len(&mut count);
    for _ in 0..count {
        if !get.is_ok() {
            break;
        }
        let mut key = K::default();
        let mut value = V::default();
        key.decode_from(get);
        value.decode_from(get);
        if get.is_ok() {
            out.extend(Some((key, value)));
        }
    }
}
