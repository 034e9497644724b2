//! Shared key/value types and the tombstone convention.

use crate::error::Result;

/// Opaque key, ordered by lexicographic byte comparison
pub type Key = Vec<u8>;

/// Opaque value; the empty value is reserved as the tombstone
pub type Value = Vec<u8>;

/// A (key, value) pair yielded during iteration
pub type Entry = (Key, Value);

/// Ordered forward iterator over entries, ascending by key, no duplicates.
///
/// Tombstones are yielded as entries with an empty value.
pub type EntryIter<'a> = Box<dyn Iterator<Item = Result<Entry>> + 'a>;

/// The value written to mark a key as deleted.
pub const TOMBSTONE: &[u8] = &[];

/// Whether a value is the deletion marker.
///
/// Callers must never store an empty value to mean "no value": it is
/// indistinguishable from a delete.
#[inline]
pub fn is_tombstone(value: &[u8]) -> bool {
    value.is_empty()
}
