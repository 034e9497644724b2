//! MemBuffer implementation
//!
//! BTreeMap-based write buffer with size tracking.

use std::collections::BTreeMap;
use std::ops::Bound;

use crate::entry::EntryIter;
use crate::error::{KvError, Result};

use super::Buffer;

/// In-memory ordered write buffer
///
/// Owned by a single transaction, so no internal locking: mutation goes
/// through `&mut self`.
#[derive(Debug, Default)]
pub struct MemBuffer {
    /// Pending entries; an empty value is a tombstone
    data: BTreeMap<Vec<u8>, Vec<u8>>,

    /// Approximate size in bytes (sum of key + value lengths)
    size: usize,
}

impl MemBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending entries (tombstones count)
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Approximate size in bytes
    pub fn size(&self) -> usize {
        self.size
    }

    /// Remove every pending entry
    pub fn clear(&mut self) {
        self.data.clear();
        self.size = 0;
    }
}

impl Buffer for MemBuffer {
    fn get(&self, key: &[u8]) -> Result<Vec<u8>> {
        self.data.get(key).cloned().ok_or(KvError::NotFound)
    }

    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        match self.data.get_mut(key) {
            Some(existing) => {
                self.size = self.size - existing.len() + value.len();
                existing.clear();
                existing.extend_from_slice(value);
            }
            None => {
                self.size += key.len() + value.len();
                self.data.insert(key.to_vec(), value.to_vec());
            }
        }
        Ok(())
    }

    fn iter_from(&self, start: &[u8]) -> Result<EntryIter<'_>> {
        let iter = self
            .data
            .range::<[u8], _>((Bound::Included(start), Bound::Unbounded))
            .map(|(k, v)| Ok((k.clone(), v.clone())));
        Ok(Box::new(iter))
    }

    fn release(&mut self) -> Result<()> {
        self.clear();
        Ok(())
    }
}
