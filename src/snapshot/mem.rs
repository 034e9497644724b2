//! MemSnapshot implementation
//!
//! Snapshot over a shared, immutable BTreeMap.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use crate::entry::EntryIter;
use crate::error::{KvError, Result};

use super::Snapshot;

/// In-memory snapshot of committed data
///
/// Clones share the same committed map, so handing one view to many
/// transactions costs a reference count each.
#[derive(Debug, Clone, Default)]
pub struct MemSnapshot {
    data: Arc<BTreeMap<Vec<u8>, Vec<u8>>>,
    released: bool,
}

impl MemSnapshot {
    /// Create a snapshot over the given committed entries
    pub fn new(data: BTreeMap<Vec<u8>, Vec<u8>>) -> Self {
        Self {
            data: Arc::new(data),
            released: false,
        }
    }

    /// Build a snapshot from (key, value) pairs; later pairs win on duplicates
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<Vec<u8>>,
        V: Into<Vec<u8>>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::new(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    fn check_live(&self) -> Result<()> {
        if self.released {
            return Err(KvError::SnapshotReleased);
        }
        Ok(())
    }
}

impl Snapshot for MemSnapshot {
    fn get(&self, key: &[u8]) -> Result<Vec<u8>> {
        self.check_live()?;
        self.data.get(key).cloned().ok_or(KvError::NotFound)
    }

    fn iter_from(&self, start: &[u8]) -> Result<EntryIter<'_>> {
        self.check_live()?;
        let iter = self
            .data
            .range::<[u8], _>((Bound::Included(start), Bound::Unbounded))
            .map(|(k, v)| Ok((k.clone(), v.clone())));
        Ok(Box::new(iter))
    }

    fn release(&mut self) -> Result<()> {
        self.released = true;
        Ok(())
    }
}
