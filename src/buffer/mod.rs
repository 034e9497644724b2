//! Write Buffer Module
//!
//! Transaction-scoped overlay holding pending writes and deletions.
//!
//! ## Responsibilities
//! - Point get / set of pending writes (tombstones included)
//! - Ordered forward iteration from a start key
//! - Reset on release so a pooled instance can be reused
//!
//! ## Pooling
//! Buffers are recycled across transactions through [`BufferPool`]. The pool
//! hands back whatever it holds: an instance must be empty before (or right
//! after) it is acquired. [`UnionStore`](crate::UnionStore) guarantees this
//! by calling [`Buffer::release`] before returning a buffer to the pool.

mod mem;
mod pool;

pub use mem::MemBuffer;
pub use pool::{BufferFactory, BufferPool};

use crate::entry::EntryIter;
use crate::error::Result;

/// Contract for the mutable write buffer of one transaction
pub trait Buffer {
    /// Get the pending value for a key.
    ///
    /// Returns `KvError::NotFound` if the buffer holds no entry. A tombstone
    /// is returned as an empty value, not as an error.
    fn get(&self, key: &[u8]) -> Result<Vec<u8>>;

    /// Record a pending write. An empty value records a tombstone.
    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Iterate pending entries with key >= `start`, in key order,
    /// tombstones included.
    fn iter_from(&self, start: &[u8]) -> Result<EntryIter<'_>>;

    /// Drop all pending entries ahead of reuse.
    fn release(&mut self) -> Result<()>;
}
