//! Union Store
//!
//! Per-transaction façade over a pooled write buffer and a cached snapshot.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::buffer::{Buffer, BufferPool, MemBuffer};
use crate::config::Config;
use crate::entry::{is_tombstone, TOMBSTONE};
use crate::error::{KvError, Result};
use crate::snapshot::{CacheSnapshot, Snapshot};

use super::UnionIter;

/// Read/write view of one transaction
///
/// ## Layering
/// - **Writes** (set/delete): always go to the buffer
/// - **Reads** (get/seek): buffer first, snapshot on a buffer miss
/// - **Deletes** are tombstones (empty values) in the buffer, so they shadow
///   the snapshot until commit
///
/// ## Lifecycle
/// Open once per transaction with [`UnionStore::new`], close once with
/// [`UnionStore::close`]. Closing hands the buffer back to the pool; a store
/// that is dropped without closing simply frees its buffer.
pub struct UnionStore<S: Snapshot, B: Buffer = MemBuffer> {
    /// Pending writes of this transaction
    buffer: B,

    /// Committed data as of transaction start
    snapshot: CacheSnapshot<S>,

    /// Where the buffer goes back on close
    pool: Arc<BufferPool<B>>,
}

impl<S: Snapshot, B: Buffer> UnionStore<S, B> {
    /// Open a store over `snapshot`, taking a buffer from `pool`
    pub fn new(snapshot: S, pool: &Arc<BufferPool<B>>, config: &Config) -> Self {
        let buffer = pool.acquire();
        debug!(
            snapshot_cache_capacity = config.snapshot_cache_capacity,
            "opened union store"
        );
        Self {
            buffer,
            snapshot: CacheSnapshot::new(snapshot, config.snapshot_cache_capacity),
            pool: Arc::clone(pool),
        }
    }

    /// Get the value visible to this transaction
    ///
    /// Returns `KvError::NotFound` if the key was never written, or was
    /// deleted in this transaction.
    pub fn get(&self, key: &[u8]) -> Result<Vec<u8>> {
        match self.buffer.get(key) {
            Ok(value) if is_tombstone(&value) => {
                trace!(key = ?key, "buffer tombstone");
                Err(KvError::NotFound)
            }
            Ok(value) => Ok(value),
            Err(e) if e.is_not_found() => {
                trace!(key = ?key, "buffer miss, reading snapshot");
                self.snapshot.get(key)
            }
            Err(e) => Err(e.context("read from write buffer")),
        }
    }

    /// Stage a write
    ///
    /// An empty `value` is recorded as a tombstone and reads back as
    /// not-found. Use [`UnionStore::delete`] to delete.
    pub fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.buffer
            .set(key, value)
            .map_err(|e| e.context("write to write buffer"))
    }

    /// Stage a delete
    ///
    /// Returns `KvError::NotFound` if the key is not currently visible
    /// (never existed, or already deleted). No tombstone is written then.
    pub fn delete(&mut self, key: &[u8]) -> Result<()> {
        let current = match self.buffer.get(key) {
            Ok(value) => value,
            Err(e) if e.is_not_found() => match self.snapshot.get(key) {
                Ok(value) => value,
                Err(e) if e.is_not_found() => return Err(KvError::NotFound),
                Err(e) => return Err(e.context("read from snapshot")),
            },
            Err(e) => return Err(e.context("read from write buffer")),
        };

        if is_tombstone(&current) {
            trace!(key = ?key, "delete of already deleted key");
            return Err(KvError::NotFound);
        }

        self.buffer
            .set(key, TOMBSTONE)
            .map_err(|e| e.context("write tombstone to write buffer"))
    }

    /// Iterate visible entries with key >= `key`, in key order
    pub fn seek(&self, key: &[u8]) -> Result<UnionIter<'_>> {
        let buffer_iter = self
            .buffer
            .iter_from(key)
            .map_err(|e| e.context("iterate write buffer"))?;
        let snapshot_iter = self
            .snapshot
            .iter_from(key)
            .map_err(|e| e.context("iterate snapshot"))?;
        UnionIter::new(buffer_iter, snapshot_iter)
    }

    /// Release the snapshot and return the buffer to the pool
    ///
    /// The buffer goes back to the pool even if releasing the snapshot
    /// fails. A buffer that fails its own release is dropped instead. Every
    /// failure is reported; if both layers fail, [`KvError::Close`] carries
    /// both errors.
    pub fn close(self) -> Result<()> {
        let Self {
            mut buffer,
            mut snapshot,
            pool,
        } = self;

        let buffer_result = buffer.release();
        match buffer_result {
            // A buffer that failed to reset may still hold writes
            Ok(()) => pool.release(buffer),
            Err(_) => drop(buffer),
        }

        let snapshot_result = snapshot.release();
        if let Err(e) = &snapshot_result {
            warn!(error = %e, "failed to release snapshot");
        }
        debug!("closed union store");

        match (buffer_result, snapshot_result) {
            (Ok(()), Ok(())) => Ok(()),
            (Err(e), Ok(())) => Err(e.context("release write buffer")),
            (Ok(()), Err(e)) => Err(e.context("release snapshot")),
            (Err(buffer), Err(snapshot)) => Err(KvError::Close {
                buffer: Box::new(buffer),
                snapshot: Box::new(snapshot),
            }),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Pending writes, for the commit path
    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    pub fn snapshot(&self) -> &CacheSnapshot<S> {
        &self.snapshot
    }
}

impl<S: Snapshot> UnionStore<S, MemBuffer> {
    /// Whether this transaction has staged any write or delete
    pub fn is_dirty(&self) -> bool {
        !self.buffer.is_empty()
    }
}

impl<S: Snapshot, B: Buffer> fmt::Debug for UnionStore<S, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnionStore")
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}
