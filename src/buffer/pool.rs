//! Buffer Pool
//!
//! Bounded cache of idle write buffers shared by every transaction.
//!
//! ## Concurrency:
//! - `idle`: `ArrayQueue`, so acquire/release from many threads are
//!   linearized without a global lock
//! - Counters: atomics (lock-free, statistics only)
//! - All methods use `&self`; share the pool through `Arc`

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam::queue::ArrayQueue;
use tracing::debug;

use crate::config::Config;

use super::MemBuffer;

/// Constructor invoked when no idle buffer is available
pub type BufferFactory<B> = Box<dyn Fn() -> B + Send + Sync>;

/// Pool of reusable write buffers
///
/// The pool never clears what it is given: a released buffer comes back
/// exactly as it went in. Whoever re-acquires it must make sure it is empty.
pub struct BufferPool<B> {
    /// Idle buffers; `None` when pooling is disabled (capacity 0)
    idle: Option<ArrayQueue<B>>,

    /// Builds a fresh buffer on a miss
    factory: BufferFactory<B>,

    /// Acquisitions served from the idle set
    hits: AtomicU64,

    /// Acquisitions that had to call the factory
    misses: AtomicU64,

    /// Releases dropped because the idle set was full
    discards: AtomicU64,
}

impl<B> BufferPool<B> {
    /// Create a pool retaining at most `capacity` idle buffers
    pub fn new<F>(capacity: usize, factory: F) -> Self
    where
        F: Fn() -> B + Send + Sync + 'static,
    {
        Self {
            // ArrayQueue rejects a zero capacity
            idle: (capacity > 0).then(|| ArrayQueue::new(capacity)),
            factory: Box::new(factory),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            discards: AtomicU64::new(0),
        }
    }

    /// Create a pool sized by `config.pool_capacity`
    pub fn from_config<F>(config: &Config, factory: F) -> Self
    where
        F: Fn() -> B + Send + Sync + 'static,
    {
        Self::new(config.pool_capacity, factory)
    }

    /// Take an idle buffer, or build a new one
    pub fn acquire(&self) -> B {
        if let Some(buffer) = self.idle.as_ref().and_then(ArrayQueue::pop) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return buffer;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!("buffer pool miss, building new buffer");
        (self.factory)()
    }

    /// Return a buffer to the idle set; dropped if the set is full
    pub fn release(&self, buffer: B) {
        let rejected = match &self.idle {
            Some(idle) => idle.push(buffer).err(),
            None => Some(buffer),
        };

        if let Some(buffer) = rejected {
            self.discards.fetch_add(1, Ordering::Relaxed);
            debug!(capacity = self.capacity(), "buffer pool full, discarding buffer");
            drop(buffer);
        }
    }

    /// Max number of idle buffers retained
    pub fn capacity(&self) -> usize {
        self.idle.as_ref().map_or(0, ArrayQueue::capacity)
    }

    /// Number of buffers currently idle
    pub fn idle_count(&self) -> usize {
        self.idle.as_ref().map_or(0, ArrayQueue::len)
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn discards(&self) -> u64 {
        self.discards.load(Ordering::Relaxed)
    }
}

impl BufferPool<MemBuffer> {
    /// Pool of [`MemBuffer`]s sized by `config`
    pub fn mem(config: &Config) -> Self {
        Self::from_config(config, MemBuffer::new)
    }
}

impl<B> fmt::Debug for BufferPool<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPool")
            .field("capacity", &self.capacity())
            .field("idle", &self.idle_count())
            .field("hits", &self.hits())
            .field("misses", &self.misses())
            .field("discards", &self.discards())
            .finish()
    }
}
