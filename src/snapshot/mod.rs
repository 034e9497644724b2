//! Snapshot Module
//!
//! Read-only, point-in-time view of committed data.
//!
//! ## Responsibilities
//! - Point reads of committed values as of transaction start
//! - Ordered forward iteration from a start key
//! - Release of any resources pinned by the view
//!
//! [`CacheSnapshot`] wraps any snapshot with a bounded point-read cache; the
//! union store always reads committed data through one.

mod cache;
mod mem;

pub use cache::CacheSnapshot;
pub use mem::MemSnapshot;

use crate::entry::EntryIter;
use crate::error::Result;

/// Contract for a read-only view of committed data
pub trait Snapshot {
    /// Get the committed value for a key, or `KvError::NotFound`
    fn get(&self, key: &[u8]) -> Result<Vec<u8>>;

    /// Iterate committed entries with key >= `start`, in key order
    fn iter_from(&self, start: &[u8]) -> Result<EntryIter<'_>>;

    /// Release the view; later reads are an error
    fn release(&mut self) -> Result<()>;
}
