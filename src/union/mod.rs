//! Union Module
//!
//! Combines a transaction's write buffer with its snapshot into one key
//! space.
//!
//! ## Responsibilities
//! - Route point reads: buffer first, snapshot on a buffer miss
//! - Stage writes and deletes (tombstones) in the buffer only
//! - Merge both layers for ordered range scans
//! - Return the buffer to the pool when the transaction ends

mod iter;
mod store;

pub use iter::UnionIter;
pub use store::UnionStore;
