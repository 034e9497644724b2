//! # unionkv
//!
//! A transactional key-value overlay:
//! - Mutable write buffer stacked on an immutable snapshot
//! - Tombstones that shadow committed values until commit
//! - Point lookups and merged, ordered range scans
//! - Pooled write buffers reused across short transactions
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Transaction Layer                         │
//! │              (one UnionStore per transaction)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ get / set / delete / seek / close
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      UnionStore                              │
//! │          (buffer shadows snapshot, UnionIter merge)          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌───────────────┐
//!   │   Buffer    │          │ CacheSnapshot │
//!   │ (MemBuffer) │          │  (Snapshot)   │
//!   └──────┬──────┘          └───────────────┘
//!          │ acquire / release
//!          ▼
//!   ┌─────────────┐
//!   │ BufferPool  │
//!   │  (shared)   │
//!   └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use unionkv::{BufferPool, Config, MemSnapshot, UnionStore};
//!
//! let config = Config::default();
//! let pool = Arc::new(BufferPool::mem(&config));
//! let snapshot = MemSnapshot::from_entries([(b"a".to_vec(), b"1".to_vec())]);
//!
//! let mut store = UnionStore::new(snapshot, &pool, &config);
//! store.set(b"b", b"2").unwrap();
//! store.delete(b"a").unwrap();
//!
//! assert!(store.get(b"a").unwrap_err().is_not_found());
//! assert_eq!(store.get(b"b").unwrap(), b"2");
//! store.close().unwrap();
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;
pub mod entry;

pub mod buffer;
pub mod snapshot;
pub mod union;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{KvError, Result};
pub use config::Config;
pub use entry::{is_tombstone, Entry, EntryIter, Key, Value, TOMBSTONE};
pub use buffer::{Buffer, BufferPool, MemBuffer};
pub use snapshot::{CacheSnapshot, MemSnapshot, Snapshot};
pub use union::{UnionIter, UnionStore};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of unionkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
