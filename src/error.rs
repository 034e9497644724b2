//! Error types for unionkv
//!
//! Provides a unified error type for all overlay operations, plus the
//! not-found predicate used to route reads between the layers.

use thiserror::Error;

/// Result type alias using KvError
pub type Result<T> = std::result::Result<T, KvError>;

/// Unified error type for unionkv operations
#[derive(Debug, Error)]
pub enum KvError {
    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    /// Key is absent from both layers, or was deleted in this transaction.
    /// Expected in normal control flow.
    #[error("Key not found")]
    NotFound,

    // -------------------------------------------------------------------------
    // Snapshot Errors
    // -------------------------------------------------------------------------
    #[error("Snapshot already released")]
    SnapshotReleased,

    // -------------------------------------------------------------------------
    // Iteration Errors
    // -------------------------------------------------------------------------
    #[error("Iterator yielded out-of-order key: {key:?}")]
    UnorderedIterator { key: Vec<u8> },

    // -------------------------------------------------------------------------
    // Backing Store Errors
    // -------------------------------------------------------------------------
    #[error("Storage error: {0}")]
    Storage(String),

    // -------------------------------------------------------------------------
    // Propagation
    // -------------------------------------------------------------------------
    #[error("{context}: {source}")]
    Context {
        context: &'static str,
        #[source]
        source: Box<KvError>,
    },

    /// Both layers failed to release on close
    #[error("release write buffer: {buffer}; release snapshot: {snapshot}")]
    Close {
        buffer: Box<KvError>,
        snapshot: Box<KvError>,
    },
}

impl KvError {
    /// Whether this error represents a not-found condition.
    ///
    /// Looks through [`KvError::Context`] wrappers, so a not-found that was
    /// annotated on its way up is still recognized.
    pub fn is_not_found(&self) -> bool {
        match self {
            KvError::NotFound => true,
            KvError::Context { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// Wrap this error with a short description of the failing step.
    pub fn context(self, context: &'static str) -> Self {
        KvError::Context {
            context,
            source: Box::new(self),
        }
    }

    /// The innermost error, with all context wrappers removed.
    pub fn root(&self) -> &KvError {
        match self {
            KvError::Context { source, .. } => source.root(),
            other => other,
        }
    }
}
