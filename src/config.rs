//! Configuration for unionkv
//!
//! Centralized configuration with sensible defaults.

/// Configuration shared by the buffer pool and every union store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Buffer Pool Configuration
    // -------------------------------------------------------------------------
    /// Max number of idle write buffers kept for reuse.
    /// Zero disables pooling (every buffer is built fresh and discarded).
    pub pool_capacity: usize,

    // -------------------------------------------------------------------------
    // Snapshot Configuration
    // -------------------------------------------------------------------------
    /// Max number of point reads memoized per transaction snapshot.
    /// Zero disables the read cache.
    pub snapshot_cache_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pool_capacity: 100,
            snapshot_cache_capacity: 1024,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the number of idle buffers the pool retains
    pub fn pool_capacity(mut self, capacity: usize) -> Self {
        self.config.pool_capacity = capacity;
        self
    }

    /// Set the per-transaction snapshot read cache size (in entries)
    pub fn snapshot_cache_capacity(mut self, capacity: usize) -> Self {
        self.config.snapshot_cache_capacity = capacity;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
