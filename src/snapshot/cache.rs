//! Caching snapshot wrapper
//!
//! Memoizes point reads against the wrapped snapshot for the lifetime of one
//! transaction. Found values and not-found results are both cached; any
//! other error passes through uncached. A not-found is always reported as a
//! bare `KvError::NotFound`, cached or not, so repeated reads agree.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::trace;

use crate::entry::EntryIter;
use crate::error::{KvError, Result};

use super::Snapshot;

/// Snapshot wrapper with a bounded point-read cache
///
/// ## Concurrency:
/// - `cache`: Mutex so `get` can fill it through `&self`
pub struct CacheSnapshot<S> {
    inner: S,

    /// key -> Some(value) | None (known absent)
    cache: Mutex<HashMap<Vec<u8>, Option<Vec<u8>>>>,

    /// Max cached keys; once reached, further reads are not cached
    capacity: usize,
}

impl<S: Snapshot> CacheSnapshot<S> {
    pub fn new(inner: S, capacity: usize) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
            capacity,
        }
    }

    /// Number of keys currently cached
    pub fn cached_len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn remember(&self, key: &[u8], value: Option<Vec<u8>>) {
        let mut cache = self.cache.lock();
        if cache.len() < self.capacity {
            cache.insert(key.to_vec(), value);
        }
    }
}

impl<S: Snapshot> Snapshot for CacheSnapshot<S> {
    fn get(&self, key: &[u8]) -> Result<Vec<u8>> {
        if let Some(cached) = self.cache.lock().get(key) {
            trace!(key = ?key, "snapshot cache hit");
            return cached.clone().ok_or(KvError::NotFound);
        }

        match self.inner.get(key) {
            Ok(value) => {
                self.remember(key, Some(value.clone()));
                Ok(value)
            }
            Err(e) if e.is_not_found() => {
                self.remember(key, None);
                Err(KvError::NotFound)
            }
            Err(e) => Err(e),
        }
    }

    fn iter_from(&self, start: &[u8]) -> Result<EntryIter<'_>> {
        self.inner.iter_from(start)
    }

    fn release(&mut self) -> Result<()> {
        self.cache.get_mut().clear();
        self.inner.release()
    }
}
