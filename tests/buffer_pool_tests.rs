//! Tests for BufferPool
//!
//! These tests verify:
//! - Factory use on empty pool
//! - Reuse of released buffers
//! - Capacity bound (discard when full, capacity 0 disables pooling)
//! - Released buffers are returned as-is (pool does not clear)
//! - Concurrent acquire/release

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use unionkv::{Buffer, BufferPool, Config, MemBuffer};

// =============================================================================
// Helper Functions
// =============================================================================

fn counting_pool(capacity: usize) -> (Arc<AtomicUsize>, BufferPool<MemBuffer>) {
    let built = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&built);
    let pool = BufferPool::new(capacity, move || {
        counter.fetch_add(1, Ordering::SeqCst);
        MemBuffer::new()
    });
    (built, pool)
}

// =============================================================================
// Acquire / Release Tests
// =============================================================================

#[test]
fn test_acquire_from_empty_pool_uses_factory() {
    let (built, pool) = counting_pool(2);

    let _a = pool.acquire();
    let _b = pool.acquire();

    assert_eq!(built.load(Ordering::SeqCst), 2);
    assert_eq!(pool.misses(), 2);
    assert_eq!(pool.hits(), 0);
}

#[test]
fn test_released_buffer_is_reused() {
    let (built, pool) = counting_pool(2);

    let buffer = pool.acquire();
    pool.release(buffer);
    let _again = pool.acquire();

    assert_eq!(built.load(Ordering::SeqCst), 1);
    assert_eq!(pool.hits(), 1);
    assert_eq!(pool.idle_count(), 0);
}

#[test]
fn test_release_beyond_capacity_discards() {
    let (_built, pool) = counting_pool(2);

    let buffers: Vec<_> = (0..3).map(|_| pool.acquire()).collect();
    for buffer in buffers {
        pool.release(buffer);
    }

    assert_eq!(pool.idle_count(), 2);
    assert_eq!(pool.discards(), 1);
}

#[test]
fn test_zero_capacity_never_pools() {
    let (built, pool) = counting_pool(0);

    let buffer = pool.acquire();
    pool.release(buffer);
    let _next = pool.acquire();

    assert_eq!(pool.capacity(), 0);
    assert_eq!(pool.idle_count(), 0);
    assert_eq!(pool.discards(), 1);
    assert_eq!(built.load(Ordering::SeqCst), 2);
}

#[test]
fn test_pool_does_not_clear_released_buffer() {
    let (_built, pool) = counting_pool(1);

    let mut buffer = pool.acquire();
    buffer.set(b"stale", b"entry").unwrap();
    pool.release(buffer);

    let reused = pool.acquire();
    assert_eq!(reused.get(b"stale").unwrap(), b"entry".to_vec());
}

#[test]
fn test_from_config_uses_pool_capacity() {
    let config = Config::builder().pool_capacity(7).build();

    let pool = BufferPool::mem(&config);

    assert_eq!(pool.capacity(), 7);
    assert_eq!(Config::default().pool_capacity, 100);
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_acquire_release() {
    let (built, pool) = counting_pool(4);
    let pool = Arc::new(pool);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                for _ in 0..100 {
                    let buffer = pool.acquire();
                    pool.release(buffer);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(pool.hits() + pool.misses(), 800);
    assert_eq!(pool.misses() as usize, built.load(Ordering::SeqCst));
    assert!(pool.idle_count() <= 4);
    // Every buffer ever built is either idle or was discarded
    assert_eq!(pool.idle_count() as u64 + pool.discards(), pool.misses());
}
