//! Benchmarks for unionkv overlay operations

use std::collections::BTreeMap;
use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use unionkv::{BufferPool, Config, MemSnapshot, UnionStore};

const COMMITTED_KEYS: u32 = 10_000;

fn committed_snapshot() -> MemSnapshot {
    let data: BTreeMap<Vec<u8>, Vec<u8>> = (0..COMMITTED_KEYS)
        .map(|i| (format!("key{:08}", i).into_bytes(), format!("value{}", i).into_bytes()))
        .collect();
    MemSnapshot::new(data)
}

fn union_benchmarks(c: &mut Criterion) {
    let config = Config::default();
    let pool = Arc::new(BufferPool::mem(&config));
    let snapshot = committed_snapshot();

    c.bench_function("get_through_overlay", |b| {
        let mut store = UnionStore::new(snapshot.clone(), &pool, &config);
        for i in (0..COMMITTED_KEYS).step_by(10) {
            store.set(format!("key{:08}", i).as_bytes(), b"dirty").unwrap();
        }
        let mut i = 0u32;
        b.iter(|| {
            let key = format!("key{:08}", i % COMMITTED_KEYS);
            i = i.wrapping_add(7);
            black_box(store.get(key.as_bytes()).ok())
        });
    });

    c.bench_function("merged_full_scan", |b| {
        let mut store = UnionStore::new(snapshot.clone(), &pool, &config);
        for i in (0..COMMITTED_KEYS).step_by(5) {
            store.delete(format!("key{:08}", i).as_bytes()).unwrap();
        }
        b.iter(|| black_box(store.seek(b"").unwrap().count()));
    });

    c.bench_function("open_write_close", |b| {
        b.iter(|| {
            let mut store = UnionStore::new(snapshot.clone(), &pool, &config);
            store.set(b"key00000001", b"updated").unwrap();
            store.delete(b"key00000002").unwrap();
            store.close().unwrap();
        });
    });
}

criterion_group!(benches, union_benchmarks);
criterion_main!(benches);
