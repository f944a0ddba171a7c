//! Stress Tests
//!
//! Heavy-workload tests for concurrency. All marked #[ignore] for opt-in execution.
//! Run with: cargo test --test concurrency stress -- --ignored

use crate::common::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Instant;

/// Mixed increments, merges and reads over a handful of hot documents
#[test]
#[ignore]
fn stress_mixed_operations_on_hot_documents() {
    let t = TestRoot::new();
    const DOCS: usize = 4;
    const THREADS: usize = 16;
    const ITERS: usize = 200;

    for d in 0..DOCS {
        t.store
            .init_document(&format!("hot/{}.json", d), &json!({"n": 0}).into())
            .unwrap();
    }

    let barrier = Arc::new(Barrier::new(THREADS));
    let increments = Arc::new(AtomicU64::new(0));
    let start = Instant::now();

    let handles: Vec<_> = (0..THREADS)
        .map(|thread_id| {
            let store = t.store.clone();
            let barrier = Arc::clone(&barrier);
            let increments = Arc::clone(&increments);
            thread::spawn(move || {
                barrier.wait();
                for iter in 0..ITERS {
                    let path = format!("hot/{}.json", (thread_id * 7 + iter * 11) % DOCS);
                    match iter % 3 {
                        0 | 1 => {
                            store.increment(&path, "n").unwrap();
                            increments.fetch_add(1, Ordering::Relaxed);
                        }
                        _ => {
                            let patch = json!({ format!("t{}", thread_id): iter });
                            store.merge_update(&path, patch.as_object().unwrap()).unwrap();
                        }
                    }
                    let _ = store.get_document(&path).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let total: i64 = (0..DOCS)
        .map(|d| {
            t.store.get_document(&format!("hot/{}.json", d)).unwrap()["n"]
                .as_i64()
                .unwrap()
        })
        .sum();
    assert_eq!(total as u64, increments.load(Ordering::Relaxed));
    assert_eq!(t.store.locks_in_use(), 0);

    println!(
        "{} threads x {} ops in {:?}",
        THREADS,
        ITERS,
        start.elapsed()
    );
}
