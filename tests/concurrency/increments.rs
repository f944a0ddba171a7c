//! Lost-update freedom: concurrent mutations of one document all land.

use crate::common::*;
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 8;
const PER_THREAD: usize = 25;

#[test]
fn concurrent_increments_sum_exactly() {
    let t = TestRoot::new();
    t.store.init_document("counter.json", &json!({"n": 100}).into()).unwrap();

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let store = t.store.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..PER_THREAD {
                    let outcome = store.increment("counter.json", "n").unwrap();
                    assert!(!outcome.is_noop());
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let doc = t.store.get_document("counter.json").unwrap();
    assert_eq!(doc["n"].as_i64(), Some(100 + (THREADS * PER_THREAD) as i64));
    assert_eq!(t.store.locks_in_use(), 0);
}

#[test]
fn concurrent_increments_through_separate_handles() {
    let t = TestRoot::new();
    t.store.init_document("counter.json", &json!({"n": 0}).into()).unwrap();
    let root = t.root().to_path_buf();

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let root = root.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                // Each thread opens its own handle; the process shares one lock table per root.
                let docs = JsonDocs::open_with(&root, OpenOptions::new().sync_writes(false)).unwrap();
                barrier.wait();
                for _ in 0..PER_THREAD {
                    docs.increment("counter.json", "n").unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let doc = t.store.get_document("counter.json").unwrap();
    assert_eq!(doc["n"].as_i64(), Some((THREADS * PER_THREAD) as i64));
}

#[test]
fn concurrent_merges_keep_every_field() {
    let t = TestRoot::new();
    t.store.init_document("m.json", &json!({}).into()).unwrap();

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|id| {
            let store = t.store.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..PER_THREAD {
                    let patch = json!({ format!("t{}_{}", id, i): i });
                    store.merge_update("m.json", patch.as_object().unwrap()).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let doc = t.store.get_document("m.json").unwrap();
    assert_eq!(doc.as_object().unwrap().len(), THREADS * PER_THREAD);
}

#[test]
fn readers_never_see_partial_documents() {
    let t = TestRoot::new();
    t.store.init_document("r.json", &json!({"n": 0, "pad": "x".repeat(4096)}).into()).unwrap();

    let writer = {
        let store = t.store.clone();
        thread::spawn(move || {
            for _ in 0..100 {
                store.increment("r.json", "n").unwrap();
            }
        })
    };
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = t.store.clone();
            thread::spawn(move || {
                let mut last = 0;
                for _ in 0..100 {
                    let doc = store.get_document("r.json").unwrap();
                    let n = doc["n"].as_i64().unwrap();
                    assert!(n >= last, "counter went backwards: {} < {}", n, last);
                    last = n;
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }
    assert_eq!(t.store.get_document("r.json").unwrap()["n"].as_i64(), Some(100));
}
