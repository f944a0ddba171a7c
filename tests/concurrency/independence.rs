//! Distinct paths never wait on each other.

use crate::common::*;
use jsondocs_concurrency::PathLockTable;
use jsondocs_engine::{DocumentStore, StoreConfig};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn held_lock_on_one_path_does_not_block_another() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.json");
    let b = dir.path().join("b.json");
    std::fs::write(&a, "{\"n\": 0}").unwrap();
    std::fs::write(&b, "{\"n\": 0}").unwrap();

    let locks = Arc::new(PathLockTable::new());
    let config = StoreConfig {
        sync_writes: false,
        ..StoreConfig::default()
    };
    let documents = Arc::new(DocumentStore::new(Arc::clone(&locks), &config));

    let guard_a = locks.write(&a);

    // b proceeds while a is held
    let (tx, rx) = mpsc::channel();
    {
        let documents = Arc::clone(&documents);
        let b = b.clone();
        thread::spawn(move || {
            documents.increment(&b, "n").unwrap();
            tx.send(()).unwrap();
        });
    }
    rx.recv_timeout(Duration::from_secs(5))
        .expect("mutation of b blocked by lock on a");

    // a waits until the guard is released
    let (tx, rx) = mpsc::channel();
    {
        let documents = Arc::clone(&documents);
        let a = a.clone();
        thread::spawn(move || {
            documents.increment(&a, "n").unwrap();
            tx.send(()).unwrap();
        });
    }
    assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    drop(guard_a);
    rx.recv_timeout(Duration::from_secs(5))
        .expect("mutation of a never resumed");

    assert_eq!(
        documents.read(&a).unwrap().as_inner(),
        &json!({"n": 1})
    );
    assert_eq!(
        documents.read(&b).unwrap().as_inner(),
        &json!({"n": 1})
    );
    assert!(locks.is_empty());
}

#[test]
fn counters_on_different_documents_are_independent() {
    let t = TestRoot::new();
    let paths = ["x/a.json", "x/b.json", "y/c.json"];
    for p in paths {
        t.store.init_document(p, &json!({"n": 0}).into()).unwrap();
    }

    let handles: Vec<_> = paths
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let store = t.store.clone();
            let p = p.to_string();
            thread::spawn(move || {
                for _ in 0..(10 * (i + 1)) {
                    store.increment(&p, "n").unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    for (i, p) in paths.iter().enumerate() {
        assert_eq!(
            t.store.get_document(p).unwrap()["n"].as_i64(),
            Some(10 * (i as i64 + 1))
        );
    }
    assert_eq!(t.store.locks_in_use(), 0);
}
