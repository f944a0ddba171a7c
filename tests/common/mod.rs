//! Shared test utilities for all integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from any test's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::fs;
use std::path::{Path, PathBuf};

pub use jsondocs::{
    AccessMode, Command, EntryKind, Error, Executor, IncrementOutcome, JsonDocs, JsonValue,
    OpenOptions, Output, Store,
};
pub use serde_json::json;
use tempfile::TempDir;

// ============================================================================
// TestRoot - a store over a fresh temporary directory
// ============================================================================

/// A temporary sandbox root with an open store.
///
/// The root sits one level below the `TempDir` so tests can check that
/// nothing is written next to the sandbox.
pub struct TestRoot {
    pub dir: TempDir,
    pub store: Store,
}

impl TestRoot {
    /// Open a read-write store without fsync (tests don't need durability).
    pub fn new() -> Self {
        Self::with_options(OpenOptions::new().sync_writes(false))
    }

    /// Open a store with explicit options.
    pub fn with_options(opts: OpenOptions) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store =
            Store::open_with(dir.path().join("root"), opts).expect("Failed to open test store");
        TestRoot { dir, store }
    }

    /// Sandbox root (canonical).
    pub fn root(&self) -> &Path {
        self.store.root()
    }

    /// The directory containing the sandbox root.
    pub fn outside(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of a logical path, bypassing the resolver.
    pub fn abs(&self, logical: &str) -> PathBuf {
        self.root().join(logical)
    }

    /// Write raw bytes directly to disk.
    pub fn write_raw(&self, logical: &str, contents: &str) {
        let path = self.abs(logical);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    /// Read raw file content directly from disk.
    pub fn read_raw(&self, logical: &str) -> String {
        fs::read_to_string(self.abs(logical)).unwrap()
    }

    /// Typed facade over the same store.
    pub fn docs(&self) -> JsonDocs {
        JsonDocs::from_store(self.store.clone())
    }

    /// Command executor over the same store.
    pub fn executor(&self) -> Executor {
        Executor::new(self.store.clone())
    }
}

/// Names of every entry under `dir`, recursively, relative to `dir`.
pub fn tree_listing(dir: &Path) -> Vec<String> {
    fn walk(base: &Path, dir: &Path, out: &mut Vec<String>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            out.push(path.strip_prefix(base).unwrap().display().to_string());
            if path.is_dir() {
                walk(base, &path, out);
            }
        }
    }
    let mut out = Vec::new();
    walk(dir, dir, &mut out);
    out.sort();
    out
}
