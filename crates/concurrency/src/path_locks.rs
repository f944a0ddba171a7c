//! Per-path reader/writer locks
//!
//! Every mutation of a document is a read-transform-write cycle. Two cycles
//! on the same file must not interleave or the second writer silently
//! discards the first writer's change. `PathLockTable` hands out one
//! `RwLock` per resolved path:
//!
//! - Mutations hold the write side for the whole cycle.
//! - Reads hold the read side, so they never observe an in-flight cycle.
//! - Different paths never contend; there is no global lock.
//!
//! **Two-level locking:**
//! - Outer `DashMap` shard lock: held only while looking up, cloning or
//!   evicting an entry
//! - Per-path `Arc<RwLock<()>>`: held for the duration of the operation
//!
//! An entry is created on first use and evicted when the last guard for it
//! is dropped. Clones of the `Arc` are only taken under the shard lock, so a
//! strong count of 1 seen under that same lock means nobody holds or awaits
//! the path.

use dashmap::DashMap;
use parking_lot::lock_api::{ArcRwLockReadGuard, ArcRwLockWriteGuard};
use parking_lot::{RawRwLock, RwLock};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::trace;

/// Lock mode held by a [`PathGuard`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// Shared: concurrent readers allowed
    Read,
    /// Exclusive: one read-transform-write cycle
    Write,
}

enum Held {
    Read(ArcRwLockReadGuard<RawRwLock, ()>),
    Write(ArcRwLockWriteGuard<RawRwLock, ()>),
}

/// Process-wide table of per-path locks
///
/// `PathLockTable` is `Send + Sync`; share it behind an `Arc` or keep it in
/// a struct that is itself shared.
#[derive(Default)]
pub struct PathLockTable {
    locks: DashMap<PathBuf, Arc<RwLock<()>>>,
}

impl PathLockTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the exclusive lock for `path`, blocking until it is free
    pub fn write(&self, path: &Path) -> PathGuard<'_> {
        let lock = self.entry(path);
        let held = Held::Write(lock.write_arc());
        trace!(target: "jsondocs::lock", path = %path.display(), "write lock acquired");
        PathGuard {
            table: self,
            path: path.to_path_buf(),
            held: Some(held),
        }
    }

    /// Acquire the shared lock for `path`, blocking while a writer holds it
    pub fn read(&self, path: &Path) -> PathGuard<'_> {
        let lock = self.entry(path);
        let held = Held::Read(lock.read_arc());
        trace!(target: "jsondocs::lock", path = %path.display(), "read lock acquired");
        PathGuard {
            table: self,
            path: path.to_path_buf(),
            held: Some(held),
        }
    }

    /// Acquire the locks for two paths without risking lock-order deadlock
    ///
    /// Locks are taken in path order. When both paths are equal only the
    /// stronger of the two modes is taken and the second guard is `None`.
    pub fn pair(
        &self,
        first: (&Path, LockMode),
        second: (&Path, LockMode),
    ) -> (PathGuard<'_>, Option<PathGuard<'_>>) {
        if first.0 == second.0 {
            let mode = if first.1 == LockMode::Write || second.1 == LockMode::Write {
                LockMode::Write
            } else {
                LockMode::Read
            };
            return (self.acquire(first.0, mode), None);
        }

        if first.0 < second.0 {
            let a = self.acquire(first.0, first.1);
            let b = self.acquire(second.0, second.1);
            (a, Some(b))
        } else {
            let b = self.acquire(second.0, second.1);
            let a = self.acquire(first.0, first.1);
            (a, Some(b))
        }
    }

    /// Acquire `path` in the given mode
    pub fn acquire(&self, path: &Path, mode: LockMode) -> PathGuard<'_> {
        match mode {
            LockMode::Read => self.read(path),
            LockMode::Write => self.write(path),
        }
    }

    /// Number of paths that currently have a live lock entry
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Whether no path is locked or awaited
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    fn entry(&self, path: &Path) -> Arc<RwLock<()>> {
        // Clone while the shard lock is held so eviction cannot race us.
        Arc::clone(self.locks.entry(path.to_path_buf()).or_default().value())
    }

    fn release(&self, path: &Path) {
        if self
            .locks
            .remove_if(path, |_, lock| Arc::strong_count(lock) == 1)
            .is_some()
        {
            trace!(target: "jsondocs::lock", path = %path.display(), "lock entry evicted");
        }
    }
}

/// Scoped lock on one path
///
/// Dropping the guard releases the lock on every exit path, including
/// early returns through `?`, and evicts the table entry when it was the
/// last user.
pub struct PathGuard<'a> {
    table: &'a PathLockTable,
    path: PathBuf,
    held: Option<Held>,
}

impl PathGuard<'_> {
    /// The locked path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mode this guard holds
    pub fn mode(&self) -> LockMode {
        match self.held {
            Some(Held::Write(_)) => LockMode::Write,
            _ => LockMode::Read,
        }
    }
}

impl Drop for PathGuard<'_> {
    fn drop(&mut self) {
        // Unlock before the eviction check so our own clone is not counted.
        drop(self.held.take());
        self.table.release(&self.path);
    }
}
