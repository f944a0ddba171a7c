//! Concurrency layer for jsondocs
//!
//! This crate provides per-path serialization for document mutations:
//! - PathLockTable: lazily created, self-evicting reader/writer locks keyed
//!   by resolved filesystem path
//! - PathGuard: RAII guard releasing the lock on every exit path

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod path_locks;

pub use path_locks::{LockMode, PathGuard, PathLockTable};
