//! Concurrency Integration Tests
//!
//! Per-path serialization of read-transform-write cycles, independence of
//! distinct paths, and eviction of the path-lock table.

#[path = "../common/mod.rs"]
mod common;

mod increments;
mod independence;
mod stress;
