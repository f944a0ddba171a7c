//! Store Integration Tests
//!
//! Document semantics, sandbox containment, tree operations and access
//! modes, exercised through the public store API against a real directory.

#[path = "../common/mod.rs"]
mod common;

mod documents;
mod read_only;
