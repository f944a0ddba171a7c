//! Storage engine for jsondocs
//!
//! This crate turns a directory of JSON files into a document namespace:
//! - PathResolver: logical path to sandboxed absolute path
//! - DocumentStore: read, initialize, merge, restricted edit, increment
//! - TreeOps: copy, delete, create-folder, list
//! - Store: one sandbox root with config, access mode and root lock
//!
//! Every write goes through [`atomic::write_atomic`], and every mutation of
//! one file is serialized through the shared path-lock table.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod atomic;
pub mod primitives;
pub mod resolver;
pub mod store;

pub use primitives::{CopyStats, DocumentStore, TreeOps};
pub use resolver::PathResolver;
pub use store::{Store, StoreConfig};
