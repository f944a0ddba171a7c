//! # jsondocs executor
//!
//! The public API for jsondocs, a sandboxed JSON document store over a
//! directory tree.
//!
//! This is the only crate users need to import. It provides:
//! - [`JsonDocs`] - typed methods for every operation
//! - [`Command`]/[`Output`] - serializable command interface
//! - [`Error`] - serializable error mirror
//!
//! ## Quick Start
//!
//! ```text
//! use jsondocs_executor::JsonDocs;
//! use serde_json::json;
//!
//! let docs = JsonDocs::open("/srv/docs")?;
//! docs.init_document("counters.json", json!({"hits": 0}))?;
//! docs.increment("counters.json", "hits")?;
//! ```
//!
//! ## Operations
//!
//! | Operation | Kind |
//! |-----------|------|
//! | GetDocument, GetNestedValue | Read |
//! | InitDocument, MergeUpdate, RestrictedEdit, Increment | Document write |
//! | CopyItem, DeleteItem, CreateFolder | Tree write |
//! | ListDirectory | Read |

#![warn(missing_docs)]

mod api;
mod command;
mod convert;
mod error;
mod executor;
mod output;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything users need is re-exported here
// =============================================================================

pub use api::JsonDocs;
pub use command::Command;
pub use error::Error;
pub use executor::Executor;
pub use output::Output;

// Re-export value and listing types so users don't need jsondocs-core directly
pub use jsondocs_core::{DirectoryEntry, EntryKind, IncrementOutcome, JsonObject, JsonValue, KeyPath};

// Re-export security types so users don't need jsondocs-security directly
pub use jsondocs_security::{AccessMode, OpenOptions};

// Re-export engine types so users don't need jsondocs-engine directly
pub use jsondocs_engine::{CopyStats, Store, StoreConfig};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
