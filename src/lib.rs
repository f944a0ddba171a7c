//! jsondocs - a sandboxed JSON document store over a directory tree
//!
//! A directory of JSON files becomes a hierarchical document namespace:
//! callers read whole documents, read nested fields by key path, and apply
//! partial mutations (merge, restricted edit, increment) without rewriting
//! documents by hand.
//!
//! # Quick Start
//!
//! ```ignore
//! use jsondocs::JsonDocs;
//! use serde_json::json;
//!
//! let docs = JsonDocs::open("/srv/docs")?;
//! docs.init_document("users/alice.json", json!({"name": "Alice", "visits": 0}))?;
//! docs.merge_update("users/alice.json", json!({"email": "alice@example.com"}))?;
//! docs.increment("users/alice.json", "visits")?;
//! let email = docs.get_nested_value("users/alice.json", "email")?;
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Executor`], which provides a command-based
//! API. The [`JsonDocs`] struct provides a convenient typed interface.
//!
//! Every logical path is resolved against the sandbox root before any
//! filesystem access, and mutations of one document are serialized.

// Re-export the public API from jsondocs-executor
pub use jsondocs_executor::*;
