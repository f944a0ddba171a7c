//! Core types for jsondocs
//!
//! This crate defines the foundational types used throughout the system:
//! - JsonValue: the document value (tagged variant over serde_json::Value)
//! - KeyPath: ordered keys for nested reads
//! - navigate / merge_fields / edit_fields / increment_field: pure document logic
//! - DirectoryEntry / EntryKind: tree listing types
//! - Error: the typed failure kinds reported by the store

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod json;
pub mod types;

pub use error::{Error, Result};
pub use json::{
    edit_fields, increment_field, merge_fields, navigate, validate_size, IncrementOutcome,
    JsonObject, JsonValue, KeyNotFound, KeyPath, KeyPathParseError, LimitError, MutationError,
    MAX_DOCUMENT_SIZE, MAX_NESTING_DEPTH,
};
pub use types::{DirectoryEntry, EntryKind};
