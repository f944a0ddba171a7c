//! Command enum defining all jsondocs operations.
//!
//! Commands are the instruction set of the store. Every operation a caller
//! can perform is a variant of this enum.
//!
//! Commands are:
//! - **Self-contained**: All parameters needed for execution are in the variant
//! - **Serializable**: Can be converted to/from JSON for cross-language use
//! - **Pure data**: No closures or executable code
//!
//! Paths are logical: they are resolved against the sandbox root at execution
//! time, and a path that escapes the root fails with `Error::Traversal`.

use jsondocs_core::JsonValue;
use serde::{Deserialize, Serialize};

/// A self-contained, serializable operation.
///
/// # Command Categories
///
/// | Category | Count | Description |
/// |----------|-------|-------------|
/// | Document | 6 | Whole-document reads and partial mutations |
/// | Tree | 4 | Copy, delete, create-folder, list |
///
/// # Example
///
/// ```ignore
/// use jsondocs_executor::Command;
///
/// let cmd = Command::Increment {
///     path: "counters/visits.json".into(),
///     field: "count".into(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    // ==================== Document (6) ====================
    /// Read a whole document.
    /// Returns: `Output::Document`
    GetDocument { path: String },

    /// Read the value reached by following `keys` from the document root.
    /// An empty key list returns the whole document.
    /// Returns: `Output::Value`
    GetNestedValue { path: String, keys: Vec<String> },

    /// Create or overwrite a document.
    /// Returns: `Output::Unit`
    InitDocument { path: String, value: JsonValue },

    /// Shallow-merge an object into a document; patch fields overwrite or add.
    /// Returns: `Output::Document`
    MergeUpdate { path: String, patch: JsonValue },

    /// Overwrite only the fields that already exist in a document.
    /// Returns: `Output::Document`
    RestrictedEdit { path: String, patch: JsonValue },

    /// Add one to a numeric field.
    /// Returns: `Output::Incremented` or `Output::NoOp`
    Increment { path: String, field: String },

    // ==================== Tree (4) ====================
    /// Copy a file, or a directory tree when `recursive` is set.
    /// Returns: `Output::Copied`
    CopyItem {
        source: String,
        target: String,
        #[serde(default)]
        recursive: bool,
    },

    /// Delete a file, or an empty directory.
    /// Returns: `Output::Unit`
    DeleteItem {
        path: String,
        #[serde(default)]
        is_directory: bool,
    },

    /// Create a directory and its ancestors.
    /// Returns: `Output::Unit`
    CreateFolder { path: String },

    /// List a directory.
    /// Returns: `Output::Entries`
    ListDirectory { path: String },
}

impl Command {
    /// Whether this command writes to the tree.
    ///
    /// Write commands are rejected by an executor in read-only mode.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Command::InitDocument { .. }
                | Command::MergeUpdate { .. }
                | Command::RestrictedEdit { .. }
                | Command::Increment { .. }
                | Command::CopyItem { .. }
                | Command::DeleteItem { .. }
                | Command::CreateFolder { .. }
        )
    }

    /// Variant name, used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::GetDocument { .. } => "GetDocument",
            Command::GetNestedValue { .. } => "GetNestedValue",
            Command::InitDocument { .. } => "InitDocument",
            Command::MergeUpdate { .. } => "MergeUpdate",
            Command::RestrictedEdit { .. } => "RestrictedEdit",
            Command::Increment { .. } => "Increment",
            Command::CopyItem { .. } => "CopyItem",
            Command::DeleteItem { .. } => "DeleteItem",
            Command::CreateFolder { .. } => "CreateFolder",
            Command::ListDirectory { .. } => "ListDirectory",
        }
    }
}
