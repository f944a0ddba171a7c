//! Output enum for command execution results.
//!
//! Every command produces exactly one output variant, except `Increment`,
//! which reports either the new value or a no-op.

use jsondocs_core::{DirectoryEntry, JsonValue};
use jsondocs_engine::CopyStats;
use serde::{Deserialize, Serialize};

/// Successful command execution results.
///
/// # Example
///
/// ```text
/// match executor.execute(Command::Increment { path, field })? {
///     Output::Incremented { new_value, .. } => println!("now {}", new_value),
///     Output::NoOp { field } => println!("{} is not a number", field),
///     _ => unreachable!("Increment returns Incremented or NoOp"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// No return value (init, delete, create-folder)
    Unit,

    /// A whole document
    Document(JsonValue),

    /// A value nested inside a document
    Value(JsonValue),

    /// A numeric field was incremented
    Incremented {
        /// The incremented field
        field: String,
        /// Value after the increment
        new_value: JsonValue,
    },

    /// The field was missing or not a number; nothing was written
    NoOp {
        /// The requested field
        field: String,
    },

    /// Entries written by a copy
    Copied(CopyStats),

    /// Directory listing, sorted by name
    Entries(Vec<DirectoryEntry>),
}
