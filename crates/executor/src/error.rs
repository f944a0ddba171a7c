//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be converted to/from JSON
//! - **Lossless in kind**: every store error maps to exactly one variant

use serde::{Deserialize, Serialize};

/// Command execution errors.
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Sandbox | `Traversal`, `ReservedPath` | Path rejected before any I/O |
/// | Not Found | `NotFound`, `KeyNotFound` | Entry or nested key doesn't exist |
/// | Content | `Parse`, `WrongType`, `Overflow`, `LimitExceeded` | Document can't be used or written as asked |
/// | Tree | `NotEmpty` | Directory delete guard |
/// | Validation | `InvalidInput` | Bad argument |
/// | Access | `AccessDenied`, `RootInUse` | Handle or process may not write |
/// | System | `Write`, `Io`, `Internal` | Infrastructure errors |
///
/// # Example
///
/// ```ignore
/// use jsondocs_executor::{Command, Error, Executor};
///
/// match executor.execute(cmd) {
///     Ok(output) => { /* handle success */ }
///     Err(Error::NotFound { path }) => println!("{} does not exist", path),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Sandbox ====================
    /// Logical path escapes the sandbox root
    #[error("path escapes sandbox root: {path}")]
    Traversal { path: String },

    /// Logical path names one of the store's own files
    #[error("reserved path: {path}")]
    ReservedPath { path: String },

    // ==================== Not Found ====================
    /// File or directory does not exist
    #[error("not found: {path}")]
    NotFound { path: String },

    /// Nested key lookup failed at `segment`
    #[error("key not found: '{segment}' at depth {depth}")]
    KeyNotFound { segment: String, depth: usize },

    // ==================== Content ====================
    /// File content is not valid JSON
    #[error("parse error in {path}: {reason}")]
    Parse { path: String, reason: String },

    /// Wrong type for operation
    #[error("wrong type: expected {expected}, got {actual}")]
    WrongType { expected: String, actual: String },

    /// Numeric overflow
    #[error("overflow incrementing field '{field}'")]
    Overflow { field: String },

    /// Document size or depth limit exceeded
    #[error("limit exceeded: {reason}")]
    LimitExceeded { reason: String },

    // ==================== Tree ====================
    /// Directory delete refused
    #[error("directory not empty: {path}")]
    NotEmpty { path: String },

    // ==================== Validation ====================
    /// Invalid input
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    // ==================== Access ====================
    /// Write command on a read-only handle
    #[error("access denied: {command} requires write access")]
    AccessDenied { command: String },

    /// Another process holds the sandbox root
    #[error("sandbox root in use by another process: {path}")]
    RootInUse { path: String },

    // ==================== System ====================
    /// Write, rename, mkdir, copy or remove failed
    #[error("write failed for {path}: {reason}")]
    Write { path: String, reason: String },

    /// Read failure other than a missing entry
    #[error("I/O error on {path}: {reason}")]
    Io { path: String, reason: String },

    /// Unexpected internal state
    #[error("internal error: {reason}")]
    Internal { reason: String },
}
