//! Access control and open options for a jsondocs store.
//!
//! This crate provides the [`AccessMode`] and [`OpenOptions`] types used to
//! control how a store is opened and what operations are permitted. An
//! authentication layer in front of the store decides which mode a caller
//! gets; the store enforces it.

#![warn(missing_docs)]

use serde::{Deserialize, Serialize};

/// Controls whether the store allows writes or is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccessMode {
    /// Allow both reads and writes (default).
    #[default]
    ReadWrite,
    /// Read-only mode: every mutation and structural write returns an error.
    ReadOnly,
}

impl AccessMode {
    /// Whether writes are permitted.
    pub fn allows_writes(&self) -> bool {
        matches!(self, AccessMode::ReadWrite)
    }
}

/// Options for opening a store.
///
/// Use the builder pattern to configure options. Any field set to `Some`
/// overrides the corresponding value in `jsondocs.toml`.
///
/// ```ignore
/// use jsondocs_security::{OpenOptions, AccessMode};
///
/// let opts = OpenOptions::new()
///     .access_mode(AccessMode::ReadOnly)
///     .pretty(false);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    /// The access mode for the store.
    pub access_mode: AccessMode,
    /// Override pretty-printing of written documents.
    pub pretty: Option<bool>,
    /// Override fsync of temporary files before rename.
    pub sync_writes: Option<bool>,
    /// Override the maximum serialized document size in bytes.
    pub max_document_bytes: Option<usize>,
    /// Override the maximum document nesting depth.
    pub max_nesting_depth: Option<usize>,
    /// Override whether the root directory is locked against other processes.
    pub exclusive_root: Option<bool>,
}

impl OpenOptions {
    /// Create a new `OpenOptions` with default settings (read-write mode).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the access mode for the store.
    pub fn access_mode(mut self, mode: AccessMode) -> Self {
        self.access_mode = mode;
        self
    }

    /// Pretty-print (two-space indent) or compact output.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = Some(pretty);
        self
    }

    /// Enable or disable fsync before rename.
    pub fn sync_writes(mut self, sync: bool) -> Self {
        self.sync_writes = Some(sync);
        self
    }

    /// Set the maximum serialized document size.
    pub fn max_document_bytes(mut self, bytes: usize) -> Self {
        self.max_document_bytes = Some(bytes);
        self
    }

    /// Set the maximum nesting depth.
    pub fn max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = Some(depth);
        self
    }

    /// Hold (or skip) the cross-process lock on the root directory.
    pub fn exclusive_root(mut self, exclusive: bool) -> Self {
        self.exclusive_root = Some(exclusive);
        self
    }
}
