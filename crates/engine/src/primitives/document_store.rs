//! DocumentStore: whole-document reads and partial mutations
//!
//! ## Design: NO CACHE
//!
//! DocumentStore holds the shared `PathLockTable` and the write settings.
//! Every call re-reads the backing file and every mutation re-writes it, so
//! the filesystem stays the sole source of truth.
//!
//! ## Mutation protocol
//!
//! `merge_update`, `restricted_edit`, `increment` and `initialize` run under
//! the path's write lock:
//!
//! ```text
//! 1. acquire write lock for the resolved path
//! 2. read + parse current document
//! 3. transform in memory
//! 4. validate limits, serialize, write temp file, rename over target
//! 5. release lock (guard drop, also on every error path)
//! ```
//!
//! Reads hold the read lock, so they see either the state before or after a
//! mutation. All paths given to this type are already resolved.

use crate::atomic::write_atomic;
use crate::store::config::StoreConfig;
use jsondocs_concurrency::PathLockTable;
use jsondocs_core::{
    edit_fields, increment_field, merge_fields, navigate, validate_size, Error, IncrementOutcome,
    JsonObject, JsonValue, KeyPath, Result,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Serialization and limit settings applied to every write
#[derive(Debug, Clone, Copy)]
struct WriteSettings {
    pretty: bool,
    sync: bool,
    max_bytes: usize,
    max_depth: usize,
}

/// JSON document operations on resolved paths
pub struct DocumentStore {
    locks: Arc<PathLockTable>,
    settings: WriteSettings,
}

impl DocumentStore {
    /// Create a store sharing `locks` with the other path-based operations
    pub fn new(locks: Arc<PathLockTable>, config: &StoreConfig) -> Self {
        Self {
            locks,
            settings: WriteSettings {
                pretty: config.pretty,
                sync: config.sync_writes,
                max_bytes: config.max_document_bytes,
                max_depth: config.max_nesting_depth,
            },
        }
    }

    /// Load and parse the document at `path`
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the file does not exist
    /// - [`Error::Parse`] if the content is not valid JSON
    pub fn read(&self, path: &Path) -> Result<JsonValue> {
        let _guard = self.locks.read(path);
        debug!(target: "jsondocs::store", path = %path.display(), "read");
        load(path)
    }

    /// Read the value at `keys` inside the document at `path`
    pub fn read_nested(&self, path: &Path, keys: &KeyPath) -> Result<JsonValue> {
        let document = self.read(path)?;
        let value = navigate(&document, keys)?;
        Ok(value.clone())
    }

    /// Write `value` as the document at `path`, replacing any existing content
    ///
    /// Missing parent directories are created.
    pub fn initialize(&self, path: &Path, value: &JsonValue) -> Result<()> {
        let _guard = self.locks.write(path);
        debug!(target: "jsondocs::store", path = %path.display(), "initialize");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::write(parent, e))?;
        }
        self.store(path, value)
    }

    /// Shallow-merge `patch` into the document and return the new document
    ///
    /// Patch fields overwrite existing fields of the same name; new fields
    /// are added. The document must be an object.
    pub fn merge_update(&self, path: &Path, patch: &JsonObject) -> Result<JsonValue> {
        self.modify(path, "merge_update", |document| {
            merge_fields(document, patch)?;
            Ok((document.clone(), true))
        })
    }

    /// Overwrite only the fields of `patch` that already exist in the document
    ///
    /// Fields present only in `patch` are dropped. Nothing is written when
    /// every patch field was dropped.
    pub fn restricted_edit(&self, path: &Path, patch: &JsonObject) -> Result<JsonValue> {
        self.modify(path, "restricted_edit", |document| {
            let dropped = edit_fields(document, patch)?;
            if !dropped.is_empty() {
                debug!(target: "jsondocs::store", ?dropped, "restricted_edit dropped unknown fields");
            }
            let changed = dropped.len() < patch.len();
            Ok((document.clone(), changed))
        })
    }

    /// Add one to the numeric field `field`
    ///
    /// A missing or non-numeric field yields [`IncrementOutcome::NoOp`] and
    /// leaves the file untouched.
    pub fn increment(&self, path: &Path, field: &str) -> Result<IncrementOutcome> {
        self.modify(path, "increment", |document| {
            let outcome = increment_field(document, field)?;
            let changed = !outcome.is_noop();
            Ok((outcome, changed))
        })
    }

    /// Read-transform-write under the path's write lock
    ///
    /// `transform` returns its result and whether the document changed.
    fn modify<T>(
        &self,
        path: &Path,
        op: &'static str,
        transform: impl FnOnce(&mut JsonValue) -> Result<(T, bool)>,
    ) -> Result<T> {
        let _guard = self.locks.write(path);
        let mut document = load(path)?;
        let (result, changed) = transform(&mut document)?;
        if changed {
            self.store(path, &document)?;
        }
        debug!(target: "jsondocs::store", path = %path.display(), op, changed, "mutation applied");
        Ok(result)
    }

    /// Validate, serialize and atomically write. Caller holds the write lock.
    fn store(&self, path: &Path, document: &JsonValue) -> Result<()> {
        document.validate_depth(self.settings.max_depth)?;
        let bytes = document
            .to_vec(self.settings.pretty)
            .map_err(|e| Error::InvalidInput(format!("cannot serialize document: {}", e)))?;
        validate_size(bytes.len(), self.settings.max_bytes)?;
        write_atomic(path, &bytes, self.settings.sync).map_err(|e| Error::write(path, e))
    }
}

fn load(path: &Path) -> Result<JsonValue> {
    let bytes = fs::read(path).map_err(|e| Error::read(path, e))?;
    JsonValue::from_slice(&bytes).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}
