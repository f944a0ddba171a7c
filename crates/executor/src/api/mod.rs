//! High-level typed wrapper for the Executor.
//!
//! The [`JsonDocs`] struct provides a convenient Rust API that wraps the
//! [`Executor`] and [`Command`]/[`Output`] enums with typed method calls.
//!
//! # Example
//!
//! ```text
//! use jsondocs_executor::JsonDocs;
//! use serde_json::json;
//!
//! let docs = JsonDocs::open("/srv/docs")?;
//! docs.init_document("users/alice.json", json!({"name": "Alice", "visits": 0}))?;
//! docs.increment("users/alice.json", "visits")?;
//! let visits = docs.get_nested_value("users/alice.json", "visits")?;
//! ```

mod document;
mod tree;

use std::path::Path;

use jsondocs_engine::Store;
use jsondocs_security::{AccessMode, OpenOptions};

use crate::{Command, Executor, Output, Result};

/// High-level typed wrapper for store operations.
///
/// Every method builds a [`Command`], runs it through the [`Executor`] and
/// unpacks the expected [`Output`] variant.
pub struct JsonDocs {
    executor: Executor,
}

impl JsonDocs {
    /// Open a store rooted at `root` in read-write mode.
    ///
    /// The root directory is created if it doesn't exist.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        Self::open_with(root, OpenOptions::default())
    }

    /// Open a store rooted at `root` with explicit options.
    ///
    /// # Example
    ///
    /// ```text
    /// use jsondocs_executor::{JsonDocs, OpenOptions, AccessMode};
    ///
    /// let docs = JsonDocs::open_with("/srv/docs", OpenOptions::new().access_mode(AccessMode::ReadOnly))?;
    /// ```
    pub fn open_with<P: AsRef<Path>>(root: P, opts: OpenOptions) -> Result<Self> {
        let store = Store::open_with(root, opts)?;
        Ok(Self::from_store(store))
    }

    /// Wrap an already open store handle.
    pub fn from_store(store: Store) -> Self {
        Self {
            executor: Executor::new(store),
        }
    }

    /// The underlying executor, for running raw commands.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Canonical sandbox root.
    pub fn root(&self) -> &Path {
        self.executor.store().root()
    }

    /// Access mode of this handle.
    pub fn access_mode(&self) -> AccessMode {
        self.executor.access_mode()
    }

    /// Run `cmd`, treating the output as an internal error when `extract` rejects it.
    fn run<T>(&self, cmd: Command, extract: impl FnOnce(Output) -> Option<T>) -> Result<T> {
        let name = cmd.name();
        let output = self.executor.execute(cmd)?;
        extract(output).ok_or_else(|| crate::Error::Internal {
            reason: format!("Unexpected output for {}", name),
        })
    }
}
