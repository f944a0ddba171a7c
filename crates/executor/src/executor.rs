//! The Executor: single entry point to the store.
//!
//! The Executor is a stateless dispatcher that routes commands to the
//! appropriate store operations and converts results to outputs.

use jsondocs_engine::Store;
use jsondocs_security::AccessMode;
use tracing::debug;

use crate::handlers::{document, tree};
use crate::{Command, Error, Output, Result};

/// The command executor.
///
/// The Executor is **stateless**: it holds a store handle but keeps no state
/// of its own. All state lives on disk.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and can be shared across threads. Mutations of
/// the same document from different threads are serialized by the store.
///
/// # Example
///
/// ```ignore
/// use jsondocs_executor::{Command, Executor};
///
/// let executor = Executor::new(store);
///
/// let result = executor.execute(Command::GetDocument { path: "a.json".into() })?;
///
/// let results = executor.execute_many(vec![
///     Command::Increment { path: "a.json".into(), field: "n".into() },
///     Command::GetDocument { path: "a.json".into() },
/// ]);
/// ```
pub struct Executor {
    store: Store,
}

impl Executor {
    /// Create a new executor over `store`.
    ///
    /// The executor inherits the store handle's access mode.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Access mode of this executor.
    pub fn access_mode(&self) -> AccessMode {
        self.store.access_mode()
    }

    /// Execute a single command.
    ///
    /// Write commands on a read-only executor fail with
    /// [`Error::AccessDenied`] before any path is resolved.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        if cmd.is_write() && !self.access_mode().allows_writes() {
            return Err(Error::AccessDenied {
                command: cmd.name().to_string(),
            });
        }
        debug!(target: "jsondocs::executor", command = cmd.name(), "execute");

        let store = &self.store;
        match cmd {
            Command::GetDocument { path } => document::get_document(store, path),
            Command::GetNestedValue { path, keys } => {
                document::get_nested_value(store, path, keys)
            }
            Command::InitDocument { path, value } => document::init_document(store, path, value),
            Command::MergeUpdate { path, patch } => document::merge_update(store, path, patch),
            Command::RestrictedEdit { path, patch } => {
                document::restricted_edit(store, path, patch)
            }
            Command::Increment { path, field } => document::increment(store, path, field),
            Command::CopyItem {
                source,
                target,
                recursive,
            } => tree::copy_item(store, source, target, recursive),
            Command::DeleteItem { path, is_directory } => {
                tree::delete_item(store, path, is_directory)
            }
            Command::CreateFolder { path } => tree::create_folder(store, path),
            Command::ListDirectory { path } => tree::list_directory(store, path),
        }
    }

    /// Execute multiple commands sequentially.
    ///
    /// Returns one result per command, in order. A failing command does not
    /// stop the batch.
    pub fn execute_many(&self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }

    /// The underlying store handle.
    pub fn store(&self) -> &Store {
        &self.store
    }
}
