//! The store handle: one sandbox root, every operation by logical path
//!
//! [`Store`] wires the pieces together. Each call resolves its logical path
//! through the [`PathResolver`] before anything touches the filesystem, then
//! hands the resolved path to the [`DocumentStore`] or [`TreeOps`].
//!
//! ## Opening
//!
//! 1. Canonicalize the root (a read-write open creates it first)
//! 2. Return the live instance for that root if this process has one
//! 3. Load `jsondocs.toml`, apply [`OpenOptions`] overrides
//! 4. Take the cross-process advisory lock on `.jsondocs.lock`
//!
//! A read-write store holds the lock exclusively and a read-only store holds
//! it shared, so readers in other processes may coexist with each other but
//! never with a writer.

pub mod config;
pub mod registry;

pub use config::StoreConfig;
pub use registry::OPEN_STORES;

use crate::primitives::{CopyStats, DocumentStore, TreeOps};
use crate::resolver::PathResolver;
use config::LOCK_FILE_NAME;
use fs2::FileExt;
use jsondocs_concurrency::PathLockTable;
use jsondocs_core::{
    DirectoryEntry, Error, IncrementOutcome, JsonObject, JsonValue, KeyPath, Result,
};
use jsondocs_security::{AccessMode, OpenOptions};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// State shared by every handle on one root
pub struct StoreInner {
    resolver: PathResolver,
    documents: DocumentStore,
    tree: TreeOps,
    locks: Arc<PathLockTable>,
    config: StoreConfig,
    writable: bool,
    lock_file: Option<File>,
}

impl Drop for StoreInner {
    fn drop(&mut self) {
        // Unlock before the entry goes away, or a concurrent open in this
        // process sees its own lock as another process's.
        drop(self.lock_file.take());
        let mut registry = OPEN_STORES.lock();
        let dead = registry
            .get(self.resolver.root())
            .map_or(false, |weak| weak.strong_count() == 0);
        if dead {
            registry.remove(self.resolver.root());
        }
    }
}

/// Handle on a sandboxed JSON document tree
///
/// Cloning is cheap; clones share locks and configuration.
///
/// # Example
///
/// ```ignore
/// use jsondocs_engine::Store;
///
/// let store = Store::open("/srv/docs")?;
/// store.init_document("users/alice.json", &serde_json::json!({"visits": 0}).into())?;
/// store.increment("users/alice.json", "visits")?;
/// ```
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
    access_mode: AccessMode,
}

impl Store {
    /// Open a read-write store at `root` with settings from `jsondocs.toml`
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        Self::open_with(root, OpenOptions::default())
    }

    /// Open a store at `root` with explicit options
    ///
    /// When this process already has `root` open the existing instance is
    /// shared and the config overrides in `options` are ignored; only the
    /// access mode applies to the returned handle.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if a read-only open names a missing root
    /// - [`Error::InvalidInput`] if `root` is not a directory, the config is
    ///   invalid, or a read-write open meets a read-only instance
    /// - [`Error::RootInUse`] if another process holds the root lock
    pub fn open_with<P: AsRef<Path>>(root: P, options: OpenOptions) -> Result<Self> {
        let root = root.as_ref();
        let writable = options.access_mode.allows_writes();
        if writable {
            std::fs::create_dir_all(root).map_err(|e| Error::write(root, e))?;
        }
        let canonical = root.canonicalize().map_err(|e| Error::read(root, e))?;
        if !canonical.is_dir() {
            return Err(Error::InvalidInput(format!(
                "sandbox root {} is not a directory",
                canonical.display()
            )));
        }

        // Held across the whole open so two threads cannot both create an instance.
        let mut registry = OPEN_STORES.lock();
        let existing = loop {
            let found = registry.get(&canonical).map(|weak| weak.upgrade());
            match found {
                Some(Some(inner)) => break Some(inner),
                None => break None,
                // Last handle is mid-drop: wait for it to unlock the root and deregister.
                Some(None) => {
                    drop(registry);
                    std::thread::yield_now();
                    registry = OPEN_STORES.lock();
                }
            }
        };
        if let Some(inner) = existing {
            // Released first: if `inner` turns out to be the last handle its
            // Drop takes the registry lock.
            drop(registry);
            if writable && !inner.writable {
                return Err(Error::InvalidInput(format!(
                    "sandbox root {} is open read-only in this process",
                    canonical.display()
                )));
            }
            info!(target: "jsondocs::store", root = %canonical.display(), "Returning existing store instance");
            return Ok(Self {
                inner,
                access_mode: options.access_mode,
            });
        }

        let mut config = StoreConfig::load(&canonical)?;
        config.apply(&options);
        config.validate()?;

        let lock_file = if config.exclusive_root {
            lock_root(&canonical, writable)?
        } else {
            None
        };

        let locks = Arc::new(PathLockTable::new());
        let inner = Arc::new(StoreInner {
            resolver: PathResolver::new(canonical.clone()),
            documents: DocumentStore::new(Arc::clone(&locks), &config),
            tree: TreeOps::new(canonical.clone(), Arc::clone(&locks), config.sync_writes),
            locks,
            config,
            writable,
            lock_file,
        });
        registry.insert(canonical.clone(), Arc::downgrade(&inner));
        drop(registry);

        info!(
            target: "jsondocs::store",
            root = %canonical.display(),
            access_mode = ?options.access_mode,
            pretty = inner.config.pretty,
            sync_writes = inner.config.sync_writes,
            "Store opened"
        );

        Ok(Self {
            inner,
            access_mode: options.access_mode,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Canonical sandbox root
    pub fn root(&self) -> &Path {
        self.inner.resolver.root()
    }

    /// Effective configuration
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Access mode of this handle
    pub fn access_mode(&self) -> AccessMode {
        self.access_mode
    }

    /// Number of paths with a live lock entry
    pub fn locks_in_use(&self) -> usize {
        self.inner.locks.len()
    }

    /// Resolve a logical path without performing any operation
    pub fn resolve(&self, logical: &str) -> Result<PathBuf> {
        self.inner.resolver.resolve(logical)
    }

    // =========================================================================
    // Document operations
    // =========================================================================

    /// Whole document at `path`
    pub fn get_document(&self, path: &str) -> Result<JsonValue> {
        let resolved = self.resolve(path)?;
        self.inner.documents.read(&resolved)
    }

    /// Value reached by following `keys` inside the document at `path`
    pub fn get_nested_value(&self, path: &str, keys: &KeyPath) -> Result<JsonValue> {
        let resolved = self.resolve(path)?;
        self.inner.documents.read_nested(&resolved, keys)
    }

    /// Create or overwrite the document at `path` with `value`
    pub fn init_document(&self, path: &str, value: &JsonValue) -> Result<()> {
        let resolved = self.document_path(path)?;
        self.inner.documents.initialize(&resolved, value)
    }

    /// Shallow-merge `patch` into the document at `path`
    pub fn merge_update(&self, path: &str, patch: &JsonObject) -> Result<JsonValue> {
        let resolved = self.document_path(path)?;
        self.inner.documents.merge_update(&resolved, patch)
    }

    /// Overwrite only the existing fields of the document at `path`
    pub fn restricted_edit(&self, path: &str, patch: &JsonObject) -> Result<JsonValue> {
        let resolved = self.document_path(path)?;
        self.inner.documents.restricted_edit(&resolved, patch)
    }

    /// Add one to the numeric field `field` of the document at `path`
    pub fn increment(&self, path: &str, field: &str) -> Result<IncrementOutcome> {
        let resolved = self.document_path(path)?;
        self.inner.documents.increment(&resolved, field)
    }

    // =========================================================================
    // Tree operations
    // =========================================================================

    /// Copy a file, or a directory when `recursive` is set
    pub fn copy_item(&self, source: &str, target: &str, recursive: bool) -> Result<CopyStats> {
        self.check_writable()?;
        let source = self.resolve(source)?;
        let target = self.not_root(target, self.resolve(target)?)?;
        self.inner.tree.copy(&source, &target, recursive)
    }

    /// Delete a file, or an empty directory
    pub fn delete_item(&self, path: &str, is_directory: bool) -> Result<()> {
        let resolved = self.writable_path(path)?;
        self.inner.tree.delete(&resolved, is_directory)
    }

    /// Create a directory and its ancestors
    pub fn create_folder(&self, path: &str) -> Result<()> {
        let resolved = self.writable_path(path)?;
        self.inner.tree.create_folder(&resolved)
    }

    /// Entries of the directory at `path`, sorted by name
    pub fn list_directory(&self, path: &str) -> Result<Vec<DirectoryEntry>> {
        let resolved = self.resolve(path)?;
        self.inner.tree.list(&resolved)
    }

    fn check_writable(&self) -> Result<()> {
        if self.access_mode.allows_writes() {
            Ok(())
        } else {
            debug!(target: "jsondocs::store", "write rejected on read-only handle");
            Err(Error::ReadOnly)
        }
    }

    fn writable_path(&self, path: &str) -> Result<PathBuf> {
        self.check_writable()?;
        self.resolve(path)
    }

    /// Writable path that names a document, never the root itself
    fn document_path(&self, path: &str) -> Result<PathBuf> {
        let resolved = self.writable_path(path)?;
        self.not_root(path, resolved)
    }

    // The root's sibling temp file would land outside the sandbox.
    fn not_root(&self, logical: &str, resolved: PathBuf) -> Result<PathBuf> {
        if resolved == self.root() {
            return Err(Error::InvalidInput(format!(
                "'{}' names the sandbox root, not a document",
                logical
            )));
        }
        Ok(resolved)
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("root", &self.root())
            .field("access_mode", &self.access_mode)
            .finish()
    }
}

/// Take the cross-process advisory lock on `root`
///
/// A read-only open never creates the lock file; when it is absent no
/// read-write store has ever run here and there is nothing to exclude.
fn lock_root(root: &Path, writable: bool) -> Result<Option<File>> {
    let lock_path = root.join(LOCK_FILE_NAME);
    let opened = if writable {
        std::fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&lock_path)
    } else {
        File::open(&lock_path)
    };
    let file = match opened {
        Ok(file) => file,
        Err(e) if !writable && e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::write(&lock_path, e)),
    };

    let locked = if writable {
        FileExt::try_lock_exclusive(&file)
    } else {
        FileExt::try_lock_shared(&file)
    };
    locked.map_err(|_| Error::RootInUse {
        path: root.to_path_buf(),
    })?;
    Ok(Some(file))
}
