//! Structural operations on the sandboxed tree: copy, delete, create, list
//!
//! All paths given to [`TreeOps`] are already resolved and lie under the
//! root. File-level copies go through the same [`PathLockTable`] as document
//! mutations, so a copy never reads a half-applied mutation and never races
//! a writer on the target.

use crate::atomic::{is_temp_name, write_atomic};
use crate::store::config::{CONFIG_FILE_NAME, LOCK_FILE_NAME};
use jsondocs_concurrency::{LockMode, PathLockTable};
use jsondocs_core::{DirectoryEntry, EntryKind, Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Counts of entries written by [`TreeOps::copy`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyStats {
    /// Files copied
    pub files: usize,
    /// Directories created
    pub directories: usize,
}

/// Copy, delete, create-folder and list over resolved paths
pub struct TreeOps {
    root: PathBuf,
    locks: Arc<PathLockTable>,
    sync_writes: bool,
}

impl TreeOps {
    /// Create tree operations for `root`, sharing `locks` with the document store
    pub fn new(root: impl Into<PathBuf>, locks: Arc<PathLockTable>, sync_writes: bool) -> Self {
        Self {
            root: root.into(),
            locks,
            sync_writes,
        }
    }

    /// Copy `source` to `target`
    ///
    /// A file is copied to `target`, creating its parent directories. A
    /// directory is copied recursively when `recursive` is set. The first
    /// failing entry aborts the copy; entries already written stay in place
    /// and are reported in the log.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if `source` does not exist
    /// - [`Error::InvalidInput`] for a symlink source, a directory without
    ///   `recursive`, or a directory copied into its own subtree
    /// - [`Error::Write`] if an entry cannot be written
    pub fn copy(&self, source: &Path, target: &Path, recursive: bool) -> Result<CopyStats> {
        let mut stats = CopyStats::default();
        if source == target {
            debug!(target: "jsondocs::tree", path = %source.display(), "copy onto itself skipped");
            return Ok(stats);
        }

        let meta = fs::symlink_metadata(source).map_err(|e| Error::read(source, e))?;
        // Matches copy_dir, which skips symlinks: a link may point outside the root.
        if meta.file_type().is_symlink() {
            return Err(Error::InvalidInput(format!(
                "{} is a symlink; symlinks are not copied",
                source.display()
            )));
        }
        if meta.is_dir() {
            if !recursive {
                return Err(Error::InvalidInput(format!(
                    "{} is a directory; recursive copy required",
                    source.display()
                )));
            }
            if target.starts_with(source) {
                return Err(Error::InvalidInput(format!(
                    "cannot copy {} into its own subtree",
                    source.display()
                )));
            }
            if let Err(e) = self.copy_dir(source, target, &mut stats) {
                warn!(
                    target: "jsondocs::tree",
                    source = %source.display(),
                    target = %target.display(),
                    files = stats.files,
                    directories = stats.directories,
                    error = %e,
                    "Recursive copy aborted, partial copy left in place"
                );
                return Err(e);
            }
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| Error::write(parent, e))?;
            }
            self.copy_file(source, target)?;
            stats.files += 1;
        }

        debug!(
            target: "jsondocs::tree",
            source = %source.display(),
            target = %target.display(),
            files = stats.files,
            directories = stats.directories,
            "copy"
        );
        Ok(stats)
    }

    fn copy_dir(&self, source: &Path, target: &Path, stats: &mut CopyStats) -> Result<()> {
        fs::create_dir_all(target).map_err(|e| Error::write(target, e))?;
        stats.directories += 1;

        let mut entries = fs::read_dir(source)
            .map_err(|e| Error::read(source, e))?
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(|e| Error::read(source, e))?;
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let name = entry.file_name();
            if is_temp_name(&name.to_string_lossy()) {
                continue;
            }
            let from = entry.path();
            let to = target.join(&name);
            let file_type = entry.file_type().map_err(|e| Error::read(&from, e))?;
            if file_type.is_symlink() {
                debug!(target: "jsondocs::tree", path = %from.display(), "symlink skipped");
            } else if file_type.is_dir() {
                self.copy_dir(&from, &to, stats)?;
            } else {
                self.copy_file(&from, &to)?;
                stats.files += 1;
            }
        }
        Ok(())
    }

    fn copy_file(&self, source: &Path, target: &Path) -> Result<()> {
        let _guards = self
            .locks
            .pair((source, LockMode::Read), (target, LockMode::Write));
        let bytes = fs::read(source).map_err(|e| Error::read(source, e))?;
        write_atomic(target, &bytes, self.sync_writes).map_err(|e| Error::write(target, e))
    }

    /// Delete a file, or a directory only when it is empty
    ///
    /// `is_directory` must match what is on disk.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if `path` does not exist
    /// - [`Error::NotEmpty`] for a directory that still has entries
    /// - [`Error::InvalidInput`] for the root itself or a kind mismatch
    pub fn delete(&self, path: &Path, is_directory: bool) -> Result<()> {
        if path == self.root {
            return Err(Error::InvalidInput(
                "the sandbox root cannot be deleted".to_string(),
            ));
        }

        let meta = fs::symlink_metadata(path).map_err(|e| Error::read(path, e))?;
        if meta.is_dir() != is_directory {
            return Err(Error::InvalidInput(format!(
                "{} is a {}, not a {}",
                path.display(),
                kind_name(meta.is_dir()),
                kind_name(is_directory)
            )));
        }

        let _guard = self.locks.write(path);
        if is_directory {
            if has_entries(path)? {
                return Err(Error::NotEmpty {
                    path: path.to_path_buf(),
                });
            }
            if let Err(e) = fs::remove_dir(path) {
                // An entry may have appeared between the check and the removal.
                return Err(if has_entries(path).unwrap_or(false) {
                    Error::NotEmpty {
                        path: path.to_path_buf(),
                    }
                } else {
                    Error::write(path, e)
                });
            }
        } else {
            fs::remove_file(path).map_err(|e| Error::write(path, e))?;
        }

        debug!(target: "jsondocs::tree", path = %path.display(), is_directory, "delete");
        Ok(())
    }

    /// Create `path` and any missing ancestors. Idempotent.
    pub fn create_folder(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|e| Error::write(path, e))?;
        debug!(target: "jsondocs::tree", path = %path.display(), "create_folder");
        Ok(())
    }

    /// Entries of the directory at `path`, sorted by name
    ///
    /// In-flight temporary files and the store's own files are omitted.
    pub fn list(&self, path: &Path) -> Result<Vec<DirectoryEntry>> {
        let meta = fs::metadata(path).map_err(|e| Error::read(path, e))?;
        if !meta.is_dir() {
            return Err(Error::InvalidInput(format!(
                "{} is not a directory",
                path.display()
            )));
        }

        let at_root = path == self.root;
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| Error::read(path, e))? {
            let entry = entry.map_err(|e| Error::read(path, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_temp_name(&name)
                || (at_root && (name == CONFIG_FILE_NAME || name == LOCK_FILE_NAME))
            {
                continue;
            }
            let is_dir = fs::metadata(entry.path())
                .map(|m| m.is_dir())
                .unwrap_or(false);
            let kind = if is_dir {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            entries.push(DirectoryEntry::new(name, kind));
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        debug!(target: "jsondocs::tree", path = %path.display(), count = entries.len(), "list");
        Ok(entries)
    }
}

fn has_entries(dir: &Path) -> Result<bool> {
    let mut entries = fs::read_dir(dir).map_err(|e| Error::read(dir, e))?;
    Ok(entries.next().is_some())
}

fn kind_name(is_dir: bool) -> &'static str {
    if is_dir {
        "directory"
    } else {
        "file"
    }
}
