//! Logical path resolution against the sandbox root
//!
//! `PathResolver::resolve` turns a caller-supplied logical path into an
//! absolute path that is guaranteed to be the root or one of its
//! descendants. It never touches the filesystem, so a rejected path leaks
//! nothing about what exists outside the root.
//!
//! ## Normalization
//!
//! 1. Percent-decode once (`..%2f` becomes `../`)
//! 2. Treat `\` as a separator
//! 3. An absolute input that already lies under the root is taken as-is;
//!    any other input is interpreted relative to the root
//! 4. Collapse `.` and `..` lexically; a `..` that would climb above the
//!    root is a traversal
//! 5. Final containment check on the normalized result
//!
//! Symlinks inside the root are not resolved; see DESIGN.md.

use crate::atomic::is_temp_name;
use crate::store::config::{CONFIG_FILE_NAME, LOCK_FILE_NAME};
use jsondocs_core::{Error, Result};
use std::path::{Component, Path, PathBuf};
use tracing::warn;

/// Maps logical paths to sandboxed absolute paths
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// Create a resolver for `root`
    ///
    /// `root` should be absolute and canonical; [`Store::open`](crate::Store::open)
    /// canonicalizes it before constructing the resolver.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The sandbox root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `logical` to an absolute path under the root
    ///
    /// # Errors
    ///
    /// - [`Error::Traversal`] if the normalized path leaves the root
    /// - [`Error::ReservedPath`] for the store's own config, lock and temp files
    /// - [`Error::InvalidInput`] if percent-decoding yields invalid UTF-8
    pub fn resolve(&self, logical: &str) -> Result<PathBuf> {
        let decoded = urlencoding::decode(logical).map_err(|_| {
            Error::InvalidInput(format!("path is not valid UTF-8 after decoding: {}", logical))
        })?;
        let unified = decoded.replace('\\', "/");
        let candidate = Path::new(&unified);

        let resolved = match self.under_root(candidate) {
            Some(normalized) => normalized,
            None => self.join_normalized(candidate, logical)?,
        };

        // Containment is checked on the normalized result, not the raw input.
        if !resolved.starts_with(&self.root) {
            return Err(self.traversal(logical));
        }

        if self.is_reserved(&resolved) {
            return Err(Error::ReservedPath {
                path: logical.to_string(),
            });
        }

        Ok(resolved)
    }

    /// Logical form of an absolute path under the root (`/`-separated)
    pub fn logical(&self, resolved: &Path) -> Option<String> {
        let relative = resolved.strip_prefix(&self.root).ok()?;
        let parts: Vec<_> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }

    /// If `candidate` is absolute and, once normalized, already names a
    /// location under the root, that normalized location.
    fn under_root(&self, candidate: &Path) -> Option<PathBuf> {
        if !candidate.is_absolute() {
            return None;
        }
        let mut normalized = PathBuf::new();
        for component in candidate.components() {
            match component {
                Component::ParentDir => {
                    normalized.pop();
                }
                Component::CurDir => {}
                other => normalized.push(other.as_os_str()),
            }
        }
        normalized.starts_with(&self.root).then_some(normalized)
    }

    fn join_normalized(&self, relative: &Path, logical: &str) -> Result<PathBuf> {
        let mut parts: Vec<&std::ffi::OsStr> = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => parts.push(part),
                Component::CurDir | Component::RootDir => {}
                Component::ParentDir => {
                    if parts.pop().is_none() {
                        return Err(self.traversal(logical));
                    }
                }
                Component::Prefix(_) => return Err(self.traversal(logical)),
            }
        }

        let mut resolved = self.root.clone();
        resolved.extend(parts);
        Ok(resolved)
    }

    fn is_reserved(&self, resolved: &Path) -> bool {
        if let Some(name) = resolved.file_name().and_then(|n| n.to_str()) {
            if is_temp_name(name) {
                return true;
            }
            if resolved.parent() == Some(self.root.as_path())
                && (name == CONFIG_FILE_NAME || name == LOCK_FILE_NAME)
            {
                return true;
            }
        }
        false
    }

    fn traversal(&self, logical: &str) -> Error {
        warn!(target: "jsondocs::resolve", path = logical, "Rejected path outside sandbox root");
        Error::Traversal {
            path: logical.to_string(),
        }
    }
}
