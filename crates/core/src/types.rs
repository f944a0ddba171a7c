//! Tree entry types
//!
//! A [`DirectoryEntry`] is what a directory listing returns: a name and
//! whether the entry is a file or a directory.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a filesystem entry under the sandbox root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Regular file (usually a JSON document)
    File,
    /// Directory
    Directory,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => write!(f, "file"),
            EntryKind::Directory => write!(f, "directory"),
        }
    }
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// File name (last path component)
    pub name: String,
    /// File or directory
    pub kind: EntryKind,
}

impl DirectoryEntry {
    /// Create an entry
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Whether this entry is a directory
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}
