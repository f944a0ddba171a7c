//! Tree operations.

use jsondocs_core::DirectoryEntry;
use jsondocs_engine::CopyStats;

use super::JsonDocs;
use crate::{Command, Output, Result};

impl JsonDocs {
    /// Copy a file, or a directory tree when `recursive` is set.
    pub fn copy_item(&self, source: &str, target: &str, recursive: bool) -> Result<CopyStats> {
        self.run(
            Command::CopyItem {
                source: source.to_string(),
                target: target.to_string(),
                recursive,
            },
            |output| match output {
                Output::Copied(stats) => Some(stats),
                _ => None,
            },
        )
    }

    /// Delete a file, or an empty directory.
    pub fn delete_item(&self, path: &str, is_directory: bool) -> Result<()> {
        self.run(
            Command::DeleteItem {
                path: path.to_string(),
                is_directory,
            },
            |output| matches!(output, Output::Unit).then_some(()),
        )
    }

    /// Create a directory and its ancestors.
    pub fn create_folder(&self, path: &str) -> Result<()> {
        self.run(
            Command::CreateFolder {
                path: path.to_string(),
            },
            |output| matches!(output, Output::Unit).then_some(()),
        )
    }

    /// List a directory, sorted by name.
    pub fn list_directory(&self, path: &str) -> Result<Vec<DirectoryEntry>> {
        self.run(
            Command::ListDirectory {
                path: path.to_string(),
            },
            |output| match output {
                Output::Entries(entries) => Some(entries),
                _ => None,
            },
        )
    }
}
