//! Store configuration via `jsondocs.toml`
//!
//! An optional `jsondocs.toml` in the sandbox root tunes how documents are
//! written. A missing file means defaults. Values set on
//! [`OpenOptions`] take precedence over the file.

use jsondocs_core::{Error, Result, MAX_DOCUMENT_SIZE, MAX_NESTING_DEPTH};
use jsondocs_security::OpenOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name placed in the sandbox root.
pub const CONFIG_FILE_NAME: &str = "jsondocs.toml";

/// Advisory lock file placed in the sandbox root.
pub const LOCK_FILE_NAME: &str = ".jsondocs.lock";

/// Store configuration loaded from `jsondocs.toml`.
///
/// # Example
///
/// ```toml
/// pretty = true
/// sync_writes = true
/// max_document_bytes = 16777216
/// max_nesting_depth = 100
/// exclusive_root = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Indent written documents by two spaces.
    #[serde(default = "default_true")]
    pub pretty: bool,
    /// fsync temporary files before renaming them over the target.
    #[serde(default = "default_true")]
    pub sync_writes: bool,
    /// Largest serialized document the store will write.
    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: usize,
    /// Deepest nesting the store will write.
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,
    /// Lock the root against other processes for the store's lifetime.
    #[serde(default = "default_true")]
    pub exclusive_root: bool,
}

fn default_true() -> bool {
    true
}

fn default_max_document_bytes() -> usize {
    MAX_DOCUMENT_SIZE
}

fn default_max_nesting_depth() -> usize {
    MAX_NESTING_DEPTH
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            sync_writes: true,
            max_document_bytes: MAX_DOCUMENT_SIZE,
            max_nesting_depth: MAX_NESTING_DEPTH,
            exclusive_root: true,
        }
    }
}

impl StoreConfig {
    /// Load `jsondocs.toml` from `root`, or defaults when it is absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
        let config: StoreConfig = toml::from_str(&content).map_err(|e| {
            Error::InvalidInput(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply the overrides carried by `options`.
    pub fn apply(&mut self, options: &OpenOptions) {
        if let Some(pretty) = options.pretty {
            self.pretty = pretty;
        }
        if let Some(sync) = options.sync_writes {
            self.sync_writes = sync;
        }
        if let Some(bytes) = options.max_document_bytes {
            self.max_document_bytes = bytes;
        }
        if let Some(depth) = options.max_nesting_depth {
            self.max_nesting_depth = depth;
        }
        if let Some(exclusive) = options.exclusive_root {
            self.exclusive_root = exclusive;
        }
    }

    /// Reject limits that would make every write fail.
    pub fn validate(&self) -> Result<()> {
        if self.max_document_bytes == 0 {
            return Err(Error::InvalidInput(
                "max_document_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# jsondocs store configuration
#
# Indent written documents by two spaces (default: true)
pretty = true

# fsync each temporary file before it is renamed over the document
# (default: true). Disable only for scratch data.
sync_writes = true

# Largest serialized document accepted on write, in bytes (default: 16 MiB)
max_document_bytes = 16777216

# Deepest object/array nesting accepted on write (default: 100)
max_nesting_depth = 100

# Hold an advisory lock on the root so a second process cannot serve it
# concurrently (default: true)
exclusive_root = true
"#
    }
}
