//! Error types for the document store
//!
//! Every failure the store can report is a variant of [`Error`].
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Increment on a missing or non-numeric field is NOT an error; it is the
//! [`IncrementOutcome::NoOp`](crate::IncrementOutcome::NoOp) result.

use crate::json::{KeyNotFound, LimitError, MutationError};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the document store
#[derive(Debug, Error)]
pub enum Error {
    /// Logical path escapes the sandbox root after normalization
    #[error("path escapes sandbox root: {path}")]
    Traversal {
        /// The logical path as supplied by the caller
        path: String,
    },

    /// Logical path names a file the store keeps for itself
    #[error("reserved path: {path}")]
    ReservedPath {
        /// The logical path as supplied by the caller
        path: String,
    },

    /// Missing file or directory
    #[error("not found: {}", path.display())]
    NotFound {
        /// Resolved path
        path: PathBuf,
    },

    /// File content is not valid JSON
    #[error("parse error in {}: {source}", path.display())]
    Parse {
        /// Resolved path
        path: PathBuf,
        /// Underlying parser error
        #[source]
        source: serde_json::Error,
    },

    /// Nested navigation miss
    #[error("key not found: {0}")]
    KeyNotFound(#[from] KeyNotFound),

    /// Directory delete refused because the directory has entries
    #[error("directory not empty: {}", path.display())]
    NotEmpty {
        /// Resolved path
        path: PathBuf,
    },

    /// I/O failure on write, rename, mkdir, copy or remove
    #[error("write failed for {}: {source}", path.display())]
    Write {
        /// Resolved path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// I/O failure while reading (other than a missing file)
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Resolved path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Mutation applied to a value of the wrong shape
    #[error("wrong type: expected {expected}, found {found}")]
    WrongType {
        /// Expected type
        expected: &'static str,
        /// Actual type found
        found: &'static str,
    },

    /// Numeric increment left the representable range
    #[error("overflow incrementing field '{field}'")]
    Overflow {
        /// The field being incremented
        field: String,
    },

    /// Document exceeds a configured limit
    #[error("limit exceeded: {0}")]
    LimitExceeded(#[from] LimitError),

    /// Invalid operation or argument
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Write attempted on a read-only store
    #[error("store is read-only")]
    ReadOnly,

    /// Another process holds the sandbox root
    #[error("sandbox root {} is already in use by another process", path.display())]
    RootInUse {
        /// Canonical root directory
        path: PathBuf,
    },
}

impl Error {
    /// Classify an I/O error raised while reading `path`
    ///
    /// `ErrorKind::NotFound` becomes [`Error::NotFound`]; everything else is
    /// [`Error::Io`].
    pub fn read(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Error::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Wrap an I/O error raised while writing `path`
    pub fn write(path: &Path, source: io::Error) -> Self {
        Error::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether this error means the target does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

impl From<MutationError> for Error {
    fn from(e: MutationError) -> Self {
        match e {
            MutationError::TypeMismatch { expected, found } => Error::WrongType { expected, found },
            MutationError::Overflow { field } => Error::Overflow { field },
        }
    }
}
