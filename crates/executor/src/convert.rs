//! Error conversion from the store's error type.

use crate::Error;
use jsondocs_core::Error as StoreError;

/// Convert a store error to an executor Error.
///
/// Paths are rendered with `Path::display`; sources are rendered to their
/// messages so the result stays serializable.
impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Traversal { path } => Error::Traversal { path },
            StoreError::ReservedPath { path } => Error::ReservedPath { path },
            StoreError::NotFound { path } => Error::NotFound {
                path: path.display().to_string(),
            },
            StoreError::Parse { path, source } => Error::Parse {
                path: path.display().to_string(),
                reason: source.to_string(),
            },
            StoreError::KeyNotFound(e) => Error::KeyNotFound {
                segment: e.segment,
                depth: e.depth,
            },
            StoreError::NotEmpty { path } => Error::NotEmpty {
                path: path.display().to_string(),
            },
            StoreError::Write { path, source } => Error::Write {
                path: path.display().to_string(),
                reason: source.to_string(),
            },
            StoreError::Io { path, source } => Error::Io {
                path: path.display().to_string(),
                reason: source.to_string(),
            },
            StoreError::WrongType { expected, found } => Error::WrongType {
                expected: expected.to_string(),
                actual: found.to_string(),
            },
            StoreError::Overflow { field } => Error::Overflow { field },
            StoreError::LimitExceeded(e) => Error::LimitExceeded {
                reason: e.to_string(),
            },
            StoreError::InvalidInput(reason) => Error::InvalidInput { reason },
            StoreError::ReadOnly => Error::AccessDenied {
                command: "write".to_string(),
            },
            StoreError::RootInUse { path } => Error::RootInUse {
                path: path.display().to_string(),
            },
        }
    }
}

/// Convert a store result into an executor result.
pub(crate) fn convert_result<T>(r: jsondocs_core::Result<T>) -> crate::Result<T> {
    r.map_err(Error::from)
}
