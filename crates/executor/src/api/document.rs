//! Document operations.

use jsondocs_core::{IncrementOutcome, JsonValue, KeyPath};

use super::JsonDocs;
use crate::{Command, Error, Output, Result};

impl JsonDocs {
    /// Read a whole document.
    pub fn get_document(&self, path: &str) -> Result<JsonValue> {
        self.run(
            Command::GetDocument {
                path: path.to_string(),
            },
            |output| match output {
                Output::Document(doc) => Some(doc),
                _ => None,
            },
        )
    }

    /// Read a nested value by dot-separated key path.
    ///
    /// `""` returns the whole document; `"a.b"` follows field `a`, then `b`.
    ///
    /// # Example
    ///
    /// ```text
    /// docs.init_document("cfg.json", json!({"db": {"port": 5432}}))?;
    /// assert_eq!(docs.get_nested_value("cfg.json", "db.port")?, json!(5432).into());
    /// ```
    pub fn get_nested_value(&self, path: &str, keys: &str) -> Result<JsonValue> {
        let keys: KeyPath = keys.parse().map_err(|e| Error::InvalidInput {
            reason: format!("invalid key path '{}': {}", keys, e),
        })?;
        self.run(
            Command::GetNestedValue {
                path: path.to_string(),
                keys: keys.segments().to_vec(),
            },
            |output| match output {
                Output::Value(v) => Some(v),
                _ => None,
            },
        )
    }

    /// Create or overwrite a document.
    pub fn init_document(&self, path: &str, value: impl Into<JsonValue>) -> Result<()> {
        self.run(
            Command::InitDocument {
                path: path.to_string(),
                value: value.into(),
            },
            |output| matches!(output, Output::Unit).then_some(()),
        )
    }

    /// Shallow-merge `patch` into a document, returning the updated document.
    pub fn merge_update(&self, path: &str, patch: impl Into<JsonValue>) -> Result<JsonValue> {
        self.run(
            Command::MergeUpdate {
                path: path.to_string(),
                patch: patch.into(),
            },
            |output| match output {
                Output::Document(doc) => Some(doc),
                _ => None,
            },
        )
    }

    /// Overwrite only fields that already exist, returning the updated document.
    pub fn restricted_edit(&self, path: &str, patch: impl Into<JsonValue>) -> Result<JsonValue> {
        self.run(
            Command::RestrictedEdit {
                path: path.to_string(),
                patch: patch.into(),
            },
            |output| match output {
                Output::Document(doc) => Some(doc),
                _ => None,
            },
        )
    }

    /// Add one to a numeric field.
    pub fn increment(&self, path: &str, field: &str) -> Result<IncrementOutcome> {
        self.run(
            Command::Increment {
                path: path.to_string(),
                field: field.to_string(),
            },
            |output| match output {
                Output::Incremented { field, new_value } => {
                    Some(IncrementOutcome::Incremented { field, new_value })
                }
                Output::NoOp { field } => Some(IncrementOutcome::NoOp { field }),
                _ => None,
            },
        )
    }
}
