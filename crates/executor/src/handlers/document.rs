//! Document command handlers.

use jsondocs_core::{IncrementOutcome, JsonObject, JsonValue, KeyPath};
use jsondocs_engine::Store;

use crate::convert::convert_result;
use crate::{Error, Output, Result};

/// Handle GetDocument command.
pub fn get_document(store: &Store, path: String) -> Result<Output> {
    let document = convert_result(store.get_document(&path))?;
    Ok(Output::Document(document))
}

/// Handle GetNestedValue command.
pub fn get_nested_value(store: &Store, path: String, keys: Vec<String>) -> Result<Output> {
    let keys = KeyPath::from_segments(keys);
    let value = convert_result(store.get_nested_value(&path, &keys))?;
    Ok(Output::Value(value))
}

/// Handle InitDocument command.
pub fn init_document(store: &Store, path: String, value: JsonValue) -> Result<Output> {
    convert_result(store.init_document(&path, &value))?;
    Ok(Output::Unit)
}

/// Handle MergeUpdate command.
pub fn merge_update(store: &Store, path: String, patch: JsonValue) -> Result<Output> {
    let patch = require_object(patch)?;
    let document = convert_result(store.merge_update(&path, &patch))?;
    Ok(Output::Document(document))
}

/// Handle RestrictedEdit command.
pub fn restricted_edit(store: &Store, path: String, patch: JsonValue) -> Result<Output> {
    let patch = require_object(patch)?;
    let document = convert_result(store.restricted_edit(&path, &patch))?;
    Ok(Output::Document(document))
}

/// Handle Increment command.
pub fn increment(store: &Store, path: String, field: String) -> Result<Output> {
    let outcome = convert_result(store.increment(&path, &field))?;
    Ok(match outcome {
        IncrementOutcome::Incremented { field, new_value } => {
            Output::Incremented { field, new_value }
        }
        IncrementOutcome::NoOp { field } => Output::NoOp { field },
    })
}

/// Patches are field maps; anything else is a type error.
fn require_object(patch: JsonValue) -> Result<JsonObject> {
    let actual = patch.type_name();
    match patch.into_inner() {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(Error::WrongType {
            expected: "object".to_string(),
            actual: actual.to_string(),
        }),
    }
}
