//! Tree command handlers.

use jsondocs_engine::Store;

use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle CopyItem command.
pub fn copy_item(store: &Store, source: String, target: String, recursive: bool) -> Result<Output> {
    let stats = convert_result(store.copy_item(&source, &target, recursive))?;
    Ok(Output::Copied(stats))
}

/// Handle DeleteItem command.
pub fn delete_item(store: &Store, path: String, is_directory: bool) -> Result<Output> {
    convert_result(store.delete_item(&path, is_directory))?;
    Ok(Output::Unit)
}

/// Handle CreateFolder command.
pub fn create_folder(store: &Store, path: String) -> Result<Output> {
    convert_result(store.create_folder(&path))?;
    Ok(Output::Unit)
}

/// Handle ListDirectory command.
pub fn list_directory(store: &Store, path: String) -> Result<Output> {
    let entries = convert_result(store.list_directory(&path))?;
    Ok(Output::Entries(entries))
}
