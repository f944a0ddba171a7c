//! Output → human/json/raw string formatting.
//!
//! Three modes:
//! - **Human** (default): pretty JSON for documents, short tagged lines otherwise
//! - **JSON** (`--json`): `serde_json::to_string_pretty` of the whole output
//! - **Raw** (`--raw`): compact JSON or bare names, no prefixes

use jsondocs_executor::{DirectoryEntry, EntryKind, Error, JsonValue, Output};

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Raw,
}

/// Format a successful output.
pub fn format_output(output: &Output, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => format_json(output),
        OutputMode::Raw => format_raw(output),
        OutputMode::Human => format_human(output),
    }
}

/// Format an error.
pub fn format_error(err: &Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(&serde_json::json!({
            "error": format!("{}", err),
            "detail": err,
        }))
        .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", err)),
        OutputMode::Raw => format!("{}", err),
        OutputMode::Human => format!("(error) {}", err),
    }
}

fn format_json(output: &Output) -> String {
    serde_json::to_string_pretty(output).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

fn format_human(output: &Output) -> String {
    match output {
        Output::Unit => "OK".to_string(),
        Output::Document(doc) | Output::Value(doc) => pretty(doc),
        Output::Incremented { field, new_value } => format!("(integer) {} = {}", field, new_value),
        Output::NoOp { field } => format!("(noop) field '{}' is missing or not a number", field),
        Output::Copied(stats) => format!(
            "(copied) {} file(s), {} directorie(s)",
            stats.files, stats.directories
        ),
        Output::Entries(entries) if entries.is_empty() => "(empty)".to_string(),
        Output::Entries(entries) => entries
            .iter()
            .enumerate()
            .map(|(i, e)| format!("{}) {}", i + 1, entry_name(e)))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn format_raw(output: &Output) -> String {
    match output {
        Output::Unit | Output::NoOp { .. } => String::new(),
        Output::Document(doc) | Output::Value(doc) => doc.to_json_string(),
        Output::Incremented { new_value, .. } => new_value.to_json_string(),
        Output::Copied(stats) => format!("{} {}", stats.files, stats.directories),
        Output::Entries(entries) => entries
            .iter()
            .map(entry_name)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn pretty(value: &JsonValue) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_json_string())
}

/// Directories get a trailing `/`.
fn entry_name(entry: &DirectoryEntry) -> String {
    match entry.kind {
        EntryKind::Directory => format!("{}/", entry.name),
        EntryKind::File => entry.name.clone(),
    }
}
