//! String → JSON value parsing rules.
//!
//! User input is parsed with auto-detect logic:
//! 1. Valid JSON (objects, arrays, strings, numbers, literals) → that value
//! 2. Everything else → a JSON string

use jsondocs_executor::JsonValue;

/// Auto-detect a JSON value from a user-supplied string.
pub fn parse_value(s: &str) -> JsonValue {
    s.parse::<JsonValue>()
        .unwrap_or_else(|_| JsonValue::from(s))
}

/// Parse a patch argument, which must be a JSON object.
pub fn parse_patch(s: &str) -> Result<JsonValue, String> {
    let value = s
        .parse::<JsonValue>()
        .map_err(|e| format!("patch is not valid JSON: {}", e))?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(format!("patch must be a JSON object, got {}", value.type_name()))
    }
}
