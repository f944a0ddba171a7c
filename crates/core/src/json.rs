//! JSON types for the document store
//!
//! This module defines the value model shared by every layer:
//! - JsonValue: Newtype wrapper around serde_json::Value
//! - KeyPath: Ordered sequence of object keys (e.g. `user.address.city`)
//! - navigate: Read-only descent through a document along a KeyPath
//! - merge_fields / edit_fields / increment_field: the partial mutations
//!
//! # Document Limits
//!
//! | Limit | Default | Constant |
//! |-------|---------|----------|
//! | Max document size | 16 MB | [`MAX_DOCUMENT_SIZE`] |
//! | Max nesting depth | 100 levels | [`MAX_NESTING_DEPTH`] |
//!
//! Both limits are checked before a document is written. The store may be
//! configured with tighter values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// Document Limits
// =============================================================================

/// Maximum document size in bytes (16 MB)
pub const MAX_DOCUMENT_SIZE: usize = 16 * 1024 * 1024;

/// Maximum nesting depth in a JSON document (100 levels)
///
/// Prevents stack overflow during recursive serialization.
pub const MAX_NESTING_DEPTH: usize = 100;

/// Error type for document limit violations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LimitError {
    /// Document exceeds maximum size
    #[error("document size {size} exceeds maximum of {max} bytes")]
    DocumentTooLarge {
        /// Actual document size
        size: usize,
        /// Maximum allowed size
        max: usize,
    },

    /// Document nesting exceeds maximum depth
    #[error("document nesting depth {depth} exceeds maximum of {max} levels")]
    NestingTooDeep {
        /// Actual nesting depth
        depth: usize,
        /// Maximum allowed depth
        max: usize,
    },
}

/// A keyed container: the object variant of a JSON value.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// JSON value wrapper
///
/// Newtype around serde_json::Value. The inner enum is the tagged variant
/// {null, bool, number, string, array, object}; every operation in this
/// module matches on it exhaustively.
///
/// # Examples
///
/// ```
/// use jsondocs_core::JsonValue;
///
/// let obj = JsonValue::object();
/// let n = JsonValue::from(42i64);
///
/// assert!(obj.is_object());
/// assert_eq!(n.as_i64(), Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct JsonValue(serde_json::Value);

impl JsonValue {
    /// Create a null JSON value
    pub fn null() -> Self {
        JsonValue(serde_json::Value::Null)
    }

    /// Create an empty JSON object
    pub fn object() -> Self {
        JsonValue(serde_json::Value::Object(JsonObject::new()))
    }

    /// Create an empty JSON array
    pub fn array() -> Self {
        JsonValue(serde_json::Value::Array(Vec::new()))
    }

    /// Get the underlying serde_json::Value
    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }

    /// Get a reference to the underlying serde_json::Value
    pub fn as_inner(&self) -> &serde_json::Value {
        &self.0
    }

    /// Get a mutable reference to the underlying serde_json::Value
    pub fn as_inner_mut(&mut self) -> &mut serde_json::Value {
        &mut self.0
    }

    /// Parse a document from raw file bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes).map(JsonValue)
    }

    /// Serialize to bytes, indented by two spaces when `pretty` is set
    pub fn to_vec(&self, pretty: bool) -> Result<Vec<u8>, serde_json::Error> {
        if pretty {
            serde_json::to_vec_pretty(&self.0)
        } else {
            serde_json::to_vec(&self.0)
        }
    }

    /// Serialize to compact JSON string
    pub fn to_json_string(&self) -> String {
        self.0.to_string()
    }

    /// Name of the variant, for error messages
    pub fn type_name(&self) -> &'static str {
        type_name(&self.0)
    }

    /// Calculate the maximum nesting depth of this JSON value
    ///
    /// Returns 0 for scalars and counts nested objects/arrays.
    pub fn nesting_depth(&self) -> usize {
        fn depth_of(value: &serde_json::Value) -> usize {
            match value {
                serde_json::Value::Null
                | serde_json::Value::Bool(_)
                | serde_json::Value::Number(_)
                | serde_json::Value::String(_) => 0,
                serde_json::Value::Array(arr) => 1 + arr.iter().map(depth_of).max().unwrap_or(0),
                serde_json::Value::Object(obj) => 1 + obj.values().map(depth_of).max().unwrap_or(0),
            }
        }
        depth_of(&self.0)
    }

    /// Validate nesting depth against `max`
    pub fn validate_depth(&self, max: usize) -> Result<(), LimitError> {
        let depth = self.nesting_depth();
        if depth > max {
            Err(LimitError::NestingTooDeep { depth, max })
        } else {
            Ok(())
        }
    }
}

/// Validate a serialized document length against `max`
pub fn validate_size(size: usize, max: usize) -> Result<(), LimitError> {
    if size > max {
        Err(LimitError::DocumentTooLarge { size, max })
    } else {
        Ok(())
    }
}

fn type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl FromStr for JsonValue {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map(JsonValue)
    }
}

// Deref to access serde_json::Value methods directly
impl Deref for JsonValue {
    type Target = serde_json::Value;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for JsonValue {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for JsonValue {
    fn default() -> Self {
        Self::null()
    }
}

impl From<serde_json::Value> for JsonValue {
    fn from(v: serde_json::Value) -> Self {
        JsonValue(v)
    }
}

impl From<JsonValue> for serde_json::Value {
    fn from(v: JsonValue) -> Self {
        v.0
    }
}

impl From<JsonObject> for JsonValue {
    fn from(v: JsonObject) -> Self {
        JsonValue(serde_json::Value::Object(v))
    }
}

impl From<bool> for JsonValue {
    fn from(v: bool) -> Self {
        JsonValue(serde_json::Value::Bool(v))
    }
}

impl From<i64> for JsonValue {
    fn from(v: i64) -> Self {
        JsonValue(serde_json::Value::Number(v.into()))
    }
}

impl From<u64> for JsonValue {
    fn from(v: u64) -> Self {
        JsonValue(serde_json::Value::Number(v.into()))
    }
}

impl From<f64> for JsonValue {
    fn from(v: f64) -> Self {
        JsonValue(
            serde_json::Number::from_f64(v)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
        )
    }
}

impl From<&str> for JsonValue {
    fn from(v: &str) -> Self {
        JsonValue(serde_json::Value::String(v.to_string()))
    }
}

impl From<String> for JsonValue {
    fn from(v: String) -> Self {
        JsonValue(serde_json::Value::String(v))
    }
}

// =============================================================================
// KeyPath
// =============================================================================

/// A path into a JSON document made of object keys
///
/// Unlike a general JSON path there are no index segments: every segment
/// names an object field. A segment that happens to look like a number is
/// still matched as a field name.
///
/// The string form joins segments with `.`; the empty string is the root.
///
/// ```
/// use jsondocs_core::KeyPath;
///
/// let path: KeyPath = "user.address.city".parse().unwrap();
/// assert_eq!(path.len(), 3);
/// assert_eq!(path, KeyPath::root().key("user").key("address").key("city"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// The empty path, addressing the whole document
    pub fn root() -> Self {
        KeyPath {
            segments: Vec::new(),
        }
    }

    /// Create a path from owned segments
    pub fn from_segments(segments: Vec<String>) -> Self {
        KeyPath { segments }
    }

    /// Append a key segment (builder pattern)
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(key.into());
        self
    }

    /// Get the path segments
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if this is the root path
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Check if this is the root path
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for KeyPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        KeyPath {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Error type for KeyPath parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyPathParseError {
    /// Two separators in a row, or a leading/trailing separator
    #[error("empty key in path at segment {0}")]
    EmptyKey(usize),
}

impl FromStr for KeyPath {
    type Err = KeyPathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(KeyPath::root());
        }
        let mut segments = Vec::new();
        for (i, part) in s.split('.').enumerate() {
            if part.is_empty() {
                return Err(KeyPathParseError::EmptyKey(i));
            }
            segments.push(part.to_string());
        }
        Ok(KeyPath { segments })
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

// =============================================================================
// Navigation
// =============================================================================

/// Navigation failure: the segment at `depth` could not be followed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("key '{segment}' not found at depth {depth}")]
pub struct KeyNotFound {
    /// The failing segment
    pub segment: String,
    /// Zero-based index of the failing segment
    pub depth: usize,
}

/// Walk `document` along `path`
///
/// Each segment must name an existing field of an object. Arrays and scalars
/// are not keyed containers, so reaching one before the path is exhausted
/// fails on the next segment. The root path returns the whole document.
///
/// ```
/// use jsondocs_core::{navigate, JsonValue, KeyPath};
///
/// let doc: JsonValue = serde_json::json!({"a": {"b": [1, 2], "c": 7}}).into();
/// let c = navigate(&doc, &"a.c".parse().unwrap()).unwrap();
/// assert_eq!(c.as_i64(), Some(7));
///
/// let err = navigate(&doc, &"a.z".parse().unwrap()).unwrap_err();
/// assert_eq!(err.segment, "z");
/// ```
pub fn navigate<'a>(document: &'a JsonValue, path: &KeyPath) -> Result<&'a JsonValue, KeyNotFound> {
    let mut current: &serde_json::Value = document.as_inner();

    for (depth, segment) in path.segments().iter().enumerate() {
        let next = match current {
            serde_json::Value::Object(obj) => obj.get(segment),
            serde_json::Value::Null
            | serde_json::Value::Bool(_)
            | serde_json::Value::Number(_)
            | serde_json::Value::String(_)
            | serde_json::Value::Array(_) => None,
        };
        current = next.ok_or_else(|| KeyNotFound {
            segment: segment.clone(),
            depth,
        })?;
    }

    // SAFETY: JsonValue is #[repr(transparent)] over serde_json::Value, so the
    // layouts are identical, and the returned lifetime is tied to `document`.
    Ok(unsafe { &*(current as *const serde_json::Value as *const JsonValue) })
}

// =============================================================================
// Document Mutation
// =============================================================================

/// Error type for in-memory document mutations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MutationError {
    /// The document root is not an object
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Expected type
        expected: &'static str,
        /// Actual type found
        found: &'static str,
    },

    /// Incrementing the field would leave the representable range
    #[error("increment of '{field}' overflows")]
    Overflow {
        /// The field being incremented
        field: String,
    },
}

fn as_object_mut(document: &mut JsonValue) -> Result<&mut JsonObject, MutationError> {
    match document.as_inner_mut() {
        serde_json::Value::Object(obj) => Ok(obj),
        other => Err(MutationError::TypeMismatch {
            expected: "object",
            found: type_name(other),
        }),
    }
}

/// Shallow merge: every field of `patch` overwrites or is added to `document`
///
/// ```
/// use jsondocs_core::{merge_fields, JsonValue};
///
/// let mut doc: JsonValue = serde_json::json!({"a": 1, "b": 2}).into();
/// let patch = serde_json::json!({"b": 3, "c": 4});
/// merge_fields(&mut doc, patch.as_object().unwrap()).unwrap();
/// assert_eq!(doc.as_inner(), &serde_json::json!({"a": 1, "b": 3, "c": 4}));
/// ```
pub fn merge_fields(document: &mut JsonValue, patch: &JsonObject) -> Result<(), MutationError> {
    let target = as_object_mut(document)?;
    for (key, value) in patch {
        target.insert(key.clone(), value.clone());
    }
    Ok(())
}

/// Restricted merge: only fields already present in `document` are overwritten
///
/// Fields that exist only in `patch` are dropped. Returns the names of the
/// fields that were dropped.
///
/// ```
/// use jsondocs_core::{edit_fields, JsonValue};
///
/// let mut doc: JsonValue = serde_json::json!({"a": 1, "b": 2}).into();
/// let patch = serde_json::json!({"b": 3, "c": 4});
/// let dropped = edit_fields(&mut doc, patch.as_object().unwrap()).unwrap();
/// assert_eq!(doc.as_inner(), &serde_json::json!({"a": 1, "b": 3}));
/// assert_eq!(dropped, vec!["c".to_string()]);
/// ```
pub fn edit_fields(
    document: &mut JsonValue,
    patch: &JsonObject,
) -> Result<Vec<String>, MutationError> {
    let target = as_object_mut(document)?;
    let mut dropped = Vec::new();
    for (key, value) in patch {
        match target.get_mut(key) {
            Some(slot) => *slot = value.clone(),
            None => dropped.push(key.clone()),
        }
    }
    Ok(dropped)
}

/// Outcome of [`increment_field`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IncrementOutcome {
    /// The field was numeric and now holds `new_value`
    Incremented {
        /// The incremented field
        field: String,
        /// Value after the increment
        new_value: JsonValue,
    },
    /// The field is missing or not a number; the document is unchanged
    NoOp {
        /// The requested field
        field: String,
    },
}

impl IncrementOutcome {
    /// Whether the document was changed
    pub fn is_noop(&self) -> bool {
        matches!(self, IncrementOutcome::NoOp { .. })
    }
}

/// Add exactly one to the numeric field `field` of `document`
///
/// Integers stay integers: signed values that would pass `i64::MAX` continue
/// as unsigned, and `u64::MAX` is an overflow. Floats add `1.0`, and a float
/// too large for `+ 1.0` to change it is an overflow. A missing
/// field, a non-numeric field, or a non-object document is a no-op.
pub fn increment_field(
    document: &mut JsonValue,
    field: &str,
) -> Result<IncrementOutcome, MutationError> {
    let noop = || IncrementOutcome::NoOp {
        field: field.to_string(),
    };

    let slot = match document.as_inner_mut() {
        serde_json::Value::Object(obj) => match obj.get_mut(field) {
            Some(slot) => slot,
            None => return Ok(noop()),
        },
        _ => return Ok(noop()),
    };

    let next = match slot {
        serde_json::Value::Number(n) => increment_number(n).ok_or_else(|| MutationError::Overflow {
            field: field.to_string(),
        })?,
        serde_json::Value::Null
        | serde_json::Value::Bool(_)
        | serde_json::Value::String(_)
        | serde_json::Value::Array(_)
        | serde_json::Value::Object(_) => return Ok(noop()),
    };

    *slot = serde_json::Value::Number(next.clone());
    Ok(IncrementOutcome::Incremented {
        field: field.to_string(),
        new_value: JsonValue(serde_json::Value::Number(next)),
    })
}

fn increment_number(n: &serde_json::Number) -> Option<serde_json::Number> {
    if n.is_f64() {
        // Past 2^53 adding one is lost to rounding; that is an overflow, not a write.
        return n
            .as_f64()
            .filter(|f| *f + 1.0 != *f)
            .and_then(|f| serde_json::Number::from_f64(f + 1.0));
    }
    n.as_i64()
        .and_then(|i| i.checked_add(1))
        .map(serde_json::Number::from)
        .or_else(|| {
            n.as_u64()
                .and_then(|u| u.checked_add(1))
                .map(serde_json::Number::from)
        })
}
