//! The value context consulted by lookup-based blocks.
//!
//! [`Values`] is a plain JSON object: field names map to strings, booleans,
//! lists of strings or lists of objects, exactly as a form submission
//! delivers them. The renderer only reads it.
//!
//! # Presence
//!
//! `ConditionalInput` and `Toggle` share one rule, [`is_present`]:
//!
//! | Value | Present? |
//! |-------|----------|
//! | missing, `null` | no |
//! | `""` | no |
//! | `[]` | no |
//! | `false` | no |
//! | anything else (`"0"`, `0`, `{}`, `true`, ...) | yes |
//!
//! Flag maps and `InputField` scalars use the stricter [`is_truthy`],
//! under which `0` and `{}` are false as well.

use serde_json::{Map, Value};

use crate::error::{RenderError, Result};

/// Caller-supplied mapping from field name to value.
pub type Values = Map<String, Value>;

/// Parses a values document from JSON.
///
/// The top level must be an object; anything else is rejected with
/// [`RenderError::InvalidValues`].
///
/// # Example
///
/// ```rust
/// use replykit_render::values_from_json;
///
/// let values = values_from_json(r#"{"name": "Anna", "urgent": true}"#).unwrap();
/// assert_eq!(values["name"], "Anna");
///
/// assert!(values_from_json("[1, 2]").is_err());
/// ```
pub fn values_from_json(text: &str) -> Result<Values> {
    into_values(serde_json::from_str(text)?)
}

/// Parses a values document from YAML. Same shape rules as [`values_from_json`].
pub fn values_from_yaml(text: &str) -> Result<Values> {
    if text.trim().is_empty() {
        return Ok(Values::new());
    }
    into_values(serde_yaml::from_str(text)?)
}

/// Checks that a parsed document is a mapping and unwraps it.
pub fn into_values(value: Value) -> Result<Values> {
    match value {
        Value::Object(map) => Ok(map),
        // `~` or `null` as a whole document means no values.
        Value::Null => Ok(Values::new()),
        other => Err(RenderError::InvalidValues {
            found: kind_name(&other),
        }),
    }
}

/// The presence rule shared by `ConditionalInput` and `Toggle`.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

/// Truthiness of a single value: `null`, `false`, zero and empty
/// strings, lists and objects are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Converts a value to the text a block emits for it.
///
/// Lists and objects become compact JSON with non-ASCII characters kept
/// as they are.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Key used to look a value up in a `Choice` mapping.
///
/// Only scalars can select a choice; `null`, lists and objects never match.
pub fn lookup_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(_) | Value::Number(_) => Some(stringify(value)),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
