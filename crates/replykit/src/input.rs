//! Assembling a [`Values`] context from command-line input.
//!
//! Sources are applied in a fixed order, later ones overriding earlier
//! ones: values file, `--set`, `--on`, `--item`.
//!
//! ```rust
//! use replykit::input::ValuesBuilder;
//!
//! let values = ValuesBuilder::new()
//!     .set("req_number", "1842")
//!     .on("need_note")
//!     .item("items", "first")
//!     .item("items", "  ")
//!     .build();
//!
//! assert_eq!(values["req_number"], "1842");
//! assert_eq!(values["need_note"], true);
//! assert_eq!(values["items"], serde_json::json!([{"value": "first"}]));
//! ```

use std::path::Path;

use replykit_render::{values_from_json, values_from_yaml, Values};
use serde_json::{Map, Value};

use crate::error::InputError;

/// Builder for the values passed to a render.
#[derive(Debug, Clone, Default)]
pub struct ValuesBuilder {
    values: Values,
}

impl ValuesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges the mapping in a JSON or YAML (`.yaml`/`.yml`) file.
    pub fn file(mut self, path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => values_from_yaml(&text),
            _ => values_from_json(&text),
        }
        .map_err(|source| InputError::Values {
            path: path.to_path_buf(),
            source,
        })?;

        self.values.extend(parsed);
        Ok(self)
    }

    /// Sets a text field.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), Value::String(value.into()));
        self
    }

    /// Switches a toggle on.
    pub fn on(mut self, name: impl Into<String>) -> Self {
        self.values.insert(name.into(), Value::Bool(true));
        self
    }

    /// Appends `{"value": value}` to the list `name`.
    ///
    /// The value is trimmed and blank values are ignored. A non-list value
    /// already stored under `name` is replaced by the list.
    pub fn item(mut self, name: impl Into<String>, value: impl AsRef<str>) -> Self {
        let value = value.as_ref().trim();
        if value.is_empty() {
            return self;
        }

        let mut element = Map::new();
        element.insert("value".to_string(), Value::String(value.to_string()));

        let slot = self
            .values
            .entry(name.into())
            .or_insert_with(|| Value::Array(Vec::new()));
        if !slot.is_array() {
            *slot = Value::Array(Vec::new());
        }
        if let Value::Array(items) = slot {
            items.push(Value::Object(element));
        }
        self
    }

    pub fn build(self) -> Values {
        self.values
    }
}

/// Splits a `NAME=VALUE` argument at the first `=`.
///
/// The value may be empty or contain further `=` signs; the name may not
/// be empty.
pub fn parse_assignment(arg: &str) -> Result<(String, String), InputError> {
    match arg.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(InputError::Assignment(arg.to_string())),
    }
}
