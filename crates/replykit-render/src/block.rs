//! The block tree: one node per piece of reply content.
//!
//! A [`Block`] pairs the attributes every block shares (label, description,
//! [`Flags`]) with a [`BlockKind`] that says what the block renders.
//! `Toggle` and `Repeater` own their children, so a template is a strict
//! tree.
//!
//! # Wire format
//!
//! Blocks are stored the way the template editor writes them: a `type` tag
//! with the variant fields alongside the shared ones.
//!
//! ```json
//! {
//!   "type": "ConditionalInput",
//!   "label": "Заявка",
//!   "desc": "Показывается, только если поле заполнено",
//!   "name": "req_number",
//!   "prefix": "По заявке: ",
//!   "flags": {"newlineAfter": true}
//! }
//! ```
//!
//! Missing variant fields fall back to the editor defaults (see the field
//! docs). A `type` the engine does not know, or no `type` at all, becomes
//! [`BlockKind::Unknown`] instead of failing the whole template.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::flags::{Flag, Flags};

/// Default strftime pattern of a `DateTime` block.
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Default fill character of a `Separator` block.
pub const DEFAULT_SEPARATOR_CHAR: &str = "—";

/// Default repeat count of a `Separator` block.
pub const DEFAULT_SEPARATOR_REPEAT: i64 = 20;

/// One node of a template's content tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBlock")]
pub struct Block {
    /// Display name in the editor. Never rendered.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,

    /// Hint text in the editor. Never rendered.
    #[serde(rename = "desc", default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Formatting applied around the rendered text.
    #[serde(default, skip_serializing_if = "Flags::is_empty")]
    pub flags: Flags,

    /// What the block renders.
    #[serde(flatten)]
    pub kind: BlockKind,
}

/// The variant-specific part of a [`Block`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BlockKind {
    /// Fixed text, emitted verbatim.
    StaticText {
        #[serde(default)]
        text: String,
    },

    /// The value of field `name`.
    InputField {
        #[serde(default)]
        name: String,
        /// Editor hint for a multi-line input control.
        #[serde(default, skip_serializing_if = "is_false")]
        multiline: bool,
    },

    /// `prefix` followed by the value of `name`, or nothing when the value
    /// is absent.
    ConditionalInput {
        #[serde(default)]
        name: String,
        #[serde(default)]
        prefix: String,
        #[serde(default, skip_serializing_if = "is_false")]
        multiline: bool,
    },

    /// A time-of-day greeting.
    Greeting,

    /// The current date and time.
    DateTime {
        /// strftime-style pattern, `%Y-%m-%d %H:%M` when missing.
        #[serde(default = "default_datetime_format")]
        format: String,
    },

    /// `character` repeated `repeat` times.
    Separator {
        /// `—` when missing.
        #[serde(rename = "char", default = "default_separator_char")]
        character: String,
        /// 20 when missing. Negative counts render as zero.
        #[serde(default = "default_separator_repeat")]
        repeat: i64,
    },

    /// The display string that the value of `name` selects in `choices`.
    Choice {
        #[serde(default)]
        name: String,
        #[serde(default)]
        choices: BTreeMap<String, String>,
    },

    /// `children`, rendered only while the value of `name` is present.
    Toggle {
        #[serde(default)]
        name: String,
        #[serde(default)]
        children: Vec<Block>,
    },

    /// `children`, rendered once per element of the list `name`.
    Repeater {
        #[serde(default)]
        name: String,
        #[serde(default)]
        children: Vec<Block>,
    },

    /// A Markdown table over the list of objects `name`.
    Table {
        #[serde(default)]
        name: String,
        #[serde(default)]
        headers: Vec<String>,
    },

    /// A block type this engine does not know. Renders as empty text.
    #[serde(other)]
    Unknown,
}

impl BlockKind {
    /// The `type` tag, as stored.
    pub fn type_name(&self) -> &'static str {
        match self {
            BlockKind::StaticText { .. } => "StaticText",
            BlockKind::InputField { .. } => "InputField",
            BlockKind::ConditionalInput { .. } => "ConditionalInput",
            BlockKind::Greeting => "Greeting",
            BlockKind::DateTime { .. } => "DateTime",
            BlockKind::Separator { .. } => "Separator",
            BlockKind::Choice { .. } => "Choice",
            BlockKind::Toggle { .. } => "Toggle",
            BlockKind::Repeater { .. } => "Repeater",
            BlockKind::Table { .. } => "Table",
            BlockKind::Unknown => "Unknown",
        }
    }

    /// Child blocks of composite variants; empty for everything else.
    pub fn children(&self) -> &[Block] {
        match self {
            BlockKind::Toggle { children, .. } | BlockKind::Repeater { children, .. } => {
                children.as_slice()
            }
            _ => &[],
        }
    }
}

impl Block {
    /// Creates a block with no label, description or flags.
    pub fn new(kind: BlockKind) -> Self {
        Self {
            label: String::new(),
            description: String::new(),
            flags: Flags::new(),
            kind,
        }
    }

    pub fn static_text(text: impl Into<String>) -> Self {
        Self::new(BlockKind::StaticText { text: text.into() })
    }

    pub fn input(name: impl Into<String>) -> Self {
        Self::new(BlockKind::InputField {
            name: name.into(),
            multiline: false,
        })
    }

    pub fn conditional(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self::new(BlockKind::ConditionalInput {
            name: name.into(),
            prefix: prefix.into(),
            multiline: false,
        })
    }

    pub fn greeting() -> Self {
        Self::new(BlockKind::Greeting)
    }

    pub fn date_time(format: impl Into<String>) -> Self {
        Self::new(BlockKind::DateTime {
            format: format.into(),
        })
    }

    pub fn separator(character: impl Into<String>, repeat: i64) -> Self {
        Self::new(BlockKind::Separator {
            character: character.into(),
            repeat,
        })
    }

    pub fn choice<K, V>(name: impl Into<String>, choices: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(BlockKind::Choice {
            name: name.into(),
            choices: choices
                .into_iter()
                .map(|(key, label)| (key.into(), label.into()))
                .collect(),
        })
    }

    pub fn toggle(name: impl Into<String>, children: Vec<Block>) -> Self {
        Self::new(BlockKind::Toggle {
            name: name.into(),
            children,
        })
    }

    pub fn repeater(name: impl Into<String>, children: Vec<Block>) -> Self {
        Self::new(BlockKind::Repeater {
            name: name.into(),
            children,
        })
    }

    pub fn table<H: Into<String>>(name: impl Into<String>, headers: impl IntoIterator<Item = H>) -> Self {
        Self::new(BlockKind::Table {
            name: name.into(),
            headers: headers.into_iter().map(Into::into).collect(),
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_flag(mut self, flag: Flag) -> Self {
        self.flags.insert(flag);
        self
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn default_datetime_format() -> String {
    DEFAULT_DATETIME_FORMAT.to_string()
}

fn default_separator_char() -> String {
    DEFAULT_SEPARATOR_CHAR.to_string()
}

fn default_separator_repeat() -> i64 {
    DEFAULT_SEPARATOR_REPEAT
}

/// Shared fields plus everything else, before the variant is resolved.
#[derive(Deserialize)]
struct RawBlock {
    #[serde(default)]
    label: Option<String>,
    #[serde(default, alias = "description")]
    desc: Option<String>,
    #[serde(default)]
    flags: Flags,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl TryFrom<RawBlock> for Block {
    type Error = serde_json::Error;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        // Without a string tag there is nothing to dispatch on.
        let kind = match raw.rest.get("type") {
            Some(Value::String(_)) => serde_json::from_value(Value::Object(raw.rest))?,
            _ => BlockKind::Unknown,
        };
        Ok(Block {
            label: raw.label.unwrap_or_default(),
            description: raw.desc.unwrap_or_default(),
            flags: raw.flags,
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Block {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_editor_block() {
        let block = parse(json!({
            "type": "ConditionalInput",
            "label": "Заявка",
            "desc": "Показывается, только если поле заполнено",
            "name": "req_number",
            "prefix": "По заявке: ",
            "flags": {"newlineAfter": true}
        }));

        assert_eq!(block.label, "Заявка");
        assert_eq!(block.description, "Показывается, только если поле заполнено");
        assert!(block.flags.contains(Flag::NewlineAfter));
        assert_eq!(
            block.kind,
            BlockKind::ConditionalInput {
                name: "req_number".into(),
                prefix: "По заявке: ".into(),
                multiline: false,
            }
        );
    }

    #[test]
    fn test_missing_fields_use_editor_defaults() {
        assert_eq!(
            parse(json!({"type": "Separator"})).kind,
            BlockKind::Separator {
                character: "—".into(),
                repeat: 20
            }
        );
        assert_eq!(
            parse(json!({"type": "DateTime"})).kind,
            BlockKind::DateTime {
                format: "%Y-%m-%d %H:%M".into()
            }
        );
        let block = parse(json!({"type": "StaticText"}));
        assert_eq!(block.kind, BlockKind::StaticText { text: String::new() });
        assert!(block.flags.is_empty());
    }

    #[test]
    fn test_unknown_or_missing_type_is_lenient() {
        let block = parse(json!({"type": "Signature", "flags": {"newline": true}}));
        assert_eq!(block.kind, BlockKind::Unknown);
        assert!(block.flags.contains(Flag::Newline));

        assert_eq!(parse(json!({"label": "no type"})).kind, BlockKind::Unknown);
    }

    #[test]
    fn test_nested_children() {
        let block = parse(json!({
            "type": "Repeater",
            "name": "items",
            "children": [
                {"type": "StaticText", "text": "• ", "flags": {}},
                {"type": "InputField", "name": "value", "flags": {"newlineAfter": true}}
            ]
        }));

        let children = block.kind.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[1], Block::input("value").with_flag(Flag::NewlineAfter));
    }

    #[test]
    fn test_description_accepts_long_key() {
        let block = parse(json!({"type": "Greeting", "description": "hint"}));
        assert_eq!(block.description, "hint");
    }

    #[test]
    fn test_serialize_uses_editor_keys() {
        let block = Block::separator("=", 3)
            .with_description("Линия")
            .with_flag(Flag::Newline);
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "Separator",
                "desc": "Линия",
                "char": "=",
                "repeat": 3,
                "flags": {"newline": true}
            })
        );
        assert_eq!(parse(value), block);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Block::greeting().kind.type_name(), "Greeting");
        assert_eq!(Block::table("rows", ["A"]).kind.type_name(), "Table");
        assert!(Block::static_text("x").kind.children().is_empty());
    }
}
