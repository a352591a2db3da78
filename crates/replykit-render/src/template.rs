//! Templates: named, versioned sequences of root blocks.

use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::error::Result;

/// A reply template as stored by the template editor.
///
/// # Example
///
/// ```rust
/// use replykit_render::Template;
///
/// let template = Template::from_json(r#"{
///     "name": "Short reply",
///     "blocks": [{"type": "StaticText", "text": "Hello"}]
/// }"#).unwrap();
///
/// assert_eq!(template.blocks.len(), 1);
/// assert_eq!(template.version, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

fn default_version() -> u32 {
    1
}

impl Template {
    /// Creates an empty template with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: String::new(),
            version: default_version(),
            blocks: Vec::new(),
        }
    }

    /// Appends a root block.
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Parses a template from the editor's JSON form.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parses a template from YAML with the same field names as the JSON form.
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Name to show in listings.
    ///
    /// Unnamed templates are numbered from 1 by their position in the
    /// collection.
    pub fn display_name(&self, index: usize) -> String {
        if self.name.trim().is_empty() {
            format!("Шаблон {}", index + 1)
        } else {
            self.name.clone()
        }
    }

    /// Total number of blocks, children included.
    pub fn block_count(&self) -> usize {
        fn count(blocks: &[Block]) -> usize {
            blocks
                .iter()
                .map(|block| 1 + count(block.kind.children()))
                .sum()
        }
        count(&self.blocks)
    }
}
