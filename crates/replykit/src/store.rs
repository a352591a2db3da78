//! Read access to the template collection.
//!
//! Templates live in one file holding a list of templates, in the editor's
//! JSON form (or the same structure in YAML for `.yaml`/`.yml` files).
//! The store assigns ids by position, `0..n`, so ids always match the order
//! of the file.
//!
//! # Resolution
//!
//! | Situation | Collection used |
//! |-----------|-----------------|
//! | no path configured | built-in defaults |
//! | path does not exist | built-in defaults |
//! | file unreadable, or not a list | error |
//! | some entries invalid | the valid entries (invalid ones logged and skipped) |
//! | no valid entries | built-in defaults |

use std::path::{Path, PathBuf};

use replykit_render::Template;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::StoreError;

/// Environment variable naming the template file.
pub const TEMPLATES_ENV: &str = "REPLYKIT_TEMPLATES";

const BUILTIN_TEMPLATES: &str = include_str!("../templates/default.json");

/// One line of a template listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateSummary {
    pub id: u64,
    pub name: String,
}

/// Where a store's templates came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreSource {
    Builtin,
    File(PathBuf),
}

/// An ordered, read-only collection of templates.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    templates: Vec<Template>,
    source: StoreSource,
}

impl TemplateStore {
    /// The collection that ships with replykit.
    pub fn builtin() -> Self {
        Self::from_templates(embedded_templates(BUILTIN_TEMPLATES), StoreSource::Builtin)
    }

    /// Uses `path` when given, the built-in collection otherwise.
    pub fn resolve(path: Option<&Path>) -> Result<Self, StoreError> {
        match path {
            Some(path) => Self::open(path),
            None => Ok(Self::builtin()),
        }
    }

    /// Loads the templates in `path`. See the module docs for fallbacks.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(path = %path.display(), "template file not found, using built-in templates");
            return Ok(Self::builtin());
        }

        let text = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: Vec<Value> = if is_yaml(path) {
            serde_yaml::from_str(&text).map_err(|err| StoreError::parse(path, err))?
        } else {
            serde_json::from_str(&text).map_err(|err| StoreError::parse(path, err))?
        };

        let templates = parse_entries(entries, &path.display().to_string());
        if templates.is_empty() {
            warn!(path = %path.display(), "no valid templates in file, using built-in templates");
            return Ok(Self::builtin());
        }

        debug!(path = %path.display(), count = templates.len(), "loaded templates");
        Ok(Self::from_templates(templates, StoreSource::File(path.to_path_buf())))
    }

    fn from_templates(mut templates: Vec<Template>, source: StoreSource) -> Self {
        for (index, template) in templates.iter_mut().enumerate() {
            template.id = index as u64;
        }
        Self { templates, source }
    }

    /// Ids and display names, in order.
    pub fn list(&self) -> Vec<TemplateSummary> {
        self.templates
            .iter()
            .enumerate()
            .map(|(index, template)| TemplateSummary {
                id: template.id,
                name: template.display_name(index),
            })
            .collect()
    }

    pub fn get(&self, id: usize) -> Result<&Template, StoreError> {
        self.templates.get(id).ok_or(StoreError::NotFound {
            id,
            count: self.templates.len(),
        })
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn source(&self) -> &StoreSource {
        &self.source
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    )
}

/// Parses a compiled-in collection; a corrupt one is logged and yields nothing.
fn embedded_templates(text: &str) -> Vec<Template> {
    match serde_json::from_str::<Vec<Value>>(text) {
        Ok(entries) => parse_entries(entries, "builtin"),
        Err(err) => {
            warn!(error = %err, "built-in templates are not a valid list");
            Vec::new()
        }
    }
}

/// Parses each entry on its own so one broken template does not hide the rest.
fn parse_entries(entries: Vec<Value>, origin: &str) -> Vec<Template> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<Template>(entry) {
            Ok(template) => Some(template),
            Err(err) => {
                warn!(origin, index, error = %err, "skipping invalid template");
                None
            }
        })
        .collect()
}
