//! Error types for the template store and value input.

use std::io;
use std::path::PathBuf;

use replykit_render::RenderError;

/// Errors that can occur when loading or querying templates.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The template file could not be read.
    #[error("failed to read templates from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The template file is not a list of templates.
    #[error("failed to parse templates in {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// No template has the requested id.
    #[error("template {id} not found ({count} available)")]
    NotFound { id: usize, count: usize },
}

/// Errors that can occur while assembling values from user input.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The values file could not be read.
    #[error("failed to read values from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The values file is not a valid mapping.
    #[error("invalid values in {}: {source}", path.display())]
    Values {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    /// A `name=value` argument without `=` or without a name.
    #[error("expected NAME=VALUE, got '{0}'")]
    Assignment(String),
}

impl StoreError {
    pub(crate) fn parse(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
