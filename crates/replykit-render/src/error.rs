//! Error types for template loading and rendering.
//!
//! Rendering is fail-soft: missing values, unknown block types and malformed
//! flags never produce an error. [`RenderError`] covers the boundary only,
//! i.e. parsing templates and values, plus the strict limits (nesting depth,
//! separator length) of [`Renderer::try_compose`](crate::Renderer::try_compose).

use thiserror::Error;

/// Error type for the boundary of the rendering engine.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A template or values document was not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A template or values document was not valid YAML.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The values document parsed, but its top level is not a mapping.
    #[error("values must be a mapping of field names, got {found}")]
    InvalidValues { found: &'static str },

    /// A block tree is nested deeper than the configured limit.
    #[error("block nesting exceeds the maximum depth of {limit}")]
    DepthExceeded { limit: usize },

    /// A `Separator` would render longer than the configured limit.
    #[error("separator repeated {repeat} times exceeds the maximum of {limit} bytes")]
    SeparatorTooLong { repeat: i64, limit: usize },
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RenderError::DepthExceeded { limit: 8 };
        assert_eq!(err.to_string(), "block nesting exceeds the maximum depth of 8");

        let err = RenderError::InvalidValues { found: "a list" };
        assert!(err.to_string().contains("a list"));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: RenderError = json_err.into();
        assert!(matches!(err, RenderError::Json(_)));
        assert!(err.to_string().starts_with("invalid JSON"));
    }
}
