//! Error types for manifest parsing.

use thiserror::Error;

/// Error type for manifest parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Manifest-wide validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A single field holds an unusable value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field path, e.g. `panels[1].min_width`
        field: String,
        /// Error message
        message: String,
    },
}

impl ParseError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}
