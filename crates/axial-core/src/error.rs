//! Error types for scale configuration.

use thiserror::Error;

/// Errors raised while loading or validating a configuration.
///
/// Engines and scale computations never fail; only configuration does.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// A field holds a value outside its domain.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Error message
        message: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, message: &str) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}
