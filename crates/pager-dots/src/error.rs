//! Error types for the indicator crate.

use std::path::PathBuf;

/// Result type alias for indicator operations.
pub type Result<T> = std::result::Result<T, IndicatorError>;

/// Errors that can occur while configuring an indicator.
///
/// Page events never fail: out-of-range input is clamped instead.
#[derive(Debug, thiserror::Error)]
pub enum IndicatorError {
    /// A numeric setting is outside its valid range.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },

    /// A color string could not be parsed.
    #[error("Invalid color '{value}' for '{field}': expected #RRGGBB or #RRGGBBAA")]
    InvalidColor { field: String, value: String },

    /// The configuration file could not be read.
    #[error("Failed to read indicator config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid TOML for an indicator.
    #[error("Failed to parse indicator config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be written as TOML.
    #[error("Failed to serialize indicator config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl IndicatorError {
    /// Create a value error.
    pub fn invalid_value(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
