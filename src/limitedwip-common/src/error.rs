//! Error types for shared configuration handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for common operations.
pub type Result<T> = std::result::Result<T, CommonError>;

/// Errors raised while compiling patterns or loading settings.
#[derive(Debug, Error)]
pub enum CommonError {
    /// Wildcard pattern that does not compile to a regular expression.
    #[error("invalid path pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Setting value outside of its allowed range.
    #[error("invalid value '{value}' for setting '{name}': {reason}")]
    InvalidSetting {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// IO error while reading or writing a settings file.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid TOML for [`crate::LimitedWipSettings`].
    #[error("failed to parse settings: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Settings could not be serialized.
    #[error("failed to serialize settings: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl CommonError {
    /// Create an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid setting error.
    pub fn invalid_setting(
        name: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidSetting {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Wrap an IO error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
