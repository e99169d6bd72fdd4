//! Errors raised while reading a specification
//!
//! Well-formed but invalid documents never produce a `SpecError`; they yield a
//! `ValidationReport` with diagnostics. These errors cover input that cannot
//! be read or parsed at all, and structural schemas that cannot be loaded.

use thiserror::Error;

/// Result type for specification I/O
pub type SpecResult<T> = Result<T, SpecError>;

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("Error reading file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML syntax: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Cannot load structural schema '{origin}': {reason}")]
    SchemaLoad { origin: String, reason: String },
}

impl SpecError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        SpecError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn schema_load(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        SpecError::SchemaLoad {
            origin: origin.into(),
            reason: reason.into(),
        }
    }

    /// True for missing or unreadable files
    pub fn is_io(&self) -> bool {
        matches!(self, SpecError::Io { .. })
    }
}
