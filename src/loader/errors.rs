//! Loader errors
//!
//! Each step of a load maps to its own variant so callers can tell which
//! phase failed.

use std::fmt;

use thiserror::Error;

use crate::spec::SpecError;
use crate::store::StoreError;

/// Result type for loader operations
pub type LoadResult<T> = Result<T, LoadError>;

/// Step of a load that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Parse,
    Lookup,
    Conflict,
    Delete,
    Persist,
}

impl fmt::Display for LoadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoadPhase::Parse => "parse",
            LoadPhase::Lookup => "lookup",
            LoadPhase::Conflict => "conflict",
            LoadPhase::Delete => "delete",
            LoadPhase::Persist => "persist",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to parse specification: {0}")]
    Parse(#[from] SpecError),

    #[error("Failed to check whether DocType '{name}' exists: {source}")]
    Lookup {
        name: String,
        #[source]
        source: StoreError,
    },

    #[error("DocType '{0}' already exists. Use --overwrite to replace.")]
    Conflict(String),

    #[error("Failed to delete existing DocType '{name}': {source}")]
    Delete {
        name: String,
        #[source]
        source: StoreError,
    },

    #[error("Failed to create DocType '{name}': {source}")]
    Persist {
        name: String,
        #[source]
        source: StoreError,
    },
}

impl LoadError {
    pub fn phase(&self) -> LoadPhase {
        match self {
            LoadError::Parse(_) => LoadPhase::Parse,
            LoadError::Lookup { .. } => LoadPhase::Lookup,
            LoadError::Conflict(_) => LoadPhase::Conflict,
            LoadError::Delete { .. } => LoadPhase::Delete,
            LoadError::Persist { .. } => LoadPhase::Persist,
        }
    }

    /// Store error behind a lookup, delete or persist failure
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            LoadError::Lookup { source, .. }
            | LoadError::Delete { source, .. }
            | LoadError::Persist { source, .. } => Some(source),
            _ => None,
        }
    }
}
