//! Record store errors

use thiserror::Error;

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{kind} '{name}' already exists")]
    Duplicate { kind: String, name: String },

    #[error("{kind} '{name}' not found")]
    NotFound { kind: String, name: String },

    #[error("cannot delete {kind} '{name}': linked from {}", .dependents.join(", "))]
    HasDependents {
        kind: String,
        name: String,
        dependents: Vec<String>,
    },

    #[error("Insufficient permission: {0}")]
    PermissionDenied(String),

    #[error("Invalid definition: {0}")]
    Invalid(String),

    #[error("Store I/O error: {0}")]
    Io(String),
}

impl StoreError {
    pub fn duplicate(kind: &str, name: &str) -> Self {
        StoreError::Duplicate {
            kind: kind.to_string(),
            name: name.to_string(),
        }
    }

    pub fn not_found(kind: &str, name: &str) -> Self {
        StoreError::NotFound {
            kind: kind.to_string(),
            name: name.to_string(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Io(format!("JSON error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_dependents_lists_names() {
        let err = StoreError::HasDependents {
            kind: "DocType".into(),
            name: "Supplier".into(),
            dependents: vec!["Supplier Inquiry".into(), "Contact Person".into()],
        };
        assert_eq!(
            err.to_string(),
            "cannot delete DocType 'Supplier': linked from Supplier Inquiry, Contact Person"
        );
    }
}
