//! Record store collaborator
//!
//! The loader talks to the platform through [`RecordStore`]. Two stores ship
//! with the crate:
//! - [`MemoryRecordStore`]: in-process, records every call
//! - [`FileRecordStore`]: one JSON file per definition under a site directory

mod errors;
mod file;
mod memory;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::record::DocTypeRecord;

pub use errors::{StoreError, StoreResult};
pub use file::{scrub, FileRecordStore, StoredRecord};
pub use memory::{MemoryRecordStore, StoreCall};

/// Options for [`RecordStore::insert`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertOptions {
    /// Skip the store's own permission checks
    pub ignore_permissions: bool,
}

/// Options for [`RecordStore::delete`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteOptions {
    /// Delete even if other definitions link to the target
    pub force: bool,
}

/// Handle returned for a persisted definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordHandle {
    pub kind: String,
    pub name: String,
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl RecordHandle {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }
}

/// Persistent store for record definitions.
///
/// Locking and durability are the store's concern; callers issue one
/// synchronous call at a time.
pub trait RecordStore {
    /// Returns whether a record of `kind` named `name` exists.
    fn exists(&self, kind: &str, name: &str) -> StoreResult<bool>;

    /// Persists a definition.
    ///
    /// # Errors
    ///
    /// - `Duplicate` if a definition with the same name exists
    /// - `Invalid` if the definition breaks the store's structural rules
    /// - `PermissionDenied` if permission checks apply and fail
    fn insert(&mut self, record: &DocTypeRecord, options: InsertOptions)
        -> StoreResult<RecordHandle>;

    /// Removes a record.
    ///
    /// # Errors
    ///
    /// - `NotFound` if nothing is stored under `name`
    /// - `HasDependents` if other definitions link to it and `force` is false
    fn delete(&mut self, kind: &str, name: &str, options: DeleteOptions) -> StoreResult<()>;
}

/// Structural rules shared by the shipped stores.
pub fn check_definition(record: &DocTypeRecord) -> StoreResult<()> {
    check_name(&record.name)?;
    if record.module.as_deref().map_or(true, |m| m.trim().is_empty()) {
        return Err(StoreError::Invalid(format!(
            "{} '{}': module is required",
            record.doctype, record.name
        )));
    }

    let mut seen = HashSet::new();
    for field in &record.fields {
        if !seen.insert(field.fieldname.as_str()) {
            return Err(StoreError::Invalid(format!(
                "Field '{}' appears more than once",
                field.fieldname
            )));
        }
    }

    if let Some(idx) = record.permissions.iter().position(|p| p.role.trim().is_empty()) {
        return Err(StoreError::Invalid(format!("Permission row {} has no role", idx)));
    }

    Ok(())
}

/// Names must be non-empty and usable as a single path component.
pub fn check_name(name: &str) -> StoreResult<()> {
    if name.trim().is_empty() {
        return Err(StoreError::Invalid("name is required".into()));
    }
    let separator = name.chars().any(|c| c == '/' || c == '\\' || c.is_control());
    if separator || name.trim() == "." || name.trim() == ".." {
        return Err(StoreError::Invalid(format!(
            "name '{}' must not contain path separators or control characters",
            name.escape_debug()
        )));
    }
    Ok(())
}

/// Permission check applied when `ignore_permissions` is not set.
pub fn check_permissions(record: &DocTypeRecord, options: InsertOptions) -> StoreResult<()> {
    if !options.ignore_permissions && record.permissions.is_empty() {
        return Err(StoreError::PermissionDenied(format!(
            "{} '{}' grants no roles",
            record.doctype, record.name
        )));
    }
    Ok(())
}

/// Names of definitions that link to `target` through Link or Table fields.
pub fn dependents_of<'a>(
    records: impl IntoIterator<Item = &'a DocTypeRecord>,
    target: &str,
) -> Vec<String> {
    let mut names: Vec<String> = records
        .into_iter()
        .filter(|r| r.name != target)
        .filter(|r| r.referenced_doctypes().any(|t| t == target))
        .map(|r| r.name.clone())
        .collect();
    names.sort();
    names
}
