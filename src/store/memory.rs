//! In-memory record store
//!
//! Keeps definitions in a map and logs every call in order, so callers can
//! assert on what was asked of the store. Failures can be injected per
//! operation.

use std::cell::RefCell;
use std::collections::HashMap;

use super::errors::{StoreError, StoreResult};
use super::{
    check_definition, check_permissions, dependents_of, DeleteOptions, InsertOptions,
    RecordHandle, RecordStore,
};
use crate::record::DocTypeRecord;

/// One call made against a [`MemoryRecordStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Exists { kind: String, name: String },
    Insert { name: String, ignore_permissions: bool },
    Delete { kind: String, name: String, force: bool },
}

#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: HashMap<(String, String), DocTypeRecord>,
    calls: RefCell<Vec<StoreCall>>,
    fail_exists: RefCell<Option<StoreError>>,
    fail_insert: Option<StoreError>,
    fail_delete: Option<StoreError>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a definition directly, without logging a call.
    pub fn seed(&mut self, record: DocTypeRecord) {
        let key = (record.doctype.clone(), record.name.clone());
        self.records.insert(key, record);
    }

    /// Makes the next `exists` call fail with `error`.
    pub fn fail_next_exists(&self, error: StoreError) {
        *self.fail_exists.borrow_mut() = Some(error);
    }

    /// Makes the next `insert` call fail with `error`.
    pub fn fail_next_insert(&mut self, error: StoreError) {
        self.fail_insert = Some(error);
    }

    /// Makes the next `delete` call fail with `error`.
    pub fn fail_next_delete(&mut self, error: StoreError) {
        self.fail_delete = Some(error);
    }

    pub fn get(&self, kind: &str, name: &str) -> Option<&DocTypeRecord> {
        self.records.get(&(kind.to_string(), name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Calls made so far, oldest first
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.borrow().clone()
    }

    pub fn delete_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, StoreCall::Delete { .. }))
            .count()
    }

    pub fn insert_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, StoreCall::Insert { .. }))
            .count()
    }

    fn log(&self, call: StoreCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl RecordStore for MemoryRecordStore {
    fn exists(&self, kind: &str, name: &str) -> StoreResult<bool> {
        self.log(StoreCall::Exists {
            kind: kind.to_string(),
            name: name.to_string(),
        });
        if let Some(err) = self.fail_exists.borrow_mut().take() {
            return Err(err);
        }
        Ok(self.get(kind, name).is_some())
    }

    fn insert(
        &mut self,
        record: &DocTypeRecord,
        options: InsertOptions,
    ) -> StoreResult<RecordHandle> {
        self.log(StoreCall::Insert {
            name: record.name.clone(),
            ignore_permissions: options.ignore_permissions,
        });
        if let Some(err) = self.fail_insert.take() {
            return Err(err);
        }

        check_definition(record)?;
        check_permissions(record, options)?;

        let key = (record.doctype.clone(), record.name.clone());
        if self.records.contains_key(&key) {
            return Err(StoreError::duplicate(&record.doctype, &record.name));
        }

        self.records.insert(key, record.clone());
        Ok(RecordHandle::new(&record.doctype, &record.name))
    }

    fn delete(&mut self, kind: &str, name: &str, options: DeleteOptions) -> StoreResult<()> {
        self.log(StoreCall::Delete {
            kind: kind.to_string(),
            name: name.to_string(),
            force: options.force,
        });
        if let Some(err) = self.fail_delete.take() {
            return Err(err);
        }

        let key = (kind.to_string(), name.to_string());
        if !self.records.contains_key(&key) {
            return Err(StoreError::not_found(kind, name));
        }

        if !options.force {
            let dependents = dependents_of(self.records.values(), name);
            if !dependents.is_empty() {
                return Err(StoreError::HasDependents {
                    kind: kind.to_string(),
                    name: name.to_string(),
                    dependents,
                });
            }
        }

        self.records.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DOCTYPE_KIND;
    use crate::spec::{DocTypeSpec, FieldSpec, NamingRule, PermissionSpec};

    fn supplier() -> DocTypeRecord {
        DocTypeRecord::from(
            &DocTypeSpec::new("Supplier", NamingRule::Autoname, "format:SUP-{####}")
                .with_module("Supplier Portal")
                .with_permission(PermissionSpec::read_write("System Manager")),
        )
    }

    fn inquiry() -> DocTypeRecord {
        DocTypeRecord::from(
            &DocTypeSpec::new("Supplier Inquiry", NamingRule::Autoname, "format:INQ-{####}")
                .with_module("Supplier Portal")
                .with_field(
                    FieldSpec::new("supplier", "Link")
                        .with_label("Supplier")
                        .with_options("Supplier"),
                )
                .with_permission(PermissionSpec::read_write("Supplier")),
        )
    }

    #[test]
    fn test_insert_and_exists() {
        let mut store = MemoryRecordStore::new();
        assert!(!store.exists(DOCTYPE_KIND, "Supplier").unwrap());

        let handle = store.insert(&supplier(), InsertOptions::default()).unwrap();
        assert_eq!(handle.name, "Supplier");
        assert!(store.exists(DOCTYPE_KIND, "Supplier").unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_insert_duplicate() {
        let mut store = MemoryRecordStore::new();
        store.seed(supplier());
        let err = store.insert(&supplier(), InsertOptions::default()).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));
    }

    #[test]
    fn test_delete_with_dependents() {
        let mut store = MemoryRecordStore::new();
        store.seed(supplier());
        store.seed(inquiry());

        let err = store
            .delete(DOCTYPE_KIND, "Supplier", DeleteOptions::default())
            .unwrap_err();
        assert!(matches!(err, StoreError::HasDependents { .. }));

        store
            .delete(DOCTYPE_KIND, "Supplier", DeleteOptions { force: true })
            .unwrap();
        assert!(store.get(DOCTYPE_KIND, "Supplier").is_none());
    }

    #[test]
    fn test_delete_missing() {
        let mut store = MemoryRecordStore::new();
        let err = store
            .delete(DOCTYPE_KIND, "Nope", DeleteOptions { force: true })
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_calls_logged_in_order() {
        let mut store = MemoryRecordStore::new();
        store.exists(DOCTYPE_KIND, "Supplier").unwrap();
        store
            .insert(&supplier(), InsertOptions { ignore_permissions: true })
            .unwrap();

        assert_eq!(
            store.calls(),
            vec![
                StoreCall::Exists { kind: "DocType".into(), name: "Supplier".into() },
                StoreCall::Insert { name: "Supplier".into(), ignore_permissions: true },
            ]
        );
    }

    #[test]
    fn test_injected_failure_is_one_shot() {
        let mut store = MemoryRecordStore::new();
        store.fail_next_insert(StoreError::Io("disk full".into()));
        assert!(store.insert(&supplier(), InsertOptions::default()).is_err());
        assert!(store.insert(&supplier(), InsertOptions::default()).is_ok());
    }
}
