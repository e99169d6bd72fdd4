//! File-backed record store
//!
//! Layout: `<root>/<site>/<kind>/<name>.json`, with kind and name scrubbed
//! (lowercase, spaces and dashes replaced by underscores). Each file holds
//! one [`StoredRecord`].
//!
//! Distinct names can scrub to the same file (`Supplier Inquiry`,
//! `supplier-inquiry`). A file only answers for the exact name stored in it;
//! inserting another name onto an occupied file is a `Duplicate`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::{StoreError, StoreResult};
use super::{
    check_definition, check_name, check_permissions, dependents_of, DeleteOptions, InsertOptions,
    RecordHandle, RecordStore,
};
use crate::observability::{Event, Logger};
use crate::record::DocTypeRecord;

/// File-system safe form of a record or kind name.
pub fn scrub(name: &str) -> String {
    name.trim().replace([' ', '-'], "_").to_lowercase()
}

/// On-disk envelope for a definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub handle: RecordHandle,
    pub modified: DateTime<Utc>,
    pub definition: DocTypeRecord,
}

#[derive(Debug, Clone)]
pub struct FileRecordStore {
    site_dir: PathBuf,
}

impl FileRecordStore {
    /// Opens the store for `site` under `root`. Directories are created on
    /// first insert.
    pub fn new(root: &Path, site: &str) -> Self {
        Self {
            site_dir: root.join(site),
        }
    }

    pub fn site_dir(&self) -> &Path {
        &self.site_dir
    }

    /// Path of the file holding `name`
    pub fn record_path(&self, kind: &str, name: &str) -> PathBuf {
        self.kind_dir(kind).join(format!("{}.json", scrub(name)))
    }

    fn kind_dir(&self, kind: &str) -> PathBuf {
        self.site_dir.join(scrub(kind))
    }

    /// Reads the definition stored under exactly `name`, `None` if absent.
    pub fn load(&self, kind: &str, name: &str) -> StoreResult<Option<StoredRecord>> {
        let stored = self.occupant(kind, name)?;
        Ok(stored.filter(|s| s.definition.name == name))
    }

    /// Whatever definition holds the file `name` maps to.
    fn occupant(&self, kind: &str, name: &str) -> StoreResult<Option<StoredRecord>> {
        check_name(name)?;
        let path = self.record_path(kind, name);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(read_record(&path)?))
    }

    /// All stored definitions of `kind`, in file name order.
    pub fn list(&self, kind: &str) -> StoreResult<Vec<StoredRecord>> {
        let dir = self.kind_dir(kind);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            // Skip non-JSON files
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            paths.push(path);
        }
        paths.sort();

        paths.iter().map(|p| read_record(p)).collect()
    }
}

fn read_record(path: &Path) -> StoreResult<StoredRecord> {
    let content = fs::read_to_string(path)
        .map_err(|e| StoreError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| StoreError::Io(format!("Corrupt record {}: {}", path.display(), e)))
}

impl RecordStore for FileRecordStore {
    fn exists(&self, kind: &str, name: &str) -> StoreResult<bool> {
        Ok(self.load(kind, name)?.is_some())
    }

    fn insert(
        &mut self,
        record: &DocTypeRecord,
        options: InsertOptions,
    ) -> StoreResult<RecordHandle> {
        check_definition(record)?;
        check_permissions(record, options)?;

        if let Some(existing) = self.occupant(&record.doctype, &record.name)? {
            return Err(StoreError::duplicate(&record.doctype, &existing.definition.name));
        }
        let path = self.record_path(&record.doctype, &record.name);

        fs::create_dir_all(self.kind_dir(&record.doctype))?;

        let handle = RecordHandle::new(&record.doctype, &record.name);
        let stored = StoredRecord {
            handle: handle.clone(),
            modified: handle.created_at,
            definition: record.clone(),
        };
        let content = serde_json::to_string_pretty(&stored)?;
        fs::write(&path, content)?;

        let file = path.display().to_string();
        Logger::event(
            Event::RecordWritten,
            &[("doctype", record.name.as_str()), ("path", file.as_str())],
        );
        Ok(handle)
    }

    fn delete(&mut self, kind: &str, name: &str, options: DeleteOptions) -> StoreResult<()> {
        if self.load(kind, name)?.is_none() {
            return Err(StoreError::not_found(kind, name));
        }
        let path = self.record_path(kind, name);

        if !options.force {
            let stored = self.list(kind)?;
            let dependents = dependents_of(stored.iter().map(|s| &s.definition), name);
            if !dependents.is_empty() {
                return Err(StoreError::HasDependents {
                    kind: kind.to_string(),
                    name: name.to_string(),
                    dependents,
                });
            }
        }

        fs::remove_file(&path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DOCTYPE_KIND;
    use crate::spec::{DocTypeSpec, NamingRule, PermissionSpec};
    use tempfile::TempDir;

    fn branch() -> DocTypeRecord {
        DocTypeRecord::from(
            &DocTypeSpec::new("Service Provider Branch", NamingRule::Autoname, "format:BR-{####}")
                .with_module("Nursing Management")
                .with_permission(PermissionSpec::read_write("System Manager")),
        )
    }

    #[test]
    fn test_scrub() {
        assert_eq!(scrub("Service Provider Branch"), "service_provider_branch");
        assert_eq!(scrub("Contact-Person"), "contact_person");
        assert_eq!(scrub("DocType"), "doctype");
    }

    #[test]
    fn test_record_path_layout() {
        let store = FileRecordStore::new(Path::new("/srv/sites"), "development.localhost");
        assert_eq!(
            store.record_path(DOCTYPE_KIND, "Service Provider Branch"),
            PathBuf::from("/srv/sites/development.localhost/doctype/service_provider_branch.json")
        );
    }

    #[test]
    fn test_insert_load_delete() {
        let tmp = TempDir::new().unwrap();
        let mut store = FileRecordStore::new(tmp.path(), "test.localhost");

        let handle = store.insert(&branch(), InsertOptions::default()).unwrap();
        assert!(store.exists(DOCTYPE_KIND, "Service Provider Branch").unwrap());

        let loaded = store
            .load(DOCTYPE_KIND, "Service Provider Branch")
            .unwrap()
            .unwrap();
        assert_eq!(loaded.handle, handle);
        assert_eq!(loaded.definition, branch());

        store
            .delete(DOCTYPE_KIND, "Service Provider Branch", DeleteOptions::default())
            .unwrap();
        assert!(!store.exists(DOCTYPE_KIND, "Service Provider Branch").unwrap());
    }

    #[test]
    fn test_scrubbed_collision_answers_only_for_stored_name() {
        let tmp = TempDir::new().unwrap();
        let mut store = FileRecordStore::new(tmp.path(), "s");
        store.insert(&branch(), InsertOptions::default()).unwrap();

        assert!(store.load(DOCTYPE_KIND, "service-provider-branch").unwrap().is_none());
        assert!(!store.exists(DOCTYPE_KIND, "service_provider_branch").unwrap());

        let mut other = branch();
        other.name = "service_provider_branch".into();
        let err = store.insert(&other, InsertOptions::default()).unwrap_err();
        assert_eq!(
            err,
            StoreError::duplicate(DOCTYPE_KIND, "Service Provider Branch")
        );
    }

    #[test]
    fn test_path_names_rejected_before_disk() {
        let tmp = TempDir::new().unwrap();
        let store = FileRecordStore::new(tmp.path(), "s");

        let err = store.exists(DOCTYPE_KIND, "../escaped").unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)));
        let err = store.load(DOCTYPE_KIND, "a/b").unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)));
    }

    #[test]
    fn test_list_empty_site() {
        let tmp = TempDir::new().unwrap();
        let store = FileRecordStore::new(tmp.path(), "empty.localhost");
        assert!(store.list(DOCTYPE_KIND).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let store = FileRecordStore::new(tmp.path(), "s");
        let path = store.record_path(DOCTYPE_KIND, "Broken");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{").unwrap();

        let err = store.load(DOCTYPE_KIND, "Broken").unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
