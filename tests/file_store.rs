//! File Store Tests
//!
//! Loads specifications into a site directory on disk:
//! - Records land at `<root>/<site>/doctype/<name>.json`
//! - Sites are isolated from each other
//! - Delete refuses while other definitions link to the target, unless forced
//! - Overwrite replaces the stored definition
//! - Names cannot escape the site directory or collide with another record

use std::path::{Path, PathBuf};

use doctype_creator::loader::{DocTypeLoader, LoadPhase};
use doctype_creator::record::{DocTypeRecord, DOCTYPE_KIND};
use doctype_creator::spec::{DocTypeSpec, FieldSpec, NamingRule, PermissionSpec};
use doctype_creator::store::{
    DeleteOptions, FileRecordStore, InsertOptions, RecordStore, StoreError,
};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn supplier() -> DocTypeSpec {
    DocTypeSpec::new("Supplier", NamingRule::ByFieldname, "field:supplier_name")
        .with_module("Buying")
        .with_field(FieldSpec::new("supplier_name", "Data").with_label("Supplier Name"))
        .with_permission(PermissionSpec::read_write("System Manager"))
}

fn purchase_order() -> DocTypeSpec {
    DocTypeSpec::new("Purchase Order", NamingRule::Autoname, "format:PO-{#####}")
        .with_module("Buying")
        .with_field(
            FieldSpec::new("supplier", "Link")
                .with_label("Supplier")
                .with_options("Supplier"),
        )
        .with_permission(PermissionSpec::read_write("Purchase User"))
}

// =============================================================================
// Layout Tests
// =============================================================================

#[test]
fn test_load_writes_site_file() {
    let tmp = TempDir::new().unwrap();
    let store = FileRecordStore::new(tmp.path(), "development.localhost");
    let mut loader = DocTypeLoader::new(store);

    let report = loader
        .load_from_file(&fixture("valid_simple.yaml"), false)
        .unwrap();

    let path = tmp
        .path()
        .join("development.localhost")
        .join("doctype")
        .join("service_provider.json");
    assert!(path.exists());

    let stored = loader
        .store()
        .load(DOCTYPE_KIND, "Service Provider")
        .unwrap()
        .unwrap();
    assert_eq!(stored.handle.id, report.handle.id);
    assert_eq!(stored.definition, report.record);
}

#[test]
fn test_sites_are_isolated() {
    let tmp = TempDir::new().unwrap();
    let mut dev = FileRecordStore::new(tmp.path(), "dev.localhost");
    let prod = FileRecordStore::new(tmp.path(), "prod.localhost");

    dev.insert(&DocTypeRecord::from(&supplier()), InsertOptions::default())
        .unwrap();

    assert!(dev.exists(DOCTYPE_KIND, "Supplier").unwrap());
    assert!(!prod.exists(DOCTYPE_KIND, "Supplier").unwrap());
}

#[test]
fn test_duplicate_insert_rejected() {
    let tmp = TempDir::new().unwrap();
    let mut store = FileRecordStore::new(tmp.path(), "s");
    let record = DocTypeRecord::from(&supplier());

    store.insert(&record, InsertOptions::default()).unwrap();
    let err = store.insert(&record, InsertOptions::default()).unwrap_err();

    assert!(matches!(err, StoreError::Duplicate { .. }));
}

#[test]
fn test_permission_check_applies_without_ignore() {
    let tmp = TempDir::new().unwrap();
    let mut store = FileRecordStore::new(tmp.path(), "s");
    let mut spec = supplier();
    spec.permissions.clear();
    let record = DocTypeRecord::from(&spec);

    let err = store.insert(&record, InsertOptions::default()).unwrap_err();
    assert!(matches!(err, StoreError::PermissionDenied(_)));

    store
        .insert(&record, InsertOptions { ignore_permissions: true })
        .unwrap();
}

// =============================================================================
// Dependency Tests
// =============================================================================

#[test]
fn test_delete_refuses_linked_target() {
    let tmp = TempDir::new().unwrap();
    let mut store = FileRecordStore::new(tmp.path(), "s");
    store
        .insert(&DocTypeRecord::from(&supplier()), InsertOptions::default())
        .unwrap();
    store
        .insert(&DocTypeRecord::from(&purchase_order()), InsertOptions::default())
        .unwrap();

    let err = store
        .delete(DOCTYPE_KIND, "Supplier", DeleteOptions::default())
        .unwrap_err();

    match err {
        StoreError::HasDependents { dependents, .. } => {
            assert_eq!(dependents, vec!["Purchase Order".to_string()]);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(store.exists(DOCTYPE_KIND, "Supplier").unwrap());

    store
        .delete(DOCTYPE_KIND, "Supplier", DeleteOptions { force: true })
        .unwrap();
    assert!(!store.exists(DOCTYPE_KIND, "Supplier").unwrap());
}

#[test]
fn test_delete_missing_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let mut store = FileRecordStore::new(tmp.path(), "s");

    let err = store
        .delete(DOCTYPE_KIND, "Ghost", DeleteOptions::default())
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

// =============================================================================
// Overwrite Tests
// =============================================================================

/// Overwrite forces the delete even when other definitions link to the target.
#[test]
fn test_overwrite_replaces_linked_definition() {
    let tmp = TempDir::new().unwrap();
    let mut loader = DocTypeLoader::new(FileRecordStore::new(tmp.path(), "s"));
    loader.load_spec(&supplier(), false).unwrap();
    loader.load_spec(&purchase_order(), false).unwrap();

    let updated = supplier().with_field(FieldSpec::new("tax_id", "Data").with_label("Tax ID"));
    let report = loader.load_spec(&updated, true).unwrap();

    assert!(report.overwritten);
    let stored = loader.store().load(DOCTYPE_KIND, "Supplier").unwrap().unwrap();
    assert_eq!(stored.definition.fields.len(), 2);
    assert!(loader.store().exists(DOCTYPE_KIND, "Purchase Order").unwrap());
}

// =============================================================================
// Name Safety Tests
// =============================================================================

#[test]
fn test_traversal_name_cannot_escape_site() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("root");
    let mut loader = DocTypeLoader::new(FileRecordStore::new(&root, "s"));
    let mut spec = supplier();
    spec.name = "../../../escaped".into();

    let err = loader.load_spec(&spec, false).unwrap_err();

    assert_eq!(err.phase(), LoadPhase::Lookup);
    assert!(matches!(err.store_error(), Some(StoreError::Invalid(_))));
    assert!(!tmp.path().join("escaped.json").exists());
    assert!(!root.exists());
}

#[test]
fn test_separator_name_is_invalid_not_io() {
    let tmp = TempDir::new().unwrap();
    let mut store = FileRecordStore::new(tmp.path(), "s");
    let mut spec = supplier();
    spec.name = "Supplier/Inquiry".into();

    let err = store
        .insert(&DocTypeRecord::from(&spec), InsertOptions::default())
        .unwrap_err();

    assert!(matches!(err, StoreError::Invalid(_)));
}

/// Names that scrub to the same file never overwrite or delete each other.
#[test]
fn test_scrub_collision_leaves_existing_record() {
    let tmp = TempDir::new().unwrap();
    let mut loader = DocTypeLoader::new(FileRecordStore::new(tmp.path(), "s"));
    let mut inquiry = supplier();
    inquiry.name = "Supplier Inquiry".into();
    loader.load_spec(&inquiry, false).unwrap();

    assert!(!loader
        .store()
        .exists(DOCTYPE_KIND, "supplier-inquiry")
        .unwrap());

    let mut clash = supplier();
    clash.name = "supplier_inquiry".into();
    let err = loader.load_spec(&clash, true).unwrap_err();

    assert_eq!(err.phase(), LoadPhase::Persist);
    assert_eq!(
        err.store_error(),
        Some(&StoreError::duplicate(DOCTYPE_KIND, "Supplier Inquiry"))
    );
    let stored = loader
        .store()
        .load(DOCTYPE_KIND, "Supplier Inquiry")
        .unwrap()
        .unwrap();
    assert_eq!(stored.definition.name, "Supplier Inquiry");
}

#[test]
fn test_delete_of_colliding_name_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let mut store = FileRecordStore::new(tmp.path(), "s");
    let mut inquiry = supplier();
    inquiry.name = "Supplier Inquiry".into();
    store
        .insert(&DocTypeRecord::from(&inquiry), InsertOptions::default())
        .unwrap();

    let err = store
        .delete(DOCTYPE_KIND, "supplier_inquiry", DeleteOptions { force: true })
        .unwrap_err();

    assert!(matches!(err, StoreError::NotFound { .. }));
    assert!(store.exists(DOCTYPE_KIND, "Supplier Inquiry").unwrap());
}
