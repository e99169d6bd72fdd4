//! Loads a DocType specification into a record store
//!
//! Steps:
//! 1. Parse the specification
//! 2. Check whether the record type exists; delete it if overwriting
//! 3. Convert the specification into a record definition
//! 4. Insert the definition
//! 5. Report a summary
//!
//! Nothing is retried. Overwrite is delete-then-recreate: anything stored
//! under the old definition is lost, and if the insert then fails the old
//! definition is gone too.

use std::path::Path;

use super::errors::{LoadError, LoadResult};
use super::observer::{LoadObserver, SilentObserver};
use crate::observability::{Event, Logger, ObservationScope};
use crate::record::{DocTypeRecord, DOCTYPE_KIND};
use crate::spec::{load_spec_file, parse_spec, DocTypeSpec};
use crate::store::{DeleteOptions, InsertOptions, RecordHandle, RecordStore};

/// Number of progress steps in a load
pub const TOTAL_STEPS: usize = 5;

/// Summary of a completed load
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub name: String,
    pub module: Option<String>,
    pub field_count: usize,
    pub permission_count: usize,
    /// An existing definition was deleted first
    pub overwritten: bool,
    pub handle: RecordHandle,
    pub record: DocTypeRecord,
}

/// Loads specifications into a [`RecordStore`]
pub struct DocTypeLoader<'o, S> {
    store: S,
    observer: Box<dyn LoadObserver + 'o>,
}

impl<'o, S: RecordStore> DocTypeLoader<'o, S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            observer: Box::new(SilentObserver),
        }
    }

    /// Sends step-numbered progress to `observer`.
    pub fn with_observer(mut self, observer: impl LoadObserver + 'o) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads a specification file.
    pub fn load_from_file(&mut self, path: &Path, overwrite: bool) -> LoadResult<LoadReport> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.observer.step(1, TOTAL_STEPS, &format!("Loading YAML file: {}", file_name));

        let file = load_spec_file(path)?;
        self.apply(&file.doctype, overwrite)
    }

    /// Loads specification source text.
    pub fn load_from_str(&mut self, source: &str, overwrite: bool) -> LoadResult<LoadReport> {
        self.observer.step(1, TOTAL_STEPS, "Parsing YAML specification");

        let file = parse_spec(source)?;
        self.apply(&file.doctype, overwrite)
    }

    /// Loads an already parsed specification.
    pub fn load_spec(&mut self, spec: &DocTypeSpec, overwrite: bool) -> LoadResult<LoadReport> {
        self.observer.step(1, TOTAL_STEPS, "Using parsed specification");
        self.apply(spec, overwrite)
    }

    fn apply(&mut self, spec: &DocTypeSpec, overwrite: bool) -> LoadResult<LoadReport> {
        self.observer.detail(&format!("DocType name: {}", spec.name));
        Logger::event(Event::SpecParsed, &[("doctype", spec.name.as_str())]);

        let scope =
            ObservationScope::with_fields("DOCTYPE_LOAD", &[("doctype", spec.name.as_str())]);
        match self.run(spec, overwrite) {
            Ok(report) => {
                let fields = report.field_count.to_string();
                let permissions = report.permission_count.to_string();
                scope.complete_with_fields(&[
                    ("fields", fields.as_str()),
                    ("permissions", permissions.as_str()),
                ]);
                Ok(report)
            }
            Err(e) => {
                scope.fail(&e.to_string());
                Err(e)
            }
        }
    }

    fn run(&mut self, spec: &DocTypeSpec, overwrite: bool) -> LoadResult<LoadReport> {
        let name = spec.name.as_str();

        self.observer.step(2, TOTAL_STEPS, "Checking if DocType exists...");
        let exists = self
            .store
            .exists(DOCTYPE_KIND, name)
            .map_err(|source| LoadError::Lookup {
                name: name.to_string(),
                source,
            })?;

        let overwritten = if exists {
            if !overwrite {
                Logger::event(Event::LoadConflict, &[("doctype", name)]);
                return Err(LoadError::Conflict(name.to_string()));
            }
            self.observer.detail("DocType exists - deleting for overwrite...");
            self.store
                .delete(DOCTYPE_KIND, name, DeleteOptions { force: true })
                .map_err(|source| LoadError::Delete {
                    name: name.to_string(),
                    source,
                })?;
            Logger::event(Event::DoctypeDeleted, &[("doctype", name)]);
            self.observer.detail("Deleted successfully");
            true
        } else {
            self.observer.detail("DocType does not exist - proceeding with creation");
            false
        };

        self.observer.step(3, TOTAL_STEPS, "Converting YAML to DocType record...");
        let record = DocTypeRecord::from(spec);
        let field_count = record.fields.len();
        let permission_count = record.permissions.len();
        self.observer.detail(&format!("Fields: {}", field_count));
        self.observer.detail(&format!("Permissions: {} roles", permission_count));
        Logger::event(Event::DoctypeConverted, &[("doctype", name)]);

        self.observer.step(4, TOTAL_STEPS, "Creating DocType in record store...");
        let handle = self
            .store
            .insert(&record, InsertOptions { ignore_permissions: true })
            .map_err(|source| LoadError::Persist {
                name: name.to_string(),
                source,
            })?;
        self.observer.detail("DocType created successfully");
        let id = handle.id.to_string();
        Logger::event(Event::DoctypeInserted, &[("doctype", name), ("id", id.as_str())]);

        self.observer.step(5, TOTAL_STEPS, "Summary");
        self.observer.detail(&format!("Total fields: {}", field_count));
        self.observer.detail(&format!("Permissions: {} roles", permission_count));
        let module = record.module.as_deref().unwrap_or("-");
        self.observer.detail(&format!("Module: {}", module));

        Ok(LoadReport {
            name: name.to_string(),
            module: record.module.clone(),
            field_count,
            permission_count,
            overwritten,
            handle,
            record,
        })
    }
}
