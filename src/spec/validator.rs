//! DocType specification validator
//!
//! Validation runs three layers:
//! 1. Structural: JSON-Schema contract. Any violation returns immediately,
//!    since the later layers assume a well-shaped document.
//! 2. Business rules: naming pattern and per-field checks.
//! 3. Compatibility: requirements of the target platform.
//!
//! Each layer is a pure function returning its own `ValidationReport`; the
//! validator concatenates them. Layers 2 and 3 report every violation they
//! find rather than stopping at the first.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use super::diagnostics::{Diagnostic, ValidationReport};
use super::errors::{SpecError, SpecResult};
use super::source::{parse_value, read_source};
use super::types::{is_reserved_fieldname, DocTypeSpec, FieldType, NamingRule, SpecFile};
use crate::observability::{Event, Logger};

/// Structural schema shipped with the crate
pub const BUILTIN_SCHEMA: &str = include_str!("../../schemas/doctype_schema.json");

/// Fieldnames are lower snake_case starting with a letter
pub const FIELDNAME_PATTERN: &str = r"^[a-z][a-z0-9_]*$";

fn fieldname_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(FIELDNAME_PATTERN).expect("FIELDNAME_PATTERN is a valid regex"))
}

/// Returns true if `fieldname` matches [`FIELDNAME_PATTERN`].
pub fn is_snake_case(fieldname: &str) -> bool {
    fieldname_regex().is_match(fieldname)
}

/// Validates DocType specifications against a compiled structural schema
/// and the business rules.
pub struct DocTypeValidator {
    schema: jsonschema::Validator,
    origin: String,
}

impl fmt::Debug for DocTypeValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocTypeValidator")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

impl DocTypeValidator {
    /// Creates a validator using the built-in structural schema.
    pub fn new() -> SpecResult<Self> {
        let schema: Value = serde_json::from_str(BUILTIN_SCHEMA)
            .map_err(|e| SpecError::schema_load("<builtin>", e.to_string()))?;
        Self::from_schema_value("<builtin>", &schema)
    }

    /// Creates a validator from a custom JSON schema file.
    ///
    /// Fails if the file cannot be read, is not JSON, or does not compile.
    pub fn from_schema_file(path: &Path) -> SpecResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SpecError::io(path, e))?;
        let schema: Value = serde_json::from_str(&content).map_err(|e| {
            SpecError::schema_load(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;
        Self::from_schema_value(path.display().to_string(), &schema)
    }

    /// Creates a validator from an already parsed schema.
    pub fn from_schema_value(origin: impl Into<String>, schema: &Value) -> SpecResult<Self> {
        let origin = origin.into();
        let compiled = jsonschema::validator_for(schema)
            .map_err(|e| SpecError::schema_load(origin.clone(), e.to_string()))?;
        Ok(Self {
            schema: compiled,
            origin,
        })
    }

    /// Where the structural schema came from
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Validates a specification file.
    ///
    /// # Errors
    ///
    /// Returns `SpecError` only if the file is missing, unreadable, or not
    /// valid YAML. Invalid specifications yield a report with errors.
    pub fn validate_file(&self, path: &Path) -> SpecResult<ValidationReport> {
        let source = read_source(path)?;
        let file = path.display().to_string();
        Logger::event(Event::ValidationBegin, &[("file", file.as_str())]);
        let report = self.validate_str(&source)?;
        log_outcome(&file, &report);
        Ok(report)
    }

    /// Validates specification source text.
    pub fn validate_str(&self, source: &str) -> SpecResult<ValidationReport> {
        let document = parse_value(source)?;
        Ok(self.validate_value(&document))
    }

    /// Runs the layered pipeline over a parsed document.
    pub fn validate_value(&self, document: &Value) -> ValidationReport {
        let mut report = self.structural_layer(document);
        if !report.is_valid() {
            return report;
        }

        let spec = match serde_json::from_value::<SpecFile>(document.clone()) {
            Ok(file) => file.doctype,
            Err(e) => {
                report.error(Diagnostic::Structural {
                    path: "/doctype".into(),
                    message: e.to_string(),
                });
                return report;
            }
        };

        report.merge(business_layer(&spec));
        report.merge(compatibility_layer(&spec));
        report
    }

    /// Layer 1: checks the document against the structural schema.
    pub fn structural_layer(&self, document: &Value) -> ValidationReport {
        let mut report = ValidationReport::new();
        for error in self.schema.iter_errors(document) {
            report.error(Diagnostic::Structural {
                path: error.instance_path.to_string(),
                message: error.to_string(),
            });
        }
        report
    }
}

fn log_outcome(file: &str, report: &ValidationReport) {
    let errors = report.errors.len().to_string();
    let warnings = report.warnings.len().to_string();
    let fields = [("errors", errors.as_str()), ("file", file), ("warnings", warnings.as_str())];
    let event = if report.is_valid() {
        Event::ValidationPassed
    } else {
        Event::ValidationFailed
    };
    Logger::event(event, &fields);
}

/// Layer 2: naming rules and per-field checks.
pub fn business_layer(spec: &DocTypeSpec) -> ValidationReport {
    let mut report = ValidationReport::new();

    match spec.naming() {
        None => report.error(Diagnostic::InvalidNamingRule(spec.naming_rule.clone())),
        Some(NamingRule::Autoname) => {
            if !spec.autoname.starts_with(NamingRule::Autoname.pattern_prefix()) {
                report.error(Diagnostic::AutonameFormatPrefix);
            }
        }
        Some(NamingRule::ByFieldname) => match spec.autoname_field() {
            None => report.error(Diagnostic::AutonameFieldPrefix),
            Some(field) if !spec.has_field(field) => {
                report.error(Diagnostic::AutonameFieldMissing(field.to_string()))
            }
            Some(_) => {}
        },
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for (index, field) in spec.fields.iter().enumerate() {
        let fieldname = field.fieldname.as_str();

        if !is_snake_case(fieldname) {
            report.error(Diagnostic::FieldnameNotSnakeCase {
                index,
                fieldname: fieldname.to_string(),
            });
        }

        if !seen.insert(fieldname) {
            report.error(Diagnostic::DuplicateFieldname {
                index,
                fieldname: fieldname.to_string(),
            });
        }

        if is_reserved_fieldname(fieldname) {
            report.error(Diagnostic::ReservedFieldname {
                index,
                fieldname: fieldname.to_string(),
            });
        }

        let kind = field.kind();
        if kind.is_none() {
            report.error(Diagnostic::InvalidFieldtype {
                index,
                fieldtype: field.fieldtype.clone(),
            });
        }

        // Unknown types still need a label.
        let is_break = kind.is_some_and(|k| k.is_layout_break());
        let has_label = field.label.as_deref().is_some_and(|l| !l.is_empty());
        if !is_break && !has_label {
            report.error(Diagnostic::LabelRequired {
                index,
                fieldtype: field.fieldtype.clone(),
            });
        }

        if !field.has_options() {
            match kind {
                Some(FieldType::Select) => {
                    report.error(Diagnostic::SelectOptionsRequired { index })
                }
                Some(FieldType::Link) => report.error(Diagnostic::LinkOptionsRequired { index }),
                Some(FieldType::Table) => report.error(Diagnostic::TableOptionsRequired { index }),
                _ => {}
            }
        }
    }

    report
}

/// Layer 3: module, permissions and roles.
pub fn compatibility_layer(spec: &DocTypeSpec) -> ValidationReport {
    let mut report = ValidationReport::new();

    if spec.module.as_deref().map_or(true, |m| m.trim().is_empty()) {
        report.error(Diagnostic::ModuleRequired);
    }

    if spec.permissions.is_empty() {
        report.warn(Diagnostic::NoPermissions);
    }

    for (index, perm) in spec.permissions.iter().enumerate() {
        if perm.role.as_deref().map_or(true, |r| r.trim().is_empty()) {
            report.error(Diagnostic::PermissionMissingRole { index });
        }
    }

    report
}
