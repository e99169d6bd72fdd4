//! Validation diagnostics and reports

use std::fmt;

/// Validation layer that produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// JSON-Schema contract
    Structural,
    /// Naming and per-field rules
    BusinessRules,
    /// Requirements of the target platform
    Compatibility,
}

impl Layer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::Structural => "structural",
            Layer::BusinessRules => "business-rules",
            Layer::Compatibility => "compatibility",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single validation finding. Field indices are zero-based positions in
/// the `fields` (or `permissions`) list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Document violates the structural schema at `path` (JSON pointer)
    Structural { path: String, message: String },

    InvalidNamingRule(String),
    AutonameFormatPrefix,
    AutonameFieldPrefix,
    /// `field:<name>` pattern names a field that does not exist
    AutonameFieldMissing(String),
    FieldnameNotSnakeCase { index: usize, fieldname: String },
    DuplicateFieldname { index: usize, fieldname: String },
    ReservedFieldname { index: usize, fieldname: String },
    InvalidFieldtype { index: usize, fieldtype: String },
    LabelRequired { index: usize, fieldtype: String },
    SelectOptionsRequired { index: usize },
    LinkOptionsRequired { index: usize },
    TableOptionsRequired { index: usize },

    ModuleRequired,
    /// Warning: only the super-privileged role could use the record type
    NoPermissions,
    PermissionMissingRole { index: usize },
}

impl Diagnostic {
    /// Layer this diagnostic belongs to
    pub fn layer(&self) -> Layer {
        match self {
            Diagnostic::Structural { .. } => Layer::Structural,
            Diagnostic::ModuleRequired
            | Diagnostic::NoPermissions
            | Diagnostic::PermissionMissingRole { .. } => Layer::Compatibility,
            _ => Layer::BusinessRules,
        }
    }

    /// Index of the offending field, for per-field diagnostics
    pub fn field_index(&self) -> Option<usize> {
        match self {
            Diagnostic::FieldnameNotSnakeCase { index, .. }
            | Diagnostic::DuplicateFieldname { index, .. }
            | Diagnostic::ReservedFieldname { index, .. }
            | Diagnostic::InvalidFieldtype { index, .. }
            | Diagnostic::LabelRequired { index, .. }
            | Diagnostic::SelectOptionsRequired { index }
            | Diagnostic::LinkOptionsRequired { index }
            | Diagnostic::TableOptionsRequired { index } => Some(*index),
            _ => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Structural { path, message } => {
                let path = if path.is_empty() { "(root)" } else { path };
                write!(f, "Schema validation failed at {}: {}", path, message)
            }
            Diagnostic::InvalidNamingRule(rule) => write!(f, "Invalid naming_rule: {}", rule),
            Diagnostic::AutonameFormatPrefix => {
                write!(f, "autoname must start with 'format:' when using autoname rule")
            }
            Diagnostic::AutonameFieldPrefix => {
                write!(f, "autoname must start with 'field:' when using by_fieldname rule")
            }
            Diagnostic::AutonameFieldMissing(field) => {
                write!(f, "autoname field '{}' not found in fields", field)
            }
            Diagnostic::FieldnameNotSnakeCase { index, fieldname } => {
                write!(f, "Field {}: fieldname '{}' must be snake_case", index, fieldname)
            }
            Diagnostic::DuplicateFieldname { index, fieldname } => {
                write!(f, "Field {}: duplicate fieldname '{}'", index, fieldname)
            }
            Diagnostic::ReservedFieldname { index, fieldname } => {
                write!(f, "Field {}: '{}' is a reserved field name", index, fieldname)
            }
            Diagnostic::InvalidFieldtype { index, fieldtype } => {
                write!(f, "Field {}: invalid fieldtype '{}'", index, fieldtype)
            }
            Diagnostic::LabelRequired { index, fieldtype } => {
                write!(f, "Field {}: label required for fieldtype '{}'", index, fieldtype)
            }
            Diagnostic::SelectOptionsRequired { index } => {
                write!(f, "Field {}: options required for Select field", index)
            }
            Diagnostic::LinkOptionsRequired { index } => {
                write!(f, "Field {}: options (target DocType) required for Link field", index)
            }
            Diagnostic::TableOptionsRequired { index } => {
                write!(f, "Field {}: options (child DocType) required for Table field", index)
            }
            Diagnostic::ModuleRequired => write!(f, "module is required"),
            Diagnostic::NoPermissions => write!(
                f,
                "No permissions defined - DocType will only be accessible to System Manager"
            ),
            Diagnostic::PermissionMissingRole { index } => {
                write!(f, "Permission {}: missing 'role' field", index)
            }
        }
    }
}

/// Errors and warnings from one or more validation layers.
///
/// Errors block loading; warnings do not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&mut self, diagnostic: Diagnostic) {
        self.errors.push(diagnostic);
    }

    pub fn warn(&mut self, diagnostic: Diagnostic) {
        self.warnings.push(diagnostic);
    }

    /// Appends another layer's findings, preserving order.
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers() {
        assert_eq!(Diagnostic::ModuleRequired.layer(), Layer::Compatibility);
        assert_eq!(Diagnostic::AutonameFormatPrefix.layer(), Layer::BusinessRules);
        assert_eq!(
            Diagnostic::Structural { path: "/doctype".into(), message: "x".into() }.layer(),
            Layer::Structural
        );
    }

    #[test]
    fn test_messages_cite_index() {
        let d = Diagnostic::FieldnameNotSnakeCase { index: 3, fieldname: "ProviderName".into() };
        assert_eq!(d.to_string(), "Field 3: fieldname 'ProviderName' must be snake_case");
        assert_eq!(d.field_index(), Some(3));
        assert_eq!(Diagnostic::ModuleRequired.field_index(), None);
    }

    #[test]
    fn test_structural_root_path() {
        let d = Diagnostic::Structural {
            path: String::new(),
            message: "\"doctype\" is a required property".into(),
        };
        assert!(d.to_string().contains("(root)"));
    }

    #[test]
    fn test_merge_keeps_order() {
        let mut a = ValidationReport::new();
        a.error(Diagnostic::AutonameFieldPrefix);
        let mut b = ValidationReport::new();
        b.error(Diagnostic::ModuleRequired);
        b.warn(Diagnostic::NoPermissions);

        a.merge(b);
        assert_eq!(a.errors, vec![Diagnostic::AutonameFieldPrefix, Diagnostic::ModuleRequired]);
        assert_eq!(a.warnings, vec![Diagnostic::NoPermissions]);
        assert!(!a.is_valid());
    }
}
