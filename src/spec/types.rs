//! Specification document types
//!
//! A specification file is a YAML document with a single `doctype` key:
//!
//! ```yaml
//! doctype:
//!   name: Service Provider
//!   module: Nursing Management
//!   naming_rule: by_fieldname
//!   autoname: "field:hp_number"
//!   fields:
//!     - fieldname: hp_number
//!       fieldtype: Data
//!       label: HP Number
//!       reqd: true
//!   permissions:
//!     - role: System Manager
//!       read: true
//! ```
//!
//! `naming_rule` and `fieldtype` are kept as raw text so that unsupported
//! values surface as business-rule diagnostics instead of parse failures.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// System-level field names a specification may not redefine.
pub const RESERVED_FIELDS: &[&str] = &[
    "name",
    "owner",
    "creation",
    "modified",
    "modified_by",
    "docstatus",
    "idx",
    "parent",
    "parentfield",
    "parenttype",
    "_user_tags",
    "_comments",
    "_assign",
    "_liked_by",
];

/// Optional field attributes, in the order they are emitted.
pub const OPTIONAL_FIELD_ATTRIBUTES: [&str; 13] = [
    "label",
    "reqd",
    "unique",
    "read_only",
    "hidden",
    "in_list_view",
    "in_standard_filter",
    "default",
    "description",
    "options",
    "length",
    "precision",
    "fetch_from",
];

/// Returns true if `fieldname` is reserved by the platform.
pub fn is_reserved_fieldname(fieldname: &str) -> bool {
    RESERVED_FIELDS.contains(&fieldname)
}

/// Strategy for generating a new record's identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamingRule {
    /// Formatted counter, pattern `format:PREFIX-{#####}`
    Autoname,
    /// Copied from a field value, pattern `field:<fieldname>`
    ByFieldname,
}

impl NamingRule {
    pub const ALL: [NamingRule; 2] = [NamingRule::Autoname, NamingRule::ByFieldname];

    /// Parses the YAML spelling of a naming rule.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.as_str() == s)
    }

    /// Returns the YAML spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            NamingRule::Autoname => "autoname",
            NamingRule::ByFieldname => "by_fieldname",
        }
    }

    /// Prefix the `autoname` pattern must carry under this rule
    pub fn pattern_prefix(&self) -> &'static str {
        match self {
            NamingRule::Autoname => "format:",
            NamingRule::ByFieldname => "field:",
        }
    }
}

/// Supported field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Data,
    Text,
    TextEditor,
    SmallText,
    Select,
    Link,
    Date,
    Datetime,
    Int,
    Float,
    Check,
    Attach,
    SectionBreak,
    ColumnBreak,
    Table,
}

impl FieldType {
    pub const ALL: [FieldType; 15] = [
        FieldType::Data,
        FieldType::Text,
        FieldType::TextEditor,
        FieldType::SmallText,
        FieldType::Select,
        FieldType::Link,
        FieldType::Date,
        FieldType::Datetime,
        FieldType::Int,
        FieldType::Float,
        FieldType::Check,
        FieldType::Attach,
        FieldType::SectionBreak,
        FieldType::ColumnBreak,
        FieldType::Table,
    ];

    /// Parses the platform spelling of a field type ("Section Break", ...).
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ft| ft.as_str() == s)
    }

    /// Returns the platform spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Data => "Data",
            FieldType::Text => "Text",
            FieldType::TextEditor => "Text Editor",
            FieldType::SmallText => "Small Text",
            FieldType::Select => "Select",
            FieldType::Link => "Link",
            FieldType::Date => "Date",
            FieldType::Datetime => "Datetime",
            FieldType::Int => "Int",
            FieldType::Float => "Float",
            FieldType::Check => "Check",
            FieldType::Attach => "Attach",
            FieldType::SectionBreak => "Section Break",
            FieldType::ColumnBreak => "Column Break",
            FieldType::Table => "Table",
        }
    }

    /// Layout-only types carry no data and need no label.
    pub fn is_layout_break(&self) -> bool {
        matches!(self, FieldType::SectionBreak | FieldType::ColumnBreak)
    }

    /// Types whose `options` names another record type.
    pub fn references_doctype(&self) -> bool {
        matches!(self, FieldType::Link | FieldType::Table)
    }
}

/// Root of a specification file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecFile {
    pub doctype: DocTypeSpec,
}

/// A record type definition as written by the author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocTypeSpec {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    pub naming_rule: String,

    /// Naming pattern, prefixed according to `naming_rule`
    pub autoname: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_submittable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_changes: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_tree: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_field: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Layout order is significant
    pub fields: Vec<FieldSpec>,

    #[serde(default)]
    pub permissions: Vec<PermissionSpec>,
}

impl DocTypeSpec {
    /// Creates a specification with no fields or permissions.
    pub fn new(
        name: impl Into<String>,
        naming_rule: NamingRule,
        autoname: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            module: None,
            naming_rule: naming_rule.as_str().to_string(),
            autoname: autoname.into(),
            is_submittable: None,
            track_changes: None,
            is_tree: None,
            title_field: None,
            description: None,
            fields: Vec::new(),
            permissions: Vec::new(),
        }
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_permission(mut self, permission: PermissionSpec) -> Self {
        self.permissions.push(permission);
        self
    }

    /// Parsed naming rule, `None` if unsupported.
    pub fn naming(&self) -> Option<NamingRule> {
        NamingRule::parse(&self.naming_rule)
    }

    /// Field named by a `field:` pattern, if the pattern has that prefix.
    pub fn autoname_field(&self) -> Option<&str> {
        self.autoname
            .strip_prefix(NamingRule::ByFieldname.pattern_prefix())
    }

    pub fn has_field(&self, fieldname: &str) -> bool {
        self.fields.iter().any(|f| f.fieldname == fieldname)
    }
}

/// One attribute (or layout marker) of a record type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub fieldname: String,
    pub fieldtype: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Mandatory field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reqd: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_list_view: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_standard_filter: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Choice list for Select, target record type for Link and Table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u8>,

    /// Cross-reference expression, e.g. `supplier.supplier_name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_from: Option<String>,
}

impl FieldSpec {
    /// Creates a field with only the mandatory attributes set.
    pub fn new(fieldname: impl Into<String>, fieldtype: impl Into<String>) -> Self {
        Self {
            fieldname: fieldname.into(),
            fieldtype: fieldtype.into(),
            label: None,
            reqd: None,
            unique: None,
            read_only: None,
            hidden: None,
            in_list_view: None,
            in_standard_filter: None,
            default: None,
            description: None,
            options: None,
            length: None,
            precision: None,
            fetch_from: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_options(mut self, options: impl Into<String>) -> Self {
        self.options = Some(options.into());
        self
    }

    /// Parsed field type, `None` if unsupported.
    pub fn kind(&self) -> Option<FieldType> {
        FieldType::parse(&self.fieldtype)
    }

    /// True when `options` is present and not blank.
    pub fn has_options(&self) -> bool {
        self.options.as_deref().is_some_and(|o| !o.trim().is_empty())
    }

    /// Names of the optional attributes set on this field.
    pub fn present_attributes(&self) -> Vec<&'static str> {
        let present = [
            self.label.is_some(),
            self.reqd.is_some(),
            self.unique.is_some(),
            self.read_only.is_some(),
            self.hidden.is_some(),
            self.in_list_view.is_some(),
            self.in_standard_filter.is_some(),
            self.default.is_some(),
            self.description.is_some(),
            self.options.is_some(),
            self.length.is_some(),
            self.precision.is_some(),
            self.fetch_from.is_some(),
        ];
        OPTIONAL_FIELD_ATTRIBUTES
            .into_iter()
            .zip(present)
            .filter_map(|(attr, set)| set.then_some(attr))
            .collect()
    }
}

/// Capabilities granted to one role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amend: Option<bool>,
}

impl PermissionSpec {
    /// Permission row for `role` with no capabilities set.
    pub fn for_role(role: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            ..Self::default()
        }
    }

    /// Read/write/create, the usual grant for data-entry roles.
    pub fn read_write(role: impl Into<String>) -> Self {
        Self {
            read: Some(true),
            write: Some(true),
            create: Some(true),
            ..Self::for_role(role)
        }
    }
}
