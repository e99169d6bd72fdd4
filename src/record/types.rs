//! Record-definition types in the shape the record store expects
//!
//! Flags are encoded as integers (0/1). Optional attributes that were absent
//! in the specification are absent here too, and are omitted when
//! serialized.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::spec::{FieldType, OPTIONAL_FIELD_ATTRIBUTES};

/// Record kind under which record-type definitions are stored
pub const DOCTYPE_KIND: &str = "DocType";

/// `naming_rule` value set for field-based naming
pub const BY_FIELDNAME_MARKER: &str = "By fieldname";

/// A record-type definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocTypeRecord {
    /// Always [`DOCTYPE_KIND`]
    pub doctype: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// Always 0: definitions loaded from specifications are standard
    pub custom: u8,
    pub is_submittable: u8,
    pub track_changes: u8,
    pub is_tree: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoname: Option<String>,

    /// Set to [`BY_FIELDNAME_MARKER`] for field-based naming only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub naming_rule: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_field: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub fields: Vec<DocFieldRecord>,
    pub permissions: Vec<DocPermRecord>,
}

impl DocTypeRecord {
    /// Renders the nested dictionary handed to the store.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// Record types this definition links to through Link or Table fields.
    pub fn referenced_doctypes(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| FieldType::parse(&f.fieldtype).is_some_and(|t| t.references_doctype()))
            .filter_map(|f| f.options.as_deref())
    }
}

/// A field row of a record-type definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocFieldRecord {
    pub fieldname: String,
    pub fieldtype: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reqd: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_list_view: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_standard_filter: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_from: Option<String>,
}

impl DocFieldRecord {
    /// Names of the optional attributes present on this row.
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

/// A permission row. All seven flags are always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocPermRecord {
    pub role: String,
    pub read: u8,
    pub write: u8,
    pub create: u8,
    pub delete: u8,
    pub submit: u8,
    pub cancel: u8,
    pub amend: u8,
}
