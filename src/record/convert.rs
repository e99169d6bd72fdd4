//! Specification-to-record conversion
//!
//! Fields and permissions are converted asymmetrically:
//! - field attributes are copied only when present, booleans become 0/1;
//! - permission flags are always emitted, absent flags become 0.

use serde_json::Value;

use super::types::{
    DocFieldRecord, DocPermRecord, DocTypeRecord, BY_FIELDNAME_MARKER, DOCTYPE_KIND,
};
use crate::spec::{DocTypeSpec, FieldSpec, NamingRule, PermissionSpec};

fn bit(value: bool) -> u8 {
    u8::from(value)
}

fn flag(value: Option<bool>) -> Option<u8> {
    value.map(bit)
}

/// Booleans become 0/1; every other value is passed through.
fn int_if_bool(value: &Value) -> Value {
    match value {
        Value::Bool(b) => Value::from(bit(*b)),
        other => other.clone(),
    }
}

impl From<&DocTypeSpec> for DocTypeRecord {
    fn from(spec: &DocTypeSpec) -> Self {
        let (autoname, naming_rule) = match spec.naming() {
            Some(NamingRule::Autoname) => (Some(spec.autoname.clone()), None),
            Some(NamingRule::ByFieldname) => (
                Some(spec.autoname.clone()),
                Some(BY_FIELDNAME_MARKER.to_string()),
            ),
            None => (None, None),
        };

        Self {
            doctype: DOCTYPE_KIND.to_string(),
            name: spec.name.clone(),
            module: spec.module.clone(),
            custom: 0,
            is_submittable: bit(spec.is_submittable.unwrap_or(false)),
            track_changes: bit(spec.track_changes.unwrap_or(true)),
            is_tree: bit(spec.is_tree.unwrap_or(false)),
            autoname,
            naming_rule,
            title_field: spec.title_field.clone(),
            description: spec.description.clone(),
            fields: spec.fields.iter().map(DocFieldRecord::from).collect(),
            permissions: spec.permissions.iter().map(DocPermRecord::from).collect(),
        }
    }
}

impl From<&FieldSpec> for DocFieldRecord {
    fn from(spec: &FieldSpec) -> Self {
        Self {
            fieldname: spec.fieldname.clone(),
            fieldtype: spec.fieldtype.clone(),
            label: spec.label.clone(),
            reqd: flag(spec.reqd),
            unique: flag(spec.unique),
            read_only: flag(spec.read_only),
            hidden: flag(spec.hidden),
            in_list_view: flag(spec.in_list_view),
            in_standard_filter: flag(spec.in_standard_filter),
            default: spec.default.as_ref().map(int_if_bool),
            description: spec.description.clone(),
            options: spec.options.clone(),
            length: spec.length,
            precision: spec.precision,
            fetch_from: spec.fetch_from.clone(),
        }
    }
}

impl From<&PermissionSpec> for DocPermRecord {
    fn from(spec: &PermissionSpec) -> Self {
        let set = |v: Option<bool>| bit(v.unwrap_or(false));
        Self {
            role: spec.role.clone().unwrap_or_default(),
            read: set(spec.read),
            write: set(spec.write),
            create: set(spec.create),
            delete: set(spec.delete),
            submit: set(spec.submit),
            cancel: set(spec.cancel),
            amend: set(spec.amend),
        }
    }
}
