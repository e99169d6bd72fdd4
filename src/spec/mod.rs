//! DocType specifications: data model, parsing and validation
//!
//! A specification is parsed once per invocation, validated, converted into
//! a record definition and then discarded. Only the derived definition is
//! persisted.

mod diagnostics;
mod errors;
mod source;
mod types;
mod validator;

pub use diagnostics::{Diagnostic, Layer, ValidationReport};
pub use errors::{SpecError, SpecResult};
pub use source::{load_spec_file, parse_spec, parse_value, read_source};
pub use types::{
    is_reserved_fieldname, DocTypeSpec, FieldSpec, FieldType, NamingRule, PermissionSpec,
    SpecFile, OPTIONAL_FIELD_ATTRIBUTES, RESERVED_FIELDS,
};
pub use validator::{
    business_layer, compatibility_layer, is_snake_case, DocTypeValidator, BUILTIN_SCHEMA,
    FIELDNAME_PATTERN,
};
