//! Reading specification sources from disk or memory

use std::fs;
use std::path::Path;

use serde_json::Value;

use super::errors::{SpecError, SpecResult};
use super::types::SpecFile;

/// Reads a specification file as UTF-8 text.
pub fn read_source(path: &Path) -> SpecResult<String> {
    fs::read_to_string(path).map_err(|e| SpecError::io(path, e))
}

/// Parses YAML into an untyped JSON value for structural validation.
///
/// An empty document parses to `null`.
pub fn parse_value(source: &str) -> SpecResult<Value> {
    if source.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_yaml::from_str(source)?)
}

/// Parses YAML straight into the typed document, skipping validation.
pub fn parse_spec(source: &str) -> SpecResult<SpecFile> {
    Ok(serde_yaml::from_str(source)?)
}

/// Reads and parses a specification file into the typed document.
pub fn load_spec_file(path: &Path) -> SpecResult<SpecFile> {
    parse_spec(&read_source(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_value_empty_is_null() {
        assert_eq!(parse_value("").unwrap(), Value::Null);
        assert_eq!(parse_value("  \n").unwrap(), Value::Null);
    }

    #[test]
    fn test_parse_value_nested() {
        let value = parse_value("doctype:\n  name: Branch\n  fields: []\n").unwrap();
        assert_eq!(value["doctype"]["name"], "Branch");
        assert!(value["doctype"]["fields"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_parse_spec_missing_key_is_yaml_error() {
        let err = parse_spec("doctype:\n  module: M\n").unwrap_err();
        assert!(matches!(err, SpecError::Yaml(_)));
    }

    #[test]
    fn test_load_spec_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "doctype:\n  name: Branch\n  naming_rule: autoname\n  autoname: \"format:BR-{{####}}\"\n  fields: []"
        )
        .unwrap();

        let spec = load_spec_file(file.path()).unwrap();
        assert_eq!(spec.doctype.name, "Branch");
        assert_eq!(spec.doctype.autoname, "format:BR-{####}");
    }

    #[test]
    fn test_missing_file() {
        let err = load_spec_file(Path::new("/nonexistent/spec.yaml")).unwrap_err();
        assert!(err.is_io());
    }
}
