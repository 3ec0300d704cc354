//! Validation of imported bang files
//!
//! An import is accepted only when it is declared as JSON and its body is a
//! flat object of string keys to string values. Every other shape is reported
//! as an [`ImportRejection`] rather than an error, so the caller can show a
//! notice and leave its state untouched.

use crate::mapping::BangMapping;
use crate::transfer::ImportFile;
use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

/// The only content type an import file may declare
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Why an import candidate was not promoted to a mapping
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportRejection {
    /// Declared content type is not JSON
    #[error("expected content type 'application/json', found '{0}'")]
    WrongContentType(String),

    /// Body is not valid JSON
    #[error("malformed JSON: {0}")]
    Malformed(String),

    /// Body parsed, but the top-level value is not an object
    #[error("top-level value is {0}, expected an object")]
    NotAnObject(&'static str),

    /// A value in the object is not a string
    #[error("value for '{key}' is {found}, expected a string")]
    NonStringValue { key: String, found: &'static str },
}

/// Validate an import file, returning the mapping it describes
pub fn validate(file: &ImportFile) -> std::result::Result<BangMapping, ImportRejection> {
    if !is_json_content_type(&file.content_type) {
        return Err(ImportRejection::WrongContentType(file.content_type.clone()));
    }
    validate_json(&file.body)
}

/// Validate a JSON body without checking a declared content type
pub fn validate_json(body: &str) -> std::result::Result<BangMapping, ImportRejection> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ImportRejection::Malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(ImportRejection::NotAnObject(kind_of(&value)));
    }

    // Parse a second time into an ordered map so the file's key order survives
    let object: IndexMap<String, Value> =
        serde_json::from_str(body).map_err(|e| ImportRejection::Malformed(e.to_string()))?;

    let mut mapping = BangMapping::new();
    for (key, value) in object {
        match value {
            Value::String(url) => {
                mapping.insert(key, url);
            }
            other => {
                return Err(ImportRejection::NonStringValue {
                    key,
                    found: kind_of(&other),
                })
            }
        }
    }
    Ok(mapping)
}

fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case(JSON_CONTENT_TYPE)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_file(body: &str) -> ImportFile {
        ImportFile::new(JSON_CONTENT_TYPE, body)
    }

    #[test]
    fn test_accepts_flat_string_object() {
        let mapping = validate(&json_file(r#"{"g":"https://google.com?q=%s","w":"https://en.wikipedia.org/w/index.php?search=%s"}"#)).unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.shortcuts().collect::<Vec<_>>(), vec!["g", "w"]);
    }

    #[test]
    fn test_accepts_empty_object() {
        assert!(validate(&json_file("{}")).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_wrong_content_type() {
        let file = ImportFile::new("text/plain", r#"{"g":"https://google.com?q=%s"}"#);
        assert_eq!(
            validate(&file),
            Err(ImportRejection::WrongContentType("text/plain".to_string()))
        );
    }

    #[test]
    fn test_content_type_parameters_ignored() {
        let file = ImportFile::new("Application/JSON; charset=utf-8", r#"{"g":"x"}"#);
        assert!(validate(&file).is_ok());
    }

    #[test]
    fn test_rejects_number_value() {
        assert_eq!(
            validate(&json_file(r#"{"a": 1}"#)),
            Err(ImportRejection::NonStringValue {
                key: "a".to_string(),
                found: "a number"
            })
        );
    }

    #[test]
    fn test_rejects_nested_values() {
        for body in [r#"{"a": {"b": "c"}}"#, r#"{"a": ["x"]}"#, r#"{"a": true}"#, r#"{"a": null}"#] {
            assert!(
                matches!(validate(&json_file(body)), Err(ImportRejection::NonStringValue { .. })),
                "accepted {body}"
            );
        }
    }

    #[test]
    fn test_rejects_non_object() {
        assert_eq!(
            validate(&json_file(r#"["a", "b"]"#)),
            Err(ImportRejection::NotAnObject("an array"))
        );
        assert_eq!(
            validate(&json_file(r#""just a string""#)),
            Err(ImportRejection::NotAnObject("a string"))
        );
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            validate(&json_file(r#"{"a": "b""#)),
            Err(ImportRejection::Malformed(_))
        ));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let mapping = validate(&json_file(r#"{"a":"1","b":"2","a":"3"}"#)).unwrap();
        assert_eq!(mapping.shortcuts().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(mapping.get("a"), Some("3"));
    }
}
