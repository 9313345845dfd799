//! Schema errors

use serde_yaml::Value;
use thiserror::Error;

/// Classification of a field-level failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TypeMismatch,
    EnumViolation,
    MissingRequiredSubfield,
}

/// A single front-matter field that failed validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("`{field}`: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("`{field}`: expected {expected}, found {found}")]
    EnumViolation {
        field: String,
        expected: String,
        found: String,
    },

    #[error("`{field}`: missing required field `{subfield}`")]
    MissingRequiredSubfield {
        field: String,
        subfield: &'static str,
    },
}

impl FieldError {
    pub(crate) fn type_mismatch(field: impl Into<String>, expected: &'static str, found: &Value) -> Self {
        FieldError::TypeMismatch {
            field: field.into(),
            expected,
            found: describe(found),
        }
    }

    pub(crate) fn enum_violation(field: impl Into<String>, allowed: &[&str], found: &Value) -> Self {
        let expected = allowed
            .iter()
            .map(|s| format!("{:?}", s))
            .collect::<Vec<_>>()
            .join(" or ");
        let found = match found {
            Value::String(s) => format!("{:?}", s),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            other => describe(other).to_string(),
        };
        FieldError::EnumViolation {
            field: field.into(),
            expected,
            found,
        }
    }

    /// Dotted path of the offending field, e.g. `image.src` or `authors[1]`
    pub fn field(&self) -> &str {
        match self {
            FieldError::TypeMismatch { field, .. }
            | FieldError::EnumViolation { field, .. }
            | FieldError::MissingRequiredSubfield { field, .. } => field,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FieldError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            FieldError::EnumViolation { .. } => ErrorKind::EnumViolation,
            FieldError::MissingRequiredSubfield { .. } => ErrorKind::MissingRequiredSubfield,
        }
    }
}

/// All field failures found in one front-matter block
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", .issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub struct ValidationError {
    issues: Vec<FieldError>,
}

impl ValidationError {
    pub(crate) fn new(issues: Vec<FieldError>) -> Self {
        debug_assert!(!issues.is_empty());
        Self { issues }
    }

    /// Issues in field declaration order
    pub fn issues(&self) -> &[FieldError] {
        &self.issues
    }

    /// Whether any issue is of the given kind
    pub fn has(&self, kind: ErrorKind) -> bool {
        self.issues.iter().any(|issue| issue.kind() == kind)
    }
}

/// Failures while building a schema from site configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("site default language {0:?} is not an accepted `lang` value")]
    UnsupportedDefaultLanguage(String),
}

/// Human-readable name of a YAML value's type
pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_violation_message() {
        let err = FieldError::enum_violation("dir", &["ltr", "rtl"], &Value::String("auto".into()));
        assert_eq!(err.to_string(), r#"`dir`: expected "ltr" or "rtl", found "auto""#);
        assert_eq!(err.kind(), ErrorKind::EnumViolation);
        assert_eq!(err.field(), "dir");
    }

    #[test]
    fn test_validation_error_joins_issues() {
        let err = ValidationError::new(vec![
            FieldError::type_mismatch("title", "a string", &Value::Bool(true)),
            FieldError::MissingRequiredSubfield {
                field: "image".to_string(),
                subfield: "alt",
            },
        ]);
        assert_eq!(
            err.to_string(),
            "`title`: expected a string, found a boolean; `image`: missing required field `alt`"
        );
        assert!(err.has(ErrorKind::MissingRequiredSubfield));
        assert!(!err.has(ErrorKind::EnumViolation));
    }
}
