use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kind of failure recorded in a validation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required field was absent from the input.
    MissingField,
    /// The raw value could not be coerced to the field's semantic type.
    TypeCoercion,
    /// A timestamp string did not match the accepted format.
    TimestampParse,
    /// A value was not a member of the field's declared enum labels.
    EnumMembership,
    /// A string or list length fell outside its bounds.
    Length,
    /// A numeric value fell outside its inclusive bounds.
    Range,
    /// A string did not start with its required literal prefix.
    Prefix,
    /// A custom predicate constraint rejected the value.
    Predicate,
    /// A business rule rejected the fully-coerced record.
    Rule,
}

impl ErrorKind {
    /// Field-level kinds aggregate across sibling fields; rule errors are
    /// reported fail-fast.
    pub fn is_field_error(&self) -> bool {
        !matches!(self, ErrorKind::Rule)
    }
}

/// A single validation failure with its location in the record tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationError {
    /// Dotted, index-qualified path, e.g. `crew[1].years_experience`.
    /// For rule errors this is the rule name, prefix-qualified when nested.
    pub path: String,
    pub message: String,
    pub kind: ErrorKind,
}

impl ValidationError {
    pub fn new(kind: ErrorKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Ordered collection of failures from one validation attempt.
///
/// Empty means success; the engine never returns an empty report as an
/// error. Entries appear in field declaration order, nested paths
/// depth-first, with at most one rule error at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Returns true when there are no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error entry.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Merge a sub-report into this one, preserving its entry order.
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
    }

    /// First entry, for callers that surface only one message.
    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_preserves_order() {
        let mut report = ValidationReport::default();
        report.push(ValidationError::new(
            ErrorKind::Range,
            "crew_size",
            "value 25 is greater than maximum 20",
        ));

        let mut nested = ValidationReport::default();
        nested.push(ValidationError::new(
            ErrorKind::MissingField,
            "crew[0].age",
            "required field is missing",
        ));
        report.merge(nested);

        assert_eq!(report.len(), 2);
        assert_eq!(report.first().map(|e| e.path.as_str()), Some("crew_size"));
        assert_eq!(report.errors[1].path, "crew[0].age");
    }

    #[test]
    fn rule_kind_is_not_a_field_error() {
        assert!(ErrorKind::Range.is_field_error());
        assert!(!ErrorKind::Rule.is_field_error());
    }

    #[test]
    fn errors_display_as_path_and_message() {
        let error = ValidationError::new(
            ErrorKind::Prefix,
            "contact_id",
            "value must start with 'AC'",
        );
        assert_eq!(error.to_string(), "contact_id: value must start with 'AC'");
    }
}
