use serde_json::Value;
use tracing::debug;

use starcheck_core::{
    ErrorKind, FieldPath, Record, Schema, ValidationError, ValidationReport,
};

use crate::coerce::{coerce_field, json_type_name};

/// Validate raw input against a schema.
///
/// Returns the fully-coerced record when every field and every business
/// rule passes, or the ordered report of failures otherwise. Validation is
/// a pure function of its input: the same schema and raw value always
/// produce the same outcome.
pub fn validate(schema: &Schema, raw: &Value) -> Result<Record, ValidationReport> {
    validate_at(schema, raw, &FieldPath::root())
}

/// Recursive entry point threading the path prefix through nested schemas
/// and list elements.
pub(crate) fn validate_at(
    schema: &Schema,
    raw: &Value,
    prefix: &FieldPath,
) -> Result<Record, ValidationReport> {
    let mut report = ValidationReport::default();

    let Some(map) = raw.as_object() else {
        let path = if prefix.is_root() {
            schema.name.clone()
        } else {
            prefix.render()
        };
        report.push(ValidationError::new(
            ErrorKind::TypeCoercion,
            path,
            format!("expected an object, got {}", json_type_name(raw)),
        ));
        return Err(report);
    };

    // Field phase: every field is evaluated in declaration order; a failing
    // field never stops its siblings. Unknown input keys are ignored.
    let mut record = Record::new();
    for descriptor in &schema.fields {
        let path = prefix.child(&descriptor.name);
        if let Some(value) = coerce_field(descriptor, map.get(&descriptor.name), &path, &mut report)
        {
            record.insert(descriptor.name.clone(), value);
        }
    }

    if !report.is_ok() {
        debug!(schema = %schema.name, errors = report.len(), "field phase failed");
        return Err(report);
    }

    // Rule phase: declaration order, fail-fast. Later rules may assume
    // earlier ones held.
    for rule in &schema.rules {
        if let Err(message) = (rule.predicate)(&record) {
            debug!(schema = %schema.name, rule = %rule.name, "business rule failed");
            report.push(ValidationError::new(
                ErrorKind::Rule,
                prefix.child(&rule.name).render(),
                message,
            ));
            return Err(report);
        }
    }

    Ok(record)
}
