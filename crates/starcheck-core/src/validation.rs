use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::schema::{Constraint, FieldDescriptor, FieldType, Schema};
use crate::value::TypedValue;

/// Validate internal consistency of a schema before use.
///
/// This checks, recursively through nested schemas:
/// - duplicate field names
/// - enum fields declare a non-empty, duplicate-free label set
/// - constraints apply to their field's semantic type
/// - defaults are type-compatible with their field
pub fn check_schema(schema: &Schema) -> Result<()> {
    let mut names = BTreeSet::new();

    for field in &schema.fields {
        if !names.insert(field.name.as_str()) {
            return Err(Error::InvalidSchema(format!(
                "duplicate field name: {}.{}",
                schema.name, field.name
            )));
        }

        check_field(schema, field)?;

        match &field.field_type {
            FieldType::Object(nested) | FieldType::List(nested) => check_schema(nested)?,
            _ => {}
        }
    }

    Ok(())
}

fn check_field(schema: &Schema, field: &FieldDescriptor) -> Result<()> {
    if let FieldType::Enum(labels) = &field.field_type {
        if labels.is_empty() {
            return Err(Error::InvalidSchema(format!(
                "enum field has no labels: {}.{}",
                schema.name, field.name
            )));
        }
        let unique: BTreeSet<&str> = labels.iter().map(String::as_str).collect();
        if unique.len() != labels.len() {
            return Err(Error::InvalidSchema(format!(
                "enum field has duplicate labels: {}.{}",
                schema.name, field.name
            )));
        }
    }

    for constraint in &field.constraints {
        if !constraint_applies(constraint, &field.field_type) {
            return Err(Error::InvalidSchema(format!(
                "constraint {} does not apply to {} field {}.{}",
                constraint_name(constraint),
                field.field_type.name(),
                schema.name,
                field.name
            )));
        }
    }

    if let Some(default) = &field.default
        && !default_compatible(default, &field.field_type)
    {
        return Err(Error::InvalidSchema(format!(
            "default value does not match {} field {}.{}",
            field.field_type.name(),
            schema.name,
            field.name
        )));
    }

    Ok(())
}

fn constraint_applies(constraint: &Constraint, field_type: &FieldType) -> bool {
    match constraint {
        Constraint::MinLength(_) | Constraint::MaxLength(_) => matches!(
            field_type,
            FieldType::String | FieldType::Enum(_) | FieldType::List(_)
        ),
        Constraint::MinValue(_) | Constraint::MaxValue(_) => {
            matches!(field_type, FieldType::Integer | FieldType::Float)
        }
        Constraint::Prefix(_) => matches!(field_type, FieldType::String),
        Constraint::Predicate { .. } => true,
    }
}

fn constraint_name(constraint: &Constraint) -> &'static str {
    match constraint {
        Constraint::MinLength(_) => "min_length",
        Constraint::MaxLength(_) => "max_length",
        Constraint::MinValue(_) => "min_value",
        Constraint::MaxValue(_) => "max_value",
        Constraint::Prefix(_) => "prefix",
        Constraint::Predicate { .. } => "predicate",
    }
}

fn default_compatible(default: &TypedValue, field_type: &FieldType) -> bool {
    match (default, field_type) {
        (TypedValue::Str(_), FieldType::String) => true,
        (TypedValue::Int(_), FieldType::Integer) => true,
        (TypedValue::Float(_) | TypedValue::Int(_), FieldType::Float) => true,
        (TypedValue::Bool(_), FieldType::Boolean) => true,
        (TypedValue::Timestamp(_), FieldType::Timestamp) => true,
        (TypedValue::Enum(label), FieldType::Enum(labels)) => labels.contains(label),
        _ => false,
    }
}
