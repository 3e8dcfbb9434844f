use serde_json::Value;

use starcheck_core::{
    Constraint, ErrorKind, FieldDescriptor, FieldPath, FieldType, Schema, TypedValue,
    ValidationError, ValidationReport,
};

use crate::timestamp::parse_timestamp;

/// Coerce one raw field and run its constraint chain.
///
/// Errors are pushed onto `report` under `path`; `None` means the field
/// failed and the candidate cannot be promoted. Failures here never stop
/// evaluation of sibling fields.
pub(crate) fn coerce_field(
    descriptor: &FieldDescriptor,
    raw: Option<&Value>,
    path: &FieldPath,
    report: &mut ValidationReport,
) -> Option<TypedValue> {
    let raw = match raw {
        Some(value) if !value.is_null() => value,
        _ => {
            if descriptor.required {
                report.push(ValidationError::new(
                    ErrorKind::MissingField,
                    path.render(),
                    "required field is missing",
                ));
                return None;
            }
            // Declared defaults are trusted; constraints do not run on them.
            return Some(descriptor.default.clone().unwrap_or(TypedValue::Absent));
        }
    };

    let value = match &descriptor.field_type {
        FieldType::Object(nested) => match crate::engine::validate_at(nested, raw, path) {
            Ok(record) => TypedValue::Object(record),
            Err(sub_report) => {
                report.merge(sub_report);
                return None;
            }
        },
        FieldType::List(item_schema) => coerce_list(descriptor, item_schema, raw, path, report)?,
        scalar => match coerce_scalar(scalar, raw) {
            Ok(value) => value,
            Err((kind, message)) => {
                report.push(ValidationError::new(kind, path.render(), message));
                return None;
            }
        },
    };

    // Item-count bounds for lists were consumed before element validation.
    let skip_count_bounds = matches!(descriptor.field_type, FieldType::List(_));

    for constraint in &descriptor.constraints {
        if skip_count_bounds
            && matches!(
                constraint,
                Constraint::MinLength(_) | Constraint::MaxLength(_)
            )
        {
            continue;
        }
        if let Err((kind, message)) = evaluate_constraint(constraint, &value) {
            report.push(ValidationError::new(kind, path.render(), message));
            return None;
        }
    }

    Some(value)
}

fn coerce_scalar(
    field_type: &FieldType,
    raw: &Value,
) -> Result<TypedValue, (ErrorKind, String)> {
    match field_type {
        FieldType::String => raw
            .as_str()
            .map(|text| TypedValue::Str(text.to_string()))
            .ok_or_else(|| type_error("a string", raw)),
        FieldType::Integer => coerce_integer(raw),
        FieldType::Float => coerce_float(raw),
        FieldType::Boolean => raw
            .as_bool()
            .map(TypedValue::Bool)
            .ok_or_else(|| type_error("a boolean", raw)),
        FieldType::Timestamp => coerce_timestamp(raw),
        FieldType::Enum(labels) => coerce_enum(labels, raw),
        FieldType::Object(_) | FieldType::List(_) => Err(type_error("an object", raw)),
    }
}

fn coerce_integer(raw: &Value) -> Result<TypedValue, (ErrorKind, String)> {
    match raw {
        Value::Number(number) => number.as_i64().map(TypedValue::Int).ok_or_else(|| {
            (
                ErrorKind::TypeCoercion,
                format!("number {number} is not a representable integer"),
            )
        }),
        Value::String(text) => text.trim().parse::<i64>().map(TypedValue::Int).map_err(|_| {
            (
                ErrorKind::TypeCoercion,
                format!("cannot parse '{text}' as an integer"),
            )
        }),
        other => Err(type_error("an integer", other)),
    }
}

fn coerce_float(raw: &Value) -> Result<TypedValue, (ErrorKind, String)> {
    match raw {
        Value::Number(number) => number
            .as_f64()
            .filter(|value| value.is_finite())
            .map(TypedValue::Float)
            .ok_or_else(|| {
                (
                    ErrorKind::TypeCoercion,
                    format!("number {number} is not a representable float"),
                )
            }),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(TypedValue::Float)
            .ok_or_else(|| {
                (
                    ErrorKind::TypeCoercion,
                    format!("cannot parse '{text}' as a number"),
                )
            }),
        other => Err(type_error("a number", other)),
    }
}

fn coerce_timestamp(raw: &Value) -> Result<TypedValue, (ErrorKind, String)> {
    let text = raw
        .as_str()
        .ok_or_else(|| type_error("a timestamp string", raw))?;
    parse_timestamp(text)
        .map(TypedValue::Timestamp)
        .map_err(|_| {
            (
                ErrorKind::TimestampParse,
                format!("invalid timestamp '{text}', expected YYYY-MM-DDTHH:MM:SS"),
            )
        })
}

fn coerce_enum(labels: &[String], raw: &Value) -> Result<TypedValue, (ErrorKind, String)> {
    let text = raw.as_str().ok_or_else(|| type_error("a string", raw))?;
    if labels.iter().any(|label| label == text) {
        Ok(TypedValue::Enum(text.to_string()))
    } else {
        Err((
            ErrorKind::EnumMembership,
            format!("'{text}' is not one of: {}", labels.join(", ")),
        ))
    }
}

/// Validate a list field: the item-count bounds are checked before any
/// element, and a count failure skips element validation entirely.
fn coerce_list(
    descriptor: &FieldDescriptor,
    item_schema: &Schema,
    raw: &Value,
    path: &FieldPath,
    report: &mut ValidationReport,
) -> Option<TypedValue> {
    let Some(items) = raw.as_array() else {
        let (kind, message) = type_error("a list", raw);
        report.push(ValidationError::new(kind, path.render(), message));
        return None;
    };

    for constraint in &descriptor.constraints {
        let failure = match constraint {
            Constraint::MinLength(min) if items.len() < *min => Some(format!(
                "length {} is less than minimum {min}",
                items.len()
            )),
            Constraint::MaxLength(max) if items.len() > *max => Some(format!(
                "length {} is greater than maximum {max}",
                items.len()
            )),
            _ => None,
        };
        if let Some(message) = failure {
            report.push(ValidationError::new(ErrorKind::Length, path.render(), message));
            return None;
        }
    }

    let mut values = Vec::with_capacity(items.len());
    let mut failed = false;
    for (idx, item) in items.iter().enumerate() {
        match crate::engine::validate_at(item_schema, item, &path.index(idx)) {
            Ok(record) => values.push(TypedValue::Object(record)),
            Err(sub_report) => {
                report.merge(sub_report);
                failed = true;
            }
        }
    }

    if failed {
        None
    } else {
        Some(TypedValue::List(values))
    }
}

/// Evaluate a single constraint against an already-coerced value.
fn evaluate_constraint(
    constraint: &Constraint,
    value: &TypedValue,
) -> Result<(), (ErrorKind, String)> {
    match constraint {
        Constraint::MinLength(min) => {
            if let Some(len) = value.len_for_constraints()
                && len < *min
            {
                return Err((
                    ErrorKind::Length,
                    format!("length {len} is less than minimum {min}"),
                ));
            }
        }
        Constraint::MaxLength(max) => {
            if let Some(len) = value.len_for_constraints()
                && len > *max
            {
                return Err((
                    ErrorKind::Length,
                    format!("length {len} is greater than maximum {max}"),
                ));
            }
        }
        Constraint::MinValue(min) => {
            if let Some(actual) = value.as_f64()
                && actual < *min
            {
                return Err((
                    ErrorKind::Range,
                    format!(
                        "value {} is less than minimum {}",
                        fmt_number(actual),
                        fmt_number(*min)
                    ),
                ));
            }
        }
        Constraint::MaxValue(max) => {
            if let Some(actual) = value.as_f64()
                && actual > *max
            {
                return Err((
                    ErrorKind::Range,
                    format!(
                        "value {} is greater than maximum {}",
                        fmt_number(actual),
                        fmt_number(*max)
                    ),
                ));
            }
        }
        Constraint::Prefix(prefix) => {
            if let Some(text) = value.as_str()
                && !text.starts_with(prefix.as_str())
            {
                return Err((
                    ErrorKind::Prefix,
                    format!("value must start with '{prefix}'"),
                ));
            }
        }
        Constraint::Predicate { check, message } => {
            if !check(value) {
                return Err((ErrorKind::Predicate, message.clone()));
            }
        }
    }
    Ok(())
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn type_error(expected: &str, raw: &Value) -> (ErrorKind, String) {
    (
        ErrorKind::TypeCoercion,
        format!("expected {expected}, got {}", json_type_name(raw)),
    )
}

/// Render a bound or offending value without a trailing `.0` when it is
/// integral, keeping messages identical across integer and float fields.
fn fmt_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 9e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_number_trims_integral_floats() {
        assert_eq!(fmt_number(20.0), "20");
        assert_eq!(fmt_number(7.5), "7.5");
    }

    #[test]
    fn enum_labels_match_case_sensitively() {
        let labels = vec!["radio".to_string(), "visual".to_string()];
        assert!(coerce_enum(&labels, &Value::String("radio".to_string())).is_ok());

        let (kind, message) =
            coerce_enum(&labels, &Value::String("Radio".to_string())).unwrap_err();
        assert_eq!(kind, ErrorKind::EnumMembership);
        assert_eq!(message, "'Radio' is not one of: radio, visual");
    }

    #[test]
    fn integer_rejects_fractional_numbers() {
        let (kind, _) = coerce_integer(&serde_json::json!(6.5)).unwrap_err();
        assert_eq!(kind, ErrorKind::TypeCoercion);
        assert_eq!(coerce_integer(&serde_json::json!("42")).unwrap(), TypedValue::Int(42));
    }

    #[test]
    fn boolean_rejects_truthy_strings() {
        let err = coerce_scalar(&FieldType::Boolean, &Value::String("true".to_string()));
        assert!(err.is_err());
    }
}
