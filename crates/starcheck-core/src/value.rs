use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;

/// A coerced, strongly-typed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// Sentinel for an optional field with no value and no default.
    Absent,
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Timestamp(NaiveDateTime),
    /// A matched enum label; always one of the labels declared on the field.
    Enum(String),
    /// A nested record validated against its sub-schema.
    Object(Record),
    List(Vec<TypedValue>),
}

impl TypedValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, TypedValue::Absent)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::Str(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TypedValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric view of the value; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TypedValue::Int(value) => Some(*value as f64),
            TypedValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TypedValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            TypedValue::Timestamp(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_enum_label(&self) -> Option<&str> {
        match self {
            TypedValue::Enum(label) => Some(label.as_str()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Record> {
        match self {
            TypedValue::Object(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[TypedValue]> {
        match self {
            TypedValue::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Length of the value for length-constrained kinds: character count
    /// for strings and enum labels, element count for lists.
    pub fn len_for_constraints(&self) -> Option<usize> {
        match self {
            TypedValue::Str(value) => Some(value.chars().count()),
            TypedValue::Enum(label) => Some(label.chars().count()),
            TypedValue::List(items) => Some(items.len()),
            _ => None,
        }
    }
}

/// A coerced record: the candidate object while validation is in progress,
/// and the immutable domain object once the full schema has passed.
///
/// The engine returns it by value on success; no mutable access is exposed
/// afterwards, so a validated record never changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, TypedValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: TypedValue) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.fields.get(name)
    }

    /// String field accessor; `None` for absent or non-string fields.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(TypedValue::as_str)
    }

    pub fn int_field(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(TypedValue::as_i64)
    }

    pub fn float_field(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(TypedValue::as_f64)
    }

    pub fn bool_field(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(TypedValue::as_bool)
    }

    pub fn timestamp_field(&self, name: &str) -> Option<NaiveDateTime> {
        self.get(name).and_then(TypedValue::as_timestamp)
    }

    pub fn enum_field(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(TypedValue::as_enum_label)
    }

    pub fn object_field(&self, name: &str) -> Option<&Record> {
        self.get(name).and_then(TypedValue::as_object)
    }

    pub fn list_field(&self, name: &str) -> Option<&[TypedValue]> {
        self.get(name).and_then(TypedValue::as_list)
    }
}

/// Dotted, index-qualified location of a field inside a record tree,
/// e.g. `crew[1].years_experience`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Path extended with a named field segment.
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    /// Path with a list index attached to the last segment.
    pub fn index(&self, idx: usize) -> Self {
        let mut segments = self.segments.clone();
        match segments.last_mut() {
            Some(last) => last.push_str(&format!("[{idx}]")),
            None => segments.push(format!("[{idx}]")),
        }
        Self { segments }
    }

    pub fn render(&self) -> String {
        self.segments.join(".")
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
