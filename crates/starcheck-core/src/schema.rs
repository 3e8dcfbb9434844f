use crate::value::{Record, TypedValue};

/// Semantic type of a field, driving coercion of raw input.
#[derive(Debug, Clone)]
pub enum FieldType {
    String,
    Integer,
    Float,
    Boolean,
    /// ISO-8601 timestamp (`YYYY-MM-DDTHH:MM:SS`), parsed by the engine's
    /// timestamp collaborator.
    Timestamp,
    /// Closed set of allowed labels, matched case-sensitively in order.
    Enum(Vec<String>),
    /// Nested record validated against its own schema.
    Object(Box<Schema>),
    /// List of nested records validated element by element against the
    /// item schema.
    List(Box<Schema>),
}

impl FieldType {
    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::Timestamp => "timestamp",
            FieldType::Enum(_) => "enum",
            FieldType::Object(_) => "object",
            FieldType::List(_) => "list",
        }
    }
}

/// Atomic check applied to one coerced field value.
///
/// Each variant carries its bound(s); messages are produced from fixed
/// templates so report text is reproducible across runs.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Minimum length: character count for strings, item count for lists.
    MinLength(usize),
    MaxLength(usize),
    /// Inclusive numeric lower bound.
    MinValue(f64),
    /// Inclusive numeric upper bound.
    MaxValue(f64),
    /// Literal prefix required on string values.
    Prefix(String),
    /// Escape hatch for checks the other variants cannot express.
    Predicate {
        check: fn(&TypedValue) -> bool,
        message: String,
    },
}

/// Declaration of a single field: name, semantic type, optionality,
/// default, and an ordered constraint chain.
///
/// Owned exclusively by its [`Schema`] and immutable after construction.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub field_type: FieldType,
    pub required: bool,
    /// Value taken verbatim when the field is absent from the input.
    /// Defaults are declared by the schema author and bypass constraints.
    pub default: Option<TypedValue>,
    pub constraints: Vec<Constraint>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
            default: None,
            constraints: Vec::new(),
        }
    }

    /// Mark the field optional; absence coerces to the `Absent` sentinel.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Give the field a default, implying it is optional.
    pub fn default_value(mut self, value: TypedValue) -> Self {
        self.required = false;
        self.default = Some(value);
        self
    }

    /// Append a constraint to the field's ordered chain.
    pub fn constrain(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }
}

/// Named predicate evaluated over the fully-coerced record.
///
/// Rules run only after every field at their schema level coerced and
/// passed its constraints, so predicates may assume a fully-typed record.
/// The returned message is surfaced verbatim in the report.
#[derive(Debug, Clone)]
pub struct BusinessRule {
    pub name: String,
    pub predicate: fn(&Record) -> std::result::Result<(), String>,
}

impl BusinessRule {
    pub fn new(
        name: impl Into<String>,
        predicate: fn(&Record) -> std::result::Result<(), String>,
    ) -> Self {
        Self {
            name: name.into(),
            predicate,
        }
    }
}

/// Ordered field declarations plus business rules for one record shape.
///
/// Schemas compose by value (nested object and list fields own their
/// sub-schema), so references always form a tree.
#[derive(Debug, Clone)]
pub struct Schema {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
    pub rules: Vec<BusinessRule>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Append a field declaration; declaration order is evaluation order.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a business rule; declaration order is evaluation order.
    pub fn rule(mut self, rule: BusinessRule) -> Self {
        self.rules.push(rule);
        self
    }
}
