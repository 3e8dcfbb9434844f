use chrono::NaiveDateTime;
use serde_json::Value;

use starcheck_core::{
    BusinessRule, Constraint, FieldDescriptor, FieldType, Record, Schema, TypedValue,
    ValidationReport,
};

/// Authorized alien contact channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactType {
    Radio,
    Visual,
    Physical,
    Telepathic,
}

impl ContactType {
    pub const ALL: [ContactType; 4] = [
        ContactType::Radio,
        ContactType::Visual,
        ContactType::Physical,
        ContactType::Telepathic,
    ];

    /// Labels accepted by the schema, in declaration order.
    pub fn labels() -> Vec<String> {
        Self::ALL.iter().map(|kind| kind.label().to_string()).collect()
    }

    pub fn label(self) -> &'static str {
        match self {
            ContactType::Radio => "radio",
            ContactType::Visual => "visual",
            ContactType::Physical => "physical",
            ContactType::Telepathic => "telepathic",
        }
    }

    /// Case-sensitive mapping from a label to its variant.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }
}

/// Schema for alien-contact event reports, including the business rules
/// covering identifier prefixes, verification, witnesses, and messages.
pub fn contact_schema() -> Schema {
    Schema::new("alien_contact")
        .field(
            FieldDescriptor::new("contact_id", FieldType::String)
                .constrain(Constraint::MinLength(5))
                .constrain(Constraint::MaxLength(15)),
        )
        .field(FieldDescriptor::new("timestamp", FieldType::Timestamp))
        .field(
            FieldDescriptor::new("location", FieldType::String)
                .constrain(Constraint::MinLength(3))
                .constrain(Constraint::MaxLength(100)),
        )
        .field(FieldDescriptor::new(
            "contact_type",
            FieldType::Enum(ContactType::labels()),
        ))
        .field(
            FieldDescriptor::new("signal_strength", FieldType::Float)
                .constrain(Constraint::MinValue(0.0))
                .constrain(Constraint::MaxValue(10.0)),
        )
        .field(
            FieldDescriptor::new("duration_minutes", FieldType::Integer)
                .constrain(Constraint::MinValue(1.0))
                .constrain(Constraint::MaxValue(1440.0)),
        )
        .field(
            FieldDescriptor::new("witness_count", FieldType::Integer)
                .constrain(Constraint::MinValue(1.0))
                .constrain(Constraint::MaxValue(100.0)),
        )
        .field(
            FieldDescriptor::new("message_received", FieldType::String)
                .optional()
                .constrain(Constraint::MaxLength(500)),
        )
        .field(
            FieldDescriptor::new("is_verified", FieldType::Boolean)
                .default_value(TypedValue::Bool(false)),
        )
        .rule(BusinessRule::new("contact_id_prefix", contact_id_prefix))
        .rule(BusinessRule::new(
            "physical_contact_verified",
            physical_contact_verified,
        ))
        .rule(BusinessRule::new("telepathic_witnesses", telepathic_witnesses))
        .rule(BusinessRule::new("strong_signal_message", strong_signal_message))
}

fn contact_id_prefix(record: &Record) -> Result<(), String> {
    if !record.str_field("contact_id").unwrap_or_default().starts_with("AC") {
        return Err("Contact ID must start with 'AC'".to_string());
    }
    Ok(())
}

fn physical_contact_verified(record: &Record) -> Result<(), String> {
    if record.enum_field("contact_type") == Some(ContactType::Physical.label())
        && record.bool_field("is_verified") != Some(true)
    {
        return Err("Physical contact reports must be verified".to_string());
    }
    Ok(())
}

fn telepathic_witnesses(record: &Record) -> Result<(), String> {
    if record.enum_field("contact_type") == Some(ContactType::Telepathic.label())
        && record.int_field("witness_count").unwrap_or_default() < 3
    {
        return Err("Telepathic contact requires at least 3 witnesses".to_string());
    }
    Ok(())
}

fn strong_signal_message(record: &Record) -> Result<(), String> {
    let strong = record.float_field("signal_strength").unwrap_or_default() > 7.0;
    let has_message = record
        .str_field("message_received")
        .is_some_and(|message| !message.is_empty());
    if strong && !has_message {
        return Err("Strong signals (> 7.0) should include received messages".to_string());
    }
    Ok(())
}

/// Validated alien-contact report.
#[derive(Debug, Clone, PartialEq)]
pub struct AlienContact(Record);

impl AlienContact {
    /// Validate a raw contact report and wrap the coerced record.
    pub fn validate(raw: &Value) -> Result<Self, ValidationReport> {
        starcheck_validate::validate(&contact_schema(), raw).map(Self)
    }

    pub fn contact_id(&self) -> &str {
        self.0.str_field("contact_id").unwrap_or_default()
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.0.timestamp_field("timestamp").unwrap_or_default()
    }

    pub fn location(&self) -> &str {
        self.0.str_field("location").unwrap_or_default()
    }

    pub fn contact_type(&self) -> Option<ContactType> {
        self.0.enum_field("contact_type").and_then(ContactType::from_label)
    }

    pub fn signal_strength(&self) -> f64 {
        self.0.float_field("signal_strength").unwrap_or_default()
    }

    pub fn duration_minutes(&self) -> i64 {
        self.0.int_field("duration_minutes").unwrap_or_default()
    }

    pub fn witness_count(&self) -> i64 {
        self.0.int_field("witness_count").unwrap_or_default()
    }

    pub fn message_received(&self) -> Option<&str> {
        self.0.str_field("message_received")
    }

    pub fn is_verified(&self) -> bool {
        self.0.bool_field("is_verified").unwrap_or_default()
    }

    pub fn record(&self) -> &Record {
        &self.0
    }
}
