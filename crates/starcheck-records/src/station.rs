use chrono::NaiveDateTime;
use serde_json::Value;

use starcheck_core::{
    Constraint, FieldDescriptor, FieldType, Record, Schema, TypedValue, ValidationReport,
};

/// Schema for space-station telemetry records. Purely field-level; the
/// station shape has no cross-field rules.
pub fn station_schema() -> Schema {
    Schema::new("space_station")
        .field(
            FieldDescriptor::new("station_id", FieldType::String)
                .constrain(Constraint::MinLength(3))
                .constrain(Constraint::MaxLength(10)),
        )
        .field(
            FieldDescriptor::new("name", FieldType::String)
                .constrain(Constraint::MinLength(1))
                .constrain(Constraint::MaxLength(50)),
        )
        .field(
            FieldDescriptor::new("crew_size", FieldType::Integer)
                .constrain(Constraint::MinValue(1.0))
                .constrain(Constraint::MaxValue(20.0)),
        )
        .field(
            FieldDescriptor::new("power_level", FieldType::Float)
                .constrain(Constraint::MinValue(0.0))
                .constrain(Constraint::MaxValue(100.0)),
        )
        .field(
            FieldDescriptor::new("oxygen_level", FieldType::Float)
                .constrain(Constraint::MinValue(0.0))
                .constrain(Constraint::MaxValue(100.0)),
        )
        .field(FieldDescriptor::new("last_maintenance", FieldType::Timestamp))
        .field(
            FieldDescriptor::new("is_operational", FieldType::Boolean)
                .default_value(TypedValue::Bool(true)),
        )
        .field(
            FieldDescriptor::new("notes", FieldType::String)
                .optional()
                .constrain(Constraint::MaxLength(200)),
        )
}

/// Validated space-station record.
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceStation(Record);

impl SpaceStation {
    /// Validate raw telemetry and wrap the coerced record.
    pub fn validate(raw: &Value) -> Result<Self, ValidationReport> {
        starcheck_validate::validate(&station_schema(), raw).map(Self)
    }

    pub fn station_id(&self) -> &str {
        self.0.str_field("station_id").unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.0.str_field("name").unwrap_or_default()
    }

    pub fn crew_size(&self) -> i64 {
        self.0.int_field("crew_size").unwrap_or_default()
    }

    pub fn power_level(&self) -> f64 {
        self.0.float_field("power_level").unwrap_or_default()
    }

    pub fn oxygen_level(&self) -> f64 {
        self.0.float_field("oxygen_level").unwrap_or_default()
    }

    pub fn last_maintenance(&self) -> NaiveDateTime {
        self.0.timestamp_field("last_maintenance").unwrap_or_default()
    }

    pub fn is_operational(&self) -> bool {
        self.0.bool_field("is_operational").unwrap_or_default()
    }

    pub fn notes(&self) -> Option<&str> {
        self.0.str_field("notes")
    }

    pub fn record(&self) -> &Record {
        &self.0
    }
}
