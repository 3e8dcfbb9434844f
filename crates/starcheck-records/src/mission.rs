use chrono::NaiveDateTime;
use serde_json::Value;

use starcheck_core::{
    BusinessRule, Constraint, FieldDescriptor, FieldType, Record, Schema, TypedValue,
    ValidationReport,
};

/// Crew ranks, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rank {
    Cadet,
    Officer,
    Lieutenant,
    Captain,
    Commander,
}

impl Rank {
    pub const ALL: [Rank; 5] = [
        Rank::Cadet,
        Rank::Officer,
        Rank::Lieutenant,
        Rank::Captain,
        Rank::Commander,
    ];

    /// Labels accepted by the schema, in declaration order.
    pub fn labels() -> Vec<String> {
        Self::ALL.iter().map(|rank| rank.label().to_string()).collect()
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Cadet => "cadet",
            Rank::Officer => "officer",
            Rank::Lieutenant => "lieutenant",
            Rank::Captain => "captain",
            Rank::Commander => "commander",
        }
    }

    /// Case-sensitive mapping from a label to its variant.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rank| rank.label() == label)
    }

    /// Ranks that satisfy the mission leadership requirement.
    pub fn is_leader(self) -> bool {
        matches!(self, Rank::Captain | Rank::Commander)
    }
}

/// Item schema for one crew member inside a mission manifest.
pub fn crew_member_schema() -> Schema {
    Schema::new("crew_member")
        .field(
            FieldDescriptor::new("member_id", FieldType::String)
                .constrain(Constraint::MinLength(3))
                .constrain(Constraint::MaxLength(10)),
        )
        .field(
            FieldDescriptor::new("name", FieldType::String)
                .constrain(Constraint::MinLength(2))
                .constrain(Constraint::MaxLength(50)),
        )
        .field(FieldDescriptor::new("rank", FieldType::Enum(Rank::labels())))
        .field(
            FieldDescriptor::new("age", FieldType::Integer)
                .constrain(Constraint::MinValue(18.0))
                .constrain(Constraint::MaxValue(80.0)),
        )
        .field(
            FieldDescriptor::new("specialization", FieldType::String)
                .constrain(Constraint::MinLength(3))
                .constrain(Constraint::MaxLength(30)),
        )
        .field(
            FieldDescriptor::new("years_experience", FieldType::Integer)
                .constrain(Constraint::MinValue(0.0))
                .constrain(Constraint::MaxValue(50.0)),
        )
        .field(
            FieldDescriptor::new("is_active", FieldType::Boolean)
                .default_value(TypedValue::Bool(true)),
        )
}

/// Schema for mission manifests with their nested crew list and the
/// mission safety rules.
pub fn mission_schema() -> Schema {
    Schema::new("space_mission")
        .field(
            FieldDescriptor::new("mission_id", FieldType::String)
                .constrain(Constraint::MinLength(5))
                .constrain(Constraint::MaxLength(15)),
        )
        .field(
            FieldDescriptor::new("mission_name", FieldType::String)
                .constrain(Constraint::MinLength(3))
                .constrain(Constraint::MaxLength(100)),
        )
        .field(
            FieldDescriptor::new("destination", FieldType::String)
                .constrain(Constraint::MinLength(3))
                .constrain(Constraint::MaxLength(50)),
        )
        .field(FieldDescriptor::new("launch_date", FieldType::Timestamp))
        .field(
            FieldDescriptor::new("duration_days", FieldType::Integer)
                .constrain(Constraint::MinValue(1.0))
                .constrain(Constraint::MaxValue(3650.0)),
        )
        .field(
            FieldDescriptor::new("crew", FieldType::List(Box::new(crew_member_schema())))
                .constrain(Constraint::MinLength(1))
                .constrain(Constraint::MaxLength(12)),
        )
        .field(
            FieldDescriptor::new("mission_status", FieldType::String)
                .default_value(TypedValue::Str("planned".to_string())),
        )
        .field(
            FieldDescriptor::new("budget_millions", FieldType::Float)
                .constrain(Constraint::MinValue(1.0))
                .constrain(Constraint::MaxValue(10000.0)),
        )
        .rule(BusinessRule::new("mission_id_prefix", mission_id_prefix))
        .rule(BusinessRule::new("mission_has_leader", mission_has_leader))
        .rule(BusinessRule::new(
            "long_mission_experience",
            long_mission_experience,
        ))
        .rule(BusinessRule::new("all_crew_active", all_crew_active))
}

fn crew_records(record: &Record) -> Vec<&Record> {
    record
        .list_field("crew")
        .unwrap_or_default()
        .iter()
        .filter_map(TypedValue::as_object)
        .collect()
}

fn mission_id_prefix(record: &Record) -> Result<(), String> {
    if !record.str_field("mission_id").unwrap_or_default().starts_with('M') {
        return Err("Mission ID must start with 'M'".to_string());
    }
    Ok(())
}

fn mission_has_leader(record: &Record) -> Result<(), String> {
    let has_leader = crew_records(record).iter().any(|member| {
        member
            .enum_field("rank")
            .and_then(Rank::from_label)
            .is_some_and(Rank::is_leader)
    });
    if !has_leader {
        return Err("Mission must have at least one Commander or Captain".to_string());
    }
    Ok(())
}

fn long_mission_experience(record: &Record) -> Result<(), String> {
    // The experience quota only applies to missions longer than a year.
    if record.int_field("duration_days").unwrap_or_default() <= 365 {
        return Ok(());
    }
    let crew = crew_records(record);
    let experienced = crew
        .iter()
        .filter(|member| member.int_field("years_experience").unwrap_or_default() >= 5)
        .count();
    if experienced * 2 < crew.len() {
        return Err("Long missions need 50% experienced crew (5+ years)".to_string());
    }
    Ok(())
}

fn all_crew_active(record: &Record) -> Result<(), String> {
    let all_active = crew_records(record)
        .iter()
        .all(|member| member.bool_field("is_active") == Some(true));
    if !all_active {
        return Err("All crew members must be active".to_string());
    }
    Ok(())
}

/// Validated crew member entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CrewMember(Record);

impl CrewMember {
    /// Validate a raw crew entry on its own, outside a mission manifest.
    pub fn validate(raw: &Value) -> Result<Self, ValidationReport> {
        starcheck_validate::validate(&crew_member_schema(), raw).map(Self)
    }

    pub fn member_id(&self) -> &str {
        self.0.str_field("member_id").unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.0.str_field("name").unwrap_or_default()
    }

    pub fn rank(&self) -> Option<Rank> {
        self.0.enum_field("rank").and_then(Rank::from_label)
    }

    pub fn age(&self) -> i64 {
        self.0.int_field("age").unwrap_or_default()
    }

    pub fn specialization(&self) -> &str {
        self.0.str_field("specialization").unwrap_or_default()
    }

    pub fn years_experience(&self) -> i64 {
        self.0.int_field("years_experience").unwrap_or_default()
    }

    pub fn is_active(&self) -> bool {
        self.0.bool_field("is_active").unwrap_or_default()
    }

    pub fn record(&self) -> &Record {
        &self.0
    }
}

/// Validated mission manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceMission(Record);

impl SpaceMission {
    /// Validate a raw mission manifest and wrap the coerced record.
    pub fn validate(raw: &Value) -> Result<Self, ValidationReport> {
        starcheck_validate::validate(&mission_schema(), raw).map(Self)
    }

    pub fn mission_id(&self) -> &str {
        self.0.str_field("mission_id").unwrap_or_default()
    }

    pub fn mission_name(&self) -> &str {
        self.0.str_field("mission_name").unwrap_or_default()
    }

    pub fn destination(&self) -> &str {
        self.0.str_field("destination").unwrap_or_default()
    }

    pub fn launch_date(&self) -> NaiveDateTime {
        self.0.timestamp_field("launch_date").unwrap_or_default()
    }

    pub fn duration_days(&self) -> i64 {
        self.0.int_field("duration_days").unwrap_or_default()
    }

    pub fn mission_status(&self) -> &str {
        self.0.str_field("mission_status").unwrap_or_default()
    }

    pub fn budget_millions(&self) -> f64 {
        self.0.float_field("budget_millions").unwrap_or_default()
    }

    pub fn crew(&self) -> Vec<CrewMember> {
        self.0
            .list_field("crew")
            .unwrap_or_default()
            .iter()
            .filter_map(TypedValue::as_object)
            .cloned()
            .map(CrewMember)
            .collect()
    }

    pub fn record(&self) -> &Record {
        &self.0
    }
}
