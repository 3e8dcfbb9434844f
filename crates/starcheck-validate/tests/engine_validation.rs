use serde_json::json;
use starcheck_core::{
    BusinessRule, Constraint, ErrorKind, FieldDescriptor, FieldType, Record, Schema, TypedValue,
    check_schema,
};
use starcheck_validate::validate;

fn pod_schema() -> Schema {
    Schema::new("cargo_pod")
        .field(
            FieldDescriptor::new("pod_id", FieldType::String)
                .constrain(Constraint::MinLength(3))
                .constrain(Constraint::MaxLength(8)),
        )
        .field(
            FieldDescriptor::new("mass_tons", FieldType::Float)
                .constrain(Constraint::MinValue(0.0))
                .constrain(Constraint::MaxValue(50.0)),
        )
}

fn bay_rule_sealed_when_full(record: &Record) -> Result<(), String> {
    let full = record.int_field("capacity") == record.list_field("pods").map(|p| p.len() as i64);
    if full && record.bool_field("hatch_sealed") != Some(true) {
        return Err("A full docking bay must keep its hatch sealed".to_string());
    }
    Ok(())
}

fn bay_rule_label_required_when_unsealed(record: &Record) -> Result<(), String> {
    if record.bool_field("hatch_sealed") == Some(false) && record.str_field("label").is_none() {
        return Err("Unsealed bays must carry a label".to_string());
    }
    Ok(())
}

fn bay_schema() -> Schema {
    Schema::new("docking_bay")
        .field(
            FieldDescriptor::new("bay_id", FieldType::String)
                .constrain(Constraint::MinLength(3))
                .constrain(Constraint::MaxLength(8))
                .constrain(Constraint::Prefix("DB".to_string())),
        )
        .field(
            FieldDescriptor::new("capacity", FieldType::Integer)
                .constrain(Constraint::MinValue(1.0))
                .constrain(Constraint::MaxValue(10.0)),
        )
        .field(FieldDescriptor::new("inspected_at", FieldType::Timestamp))
        .field(
            FieldDescriptor::new("hatch_sealed", FieldType::Boolean)
                .default_value(TypedValue::Bool(true)),
        )
        .field(
            FieldDescriptor::new("label", FieldType::String)
                .optional()
                .constrain(Constraint::MaxLength(12)),
        )
        .field(
            FieldDescriptor::new("pods", FieldType::List(Box::new(pod_schema())))
                .constrain(Constraint::MinLength(1))
                .constrain(Constraint::MaxLength(3)),
        )
        .rule(BusinessRule::new("sealed_when_full", bay_rule_sealed_when_full))
        .rule(BusinessRule::new(
            "label_required_when_unsealed",
            bay_rule_label_required_when_unsealed,
        ))
}

fn valid_bay() -> serde_json::Value {
    json!({
        "bay_id": "DB-07",
        "capacity": 4,
        "inspected_at": "2024-01-20T12:00:00",
        "hatch_sealed": true,
        "pods": [
            {"pod_id": "POD1", "mass_tons": 12.5},
            {"pod_id": "POD2", "mass_tons": 3.0}
        ]
    })
}

#[test]
fn bay_schema_is_consistent() {
    check_schema(&bay_schema()).expect("schema invariants");
}

#[test]
fn valid_input_yields_a_typed_record() {
    let record = validate(&bay_schema(), &valid_bay()).expect("valid bay");

    assert_eq!(record.str_field("bay_id"), Some("DB-07"));
    assert_eq!(record.int_field("capacity"), Some(4));
    assert_eq!(record.bool_field("hatch_sealed"), Some(true));
    assert!(record.timestamp_field("inspected_at").is_some());

    let pods = record.list_field("pods").expect("pods list");
    assert_eq!(pods.len(), 2);
    let first = pods[0].as_object().expect("pod record");
    assert_eq!(first.str_field("pod_id"), Some("POD1"));
    assert_eq!(first.float_field("mass_tons"), Some(12.5));
}

#[test]
fn defaults_apply_when_the_field_is_absent() {
    let mut raw = valid_bay();
    raw.as_object_mut().unwrap().remove("hatch_sealed");

    let record = validate(&bay_schema(), &raw).expect("valid bay");
    assert_eq!(record.bool_field("hatch_sealed"), Some(true));
}

#[test]
fn optional_field_without_default_coerces_to_absent() {
    let record = validate(&bay_schema(), &valid_bay()).expect("valid bay");
    assert!(record.get("label").is_some_and(TypedValue::is_absent));
    assert_eq!(record.str_field("label"), None);
}

#[test]
fn field_errors_aggregate_across_siblings() {
    let mut raw = valid_bay();
    raw["capacity"] = json!(0);
    raw["inspected_at"] = json!("yesterday");

    let report = validate(&bay_schema(), &raw).unwrap_err();
    assert_eq!(report.len(), 2);
    assert_eq!(report.errors[0].path, "capacity");
    assert_eq!(report.errors[0].kind, ErrorKind::Range);
    assert_eq!(report.errors[1].path, "inspected_at");
    assert_eq!(report.errors[1].kind, ErrorKind::TimestampParse);
}

#[test]
fn only_the_first_failing_constraint_is_reported_per_field() {
    // "XX" violates both the minimum length and the prefix; the length
    // constraint is declared first.
    let mut raw = valid_bay();
    raw["bay_id"] = json!("XX");

    let report = validate(&bay_schema(), &raw).unwrap_err();
    assert_eq!(report.len(), 1);
    assert_eq!(report.errors[0].kind, ErrorKind::Length);
    assert_eq!(report.errors[0].message, "length 2 is less than minimum 3");
}

#[test]
fn missing_required_field_skips_its_constraints() {
    let mut raw = valid_bay();
    raw.as_object_mut().unwrap().remove("bay_id");

    let report = validate(&bay_schema(), &raw).unwrap_err();
    assert_eq!(report.len(), 1);
    assert_eq!(report.errors[0].path, "bay_id");
    assert_eq!(report.errors[0].kind, ErrorKind::MissingField);
    assert_eq!(report.errors[0].message, "required field is missing");
}

#[test]
fn numeric_bounds_are_inclusive() {
    for capacity in [1, 10] {
        let mut raw = valid_bay();
        raw["capacity"] = json!(capacity);
        validate(&bay_schema(), &raw).expect("bound value passes");
    }

    for capacity in [0, 11] {
        let mut raw = valid_bay();
        raw["capacity"] = json!(capacity);
        let report = validate(&bay_schema(), &raw).unwrap_err();
        assert_eq!(report.len(), 1);
        assert_eq!(report.errors[0].kind, ErrorKind::Range);
    }
}

#[test]
fn numeric_strings_coerce() {
    let mut raw = valid_bay();
    raw["capacity"] = json!("7");

    let record = validate(&bay_schema(), &raw).expect("numeric string accepted");
    assert_eq!(record.int_field("capacity"), Some(7));
}

#[test]
fn booleans_do_not_coerce_from_strings() {
    let mut raw = valid_bay();
    raw["hatch_sealed"] = json!("true");

    let report = validate(&bay_schema(), &raw).unwrap_err();
    assert_eq!(report.len(), 1);
    assert_eq!(report.errors[0].kind, ErrorKind::TypeCoercion);
    assert_eq!(report.errors[0].message, "expected a boolean, got a string");
}

#[test]
fn rules_run_fail_fast_in_declaration_order() {
    // Violates both rules: bay is full but unsealed, and unsealed without
    // a label. Only the first rule's error may surface.
    let mut raw = valid_bay();
    raw["capacity"] = json!(2);
    raw["hatch_sealed"] = json!(false);

    let report = validate(&bay_schema(), &raw).unwrap_err();
    assert_eq!(report.len(), 1);
    assert_eq!(report.errors[0].kind, ErrorKind::Rule);
    assert_eq!(report.errors[0].path, "sealed_when_full");
    assert_eq!(
        report.errors[0].message,
        "A full docking bay must keep its hatch sealed"
    );
}

#[test]
fn rules_never_run_when_any_field_failed() {
    let mut raw = valid_bay();
    raw["capacity"] = json!(2);
    raw["hatch_sealed"] = json!(false);
    raw["inspected_at"] = json!("yesterday");

    let report = validate(&bay_schema(), &raw).unwrap_err();
    assert_eq!(report.len(), 1);
    assert_eq!(report.errors[0].kind, ErrorKind::TimestampParse);
}

#[test]
fn nested_list_failures_are_indexed() {
    let mut raw = valid_bay();
    raw["pods"][1]["mass_tons"] = json!(80.0);

    let report = validate(&bay_schema(), &raw).unwrap_err();
    assert_eq!(report.len(), 1);
    assert_eq!(report.errors[0].path, "pods[1].mass_tons");
    assert_eq!(
        report.errors[0].message,
        "value 80 is greater than maximum 50"
    );
}

#[test]
fn list_count_is_checked_before_elements() {
    // Four pods, every one of them invalid; the count bound must be the
    // only error reported.
    let mut raw = valid_bay();
    raw["pods"] = json!([{}, {}, {}, {}]);

    let report = validate(&bay_schema(), &raw).unwrap_err();
    assert_eq!(report.len(), 1);
    assert_eq!(report.errors[0].path, "pods");
    assert_eq!(report.errors[0].kind, ErrorKind::Length);
    assert_eq!(report.errors[0].message, "length 4 is greater than maximum 3");
}

#[test]
fn non_object_input_is_a_single_type_error() {
    let report = validate(&bay_schema(), &json!([1, 2, 3])).unwrap_err();
    assert_eq!(report.len(), 1);
    assert_eq!(report.errors[0].path, "docking_bay");
    assert_eq!(report.errors[0].message, "expected an object, got a list");
}

#[test]
fn custom_predicates_report_their_message() {
    fn even(value: &TypedValue) -> bool {
        value.as_i64().is_none_or(|n| n % 2 == 0)
    }

    let schema = Schema::new("airlock").field(
        FieldDescriptor::new("cycle_count", FieldType::Integer).constrain(
            Constraint::Predicate {
                check: even,
                message: "cycle count must be even".to_string(),
            },
        ),
    );

    validate(&schema, &json!({"cycle_count": 4})).expect("even count passes");

    let report = validate(&schema, &json!({"cycle_count": 3})).unwrap_err();
    assert_eq!(report.len(), 1);
    assert_eq!(report.errors[0].kind, ErrorKind::Predicate);
    assert_eq!(report.errors[0].message, "cycle count must be even");
}

#[test]
fn validation_is_idempotent() {
    let mut raw = valid_bay();
    raw["capacity"] = json!(0);
    raw["pods"][0]["pod_id"] = json!("P");

    let first = validate(&bay_schema(), &raw).unwrap_err();
    let second = validate(&bay_schema(), &raw).unwrap_err();
    assert_eq!(first, second);

    let valid = valid_bay();
    let a = validate(&bay_schema(), &valid).expect("valid");
    let b = validate(&bay_schema(), &valid).expect("valid");
    assert_eq!(a, b);
}
