use fieldgate::{execute_condition_token, ConditionSet, Record, Reducer, Value};

#[test]
fn any_mode_matches_when_one_expression_does() {
    let conditions = ConditionSet::new()
        .when("age > 18")
        .or_when("country == 'US'");

    let us_minor = Record::new().set("age", 15_i64).set("country", "US");
    assert!(conditions.matches(&us_minor).unwrap());

    let ca_minor = Record::new().set("age", 15_i64).set("country", "CA");
    assert!(!conditions.matches(&ca_minor).unwrap());
}

#[test]
fn all_mode_requires_every_expression() {
    let conditions = ConditionSet::new()
        .when("age > 18")
        .when("country == 'US'")
        .use_and_operator();

    let adult_us = Record::new().set("age", 30_i64).set("country", "US");
    let adult_ca = Record::new().set("age", 30_i64).set("country", "CA");
    let minor_us = Record::new().set("age", 15_i64).set("country", "US");

    assert!(conditions.matches(&adult_us).unwrap());
    assert!(!conditions.matches(&adult_ca).unwrap());
    assert!(!conditions.matches(&minor_us).unwrap());
}

#[test]
fn missing_attribute_is_false_not_an_error() {
    let conditions = ConditionSet::new().when("age > 18");
    let record = Record::new().set("country", "US");
    assert_eq!(conditions.matches(&record), Ok(false));
}

#[test]
fn malformed_grammar_is_an_error_not_false() {
    let conditions = ConditionSet::new().when("(age > 18 OR country == 'US'");
    let record = Record::new().set("age", 30_i64);
    assert!(conditions.matches(&record).is_err());
}

#[test]
fn unsplittable_leaf_is_false_not_an_error() {
    let conditions = ConditionSet::new().when("age eighteen");
    let record = Record::new().set("age", 30_i64);
    assert_eq!(conditions.matches(&record), Ok(false));
}

#[test]
fn dynamic_expression_is_re_evaluated_every_call() {
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;

    let threshold = Arc::new(AtomicI64::new(10));
    let live = Arc::clone(&threshold);
    let conditions =
        ConditionSet::new().when_dynamic(move || format!("score >= {}", live.load(Ordering::SeqCst)));

    let record = Record::new().set("score", 20_i64);
    assert!(conditions.matches(&record).unwrap());

    threshold.store(50, Ordering::SeqCst);
    assert!(!conditions.matches(&record).unwrap());
    assert_eq!(conditions.snapshot().expressions, vec!["score >= 50".to_owned()]);
}

#[test]
fn logical_expression_inside_one_condition() {
    let conditions = ConditionSet::new()
        .when("(plan === 'pro' OR plan === 'team') AND NOT seats < 2");

    let team = Record::new().set("plan", "team").set("seats", 5_i64);
    let solo = Record::new().set("plan", "team").set("seats", 1_i64);
    let free = Record::new().set("plan", "free").set("seats", 5_i64);

    assert!(conditions.matches(&team).unwrap());
    assert!(!conditions.matches(&solo).unwrap());
    assert!(!conditions.matches(&free).unwrap());
}

#[test]
fn relation_ids_from_json_record() {
    let record = Record::from_json(&serde_json::json!({
        "categories": [{ "id": 2 }, { "id": 5 }],
        "owner": { "id": 9 },
    }))
    .unwrap();

    let conditions = ConditionSet::new().when("categories includes 5").when("owner == 9");
    assert!(conditions.matches(&record).unwrap());
    assert!(!ConditionSet::new().when("categories includes 3").matches(&record).unwrap());
}

#[test]
fn loaded_from_file() {
    let path = std::env::temp_dir().join(format!("fieldgate-conditions-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "mode": "all", "expressions": ["a = 1", "b = 2"] }"#).unwrap();

    let conditions = ConditionSet::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(conditions.mode(), Reducer::All);
    assert!(conditions.matches(&Record::new().set("a", 1_i64).set("b", 2_i64)).unwrap());
    assert!(!conditions.matches(&Record::new().set("a", 1_i64)).unwrap());
}

#[test]
fn missing_file_is_io_error() {
    let err = ConditionSet::from_file("/nonexistent/fieldgate.json").unwrap_err();
    assert!(matches!(err, fieldgate::FieldgateError::Io(_)));
}

#[test]
fn execute_condition_reference_cases() {
    assert!(execute_condition_token(&Value::Int(35), ">", "30"));
    assert!(!execute_condition_token(&Value::Int(20), ">", "30"));
    assert!(execute_condition_token(&Value::from("active"), "===", "'active'"));

    let letters = Value::from(vec!["a", "b", "c"]);
    assert!(execute_condition_token(&letters, "includes", "b"));
    assert!(!execute_condition_token(&letters, "includes", "z"));

    assert!(!execute_condition_token(&Value::Bool(false), "boolean", "true"));
    assert!(execute_condition_token(&Value::Bool(false), "boolean", "false"));
}
