//! End-to-end tests driving the public API the way a host application
//! would: decode catalog items from JSON, compile saved filter queries,
//! and select the items each query matches.

use category_selector_rs::{compile, CompileError, Context, Value};

/// A small catalog of items as attribute maps, decoded straight from JSON.
fn catalog() -> Vec<Context> {
    serde_json::from_str(
        r#"[
            {"name": "claw hammer", "category": "tools", "price": 12, "rating": 4.5, "in_stock": true},
            {"name": "drill press", "category": "tools", "price": 220, "rating": 4.8, "in_stock": false},
            {"name": "garden gnome", "category": "decor", "price": 35, "rating": 3.9, "in_stock": true},
            {"name": "Toolbox Deluxe", "category": "storage", "price": 89.5, "rating": 4.1, "in_stock": true}
        ]"#,
    )
    .unwrap()
}

fn names<'a>(selected: &[&'a Context]) -> Vec<&'a str> {
    selected
        .iter()
        .map(|context| match &context["name"] {
            Value::Text(name) => name.as_str(),
            other => panic!("unexpected name value: {other:?}"),
        })
        .collect()
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_e2e_select_by_category_and_price() {
    let query = compile(r#"category = "tools" && price < 100"#).unwrap();
    let catalog = catalog();
    assert_eq!(names(&query.select(&catalog)), vec!["claw hammer"]);
}

#[test]
fn test_e2e_select_with_grouping_and_negation() {
    let query = compile(r#"(category = "tools" || category = "storage") && !(in_stock = false)"#)
        .unwrap();
    let catalog = catalog();
    assert_eq!(
        names(&query.select(&catalog)),
        vec!["claw hammer", "Toolbox Deluxe"]
    );
}

#[test]
fn test_e2e_ordering_mixes_integer_and_float_values() {
    // The float rating and integer price both satisfy numeric bounds.
    let query = compile("rating >= 4.0 && price <= 90").unwrap();
    let catalog = catalog();
    assert_eq!(
        names(&query.select(&catalog)),
        vec!["claw hammer", "Toolbox Deluxe"]
    );
}

#[test]
fn test_e2e_substring_match_is_case_sensitive() {
    let catalog = catalog();

    let query = compile(r#"name ~ "Tool""#).unwrap();
    assert_eq!(names(&query.select(&catalog)), vec!["Toolbox Deluxe"]);

    let query = compile(r#"name ~ "tool""#).unwrap();
    assert!(query.select(&catalog).is_empty());
}

#[test]
fn test_e2e_text_equality_ignores_case() {
    let query = compile(r#"name = "toolbox deluxe""#).unwrap();
    let catalog = catalog();
    assert_eq!(names(&query.select(&catalog)), vec!["Toolbox Deluxe"]);
}

// ============================================================================
// Caller Protocol: Field Sets
// ============================================================================

#[test]
fn test_e2e_fields_drive_the_subset_check() {
    let query = compile("price < 100 && discount > 0").unwrap();
    let catalog = catalog();

    // No catalog item carries a discount field, so the recommended
    // pre-filter skips every item instead of failing evaluation.
    assert!(catalog.iter().all(|item| !query.applies_to(item)));
    assert!(query.select(&catalog).is_empty());

    let mut discounted = catalog[0].clone();
    discounted.insert("discount".to_string(), Value::Integer(10));
    assert!(query.applies_to(&discounted));
    assert_eq!(query.matches(&discounted), Ok(true));
}

#[test]
fn test_e2e_field_set_lists_every_referenced_field() {
    let query = compile(r#"a > -2.2 && c = true"#).unwrap();
    let fields: Vec<&str> = {
        let mut fields: Vec<&str> = query.fields().iter().map(String::as_str).collect();
        fields.sort_unstable();
        fields
    };
    assert_eq!(fields, vec!["a", "c"]);
}

// ============================================================================
// Compile Errors
// ============================================================================

#[test]
fn test_e2e_compile_failure_yields_error_messages() {
    let errors = compile(r#"price > "high""#).unwrap_err();
    let messages: Vec<String> = errors.iter().map(CompileError::to_string).collect();
    assert_eq!(
        messages,
        vec![
            "invalid comparison for field 'price': operator '>' cannot be used with string values"
                .to_string()
        ]
    );
}

#[test]
fn test_e2e_no_partial_results_on_failure() {
    // One bad comparison poisons the whole compilation; there is no
    // predicate or field set to observe.
    assert!(compile(r#"category = "tools" && price ~ 1"#).is_err());
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_e2e_recompiled_queries_agree_on_the_whole_catalog() {
    let text = r#"(category = "tools" || rating >= 4.0) && in_stock = true"#;
    let first = compile(text).unwrap();
    let second = compile(text).unwrap();
    let catalog = catalog();

    assert_eq!(first.fields(), second.fields());
    assert_eq!(names(&first.select(&catalog)), names(&second.select(&catalog)));
}
