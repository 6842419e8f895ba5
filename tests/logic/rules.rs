//! Integration tests for rule trees

use shapecast_foundation::Value;
use shapecast_logic::{PredicateSet, Rule, StandardPredicates, compile_options, standard};

fn options(pairs: &[(&str, Value)]) -> Vec<(String, Value)> {
    pairs
        .iter()
        .map(|(name, arg)| ((*name).to_string(), arg.clone()))
        .collect()
}

// =============================================================================
// Composition
// =============================================================================

#[test]
fn compile_options_conjoins_in_order() {
    let set = StandardPredicates::new();
    let rule = compile_options(
        &set,
        &options(&[("min_size", Value::Int(2)), ("format", Value::from("^a"))]),
    )
    .unwrap();
    assert_eq!(
        rule,
        Rule::predicate("min_size?", vec![Value::Int(2)])
            & Rule::predicate("format?", vec![Value::from("^a")])
    );
}

#[test]
fn compile_options_rejects_empty() {
    let set = StandardPredicates::new();
    assert!(compile_options(&set, &[]).is_err());
}

#[test]
fn compile_options_surfaces_unknown_names() {
    let set = StandardPredicates::new();
    let err = compile_options(&set, &options(&[("shiny", Value::Bool(true))])).unwrap_err();
    assert!(err.to_string().contains("shiny?"));
}

// =============================================================================
// Evaluation
// =============================================================================

#[test]
fn and_is_intersection() {
    let set = standard();
    let rule = set.compile("gt", &Value::Int(0)).unwrap() & set.compile("lt", &Value::Int(10)).unwrap();
    for (n, expected) in [(-1, false), (0, false), (5, true), (10, false)] {
        assert_eq!(rule.evaluate(&*set, &Value::Int(n)).success, expected, "{n}");
    }
}

#[test]
fn or_is_union() {
    let set = standard();
    let rule = set.compile("nil", &Value::Bool(true)).unwrap()
        | set.compile("int", &Value::Bool(true)).unwrap();
    assert!(rule.evaluate(&*set, &Value::Nil).success);
    assert!(rule.evaluate(&*set, &Value::Int(1)).success);
    assert!(!rule.evaluate(&*set, &Value::from("1")).success);
}

#[test]
fn explanation_names_predicate_and_value() {
    let set = standard();
    let rule = set.compile("min_size", &Value::Int(5)).unwrap();
    let eval = rule.evaluate(&*set, &Value::from("x"));
    assert!(!eval.success);
    assert_eq!(eval.explanation, "min_size?(5, \"x\") failed");
}

#[test]
fn rule_display() {
    let rule = Rule::predicate("gt?", vec![Value::Int(1)])
        | Rule::predicate("nil?", vec![]);
    assert_eq!(rule.to_string(), "(gt?(1) OR nil?())");
}
