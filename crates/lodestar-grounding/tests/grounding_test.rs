//! Golden grounding scenarios and reference-driven checks.

use lodestar_core::models::Reference;
use lodestar_grounding::GroundingValidator;
use serde::Deserialize;
use test_fixtures::load_fixture;

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    answer: String,
    references: Vec<String>,
    is_valid: bool,
    suspicious: Vec<String>,
    warnings: usize,
}

#[test]
fn golden_scenarios() {
    let scenarios: Vec<Scenario> = load_fixture("golden/grounding.json");
    assert!(!scenarios.is_empty());
    let validator = GroundingValidator::new();

    for s in &scenarios {
        let result = validator.validate_texts(&s.answer, &s.references);
        assert_eq!(result.is_valid, s.is_valid, "{}: {result:?}", s.name);
        assert_eq!(result.suspicious_commands, s.suspicious, "{}", s.name);
        assert_eq!(result.warnings.len(), s.warnings, "{}: {:?}", s.name, result.warnings);
    }
}

#[test]
fn validation_never_alters_the_answer() {
    let answer = String::from("Run nv config apply now.");
    let before = answer.clone();
    let _ = GroundingValidator::new().validate_texts(&answer, &["nothing relevant"]);
    assert_eq!(answer, before);
}

#[test]
fn command_found_in_any_one_reference_is_grounded() {
    let references = vec![
        Reference {
            chunk_id: "p1".into(),
            title: "BGP".into(),
            text: "Neighbors are listed by nv show router bgp neighbor.".into(),
        },
        Reference {
            chunk_id: "p2".into(),
            title: "RoCE".into(),
            text: "Check nv show qos roce after applying.".into(),
        },
    ];
    let result = GroundingValidator::new().validate(
        "First `nv show router bgp neighbor`, then `nv show qos roce`.",
        &references,
    );
    assert!(result.is_valid, "{result:?}");
}

#[test]
fn bare_inline_code_is_checked() {
    let result = GroundingValidator::new().validate_texts("`nv commit`", &["nv config apply"]);
    assert!(!result.is_valid);
    assert_eq!(result.suspicious_commands, ["nv commit"]);
    assert!(result.warnings.is_empty());
}
