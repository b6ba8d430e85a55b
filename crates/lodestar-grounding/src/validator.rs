//! GroundingValidator: flags answer commands that no reference contains.
//!
//! Advisory only. The answer is never modified and validation never fails;
//! callers log the result or surface it in the UI.

use lodestar_core::models::Reference;
use lodestar_core::ValidationResult;
use lodestar_observability::grounding_span;
use lodestar_observability::tracing_setup::events;
use tracing::debug;

use crate::patterns::{self, contains_bounded, normalize};

/// Reference text prepared once per validation.
struct Corpus {
    /// Whitespace-normalized reference texts.
    texts: Vec<String>,
    /// Same texts, lowercased, for case-insensitive value lookups.
    lowered: Vec<String>,
}

impl Corpus {
    fn new(references: &[Reference]) -> Self {
        let texts: Vec<String> = references.iter().map(|r| normalize(&r.text)).collect();
        let lowered = texts.iter().map(|t| t.to_lowercase()).collect();
        Self { texts, lowered }
    }

    fn contains_command(&self, command: &str) -> bool {
        self.texts.iter().any(|t| contains_bounded(t, command))
    }

    fn contains_value(&self, value: &str) -> bool {
        self.lowered.iter().any(|t| contains_bounded(t, value))
    }

    /// `value` and `qualifier` both appear in one reference.
    fn contains_pair(&self, qualifier: &str, value: &str) -> bool {
        self.lowered
            .iter()
            .any(|t| contains_bounded(t, qualifier) && contains_bounded(t, value))
    }
}

#[derive(Debug, Clone, Default)]
pub struct GroundingValidator;

impl GroundingValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, answer: &str, references: &[Reference]) -> ValidationResult {
        let _span = grounding_span!(references.len()).entered();
        let corpus = Corpus::new(references);

        let suspicious_commands: Vec<String> = patterns::extract_commands(answer)
            .into_iter()
            .filter(|command| !corpus.contains_command(command))
            .collect();

        let mut warnings = Vec::new();
        if references.is_empty() {
            warnings.push("no references were supplied".to_string());
        }
        for address in patterns::addresses(answer) {
            if !corpus.contains_value(&address) {
                push_unique(&mut warnings, format!("address {address} does not appear in any reference"));
            }
        }
        for interface in patterns::interfaces(answer) {
            if !corpus.contains_value(&interface) {
                push_unique(&mut warnings, format!("interface {interface} does not appear in any reference"));
            }
        }
        for parameter in patterns::parameters(answer) {
            if !corpus.contains_pair(&parameter.qualifier, &parameter.value) {
                push_unique(
                    &mut warnings,
                    format!("parameter '{}' does not appear in any reference", parameter.phrase),
                );
            }
        }

        if suspicious_commands.is_empty() {
            debug!(warnings = warnings.len(), "answer commands grounded");
        } else {
            events::ungrounded_commands(&suspicious_commands, warnings.len());
        }

        ValidationResult {
            is_valid: suspicious_commands.is_empty(),
            suspicious_commands,
            warnings,
        }
    }

    /// Validate against bare reference texts.
    pub fn validate_texts<S: AsRef<str>>(&self, answer: &str, references: &[S]) -> ValidationResult {
        let references: Vec<Reference> = references
            .iter()
            .enumerate()
            .map(|(i, text)| Reference {
                chunk_id: format!("ref-{i}"),
                title: String::new(),
                text: text.as_ref().to_string(),
            })
            .collect();
        self.validate(answer, &references)
    }
}

fn push_unique(warnings: &mut Vec<String>, warning: String) {
    if !warnings.contains(&warning) {
        warnings.push(warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_missing_from_references_is_suspicious() {
        let result = GroundingValidator::new().validate_texts(
            "执行命令：nv commit",
            &["Use nv config apply to activate pending changes."],
        );
        assert!(!result.is_valid);
        assert_eq!(result.suspicious_commands, ["nv commit"]);
    }

    #[test]
    fn whitespace_differences_do_not_matter() {
        let result = GroundingValidator::new().validate_texts(
            "Run `nv  set qos roce   mode lossless`.",
            &["```\nnv set qos roce\n  mode lossless\n```"],
        );
        assert!(result.is_valid, "{result:?}");
    }

    #[test]
    fn prefix_of_a_longer_argument_is_not_grounded() {
        let result = GroundingValidator::new()
            .validate_texts("`net add vlan 10`", &["net add vlan 100"]);
        assert_eq!(result.suspicious_commands, ["net add vlan 10"]);
    }

    #[test]
    fn answers_without_commands_are_valid() {
        let result = GroundingValidator::new().validate_texts("PFC pauses a single priority.", &["PFC"]);
        assert!(result.is_valid);
        assert!(result.suspicious_commands.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn unknown_values_only_warn() {
        let result = GroundingValidator::new().validate_texts(
            "Peer with 10.9.9.9 on swp48 and set mtu 9000.",
            &["BGP peers 10.1.1.1 over swp1 with mtu 9216."],
        );
        assert!(result.is_valid);
        assert_eq!(
            result.warnings,
            [
                "address 10.9.9.9 does not appear in any reference",
                "interface swp48 does not appear in any reference",
                "parameter 'mtu 9000' does not appear in any reference",
            ]
        );
    }

    #[test]
    fn known_values_do_not_warn() {
        let result = GroundingValidator::new().validate_texts(
            "Keep the ECN min threshold at 150 KB on swp1.",
            &["| ECN min threshold | 150 KB |", "Check swp1 counters"],
        );
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn empty_reference_set_flags_everything() {
        let result = GroundingValidator::new().validate(
            "Apply with nv config apply",
            &[],
        );
        assert_eq!(result.suspicious_commands, ["nv config apply"]);
        assert_eq!(result.warnings, ["no references were supplied"]);
    }
}
