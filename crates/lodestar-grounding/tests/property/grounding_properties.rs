//! Property tests for command grounding.

use lodestar_grounding::patterns::normalize;
use lodestar_grounding::GroundingValidator;
use proptest::prelude::*;

/// `nv set ...` / `nv show ...` with one to four lowercase arguments.
fn command() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("set"), Just("show"), Just("unset")],
        prop::collection::vec("[a-z][a-z0-9]{1,7}", 1..4),
    )
        .prop_map(|(verb, args)| format!("nv {verb} {}", args.join(" ")))
}

proptest! {
    #[test]
    fn quoted_command_is_grounded(cmd in command()) {
        let reference = format!("Run {cmd} now");
        let answer = format!("Use `{cmd}` here.");
        let result = GroundingValidator::new().validate_texts(&answer, &[reference]);
        prop_assert!(result.suspicious_commands.is_empty(), "{:?}", result);
    }

    #[test]
    fn command_absent_everywhere_is_suspicious(cmd in command()) {
        let answer = format!("Use `{cmd}` here.");
        let result = GroundingValidator::new()
            .validate_texts(&answer, &["PFC pauses traffic per priority."]);
        prop_assert!(!result.is_valid);
        prop_assert_eq!(result.suspicious_commands, vec![cmd]);
    }

    #[test]
    fn normalize_is_idempotent(text in "[ a-z0-9\t\n.,。]{0,40}") {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once.clone());
    }
}
