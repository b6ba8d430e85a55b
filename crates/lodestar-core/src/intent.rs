use std::fmt;

use serde::{Deserialize, Serialize};

/// Query intent categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Command,
    Troubleshoot,
    Configuration,
    Explanation,
    Comparison,
    Performance,
    BestPractice,
    Verification,
    Question,
    General,
}

impl Intent {
    /// Total number of intent types.
    pub const COUNT: usize = 10;

    /// Classification priority, highest first. When several categories score
    /// above zero, the earliest one in this list wins.
    pub const PRIORITY: [Intent; 10] = [
        Self::Troubleshoot,
        Self::Performance,
        Self::BestPractice,
        Self::Verification,
        Self::Configuration,
        Self::Explanation,
        Self::Comparison,
        Self::Command,
        Self::Question,
        Self::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Troubleshoot => "troubleshoot",
            Self::Configuration => "configuration",
            Self::Explanation => "explanation",
            Self::Comparison => "comparison",
            Self::Performance => "performance",
            Self::BestPractice => "best_practice",
            Self::Verification => "verification",
            Self::Question => "question",
            Self::General => "general",
        }
    }

    /// Position in [`Intent::PRIORITY`]; lower is stronger.
    pub fn priority(&self) -> usize {
        Self::PRIORITY
            .iter()
            .position(|i| i == self)
            .unwrap_or(Self::COUNT)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse query complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

/// Presence signals extracted alongside the intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentContext {
    pub has_error: bool,
    pub has_command: bool,
    pub has_parameter: bool,
    pub complexity: Complexity,
}

/// Output of intent classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentResult {
    pub intent: Intent,
    /// Winning score normalized against the best score of any category, in [0, 1].
    pub confidence: f64,
    /// Human-readable trace of the rules that fired.
    pub reasons: Vec<String>,
    /// Intents of the query's other clauses, excluding the primary intent.
    pub sub_intents: Vec<Intent>,
    pub context: IntentContext,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_covers_every_intent_once() {
        let mut seen = Intent::PRIORITY.to_vec();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), Intent::COUNT);
        assert_eq!(Intent::Troubleshoot.priority(), 0);
        assert_eq!(Intent::General.priority(), Intent::COUNT - 1);
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&Intent::BestPractice).unwrap();
        assert_eq!(json, "\"best_practice\"");
    }
}
