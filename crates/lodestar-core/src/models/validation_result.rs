use serde::{Deserialize, Serialize};

/// Grounding verdict for one generated answer. Advisory only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Answer commands absent from every reference.
    pub suspicious_commands: Vec<String>,
    /// Soft signals that do not affect validity.
    pub warnings: Vec<String>,
}
