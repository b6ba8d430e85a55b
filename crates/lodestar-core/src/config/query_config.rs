use serde::{Deserialize, Serialize};

use super::defaults;

/// Query understanding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Below this confidence the classifier re-runs over recent history.
    pub confidence_floor: f64,
    /// Number of most recent history turns folded into the context-aware re-run.
    pub history_turns: usize,
    /// Optional TOML file replacing the embedded dictionaries.
    pub dictionaries_path: Option<String>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            confidence_floor: defaults::DEFAULT_CONFIDENCE_FLOOR,
            history_turns: defaults::DEFAULT_HISTORY_TURNS,
            dictionaries_path: None,
        }
    }
}
