use serde::{Deserialize, Serialize};

use super::ScoreDebug;
use crate::chunk::Chunk;
use crate::intent::IntentResult;

/// A hydrated chunk with its final score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    #[serde(flatten)]
    pub chunk: Chunk,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<ScoreDebug>,
}

/// Response of the retrieval API surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub chunks: Vec<ScoredChunk>,
    pub intent: IntentResult,
    pub enhanced_query: String,
    /// True when a channel or the reranker fell back during this query.
    pub degraded: bool,
}
