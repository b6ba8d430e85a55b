use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::intent::Intent;

/// Hybrid retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// RRF smoothing constant.
    pub rrf_k: u32,
    /// Each channel is asked for `limit * candidate_multiplier` candidates.
    pub candidate_multiplier: usize,
    /// Independent deadline for each search channel.
    pub channel_timeout_ms: u64,
    /// Retries for transient channel failures (at most 2).
    pub max_retries: u32,
    /// Base backoff between retries, doubled per attempt.
    pub retry_backoff_ms: u64,
    /// Minimum fused score for intents without an override.
    pub min_score: f64,
    /// Per-intent minimum fused score, keyed by intent name.
    pub intent_min_scores: BTreeMap<String, f64>,
    /// Whether single-channel (degraded) results are written to the cache.
    ///
    /// Off by default: unlike fused results, which are always written through,
    /// a single-channel list is not cached, so a recovered channel serves the
    /// next identical query instead of the entry living out its TTL.
    pub cache_degraded: bool,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        let mut intent_min_scores = BTreeMap::new();
        intent_min_scores.insert(
            Intent::Configuration.as_str().to_string(),
            defaults::DEFAULT_CONFIGURATION_MIN_SCORE,
        );
        intent_min_scores.insert(
            Intent::Command.as_str().to_string(),
            defaults::DEFAULT_CONFIGURATION_MIN_SCORE,
        );
        Self {
            rrf_k: defaults::DEFAULT_RRF_K,
            candidate_multiplier: defaults::DEFAULT_CANDIDATE_MULTIPLIER,
            channel_timeout_ms: defaults::DEFAULT_CHANNEL_TIMEOUT_MS,
            max_retries: defaults::DEFAULT_MAX_RETRIES,
            retry_backoff_ms: defaults::DEFAULT_RETRY_BACKOFF_MS,
            min_score: defaults::DEFAULT_MIN_SCORE,
            intent_min_scores,
            cache_degraded: defaults::DEFAULT_CACHE_DEGRADED,
        }
    }
}

impl RetrievalConfig {
    /// Minimum fused score applied to results for the given intent.
    pub fn min_score_for(&self, intent: Intent) -> f64 {
        self.intent_min_scores
            .get(intent.as_str())
            .copied()
            .unwrap_or(self.min_score)
    }

    pub fn channel_timeout(&self) -> Duration {
        Duration::from_millis(self.channel_timeout_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}
