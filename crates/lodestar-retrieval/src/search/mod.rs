//! Hybrid search: lexical + vector channels fused with RRF, behind the query cache.

pub mod channel;
pub mod rrf_fusion;

use std::sync::Arc;

use lodestar_core::config::RetrievalConfig;
use lodestar_core::constants::{COMPONENT_KEYWORD_CHANNEL, COMPONENT_VECTOR_CHANNEL};
use lodestar_core::errors::{Channel, LodestarError, LodestarResult, RetrievalError};
use lodestar_core::intent::Intent;
use lodestar_core::models::{DegradationEvent, RankedHit};
use lodestar_core::traits::{ILexicalSearch, IVectorSearch};
use lodestar_core::SearchResult;
use lodestar_observability::tracing_setup::events;
use lodestar_observability::{retrieval_span, DegradationTracker};
use tracing::{debug, info, Instrument};

use crate::cache::{CacheKey, QueryCache, HYBRID_MODE};
use channel::CallPolicy;

/// Result of one retrieval with provenance flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrievalOutcome {
    pub results: Vec<SearchResult>,
    /// One channel failed and the other was used alone.
    pub degraded: bool,
    /// Served from the query cache without touching either channel.
    pub cached: bool,
}

/// Runs both search channels concurrently and fuses their rankings.
pub struct HybridRetriever<L, V> {
    lexical: L,
    vector: V,
    cache: Arc<QueryCache>,
    tracker: Arc<DegradationTracker>,
    config: RetrievalConfig,
}

impl<L: ILexicalSearch, V: IVectorSearch> HybridRetriever<L, V> {
    pub fn new(
        lexical: L,
        vector: V,
        cache: Arc<QueryCache>,
        tracker: Arc<DegradationTracker>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            lexical,
            vector,
            cache,
            tracker,
            config,
        }
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn tracker(&self) -> &DegradationTracker {
        &self.tracker
    }

    /// Fused, thresholded results for `enhanced_query`, at most `limit` long.
    ///
    /// Fails only when both channels fail. An empty list means nothing matched.
    pub async fn retrieve(
        &self,
        enhanced_query: &str,
        intent: Intent,
        limit: usize,
    ) -> LodestarResult<Vec<SearchResult>> {
        Ok(self.retrieve_detailed(enhanced_query, intent, limit).await?.results)
    }

    pub async fn retrieve_detailed(
        &self,
        enhanced_query: &str,
        intent: Intent,
        limit: usize,
    ) -> LodestarResult<RetrievalOutcome> {
        let span = retrieval_span!(enhanced_query, intent, limit);
        self.run(enhanced_query, intent, limit).instrument(span).await
    }

    /// Cache key for a retrieval with the current configuration.
    pub fn cache_key(&self, query: &str, intent: Intent, limit: usize) -> String {
        CacheKey {
            query,
            mode: HYBRID_MODE,
            limit,
            intent,
            rrf_k: self.config.rrf_k,
            min_score: self.config.min_score_for(intent),
        }
        .digest()
    }

    async fn run(&self, query: &str, intent: Intent, limit: usize) -> LodestarResult<RetrievalOutcome> {
        if limit == 0 || query.trim().is_empty() {
            return Ok(RetrievalOutcome::default());
        }

        let key = self.cache_key(query, intent, limit);
        if let Some(results) = self.cache.get(&key) {
            debug!(results = results.len(), "query cache hit");
            return Ok(RetrievalOutcome {
                results,
                degraded: false,
                cached: true,
            });
        }

        let fetch = limit.saturating_mul(self.config.candidate_multiplier);
        let policy = CallPolicy::for_channels(&self.config);
        let lexical = &self.lexical;
        let vector = &self.vector;
        let (keyword, semantic) = tokio::join!(
            channel::call(Channel::Keyword, policy, move || lexical.search(query, fetch)),
            channel::call(Channel::Vector, policy, move || vector.search(query, fetch)),
        );

        let (keyword_hits, vector_hits, degraded) = match (keyword, semantic) {
            (Ok(k), Ok(v)) => {
                self.tracker.mark_recovered(COMPONENT_KEYWORD_CHANNEL);
                self.tracker.mark_recovered(COMPONENT_VECTOR_CHANNEL);
                (k, v, false)
            }
            (Ok(k), Err(e)) => {
                self.tracker.mark_recovered(COMPONENT_KEYWORD_CHANNEL);
                self.degrade(COMPONENT_VECTOR_CHANNEL, &e, "keyword results only");
                (k, Vec::new(), true)
            }
            (Err(e), Ok(v)) => {
                self.tracker.mark_recovered(COMPONENT_VECTOR_CHANNEL);
                self.degrade(COMPONENT_KEYWORD_CHANNEL, &e, "vector results only");
                (Vec::new(), v, true)
            }
            (Err(ke), Err(ve)) => {
                let (keyword, vector) = (ke.to_string(), ve.to_string());
                events::retrieval_failed(&keyword, &vector);
                return Err(RetrievalError::RetrievalFailed { keyword, vector }.into());
            }
        };

        let results = self.rank(&keyword_hits, &vector_hits, intent, limit);
        info!(
            keyword_hits = keyword_hits.len(),
            vector_hits = vector_hits.len(),
            results = results.len(),
            degraded,
            "hybrid retrieval complete"
        );

        if !degraded || self.config.cache_degraded {
            self.cache.set(key, results.clone());
        }

        Ok(RetrievalOutcome {
            results,
            degraded,
            cached: false,
        })
    }

    fn rank(
        &self,
        keyword: &[RankedHit],
        vector: &[RankedHit],
        intent: Intent,
        limit: usize,
    ) -> Vec<SearchResult> {
        let threshold = self.config.min_score_for(intent);
        rrf_fusion::fuse(keyword, vector, self.config.rrf_k)
            .into_iter()
            .filter(|r| r.score >= threshold)
            .take(limit)
            .collect()
    }

    fn degrade(&self, component: &str, error: &LodestarError, fallback: &str) {
        self.tracker
            .record(DegradationEvent::now(component, error.to_string(), fallback));
    }
}
