//! Batched cross-encoder reranking across sub-queries.
//!
//! Every candidate of every sub-query goes out in one reranker call. Each pair
//! is tagged with the set it came from so scores can be routed back. Any
//! failure of that call leaves every set in its pre-rerank order.

use std::sync::Arc;

use lodestar_core::config::RerankConfig;
use lodestar_core::constants::COMPONENT_RERANKER;
use lodestar_core::errors::{BackendError, Channel, LodestarResult};
use lodestar_core::models::DegradationEvent;
use lodestar_core::traits::{IChunkStore, IReranker, RerankPair};
use lodestar_core::SearchResult;
use lodestar_observability::{rerank_span, DegradationTracker};
use tracing::{debug, Instrument};

use crate::search::channel::{self, CallPolicy};

/// Candidates retrieved for one sub-query.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSet {
    /// Query text the reranker scores candidates against.
    pub query: String,
    pub results: Vec<SearchResult>,
}

impl CandidateSet {
    pub fn new(query: impl Into<String>, results: Vec<SearchResult>) -> Self {
        Self {
            query: query.into(),
            results,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RerankOutcome {
    /// One list per input set, in input order.
    pub sets: Vec<Vec<SearchResult>>,
    /// The reranker failed and the sets are returned unchanged.
    pub degraded: bool,
}

/// Origin of one flattened pair.
#[derive(Debug, Clone, Copy)]
struct Tag {
    set: usize,
    position: usize,
}

pub struct RerankBatcher<R> {
    reranker: R,
    tracker: Arc<DegradationTracker>,
    config: RerankConfig,
}

impl<R: IReranker> RerankBatcher<R> {
    pub fn new(reranker: R, tracker: Arc<DegradationTracker>, config: RerankConfig) -> Self {
        Self {
            reranker,
            tracker,
            config,
        }
    }

    pub fn config(&self) -> &RerankConfig {
        &self.config
    }

    /// Rerank every set with one backend call.
    ///
    /// Candidates without text in `store` cannot be scored; they keep their
    /// relative order after the scored ones.
    pub async fn rerank_batched<S: IChunkStore + ?Sized>(
        &self,
        sets: Vec<CandidateSet>,
        store: &S,
    ) -> RerankOutcome {
        let candidates: usize = sets.iter().map(|s| s.results.len()).sum();
        if !self.config.enabled || candidates == 0 {
            return unchanged(sets, false);
        }

        let span = rerank_span!(sets.len(), candidates);
        async {
            let (pairs, tags) = flatten(&sets, store);
            if pairs.is_empty() {
                return unchanged(sets, false);
            }

            match self.score(&pairs).await {
                Ok(scores) => {
                    debug!(pairs = pairs.len(), "rerank complete");
                    self.tracker.mark_recovered(COMPONENT_RERANKER);
                    RerankOutcome {
                        sets: redistribute(sets, &tags, &scores),
                        degraded: false,
                    }
                }
                Err(e) => {
                    self.tracker.record(DegradationEvent::now(
                        COMPONENT_RERANKER,
                        e.to_string(),
                        "pre-rerank order",
                    ));
                    unchanged(sets, true)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn score(&self, pairs: &[RerankPair]) -> LodestarResult<Vec<f64>> {
        let policy = CallPolicy::for_reranker(&self.config);
        let reranker = &self.reranker;
        let scores = channel::call(Channel::Reranker, policy, move || reranker.score(pairs)).await?;
        if scores.len() != pairs.len() {
            return Err(BackendError::InvalidResponse {
                channel: Channel::Reranker,
                reason: format!("expected {} scores, got {}", pairs.len(), scores.len()),
            }
            .into());
        }
        Ok(scores)
    }
}

fn unchanged(sets: Vec<CandidateSet>, degraded: bool) -> RerankOutcome {
    RerankOutcome {
        sets: sets.into_iter().map(|s| s.results).collect(),
        degraded,
    }
}

fn flatten<S: IChunkStore + ?Sized>(
    sets: &[CandidateSet],
    store: &S,
) -> (Vec<RerankPair>, Vec<Tag>) {
    let mut pairs = Vec::new();
    let mut tags = Vec::new();
    for (set_index, set) in sets.iter().enumerate() {
        for (position, result) in set.results.iter().enumerate() {
            if let Some(chunk) = store.get(&result.chunk_id) {
                pairs.push(RerankPair {
                    query: set.query.clone(),
                    text: chunk.content,
                });
                tags.push(Tag {
                    set: set_index,
                    position,
                });
            }
        }
    }
    (pairs, tags)
}

/// Route scores back to their sets and reorder each set by them.
fn redistribute(sets: Vec<CandidateSet>, tags: &[Tag], scores: &[f64]) -> Vec<Vec<SearchResult>> {
    let mut scored: Vec<Vec<Option<f64>>> = sets
        .iter()
        .map(|s| vec![None; s.results.len()])
        .collect();
    for (tag, score) in tags.iter().zip(scores) {
        scored[tag.set][tag.position] = Some(*score);
    }

    sets.into_iter()
        .zip(scored)
        .map(|(set, scores)| {
            let mut ranked: Vec<(usize, Option<f64>, SearchResult)> = set
                .results
                .into_iter()
                .zip(scores)
                .enumerate()
                .map(|(position, (mut result, score))| {
                    if let Some(score) = score {
                        result.debug.rerank_score = Some(score);
                        result.score = score;
                    }
                    (position, score, result)
                })
                .collect();
            ranked.sort_by(|a, b| match (a.1, b.1) {
                (Some(x), Some(y)) => y.total_cmp(&x).then(a.0.cmp(&b.0)),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => a.0.cmp(&b.0),
            });
            ranked.into_iter().map(|(_, _, result)| result).collect()
        })
        .collect()
}
