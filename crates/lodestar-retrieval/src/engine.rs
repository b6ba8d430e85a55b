//! SearchEngine: the `search(query, limit)` surface over the whole pipeline.
//!
//! understand → one retrieval per sub-query (concurrent) → one batched
//! rerank → merge → hydrate from the chunk store.

use std::collections::HashMap;

use futures::future::join_all;
use lodestar_core::errors::LodestarResult;
use lodestar_core::intent::Intent;
use lodestar_core::models::{ScoredChunk, SearchResponse};
use lodestar_core::traits::{IChunkStore, ILexicalSearch, IReranker, IVectorSearch};
use lodestar_core::SearchResult;
use lodestar_observability::search_span;
use lodestar_query::{QueryUnderstanding, UnderstoodQuery};
use tracing::{debug, info, warn, Instrument};

use crate::rerank::{CandidateSet, RerankBatcher};
use crate::search::{rrf_fusion, HybridRetriever};

/// One retrieval issued for a query or one of its clauses.
#[derive(Debug, Clone)]
struct SubQuery {
    /// Natural-language text scored by the reranker.
    text: String,
    /// Expanded text sent to the search channels.
    enhanced: String,
    intent: Intent,
}

impl From<&UnderstoodQuery> for SubQuery {
    fn from(understood: &UnderstoodQuery) -> Self {
        Self {
            text: understood.query.trim().to_string(),
            enhanced: understood.enhanced_query.clone(),
            intent: understood.intent.intent,
        }
    }
}

pub struct SearchEngine<L, V, R, S> {
    understanding: QueryUnderstanding,
    retriever: HybridRetriever<L, V>,
    batcher: RerankBatcher<R>,
    store: S,
    include_debug: bool,
}

impl<L, V, R, S> SearchEngine<L, V, R, S>
where
    L: ILexicalSearch,
    V: IVectorSearch,
    R: IReranker,
    S: IChunkStore,
{
    pub fn new(
        understanding: QueryUnderstanding,
        retriever: HybridRetriever<L, V>,
        batcher: RerankBatcher<R>,
        store: S,
    ) -> Self {
        Self {
            understanding,
            retriever,
            batcher,
            store,
            include_debug: false,
        }
    }

    /// Attach per-channel score provenance to every returned chunk.
    pub fn with_debug(mut self, include_debug: bool) -> Self {
        self.include_debug = include_debug;
        self
    }

    pub fn understanding(&self) -> &QueryUnderstanding {
        &self.understanding
    }

    pub fn retriever(&self) -> &HybridRetriever<L, V> {
        &self.retriever
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn search(&self, query: &str, limit: usize) -> LodestarResult<SearchResponse> {
        self.search_with_history(query, &[], limit).await
    }

    /// Like [`search`](Self::search), with recent user turns available to
    /// intent classification when the query alone is ambiguous.
    ///
    /// Zero matches is `Ok` with no chunks. `Err` means every retrieval failed.
    pub async fn search_with_history(
        &self,
        query: &str,
        history: &[String],
        limit: usize,
    ) -> LodestarResult<SearchResponse> {
        let span = search_span!(query, limit);
        self.run(query, history, limit).instrument(span).await
    }

    async fn run(
        &self,
        query: &str,
        history: &[String],
        limit: usize,
    ) -> LodestarResult<SearchResponse> {
        let understood = self.understanding.understand(query, history);
        if limit == 0 || query.trim().is_empty() {
            return Ok(response(understood, Vec::new(), false));
        }

        let sub_queries = self.sub_queries(&understood);
        let outcomes = join_all(
            sub_queries
                .iter()
                .map(|sq| self.retriever.retrieve_detailed(&sq.enhanced, sq.intent, limit)),
        )
        .await;

        let mut degraded = false;
        let mut sets = Vec::with_capacity(sub_queries.len());
        let mut first_error = None;
        for (sub_query, outcome) in sub_queries.iter().zip(outcomes) {
            match outcome {
                Ok(outcome) => {
                    degraded |= outcome.degraded;
                    sets.push(CandidateSet::new(sub_query.text.clone(), outcome.results));
                }
                Err(e) => {
                    warn!(sub_query = %sub_query.enhanced, error = %e, "sub-query retrieval failed");
                    degraded = true;
                    first_error.get_or_insert(e);
                }
            }
        }
        if sets.is_empty() {
            if let Some(e) = first_error {
                return Err(e);
            }
        }

        let reranked = self.batcher.rerank_batched(sets, &self.store).await;
        degraded |= reranked.degraded;

        let chunks = self.hydrate(merge(reranked.sets), limit);
        info!(
            sub_queries = sub_queries.len(),
            chunks = chunks.len(),
            degraded,
            "search complete"
        );
        Ok(response(understood, chunks, degraded))
    }

    /// The full query first, then each distinct clause of a multi-part query.
    fn sub_queries(&self, understood: &UnderstoodQuery) -> Vec<SubQuery> {
        let mut sub_queries = vec![SubQuery::from(understood)];
        for clause in self.understanding.clauses(&understood.query) {
            if sub_queries.iter().all(|sq| sq.enhanced != clause.enhanced_query) {
                sub_queries.push(SubQuery::from(&clause));
            }
        }
        sub_queries
    }

    fn hydrate(&self, results: Vec<SearchResult>, limit: usize) -> Vec<ScoredChunk> {
        results
            .into_iter()
            .filter_map(|result| match self.store.get(&result.chunk_id) {
                Some(chunk) => Some(ScoredChunk {
                    chunk,
                    score: result.score,
                    debug: self.include_debug.then_some(result.debug),
                }),
                None => {
                    debug!(chunk_id = %result.chunk_id, "retrieved chunk missing from store");
                    None
                }
            })
            .take(limit)
            .collect()
    }
}

/// Union of the per-sub-query lists; a chunk found by several keeps its best score.
fn merge(sets: Vec<Vec<SearchResult>>) -> Vec<SearchResult> {
    let mut best: HashMap<String, SearchResult> = HashMap::new();
    for result in sets.into_iter().flatten() {
        match best.get(&result.chunk_id) {
            Some(existing) if existing.score >= result.score => {}
            _ => {
                best.insert(result.chunk_id.clone(), result);
            }
        }
    }
    let mut merged: Vec<SearchResult> = best.into_values().collect();
    merged.sort_by(rrf_fusion::compare);
    merged
}

fn response(understood: UnderstoodQuery, chunks: Vec<ScoredChunk>, degraded: bool) -> SearchResponse {
    SearchResponse {
        chunks,
        intent: understood.intent,
        enhanced_query: understood.enhanced_query,
        degraded,
    }
}
