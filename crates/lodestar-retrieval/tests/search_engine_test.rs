//! End-to-end search over the RoCE guide: chunking → keyword index → search.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use common::{MockChannel, MockReranker, RerankBehavior};
use lodestar_chunking::ChunkingEngine;
use lodestar_core::config::{ChunkingConfig, QueryConfig, RerankConfig, RetrievalConfig};
use lodestar_core::errors::{Channel, LodestarError, RetrievalError};
use lodestar_core::traits::ILexicalSearch;
use lodestar_core::Intent;
use lodestar_observability::DegradationTracker;
use lodestar_query::QueryUnderstanding;
use lodestar_retrieval::{
    ContextBuilder, HybridRetriever, InMemoryChunkStore, KeywordIndex, QueryCache, RerankBatcher,
    SearchEngine,
};
use test_fixtures::load_text_fixture;

type Engine<L> = SearchEngine<L, MockChannel, MockReranker, InMemoryChunkStore>;

fn store() -> InMemoryChunkStore {
    let engine = ChunkingEngine::new(ChunkingConfig::default()).unwrap();
    let arena = engine
        .chunk(&load_text_fixture("documents/roce_guide.md"))
        .unwrap();
    InMemoryChunkStore::from_arena(arena)
}

fn build<L: ILexicalSearch>(
    lexical: L,
    vector: MockChannel,
    reranker: MockReranker,
    rerank: RerankConfig,
    store: InMemoryChunkStore,
) -> Engine<L> {
    let tracker = Arc::new(DegradationTracker::new());
    let retriever = HybridRetriever::new(
        lexical,
        vector,
        Arc::new(QueryCache::default()),
        tracker.clone(),
        RetrievalConfig::default(),
    );
    let batcher = RerankBatcher::new(reranker, tracker, rerank);
    let understanding = QueryUnderstanding::from_config(&QueryConfig::default()).unwrap();
    SearchEngine::new(understanding, retriever, batcher, store)
}

/// Keyword index over the guide, no vector hits, reranking off so RRF order shows.
fn keyword_engine() -> Engine<KeywordIndex> {
    let store = store();
    let index = KeywordIndex::from_chunks(store.chunks());
    build(
        index,
        MockChannel::vector(&[]),
        MockReranker::new(RerankBehavior::ByLength),
        RerankConfig {
            enabled: false,
            ..Default::default()
        },
        store,
    )
}

#[tokio::test]
async fn finds_the_watchdog_passage() {
    let response = keyword_engine()
        .search("how to enable the PFC watchdog", 3)
        .await
        .unwrap();

    assert!(!response.chunks.is_empty());
    assert!(response.chunks.len() <= 3);
    assert!(response
        .chunks
        .iter()
        .any(|c| c.chunk.content.contains("watchdog")));
    assert_eq!(response.intent.intent, Intent::Configuration);
    assert!(response.enhanced_query.contains("pfc"));
    assert!(!response.degraded);
}

#[tokio::test]
async fn hydrated_chunks_are_unique_and_non_empty() {
    let response = keyword_engine().search("ECN buffer threshold", 4).await.unwrap();
    let mut seen = HashSet::new();
    for scored in &response.chunks {
        assert!(!scored.chunk.content.trim().is_empty());
        assert!(seen.insert(scored.chunk.id.clone()), "duplicate {}", scored.chunk.id);
    }
    let scores: Vec<f64> = response.chunks.iter().map(|c| c.score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn zero_matches_is_ok_and_empty() {
    let response = keyword_engine().search("zzqx qqvv", 5).await.unwrap();
    assert!(response.chunks.is_empty());
    assert!(!response.degraded);
}

#[tokio::test]
async fn total_channel_failure_is_retrieval_failed() {
    let engine = build(
        MockChannel::failing(Channel::Keyword),
        MockChannel::failing(Channel::Vector),
        MockReranker::new(RerankBehavior::ByLength),
        RerankConfig::default(),
        store(),
    );
    let err = engine.search("pfc watchdog", 5).await.unwrap_err();
    assert!(matches!(
        err,
        LodestarError::Retrieval(RetrievalError::RetrievalFailed { .. })
    ));
}

#[tokio::test]
async fn vector_outage_still_answers_degraded() {
    let store = store();
    let index = KeywordIndex::from_chunks(store.chunks());
    let engine = build(
        index,
        MockChannel::failing(Channel::Vector),
        MockReranker::new(RerankBehavior::ByLength),
        RerankConfig::default(),
        store,
    );
    let response = engine.search("pfc pause storms", 3).await.unwrap();
    assert!(!response.chunks.is_empty());
    assert!(response.degraded);
}

#[tokio::test]
async fn debug_is_opt_in() {
    let plain = keyword_engine().search("roce lossless", 2).await.unwrap();
    assert!(plain.chunks.iter().all(|c| c.debug.is_none()));

    let verbose = keyword_engine()
        .with_debug(true)
        .search("roce lossless", 2)
        .await
        .unwrap();
    assert!(!verbose.chunks.is_empty());
    for scored in &verbose.chunks {
        let debug = scored.debug.as_ref().unwrap();
        assert!(debug.keyword_rank.is_some());
        assert!(debug.rrf_score > 0.0);
    }
}

#[tokio::test]
async fn multi_part_query_reranks_in_one_call() {
    let store = store();
    let index = KeywordIndex::from_chunks(store.chunks());
    let reranker = MockReranker::new(RerankBehavior::ByLength);
    let engine = build(
        index,
        MockChannel::vector(&[]),
        reranker.clone(),
        RerankConfig::default(),
        store,
    );

    let response = engine
        .search("configure ecn on swp1 then verify pfc counters", 5)
        .await
        .unwrap();
    assert!(!response.chunks.is_empty());
    assert_eq!(response.intent.sub_intents, vec![Intent::Configuration]);

    let batches = reranker.batches();
    assert_eq!(batches.len(), 1);
    let queries: HashSet<&str> = batches[0].iter().map(|p| p.query.as_str()).collect();
    assert!(queries.len() >= 2, "expected pairs from several sub-queries");
    assert!(response.chunks.iter().all(|c| c.debug.is_none()));
}

#[tokio::test]
async fn references_follow_response_order() {
    let response = keyword_engine().search("nv config apply", 3).await.unwrap();
    let references = ContextBuilder::default().references(&response.chunks);
    assert!(!references.is_empty());
    assert_eq!(references[0].chunk_id, response.chunks[0].chunk.id);
    let context = ContextBuilder::render(&references);
    assert!(context.starts_with("[1] "));
}
