//! Mock collaborators shared by the integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use lodestar_core::errors::{BackendError, Channel, LodestarResult};
use lodestar_core::models::RankedHit;
use lodestar_core::traits::{ILexicalSearch, IReranker, IVectorSearch, RerankPair};
use lodestar_core::{Chunk, ChunkMetadata, ChunkType};
use lodestar_retrieval::InMemoryChunkStore;

/// How a mock channel answers.
#[derive(Debug, Clone)]
pub enum Behavior {
    Hits(Vec<RankedHit>),
    Fail,
    /// Sleep, then answer with the hits.
    Slow(Duration, Vec<RankedHit>),
}

/// A search channel usable as either the lexical or the vector collaborator.
#[derive(Clone)]
pub struct MockChannel {
    channel: Channel,
    behavior: Behavior,
    pub calls: Arc<AtomicUsize>,
    pub last_limit: Arc<AtomicUsize>,
}

impl MockChannel {
    pub fn new(channel: Channel, behavior: Behavior) -> Self {
        Self {
            channel,
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
            last_limit: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn keyword(ids: &[&str]) -> Self {
        Self::new(Channel::Keyword, Behavior::Hits(hits(ids)))
    }

    pub fn vector(ids: &[&str]) -> Self {
        Self::new(Channel::Vector, Behavior::Hits(hits(ids)))
    }

    pub fn failing(channel: Channel) -> Self {
        Self::new(channel, Behavior::Fail)
    }

    pub fn slow(channel: Channel, delay: Duration, ids: &[&str]) -> Self {
        Self::new(channel, Behavior::Slow(delay, hits(ids)))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn answer(&self, limit: usize) -> LodestarResult<Vec<RankedHit>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_limit.store(limit, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Hits(hits) => Ok(hits.iter().take(limit).cloned().collect()),
            Behavior::Fail => Err(BackendError::Unavailable {
                channel: self.channel,
                reason: "connection refused".into(),
            }
            .into()),
            Behavior::Slow(delay, hits) => {
                tokio::time::sleep(*delay).await;
                Ok(hits.iter().take(limit).cloned().collect())
            }
        }
    }
}

impl ILexicalSearch for MockChannel {
    async fn search(&self, _query: &str, limit: usize) -> LodestarResult<Vec<RankedHit>> {
        self.answer(limit).await
    }
}

impl IVectorSearch for MockChannel {
    async fn search(&self, _query: &str, limit: usize) -> LodestarResult<Vec<RankedHit>> {
        self.answer(limit).await
    }
}

/// Hits with descending scores in the given order.
pub fn hits(ids: &[&str]) -> Vec<RankedHit> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| RankedHit::new(*id, 10.0 - i as f64 * 0.01))
        .collect()
}

#[derive(Debug, Clone)]
pub enum RerankBehavior {
    /// Score each pair by the length of its candidate text.
    ByLength,
    Fail,
    Slow(Duration),
    /// Return one score fewer than requested.
    Short,
}

/// Reranker that records every batch it receives.
#[derive(Clone)]
pub struct MockReranker {
    behavior: RerankBehavior,
    pub batches: Arc<Mutex<Vec<Vec<RerankPair>>>>,
}

impl MockReranker {
    pub fn new(behavior: RerankBehavior) -> Self {
        Self {
            behavior,
            batches: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn batches(&self) -> Vec<Vec<RerankPair>> {
        self.batches.lock().unwrap().clone()
    }
}

impl IReranker for MockReranker {
    async fn score(&self, pairs: &[RerankPair]) -> LodestarResult<Vec<f64>> {
        self.batches.lock().unwrap().push(pairs.to_vec());
        match &self.behavior {
            RerankBehavior::ByLength => Ok(pairs.iter().map(|p| p.text.len() as f64).collect()),
            RerankBehavior::Fail => Err(BackendError::Unavailable {
                channel: Channel::Reranker,
                reason: "model not loaded".into(),
            }
            .into()),
            RerankBehavior::Slow(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(vec![0.0; pairs.len()])
            }
            RerankBehavior::Short => Ok(vec![1.0; pairs.len().saturating_sub(1)]),
        }
    }
}

pub fn chunk(id: &str, content: &str) -> Chunk {
    Chunk {
        id: id.to_string(),
        chunk_type: ChunkType::Parent,
        content: content.to_string(),
        parent_id: None,
        metadata: ChunkMetadata::default(),
    }
}

/// Store holding one chunk per `(id, content)` pair.
pub fn store(chunks: &[(&str, &str)]) -> InMemoryChunkStore {
    let mut store = InMemoryChunkStore::new();
    for (id, content) in chunks {
        store.insert(chunk(id, content));
    }
    store
}
