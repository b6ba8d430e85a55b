//! # lodestar-retrieval
//!
//! Hybrid retrieval over the chunk corpus.
//!
//! ```text
//! enhanced query ─▶ QueryCache ─hit─▶ results
//!                      │ miss
//!                      ▼
//!        lexical ║ vector   (concurrent, per-channel deadline + retry)
//!                      ▼
//!              RRF fusion → intent threshold → limit → cache
//!                      ▼
//!              RerankBatcher (one call for all sub-queries)
//! ```
//!
//! [`SearchEngine`] drives the pipeline from a raw user query and hydrates
//! results from an [`IChunkStore`](lodestar_core::traits::IChunkStore).

pub mod cache;
pub mod engine;
pub mod generation;
pub mod memory;
pub mod rerank;
pub mod search;

pub use cache::QueryCache;
pub use engine::SearchEngine;
pub use generation::ContextBuilder;
pub use memory::{InMemoryChunkStore, KeywordIndex};
pub use rerank::{CandidateSet, RerankBatcher};
pub use search::{HybridRetriever, RetrievalOutcome};
