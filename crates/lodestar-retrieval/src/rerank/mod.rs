//! Reranking of retrieved candidates.

pub mod batcher;

pub use batcher::{CandidateSet, RerankBatcher, RerankOutcome};
