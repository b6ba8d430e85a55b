use crate::errors::LodestarResult;

/// One (query, candidate) pair submitted for cross-encoder scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RerankPair {
    pub query: String,
    pub text: String,
}

/// Cross-encoder style relevance scoring service.
#[allow(async_fn_in_trait)]
pub trait IReranker: Send + Sync {
    /// Score every pair. The returned scores must align with the input order.
    async fn score(&self, pairs: &[RerankPair]) -> LodestarResult<Vec<f64>>;
}
