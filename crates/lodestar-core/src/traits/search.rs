use crate::errors::LodestarResult;
use crate::models::RankedHit;

/// Term-matching search service.
///
/// Returns hits best-first; the position in the returned list is the rank.
#[allow(async_fn_in_trait)]
pub trait ILexicalSearch: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> LodestarResult<Vec<RankedHit>>;
}

/// Embedding-similarity search service. Embedding the query is the service's concern.
#[allow(async_fn_in_trait)]
pub trait IVectorSearch: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> LodestarResult<Vec<RankedHit>>;
}
