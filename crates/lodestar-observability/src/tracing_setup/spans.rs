//! Span definitions per operation: chunking, query understanding, retrieval,
//! reranking, grounding.

/// Create a chunking span.
#[macro_export]
macro_rules! chunking_span {
    ($doc_id:expr) => {
        tracing::info_span!("lodestar.chunking", doc_id = %$doc_id)
    };
}

/// Create a retrieval span.
#[macro_export]
macro_rules! retrieval_span {
    ($query:expr, $intent:expr, $limit:expr) => {
        tracing::info_span!("lodestar.retrieval", query = %$query, intent = %$intent, limit = $limit)
    };
}

/// Create a rerank span.
#[macro_export]
macro_rules! rerank_span {
    ($sets:expr, $candidates:expr) => {
        tracing::info_span!("lodestar.rerank", sets = $sets, candidates = $candidates)
    };
}

/// Create a search span covering the whole pipeline.
#[macro_export]
macro_rules! search_span {
    ($query:expr, $limit:expr) => {
        tracing::info_span!("lodestar.search", query = %$query, limit = $limit)
    };
}

/// Create a grounding span.
#[macro_export]
macro_rules! grounding_span {
    ($references:expr) => {
        tracing::info_span!("lodestar.grounding", references = $references)
    };
}

