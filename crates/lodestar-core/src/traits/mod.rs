mod chunk_store;
mod reranker;
mod search;

pub use chunk_store::IChunkStore;
pub use reranker::{IReranker, RerankPair};
pub use search::{ILexicalSearch, IVectorSearch};
