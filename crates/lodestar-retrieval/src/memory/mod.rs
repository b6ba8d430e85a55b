//! In-process collaborators for local use and tests.

pub mod chunk_store;
pub mod keyword_index;

pub use chunk_store::InMemoryChunkStore;
pub use keyword_index::KeywordIndex;
