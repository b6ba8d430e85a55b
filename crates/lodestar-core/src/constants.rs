/// Lodestar version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Separator placed between structural blocks when they are joined into chunk content.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Number of hex characters of the document hash used as a chunk id prefix.
pub const CHUNK_ID_PREFIX_LEN: usize = 12;

/// Hard cap on transient-failure retries for any external call.
pub const MAX_RETRY_ATTEMPTS: u32 = 2;

/// Component names used in degradation events.
pub const COMPONENT_KEYWORD_CHANNEL: &str = "keyword_search";
pub const COMPONENT_VECTOR_CHANNEL: &str = "vector_search";
pub const COMPONENT_RERANKER: &str = "reranker";
