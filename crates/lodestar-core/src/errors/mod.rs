mod backend_error;
mod chunking_error;
mod config_error;
mod retrieval_error;

pub use backend_error::{BackendError, Channel};
pub use chunking_error::ChunkingError;
pub use config_error::ConfigError;
pub use retrieval_error::RetrievalError;

/// Top-level error for every Lodestar crate.
#[derive(Debug, thiserror::Error)]
pub enum LodestarError {
    #[error(transparent)]
    Chunking(#[from] ChunkingError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("dictionary error: {reason}")]
    Dictionary { reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl LodestarError {
    /// Whether the error came from a single collaborator call that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Backend(e) => e.is_transient(),
            _ => false,
        }
    }
}

pub type LodestarResult<T> = Result<T, LodestarError>;
