/// Chunking errors. Both are raised before any chunk is produced.
#[derive(Debug, thiserror::Error)]
pub enum ChunkingError {
    #[error("invalid chunking parameter {field}: {reason}")]
    ValidationError { field: String, reason: String },

    #[error("document has no extractable content")]
    EmptyDocument,
}
