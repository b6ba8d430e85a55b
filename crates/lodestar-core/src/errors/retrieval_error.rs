/// Retrieval errors surfaced to callers.
///
/// Individual channel failures never appear here; they are absorbed and
/// reported as degradation events. Only total failure propagates.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("retrieval failed on every channel: keyword: {keyword}; vector: {vector}")]
    RetrievalFailed { keyword: String, vector: String },
}
