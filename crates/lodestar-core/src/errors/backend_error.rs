use std::fmt;

use serde::{Deserialize, Serialize};

/// The external collaborator a backend call was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Keyword,
    Vector,
    Reranker,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Vector => "vector",
            Self::Reranker => "reranker",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single external collaborator call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BackendError {
    #[error("{channel} backend timed out after {after_ms}ms")]
    Timeout { channel: Channel, after_ms: u64 },

    #[error("{channel} backend unavailable: {reason}")]
    Unavailable { channel: Channel, reason: String },

    #[error("{channel} backend returned an invalid response: {reason}")]
    InvalidResponse { channel: Channel, reason: String },
}

impl BackendError {
    pub fn channel(&self) -> Channel {
        match self {
            Self::Timeout { channel, .. }
            | Self::Unavailable { channel, .. }
            | Self::InvalidResponse { channel, .. } => *channel,
        }
    }

    /// Timeouts and unavailability may clear up on retry; a malformed response will not.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Unavailable { .. })
    }
}
