use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{ChunkingError, LodestarResult};

/// Chunker sizing, measured in characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Parent chunks longer than this are additionally split into children.
    pub max_parent_size: usize,
    /// Target window size for child chunks.
    pub max_child_size: usize,
    /// Backward overlap between consecutive child windows.
    pub overlap_size: usize,
    /// Maximum length of a chunk summary.
    pub summary_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_parent_size: defaults::DEFAULT_MAX_PARENT_SIZE,
            max_child_size: defaults::DEFAULT_MAX_CHILD_SIZE,
            overlap_size: defaults::DEFAULT_OVERLAP_SIZE,
            summary_chars: defaults::DEFAULT_SUMMARY_CHARS,
        }
    }
}

impl ChunkingConfig {
    pub fn new(max_parent_size: usize, max_child_size: usize, overlap_size: usize) -> Self {
        Self {
            max_parent_size,
            max_child_size,
            overlap_size,
            ..Self::default()
        }
    }

    /// Reject malformed sizes before any document is processed.
    pub fn validate(&self) -> LodestarResult<()> {
        for (field, value) in [
            ("max_parent_size", self.max_parent_size),
            ("max_child_size", self.max_child_size),
        ] {
            if value == 0 {
                return Err(invalid(field, "must be greater than zero"));
            }
        }
        if self.max_child_size > self.max_parent_size {
            return Err(invalid(
                "max_child_size",
                &format!(
                    "{} exceeds max_parent_size {}",
                    self.max_child_size, self.max_parent_size
                ),
            ));
        }
        if self.overlap_size >= self.max_child_size {
            return Err(invalid(
                "overlap_size",
                &format!(
                    "{} must be smaller than max_child_size {}",
                    self.overlap_size, self.max_child_size
                ),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> crate::errors::LodestarError {
    ChunkingError::ValidationError {
        field: field.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
