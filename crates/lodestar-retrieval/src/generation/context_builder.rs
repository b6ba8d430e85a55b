//! Reference context for answer generation.
//!
//! The same references later feed the grounding validator, so the text
//! handed to the model and the text the answer is checked against match.

use std::collections::HashSet;

use lodestar_core::models::{Reference, ScoredChunk};
use lodestar_core::Chunk;

/// Default character budget for the rendered context.
pub const DEFAULT_CONTEXT_CHARS: usize = 6000;

#[derive(Debug, Clone)]
pub struct ContextBuilder {
    max_chars: usize,
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_CHARS)
    }
}

impl ContextBuilder {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// References for `chunks` in rank order, within the character budget.
    ///
    /// A child whose parent is already included adds nothing and is skipped.
    /// The first reference is always kept, even when it alone exceeds the budget.
    pub fn references(&self, chunks: &[ScoredChunk]) -> Vec<Reference> {
        let mut included: HashSet<&str> = HashSet::new();
        let mut references = Vec::new();
        let mut used = 0;

        for scored in chunks {
            let chunk = &scored.chunk;
            if included.contains(chunk.id.as_str()) {
                continue;
            }
            if let Some(parent) = &chunk.parent_id {
                if included.contains(parent.as_str()) {
                    continue;
                }
            }

            let size = chunk.content.chars().count();
            if !references.is_empty() && used + size > self.max_chars {
                break;
            }
            used += size;
            included.insert(chunk.id.as_str());
            references.push(reference(chunk));
        }

        references
    }

    /// Numbered prompt context, one block per reference.
    pub fn render(references: &[Reference]) -> String {
        references
            .iter()
            .enumerate()
            .map(|(i, r)| format!("[{}] {}\n{}", i + 1, r.title, r.text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// A chunk as a reference, titled by its breadcrumb path.
pub fn reference(chunk: &Chunk) -> Reference {
    let title = if chunk.metadata.breadcrumbs.is_empty() {
        chunk.metadata.summary.clone()
    } else {
        chunk.title()
    };
    Reference {
        chunk_id: chunk.id.clone(),
        title,
        text: chunk.content.clone(),
    }
}
