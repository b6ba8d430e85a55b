//! ChunkingEngine: document → parent/child chunk arena.
//!
//! Pipeline: blocks::parse → tree::build → one parent per non-empty section
//! → window split for parents over `max_parent_size`.

use lodestar_core::config::ChunkingConfig;
use lodestar_core::constants::CHUNK_ID_PREFIX_LEN;
use lodestar_core::errors::{ChunkingError, LodestarResult};
use lodestar_core::{Chunk, ChunkArena, ChunkMetadata, ChunkType};
use lodestar_observability::chunking_span;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::blocks;
use crate::summary::summarize;
use crate::tree::{self, Section};
use crate::window::{self, Unit};

/// Stateless apart from its validated configuration; safe to share across threads.
#[derive(Debug, Clone)]
pub struct ChunkingEngine {
    config: ChunkingConfig,
}

impl ChunkingEngine {
    /// Fails with a validation error when the size parameters are inconsistent.
    pub fn new(config: ChunkingConfig) -> LodestarResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Chunk a document, deriving chunk ids from its content hash.
    pub fn chunk(&self, document: &str) -> LodestarResult<ChunkArena> {
        self.chunk_with_id(&document_id(document), document)
    }

    /// Chunk a document using `doc_id` as the id prefix for every chunk.
    pub fn chunk_with_id(&self, doc_id: &str, document: &str) -> LodestarResult<ChunkArena> {
        let _span = chunking_span!(doc_id).entered();
        let sections = tree::build(blocks::parse(document));
        if sections.iter().all(|s| s.blocks.is_empty()) {
            return Err(ChunkingError::EmptyDocument.into());
        }

        let mut arena = ChunkArena::new();
        let mut parent_seq = 0usize;

        for index in 0..sections.len() {
            let units = window::units_from_blocks(&tree::content_blocks(&sections, index));
            if units.is_empty() {
                continue;
            }
            let parent_id = format!("{doc_id}-p{parent_seq}");
            parent_seq += 1;
            self.emit_section(&mut arena, &sections[index], parent_id, &units);
        }

        info!(
            doc_id,
            parents = arena.parents().count(),
            children = arena.children().count(),
            "document chunked"
        );
        Ok(arena)
    }

    /// Chunk many `(doc_id, document)` pairs in parallel. Results keep input order.
    pub fn chunk_documents(&self, documents: &[(String, String)]) -> Vec<LodestarResult<ChunkArena>> {
        documents
            .par_iter()
            .map(|(id, text)| self.chunk_with_id(id, text))
            .collect()
    }

    fn emit_section(&self, arena: &mut ChunkArena, section: &Section, parent_id: String, units: &[Unit]) {
        let content = window::join(units);
        let metadata = ChunkMetadata {
            breadcrumbs: section.breadcrumbs.clone(),
            header: section.title.clone(),
            level: section.level,
            summary: summarize(&content, self.config.summary_chars),
            child_index: None,
            total_children: None,
        };
        let oversized = content.chars().count() > self.config.max_parent_size;

        arena.push(Chunk {
            id: parent_id.clone(),
            chunk_type: ChunkType::Parent,
            content,
            parent_id: None,
            metadata: metadata.clone(),
        });

        if !oversized {
            return;
        }

        let ranges = window::windows(units, self.config.max_child_size, self.config.overlap_size);
        if ranges.len() < 2 {
            // A single oversized unit; the parent already holds it whole.
            debug!(parent = %parent_id, "oversized parent has one indivisible unit");
            return;
        }

        let total = ranges.len();
        for (child_index, range) in ranges.into_iter().enumerate() {
            let text = window::join(&units[range]);
            arena.push(Chunk {
                id: format!("{parent_id}-c{child_index}"),
                chunk_type: ChunkType::Child,
                parent_id: Some(parent_id.clone()),
                metadata: ChunkMetadata {
                    summary: summarize(&text, self.config.summary_chars),
                    child_index: Some(child_index),
                    total_children: Some(total),
                    ..metadata.clone()
                },
                content: text,
            });
        }
        debug!(parent = %parent_id, children = total, "split oversized parent");
    }
}

/// Content-derived id prefix: the leading hex digits of the blake3 hash.
pub fn document_id(document: &str) -> String {
    let hash = blake3::hash(document.as_bytes()).to_hex();
    hash.as_str()[..CHUNK_ID_PREFIX_LEN].to_string()
}

/// One-shot chunking with explicit size parameters.
pub fn chunk(
    document: &str,
    max_parent_size: usize,
    max_child_size: usize,
    overlap_size: usize,
) -> LodestarResult<ChunkArena> {
    ChunkingEngine::new(ChunkingConfig::new(max_parent_size, max_child_size, overlap_size))?
        .chunk(document)
}
