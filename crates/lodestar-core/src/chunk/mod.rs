mod arena;

pub use arena::ChunkArena;

use serde::{Deserialize, Serialize};

/// Position of a chunk in the two-level hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkType {
    /// One per header section; carries structural context.
    Parent,
    /// Size-bounded window over an oversized parent.
    Child,
}

/// Structural metadata attached to every chunk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Header titles from the document root down to (and including) the chunk's section.
    pub breadcrumbs: Vec<String>,
    /// Title of the chunk's own section, `None` for untitled preamble text.
    pub header: Option<String>,
    /// Header level of the section (0 for the untitled root).
    pub level: u8,
    /// First meaningful line of the content.
    pub summary: String,
    /// Zero-based window position, children only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_index: Option<usize>,
    /// Number of sibling windows, children only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_children: Option<usize>,
}

/// A contiguous unit of document text stored for retrieval.
///
/// Immutable once created. Parent/child links are id references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub chunk_type: ChunkType,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub metadata: ChunkMetadata,
}

impl Chunk {
    pub fn is_parent(&self) -> bool {
        self.chunk_type == ChunkType::Parent
    }

    pub fn is_child(&self) -> bool {
        self.chunk_type == ChunkType::Child
    }

    /// Breadcrumbs rendered as a single display title, e.g. `BGP > Neighbors`.
    pub fn title(&self) -> String {
        self.metadata.breadcrumbs.join(" > ")
    }
}
