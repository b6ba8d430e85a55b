//! Append-only chunk arena indexed by stable id.

use std::collections::HashMap;

use super::Chunk;

/// Chunks from one chunking run, in emission order.
///
/// Parents always precede their children, so a child's `parent_id`
/// resolves at the moment it is pushed.
#[derive(Debug, Clone, Default)]
pub struct ChunkArena {
    chunks: Vec<Chunk>,
    index: HashMap<String, usize>,
}

impl ChunkArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk. Returns `false` (and drops the chunk) if the id is already taken.
    pub fn push(&mut self, chunk: Chunk) -> bool {
        if self.index.contains_key(&chunk.id) {
            return false;
        }
        self.index.insert(chunk.id.clone(), self.chunks.len());
        self.chunks.push(chunk);
        true
    }

    pub fn get(&self, id: &str) -> Option<&Chunk> {
        self.index.get(id).map(|&i| &self.chunks[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// The parent of a child chunk, if it is present in this arena.
    pub fn parent_of(&self, chunk: &Chunk) -> Option<&Chunk> {
        chunk.parent_id.as_deref().and_then(|id| self.get(id))
    }

    /// Children of the given parent, in window order.
    pub fn children_of(&self, parent_id: &str) -> Vec<&Chunk> {
        self.chunks
            .iter()
            .filter(|c| c.parent_id.as_deref() == Some(parent_id))
            .collect()
    }

    pub fn parents(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter().filter(|c| c.is_parent())
    }

    pub fn children(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter().filter(|c| c.is_child())
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chunk> {
        self.chunks.iter()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn into_chunks(self) -> Vec<Chunk> {
        self.chunks
    }
}

impl<'a> IntoIterator for &'a ChunkArena {
    type Item = &'a Chunk;
    type IntoIter = std::slice::Iter<'a, Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}
