use lodestar_core::traits::IChunkStore;
use lodestar_core::{Chunk, ChunkArena};

/// Chunk store over one or more chunking runs held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryChunkStore {
    arena: ChunkArena,
}

impl InMemoryChunkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_arena(arena: ChunkArena) -> Self {
        Self { arena }
    }

    /// Add every chunk of `arena`. Chunks whose id is already stored are skipped.
    pub fn extend(&mut self, arena: ChunkArena) -> usize {
        arena
            .into_chunks()
            .into_iter()
            .map(|chunk| self.arena.push(chunk))
            .filter(|inserted| *inserted)
            .count()
    }

    pub fn insert(&mut self, chunk: Chunk) -> bool {
        self.arena.push(chunk)
    }

    pub fn chunks(&self) -> &[Chunk] {
        self.arena.chunks()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }
}

impl IChunkStore for InMemoryChunkStore {
    fn get(&self, id: &str) -> Option<Chunk> {
        self.arena.get(id).cloned()
    }
}
