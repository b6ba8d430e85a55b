use crate::chunk::Chunk;

/// Read access to ingested chunks, keyed by chunk id.
pub trait IChunkStore: Send + Sync {
    fn get(&self, id: &str) -> Option<Chunk>;

    fn get_many(&self, ids: &[String]) -> Vec<Chunk> {
        ids.iter().filter_map(|id| self.get(id)).collect()
    }
}
