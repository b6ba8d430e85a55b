mod cache_entry;
mod degradation_event;
mod entities;
mod reference;
mod search_response;
mod search_result;
mod validation_result;

pub use cache_entry::CacheEntry;
pub use degradation_event::DegradationEvent;
pub use entities::{
    AddressKind, CommandEntity, ExtractedEntities, NetworkAddress, SemanticGroup,
};
pub use reference::Reference;
pub use search_response::{ScoredChunk, SearchResponse};
pub use search_result::{RankedHit, ScoreDebug, SearchResult};
pub use validation_result::ValidationResult;
