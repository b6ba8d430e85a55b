//! # lodestar-core
//!
//! Foundation crate for the Lodestar retrieval core.
//! Defines the data model, collaborator traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod chunk;
pub mod config;
pub mod constants;
pub mod errors;
pub mod intent;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use chunk::{Chunk, ChunkArena, ChunkMetadata, ChunkType};
pub use config::LodestarConfig;
pub use errors::{LodestarError, LodestarResult};
pub use intent::{Complexity, Intent, IntentContext, IntentResult};
pub use models::{ExtractedEntities, SearchResult, ValidationResult};
