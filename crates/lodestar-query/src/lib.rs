//! # lodestar-query
//!
//! Query understanding for the retrieval pipeline.
//!
//! ```text
//! query ──┬── intent      rule scoring → IntentResult (+ sub-intents, history re-run)
//!         ├── entities    CIDR → IPv4 → IPv6 → CLI → topic terms → residual tokens
//!         └── enhancer    entities → expanded search string
//! ```
//!
//! Vocabulary comes from [`dictionaries::Dictionaries`], embedded by default
//! and replaceable at startup.

pub mod dictionaries;
pub mod enhancer;
pub mod entities;
pub mod intent;
mod matching;
pub mod understanding;

pub use dictionaries::Dictionaries;
pub use enhancer::QueryEnhancer;
pub use entities::EntityExtractor;
pub use intent::IntentClassifier;
pub use understanding::{QueryUnderstanding, UnderstoodQuery};
