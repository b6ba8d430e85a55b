//! Intent classification from query text and recent conversation turns.

pub mod classifier;
pub mod rules;

pub use classifier::{split_clauses, IntentClassifier};
