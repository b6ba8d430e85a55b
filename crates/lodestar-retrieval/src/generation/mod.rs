//! Turning retrieved chunks into answer-generation context.

pub mod context_builder;

pub use context_builder::ContextBuilder;
