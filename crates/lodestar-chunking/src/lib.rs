//! # lodestar-chunking
//!
//! Splits a markdown document into a two-level hierarchy of passages.
//!
//! ```text
//! document
//! ├── blocks    line scanner → headers, paragraphs, code, tables, lists, quotes
//! ├── table     pipe / <table> markup → `column=value` rows
//! ├── tree      header nesting → sections with breadcrumbs
//! └── window    oversized parents → overlapping child windows on block boundaries
//! ```

pub mod blocks;
pub mod engine;
pub mod summary;
pub mod table;
pub mod tree;
pub mod window;

pub use engine::{chunk, ChunkingEngine};
