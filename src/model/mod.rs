//! Document model types for parsed Markdown.
//!
//! The model is a read-only tree of blocks. Each block records the byte span
//! it was parsed from, so any block can be recovered verbatim from the source
//! when it cannot be re-serialized.

mod block;
mod document;
mod table;

pub use block::{Block, BlockKind, ColumnAlignment, Span};
pub use document::Document;
pub use table::{TableChunk, TableView};
