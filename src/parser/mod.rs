//! Markdown parsing module.

mod markdown;
mod options;

pub use markdown::MarkdownParser;
pub use options::ParseOptions;
