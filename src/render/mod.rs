//! Rendering module: block re-serialization and the resilient fallback.

mod markdown;
mod options;
mod resilient;
pub mod text;

pub use markdown::MarkdownRenderer;
pub use options::RenderOptions;
pub use resilient::{FragmentSource, RenderedFragment, ResilientRenderer};
