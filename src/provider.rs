//! The document model seam: parsing source into blocks and rendering blocks
//! back to text.
//!
//! The paginator only sees this trait, so a different Markdown flavour (or a
//! test double that fails on purpose) can be plugged in without touching the
//! pagination code.

use crate::error::Result;
use crate::model::{Block, Document};
use crate::parser::{MarkdownParser, ParseOptions};
use crate::render::{MarkdownRenderer, RenderOptions};

/// Parses documents and re-serializes individual blocks.
pub trait DocumentModel {
    /// Parse source text into a document.
    fn parse(&self, source: &str) -> Result<Document>;

    /// Render one block (or a reconstructed table chunk) back to text.
    ///
    /// An error here is local to the block; callers recover from it.
    fn render(&self, block: &Block, source: &str) -> Result<String>;
}

/// Default model: `pulldown-cmark` parsing and Markdown re-serialization.
#[derive(Debug, Clone, Default)]
pub struct MarkdownModel {
    parser: MarkdownParser,
    renderer: MarkdownRenderer,
}

impl MarkdownModel {
    /// Create a model with custom options.
    pub fn new(parse_options: ParseOptions, render_options: RenderOptions) -> Self {
        Self {
            parser: MarkdownParser::new(parse_options),
            renderer: MarkdownRenderer::new(render_options),
        }
    }
}

impl DocumentModel for MarkdownModel {
    fn parse(&self, source: &str) -> Result<Document> {
        Ok(self.parser.parse(source))
    }

    fn render(&self, block: &Block, source: &str) -> Result<String> {
        self.renderer.render(block, source)
    }
}

impl<M: DocumentModel + ?Sized> DocumentModel for &M {
    fn parse(&self, source: &str) -> Result<Document> {
        (**self).parse(source)
    }

    fn render(&self, block: &Block, source: &str) -> Result<String> {
        (**self).render(block, source)
    }
}
