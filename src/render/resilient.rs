//! Rendering that always yields text.
//!
//! A block is first rendered through the [`DocumentModel`]. When that fails
//! the block's source lines are copied verbatim instead (paragraphs are
//! re-wrapped), so a rendering fault can change how a block looks but never
//! whether it appears.

use serde::{Deserialize, Serialize};

use super::text::{count_lines, ensure_block_separation, expand_to_lines, line_start, wrap_text};
use crate::model::{Block, TableChunk};
use crate::provider::DocumentModel;

/// Where the text of a fragment came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum FragmentSource {
    /// Produced by the document model
    Rendered,
    /// Copied from the source after the document model failed
    FallbackExtracted {
        /// Rendering error that triggered the fallback
        cause: String,
    },
}

/// Text produced for one block, ending with a blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFragment {
    /// Fragment text
    pub text: String,

    /// Number of line breaks in `text`
    pub line_count: usize,

    /// Provenance of `text`
    pub source: FragmentSource,
}

impl RenderedFragment {
    /// Create a fragment from rendered text.
    pub fn rendered(text: String) -> Self {
        Self::new(text, FragmentSource::Rendered)
    }

    /// Create a fragment from extracted source text.
    pub fn fallback(text: String, cause: impl Into<String>) -> Self {
        Self::new(
            text,
            FragmentSource::FallbackExtracted {
                cause: cause.into(),
            },
        )
    }

    fn new(text: String, source: FragmentSource) -> Self {
        let text = ensure_block_separation(text);
        Self {
            line_count: count_lines(&text),
            text,
            source,
        }
    }

    /// Check if the text was extracted from source.
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, FragmentSource::FallbackExtracted { .. })
    }
}

/// Renders blocks of one source document, falling back to source text.
pub struct ResilientRenderer<'a, M: DocumentModel + ?Sized> {
    model: &'a M,
    source: &'a str,
    wrap_width: usize,
}

impl<'a, M: DocumentModel + ?Sized> ResilientRenderer<'a, M> {
    /// Create a renderer over `source`. Fallback paragraphs are wrapped to
    /// `wrap_width` characters.
    pub fn new(model: &'a M, source: &'a str, wrap_width: usize) -> Self {
        Self {
            model,
            source,
            wrap_width,
        }
    }

    /// Render a block.
    pub fn render(&self, block: &Block) -> RenderedFragment {
        match self.model.render(block, self.source) {
            Ok(text) => RenderedFragment::rendered(text),
            Err(err) => {
                let span = block.covering_span();
                log::warn!(
                    "Failed to render {} at bytes {}..{}, using source text: {}",
                    block.kind_name(),
                    span.start,
                    span.end,
                    err
                );
                RenderedFragment::fallback(self.extract(block), err.to_string())
            }
        }
    }

    /// Render a reconstructed table chunk.
    pub fn render_chunk(&self, chunk: &TableChunk) -> RenderedFragment {
        match self.model.render(&chunk.to_block(), self.source) {
            Ok(text) => RenderedFragment::rendered(text),
            Err(err) => {
                log::warn!(
                    "Failed to render table chunk of {} rows, using source text: {}",
                    chunk.row_count(),
                    err
                );
                RenderedFragment::fallback(self.extract_chunk(chunk), err.to_string())
            }
        }
    }

    /// Source text of a block: every line its span touches, with paragraphs
    /// re-wrapped.
    pub fn extract(&self, block: &Block) -> String {
        let raw = expand_to_lines(self.source, block.covering_span());
        if block.is_paragraph() {
            let wrapped = wrap_text(raw, self.wrap_width);
            if !wrapped.is_empty() {
                return wrapped;
            }
        }
        raw.to_string()
    }

    /// Source text of a chunk: the header lines followed by the lines of
    /// each chunk row.
    fn extract_chunk(&self, chunk: &TableChunk) -> String {
        let start = line_start(self.source, chunk.header_span.start);
        let end = line_start(self.source, chunk.header_span.end);
        let mut text = if end > start {
            self.source[start..end].to_string()
        } else {
            expand_to_lines(self.source, chunk.header_span).to_string()
        };

        for row in &chunk.rows {
            let line = expand_to_lines(self.source, row.covering_span());
            text.push_str(line);
            if !line.ends_with('\n') {
                text.push('\n');
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::model::{Document, TableView};
    use crate::provider::MarkdownModel;

    struct FailingModel;

    impl DocumentModel for FailingModel {
        fn parse(&self, source: &str) -> Result<Document> {
            MarkdownModel::default().parse(source)
        }

        fn render(&self, block: &Block, _source: &str) -> Result<String> {
            Err(Error::Render(format!("refusing {}", block.kind_name())))
        }
    }

    #[test]
    fn test_rendered_fragment_gets_separation() {
        let source = "# Title\n";
        let model = MarkdownModel::default();
        let doc = model.parse(source).unwrap();
        let renderer = ResilientRenderer::new(&model, source, 80);

        let fragment = renderer.render(&doc.blocks[0]);
        assert_eq!(fragment.text, "# Title\n\n");
        assert_eq!(fragment.line_count, 2);
        assert_eq!(fragment.source, FragmentSource::Rendered);
    }

    #[test]
    fn test_fallback_copies_source_lines() {
        let source = "Intro.\n\n> quoted **text**\n";
        let doc = FailingModel.parse(source).unwrap();
        let renderer = ResilientRenderer::new(&FailingModel, source, 80);

        let fragment = renderer.render(&doc.blocks[1]);
        assert!(fragment.is_fallback());
        assert_eq!(fragment.text, "> quoted **text**\n\n");
        assert_eq!(
            fragment.source,
            FragmentSource::FallbackExtracted {
                cause: "Rendering error: refusing block_quote".to_string()
            }
        );
    }

    #[test]
    fn test_fallback_wraps_paragraphs() {
        let source = "alpha beta gamma\ndelta epsilon zeta eta\n";
        let doc = FailingModel.parse(source).unwrap();
        let renderer = ResilientRenderer::new(&FailingModel, source, 20);

        let fragment = renderer.render(&doc.blocks[0]);
        assert_eq!(fragment.text, "alpha beta gamma\ndelta epsilon zeta\neta\n\n");
        assert_eq!(fragment.line_count, 4);
    }

    #[test]
    fn test_chunk_fallback_uses_chunk_rows_only() {
        let source = "| h |\n|---|\n| r1 |\n| r2 |\n| r3 |\n";
        let doc = FailingModel.parse(source).unwrap();
        let view = TableView::new(&doc.blocks[0]).unwrap();
        let chunk = view.chunk(&view.rows()[1..]);
        let renderer = ResilientRenderer::new(&FailingModel, source, 80);

        let fragment = renderer.render_chunk(&chunk);
        assert!(fragment.is_fallback());
        assert_eq!(fragment.text, "| h |\n|---|\n| r2 |\n| r3 |\n\n");
    }

    #[test]
    fn test_chunk_renders_with_cloned_header() {
        let source = "| h |\n|---|\n| r1 |\n| r2 |\n";
        let model = MarkdownModel::default();
        let doc = model.parse(source).unwrap();
        let view = TableView::new(&doc.blocks[0]).unwrap();
        let renderer = ResilientRenderer::new(&model, source, 80);

        let fragment = renderer.render_chunk(&view.chunk(&view.rows()[1..]));
        assert_eq!(fragment.text, "| h |\n| --- |\n| r2 |\n\n");
    }
}
