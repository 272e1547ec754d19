//! Pagination: walking a document's top-level units and cutting them into
//! pages that fit a line budget.
//!
//! Units are rendered one at a time and accumulated onto the current page.
//! A unit that would overflow the page starts a new one. Tables and
//! paragraphs too large for any page are handed to [`TableChunker`] and
//! [`ParagraphChunker`], which emit their own page sequence. Any other
//! oversized unit is placed alone on a page.

mod options;
mod page;
mod paragraph;
mod report;
mod table;

pub use options::{
    SplitConfig, SplitOptions, TemplateSize, Theme, DEFAULT_DPI, DEFAULT_EXTENSION,
    DEFAULT_FONT_SIZE, DEFAULT_MAX_LINES, DEFAULT_MAX_WIDTH, DEFAULT_WRAP_WIDTH,
};
pub use page::{Page, PageKind};
pub use paragraph::ParagraphChunker;
pub use report::{PageSummary, SplitReport, SplitStats};
pub use table::{continuation_marker, TableChunker, TablePart, CONTINUATION_NOTE_LINES};

use crate::error::Result;
use crate::model::{Block, Document};
use crate::output::PageSink;
use crate::provider::DocumentModel;
use crate::render::{RenderedFragment, ResilientRenderer};
use page::PageBuffer;

/// Sequential pagination of one document into a [`PageSink`].
pub struct Paginator<'a, M: DocumentModel + ?Sized, S: PageSink> {
    budget: usize,
    renderer: ResilientRenderer<'a, M>,
    tables: TableChunker,
    paragraphs: ParagraphChunker,
    sink: S,
    buffer: PageBuffer,
    next_index: usize,
    report: SplitReport,
}

impl<'a, M: DocumentModel + ?Sized, S: PageSink> Paginator<'a, M, S> {
    /// Create a paginator over `source`, the text `model` parsed.
    pub fn new(config: &SplitConfig, model: &'a M, source: &'a str, sink: S) -> Self {
        let budget = config.max_lines.max(1);
        Self {
            budget,
            renderer: ResilientRenderer::new(model, source, config.wrap_width),
            tables: TableChunker::new(budget),
            paragraphs: ParagraphChunker::new(budget),
            sink,
            buffer: PageBuffer::default(),
            next_index: 1,
            report: SplitReport::new(),
        }
    }

    /// Paginate every top-level unit of `document` in order.
    ///
    /// Stops at the first page the sink fails to write.
    pub fn paginate(mut self, document: &Document) -> Result<SplitReport> {
        for block in document.blocks() {
            self.process(block)?;
        }
        self.flush()?;

        log::debug!(
            "Paginated {} blocks into {} pages",
            self.report.stats.block_count,
            self.report.page_count()
        );
        Ok(self.report)
    }

    fn process(&mut self, block: &Block) -> Result<()> {
        self.report.stats.add_block();
        let fragment = self.renderer.render(block);
        if fragment.is_fallback() {
            self.report.stats.add_fallback();
        }

        if self.tables.should_split(block, &fragment) && self.split_table(block)? {
            return Ok(());
        }
        if self.paragraphs.should_split(block, &fragment) {
            return self.split_paragraph(&fragment);
        }

        self.accumulate(block, &fragment)
    }

    fn accumulate(&mut self, block: &Block, fragment: &RenderedFragment) -> Result<()> {
        if self.buffer.would_overflow(fragment.line_count, self.budget) {
            self.flush()?;
        }
        if fragment.line_count > self.budget {
            log::warn!(
                "{} of {} lines exceeds the page budget of {}, placing it on its own page",
                block.kind_name(),
                fragment.line_count,
                self.budget
            );
            self.report.stats.add_oversized();
        }
        self.buffer.push(fragment);
        Ok(())
    }

    /// Emit a table as chunk pages. Returns `false` when the table cannot be
    /// chunked and should be accumulated whole.
    fn split_table(&mut self, block: &Block) -> Result<bool> {
        let Some(parts) = self.tables.split(block, &self.renderer) else {
            log::debug!("Table has no header or fits one chunk, keeping it whole");
            return Ok(false);
        };

        self.flush()?;
        log::debug!("Splitting table into {} parts", parts.len());
        self.report.stats.add_table_split();
        for part in parts {
            if part.fallback {
                self.report.stats.add_fallback();
            }
            self.emit(
                part.content,
                PageKind::TableChunk {
                    part: part.part,
                    rows: part.rows,
                },
            )?;
        }
        Ok(true)
    }

    fn split_paragraph(&mut self, fragment: &RenderedFragment) -> Result<()> {
        self.flush()?;
        let chunks = self.paragraphs.split(&fragment.text);
        log::debug!(
            "Splitting paragraph of {} lines into {} parts",
            fragment.line_count,
            chunks.len()
        );
        self.report.stats.add_paragraph_split();
        for (i, chunk) in chunks.into_iter().enumerate() {
            self.emit(chunk, PageKind::ParagraphChunk { part: i + 1 })?;
        }
        Ok(())
    }

    /// Emit the current page if it holds anything.
    fn flush(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let content = self.buffer.take();
        self.emit(content, PageKind::Accumulated)
    }

    fn emit(&mut self, content: String, kind: PageKind) -> Result<()> {
        if content.is_empty() {
            return Ok(());
        }
        let page = Page::new(self.next_index, content, kind);
        log::debug!("Flushing page {} ({} lines)", page.index, page.line_count);

        self.sink.write_page(&page)?;
        self.report.record_page(&page);
        self.next_index += 1;
        Ok(())
    }
}
