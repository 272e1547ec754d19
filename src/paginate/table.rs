//! Splitting tables that do not fit on one page.

use crate::model::{Block, BlockKind, TableView};
use crate::provider::DocumentModel;
use crate::render::text::count_lines;
use crate::render::{RenderedFragment, ResilientRenderer};

/// Lines reserved on every chunk page for the continuation note: a blank
/// separator line and the marker line.
pub const CONTINUATION_NOTE_LINES: usize = 2;

/// Continuation marker appended to part `part` of a split table.
pub fn continuation_marker(part: usize) -> String {
    format!("_Table continued (part {})_", part)
}

/// One page worth of a split table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePart {
    /// 1-based part number
    pub part: usize,

    /// Data rows in this part
    pub rows: usize,

    /// Page text: header, rows, blank line, marker
    pub content: String,

    /// Whether the chunk text was extracted from source
    pub fallback: bool,
}

/// Splits oversized tables into chunks that repeat the header.
#[derive(Debug, Clone, Copy)]
pub struct TableChunker {
    budget: usize,
}

impl TableChunker {
    /// Create a chunker for a page budget in lines.
    pub fn new(budget: usize) -> Self {
        Self { budget }
    }

    /// Check whether a unit must be split: a table with more data rows, or
    /// more rendered lines, than the budget.
    pub fn should_split(&self, block: &Block, fragment: &RenderedFragment) -> bool {
        if !block.is_table() {
            return false;
        }
        let rows = block
            .children
            .iter()
            .filter(|child| child.kind == BlockKind::TableRow)
            .count();
        rows > self.budget || fragment.line_count > self.budget
    }

    /// Data rows per chunk for a header of `header_lines` lines. Never below 1.
    pub fn chunk_size(&self, header_lines: usize) -> usize {
        self.budget
            .saturating_sub(header_lines + CONTINUATION_NOTE_LINES)
            .max(1)
    }

    /// Split a table into parts.
    ///
    /// Returns `None` when the table has no header, no data rows, or rows
    /// that all fit in a single chunk; the caller then treats it as an
    /// ordinary unit.
    pub fn split<M: DocumentModel + ?Sized>(
        &self,
        block: &Block,
        renderer: &ResilientRenderer<'_, M>,
    ) -> Option<Vec<TablePart>> {
        let view = TableView::new(block)?;
        if view.row_count() == 0 {
            return None;
        }

        let header = renderer.render_chunk(&view.chunk(&[]));
        let header_lines = text_lines(&header.text);
        let size = self.chunk_size(header_lines);
        if view.row_count() <= size {
            return None;
        }

        let parts = view
            .rows()
            .chunks(size)
            .enumerate()
            .map(|(i, rows)| {
                let part = i + 1;
                let fragment = renderer.render_chunk(&view.chunk(rows));
                let mut content = fragment.text.trim_end_matches('\n').to_string();
                content.push_str("\n\n");
                content.push_str(&continuation_marker(part));
                content.push('\n');

                TablePart {
                    part,
                    rows: rows.len(),
                    content,
                    fallback: fragment.is_fallback(),
                }
            })
            .collect();

        Some(parts)
    }
}

/// Number of text lines, ignoring trailing line breaks.
fn text_lines(text: &str) -> usize {
    let trimmed = text.trim_end_matches('\n');
    if trimmed.is_empty() {
        0
    } else {
        count_lines(trimmed) + 1
    }
}
