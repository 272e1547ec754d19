//! Table views and table chunks.

use super::{Block, BlockKind, ColumnAlignment, Span};
use serde::{Deserialize, Serialize};

/// Read-only view of a table block, separating header from data rows.
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    table: &'a Block,
    alignments: &'a [ColumnAlignment],
    header: &'a Block,
    rows: Vec<&'a Block>,
}

impl<'a> TableView<'a> {
    /// Create a view over a table block.
    ///
    /// Returns `None` when the block is not a table or has no header row.
    pub fn new(table: &'a Block) -> Option<Self> {
        let BlockKind::Table { alignments } = &table.kind else {
            return None;
        };
        let header = table
            .children
            .iter()
            .find(|child| child.kind == BlockKind::TableHead)?;
        let rows = table
            .children
            .iter()
            .filter(|child| child.kind == BlockKind::TableRow)
            .collect();

        Some(Self {
            table,
            alignments,
            header,
            rows,
        })
    }

    /// Get the header row.
    pub fn header(&self) -> &'a Block {
        self.header
    }

    /// Get the data rows in order.
    pub fn rows(&self) -> &[&'a Block] {
        &self.rows
    }

    /// Get the number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Source range of everything before the first data row: the header
    /// line and the delimiter row.
    pub fn header_span(&self) -> Span {
        match self.rows.first() {
            Some(first) => Span::new(self.table.span.start, first.covering_span().start),
            None => self.table.covering_span(),
        }
    }

    /// Build an independent chunk with a cloned header and cloned `rows`.
    pub fn chunk(&self, rows: &[&Block]) -> TableChunk {
        TableChunk {
            alignments: self.alignments.to_vec(),
            header: self.header.clone(),
            rows: rows.iter().map(|row| (*row).clone()).collect(),
            header_span: self.header_span(),
        }
    }
}

/// A reconstructed table: the original header plus a contiguous run of data
/// rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableChunk {
    /// Column alignments of the source table
    pub alignments: Vec<ColumnAlignment>,

    /// Cloned header row
    pub header: Block,

    /// Cloned data rows
    pub rows: Vec<Block>,

    /// Source range of the header and delimiter lines of the source table
    pub header_span: Span,
}

impl TableChunk {
    /// Get the number of data rows in the chunk.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Build a standalone table block from the chunk.
    pub fn to_block(&self) -> Block {
        let span = self
            .rows
            .iter()
            .fold(self.header.covering_span(), |span, row| {
                span.union(row.covering_span())
            });
        let mut children = Vec::with_capacity(self.rows.len() + 1);
        children.push(self.header.clone());
        children.extend(self.rows.iter().cloned());

        Block::with_children(
            BlockKind::Table {
                alignments: self.alignments.clone(),
            },
            span,
            children,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(kind: BlockKind, start: usize) -> Block {
        let cell = Block::new(BlockKind::TableCell, Span::new(start + 2, start + 3));
        Block::with_children(kind, Span::new(start, start + 5), vec![cell])
    }

    fn sample_table(rows: usize) -> Block {
        let mut children = vec![row(BlockKind::TableHead, 0)];
        for i in 0..rows {
            children.push(row(BlockKind::TableRow, 12 + i * 6));
        }
        Block::with_children(
            BlockKind::Table {
                alignments: vec![ColumnAlignment::Left],
            },
            Span::new(0, 12 + rows * 6),
            children,
        )
    }

    #[test]
    fn test_table_view() {
        let table = sample_table(3);
        let view = TableView::new(&table).unwrap();

        assert_eq!(view.row_count(), 3);
        assert_eq!(view.header().kind, BlockKind::TableHead);
        assert_eq!(view.header_span(), Span::new(0, 12));
    }

    #[test]
    fn test_table_view_without_header() {
        let mut table = sample_table(2);
        table.children.remove(0);
        assert!(TableView::new(&table).is_none());

        let paragraph = Block::new(BlockKind::Paragraph, Span::new(0, 4));
        assert!(TableView::new(&paragraph).is_none());
    }

    #[test]
    fn test_chunk_leaves_source_untouched() {
        let table = sample_table(4);
        let before = table.clone();
        let view = TableView::new(&table).unwrap();

        let chunk = view.chunk(&view.rows()[1..3]);
        assert_eq!(chunk.row_count(), 2);
        assert_eq!(chunk.rows[0], table.children[2]);

        let block = chunk.to_block();
        assert!(block.is_table());
        assert_eq!(block.children.len(), 3);
        assert_eq!(block.children[0].kind, BlockKind::TableHead);
        assert_eq!(table, before);
    }
}
