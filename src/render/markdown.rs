//! Markdown re-serialization of single blocks.

use crate::error::{Error, Result};
use crate::model::{Block, BlockKind, ColumnAlignment, Span, TableView};

use super::RenderOptions;

/// Markdown renderer for one block at a time.
///
/// Output has no trailing newline; block separation is the caller's concern.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a block back to Markdown.
    ///
    /// Fails with [`Error::Render`] for node shapes that have no Markdown
    /// form here: unsupported kinds, tables without a header row and bare
    /// table cells.
    pub fn render(&self, block: &Block, source: &str) -> Result<String> {
        Ok(self.block_lines(block, source, 0)?.join("\n"))
    }

    fn block_lines(&self, block: &Block, source: &str, depth: usize) -> Result<Vec<String>> {
        match &block.kind {
            BlockKind::Paragraph => {
                let span = block
                    .inline_span()
                    .ok_or_else(|| Error::Render("paragraph has no inline content".to_string()))?;
                inline_lines(span, source, depth)
            }
            BlockKind::Inline => inline_lines(block.span, source, depth),
            BlockKind::Heading { level } => self.heading_lines(block, *level, source, depth),
            BlockKind::ThematicBreak => Ok(vec!["---".to_string()]),
            BlockKind::CodeBlock { info, code } => Ok(code_lines(info.as_deref(), code)),
            BlockKind::Html | BlockKind::Raw => {
                let text = slice(block.span, source)?.trim_end();
                Ok(verbatim_lines(text, depth))
            }
            BlockKind::BlockQuote => {
                let inner = self.children_lines(&block.children, source, depth + 1, true)?;
                Ok(inner
                    .into_iter()
                    .map(|line| {
                        if line.is_empty() {
                            ">".to_string()
                        } else {
                            format!("> {}", line)
                        }
                    })
                    .collect())
            }
            BlockKind::List { start } => self.list_lines(block, *start, source, depth),
            BlockKind::ListItem => {
                let marker = self.options.list_marker.to_string();
                self.item_lines(block, &marker, false, source, depth)
            }
            BlockKind::Table { alignments } => self.table_lines(block, alignments, source),
            BlockKind::TableHead | BlockKind::TableRow => Ok(vec![row_line(block, source, 0)?]),
            BlockKind::TableCell => Err(Error::Render(
                "table cell outside of a table row".to_string(),
            )),
            BlockKind::Other { name } => Err(Error::Render(format!("unsupported block: {}", name))),
        }
    }

    fn heading_lines(
        &self,
        block: &Block,
        level: u8,
        source: &str,
        depth: usize,
    ) -> Result<Vec<String>> {
        let prefix = "#".repeat(level.clamp(1, 6) as usize);
        let text = match block.inline_span() {
            Some(span) => inline_lines(span, source, depth)?
                .iter()
                .map(|line| line.trim())
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
            None => String::new(),
        };

        if text.is_empty() {
            Ok(vec![prefix])
        } else {
            Ok(vec![format!("{} {}", prefix, text)])
        }
    }

    fn children_lines(
        &self,
        children: &[Block],
        source: &str,
        depth: usize,
        separate: bool,
    ) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        for (i, child) in children.iter().enumerate() {
            if separate && i > 0 {
                lines.push(String::new());
            }
            lines.extend(self.block_lines(child, source, depth)?);
        }
        Ok(lines)
    }

    fn list_lines(
        &self,
        list: &Block,
        start: Option<u64>,
        source: &str,
        depth: usize,
    ) -> Result<Vec<String>> {
        // A list is loose when any item holds a paragraph
        let loose = list
            .children
            .iter()
            .any(|item| item.children.iter().any(Block::is_paragraph));

        let mut lines = Vec::new();
        for (i, item) in list.children.iter().enumerate() {
            if loose && i > 0 {
                lines.push(String::new());
            }
            let marker = match start {
                Some(n) => format!("{}.", n.saturating_add(i as u64)),
                None => self.options.list_marker.to_string(),
            };
            lines.extend(self.item_lines(item, &marker, loose, source, depth)?);
        }
        Ok(lines)
    }

    fn item_lines(
        &self,
        item: &Block,
        marker: &str,
        loose: bool,
        source: &str,
        depth: usize,
    ) -> Result<Vec<String>> {
        let body = self.children_lines(&item.children, source, depth, loose)?;
        if body.is_empty() {
            return Ok(vec![marker.to_string()]);
        }

        let indent = " ".repeat(marker.len() + 1);
        Ok(body
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                if i == 0 {
                    format!("{} {}", marker, line)
                } else if line.is_empty() {
                    line
                } else {
                    format!("{}{}", indent, line)
                }
            })
            .collect())
    }

    fn table_lines(
        &self,
        table: &Block,
        alignments: &[ColumnAlignment],
        source: &str,
    ) -> Result<Vec<String>> {
        let view = TableView::new(table)
            .ok_or_else(|| Error::Render("table has no header row".to_string()))?;
        let columns = alignments.len().max(row_cells(view.header()).len());

        let mut lines = Vec::with_capacity(view.row_count() + 2);
        lines.push(row_line(view.header(), source, columns)?);
        lines.push(delimiter_line(alignments, columns));
        for row in view.rows() {
            lines.push(row_line(row, source, columns)?);
        }
        Ok(lines)
    }
}

fn slice(span: Span, source: &str) -> Result<&str> {
    span.slice(source).ok_or_else(|| {
        Error::Render(format!(
            "span {}..{} is outside the source",
            span.start, span.end
        ))
    })
}

fn inline_lines(span: Span, source: &str, depth: usize) -> Result<Vec<String>> {
    Ok(clean_lines(slice(span, source)?, depth))
}

/// Split `text` into lines, dropping the container indentation and quote
/// markers that continuation lines carry in the source.
fn clean_lines(text: &str, depth: usize) -> Vec<String> {
    text.split('\n')
        .enumerate()
        .map(|(i, line)| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if i == 0 {
                line.to_string()
            } else {
                strip_quote_markers(line.trim_start(), depth).to_string()
            }
        })
        .collect()
}

/// Split `text` into lines unchanged apart from the `>` markers of the
/// `depth` enclosing block quotes.
fn verbatim_lines(text: &str, depth: usize) -> Vec<String> {
    text.split('\n')
        .map(|line| {
            let mut line = line.strip_suffix('\r').unwrap_or(line);
            for _ in 0..depth {
                match line.trim_start_matches(' ').strip_prefix('>') {
                    Some(rest) => line = rest.strip_prefix(' ').unwrap_or(rest),
                    None => break,
                }
            }
            line.to_string()
        })
        .collect()
}

fn strip_quote_markers(mut line: &str, depth: usize) -> &str {
    for _ in 0..depth {
        match line.strip_prefix('>') {
            Some(rest) => line = rest.trim_start(),
            None => break,
        }
    }
    line
}

fn code_lines(info: Option<&str>, code: &str) -> Vec<String> {
    let longest_run = code
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat((longest_run + 1).max(3));

    let mut lines = vec![format!("{}{}", fence, info.unwrap_or(""))];
    if !code.is_empty() {
        let body = code.strip_suffix('\n').unwrap_or(code);
        lines.extend(body.split('\n').map(str::to_string));
    }
    lines.push(fence);
    lines
}

/// Cells of a row; header rows may wrap their cells in a nested row.
fn row_cells(row: &Block) -> Vec<&Block> {
    let mut cells = Vec::new();
    for child in &row.children {
        match child.kind {
            BlockKind::TableCell => cells.push(child),
            BlockKind::TableRow => cells.extend(row_cells(child)),
            _ => {}
        }
    }
    cells
}

fn row_line(row: &Block, source: &str, columns: usize) -> Result<String> {
    let mut cells = row_cells(row)
        .into_iter()
        .map(|cell| cell_text(cell, source))
        .collect::<Result<Vec<_>>>()?;
    while cells.len() < columns {
        cells.push(String::new());
    }
    Ok(format!("| {} |", cells.join(" | ")))
}

fn cell_text(cell: &Block, source: &str) -> Result<String> {
    match cell.inline_span() {
        Some(span) => Ok(slice(span, source)?.trim().replace('\n', " ")),
        None => Ok(String::new()),
    }
}

fn delimiter_line(alignments: &[ColumnAlignment], columns: usize) -> String {
    let markers: Vec<&str> = (0..columns)
        .map(|i| match alignments.get(i).copied().unwrap_or_default() {
            ColumnAlignment::None => "---",
            ColumnAlignment::Left => ":---",
            ColumnAlignment::Center => ":---:",
            ColumnAlignment::Right => "---:",
        })
        .collect();
    format!("| {} |", markers.join(" | "))
}
