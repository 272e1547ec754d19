//! Markdown parsing into a block tree.
//!
//! Uses the `pulldown-cmark` offset iterator: every start event opens a block
//! spanning its source range, inline events are merged into `Inline` runs
//! under the innermost open block.

use pulldown_cmark::{Alignment, CodeBlockKind, Event, HeadingLevel, Parser, Tag};

use super::ParseOptions;
use crate::model::{Block, BlockKind, ColumnAlignment, Document, Span};

/// Markdown parser producing a [`Document`].
#[derive(Debug, Clone, Default)]
pub struct MarkdownParser {
    options: ParseOptions,
}

impl MarkdownParser {
    /// Create a parser with the given options.
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parse Markdown source. Parsing never fails; empty input yields an
    /// empty document.
    pub fn parse(&self, source: &str) -> Document {
        let mut builder = TreeBuilder::default();
        for (event, range) in Parser::new_ext(source, self.options.to_cmark()).into_offset_iter() {
            builder.push(event, range.into());
        }
        let mut document = builder.finish();
        fill_gaps(&mut document.blocks, source);
        document
    }
}

/// Insert a [`BlockKind::Raw`] block for every non-blank stretch of source
/// between top-level blocks. `pulldown-cmark` emits no events for link
/// reference definitions, so without this they would be lost.
fn fill_gaps(blocks: &mut Vec<Block>, source: &str) {
    let mut filled = Vec::with_capacity(blocks.len());
    let mut cursor = 0;
    for block in blocks.drain(..) {
        let span = block.covering_span();
        if let Some(raw) = raw_block(source, cursor, span.start) {
            filled.push(raw);
        }
        cursor = cursor.max(span.end);
        filled.push(block);
    }
    if let Some(raw) = raw_block(source, cursor, source.len()) {
        filled.push(raw);
    }
    *blocks = filled;
}

fn raw_block(source: &str, start: usize, end: usize) -> Option<Block> {
    let gap = source.get(start..end)?;
    let trimmed = gap.trim();
    if trimmed.is_empty() {
        return None;
    }
    let offset = start + (gap.len() - gap.trim_start().len());
    Some(Block::new(
        BlockKind::Raw,
        Span::new(offset, offset + trimmed.len()),
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Block,
    Inline,
}

#[derive(Debug, Default)]
struct TreeBuilder {
    roots: Vec<Block>,
    open: Vec<Block>,
    frames: Vec<Frame>,
}

impl TreeBuilder {
    fn push(&mut self, event: Event<'_>, span: Span) {
        match event {
            Event::Start(tag) => self.start(&tag, span),
            Event::End(_) => self.end(),
            Event::Text(text) => self.text(&text, span),
            // Block HTML is covered by the enclosing HtmlBlock span
            Event::Html(_) => {}
            Event::Rule => self.attach(Block::new(BlockKind::ThematicBreak, span)),
            _ => self.inline(span),
        }
    }

    fn start(&mut self, tag: &Tag<'_>, span: Span) {
        match block_kind(tag) {
            Some(kind) => {
                self.frames.push(Frame::Block);
                self.open.push(Block::new(kind, span));
            }
            None => {
                self.inline(span);
                self.frames.push(Frame::Inline);
            }
        }
    }

    fn end(&mut self) {
        if self.frames.pop() == Some(Frame::Block) {
            if let Some(block) = self.open.pop() {
                self.attach(block);
            }
        }
    }

    fn text(&mut self, text: &str, span: Span) {
        match self.open.last_mut() {
            Some(Block {
                kind: BlockKind::CodeBlock { code, .. },
                ..
            }) => code.push_str(text),
            _ => self.inline(span),
        }
    }

    fn inline(&mut self, span: Span) {
        let siblings = match self.open.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.roots,
        };
        match siblings.last_mut() {
            Some(last) if last.kind == BlockKind::Inline => last.span = last.span.union(span),
            _ => siblings.push(Block::new(BlockKind::Inline, span)),
        }
    }

    fn attach(&mut self, block: Block) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(block),
            None => self.roots.push(block),
        }
    }

    fn finish(mut self) -> Document {
        while let Some(block) = self.open.pop() {
            self.attach(block);
        }
        Document::from_blocks(self.roots)
    }
}

/// Map a start tag to a block kind; `None` for inline tags.
fn block_kind(tag: &Tag<'_>) -> Option<BlockKind> {
    let kind = match tag {
        Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. } | Tag::Image { .. } => {
            return None
        }
        Tag::Paragraph => BlockKind::Paragraph,
        Tag::Heading { level, .. } => BlockKind::Heading {
            level: heading_level(*level),
        },
        Tag::BlockQuote(..) => BlockKind::BlockQuote,
        Tag::CodeBlock(kind) => BlockKind::CodeBlock {
            info: match kind {
                CodeBlockKind::Fenced(info) if !info.trim().is_empty() => {
                    Some(info.trim().to_string())
                }
                _ => None,
            },
            code: String::new(),
        },
        Tag::HtmlBlock => BlockKind::Html,
        Tag::List(start) => BlockKind::List { start: *start },
        Tag::Item => BlockKind::ListItem,
        Tag::Table(alignments) => BlockKind::Table {
            alignments: alignments.iter().map(column_alignment).collect(),
        },
        Tag::TableHead => BlockKind::TableHead,
        Tag::TableRow => BlockKind::TableRow,
        Tag::TableCell => BlockKind::TableCell,
        Tag::FootnoteDefinition(_) => BlockKind::Other {
            name: "footnote_definition".to_string(),
        },
        Tag::MetadataBlock(_) => BlockKind::Other {
            name: "metadata_block".to_string(),
        },
        _ => BlockKind::Other {
            name: "unsupported".to_string(),
        },
    };
    Some(kind)
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn column_alignment(alignment: &Alignment) -> ColumnAlignment {
    match alignment {
        Alignment::None => ColumnAlignment::None,
        Alignment::Left => ColumnAlignment::Left,
        Alignment::Center => ColumnAlignment::Center,
        Alignment::Right => ColumnAlignment::Right,
    }
}
