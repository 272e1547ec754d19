//! Block tree types.

use serde::{Deserialize, Serialize};

/// A byte range into the source document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Start offset (inclusive)
    pub start: usize,

    /// End offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span. `end` is clamped so it never precedes `start`.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest span covering both `self` and `other`.
    pub fn union(&self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Get the covered text, or `None` if the span falls outside `source`
    /// or splits a character.
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..self.end)
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

/// Column alignment of a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAlignment {
    /// No explicit alignment
    #[default]
    None,
    /// Left aligned (`:---`)
    Left,
    /// Centered (`:---:`)
    Center,
    /// Right aligned (`---:`)
    Right,
}

/// The kind of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    /// Paragraph of inline content
    Paragraph,

    /// ATX or setext heading
    Heading { level: u8 },

    /// Block quote
    BlockQuote,

    /// Fenced or indented code block
    CodeBlock {
        /// Info string of a fenced block
        info: Option<String>,
        /// Literal code text
        code: String,
    },

    /// Ordered (`start` is set) or bullet list
    List { start: Option<u64> },

    /// One item of a list
    ListItem,

    /// Table with per-column alignment
    Table { alignments: Vec<ColumnAlignment> },

    /// Header row of a table
    TableHead,

    /// Data row of a table
    TableRow,

    /// Cell of a table row
    TableCell,

    /// Horizontal rule
    ThematicBreak,

    /// Raw HTML block
    Html,

    /// Source text outside any parsed block, such as link reference
    /// definitions; kept verbatim
    Raw,

    /// Run of inline content (text, emphasis, links, breaks)
    Inline,

    /// A node shape without a Markdown serialization
    Other { name: String },
}

/// A node of the parsed document tree.
///
/// Blocks are built once by the parser and never mutated afterwards; every
/// block carries the span of source text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// What the block is
    pub kind: BlockKind,

    /// Source range of the block itself
    pub span: Span,

    /// Nested blocks in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

impl Block {
    /// Create a block without children.
    pub fn new(kind: BlockKind, span: Span) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
        }
    }

    /// Create a block with children.
    pub fn with_children(kind: BlockKind, span: Span, children: Vec<Block>) -> Self {
        Self {
            kind,
            span,
            children,
        }
    }

    /// Check if this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self.kind, BlockKind::Paragraph)
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self.kind, BlockKind::Table { .. })
    }

    /// Short name of the block kind, for logs and error messages.
    pub fn kind_name(&self) -> &str {
        match &self.kind {
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading { .. } => "heading",
            BlockKind::BlockQuote => "block_quote",
            BlockKind::CodeBlock { .. } => "code_block",
            BlockKind::List { .. } => "list",
            BlockKind::ListItem => "list_item",
            BlockKind::Table { .. } => "table",
            BlockKind::TableHead => "table_head",
            BlockKind::TableRow => "table_row",
            BlockKind::TableCell => "table_cell",
            BlockKind::ThematicBreak => "thematic_break",
            BlockKind::Html => "html",
            BlockKind::Raw => "raw",
            BlockKind::Inline => "inline",
            BlockKind::Other { name } => name,
        }
    }

    /// Minimal span covering this block and all of its descendants.
    pub fn covering_span(&self) -> Span {
        self.children
            .iter()
            .fold(self.span, |span, child| span.union(child.covering_span()))
    }

    /// Total number of descendants (not counting `self`).
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    /// Get the span of the inline content directly under this block.
    pub fn inline_span(&self) -> Option<Span> {
        self.children
            .iter()
            .filter(|child| child.kind == BlockKind::Inline)
            .map(|child| child.span)
            .reduce(|a, b| a.union(b))
    }
}
