//! Pages and the page accumulator.

use serde::{Deserialize, Serialize};

use crate::render::text::count_lines;
use crate::render::RenderedFragment;

/// How a page came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageKind {
    /// Whole units accumulated until the budget was reached
    Accumulated,
    /// One part of a table split across pages
    TableChunk {
        /// 1-based part number
        part: usize,
        /// Data rows on this page
        rows: usize,
    },
    /// One part of a paragraph split across pages
    ParagraphChunk {
        /// 1-based part number
        part: usize,
    },
}

/// A finished page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based position in the output sequence
    pub index: usize,

    /// Page text
    pub content: String,

    /// Number of line breaks in `content`
    pub line_count: usize,

    /// Origin of the page
    pub kind: PageKind,
}

impl Page {
    /// Create a page, counting its lines.
    pub fn new(index: usize, content: String, kind: PageKind) -> Self {
        Self {
            index,
            line_count: count_lines(&content),
            content,
            kind,
        }
    }

    /// Get the content size in bytes.
    pub fn byte_len(&self) -> usize {
        self.content.len()
    }
}

/// The page currently being filled.
#[derive(Debug, Default)]
pub(crate) struct PageBuffer {
    content: String,
    line_count: usize,
}

impl PageBuffer {
    pub fn push(&mut self, fragment: &RenderedFragment) {
        self.content.push_str(&fragment.text);
        self.line_count += fragment.line_count;
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Whether appending `lines` more lines would overflow `budget`.
    pub fn would_overflow(&self, lines: usize, budget: usize) -> bool {
        !self.is_empty() && self.line_count() + lines > budget
    }

    /// Take the accumulated text, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        self.line_count = 0;
        std::mem::take(&mut self.content)
    }
}
