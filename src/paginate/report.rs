//! Summary of a split run.

use serde::{Deserialize, Serialize};

use super::page::{Page, PageKind};

/// Result of splitting a document: one summary per emitted page plus
/// statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitReport {
    /// Emitted pages in order
    pub pages: Vec<PageSummary>,

    /// Run statistics
    pub stats: SplitStats,
}

impl SplitReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an emitted page.
    pub fn record_page(&mut self, page: &Page) {
        self.pages.push(PageSummary::from(page));
    }

    /// Get the number of emitted pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get the total number of lines across all pages.
    pub fn total_lines(&self) -> usize {
        self.pages.iter().map(|page| page.line_count).sum()
    }
}

/// Size and origin of one emitted page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    /// 1-based page index
    pub index: usize,

    /// Lines on the page
    pub line_count: usize,

    /// Bytes on the page
    pub bytes: usize,

    /// Origin of the page
    #[serde(flatten)]
    pub kind: PageKind,
}

impl From<&Page> for PageSummary {
    fn from(page: &Page) -> Self {
        Self {
            index: page.index,
            line_count: page.line_count,
            bytes: page.byte_len(),
            kind: page.kind,
        }
    }
}

/// Statistics collected while paginating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitStats {
    /// Top-level units processed
    pub block_count: u32,

    /// Units (or table chunks) whose text was copied from source
    pub fallback_count: u32,

    /// Tables split across pages
    pub tables_split: u32,

    /// Paragraphs split across pages
    pub paragraphs_split: u32,

    /// Units over budget that could not be split and sit alone on a page
    pub oversized_blocks: u32,
}

impl SplitStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment block count.
    pub fn add_block(&mut self) {
        self.block_count += 1;
    }

    /// Increment fallback count.
    pub fn add_fallback(&mut self) {
        self.fallback_count += 1;
    }

    /// Increment split table count.
    pub fn add_table_split(&mut self) {
        self.tables_split += 1;
    }

    /// Increment split paragraph count.
    pub fn add_paragraph_split(&mut self) {
        self.paragraphs_split += 1;
    }

    /// Increment oversized block count.
    pub fn add_oversized(&mut self) {
        self.oversized_blocks += 1;
    }
}
