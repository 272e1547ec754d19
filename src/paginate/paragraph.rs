//! Splitting paragraphs that do not fit on one page.

use crate::model::Block;
use crate::render::RenderedFragment;

/// Regroups the lines of an oversized paragraph into page-sized chunks.
#[derive(Debug, Clone, Copy)]
pub struct ParagraphChunker {
    budget: usize,
}

impl ParagraphChunker {
    /// Create a chunker for a page budget in lines.
    pub fn new(budget: usize) -> Self {
        Self {
            budget: budget.max(1),
        }
    }

    /// Check whether a unit is a paragraph whose rendered text exceeds the
    /// budget.
    pub fn should_split(&self, block: &Block, fragment: &RenderedFragment) -> bool {
        block.is_paragraph() && fragment.line_count > self.budget
    }

    /// Split rendered paragraph text into chunks of at most `budget` lines.
    /// Trailing empty lines are dropped; each chunk ends with one line break.
    pub fn split(&self, text: &str) -> Vec<String> {
        let mut lines: Vec<&str> = text.split('\n').collect();
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }

        lines
            .chunks(self.budget)
            .map(|chunk| {
                let mut page = chunk.join("\n");
                page.push('\n');
                page
            })
            .collect()
    }
}
