//! Integration tests for recovering from rendering faults.

use mdsplit::error::{Error, Result};
use mdsplit::{
    split_to_pages, split_with, Block, BlockKind, Document, DocumentModel, MarkdownModel,
    MemorySink, Page, PageKind, SplitOptions, SplitReport,
};

/// Model that refuses to render blocks of selected kinds.
struct FaultyModel {
    inner: MarkdownModel,
    refuse: fn(&BlockKind) -> bool,
}

impl FaultyModel {
    fn new(refuse: fn(&BlockKind) -> bool) -> Self {
        Self {
            inner: MarkdownModel::default(),
            refuse,
        }
    }
}

impl DocumentModel for FaultyModel {
    fn parse(&self, source: &str) -> Result<Document> {
        self.inner.parse(source)
    }

    fn render(&self, block: &Block, source: &str) -> Result<String> {
        if (self.refuse)(&block.kind) {
            return Err(Error::Render(format!("refusing {}", block.kind_name())));
        }
        self.inner.render(block, source)
    }
}

fn run(model: &FaultyModel, source: &str, options: SplitOptions) -> (Vec<Page>, SplitReport) {
    let mut sink = MemorySink::new();
    let report = split_with(source.as_bytes(), &options.resolve(), model, &mut sink).unwrap();
    (sink.into_pages(), report)
}

#[test]
fn test_faulting_block_uses_source_text() {
    let source = "# Title\n\n> A quote with *emphasis*\n> over two lines\n\nAfter.\n";
    let model = FaultyModel::new(|kind| *kind == BlockKind::BlockQuote);

    let (pages, report) = run(&model, source, SplitOptions::new());

    assert_eq!(pages.len(), 1);
    assert_eq!(
        pages[0].content,
        "# Title\n\n> A quote with *emphasis*\n> over two lines\n\nAfter.\n\n"
    );
    assert_eq!(report.stats.fallback_count, 1);
}

#[test]
fn test_faulting_paragraph_is_wrapped() {
    let source = "one two three four five six seven eight nine ten\n";
    let model = FaultyModel::new(|kind| *kind == BlockKind::Paragraph);

    let (pages, _) = run(&model, source, SplitOptions::new().with_wrap_width(20));

    assert_eq!(pages.len(), 1);
    assert_eq!(
        pages[0].content,
        "one two three four\nfive six seven eight\nnine ten\n\n"
    );
}

#[test]
fn test_faulting_table_chunks_fall_back_per_chunk() {
    let mut source = String::from("| a | b |\n|---|---|\n");
    for i in 0..10 {
        source.push_str(&format!("|{}|x|\n", i));
    }
    let model = FaultyModel::new(|kind| matches!(kind, BlockKind::Table { .. }));

    let (pages, report) = run(&model, &source, SplitOptions::new().with_max_height(8));

    assert_eq!(pages.len(), 3);
    assert_eq!(
        pages[0].content,
        "| a | b |\n|---|---|\n|0|x|\n|1|x|\n|2|x|\n|3|x|\n\n_Table continued (part 1)_\n"
    );
    assert!(pages[2].content.starts_with("| a | b |\n|---|---|\n|8|x|\n|9|x|\n"));
    assert_eq!(pages[2].kind, PageKind::TableChunk { part: 3, rows: 2 });
    // the whole table and each of its three chunks
    assert_eq!(report.stats.fallback_count, 4);
}

#[test]
fn test_footnote_definition_falls_back() {
    let source = "Text with a note.[^1]\n\n[^1]: The note itself.\n";
    let pages = split_to_pages(source.as_bytes(), &SplitOptions::new()).unwrap();

    assert_eq!(pages.len(), 1);
    assert!(pages[0].content.contains("[^1]: The note itself.\n"));
}

#[test]
fn test_every_block_faulting_keeps_all_content() {
    let source = "# Heading\n\n- item one\n- item two\n\n```rust\nfn main() {}\n```\n\nClosing words.\n";
    let model = FaultyModel::new(|_| true);

    let (pages, report) = run(&model, source, SplitOptions::new());

    let joined: String = pages.iter().map(|p| p.content.as_str()).collect();
    for line in source.lines().filter(|line| !line.is_empty()) {
        assert!(joined.contains(line), "missing line {:?}", line);
    }
    assert_eq!(report.stats.fallback_count, report.stats.block_count);
}
