//! Integration tests for splitting documents into pages.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use mdsplit::paginate::continuation_marker;
use mdsplit::{
    split, split_to_pages, split_with, Error, MarkdownModel, Page, PageKind, PageSink, Result,
    SplitOptions,
};

fn pages(source: &str, max_lines: usize) -> Vec<Page> {
    split_to_pages(
        source.as_bytes(),
        &SplitOptions::new().with_max_height(max_lines),
    )
    .unwrap()
}

fn table(rows: usize) -> String {
    let mut source = String::from("| Item | Qty |\n|------|-----|\n");
    for i in 1..=rows {
        source.push_str(&format!("| item{} | {} |\n", i, i * 2));
    }
    source
}

/// Sink that records offered pages and fails on one of them.
struct FailingSink {
    fail_at: usize,
    offered: Vec<usize>,
}

impl PageSink for FailingSink {
    fn write_page(&mut self, page: &Page) -> Result<()> {
        self.offered.push(page.index);
        if page.index == self.fail_at {
            return Err(Error::WritePage {
                index: page.index,
                path: PathBuf::from(format!("slide-{}.md", page.index)),
                source: io::Error::new(io::ErrorKind::Other, "disk full"),
            });
        }
        Ok(())
    }
}

fn read_dir(dir: &Path) -> BTreeMap<String, Vec<u8>> {
    fs::read_dir(dir)
        .unwrap()
        .map(|entry| {
            let entry = entry.unwrap();
            (
                entry.file_name().to_string_lossy().into_owned(),
                fs::read(entry.path()).unwrap(),
            )
        })
        .collect()
}

#[test]
fn test_headings_split_on_budget() {
    let pages = pages("# Page 1\n\nSome content.\n\n# Page 2\n\nMore content.", 5);

    assert_eq!(pages.len(), 2);
    assert!(pages[0].content.contains("# Page 1"));
    assert!(pages[0].content.contains("Some content."));
    assert!(pages[1].content.contains("# Page 2"));
    assert!(pages[1].content.contains("More content."));
    assert!(!pages[0].content.contains("Page 2"));
}

#[test]
fn test_long_table_repeats_header() {
    let pages = pages(&table(50), 40);

    assert_eq!(pages.len(), 2);
    let mut total_rows = 0;
    for page in &pages {
        let PageKind::TableChunk { part, rows } = page.kind else {
            panic!("expected a table chunk, got {:?}", page.kind);
        };
        assert!(page.content.starts_with("| Item | Qty |\n| --- | --- |\n"));
        assert!(page.content.contains(&continuation_marker(part)));
        assert!(page.line_count <= 40);
        total_rows += rows;
    }
    assert_eq!(total_rows, 50);
}

#[test]
fn test_table_rows_kept_in_order() {
    let pages = pages(&table(23), 8);

    let rows: Vec<String> = pages
        .iter()
        .flat_map(|page| page.content.lines())
        .filter(|line| line.starts_with("| item"))
        .map(str::to_string)
        .collect();
    let expected: Vec<String> = (1..=23)
        .map(|i| format!("| item{} | {} |", i, i * 2))
        .collect();
    assert_eq!(rows, expected);
}

#[test]
fn test_tiny_budget_still_places_every_row() {
    // Budget below header plus note: one row per page
    let pages = pages(&table(3), 2);

    assert_eq!(pages.len(), 3);
    for (i, page) in pages.iter().enumerate() {
        assert_eq!(page.kind, PageKind::TableChunk { part: i + 1, rows: 1 });
        assert!(page.content.contains(&format!("| item{} |", i + 1)));
    }
}

#[test]
fn test_long_paragraph_split_by_lines() {
    let source = "The same line of text.\n".repeat(100);
    let pages = pages(&source, 40);

    let counts: Vec<usize> = pages.iter().map(|p| p.line_count).collect();
    assert_eq!(counts, vec![40, 40, 20]);

    let joined: String = pages.iter().map(|p| p.content.as_str()).collect();
    assert_eq!(joined, source);
    assert!(pages.iter().all(|p| !p.content.contains("continued")));
}

#[test]
fn test_empty_input_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("out");

    let report = split(b"", &SplitOptions::new().with_out_dir(&out)).unwrap();

    assert_eq!(report.page_count(), 0);
    assert!(out.is_dir());
    assert!(read_dir(&out).is_empty());
}

#[test]
fn test_split_is_idempotent() {
    let mut source = String::from("# Report\n\nOpening paragraph.\n\n");
    source.push_str(&table(30));
    source.push_str("\n- one\n- two\n- three\n\n");
    source.push_str(&"Long body line.\n".repeat(25));

    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let options = SplitOptions::new().with_max_height(12);

    split(source.as_bytes(), &options.clone().with_out_dir(first.path())).unwrap();
    split(source.as_bytes(), &options.with_out_dir(second.path())).unwrap();

    let first = read_dir(first.path());
    assert!(!first.is_empty());
    assert_eq!(first, read_dir(second.path()));
}

#[test]
fn test_page_indices_and_budget() {
    let mut source = String::new();
    for i in 0..15 {
        source.push_str(&format!("## Part {}\n\nText for part {}.\n\n", i, i));
        if i % 4 == 0 {
            source.push_str(&table(9));
            source.push('\n');
        }
    }
    let pages = pages(&source, 10);

    assert!(!pages.is_empty());
    for (i, page) in pages.iter().enumerate() {
        assert_eq!(page.index, i + 1);
        assert!(!page.content.trim().is_empty());
        assert!(page.line_count <= 10, "page {} too long", page.index);
    }
}

#[test]
fn test_template_size_sets_budget() {
    let source = "Line.\n".repeat(30);
    let pages = split_to_pages(
        source.as_bytes(),
        &SplitOptions::new().with_template_size(mdsplit::TemplateSize::HorizontalCard),
    )
    .unwrap();

    let counts: Vec<usize> = pages.iter().map(|p| p.line_count).collect();
    assert_eq!(counts, vec![16, 14]);
}

#[test]
fn test_custom_extension() {
    let tmp = tempfile::tempdir().unwrap();
    let options = SplitOptions::new()
        .with_out_dir(tmp.path())
        .with_extension("markdown");

    split(b"# Only\n", &options).unwrap();

    let files = read_dir(tmp.path());
    assert_eq!(files.keys().collect::<Vec<_>>(), vec!["slide-1.markdown"]);
    assert_eq!(files["slide-1.markdown"], b"# Only\n\n");
}

#[test]
fn test_link_definitions_are_kept() {
    let pages = pages(
        "See [the docs][docs] for details.\n\n[docs]: https://example.com/docs\n",
        40,
    );

    assert_eq!(pages.len(), 1);
    assert!(pages[0].content.contains("See [the docs][docs] for details."));
    assert!(pages[0]
        .content
        .contains("[docs]: https://example.com/docs"));
}

#[test]
fn test_html_block_keeps_indentation() {
    let source = "<pre>\n    indented code\n        deeper\n</pre>\n";
    let pages = pages(source, 40);

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].content, format!("{}\n", source));
}

#[test]
fn test_write_failure_stops_pagination() {
    let config = SplitOptions::new().with_max_height(2).resolve();
    let mut sink = FailingSink {
        fail_at: 2,
        offered: Vec::new(),
    };

    let err = split_with(
        b"# One\n\n# Two\n\n# Three\n",
        &config,
        &MarkdownModel::default(),
        &mut sink,
    )
    .unwrap_err();

    assert!(matches!(err, Error::WritePage { index: 2, .. }));
    assert_eq!(sink.offered, vec![1, 2]);
}
