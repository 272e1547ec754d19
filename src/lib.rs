//! # mdsplit
//!
//! Split Markdown documents into pages that fit a line budget.
//!
//! A document is parsed into top-level units (headings, paragraphs, lists,
//! tables, ...) which are rendered back to Markdown and packed onto pages of
//! at most `max_height` lines. Oversized tables are split into chunks that
//! repeat the header and carry a continuation marker; oversized paragraphs
//! are split by lines. Nothing is ever dropped: a unit that cannot be
//! re-serialized is copied from the source instead.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use mdsplit::SplitOptions;
//!
//! fn main() -> mdsplit::Result<()> {
//!     let data = mdsplit::read_input(Some(Path::new("talk.md")))?;
//!     let options = SplitOptions::new()
//!         .with_out_dir("slides")
//!         .with_max_height(20);
//!
//!     let report = mdsplit::split(&data, &options)?;
//!     println!("{} pages", report.page_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Budgeted pages**: whole units accumulate until the next would overflow
//! - **Table chunking**: long tables repeat their header on every page
//! - **Paragraph chunking**: long paragraphs are cut at line boundaries
//! - **Resilient rendering**: faulty units fall back to their source text
//! - **Pluggable model**: parsing and rendering sit behind [`DocumentModel`]

pub mod error;
pub mod model;
pub mod output;
pub mod paginate;
pub mod parser;
pub mod provider;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{Block, BlockKind, ColumnAlignment, Document, Span, TableChunk, TableView};
pub use output::{DirectoryWriter, MemorySink, PageSink};
pub use paginate::{
    Page, PageKind, PageSummary, Paginator, SplitConfig, SplitOptions, SplitReport, SplitStats,
    TemplateSize, Theme,
};
pub use parser::{MarkdownParser, ParseOptions};
pub use provider::{DocumentModel, MarkdownModel};
pub use render::{FragmentSource, RenderOptions, RenderedFragment, ResilientRenderer};

use std::borrow::Cow;
use std::io::Read;
use std::path::Path;

/// Read the input document from `path`, or from stdin when `path` is `None`.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// let data = mdsplit::read_input(Some(Path::new("talk.md"))).unwrap();
/// ```
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).map_err(|source| Error::ReadInput {
            input: path.display().to_string(),
            source,
        }),
        None => {
            let mut data = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut data)
                .map_err(|source| Error::ReadInput {
                    input: "stdin".to_string(),
                    source,
                })?;
            Ok(data)
        }
    }
}

/// Split a document and write the pages to the configured output directory.
///
/// The directory is created if missing, even when the document produces no
/// pages.
///
/// # Example
///
/// ```no_run
/// use mdsplit::{SplitOptions, TemplateSize};
///
/// let options = SplitOptions::new()
///     .with_out_dir("out")
///     .with_template_size(TemplateSize::Presentation);
/// let report = mdsplit::split(b"# Title\n\nBody.\n", &options).unwrap();
/// assert_eq!(report.page_count(), 1);
/// ```
pub fn split(data: &[u8], options: &SplitOptions) -> Result<SplitReport> {
    let config = options.resolve();
    let mut writer = DirectoryWriter::create(&config.out_dir, config.extension.as_str())?;
    split_with(data, &config, &MarkdownModel::default(), &mut writer)
}

/// Split a document into pages kept in memory.
///
/// # Example
///
/// ```
/// use mdsplit::SplitOptions;
///
/// let pages = mdsplit::split_to_pages(b"# One\n\n# Two\n", &SplitOptions::new()).unwrap();
/// assert_eq!(pages.len(), 1);
/// assert_eq!(pages[0].content, "# One\n\n# Two\n\n");
/// ```
pub fn split_to_pages(data: &[u8], options: &SplitOptions) -> Result<Vec<Page>> {
    let config = options.resolve();
    let mut sink = MemorySink::new();
    split_with(data, &config, &MarkdownModel::default(), &mut sink)?;
    Ok(sink.into_pages())
}

/// Split a document with a custom document model and page sink.
///
/// Input that is not valid UTF-8 is decoded lossily.
pub fn split_with<M, S>(
    data: &[u8],
    config: &SplitConfig,
    model: &M,
    sink: S,
) -> Result<SplitReport>
where
    M: DocumentModel + ?Sized,
    S: PageSink,
{
    let source = String::from_utf8_lossy(data);
    if let Cow::Owned(_) = source {
        log::warn!("Input is not valid UTF-8, invalid sequences were replaced with U+FFFD");
    }
    let document = model.parse(&source)?;
    log::debug!(
        "Parsed {} top-level blocks, page budget {} lines",
        document.len(),
        config.max_lines
    );
    Paginator::new(config, model, &source, sink).paginate(&document)
}

/// Read the input (a file or stdin) and split it into the output directory.
pub fn run(input: Option<&Path>, options: &SplitOptions) -> Result<SplitReport> {
    let data = read_input(input)?;
    split(&data, options)
}
