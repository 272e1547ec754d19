//! Page writers.
//!
//! A [`PageSink`] receives finished pages in order. [`DirectoryWriter`]
//! persists them as `slide-<N>.<ext>` files; [`MemorySink`] keeps them.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::paginate::Page;

/// File name prefix of written pages.
pub const PAGE_FILE_PREFIX: &str = "slide";

/// File name of page `index`.
pub fn page_file_name(index: usize, extension: &str) -> String {
    format!("{}-{}.{}", PAGE_FILE_PREFIX, index, extension)
}

/// Destination for finished pages.
pub trait PageSink {
    /// Persist one page. An error aborts the run.
    fn write_page(&mut self, page: &Page) -> Result<()>;
}

impl<S: PageSink + ?Sized> PageSink for &mut S {
    fn write_page(&mut self, page: &Page) -> Result<()> {
        (**self).write_page(page)
    }
}

/// Writes pages into a directory.
#[derive(Debug)]
pub struct DirectoryWriter {
    dir: PathBuf,
    extension: String,
    written: Vec<PathBuf>,
}

impl DirectoryWriter {
    /// Create the writer, creating `dir` if it does not exist.
    pub fn create(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| Error::CreateOutputDir {
            path: dir.clone(),
            source,
        })?;

        Ok(Self {
            dir,
            extension: extension.into(),
            written: Vec::new(),
        })
    }

    /// Path page `index` is written to.
    pub fn page_path(&self, index: usize) -> PathBuf {
        self.dir.join(page_file_name(index, &self.extension))
    }

    /// Paths written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PageSink for DirectoryWriter {
    fn write_page(&mut self, page: &Page) -> Result<()> {
        let path = self.page_path(page.index);
        fs::write(&path, page.content.as_bytes()).map_err(|source| Error::WritePage {
            index: page.index,
            path: path.clone(),
            source,
        })?;
        log::debug!("Wrote page {} to {}", page.index, path.display());
        self.written.push(path);
        Ok(())
    }
}

/// Collects pages in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pages: Vec<Page>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages received so far, in order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Consume the sink, returning its pages.
    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }

    /// Get the number of pages received.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check if no page was received.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl PageSink for MemorySink {
    fn write_page(&mut self, page: &Page) -> Result<()> {
        self.pages.push(page.clone());
        Ok(())
    }
}
