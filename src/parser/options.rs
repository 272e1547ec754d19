//! Parsing options and configuration.

use pulldown_cmark::Options;

/// Options for parsing Markdown documents.
///
/// Every extension is enabled by default, matching GitHub-flavoured input.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Recognize pipe tables
    pub tables: bool,

    /// Recognize footnote references and definitions
    pub footnotes: bool,

    /// Recognize `~~strikethrough~~`
    pub strikethrough: bool,

    /// Recognize `[ ]` / `[x]` task list markers
    pub tasklists: bool,

    /// Recognize a leading `---` YAML metadata block
    pub metadata_blocks: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// CommonMark only, no extensions.
    pub fn commonmark() -> Self {
        Self {
            tables: false,
            footnotes: false,
            strikethrough: false,
            tasklists: false,
            metadata_blocks: false,
        }
    }

    /// Enable or disable tables.
    pub fn with_tables(mut self, enable: bool) -> Self {
        self.tables = enable;
        self
    }

    /// Enable or disable footnotes.
    pub fn with_footnotes(mut self, enable: bool) -> Self {
        self.footnotes = enable;
        self
    }

    /// Enable or disable strikethrough.
    pub fn with_strikethrough(mut self, enable: bool) -> Self {
        self.strikethrough = enable;
        self
    }

    /// Enable or disable task lists.
    pub fn with_tasklists(mut self, enable: bool) -> Self {
        self.tasklists = enable;
        self
    }

    /// Enable or disable YAML metadata blocks.
    pub fn with_metadata_blocks(mut self, enable: bool) -> Self {
        self.metadata_blocks = enable;
        self
    }

    pub(crate) fn to_cmark(&self) -> Options {
        let mut options = Options::empty();
        if self.tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            options.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.tasklists {
            options.insert(Options::ENABLE_TASKLISTS);
        }
        if self.metadata_blocks {
            options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
        }
        options
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            tasklists: true,
            metadata_blocks: true,
        }
    }
}
