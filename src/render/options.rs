//! Rendering options and configuration.

/// Options for re-serializing blocks to Markdown.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Character to use for unordered list markers
    pub list_marker: char,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { list_marker: '-' }
    }
}
