//! Split options and their resolved configuration.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Default page budget in lines.
pub const DEFAULT_MAX_LINES: usize = 40;

/// Default maximum page width in pixels.
pub const DEFAULT_MAX_WIDTH: u32 = 1080;

/// Default width, in characters, for re-wrapping paragraphs extracted from
/// source.
pub const DEFAULT_WRAP_WIDTH: usize = 80;

/// Default font size in points.
pub const DEFAULT_FONT_SIZE: u32 = 12;

/// Default rendering DPI.
pub const DEFAULT_DPI: u32 = 96;

/// Default extension of written pages.
pub const DEFAULT_EXTENSION: &str = "md";

/// Colour theme of the slides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark text on a light background
    #[default]
    Light,
    /// Light text on a dark background
    Dark,
}

impl Theme {
    /// Get the theme name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(Error::InvalidOption(format!(
                "unknown theme '{}' (expected light or dark)",
                other
            ))),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predefined slide sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateSize {
    /// Portrait phone card
    Card,
    /// Landscape card
    HorizontalCard,
    /// 16:9 presentation slide
    Presentation,
    /// A4 portrait sheet
    A4,
}

impl TemplateSize {
    /// All template sizes.
    pub const ALL: [TemplateSize; 4] = [
        TemplateSize::Card,
        TemplateSize::HorizontalCard,
        TemplateSize::Presentation,
        TemplateSize::A4,
    ];

    /// Get the template name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateSize::Card => "card",
            TemplateSize::HorizontalCard => "horizontal-card",
            TemplateSize::Presentation => "presentation",
            TemplateSize::A4 => "a4",
        }
    }

    /// Page budget in lines for this template.
    pub fn max_lines(&self) -> usize {
        match self {
            TemplateSize::Card => 24,
            TemplateSize::HorizontalCard => 16,
            TemplateSize::Presentation => 18,
            TemplateSize::A4 => 56,
        }
    }

    /// Page width in pixels for this template.
    pub fn max_width(&self) -> u32 {
        match self {
            TemplateSize::Card => 480,
            TemplateSize::HorizontalCard => 720,
            TemplateSize::Presentation => 1280,
            TemplateSize::A4 => 794,
        }
    }
}

impl FromStr for TemplateSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        TemplateSize::ALL
            .into_iter()
            .find(|template| template.as_str() == name)
            .ok_or_else(|| {
                Error::InvalidOption(format!(
                    "unknown template size '{}' (expected card, horizontal-card, presentation or a4)",
                    name
                ))
            })
    }
}

impl fmt::Display for TemplateSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for splitting a document, as supplied by the caller.
///
/// Numeric fields use 0 for "not set". Call [`SplitOptions::resolve`] once
/// to obtain the [`SplitConfig`] a run actually uses.
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Output directory for the pages
    pub out_dir: PathBuf,

    /// Maximum page height in lines (0 = template or default)
    pub max_height: usize,

    /// Maximum page width in pixels (0 = template or default)
    pub max_width: u32,

    /// Slide theme
    pub theme: Theme,

    /// Predefined slide size supplying height and width defaults
    pub template_size: Option<TemplateSize>,

    /// Font size in points (0 = default)
    pub font_size: u32,

    /// DPI for rendering (0 = default)
    pub dpi: u32,

    /// Wrap width for paragraphs extracted from source (0 = default)
    pub wrap_width: usize,

    /// Extension of written pages, without the dot
    pub extension: String,
}

impl SplitOptions {
    /// Create new split options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory.
    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    /// Set the maximum page height in lines.
    pub fn with_max_height(mut self, lines: usize) -> Self {
        self.max_height = lines;
        self
    }

    /// Set the maximum page width in pixels.
    pub fn with_max_width(mut self, width: u32) -> Self {
        self.max_width = width;
        self
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the template size.
    pub fn with_template_size(mut self, template: TemplateSize) -> Self {
        self.template_size = Some(template);
        self
    }

    /// Set the font size in points.
    pub fn with_font_size(mut self, size: u32) -> Self {
        self.font_size = size;
        self
    }

    /// Set the DPI.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Set the wrap width for extracted paragraphs.
    pub fn with_wrap_width(mut self, width: usize) -> Self {
        self.wrap_width = width;
        self
    }

    /// Set the page file extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Resolve unset fields into a complete configuration.
    ///
    /// Explicit values win over the template, the template wins over the
    /// built-in defaults.
    pub fn resolve(&self) -> SplitConfig {
        let out_dir = if self.out_dir.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            self.out_dir.clone()
        };
        let max_lines = match (self.max_height, self.template_size) {
            (0, Some(template)) => template.max_lines(),
            (0, None) => DEFAULT_MAX_LINES,
            (lines, _) => lines,
        };
        let max_width = match (self.max_width, self.template_size) {
            (0, Some(template)) => template.max_width(),
            (0, None) => DEFAULT_MAX_WIDTH,
            (width, _) => width,
        };
        let extension = self.extension.trim().trim_start_matches('.');

        SplitConfig {
            out_dir,
            max_lines,
            max_width,
            theme: self.theme,
            template_size: self.template_size,
            font_size: non_zero_or(self.font_size, DEFAULT_FONT_SIZE),
            dpi: non_zero_or(self.dpi, DEFAULT_DPI),
            wrap_width: if self.wrap_width == 0 {
                DEFAULT_WRAP_WIDTH
            } else {
                self.wrap_width
            },
            extension: if extension.is_empty() {
                DEFAULT_EXTENSION.to_string()
            } else {
                extension.to_string()
            },
        }
    }
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            max_height: 0,
            max_width: 0,
            theme: Theme::Light,
            template_size: None,
            font_size: DEFAULT_FONT_SIZE,
            dpi: DEFAULT_DPI,
            wrap_width: 0,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

fn non_zero_or(value: u32, default: u32) -> u32 {
    if value == 0 {
        default
    } else {
        value
    }
}

/// Fully resolved configuration of a split run.
///
/// `max_width`, `theme`, `font_size` and `dpi` are carried for callers that
/// lay slides out visually; pagination itself only uses the line budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Output directory for the pages
    pub out_dir: PathBuf,

    /// Page budget in lines, always at least 1
    pub max_lines: usize,

    /// Page width in pixels
    pub max_width: u32,

    /// Slide theme
    pub theme: Theme,

    /// Template the sizes came from, if any
    pub template_size: Option<TemplateSize>,

    /// Font size in points
    pub font_size: u32,

    /// DPI for rendering
    pub dpi: u32,

    /// Wrap width for paragraphs extracted from source
    pub wrap_width: usize,

    /// Extension of written pages
    pub extension: String,
}

impl Default for SplitConfig {
    fn default() -> Self {
        SplitOptions::default().resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let config = SplitOptions::new().resolve();
        assert_eq!(config.max_lines, DEFAULT_MAX_LINES);
        assert_eq!(config.max_width, DEFAULT_MAX_WIDTH);
        assert_eq!(config.wrap_width, DEFAULT_WRAP_WIDTH);
        assert_eq!(config.out_dir, PathBuf::from("."));
        assert_eq!(config.extension, "md");
        assert_eq!(config.theme, Theme::Light);
    }

    #[test]
    fn test_resolve_template_fills_unset_sizes() {
        let config = SplitOptions::new()
            .with_template_size(TemplateSize::Presentation)
            .resolve();
        assert_eq!(config.max_lines, 18);
        assert_eq!(config.max_width, 1280);

        let config = SplitOptions::new()
            .with_template_size(TemplateSize::Card)
            .with_max_height(10)
            .resolve();
        assert_eq!(config.max_lines, 10);
        assert_eq!(config.max_width, 480);
    }

    #[test]
    fn test_resolve_normalizes_values() {
        let config = SplitOptions::new()
            .with_out_dir("")
            .with_font_size(0)
            .with_dpi(0)
            .with_extension(".markdown")
            .resolve();
        assert_eq!(config.out_dir, PathBuf::from("."));
        assert_eq!(config.font_size, DEFAULT_FONT_SIZE);
        assert_eq!(config.dpi, DEFAULT_DPI);
        assert_eq!(config.extension, "markdown");

        let config = SplitOptions::new().with_extension("  ").resolve();
        assert_eq!(config.extension, "md");
    }

    #[test]
    fn test_theme_from_str() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
        assert!(matches!(
            "sepia".parse::<Theme>(),
            Err(Error::InvalidOption(_))
        ));
    }

    #[test]
    fn test_template_size_from_str() {
        for template in TemplateSize::ALL {
            assert_eq!(template.as_str().parse::<TemplateSize>().unwrap(), template);
        }
        assert_eq!(
            "Horizontal-Card".parse::<TemplateSize>().unwrap(),
            TemplateSize::HorizontalCard
        );
        assert!("letter".parse::<TemplateSize>().is_err());
    }
}
