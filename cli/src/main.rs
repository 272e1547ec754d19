//! mdsplit CLI - split Markdown into slide-sized pages

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use colored::Colorize;

use mdsplit::{
    output::page_file_name, MarkdownModel, MemorySink, PageKind, SplitConfig, SplitOptions,
    SplitReport, TemplateSize, Theme,
};

#[derive(Parser)]
#[command(name = "mdsplit")]
#[command(version)]
#[command(about = "Split Markdown documents into pages that fit a line budget", long_about = None)]
struct Cli {
    /// Input Markdown file (stdin if not specified)
    #[arg(long = "in", value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory for the pages
    #[arg(long = "out", value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Maximum page height in lines (0 = template or 40)
    #[arg(long, default_value_t = 0, env = "MDSPLIT_MAX_HEIGHT")]
    max_height: usize,

    /// Maximum page width in pixels (0 = template or 1080)
    #[arg(long, default_value_t = 0)]
    max_width: u32,

    /// Slide theme
    #[arg(long, value_enum, default_value = "light")]
    theme: ThemeArg,

    /// Predefined slide size
    #[arg(long, value_enum)]
    template_size: Option<TemplateArg>,

    /// Font size in points
    #[arg(long, default_value_t = mdsplit::paginate::DEFAULT_FONT_SIZE)]
    font_size: u32,

    /// DPI for rendering
    #[arg(long, default_value_t = mdsplit::paginate::DEFAULT_DPI)]
    dpi: u32,

    /// Wrap width for paragraphs copied from source (0 = 80)
    #[arg(long, default_value_t = 0)]
    wrap_width: usize,

    /// Paginate without writing any files
    #[arg(long)]
    dry_run: bool,

    /// Print the split report as JSON
    #[arg(long)]
    report: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ThemeArg {
    /// Dark text on a light background
    Light,
    /// Light text on a dark background
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(theme: ThemeArg) -> Self {
        match theme {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum TemplateArg {
    /// Portrait card (24 lines, 480px)
    Card,
    /// Landscape card (16 lines, 720px)
    HorizontalCard,
    /// Presentation slide (18 lines, 1280px)
    Presentation,
    /// A4 sheet (56 lines, 794px)
    A4,
}

impl From<TemplateArg> for TemplateSize {
    fn from(template: TemplateArg) -> Self {
        match template {
            TemplateArg::Card => TemplateSize::Card,
            TemplateArg::HorizontalCard => TemplateSize::HorizontalCard,
            TemplateArg::Presentation => TemplateSize::Presentation,
            TemplateArg::A4 => TemplateSize::A4,
        }
    }
}

impl Cli {
    fn split_options(&self) -> SplitOptions {
        let mut options = SplitOptions::new()
            .with_out_dir(&self.output)
            .with_max_height(self.max_height)
            .with_max_width(self.max_width)
            .with_theme(self.theme.into())
            .with_font_size(self.font_size)
            .with_dpi(self.dpi)
            .with_wrap_width(self.wrap_width);

        if let Some(template) = self.template_size {
            options = options.with_template_size(template.into());
        }
        options
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = cmd_split(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_split(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = cli.split_options();
    let data = mdsplit::read_input(cli.input.as_deref())?;

    let config = options.resolve();
    log::debug!("Resolved configuration: {:?}", config);

    let report = if cli.dry_run {
        mdsplit::split_with(
            &data,
            &config,
            &MarkdownModel::default(),
            MemorySink::new(),
        )?
    } else {
        mdsplit::split(&data, &options)?
    };

    if cli.report {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_summary(cli, &config, &report);
    Ok(())
}

fn print_summary(cli: &Cli, config: &SplitConfig, report: &SplitReport) {
    let input = cli
        .input
        .as_ref()
        .map_or_else(|| "stdin".to_string(), |p| p.display().to_string());

    println!("{}", "Split Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Input".bold(), input);
    println!("{}: {} lines", "Page budget".bold(), config.max_lines);
    if let Some(template) = config.template_size {
        println!("{}: {}", "Template".bold(), template);
    }
    println!("{}: {}", "Theme".bold(), config.theme);

    if report.pages.is_empty() {
        println!("\n{}", "No content, nothing written.".yellow());
        return;
    }

    let header = if cli.dry_run {
        "Pages (dry run):".yellow().bold()
    } else {
        "Output files:".green().bold()
    };
    println!("\n{}", header);

    let last = report.pages.len() - 1;
    for (i, page) in report.pages.iter().enumerate() {
        let branch = if i == last { "└─" } else { "├─" };
        let note = match page.kind {
            PageKind::Accumulated => String::new(),
            PageKind::TableChunk { part, rows } => format!(" (table part {}, {} rows)", part, rows),
            PageKind::ParagraphChunk { part } => format!(" (paragraph part {})", part),
        };
        println!(
            "  {} {} {}{}",
            branch.dimmed(),
            config
                .out_dir
                .join(page_file_name(page.index, &config.extension))
                .display(),
            format!("{} lines", page.line_count).dimmed(),
            note.dimmed()
        );
    }

    let stats = &report.stats;
    println!();
    println!("{}: {}", "Blocks".bold(), stats.block_count);
    println!("{}: {}", "Pages".bold(), report.page_count());
    if stats.tables_split > 0 {
        println!("{}: {}", "Tables split".bold(), stats.tables_split);
    }
    if stats.paragraphs_split > 0 {
        println!("{}: {}", "Paragraphs split".bold(), stats.paragraphs_split);
    }
    if stats.fallback_count > 0 {
        println!(
            "{}: {}",
            "Copied from source".yellow().bold(),
            stats.fallback_count
        );
    }
    if stats.oversized_blocks > 0 {
        println!(
            "{}: {}",
            "Over budget".yellow().bold(),
            stats.oversized_blocks
        );
    }
}
