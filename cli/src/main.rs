//! unscan CLI - scanned document to Markdown tool

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unscan::{
    detect_format_from_path, write_document, CleanupPreset, ConvertOptions, Converter, Document,
    HeadingSource, JsonFormat, Page, RegionDetector, RenderOptions, SubstitutionMode, TableFormat,
    TesseractCli,
};

#[derive(Parser)]
#[command(name = "unscan")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert scanned document images to Markdown and JSON", long_about = None)]
struct Cli {
    /// Input image file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    pipeline: PipelineArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options shared by every command that runs recognition.
#[derive(Args, Clone)]
struct PipelineArgs {
    /// Shortest line length counted as a title
    #[arg(long, default_value = "20", global = true)]
    min_size: usize,

    /// Longest line length counted as a title
    #[arg(long, default_value = "25", global = true)]
    max_size: usize,

    /// Heading substitution strategy
    #[arg(long, value_enum, default_value = "token", global = true)]
    substitution: SubstitutionArg,

    /// Also decorate subtitles
    #[arg(long, global = true)]
    subtitles: bool,

    /// Classify headings from the full, unsuppressed page
    #[arg(long, global = true)]
    full_page_headings: bool,

    /// Text cleanup preset
    #[arg(long, value_enum, global = true)]
    cleanup: Option<CleanupLevel>,

    /// Keep table recognition failures from aborting the run
    #[arg(long, global = true)]
    lenient: bool,

    /// Run body and table recognition one after another
    #[arg(long, global = true)]
    sequential: bool,

    /// Per-call recognition timeout in seconds
    #[arg(long, value_name = "SECS", global = true)]
    timeout: Option<u64>,

    /// Path to the tesseract executable
    #[arg(long, env = "UNSCAN_TESSERACT", default_value = "tesseract", global = true)]
    tesseract: PathBuf,

    /// Tesseract language pack
    #[arg(long, value_name = "LANG", global = true)]
    lang: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an image to Markdown and JSON in an output directory
    Convert {
        /// Input image file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Convert an image to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input image file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,

        /// Table rendering mode
        #[arg(long, value_enum, default_value = "markdown")]
        table_mode: TableMode,
    },

    /// Convert an image to JSON
    Json {
        /// Input image file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// List detected table and suppression regions
    Regions {
        /// Input image file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show image information
    Info {
        /// Input image file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Unicode normalization, control characters, line ends
    Minimal,
    /// Minimal plus ligatures and blank-line runs (default)
    Standard,
    /// Raw recognizer output
    None,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum SubstitutionArg {
    /// Replace whole whitespace-delimited tokens
    Token,
    /// Replace every literal occurrence
    Substring,
}

impl From<SubstitutionArg> for SubstitutionMode {
    fn from(arg: SubstitutionArg) -> Self {
        match arg {
            SubstitutionArg::Token => SubstitutionMode::Token,
            SubstitutionArg::Substring => SubstitutionMode::Substring,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum TableMode {
    /// Pipe-delimited Markdown table
    Markdown,
    /// HTML table
    Html,
}

impl From<TableMode> for TableFormat {
    fn from(mode: TableMode) -> Self {
        match mode {
            TableMode::Markdown => TableFormat::Markdown,
            TableMode::Html => TableFormat::Html,
        }
    }
}

impl PipelineArgs {
    fn convert_options(&self) -> ConvertOptions {
        let mut options = ConvertOptions::new()
            .with_heading_sizes(self.min_size, self.max_size)
            .with_substitution(self.substitution.into())
            .with_parallel(!self.sequential);
        options.heading.decorate_subtitles = self.subtitles;

        if self.full_page_headings {
            options = options.with_heading_source(HeadingSource::FullPage);
        }
        if self.lenient {
            options = options.lenient();
        }
        if let Some(secs) = self.timeout {
            options = options.with_timeout(Duration::from_secs(secs));
        }
        options = match self.cleanup {
            Some(CleanupLevel::Minimal) => options.with_cleanup_preset(CleanupPreset::Minimal),
            Some(CleanupLevel::Standard) => options.with_cleanup_preset(CleanupPreset::Standard),
            Some(CleanupLevel::None) => options.without_cleanup(),
            None => options,
        };
        options
    }

    fn converter(&self) -> unscan::Result<Converter> {
        let mut body = TesseractCli::uniform_block().with_binary(&self.tesseract);
        let mut table = TesseractCli::new().with_binary(&self.tesseract);
        if let Some(ref lang) = self.lang {
            body = body.with_language(lang);
            table = table.with_language(lang);
        }
        if let Some(secs) = self.timeout {
            body = body.with_timeout(Duration::from_secs(secs));
            table = table.with_timeout(Duration::from_secs(secs));
        }
        Converter::with_recognizers(Arc::new(body), Arc::new(table), self.convert_options())
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let pipeline = cli.pipeline;

    let result = match cli.command {
        Some(Commands::Convert { input, output }) => {
            cmd_convert(&pipeline, &input, output.as_deref())
        }
        Some(Commands::Markdown {
            input,
            output,
            frontmatter,
            table_mode,
        }) => cmd_markdown(&pipeline, &input, output.as_deref(), frontmatter, table_mode),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&pipeline, &input, output.as_deref(), compact),
        Some(Commands::Regions { input }) => cmd_regions(&input),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&pipeline, &input, cli.output.as_deref())
            } else {
                println!("{}", "Usage: unscan <FILE> [OUTPUT]".yellow());
                println!("       unscan --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn spinner(message: &'static str) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message);
    Ok(pb)
}

fn recognize(pipeline: &PipelineArgs, input: &Path) -> Result<Document, Box<dyn std::error::Error>> {
    let converter = pipeline.converter()?;
    let pb = spinner("Recognizing page...")?;
    let result = converter.convert_file(input);
    pb.finish_and_clear();

    let doc = result?;
    if let Some(issue) = doc.table_issue() {
        log::info!("{}: {}", input.display(), issue);
    }
    Ok(doc)
}

fn cmd_convert(
    pipeline: &PipelineArgs,
    input: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let doc = recognize(pipeline, input)?;

    let render_options = RenderOptions::new().with_frontmatter(true);
    let markdown = unscan::render::to_markdown(&doc, &render_options)?;
    write_document(&markdown, output_dir.join("extract.md"))?;

    let json = unscan::render::to_json(&doc, JsonFormat::Pretty)?;
    write_document(&json, output_dir.join("content.json"))?;

    println!("{}", "Output files:".green().bold());
    println!("  {} extract.md", "├─".dimmed());
    println!("  {} content.json", "└─".dimmed());

    if let Some(issue) = doc.table_issue() {
        println!("{} {}", "Note:".yellow(), issue);
    }

    Ok(())
}

fn cmd_markdown(
    pipeline: &PipelineArgs,
    input: &Path,
    output: Option<&Path>,
    frontmatter: bool,
    table_mode: TableMode,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = recognize(pipeline, input)?;

    let render_options = RenderOptions::new()
        .with_frontmatter(frontmatter)
        .with_table_format(table_mode.into());
    let markdown = unscan::render::to_markdown(&doc, &render_options)?;

    if let Some(path) = output {
        write_document(&markdown, path)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", markdown);
    }

    Ok(())
}

fn cmd_json(
    pipeline: &PipelineArgs,
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = recognize(pipeline, input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = unscan::render::to_json(&doc, format)?;

    if let Some(path) = output {
        write_document(&json, path)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_regions(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let page = Page::open(input)?;
    let detector = RegionDetector::new();

    let tables = detector.detect_tables(&page);
    let suppressed = detector.suppression_regions(&page);

    println!("{}", "Table Regions".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    if tables.is_empty() {
        println!("{}", "none".dimmed());
    }
    for (i, region) in tables.iter().enumerate() {
        println!(
            "{:>3}  {}  aspect {:.2}",
            i + 1,
            region,
            region.aspect_ratio()
        );
    }

    println!();
    println!("{}", "Suppressed Regions".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    if suppressed.is_empty() {
        println!("{}", "none".dimmed());
    }
    for (i, region) in suppressed.iter().enumerate() {
        println!("{:>3}  {}", i + 1, region);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let format = detect_format_from_path(input)?;
    let page = Page::open(input)?;
    let size = fs::metadata(input)?.len();

    println!("{}", "Image Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {} ({})", "Format".bold(), format, format.mime_type());
    println!("{}: {} x {}", "Dimensions".bold(), page.width(), page.height());
    println!("{}: {} bytes", "Size".bold(), size);

    let detector = RegionDetector::new();
    println!();
    println!("{}", "Layout".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!(
        "{}: {}",
        "Table regions".bold(),
        detector.detect_tables(&page).len()
    );
    println!(
        "{}: {}",
        "Suppressed regions".bold(),
        detector.suppression_regions(&page).len()
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unscan".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Scanned document to Markdown tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unscan".dimmed());
    println!("License: MIT");
}
