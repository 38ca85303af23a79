//! treeguess - guess what a project is from its directory tree.
//!
//! Usage:
//!   treeguess <DIRECTORY>                 Scan, print and analyze
//!   treeguess <DIRECTORY> --dry-run       Print the structure only
//!   treeguess <DIRECTORY> --json          Export the tree as JSON
//!   treeguess <DIRECTORY> --interactive   Read through the paged entry reader
//!   treeguess --help                      Show help

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use treeguess_analyze::{AnalysisClient, PromptLanguage};
use treeguess_core::{ScanConfig, ScanError, ScanReport, TreeNode, format_structure};
use treeguess_scan::{FsEntry, FsScanner};
use treeguess_ui::{ConsoleView, LogWriter, Session, Settings, View};

const RULE_WIDTH: usize = 60;

#[derive(Parser)]
#[command(
    name = "treeguess",
    version,
    about = "Guess what a project is from its directory tree",
    long_about = "treeguess renders a directory as an indented tree and asks a language \
                  model what kind of project it is.\n\n\
                  Defaults come from the settings file, then TREEGUESS_MODEL and \
                  TREEGUESS_ENDPOINT, then the flags below."
)]
struct Cli {
    /// Directory to analyze
    directory: PathBuf,

    /// Maximum depth below the root [default: 2]
    #[arg(short, long)]
    depth: Option<u32>,

    /// Comma-separated regex patterns; matching names are left out
    #[arg(short, long, value_delimiter = ',', value_parser = parse_pattern)]
    ignore: Vec<String>,

    /// Model named in the analysis request
    #[arg(short, long)]
    model: Option<String>,

    /// URL the analysis request is sent to
    #[arg(long)]
    endpoint: Option<String>,

    /// Prompt language (en or zh)
    #[arg(long)]
    lang: Option<PromptLanguage>,

    /// Descend into symbolic links to directories, up to the depth limit
    #[arg(long)]
    follow_symlinks: bool,

    /// Colour file names in the printed structure
    #[arg(long)]
    color: bool,

    /// Print the structure without requesting an analysis
    #[arg(long)]
    dry_run: bool,

    /// Print the tree as JSON without requesting an analysis
    #[arg(long, conflicts_with = "dry_run")]
    json: bool,

    /// Read with the paged entry reader; depth, ignore and link following do not apply
    #[arg(long, conflicts_with_all = ["dry_run", "json", "depth", "ignore", "follow_symlinks"])]
    interactive: bool,

    /// Store the effective model, endpoint, depth, ignore list and language
    #[arg(long)]
    save_settings: bool,
}

impl Cli {
    /// Layer command-line values over `settings`.
    fn apply(&self, settings: &mut Settings) {
        if let Some(depth) = self.depth {
            settings.depth = depth;
        }
        if !self.ignore.is_empty() {
            settings.ignore = self.ignore.clone();
        }
        if let Some(model) = &self.model {
            settings.model = model.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            settings.endpoint = endpoint.clone();
        }
        if let Some(lang) = self.lang {
            settings.language = lang;
        }
        if self.follow_symlinks {
            settings.follow_symlinks = true;
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// Output was produced, including a reported analysis failure.
    Completed,
    /// The directory could not be found.
    MissingDirectory,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Completed => ExitCode::SUCCESS,
            Outcome::MissingDirectory => ExitCode::FAILURE,
        }
    }
}

/// Reject ignore patterns that are not valid regular expressions.
fn parse_pattern(s: &str) -> Result<String, String> {
    regex::Regex::new(s)
        .map(|_| s.to_string())
        .map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(LogWriter::new)
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::load().with_env(|key| std::env::var(key).ok());
    cli.apply(&mut settings);

    if cli.save_settings {
        let path = settings.save().context("Failed to save settings")?;
        eprintln!("Saved settings to {}", path.display());
    }

    Ok(run(&cli, &settings).await?.into())
}

/// Scan or read the directory, print it and analyze it.
async fn run(cli: &Cli, settings: &Settings) -> Result<Outcome> {
    if let Err(err) = std::fs::metadata(&cli.directory) {
        eprintln!("Error: {}", ScanError::io(&cli.directory, err));
        return Ok(Outcome::MissingDirectory);
    }

    print_header(cli, settings);

    let client = AnalysisClient::new(settings.analyze_config());
    let mut session = Session::new(ConsoleView::new(cli.color), client, settings.model.clone());

    if cli.interactive {
        run_interactive(&cli.directory, &mut session).await?;
        return Ok(Outcome::Completed);
    }

    let report = run_scan(&cli.directory, settings)?;
    let Some(root) = report.root else {
        eprintln!(
            "Nothing to analyze: {} is ignored or unreadable",
            cli.directory.display()
        );
        return Ok(Outcome::Completed);
    };

    if cli.json {
        println!("{}", tree_json(&root)?);
    } else if cli.dry_run {
        session.view().show_structure(&root, &format_structure(&root));
    } else {
        session.present(root).await;
    }

    Ok(Outcome::Completed)
}

/// Pretty-printed JSON export of a tree.
fn tree_json(root: &TreeNode) -> Result<String> {
    serde_json::to_string_pretty(root).context("Failed to serialize tree")
}

/// Echo the effective options.
fn print_header(cli: &Cli, settings: &Settings) {
    eprintln!("Analyzing directory: {}", cli.directory.display());
    if cli.interactive {
        eprintln!("Depth: unlimited");
    } else {
        eprintln!("Depth: {}", settings.depth);
    }
    if !cli.dry_run && !cli.json {
        eprintln!("Model: {}", settings.model);
    }

    let patterns: Vec<_> = settings
        .ignore
        .iter()
        .filter(|p| !p.is_empty())
        .map(String::as_str)
        .collect();
    if !cli.interactive && !patterns.is_empty() {
        eprintln!("Ignore patterns: {}", patterns.join(", "));
    }
    eprintln!();
}

/// Walk the directory with the bounded scanner and print a summary.
fn run_scan(directory: &Path, settings: &Settings) -> Result<ScanReport> {
    let config = ScanConfig::builder()
        .root(directory)
        .max_depth(settings.depth)
        .ignore_patterns(settings.ignore.clone())
        .follow_symlinks(settings.follow_symlinks)
        .build()
        .map_err(ScanError::from)?;

    let report = FsScanner::new().scan(&config).context("Scan failed")?;

    if report.root.is_some() {
        print_summary(&report);
    }
    if report.has_warnings() {
        eprintln!("{} warning(s) during scan", report.warnings.len());
    }

    Ok(report)
}

fn print_summary(report: &ScanReport) {
    let stats = &report.stats;
    eprintln!("{}", "─".repeat(RULE_WIDTH));
    eprintln!(
        " {} files, {} directories, {}",
        stats.total_files,
        stats.total_dirs,
        format_size(stats.total_size)
    );
    eprintln!(
        " Depth {} reached, scanned in {:.2}s",
        stats.max_depth,
        report.scan_duration.as_secs_f64()
    );
    eprintln!("{}", "─".repeat(RULE_WIDTH));
    eprintln!();
}

/// Read the directory through the entry reader, then display and analyze it.
async fn run_interactive(
    directory: &Path,
    session: &mut Session<ConsoleView, AnalysisClient>,
) -> Result<()> {
    let entry = FsEntry::open(directory)
        .await
        .with_context(|| format!("Cannot open {}", directory.display()))?;

    if session.handle_drop([entry]).await == 0 {
        eprintln!("{} is not a directory", directory.display());
    }

    Ok(())
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
