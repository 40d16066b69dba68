//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Page through JSON arrays and line files
#[derive(Parser, Debug)]
#[command(name = "array-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Page limits file (YAML or JSON)
    #[arg(short = 'L', long, global = true)]
    pub limits: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print one page of the input collection
    Page(PageArgs),

    /// Print every page, following next_key until exhausted
    Walk(PageArgs),

    /// Show the effective page limits
    Limits,
}

/// Input and page request arguments
#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// Input file: a JSON array, or one item per line with --lines
    #[arg(short, long)]
    pub input: PathBuf,

    /// Treat the input as newline-delimited text
    #[arg(long)]
    pub lines: bool,

    /// Number of items to skip
    #[arg(long, default_value = "0")]
    pub offset: u64,

    /// Page size (0 = default limit)
    #[arg(long, default_value = "0")]
    pub limit: u64,

    /// Cursor from a previous page (decimal index)
    #[arg(long)]
    pub key: Option<String>,

    /// Page from the end of the collection
    #[arg(long)]
    pub reverse: bool,

    /// Inline page request JSON (overrides the flags above)
    #[arg(long)]
    pub request_json: Option<String>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one page per line)
    Json,
    /// Human-readable output
    Pretty,
}
