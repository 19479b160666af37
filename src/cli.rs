use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// spektr - find and reclaim build artifacts across many projects
#[derive(Parser, Debug)]
#[command(name = "spektr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Headless prints a report; interactive opens the review console
    #[arg(short, long, value_enum, default_value_t = Mode::Interactive)]
    pub mode: Mode,

    /// Path to configuration file
    #[arg(short, long, value_name = "PATH", env = "SPEKTR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,

    /// Scan worker threads (0 = auto)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Project types to look for (comma-separated ids)
    #[arg(short, long, value_delimiter = ',', value_name = "TYPES")]
    pub types: Option<Vec<String>>,

    /// Extra directory names to skip (comma-separated)
    #[arg(short, long, value_delimiter = ',', value_name = "NAMES")]
    pub exclude: Option<Vec<String>>,

    /// Maximum recursion depth
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Print the headless report as JSON
    #[arg(long)]
    pub json: bool,

    /// Report what would be freed without deleting
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Headless,
    Interactive,
}
