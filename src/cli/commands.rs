//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Genesys Cloud connector CLI
#[derive(Parser, Debug)]
#[command(name = "genesys-cloud-connector")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Connector configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Test credentials against the API (`GET /api/v2/tokens/me`)
    Check,

    /// Execute a batch of operations
    Run {
        /// Invocation file: a JSON array of {resource, operation, params}
        #[arg(short, long)]
        invocations: PathBuf,

        /// Record per-item errors and keep going instead of aborting
        #[arg(long)]
        continue_on_fail: bool,
    },

    /// List resources and the operations they support
    Resources,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one item per line)
    Json,
    /// Human-readable output
    Pretty,
}
