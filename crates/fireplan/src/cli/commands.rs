//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Analyze command arguments.
#[derive(Debug, Args)]
pub struct AnalyzeCommand {
    /// Project file (TOML or JSON)
    pub project: PathBuf,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Report command arguments.
#[derive(Debug, Args)]
pub struct ReportCommand {
    /// Project file (TOML or JSON)
    pub project: PathBuf,

    /// Layout option to report on (1-based)
    #[arg(long, default_value = "1")]
    pub option: NonZeroUsize,

    /// Output file (defaults to the configured report directory)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Map command arguments.
#[derive(Debug, Args)]
pub struct MapCommand {
    /// Project file (TOML or JSON)
    pub project: PathBuf,

    /// Layout option to draw (1-based)
    #[arg(long, default_value = "1")]
    pub option: NonZeroUsize,

    /// Output file (prints to stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Ratings command arguments.
#[derive(Debug, Args)]
pub struct RatingsCommand {
    /// Rating label to parse instead of listing the standard ratings
    pub rating: Option<String>,
}

/// Init command arguments.
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Where to write the template project
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Convert a 1-based command line option number to an index.
#[must_use]
pub fn option_index(option: NonZeroUsize) -> usize {
    option.get() - 1
}
