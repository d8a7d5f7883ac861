//! Command-line interface for fireplan.
//!
//! This module provides the CLI structure for the `fireplan` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    option_index, AnalyzeCommand, ConfigCommand, InitCommand, MapCommand, RatingsCommand,
    ReportCommand,
};

/// fireplan - Portable fire extinguisher layout planning
///
/// Computes NFPA 10 extinguisher quantities and placements for a floor
/// outline, checks coverage, and produces compliance reports.
#[derive(Debug, Parser)]
#[command(name = "fireplan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a project and summarise every layout option
    Analyze(AnalyzeCommand),

    /// Write an HTML compliance report
    Report(ReportCommand),

    /// Write the SVG coverage map of one option
    Map(MapCommand),

    /// List standard ratings or parse one
    Ratings(RatingsCommand),

    /// Write a template project file
    Init(InitCommand),

    /// Check for a newer release
    CheckUpdate,

    /// Show program information
    About,

    /// View or modify configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
