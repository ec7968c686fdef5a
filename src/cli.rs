//! CLI argument parsing for chronicle

use chronicle::Level;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chronicle")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Example app writing through a self-rotating daily file logger", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log stream name (camel case is turned into a hyphenated slug)
    #[arg(short, long, global = true, default_value = "LoggedExample")]
    pub name: String,

    /// Directory holding the log files
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Application base directory
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Settings file (defaults to <base-dir>/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show information about the example app
    Info,

    /// Write one line to the log
    Log {
        /// Message text
        message: String,

        /// Severity (DEBUG, INFO, WARNING, ERROR, CRITICAL, FATAL)
        #[arg(short, long, default_value = "INFO")]
        level: Level,

        /// Component tag shown as @component
        #[arg(short, long)]
        component: Option<String>,
    },

    /// Archive and purge old log files now
    Rotate,

    /// Show resolved log paths
    Paths,

    /// Check root and sudo access (may prompt for a password)
    Privileges,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
