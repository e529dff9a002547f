//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{SyncCommand, ValidateCommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// Sync fleet-management pipelines found in a directory tree
#[derive(Debug, Parser, Clone)]
#[command(name = "fm-sync")]
#[command(author = "fm-sync Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Discovers fleet-management pipelines and syncs them", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory to search for pipelines (defaults to the current directory)
    #[arg(long, global = true, env = "FM_ROOT_PATH")]
    pub root_path: Option<PathBuf>,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Discover pipelines and sync them with fleet management
    Sync(SyncCommand),

    /// Discover and validate pipelines without syncing
    Validate(ValidateCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
