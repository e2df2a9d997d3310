//! Command-line interface definition and parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the marketplace operator tool.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file.
    #[arg(short, long, env = "APP_CONFIG")]
    pub config: Option<PathBuf>,

    /// What to do with the configured database.
    #[command(subcommand)]
    pub command: Commands,
}

/// Database lifecycle commands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Create every marketplace table. Tables that already exist are left alone.
    SetupDb,
    /// Drop every marketplace table.
    DropDb,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn import() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}
