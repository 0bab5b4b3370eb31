pub mod config;
pub mod diff;

use crate::errors::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "specdiff",
    version,
    about = "Compare two OpenAPI specifications and report breaking changes"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compare an old specification against a new one
    Diff(diff::DiffArgs),
    /// Inspect resolved configuration
    Config(config::ConfigArgs),
}

/// Dispatch to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Diff(args) => diff::run(&args),
        Commands::Config(args) => config::run(&args),
    }
}
