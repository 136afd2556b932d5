//! CLI argument definitions and command implementations.

pub mod generate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Chat-driven browser-extension scaffolder.
#[derive(Parser)]
#[command(name = "extsmith", version, about)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(long, default_value_t = 8744)]
        port: u16,
    },

    /// Generate a bundle once from a requirements JSON file.
    Generate {
        /// Path to a JSON file holding the requirements record.
        #[arg(long)]
        requirements: PathBuf,

        /// Output root for the bundle directory and zip
        /// (defaults to the configured output root).
        #[arg(long)]
        out: Option<PathBuf>,
    },
}
