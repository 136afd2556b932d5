//! extsmith CLI and REST API entry point.
//!
//! Parses CLI arguments, initializes the session registry and
//! configuration, then either starts the REST API server or runs a
//! one-shot bundle generation.

mod cli;
mod http;
mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use http::router::build_router;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,extsmith=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { port } => {
            let state = AppState::init().await?;
            let router = build_router(state);

            let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
            tracing::info!(port, "extsmith API listening");
            axum::serve(listener, router).await?;
        }

        Commands::Generate { requirements, out } => {
            cli::generate::run_generate(&requirements, out).await?;
        }
    }

    Ok(())
}
