//! Steward CLI and interactions endpoint entry point.
//!
//! Binary name: `steward`
//!
//! Parses CLI arguments, initializes the database and engine wiring,
//! then serves the platform interactions webhook.

mod cli;
mod commands;
mod features;
mod http;
mod state;
mod transport;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,steward=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "steward", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;

    match cli.command {
        Commands::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| state.config.listen_addr.clone());
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!(%addr, "interactions endpoint listening");
            axum::serve(listener, http::router(state)).await?;
        }
        Commands::Completions { .. } => unreachable!("handled before state init"),
    }

    Ok(())
}
