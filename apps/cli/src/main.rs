mod adapters;
mod commands;
mod config;
mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::Command;
use config::CliConfig;
use state::AppState;

/// Bulk select and download assets from the skowt.cc asset pack.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,skowt=debug")),
        )
        .init();

    let cli = Cli::parse();

    let config = CliConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load config, using defaults");
        CliConfig::default()
    });
    let mut state = AppState::load(config)?;

    commands::run(cli.command, &mut state).await
}
