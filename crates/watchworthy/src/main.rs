mod cli;
mod commands;
mod render;
mod session;

use clap::Parser;
use cli::{Cli, Commands};
use session::Session;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "warn";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the rendered analysis
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .init();

    let cli = Cli::parse();

    if let Commands::Version = cli.command {
        return commands::version::run();
    }

    let session = Session::open(cli.home, cli.endpoint, cli.ephemeral)?;

    match cli.command {
        Commands::Analyze { url, json } => commands::analyze::run(&session, &url, json).await,
        Commands::History => commands::history::run(&session),
        Commands::Replay { index, json } => commands::replay::run(&session, index, json),
        Commands::Status => commands::status::run(&session),
        Commands::Version => commands::version::run(),
    }
}

/// `RUST_LOG` when set and valid, otherwise warnings only
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}
