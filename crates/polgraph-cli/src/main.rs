//! polgraph CLI
//!
//! Moves political person records from SQLite into a Neo4j graph.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::Cli;

/// Initialize tracing, optionally mirroring output to a log file.
///
/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(log_file: Option<&std::path::Path>, verbose: bool) -> Result<()> {
    let default_filter = if verbose {
        "polgraph=debug,polgraph_graph=debug,polgraph_core=debug"
    } else {
        "polgraph=info,polgraph_graph=info,polgraph_core=info"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    if let Some(path) = log_file {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_file.as_deref(), cli.verbose)?;

    cli.execute().await
}
