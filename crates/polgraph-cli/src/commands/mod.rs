//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use polgraph_core::person::model::PoliticalRole;
use polgraph_db::DbPool;

pub mod graph;
pub mod person;

/// Political person graph pipeline
#[derive(Parser)]
#[command(name = "polgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the SQLite database holding political persons
    #[arg(long, global = true, env = "POLGRAPH_DB", default_value = polgraph_db::DEFAULT_DB_PATH)]
    pub db: PathBuf,

    /// Also append logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Knowledge graph commands (Neo4j)
    Graph(graph::GraphArgs),

    /// Manage political person records
    #[command(subcommand)]
    Person(person::PersonCommands),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Graph(args) => graph::execute(args, &self.db).await,
            Commands::Person(cmd) => person::execute(cmd, &self.db),
        }
    }
}

/// Open the source database, applying migrations.
pub fn open_pool(path: &std::path::Path) -> Result<DbPool> {
    polgraph_db::init_pool(path)
        .with_context(|| format!("Failed to open database at {}", path.display()))
}

/// Parse an optional `--role` value.
pub fn parse_role(role: Option<&str>) -> Result<Option<PoliticalRole>> {
    Ok(role.map(str::parse::<PoliticalRole>).transpose()?)
}
