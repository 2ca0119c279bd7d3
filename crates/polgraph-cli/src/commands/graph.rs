//! Knowledge Graph CLI commands.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

use polgraph_core::person::{self, model::PoliticalPerson};
use polgraph_core::PolgraphError;
use polgraph_graph::ingest::DEFAULT_LIMIT;
use polgraph_graph::schema;
use polgraph_graph::{
    run_ingestion, CypherRunner, GraphClient, GraphConfig, GraphIngestor, IngestOutcome, IngestRequest,
    Parameters,
};

use crate::output;

#[derive(Args)]
pub struct GraphArgs {
    #[command(flatten)]
    pub neo4j: Neo4jArgs,

    #[command(subcommand)]
    pub command: GraphCommands,
}

/// Connection settings for the Neo4j HTTP API.
#[derive(Args)]
pub struct Neo4jArgs {
    /// Neo4j HTTP endpoint
    #[arg(long = "neo4j-endpoint", env = "NEO4J_HTTP_ENDPOINT", default_value = "http://localhost:7474")]
    pub endpoint: String,

    /// Neo4j user
    #[arg(long = "neo4j-user", env = "NEO4J_USERNAME", default_value = "neo4j")]
    pub username: String,

    /// Neo4j password
    #[arg(long = "neo4j-password", env = "NEO4J_PASSWORD", hide_env_values = true, default_value = "polgraph_dev")]
    pub password: String,

    /// Neo4j database name
    #[arg(long = "neo4j-database", env = "NEO4J_DATABASE", default_value = "neo4j")]
    pub database: String,
}

impl Neo4jArgs {
    fn config(&self) -> GraphConfig {
        GraphConfig {
            endpoint: self.endpoint.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum GraphCommands {
    /// Ingest political persons into Neo4j
    Ingest {
        /// Only ingest persons with this role (president, prime_minister, minister, deputy, senator)
        #[arg(long)]
        role: Option<String>,

        /// Maximum number of persons to ingest
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,

        /// Validate units without writing to Neo4j
        #[arg(long)]
        dry_run: bool,

        /// Use generated sample units instead of database records
        #[arg(long)]
        sample: bool,
    },

    /// Apply schema constraints and indexes
    InitSchema {
        /// Schema file (defaults to the built-in schema)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Print statements without executing
        #[arg(long)]
        dry_run: bool,
    },

    /// Execute a Cypher statement and print the raw response
    Query {
        /// Cypher statement
        statement: String,
    },

    /// Show graph status
    Status,
}

pub async fn execute(args: GraphArgs, db_path: &Path) -> Result<()> {
    let client = GraphClient::new(&args.neo4j.config()).context("Failed to build Neo4j client")?;

    match args.command {
        GraphCommands::Ingest { role, limit, dry_run, sample } => {
            let request = IngestRequest { role, limit, dry_run, synthetic: sample };
            cmd_ingest(client, db_path, &request).await
        }
        GraphCommands::InitSchema { path, dry_run } => cmd_init_schema(&client, path.as_deref(), dry_run).await,
        GraphCommands::Query { statement } => cmd_query(&client, &statement).await,
        GraphCommands::Status => cmd_status(&client, db_path).await,
    }
}

/// Run the ingestion pipeline.
async fn cmd_ingest(client: GraphClient, db_path: &Path, request: &IngestRequest) -> Result<()> {
    println!("{}", "Political person graph ingestion".bold());
    println!("{}", "─".repeat(50));

    // Reject a bad role before touching the database.
    super::parse_role(request.role.as_deref())?;

    let ingestor = GraphIngestor::new(client);
    let now = Utc::now();

    let result = if request.synthetic {
        println!("{} Using sample units (database records are not read).", "note:".cyan());
        let no_records: &[PoliticalPerson] = &[];
        run_ingestion(request, no_records, &ingestor, now).await
    } else {
        let pool = super::open_pool(db_path)?;
        run_ingestion(request, &pool, &ingestor, now).await
    };

    let report = match result {
        Ok(IngestOutcome::Completed(report)) => report,
        Ok(IngestOutcome::NoData) if request.dry_run => {
            println!(
                "{} No political persons available for ingestion. Import some with 'polgraph person import'.",
                "warning:".yellow()
            );
            return Ok(());
        }
        Ok(IngestOutcome::NoData) => {
            bail!("No political persons available for ingestion. Import some with 'polgraph person import'.")
        }
        Err(PolgraphError::Input(message)) => bail!(message),
        Err(e) => return Err(e).context("Ingestion run failed"),
    };

    output::print_ingest_report(&report, request.dry_run);
    Ok(())
}

/// Apply (or print) schema statements.
async fn cmd_init_schema(client: &GraphClient, path: Option<&Path>, dry_run: bool) -> Result<()> {
    let statements = match path {
        Some(path) => {
            if !path.is_file() {
                bail!("Schema file not found: {}", path.display());
            }
            schema::load_statements(path)?
        }
        None => schema::parse_statements(schema::DEFAULT_SCHEMA),
    };

    if statements.is_empty() {
        println!("{} Schema file is empty. Nothing to do.", "warning:".yellow());
        return Ok(());
    }

    if dry_run {
        println!("{}", "Neo4j schema statements (dry run)".bold());
        for statement in &statements {
            println!("{};", statement);
        }
        return Ok(());
    }

    println!("{}", "Applying Neo4j schema...".bold());
    let applied = schema::apply_schema(client, &statements).await?;
    println!("{} Applied {} schema statement(s).", "✓".green().bold(), applied);

    Ok(())
}

/// Execute a raw Cypher statement.
async fn cmd_query(client: &GraphClient, statement: &str) -> Result<()> {
    let response = client.run(statement, Parameters::new()).await?;
    let results = response.get("results").cloned().unwrap_or_default();

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

/// Show stored person and graph node/relationship counts.
async fn cmd_status(client: &GraphClient, db_path: &Path) -> Result<()> {
    println!("{}", "Knowledge Graph Status".bold());
    println!("{}", "─".repeat(40));

    let pool = super::open_pool(db_path)?;
    let persons = person::count_persons(&pool)?;
    println!("  Database:      {}", db_path.display().to_string().dimmed());
    println!("  Persons:       {}", persons.to_string().cyan());

    let counts = client.get_counts().await?;
    println!("  Endpoint:      {}", client.commit_url().dimmed());
    println!("  Nodes:         {}", counts.nodes.to_string().cyan());
    println!("  Relationships: {}", counts.relationships.to_string().cyan());

    println!("{}", "─".repeat(40));
    Ok(())
}
