//! # Polgraph Graph
//!
//! Neo4j side of the ingestion pipeline.
//!
//! Provides the transactional HTTP client, schema application, the per-unit
//! upsert orchestrator and the batch-run loop that drives it.

pub mod client;
pub mod error;
pub mod ingest;
pub mod schema;

pub use client::{CypherRunner, GraphClient, GraphConfig, GraphCounts, Parameters};
pub use error::{GraphError, GraphResult};
pub use ingest::{run_ingestion, run_units, GraphIngestor, IngestOutcome, IngestReport, IngestRequest, UnitWriter};
