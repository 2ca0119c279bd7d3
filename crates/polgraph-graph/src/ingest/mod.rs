//! Political person ingestion into Neo4j.
//!
//! - [`upsert`]: applies one unit with ordered, idempotent upserts.
//! - [`run`]: drives many units and isolates per-unit failures.
//! - [`plan`]: picks the units for a run (live source or synthetic).

pub mod plan;
pub mod run;
pub mod upsert;

pub use plan::{run_ingestion, IngestOutcome, IngestRequest, DEFAULT_LIMIT};
pub use run::{run_units, IngestReport};
pub use upsert::{GraphIngestor, UnitWriter};
