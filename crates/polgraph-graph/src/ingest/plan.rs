//! Run planning: validates options, picks the unit source, runs the loop.

use chrono::{DateTime, Utc};
use tracing::info;

use polgraph_core::graph::{map_person, sample_units};
use polgraph_core::person::model::PoliticalRole;
use polgraph_core::person::PersonSource;
use polgraph_core::PolgraphResult;

use super::run::{run_units, IngestReport};
use super::upsert::UnitWriter;

/// Default cap on the number of units per run.
pub const DEFAULT_LIMIT: usize = 50;

/// Options of one ingestion run.
#[derive(Debug, Clone)]
pub struct IngestRequest {
    /// Raw role filter; must name a [`PoliticalRole`].
    pub role: Option<String>,
    pub limit: usize,
    /// Build and validate units without writing them.
    pub dry_run: bool,
    /// Use generated sample units instead of the person source.
    pub synthetic: bool,
}

impl Default for IngestRequest {
    fn default() -> Self {
        Self {
            role: None,
            limit: DEFAULT_LIMIT,
            dry_run: false,
            synthetic: false,
        }
    }
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    Completed(IngestReport),
    /// Live mode found no records to ingest.
    NoData,
}

/// Run one ingestion.
///
/// An unknown role is rejected before anything else happens. Per-unit errors
/// end up in the report; only failing to read the source is fatal.
pub async fn run_ingestion<S, W>(
    request: &IngestRequest,
    source: &S,
    writer: &W,
    now: DateTime<Utc>,
) -> PolgraphResult<IngestOutcome>
where
    S: PersonSource + ?Sized,
    W: UnitWriter + ?Sized,
{
    let role = request
        .role
        .as_deref()
        .map(str::parse::<PoliticalRole>)
        .transpose()?;
    let writer = if request.dry_run { None } else { Some(writer) };

    info!(
        role = role.map(|r| r.as_str()),
        limit = request.limit,
        dry_run = request.dry_run,
        synthetic = request.synthetic,
        "Starting ingestion run"
    );

    if request.synthetic {
        let units = sample_units(request.limit, now)?;
        let report = run_units(units.into_iter().map(Ok), writer).await;
        return Ok(IngestOutcome::Completed(report));
    }

    let persons = source.list_for_ingestion(role, request.limit)?;
    if persons.is_empty() {
        return Ok(IngestOutcome::NoData);
    }

    let units = persons.iter().map(|person| map_person(person, now));
    let report = run_units(units, writer).await;
    Ok(IngestOutcome::Completed(report))
}
