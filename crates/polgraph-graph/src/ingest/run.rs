//! Batch-run loop.

use serde::Serialize;
use tracing::{info, warn};

use polgraph_core::graph::IngestionUnit;
use polgraph_core::PolgraphResult;

use super::upsert::UnitWriter;

/// Outcome of a run. Failures never abort the run; they are counted here
/// with their messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<String>,
}

impl IngestReport {
    fn record_success(&mut self) {
        self.succeeded += 1;
    }

    fn record_failure(&mut self, message: String) {
        self.failed += 1;
        self.failures.push(message);
    }

    /// Number of units attempted.
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Process every unit in order.
///
/// Each item is either a unit or the error that prevented building it. With
/// no writer the run only validates: built units count as succeeded and
/// nothing touches the network.
pub async fn run_units<I, W>(units: I, writer: Option<&W>) -> IngestReport
where
    I: IntoIterator<Item = PolgraphResult<IngestionUnit>>,
    W: UnitWriter + ?Sized,
{
    let mut report = IngestReport::default();

    for (index, unit) in units.into_iter().enumerate() {
        let unit = match unit {
            Ok(unit) => unit,
            Err(e) => {
                warn!(index, error = %e, "Skipped record");
                report.record_failure(e.to_string());
                continue;
            }
        };

        if let Some(writer) = writer {
            if let Err(e) = writer.write(&unit).await {
                warn!(index, person_id = unit.person().person_id(), error = %e, "Skipped record");
                report.record_failure(e.to_string());
                continue;
            }
        }

        report.record_success();
    }

    info!(
        total = report.total(),
        succeeded = report.succeeded,
        failed = report.failed,
        validate_only = writer.is_none(),
        "Ingestion run finished"
    );

    report
}
