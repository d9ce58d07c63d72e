use crate::error::SnapshotError;
use crate::report::report_model::BatchReport;

/// Render all outcomes of a report as one compact JSON array, in input order.
pub fn format_json(report: &BatchReport) -> Result<String, SnapshotError> {
    let outcomes: Vec<_> = report.outcomes().collect();
    serde_json::to_string(&outcomes).map_err(|source| SnapshotError::JsonParse {
        context: "batch report".to_string(),
        source,
    })
}
