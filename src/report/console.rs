use crate::report::report_model::BatchReport;

// ============================================================================
// Counting reporter — one line per distinct outcome
// ============================================================================

/// Format the occurrence counts of a report.
///
/// Produces output like:
/// ```text
/// traces/step-0003.json 12
/// traces/step-0001.json 4
/// ```
///
/// Empty when the report was built without counting.
pub fn format_counts(report: &BatchReport) -> String {
    let mut out = String::new();

    for count in report.counts.iter().flatten() {
        out.push_str(&format!("{} {}\n", count.first_path.display(), count.count));
    }

    out
}
