use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::batch::batch::SnapshotOutcome;

// ============================================================================
// Batch report — aggregates per-snapshot outcomes
// ============================================================================

/// One successfully processed snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEntry {
    pub path: PathBuf,
    pub outcome: SnapshotOutcome,
}

/// Occurrences of one distinct outcome across a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeCount {
    pub outcome: SnapshotOutcome,
    pub count: usize,
    /// First path that produced this outcome
    pub first_path: PathBuf,
}

/// Aggregated result of a batch run.
///
/// Built by `run_batch()`. Consumed by the JSON and counting reporters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    /// Processed snapshots, in input order
    pub entries: Vec<BatchEntry>,

    /// Snapshots that produced neither a locator nor a fingerprint
    pub skipped: Vec<PathBuf>,

    /// Distinct outcomes by descending count (only when counting)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<Vec<OutcomeCount>>,
}

impl BatchReport {
    pub fn new(entries: Vec<BatchEntry>, skipped: Vec<PathBuf>) -> Self {
        Self {
            entries,
            skipped,
            counts: None,
        }
    }

    /// Compute occurrence counts. Equal counts keep first-seen order.
    pub fn with_counts(mut self) -> Self {
        self.counts = Some(count_outcomes(&self.entries));
        self
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &SnapshotOutcome> {
        self.entries.iter().map(|e| &e.outcome)
    }
}

fn count_outcomes(entries: &[BatchEntry]) -> Vec<OutcomeCount> {
    let mut index: HashMap<&SnapshotOutcome, usize> = HashMap::new();
    let mut counts: Vec<OutcomeCount> = Vec::new();

    for entry in entries {
        match index.get(&entry.outcome) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(&entry.outcome, counts.len());
                counts.push(OutcomeCount {
                    outcome: entry.outcome.clone(),
                    count: 1,
                    first_path: entry.path.clone(),
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
