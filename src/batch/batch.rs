use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::SnapshotError;
use crate::fingerprint::fingerprint::fingerprint;
use crate::locator::builder::build_locator;
use crate::locator::locator_model::Locator;
use crate::locator::path::find_flagged_path;
use crate::report::report_model::{BatchEntry, BatchReport};
use crate::snapshot::loader::{SnapshotRequest, load_snapshot};
use crate::snapshot::normalize::normalize;
use crate::snapshot::snapshot_model::Node;

/// Batch options. Passed explicitly to [`run_batch`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Also aggregate occurrence counts per distinct outcome
    #[serde(default)]
    pub counting: bool,
}

/// What a single snapshot produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotOutcome {
    Locator(Locator),
    Fingerprint(String),
}

/// Route one parsed snapshot to the locator or fingerprint builder.
///
/// Snapshots without a flagged node, or with `force_fingerprint`, are
/// fingerprinted. A flagged snapshot without an activity id yields
/// `MissingActivity`.
pub fn process_snapshot(root: Node, force_fingerprint: bool) -> Result<SnapshotOutcome, SnapshotError> {
    let root = normalize(root);

    if force_fingerprint {
        return fingerprint(&root).map(SnapshotOutcome::Fingerprint);
    }

    match find_flagged_path(&root) {
        Some(path) => {
            debug!(?path, "found flagged node");
            build_locator(&root, &path).map(SnapshotOutcome::Locator)
        }
        None => {
            debug!("no flagged node, falling back to fingerprint");
            fingerprint(&root).map(SnapshotOutcome::Fingerprint)
        }
    }
}

/// Load and process one request.
pub fn process_request(request: &SnapshotRequest) -> Result<SnapshotOutcome, SnapshotError> {
    let root = load_snapshot(&request.path)?;
    process_snapshot(root, request.force_fingerprint)
}

/// Process every request in order. Failures are logged and skipped.
pub fn run_batch(requests: &[SnapshotRequest], config: &BatchConfig) -> BatchReport {
    let mut entries = Vec::with_capacity(requests.len());
    let mut skipped: Vec<PathBuf> = Vec::new();

    for request in requests {
        match process_request(request) {
            Ok(outcome) => entries.push(BatchEntry {
                path: request.path.clone(),
                outcome,
            }),
            Err(e) => {
                warn!(path = %request.path.display(), error = %e, "skipping snapshot");
                skipped.push(request.path.clone());
            }
        }
    }

    info!(
        processed = entries.len(),
        skipped = skipped.len(),
        "batch complete"
    );

    let report = BatchReport::new(entries, skipped);
    if config.counting { report.with_counts() } else { report }
}
