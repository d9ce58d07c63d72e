use std::path::Path;

use tracing::{info, warn};

use crate::batch::batch::{BatchConfig, run_batch};
use crate::error::SnapshotError;
use crate::fingerprint::fingerprint::fingerprint;
use crate::locator::blocklist::{BlockedView, Blocklist};
use crate::report::console::format_counts;
use crate::report::json::format_json;
use crate::snapshot::loader::{expand_requests, load_snapshot};
use crate::snapshot::normalize::{mark_flagged, normalize};

// ============================================================================
// locate subcommand
// ============================================================================

/// Process a batch and write either the locator array or the counts.
pub fn cmd_locate(
    paths: &[String],
    config: &BatchConfig,
    output: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let requests = expand_requests(paths)?;
    info!(snapshots = requests.len(), counting = config.counting, "locating");

    let report = run_batch(&requests, config);

    let output_content = if config.counting {
        format_counts(&report)
    } else {
        format!("{}\n", format_json(&report)?)
    };

    write_output(output, &output_content)
}

// ============================================================================
// fingerprint subcommand
// ============================================================================

/// Fingerprint one snapshot, ignoring any flagged element.
pub fn cmd_fingerprint(path: &str) -> Result<String, Box<dyn std::error::Error>> {
    let root = normalize(load_snapshot(Path::new(path))?);
    Ok(fingerprint(&root)?)
}

// ============================================================================
// check subcommand
// ============================================================================

/// Check one snapshot against a blocklist.
pub fn cmd_check(
    path: &str,
    blocklist_source: Option<&str>,
) -> Result<Vec<BlockedView>, Box<dyn std::error::Error>> {
    let Some(source) = blocklist_source else {
        warn!("no blocklist configured");
        return Ok(Vec::new());
    };

    let blocklist = Blocklist::parse(&read_blocklist(source)?)?;
    if blocklist.is_empty() {
        return Ok(Vec::new());
    }

    let snapshot = load_snapshot(Path::new(path))?;
    Ok(blocklist.check(snapshot))
}

/// Render check hits one per line: `screen` or the element's hash.
pub fn format_blocked(views: &[BlockedView]) -> String {
    views
        .iter()
        .map(|v| match v {
            BlockedView::Screen => "screen\n".to_string(),
            BlockedView::Element(hash) => format!("{}\n", hash),
        })
        .collect()
}

fn read_blocklist(source: &str) -> Result<String, SnapshotError> {
    match source.strip_prefix('@') {
        Some(file) => std::fs::read_to_string(file).map_err(|e| SnapshotError::Io {
            path: file.to_string(),
            source: e,
        }),
        None => Ok(source.to_string()),
    }
}

// ============================================================================
// mark subcommand
// ============================================================================

/// Flag the element with provenance `hash` and write the snapshot back out.
///
/// Returns whether the element was found; the snapshot is written either way.
pub fn cmd_mark(path: &str, hash: i64, output: Option<&str>) -> Result<bool, Box<dyn std::error::Error>> {
    let mut root = load_snapshot(Path::new(path))?;

    let found = mark_flagged(&mut root, hash);
    if !found {
        warn!(hash, path, "no element with this hash");
    }

    let json = serde_json::to_string(&root).map_err(|source| SnapshotError::JsonParse {
        context: format!("serialize {}", path),
        source,
    })?;
    write_output(output, &format!("{}\n", json))?;

    Ok(found)
}

// ============================================================================
// Helpers
// ============================================================================

fn write_output(output: Option<&str>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => std::fs::write(path, content)?,
        None => print!("{}", content),
    }
    Ok(())
}
