use std::path::{Path, PathBuf};

use crate::error::SnapshotError;
use crate::snapshot::snapshot_model::Node;

/// Prefix on a batch path that forces fingerprinting.
pub const FORCE_FINGERPRINT_PREFIX: char = '!';

/// One batch input: a snapshot path plus how it must be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRequest {
    pub path: PathBuf,
    pub force_fingerprint: bool,
}

impl SnapshotRequest {
    /// Interpret a command-line argument, honoring the `!` prefix.
    pub fn parse(arg: &str) -> Self {
        match arg.strip_prefix(FORCE_FINGERPRINT_PREFIX) {
            Some(rest) => Self {
                path: PathBuf::from(rest),
                force_fingerprint: true,
            },
            None => Self {
                path: PathBuf::from(arg),
                force_fingerprint: false,
            },
        }
    }
}

/// Expand batch arguments into requests. Directories contribute their
/// `*.json` files in name order.
pub fn expand_requests(args: &[String]) -> Result<Vec<SnapshotRequest>, SnapshotError> {
    let mut requests = Vec::new();

    for arg in args {
        let request = SnapshotRequest::parse(arg);
        if !request.path.is_dir() {
            requests.push(request);
            continue;
        }

        let entries = std::fs::read_dir(&request.path).map_err(|source| SnapshotError::Io {
            path: request.path.display().to_string(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| SnapshotError::Io {
                path: request.path.display().to_string(),
                source,
            })?;
            let p = entry.path();
            if p.extension().map_or(false, |e| e == "json") {
                files.push(p);
            }
        }
        files.sort();

        requests.extend(files.into_iter().map(|path| SnapshotRequest {
            path,
            force_fingerprint: request.force_fingerprint,
        }));
    }

    Ok(requests)
}

/// Read and parse one snapshot document.
pub fn load_snapshot(path: &Path) -> Result<Node, SnapshotError> {
    let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_snapshot(&content, &path.display().to_string())
}

/// Parse a snapshot document already in memory. `context` names the source in errors.
pub fn parse_snapshot(content: &str, context: &str) -> Result<Node, SnapshotError> {
    serde_json::from_str(content).map_err(|source| SnapshotError::JsonParse {
        context: context.to_string(),
        source,
    })
}
