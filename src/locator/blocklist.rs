use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SnapshotError;
use crate::fingerprint::fingerprint::fingerprint;
use crate::locator::locator_model::Locator;
use crate::locator::resolve::resolve;
use crate::snapshot::normalize::normalize;
use crate::snapshot::snapshot_model::Node;

/// Views and screens that must not be interacted with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Blocklist {
    /// A bare locator
    Single(Locator),
    /// Screen fingerprints and view locators, mixed
    Entries(Vec<BlocklistEntry>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlocklistEntry {
    Screen(String),
    View(Locator),
}

/// A hit of a blocklist against a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockedView {
    /// The whole screen matched a listed fingerprint
    Screen,
    /// Provenance marker of a matched, enabled element
    Element(i64),
}

impl Blocklist {
    pub fn parse(raw: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(raw).map_err(|source| SnapshotError::JsonParse {
            context: "blocklist".to_string(),
            source,
        })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Blocklist::Entries(entries) if entries.is_empty())
    }

    /// Find what this blocklist hits in `snapshot`.
    ///
    /// A bare locator is resolved alone. Otherwise a fingerprint match blocks
    /// the whole screen and locators are not consulted.
    pub fn check(&self, snapshot: Node) -> Vec<BlockedView> {
        let root = normalize(snapshot);

        let hits: Vec<BlockedView> = match self {
            Blocklist::Single(locator) => blocked_element(&root, locator).into_iter().collect(),
            Blocklist::Entries(entries) if entries.is_empty() => Vec::new(),
            Blocklist::Entries(entries) => {
                if screen_blocked(&root, entries) {
                    vec![BlockedView::Screen]
                } else {
                    entries
                        .iter()
                        .filter_map(|entry| match entry {
                            BlocklistEntry::View(locator) => blocked_element(&root, locator),
                            BlocklistEntry::Screen(_) => None,
                        })
                        .collect()
                }
            }
        };

        debug!(hits = hits.len(), "checked blocklist");
        hits
    }
}

fn screen_blocked(root: &Node, entries: &[BlocklistEntry]) -> bool {
    let listed: Vec<&str> = entries
        .iter()
        .filter_map(|e| match e {
            BlocklistEntry::Screen(digest) => Some(digest.as_str()),
            BlocklistEntry::View(_) => None,
        })
        .collect();
    if listed.is_empty() {
        return false;
    }

    match fingerprint(root) {
        Ok(digest) => listed.contains(&digest.as_str()),
        Err(e) => {
            debug!(error = %e, "snapshot has no fingerprint");
            false
        }
    }
}

fn blocked_element(root: &Node, locator: &Locator) -> Option<BlockedView> {
    let node = resolve(root, locator)?;
    if !node.is_enabled() {
        return None;
    }
    node.hash.map(BlockedView::Element)
}
