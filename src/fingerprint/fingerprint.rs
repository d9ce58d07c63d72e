use sha1::{Digest, Sha1};
use tracing::debug;

use crate::error::SnapshotError;
use crate::snapshot::bounds::Rect;
use crate::snapshot::snapshot_model::Node;

const UNKNOWN_ACTIVITY: &str = "unknown";
const MISSING_ID_TOKEN: &str = "-1";
const OPEN: &str = "[";
const CLOSE: &str = "]";

/// Reference frame a snapshot is fingerprinted against.
#[derive(Debug, Clone)]
pub struct ReferenceFrame {
    pub activity_id: String,
    pub rect: Rect,
}

impl ReferenceFrame {
    /// Check that `root` can be fingerprinted at all.
    pub fn from_root(root: &Node) -> Result<Self, SnapshotError> {
        let bounds = root
            .bounds
            .as_deref()
            .ok_or(SnapshotError::MissingField("bound"))?;
        let activity_id = root
            .activity_id
            .clone()
            .ok_or(SnapshotError::MissingField("act_id"))?;

        if activity_id == UNKNOWN_ACTIVITY && !root.is_focus_region {
            return Err(SnapshotError::UnknownActivity);
        }

        Ok(Self {
            activity_id,
            rect: Rect::parse(bounds)?,
        })
    }

    /// Spatial filtering only applies when the reference rectangle has area.
    pub fn filters_spatially(&self) -> bool {
        self.rect.has_area()
    }
}

/// Content hash of the visible structure of a snapshot overlapping its
/// reference rectangle. Text and descriptions do not contribute.
pub fn fingerprint(root: &Node) -> Result<String, SnapshotError> {
    let frame = ReferenceFrame::from_root(root)?;
    let tokens = structure_tokens(root, &frame)?;

    let mut hasher = Sha1::new();
    for token in &tokens {
        hasher.update(token.as_bytes());
    }
    let digest = format!("{:x}", hasher.finalize());

    debug!(activity = %frame.activity_id, tokens = tokens.len(), %digest, "fingerprinted snapshot");
    Ok(digest)
}

/// Token stream hashed by [`fingerprint`], starting with the activity id.
pub fn structure_tokens(root: &Node, frame: &ReferenceFrame) -> Result<Vec<String>, SnapshotError> {
    let mut pool = vec![frame.activity_id.clone()];
    // Root visibility never hides the whole screen.
    emit(root, &mut pool)?;
    for ch in &root.children {
        traverse(ch, frame, &mut pool)?;
    }
    pool.push(CLOSE.to_string());
    Ok(pool)
}

fn traverse(node: &Node, frame: &ReferenceFrame, pool: &mut Vec<String>) -> Result<(), SnapshotError> {
    if node.is_hidden() {
        return Ok(());
    }
    let Some(bounds) = node.bounds.as_deref() else {
        return Ok(());
    };
    if frame.filters_spatially() {
        match Rect::parse(bounds) {
            Ok(rect) if rect.overlaps(&frame.rect) => {}
            _ => return Ok(()),
        }
    }

    emit(node, pool)?;
    for ch in &node.children {
        traverse(ch, frame, pool)?;
    }
    pool.push(CLOSE.to_string());
    Ok(())
}

// Opening tokens of a surviving node: marker, id, class.
fn emit(node: &Node, pool: &mut Vec<String>) -> Result<(), SnapshotError> {
    let class = node
        .class
        .as_deref()
        .ok_or(SnapshotError::MissingField("class"))?;

    pool.push(OPEN.to_string());
    pool.push(
        node.id
            .as_ref()
            .map_or_else(|| MISSING_ID_TOKEN.to_string(), |id| id.token()),
    );
    pool.push(class.to_string());
    Ok(())
}
