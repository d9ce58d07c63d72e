use std::collections::BTreeSet;

use tracing::debug;

use crate::error::SnapshotError;
use crate::locator::locator_model::{Locator, LocatorStep};
use crate::snapshot::snapshot_model::{AttrValue, Attribute, Node};

/// One slot of the per-level discrimination order.
#[derive(Debug, Clone, Copy)]
enum Probe {
    Attr(Attribute),
    /// Either switch to descendant mode (once, at the flagged level) or fall
    /// back to the sibling index.
    TieBreak,
}

const DISCRIMINATION_ORDER: [Probe; 8] = [
    Probe::Attr(Attribute::IdName),
    Probe::Attr(Attribute::Id),
    Probe::Attr(Attribute::Class),
    Probe::Attr(Attribute::Text),
    Probe::Attr(Attribute::ContentDescription),
    Probe::TieBreak,
    Probe::Attr(Attribute::Text),
    Probe::TieBreak,
];

/// Build the locator for the node reached by `path` (see
/// [`find_flagged_path`](crate::locator::path::find_flagged_path)).
///
/// Fails with `MissingActivity` when the root has no usable activity id.
pub fn build_locator(root: &Node, path: &[usize]) -> Result<Locator, SnapshotError> {
    let activity_id = match root.activity_id.as_deref() {
        Some(act) if !act.is_empty() => act.to_string(),
        _ => return Err(SnapshotError::MissingActivity),
    };

    let steps = discriminate_path(root, path)?;

    Ok(Locator {
        activity_id,
        steps: finalize(steps),
    })
}

/// Derive one discriminator step per level, root first.
pub fn discriminate_path(root: &Node, path: &[usize]) -> Result<Vec<LocatorStep>, SnapshotError> {
    let mut steps = Vec::with_capacity(path.len());
    let mut parent = root;

    for (depth, &pos) in path.iter().enumerate() {
        if pos >= parent.children.len() {
            return Err(SnapshotError::MissingField("ch"));
        }

        let is_flagged_level = depth + 1 == path.len();
        steps.push(discriminate(&parent.children, pos, is_flagged_level));
        parent = &parent.children[pos];
    }

    Ok(steps)
}

/// Pick the smallest sufficient set of discriminators that singles out
/// `siblings[pos]` among `siblings`.
pub fn discriminate(siblings: &[Node], pos: usize, is_flagged_level: bool) -> LocatorStep {
    let target = &siblings[pos];
    let mut candidates: Vec<&Node> = siblings.iter().collect();
    let mut step = LocatorStep::default();
    let mut descendant_mode = false;

    for probe in DISCRIMINATION_ORDER {
        if candidates.len() <= 1 {
            break;
        }

        match probe {
            Probe::TieBreak if is_flagged_level && !descendant_mode => {
                descendant_mode = true;
            }
            Probe::TieBreak => {
                step.position = Some(pos);
                break;
            }
            Probe::Attr(attr) if descendant_mode => {
                let values = descendant_values(target, attr);
                candidates.retain(|c| descendant_values(c, attr) == values);
                step.record_descendants(attr, values);
            }
            Probe::Attr(attr) => {
                if let Some(value) = target.attr(attr) {
                    candidates.retain(|c| c.attr(attr).as_ref() == Some(&value));
                    step.record(attr, value);
                }
            }
        }
    }

    debug!(pos, remaining = candidates.len(), step = ?step, "discriminated level");
    step
}

/// Sorted, deduplicated non-empty values of `attr` anywhere in `node`'s subtree
/// (the node itself included).
pub fn descendant_values(node: &Node, attr: Attribute) -> Vec<AttrValue> {
    node.descendants()
        .filter_map(|n| n.attr(attr))
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Move legacy numeric ids into `idn` so they never collide with string ids.
pub fn finalize(steps: Vec<LocatorStep>) -> Vec<LocatorStep> {
    steps
        .into_iter()
        .map(|mut step| {
            if let Some(AttrValue::Number(n)) = step.id {
                step.idn = Some(n);
                step.id = None;
            }
            step
        })
        .collect()
}
