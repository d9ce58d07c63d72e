use tracing::debug;

use crate::snapshot::snapshot_model::Node;

/// Drop every child subtree the capture pipeline never processed.
///
/// Processed nodes carry a `hash` provenance marker; a child without one is
/// removed together with everything below it. The root itself is always kept.
pub fn normalize(mut root: Node) -> Node {
    prune_unmarked(&mut root);
    root
}

fn prune_unmarked(node: &mut Node) {
    let before = node.children.len();
    node.children.retain(|ch| ch.hash.is_some());

    if node.children.len() != before {
        debug!(
            dropped = before - node.children.len(),
            "pruned unmarked children"
        );
    }

    for ch in &mut node.children {
        prune_unmarked(ch);
    }
}

/// Flag the first node (pre-order) whose provenance marker equals `target`.
///
/// Returns whether such a node was found.
pub fn mark_flagged(node: &mut Node, target: i64) -> bool {
    if node.hash == Some(target) {
        node.is_flagged = true;
        debug!(hash = target, bounds = ?node.bounds, "flagged node");
        return true;
    }

    node.children.iter_mut().any(|ch| mark_flagged(ch, target))
}
