use crate::snapshot::snapshot_model::Node;

/// Child indices leading from `root` to the flagged node, root first.
///
/// Depth-first in document order; the first flagged node reached wins. An
/// empty path means the root itself is flagged. `None` means nothing is
/// flagged.
pub fn find_flagged_path(root: &Node) -> Option<Vec<usize>> {
    let mut path = find_reversed(root)?;
    path.reverse();
    Some(path)
}

// Indices are pushed while unwinding, so they come out deepest first.
fn find_reversed(node: &Node) -> Option<Vec<usize>> {
    if node.is_flagged {
        return Some(Vec::new());
    }

    node.children.iter().enumerate().find_map(|(i, ch)| {
        find_reversed(ch).map(|mut path| {
            path.push(i);
            path
        })
    })
}
