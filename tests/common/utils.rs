use std::sync::atomic::{AtomicI64, Ordering};

use screen_locator::snapshot::snapshot_model::{AttrValue, Node};

static NEXT_HASH: AtomicI64 = AtomicI64::new(1);

/// A processed node (carries a provenance hash) with the given class and bounds.
pub fn node(class: &str, bounds: &str) -> Node {
    Node {
        class: Some(class.into()),
        bounds: Some(bounds.into()),
        hash: Some(NEXT_HASH.fetch_add(1, Ordering::Relaxed)),
        ..Default::default()
    }
}

/// A snapshot root with an activity id and full-screen bounds.
pub fn screen(act_id: &str, children: Vec<Node>) -> Node {
    Node {
        activity_id: Some(act_id.into()),
        class: Some("FrameLayout".into()),
        bounds: Some("[0,0][1080,1920]".into()),
        children,
        ..Default::default()
    }
}

pub fn with_children(mut n: Node, children: Vec<Node>) -> Node {
    n.children = children;
    n
}

pub fn with_text(mut n: Node, text: &str) -> Node {
    n.text = Some(text.into());
    n
}

pub fn with_id(mut n: Node, id: impl Into<AttrValue>) -> Node {
    n.id = Some(id.into());
    n
}

pub fn flagged(mut n: Node) -> Node {
    n.is_flagged = true;
    n
}

pub fn fixture(name: &str) -> String {
    let base = std::env::current_dir().unwrap();
    base.join("tests")
        .join("fixtures")
        .join(name)
        .display()
        .to_string()
}
