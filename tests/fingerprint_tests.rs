use screen_locator::fingerprint::fingerprint::{ReferenceFrame, fingerprint, structure_tokens};
use screen_locator::snapshot::loader::parse_snapshot;
use screen_locator::snapshot::snapshot_model::Node;
use screen_locator::{SnapshotError, SnapshotOutcome, process_snapshot};

use crate::common::utils::{flagged, node, screen, with_children, with_id, with_text};

mod common;

fn sample_screen() -> Node {
    screen(
        "com.app.MainActivity",
        vec![
            with_children(
                with_id(node("LinearLayout", "[0,0][1080,200]"), "com.app:id/header"),
                vec![with_text(node("TextView", "[0,0][540,200]"), "Inbox")],
            ),
            with_children(
                node("RecyclerView", "[0,200][1080,1920]"),
                vec![
                    with_text(node("TextView", "[0,200][1080,400]"), "Hello"),
                    with_text(node("TextView", "[0,400][1080,600]"), "World"),
                ],
            ),
        ],
    )
}

// =========================================================================
// Token stream
// =========================================================================

#[test]
fn tokens_follow_preorder_structure() {
    let root = screen(
        "A",
        vec![with_children(
            with_id(node("Group", "[0,0][10,10]"), 5i64),
            vec![node("Leaf", "[0,0][5,5]")],
        )],
    );
    let frame = ReferenceFrame::from_root(&root).unwrap();

    let tokens = structure_tokens(&root, &frame).unwrap();
    assert_eq!(
        tokens.concat(),
        "A[-1FrameLayout[5Group[-1Leaf]]]",
        "activity prefix, then [ id class children ] per node"
    );
}

#[test]
fn digest_is_lowercase_sha1_hex() {
    let digest = fingerprint(&sample_screen()).unwrap();
    assert_eq!(digest.len(), 40);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn fingerprint_is_idempotent() {
    let root = sample_screen();
    assert_eq!(fingerprint(&root).unwrap(), fingerprint(&root).unwrap());
}

// =========================================================================
// Invariance and sensitivity
// =========================================================================

#[test]
fn text_and_description_do_not_affect_digest() {
    let a = sample_screen();
    let mut b = sample_screen();
    b.children[1].children[0].text = Some("Different".into());
    b.children[1].children[1].content_description = Some("desc".into());

    assert_eq!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());
}

#[test]
fn class_or_id_changes_affect_digest() {
    let base = fingerprint(&sample_screen()).unwrap();

    let mut class_changed = sample_screen();
    class_changed.children[1].children[1].class = Some("Button".into());
    assert_ne!(base, fingerprint(&class_changed).unwrap());

    let mut id_changed = sample_screen();
    id_changed.children[0].id = Some("com.app:id/toolbar".into());
    assert_ne!(base, fingerprint(&id_changed).unwrap());
}

#[test]
fn numeric_and_string_ids_tokenize_the_same_text() {
    let mut a = sample_screen();
    a.children[0].id = Some(12i64.into());
    let mut b = sample_screen();
    b.children[0].id = Some("12".into());

    assert_eq!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());
}

// =========================================================================
// Visibility and spatial filtering
// =========================================================================

#[test]
fn hidden_subtrees_are_ignored() {
    let mut a = sample_screen();
    a.children[1].children[1].visibility = Some(1);
    a.children[1].children[1].children = vec![node("ImageView", "[0,0][1,1]")];

    let mut b = sample_screen();
    b.children[1].children[1].visibility = Some(8);
    b.children[1].children[1].class = Some("Totally different".into());

    assert_eq!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());

    let mut removed = sample_screen();
    removed.children[1].children.pop();
    assert_eq!(fingerprint(&a).unwrap(), fingerprint(&removed).unwrap());
}

#[test]
fn explicit_zero_visibility_counts_as_visible() {
    let base = fingerprint(&sample_screen()).unwrap();
    let mut visible = sample_screen();
    visible.children[0].visibility = Some(0);

    assert_eq!(base, fingerprint(&visible).unwrap());
}

#[test]
fn root_visibility_is_ignored() {
    let base = fingerprint(&sample_screen()).unwrap();
    let mut hidden_root = sample_screen();
    hidden_root.visibility = Some(1);

    assert_eq!(base, fingerprint(&hidden_root).unwrap());
}

#[test]
fn nodes_without_bounds_are_ignored() {
    let base = fingerprint(&sample_screen()).unwrap();
    let mut extra = sample_screen();
    extra.children.push(Node {
        class: Some("Ghost".into()),
        hash: Some(1),
        ..Default::default()
    });

    assert_eq!(base, fingerprint(&extra).unwrap());
}

#[test]
fn differing_hidden_subtree_outside_region_does_not_matter() {
    let make = |class: &str| {
        let mut root = sample_screen();
        root.bounds = Some("[0,0][1080,1000]".into());
        let mut offscreen = with_children(
            node("Drawer", "[0,1500][1080,1920]"),
            vec![node(class, "[0,1500][1080,1600]")],
        );
        offscreen.visibility = Some(1);
        root.children.push(offscreen);
        root
    };

    assert_eq!(
        fingerprint(&make("ListView")).unwrap(),
        fingerprint(&make("GridView")).unwrap()
    );
}

#[test]
fn nodes_outside_reference_rectangle_are_ignored() {
    let mut a = sample_screen();
    a.bounds = Some("[0,0][1080,1000]".into());
    let mut b = a.clone();
    b.children.push(node("Keyboard", "[0,1200][1080,1920]"));

    assert_eq!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());
}

#[test]
fn edge_touching_node_is_excluded() {
    let mut a = sample_screen();
    a.bounds = Some("[0,0][1080,1000]".into());
    let mut b = a.clone();
    b.children.push(node("Footer", "[0,1000][1080,1100]"));

    assert_eq!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());

    let mut c = a.clone();
    c.children.push(node("Footer", "[0,999][1080,1100]"));
    assert_ne!(fingerprint(&a).unwrap(), fingerprint(&c).unwrap());
}

#[test]
fn degenerate_reference_rectangle_disables_spatial_filter() {
    let mut a = sample_screen();
    a.bounds = Some("[0,0][0,0]".into());
    let mut b = a.clone();
    b.children.push(node("Keyboard", "[5000,5000][6000,6000]"));

    assert_ne!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());
}

#[test]
fn unparseable_child_bounds_are_skipped_when_filtering() {
    let base = fingerprint(&sample_screen()).unwrap();
    let mut b = sample_screen();
    b.children.push(node("Broken", "not-a-rect"));

    assert_eq!(base, fingerprint(&b).unwrap());
}

// =========================================================================
// Validation
// =========================================================================

#[test]
fn missing_root_bounds_yields_no_fingerprint() {
    let mut root = sample_screen();
    root.bounds = None;

    assert!(matches!(
        fingerprint(&root),
        Err(SnapshotError::MissingField("bound"))
    ));
    assert!(process_snapshot(root, false).is_err());
}

#[test]
fn missing_activity_yields_no_fingerprint() {
    let mut root = sample_screen();
    root.activity_id = None;

    assert!(matches!(
        fingerprint(&root),
        Err(SnapshotError::MissingField("act_id"))
    ));
}

#[test]
fn unknown_activity_requires_focus_region() {
    let mut root = sample_screen();
    root.activity_id = Some("unknown".into());
    assert!(matches!(
        fingerprint(&root),
        Err(SnapshotError::UnknownActivity)
    ));

    root.is_focus_region = true;
    assert!(fingerprint(&root).is_ok());
}

#[test]
fn overflowing_bounds_are_contained_to_the_snapshot() {
    let base = fingerprint(&sample_screen()).unwrap();
    let mut with_child = sample_screen();
    with_child.children.push(node("Huge", "[0,-9223372036854775808][10,9223372036854775807]"));
    assert_eq!(base, fingerprint(&with_child).unwrap());

    let mut root = sample_screen();
    root.bounds = Some("[0,-9223372036854775808][10,9223372036854775807]".into());
    assert!(matches!(
        fingerprint(&root),
        Err(SnapshotError::MalformedBounds(_))
    ));
}

#[test]
fn malformed_root_bounds_is_rejected() {
    let mut root = sample_screen();
    root.bounds = Some("[0,0]".into());

    assert!(matches!(
        fingerprint(&root),
        Err(SnapshotError::MalformedBounds(_))
    ));
}

#[test]
fn visible_node_without_class_is_an_error() {
    let mut root = sample_screen();
    root.children[0].class = None;

    assert!(matches!(
        fingerprint(&root),
        Err(SnapshotError::MissingField("class"))
    ));
}

// =========================================================================
// Routing
// =========================================================================

#[test]
fn unflagged_snapshot_is_fingerprinted() {
    let root = sample_screen();
    let expected = fingerprint(&root).unwrap();

    assert_eq!(
        process_snapshot(root, false).unwrap(),
        SnapshotOutcome::Fingerprint(expected)
    );
}

#[test]
fn explicit_false_source_flag_is_not_flagged() {
    let raw = r#"{
        "act_id": "A", "bound": "[0,0][100,100]", "class": "Frame",
        "ch": [{"hash": 1, "class": "Button", "bound": "[0,0][10,10]", "is_source": false}]
    }"#;
    let root = parse_snapshot(raw, "inline").unwrap();
    assert!(!root.children[0].is_flagged);

    let expected = fingerprint(&root).unwrap();
    assert_eq!(
        process_snapshot(root, false).unwrap(),
        SnapshotOutcome::Fingerprint(expected)
    );
}

#[test]
fn forced_fingerprint_ignores_flagged_node() {
    let mut root = sample_screen();
    root.children[1] = flagged(root.children[1].clone());
    let expected = fingerprint(&root).unwrap();

    assert_eq!(
        process_snapshot(root, true).unwrap(),
        SnapshotOutcome::Fingerprint(expected)
    );
}

#[test]
fn unmarked_subtrees_do_not_contribute() {
    let base = process_snapshot(sample_screen(), false).unwrap();

    let mut root = sample_screen();
    let mut ghost = node("Overlay", "[0,0][1080,1920]");
    ghost.hash = None;
    root.children.push(ghost);

    assert_eq!(base, process_snapshot(root, false).unwrap());
}
