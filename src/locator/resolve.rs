use crate::locator::builder::descendant_values;
use crate::locator::locator_model::{Locator, LocatorStep};
use crate::snapshot::snapshot_model::{AttrValue, Attribute, Node};

/// Walk `locator` down `root` and return the node it designates.
///
/// The root must carry the locator's activity id. At each level a recorded
/// `_pos` selects that sibling directly (it must still match the step's
/// attributes); otherwise the first matching sibling is taken.
pub fn resolve<'a>(root: &'a Node, locator: &Locator) -> Option<&'a Node> {
    if root.activity_id.as_deref() != Some(locator.activity_id.as_str()) {
        return None;
    }

    let mut current = root;
    for step in &locator.steps {
        current = match step.position {
            Some(pos) => current.children.get(pos).filter(|ch| step_matches(ch, step))?,
            None => current.children.iter().find(|ch| step_matches(ch, step))?,
        };
    }
    Some(current)
}

/// Whether `node` carries every discriminator recorded in `step`.
pub fn step_matches(node: &Node, step: &LocatorStep) -> bool {
    if let Some(idn) = step.idn {
        let by_idn = node.idn == Some(idn);
        let by_legacy_id = node.id == Some(AttrValue::Number(idn));
        if !by_idn && !by_legacy_id {
            return false;
        }
    }

    let plain = [
        (Attribute::Id, step.id.clone()),
        (Attribute::Class, step.class.as_deref().map(AttrValue::from)),
        (Attribute::Text, step.text.as_deref().map(AttrValue::from)),
        (
            Attribute::ContentDescription,
            step.cdesc.as_deref().map(AttrValue::from),
        ),
    ];
    for (attr, expected) in plain {
        if let Some(expected) = expected {
            if node.attr(attr) != Some(expected) {
                return false;
            }
        }
    }

    match &step.ch_text {
        Some(expected) => descendant_values(node, Attribute::Text) == *expected,
        None => true,
    }
}
