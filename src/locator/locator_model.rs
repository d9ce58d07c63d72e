use serde::{Deserialize, Serialize};

use crate::snapshot::snapshot_model::{AttrValue, Attribute};

/// Discriminators chosen for one tree level.
///
/// Serialized as an attribute map; absent discriminators are omitted, so a
/// level with a single sibling renders as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocatorStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idn: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AttrValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdesc: Option<String>,

    /// Sorted set of `text` values found anywhere below the node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ch_text: Option<Vec<AttrValue>>,

    /// Raw sibling index, used when attributes cannot separate siblings
    #[serde(rename = "_pos", default, skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

impl LocatorStep {
    /// Record a plain attribute discriminator.
    pub fn record(&mut self, attr: Attribute, value: AttrValue) {
        match (attr, value) {
            (Attribute::IdName, AttrValue::Number(n)) => self.idn = Some(n),
            (Attribute::Id, v) => self.id = Some(v),
            (Attribute::Class, v) => self.class = Some(v.token()),
            (Attribute::Text, v) => self.text = Some(v.token()),
            (Attribute::ContentDescription, v) => self.cdesc = Some(v.token()),
            // `idn` only ever holds numbers
            (Attribute::IdName, AttrValue::Text(_)) => {}
        }
    }

    /// Record a descendant-set discriminator.
    pub fn record_descendants(&mut self, attr: Attribute, values: Vec<AttrValue>) {
        if attr == Attribute::Text {
            self.ch_text = Some(values);
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == LocatorStep::default()
    }
}

/// Root-first sequence identifying the flagged element of a snapshot.
///
/// Serialized as `[{"act_id": ...}, step, step, ...]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<LocatorElement>", into = "Vec<LocatorElement>")]
pub struct Locator {
    pub activity_id: String,
    pub steps: Vec<LocatorStep>,
}

/// One element of a serialized locator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocatorElement {
    Activity { act_id: String },
    Step(LocatorStep),
}

impl From<Locator> for Vec<LocatorElement> {
    fn from(locator: Locator) -> Self {
        std::iter::once(LocatorElement::Activity {
            act_id: locator.activity_id,
        })
        .chain(locator.steps.into_iter().map(LocatorElement::Step))
        .collect()
    }
}

impl TryFrom<Vec<LocatorElement>> for Locator {
    type Error = String;

    fn try_from(elements: Vec<LocatorElement>) -> Result<Self, Self::Error> {
        let mut iter = elements.into_iter();
        let activity_id = match iter.next() {
            Some(LocatorElement::Activity { act_id }) => act_id,
            Some(LocatorElement::Step(_)) => {
                return Err("locator must start with an activity element".to_string());
            }
            None => return Err("locator is empty".to_string()),
        };

        let steps = iter
            .map(|el| match el {
                LocatorElement::Step(step) => Ok(step),
                LocatorElement::Activity { .. } => {
                    Err("activity element may only appear first".to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Locator { activity_id, steps })
    }
}
