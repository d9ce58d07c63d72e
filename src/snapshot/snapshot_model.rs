use serde::{Deserialize, Serialize};

/// A scalar attribute value as it appears in captured UI trees.
///
/// Legacy captures store numeric ids; newer ones store resource names. Both
/// forms compare and sort consistently so they can be used as discriminators.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Number(i64),
    Text(String),
}

impl AttrValue {
    /// Mirrors the capture format's notion of an "empty" value: `0` and `""`
    /// never contribute to descendant value sets.
    pub fn is_empty(&self) -> bool {
        match self {
            AttrValue::Number(n) => *n == 0,
            AttrValue::Text(s) => s.is_empty(),
        }
    }

    /// Token used when serializing the value into a fingerprint stream.
    pub fn token(&self) -> String {
        match self {
            AttrValue::Number(n) => n.to_string(),
            AttrValue::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        AttrValue::Number(n)
    }
}

/// The attributes a locator level may discriminate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    IdName,
    Id,
    Class,
    Text,
    ContentDescription,
}

// ============================================================================
// Snapshot node
// ============================================================================

/// One UI element of a captured accessibility tree.
///
/// The root node of a snapshot additionally carries `act_id` and `focus`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AttrValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idn: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(rename = "cdesc", default, skip_serializing_if = "Option::is_none")]
    pub content_description: Option<String>,

    /// Rectangle string `[x1,y1][x2,y2]`
    #[serde(rename = "bound", alias = "bounds", default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<String>,

    /// Nonzero means hidden
    #[serde(rename = "vis", default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<i64>,

    /// Provenance marker attached by the capture pipeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<i64>,

    #[serde(rename = "en", default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Marks the element of interest
    #[serde(rename = "is_source", default, skip_serializing_if = "is_false")]
    pub is_flagged: bool,

    #[serde(rename = "act_id", default, skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<String>,

    #[serde(rename = "focus", default, skip_serializing_if = "is_false")]
    pub is_focus_region: bool,

    #[serde(rename = "ch", default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,

    /// Capture fields with no meaning here, carried through when a snapshot is rewritten
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Node {
    /// Value of a discriminating attribute, if the node carries it.
    pub fn attr(&self, attr: Attribute) -> Option<AttrValue> {
        match attr {
            Attribute::IdName => self.idn.map(AttrValue::Number),
            Attribute::Id => self.id.clone(),
            Attribute::Class => self.class.as_deref().map(AttrValue::from),
            Attribute::Text => self.text.as_deref().map(AttrValue::from),
            Attribute::ContentDescription => {
                self.content_description.as_deref().map(AttrValue::from)
            }
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.visibility.is_some_and(|v| v != 0)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }

    /// Pre-order iterator over this node and all of its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
