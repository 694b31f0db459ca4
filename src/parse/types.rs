//! Serde target for the workflow document (`nodes` + `links`).
//!
//! The document shape follows the host application's workflow JSON. Fields
//! this engine does not inspect (positions, sizes, slot metadata) are kept in
//! `Node::extra` so a reduced workflow round-trips back to the server intact.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A parsed workflow document. Absent `nodes`/`links` are treated as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workflow {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub links: Vec<Value>,
}

impl Workflow {
    /// Iterate links in document order, skipping malformed entries.
    pub fn parsed_links(&self) -> impl Iterator<Item = Link> + '_ {
        self.links.iter().filter_map(Link::from_value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "type", default = "unknown_type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub widgets_values: Vec<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

fn unknown_type() -> String {
    "unknown".into()
}

/// A link between two node slots, decoded from the 6-tuple wire format
/// `[link_id, from_node, from_slot, to_node, to_slot, type]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: i64,
    pub from_node: i64,
    pub from_slot: i64,
    pub to_node: i64,
    pub to_slot: i64,
    pub declared_type: Option<String>,
}

impl Link {
    /// Decode a raw link value. Returns `None` for anything that is not an
    /// array of at least 6 elements with integer id/slot fields; such
    /// entries are tolerated legacy formats and are skipped silently.
    pub fn from_value(value: &Value) -> Option<Link> {
        let items = value.as_array()?;
        if items.len() < 6 {
            return None;
        }
        Some(Link {
            id: items[0].as_i64()?,
            from_node: items[1].as_i64()?,
            from_slot: items[2].as_i64()?,
            to_node: items[3].as_i64()?,
            to_slot: items[4].as_i64()?,
            declared_type: items[5].as_str().map(str::to_owned),
        })
    }
}
