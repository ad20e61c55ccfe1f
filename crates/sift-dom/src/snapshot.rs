//! Owned, serializable copy of a subtree.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::{NodeId, NodeRef};

/// Serializable snapshot of an element and its descendants.
///
/// Attributes are sorted by name so that output is stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSnapshot {
    /// Tag name with its original case.
    pub tag_name: String,
    /// Attributes sorted by name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    /// Aggregated text content.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text_content: String,
    /// Child snapshots in document order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

impl NodeSnapshot {
    /// Snapshot of `node` without its children.
    #[must_use]
    pub fn shallow(node: NodeRef<'_>) -> Self {
        Self {
            tag_name: node.tag_name().to_string(),
            attributes: node
                .attributes()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            text_content: node.text_content().to_string(),
            children: Vec::new(),
        }
    }

    /// Snapshot of `node` and its whole subtree.
    ///
    /// Built bottom-up in reverse document order so that deep trees do not
    /// recurse.
    #[must_use]
    pub fn capture(node: NodeRef<'_>) -> Self {
        let order: Vec<NodeRef<'_>> = std::iter::once(node).chain(node.descendants()).collect();
        let mut built: HashMap<NodeId, Self> = HashMap::with_capacity(order.len());

        for current in order.iter().rev() {
            let mut snapshot = Self::shallow(*current);
            snapshot.children = current
                .children()
                .filter_map(|child| built.remove(&child.node_id()))
                .collect();
            let _ = built.insert(current.node_id(), snapshot);
        }

        built
            .remove(&node.node_id())
            .unwrap_or_else(|| Self::shallow(node))
    }
}

impl From<NodeRef<'_>> for NodeSnapshot {
    fn from(node: NodeRef<'_>) -> Self {
        Self::capture(node)
    }
}
