use crate::node::{DocumentTree, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Latest committed value per editable leaf (text content or image source)
///
/// Also the unit of history: every history entry is a full copy of this map.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditState(BTreeMap<NodeId, String>);

impl EditState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values of every text and image leaf of a freshly built tree
    pub fn from_tree(tree: &DocumentTree) -> Self {
        tree.leaves()
            .into_iter()
            .filter_map(|node| {
                node.leaf_value()
                    .map(|value| (node.id().clone(), value.to_string()))
            })
            .collect()
    }

    pub fn get(&self, id: &NodeId) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    /// Insert or overwrite; returns the previous value
    pub fn set(&mut self, id: NodeId, value: impl Into<String>) -> Option<String> {
        self.0.insert(id, value.into())
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &str)> {
        self.0.iter().map(|(id, value)| (id, value.as_str()))
    }
}

impl FromIterator<(NodeId, String)> for EditState {
    fn from_iter<I: IntoIterator<Item = (NodeId, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
