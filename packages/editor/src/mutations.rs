//! # Leaf Mutations
//!
//! The only edits the model supports replace the value of one leaf:
//!
//! ### UpdateText
//! - Target must be a text node
//! - Atomic replacement of the content (not a character diff)
//!
//! ### ReplaceImage
//! - Target must be an image node
//! - Atomic replacement of the source
//!
//! Applying a mutation never touches the input tree or map; it returns new
//! ones. Tree structure, ids and sibling order are preserved.

use crate::edit_state::EditState;
use crate::node::{DocumentTree, NodeId, NodeKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Single-leaf edit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Mutation {
    /// Replace the content of a text node
    UpdateText { node_id: NodeId, content: String },

    /// Replace the source of an image node
    ReplaceImage { node_id: NodeId, src: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Node is not text: {0}")]
    NotText(NodeId),

    #[error("Node is not an image: {0}")]
    NotImage(NodeId),
}

/// New tree and map produced by a commit
#[derive(Debug, Clone)]
pub struct Committed {
    pub tree: DocumentTree,
    pub state: EditState,

    /// Whether the value differs from the previously committed one
    pub changed: bool,
}

impl Mutation {
    pub fn node_id(&self) -> &NodeId {
        match self {
            Mutation::UpdateText { node_id, .. } | Mutation::ReplaceImage { node_id, .. } => {
                node_id
            }
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Mutation::UpdateText { content, .. } => content,
            Mutation::ReplaceImage { src, .. } => src,
        }
    }

    /// Validate without applying
    pub fn validate(&self, tree: &DocumentTree) -> Result<(), MutationError> {
        let node_id = self.node_id();
        let kind = tree
            .kind_of(node_id)
            .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))?;

        match (self, kind) {
            (Mutation::UpdateText { .. }, NodeKind::Text) => Ok(()),
            (Mutation::UpdateText { .. }, _) => Err(MutationError::NotText(node_id.clone())),
            (Mutation::ReplaceImage { .. }, NodeKind::Image) => Ok(()),
            (Mutation::ReplaceImage { .. }, _) => Err(MutationError::NotImage(node_id.clone())),
        }
    }

    /// Apply to the tree only, returning the rewritten tree
    pub fn apply(&self, tree: &DocumentTree) -> Result<DocumentTree, MutationError> {
        self.validate(tree)?;

        let node_id = self.node_id();
        tree.root()
            .and_then(|root| root.with_leaf_value(node_id, self.value()))
            .map(|root| tree.with_root(root))
            .ok_or_else(|| MutationError::NodeNotFound(node_id.clone()))
    }

    /// Apply to both tree and edit state
    ///
    /// The map entry is always written. `changed` compares against the
    /// previously committed value: the map entry, or the stored leaf value
    /// when the map has none.
    pub fn commit(&self, tree: &DocumentTree, state: &EditState) -> Result<Committed, MutationError> {
        let new_tree = self.apply(tree)?;
        let node_id = self.node_id();

        let previous = state
            .get(node_id)
            .or_else(|| tree.find(node_id).and_then(|node| node.leaf_value()));
        let changed = previous != Some(self.value());

        let mut new_state = state.clone();
        new_state.set(node_id.clone(), self.value());

        Ok(Committed {
            tree: new_tree,
            state: new_state,
            changed,
        })
    }
}

/// Commit a text edit
pub fn commit_text_edit(
    tree: &DocumentTree,
    state: &EditState,
    node_id: &NodeId,
    value: &str,
) -> Result<Committed, MutationError> {
    Mutation::UpdateText {
        node_id: node_id.clone(),
        content: value.to_string(),
    }
    .commit(tree, state)
}

/// Commit an image source edit
pub fn commit_image_edit(
    tree: &DocumentTree,
    state: &EditState,
    node_id: &NodeId,
    src: &str,
) -> Result<Committed, MutationError> {
    Mutation::ReplaceImage {
        node_id: node_id.clone(),
        src: src.to_string(),
    }
    .commit(tree, state)
}

/// Rewrite every text node listed in `snapshot` to its snapshot value
///
/// Text nodes absent from the snapshot, image nodes and unknown ids in the
/// snapshot are left alone.
pub fn apply_snapshot(tree: &DocumentTree, snapshot: &EditState) -> DocumentTree {
    match tree.root() {
        Some(root) => tree.with_root(root.map_text(&|id| snapshot.get(id))),
        None => tree.clone(),
    }
}
