//! # State Projection
//!
//! Read-only overlay of the edit state on the tree. A leaf displays its
//! edit-state entry when one exists, otherwise its stored content/source.
//! This runs on every render and never mutates the tree or the map.

use crate::edit_state::EditState;
use crate::node::{DocumentTree, ImageKind, Node, NodeId};
use serde::Serialize;

/// Render input: the tree with effective leaf values filled in
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ProjectedNode {
    Text {
        id: NodeId,
        value: String,
    },
    Image {
        id: NodeId,
        src: String,
        alt: String,
        kind: ImageKind,
    },
    Element {
        id: NodeId,
        tag_name: String,
        attributes: Vec<(String, String)>,
        children: Vec<ProjectedNode>,
    },
}

impl ProjectedNode {
    pub fn id(&self) -> &NodeId {
        match self {
            ProjectedNode::Text { id, .. }
            | ProjectedNode::Image { id, .. }
            | ProjectedNode::Element { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Projection<'a> {
    tree: &'a DocumentTree,
    state: &'a EditState,
}

impl<'a> Projection<'a> {
    pub fn new(tree: &'a DocumentTree, state: &'a EditState) -> Self {
        Self { tree, state }
    }

    /// Displayed value of a leaf; `None` for elements
    pub fn displayed(&self, node: &'a Node) -> Option<&'a str> {
        let stored = node.leaf_value()?;
        Some(self.state.get(node.id()).unwrap_or(stored))
    }

    /// Displayed value of the leaf with the given id
    pub fn value(&self, id: &NodeId) -> Option<&'a str> {
        self.tree.find(id).and_then(|node| self.displayed(node))
    }

    /// Project the whole tree; `None` for an empty tree
    pub fn project(&self) -> Option<ProjectedNode> {
        self.tree.root().map(|root| self.project_node(root))
    }

    fn project_node(&self, node: &'a Node) -> ProjectedNode {
        match node {
            Node::Text(text) => ProjectedNode::Text {
                id: text.id.clone(),
                value: self.state.get(&text.id).unwrap_or(&text.content).to_string(),
            },
            Node::Image(image) => ProjectedNode::Image {
                id: image.id.clone(),
                src: self.state.get(&image.id).unwrap_or(&image.src).to_string(),
                alt: image.alt.clone(),
                kind: image.kind,
            },
            Node::Element(element) => ProjectedNode::Element {
                id: element.id.clone(),
                tag_name: element.tag_name.clone(),
                attributes: element.attributes.clone(),
                children: element
                    .children
                    .iter()
                    .map(|child| self.project_node(child))
                    .collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TreeBuilder;
    use livedoc_parser::RawElement;

    fn tree() -> DocumentTree {
        let root = RawElement::new("div")
            .with_child(RawElement::new("p").with_text("Original"))
            .with_child(RawElement::new("img").with_attr("src", "a.png"));
        TreeBuilder::new(1).build(Some(&root))
    }

    #[test]
    fn test_falls_back_to_tree_values() {
        let tree = tree();
        let state = EditState::new();
        let projection = Projection::new(&tree, &state);

        let leaves = tree.leaves();
        assert_eq!(projection.displayed(leaves[0]), Some("Original"));
        assert_eq!(projection.displayed(leaves[1]), Some("a.png"));
        assert_eq!(projection.displayed(tree.root().unwrap()), None);
    }

    #[test]
    fn test_overlay_wins() {
        let tree = tree();
        let leaves = tree.leaves();
        let mut state = EditState::new();
        state.set(leaves[0].id().clone(), "Edited");
        state.set(leaves[1].id().clone(), "b.png");

        let projection = Projection::new(&tree, &state);
        assert_eq!(projection.value(leaves[0].id()), Some("Edited"));
        assert_eq!(projection.value(leaves[1].id()), Some("b.png"));

        // The tree itself keeps its stored values.
        assert_eq!(leaves[0].leaf_value(), Some("Original"));
    }

    #[test]
    fn test_project_mirrors_structure() {
        let tree = tree();
        let leaves = tree.leaves();
        let mut state = EditState::new();
        state.set(leaves[0].id().clone(), "Edited");

        let projected = Projection::new(&tree, &state).project().unwrap();
        match projected {
            ProjectedNode::Element { tag_name, children, .. } => {
                assert_eq!(tag_name, "div");
                assert_eq!(children.len(), 2);
                match &children[0] {
                    ProjectedNode::Element { children, .. } => {
                        assert!(matches!(
                            &children[0],
                            ProjectedNode::Text { value, .. } if value == "Edited"
                        ));
                    }
                    other => panic!("expected p, got {:?}", other),
                }
                assert!(matches!(
                    &children[1],
                    ProjectedNode::Image { src, .. } if src == "a.png"
                ));
            }
            other => panic!("expected element, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_tree_projects_nothing() {
        let tree = DocumentTree::empty(1);
        let state = EditState::new();
        assert_eq!(Projection::new(&tree, &state).project(), None);
    }
}
