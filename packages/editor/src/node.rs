//! # Node Model
//!
//! The document tree is built from three node variants: text leaves, image
//! leaves and generic element containers. Nodes are values. An edit produces
//! a new tree in which the changed leaf and its ancestor chain are rebuilt,
//! so any tree handed out by the session stays a valid snapshot.
//!
//! Every node carries a [`NodeId`] assigned once by the tree builder. Edits
//! never change ids; only a fresh parse does.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

/// Stable node identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// How an image leaf appeared in the source markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    /// A bare `<img>`
    Image,
    /// A `<picture>`, represented by its first `<img>`
    Picture,
}

/// Discriminant of a node, used for O(1) commit validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Text,
    Image,
    Element,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub id: NodeId,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageNode {
    pub id: NodeId,
    pub src: String,
    pub alt: String,
    pub kind: ImageKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementNode {
    pub id: NodeId,
    pub tag_name: String,
    pub attributes: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    pub children: Vec<Node>,
}

/// Document tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    Text(TextNode),
    Image(ImageNode),
    Element(ElementNode),
}

impl Node {
    pub fn id(&self) -> &NodeId {
        match self {
            Node::Text(text) => &text.id,
            Node::Image(image) => &image.id,
            Node::Element(element) => &element.id,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Text(_) => NodeKind::Text,
            Node::Image(_) => NodeKind::Image,
            Node::Element(_) => NodeKind::Element,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(element) => &element.children,
            Node::Text(_) | Node::Image(_) => &[],
        }
    }

    /// Stored value of a leaf: text content or image source
    pub fn leaf_value(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(&text.content),
            Node::Image(image) => Some(&image.src),
            Node::Element(_) => None,
        }
    }

    /// Pre-order traversal
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Rebuild this subtree with the leaf `id` holding `value`.
    ///
    /// Returns `None` when `id` is not a leaf in this subtree. Only the
    /// ancestor chain of the target is reconstructed; sibling order is kept.
    pub(crate) fn with_leaf_value(&self, id: &NodeId, value: &str) -> Option<Node> {
        match self {
            Node::Text(text) if &text.id == id => Some(Node::Text(TextNode {
                id: text.id.clone(),
                content: value.to_string(),
            })),
            Node::Image(image) if &image.id == id => Some(Node::Image(ImageNode {
                src: value.to_string(),
                ..image.clone()
            })),
            Node::Element(element) => {
                let (index, replacement) = element
                    .children
                    .iter()
                    .enumerate()
                    .find_map(|(index, child)| {
                        child.with_leaf_value(id, value).map(|node| (index, node))
                    })?;

                let mut children = element.children.clone();
                children[index] = replacement;

                Some(Node::Element(ElementNode {
                    children,
                    ..element.shallow_clone()
                }))
            }
            Node::Text(_) | Node::Image(_) => None,
        }
    }

    /// Rebuild this subtree with every text leaf passed through `content_for`.
    ///
    /// Text leaves for which `content_for` returns `None` keep their content.
    pub(crate) fn map_text<'v>(&self, content_for: &impl Fn(&NodeId) -> Option<&'v str>) -> Node {
        match self {
            Node::Text(text) => Node::Text(TextNode {
                id: text.id.clone(),
                content: content_for(&text.id)
                    .map(str::to_string)
                    .unwrap_or_else(|| text.content.clone()),
            }),
            Node::Image(_) => self.clone(),
            Node::Element(element) => Node::Element(ElementNode {
                children: element
                    .children
                    .iter()
                    .map(|child| child.map_text(content_for))
                    .collect(),
                ..element.shallow_clone()
            }),
        }
    }
}

impl ElementNode {
    fn shallow_clone(&self) -> ElementNode {
        ElementNode {
            id: self.id.clone(),
            tag_name: self.tag_name.clone(),
            attributes: self.attributes.clone(),
            class_name: self.class_name.clone(),
            children: Vec::new(),
        }
    }
}

/// An immutable document tree from one parse generation
///
/// Besides the root, the tree keeps an index from id to node kind. Edits
/// only replace leaf values, so the index built at construction stays valid
/// for every tree derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentTree {
    root: Option<Node>,
    generation: u64,
    index: HashMap<NodeId, NodeKind>,
}

impl DocumentTree {
    pub fn empty(generation: u64) -> Self {
        Self {
            root: None,
            generation,
            index: HashMap::new(),
        }
    }

    pub(crate) fn from_root(root: Node, generation: u64) -> Self {
        let mut index = HashMap::new();
        root.walk(&mut |node| {
            index.insert(node.id().clone(), node.kind());
        });

        Self {
            root: Some(root),
            generation,
            index,
        }
    }

    /// Same generation and index, new root
    pub(crate) fn with_root(&self, root: Node) -> Self {
        Self {
            root: Some(root),
            generation: self.generation,
            index: self.index.clone(),
        }
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    pub fn kind_of(&self, id: &NodeId) -> Option<NodeKind> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    pub fn find(&self, id: &NodeId) -> Option<&Node> {
        if !self.contains(id) {
            return None;
        }

        let mut found = None;
        if let Some(root) = &self.root {
            root.walk(&mut |node| {
                if found.is_none() && node.id() == id {
                    found = Some(node);
                }
            });
        }
        found
    }

    /// Text and image leaves in document order
    pub fn leaves(&self) -> Vec<&Node> {
        let mut leaves = Vec::new();
        if let Some(root) = &self.root {
            root.walk(&mut |node| {
                if node.leaf_value().is_some() {
                    leaves.push(node);
                }
            });
        }
        leaves
    }
}
