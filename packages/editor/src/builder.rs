//! # Tree Builder
//!
//! Converts the parser's generic element/text tree into the node model.
//!
//! - `img` becomes an image leaf (`kind: image`) and is not descended into
//! - `picture` becomes an image leaf (`kind: picture`) sourced from its
//!   first `img` descendant; alternate sources are dropped
//! - every other element becomes a container; text children are trimmed
//!   and blank ones are dropped

use crate::id_generator::IdGenerator;
use crate::node::{DocumentTree, ElementNode, ImageKind, ImageNode, Node, TextNode};
use livedoc_parser::{RawElement, RawNode};
use tracing::{debug, instrument};

/// Builds one parse generation of the document tree
pub struct TreeBuilder {
    ids: IdGenerator,
}

impl TreeBuilder {
    pub fn new(generation: u64) -> Self {
        Self {
            ids: IdGenerator::new(generation),
        }
    }

    /// Build the tree; `None` yields an empty tree
    #[instrument(skip_all, fields(generation = self.ids.generation()))]
    pub fn build(mut self, root: Option<&RawElement>) -> DocumentTree {
        let generation = self.ids.generation();

        let Some(root) = root else {
            debug!("No root element, building empty tree");
            return DocumentTree::empty(generation);
        };

        let node = self.build_element(root);
        debug!(nodes = self.ids.issued(), "Built document tree");
        DocumentTree::from_root(node, generation)
    }

    fn build_element(&mut self, element: &RawElement) -> Node {
        if element.is("img") {
            return self.image(element, ImageKind::Image);
        }

        if element.is("picture") {
            return match element.find_descendant("img") {
                Some(img) => self.image(img, ImageKind::Picture),
                None => Node::Image(ImageNode {
                    id: self.ids.new_id(),
                    src: String::new(),
                    alt: String::new(),
                    kind: ImageKind::Picture,
                }),
            };
        }

        let id = self.ids.new_id();
        let children = element
            .children
            .iter()
            .filter_map(|child| match child {
                RawNode::Element(child) => Some(self.build_element(child)),
                RawNode::Text { content } => {
                    let trimmed = content.trim();
                    (!trimmed.is_empty()).then(|| {
                        Node::Text(TextNode {
                            id: self.ids.new_id(),
                            content: trimmed.to_string(),
                        })
                    })
                }
            })
            .collect();

        Node::Element(ElementNode {
            id,
            tag_name: element.tag_name.clone(),
            attributes: element.attributes.clone(),
            class_name: element.attribute("class").map(str::to_string),
            children,
        })
    }

    fn image(&mut self, img: &RawElement, kind: ImageKind) -> Node {
        Node::Image(ImageNode {
            id: self.ids.new_id(),
            src: img.attribute("src").unwrap_or_default().to_string(),
            alt: img.attribute("alt").unwrap_or_default().to_string(),
            kind,
        })
    }
}
