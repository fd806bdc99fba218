use serde::{Deserialize, Serialize};

/// Generic node produced by the parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RawNode {
    Element(RawElement),
    Text { content: String },
}

impl RawNode {
    pub fn text(content: impl Into<String>) -> Self {
        RawNode::Text {
            content: content.into(),
        }
    }

    pub fn as_element(&self) -> Option<&RawElement> {
        match self {
            RawNode::Element(element) => Some(element),
            RawNode::Text { .. } => None,
        }
    }
}

/// Generic element: a tag name, ordered attributes and ordered children
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawElement {
    pub tag_name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<RawNode>,
}

impl RawElement {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_child(mut self, child: RawElement) -> Self {
        self.children.push(RawNode::Element(child));
        self
    }

    pub fn with_text(mut self, content: impl Into<String>) -> Self {
        self.children.push(RawNode::text(content));
        self
    }

    /// Attribute value by (lowercase) name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute; the first occurrence of a name wins, like in HTML.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if self.attribute(&name).is_none() {
            self.attributes.push((name, value.into()));
        }
    }

    pub fn is(&self, tag_name: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag_name)
    }

    /// First descendant element with the given tag, in document order
    pub fn find_descendant(&self, tag_name: &str) -> Option<&RawElement> {
        self.children.iter().find_map(|child| match child {
            RawNode::Element(element) if element.is(tag_name) => Some(element),
            RawNode::Element(element) => element.find_descendant(tag_name),
            RawNode::Text { .. } => None,
        })
    }

    /// Append text, merging with a directly preceding text child
    pub(crate) fn push_text(&mut self, content: &str) {
        if let Some(RawNode::Text { content: last }) = self.children.last_mut() {
            last.push_str(content);
        } else {
            self.children.push(RawNode::text(content));
        }
    }

    pub(crate) fn has_content(&self) -> bool {
        self.children.iter().any(|child| match child {
            RawNode::Element(_) => true,
            RawNode::Text { content } => !content.trim().is_empty(),
        })
    }
}
