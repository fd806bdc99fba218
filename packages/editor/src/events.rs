//! Widget-to-session callbacks
//!
//! Widgets never touch the tree or the edit state. When an edit is finalized
//! they hand an [`EditEvent`] back to whoever owns the session.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EditEvent {
    /// A text edit was finalized (blur) with a changed value
    TextCommitted { node_id: NodeId, value: String },

    /// An image source was accepted
    ImageCommitted { node_id: NodeId, src: String },
}

impl EditEvent {
    pub fn node_id(&self) -> &NodeId {
        match self {
            EditEvent::TextCommitted { node_id, .. } | EditEvent::ImageCommitted { node_id, .. } => {
                node_id
            }
        }
    }
}

/// Receiver of edit events
pub trait EditSink {
    fn on_text_committed(&mut self, node_id: &NodeId, value: &str);
    fn on_image_committed(&mut self, node_id: &NodeId, src: &str);

    /// Route an event to the matching callback
    fn deliver(&mut self, event: &EditEvent) {
        match event {
            EditEvent::TextCommitted { node_id, value } => self.on_text_committed(node_id, value),
            EditEvent::ImageCommitted { node_id, src } => self.on_image_committed(node_id, src),
        }
    }
}
