//! Edit-finalization contract for in-place widgets
//!
//! A text widget keeps its own working value while the user types. Only on
//! finish (blur) does it emit a [`EditEvent::TextCommitted`], and only when
//! the value differs from the one it started with. Cancel (escape) restores
//! the starting value and emits nothing.

use crate::events::EditEvent;
use crate::image_source::{ImageError, ImageSource};
use crate::node::NodeId;

#[derive(Debug, Clone)]
struct ActiveEdit {
    node_id: NodeId,
    original: String,
    current: String,
}

#[derive(Debug, Clone, Default)]
pub struct TextEditWidget {
    active: Option<ActiveEdit>,
}

impl TextEditWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing `node_id`, whose displayed value is `value`
    ///
    /// Beginning a new edit discards any unfinished one.
    pub fn begin(&mut self, node_id: NodeId, value: impl Into<String>) {
        let value = value.into();
        self.active = Some(ActiveEdit {
            node_id,
            original: value.clone(),
            current: value,
        });
    }

    /// Replace the working value; ignored when not editing
    pub fn input(&mut self, value: impl Into<String>) {
        if let Some(active) = &mut self.active {
            active.current = value.into();
        }
    }

    pub fn is_editing(&self) -> bool {
        self.active.is_some()
    }

    pub fn current(&self) -> Option<&str> {
        self.active.as_ref().map(|active| active.current.as_str())
    }

    /// End the edit; an event is produced only for a changed value
    pub fn finish(&mut self) -> Option<EditEvent> {
        let active = self.active.take()?;
        (active.current != active.original).then(|| EditEvent::TextCommitted {
            node_id: active.node_id,
            value: active.current,
        })
    }

    /// Abandon the edit, returning the value to show again
    pub fn cancel(&mut self) -> Option<String> {
        self.active.take().map(|active| active.original)
    }
}

/// Drop/paste target bound to one image node
#[derive(Debug, Clone)]
pub struct ImageDropWidget {
    node_id: NodeId,
}

impl ImageDropWidget {
    pub fn new(node_id: NodeId) -> Self {
        Self { node_id }
    }

    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    pub fn accept(&self, source: &ImageSource) -> Result<EditEvent, ImageError> {
        Ok(EditEvent::ImageCommitted {
            node_id: self.node_id.clone(),
            src: source.normalize()?,
        })
    }
}
