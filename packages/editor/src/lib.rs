//! # Livedoc Editor
//!
//! In-place edit model for a parsed markup fragment.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ parser: markup → RawElement tree            │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - TreeBuilder: RawElement → DocumentTree   │
//! │  - EditState: id → latest committed value   │
//! │  - Mutations: single-leaf rewrites          │
//! │  - History: snapshot log for undo/redo      │
//! │  - Projection: tree + edit state overlay    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ render: ProjectedNode → HTML                │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Leaves only**: edits replace a text content or an image source,
//!    never the structure
//! 2. **Ids are stable**: only a fresh parse regenerates them
//! 3. **Text is undoable, images are not**: only changed text commits
//!    record history
//!
//! ## Usage
//!
//! ```rust,ignore
//! use livedoc_editor::EditSession;
//!
//! let mut session = EditSession::default();
//! session.load("<h1>Title</h1><p>Body</p>");
//!
//! let title = session.tree().leaves()[0].id().clone();
//! session.commit_text(&title, "New title");
//! session.undo();
//!
//! assert_eq!(session.displayed(&title), Some("Title"));
//! ```

mod builder;
mod config;
mod edit_state;
mod errors;
mod events;
mod history;
mod id_generator;
mod image_source;
mod loads;
mod mutations;
mod node;
mod projection;
mod session;
mod widget;

pub use builder::TreeBuilder;
pub use config::{EditorConfig, DEPTH_CEILING};
pub use edit_state::EditState;
pub use errors::EditorError;
pub use events::{EditEvent, EditSink};
pub use history::History;
pub use id_generator::IdGenerator;
pub use image_source::{ImageError, ImageSource};
pub use loads::{ImageLoads, LoadOrder, LoadTicket};
pub use mutations::{
    apply_snapshot, commit_image_edit, commit_text_edit, Committed, Mutation, MutationError,
};
pub use node::{
    DocumentTree, ElementNode, ImageKind, ImageNode, Node, NodeId, NodeKind, TextNode,
};
pub use projection::{ProjectedNode, Projection};
pub use session::{CommitOutcome, EditSession};
pub use widget::{ImageDropWidget, TextEditWidget};
