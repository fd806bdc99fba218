//! # Livedoc Render
//!
//! Turns a [`ProjectedNode`](livedoc_editor::ProjectedNode) tree into HTML.
//! In editable mode every text leaf is wrapped in a `contenteditable` span
//! and every leaf carries its node id, so edits made in the page can be
//! routed back to the session.

mod html;

pub use html::{render_fragment, render_html, RenderOptions};
