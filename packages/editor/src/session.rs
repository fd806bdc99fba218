//! # Edit Session
//!
//! Owns one document being edited: the current tree, the edit state, the
//! history log and the parse generation counter. Every operation takes
//! `&mut self` and completes before the next one starts, so events are
//! processed strictly one at a time.
//!
//! ## Commit rules
//!
//! - Text commits always write the edit state and rewrite the tree; a history
//!   entry is recorded only when the value changed
//! - Image commits write the edit state and tree but are never recorded
//! - Commits against unknown or mismatched ids are ignored
//! - Undo/redo replace the edit state with the restored snapshot and rewrite
//!   text leaves from it
//! - A fresh load regenerates every id and resets history to one seed entry

use crate::builder::TreeBuilder;
use crate::config::EditorConfig;
use crate::edit_state::EditState;
use crate::errors::EditorError;
use crate::events::{EditEvent, EditSink};
use crate::history::History;
use crate::image_source::{ImageError, ImageSource};
use crate::loads::{ImageLoads, LoadTicket};
use crate::mutations::{apply_snapshot, Committed, Mutation, MutationError};
use crate::node::{DocumentTree, NodeId};
use crate::projection::{ProjectedNode, Projection};
use livedoc_parser::{parse_with_options, ParseDiagnostic, ParseError, ParseOptions, RawElement};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// What a commit did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Text changed and a history entry was appended
    Recorded,

    /// Image source changed (images are not recorded)
    Applied,

    /// Value equal to the previous one; state written, history untouched
    Unchanged,

    /// Unknown id, wrong leaf kind or superseded load; nothing changed
    Ignored,
}

pub struct EditSession {
    config: EditorConfig,
    tree: DocumentTree,
    state: EditState,
    history: History,
    generation: u64,
    loads: ImageLoads,
}

impl EditSession {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            tree: DocumentTree::empty(0),
            state: EditState::new(),
            history: History::with_limit(EditState::new(), config.history_limit),
            generation: 0,
            loads: ImageLoads::new(config.image_load_order),
            config,
        }
    }

    /// Parse and load markup, failing on unparseable input
    #[instrument(skip_all, fields(len = markup.len()))]
    pub fn try_load(&mut self, markup: &str) -> Result<Vec<ParseDiagnostic>, ParseError> {
        let options = ParseOptions {
            max_depth: self.config.parse_depth(),
            ..ParseOptions::default()
        };
        let parsed = parse_with_options(markup, options)?;

        for diagnostic in &parsed.diagnostics {
            warn!(%diagnostic, span = ?diagnostic.span(), "Recovered from malformed markup");
        }

        self.load_raw(parsed.root.as_ref());
        Ok(parsed.diagnostics)
    }

    /// Parse and load markup; a parse failure loads an empty tree
    pub fn load(&mut self, markup: &str) -> Vec<ParseDiagnostic> {
        match self.try_load(markup) {
            Ok(diagnostics) => diagnostics,
            Err(error) => {
                warn!(%error, "Parse failed, loading empty document");
                self.load_raw(None);
                Vec::new()
            }
        }
    }

    /// Read and load a markup file
    pub fn load_file(&mut self, path: &Path) -> Result<Vec<ParseDiagnostic>, EditorError> {
        let markup = std::fs::read_to_string(path)?;
        Ok(self.try_load(&markup)?)
    }

    /// Fresh parse from an already parsed tree
    pub fn load_raw(&mut self, root: Option<&RawElement>) {
        self.generation += 1;
        self.tree = TreeBuilder::new(self.generation).build(root);
        self.state = EditState::from_tree(&self.tree);
        self.history.reset(self.state.clone());
        self.loads.reset();

        info!(
            generation = self.generation,
            nodes = self.tree.node_count(),
            leaves = self.state.len(),
            "Loaded document"
        );
    }

    pub fn try_commit_text(
        &mut self,
        node_id: &NodeId,
        value: &str,
    ) -> Result<CommitOutcome, MutationError> {
        let mutation = Mutation::UpdateText {
            node_id: node_id.clone(),
            content: value.to_string(),
        };
        let Committed {
            tree,
            state,
            changed,
        } = mutation.commit(&self.tree, &self.state)?;

        self.tree = tree;
        self.state = state;

        if !changed {
            debug!(%node_id, "Text unchanged, history not recorded");
            return Ok(CommitOutcome::Unchanged);
        }

        self.history.commit(self.state.clone());
        debug!(%node_id, cursor = self.history.cursor(), "Recorded text edit");
        Ok(CommitOutcome::Recorded)
    }

    pub fn commit_text(&mut self, node_id: &NodeId, value: &str) -> CommitOutcome {
        self.try_commit_text(node_id, value).unwrap_or_else(ignored)
    }

    pub fn try_commit_image(
        &mut self,
        node_id: &NodeId,
        src: &str,
    ) -> Result<CommitOutcome, MutationError> {
        let outcome = self.apply_image(node_id, src)?;
        self.loads.record_direct(node_id.clone());
        Ok(outcome)
    }

    pub fn commit_image(&mut self, node_id: &NodeId, src: &str) -> CommitOutcome {
        self.try_commit_image(node_id, src).unwrap_or_else(ignored)
    }

    /// Apply a serialized mutation
    pub fn try_apply(&mut self, mutation: &Mutation) -> Result<CommitOutcome, MutationError> {
        match mutation {
            Mutation::UpdateText { node_id, content } => self.try_commit_text(node_id, content),
            Mutation::ReplaceImage { node_id, src } => self.try_commit_image(node_id, src),
        }
    }

    /// Normalize an image input and commit it
    ///
    /// Non-image input is rejected before anything is written.
    pub fn accept_image(
        &mut self,
        node_id: &NodeId,
        source: &ImageSource,
    ) -> Result<CommitOutcome, ImageError> {
        let src = source.normalize()?;
        Ok(self.commit_image(node_id, &src))
    }

    /// Read an image file from disk and commit it
    pub fn accept_image_file(
        &mut self,
        node_id: &NodeId,
        path: &Path,
    ) -> Result<CommitOutcome, EditorError> {
        let source = ImageSource::from_path(path)?;
        Ok(self.accept_image(node_id, &source)?)
    }

    /// Start an asynchronous image load for `node_id`
    pub fn begin_image_load(&mut self, node_id: &NodeId) -> LoadTicket {
        self.loads.begin(node_id.clone(), self.generation)
    }

    /// Deliver the result of a load started with [`Self::begin_image_load`]
    pub fn complete_image_load(
        &mut self,
        ticket: &LoadTicket,
        source: &ImageSource,
    ) -> Result<CommitOutcome, ImageError> {
        let src = source.normalize()?;

        if !self.loads.accept(ticket, self.generation) {
            debug!(
                node_id = %ticket.node_id(),
                order = ?self.loads.order(),
                "Discarding superseded image load"
            );
            return Ok(CommitOutcome::Ignored);
        }

        Ok(self
            .apply_image(ticket.node_id(), &src)
            .unwrap_or_else(ignored))
    }

    /// Route a widget event
    pub fn dispatch(&mut self, event: &EditEvent) -> CommitOutcome {
        match event {
            EditEvent::TextCommitted { node_id, value } => self.commit_text(node_id, value),
            EditEvent::ImageCommitted { node_id, src } => self.commit_image(node_id, src),
        }
    }

    /// Step back one history entry; false at the oldest entry
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            debug!("Nothing to undo");
            return false;
        };

        self.restore(snapshot);
        debug!(cursor = self.history.cursor(), "Undo");
        true
    }

    /// Step forward one history entry; false at the newest entry
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            debug!("Nothing to redo");
            return false;
        };

        self.restore(snapshot);
        debug!(cursor = self.history.cursor(), "Redo");
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn projection(&self) -> Projection<'_> {
        Projection::new(&self.tree, &self.state)
    }

    /// Projected tree ready for rendering; `None` for an empty document
    pub fn project(&self) -> Option<ProjectedNode> {
        self.projection().project()
    }

    /// Displayed value of a leaf
    pub fn displayed(&self, node_id: &NodeId) -> Option<&str> {
        self.projection().value(node_id)
    }

    pub fn tree(&self) -> &DocumentTree {
        &self.tree
    }

    pub fn edit_state(&self) -> &EditState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    fn apply_image(&mut self, node_id: &NodeId, src: &str) -> Result<CommitOutcome, MutationError> {
        let mutation = Mutation::ReplaceImage {
            node_id: node_id.clone(),
            src: src.to_string(),
        };
        let Committed {
            tree,
            state,
            changed,
        } = mutation.commit(&self.tree, &self.state)?;

        self.tree = tree;
        self.state = state;

        debug!(%node_id, changed, "Applied image source");
        Ok(if changed {
            CommitOutcome::Applied
        } else {
            CommitOutcome::Unchanged
        })
    }

    fn restore(&mut self, snapshot: EditState) {
        self.tree = apply_snapshot(&self.tree, &snapshot);
        self.state = snapshot;
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditSink for EditSession {
    fn on_text_committed(&mut self, node_id: &NodeId, value: &str) {
        self.commit_text(node_id, value);
    }

    fn on_image_committed(&mut self, node_id: &NodeId, src: &str) {
        self.commit_image(node_id, src);
    }
}

fn ignored(error: MutationError) -> CommitOutcome {
    debug!(%error, "Ignoring commit");
    CommitOutcome::Ignored
}
