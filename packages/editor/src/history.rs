//! # Undo/Redo History
//!
//! Linear history of edit-state snapshots with a cursor.
//!
//! ## Design
//!
//! - Every entry is a full [`EditState`] snapshot, not a diff
//! - The log always holds at least one entry (the seed from the last parse)
//! - Committing after an undo discards everything after the cursor
//! - Undo/redo at either end is a no-op
//! - An optional limit evicts the oldest entries
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new(seed);
//! history.commit(after_first_edit);
//!
//! let previous = history.undo();   // Some(&seed)
//! let next = history.redo();       // Some(&after_first_edit)
//! ```

use crate::edit_state::EditState;

/// Undo/redo log of edit-state snapshots
#[derive(Debug, Clone)]
pub struct History {
    /// Snapshots, oldest first; never empty
    entries: Vec<EditState>,

    /// Index of the current entry
    cursor: usize,

    /// Maximum number of entries (0 = unlimited)
    max_entries: usize,
}

impl History {
    /// Create a history seeded with one entry
    pub fn new(seed: EditState) -> Self {
        Self::with_limit(seed, 0)
    }

    /// Create a history that keeps at most `max_entries` entries
    pub fn with_limit(seed: EditState, max_entries: usize) -> Self {
        Self {
            entries: vec![seed],
            cursor: 0,
            max_entries,
        }
    }

    /// Record a new entry after the cursor, dropping any redo branch
    pub fn commit(&mut self, entry: EditState) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry);

        // Trim if exceeded max entries
        if self.max_entries > 0 && self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }

        self.cursor = self.entries.len() - 1;
    }

    /// Step back; `None` when already at the oldest entry
    pub fn undo(&mut self) -> Option<&EditState> {
        if self.cursor == 0 {
            return None;
        }

        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Step forward; `None` when already at the newest entry
    pub fn redo(&mut self) -> Option<&EditState> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }

        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    /// Replace the whole log with a single seed entry
    pub fn reset(&mut self, seed: EditState) {
        self.entries.clear();
        self.entries.push(seed);
        self.cursor = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of entries, including the seed
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the seed entry is never removed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &EditState {
        &self.entries[self.cursor]
    }

    pub fn entries(&self) -> &[EditState] {
        &self.entries
    }

    pub fn undo_levels(&self) -> usize {
        self.cursor
    }

    pub fn redo_levels(&self) -> usize {
        self.entries.len() - 1 - self.cursor
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(EditState::new())
    }
}
