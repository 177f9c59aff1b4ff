use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use tracing::{debug, trace, warn};

use super::guard::{CaptureGuard, ChangeToken, HistoryChange};
use crate::codec;
use crate::config::{HistoryConfig, MAX_HISTORY_SIZE};
use crate::error::CodecError;
use crate::graph::{Edge, GraphSnapshot, GraphState, Node};

/// Diagnostic view of the history, for toolbar state and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryInfo {
    pub history_length: usize,
    /// `None` when the history is empty; serialized as `-1`
    #[serde(serialize_with = "serialize_index")]
    pub current_index: Option<usize>,
    pub can_undo: bool,
    pub can_redo: bool,
}

fn serialize_index<S: Serializer>(index: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error> {
    match index {
        Some(i) => serializer.serialize_u64(*i as u64),
        None => serializer.serialize_i64(-1),
    }
}

/// Bounded, linear snapshot history for one diagram editor.
///
/// Entries are full copies of the graph. `cursor` points at the entry the
/// editor currently shows; entries after it form the redo branch, which is
/// dropped by the next `save_state`. When the bound is exceeded the oldest
/// entry is evicted.
#[derive(Debug)]
pub struct History {
    entries: VecDeque<GraphState>,
    cursor: Option<usize>,
    capacity: usize,
    guard: CaptureGuard,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY_SIZE)
    }

    /// A capacity of 0 is treated as 1 so the current entry always exists
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: None,
            capacity: capacity.max(1),
            guard: CaptureGuard::default(),
        }
    }

    pub fn with_config(config: &HistoryConfig) -> Self {
        Self::with_capacity(config.max_history_size)
    }

    /// Drop any previous history and seed it with the given graph.
    /// The copy is made first, so on a codec failure the old history is kept.
    pub fn initialize(&mut self, nodes: &[Node], edges: &[Edge]) -> Result<(), CodecError> {
        let snapshot = codec::copy_graph(nodes, edges)?;
        self.clear();
        debug!(nodes = nodes.len(), edges = edges.len(), "initializing history");
        self.push(snapshot);
        Ok(())
    }

    /// Drop any previous history and seed it with an empty graph
    pub fn initialize_empty(&mut self) {
        self.clear();
        self.push(GraphSnapshot::default());
    }

    /// Record the graph after a committed mutation.
    ///
    /// Does nothing while an undo/redo result is being applied. The copy is
    /// made before anything is touched, so a codec failure leaves the
    /// history as it was.
    pub fn save_state(&mut self, nodes: &[Node], edges: &[Edge]) -> Result<(), CodecError> {
        if self.guard.is_suppressed() {
            trace!(pending = ?self.guard.pending(), "capture suppressed");
            return Ok(());
        }

        let snapshot = codec::copy_graph(nodes, edges)?;
        self.push(snapshot);
        Ok(())
    }

    fn push(&mut self, snapshot: GraphSnapshot) {
        let timestamp = self.next_timestamp();

        if let Some(cursor) = self.cursor {
            if cursor + 1 < self.entries.len() {
                let dropped = self.entries.len() - cursor - 1;
                self.entries.truncate(cursor + 1);
                debug!(dropped, "discarded redo branch");
            }
        }

        self.entries.push_back(GraphState::new(snapshot, timestamp));
        let mut cursor = self.entries.len() - 1;

        if self.entries.len() > self.capacity {
            self.entries.pop_front();
            cursor -= 1;
            debug!(capacity = self.capacity, "evicted oldest history entry");
        }

        self.cursor = Some(cursor);
        trace!(len = self.entries.len(), cursor, "saved state");
    }

    /// Step back one entry. Capture is suppressed until the change is completed.
    pub fn undo(&mut self) -> Option<HistoryChange> {
        if !self.can_undo() {
            return None;
        }
        let target = self.cursor? - 1;
        Some(self.move_to(target, "undo"))
    }

    /// Step forward one entry. Capture is suppressed until the change is completed.
    pub fn redo(&mut self) -> Option<HistoryChange> {
        if !self.can_redo() {
            return None;
        }
        let target = self.cursor? + 1;
        Some(self.move_to(target, "redo"))
    }

    fn move_to(&mut self, target: usize, op: &'static str) -> HistoryChange {
        let snapshot = self.entries[target].to_snapshot();
        self.cursor = Some(target);
        if self.guard.is_suppressed() {
            warn!(op, stale = ?self.guard.pending(), "previous history change was never completed");
        }
        let token = self.guard.engage();
        debug!(op, cursor = target, len = self.entries.len(), "history change issued");
        HistoryChange::new(snapshot, token)
    }

    /// Re-enable capture after the editor finished applying an undo/redo result.
    /// Clears the gate whichever change is pending.
    pub fn complete_history_change(&mut self) {
        if let Some(token) = self.guard.pending() {
            trace!(?token, "history change completed");
        }
        self.guard.release();
    }

    /// Like `complete_history_change`, but only if `token` belongs to the most
    /// recent undo/redo. Returns false (and keeps capture suppressed) for a
    /// stale or repeated completion.
    pub fn complete_change(&mut self, token: ChangeToken) -> bool {
        let released = self.guard.release_token(token);
        if !released {
            warn!(?token, pending = ?self.guard.pending(), "ignoring completion for stale history change");
        }
        released
    }

    /// Undo and hand the result to `apply`, completing the change afterwards
    /// whether `apply` succeeded or not, and even if `apply` undid or redid
    /// again. `apply` gets the history back so the editor's change hook can
    /// run (its captures are suppressed).
    pub fn apply_undo<T, E, F>(&mut self, apply: F) -> Option<Result<T, E>>
    where
        F: FnOnce(&mut Self, HistoryChange) -> Result<T, E>,
    {
        let change = self.undo()?;
        Some(self.run_change(change, apply))
    }

    /// Redo counterpart of `apply_undo`
    pub fn apply_redo<T, E, F>(&mut self, apply: F) -> Option<Result<T, E>>
    where
        F: FnOnce(&mut Self, HistoryChange) -> Result<T, E>,
    {
        let change = self.redo()?;
        Some(self.run_change(change, apply))
    }

    fn run_change<T, E, F>(&mut self, change: HistoryChange, apply: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self, HistoryChange) -> Result<T, E>,
    {
        let token = change.token;
        let result = apply(self, change);
        if result.is_err() {
            debug!(?token, "history change failed to apply");
        }
        // `apply` may have issued a nested undo/redo; the scope still ends here
        if !self.guard.release_token(token) {
            debug!(?token, pending = ?self.guard.pending(), "nested history change, releasing capture");
            self.guard.release();
        }
        result
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            debug!(len = self.entries.len(), "clearing history");
        }
        self.entries.clear();
        self.cursor = None;
        self.guard.release();
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(c) if c + 1 < self.entries.len())
    }

    pub fn info(&self) -> HistoryInfo {
        HistoryInfo {
            history_length: self.entries.len(),
            current_index: self.cursor,
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_capture_suppressed(&self) -> bool {
        self.guard.is_suppressed()
    }

    /// Copy of the entry at the cursor
    pub fn current(&self) -> Option<GraphSnapshot> {
        self.cursor.map(|c| self.entries[c].to_snapshot())
    }

    /// Stored entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &GraphState> {
        self.entries.iter()
    }

    // Wall clocks can step backwards; keep stamps non-decreasing within a session.
    fn next_timestamp(&self) -> DateTime<Utc> {
        let now = Utc::now();
        match self.entries.back() {
            Some(last) if last.timestamp() > now => last.timestamp(),
            _ => now,
        }
    }
}
