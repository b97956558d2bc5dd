use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::scene::selection::Selections;
use crate::scene::transform::TransformStore;

/// Undo depth used when no option is given.
pub const DEFAULT_HISTORY_DEPTH: usize = 100;

/// Everything undo/redo restores: all transforms and the three selection lists.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Transform map.
    pub transforms: TransformStore,
    /// Selected scenes, assets and wardrobe items.
    pub selections: Selections,
}

/// One committed state.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    /// What produced this state ("move element", "add asset", ...).
    pub label: String,
    /// State after the action.
    pub snapshot: Snapshot,
}

/// Linear undo/redo over owned snapshots.
///
/// Entries are post-action states and the cursor points at the one currently shown. Pushing
/// drops everything after the cursor; the oldest entries fall off once `capacity` is reached.
#[derive(Clone, Debug)]
pub struct HistoryLedger {
    entries: VecDeque<HistoryEntry>,
    cursor: Option<usize>,
    capacity: usize,
}

impl Default for HistoryLedger {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl HistoryLedger {
    /// Empty ledger keeping at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: None,
            capacity: capacity.max(1),
        }
    }

    /// Record a new state after the cursor.
    pub fn push(&mut self, label: impl Into<String>, snapshot: Snapshot) {
        let label = label.into();
        match self.cursor {
            Some(c) => self.entries.truncate(c + 1),
            None => self.entries.clear(),
        }
        self.entries.push_back(HistoryEntry {
            label: label.clone(),
            snapshot,
        });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.cursor = Some(self.entries.len() - 1);
        tracing::debug!(label, depth = self.entries.len(), "history entry pushed");
    }

    /// Step back; returns the state to restore, or `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        let c = self.cursor.filter(|&c| c > 0)? - 1;
        self.cursor = Some(c);
        let entry = self.entries.get(c)?;
        tracing::debug!(label = %entry.label, cursor = c, "undo");
        Some(entry)
    }

    /// Step forward; returns the state to restore, or `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        let c = self.cursor? + 1;
        if c >= self.entries.len() {
            return None;
        }
        self.cursor = Some(c);
        let entry = self.entries.get(c)?;
        tracing::debug!(label = %entry.label, cursor = c, "redo");
        Some(entry)
    }

    /// Entry under the cursor.
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.cursor?)
    }

    /// Cursor position, `None` while empty.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing was recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of stored entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// `true` when [`HistoryLedger::undo`] would move.
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    /// `true` when [`HistoryLedger::redo`] would move.
    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    /// Labels from oldest to newest.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/history/ledger.rs"]
mod tests;
