//! Undo/redo history
//!
//! A linear list of whole-document snapshots plus a cursor. Entry 0 is the
//! baseline the session started from; every committed mutation pushes one
//! entry after it. The cursor always points at the entry matching the live
//! document.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Document;

/// Size policy of the history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum HistoryLimit {
    /// Keep every entry for the whole session
    #[default]
    Unbounded,
    /// Keep at most this many undoable entries; the oldest are dropped
    MaxEntries(usize),
}

#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Document>,
    cursor: usize,
    limit: HistoryLimit,
}

impl History {
    pub fn new(baseline: Document, limit: HistoryLimit) -> Self {
        Self {
            entries: vec![baseline],
            cursor: 0,
            limit,
        }
    }

    /// Record a committed document
    ///
    /// Entries after the cursor (the redo branch) are discarded.
    pub fn push(&mut self, document: Document) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(document);
        self.cursor = self.entries.len() - 1;

        if let HistoryLimit::MaxEntries(max) = self.limit {
            // Baseline counts as one extra entry.
            let excess = self.entries.len().saturating_sub(max + 1);
            if excess > 0 {
                self.entries.drain(..excess);
                self.cursor -= excess;
                debug!(dropped = excess, "history capped");
            }
        }
    }

    /// Step back; `None` when already at the oldest entry
    pub fn undo(&mut self) -> Option<&Document> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        debug!(cursor = self.cursor, "undo");
        self.entries.get(self.cursor)
    }

    /// Step forward; `None` when already at the newest entry
    pub fn redo(&mut self) -> Option<&Document> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        debug!(cursor = self.cursor, "redo");
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Snapshot at the cursor
    pub fn current(&self) -> &Document {
        &self.entries[self.cursor]
    }

    /// Number of pushed entries (the baseline is not counted)
    pub fn len(&self) -> usize {
        self.entries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn limit(&self) -> HistoryLimit {
        self.limit
    }

    /// Forget everything and start again from `baseline`
    pub fn reset(&mut self, baseline: Document) {
        self.entries = vec![baseline];
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Block, BlockId, Content, RawSettings};

    fn doc(ids: &[&str]) -> Document {
        Document::new(
            ids.iter()
                .map(|id| Block::new(BlockId::from(*id), "text", Content::new(), RawSettings::default()))
                .collect(),
        )
    }

    #[test]
    fn test_undo_redo_at_bounds_are_noops() {
        let mut history = History::new(doc(&[]), HistoryLimit::Unbounded);
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), 0);
        assert!(history.is_empty());
    }

    #[test]
    fn test_push_undo_redo() {
        let mut history = History::new(doc(&[]), HistoryLimit::Unbounded);
        history.push(doc(&["a"]));
        history.push(doc(&["a", "b"]));
        assert_eq!(history.len(), 2);

        assert_eq!(history.undo().cloned(), Some(doc(&["a"])));
        assert_eq!(history.undo().cloned(), Some(doc(&[])));
        assert!(history.undo().is_none());
        assert_eq!(history.redo().cloned(), Some(doc(&["a"])));
    }

    #[test]
    fn test_push_discards_redo_branch() {
        let mut history = History::new(doc(&[]), HistoryLimit::Unbounded);
        history.push(doc(&["a"]));
        history.push(doc(&["a", "b"]));
        history.undo();
        history.push(doc(&["c"]));

        assert!(!history.can_redo());
        assert!(history.redo().is_none());
        assert_eq!(history.current(), &doc(&["c"]));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut history = History::new(doc(&[]), HistoryLimit::MaxEntries(2));
        history.push(doc(&["a"]));
        history.push(doc(&["b"]));
        history.push(doc(&["c"]));

        assert_eq!(history.len(), 2);
        assert_eq!(history.undo().cloned(), Some(doc(&["b"])));
        assert_eq!(history.undo().cloned(), Some(doc(&["a"])));
        assert!(history.undo().is_none());
    }
}
