//! Linear undo/redo history of surface snapshots
//!
//! An ordered list of snapshots plus a cursor. Committing after an undo
//! truncates everything past the cursor, so redo is lost on any new edit.
//! This is a plain stack, not a tree.

use tracing::debug;

use crate::surface::Snapshot;

/// Snapshot history with a cursor
///
/// Invariant: `cursor < entries.len()` and `entries` is never empty.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Snapshot>,
    cursor: usize,
    /// Maximum entries kept (None = unbounded)
    limit: Option<usize>,
}

impl History {
    /// Start a history whose only entry is `initial`
    pub fn new(initial: Snapshot) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            limit: None,
        }
    }

    /// Start a history that keeps at most `limit` entries
    pub fn with_limit(initial: Snapshot, limit: Option<usize>) -> Self {
        Self {
            limit: limit.map(|l| l.max(1)),
            ..Self::new(initial)
        }
    }

    /// Record a new state.
    ///
    /// Drops every entry after the cursor, appends, and moves the cursor to
    /// the new last entry.
    pub fn commit(&mut self, snapshot: Snapshot) {
        let discarded = self.entries.len() - (self.cursor + 1);
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);
        self.cursor = self.entries.len() - 1;

        if let Some(limit) = self.limit {
            while self.entries.len() > limit {
                self.entries.remove(0);
                self.cursor -= 1;
            }
        }

        debug!(
            "History commit: {} entries, cursor {} ({} redo entries discarded)",
            self.entries.len(),
            self.cursor,
            discarded
        );
    }

    /// Step back one entry, returning the snapshot to show
    /// Returns None at the oldest entry.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward one entry, returning the snapshot to show
    /// Returns None at the newest entry.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    /// Replace the whole history with a single entry
    pub fn reset(&mut self, snapshot: Snapshot) {
        self.entries.clear();
        self.entries.push(snapshot);
        self.cursor = 0;
    }

    /// Snapshot at the cursor
    pub fn current(&self) -> &Snapshot {
        &self.entries[self.cursor]
    }

    pub fn entries(&self) -> &[Snapshot] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::CpuSurface;

    fn snap(fill: u8) -> Snapshot {
        let mut surface = CpuSurface::new(2, 2);
        surface.clear([fill, fill, fill, 255]);
        surface.snapshot()
    }

    #[test]
    fn test_new_history() {
        let history = History::new(snap(0));
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_commit_advances_cursor() {
        let mut history = History::new(snap(0));
        history.commit(snap(1));
        history.commit(snap(2));
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.current(), &snap(2));
    }

    #[test]
    fn test_undo_redo_bounds() {
        let mut history = History::new(snap(0));
        history.commit(snap(1));

        assert_eq!(history.undo(), Some(&snap(0)));
        assert!(history.undo().is_none());
        assert_eq!(history.cursor(), 0);

        assert_eq!(history.redo(), Some(&snap(1)));
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn test_commit_after_undo_discards_redo() {
        let mut history = History::new(snap(0));
        history.commit(snap(1));
        history.commit(snap(2));
        history.undo();
        history.undo();

        history.commit(snap(9));

        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 1);
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
        assert_eq!(history.current(), &snap(9));
    }

    #[test]
    fn test_reset() {
        let mut history = History::new(snap(0));
        for i in 1..10 {
            history.commit(snap(i));
        }
        history.reset(snap(0));
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.current(), &snap(0));
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit(snap(0), Some(3));
        for i in 1..=5 {
            history.commit(snap(i));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.entries()[0], snap(3));
        assert_eq!(history.current(), &snap(5));
    }
}
