//! Undo/Redo history of grid snapshots
//!
//! One linear stack with a cursor. Entries after the cursor are redo-reachable,
//! entries before it are undo-reachable. Recording truncates the redo side.

use log::debug;

use crate::grid::Grid;

/// Default cap on retained snapshots
pub const DEFAULT_MAX_ENTRIES: usize = 100;

#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Grid>,
    cursor: usize,
    max_entries: usize,
}

impl History {
    /// Start a history whose entry 0 is `initial`.
    pub fn new(initial: Grid) -> Self {
        Self::with_limit(initial, DEFAULT_MAX_ENTRIES)
    }

    /// Same as `new` with an explicit cap (at least 1).
    pub fn with_limit(initial: Grid, max_entries: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            max_entries: max_entries.max(1),
        }
    }

    /// Record a new snapshot as the active entry.
    ///
    /// Drops everything after the cursor first. When over the cap, the oldest
    /// entries are evicted and the cursor shifts down with them.
    pub fn record(&mut self, grid: Grid) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(grid);

        // Limit history size
        let overflow = self.entries.len().saturating_sub(self.max_entries);
        if overflow > 0 {
            self.entries.drain(..overflow);
            debug!("history: evicted {} oldest entries", overflow);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one entry, returning the snapshot now active.
    pub fn undo(&mut self) -> Option<&Grid> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Step forward one entry, returning the snapshot now active.
    pub fn redo(&mut self) -> Option<&Grid> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    /// The active snapshot.
    pub fn current(&self) -> &Grid {
        &self.entries[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}
