//! Committed move log, redo buffer and review cursor.
//!
//! `committed` is the authoritative record: it only ever grows by a commit
//! (which clears the redo buffer) and shrinks by an undo (which parks the
//! popped record on the redo buffer). The view cursor tracks the tip of
//! `committed` during live play; only after the session ends may it roam
//! for review, and moving it never touches the record.

use crate::types::MoveRecord;

#[derive(Clone, Debug)]
pub struct Timeline {
    committed: Vec<MoveRecord>,
    redo_buffer: Vec<MoveRecord>,
    view_cursor: i32,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            committed: Vec::new(),
            redo_buffer: Vec::new(),
            view_cursor: -1,
        }
    }

    /// Append a freshly validated move. Any redo branch is dead from this
    /// point on, and the view cursor snaps to the new tip.
    pub fn commit(&mut self, rec: MoveRecord) {
        self.committed.push(rec);
        self.redo_buffer.clear();
        self.sync_cursor();
    }

    /// Pop the most recent move onto the redo buffer. Returns false when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.committed.pop() {
            Some(rec) => {
                self.redo_buffer.push(rec);
                self.sync_cursor();
                true
            }
            None => false,
        }
    }

    /// Most recently undone move, next in line for redo.
    pub fn peek_redo(&self) -> Option<&MoveRecord> {
        self.redo_buffer.last()
    }

    /// Re-commit the top of the redo buffer. `reapplied` is the record the
    /// rules engine produced when the move was re-applied; unlike a fresh
    /// commit this does not clear the rest of the buffer.
    pub fn redo(&mut self, reapplied: MoveRecord) {
        self.redo_buffer.pop();
        self.committed.push(reapplied);
        self.sync_cursor();
    }

    fn sync_cursor(&mut self) {
        self.view_cursor = self.committed.len() as i32 - 1;
    }

    /// Move the view cursor, clamped to `[-1, len-1]`. Returns the cursor
    /// actually set. Read-only with respect to the record.
    pub fn set_view_cursor(&mut self, target: i32) -> i32 {
        let max = self.committed.len() as i32 - 1;
        self.view_cursor = target.clamp(-1, max.max(-1));
        self.view_cursor
    }

    pub fn view_cursor(&self) -> i32 {
        self.view_cursor
    }

    pub fn committed(&self) -> &[MoveRecord] {
        &self.committed
    }

    pub fn last(&self) -> Option<&MoveRecord> {
        self.committed.last()
    }

    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_buffer.len()
    }
}

#[cfg(test)]
#[path = "timeline_tests.rs"]
mod timeline_tests;
