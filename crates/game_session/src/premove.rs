//! Queued-move slot (premove).
//!
//! Holds at most one origin/destination pair registered by the local human
//! while it is not their turn. The slot is dumb on purpose: eligibility
//! (engine mode, session active, opponent to move) and consumption-time
//! re-validation are the session controller's job. A queued move never
//! participates in undo/redo bookkeeping; only materialized moves do.

use crate::types::Square;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PremoveSlot {
    queued: Option<(Square, Square)>,
}

impl PremoveSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a queued move, superseding any existing one.
    pub fn set(&mut self, origin: Square, dest: Square) {
        self.queued = Some((origin, dest));
    }

    /// Clear unconditionally.
    pub fn cancel(&mut self) {
        self.queued = None;
    }

    /// Remove and return the queued move for consumption.
    pub fn take(&mut self) -> Option<(Square, Square)> {
        self.queued.take()
    }

    pub fn get(&self) -> Option<(Square, Square)> {
        self.queued
    }

    pub fn is_set(&self) -> bool {
        self.queued.is_some()
    }

    /// True if `sq` is either endpoint of the queued move. Presentation uses
    /// this both for highlighting and for click-to-cancel.
    pub fn is_endpoint(&self, sq: Square) -> bool {
        matches!(self.queued, Some((o, d)) if o == sq || d == sq)
    }
}

#[cfg(test)]
#[path = "premove_tests.rs"]
mod premove_tests;
