//! Boundary to the external move-suggestion engine.
//!
//! Requests are fire-and-forget: the session hands out a
//! [`SuggestionRequest`] carrying a position snapshot and a request epoch,
//! and the host delivers the eventual [`SuggestionReply`] back whenever it
//! arrives. The epoch is how a reply to a superseded request is recognized
//! and dropped; there is no hard cancellation.

use crate::rules::Rules;
use crate::types::{PieceKind, Square};
use serde::{Deserialize, Serialize};

/// A move proposed by a suggestion engine (or registered as a premove),
/// not yet validated against the current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedMove {
    pub origin: Square,
    pub dest: Square,
    pub promotion: Option<PieceKind>,
}

impl ProposedMove {
    pub fn new(origin: Square, dest: Square) -> Self {
        Self {
            origin,
            dest,
            promotion: None,
        }
    }
}

/// Synchronous move-suggestion engine.
///
/// Implementations are driven off-thread by the host (the runtime crate runs
/// them on the blocking pool); the session core itself never calls this
/// trait.
pub trait Suggester<R: Rules>: Send {
    /// Propose a move for the side to move in `pos`. `strength` is the
    /// configured engine strength, already clamped to `1..=20`.
    ///
    /// Returns `None` when the engine has no move to offer.
    fn suggest(&mut self, rules: &R, pos: &R::Position, strength: u8) -> Option<ProposedMove>;

    /// Engine name for status display.
    fn name(&self) -> &str;
}

/// One outstanding request to the suggestion engine.
#[derive(Clone, Debug)]
pub struct SuggestionRequest<P> {
    /// Monotonically increasing token identifying this request.
    pub epoch: u64,
    /// Snapshot of the authoritative position at request time.
    pub position: P,
    pub strength: u8,
}

/// The asynchronous answer to a [`SuggestionRequest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SuggestionReply {
    /// Epoch of the request this reply answers.
    pub epoch: u64,
    /// Proposed move, or `None` if the engine found nothing.
    pub proposed: Option<ProposedMove>,
}
