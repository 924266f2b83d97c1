//! Boundary to the external rules/legality engine.
//!
//! The session core never implements game rules itself. Everything it needs
//! from the rules engine is expressed here: applying and retracting moves,
//! terminal-state detection, legal-destination queries for premove
//! highlighting, and a portable position encoding.

use crate::types::{MoveRecord, PieceKind, Side, Square};
use serde::{Deserialize, Serialize};

/// Why a finished game is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawReason {
    Stalemate,
    FiftyMove,
    Repetition,
    InsufficientMaterial,
    Agreement,
}

/// Terminal-state report for a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Terminal {
    /// Game goes on.
    None,
    /// The side to move is mated; the other side wins.
    Checkmate,
    Draw(DrawReason),
}

/// A legal destination from some origin square, with a capture flag for
/// presentation highlighting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Destination {
    pub square: Square,
    pub is_capture: bool,
}

/// External rules engine.
///
/// The position type is opaque to the session core; it is held by value and
/// cloned for snapshots (suggestion requests, review replay).
pub trait Rules {
    type Position: Clone;

    fn initial_position(&self) -> Self::Position;

    /// Validate and apply a move. Returns the successor position and the
    /// record of the move, or `None` if the move is illegal in `pos`.
    ///
    /// The `ply` and `side` fields of the returned record come from the
    /// position the move was applied to.
    fn apply_move(
        &self,
        pos: &Self::Position,
        origin: Square,
        dest: Square,
        promotion: Option<PieceKind>,
    ) -> Option<(Self::Position, MoveRecord)>;

    fn terminal(&self, pos: &Self::Position) -> Terminal;

    fn side_to_move(&self, pos: &Self::Position) -> Side;

    fn legal_destinations(&self, pos: &Self::Position, origin: Square) -> Vec<Destination>;

    /// Portable position string for display and engine requests.
    fn encode(&self, pos: &Self::Position) -> String;

    /// Retract the most recent move, or `None` if `pos` is the initial
    /// position.
    fn retract_last(&self, pos: &Self::Position) -> Option<Self::Position>;
}
