//! Deterministic toy rules engine for exercising the session machinery.
//!
//! Implementing real chess is explicitly out of scope for this crate, but
//! the session, timeline and arbiter still need a [`Rules`] collaborator to
//! be tested against. `MeleeRules` is a minimal capture game on a chess
//! board: any piece may move to any square not occupied by a friendly
//! piece, captures remove the occupant, pawns promote on the far rank, and
//! a side whose king is gone has lost. That is enough to exercise every
//! edge the session cares about: moves that become illegal after the
//! opponent acts, terminal detection, retraction and stable encoding.

use crate::rules::{Destination, DrawReason, Rules, Terminal};
use crate::suggest::{ProposedMove, Suggester};
use crate::types::{coord_to_sq, rank_of, MoveRecord, PieceKind, Side, Square};

use std::collections::VecDeque;

#[derive(Clone, Debug, PartialEq, Eq)]
struct MeleeUndo {
    origin: Square,
    dest: Square,
    /// The piece as it stood on the origin square (pre-promotion kind).
    moved: (Side, PieceKind),
    captured: Option<(Side, PieceKind)>,
}

/// Full game state for the melee game, including enough history to retract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeleePosition {
    board: [Option<(Side, PieceKind)>; 64],
    to_move: Side,
    ply: u32,
    history: Vec<MeleeUndo>,
}

impl MeleePosition {
    fn startpos() -> Self {
        let mut board = [None; 64];
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, kind) in back.into_iter().enumerate() {
            board[file] = Some((Side::White, kind));
            board[56 + file] = Some((Side::Black, kind));
        }
        for file in 0..8 {
            board[8 + file] = Some((Side::White, PieceKind::Pawn));
            board[48 + file] = Some((Side::Black, PieceKind::Pawn));
        }
        Self {
            board,
            to_move: Side::White,
            ply: 0,
            history: Vec::new(),
        }
    }

    pub fn piece_at(&self, sq: Square) -> Option<(Side, PieceKind)> {
        self.board[sq as usize]
    }

    fn has_king(&self, side: Side) -> bool {
        self.board
            .iter()
            .any(|p| *p == Some((side, PieceKind::King)))
    }
}

/// The toy rules engine.
#[derive(Clone, Debug, Default)]
pub struct MeleeRules {
    /// Declare a draw once this many plies have been played.
    pub draw_after: Option<u32>,
}

impl MeleeRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drawn_after(plies: u32) -> Self {
        Self {
            draw_after: Some(plies),
        }
    }
}

fn promotion_rank(side: Side) -> i8 {
    match side {
        Side::White => 7,
        Side::Black => 0,
    }
}

fn notation(moved: PieceKind, origin: Square, dest: Square, capture: bool, promo: Option<PieceKind>) -> String {
    let mut s = String::new();
    if let Some(letter) = moved.letter() {
        s.push(letter);
    }
    s.push_str(&crate::types::sq_to_coord(origin));
    if capture {
        s.push('x');
    }
    s.push_str(&crate::types::sq_to_coord(dest));
    if let Some(p) = promo {
        s.push('=');
        s.push(p.letter().unwrap_or('Q'));
    }
    s
}

impl Rules for MeleeRules {
    type Position = MeleePosition;

    fn initial_position(&self) -> MeleePosition {
        MeleePosition::startpos()
    }

    fn apply_move(
        &self,
        pos: &MeleePosition,
        origin: Square,
        dest: Square,
        promotion: Option<PieceKind>,
    ) -> Option<(MeleePosition, MoveRecord)> {
        if origin >= 64 || dest >= 64 || origin == dest {
            return None;
        }
        if self.terminal(pos) != Terminal::None {
            return None;
        }
        let moved = match pos.board[origin as usize] {
            Some(p) if p.0 == pos.to_move => p,
            _ => return None,
        };
        let captured = match pos.board[dest as usize] {
            Some(p) if p.0 == pos.to_move => return None,
            other => other,
        };

        let promotes = moved.1 == PieceKind::Pawn && rank_of(dest) == promotion_rank(moved.0);
        let promo_kind = if promotes {
            Some(promotion.unwrap_or(PieceKind::Queen))
        } else {
            None
        };
        let landed = promo_kind.map_or(moved, |k| (moved.0, k));

        let mut next = pos.clone();
        next.board[origin as usize] = None;
        next.board[dest as usize] = Some(landed);
        next.to_move = pos.to_move.other();
        next.ply = pos.ply + 1;
        next.history.push(MeleeUndo {
            origin,
            dest,
            moved,
            captured,
        });

        let rec = MoveRecord {
            ply: pos.ply,
            side: pos.to_move,
            origin,
            dest,
            promotion: promo_kind,
            captured: captured.map(|(_, kind)| kind),
            notation: notation(moved.1, origin, dest, captured.is_some(), promo_kind),
        };
        Some((next, rec))
    }

    fn terminal(&self, pos: &MeleePosition) -> Terminal {
        if !pos.has_king(pos.to_move) {
            return Terminal::Checkmate;
        }
        if let Some(cap) = self.draw_after {
            if pos.ply >= cap {
                return Terminal::Draw(DrawReason::Agreement);
            }
        }
        Terminal::None
    }

    fn side_to_move(&self, pos: &MeleePosition) -> Side {
        pos.to_move
    }

    fn legal_destinations(&self, pos: &MeleePosition, origin: Square) -> Vec<Destination> {
        if origin >= 64 || self.terminal(pos) != Terminal::None {
            return Vec::new();
        }
        match pos.board[origin as usize] {
            Some((side, _)) if side == pos.to_move => (0..64u8)
                .filter(|&sq| sq != origin)
                .filter_map(|sq| match pos.board[sq as usize] {
                    Some((s, _)) if s == side => None,
                    occupant => Some(Destination {
                        square: sq,
                        is_capture: occupant.is_some(),
                    }),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    fn encode(&self, pos: &MeleePosition) -> String {
        let mut s = String::with_capacity(70);
        for sq in 0..64usize {
            s.push(match pos.board[sq] {
                None => '.',
                Some((side, kind)) => {
                    let c = match kind {
                        PieceKind::Pawn => 'p',
                        PieceKind::Knight => 'n',
                        PieceKind::Bishop => 'b',
                        PieceKind::Rook => 'r',
                        PieceKind::Queen => 'q',
                        PieceKind::King => 'k',
                    };
                    match side {
                        Side::White => c.to_ascii_uppercase(),
                        Side::Black => c,
                    }
                }
            });
        }
        s.push(' ');
        s.push(match pos.to_move {
            Side::White => 'w',
            Side::Black => 'b',
        });
        s.push(' ');
        s.push_str(&pos.ply.to_string());
        s
    }

    fn retract_last(&self, pos: &MeleePosition) -> Option<MeleePosition> {
        let mut prev = pos.clone();
        let undo = prev.history.pop()?;
        prev.board[undo.origin as usize] = Some(undo.moved);
        prev.board[undo.dest as usize] = undo.captured;
        prev.to_move = undo.moved.0;
        prev.ply -= 1;
        Some(prev)
    }
}

/// Suggestion engine that replays a fixed move list, for deterministic
/// tests of the request/reply loop.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSuggester {
    moves: VecDeque<ProposedMove>,
}

impl ScriptedSuggester {
    pub fn new<I: IntoIterator<Item = ProposedMove>>(moves: I) -> Self {
        Self {
            moves: moves.into_iter().collect(),
        }
    }
}

impl<R: Rules> Suggester<R> for ScriptedSuggester {
    fn suggest(&mut self, _rules: &R, _pos: &R::Position, _strength: u8) -> Option<ProposedMove> {
        self.moves.pop_front()
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Parse `"e2e4"` into an origin/destination pair. Panics on bad input;
/// test helper only.
pub fn coords(s: &str) -> (Square, Square) {
    let origin = coord_to_sq(&s[0..2]).unwrap_or_else(|| panic!("bad square in {s:?}"));
    let dest = coord_to_sq(&s[2..4]).unwrap_or_else(|| panic!("bad square in {s:?}"));
    (origin, dest)
}

/// [`coords`] as a [`ProposedMove`].
pub fn proposed(s: &str) -> ProposedMove {
    let (origin, dest) = coords(s);
    ProposedMove::new(origin, dest)
}

#[cfg(test)]
#[path = "testing_tests.rs"]
mod testing_tests;
