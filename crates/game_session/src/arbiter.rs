//! Turn/mode arbitration: who acts after a commit.
//!
//! The decision is a pure function of the mode, the authoritative side to
//! move and the terminal flag. Everything stateful (the premove slot, the
//! outstanding request epoch) is applied by the session controller on top
//! of this decision.

use crate::config::Mode;
use crate::rules::Terminal;
use crate::types::Side;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextActor {
    /// The game is over; no further moves are requested.
    Finished,
    /// A local human is to move (in engine mode this is also where a queued
    /// move becomes consumable).
    Human,
    /// The engine side is to move; issue one suggestion request.
    Engine,
}

pub fn decide(mode: Mode, to_move: Side, human_side: Side, terminal: Terminal) -> NextActor {
    if terminal != Terminal::None {
        return NextActor::Finished;
    }
    match mode {
        Mode::HumanVsHuman => NextActor::Human,
        Mode::HumanVsEngine if to_move == human_side => NextActor::Human,
        Mode::HumanVsEngine => NextActor::Engine,
    }
}

#[cfg(test)]
#[path = "arbiter_tests.rs"]
mod arbiter_tests;
