//! Random Move Suggester
//!
//! A suggester that picks uniformly at random from all legal moves.
//! Useful for:
//! - Exercising the session plumbing without a real engine
//! - Baseline opponents at any strength setting
//! - Stress testing premove and undo interactions

use game_session::{ProposedMove, Rules, Suggester};
use rand::seq::SliceRandom;
use rand::thread_rng;


/// A suggester that plays random legal moves.
///
/// Strength is ignored - there is no evaluation to scale. It simply
/// enumerates every legal (origin, destination) pair for the side to move
/// and picks one.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSuggester;

impl RandomSuggester {
    pub fn new() -> Self {
        Self
    }
}

impl<R: Rules> Suggester<R> for RandomSuggester {
    fn suggest(&mut self, rules: &R, pos: &R::Position, _strength: u8) -> Option<ProposedMove> {
        let mut moves = Vec::with_capacity(64);
        for origin in 0..64u8 {
            for dest in rules.legal_destinations(pos, origin) {
                moves.push(ProposedMove::new(origin, dest.square));
            }
        }

        moves.choose(&mut thread_rng()).copied()
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }
}
