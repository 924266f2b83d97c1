//! Session controller: owns the timeline, clock and premove slot, and runs
//! the turn/mode arbitration loop after every commit.
//!
//! Event sources are the host's input commands, a periodic [`tick`], and
//! delivered suggestion replies. Every entry point runs the full commit
//! pipeline (timeline, clock, arbiter) to completion before returning, so a
//! tick can never observe a half-applied commit.
//!
//! [`tick`]: Session::tick

use crate::arbiter::{decide, NextActor};
use crate::clock::Clock;
use crate::config::{Mode, SessionConfig};
use crate::error::SessionError;
use crate::export::MoveLog;
use crate::premove::PremoveSlot;
use crate::rules::{DrawReason, Rules, Terminal};
use crate::suggest::{SuggestionReply, SuggestionRequest};
use crate::timeline::Timeline;
use crate::types::{MoveRecord, PieceKind, Side, Square};

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Session lifecycle phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Before any configuration has been applied.
    Idle,
    /// Live play; the committed log is mutable and the view cursor tracks it.
    Active,
    /// The record is frozen; only review navigation is permitted.
    Ended,
}

/// Final result of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultTag {
    CheckmateWin { winner: Side },
    Draw { reason: DrawReason },
    TimeForfeit { winner: Side },
}

/// The live game session.
///
/// Owns all mutable state; the rules engine is consulted for legality but
/// the authoritative position is only ever replaced here, by commit, undo
/// and redo.
pub struct Session<R: Rules> {
    rules: R,
    config: SessionConfig,
    phase: Phase,
    result: Option<ResultTag>,
    /// The one true position used for legality and turn determination.
    position: R::Position,
    /// Position shown by the presentation layer; equals `position` during
    /// live play and follows the view cursor during post-game review.
    view_position: R::Position,
    timeline: Timeline,
    clock: Clock,
    premove: PremoveSlot,
    /// Last issued request epoch; strictly increasing across the session.
    epoch: u64,
    /// Epoch of the one in-flight suggestion request, if any.
    active_request: Option<u64>,
    /// Request waiting for the host to pick up and dispatch.
    outbox: Option<SuggestionRequest<R::Position>>,
}

impl<R: Rules> Session<R> {
    pub fn new(rules: R) -> Self {
        let position = rules.initial_position();
        Self {
            view_position: position.clone(),
            position,
            rules,
            config: SessionConfig::default(),
            phase: Phase::Idle,
            result: None,
            timeline: Timeline::new(),
            clock: Clock::new(SessionConfig::default().time),
            premove: PremoveSlot::new(),
            epoch: 0,
            active_request: None,
            outbox: None,
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Begin a fresh session with `config`. Valid from Idle or Ended; resets
    /// the timeline, clock and premove slot. If the engine holds the
    /// first-moving side a suggestion request is issued immediately.
    pub fn start(&mut self, config: SessionConfig) -> Result<(), SessionError> {
        if self.phase == Phase::Active {
            return Err(SessionError::InvalidTransition);
        }
        info!(mode = %config.mode, human = %config.human_side, time = %config.time, "session started");
        self.config = config;
        self.phase = Phase::Active;
        self.result = None;
        self.position = self.rules.initial_position();
        self.view_position = self.position.clone();
        self.timeline = Timeline::new();
        self.clock = Clock::new(config.time);
        self.premove.cancel();
        self.active_request = None;
        self.outbox = None;
        self.arbiter_step();
        Ok(())
    }

    /// End the session with `result`. Stops the clock and freezes the
    /// committed log as the permanent record.
    pub fn end(&mut self, result: ResultTag) -> Result<(), SessionError> {
        if self.phase != Phase::Active {
            return Err(SessionError::InvalidTransition);
        }
        self.phase = Phase::Ended;
        self.result = Some(result);
        self.clock.stop();
        self.premove.cancel();
        self.active_request = None;
        self.outbox = None;
        self.timeline.set_view_cursor(self.timeline.len() as i32 - 1);
        self.view_position = self.position.clone();
        info!(?result, moves = self.timeline.len(), "session ended");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Moves
    // ------------------------------------------------------------------

    /// Commit a move entered directly by a local human.
    pub fn try_move(
        &mut self,
        origin: Square,
        dest: Square,
        promotion: Option<PieceKind>,
    ) -> Result<(), SessionError> {
        self.require_active()?;
        let to_move = self.rules.side_to_move(&self.position);
        if self.config.mode == Mode::HumanVsEngine && to_move != self.config.human_side {
            // Not the human's turn; the premove slot is the path here.
            return Err(SessionError::InvalidTransition);
        }
        let (next, rec) = self
            .rules
            .apply_move(&self.position, origin, dest, promotion)
            .ok_or(SessionError::IllegalMove)?;
        // A direct commit supersedes any leftover queued move.
        self.premove.cancel();
        self.commit_move(next, rec);
        self.arbiter_step();
        Ok(())
    }

    /// Position, log, clock and request bookkeeping for one commit.
    /// The caller runs the arbiter afterwards.
    fn commit_move(&mut self, next: R::Position, rec: MoveRecord) {
        debug!(ply = rec.ply, notation = %rec.notation, "move committed");
        self.position = next;
        // Increment is credited to the mover and the running side switched
        // in the same pipeline step as the log append.
        self.clock.credit_increment(rec.side);
        self.clock.start(self.rules.side_to_move(&self.position));
        self.timeline.commit(rec);
        self.view_position = self.position.clone();
        // Any in-flight suggestion was computed for a position that no
        // longer exists.
        self.active_request = None;
        self.outbox = None;
    }

    /// Decide the next actor; consumes the queued move or issues a
    /// suggestion request as needed. Loops because a consumed premove is a
    /// new commit.
    fn arbiter_step(&mut self) {
        loop {
            let terminal = self.rules.terminal(&self.position);
            let to_move = self.rules.side_to_move(&self.position);
            match decide(self.config.mode, to_move, self.config.human_side, terminal) {
                NextActor::Finished => {
                    let tag = match terminal {
                        Terminal::Checkmate => ResultTag::CheckmateWin {
                            winner: to_move.other(),
                        },
                        Terminal::Draw(reason) => ResultTag::Draw { reason },
                        // decide() only reports Finished for terminal states
                        Terminal::None => return,
                    };
                    let _ = self.end(tag);
                    return;
                }
                NextActor::Human => {
                    if self.config.mode == Mode::HumanVsEngine {
                        if let Some((origin, dest)) = self.premove.take() {
                            match self.rules.apply_move(&self.position, origin, dest, None) {
                                Some((next, rec)) => {
                                    debug!(notation = %rec.notation, "queued move consumed");
                                    self.commit_move(next, rec);
                                    continue;
                                }
                                None => {
                                    debug!("queued move no longer legal, slot cleared");
                                }
                            }
                        }
                    }
                    return;
                }
                NextActor::Engine => {
                    if self.active_request.is_none() {
                        self.epoch += 1;
                        self.active_request = Some(self.epoch);
                        self.outbox = Some(SuggestionRequest {
                            epoch: self.epoch,
                            position: self.position.clone(),
                            strength: self.config.clamped_strength(),
                        });
                        debug!(epoch = self.epoch, "suggestion requested");
                    }
                    return;
                }
            }
        }
    }

    /// Hand the pending suggestion request to the host for dispatch.
    pub fn take_request(&mut self) -> Option<SuggestionRequest<R::Position>> {
        self.outbox.take()
    }

    /// Route an asynchronous suggestion reply through the commit pipeline.
    ///
    /// The reply is discarded if the session is over, if its epoch has been
    /// superseded by a later position change, or if the rules engine rejects
    /// the proposed move against the current authoritative position.
    pub fn deliver_suggestion(&mut self, reply: SuggestionReply) -> Result<(), SessionError> {
        if self.phase != Phase::Active {
            debug!(epoch = reply.epoch, "suggestion after session end, discarded");
            return Err(SessionError::StaleSuggestion);
        }
        if self.active_request != Some(reply.epoch) {
            debug!(epoch = reply.epoch, current = ?self.active_request, "stale suggestion discarded");
            return Err(SessionError::StaleSuggestion);
        }
        self.active_request = None;
        self.outbox = None;
        let proposed = match reply.proposed {
            Some(p) => p,
            None => {
                warn!(epoch = reply.epoch, "suggestion engine offered no move");
                return Err(SessionError::StaleSuggestion);
            }
        };
        match self
            .rules
            .apply_move(&self.position, proposed.origin, proposed.dest, proposed.promotion)
        {
            Some((next, rec)) => {
                self.commit_move(next, rec);
                self.arbiter_step();
                Ok(())
            }
            None => {
                warn!(epoch = reply.epoch, "suggestion engine proposed an illegal move");
                Err(SessionError::IllegalMove)
            }
        }
    }

    // ------------------------------------------------------------------
    // Premove
    // ------------------------------------------------------------------

    /// Register a queued move, superseding any existing one. Only accepted
    /// in engine mode, while active, on the opponent's turn.
    pub fn queue(&mut self, origin: Square, dest: Square) -> Result<(), SessionError> {
        self.require_active()?;
        if self.config.mode != Mode::HumanVsEngine {
            return Err(SessionError::InvalidTransition);
        }
        if self.rules.side_to_move(&self.position) == self.config.human_side {
            return Err(SessionError::InvalidTransition);
        }
        debug!(origin, dest, "move queued");
        self.premove.set(origin, dest);
        Ok(())
    }

    /// Clear the queued move unconditionally.
    pub fn cancel_queue(&mut self) {
        self.premove.cancel();
    }

    // ------------------------------------------------------------------
    // Undo / redo
    // ------------------------------------------------------------------

    /// Take back the most recent move. In engine mode this repeats until the
    /// authoritative side to move is the human side again, so one undo
    /// gesture always returns control to the human.
    ///
    /// Any in-flight suggestion request is superseded; its reply will fail
    /// the epoch check when it arrives.
    pub fn undo(&mut self) -> Result<(), SessionError> {
        self.require_active()?;
        if self.timeline.is_empty() {
            return Err(SessionError::InvalidTransition);
        }
        self.retract_one()?;
        if self.config.mode == Mode::HumanVsEngine {
            while !self.timeline.is_empty()
                && self.rules.side_to_move(&self.position) != self.config.human_side
            {
                self.retract_one()?;
            }
        }
        self.premove.cancel();
        self.active_request = None;
        self.outbox = None;
        if self.timeline.is_empty() {
            // Back at the start; the clock is idle again until a commit.
            self.clock.stop();
        } else {
            self.clock.start(self.rules.side_to_move(&self.position));
        }
        Ok(())
    }

    fn retract_one(&mut self) -> Result<(), SessionError> {
        let prev = self
            .rules
            .retract_last(&self.position)
            .ok_or(SessionError::InvalidTransition)?;
        self.position = prev;
        self.timeline.undo();
        self.view_position = self.position.clone();
        debug!(remaining = self.timeline.len(), "move undone");
        Ok(())
    }

    /// Re-apply the most recently undone move. In engine mode the paired
    /// engine plies are restored with it, so redo puts back exactly what
    /// undo removed as a unit. If the tip then leaves the engine to move
    /// with nothing left to redo, a fresh suggestion request is issued.
    pub fn redo(&mut self) -> Result<(), SessionError> {
        self.require_active()?;
        if self.timeline.peek_redo().is_none() {
            return Err(SessionError::InvalidTransition);
        }
        self.active_request = None;
        self.outbox = None;
        self.reapply_one()?;
        if self.config.mode == Mode::HumanVsEngine {
            while self.rules.side_to_move(&self.position) != self.config.human_side
                && self.timeline.peek_redo().is_some()
            {
                self.reapply_one()?;
            }
        }
        self.clock.start(self.rules.side_to_move(&self.position));
        self.arbiter_step();
        Ok(())
    }

    fn reapply_one(&mut self) -> Result<(), SessionError> {
        let top = match self.timeline.peek_redo() {
            Some(rec) => rec.clone(),
            None => return Err(SessionError::InvalidTransition),
        };
        let (next, rec) = self
            .rules
            .apply_move(&self.position, top.origin, top.dest, top.promotion)
            .ok_or(SessionError::IllegalMove)?;
        self.position = next;
        self.timeline.redo(rec);
        self.view_position = self.position.clone();
        debug!(restored = self.timeline.len(), "move redone");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Clock
    // ------------------------------------------------------------------

    /// Advance the clock by one tick period. If the running side's time
    /// reaches zero the session ends immediately with a time forfeit for
    /// the other side and `ClockExhausted` is returned.
    ///
    /// Ticks outside live play are ignored.
    pub fn tick(&mut self) -> Result<(), SessionError> {
        if self.phase != Phase::Active {
            return Ok(());
        }
        if let Some(flagged) = self.clock.tick() {
            let winner = flagged.other();
            info!(flagged = %flagged, "time forfeit");
            let _ = self.end(ResultTag::TimeForfeit { winner });
            return Err(SessionError::ClockExhausted);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Review
    // ------------------------------------------------------------------

    /// Move the review cursor to `target` (clamped to `[-1, len-1]`, `-1`
    /// being the initial position) and rebuild the display-only position by
    /// replaying the frozen record. Permitted only after the session ends;
    /// never mutates the record or the authoritative position.
    pub fn go_to_view(&mut self, target: i32) -> Result<(), SessionError> {
        if self.phase != Phase::Ended {
            return Err(SessionError::InvalidTransition);
        }
        let cursor = self.timeline.set_view_cursor(target);
        let mut pos = self.rules.initial_position();
        for rec in &self.timeline.committed()[..(cursor + 1) as usize] {
            match self.rules.apply_move(&pos, rec.origin, rec.dest, rec.promotion) {
                Some((next, _)) => pos = next,
                // The frozen record only holds moves that were legal.
                None => warn!(ply = rec.ply, "frozen record failed to replay"),
            }
        }
        self.view_position = pos;
        debug!(cursor, "view cursor moved");
        Ok(())
    }

    pub fn step_backward(&mut self) -> Result<(), SessionError> {
        self.go_to_view(self.timeline.view_cursor() - 1)
    }

    pub fn step_forward(&mut self) -> Result<(), SessionError> {
        self.go_to_view(self.timeline.view_cursor() + 1)
    }

    // ------------------------------------------------------------------
    // Snapshots for the presentation layer
    // ------------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn result(&self) -> Option<ResultTag> {
        self.result
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// The authoritative position.
    pub fn position(&self) -> &R::Position {
        &self.position
    }

    /// The position selected by the view cursor, for rendering.
    pub fn view_position(&self) -> &R::Position {
        &self.view_position
    }

    pub fn side_to_move(&self) -> Side {
        self.rules.side_to_move(&self.position)
    }

    pub fn remaining_time(&self, side: Side) -> Duration {
        self.clock.remaining(side)
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn committed(&self) -> &[MoveRecord] {
        self.timeline.committed()
    }

    pub fn redo_len(&self) -> usize {
        self.timeline.redo_len()
    }

    pub fn view_cursor(&self) -> i32 {
        self.timeline.view_cursor()
    }

    /// Queued-move endpoints, for highlighting.
    pub fn queued(&self) -> Option<(Square, Square)> {
        self.premove.get()
    }

    /// True while a suggestion request is outstanding.
    pub fn engine_thinking(&self) -> bool {
        self.active_request.is_some()
    }

    /// The portable move-log export.
    pub fn move_log(&self) -> MoveLog {
        MoveLog::from_records(self.timeline.committed(), self.result)
    }

    fn require_active(&self) -> Result<(), SessionError> {
        if self.phase == Phase::Active {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition)
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
