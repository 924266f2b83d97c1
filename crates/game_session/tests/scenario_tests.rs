//! End-to-end session scenarios: clocks, premoves, stale suggestions and
//! post-game review, driven through the public API only.

use game_session::testing::{coords, proposed, MeleeRules};
use game_session::{
    DrawReason, Mode, Phase, ResultTag, Rules, Session, SessionConfig, SessionError, Side,
    SuggestionReply, TimeControl,
};
use std::time::Duration;

fn cfg(mode: Mode, human_side: Side, time: TimeControl) -> SessionConfig {
    SessionConfig {
        mode,
        human_side,
        strength: 10,
        time,
    }
}

fn play(session: &mut Session<MeleeRules>, mv: &str) {
    let (origin, dest) = coords(mv);
    session.try_move(origin, dest, None).unwrap();
}

// =============================================================================
// Scenario A: increment rewards the mover, opponent's clock runs down
// =============================================================================

#[test]
fn increment_credits_mover_while_opponent_clock_runs() {
    let mut session = Session::new(MeleeRules::new());
    session
        .start(cfg(
            Mode::HumanVsHuman,
            Side::White,
            TimeControl::from_seconds(600, 5),
        ))
        .unwrap();

    play(&mut session, "e2e4");
    assert_eq!(session.remaining_time(Side::White), Duration::from_secs(605));

    // ten seconds pass on black's clock
    for _ in 0..10 {
        session.tick().unwrap();
    }
    assert_eq!(session.remaining_time(Side::Black), Duration::from_secs(590));
    assert_eq!(session.remaining_time(Side::White), Duration::from_secs(605));

    play(&mut session, "e7e5");
    assert_eq!(session.remaining_time(Side::Black), Duration::from_secs(595));
    // white's clock is running now, untouched so far
    assert_eq!(session.clock().running_for(), Some(Side::White));
    assert_eq!(session.remaining_time(Side::White), Duration::from_secs(605));
}

// =============================================================================
// Scenario B: undo before the engine reply arrives
// =============================================================================

#[test]
fn reply_after_undo_is_discarded_by_epoch() {
    let mut session = Session::new(MeleeRules::new());
    session
        .start(cfg(
            Mode::HumanVsEngine,
            Side::White,
            TimeControl::from_seconds(600, 5),
        ))
        .unwrap();

    play(&mut session, "e2e4");
    let request = session.take_request().unwrap();
    assert_eq!(request.epoch, 1);

    session.undo().unwrap();

    assert_eq!(
        session.deliver_suggestion(SuggestionReply {
            epoch: request.epoch,
            proposed: Some(proposed("e7e5")),
        }),
        Err(SessionError::StaleSuggestion)
    );
    assert!(session.committed().is_empty());
    assert_eq!(session.side_to_move(), Side::White);
    assert_eq!(session.phase(), Phase::Active);
}

#[test]
fn stale_reply_is_discarded_even_if_currently_legal() {
    let mut session = Session::new(MeleeRules::new());
    session
        .start(cfg(
            Mode::HumanVsEngine,
            Side::White,
            TimeControl::from_seconds(600, 5),
        ))
        .unwrap();

    play(&mut session, "e2e4");
    let stale = session.take_request().unwrap();
    session.undo().unwrap();
    session.redo().unwrap();
    let current = session.take_request().unwrap();
    assert_ne!(stale.epoch, current.epoch);

    // e7e5 is perfectly legal in the current position, but the epoch is old
    assert_eq!(
        session.deliver_suggestion(SuggestionReply {
            epoch: stale.epoch,
            proposed: Some(proposed("e7e5")),
        }),
        Err(SessionError::StaleSuggestion)
    );
    assert_eq!(session.committed().len(), 1);

    session
        .deliver_suggestion(SuggestionReply {
            epoch: current.epoch,
            proposed: Some(proposed("e7e5")),
        })
        .unwrap();
    assert_eq!(session.committed().len(), 2);
}

// =============================================================================
// Scenario C: queued move consumed after the engine reply
// =============================================================================

#[test]
fn queued_move_commits_when_turn_returns_to_human() {
    let mut session = Session::new(MeleeRules::new());
    // human plays Black, so the engine holds the first move
    session
        .start(cfg(
            Mode::HumanVsEngine,
            Side::Black,
            TimeControl::from_seconds(600, 5),
        ))
        .unwrap();
    let request = session.take_request().unwrap();

    // queue while the engine is thinking
    let (d7, d5) = coords("d7d5");
    session.queue(d7, d5).unwrap();

    session
        .deliver_suggestion(SuggestionReply {
            epoch: request.epoch,
            proposed: Some(proposed("e2e4")),
        })
        .unwrap();

    // the reply committed, then the queued move materialized on its heels
    let moves: Vec<String> = session.committed().iter().map(|r| r.coords()).collect();
    assert_eq!(moves, vec!["e2e4".to_string(), "d7d5".to_string()]);
    // consumed exactly once
    assert_eq!(session.queued(), None);
    // and the engine was asked about the new position
    assert!(session.engine_thinking());
    assert_eq!(session.take_request().unwrap().epoch, request.epoch + 1);
}

#[test]
fn stale_queued_move_clears_silently() {
    let mut session = Session::new(MeleeRules::new());
    session
        .start(cfg(
            Mode::HumanVsEngine,
            Side::Black,
            TimeControl::from_seconds(600, 5),
        ))
        .unwrap();
    let request = session.take_request().unwrap();

    // queue a move of the d7 pawn, then have the engine capture it
    let (d7, d5) = coords("d7d5");
    session.queue(d7, d5).unwrap();
    session
        .deliver_suggestion(SuggestionReply {
            epoch: request.epoch,
            proposed: Some(proposed("d2d7")),
        })
        .unwrap();

    // the queued move was no longer legal: slot cleared, timeline untouched
    assert_eq!(session.queued(), None);
    assert_eq!(session.committed().len(), 1);
    assert_eq!(session.side_to_move(), Side::Black);
}

// =============================================================================
// Scenario D: time forfeit freezes the session
// =============================================================================

#[test]
fn time_forfeit_ends_session_and_rejects_mutation() {
    let mut session = Session::new(MeleeRules::new());
    session
        .start(cfg(
            Mode::HumanVsEngine,
            Side::White,
            TimeControl::from_seconds(2, 0),
        ))
        .unwrap();

    play(&mut session, "e2e4");
    // black (the engine side) burns its two seconds
    assert_eq!(session.tick(), Ok(()));
    assert_eq!(session.tick(), Err(SessionError::ClockExhausted));

    assert_eq!(session.phase(), Phase::Ended);
    assert_eq!(
        session.result(),
        Some(ResultTag::TimeForfeit {
            winner: Side::White
        })
    );

    // the record is frozen: no queueing, no undo
    let (d7, d5) = coords("d7d5");
    assert_eq!(session.queue(d7, d5), Err(SessionError::InvalidTransition));
    assert_eq!(session.undo(), Err(SessionError::InvalidTransition));
    // review stays available
    session.go_to_view(-1).unwrap();
    assert_eq!(session.view_cursor(), -1);
}

// =============================================================================
// Undo/redo inverse law
// =============================================================================

#[test]
fn undo_then_redo_is_identity() {
    let mut session = Session::new(MeleeRules::new());
    session
        .start(cfg(
            Mode::HumanVsHuman,
            Side::White,
            TimeControl::from_seconds(600, 5),
        ))
        .unwrap();
    for mv in ["e2e4", "e7e5", "g1f3", "b8c6"] {
        play(&mut session, mv);
    }

    let rules = MeleeRules::new();
    let position_before = rules.encode(session.position());
    let log_before: Vec<String> = session.committed().iter().map(|r| r.coords()).collect();

    session.undo().unwrap();
    session.undo().unwrap();
    session.redo().unwrap();
    session.redo().unwrap();

    assert_eq!(rules.encode(session.position()), position_before);
    let log_after: Vec<String> = session.committed().iter().map(|r| r.coords()).collect();
    assert_eq!(log_after, log_before);
    assert_eq!(session.redo_len(), 0);
}

// =============================================================================
// Post-game review
// =============================================================================

#[test]
fn review_never_mutates_the_frozen_record() {
    let mut session = Session::new(MeleeRules::new());
    session
        .start(cfg(
            Mode::HumanVsHuman,
            Side::White,
            TimeControl::from_seconds(600, 5),
        ))
        .unwrap();
    for mv in ["e2e4", "e7e5", "g1f3"] {
        play(&mut session, mv);
    }

    // no free-roaming review during live play
    assert_eq!(session.go_to_view(0), Err(SessionError::InvalidTransition));

    session
        .end(ResultTag::Draw {
            reason: DrawReason::Agreement,
        })
        .unwrap();

    let rules = MeleeRules::new();
    let authoritative = rules.encode(session.position());
    let log: Vec<String> = session.committed().iter().map(|r| r.coords()).collect();

    session.go_to_view(0).unwrap();
    let view_at_0 = rules.encode(session.view_position());
    session.go_to_view(0).unwrap();
    assert_eq!(
        rules.encode(session.view_position()),
        view_at_0,
        "goToView is idempotent"
    );

    // cursor clamps at both ends
    session.go_to_view(100).unwrap();
    assert_eq!(session.view_cursor(), 2);
    session.go_to_view(-50).unwrap();
    assert_eq!(session.view_cursor(), -1);
    assert_eq!(
        rules.encode(session.view_position()),
        rules.encode(&rules.initial_position())
    );

    // stepping is goToView(cursor +/- 1)
    session.step_forward().unwrap();
    assert_eq!(session.view_cursor(), 0);
    session.step_backward().unwrap();
    assert_eq!(session.view_cursor(), -1);

    // nothing moved underneath
    assert_eq!(rules.encode(session.position()), authoritative);
    let log_after: Vec<String> = session.committed().iter().map(|r| r.coords()).collect();
    assert_eq!(log_after, log);
    assert_eq!(session.redo_len(), 0);
}

#[test]
fn export_reflects_review_sessions_unchanged() {
    let mut session = Session::new(MeleeRules::new());
    session
        .start(cfg(
            Mode::HumanVsHuman,
            Side::White,
            TimeControl::from_seconds(600, 5),
        ))
        .unwrap();
    play(&mut session, "e2e4");
    play(&mut session, "e7e5");
    session
        .end(ResultTag::Draw {
            reason: DrawReason::Agreement,
        })
        .unwrap();

    let before = session.move_log().to_json().unwrap();
    session.go_to_view(0).unwrap();
    session.step_backward().unwrap();
    let after = session.move_log().to_json().unwrap();
    assert_eq!(before, after, "review must not leak into the export");
}
