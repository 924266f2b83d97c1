use super::*;

#[test]
fn apply_then_retract_restores_position() {
    let rules = MeleeRules::new();
    let start = rules.initial_position();
    let (e2, e4) = coords("e2e4");

    let (next, rec) = rules.apply_move(&start, e2, e4, None).unwrap();
    assert_eq!(rec.ply, 0);
    assert_eq!(rec.side, Side::White);
    assert_eq!(rec.notation, "e2e4");
    assert_eq!(rules.side_to_move(&next), Side::Black);

    let back = rules.retract_last(&next).unwrap();
    assert_eq!(rules.encode(&back), rules.encode(&start));
    assert!(rules.retract_last(&start).is_none());
}

#[test]
fn own_piece_cannot_be_captured() {
    let rules = MeleeRules::new();
    let start = rules.initial_position();
    let (e2, _) = coords("e2e4");
    let (d1, _) = coords("d1d2");
    // queen onto its own pawn
    assert!(rules.apply_move(&start, d1, e2, None).is_none());
    // moving an enemy piece out of turn
    let (e7, e5) = coords("e7e5");
    assert!(rules.apply_move(&start, e7, e5, None).is_none());
}

#[test]
fn captures_are_recorded() {
    let rules = MeleeRules::new();
    let start = rules.initial_position();
    let (e2, e7) = (coords("e2e4").0, coords("e7e5").0);

    let (next, rec) = rules.apply_move(&start, e2, e7, None).unwrap();
    assert_eq!(rec.captured, Some(PieceKind::Pawn));
    assert_eq!(rec.notation, "e2xe7");
    assert_eq!(next.piece_at(e7), Some((Side::White, PieceKind::Pawn)));
}

#[test]
fn pawn_promotes_on_far_rank() {
    let rules = MeleeRules::new();
    let start = rules.initial_position();
    let (e2, e8) = coords("e2e8");

    // default promotion is queen
    let (_, rec) = rules.apply_move(&start, e2, e8, None).unwrap();
    assert_eq!(rec.promotion, Some(PieceKind::Queen));
    assert_eq!(rec.notation, "e2xe8=Q");

    let (next, rec) = rules
        .apply_move(&start, e2, e8, Some(PieceKind::Knight))
        .unwrap();
    assert_eq!(rec.promotion, Some(PieceKind::Knight));
    assert_eq!(next.piece_at(e8), Some((Side::White, PieceKind::Knight)));
}

#[test]
fn losing_the_king_is_checkmate() {
    let rules = MeleeRules::new();
    let start = rules.initial_position();
    let (d1, e8) = (coords("d1d2").0, coords("e8e7").0);

    let (next, _) = rules.apply_move(&start, d1, e8, None).unwrap();
    assert_eq!(rules.terminal(&next), Terminal::Checkmate);
    // no further moves once the game is over
    let (e7, e5) = coords("e7e5");
    assert!(rules.apply_move(&next, e7, e5, None).is_none());
    assert!(rules.legal_destinations(&next, e7).is_empty());
}

#[test]
fn draw_cap_declares_a_draw() {
    let rules = MeleeRules::drawn_after(2);
    let mut pos = rules.initial_position();
    for mv in ["e2e4", "e7e5"] {
        let (o, d) = coords(mv);
        pos = rules.apply_move(&pos, o, d, None).unwrap().0;
    }
    assert_eq!(rules.terminal(&pos), Terminal::Draw(DrawReason::Agreement));
}

#[test]
fn legal_destinations_flag_captures() {
    let rules = MeleeRules::new();
    let start = rules.initial_position();
    let (e2, _) = coords("e2e4");

    let dests = rules.legal_destinations(&start, e2);
    // 64 squares minus the origin minus 15 other friendly pieces
    assert_eq!(dests.len(), 48);
    let (_, e7) = (0, coords("e7e5").0);
    assert!(dests
        .iter()
        .any(|d| d.square == e7 && d.is_capture));
    // empty from squares we do not own
    assert!(rules.legal_destinations(&start, coords("e7e5").0).is_empty());
}

#[test]
fn scripted_suggester_replays_in_order() {
    let rules = MeleeRules::new();
    let pos = rules.initial_position();
    let mut engine = ScriptedSuggester::new([proposed("e2e4"), proposed("d2d4")]);

    assert_eq!(Suggester::<MeleeRules>::suggest(&mut engine, &rules, &pos, 10), Some(proposed("e2e4")));
    assert_eq!(Suggester::<MeleeRules>::suggest(&mut engine, &rules, &pos, 10), Some(proposed("d2d4")));
    assert_eq!(Suggester::<MeleeRules>::suggest(&mut engine, &rules, &pos, 10), None);
}
