use super::support::*;

const NOT_INTERACTIVE: IntentOutcome = IntentOutcome::Ignored(IgnoredReason::NotInteractive);

#[test]
fn nothing_happens_before_a_session_starts() {
    let mut game = Game::new(1, SessionConfig::default());
    let result = game.advance(10_000);
    assert_eq!(result, AdvanceResult { elapsed_ms: 0, stop_reason: AdvanceStopReason::Idle });
    assert_eq!(game.select_operator(Operator::Up), NOT_INTERACTIVE);
    assert_eq!(game.submit(), NOT_INTERACTIVE);
    assert_eq!(game.snapshot().equation(), None);
    assert_eq!(game.snapshot().rider, RiderPosition::Hidden);
}

#[test]
fn controls_unlock_after_the_entry_delay() {
    let mut game = scripted_game(SessionConfig::default(), [problem(3, 7)]);
    assert!(game.start_game().is_applied());
    assert_eq!(game.session().phase, Phase::Entering);
    assert_eq!(game.snapshot().rider, RiderPosition::Entering);
    assert_eq!(game.snapshot().equation(), None);

    let result = game.advance(ENTRY_DELAY_MS - 1);
    assert_eq!(result.stop_reason, AdvanceStopReason::BudgetExhausted);
    assert_eq!(game.session().phase, Phase::Entering);

    let result = game.advance(1);
    assert_eq!(
        result,
        AdvanceResult { elapsed_ms: 1, stop_reason: AdvanceStopReason::AwaitingInput }
    );
    assert_eq!(game.session().phase, Phase::AwaitingOperator);
    assert_eq!(game.current_time_ms(), ENTRY_DELAY_MS);
    assert_eq!(game.snapshot().equation().as_deref(), Some("3 ? ? = 7"));
}

#[test]
fn clock_stands_still_while_waiting_for_input() {
    let mut game = started(scripted_game(SessionConfig::default(), [problem(3, 7)]));
    let result = game.advance(60_000);
    assert_eq!(
        result,
        AdvanceResult { elapsed_ms: 0, stop_reason: AdvanceStopReason::AwaitingInput }
    );
    assert_eq!(game.current_time_ms(), ENTRY_DELAY_MS);
}

fn check_ignored<P: ProblemSource>(game: &mut Game<P>) {
    let hash = game.snapshot_hash();
    assert_eq!(game.select_operator(Operator::Up), NOT_INTERACTIVE);
    assert_eq!(game.select_number(4), NOT_INTERACTIVE);
    assert_eq!(game.submit(), NOT_INTERACTIVE);
    assert_eq!(game.snapshot_hash(), hash);
}

#[test]
fn inputs_during_timed_phases_are_ignored() {
    let mut game = scripted_game(SessionConfig::default(), [problem(3, 7)]);
    assert!(game.start_game().is_applied());

    check_ignored(&mut game);
    game.settle();
    answer_with(&mut game, Operator::Up, 4);
    assert_eq!(game.session().phase, Phase::Transit);
    check_ignored(&mut game);
    game.advance(TRANSIT_DELAY_MS);
    assert_eq!(game.session().phase, Phase::Feedback);
    check_ignored(&mut game);
}

#[test]
fn feedback_hands_over_to_the_next_question() {
    let problems = [problem(3, 7), problem(-4, 2)];
    let mut game = started(scripted_game(SessionConfig::default(), problems));
    answer_correctly(&mut game);

    game.advance(TRANSIT_DELAY_MS + FEEDBACK_DELAY_MS);
    assert_eq!(game.session().phase, Phase::Entering);
    assert_eq!(game.session().question_index, 2);
    assert_eq!(game.session().selection, PlayerSelection::default());
    assert_eq!(game.session().problem, Some(problem(-4, 2)));
    assert_eq!(game.snapshot().display_floor, Some(-4));

    assert_eq!(game.settle().stop_reason, AdvanceStopReason::AwaitingInput);
    assert_eq!(game.current_time_ms(), 2 * ENTRY_DELAY_MS + TRANSIT_DELAY_MS + FEEDBACK_DELAY_MS);
}

#[test]
fn ten_questions_end_the_session() {
    let mut game = started(Game::new(2024, SessionConfig::default()));
    for question in 1..=TOTAL_QUESTIONS {
        assert_eq!(game.session().question_index, question);
        answer_correctly(&mut game);
        game.settle();
    }

    assert_eq!(game.session().phase, Phase::GameOver);
    assert_eq!(game.settle().stop_reason, AdvanceStopReason::Finished { final_score: 100 });
    assert_eq!(game.session().correct_answers, TOTAL_QUESTIONS);
    assert_eq!(game.pending_timers(), 0);
    assert_eq!(game.snapshot().rider, RiderPosition::Hidden);
    assert_eq!(
        game.log().last(),
        Some(&LogEvent::SessionFinished { score: 100, correct_answers: TOTAL_QUESTIONS })
    );

    assert_eq!(game.select_number(3), NOT_INTERACTIVE);
    assert_eq!(game.submit(), NOT_INTERACTIVE);
}

#[test]
fn chunked_advancing_matches_settling_in_one_go() {
    let mut chunked = started(Game::new(8, SessionConfig::default()));
    let mut whole = started(Game::new(8, SessionConfig::default()));
    for _ in 0..3 {
        answer_correctly(&mut chunked);
        answer_correctly(&mut whole);
        while chunked.advance(100).stop_reason == AdvanceStopReason::BudgetExhausted {}
        whole.settle();
    }
    assert_eq!(chunked.snapshot_hash(), whole.snapshot_hash());
}
