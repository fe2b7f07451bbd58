//! Shared fixtures for the `game` test suites.

use super::*;
use crate::problem::{Problem, ScriptedProblems};

pub(super) fn problem(start_floor: i32, target_floor: i32) -> Problem {
    Problem::new(start_floor, target_floor).unwrap()
}

/// Game whose first questions are exactly `problems`; later ones are seeded.
pub(super) fn scripted_game(
    config: SessionConfig,
    problems: impl IntoIterator<Item = Problem>,
) -> Game<ScriptedProblems> {
    let fallback = SeededProblems::new(99, config.generator());
    Game::with_source(99, config, ScriptedProblems::new(problems, fallback))
}

/// Starts a session and runs the entry delay so the controls are open.
pub(super) fn started<P: ProblemSource>(mut game: Game<P>) -> Game<P> {
    assert!(game.start_game().is_applied());
    assert_eq!(game.settle().stop_reason, AdvanceStopReason::AwaitingInput);
    game
}

pub(super) fn answer_with<P: ProblemSource>(game: &mut Game<P>, operator: Operator, operand: u8) {
    assert!(game.select_operator(operator).is_applied());
    assert!(game.select_number(operand).is_applied());
    assert!(game.submit().is_applied());
}

pub(super) fn answer_correctly<P: ProblemSource>(game: &mut Game<P>) {
    let (operator, operand) = game.session().problem.unwrap().solution();
    answer_with(game, operator, operand);
}

/// Same direction, different distance.
pub(super) fn answer_wrong<P: ProblemSource>(game: &mut Game<P>) {
    let (operator, operand) = game.session().problem.unwrap().solution();
    answer_with(game, operator, operand % MAX_OPERAND + 1);
}
