//! Rebuilds a session from its seed, config and applied intents.

use thiserror::Error;

use crate::{
    game::Game,
    journal::InputJournal,
    state::Phase,
    types::{IgnoredReason, IntentOutcome},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReplayError {
    /// The session could not reach the recorded time, usually because it was
    /// waiting for input that the journal does not contain.
    #[error("record {seq} was applied at {expected} ms but replay reached {actual} ms")]
    ClockMismatch { seq: u64, expected: u64, actual: u64 },
    #[error("record {seq} was ignored during replay: {reason:?}")]
    RejectedInput { seq: u64, reason: IgnoredReason },
}

#[derive(Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_phase: Phase,
    pub final_score: u32,
    pub correct_answers: u8,
    pub final_time_ms: u64,
    pub final_snapshot_hash: u64,
}

/// Applies every record at its recorded time. Pending transitions are not
/// run past the last record.
pub fn replay_game(journal: &InputJournal) -> Result<Game, ReplayError> {
    let mut game = Game::new(journal.seed, journal.config.clone());

    for record in &journal.inputs {
        let now = game.current_time_ms();
        if record.at_ms > now {
            game.advance(record.at_ms - now);
        }
        let actual = game.current_time_ms();
        if actual != record.at_ms {
            return Err(ReplayError::ClockMismatch {
                seq: record.seq,
                expected: record.at_ms,
                actual,
            });
        }
        if let IntentOutcome::Ignored(reason) = game.apply(record.intent) {
            return Err(ReplayError::RejectedInput { seq: record.seq, reason });
        }
    }
    Ok(game)
}

/// Replays the journal and settles whatever was still pending.
pub fn replay_to_end(journal: &InputJournal) -> Result<ReplayResult, ReplayError> {
    let mut game = replay_game(journal)?;
    game.settle();

    let session = game.session();
    Ok(ReplayResult {
        final_phase: session.phase,
        final_score: session.score,
        correct_answers: session.correct_answers,
        final_time_ms: game.current_time_ms(),
        final_snapshot_hash: game.snapshot_hash(),
    })
}
