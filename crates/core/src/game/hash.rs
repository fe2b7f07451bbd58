//! Stable snapshot hashing for replay verification.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl<P: ProblemSource> Game<P> {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.now_ms);
        hasher.write_u64(self.generation);
        hasher.write_u64(self.journal.inputs.len() as u64);

        let session = &self.session;
        hasher.write_u8(session.phase.code());
        hasher.write_u32(session.score);
        hasher.write_u8(session.question_index);
        hasher.write_u8(session.difficulty.get());
        hasher.write_u8(session.correct_answers);
        if let Some(problem) = session.problem {
            hasher.write_i32(problem.start_floor());
            hasher.write_i32(problem.target_floor());
        }
        hasher.write_u8(match session.selection.operator {
            None => 0,
            Some(Operator::Up) => 1,
            Some(Operator::Down) => 2,
        });
        hasher.write_u8(session.selection.operand.unwrap_or(0));
        if let Some(verdict) = session.verdict {
            hasher.write_i32(verdict.result_floor);
            hasher.write_u8(u8::from(verdict.correct));
        }
        hasher.write_u8(match session.last_answer_correct {
            None => 0,
            Some(false) => 1,
            Some(true) => 2,
        });

        for event in self.scheduler.iter() {
            hasher.write_u64(event.due_at_ms);
            hasher.write_u64(event.generation);
            hasher.write_u8(event.kind as u8);
        }
        hasher.finish()
    }
}
