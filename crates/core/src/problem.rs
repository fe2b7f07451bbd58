//! Elevator problems and the rejection sampler that produces them.

mod dice;
mod level;
mod source;

use log::warn;
use serde::Serialize;
use thiserror::Error;

use crate::types::{MAX_FLOOR, MAX_OPERAND, MIN_FLOOR, Operator};

pub use dice::{Dice, mix_seed_stream};
pub use level::{Difficulty, DifficultyOutOfRange, Level, NEAR_ZERO_STARTS};
pub use source::{ProblemSource, ScriptedProblems, SeededProblems};

/// Draws tried before the generator gives up and falls back.
pub const MAX_ATTEMPTS: u32 = 200;
/// Largest climb used by the fallback problem.
pub const FALLBACK_MAX_OFFSET: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProblemError {
    #[error("start and target are both floor {0}")]
    SameFloor(i32),
    #[error("floor {0} is outside the shaft (-10..=10)")]
    FloorOutOfRange(i32),
    #[error("floors {start} and {target} are more than 10 apart")]
    TooFar { start: i32, target: i32 },
}

/// One question: ride from `start_floor` to `target_floor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Problem {
    start_floor: i32,
    target_floor: i32,
}

impl Problem {
    pub fn new(start_floor: i32, target_floor: i32) -> Result<Self, ProblemError> {
        for floor in [start_floor, target_floor] {
            if !(MIN_FLOOR..=MAX_FLOOR).contains(&floor) {
                return Err(ProblemError::FloorOutOfRange(floor));
            }
        }
        if start_floor == target_floor {
            return Err(ProblemError::SameFloor(start_floor));
        }
        if start_floor.abs_diff(target_floor) > u32::from(MAX_OPERAND) {
            return Err(ProblemError::TooFar { start: start_floor, target: target_floor });
        }
        Ok(Self { start_floor, target_floor })
    }

    pub fn start_floor(self) -> i32 {
        self.start_floor
    }

    pub fn target_floor(self) -> i32 {
        self.target_floor
    }

    pub fn distance(self) -> u8 {
        self.start_floor.abs_diff(self.target_floor) as u8
    }

    /// The only operator/operand pair that answers this problem.
    pub fn solution(self) -> (Operator, u8) {
        let operator =
            if self.target_floor > self.start_floor { Operator::Up } else { Operator::Down };
        (operator, self.distance())
    }

    pub fn is_solved_by(self, operator: Operator, operand: u8) -> bool {
        operator.apply(self.start_floor, operand) == self.target_floor
    }

    /// Start and target sit on opposite sides of the ground floor.
    pub fn crosses_zero(self) -> bool {
        self.start_floor.signum() * self.target_floor.signum() < 0
    }
}

/// A generated problem plus how hard the sampler had to work for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Draw {
    pub problem: Problem,
    pub attempts: u32,
    pub fell_back: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProblemGenerator {
    near_zero_percent: u8,
}

impl ProblemGenerator {
    /// `near_zero_percent` is the chance (0..=100) that a level 2 or 3 start
    /// floor comes from [`NEAR_ZERO_STARTS`] instead of the level's range.
    pub fn new(near_zero_percent: u8) -> Self {
        Self { near_zero_percent: near_zero_percent.min(100) }
    }

    pub fn near_zero_percent(self) -> u8 {
        self.near_zero_percent
    }

    pub fn generate<D: Dice + ?Sized>(self, difficulty: Difficulty, dice: &mut D) -> Problem {
        self.draw(difficulty, dice).problem
    }

    pub fn draw<D: Dice + ?Sized>(self, difficulty: Difficulty, dice: &mut D) -> Draw {
        let level = difficulty.level();
        for attempt in 1..=MAX_ATTEMPTS {
            let start = self.draw_start(level, dice);
            let difference = dice.roll(1, i32::from(MAX_OPERAND));
            let target = if dice.roll(0, 1) == 1 { start + difference } else { start - difference };
            if level.accepts(start, target)
                && let Ok(problem) = Problem::new(start, target)
            {
                return Draw { problem, attempts: attempt, fell_back: false };
            }
        }

        let offset = dice.roll(1, FALLBACK_MAX_OFFSET).clamp(1, FALLBACK_MAX_OFFSET);
        let problem = fallback_problem(0, offset);
        warn!(
            "problem generator exhausted {MAX_ATTEMPTS} attempts at difficulty {difficulty}; \
             falling back to {problem:?}"
        );
        Draw { problem, attempts: MAX_ATTEMPTS, fell_back: true }
    }

    fn draw_start<D: Dice + ?Sized>(self, level: Level, dice: &mut D) -> i32 {
        let range = if level.allows_near_zero_bias() && dice.chance(self.near_zero_percent) {
            NEAR_ZERO_STARTS
        } else {
            level.start_range()
        };
        dice.roll(*range.start(), *range.end())
    }
}

/// Trivially valid problem: climb `offset` floors from `start`, clamped into
/// the shaft and nudged off `start` if the clamp lands on it.
fn fallback_problem(start: i32, offset: i32) -> Problem {
    let start = start.clamp(MIN_FLOOR, MAX_FLOOR);
    let offset = offset.clamp(-i32::from(MAX_OPERAND), i32::from(MAX_OPERAND));
    let mut target = (start + offset).clamp(MIN_FLOOR, MAX_FLOOR);
    if target == start {
        target = if start < MAX_FLOOR { start + 1 } else { start - 1 };
    }
    Problem { start_floor: start, target_floor: target }
}
