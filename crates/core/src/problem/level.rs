//! Difficulty values and the sampling tiers they map to.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{MAX_FLOOR, MAX_OPERAND, MIN_FLOOR};

/// Start floors drawn when a level is biased toward sign-crossing problems.
pub const NEAR_ZERO_STARTS: RangeInclusive<i32> = -3..=3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("difficulty {0} is outside 1..=10")]
pub struct DifficultyOutOfRange(pub u8);

/// Player difficulty, always within `1..=10`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(10);

    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN.0 && value <= Self::MAX.0 { Some(Self(value)) } else { None }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn level(self) -> Level {
        match self.0 {
            0..=3 => Level::One,
            4..=6 => Level::Two,
            _ => Level::Three,
        }
    }

    pub fn step_up(self) -> Self {
        Self(self.0.saturating_add(1).min(Self::MAX.0))
    }

    pub fn step_down(self) -> Self {
        Self(self.0.saturating_sub(1).max(Self::MIN.0))
    }

    /// Question-paced ramp: two questions per step, starting at 1.
    pub fn for_question(question: u8) -> Self {
        Self((1 + question.saturating_sub(1) / 2).min(Self::MAX.0))
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN.0..=Self::MAX.0).map(Self)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = DifficultyOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(DifficultyOutOfRange(value))
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.0
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sampling tier derived from difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    /// Non-negative floors only.
    One,
    /// Targets may go below ground.
    Two,
    /// Starts anywhere in the shaft.
    Three,
}

impl Level {
    pub fn start_range(self) -> RangeInclusive<i32> {
        match self {
            Self::One => 0..=9,
            Self::Two => -9..=9,
            Self::Three => MIN_FLOOR..=MAX_FLOOR,
        }
    }

    pub fn allows_negative_target(self) -> bool {
        !matches!(self, Self::One)
    }

    pub fn allows_near_zero_bias(self) -> bool {
        !matches!(self, Self::One)
    }

    /// Acceptance test for one rejection-sampling draw.
    pub fn accepts(self, start: i32, target: i32) -> bool {
        let lowest_target = if self.allows_negative_target() { MIN_FLOOR } else { 0 };
        let distance = start.abs_diff(target);
        (MIN_FLOOR..=MAX_FLOOR).contains(&start)
            && (lowest_target..=MAX_FLOOR).contains(&target)
            && (1..=u32::from(MAX_OPERAND)).contains(&distance)
    }
}
