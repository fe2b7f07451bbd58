use serde::{Deserialize, Serialize};

use crate::problem::{Difficulty, Problem};

/// Lowest floor the shaft can show.
pub const MIN_FLOOR: i32 = -10;
/// Highest floor the shaft can show.
pub const MAX_FLOOR: i32 = 10;
pub const TOTAL_QUESTIONS: u8 = 10;
pub const POINTS_PER_CORRECT: u32 = 10;
pub const MIN_OPERAND: u8 = 1;
pub const MAX_OPERAND: u8 = 10;

/// Rider walks into the car before the controls unlock.
pub const ENTRY_DELAY_MS: u64 = 1000;
/// Car travels to the answered floor.
pub const TRANSIT_DELAY_MS: u64 = 1500;
/// Rider reacts before the next question loads.
pub const FEEDBACK_DELAY_MS: u64 = 1500;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Up,
    #[serde(rename = "-")]
    Down,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Self::Up => '+',
            Self::Down => '-',
        }
    }

    /// Unclamped arithmetic result of riding `operand` floors from `floor`.
    pub fn apply(self, floor: i32, operand: u8) -> i32 {
        match self {
            Self::Up => floor + i32::from(operand),
            Self::Down => floor - i32::from(operand),
        }
    }
}

/// Everything the presentation layer can ask of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    StartGame,
    SelectOperator(Operator),
    SelectNumber(u8),
    Submit,
}

#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntentOutcome {
    Applied,
    Ignored(IgnoredReason),
}

impl IntentOutcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoredReason {
    /// No question is waiting for player input.
    NotInteractive,
    OperandOutOfRange,
    /// Submit needs both an operator and an operand.
    SelectionIncomplete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    EntryComplete,
    TransitComplete,
    FeedbackComplete,
}

impl TimerKind {
    pub fn delay_ms(self) -> u64 {
        match self {
            Self::EntryComplete => ENTRY_DELAY_MS,
            Self::TransitComplete => TRANSIT_DELAY_MS,
            Self::FeedbackComplete => FEEDBACK_DELAY_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdvanceStopReason {
    /// A question is waiting for operator/number/submit.
    AwaitingInput,
    Finished { final_score: u32 },
    /// No session has been started.
    Idle,
    BudgetExhausted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdvanceResult {
    pub elapsed_ms: u64,
    pub stop_reason: AdvanceStopReason,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    SessionStarted { generation: u64, cancelled_timers: usize },
    ProblemLoaded { question: u8, difficulty: Difficulty, problem: Problem },
    AnswerSubmitted { operator: Operator, operand: u8, result_floor: i32, correct: bool },
    PointsAwarded { points: u32, score: u32 },
    DifficultyChanged { from: Difficulty, to: Difficulty },
    SessionFinished { score: u32, correct_answers: u8 },
    StaleTimerDiscarded { kind: TimerKind, generation: u64 },
}
