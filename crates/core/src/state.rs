use serde::Serialize;

use crate::problem::{Difficulty, Problem};
use crate::types::{MAX_FLOOR, MIN_FLOOR, Operator, TOTAL_QUESTIONS};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Initial,
    /// Problem loaded; rider is walking in.
    Entering,
    AwaitingOperator,
    /// Operator chosen; number and submit still open.
    AwaitingNumber,
    /// Car moving to the answered floor.
    Transit,
    /// Rider reacting to the answer.
    Feedback,
    GameOver,
}

impl Phase {
    pub fn is_interactive(self) -> bool {
        matches!(self, Self::AwaitingOperator | Self::AwaitingNumber)
    }

    /// A timed transition is pending.
    pub fn is_timed(self) -> bool {
        matches!(self, Self::Entering | Self::Transit | Self::Feedback)
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Initial => 0,
            Self::Entering => 1,
            Self::AwaitingOperator => 2,
            Self::AwaitingNumber => 3,
            Self::Transit => 4,
            Self::Feedback => 5,
            Self::GameOver => 6,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct PlayerSelection {
    pub operator: Option<Operator>,
    pub operand: Option<u8>,
}

impl PlayerSelection {
    pub fn is_complete(&self) -> bool {
        self.operator.is_some() && self.operand.is_some()
    }
}

/// Outcome of the submitted answer for the current question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Verdict {
    /// Unclamped arithmetic result; may lie outside the shaft.
    pub result_floor: i32,
    pub correct: bool,
}

/// Authoritative state of one session, owned by [`crate::Game`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionState {
    pub phase: Phase,
    pub score: u32,
    /// 1-based; 0 before the first session starts.
    pub question_index: u8,
    pub difficulty: Difficulty,
    pub problem: Option<Problem>,
    pub selection: PlayerSelection,
    pub verdict: Option<Verdict>,
    pub last_answer_correct: Option<bool>,
    pub correct_answers: u8,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: Phase::Initial,
            score: 0,
            question_index: 0,
            difficulty: Difficulty::MIN,
            problem: None,
            selection: PlayerSelection::default(),
            verdict: None,
            last_answer_correct: None,
            correct_answers: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiderPosition {
    Hidden,
    Entering,
    Inside,
    Exiting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiderMood {
    Neutral,
    Happy,
    Confused,
}

/// Read-only projection handed to whatever renders the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub score: u32,
    pub question_index: u8,
    pub total_questions: u8,
    pub difficulty: Difficulty,
    pub problem: Option<Problem>,
    pub selection: PlayerSelection,
    pub last_answer_correct: Option<bool>,
    pub correct_answers: u8,
    /// Where to draw the car. Clamped to the shaft; never used for scoring.
    pub display_floor: Option<i32>,
    pub rider: RiderPosition,
    pub mood: RiderMood,
}

impl Snapshot {
    pub fn from_session(session: &SessionState) -> Self {
        let display_floor = session.problem.map(|problem| match session.verdict {
            Some(verdict) if matches!(session.phase, Phase::Transit | Phase::Feedback) => {
                verdict.result_floor.clamp(MIN_FLOOR, MAX_FLOOR)
            }
            _ => problem.start_floor(),
        });
        let correct_now = session.verdict.map(|verdict| verdict.correct);
        let rider = match session.phase {
            Phase::Initial | Phase::GameOver => RiderPosition::Hidden,
            Phase::Entering => RiderPosition::Entering,
            Phase::Feedback if correct_now == Some(true) => RiderPosition::Exiting,
            _ => RiderPosition::Inside,
        };
        let mood = match (session.phase, correct_now) {
            (Phase::Feedback, Some(true)) => RiderMood::Happy,
            (Phase::Feedback, Some(false)) => RiderMood::Confused,
            _ => RiderMood::Neutral,
        };

        Self {
            phase: session.phase,
            score: session.score,
            question_index: session.question_index,
            total_questions: TOTAL_QUESTIONS,
            difficulty: session.difficulty,
            problem: session.problem,
            selection: session.selection,
            last_answer_correct: session.last_answer_correct,
            correct_answers: session.correct_answers,
            display_floor,
            rider,
            mood,
        }
    }

    /// Equation line such as `3 + ? = 7`, once the problem is on screen.
    pub fn equation(&self) -> Option<String> {
        if matches!(self.phase, Phase::Initial | Phase::Entering | Phase::GameOver) {
            return None;
        }
        let problem = self.problem?;
        let operator = self.selection.operator.map_or('?', Operator::symbol);
        let operand = self.selection.operand.map_or_else(|| "?".to_string(), |n| n.to_string());
        Some(format!(
            "{} {operator} {operand} = {}",
            problem.start_floor(),
            problem.target_floor()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_in(phase: Phase) -> SessionState {
        SessionState {
            phase,
            question_index: 1,
            problem: Some(Problem::new(8, 10).unwrap()),
            ..SessionState::default()
        }
    }

    #[test]
    fn only_operator_and_number_phases_take_input() {
        let interactive: Vec<Phase> = [
            Phase::Initial,
            Phase::Entering,
            Phase::AwaitingOperator,
            Phase::AwaitingNumber,
            Phase::Transit,
            Phase::Feedback,
            Phase::GameOver,
        ]
        .into_iter()
        .filter(|phase| phase.is_interactive())
        .collect();
        assert_eq!(interactive, vec![Phase::AwaitingOperator, Phase::AwaitingNumber]);
    }

    #[test]
    fn display_floor_is_clamped_but_verdict_is_not() {
        let mut session = session_in(Phase::Transit);
        session.selection =
            PlayerSelection { operator: Some(Operator::Up), operand: Some(9) };
        session.verdict = Some(Verdict { result_floor: 17, correct: false });

        let snapshot = Snapshot::from_session(&session);
        assert_eq!(snapshot.display_floor, Some(MAX_FLOOR));
        assert_eq!(session.verdict.map(|v| v.result_floor), Some(17));
    }

    #[test]
    fn display_floor_starts_at_the_start_floor() {
        let snapshot = Snapshot::from_session(&session_in(Phase::AwaitingOperator));
        assert_eq!(snapshot.display_floor, Some(8));
        assert_eq!(snapshot.rider, RiderPosition::Inside);
        assert_eq!(snapshot.mood, RiderMood::Neutral);
    }

    #[test]
    fn feedback_sets_mood_and_rider_position() {
        let mut happy = session_in(Phase::Feedback);
        happy.verdict = Some(Verdict { result_floor: 10, correct: true });
        let snapshot = Snapshot::from_session(&happy);
        assert_eq!(snapshot.mood, RiderMood::Happy);
        assert_eq!(snapshot.rider, RiderPosition::Exiting);

        let mut confused = session_in(Phase::Feedback);
        confused.verdict = Some(Verdict { result_floor: 6, correct: false });
        let snapshot = Snapshot::from_session(&confused);
        assert_eq!(snapshot.mood, RiderMood::Confused);
        assert_eq!(snapshot.rider, RiderPosition::Inside);
    }

    #[test]
    fn equation_fills_in_selections() {
        let mut session = session_in(Phase::AwaitingOperator);
        assert_eq!(Snapshot::from_session(&session).equation().as_deref(), Some("8 ? ? = 10"));

        session.phase = Phase::AwaitingNumber;
        session.selection.operator = Some(Operator::Up);
        assert_eq!(Snapshot::from_session(&session).equation().as_deref(), Some("8 + ? = 10"));

        session.selection.operand = Some(2);
        assert_eq!(Snapshot::from_session(&session).equation().as_deref(), Some("8 + 2 = 10"));

        session.phase = Phase::Entering;
        assert_eq!(Snapshot::from_session(&session).equation(), None);
    }

    #[test]
    fn snapshot_serializes_for_renderers() {
        let json = serde_json::to_value(Snapshot::from_session(&session_in(Phase::Entering)))
            .unwrap();
        assert_eq!(json["phase"], "entering");
        assert_eq!(json["rider"], "entering");
        assert_eq!(json["difficulty"], 1);
        assert_eq!(json["problem"]["start_floor"], 8);
        assert_eq!(json["selection"]["operator"], serde_json::Value::Null);
    }
}
