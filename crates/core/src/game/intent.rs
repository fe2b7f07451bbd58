//! Player intents: the only way presentation code mutates a session.
//! Intents that are illegal in the current phase are ignored and leave the
//! session untouched.

use log::{debug, info};

use super::*;
use crate::problem::Difficulty;
use crate::state::{Phase, PlayerSelection, Verdict};

impl<P: ProblemSource> Game<P> {
    pub fn apply(&mut self, intent: Intent) -> IntentOutcome {
        let outcome = match intent {
            Intent::StartGame => self.begin_session(),
            Intent::SelectOperator(operator) => self.choose_operator(operator),
            Intent::SelectNumber(operand) => self.choose_operand(operand),
            Intent::Submit => self.submit_answer(),
        };
        match outcome {
            IntentOutcome::Applied => self.journal.record(self.now_ms, intent),
            IntentOutcome::Ignored(reason) => {
                debug!("ignored {intent:?} during {:?}: {reason:?}", self.session.phase);
            }
        }
        outcome
    }

    pub fn start_game(&mut self) -> IntentOutcome {
        self.apply(Intent::StartGame)
    }

    pub fn select_operator(&mut self, operator: Operator) -> IntentOutcome {
        self.apply(Intent::SelectOperator(operator))
    }

    pub fn select_number(&mut self, operand: u8) -> IntentOutcome {
        self.apply(Intent::SelectNumber(operand))
    }

    pub fn submit(&mut self) -> IntentOutcome {
        self.apply(Intent::Submit)
    }

    /// Legal in every phase. Anything still scheduled for the previous
    /// session is cancelled and its generation retired.
    fn begin_session(&mut self) -> IntentOutcome {
        let cancelled_timers = self.scheduler.cancel_all(self.generation);
        self.generation += 1;
        self.session = SessionState {
            question_index: 1,
            difficulty: Difficulty::MIN,
            ..SessionState::default()
        };
        info!("session {} started (cancelled {cancelled_timers} timers)", self.generation);
        self.log.push(LogEvent::SessionStarted { generation: self.generation, cancelled_timers });
        self.load_problem();
        IntentOutcome::Applied
    }

    fn choose_operator(&mut self, operator: Operator) -> IntentOutcome {
        if !self.session.phase.is_interactive() {
            return IntentOutcome::Ignored(IgnoredReason::NotInteractive);
        }
        self.session.selection.operator = Some(operator);
        self.session.phase = Phase::AwaitingNumber;
        IntentOutcome::Applied
    }

    /// Accepted before an operator is chosen; completeness is checked on submit.
    fn choose_operand(&mut self, operand: u8) -> IntentOutcome {
        if !self.session.phase.is_interactive() {
            return IntentOutcome::Ignored(IgnoredReason::NotInteractive);
        }
        if !(MIN_OPERAND..=MAX_OPERAND).contains(&operand) {
            return IntentOutcome::Ignored(IgnoredReason::OperandOutOfRange);
        }
        self.session.selection.operand = Some(operand);
        IntentOutcome::Applied
    }

    fn submit_answer(&mut self) -> IntentOutcome {
        let Some(problem) = self.session.problem.filter(|_| self.session.phase.is_interactive())
        else {
            return IntentOutcome::Ignored(IgnoredReason::NotInteractive);
        };
        let PlayerSelection { operator: Some(operator), operand: Some(operand) } =
            self.session.selection
        else {
            return IntentOutcome::Ignored(IgnoredReason::SelectionIncomplete);
        };

        let result_floor = operator.apply(problem.start_floor(), operand);
        let correct = result_floor == problem.target_floor();
        self.session.verdict = Some(Verdict { result_floor, correct });
        self.session.phase = Phase::Transit;
        debug!(
            "question {}: {operator:?} {operand} -> {result_floor} ({correct})",
            self.session.question_index
        );
        self.log.push(LogEvent::AnswerSubmitted { operator, operand, result_floor, correct });
        self.schedule(TimerKind::TransitComplete);
        IntentOutcome::Applied
    }

    /// Fresh problem at the current difficulty, selections cleared.
    pub(super) fn load_problem(&mut self) {
        let problem = self.problems.next_problem(self.session.difficulty);
        self.session.problem = Some(problem);
        self.session.selection = PlayerSelection::default();
        self.session.verdict = None;
        self.session.phase = Phase::Entering;
        self.log.push(LogEvent::ProblemLoaded {
            question: self.session.question_index,
            difficulty: self.session.difficulty,
            problem,
        });
        self.schedule(TimerKind::EntryComplete);
    }

    pub(super) fn schedule(&mut self, kind: TimerKind) {
        self.scheduler.schedule_after(self.now_ms, kind.delay_ms(), kind, self.generation);
    }
}
