//! Simulated-time advancement and the timed half of the transition table.

use log::{debug, info, trace};

use super::*;
use crate::state::Phase;
use crate::timer::ScheduledEvent;

impl<P: ProblemSource> Game<P> {
    /// Fires due timers in order until the session needs input, ends, or
    /// `max_ms` of simulated time has passed. Time only moves while a timed
    /// transition is pending.
    pub fn advance(&mut self, max_ms: u64) -> AdvanceResult {
        let started_at = self.now_ms;
        let deadline = self.now_ms.saturating_add(max_ms);

        loop {
            if let Some(stop_reason) = self.settled_stop_reason() {
                return AdvanceResult { elapsed_ms: self.now_ms - started_at, stop_reason };
            }
            match self.scheduler.next_due_at() {
                Some(due_at) if due_at <= deadline => {
                    self.now_ms = self.now_ms.max(due_at);
                    if let Some(event) = self.scheduler.pop_due(self.now_ms) {
                        self.fire(event);
                    }
                }
                _ => {
                    self.now_ms = deadline;
                    return AdvanceResult {
                        elapsed_ms: self.now_ms - started_at,
                        stop_reason: AdvanceStopReason::BudgetExhausted,
                    };
                }
            }
        }
    }

    /// Runs every pending transition until input is needed or the session ends.
    pub fn settle(&mut self) -> AdvanceResult {
        self.advance(u64::MAX)
    }

    fn settled_stop_reason(&self) -> Option<AdvanceStopReason> {
        match self.session.phase {
            Phase::Initial => Some(AdvanceStopReason::Idle),
            Phase::GameOver => {
                Some(AdvanceStopReason::Finished { final_score: self.session.score })
            }
            Phase::AwaitingOperator | Phase::AwaitingNumber => {
                Some(AdvanceStopReason::AwaitingInput)
            }
            Phase::Entering | Phase::Transit | Phase::Feedback => None,
        }
    }

    fn fire(&mut self, event: ScheduledEvent) {
        if event.generation != self.generation {
            trace!("discarding {:?} from generation {}", event.kind, event.generation);
            self.log.push(LogEvent::StaleTimerDiscarded {
                kind: event.kind,
                generation: event.generation,
            });
            return;
        }
        match (event.kind, self.session.phase) {
            (TimerKind::EntryComplete, Phase::Entering) => {
                self.session.phase = Phase::AwaitingOperator;
            }
            (TimerKind::TransitComplete, Phase::Transit) => self.finish_transit(),
            (TimerKind::FeedbackComplete, Phase::Feedback) => self.finish_feedback(),
            (kind, phase) => debug!("timer {kind:?} does not apply during {phase:?}"),
        }
    }

    fn finish_transit(&mut self) {
        let correct = self.session.verdict.is_some_and(|verdict| verdict.correct);
        if correct {
            self.session.score += POINTS_PER_CORRECT;
            self.session.correct_answers += 1;
            self.log.push(LogEvent::PointsAwarded {
                points: POINTS_PER_CORRECT,
                score: self.session.score,
            });
        }
        self.session.last_answer_correct = Some(correct);
        self.session.phase = Phase::Feedback;
        self.schedule(TimerKind::FeedbackComplete);
    }

    fn finish_feedback(&mut self) {
        let correct = self.session.last_answer_correct.unwrap_or(false);
        let next_question = self.session.question_index.saturating_add(1);
        let current = self.session.difficulty;
        let next = self.config.next_difficulty(current, correct, next_question);
        if next != current {
            self.session.difficulty = next;
            self.log.push(LogEvent::DifficultyChanged { from: current, to: next });
        }

        if self.session.question_index < TOTAL_QUESTIONS {
            self.session.question_index = next_question;
            self.load_problem();
        } else {
            self.session.phase = Phase::GameOver;
            info!(
                "session {} finished with score {} ({}/{TOTAL_QUESTIONS} correct)",
                self.generation, self.session.score, self.session.correct_answers
            );
            self.log.push(LogEvent::SessionFinished {
                score: self.session.score,
                correct_answers: self.session.correct_answers,
            });
        }
    }
}
