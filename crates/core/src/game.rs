//! The session state machine.
//!
//! `Game` owns the session, the simulated clock and the timer queue.
//! Presentation code feeds it [`Intent`]s through [`Game::apply`] and moves
//! simulated time with [`Game::advance`]; it reads state back through
//! [`Game::snapshot`].

use crate::config::SessionConfig;
use crate::journal::InputJournal;
use crate::problem::{ProblemSource, SeededProblems};
use crate::state::{SessionState, Snapshot};
use crate::timer::Scheduler;
use crate::types::*;

mod advance;
mod hash;
mod intent;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

pub struct Game<P: ProblemSource = SeededProblems> {
    seed: u64,
    config: SessionConfig,
    problems: P,
    now_ms: u64,
    /// Bumped on every start; timers tagged with an older value are stale.
    generation: u64,
    scheduler: Scheduler,
    session: SessionState,
    log: Vec<LogEvent>,
    journal: InputJournal,
}

impl Game {
    pub fn new(seed: u64, config: SessionConfig) -> Self {
        let problems = SeededProblems::new(seed, config.generator());
        Self::with_source(seed, config, problems)
    }
}

impl<P: ProblemSource> Game<P> {
    pub fn with_source(seed: u64, config: SessionConfig, problems: P) -> Self {
        Self {
            seed,
            journal: InputJournal::new(seed, config.clone()),
            config,
            problems,
            now_ms: 0,
            generation: 0,
            scheduler: Scheduler::new(),
            session: SessionState::default(),
            log: Vec::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_session(&self.session)
    }

    pub fn current_time_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    /// Every intent that was applied, stamped with the simulated time.
    pub fn journal(&self) -> &InputJournal {
        &self.journal
    }

    pub fn problems(&self) -> &P {
        &self.problems
    }
}
