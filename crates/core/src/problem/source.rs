//! Where the session gets its next problem from.

use std::collections::VecDeque;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use super::{Difficulty, Problem, ProblemGenerator, mix_seed_stream};

const PROBLEM_STREAM: u64 = 1;

pub trait ProblemSource {
    fn next_problem(&mut self, difficulty: Difficulty) -> Problem;
}

/// Generator driven by a ChaCha stream derived from the run seed.
#[derive(Clone, Debug)]
pub struct SeededProblems {
    rng: ChaCha8Rng,
    generator: ProblemGenerator,
}

impl SeededProblems {
    pub fn new(seed: u64, generator: ProblemGenerator) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(mix_seed_stream(seed, PROBLEM_STREAM)), generator }
    }
}

impl ProblemSource for SeededProblems {
    fn next_problem(&mut self, difficulty: Difficulty) -> Problem {
        self.generator.generate(difficulty, &mut self.rng)
    }
}

/// Hands out a fixed queue of problems, then defers to seeded generation.
/// Remembers every difficulty it was asked for.
#[derive(Clone, Debug)]
pub struct ScriptedProblems {
    queue: VecDeque<Problem>,
    fallback: SeededProblems,
    requests: Vec<Difficulty>,
}

impl ScriptedProblems {
    pub fn new(problems: impl IntoIterator<Item = Problem>, fallback: SeededProblems) -> Self {
        Self { queue: problems.into_iter().collect(), fallback, requests: Vec::new() }
    }

    pub fn requests(&self) -> &[Difficulty] {
        &self.requests
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl ProblemSource for ScriptedProblems {
    fn next_problem(&mut self, difficulty: Difficulty) -> Problem {
        self.requests.push(difficulty);
        match self.queue.pop_front() {
            Some(problem) => problem,
            None => self.fallback.next_problem(difficulty),
        }
    }
}
