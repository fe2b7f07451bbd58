//! Distribution report for the problem generator at one difficulty.

use elevator_core::problem::Level;
use elevator_core::{Difficulty, ProblemGenerator};
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use serde::Serialize;

#[derive(Debug, Default, Serialize)]
pub struct SampleStats {
    pub difficulty: u8,
    pub level: u8,
    pub count: usize,
    pub crosses_zero: usize,
    pub negative_targets: usize,
    pub upward: usize,
    pub fallbacks: usize,
    pub total_attempts: u64,
    /// Index `d` counts problems whose answer is `d` floors.
    pub distances: [usize; 11],
}

pub fn sample(
    difficulty: Difficulty,
    count: usize,
    seed: u64,
    near_zero_percent: u8,
) -> SampleStats {
    let generator = ProblemGenerator::new(near_zero_percent);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let level = match difficulty.level() {
        Level::One => 1,
        Level::Two => 2,
        Level::Three => 3,
    };
    let mut stats =
        SampleStats { difficulty: difficulty.get(), level, count, ..SampleStats::default() };

    for _ in 0..count {
        let draw = generator.draw(difficulty, &mut rng);
        let problem = draw.problem;
        stats.crosses_zero += usize::from(problem.crosses_zero());
        stats.negative_targets += usize::from(problem.target_floor() < 0);
        stats.upward += usize::from(problem.target_floor() > problem.start_floor());
        stats.fallbacks += usize::from(draw.fell_back);
        stats.total_attempts += u64::from(draw.attempts);
        stats.distances[usize::from(problem.distance())] += 1;
    }
    stats
}

impl SampleStats {
    fn percent(&self, part: usize) -> f64 {
        if self.count == 0 { 0.0 } else { part as f64 * 100.0 / self.count as f64 }
    }

    pub fn report_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!(
                "difficulty {} (level {}), {} problems",
                self.difficulty, self.level, self.count
            ),
            format!("crosses zero:     {:6.2}%", self.percent(self.crosses_zero)),
            format!("negative target:  {:6.2}%", self.percent(self.negative_targets)),
            format!("going up:         {:6.2}%", self.percent(self.upward)),
            format!(
                "mean attempts:    {:6.2}",
                if self.count == 0 { 0.0 } else { self.total_attempts as f64 / self.count as f64 }
            ),
            format!("fallbacks:        {}", self.fallbacks),
        ];
        for (distance, &hits) in self.distances.iter().enumerate().skip(1) {
            lines.push(format!("  {distance:>2} floors: {:6.2}%", self.percent(hits)));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn difficulty(value: u8) -> Difficulty {
        Difficulty::new(value).unwrap()
    }

    #[test]
    fn level_one_never_goes_below_ground() {
        let stats = sample(difficulty(2), 2_000, 42, 0);
        assert_eq!(stats.level, 1);
        assert_eq!(stats.negative_targets, 0);
        assert_eq!(stats.crosses_zero, 0);
        assert_eq!(stats.fallbacks, 0);
        assert_eq!(stats.distances.iter().sum::<usize>(), 2_000);
        assert_eq!(stats.distances[0], 0);
    }

    #[test]
    fn higher_levels_reach_below_ground() {
        let stats = sample(difficulty(9), 2_000, 42, 0);
        assert_eq!(stats.level, 3);
        assert!(stats.negative_targets > 0);
        assert!(stats.crosses_zero > 0);
    }

    #[test]
    fn same_seed_gives_the_same_report() {
        let first = sample(difficulty(5), 500, 7, 30).report_lines();
        let second = sample(difficulty(5), 500, 7, 30).report_lines();
        assert_eq!(first, second);
        assert_eq!(first.len(), 16);
        assert!(first[0].starts_with("difficulty 5 (level 2)"));
    }

    #[test]
    fn empty_sample_reports_zeroes() {
        let stats = sample(difficulty(1), 0, 1, 0);
        assert!(stats.report_lines()[1].contains("0.00%"));
    }
}
