//! Session tuning loaded from TOML.
//!
//! ```toml
//! ramp = "adaptive"      # or "paced"
//! on_miss = "hold"       # or "step_down"
//! near_zero_percent = 25
//! ```

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::problem::{Difficulty, ProblemGenerator};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read session config: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse session config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid session config: {0}")]
    Invalid(String),
}

/// How difficulty moves between questions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyRamp {
    /// Climb one step per correct answer; misses follow [`MissPolicy`].
    #[default]
    Adaptive,
    /// Two questions per step regardless of answers.
    Paced,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissPolicy {
    #[default]
    Hold,
    StepDown,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub ramp: DifficultyRamp,
    pub on_miss: MissPolicy,
    pub near_zero_percent: u8,
}

impl SessionConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.near_zero_percent > 100 {
            return Err(ConfigError::Invalid(format!(
                "near_zero_percent must be 0..=100, got {}",
                self.near_zero_percent
            )));
        }
        Ok(())
    }

    pub fn generator(&self) -> ProblemGenerator {
        ProblemGenerator::new(self.near_zero_percent)
    }

    /// Difficulty for `next_question` after answering at `current`.
    pub fn next_difficulty(
        &self,
        current: Difficulty,
        correct: bool,
        next_question: u8,
    ) -> Difficulty {
        match self.ramp {
            DifficultyRamp::Paced => Difficulty::for_question(next_question),
            DifficultyRamp::Adaptive if correct => current.step_up(),
            DifficultyRamp::Adaptive => match self.on_miss {
                MissPolicy::Hold => current,
                MissPolicy::StepDown => current.step_down(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn difficulty(value: u8) -> Difficulty {
        Difficulty::new(value).unwrap()
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = SessionConfig::from_toml_str("").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.ramp, DifficultyRamp::Adaptive);
        assert_eq!(config.on_miss, MissPolicy::Hold);
        assert_eq!(config.near_zero_percent, 0);
    }

    #[test]
    fn parses_every_field() {
        let config = SessionConfig::from_toml_str(
            "ramp = \"paced\"\non_miss = \"step_down\"\nnear_zero_percent = 30\n",
        )
        .unwrap();
        assert_eq!(config.ramp, DifficultyRamp::Paced);
        assert_eq!(config.on_miss, MissPolicy::StepDown);
        assert_eq!(config.generator().near_zero_percent(), 30);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_percentages() {
        assert!(matches!(
            SessionConfig::from_toml_str("speed = 3"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SessionConfig::from_toml_str("near_zero_percent = 101"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn adaptive_ramp_follows_the_miss_policy() {
        let hold = SessionConfig::default();
        assert_eq!(hold.next_difficulty(difficulty(4), true, 2), difficulty(5));
        assert_eq!(hold.next_difficulty(difficulty(4), false, 2), difficulty(4));
        assert_eq!(hold.next_difficulty(Difficulty::MAX, true, 2), Difficulty::MAX);

        let step_down = SessionConfig { on_miss: MissPolicy::StepDown, ..SessionConfig::default() };
        assert_eq!(step_down.next_difficulty(difficulty(4), false, 2), difficulty(3));
        assert_eq!(step_down.next_difficulty(Difficulty::MIN, false, 2), Difficulty::MIN);
    }

    #[test]
    fn paced_ramp_ignores_correctness() {
        let paced = SessionConfig { ramp: DifficultyRamp::Paced, ..SessionConfig::default() };
        assert_eq!(paced.next_difficulty(difficulty(9), true, 3), difficulty(2));
        assert_eq!(paced.next_difficulty(difficulty(1), false, 3), difficulty(2));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = SessionConfig::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
