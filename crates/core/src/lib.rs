pub mod config;
pub mod game;
pub mod journal;
pub mod journal_file;
pub mod problem;
pub mod replay;
pub mod state;
pub mod timer;
pub mod types;

pub use config::{ConfigError, DifficultyRamp, MissPolicy, SessionConfig};
pub use game::Game;
pub use journal::{InputJournal, InputRecord};
pub use journal_file::{JournalLoadError, JournalWriter, LoadedJournal, load_journal_from_file};
pub use problem::{Difficulty, Problem, ProblemGenerator, ProblemSource};
pub use replay::*;
pub use state::{Phase, PlayerSelection, RiderMood, RiderPosition, SessionState, Snapshot, Verdict};
pub use types::*;
