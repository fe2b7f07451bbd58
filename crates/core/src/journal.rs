use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::types::Intent;

pub const JOURNAL_FORMAT_VERSION: u16 = 1;
pub const BUILD_ID: &str = env!("CARGO_PKG_VERSION");

/// Applied intents in order, enough to rebuild a game from its seed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub build_id: String,
    pub seed: u64,
    pub config: SessionConfig,
    pub inputs: Vec<InputRecord>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub seq: u64,
    /// Simulated time at which the intent was applied.
    pub at_ms: u64,
    pub intent: Intent,
}

impl InputJournal {
    pub fn new(seed: u64, config: SessionConfig) -> Self {
        Self {
            format_version: JOURNAL_FORMAT_VERSION,
            build_id: BUILD_ID.to_string(),
            seed,
            config,
            inputs: Vec::new(),
        }
    }

    pub fn record(&mut self, at_ms: u64, intent: Intent) {
        let seq = self.inputs.len() as u64;
        self.inputs.push(InputRecord { seq, at_ms, intent });
    }

    pub fn last(&self) -> Option<&InputRecord> {
        self.inputs.last()
    }
}
