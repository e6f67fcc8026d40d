//! Game configuration
//!
//! Board size and piece set are fixed; only the draw thresholds can be tuned.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SetupError;

/// Default turn limit before a draw is declared
pub const DEFAULT_MAX_TURNS: u32 = 100;

/// Default number of consecutive half-moves without a capture before a draw
pub const DEFAULT_QUIET_MOVE_LIMIT: u32 = 10;

/// Draw thresholds for a game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Game is drawn once the turn number reaches this value
    pub max_turns: u32,
    /// Game is drawn after this many consecutive half-moves without a capture
    pub quiet_move_limit: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
            quiet_move_limit: DEFAULT_QUIET_MOVE_LIMIT,
        }
    }
}

impl GameConfig {
    /// Set the turn limit
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Set the no-capture draw threshold
    pub fn with_quiet_move_limit(mut self, limit: u32) -> Self {
        self.quiet_move_limit = limit;
        self
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let config: GameConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Both limits must be positive
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.max_turns == 0 {
            return Err(SetupError::ZeroLimit("max_turns"));
        }
        if self.quiet_move_limit == 0 {
            return Err(SetupError::ZeroLimit("quiet_move_limit"));
        }
        Ok(())
    }
}
