//! Simulation parameters
//!
//! Defaults match a standard constructed game: 20 life each, a 7-card opening
//! hand, 7-card maximum hand size and the simulated player on the play.

use crate::{GoldfishError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters shared by every game in a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Life total of the simulated player
    pub starting_life: i32,

    /// Life total the opponent starts at
    pub opponent_life: i32,

    /// Cards drawn before the first turn
    pub opening_hand: usize,

    /// Cards kept at the end of each turn
    pub max_hand_size: usize,

    /// Whether the simulated player is on the play (skips the first draw)
    pub play_first: bool,

    /// Upper bound on the number of turns a look-ahead continuation simulates
    pub lookahead_limit: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            starting_life: 20,
            opponent_life: 20,
            opening_hand: 7,
            max_hand_size: 7,
            play_first: true,
            lookahead_limit: 30,
        }
    }
}

impl SimulationConfig {
    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the config against a deck of `deck_size` cards
    pub fn validate(&self, deck_size: usize) -> Result<()> {
        if self.opponent_life <= 0 {
            return Err(GoldfishError::InvalidConfig(format!(
                "opponent life must be positive, got {}",
                self.opponent_life
            )));
        }
        if self.opening_hand > deck_size {
            return Err(GoldfishError::InvalidConfig(format!(
                "opening hand of {} is larger than the {deck_size}-card deck",
                self.opening_hand
            )));
        }
        if self.max_hand_size == 0 {
            return Err(GoldfishError::InvalidConfig("max hand size must be at least 1".to_string()));
        }
        if self.lookahead_limit == 0 {
            return Err(GoldfishError::InvalidConfig("lookahead limit must be at least 1".to_string()));
        }
        Ok(())
    }
}
