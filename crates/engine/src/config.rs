use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// A tile at or above this value sets the `won` flag.
    pub win_value: u32,
    /// Chance a spawned tile is a 4 instead of a 2.
    pub four_probability: f64,
    /// Tiles spawned by `Game::new` and `Game::reset`.
    pub initial_tiles: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl GameConfig {
    pub fn classic() -> Self {
        Self {
            win_value: 2048,
            four_probability: 0.1,
            initial_tiles: 2,
        }
    }

    /// Never spawns 4s; handy for reproducing hand-worked positions.
    pub fn twos_only() -> Self {
        Self {
            four_probability: 0.0,
            ..Self::classic()
        }
    }

    pub fn with_win_value(mut self, win_value: u32) -> Self {
        self.win_value = win_value;
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.win_value < 4 || !self.win_value.is_power_of_two() {
            return Err(EngineError::InvalidConfig(format!(
                "win_value must be a power of two >= 4, got {}",
                self.win_value
            )));
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(EngineError::InvalidConfig(format!(
                "four_probability must be within [0, 1], got {}",
                self.four_probability
            )));
        }
        if self.initial_tiles > twenty48_core::Board::CELLS {
            return Err(EngineError::InvalidConfig(format!(
                "initial_tiles must be at most {}, got {}",
                twenty48_core::Board::CELLS,
                self.initial_tiles
            )));
        }
        Ok(())
    }
}
