use serde::{Deserialize, Serialize};

use super::error::GameError;
use super::grid::Grid;
use super::state::MIN_SPAWN_LENGTH;

/// Configuration for the game, fixed once a controller is built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of columns of the game grid
    pub cols: usize,
    /// Number of rows of the game grid
    pub rows: usize,
    /// Time between two ticks, used by the host driver
    pub tick_interval_ms: u64,
    /// Reset to a fresh idle game right after a game over.
    /// When false the controller stays `Over` until `reset()` is called.
    pub restart_on_game_over: bool,
    /// Seed for food placement; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: 30,
            rows: 30,
            tick_interval_ms: 300,
            restart_on_game_over: true,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_tick_interval(mut self, tick_interval_ms: u64) -> Self {
        self.tick_interval_ms = tick_interval_ms;
        self
    }

    pub fn with_restart_on_game_over(mut self, restart: bool) -> Self {
        self.restart_on_game_over = restart;
        self
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.cols, self.rows)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.cols == 0 || self.rows == 0 {
            return Err(GameError::InvalidConfiguration(format!(
                "grid must be at least 1x1, got {}x{}",
                self.cols, self.rows
            )));
        }
        // Cells use i32 coordinates
        if i32::try_from(self.cols).is_err() || i32::try_from(self.rows).is_err() {
            return Err(GameError::InvalidConfiguration(format!(
                "grid dimensions must not exceed {}, got {}x{}",
                i32::MAX,
                self.cols,
                self.rows
            )));
        }
        if self.cols.checked_mul(self.rows).is_none() {
            return Err(GameError::InvalidConfiguration(format!(
                "grid {}x{} has too many cells",
                self.cols, self.rows
            )));
        }
        // The spawn layout runs along row 0
        if self.cols < MIN_SPAWN_LENGTH {
            return Err(GameError::InvalidConfiguration(format!(
                "grid needs at least {} columns for the spawn layout, got {}",
                MIN_SPAWN_LENGTH, self.cols
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(GameError::InvalidConfiguration(
                "tick interval must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
