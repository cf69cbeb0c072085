use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};

use super::error::GameError;
use super::grid::Grid;
use super::state::{Body, Cell};

/// Below this share of free cells (in percent) food is drawn from an explicit
/// list of free cells instead of by rejection sampling.
const SAMPLING_FREE_PERCENT: usize = 10;

/// Rejection sampling gives up after this many misses and falls back to the
/// free-cell list.
const MAX_SAMPLING_ATTEMPTS: usize = 64;

/// Picks a uniformly random free cell for food
#[derive(Debug, Clone)]
pub struct FoodPlacer {
    rng: StdRng,
}

impl FoodPlacer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic placer, two placers with the same seed pick the same cells
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(),
        }
    }

    /// Pick a cell inside `grid` that `body` does not occupy.
    pub fn place(&mut self, grid: &Grid, body: &Body) -> Result<Cell, GameError> {
        let total = grid.cell_count();
        let free = total.saturating_sub(body.len());
        if free == 0 {
            return Err(GameError::BoardFull);
        }

        if uses_sampling(total, free) {
            if let Some(cell) = self.sample(grid, body)? {
                return Ok(cell);
            }
        }
        self.pick_free(grid, body)
    }

    /// Rejection sampling over the whole board, `None` if every attempt hit the snake
    fn sample(&mut self, grid: &Grid, body: &Body) -> Result<Option<Cell>, GameError> {
        for _ in 0..MAX_SAMPLING_ATTEMPTS {
            let x = coordinate(self.rng.gen_range(0..grid.cols()))?;
            let y = coordinate(self.rng.gen_range(0..grid.rows()))?;
            let cell = Cell::new(x, y);
            if !body.occupies(cell) {
                return Ok(Some(cell));
            }
        }
        Ok(None)
    }

    /// Uniform choice among the enumerated free cells
    fn pick_free(&mut self, grid: &Grid, body: &Body) -> Result<Cell, GameError> {
        grid.cells()
            .filter(|&cell| !body.occupies(cell))
            .choose(&mut self.rng)
            .ok_or(GameError::BoardFull)
    }
}

fn uses_sampling(total: usize, free: usize) -> bool {
    free as u128 * 100 >= total as u128 * SAMPLING_FREE_PERCENT as u128
}

fn coordinate(value: usize) -> Result<i32, GameError> {
    i32::try_from(value).map_err(|_| {
        GameError::InvariantViolation(format!("coordinate {value} does not fit the board"))
    })
}

impl Default for FoodPlacer {
    fn default() -> Self {
        Self::new()
    }
}
