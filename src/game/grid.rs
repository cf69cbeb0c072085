use super::state::Cell;

/// Fixed-size board the snake lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
}

impl Grid {
    /// Board of `cols` by `rows` cells; see `GameConfig::validate` for limits
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    /// Width in cells
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Height in cells
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cells, saturating at `usize::MAX`
    pub fn cell_count(&self) -> usize {
        self.cols.saturating_mul(self.rows)
    }

    /// Check if a cell is within the grid bounds
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && (cell.x as usize) < self.cols && cell.y >= 0 && (cell.y as usize) < self.rows
    }

    /// All cells of the board in row-major order. Rows and columns past
    /// `i32::MAX` cannot be addressed and are skipped.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows)
            .map_while(|y| i32::try_from(y).ok())
            .flat_map(move |y| {
                (0..self.cols)
                    .map_while(|x| i32::try_from(x).ok())
                    .map(move |x| Cell::new(x, y))
            })
    }
}
