use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::grid::{Cell, GridGeometry};
use crate::snake::Snake;

/// Raised when every grid cell is covered by the snake.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[error("no free cell left for the apple")]
pub struct NoFreeCell;

/// The single consumable target on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Apple {
    position: Cell,
}

impl Apple {
    /// Creates an apple at a fixed position.
    #[must_use]
    pub fn at(position: Cell) -> Self {
        Self { position }
    }

    /// Places a new apple on a cell not occupied by `snake`.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        grid: GridGeometry,
        snake: &Snake,
        max_attempts: u32,
    ) -> Result<Self, NoFreeCell> {
        let position = free_cell(rng, grid, snake, max_attempts)?;
        Ok(Self { position })
    }

    /// Moves the apple to a random cell outside the snake.
    ///
    /// Leaves the position untouched when no free cell exists.
    pub fn relocate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        grid: GridGeometry,
        snake: &Snake,
        max_attempts: u32,
    ) -> Result<(), NoFreeCell> {
        self.position = free_cell(rng, grid, snake, max_attempts)?;
        Ok(())
    }

    /// Returns true when the snake's head sits on the apple.
    #[must_use]
    pub fn consumed_by(self, head: Cell) -> bool {
        head == self.position
    }

    #[must_use]
    pub fn position(self) -> Cell {
        self.position
    }
}

/// Draws a uniformly random grid cell that `snake` does not occupy.
///
/// Rejection-samples up to `max_attempts` times, then scans the grid for the
/// remaining free cells and picks one of those.
pub fn free_cell<R: Rng + ?Sized>(
    rng: &mut R,
    grid: GridGeometry,
    snake: &Snake,
    max_attempts: u32,
) -> Result<Cell, NoFreeCell> {
    let (columns, rows) = (grid.columns(), grid.rows());
    if columns <= 0 || rows <= 0 {
        return Err(NoFreeCell);
    }

    for _ in 0..max_attempts {
        let candidate = Cell::new(rng.gen_range(0..columns), rng.gen_range(0..rows));
        if !snake.occupies(candidate) {
            return Ok(candidate);
        }
    }

    debug!(max_attempts, snake_len = snake.len(), "apple sampling exhausted, scanning free cells");

    let candidates: Vec<Cell> = grid.cells().filter(|cell| !snake.occupies(*cell)).collect();
    if candidates.is_empty() {
        return Err(NoFreeCell);
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates[index])
}
