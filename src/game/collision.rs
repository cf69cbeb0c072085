//! Collision predicates, evaluated against the board as it is before a move.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::state::{Body, Cell};

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

impl fmt::Display for CollisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionType::Wall => f.write_str("wall-collision"),
            CollisionType::SelfCollision => f.write_str("self-collision"),
        }
    }
}

/// True if `next` is occupied by the body, the tail included even when the
/// coming move would vacate it.
pub fn hits_self(next: Cell, body: &Body) -> bool {
    body.occupies(next)
}

pub fn hits_wall(next: Cell, grid: &Grid) -> bool {
    !grid.in_bounds(next)
}

/// Self-collision is checked before the wall
pub fn detect(next: Cell, body: &Body, grid: &Grid) -> Option<CollisionType> {
    if hits_self(next, body) {
        Some(CollisionType::SelfCollision)
    } else if hits_wall(next, grid) {
        Some(CollisionType::Wall)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> Body {
        // Bent snake: head (1,1), then (1,0), tail (0,0)
        Body::spawn(&[Cell::new(1, 1), Cell::new(1, 0), Cell::new(0, 0)]).unwrap()
    }

    #[test]
    fn test_tail_cell_blocks() {
        assert!(hits_self(Cell::new(0, 0), &body()));
    }

    #[test]
    fn test_free_cell_does_not_hit() {
        let grid = Grid::new(5, 5);
        assert!(!hits_self(Cell::new(0, 1), &body()));
        assert_eq!(detect(Cell::new(0, 1), &body(), &grid), None);
    }

    #[test]
    fn test_wall() {
        let grid = Grid::new(5, 5);
        assert!(hits_wall(Cell::new(5, 0), &grid));
        assert!(hits_wall(Cell::new(0, -1), &grid));
        assert_eq!(
            detect(Cell::new(-1, 0), &body(), &grid),
            Some(CollisionType::Wall)
        );
    }

    #[test]
    fn test_detect_self() {
        let grid = Grid::new(5, 5);
        assert_eq!(
            detect(Cell::new(1, 0), &body(), &grid),
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_reason_strings() {
        assert_eq!(CollisionType::Wall.to_string(), "wall-collision");
        assert_eq!(CollisionType::SelfCollision.to_string(), "self-collision");
    }
}
