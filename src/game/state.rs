use std::collections::{HashSet, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::error::GameError;

/// Minimum number of cells a snake spawns with
pub const MIN_SPAWN_LENGTH: usize = 3;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// True if the two cells share an edge
    pub fn is_adjacent(&self, other: Cell) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Whether a segment leads the snake or follows it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentRole {
    Head,
    Body,
}

/// One occupied cell of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub cell: Cell,
    pub role: SegmentRole,
}

impl Segment {
    pub fn head(cell: Cell) -> Self {
        Self {
            cell,
            role: SegmentRole::Head,
        }
    }

    pub fn body(cell: Cell) -> Self {
        Self {
            cell,
            role: SegmentRole::Body,
        }
    }
}

/// Ordered chain of segments, head at the front and tail at the back.
///
/// Neighbours in the deque are neighbours on the board, so the deque order
/// replaces explicit prev/next links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    segments: VecDeque<Segment>,
}

impl Body {
    /// Build a chain head-to-tail from the given cells.
    ///
    /// The cells must be at least [`MIN_SPAWN_LENGTH`] long, pairwise
    /// distinct and each one orthogonally adjacent to the next.
    pub fn spawn(cells: &[Cell]) -> Result<Self, GameError> {
        if cells.len() < MIN_SPAWN_LENGTH {
            return Err(GameError::InvalidConfiguration(format!(
                "snake needs at least {} cells, got {}",
                MIN_SPAWN_LENGTH,
                cells.len()
            )));
        }

        let mut seen = HashSet::with_capacity(cells.len());
        for &cell in cells {
            if !seen.insert(cell) {
                return Err(GameError::InvalidConfiguration(format!(
                    "spawn cell {cell} is used twice"
                )));
            }
        }

        for pair in cells.windows(2) {
            if !pair[0].is_adjacent(pair[1]) {
                return Err(GameError::InvalidConfiguration(format!(
                    "spawn cells {} and {} are not contiguous",
                    pair[0], pair[1]
                )));
            }
        }

        let segments = cells
            .iter()
            .enumerate()
            .map(|(i, &cell)| if i == 0 { Segment::head(cell) } else { Segment::body(cell) })
            .collect();

        Ok(Self { segments })
    }

    /// True if any segment, head included, sits on `cell`
    pub fn occupies(&self, cell: Cell) -> bool {
        self.segments.iter().any(|s| s.cell == cell)
    }

    /// Prepend a new head at `cell`; the old head becomes a body segment.
    pub fn grow_head(&mut self, cell: Cell) -> Segment {
        if let Some(old_head) = self.segments.front_mut() {
            old_head.role = SegmentRole::Body;
        }
        let head = Segment::head(cell);
        self.segments.push_front(head);
        head
    }

    /// Remove the tail segment and return it.
    pub fn shrink_tail(&mut self) -> Result<Segment, GameError> {
        if self.segments.len() <= 1 {
            return Err(GameError::InvariantViolation(
                "cannot shrink a snake of length 1".to_string(),
            ));
        }
        self.segments
            .pop_back()
            .ok_or_else(|| GameError::InvariantViolation("snake body is empty".to_string()))
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the snake is empty (never true for a spawned body)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn head(&self) -> Option<&Segment> {
        self.segments.front()
    }

    pub fn tail(&self) -> Option<&Segment> {
        self.segments.back()
    }

    /// Segments from head to tail
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Segment> + ExactSizeIterator {
        self.segments.iter()
    }

    /// Cells from head to tail
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.segments.iter().map(|s| s.cell)
    }

    /// Verify the chain is a single simple path: unique cells, contiguous
    /// neighbours, exactly one head at the front.
    pub fn check_invariants(&self) -> Result<(), GameError> {
        let Some(head) = self.segments.front() else {
            return Err(GameError::InvariantViolation("snake body is empty".to_string()));
        };
        if head.role != SegmentRole::Head {
            return Err(GameError::InvariantViolation(format!(
                "front segment at {} is not tagged as head",
                head.cell
            )));
        }
        if let Some(s) = self.segments.iter().skip(1).find(|s| s.role == SegmentRole::Head) {
            return Err(GameError::InvariantViolation(format!(
                "second head segment at {}",
                s.cell
            )));
        }

        let mut seen = HashSet::with_capacity(self.segments.len());
        for s in &self.segments {
            if !seen.insert(s.cell) {
                return Err(GameError::InvariantViolation(format!(
                    "two segments share cell {}",
                    s.cell
                )));
            }
        }

        for (a, b) in self.segments.iter().zip(self.segments.iter().skip(1)) {
            if !a.cell.is_adjacent(b.cell) {
                return Err(GameError::InvariantViolation(format!(
                    "segments {} and {} are not linked",
                    a.cell, b.cell
                )));
            }
        }

        Ok(())
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    pub body: Body,
    /// Direction applied on the next tick
    pub direction: Direction,
}

impl Snake {
    pub fn new(body: Body, direction: Direction) -> Self {
        Self { body, direction }
    }

    /// The canonical layout: three cells on row 0, head rightmost, facing right.
    pub fn canonical() -> Result<Self, GameError> {
        let body = Body::spawn(&[Cell::new(2, 0), Cell::new(1, 0), Cell::new(0, 0)])?;
        Ok(Self::new(body, Direction::Right))
    }

    /// Get the head cell
    pub fn head(&self) -> Option<Cell> {
        self.body.head().map(|s| s.cell)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(i32, i32)]) -> Vec<Cell> {
        cells.iter().map(|&(x, y)| Cell::new(x, y)).collect()
    }

    #[test]
    fn test_cell_movement() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.moved_by(1, 0), Cell::new(6, 5));
        assert_eq!(cell.moved_in_direction(Direction::Up), Cell::new(5, 4));
        assert_eq!(cell.moved_in_direction(Direction::Left), Cell::new(4, 5));
    }

    #[test]
    fn test_spawn() {
        let body = Body::spawn(&row(&[(2, 0), (1, 0), (0, 0)])).unwrap();
        assert_eq!(body.len(), 3);
        assert_eq!(body.head(), Some(&Segment::head(Cell::new(2, 0))));
        assert_eq!(body.tail(), Some(&Segment::body(Cell::new(0, 0))));
        assert!(body.check_invariants().is_ok());
    }

    #[test]
    fn test_spawn_rejects_short_chain() {
        let err = Body::spawn(&row(&[(1, 0), (0, 0)])).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_spawn_rejects_duplicates() {
        let err = Body::spawn(&row(&[(1, 0), (0, 0), (1, 0)])).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_spawn_rejects_gaps_and_diagonals() {
        assert!(Body::spawn(&row(&[(3, 0), (1, 0), (0, 0)])).is_err());
        assert!(Body::spawn(&row(&[(2, 1), (1, 0), (0, 0)])).is_err());
    }

    #[test]
    fn test_spawn_allows_bent_layout() {
        let body = Body::spawn(&row(&[(1, 1), (1, 0), (0, 0)])).unwrap();
        assert_eq!(body.len(), 3);
    }

    #[test]
    fn test_occupies_includes_head_and_tail() {
        let body = Body::spawn(&row(&[(2, 0), (1, 0), (0, 0)])).unwrap();
        assert!(body.occupies(Cell::new(2, 0)));
        assert!(body.occupies(Cell::new(1, 0)));
        assert!(body.occupies(Cell::new(0, 0)));
        assert!(!body.occupies(Cell::new(3, 0)));
    }

    #[test]
    fn test_grow_then_shrink_keeps_length() {
        let mut body = Body::spawn(&row(&[(2, 0), (1, 0), (0, 0)])).unwrap();

        let head = body.grow_head(Cell::new(3, 0));
        assert_eq!(head, Segment::head(Cell::new(3, 0)));
        assert_eq!(body.len(), 4);

        let removed = body.shrink_tail().unwrap();
        assert_eq!(removed.cell, Cell::new(0, 0));
        assert_eq!(body.len(), 3);

        let roles: Vec<SegmentRole> = body.segments().map(|s| s.role).collect();
        assert_eq!(roles, vec![SegmentRole::Head, SegmentRole::Body, SegmentRole::Body]);
        assert!(body.check_invariants().is_ok());
    }

    #[test]
    fn test_shrink_to_zero_is_invariant_violation() {
        let mut body = Body::spawn(&row(&[(2, 0), (1, 0), (0, 0)])).unwrap();
        body.shrink_tail().unwrap();
        body.shrink_tail().unwrap();
        assert_eq!(body.len(), 1);

        let err = body.shrink_tail().unwrap_err();
        assert!(matches!(err, GameError::InvariantViolation(_)));
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn test_check_invariants_detects_broken_chain() {
        let mut body = Body::spawn(&row(&[(2, 0), (1, 0), (0, 0)])).unwrap();
        body.grow_head(Cell::new(5, 5));
        assert!(matches!(
            body.check_invariants(),
            Err(GameError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_canonical_snake() {
        let snake = Snake::canonical().unwrap();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Some(Cell::new(2, 0)));
        assert_eq!(snake.direction, Direction::Right);
    }
}
