use std::fmt;

use tracing::debug;

use super::{
    action::Direction,
    collision::{self, CollisionType},
    error::GameError,
    food::FoodPlacer,
    grid::Grid,
    state::{Body, Cell, Segment, Snake},
};

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOverReason {
    SelfCollision,
    WallCollision,
    /// The snake filled every cell, no room left for food
    BoardFull,
    /// The session hit an internal consistency error
    Aborted,
}

impl From<CollisionType> for GameOverReason {
    fn from(collision: CollisionType) -> Self {
        match collision {
            CollisionType::Wall => GameOverReason::WallCollision,
            CollisionType::SelfCollision => GameOverReason::SelfCollision,
        }
    }
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            GameOverReason::SelfCollision => "self-collision",
            GameOverReason::WallCollision => "wall-collision",
            GameOverReason::BoardFull => "board-full",
            GameOverReason::Aborted => "aborted",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The snake moved one cell
    Continued,
    /// The snake moved onto the food and grew
    Scored,
    GameOver(GameOverReason),
}

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// New head created by the move
    pub segment_added: Option<Segment>,
    /// Tail removed by a non-eating move
    pub segment_removed: Option<Segment>,
    /// Where food was re-placed after being eaten
    pub food_moved: Option<Cell>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    pub outcome: TickOutcome,
    pub info: StepInfo,
}

impl StepResult {
    fn collision(collision: CollisionType) -> Self {
        Self {
            outcome: TickOutcome::GameOver(collision.into()),
            info: StepInfo {
                collision_type: Some(collision),
                ..Default::default()
            },
        }
    }
}

/// One snake, one optional food, one grid. Advances the simulation a cell
/// at a time.
#[derive(Debug)]
pub struct SnakeEngine {
    grid: Grid,
    snake: Snake,
    food: Option<Cell>,
    placer: FoodPlacer,
    steps: u64,
}

impl SnakeEngine {
    /// Create an engine with the canonical spawn layout and fresh food
    pub fn new(grid: Grid, placer: FoodPlacer) -> Result<Self, GameError> {
        Self::with_snake(grid, Snake::canonical()?, placer)
    }

    /// Create an engine around a custom snake
    pub fn with_snake(grid: Grid, snake: Snake, placer: FoodPlacer) -> Result<Self, GameError> {
        if let Some(cell) = snake.body.cells().find(|&c| !grid.in_bounds(c)) {
            return Err(GameError::InvalidConfiguration(format!(
                "spawn cell {cell} lies outside the {}x{} grid",
                grid.cols(),
                grid.rows()
            )));
        }
        snake.body.check_invariants()?;

        let mut engine = Self {
            grid,
            snake,
            food: None,
            placer,
            steps: 0,
        };
        engine.food = engine.try_place_food()?;
        Ok(engine)
    }

    /// Replace snake and food with a brand new canonical pair. The food
    /// placer keeps its random stream.
    pub fn respawn(&mut self) -> Result<(), GameError> {
        self.snake = Snake::canonical()?;
        self.steps = 0;
        self.food = self.try_place_food()?;
        Ok(())
    }

    fn try_place_food(&mut self) -> Result<Option<Cell>, GameError> {
        match self.placer.place(&self.grid, &self.snake.body) {
            Ok(cell) => Ok(Some(cell)),
            Err(GameError::BoardFull) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Turn the snake for the next tick. A 180-degree turn is refused and
    /// returns false.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.snake.direction.is_opposite(direction) {
            debug!(?direction, current = ?self.snake.direction, "reverse turn rejected");
            return false;
        }
        if self.snake.direction != direction {
            debug!(?direction, "direction changed");
            self.snake.direction = direction;
        }
        true
    }

    /// Put food on a specific free cell
    pub fn place_food_at(&mut self, cell: Cell) -> Result<(), GameError> {
        if !self.grid.in_bounds(cell) || self.snake.body.occupies(cell) {
            return Err(GameError::InvalidConfiguration(format!(
                "food cannot go on {cell}"
            )));
        }
        self.food = Some(cell);
        Ok(())
    }

    /// Execute one step of the game.
    ///
    /// Collisions are judged on the board as it stands before the move, so
    /// the cell the tail is about to leave still blocks. On a collision
    /// nothing is mutated.
    pub fn tick(&mut self) -> Result<StepResult, GameError> {
        let head = self
            .snake
            .head()
            .ok_or_else(|| GameError::InvariantViolation("snake has no head".to_string()))?;
        let next = head.moved_in_direction(self.snake.direction);
        self.steps += 1;

        if let Some(collision) = collision::detect(next, &self.snake.body, &self.grid) {
            debug!(%next, %collision, "collision");
            return Ok(StepResult::collision(collision));
        }

        let ate_food = self.food == Some(next);
        let added = self.snake.body.grow_head(next);
        let mut info = StepInfo {
            ate_food,
            segment_added: Some(added),
            ..Default::default()
        };

        let outcome = if ate_food {
            match self.placer.place(&self.grid, &self.snake.body) {
                Ok(cell) => {
                    self.food = Some(cell);
                    info.food_moved = Some(cell);
                    TickOutcome::Scored
                }
                Err(GameError::BoardFull) => {
                    self.food = None;
                    TickOutcome::GameOver(GameOverReason::BoardFull)
                }
                Err(e) => return Err(e),
            }
        } else {
            info.segment_removed = Some(self.snake.body.shrink_tail()?);
            TickOutcome::Continued
        };

        self.snake.body.check_invariants()?;
        debug!(head = %next, len = self.snake.len(), ?outcome, "tick");

        Ok(StepResult { outcome, info })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn body(&self) -> &Body {
        &self.snake.body
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    /// Ticks processed since the last spawn
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::SegmentRole;

    fn engine(cols: usize, rows: usize) -> SnakeEngine {
        SnakeEngine::new(Grid::new(cols, rows), FoodPlacer::seeded(5)).unwrap()
    }

    fn engine_with(cells: &[(i32, i32)], direction: Direction, grid: Grid) -> SnakeEngine {
        let cells: Vec<Cell> = cells.iter().map(|&(x, y)| Cell::new(x, y)).collect();
        let snake = Snake::new(Body::spawn(&cells).unwrap(), direction);
        SnakeEngine::with_snake(grid, snake, FoodPlacer::seeded(5)).unwrap()
    }

    /// Move food somewhere that will not be reached in the test
    fn park_food(engine: &mut SnakeEngine, cell: (i32, i32)) {
        engine.place_food_at(Cell::new(cell.0, cell.1)).unwrap();
    }

    #[test]
    fn test_new_engine() {
        let engine = engine(10, 10);
        assert_eq!(engine.body().len(), 3);
        assert_eq!(engine.snake().head(), Some(Cell::new(2, 0)));
        assert_eq!(engine.direction(), Direction::Right);

        let food = engine.food().unwrap();
        assert!(!engine.body().occupies(food));
        assert_eq!(engine.steps(), 0);
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine(10, 10);
        park_food(&mut engine, (9, 9));

        let result = engine.tick().unwrap();

        assert_eq!(result.outcome, TickOutcome::Continued);
        assert_eq!(engine.snake().head(), Some(Cell::new(3, 0)));
        assert_eq!(engine.body().len(), 3);
        assert!(!engine.body().occupies(Cell::new(0, 0)));
        assert_eq!(
            result.info.segment_added,
            Some(Segment::head(Cell::new(3, 0)))
        );
        assert_eq!(
            result.info.segment_removed,
            Some(Segment::body(Cell::new(0, 0)))
        );
        assert_eq!(result.info.food_moved, None);
        assert_eq!(engine.steps(), 1);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine(10, 10);
        park_food(&mut engine, (3, 0));

        let result = engine.tick().unwrap();

        assert_eq!(result.outcome, TickOutcome::Scored);
        assert!(result.info.ate_food);
        assert_eq!(result.info.segment_removed, None);
        assert_eq!(engine.body().len(), 4);
        assert!(engine.body().occupies(Cell::new(0, 0)));

        let food = engine.food().unwrap();
        assert_eq!(result.info.food_moved, Some(food));
        assert!(!engine.body().occupies(food));
    }

    #[test]
    fn test_wall_collision_leaves_body_unchanged() {
        let mut engine = engine_with(
            &[(9, 0), (8, 0), (7, 0)],
            Direction::Right,
            Grid::new(10, 10),
        );
        park_food(&mut engine, (5, 5));
        let before = engine.body().clone();

        let result = engine.tick().unwrap();

        assert_eq!(
            result.outcome,
            TickOutcome::GameOver(GameOverReason::WallCollision)
        );
        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
        assert_eq!(engine.body(), &before);
    }

    #[test]
    fn test_self_collision() {
        // Head (5,5) with body looping round above it:
        // (5,5) (5,4) (6,4) (6,5) (6,6) (5,6); heading down runs into (5,6)
        let mut engine = engine_with(
            &[(5, 5), (5, 4), (6, 4), (6, 5), (6, 6), (5, 6)],
            Direction::Left,
            Grid::new(10, 10),
        );
        park_food(&mut engine, (0, 9));
        assert!(engine.set_direction(Direction::Down));

        let result = engine.tick().unwrap();

        assert_eq!(
            result.outcome,
            TickOutcome::GameOver(GameOverReason::SelfCollision)
        );
        assert_eq!(engine.body().len(), 6);
    }

    #[test]
    fn test_tail_cell_blocks_move() {
        // A 2x2 loop: head (0,1) is next to its own tail (0,0)
        let mut engine = engine_with(
            &[(0, 1), (1, 1), (1, 0), (0, 0)],
            Direction::Left,
            Grid::new(5, 5),
        );
        park_food(&mut engine, (4, 4));
        assert!(engine.set_direction(Direction::Up));

        let result = engine.tick().unwrap();
        assert_eq!(
            result.outcome,
            TickOutcome::GameOver(GameOverReason::SelfCollision)
        );
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = engine(10, 10);
        park_food(&mut engine, (9, 9));

        assert!(!engine.set_direction(Direction::Left));
        assert_eq!(engine.direction(), Direction::Right);

        engine.tick().unwrap();
        assert_eq!(engine.snake().head(), Some(Cell::new(3, 0)));
    }

    #[test]
    fn test_turns() {
        let mut engine = engine(10, 10);
        park_food(&mut engine, (9, 9));

        assert!(engine.set_direction(Direction::Right));
        assert_eq!(engine.direction(), Direction::Right);

        assert!(engine.set_direction(Direction::Down));
        engine.tick().unwrap();
        assert_eq!(engine.snake().head(), Some(Cell::new(2, 1)));

        let roles: Vec<SegmentRole> = engine.body().segments().map(|s| s.role).collect();
        assert_eq!(roles, vec![SegmentRole::Head, SegmentRole::Body, SegmentRole::Body]);
    }

    #[test]
    fn test_board_full_ends_game() {
        // 4x1 board: the snake fills three cells, food sits on the last one
        let mut engine = engine(4, 1);
        assert_eq!(engine.food(), Some(Cell::new(3, 0)));

        let result = engine.tick().unwrap();

        assert_eq!(
            result.outcome,
            TickOutcome::GameOver(GameOverReason::BoardFull)
        );
        assert!(result.info.ate_food);
        assert_eq!(engine.body().len(), 4);
        assert_eq!(engine.food(), None);
    }

    #[test]
    fn test_no_room_for_food_at_spawn() {
        let engine = engine(3, 1);
        assert_eq!(engine.food(), None);
    }

    #[test]
    fn test_spawn_outside_grid_is_rejected() {
        let cells = [Cell::new(5, 0), Cell::new(4, 0), Cell::new(3, 0)];
        let snake = Snake::new(Body::spawn(&cells).unwrap(), Direction::Right);
        let err =
            SnakeEngine::with_snake(Grid::new(4, 4), snake, FoodPlacer::seeded(1)).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_place_food_rejects_occupied_cell() {
        let mut engine = engine(10, 10);
        assert!(engine.place_food_at(Cell::new(1, 0)).is_err());
        assert!(engine.place_food_at(Cell::new(10, 0)).is_err());
    }

    #[test]
    fn test_respawn() {
        let mut engine = engine(10, 10);
        engine.set_direction(Direction::Down);
        engine.tick().unwrap();

        engine.respawn().unwrap();

        assert_eq!(engine.snake(), &Snake::canonical().unwrap());
        assert_eq!(engine.steps(), 0);
        assert!(engine.food().is_some());
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(GameOverReason::SelfCollision.to_string(), "self-collision");
        assert_eq!(GameOverReason::WallCollision.to_string(), "wall-collision");
        assert_eq!(GameOverReason::BoardFull.to_string(), "board-full");
    }
}
