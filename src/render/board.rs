use std::collections::VecDeque;

use crate::game::{Cell, GameObserver, GameOverReason, GameState, Segment};

/// What the screen shows, rebuilt from observer callbacks only
#[derive(Debug, Clone)]
pub struct BoardView {
    pub cols: usize,
    pub rows: usize,
    /// Head first
    pub snake: VecDeque<Cell>,
    pub food: Option<Cell>,
    pub score: u32,
    pub state: GameState,
    pub last_game_over: Option<GameOverReason>,
}

impl BoardView {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            snake: VecDeque::new(),
            food: None,
            score: 0,
            state: GameState::Idle,
            last_game_over: None,
        }
    }

    pub fn head(&self) -> Option<Cell> {
        self.snake.front().copied()
    }

    pub fn is_snake(&self, cell: Cell) -> bool {
        self.snake.contains(&cell)
    }
}

impl GameObserver for BoardView {
    fn on_segment_added(&mut self, segment: &Segment) {
        self.snake.push_front(segment.cell);
    }

    fn on_segment_removed(&mut self, segment: &Segment) {
        if self.snake.back() == Some(&segment.cell) {
            self.snake.pop_back();
        } else if let Some(i) = self.snake.iter().position(|&c| c == segment.cell) {
            self.snake.remove(i);
        }
    }

    fn on_food_moved(&mut self, food: Option<Cell>) {
        self.food = food;
    }

    fn on_score_changed(&mut self, score: u32) {
        self.score = score;
    }

    fn on_game_over(&mut self, reason: GameOverReason) {
        self.last_game_over = Some(reason);
    }

    fn on_state_changed(&mut self, state: GameState) {
        self.state = state;
    }
}
