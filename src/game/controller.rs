use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::{
    action::{Command, Direction},
    config::GameConfig,
    engine::{GameOverReason, SnakeEngine, StepResult, TickOutcome},
    error::GameError,
    food::FoodPlacer,
    observer::GameObserver,
    state::{Cell, Segment},
};

/// Life-cycle of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    Idle,
    Running,
    Paused,
    Over,
}

/// Owns one game session: the engine, the score and the life-cycle state.
///
/// The controller has no timer. The host calls [`on_tick`](Self::on_tick)
/// every `tick_interval_ms` while the state is `Running`, and must not call
/// into the controller again before a call returns.
pub struct GameController {
    config: GameConfig,
    engine: SnakeEngine,
    state: GameState,
    score: u32,
    last_game_over: Option<GameOverReason>,
    observers: Vec<Box<dyn GameObserver>>,
}

impl GameController {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let engine = SnakeEngine::new(config.grid(), FoodPlacer::from_seed(config.seed))?;
        if engine.food().is_none() {
            warn!(cols = config.cols, rows = config.rows, "no free cell for food at spawn");
        }

        Ok(Self {
            config,
            engine,
            state: GameState::Idle,
            score: 0,
            last_game_over: None,
            observers: Vec::new(),
        })
    }

    /// Register an observer. It is immediately told about the current
    /// snake, food, score and state so it can build its own picture.
    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) {
        let mut observer: Box<dyn GameObserver> = Box::new(observer);
        for segment in self.engine.body().segments().rev() {
            observer.on_segment_added(segment);
        }
        observer.on_food_moved(self.engine.food());
        observer.on_score_changed(self.score);
        observer.on_state_changed(self.state);
        self.observers.push(observer);
    }

    fn notify(&mut self, mut f: impl FnMut(&mut dyn GameObserver)) {
        for observer in self.observers.iter_mut() {
            f(observer.as_mut());
        }
    }

    fn set_state(&mut self, state: GameState) {
        if self.state != state {
            debug!(from = ?self.state, to = ?state, "state change");
            self.state = state;
            self.notify(|o| o.on_state_changed(state));
        }
    }

    /// Idle or Paused to Running
    pub fn start(&mut self) {
        match self.state {
            GameState::Idle | GameState::Paused => {
                info!(score = self.score, "game running");
                self.set_state(GameState::Running);
            }
            GameState::Running => {}
            GameState::Over => debug!("start ignored, game is over"),
        }
    }

    /// Running to Paused
    pub fn pause(&mut self) {
        if self.state == GameState::Running {
            info!(score = self.score, "game paused");
            self.set_state(GameState::Paused);
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.state == GameState::Running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Forward a turn to the engine. Ignored once the game is over.
    pub fn direction_input(&mut self, direction: Direction) -> bool {
        if self.state == GameState::Over {
            return false;
        }
        self.engine.set_direction(direction)
    }

    /// Advance the game one step. Returns `None` when the game is not running.
    pub fn on_tick(&mut self) -> Result<Option<TickOutcome>, GameError> {
        if self.state != GameState::Running {
            debug!(state = ?self.state, "tick ignored");
            return Ok(None);
        }

        let result = match self.engine.tick() {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, steps = self.engine.steps(), "aborting session");
                self.end_game(GameOverReason::Aborted);
                return Err(e);
            }
        };

        let outcome = self.publish(result);
        if let TickOutcome::GameOver(reason) = outcome {
            self.end_game(reason);
            if self.config.restart_on_game_over {
                self.reset()?;
            }
        }

        Ok(Some(outcome))
    }

    fn publish(&mut self, result: StepResult) -> TickOutcome {
        let StepResult { outcome, info } = result;

        if let Some(added) = info.segment_added {
            self.notify(|o| o.on_segment_added(&added));
        }
        if let Some(removed) = info.segment_removed {
            self.notify(|o| o.on_segment_removed(&removed));
        }
        if let Some(food) = info.food_moved {
            self.notify(|o| o.on_food_moved(Some(food)));
        }
        if info.ate_food {
            self.record_food_eaten();
        }

        outcome
    }

    fn record_food_eaten(&mut self) {
        self.score += 1;
        let score = self.score;
        debug!(score, "food eaten");
        self.notify(|o| o.on_score_changed(score));
    }

    fn end_game(&mut self, reason: GameOverReason) {
        info!(%reason, score = self.score, steps = self.engine.steps(), "game over");
        self.last_game_over = Some(reason);
        self.state = GameState::Over;
        self.notify(|o| o.on_game_over(reason));
        self.notify(|o| o.on_state_changed(GameState::Over));
    }

    /// Throw away the snake and food, spawn new ones, zero the score and go
    /// back to Idle.
    pub fn reset(&mut self) -> Result<(), GameError> {
        let old: Vec<Segment> = self.engine.body().segments().rev().copied().collect();
        self.engine.respawn()?;

        for segment in &old {
            self.notify(|o| o.on_segment_removed(segment));
        }
        let new: Vec<Segment> = self.engine.body().segments().rev().copied().collect();
        for segment in &new {
            self.notify(|o| o.on_segment_added(segment));
        }

        let food = self.engine.food();
        if food.is_none() {
            warn!("no free cell for food after reset");
        }
        self.notify(|o| o.on_food_moved(food));

        self.score = 0;
        self.notify(|o| o.on_score_changed(0));

        info!("game reset");
        self.set_state(GameState::Idle);
        Ok(())
    }

    /// Put the food on a chosen free cell
    pub fn place_food_at(&mut self, cell: Cell) -> Result<(), GameError> {
        self.engine.place_food_at(cell)?;
        self.notify(|o| o.on_food_moved(Some(cell)));
        Ok(())
    }

    /// Apply one host command
    pub fn dispatch(&mut self, command: Command) -> Result<(), GameError> {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::TogglePause => self.toggle_pause(),
            Command::Reset => self.reset()?,
            Command::Turn(direction) => {
                self.direction_input(direction);
            }
            Command::Tick => {
                self.on_tick()?;
            }
        }
        Ok(())
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn engine(&self) -> &SnakeEngine {
        &self.engine
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.config.tick_interval_ms)
    }

    /// Reason the most recent game ended, kept across resets
    pub fn last_game_over(&self) -> Option<GameOverReason> {
        self.last_game_over
    }
}
