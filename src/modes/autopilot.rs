//! Headless mode: a greedy bot plays through the controller, no terminal UI.
//!
//! Useful for smoke-testing the engine and for watching the log output.

use anyhow::{Context, Result};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

use crate::game::{
    Cell, Command, Direction, GameConfig, GameController, GameOverReason, GameState, SnakeEngine,
    TickOutcome,
};
use crate::metrics::SessionStats;

/// Totals after an autopilot run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutopilotSummary {
    pub ticks: u64,
    pub games_played: u32,
    pub high_score: u32,
    pub wall_collisions: u32,
    pub self_collisions: u32,
    pub boards_filled: u32,
}

pub struct AutopilotMode {
    controller: GameController,
    stats: Rc<RefCell<SessionStats>>,
}

impl AutopilotMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let stats = Rc::new(RefCell::new(SessionStats::new()));
        let mut controller = GameController::new(config).context("Failed to create game")?;
        controller.subscribe(stats.clone());
        Ok(Self { controller, stats })
    }

    /// Play for `max_ticks` ticks, restarting after every game over
    pub fn run(&mut self, max_ticks: u64) -> Result<AutopilotSummary> {
        info!(max_ticks, "autopilot started");

        for _ in 0..max_ticks {
            match self.controller.state() {
                GameState::Over => {
                    self.controller.dispatch(Command::Reset)?;
                    self.controller.dispatch(Command::Start)?;
                }
                GameState::Idle | GameState::Paused => self.controller.dispatch(Command::Start)?,
                GameState::Running => {}
            }

            if let Some(direction) = choose_direction(self.controller.engine()) {
                self.controller.dispatch(Command::Turn(direction))?;
            }

            let outcome = self.controller.on_tick().context("Session aborted")?;
            if let Some(TickOutcome::Scored) = outcome {
                debug!(score = self.controller.score(), "autopilot scored");
            }
        }

        let summary = self.summary(max_ticks);
        info!(?summary, "autopilot finished");
        Ok(summary)
    }

    fn summary(&self, ticks: u64) -> AutopilotSummary {
        let stats = self.stats.borrow();
        AutopilotSummary {
            ticks,
            games_played: stats.games_played,
            high_score: stats.high_score,
            wall_collisions: stats.game_overs_by(GameOverReason::WallCollision),
            self_collisions: stats.game_overs_by(GameOverReason::SelfCollision),
            boards_filled: stats.game_overs_by(GameOverReason::BoardFull),
        }
    }
}

fn manhattan_distance(a: Cell, b: Cell) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Pick the safe direction that gets closest to the food. Returns `None`
/// when every move collides, leaving the current heading alone.
pub fn choose_direction(engine: &SnakeEngine) -> Option<Direction> {
    let head = engine.snake().head()?;
    let current = engine.direction();

    let mut best: Option<(i32, Direction)> = None;
    for direction in Direction::ALL {
        if current.is_opposite(direction) {
            continue;
        }

        let next = head.moved_in_direction(direction);
        if !engine.grid().in_bounds(next) || engine.body().occupies(next) {
            continue;
        }

        // Count free neighbours to steer away from dead ends
        let exits = Direction::ALL
            .iter()
            .map(|&d| next.moved_in_direction(d))
            .filter(|&c| engine.grid().in_bounds(c) && !engine.body().occupies(c))
            .count() as i32;

        let mut score = exits * 3;
        if let Some(food) = engine.food() {
            score -= manhattan_distance(next, food) * 10;
        }
        // Prefer going straight on ties
        if direction == current {
            score += 1;
        }

        if best.is_none_or(|(best_score, _)| score > best_score) {
            best = Some((score, direction));
        }
    }

    best.map(|(_, direction)| direction)
}
