use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::game::{GameObserver, GameOverReason, GameState};

/// Running statistics across the games of one controller
pub struct SessionStats {
    /// When the current game started running, `None` while not running
    running_since: Option<Instant>,
    /// Play time of the current game, pauses excluded
    played: Duration,
    pub elapsed_time: Duration,
    pub score: u32,
    pub high_score: u32,
    pub games_played: u32,
    pub game_overs: HashMap<GameOverReason, u32>,
    state: GameState,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            running_since: None,
            played: Duration::ZERO,
            elapsed_time: Duration::ZERO,
            score: 0,
            high_score: 0,
            games_played: 0,
            game_overs: HashMap::new(),
            state: GameState::Idle,
        }
    }

    /// Refresh `elapsed_time`; call before drawing
    pub fn update(&mut self) {
        self.elapsed_time =
            self.played + self.running_since.map_or(Duration::ZERO, |t| t.elapsed());
    }

    pub fn game_overs_by(&self, reason: GameOverReason) -> u32 {
        self.game_overs.get(&reason).copied().unwrap_or(0)
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameObserver for SessionStats {
    fn on_score_changed(&mut self, score: u32) {
        self.score = score;
        if score > self.high_score {
            self.high_score = score;
        }
    }

    fn on_game_over(&mut self, reason: GameOverReason) {
        self.games_played += 1;
        *self.game_overs.entry(reason).or_insert(0) += 1;
    }

    fn on_state_changed(&mut self, state: GameState) {
        match (self.state, state) {
            (GameState::Idle, GameState::Running) => {
                self.played = Duration::ZERO;
                self.running_since = Some(Instant::now());
            }
            (_, GameState::Running) => {
                self.running_since = Some(Instant::now());
            }
            (GameState::Running, _) => {
                if let Some(since) = self.running_since.take() {
                    self.played += since.elapsed();
                }
            }
            _ => {}
        }
        self.state = state;
        self.update();
    }
}
