use thiserror::Error;

/// Errors raised by the simulation core.
///
/// Collisions are not errors; they are reported through
/// [`TickOutcome::GameOver`](super::TickOutcome::GameOver).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    /// Bad construction parameters (grid size, tick interval, spawn layout)
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// No free cell is left for food
    #[error("board is full, no free cell for food")]
    BoardFull,
    /// Internal consistency breach, always a programming error
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
