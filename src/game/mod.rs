//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Hosts drive it through [`GameController`] and watch it through [`GameObserver`].

pub mod action;
pub mod collision;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod food;
pub mod grid;
pub mod observer;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use collision::CollisionType;
pub use config::GameConfig;
pub use controller::{GameController, GameState};
pub use engine::{GameOverReason, SnakeEngine, StepInfo, StepResult, TickOutcome};
pub use error::GameError;
pub use food::FoodPlacer;
pub use grid::Grid;
pub use observer::GameObserver;
pub use state::{Body, Cell, Segment, SegmentRole, Snake};
