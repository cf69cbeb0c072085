//! Grid Snake - a deterministic Snake simulation with a terminal front end
//!
//! This library provides:
//! - Core simulation and game life-cycle (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering driven by game observers (render module)
//! - Session statistics (metrics module)
//! - Execution modes (human, autopilot)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
