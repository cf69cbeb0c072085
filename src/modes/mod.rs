pub mod autopilot;
pub mod human;

pub use autopilot::{AutopilotMode, AutopilotSummary};
pub use human::HumanMode;
