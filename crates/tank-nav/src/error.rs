use tank_core::Vec2;
use thiserror::Error;

use crate::WaypointId;

/// Recoverable planning failures. Callers are expected to fall back, not crash.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("no waypoint has a clear line to start point {point}")]
    NoStartWaypoint { point: Vec2 },

    #[error("no waypoint has a clear line to goal point {point}")]
    NoGoalWaypoint { point: Vec2 },

    #[error("waypoint {goal} is unreachable from {start}")]
    Unreachable { start: WaypointId, goal: WaypointId },

    #[error("no visible free location after {attempts} attempts")]
    NoFreeLocation { attempts: u32 },

    #[error("unknown waypoint {0}")]
    UnknownWaypoint(WaypointId),
}

pub type Result<T> = std::result::Result<T, PlanError>;
