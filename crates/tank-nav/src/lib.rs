//! Waypoint graph and route planning.
//!
//! The graph is built once from placed markers (pairwise line-of-sight), then shared read-only.
//! Planning never mutates it: per-query search state lives in a [`PlannerQuery`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod error;
pub mod graph;
pub mod path;
pub mod planner;
pub mod world;

pub use error::{PlanError, Result};
pub use graph::{Waypoint, WaypointGraph, WaypointGraphCell, WaypointId};
pub use path::{PathFollower, WaypointPath};
pub use planner::{CostModel, PlannerConfig, PlannerQuery};
pub use world::NavArena;
