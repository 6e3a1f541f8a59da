//! Headless reference arena for the tank behavior tree.
//!
//! [`Arena`] implements the spatial queries and movement the decision core consumes,
//! [`SimConfig`] describes a scenario in YAML, and [`Simulation`] drives one controller per tank.

#![forbid(unsafe_code)]

pub mod arena;
pub mod config;
pub mod sim;

pub use arena::{Arena, ArenaError, Wall};
pub use config::{ArenaConfig, SimConfig};
pub use sim::{SimError, SimReport, Simulation, TankReport};
