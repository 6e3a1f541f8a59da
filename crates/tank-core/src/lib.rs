//! Deterministic, engine-agnostic primitives for arena tank agents.
//!
//! Everything the behavior tree and the waypoint planner need from the outside world is
//! expressed here as traits (`ArenaView` / `ArenaMut`), so that the decision core never talks to
//! a concrete engine.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod math;
pub mod rng;
pub mod tick;
pub mod world;

pub use agent::{AgentId, TankId};
pub use math::Vec2;
pub use rng::{DeterministicRng, SplitMix64};
pub use tick::TickContext;
pub use world::{ArenaMut, ArenaView, EntityTag};
