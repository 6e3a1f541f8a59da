//! Behavior tree runtime for arena tanks.
//!
//! Nodes follow a strict `activate` → `tick`* → `deactivate` lifecycle. Composites own their
//! children through [`Slot`]s, which enforce that lifecycle and fail fast on misuse.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod controller;
pub mod error;
pub mod group;
pub mod leaves;
pub mod node;
pub mod slot;

pub use controller::{tick_controllers, AgentController, ControllerConfig};
pub use error::BtError;
pub use group::{GroupDecider, SelectionPolicy};
pub use leaves::{Flee, FleeConfig, MoveTowardPlayer, PursueConfig, PursuePlayer};
pub use node::{BtNode, BtStatus};
pub use slot::Slot;
