use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tank_core::{ArenaMut, ArenaView, DeterministicRng, EntityTag, SplitMix64, TankId, Vec2};
use tank_nav::{NavArena, WaypointGraph, WaypointGraphCell};
use thiserror::Error;

use crate::ArenaConfig;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArenaError {
    #[error("arena size must be positive, got {width}x{height}")]
    EmptyBounds { width: f32, height: f32 },

    #[error("wall {index} has min {min} not below max {max}")]
    InvertedWall { index: usize, min: Vec2, max: Vec2 },

    #[error("{what} at {at} is outside the arena")]
    OutOfBounds { what: &'static str, at: Vec2 },

    #[error("{what} at {at} is inside a wall")]
    InsideWall { what: &'static str, at: Vec2 },
}

/// Axis-aligned solid box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub min: Vec2,
    pub max: Vec2,
}

impl Wall {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }

    /// Distance from `p` to the closest point of the box (zero inside).
    pub fn distance_to(&self, p: Vec2) -> f32 {
        let dx = (self.min.x - p.x).max(0.0).max(p.x - self.max.x);
        let dy = (self.min.y - p.y).max(0.0).max(p.y - self.max.y);
        Vec2::new(dx, dy).length()
    }

    /// Slab test: `true` when the segment passes through the box interior. Grazing an edge or a
    /// corner does not count.
    pub fn blocks(&self, a: Vec2, b: Vec2) -> bool {
        let d = b - a;
        let mut t_enter = 0.0f32;
        let mut t_exit = 1.0f32;
        for (origin, delta, lo, hi) in [
            (a.x, d.x, self.min.x, self.max.x),
            (a.y, d.y, self.min.y, self.max.y),
        ] {
            if delta.abs() <= f32::EPSILON {
                if origin <= lo || origin >= hi {
                    return false;
                }
                continue;
            }
            let inv = 1.0 / delta;
            let (mut near, mut far) = ((lo - origin) * inv, (hi - origin) * inv);
            if near > far {
                core::mem::swap(&mut near, &mut far);
            }
            t_enter = t_enter.max(near);
            t_exit = t_exit.min(far);
            if t_enter >= t_exit {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Tank {
    position: Vec2,
    speed: f32,
}

/// Rectangular arena `[0, width] x [0, height]` with box walls.
#[derive(Debug)]
pub struct Arena {
    size: Vec2,
    walls: Vec<Wall>,
    tanks: BTreeMap<TankId, Tank>,
    entities: Vec<(EntityTag, Vec2)>,
    rng: SplitMix64,
    dt_seconds: f32,
    sample_draws: u32,
    nav: WaypointGraphCell,
}

impl Arena {
    pub fn new(config: &ArenaConfig, seed: u64, dt_seconds: f32) -> Result<Self, ArenaError> {
        if !(config.width > 0.0 && config.height > 0.0) {
            return Err(ArenaError::EmptyBounds {
                width: config.width,
                height: config.height,
            });
        }
        for (index, wall) in config.walls.iter().enumerate() {
            if !(wall.min.x < wall.max.x && wall.min.y < wall.max.y) {
                return Err(ArenaError::InvertedWall {
                    index,
                    min: wall.min,
                    max: wall.max,
                });
            }
        }

        let mut arena = Self {
            size: Vec2::new(config.width, config.height),
            walls: config.walls.clone(),
            tanks: BTreeMap::new(),
            entities: Vec::new(),
            rng: SplitMix64::new(seed),
            dt_seconds: dt_seconds.max(0.0),
            sample_draws: config.sample_draws.max(1),
            nav: WaypointGraphCell::new(config.waypoints.clone()),
        };

        arena.check_placement("player", config.player)?;
        arena.entities.push((EntityTag::PLAYER, config.player));
        for (i, &position) in config.tanks.iter().enumerate() {
            arena.check_placement("tank", position)?;
            arena.tanks.insert(
                TankId(i as u32),
                Tank {
                    position,
                    speed: config.tank_speed,
                },
            );
        }
        for &marker in config.waypoints.iter() {
            arena.check_placement("waypoint", marker)?;
        }

        Ok(arena)
    }

    fn check_placement(&self, what: &'static str, at: Vec2) -> Result<(), ArenaError> {
        if !self.in_bounds(at) {
            return Err(ArenaError::OutOfBounds { what, at });
        }
        if self.walls.iter().any(|w| w.contains(at)) {
            return Err(ArenaError::InsideWall { what, at });
        }
        Ok(())
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn tank_ids(&self) -> impl Iterator<Item = TankId> + '_ {
        self.tanks.keys().copied()
    }

    pub fn set_player(&mut self, at: Vec2) {
        match self.entities.iter_mut().find(|(tag, _)| *tag == EntityTag::PLAYER) {
            Some((_, pos)) => *pos = at,
            None => self.entities.push((EntityTag::PLAYER, at)),
        }
    }

    pub fn graph_built(&self) -> bool {
        self.nav.get().is_some()
    }

    pub fn in_bounds(&self, p: Vec2) -> bool {
        p.is_finite() && p.x >= 0.0 && p.y >= 0.0 && p.x <= self.size.x && p.y <= self.size.y
    }

    fn has_clearance(&self, p: Vec2, clearance: f32) -> bool {
        p.x >= clearance
            && p.y >= clearance
            && p.x <= self.size.x - clearance
            && p.y <= self.size.y - clearance
            && self.walls.iter().all(|w| w.distance_to(p) >= clearance)
    }
}

impl ArenaView for Arena {
    type Agent = TankId;

    fn position(&self, agent: TankId) -> Option<Vec2> {
        self.tanks.get(&agent).map(|t| t.position)
    }

    fn line_of_sight(&self, a: Vec2, b: Vec2) -> bool {
        !self.walls.iter().any(|w| w.blocks(a, b))
    }

    fn nearest_entity_position(&self, tag: EntityTag) -> Option<Vec2> {
        self.entities
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, pos)| *pos)
    }
}

impl ArenaMut for Arena {
    fn sample_free_location(&mut self, min_clearance: f32) -> Option<Vec2> {
        let r = min_clearance.max(0.0);
        for _ in 0..self.sample_draws {
            let candidate = Vec2::new(
                self.rng.next_f32_range(r, self.size.x - r),
                self.rng.next_f32_range(r, self.size.y - r),
            );
            if self.has_clearance(candidate, r) {
                return Some(candidate);
            }
        }
        tracing::debug!(draws = self.sample_draws, clearance = r, "no free location");
        None
    }

    fn move_agent_toward(&mut self, agent: TankId, target: Vec2) {
        let Some(tank) = self.tanks.get(&agent).copied() else {
            return;
        };
        let to = target - tank.position;
        let dist = to.length();
        let step = tank.speed.max(0.0) * self.dt_seconds;
        if dist <= f32::EPSILON || step <= 0.0 {
            return;
        }
        let next = if dist <= step {
            target
        } else {
            tank.position + to * (step / dist)
        };

        if !self.in_bounds(next) || !self.line_of_sight(tank.position, next) {
            tracing::trace!(%agent, from = %tank.position, to = %next, "move blocked");
            return;
        }
        if let Some(t) = self.tanks.get_mut(&agent) {
            t.position = next;
        }
    }
}

impl NavArena for Arena {
    fn waypoint_graph(&self) -> &WaypointGraph {
        self.nav.get_or_build(self)
    }
}
