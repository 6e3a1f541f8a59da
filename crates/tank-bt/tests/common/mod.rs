#![allow(dead_code)]

pub mod probe;

use std::collections::{BTreeMap, VecDeque};

use tank_core::{ArenaMut, ArenaView, EntityTag, Vec2};
use tank_nav::{NavArena, WaypointGraph};

/// Small scripted arena: walls are segments, movement is a fixed step, samples come from a queue.
#[derive(Debug, Default)]
pub struct TestArena {
    pub positions: BTreeMap<u64, Vec2>,
    pub player: Option<Vec2>,
    pub walls: Vec<(Vec2, Vec2)>,
    pub free_locations: VecDeque<Vec2>,
    pub fallback_sample: Option<Vec2>,
    pub samples_taken: u32,
    pub moves: Vec<(u64, Vec2)>,
    pub speed: f32,
    pub graph: WaypointGraph,
}

impl TestArena {
    pub fn new() -> Self {
        Self {
            speed: 1.0,
            ..Self::default()
        }
    }

    pub fn with_agent(mut self, agent: u64, at: Vec2) -> Self {
        self.positions.insert(agent, at);
        self
    }

    pub fn with_player(mut self, at: Vec2) -> Self {
        self.player = Some(at);
        self
    }

    pub fn with_wall(mut self, a: Vec2, b: Vec2) -> Self {
        self.walls.push((a, b));
        self
    }

    pub fn with_samples(mut self, samples: impl IntoIterator<Item = Vec2>) -> Self {
        self.free_locations.extend(samples);
        self
    }

    pub fn build_graph(mut self, markers: &[Vec2]) -> Self {
        self.graph = WaypointGraph::build(markers, &self);
        self
    }

    pub fn set_position(&mut self, agent: u64, at: Vec2) {
        self.positions.insert(agent, at);
    }
}

fn cross(o: Vec2, a: Vec2, b: Vec2) -> f32 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn segments_cross(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> bool {
    let d1 = cross(q1, q2, p1);
    let d2 = cross(q1, q2, p2);
    let d3 = cross(p1, p2, q1);
    let d4 = cross(p1, p2, q2);
    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}

impl ArenaView for TestArena {
    type Agent = u64;

    fn position(&self, agent: u64) -> Option<Vec2> {
        self.positions.get(&agent).copied()
    }

    fn line_of_sight(&self, a: Vec2, b: Vec2) -> bool {
        !self
            .walls
            .iter()
            .any(|&(w1, w2)| segments_cross(a, b, w1, w2))
    }

    fn nearest_entity_position(&self, tag: EntityTag) -> Option<Vec2> {
        if tag == EntityTag::PLAYER {
            self.player
        } else {
            None
        }
    }
}

impl ArenaMut for TestArena {
    fn sample_free_location(&mut self, _min_clearance: f32) -> Option<Vec2> {
        self.samples_taken += 1;
        self.free_locations.pop_front().or(self.fallback_sample)
    }

    fn move_agent_toward(&mut self, agent: u64, target: Vec2) {
        self.moves.push((agent, target));
        let speed = self.speed;
        if let Some(pos) = self.positions.get_mut(&agent) {
            let to = target - *pos;
            let dist = to.length();
            if dist <= speed {
                *pos = target;
            } else {
                *pos += to * (speed / dist);
            }
        }
    }
}

impl NavArena for TestArena {
    fn waypoint_graph(&self) -> &WaypointGraph {
        &self.graph
    }
}
