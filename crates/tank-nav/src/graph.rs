use core::fmt;
use std::sync::OnceLock;

use tank_core::{ArenaView, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{PlanError, Result};

/// Stable index of a waypoint inside its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WaypointId(pub u32);

impl WaypointId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for WaypointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wp#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Waypoint {
    pub id: WaypointId,
    pub position: Vec2,
    /// Waypoints reachable by a straight unobstructed segment, ascending by id.
    pub neighbors: Vec<WaypointId>,
}

/// Undirected visibility graph over placed waypoint markers.
///
/// Edges are decided once at construction time. Walls that appear later do not remove edges.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WaypointGraph {
    waypoints: Vec<Waypoint>,
}

impl WaypointGraph {
    /// Build the graph using the arena's line-of-sight query.
    pub fn build<W>(markers: &[Vec2], world: &W) -> Self
    where
        W: ArenaView + ?Sized,
    {
        Self::build_with(markers, |a, b| world.line_of_sight(a, b))
    }

    /// Build the graph with an arbitrary line-of-sight predicate.
    ///
    /// Every unordered pair is tested exactly once (O(n²) tests).
    pub fn build_with(markers: &[Vec2], mut line_of_sight: impl FnMut(Vec2, Vec2) -> bool) -> Self {
        let mut waypoints: Vec<Waypoint> = markers
            .iter()
            .enumerate()
            .map(|(i, &position)| Waypoint {
                id: WaypointId(i as u32),
                position,
                neighbors: Vec::new(),
            })
            .collect();

        let mut edges = 0usize;
        for i in 0..waypoints.len() {
            for j in (i + 1)..waypoints.len() {
                if line_of_sight(waypoints[i].position, waypoints[j].position) {
                    // Pushing in (i, j) order keeps every neighbor list sorted.
                    waypoints[i].neighbors.push(WaypointId(j as u32));
                    waypoints[j].neighbors.push(WaypointId(i as u32));
                    edges += 1;
                }
            }
        }

        tracing::debug!(waypoints = waypoints.len(), edges, "built waypoint graph");
        Self { waypoints }
    }

    /// Build a graph from explicit edges. Edges are symmetrized; self-loops and duplicates are
    /// dropped.
    pub fn from_edges(positions: &[Vec2], edges: &[(u32, u32)]) -> Result<Self> {
        let mut waypoints: Vec<Waypoint> = positions
            .iter()
            .enumerate()
            .map(|(i, &position)| Waypoint {
                id: WaypointId(i as u32),
                position,
                neighbors: Vec::new(),
            })
            .collect();

        for &(a, b) in edges {
            for id in [a, b] {
                if id as usize >= waypoints.len() {
                    return Err(PlanError::UnknownWaypoint(WaypointId(id)));
                }
            }
            if a == b {
                continue;
            }
            waypoints[a as usize].neighbors.push(WaypointId(b));
            waypoints[b as usize].neighbors.push(WaypointId(a));
        }

        for wp in waypoints.iter_mut() {
            wp.neighbors.sort_unstable();
            wp.neighbors.dedup();
        }

        Ok(Self { waypoints })
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn waypoint(&self, id: WaypointId) -> Option<&Waypoint> {
        self.waypoints.get(id.index())
    }

    pub fn position(&self, id: WaypointId) -> Option<Vec2> {
        self.waypoint(id).map(|wp| wp.position)
    }

    pub fn neighbors(&self, id: WaypointId) -> &[WaypointId] {
        self.waypoint(id)
            .map(|wp| wp.neighbors.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_edge(&self, a: WaypointId, b: WaypointId) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    pub fn edge_count(&self) -> usize {
        self.waypoints.iter().map(|wp| wp.neighbors.len()).sum::<usize>() / 2
    }

    /// Nearest waypoint with a clear line to `point`.
    ///
    /// Ties keep the waypoint enumerated first, so the answer is deterministic for a fixed
    /// marker order.
    pub fn nearest_reachable(
        &self,
        point: Vec2,
        mut line_of_sight: impl FnMut(Vec2, Vec2) -> bool,
    ) -> Option<WaypointId> {
        let mut best: Option<(f32, WaypointId)> = None;
        for wp in self.waypoints.iter() {
            let d = wp.position.distance(point);
            let closer = match best {
                None => d.is_finite(),
                Some((best_d, _)) => d < best_d,
            };
            if closer && line_of_sight(wp.position, point) {
                best = Some((d, wp.id));
            }
        }
        best.map(|(_, id)| id)
    }
}

/// A waypoint graph that is built lazily, exactly once.
///
/// Markers are captured up front; the first `get_or_build*` call runs construction and every
/// later caller sees the finished graph. Planning must only start after that first call returns.
#[derive(Debug, Default)]
pub struct WaypointGraphCell {
    markers: Vec<Vec2>,
    graph: OnceLock<WaypointGraph>,
}

impl WaypointGraphCell {
    pub fn new(markers: Vec<Vec2>) -> Self {
        Self {
            markers,
            graph: OnceLock::new(),
        }
    }

    pub fn markers(&self) -> &[Vec2] {
        &self.markers
    }

    /// The graph, if it has been built already.
    pub fn get(&self) -> Option<&WaypointGraph> {
        self.graph.get()
    }

    pub fn get_or_build<W>(&self, world: &W) -> &WaypointGraph
    where
        W: ArenaView + ?Sized,
    {
        self.graph
            .get_or_init(|| WaypointGraph::build(&self.markers, world))
    }

    pub fn get_or_build_with(&self, line_of_sight: impl FnMut(Vec2, Vec2) -> bool) -> &WaypointGraph {
        self.graph
            .get_or_init(|| WaypointGraph::build_with(&self.markers, line_of_sight))
    }
}
