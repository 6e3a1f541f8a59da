use core::cmp::Ordering;
use std::collections::BinaryHeap;

use tank_core::{ArenaView, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{PlanError, Result, WaypointGraph, WaypointId, WaypointPath};

/// How the goal-distance estimate enters the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CostModel {
    /// The estimate to the goal is added into each node's stored distance, and that stored
    /// distance is what later expansions build on.
    ///
    /// This is greedy best-first search, not A*: the estimate is counted once per hop, so routes
    /// with fewer hops are favoured and the result is **not** guaranteed to be the shortest path.
    #[default]
    AccumulatedHeuristic,
    /// Classic A*: the stored distance is the travelled length only and the estimate is used for
    /// ordering. Returns a shortest path for Euclidean edge lengths.
    Admissible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlannerConfig {
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost_model: CostModel,
}

impl PlannerConfig {
    pub fn admissible() -> Self {
        Self {
            cost_model: CostModel::Admissible,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenNode {
    key: f32,
    id: u32,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the smallest key; equal keys pop the lowest id first,
        // which is the enumeration order of the graph.
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

/// Per-query search state, indexed by `WaypointId`.
///
/// Reuse one per caller to avoid allocating on every query. Two planners never share one, so
/// concurrent queries against the same graph are safe.
#[derive(Debug, Default)]
pub struct PlannerQuery {
    open: BinaryHeap<OpenNode>,
    distance: Vec<f32>,
    predecessor: Vec<Option<u32>>,
    closed: Vec<bool>,
}

impl PlannerQuery {
    fn reset(&mut self, n: usize) {
        self.open.clear();
        self.distance.clear();
        self.distance.resize(n, f32::INFINITY);
        self.predecessor.clear();
        self.predecessor.resize(n, None);
        self.closed.clear();
        self.closed.resize(n, false);
    }

    /// Stored distance of `id` after the last query (`+inf` if never reached).
    pub fn distance(&self, id: WaypointId) -> f32 {
        self.distance
            .get(id.index())
            .copied()
            .unwrap_or(f32::INFINITY)
    }

    pub fn predecessor(&self, id: WaypointId) -> Option<WaypointId> {
        self.predecessor
            .get(id.index())
            .copied()
            .flatten()
            .map(WaypointId)
    }
}

impl WaypointGraph {
    /// Search a waypoint route from `start` to `goal` (both inclusive) into `out`.
    pub fn find_waypoint_path(
        &self,
        start: WaypointId,
        goal: WaypointId,
        config: PlannerConfig,
        query: &mut PlannerQuery,
        out: &mut Vec<WaypointId>,
    ) -> Result<()> {
        out.clear();

        let start_pos = self
            .position(start)
            .ok_or(PlanError::UnknownWaypoint(start))?;
        let goal_pos = self.position(goal).ok_or(PlanError::UnknownWaypoint(goal))?;

        if start == goal {
            out.push(start);
            return Ok(());
        }

        query.reset(self.len());
        query.distance[start.index()] = 0.0;
        let start_key = match config.cost_model {
            CostModel::AccumulatedHeuristic => 0.0,
            CostModel::Admissible => start_pos.distance(goal_pos),
        };
        query.open.push(OpenNode {
            key: start_key,
            id: start.0,
        });

        while let Some(node) = query.open.pop() {
            let idx = node.id as usize;
            if query.closed[idx] {
                // Stale heap entry.
                continue;
            }
            if idx == goal.index() {
                out.push(goal);
                let mut current = idx;
                while let Some(prev) = query.predecessor[current] {
                    current = prev as usize;
                    out.push(WaypointId(prev));
                }
                out.reverse();
                return Ok(());
            }
            query.closed[idx] = true;

            let current = &self.waypoints()[idx];
            let current_dist = query.distance[idx];
            for &n in current.neighbors.iter() {
                let n_idx = n.index();
                if query.closed[n_idx] {
                    continue;
                }

                let n_pos = self.waypoints()[n_idx].position;
                let step = current.position.distance(n_pos);
                let estimate = n_pos.distance(goal_pos);
                let (dist, key) = match config.cost_model {
                    CostModel::AccumulatedHeuristic => {
                        let d = current_dist + step + estimate;
                        (d, d)
                    }
                    CostModel::Admissible => {
                        let g = current_dist + step;
                        (g, g + estimate)
                    }
                };

                if dist < query.distance[n_idx] {
                    query.distance[n_idx] = dist;
                    query.predecessor[n_idx] = Some(node.id);
                    query.open.push(OpenNode { key, id: n.0 });
                }
            }
        }

        Err(PlanError::Unreachable { start, goal })
    }

    /// Plan between two arbitrary points.
    ///
    /// Both points are snapped to their nearest visible waypoint first.
    pub fn plan(
        &self,
        start: Vec2,
        goal: Vec2,
        config: PlannerConfig,
        query: &mut PlannerQuery,
        mut line_of_sight: impl FnMut(Vec2, Vec2) -> bool,
    ) -> Result<WaypointPath> {
        let start_wp = self
            .nearest_reachable(start, &mut line_of_sight)
            .ok_or(PlanError::NoStartWaypoint { point: start })?;
        let goal_wp = self
            .nearest_reachable(goal, &mut line_of_sight)
            .ok_or(PlanError::NoGoalWaypoint { point: goal })?;

        let mut ids = Vec::new();
        match self.find_waypoint_path(start_wp, goal_wp, config, query, &mut ids) {
            Ok(()) => {
                tracing::debug!(
                    start = %start_wp,
                    goal = %goal_wp,
                    hops = ids.len(),
                    "planned waypoint route"
                );
                Ok(WaypointPath::from_ids(self, ids))
            }
            Err(err) => {
                tracing::debug!(start = %start_wp, goal = %goal_wp, %err, "planning failed");
                Err(err)
            }
        }
    }

    /// Convenience wrapper over [`WaypointGraph::plan`] using the arena's line of sight and a
    /// fresh query.
    pub fn plan_in<W>(&self, world: &W, start: Vec2, goal: Vec2, config: PlannerConfig) -> Result<WaypointPath>
    where
        W: ArenaView + ?Sized,
    {
        let mut query = PlannerQuery::default();
        self.plan(start, goal, config, &mut query, |a, b| world.line_of_sight(a, b))
    }
}
