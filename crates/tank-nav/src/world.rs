use tank_core::{ArenaMut, Vec2};

use crate::{PlannerConfig, Result, WaypointGraph, WaypointPath};

/// Arena that also exposes its (already built) waypoint graph.
pub trait NavArena: ArenaMut {
    fn waypoint_graph(&self) -> &WaypointGraph;

    fn plan_route(&self, from: Vec2, to: Vec2, config: PlannerConfig) -> Result<WaypointPath> {
        self.waypoint_graph().plan_in(self, from, to, config)
    }
}
