use tank_core::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{WaypointGraph, WaypointId};

/// Ordered route from the start waypoint to the goal waypoint, both inclusive.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WaypointPath {
    pub waypoints: Vec<WaypointId>,
    pub points: Vec<Vec2>,
}

impl WaypointPath {
    pub(crate) fn from_ids(graph: &WaypointGraph, waypoints: Vec<WaypointId>) -> Self {
        let points = waypoints
            .iter()
            .filter_map(|&id| graph.position(id))
            .collect();
        Self { waypoints, points }
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn start(&self) -> Option<WaypointId> {
        self.waypoints.first().copied()
    }

    pub fn goal(&self) -> Option<WaypointId> {
        self.waypoints.last().copied()
    }

    /// Sum of straight segment lengths along the route.
    pub fn length(&self) -> f32 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}

/// Cursor for driving along a planned route one waypoint at a time.
#[derive(Debug, Clone)]
pub struct PathFollower {
    points: Vec<Vec2>,
    next: usize,
    arrival_radius: f32,
}

impl PathFollower {
    pub fn new(path: &WaypointPath, arrival_radius: f32) -> Self {
        Self {
            points: path.points.clone(),
            next: 0,
            arrival_radius: arrival_radius.max(0.0),
        }
    }

    pub fn current_target(&self) -> Option<Vec2> {
        self.points.get(self.next).copied()
    }

    /// Skip every target already within the arrival radius of `position` and return the next
    /// one to drive toward, if any.
    pub fn advance(&mut self, position: Vec2) -> Option<Vec2> {
        while let Some(target) = self.current_target() {
            if position.distance(target) > self.arrival_radius {
                break;
            }
            self.next += 1;
        }
        self.current_target()
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.points.len()
    }

    pub fn remaining(&self) -> &[Vec2] {
        &self.points[self.next.min(self.points.len())..]
    }
}
