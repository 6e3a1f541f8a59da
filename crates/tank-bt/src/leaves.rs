use tank_core::{ArenaMut, EntityTag, TickContext, Vec2};
use tank_nav::{NavArena, PathFollower, PlanError, PlannerConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{BtError, BtNode, BtStatus};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FleeConfig {
    /// Distance at which the goal counts as reached (inclusive).
    pub goal_threshold: f32,
    /// Free-location draws per activation before giving up.
    pub max_attempts: u32,
    /// Clearance radius passed to free-location sampling.
    pub clearance: f32,
    /// Only flee while the player is this close. `None` means always ready.
    pub panic_radius: Option<f32>,
}

impl Default for FleeConfig {
    fn default() -> Self {
        Self {
            goal_threshold: 1.0,
            max_attempts: 64,
            clearance: 1.0,
            panic_radius: None,
        }
    }
}

/// Run to a random free location the agent can currently see.
#[derive(Debug, Clone, Default)]
pub struct Flee {
    config: FleeConfig,
    goal: Option<Vec2>,
}

impl Flee {
    pub fn new(config: FleeConfig) -> Self {
        Self { config, goal: None }
    }

    pub fn config(&self) -> &FleeConfig {
        &self.config
    }

    pub fn goal(&self) -> Option<Vec2> {
        self.goal
    }

    fn pick_goal<W>(&self, agent: W::Agent, world: &mut W) -> Result<Vec2, PlanError>
    where
        W: ArenaMut,
    {
        let attempts = self.config.max_attempts;
        let Some(from) = world.position(agent) else {
            return Err(PlanError::NoFreeLocation { attempts: 0 });
        };
        for _ in 0..attempts {
            let Some(candidate) = world.sample_free_location(self.config.clearance) else {
                break;
            };
            if world.line_of_sight(from, candidate) {
                return Ok(candidate);
            }
        }
        Err(PlanError::NoFreeLocation { attempts })
    }
}

impl<W> BtNode<W> for Flee
where
    W: ArenaMut + 'static,
{
    fn name(&self) -> &str {
        "flee"
    }

    fn decide(&self, _ctx: &TickContext, agent: W::Agent, world: &W) -> bool {
        if self.goal.is_some() {
            return true;
        }
        let Some(radius) = self.config.panic_radius else {
            return true;
        };
        match (
            world.position(agent),
            world.nearest_entity_position(EntityTag::PLAYER),
        ) {
            (Some(pos), Some(player)) => pos.distance(player) <= radius,
            _ => false,
        }
    }

    fn activate(&mut self, ctx: &TickContext, agent: W::Agent, world: &mut W) {
        self.goal = None;
        match self.pick_goal(agent, world) {
            Ok(goal) => {
                tracing::debug!(?agent, tick = ctx.tick, %goal, "flee goal chosen");
                self.goal = Some(goal);
            }
            Err(err) => {
                tracing::warn!(?agent, tick = ctx.tick, %err, "flee found no goal");
            }
        }
    }

    fn tick(
        &mut self,
        _ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
    ) -> Result<BtStatus, BtError> {
        let Some(goal) = self.goal else {
            return Ok(BtStatus::Done);
        };
        world.move_agent_toward(agent, goal);
        let arrived = world
            .position(agent)
            .map_or(true, |pos| pos.distance(goal) <= self.config.goal_threshold);
        Ok(BtStatus::from(!arrived))
    }

    fn deactivate(&mut self, _ctx: &TickContext, _agent: W::Agent, _world: &mut W) {
        self.goal = None;
    }
}

/// Drive one step straight at the player, then finish.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveTowardPlayer;

impl<W> BtNode<W> for MoveTowardPlayer
where
    W: ArenaMut + 'static,
{
    fn name(&self) -> &str {
        "move_toward_player"
    }

    fn decide(&self, _ctx: &TickContext, _agent: W::Agent, world: &W) -> bool {
        world.nearest_entity_position(EntityTag::PLAYER).is_some()
    }

    fn tick(
        &mut self,
        _ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
    ) -> Result<BtStatus, BtError> {
        if let Some(player) = world.nearest_entity_position(EntityTag::PLAYER) {
            world.move_agent_toward(agent, player);
        }
        Ok(BtStatus::Done)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PursueConfig {
    pub arrival_radius: f32,
    /// Give up the current route once the player is this far from where it was planned to.
    pub replan_distance: f32,
    pub planner: PlannerConfig,
}

impl Default for PursueConfig {
    fn default() -> Self {
        Self {
            arrival_radius: 0.75,
            replan_distance: 4.0,
            planner: PlannerConfig::default(),
        }
    }
}

/// Follow a waypoint route toward a player hidden behind walls.
#[derive(Debug, Clone, Default)]
pub struct PursuePlayer {
    config: PursueConfig,
    follower: Option<PathFollower>,
    planned_goal: Option<Vec2>,
}

impl PursuePlayer {
    pub fn new(config: PursueConfig) -> Self {
        Self {
            config,
            follower: None,
            planned_goal: None,
        }
    }

    pub fn config(&self) -> &PursueConfig {
        &self.config
    }

    pub fn has_route(&self) -> bool {
        self.follower.is_some()
    }
}

impl<W> BtNode<W> for PursuePlayer
where
    W: NavArena + 'static,
{
    fn name(&self) -> &str {
        "pursue_player"
    }

    fn decide(&self, _ctx: &TickContext, agent: W::Agent, world: &W) -> bool {
        match (
            world.position(agent),
            world.nearest_entity_position(EntityTag::PLAYER),
        ) {
            (Some(pos), Some(player)) => !world.line_of_sight(pos, player),
            _ => false,
        }
    }

    fn activate(&mut self, ctx: &TickContext, agent: W::Agent, world: &mut W) {
        self.follower = None;
        self.planned_goal = None;

        let (Some(from), Some(to)) = (
            world.position(agent),
            world.nearest_entity_position(EntityTag::PLAYER),
        ) else {
            return;
        };

        match world.plan_route(from, to, self.config.planner) {
            Ok(path) => {
                tracing::debug!(?agent, tick = ctx.tick, hops = path.len(), "pursuit route planned");
                self.follower = Some(PathFollower::new(&path, self.config.arrival_radius));
                self.planned_goal = Some(to);
            }
            Err(err) => {
                tracing::warn!(?agent, tick = ctx.tick, %err, "pursuit planning failed");
            }
        }
    }

    fn tick(
        &mut self,
        _ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
    ) -> Result<BtStatus, BtError> {
        let (Some(follower), Some(planned_goal)) = (self.follower.as_mut(), self.planned_goal) else {
            return Ok(BtStatus::Done);
        };
        let (Some(pos), Some(player)) = (
            world.position(agent),
            world.nearest_entity_position(EntityTag::PLAYER),
        ) else {
            return Ok(BtStatus::Done);
        };

        if world.line_of_sight(pos, player)
            || player.distance(planned_goal) > self.config.replan_distance
        {
            return Ok(BtStatus::Done);
        }

        let Some(target) = follower.advance(pos) else {
            return Ok(BtStatus::Done);
        };
        world.move_agent_toward(agent, target);
        Ok(BtStatus::Running)
    }

    fn deactivate(&mut self, _ctx: &TickContext, _agent: W::Agent, _world: &mut W) {
        self.follower = None;
        self.planned_goal = None;
    }
}
