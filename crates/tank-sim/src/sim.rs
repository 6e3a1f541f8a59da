use serde::Serialize;
use tank_bt::{
    tick_controllers, AgentController, BtError, BtNode, Flee, GroupDecider, MoveTowardPlayer,
    PursuePlayer,
};
use tank_core::{ArenaView, TankId, TickContext, Vec2};
use tank_nav::NavArena;
use thiserror::Error;

use crate::{Arena, ArenaError, SimConfig};

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid arena: {0}")]
    Arena(#[from] ArenaError),

    #[error("behavior tree failed: {0}")]
    Tree(#[from] BtError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TankReport {
    pub id: TankId,
    pub position: Vec2,
    /// Running node path at the end of the run, empty when idle.
    pub active: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimReport {
    pub steps: u64,
    pub tanks: Vec<TankReport>,
}

/// One arena, one controller per tank, stepped in lockstep.
pub struct Simulation {
    config: SimConfig,
    arena: Arena,
    controllers: Vec<AgentController<Arena>>,
    ctx: TickContext,
    steps_run: u64,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        let arena = Arena::new(&config.arena, config.seed, config.dt_seconds)?;

        // Build the graph before any tree can plan on it.
        let graph = arena.waypoint_graph();
        tracing::debug!(
            waypoints = graph.len(),
            edges = graph.edge_count(),
            "arena ready"
        );

        let controllers = arena
            .tank_ids()
            .map(|id| AgentController::new(id, Self::root_for(&config)).with_config(config.controller))
            .collect();

        Ok(Self {
            ctx: TickContext::new(0, config.dt_seconds, config.seed),
            config,
            arena,
            controllers,
            steps_run: 0,
        })
    }

    /// `root` group over flee, pursue and direct approach, in that priority.
    fn root_for(config: &SimConfig) -> Box<dyn BtNode<Arena>> {
        let children: Vec<Box<dyn BtNode<Arena>>> = vec![
            Box::new(Flee::new(config.flee)),
            Box::new(PursuePlayer::new(config.pursue_config())),
            Box::new(MoveTowardPlayer),
        ];
        Box::new(GroupDecider::new(config.root_policy, children).named("root"))
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    pub fn steps_run(&self) -> u64 {
        self.steps_run
    }

    pub fn step(&mut self) -> Result<(), SimError> {
        tick_controllers(&self.ctx, &mut self.arena, &mut self.controllers)?;
        self.ctx = self.ctx.next();
        self.steps_run += 1;
        Ok(())
    }

    /// Run the configured number of steps, then stop every tree.
    pub fn run(&mut self) -> Result<SimReport, SimError> {
        tracing::info!(
            tanks = self.controllers.len(),
            steps = self.config.steps,
            seed = self.config.seed,
            "running simulation"
        );
        for _ in 0..self.config.steps {
            self.step()?;
        }
        let report = self.report();
        self.shutdown();
        Ok(report)
    }

    pub fn shutdown(&mut self) {
        for controller in self.controllers.iter_mut() {
            controller.shutdown(&self.ctx, &mut self.arena);
        }
    }

    pub fn report(&self) -> SimReport {
        let tanks = self
            .controllers
            .iter()
            .map(|c| TankReport {
                id: c.agent(),
                position: self.arena.position(c.agent()).unwrap_or(Vec2::ZERO),
                active: c.current_path(),
            })
            .collect();
        SimReport {
            steps: self.steps_run,
            tanks,
        }
    }
}
