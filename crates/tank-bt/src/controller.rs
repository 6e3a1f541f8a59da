use tank_core::{AgentId, ArenaMut, TickContext};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{BtError, BtNode, BtStatus, Slot};

/// When a controller runs its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerConfig {
    pub think_every_ticks: u32,
    pub think_offset_ticks: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            think_every_ticks: 1,
            think_offset_ticks: 0,
        }
    }
}

impl ControllerConfig {
    /// Spread agents over `think_every_ticks` steps using their stable id.
    pub fn staggered(agent: impl AgentId, think_every_ticks: u32) -> Self {
        let every = think_every_ticks.max(1);
        let offset = (agent.stable_id() % (every as u64)) as u32;
        Self {
            think_every_ticks: every,
            think_offset_ticks: offset,
        }
    }

    pub fn should_think(&self, tick: u64) -> bool {
        let every = self.think_every_ticks.max(1) as u64;
        ((tick + (self.think_offset_ticks as u64)) % every) == 0
    }
}

/// Owns one agent's root node and drives it once per step.
pub struct AgentController<W>
where
    W: ArenaMut + 'static,
{
    agent: W::Agent,
    root: Slot<W>,
    config: ControllerConfig,
    last_status: Option<BtStatus>,
}

impl<W> AgentController<W>
where
    W: ArenaMut + 'static,
{
    pub fn new(agent: W::Agent, root: Box<dyn BtNode<W>>) -> Self {
        Self {
            agent,
            root: Slot::new(root),
            config: ControllerConfig::default(),
            last_status: None,
        }
    }

    pub fn with_config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn agent(&self) -> W::Agent {
        self.agent
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.root.is_live()
    }

    /// Status of the last step the tree actually ran, if any.
    pub fn last_status(&self) -> Option<BtStatus> {
        self.last_status
    }

    /// Run one step. Off-schedule steps and an idle root that is not ready are no-ops.
    pub fn tick(&mut self, ctx: &TickContext, world: &mut W) -> Result<BtStatus, BtError> {
        if !self.config.should_think(ctx.tick) {
            return Ok(self.last_status.unwrap_or(BtStatus::Done));
        }

        if !self.root.is_live() {
            if !self.root.decide(ctx, self.agent, &*world) {
                self.last_status = Some(BtStatus::Done);
                return Ok(BtStatus::Done);
            }
            self.root.activate(ctx, self.agent, world);
        }

        let status = match self.root.tick(ctx, self.agent, world) {
            Ok(status) => status,
            Err(err) => {
                self.root.deactivate(ctx, self.agent, world);
                self.last_status = None;
                return Err(err);
            }
        };

        if !status.is_running() {
            self.root.deactivate(ctx, self.agent, world);
        }
        self.last_status = Some(status);
        Ok(status)
    }

    /// Deactivate a live root. Safe to call on an idle controller.
    pub fn shutdown(&mut self, ctx: &TickContext, world: &mut W) {
        if self.root.is_live() {
            self.root.deactivate(ctx, self.agent, world);
        }
        self.last_status = None;
    }

    /// Names of the running nodes from the root down, e.g. `root/pursue_player`. Empty when idle.
    pub fn current_path(&self) -> String {
        let mut out = String::new();
        if self.root.is_live() {
            self.root.write_path(&mut out);
        }
        out
    }
}

/// Tick every controller once, in agent id order.
pub fn tick_controllers<W>(
    ctx: &TickContext,
    world: &mut W,
    controllers: &mut [AgentController<W>],
) -> Result<(), BtError>
where
    W: ArenaMut + 'static,
{
    controllers.sort_by_key(|c| c.agent.stable_id());
    for controller in controllers.iter_mut() {
        controller.tick(ctx, world)?;
    }
    Ok(())
}
