use tank_core::{ArenaMut, TickContext};

use crate::BtError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BtStatus {
    /// Keep ticking this node next step.
    Running,
    /// Finished (or gave up); the owner must deactivate it.
    Done,
}

impl BtStatus {
    pub fn is_running(self) -> bool {
        self == BtStatus::Running
    }
}

impl From<bool> for BtStatus {
    fn from(keep_running: bool) -> Self {
        if keep_running {
            BtStatus::Running
        } else {
            BtStatus::Done
        }
    }
}

/// A behavior tree node: leaf behavior or composite.
///
/// Lifecycle: `activate` once, then `tick` every step until it returns [`BtStatus::Done`] or the
/// owner pre-empts it, then `deactivate` once. `decide` may be called at any time, including
/// speculatively, and must not change anything other nodes can observe.
pub trait BtNode<W>: 'static
where
    W: ArenaMut + 'static,
{
    fn name(&self) -> &str;

    /// Whether this node is willing to run right now.
    fn decide(&self, _ctx: &TickContext, _agent: W::Agent, _world: &W) -> bool {
        true
    }

    fn activate(&mut self, _ctx: &TickContext, _agent: W::Agent, _world: &mut W) {}

    fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
    ) -> Result<BtStatus, BtError>;

    /// Release node-local state. Composites also deactivate their running child.
    fn deactivate(&mut self, _ctx: &TickContext, _agent: W::Agent, _world: &mut W) {}

    /// Append this node's part of the running path (e.g. `root/pursue_player`).
    fn write_path(&self, out: &mut String) {
        out.push_str(self.name());
    }
}
