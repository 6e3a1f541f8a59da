use tank_core::{ArenaMut, TickContext};

use crate::{BtError, BtNode, BtStatus};

/// Exclusive owner of one node plus its liveness.
///
/// Every lifecycle call goes through here. Activating a live node, ticking or deactivating an
/// inactive one is a selection-logic bug and panics.
pub struct Slot<W>
where
    W: ArenaMut + 'static,
{
    node: Box<dyn BtNode<W>>,
    live: bool,
}

impl<W> Slot<W>
where
    W: ArenaMut + 'static,
{
    pub fn new(node: Box<dyn BtNode<W>>) -> Self {
        Self { node, live: false }
    }

    pub fn name(&self) -> &str {
        self.node.name()
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn decide(&self, ctx: &TickContext, agent: W::Agent, world: &W) -> bool {
        self.node.decide(ctx, agent, world)
    }

    pub fn activate(&mut self, ctx: &TickContext, agent: W::Agent, world: &mut W) {
        assert!(
            !self.live,
            "behavior tree protocol violation: `{}` activated while already running",
            self.node.name()
        );
        self.live = true;
        self.node.activate(ctx, agent, world);
    }

    pub fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
    ) -> Result<BtStatus, BtError> {
        assert!(
            self.live,
            "behavior tree protocol violation: `{}` ticked while inactive",
            self.node.name()
        );
        self.node.tick(ctx, agent, world)
    }

    pub fn deactivate(&mut self, ctx: &TickContext, agent: W::Agent, world: &mut W) {
        assert!(
            self.live,
            "behavior tree protocol violation: `{}` deactivated while inactive",
            self.node.name()
        );
        self.live = false;
        self.node.deactivate(ctx, agent, world);
    }

    pub fn write_path(&self, out: &mut String) {
        self.node.write_path(out);
    }
}

impl<W> From<Box<dyn BtNode<W>>> for Slot<W>
where
    W: ArenaMut + 'static,
{
    fn from(node: Box<dyn BtNode<W>>) -> Self {
        Self::new(node)
    }
}
