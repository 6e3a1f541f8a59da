use std::borrow::Cow;

use tank_core::{ArenaMut, TickContext};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{BtError, BtNode, BtStatus, Slot};

/// How a [`GroupDecider`] picks the child to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SelectionPolicy {
    /// Keep the running child while it is ready, otherwise the first ready child in order.
    #[default]
    Prioritized,
    /// Random ready child. Not implemented.
    Random,
    /// Children in order. Not implemented.
    Sequential,
    /// Children in order, looping forever. Not implemented.
    Loop,
}

/// Composite that runs exactly one of its children at a time.
///
/// The group owns all children; `selected` is only an index into them. Switching always
/// deactivates the previous child before activating the next, so at most one child is live.
pub struct GroupDecider<W>
where
    W: ArenaMut + 'static,
{
    name: Cow<'static, str>,
    children: Vec<Slot<W>>,
    policy: SelectionPolicy,
    selected: Option<usize>,
}

impl<W> GroupDecider<W>
where
    W: ArenaMut + 'static,
{
    pub fn new(policy: SelectionPolicy, children: Vec<Box<dyn BtNode<W>>>) -> Self {
        Self {
            name: Cow::Borrowed("group"),
            children: children.into_iter().map(Slot::new).collect(),
            policy,
            selected: None,
        }
    }

    pub fn prioritized(children: Vec<Box<dyn BtNode<W>>>) -> Self {
        Self::new(SelectionPolicy::Prioritized, children)
    }

    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.selected.map(|i| self.children[i].name())
    }

    fn select_child(
        &self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &W,
    ) -> Result<Option<usize>, BtError> {
        match self.policy {
            SelectionPolicy::Prioritized => {
                if let Some(current) = self.selected {
                    if self.children[current].decide(ctx, agent, world) {
                        return Ok(Some(current));
                    }
                }
                Ok(self
                    .children
                    .iter()
                    .position(|child| child.decide(ctx, agent, world)))
            }
            other => Err(BtError::UnimplementedPolicy(other)),
        }
    }
}

impl<W> BtNode<W> for GroupDecider<W>
where
    W: ArenaMut + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&self, ctx: &TickContext, agent: W::Agent, world: &W) -> bool {
        self.children
            .iter()
            .any(|child| child.decide(ctx, agent, world))
    }

    fn activate(&mut self, ctx: &TickContext, agent: W::Agent, world: &mut W) {
        if !self.decide(ctx, agent, &*world) {
            tracing::warn!(group = %self.name, "group activated without a runnable child");
        }
    }

    fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
    ) -> Result<BtStatus, BtError> {
        let new_selection = self.select_child(ctx, agent, &*world)?;

        if new_selection != self.selected {
            if let Some(prev) = self.selected.take() {
                self.children[prev].deactivate(ctx, agent, world);
            }
            tracing::trace!(
                group = %self.name,
                tick = ctx.tick,
                selected = new_selection.map(|i| self.children[i].name()).unwrap_or("-"),
                "selection changed"
            );
            self.selected = new_selection;
            if let Some(next) = new_selection {
                self.children[next].activate(ctx, agent, world);
            }
        }

        let Some(current) = self.selected else {
            return Ok(BtStatus::Done);
        };

        if !self.children[current].tick(ctx, agent, world)?.is_running() {
            self.children[current].deactivate(ctx, agent, world);
            self.selected = None;
        }

        // The group did run a child this step, even if that child just finished.
        Ok(BtStatus::Running)
    }

    fn deactivate(&mut self, ctx: &TickContext, agent: W::Agent, world: &mut W) {
        if let Some(current) = self.selected.take() {
            self.children[current].deactivate(ctx, agent, world);
        }
    }

    fn write_path(&self, out: &mut String) {
        out.push_str(&self.name);
        if let Some(current) = self.selected {
            out.push('/');
            self.children[current].write_path(out);
        }
    }
}
