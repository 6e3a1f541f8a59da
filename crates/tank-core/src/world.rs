use crate::{AgentId, Vec2};

/// Tag used to look up non-agent entities (the player, pickups, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityTag(pub &'static str);

impl EntityTag {
    pub const PLAYER: EntityTag = EntityTag("player");
}

/// Read-only queries the decision core makes against the arena.
///
/// The core does not care how the arena answers them; a physics engine, a tile map or a test
/// double are all fine as long as answers are consistent within one step.
pub trait ArenaView {
    type Agent: AgentId;

    fn position(&self, agent: Self::Agent) -> Option<Vec2>;

    /// `true` when the straight segment from `a` to `b` is not blocked by a wall.
    fn line_of_sight(&self, a: Vec2, b: Vec2) -> bool;

    fn nearest_entity_position(&self, tag: EntityTag) -> Option<Vec2>;
}

/// Effects the decision core may request.
pub trait ArenaMut: ArenaView {
    /// A random location where a body of radius `min_clearance` fits.
    ///
    /// Returns `None` only if the arena cannot produce any candidate at all. Callers that need
    /// extra constraints (e.g. visibility) resample themselves and must bound their retries.
    fn sample_free_location(&mut self, min_clearance: f32) -> Option<Vec2>;

    /// Drive `agent` one step toward `target`.
    fn move_agent_toward(&mut self, agent: Self::Agent, target: Vec2);
}
