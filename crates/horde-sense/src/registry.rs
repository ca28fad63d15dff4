//! Collider → owning-agent lookup for body parts.

use rustc_hash::FxHashMap;

use horde_core::{AgentId, BodyPartTag, ColliderId};

/// Global registry mapping body-part colliders to the agent that owns them.
///
/// Sight rays terminate on the first blocking hit, but an agent's *own*
/// body parts must never occlude its view of a target.  The registry answers
/// "whose part is this?" for every hit so perception can skip self-hits, and
/// it lets damage routing resolve a struck collider to `(agent, part)`.
///
/// Unregistered colliders are treated as blocking by perception and are
/// ignored by damage routing.
#[derive(Default)]
pub struct BodyPartRegistry {
    parts: FxHashMap<ColliderId, (AgentId, BodyPartTag)>,
}

impl BodyPartRegistry {
    pub fn new() -> BodyPartRegistry {
        BodyPartRegistry::default()
    }

    pub fn register(&mut self, collider: ColliderId, owner: AgentId, tag: BodyPartTag) {
        self.parts.insert(collider, (owner, tag));
    }

    /// Remove every part owned by `agent`.  Called when an agent despawns.
    pub fn unregister_agent(&mut self, agent: AgentId) {
        self.parts.retain(|_, (owner, _)| *owner != agent);
    }

    pub fn lookup(&self, collider: ColliderId) -> Option<(AgentId, BodyPartTag)> {
        self.parts.get(&collider).copied()
    }

    pub fn owner(&self, collider: ColliderId) -> Option<AgentId> {
        self.lookup(collider).map(|(owner, _)| owner)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
