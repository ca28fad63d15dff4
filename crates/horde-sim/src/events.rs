//! Events the host injects into the simulation queue.

use horde_agent::DamageSpec;
use horde_core::AgentId;
use horde_sense::{SensorPhase, Stimulus};

/// One queued input.  Events are delivered at the start of the next tick,
/// after threat slots are cleared and before the behavioral update, so states
/// always see this tick's stimuli.
#[derive(Debug, Clone, Copy)]
pub enum SimEvent {
    /// A stimulus entered/stayed in/left the agent's sensor sphere.
    Sensor {
        agent:    AgentId,
        stimulus: Stimulus,
        phase:    SensorPhase,
    },

    /// The host's arrival trigger fired (or cleared) for the agent's
    /// committed target.  Headless runs usually rely on the sim's own
    /// proximity synthesis instead.
    DestinationReached { agent: AgentId, reached: bool },

    /// The agent's melee zone gained or lost contact with the player.
    MeleeRange { agent: AgentId, in_range: bool },

    /// Damage landing on the agent.
    Damage { agent: AgentId, spec: DamageSpec },
}
