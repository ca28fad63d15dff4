//! Simulation assembly and validation.

use std::sync::Arc;

use horde_agent::{AgentBody, AgentTunables, Controller, StateSet};
use horde_anim::RecordingAnimator;
use horde_core::{AgentId, AgentRng, BodyPartTag, ColliderId, SimConfig, Vec3, WaypointId};
use horde_nav::{KinematicNav, WaypointCursor, WaypointNetwork};
use horde_sense::{BodyPartRegistry, PhysicsQuery, SenseProfile};

use crate::error::{SimError, SimResult};
use crate::sim::Sim;

/// Recipe for one agent.
///
/// Seams are wired by the builder: every spawned agent gets a straight-line
/// kinematic mover at its spawn point and a recording animator.  Hosted
/// deployments that bring their own `NavAgent`/`AnimatorSink` construct
/// [`Controller`]s directly instead.
#[derive(Debug, Clone)]
pub struct AgentSpawn {
    pub position:      Vec3,
    pub profile:       SenseProfile,
    pub tunables:      AgentTunables,
    /// Draw patrol waypoints at random instead of walking the loop in order.
    pub random_patrol: bool,
    pub satisfaction:  f32,
}

impl AgentSpawn {
    pub fn at(position: Vec3) -> AgentSpawn {
        AgentSpawn {
            position,
            profile: SenseProfile::default(),
            tunables: AgentTunables::default(),
            random_patrol: false,
            satisfaction: 1.0,
        }
    }
}

/// Builder for a [`Sim`].  Collects configuration, spawns, and scene wiring,
/// then validates everything at once in [`build`][SimBuilder::build].
pub struct SimBuilder<P> {
    scene:      P,
    config:     SimConfig,
    waypoints:  Vec<Vec3>,
    spawns:     Vec<AgentSpawn>,
    body_parts: Vec<(ColliderId, AgentId, BodyPartTag)>,
}

impl<P: PhysicsQuery + Sync> SimBuilder<P> {
    pub fn new(scene: P) -> SimBuilder<P> {
        SimBuilder {
            scene,
            config: SimConfig::default(),
            waypoints: Vec::new(),
            spawns: Vec::new(),
            body_parts: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: SimConfig) -> SimBuilder<P> {
        self.config = config;
        self
    }

    /// The shared patrol route.  Empty (the default) means agents without a
    /// route idle in place forever.
    pub fn with_waypoints(mut self, points: Vec<Vec3>) -> SimBuilder<P> {
        self.waypoints = points;
        self
    }

    /// Queue one agent.  Ids are assigned in spawn order, starting at 0.
    pub fn spawn(mut self, spawn: AgentSpawn) -> SimBuilder<P> {
        self.spawns.push(spawn);
        self
    }

    /// Map a physics collider onto an agent's body so sight rays can skip
    /// (or be blocked by) it and damage can be attributed.
    pub fn register_body_part(
        mut self,
        collider: ColliderId,
        agent: AgentId,
        tag: BodyPartTag,
    ) -> SimBuilder<P> {
        self.body_parts.push((collider, agent, tag));
        self
    }

    pub fn build(self) -> SimResult<Sim<P>> {
        if self.config.tick_duration_secs <= 0.0 {
            return Err(SimError::InvalidTickDuration(self.config.tick_duration_secs));
        }
        if self.spawns.is_empty() {
            return Err(SimError::NoAgents);
        }

        let network = if self.waypoints.is_empty() {
            None
        } else {
            Some(Arc::new(WaypointNetwork::from_points(self.waypoints)?))
        };

        let mut registry = BodyPartRegistry::new();
        for (collider, agent, tag) in self.body_parts {
            registry.register(collider, agent, tag);
        }

        let seed = self.config.seed;
        let agents = self
            .spawns
            .into_iter()
            .enumerate()
            .map(|(i, spawn)| {
                let id = AgentId(i as u32);
                let mut body = AgentBody::new(id, spawn.position, seed)
                    .with_tick_duration(self.config.tick_duration_secs)
                    .with_profile(spawn.profile)
                    .with_tunables(spawn.tunables)
                    .with_satisfaction(spawn.satisfaction)
                    .with_nav(Box::new(KinematicNav::new(spawn.position)))
                    .with_animator(Box::new(RecordingAnimator::new()));
                if let Some(network) = &network {
                    let cursor = if spawn.random_patrol {
                        let mut rng = AgentRng::new(seed, id);
                        WaypointCursor::random_start(network, true, &mut rng)
                    } else {
                        WaypointCursor::new(WaypointId(0), false)
                    };
                    body = body.with_waypoints(Arc::clone(network), cursor);
                }
                Controller::new(body, StateSet::standard(), seed)
            })
            .collect();

        Ok(Sim::from_parts(self.scene, self.config, registry, agents))
    }
}
