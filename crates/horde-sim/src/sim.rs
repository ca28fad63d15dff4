//! The fixed-tick simulation loop.

use std::collections::VecDeque;

use horde_agent::{Controller, DamageSpec};
use horde_behavior::AgentContext;
use horde_core::{AgentId, SimClock, SimConfig, TargetKind, Tick};
use horde_sense::{BodyPartRegistry, PhysicsQuery, SensorPhase, Stimulus};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{SimError, SimResult};
use crate::events::SimEvent;
use crate::observer::{AgentSnapshot, SimObserver, StateTransition};

/// A headless horde.
///
/// Each [`step`][Sim::step] runs one fixed tick through the same phases the
/// hosted controller contract prescribes: clear, deliver events, synthesize
/// arrival edges, behavioral update, late update.  With the `parallel`
/// feature the per-agent update phases fan out over Rayon; transition
/// reporting stays in ascending agent order either way, so a run is
/// bit-identical across thread counts.
pub struct Sim<P: PhysicsQuery> {
    scene:    P,
    config:   SimConfig,
    clock:    SimClock,
    registry: BodyPartRegistry,
    agents:   Vec<Controller>,
    queue:    VecDeque<SimEvent>,
    #[cfg(feature = "parallel")]
    pool:     Option<rayon::ThreadPool>,
}

impl<P: PhysicsQuery + Sync> Sim<P> {
    pub(crate) fn from_parts(
        scene: P,
        config: SimConfig,
        registry: BodyPartRegistry,
        agents: Vec<Controller>,
    ) -> Sim<P> {
        let clock = config.make_clock();
        #[cfg(feature = "parallel")]
        let pool = config
            .num_threads
            .and_then(|n| rayon::ThreadPoolBuilder::new().num_threads(n).build().ok());
        Sim {
            scene,
            config,
            clock,
            registry,
            agents,
            queue: VecDeque::new(),
            #[cfg(feature = "parallel")]
            pool,
        }
    }

    // ── Readbacks ─────────────────────────────────────────────────────────

    pub fn scene(&self) -> &P {
        &self.scene
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn agent(&self, id: AgentId) -> SimResult<&Controller> {
        self.agents.get(id.index()).ok_or(SimError::UnknownAgent(id))
    }

    pub fn agent_mut(&mut self, id: AgentId) -> SimResult<&mut Controller> {
        self.agents.get_mut(id.index()).ok_or(SimError::UnknownAgent(id))
    }

    // ── Input queue ───────────────────────────────────────────────────────

    pub fn push_event(&mut self, event: SimEvent) {
        self.queue.push_back(event);
    }

    pub fn emit_stimulus(&mut self, agent: AgentId, stimulus: Stimulus, phase: SensorPhase) {
        self.push_event(SimEvent::Sensor { agent, stimulus, phase });
    }

    pub fn set_destination_reached(&mut self, agent: AgentId, reached: bool) {
        self.push_event(SimEvent::DestinationReached { agent, reached });
    }

    pub fn set_melee_range(&mut self, agent: AgentId, in_range: bool) {
        self.push_event(SimEvent::MeleeRange { agent, in_range });
    }

    pub fn deal_damage(&mut self, agent: AgentId, spec: DamageSpec) {
        self.push_event(SimEvent::Damage { agent, spec });
    }

    // ── The loop ──────────────────────────────────────────────────────────

    /// Run one fixed tick.
    pub fn step(&mut self, observer: &mut dyn SimObserver) {
        self.clock.advance();
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        for agent in &mut self.agents {
            agent.begin_tick(now);
        }

        while let Some(event) = self.queue.pop_front() {
            self.dispatch(event);
        }

        self.synthesize_arrivals();

        let dt = self.clock.tick_duration_secs;
        self.update_agents(dt);
        self.late_update_agents();

        self.report_transitions(now, observer);
        self.emit_snapshots(now, observer);

        observer.on_tick_end(now);
    }

    /// Run until the configured end tick, then report the end of the run.
    pub fn run(&mut self, observer: &mut dyn SimObserver) {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer);
        }
        observer.on_sim_end(self.clock.current_tick);
    }

    // ── Phases ────────────────────────────────────────────────────────────

    fn dispatch(&mut self, event: SimEvent) {
        match event {
            SimEvent::Sensor { agent, stimulus, phase } => {
                if let Some(controller) = self.agents.get_mut(agent.index()) {
                    controller.ingest(stimulus, phase, &self.scene, &self.registry);
                }
            }
            SimEvent::DestinationReached { agent, reached } => {
                if let Some(controller) = self.agents.get_mut(agent.index()) {
                    controller.set_destination_reached(reached);
                }
            }
            SimEvent::MeleeRange { agent, in_range } => {
                if let Some(controller) = self.agents.get_mut(agent.index()) {
                    controller.set_melee_range(in_range);
                }
            }
            SimEvent::Damage { agent, spec } => {
                if let Some(controller) = self.agents.get_mut(agent.index()) {
                    controller.take_damage(spec);
                }
            }
        }
    }

    /// Headless stand-in for the host's arrival trigger: an agent within
    /// stopping distance of its committed target has arrived.
    fn synthesize_arrivals(&mut self) {
        for controller in &mut self.agents {
            let body = controller.body();
            let target = body.target();
            if target.kind == TargetKind::None {
                continue;
            }
            let reached =
                body.position().distance(target.position) <= body.tunables().stopping_distance;
            if reached {
                controller.set_destination_reached(true);
            }
        }
    }

    fn update_agents(&mut self, dt: f32) {
        #[cfg(feature = "parallel")]
        {
            let agents = &mut self.agents;
            let work = move || agents.par_iter_mut().for_each(|agent| agent.update(dt));
            match &self.pool {
                Some(pool) => pool.install(work),
                None => work(),
            }
        }

        #[cfg(not(feature = "parallel"))]
        for agent in &mut self.agents {
            agent.update(dt);
        }
    }

    fn late_update_agents(&mut self) {
        let scene = &self.scene;

        #[cfg(feature = "parallel")]
        {
            let agents = &mut self.agents;
            let work = move || agents.par_iter_mut().for_each(|agent| agent.late_update(scene));
            match &self.pool {
                Some(pool) => pool.install(work),
                None => work(),
            }
        }

        #[cfg(not(feature = "parallel"))]
        for agent in &mut self.agents {
            agent.late_update(scene);
        }
    }

    fn report_transitions(&mut self, now: Tick, observer: &mut dyn SimObserver) {
        for (i, controller) in self.agents.iter_mut().enumerate() {
            for (from, to) in controller.drain_transitions() {
                observer.on_transition(&StateTransition {
                    tick: now,
                    agent: AgentId(i as u32),
                    from,
                    to,
                });
            }
        }
    }

    fn emit_snapshots(&self, now: Tick, observer: &mut dyn SimObserver) {
        let interval = self.config.trace_interval_ticks;
        if interval == 0 || now.0 % interval != 0 {
            return;
        }
        for (i, controller) in self.agents.iter().enumerate() {
            let body = controller.body();
            observer.on_snapshot(&AgentSnapshot {
                tick:         now,
                agent:        AgentId(i as u32),
                state:        controller.current_state(),
                position:     body.position(),
                health:       body.health(),
                satisfaction: body.satisfaction(),
                speed:        body.speed(),
                bone_control: body.bone_control(),
            });
        }
    }
}
