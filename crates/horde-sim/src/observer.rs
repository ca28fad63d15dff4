//! Observation hooks for traces, metrics, and tests.

use horde_core::{AgentId, BoneControl, StateKind, Tick, Vec3};

/// One state-machine transition, as reported to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateTransition {
    pub tick:  Tick,
    pub agent: AgentId,
    pub from:  StateKind,
    pub to:    StateKind,
}

/// Per-agent sample emitted at the configured trace interval.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSnapshot {
    pub tick:         Tick,
    pub agent:        AgentId,
    pub state:        StateKind,
    pub position:     Vec3,
    pub health:       i32,
    pub satisfaction: f32,
    pub speed:        f32,
    pub bone_control: BoneControl,
}

/// Callbacks fired by [`Sim::step`][crate::Sim::step] and
/// [`Sim::run`][crate::Sim::run].
///
/// All hooks default to no-ops; implement only what you need.  Transitions
/// are reported in ascending agent order within a tick, and in occurrence
/// order within an agent, regardless of the `parallel` feature — observers
/// may rely on that ordering for reproducible traces.
pub trait SimObserver {
    fn on_tick_start(&mut self, _tick: Tick) {}
    fn on_transition(&mut self, _transition: &StateTransition) {}
    fn on_snapshot(&mut self, _snapshot: &AgentSnapshot) {}
    fn on_tick_end(&mut self, _tick: Tick) {}
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// Observer that ignores everything.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
