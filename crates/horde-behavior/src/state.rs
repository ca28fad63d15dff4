//! The behavioral-state trait.

use horde_core::{AgentRng, StateKind};

use crate::context::AgentContext;

/// One state of the agent state machine.
///
/// The controller drives the hooks:
/// - `on_enter`/`on_exit` bracket residency in the state;
/// - `on_update` runs every fixed tick and *proposes* the next state — the
///   controller performs the actual transition (returning one's own kind
///   means "stay");
/// - `on_destination_reached` fires on arrival-trigger edges;
/// - `on_animator_ik` runs during the host's IK pass for states that aim.
///
/// States own their timers and tunables; everything else is reached through
/// the [`AgentContext`] borrow handed to each hook.  `Send` so whole agents
/// can be updated on worker threads.
pub trait AgentState: Send {
    fn kind(&self) -> StateKind;

    fn on_enter(&mut self, _ctx: &mut dyn AgentContext, _rng: &mut AgentRng) {}

    fn on_exit(&mut self, _ctx: &mut dyn AgentContext) {}

    fn on_update(&mut self, ctx: &mut dyn AgentContext, rng: &mut AgentRng, dt: f32) -> StateKind;

    fn on_destination_reached(&mut self, _ctx: &mut dyn AgentContext, _reached: bool) {}

    fn on_animator_ik(&mut self, _ctx: &mut dyn AgentContext, _dt: f32) {}
}
