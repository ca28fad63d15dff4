//! `horde-agent` — the agent body, its controller, and the damage lifecycle.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`body`]       | `AgentBody`, `AgentTunables` — state + `AgentContext`    |
//! | [`states`]     | `StateSet` — per-agent `StateKind → Box<dyn AgentState>` |
//! | [`controller`] | `Controller` — fixed-tick orchestration and transitions  |
//! | [`damage`]     | `DamageSpec`, hit-reaction table                         |
//! | [`reanimate`]  | `Reanimator` — ragdoll-to-animated recovery              |
//!
//! # The tick contract
//!
//! Every fixed tick the controller runs the same sequence: forget last
//! tick's threats, ingest this tick's sensor stimuli, refresh the committed
//! target's distance, let the current state decide, transition if it asked
//! to, then push the accumulated intent (speed, seeking, feeding, attack
//! variant, damage layers) to the navigation and animation seams.  States
//! therefore always observe a coherent snapshot: threats from this tick,
//! a target distance measured from this tick's position.
//!
//! Damage runs outside that loop — `Controller::take_damage` may fire at
//! any point between ticks and may suspend the state machine entirely
//! (ragdoll).  Recovery is tick-driven again: the reanimation timer and
//! blend advance in `late_update`.

pub mod body;
pub mod controller;
pub mod damage;
pub mod reanimate;
pub mod states;

#[cfg(test)]
mod tests;

pub use body::{AgentBody, AgentTunables};
pub use controller::Controller;
pub use damage::DamageSpec;
pub use reanimate::Reanimator;
pub use states::StateSet;
