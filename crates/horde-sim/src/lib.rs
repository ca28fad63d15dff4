//! `horde-sim` — headless fixed-tick driver for a crowd of agents.
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`builder`]  | `SimBuilder`, `AgentSpawn` — assembly and validation  |
//! | [`sim`]      | `Sim` — the tick loop                                 |
//! | [`events`]   | `SimEvent` — host-injected inputs                     |
//! | [`observer`] | `SimObserver`, transition/snapshot records            |
//! | [`error`]    | `SimError`                                            |
//!
//! # Why this exists
//!
//! The controller crate knows how to run *one* agent through a tick; this
//! crate runs a whole population against a shared scene, waypoint network,
//! and body-part registry, with a single input queue and observer fan-out.
//! Runs are deterministic: the same `SimConfig` (seed included) and event
//! schedule always produce the same transition stream, which is what makes
//! recorded traces diffable across refactors.

pub mod builder;
pub mod error;
pub mod events;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::{AgentSpawn, SimBuilder};
pub use error::{SimError, SimResult};
pub use events::SimEvent;
pub use observer::{AgentSnapshot, NoopObserver, SimObserver, StateTransition};
pub use sim::Sim;
