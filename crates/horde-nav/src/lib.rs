//! `horde-nav` — navigation seam and waypoint infrastructure.
//!
//! # Crate layout
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`agent`]     | `NavAgent` — the narrow trait behavior talks to       |
//! | [`waypoints`] | `WaypointNetwork`, `WaypointCursor`                   |
//! | [`kinematic`] | `KinematicNav` — straight-line mover for headless use |
//! | [`error`]     | `NavError`, `NavResult<T>`                            |
//!
//! # Why a seam
//!
//! Behavioral states only ever express *intent*: a destination, a speed,
//! stop/resume.  How paths are actually computed — a real navmesh in an
//! engine host, or the straight-line [`KinematicNav`] in headless runs — is
//! entirely behind [`NavAgent`].  Nothing above this crate may assume
//! anything about path shape beyond the trait's query surface.

pub mod agent;
pub mod error;
pub mod kinematic;
pub mod waypoints;

#[cfg(test)]
mod tests;

pub use agent::NavAgent;
pub use error::{NavError, NavResult};
pub use kinematic::KinematicNav;
pub use waypoints::{WaypointCursor, WaypointNetwork};
