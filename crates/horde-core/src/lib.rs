//! `horde-core` — foundational types for the `rust_horde` agent AI framework.
//!
//! This crate is a dependency of every other `horde-*` crate.  It
//! intentionally has no `horde-*` dependencies and minimal external ones
//! (only `rand` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`ids`]      | `AgentId`, `WaypointId`, `SourceId`, `ColliderId`       |
//! | [`vec3`]     | `Vec3` and the angle/heading math perception needs      |
//! | [`time`]     | `Tick`, `SimClock`, `SimConfig`                         |
//! | [`rng`]      | `AgentRng` (per-agent), `SimRng` (global)               |
//! | [`kinds`]    | `TargetKind`, `StateKind`, `PathStatus`, `BodyPartTag`, `BoneControl` |
//! | [`target`]   | The `Target` record and its empty/set/clear lifecycle   |
//! | [`error`]    | `HordeError`, `HordeResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod kinds;
pub mod rng;
pub mod target;
pub mod time;
pub mod vec3;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{HordeError, HordeResult};
pub use ids::{AgentId, ColliderId, SourceId, WaypointId};
pub use kinds::{BodyPartTag, BoneControl, PathStatus, StateKind, TargetKind};
pub use rng::{AgentRng, SimRng};
pub use target::Target;
pub use time::{SimClock, SimConfig, Tick, TimerSlot};
pub use vec3::Vec3;
