//! `horde-sense` — threat perception for the `rust_horde` framework.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`stimulus`]  | `SensorPhase`, `Stimulus`, `Layer`/`LayerMask`                |
//! | [`scene`]     | `PhysicsQuery` trait, `RayHit`, R*-tree `StaticScene`         |
//! | [`registry`]  | `BodyPartRegistry` — collider → owning agent lookup           |
//! | [`perception`]| `Perception` — folds sensor events into the two threat slots  |
//! | [`emitter`]   | `SoundEmitter` — decaying-radius audio stimulus source        |
//!
//! # Design notes
//!
//! Perception is deliberately stateless between events: the controller clears
//! both threat slots at the top of every fixed tick, then feeds that tick's
//! sensor-overlap events through [`Perception::ingest`] one by one.  Each
//! channel therefore holds at most one candidate at any time — a later
//! same-channel candidate only replaces an earlier one by being strictly
//! closer.  Cross-channel priority is *not* resolved here; the behavioral
//! states pick between the populated slots using `TargetKind::priority`.

pub mod emitter;
pub mod perception;
pub mod registry;
pub mod scene;
pub mod stimulus;


pub use emitter::SoundEmitter;
pub use perception::{Perception, SenseProfile, SensorFrame};
pub use registry::BodyPartRegistry;
pub use scene::{PhysicsQuery, RayHit, StaticScene};
pub use stimulus::{Layer, LayerMask, SensorPhase, Stimulus};
