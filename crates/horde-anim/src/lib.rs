//! `horde-anim` — animation and audio seam.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`params`]    | `AnimParam`, `Bone`, `AnimLayer` vocabularies           |
//! | [`sink`]      | `AnimatorSink` — the write/query trait                  |
//! | [`recording`] | `RecordingAnimator` — in-memory sink for headless runs  |
//! | [`pool`]      | `OneShotPool` — audio-slot occupancy with release timers|
//!
//! The controller pushes *parameters* (speed, seeking direction, flags,
//! triggers), never poses: pose evaluation belongs to the host's animation
//! system behind [`AnimatorSink`].  The one query direction the core needs
//! back is rig state — bone world transforms for ragdoll snapshots and
//! whether the feeding clip is actually the active clip.

pub mod params;
pub mod pool;
pub mod recording;
pub mod sink;


pub use params::{AnimLayer, AnimParam, Bone};
pub use pool::{OneShotPool, SlotId};
pub use recording::RecordingAnimator;
pub use sink::AnimatorSink;
