//! The `Target` record — "what the agent currently cares about".
//!
//! # Lifecycle
//!
//! A `Target` is created empty at agent spawn, overwritten wholesale by
//! [`set`][Target::set], and reset by [`clear`][Target::clear].  The two
//! threat slots (`visual`, `audio`) are cleared and re-populated from sensor
//! events every fixed tick; the committed target persists across ticks until
//! a state replaces or clears it.
//!
//! # Empty-state invariant
//!
//! `kind == None  ⇔  distance == +∞  ⇔  source == SourceId::INVALID`
//!
//! Waypoint targets are the one deliberate asymmetry: they have no stimulus
//! source (waypoints are level data, not colliders), so a waypoint target
//! carries `SourceId::INVALID` with a finite distance.  Emptiness is always
//! tested via `kind`, never via `source`.

use crate::{SourceId, TargetKind, Tick, Vec3};

/// A candidate or committed point of interest for an agent.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Target {
    pub kind: TargetKind,
    /// Identity of the stimulus source; `INVALID` for None and Waypoint kinds.
    pub source: SourceId,
    pub position: Vec3,
    /// Straight-line distance from the agent; `+∞` when empty.
    pub distance: f32,
    /// Tick at which this target was last set.
    pub discovered_at: Tick,
}

impl Default for Target {
    fn default() -> Self {
        Self::empty()
    }
}

impl Target {
    /// The cleared state: kind None, infinite distance, invalid source.
    pub const fn empty() -> Self {
        Self {
            kind: TargetKind::None,
            source: SourceId::INVALID,
            position: Vec3::ZERO,
            distance: f32::INFINITY,
            discovered_at: Tick(0),
        }
    }

    /// Overwrite every field.  `source` should be `SourceId::INVALID` only
    /// for `TargetKind::Waypoint`.
    pub fn set(&mut self, kind: TargetKind, source: SourceId, position: Vec3, distance: f32, now: Tick) {
        self.kind = kind;
        self.source = source;
        self.position = position;
        self.distance = distance;
        self.discovered_at = now;
    }

    /// Reset to the empty state.  Idempotent.
    pub fn clear(&mut self) {
        *self = Self::empty();
    }

    /// `true` when no target is held.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kind == TargetKind::None
    }
}
