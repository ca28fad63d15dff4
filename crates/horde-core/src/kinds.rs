//! Shared behavioral enums.
//!
//! These live in `horde-core` (rather than in the crates that "own" them)
//! because they are the vocabulary every seam speaks: perception writes
//! `TargetKind`s, states return `StateKind`s, the navigation adapter reports
//! `PathStatus`, and the damage system classifies `BodyPartTag`s.

use std::fmt;

// ── TargetKind ────────────────────────────────────────────────────────────────

/// What a [`Target`][crate::Target] points at.
///
/// The numeric ordering of [`priority`][TargetKind::priority] encodes the
/// global tie-break rule: VisualPlayer > VisualLight > Audio > VisualFood >
/// Waypoint > None.  States consult this when two stimulus channels fire in
/// the same tick.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetKind {
    #[default]
    None,
    Waypoint,
    VisualPlayer,
    VisualLight,
    VisualFood,
    Audio,
}

impl TargetKind {
    /// Higher wins.  `None` is 0 so an empty slot never outranks anything.
    pub fn priority(self) -> u8 {
        match self {
            TargetKind::None => 0,
            TargetKind::Waypoint => 1,
            TargetKind::VisualFood => 2,
            TargetKind::Audio => 3,
            TargetKind::VisualLight => 4,
            TargetKind::VisualPlayer => 5,
        }
    }

    /// `true` for the three sight-channel kinds.
    pub fn is_visual(self) -> bool {
        matches!(
            self,
            TargetKind::VisualPlayer | TargetKind::VisualLight | TargetKind::VisualFood
        )
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ── StateKind ─────────────────────────────────────────────────────────────────

/// The behavioral states of an agent.
///
/// `None` is not a real state: it marks an agent whose state machine is
/// suspended (ragdolled, or mis-configured with no registered states).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateKind {
    None,
    #[default]
    Idle,
    Alerted,
    Patrol,
    Pursuit,
    Attack,
    Feeding,
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ── PathStatus ────────────────────────────────────────────────────────────────

/// Quality of the navigation adapter's current path.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathStatus {
    /// A full path to the destination exists.
    #[default]
    Complete,
    /// Only a partial path could be found; the agent will stop short.
    Partial,
    /// No usable path (or no path requested yet).
    Invalid,
}

// ── BodyPartTag ───────────────────────────────────────────────────────────────

/// Coarse hit-location classification used by the damage model.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BodyPartTag {
    Head,
    UpperBody,
    LowerBody,
}

// ── BoneControl ───────────────────────────────────────────────────────────────

/// Who currently drives the agent's skeleton.
///
/// `Ragdoll` suspends the behavioral state machine entirely;
/// `RagdollToAnimated` is the blend-back window during reanimation.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoneControl {
    #[default]
    Animated,
    Ragdoll,
    RagdollToAnimated,
}
