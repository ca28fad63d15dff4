//! Parameter, layer, and bone vocabularies shared with the host animator.

/// Animator parameters the AI core writes.
///
/// The numeric/bool/trigger split mirrors how the host's animation graph
/// consumes them; `AnimatorSink` has one setter per value class and debug
/// builds may assert the class matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimParam {
    /// Float — current locomotion speed.
    Speed,
    /// Int — turn-on-spot direction: -1 left, 0 none, 1 right.
    Seeking,
    /// Bool — feeding loop requested.
    Feeding,
    /// Int — attack variant, 0 = not attacking.
    Attack,
    /// Bool — locomotion demoted to crawl (lower body ruined).
    Crawling,
    /// Trigger — play a hit reaction now.
    Hit,
    /// Int — which hit reaction (see the damage table).
    HitType,
    /// Trigger — reanimate from a face-down pose.
    ReanimateFromFront,
    /// Trigger — reanimate from a face-up pose.
    ReanimateFromBack,
    /// Int — accumulated lower-body damage, drives the limp layer.
    LowerBodyDamage,
    /// Int — accumulated upper-body damage, drives the arm-damage layer.
    UpperBodyDamage,
}

/// Blend layers whose weights the damage model drives directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimLayer {
    /// Leg-damage overlay (limp).
    LowerBody,
    /// Arm-damage overlay.
    UpperBody,
}

/// Bones the core queries for world transforms.
///
/// `Root` orientation decides the reanimation direction; the feet and head
/// bound the body for ground alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bone {
    Root,
    Head,
    LeftFoot,
    RightFoot,
}
