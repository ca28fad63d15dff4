//! Damage events and the hit-reaction table.

use horde_core::{BodyPartTag, Vec3};

// ── DamageSpec ──────────────────────────────────────────────────────────────

/// One instance of incoming damage, as delivered by the host.
///
/// `hit_direction` is a stylistic hint from the weapon (-1 left, 0 neutral,
/// 1 right); when neutral, the reaction is picked from the geometric angle of
/// the hit instead.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageSpec {
    /// World position of the impact.
    pub position: Vec3,
    /// Impact force; magnitudes above 1.0 knock the agent into ragdoll.
    pub force: Vec3,
    /// Hit points to subtract (head) or accumulate (body).
    pub damage: i32,
    /// Which region the impact landed on.
    pub part: BodyPartTag,
    /// Where the attacker stood, used for the behind-the-back ragdoll check.
    pub attacker_position: Vec3,
    pub hit_direction: i32,
}

// ── Hit reactions ───────────────────────────────────────────────────────────

/// Pick the hit-reaction animation variant for a non-ragdoll hit.
///
/// Variants 1-3 are head snaps (left / straight / right), 4-6 the torso
/// equivalents.  Lower-body hits that don't ragdoll play no reaction.
pub fn hit_reaction(spec: &DamageSpec, position: Vec3, forward: Vec3) -> i32 {
    // The weapon's hint wins outright; only a neutral hint falls back to
    // geometry.  Left/right is judged in the ground plane; hit height is
    // irrelevant.
    let angle = if spec.hit_direction == 0 {
        forward.signed_angle_deg((spec.position - position).horizontal())
    } else {
        0.0
    };
    match spec.part {
        BodyPartTag::Head => {
            if angle < -10.0 || spec.hit_direction == -1 {
                1
            } else if angle > 10.0 || spec.hit_direction == 1 {
                3
            } else {
                2
            }
        }
        BodyPartTag::UpperBody => {
            if angle < -20.0 || spec.hit_direction == -1 {
                4
            } else if angle > 20.0 || spec.hit_direction == 1 {
                6
            } else {
                5
            }
        }
        BodyPartTag::LowerBody => 0,
    }
}
