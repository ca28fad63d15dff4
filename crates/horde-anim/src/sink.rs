//! The animator trait the controller writes through.

use horde_core::Vec3;

use crate::params::{AnimLayer, AnimParam, Bone};

/// Write-mostly view of the host's animation system.
///
/// Setters are fire-and-forget; the sink applies them whenever the host
/// next evaluates its graph.  Implementations must tolerate redundant writes
/// (the controller re-pushes every parameter every tick), and must be `Send`
/// so whole agents can be updated on worker threads.
pub trait AnimatorSink: Send {
    // ── Parameter writes ──────────────────────────────────────────────────

    fn set_float(&mut self, param: AnimParam, value: f32);
    fn set_int(&mut self, param: AnimParam, value: i32);
    fn set_bool(&mut self, param: AnimParam, value: bool);
    fn trigger(&mut self, param: AnimParam);

    /// Weight of a damage overlay layer, `0..=1`.
    fn set_layer_weight(&mut self, layer: AnimLayer, weight: f32);

    /// Head/upper-body IK aim at a world point.  Weight 0 releases the aim.
    fn set_look_at(&mut self, position: Vec3, weight: f32);

    /// Master enable.  Disabled while ragdolled.
    fn set_enabled(&mut self, enabled: bool);

    // ── Rig queries ───────────────────────────────────────────────────────

    /// World position and up vector of a bone, if the rig exposes it.
    fn bone_world(&self, bone: Bone) -> Option<(Vec3, Vec3)>;

    /// `true` only while the feeding loop is the *active* clip, not merely
    /// requested.  Satisfaction replenishes only then.
    fn is_feeding_clip_active(&self) -> bool;
}
