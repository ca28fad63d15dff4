//! The mutable surface a behavioral state may touch.

use horde_core::{PathStatus, SourceId, Target, TargetKind, Tick, Vec3};

/// Everything a state can observe about, or request from, its agent.
///
/// The controller implements this on the agent body.  Threats and the
/// current target are returned by value (`Target` is `Copy`) so a state can
/// read a slot and then mutate the context without borrow juggling.
///
/// Write methods are intent: the controller pushes speed/seeking/feeding to
/// the animator and destination changes to the navigation seam at the end
/// of the tick.  A missing collaborator (no nav handle, no animator) makes
/// the corresponding requests silent no-ops — never an error.
pub trait AgentContext {
    // ── Time and space ────────────────────────────────────────────────────

    fn now(&self) -> Tick;
    fn position(&self) -> Vec3;
    fn forward(&self) -> Vec3;
    fn set_forward(&mut self, forward: Vec3);

    /// Rotate the facing toward `point` (horizontally) by the fraction
    /// `slerp_speed × dt` of the remaining angle, capped at 1.
    fn slerp_forward_towards(&mut self, point: Vec3, slerp_speed: f32, dt: f32);

    // ── Threat slots and the committed target ─────────────────────────────

    fn visual_threat(&self) -> Target;
    fn audio_threat(&self) -> Target;
    fn target(&self) -> Target;

    fn set_target(&mut self, kind: TargetKind, source: SourceId, position: Vec3, distance: f32);

    /// Commit a perceived threat as the current target, keeping its
    /// discovery tick.
    fn set_target_from(&mut self, threat: Target);

    fn clear_target(&mut self);

    /// `true` while the agent stands inside its target's arrival trigger.
    fn is_target_reached(&self) -> bool;

    /// `true` while the player is inside this agent's melee zone.
    fn in_melee_range(&self) -> bool;

    // ── Locomotion and animation intent ───────────────────────────────────

    fn set_speed(&mut self, speed: f32);

    /// Turn-on-spot direction: -1 left, 0 none, 1 right.
    fn set_seeking(&mut self, seeking: i32);

    fn set_feeding(&mut self, feeding: bool);

    /// Attack variant for the animation graph; 0 means not attacking.
    fn set_attack_variant(&mut self, variant: i32);

    /// Aim the head/upper body at a world point with the given IK weight.
    fn look_at(&mut self, point: Vec3, weight: f32);

    // ── Navigation ────────────────────────────────────────────────────────

    /// Which channels the mover may drive.  States running on navmesh
    /// steering keep position and release rotation.
    fn set_nav_control(&mut self, position: bool, rotation: bool);

    fn set_destination(&mut self, point: Vec3);
    fn stop_nav(&mut self);
    fn resume_nav(&mut self);

    fn has_path(&self) -> bool;
    fn is_path_pending(&self) -> bool;
    fn is_path_stale(&self) -> bool;
    fn path_status(&self) -> PathStatus;
    fn steering_target(&self) -> Vec3;
    fn desired_velocity(&self) -> Vec3;

    // ── Waypoints ─────────────────────────────────────────────────────────

    /// Position of the agent's waypoint, advancing the cursor first when
    /// `advance` is set.  Also commits the waypoint as the current target.
    /// `None` when the agent has no waypoint network.
    fn waypoint_position(&mut self, advance: bool) -> Option<Vec3>;

    // ── Perception parameters and physiology ──────────────────────────────

    fn sensor_radius(&self) -> f32;
    fn intelligence(&self) -> f32;
    fn satisfaction(&self) -> f32;
    fn set_satisfaction(&mut self, value: f32);

    /// Satisfaction gained per second of active feeding, before the /100
    /// scaling shared with the depletion model.
    fn replenish_rate(&self) -> f32;

    fn is_feeding_clip_active(&self) -> bool;
}
