//! The navigation trait behavioral code programs against.

use horde_core::{PathStatus, Vec3};

/// Narrow view of a steering/pathfinding agent.
///
/// Write methods are intent, not guarantees: a destination may yield a
/// `Partial` or `Invalid` path, and a stopped agent ignores speed.  Query
/// methods reflect the mover's latest committed state; none of them blocks.
pub trait NavAgent: Send {
    // ── Intent ────────────────────────────────────────────────────────────

    /// Request a path to `target`.  Replaces any current path and restarts
    /// the path-age clock.
    fn set_destination(&mut self, target: Vec3);

    /// Desired movement speed, units per second.
    fn set_speed(&mut self, speed: f32);

    /// Whether the mover may write the agent's position and/or rotation.
    /// Both are released while ragdolled and restored on reanimation.
    fn set_control(&mut self, position: bool, rotation: bool);

    /// Halt on the current path without discarding it.
    fn stop(&mut self);

    /// Resume movement along the current path.
    fn resume(&mut self);

    /// Advance the mover by one fixed tick.  Engine-hosted movers that run
    /// on their own clock leave this as the default no-op; headless movers
    /// integrate their position here.
    fn advance(&mut self, _dt_secs: f32) {}

    /// Teleport without pathing.  Reanimation uses this to sync the mover to
    /// wherever the ragdoll came to rest.
    fn warp(&mut self, _position: Vec3) {}

    // ── Queries ───────────────────────────────────────────────────────────

    fn position(&self) -> Vec3;

    /// Remaining path length to the destination, or `f32::INFINITY` when no
    /// path exists.
    fn remaining_distance(&self) -> f32;

    fn has_path(&self) -> bool;

    /// `true` while a requested path is still being computed.
    fn is_pending(&self) -> bool;

    /// `true` once the current path is older than the mover's staleness
    /// window, signalling that pursuit should re-path.
    fn is_path_stale(&self) -> bool;

    fn path_status(&self) -> PathStatus;

    /// Velocity the mover wants this instant (before physics/animation).
    fn desired_velocity(&self) -> Vec3;

    /// Next corner the mover is steering toward.
    fn steering_target(&self) -> Vec3;

    /// Project `point` onto the walkable surface, if one is near enough.
    /// Used by reanimation to pin the rebuilt pose to the ground.
    fn sample_surface(&self, point: Vec3) -> Option<Vec3>;
}
