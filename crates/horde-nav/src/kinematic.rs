//! Straight-line kinematic mover for headless simulation and tests.

use horde_core::{PathStatus, Vec3};

use crate::agent::NavAgent;

/// Flat-plane mover: paths are straight lines, computed instantly, always
/// `Complete`.  Good enough for headless behavioral runs, where what matters
/// is *when* destinations are requested, not how they are reached.
#[derive(Debug, Clone)]
pub struct KinematicNav {
    position:         Vec3,
    destination:      Option<Vec3>,
    speed:            f32,
    control_position: bool,
    control_rotation: bool,
    stopped:          bool,
    path_age_secs:    f32,
    stale_after_secs: Option<f32>,
}

impl KinematicNav {
    pub fn new(position: Vec3) -> KinematicNav {
        KinematicNav {
            position,
            destination:      None,
            speed:            0.0,
            control_position: true,
            control_rotation: true,
            stopped:          false,
            path_age_secs:    0.0,
            stale_after_secs: None,
        }
    }

    /// Declare paths stale once they are older than `secs`.  `None` (the
    /// default) means paths never go stale on their own.
    pub fn with_staleness(mut self, secs: f32) -> KinematicNav {
        self.stale_after_secs = Some(secs);
        self
    }

}

impl NavAgent for KinematicNav {
    fn set_destination(&mut self, target: Vec3) {
        self.destination = Some(target);
        self.path_age_secs = 0.0;
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    fn set_control(&mut self, position: bool, rotation: bool) {
        self.control_position = position;
        self.control_rotation = rotation;
    }

    fn stop(&mut self) {
        self.stopped = true;
    }

    fn resume(&mut self) {
        self.stopped = false;
    }

    fn advance(&mut self, dt_secs: f32) {
        if let Some(dest) = self.destination {
            self.path_age_secs += dt_secs;
            if self.stopped || !self.control_position {
                return;
            }
            let to_dest = dest - self.position;
            let step = self.speed * dt_secs;
            if to_dest.length() <= step {
                self.position = dest;
            } else {
                self.position = self.position + to_dest.normalized() * step;
            }
        }
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn remaining_distance(&self) -> f32 {
        match self.destination {
            Some(dest) => self.position.distance(dest),
            None => f32::INFINITY,
        }
    }

    fn has_path(&self) -> bool {
        self.destination.is_some()
    }

    fn is_pending(&self) -> bool {
        // Straight-line paths are computed synchronously.
        false
    }

    fn is_path_stale(&self) -> bool {
        match (self.destination, self.stale_after_secs) {
            (Some(_), Some(window)) => self.path_age_secs > window,
            _ => false,
        }
    }

    fn path_status(&self) -> PathStatus {
        PathStatus::Complete
    }

    fn desired_velocity(&self) -> Vec3 {
        if self.stopped {
            return Vec3::ZERO;
        }
        match self.destination {
            Some(dest) => (dest - self.position).normalized() * self.speed,
            None => Vec3::ZERO,
        }
    }

    fn steering_target(&self) -> Vec3 {
        self.destination.unwrap_or(self.position)
    }

    fn sample_surface(&self, point: Vec3) -> Option<Vec3> {
        // The whole plane y = 0 is walkable.
        Some(Vec3 { x: point.x, y: 0.0, z: point.z })
    }

    fn warp(&mut self, position: Vec3) {
        self.position = position;
        self.destination = None;
        self.path_age_secs = 0.0;
    }
}
