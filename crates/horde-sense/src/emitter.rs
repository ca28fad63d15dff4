//! Decaying-radius sound sources.

use horde_core::{ColliderId, Vec3};

use crate::stimulus::Stimulus;

/// A sound source whose audible sphere shrinks toward a target radius.
///
/// Gunshots and footsteps set a large radius which then decays to the
/// steady-state value over `decay_rate` seconds.  Growing louder is
/// instantaneous; only decay is interpolated.  When the current radius
/// falls under epsilon the emitter stops producing stimuli.
#[derive(Debug, Clone, Copy)]
pub struct SoundEmitter {
    pub collider: ColliderId,
    pub center:   Vec3,

    src_radius:         f32,
    target_radius:      f32,
    current_radius:     f32,
    interpolator:       f32,
    interpolator_speed: f32,
}

impl SoundEmitter {
    pub fn new(collider: ColliderId, center: Vec3, radius: f32, decay_rate: f32) -> SoundEmitter {
        // Decay rates at or under 20 ms are indistinguishable from instant.
        let interpolator_speed = if decay_rate > 0.02 { 1.0 / decay_rate } else { 0.0 };
        SoundEmitter {
            collider,
            center,
            src_radius: radius,
            target_radius: radius,
            current_radius: radius,
            interpolator: 0.0,
            interpolator_speed,
        }
    }

    /// Retarget the audible radius.  Growth (or `instant`) snaps; shrinking
    /// restarts the interpolation from the current radius.
    pub fn set_radius(&mut self, new_radius: f32, instant: bool) {
        if new_radius == self.current_radius {
            return;
        }
        self.src_radius = if instant || new_radius > self.current_radius {
            new_radius
        } else {
            self.current_radius
        };
        self.target_radius = new_radius;
        self.interpolator = 0.0;
    }

    /// Advance the radius interpolation by one fixed tick.
    pub fn tick(&mut self, dt_secs: f32) {
        self.interpolator = (self.interpolator + dt_secs * self.interpolator_speed).clamp(0.0, 1.0);
        self.current_radius =
            self.src_radius + (self.target_radius - self.src_radius) * self.interpolator;
    }

    pub fn radius(&self) -> f32 {
        self.current_radius
    }

    pub fn is_audible(&self) -> bool {
        self.current_radius >= f32::EPSILON
    }

    /// The stimulus this emitter contributes this tick, if still audible.
    pub fn stimulus(&self) -> Option<Stimulus> {
        self.is_audible().then_some(Stimulus::Sound {
            collider: self.collider,
            center:   self.center,
            radius:   self.current_radius,
        })
    }
}
