//! Threat-selection rules: folding sensor stimuli into the two threat slots.
//!
//! # Why this exists
//!
//! An agent's sensor sphere re-reports every overlapping collider every tick.
//! The controller clears both threat slots, then streams the tick's stimuli
//! through [`Perception::ingest`].  Each call applies one channel's admission
//! rule and either replaces the channel's candidate or leaves it alone, so
//! after the stream ends each slot holds the single best candidate the rules
//! admitted this tick.
//!
//! # Channel rules
//!
//! | Channel       | Gate                                                       |
//! |---------------|------------------------------------------------------------|
//! | player        | strictly closer than current player candidate, inside half- |
//! |               | FOV, unobstructed within `sight × sensor_radius`            |
//! | light         | no player candidate; `dist / beam_length` within both the   |
//! |               | sight and intelligence budgets                              |
//! | sound         | hearing-biased distance factor ≤ 1, strictly closer than    |
//! |               | the current audio candidate                                 |
//! | food          | no player/light candidate, hungry (satisfaction ≤ 0.9), no  |
//! |               | audio candidate, closer than current visual, and visible     |

use horde_core::{AgentId, ColliderId, Target, TargetKind, Tick, Vec3};

use crate::registry::BodyPartRegistry;
use crate::scene::{PhysicsQuery, RayHit};
use crate::stimulus::{Layer, LayerMask, SensorPhase, Stimulus};

/// Satisfaction level above which food stimuli stop registering.
pub const FOOD_HUNGER_THRESHOLD: f32 = 0.9;

// ── Inputs ──────────────────────────────────────────────────────────────────

/// Fixed perceptual capabilities of one agent.  All ratios are `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SenseProfile {
    /// Fraction of `sensor_radius` the agent can actually see.
    pub sight:         f32,
    /// Hearing acuity.  Below 1.0, the audible-distance factor is inflated.
    pub hearing:       f32,
    /// Budget for light aggravation and for turn-direction guessing.
    pub intelligence:  f32,
    /// Full horizontal field of view, degrees.
    pub fov_deg:       f32,
    /// World radius of the sensor overlap sphere.
    pub sensor_radius: f32,
}

impl Default for SenseProfile {
    fn default() -> SenseProfile {
        SenseProfile {
            sight:         0.5,
            hearing:       1.0,
            intelligence:  0.5,
            fov_deg:       50.0,
            sensor_radius: 10.0,
        }
    }
}

/// Per-tick view of the sensing agent: where its sensor sits, which way it
/// faces, and how hungry it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorFrame {
    pub sensor_position: Vec3,
    pub forward:         Vec3,
    pub satisfaction:    f32,
}

// ── Perception ──────────────────────────────────────────────────────────────

/// The two threat slots of one agent.
///
/// Invariant: `visual_threat.kind` is always one of the visual kinds or
/// `None`; `audio_threat.kind` is always `Audio` or `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Perception {
    pub visual_threat: Target,
    pub audio_threat:  Target,
}

impl Perception {
    pub fn new() -> Perception {
        Perception::default()
    }

    /// Forget both candidates.  Called at the top of every fixed tick,
    /// before this tick's stimuli are ingested.
    pub fn clear(&mut self) {
        self.visual_threat.clear();
        self.audio_threat.clear();
    }

    /// Apply one stimulus to the slots.  `Exit`-phase events are ignored;
    /// the sensor re-reports survivors every tick, so absence is forgetting.
    #[allow(clippy::too_many_arguments)]
    pub fn ingest(
        &mut self,
        stimulus: Stimulus,
        phase:    SensorPhase,
        profile:  &SenseProfile,
        frame:    &SensorFrame,
        scene:    &dyn PhysicsQuery,
        registry: &BodyPartRegistry,
        self_id:  AgentId,
        now:      Tick,
    ) {
        if phase == SensorPhase::Exit {
            return;
        }

        match stimulus {
            Stimulus::Player { collider, position } => {
                let distance = frame.sensor_position.distance(position);
                let current_is_player = self.visual_threat.kind == TargetKind::VisualPlayer;
                if current_is_player && distance >= self.visual_threat.distance {
                    return;
                }
                if self
                    .collider_is_visible(position, collider, profile, frame, scene, registry, self_id)
                    .is_some()
                {
                    self.visual_threat
                        .set(TargetKind::VisualPlayer, collider.into(), position, distance, now);
                }
            }

            Stimulus::Light { collider, position, beam_length } => {
                // A sighted player always outranks a light.
                if self.visual_threat.kind == TargetKind::VisualPlayer {
                    return;
                }
                if beam_length <= 0.0 {
                    return;
                }
                let distance = frame.sensor_position.distance(position);
                let aggravation = distance / beam_length;
                if aggravation <= profile.sight && aggravation <= profile.intelligence {
                    self.visual_threat
                        .set(TargetKind::VisualLight, collider.into(), position, distance, now);
                }
            }

            Stimulus::Sound { collider, center, radius } => {
                if radius <= f32::EPSILON {
                    return;
                }
                let distance = frame.sensor_position.distance(center);
                // Poor hearing inflates the perceived distance factor, so
                // quiet or distant sounds drop below the audible line first.
                let mut factor = distance / radius;
                factor += factor * (1.0 - profile.hearing);
                if factor > 1.0 {
                    return;
                }
                if distance < self.audio_threat.distance {
                    self.audio_threat
                        .set(TargetKind::Audio, collider.into(), center, distance, now);
                }
            }

            Stimulus::Food { collider, position } => {
                // Food is the weakest stimulus: any player or light sighting,
                // any audible sound, or a full stomach suppresses it.
                if matches!(
                    self.visual_threat.kind,
                    TargetKind::VisualPlayer | TargetKind::VisualLight
                ) {
                    return;
                }
                if frame.satisfaction > FOOD_HUNGER_THRESHOLD {
                    return;
                }
                if self.audio_threat.kind != TargetKind::None {
                    return;
                }
                let distance = frame.sensor_position.distance(position);
                if distance >= self.visual_threat.distance {
                    return;
                }
                if self
                    .collider_is_visible(position, collider, profile, frame, scene, registry, self_id)
                    .is_some()
                {
                    self.visual_threat
                        .set(TargetKind::VisualFood, collider.into(), position, distance, now);
                }
            }
        }
    }

    /// Line-of-sight test from the sensor to `target_pos`.
    ///
    /// Fails outside the half-FOV cone.  Otherwise casts along the sight ray
    /// (range `sight × sensor_radius`), discards hits on the agent's *own*
    /// body parts, and succeeds only if the closest surviving hit is the
    /// target's collider.  Body-part hits the registry does not know about
    /// count as blocking.
    #[allow(clippy::too_many_arguments)]
    fn collider_is_visible(
        &self,
        target_pos:      Vec3,
        target_collider: ColliderId,
        profile:         &SenseProfile,
        frame:           &SensorFrame,
        scene:           &dyn PhysicsQuery,
        registry:        &BodyPartRegistry,
        self_id:         AgentId,
    ) -> Option<RayHit> {
        let direction = target_pos - frame.sensor_position;
        let angle = direction.angle_deg(frame.forward);
        if angle > profile.fov_deg * 0.5 {
            return None;
        }

        let range = profile.sensor_radius * profile.sight;
        let hits = scene.raycast_all(frame.sensor_position, direction, range, LayerMask::SIGHT);

        let mut closest: Option<RayHit> = None;
        for hit in hits {
            if hit.layer == Layer::BodyPart && registry.owner(hit.collider) == Some(self_id) {
                continue;
            }
            match closest {
                Some(best) if hit.distance >= best.distance => {}
                _ => closest = Some(hit),
            }
        }

        closest.filter(|hit| hit.collider == target_collider)
    }
}
