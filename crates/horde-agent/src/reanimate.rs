//! Reanimation: the timed return from ragdoll to the animated state machine.
//!
//! A downed-but-alive agent lies still for a wait period, then blends its
//! skeleton back under animator control.  During a short lead-in at the start
//! of the blend the root is snapped onto the ground under the ragdoll's hip
//! and the body is faced along its head-to-feet line, so the get-up clip
//! plays from where the ragdoll actually came to rest.

use horde_anim::{AnimParam, Bone};
use horde_core::{BoneControl, Tick, TimerSlot, Vec3};
use horde_sense::PhysicsQuery;

use horde_behavior::AgentContext;

use crate::body::AgentBody;

/// How far below the hip to probe for ground during the lead-in.
const GROUND_PROBE_DEPTH: f32 = 5.0;
/// Probe origin offset above the hip, so a hip slightly under the surface
/// still finds it.
const GROUND_PROBE_LIFT: f32 = 0.25;

// ── Snapshot ────────────────────────────────────────────────────────────────

/// Ragdoll pose captured at blend start.
#[derive(Debug, Clone, Copy)]
struct RagdollSnapshot {
    head: Vec3,
    feet: Vec3,
    hip:  Vec3,
}

/// What a `late_update` pass produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReanimateOutcome {
    /// Nothing finished this tick (dormant, still waiting, or mid-blend).
    None,
    /// The blend completed; the controller should restart the state machine.
    Completed,
}

// ── Reanimator ──────────────────────────────────────────────────────────────

/// Per-agent reanimation driver.
///
/// The wait timer is a schedule-cancel slot: every non-fatal hit while
/// ragdolled reschedules it, so a corpse under sustained fire stays down
/// until the fire stops.
pub struct Reanimator {
    timer:       TimerSlot,
    blend_start: Option<Tick>,
    snapshot:    Option<RagdollSnapshot>,
}

impl Reanimator {
    pub fn new() -> Reanimator {
        Reanimator {
            timer:       TimerSlot::new(),
            blend_start: None,
            snapshot:    None,
        }
    }

    /// Arm (or re-arm) the wait timer.  Any pending instance is cancelled.
    pub fn schedule(&mut self, now: Tick, delay_ticks: u64) {
        self.timer.schedule(now, delay_ticks);
    }

    /// Disarm the wait timer and abandon any blend in progress.
    pub fn cancel(&mut self) {
        self.timer.cancel();
        self.blend_start = None;
        self.snapshot = None;
    }

    pub fn is_waiting(&self) -> bool {
        self.timer.is_pending()
    }

    pub fn is_blending(&self) -> bool {
        self.blend_start.is_some()
    }

    /// Advance the reanimation lifecycle after the tick's behavioral update.
    pub fn late_update(
        &mut self,
        body: &mut AgentBody,
        scene: &dyn PhysicsQuery,
    ) -> ReanimateOutcome {
        if self.timer.fire(body.current_tick()) {
            self.begin_blend(body);
        }

        let (Some(start), Some(snapshot)) = (self.blend_start, self.snapshot) else {
            return ReanimateOutcome::None;
        };
        if body.bone_control() != BoneControl::RagdollToAnimated {
            return ReanimateOutcome::None;
        }

        let tunables = *body.tunables();
        let elapsed = body.current_tick().0.saturating_sub(start.0) as f32 * body.tick_secs();

        if elapsed <= tunables.reanimation_lead_in_secs {
            self.ground_align(body, scene, &snapshot);
        }

        let blend = ((elapsed - tunables.reanimation_lead_in_secs)
            / tunables.reanimation_blend_secs)
            .clamp(0.0, 1.0);
        if blend >= 1.0 {
            body.set_bone_control(BoneControl::Animated);
            body.set_collider_enabled(true);
            let position = body.position();
            if let Some(nav) = body.nav_mut() {
                nav.set_control(true, false);
                nav.warp(position);
                nav.resume();
            }
            self.blend_start = None;
            self.snapshot = None;
            return ReanimateOutcome::Completed;
        }

        ReanimateOutcome::None
    }

    /// Snapshot the ragdoll pose, hand the skeleton back to the animator,
    /// and kick off the matching get-up clip.
    fn begin_blend(&mut self, body: &mut AgentBody) {
        body.set_bone_control(BoneControl::RagdollToAnimated);
        body.set_parts_released(false);

        let fallback = body.position();
        let mut snapshot = RagdollSnapshot { head: fallback, feet: fallback, hip: fallback };
        let mut on_back = true;

        if let Some(animator) = body.animator_mut() {
            if let Some((head, _)) = animator.bone_world(Bone::Head) {
                snapshot.head = head;
            }
            if let (Some((left, _)), Some((right, _))) = (
                animator.bone_world(Bone::LeftFoot),
                animator.bone_world(Bone::RightFoot),
            ) {
                snapshot.feet = (left + right) * 0.5;
            }
            if let Some((hip, up)) = animator.bone_world(Bone::Root) {
                snapshot.hip = hip;
                on_back = up.y >= 0.0;
            }
            animator.set_enabled(true);
            animator.trigger(if on_back {
                AnimParam::ReanimateFromBack
            } else {
                AnimParam::ReanimateFromFront
            });
        }

        self.snapshot = Some(snapshot);
        self.blend_start = Some(body.current_tick());
    }

    /// Re-ground the root under the ragdoll hip and face along the body line.
    fn ground_align(
        &self,
        body: &mut AgentBody,
        scene: &dyn PhysicsQuery,
        snapshot: &RagdollSnapshot,
    ) {
        let mut root = snapshot.hip;
        if let Some(ground) =
            scene.ground_height(root + Vec3::UP * GROUND_PROBE_LIFT, GROUND_PROBE_DEPTH)
        {
            root.y = ground;
        }
        if let Some(on_mesh) = body.nav().and_then(|nav| nav.sample_surface(root)) {
            root = on_mesh;
        }
        body.set_position(root);
        let position = body.position();
        if let Some(nav) = body.nav_mut() {
            nav.warp(position);
        }
        body.set_forward(snapshot.head - snapshot.feet);
    }
}

impl Default for Reanimator {
    fn default() -> Reanimator {
        Reanimator::new()
    }
}
