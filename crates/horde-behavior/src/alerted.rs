//! Alerted: stand and scan, turning toward whatever raised the alarm.

use horde_core::{AgentRng, StateKind, TargetKind};

use crate::context::AgentContext;
use crate::state::AgentState;

/// How long the agent stays worked up with nothing new to chew on.
const MAX_DURATION_SECS: f32 = 10.0;
/// Facing error below which a waypoint target lets the agent resume patrol.
const WAYPOINT_ANGLE_THRESHOLD_DEG: f32 = 90.0;
/// Facing error below which an audio target is considered locked and chased.
const THREAT_ANGLE_THRESHOLD_DEG: f32 = 10.0;
/// Cadence of turn-direction re-evaluation.
const DIRECTION_CHANGE_SECS: f32 = 1.5;

pub struct AlertedState {
    timer:                  f32,
    direction_change_timer: f32,
}

impl AlertedState {
    pub fn new() -> AlertedState {
        AlertedState { timer: MAX_DURATION_SECS, direction_change_timer: 0.0 }
    }
}

impl Default for AlertedState {
    fn default() -> AlertedState {
        AlertedState::new()
    }
}

impl AgentState for AlertedState {
    fn kind(&self) -> StateKind {
        StateKind::Alerted
    }

    fn on_enter(&mut self, ctx: &mut dyn AgentContext, _rng: &mut AgentRng) {
        self.timer = MAX_DURATION_SECS;
        self.direction_change_timer = 0.0;

        ctx.set_nav_control(true, false);
        ctx.set_speed(0.0);
        ctx.set_seeking(0);
        ctx.set_feeding(false);
        ctx.set_attack_variant(0);
    }

    fn on_update(&mut self, ctx: &mut dyn AgentContext, rng: &mut AgentRng, dt: f32) -> StateKind {
        self.timer -= dt;

        // Boredom: fall back onto the waypoint route.  The transition out
        // happens below once the agent faces roughly along the path.
        if self.timer <= 0.0 {
            if let Some(waypoint) = ctx.waypoint_position(false) {
                ctx.set_destination(waypoint);
            }
            ctx.resume_nav();
            self.timer = MAX_DURATION_SECS;
        }

        if ctx.visual_threat().kind == TargetKind::VisualPlayer {
            ctx.set_target_from(ctx.visual_threat());
            return StateKind::Pursuit;
        }

        if ctx.audio_threat().kind == TargetKind::Audio {
            ctx.set_target_from(ctx.audio_threat());
            self.timer = MAX_DURATION_SECS;
        }

        if ctx.visual_threat().kind == TargetKind::VisualLight {
            ctx.set_target_from(ctx.visual_threat());
            self.timer = MAX_DURATION_SECS;
        }

        if ctx.audio_threat().kind == TargetKind::None
            && ctx.visual_threat().kind == TargetKind::VisualFood
            && ctx.target().kind == TargetKind::None
        {
            ctx.set_target_from(ctx.visual_threat());
            return StateKind::Pursuit;
        }

        let target = ctx.target();
        match target.kind {
            TargetKind::Audio | TargetKind::VisualLight if !ctx.is_target_reached() => {
                let angle = ctx.forward().signed_angle_deg(target.position - ctx.position());

                if target.kind == TargetKind::Audio && angle.abs() < THREAT_ANGLE_THRESHOLD_DEG {
                    return StateKind::Pursuit;
                }

                self.direction_change_timer += dt;
                if self.direction_change_timer > DIRECTION_CHANGE_SECS {
                    // Smart agents turn the right way; dim ones guess.
                    let seeking = if rng.gen_bool(ctx.intelligence() as f64) {
                        angle.signum() as i32
                    } else if rng.gen_bool(0.5) {
                        1
                    } else {
                        -1
                    };
                    ctx.set_seeking(seeking);
                    self.direction_change_timer = 0.0;
                }
            }

            TargetKind::Waypoint if !ctx.is_path_pending() => {
                let angle = ctx
                    .forward()
                    .signed_angle_deg(ctx.steering_target() - ctx.position());
                if angle.abs() < WAYPOINT_ANGLE_THRESHOLD_DEG {
                    return StateKind::Patrol;
                }

                self.direction_change_timer += dt;
                if self.direction_change_timer > DIRECTION_CHANGE_SECS {
                    ctx.set_seeking(angle.signum() as i32);
                    self.direction_change_timer = 0.0;
                }
            }

            _ => {}
        }

        StateKind::Alerted
    }
}
