//! Idle: stand still for a random dwell, deferring to any threat.

use horde_core::{AgentRng, StateKind, TargetKind};

use crate::context::AgentContext;
use crate::state::AgentState;

/// Dwell window drawn uniformly per entry, seconds.
const DWELL_MIN_SECS: f32 = 10.0;
const DWELL_MAX_SECS: f32 = 60.0;

pub struct IdleState {
    dwell_secs: f32,
    timer:      f32,
}

impl IdleState {
    pub fn new() -> IdleState {
        IdleState { dwell_secs: DWELL_MAX_SECS, timer: 0.0 }
    }
}

impl Default for IdleState {
    fn default() -> IdleState {
        IdleState::new()
    }
}

impl AgentState for IdleState {
    fn kind(&self) -> StateKind {
        StateKind::Idle
    }

    fn on_enter(&mut self, ctx: &mut dyn AgentContext, rng: &mut AgentRng) {
        self.dwell_secs = rng.gen_range(DWELL_MIN_SECS..=DWELL_MAX_SECS);
        self.timer = 0.0;

        ctx.set_nav_control(true, false);
        ctx.set_speed(0.0);
        ctx.set_seeking(0);
        ctx.set_feeding(false);
        ctx.set_attack_variant(0);
        ctx.clear_target();
    }

    fn on_update(&mut self, ctx: &mut dyn AgentContext, _rng: &mut AgentRng, dt: f32) -> StateKind {
        match ctx.visual_threat().kind {
            TargetKind::VisualPlayer => {
                ctx.set_target_from(ctx.visual_threat());
                return StateKind::Pursuit;
            }
            TargetKind::VisualLight => {
                ctx.set_target_from(ctx.visual_threat());
                return StateKind::Alerted;
            }
            _ => {}
        }

        if ctx.audio_threat().kind == TargetKind::Audio {
            ctx.set_target_from(ctx.audio_threat());
            return StateKind::Alerted;
        }

        if ctx.visual_threat().kind == TargetKind::VisualFood {
            ctx.set_target_from(ctx.visual_threat());
            return StateKind::Pursuit;
        }

        self.timer += dt;
        if self.timer > self.dwell_secs {
            if let Some(waypoint) = ctx.waypoint_position(false) {
                ctx.set_destination(waypoint);
                ctx.resume_nav();
            }
            return StateKind::Patrol;
        }

        StateKind::Idle
    }
}
