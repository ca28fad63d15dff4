//! Patrol: walk the waypoint network, escalating when a turn is too sharp.

use horde_core::{AgentRng, PathStatus, StateKind, TargetKind};

use crate::context::AgentContext;
use crate::state::AgentState;

const PATROL_SPEED: f32 = 1.0;
/// Required heading change beyond which the agent stops to turn on the spot.
const TURN_ON_SPOT_THRESHOLD_DEG: f32 = 80.0;
const SLERP_SPEED: f32 = 5.0;

pub struct PatrolState {
    speed: f32,
}

impl PatrolState {
    pub fn new() -> PatrolState {
        PatrolState { speed: PATROL_SPEED }
    }
}

impl Default for PatrolState {
    fn default() -> PatrolState {
        PatrolState::new()
    }
}

impl AgentState for PatrolState {
    fn kind(&self) -> StateKind {
        StateKind::Patrol
    }

    fn on_enter(&mut self, ctx: &mut dyn AgentContext, _rng: &mut AgentRng) {
        ctx.set_nav_control(true, false);
        ctx.set_seeking(0);
        ctx.set_feeding(false);
        ctx.set_attack_variant(0);

        if let Some(waypoint) = ctx.waypoint_position(false) {
            ctx.set_destination(waypoint);
        }
        ctx.resume_nav();
    }

    fn on_update(&mut self, ctx: &mut dyn AgentContext, _rng: &mut AgentRng, dt: f32) -> StateKind {
        // Threat deference, strongest first.
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

        // Food is only worth abandoning the route for when hunger outweighs
        // the detour: (1 - satisfaction) must exceed distance / sensor radius.
        if ctx.visual_threat().kind == TargetKind::VisualFood {
            let threat = ctx.visual_threat();
            if (1.0 - ctx.satisfaction()) > threat.distance / ctx.sensor_radius() {
                ctx.set_target_from(threat);
                return StateKind::Pursuit;
            }
        }

        if ctx.is_path_pending() {
            ctx.set_speed(0.0);
            return StateKind::Patrol;
        }
        ctx.set_speed(self.speed);

        // A lost, stale, or incomplete path means the route is broken;
        // skip to the next waypoint rather than stand forever.
        if ctx.is_path_stale() || !ctx.has_path() || ctx.path_status() != PathStatus::Complete {
            if let Some(waypoint) = ctx.waypoint_position(true) {
                ctx.set_destination(waypoint);
            }
        }

        let to_steering = ctx.steering_target() - ctx.position();
        let angle = ctx.forward().signed_angle_deg(to_steering);
        if angle.abs() > TURN_ON_SPOT_THRESHOLD_DEG {
            return StateKind::Alerted;
        }

        let ahead = ctx.position() + ctx.desired_velocity();
        ctx.slerp_forward_towards(ahead, SLERP_SPEED, dt);

        StateKind::Patrol
    }

    fn on_destination_reached(&mut self, ctx: &mut dyn AgentContext, reached: bool) {
        if reached {
            if let Some(next) = ctx.waypoint_position(true) {
                ctx.set_destination(next);
            }
        }
    }
}
