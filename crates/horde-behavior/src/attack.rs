//! Attack: melee engagement with range re-validation and eased look-at IK.

use horde_core::{AgentRng, StateKind, TargetKind, Vec3};

use crate::context::AgentContext;
use crate::state::AgentState;

/// Within this range the agent stops pushing into the target.
const STOPPING_DISTANCE: f32 = 1.0;
const SLERP_SPEED: f32 = 5.0;
const LOOK_AT_WEIGHT: f32 = 0.7;
/// Facing error under which the look-at aim engages.
const LOOK_AT_ANGLE_THRESHOLD_DEG: f32 = 15.0;

pub struct AttackState {
    /// Forward push speed while outside stopping distance.  Zero by default:
    /// pursuit closes the gap, attack only swings.
    speed:                  f32,
    current_look_at_weight: f32,
}

impl AttackState {
    pub fn new() -> AttackState {
        AttackState { speed: 0.0, current_look_at_weight: 0.0 }
    }
}

impl Default for AttackState {
    fn default() -> AttackState {
        AttackState::new()
    }
}

impl AgentState for AttackState {
    fn kind(&self) -> StateKind {
        StateKind::Attack
    }

    fn on_enter(&mut self, ctx: &mut dyn AgentContext, rng: &mut AgentRng) {
        self.current_look_at_weight = 0.0;

        ctx.set_nav_control(true, false);
        ctx.set_speed(0.0);
        ctx.set_seeking(0);
        ctx.set_feeding(false);
        ctx.set_attack_variant(rng.gen_range(1..=100));
    }

    fn on_exit(&mut self, ctx: &mut dyn AgentContext) {
        ctx.set_attack_variant(0);
    }

    fn on_update(&mut self, ctx: &mut dyn AgentContext, _rng: &mut AgentRng, dt: f32) -> StateKind {
        let target = ctx.target();
        if ctx.position().distance(target.position) < STOPPING_DISTANCE {
            ctx.set_speed(0.0);
        } else {
            ctx.set_speed(self.speed);
        }

        if ctx.visual_threat().kind == TargetKind::VisualPlayer {
            ctx.set_target_from(ctx.visual_threat());

            // Slipped out of the melee zone: close the gap again.
            if !ctx.in_melee_range() {
                return StateKind::Pursuit;
            }

            let mut aim = ctx.target().position;
            aim.y = ctx.position().y;
            ctx.slerp_forward_towards(aim, SLERP_SPEED, dt);

            return StateKind::Attack;
        }

        // Lost sight of the player mid-swing.
        StateKind::Alerted
    }

    fn on_animator_ik(&mut self, ctx: &mut dyn AgentContext, dt: f32) {
        let target = ctx.target();
        let to_target = target.position - ctx.position();
        let desired = if ctx.forward().angle_deg(to_target) < LOOK_AT_ANGLE_THRESHOLD_DEG {
            LOOK_AT_WEIGHT
        } else {
            0.0
        };

        self.current_look_at_weight += (desired - self.current_look_at_weight) * dt.clamp(0.0, 1.0);
        ctx.look_at(target.position + Vec3::UP, self.current_look_at_weight);
    }
}
