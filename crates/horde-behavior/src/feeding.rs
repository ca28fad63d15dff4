//! Feeding: replenish satisfaction at a food source until sated or disturbed.

use horde_core::{AgentRng, StateKind, TargetKind};

use crate::context::AgentContext;
use crate::state::AgentState;

const SLERP_SPEED: f32 = 5.0;
/// Satisfaction level at which the agent pushes back from the table.
const SATED_THRESHOLD: f32 = 0.9;

pub struct FeedingState;

impl FeedingState {
    pub fn new() -> FeedingState {
        FeedingState
    }
}

impl Default for FeedingState {
    fn default() -> FeedingState {
        FeedingState::new()
    }
}

impl AgentState for FeedingState {
    fn kind(&self) -> StateKind {
        StateKind::Feeding
    }

    fn on_enter(&mut self, ctx: &mut dyn AgentContext, _rng: &mut AgentRng) {
        ctx.set_feeding(true);
        ctx.set_seeking(0);
        ctx.set_speed(0.0);
        ctx.set_attack_variant(0);
        ctx.set_nav_control(true, false);
    }

    fn on_exit(&mut self, ctx: &mut dyn AgentContext) {
        ctx.set_feeding(false);
    }

    fn on_update(&mut self, ctx: &mut dyn AgentContext, _rng: &mut AgentRng, dt: f32) -> StateKind {
        // Full: re-aim at the patrol route and go scan for it.
        if ctx.satisfaction() > SATED_THRESHOLD {
            ctx.waypoint_position(false);
            return StateKind::Alerted;
        }

        // Any non-food sighting interrupts the meal.
        let visual = ctx.visual_threat();
        if visual.kind != TargetKind::None && visual.kind != TargetKind::VisualFood {
            ctx.set_target_from(visual);
            return StateKind::Alerted;
        }

        if ctx.audio_threat().kind == TargetKind::Audio {
            ctx.set_target_from(ctx.audio_threat());
            return StateKind::Alerted;
        }

        // Satisfaction only accrues while the feeding clip is genuinely
        // playing, not merely requested; the blend-in takes a moment.
        if ctx.is_feeding_clip_active() {
            let replenished =
                ctx.satisfaction() + dt * ctx.replenish_rate() / 100.0;
            ctx.set_satisfaction(replenished.min(1.0));
        }

        // Keep the head over the food.
        let mut aim = ctx.target().position;
        aim.y = ctx.position().y;
        ctx.slerp_forward_towards(aim, SLERP_SPEED, dt);

        StateKind::Feeding
    }
}
