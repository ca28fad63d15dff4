//! Pursuit: chase the committed target, re-pathing as it moves.

use horde_core::{AgentRng, PathStatus, StateKind, TargetKind, Vec3};

use crate::context::AgentContext;
use crate::state::AgentState;

const PURSUIT_SPEED: f32 = 3.0;
const SLERP_SPEED: f32 = 5.0;
/// Give-up clock: an unresolved chase decays back to patrolling.
const MAX_DURATION_SECS: f32 = 40.0;

/// Re-path cadence scales with distance to the target so close chases track
/// tightly without re-pathing every tick from across the map.
const REPATH_DISTANCE_MULTIPLIER: f32 = 0.035;
const REPATH_VISUAL_MIN_SECS: f32 = 0.05;
const REPATH_VISUAL_MAX_SECS: f32 = 5.0;
const REPATH_AUDIO_MIN_SECS: f32 = 0.25;
const REPATH_AUDIO_MAX_SECS: f32 = 5.0;

pub struct PursuitState {
    timer:        f32,
    repath_timer: f32,
}

impl PursuitState {
    pub fn new() -> PursuitState {
        PursuitState { timer: 0.0, repath_timer: 0.0 }
    }

    /// Re-path toward `position` if the cadence window for `distance` has
    /// elapsed.  Returns whether a re-path was issued.
    fn maybe_repath(
        &mut self,
        ctx: &mut dyn AgentContext,
        position: Vec3,
        distance: f32,
        min_secs: f32,
        max_secs: f32,
    ) -> bool {
        let window = (distance * REPATH_DISTANCE_MULTIPLIER).clamp(min_secs, max_secs);
        if window < self.repath_timer {
            ctx.set_destination(position);
            self.repath_timer = 0.0;
            true
        } else {
            false
        }
    }
}

impl Default for PursuitState {
    fn default() -> PursuitState {
        PursuitState::new()
    }
}

impl AgentState for PursuitState {
    fn kind(&self) -> StateKind {
        StateKind::Pursuit
    }

    fn on_enter(&mut self, ctx: &mut dyn AgentContext, _rng: &mut AgentRng) {
        self.timer = 0.0;
        self.repath_timer = 0.0;

        ctx.set_nav_control(true, false);
        ctx.set_speed(PURSUIT_SPEED);
        ctx.set_seeking(0);
        ctx.set_feeding(false);
        ctx.set_attack_variant(0);

        let target = ctx.target();
        ctx.set_destination(target.position);
        ctx.resume_nav();
    }

    fn on_update(&mut self, ctx: &mut dyn AgentContext, _rng: &mut AgentRng, dt: f32) -> StateKind {
        self.timer += dt;
        self.repath_timer += dt;

        if self.timer > MAX_DURATION_SECS {
            return StateKind::Patrol;
        }

        // Caught up with the player.
        if ctx.target().kind == TargetKind::VisualPlayer && ctx.in_melee_range() {
            return StateKind::Attack;
        }

        // Arrived at a non-player target.
        if ctx.is_target_reached() {
            match ctx.target().kind {
                TargetKind::Audio | TargetKind::VisualLight => {
                    ctx.clear_target();
                    return StateKind::Alerted;
                }
                TargetKind::VisualFood => return StateKind::Feeding,
                _ => {}
            }
        }

        // A broken path means the chase cannot continue as-is.
        if ctx.is_path_stale()
            || (!ctx.has_path() && !ctx.is_path_pending())
            || ctx.path_status() != PathStatus::Complete
        {
            return StateKind::Alerted;
        }

        if ctx.is_path_pending() {
            ctx.set_speed(0.0);
        } else {
            ctx.set_speed(PURSUIT_SPEED);

            let sees_player = ctx.visual_threat().kind == TargetKind::VisualPlayer;
            if ctx.target().kind == TargetKind::VisualPlayer && sees_player && ctx.is_target_reached()
            {
                // On top of a visible player: face them square.
                let mut aim = ctx.target().position;
                aim.y = ctx.position().y;
                let facing = (aim - ctx.position()).normalized();
                if facing != Vec3::ZERO {
                    ctx.set_forward(facing);
                }
            } else if !ctx.is_target_reached() {
                let ahead = ctx.position() + ctx.desired_velocity();
                ctx.slerp_forward_towards(ahead, SLERP_SPEED, dt);
            } else {
                return StateKind::Alerted;
            }
        }

        // Freshest intelligence wins: re-commit the strongest stimulus and
        // re-path toward it on the distance-scaled cadence.
        let visual = ctx.visual_threat();
        if visual.kind == TargetKind::VisualPlayer {
            if ctx.target().position != visual.position {
                self.maybe_repath(
                    ctx,
                    visual.position,
                    visual.distance,
                    REPATH_VISUAL_MIN_SECS,
                    REPATH_VISUAL_MAX_SECS,
                );
            }
            ctx.set_target_from(visual);
            return StateKind::Pursuit;
        }

        // Chasing a last-known player position: nothing weaker overrides it.
        if ctx.target().kind == TargetKind::VisualPlayer {
            return StateKind::Pursuit;
        }

        if visual.kind == TargetKind::VisualLight {
            match ctx.target().kind {
                TargetKind::Audio | TargetKind::VisualFood => {
                    ctx.set_target_from(visual);
                    return StateKind::Alerted;
                }
                TargetKind::VisualLight => {
                    if ctx.target().source == visual.source {
                        if ctx.target().position != visual.position {
                            self.maybe_repath(
                                ctx,
                                visual.position,
                                visual.distance,
                                REPATH_VISUAL_MIN_SECS,
                                REPATH_VISUAL_MAX_SECS,
                            );
                        }
                        ctx.set_target_from(visual);
                        return StateKind::Pursuit;
                    }
                    // A different light: investigate afresh.
                    ctx.set_target_from(visual);
                    return StateKind::Alerted;
                }
                _ => {}
            }
        } else {
            let audio = ctx.audio_threat();
            if audio.kind == TargetKind::Audio {
                match ctx.target().kind {
                    TargetKind::VisualFood => {
                        ctx.set_target_from(audio);
                        return StateKind::Alerted;
                    }
                    TargetKind::Audio => {
                        if ctx.target().source == audio.source {
                            if ctx.target().position != audio.position {
                                self.maybe_repath(
                                    ctx,
                                    audio.position,
                                    audio.distance,
                                    REPATH_AUDIO_MIN_SECS,
                                    REPATH_AUDIO_MAX_SECS,
                                );
                            }
                            ctx.set_target_from(audio);
                            return StateKind::Pursuit;
                        }
                        ctx.set_target_from(audio);
                        return StateKind::Alerted;
                    }
                    _ => {}
                }
            }
        }

        StateKind::Pursuit
    }
}
