//! The per-agent controller: FSM driver, damage model, ragdoll lifecycle.

use horde_anim::AnimParam;
use horde_core::{AgentRng, BodyPartTag, BoneControl, StateKind, Tick};
use horde_behavior::AgentContext;
use horde_sense::{BodyPartRegistry, PhysicsQuery, SensorPhase, Stimulus};

use crate::body::AgentBody;
use crate::damage::{DamageSpec, hit_reaction};
use crate::reanimate::{ReanimateOutcome, Reanimator};
use crate::states::StateSet;

/// Force magnitude above which a hit knocks the agent into ragdoll.
const RAGDOLL_FORCE_THRESHOLD: f32 = 1.0;

/// Drives one agent: owns its body, its registered states, and the
/// reanimation lifecycle around them.
///
/// Tick contract (enforced by the host, typically a `Sim`):
///
/// 1. [`begin_tick`][Controller::begin_tick] — stamp the tick, clear threats.
/// 2. [`ingest`][Controller::ingest] / [`set_destination_reached`] /
///    [`set_melee_range`] / [`take_damage`] — deliver the tick's events.
/// 3. [`update`][Controller::update] — run the current state, transition,
///    flush intent to the seams.
/// 4. [`late_update`][Controller::late_update] — advance any reanimation.
///
/// [`set_destination_reached`]: Controller::set_destination_reached
/// [`set_melee_range`]: Controller::set_melee_range
/// [`take_damage`]: Controller::take_damage
pub struct Controller {
    body:        AgentBody,
    states:      StateSet,
    current:     StateKind,
    rng:         AgentRng,
    reanimator:  Reanimator,
    transitions: Vec<(StateKind, StateKind)>,
}

impl Controller {
    /// Build a controller and enter `Idle` (when registered; an empty state
    /// set starts suspended).
    pub fn new(body: AgentBody, states: StateSet, global_seed: u64) -> Controller {
        let rng = AgentRng::new(global_seed, body.id);
        let mut controller = Controller {
            body,
            states,
            current: StateKind::None,
            rng,
            reanimator: Reanimator::new(),
            transitions: Vec::new(),
        };
        if controller.states.contains(StateKind::Idle) {
            controller.transition(StateKind::Idle);
        }
        controller
    }

    // ── Readbacks ─────────────────────────────────────────────────────────

    pub fn current_state(&self) -> StateKind {
        self.current
    }

    pub fn body(&self) -> &AgentBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut AgentBody {
        &mut self.body
    }

    /// Transitions recorded since the last drain, in occurrence order.
    pub fn drain_transitions(&mut self) -> Vec<(StateKind, StateKind)> {
        std::mem::take(&mut self.transitions)
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    /// Phase 1: stamp the tick and clear last tick's threats and arrival
    /// flag.  Sensor events re-populate both before `update` runs.
    pub fn begin_tick(&mut self, now: Tick) {
        self.body.begin_tick(now);
    }

    /// Phase 2: deliver one sensor event.
    pub fn ingest(
        &mut self,
        stimulus: Stimulus,
        phase: SensorPhase,
        scene: &dyn PhysicsQuery,
        registry: &BodyPartRegistry,
    ) {
        self.body.sense(stimulus, phase, scene, registry);
    }

    /// Phase 2: arrival (or departure-from-arrival) at the committed target.
    pub fn set_destination_reached(&mut self, reached: bool) {
        self.body.set_target_reached(reached);
        if let Some(state) = self.states.get_mut(self.current) {
            state.on_destination_reached(&mut self.body, reached);
        }
    }

    /// Phase 2: melee-range proximity to the player.
    pub fn set_melee_range(&mut self, in_range: bool) {
        self.body.set_in_melee(in_range);
    }

    /// Phase 3: run the behavioral update.  Suspended while the skeleton is
    /// not animator-driven.
    pub fn update(&mut self, dt: f32) {
        if !self.body.is_animated() {
            return;
        }

        self.body.refresh_target_distance();

        let next = match self.states.get_mut(self.current) {
            Some(state) => state.on_update(&mut self.body, &mut self.rng, dt),
            None => self.current,
        };
        self.transition(next);

        if let Some(state) = self.states.get_mut(self.current) {
            state.on_animator_ik(&mut self.body, dt);
        }

        self.body.deplete_satisfaction(dt);
        self.body.push_intent(dt);
    }

    /// Phase 4: advance the reanimation lifecycle; completing a blend drops
    /// the agent back into `Alerted` so it re-assesses whoever downed it.
    pub fn late_update(&mut self, scene: &dyn PhysicsQuery) {
        if self.reanimator.late_update(&mut self.body, scene) == ReanimateOutcome::Completed {
            self.transition(StateKind::Alerted);
        }
    }

    // ── Damage ────────────────────────────────────────────────────────────

    /// Apply one damage event.  May be called in any phase; ragdoll entry
    /// takes effect immediately.
    pub fn take_damage(&mut self, spec: DamageSpec) {
        let hit_strength = spec.force.length();

        // Hits landing on an existing ragdoll only accumulate damage and
        // keep the corpse down longer.
        if self.body.bone_control() == BoneControl::Ragdoll {
            if hit_strength > RAGDOLL_FORCE_THRESHOLD {
                self.body.push_impulse(spec.part, spec.force);
            }
            self.apply_part_damage(&spec);
            self.body.update_animator_damage();
            if self.body.health() > 0 {
                self.schedule_reanimation();
            }
            return;
        }

        let mut should_ragdoll = hit_strength > RAGDOLL_FORCE_THRESHOLD;
        self.apply_part_damage(&spec);
        if self.body.is_dead() {
            should_ragdoll = true;
        }
        if spec.part == BodyPartTag::LowerBody {
            // Leg hits always drop the agent, regardless of force.
            should_ragdoll = true;
        }
        if self.body.bone_control() != BoneControl::Animated || self.body.is_crawling() {
            should_ragdoll = true;
        }
        // A hit from behind can't be absorbed into a reaction clip.
        let to_attacker = spec.attacker_position - self.body.position();
        if to_attacker.dot(self.body.forward()) < 0.0 {
            should_ragdoll = true;
        }

        self.body.update_animator_damage();

        if !should_ragdoll {
            let variant = hit_reaction(&spec, self.body.position(), self.body.forward());
            if variant != 0 {
                if let Some(animator) = self.body.animator_mut() {
                    animator.set_int(AnimParam::HitType, variant);
                    animator.trigger(AnimParam::Hit);
                }
            }
            return;
        }

        self.enter_ragdoll(&spec, hit_strength);
    }

    fn apply_part_damage(&mut self, spec: &DamageSpec) {
        match spec.part {
            BodyPartTag::Head => self.body.reduce_health(spec.damage),
            BodyPartTag::UpperBody => self.body.add_upper_body_damage(spec.damage),
            BodyPartTag::LowerBody => self.body.add_lower_body_damage(spec.damage),
        }
    }

    /// Suspend the FSM and hand the skeleton to physics.  Survivors get a
    /// reanimation timer; a dead agent stays where it fell.
    fn enter_ragdoll(&mut self, spec: &DamageSpec, hit_strength: f32) {
        if let Some(state) = self.states.get_mut(self.current) {
            state.on_exit(&mut self.body);
        }
        let from = self.current;
        self.current = StateKind::None;
        self.transitions.push((from, StateKind::None));

        if let Some(nav) = self.body.nav_mut() {
            nav.stop();
            nav.set_control(false, false);
        }
        if let Some(animator) = self.body.animator_mut() {
            animator.set_enabled(false);
        }
        self.body.set_collider_enabled(false);
        self.body.set_in_melee(false);
        self.body.set_parts_released(true);
        self.body.set_bone_control(BoneControl::Ragdoll);
        self.reanimator.cancel();

        if hit_strength > RAGDOLL_FORCE_THRESHOLD {
            self.body.push_impulse(spec.part, spec.force);
        }
        if self.body.health() > 0 {
            self.schedule_reanimation();
        }
    }

    fn schedule_reanimation(&mut self) {
        let wait = self.body.tunables().reanimation_wait_secs;
        let ticks = (wait / self.body.tick_secs()).ceil() as u64;
        self.reanimator.schedule(self.body.current_tick(), ticks.max(1));
    }

    fn transition(&mut self, next: StateKind) {
        if next == self.current {
            return;
        }
        let resolved = if self.states.contains(next) {
            next
        } else {
            StateKind::Idle
        };
        if resolved == self.current {
            return;
        }
        if let Some(state) = self.states.get_mut(self.current) {
            state.on_exit(&mut self.body);
        }
        let from = self.current;
        self.current = resolved;
        if let Some(state) = self.states.get_mut(resolved) {
            state.on_enter(&mut self.body, &mut self.rng);
        }
        self.transitions.push((from, resolved));
    }
}
