//! The agent body: all per-agent state, and the context states act through.

use std::sync::Arc;

use horde_anim::{AnimLayer, AnimParam, AnimatorSink};
use horde_core::{
    AgentId, AgentRng, BodyPartTag, BoneControl, PathStatus, SourceId, Target, TargetKind, Tick,
    Vec3,
};
use horde_nav::{NavAgent, WaypointCursor, WaypointNetwork};
use horde_sense::{
    BodyPartRegistry, Perception, PhysicsQuery, SenseProfile, SensorFrame, SensorPhase, Stimulus,
};

use horde_behavior::AgentContext;

/// Seed salt for the body's private RNG stream (waypoint draws), keeping it
/// independent of the behavioral stream owned by the controller.
const WAYPOINT_SEED_SALT: u64 = 0x5741_5950_4f49_4e54;

// ── Tunables ────────────────────────────────────────────────────────────────

/// Per-archetype constants.  Defaults mirror the standard shambler.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentTunables {
    pub health: i32,

    /// Arrival-trigger radius around the committed target.
    pub stopping_distance: f32,

    /// Sensor position relative to the body origin (head height).
    pub sensor_offset: Vec3,

    /// Accumulated upper-body damage above this drives the arm-damage layer.
    pub upper_body_threshold: i32,
    /// Accumulated lower-body damage above this drives the limp layer.
    pub limp_threshold: i32,
    /// Accumulated lower-body damage at or above this forces crawling.
    pub crawl_threshold: i32,

    /// Satisfaction lost per second at unit speed, before the /100 scaling
    /// and the speed³ factor.
    pub depletion_rate: f32,
    /// Satisfaction gained per second of active feeding, before /100.
    pub replenish_rate: f32,

    /// Seconds a ragdoll lies still before reanimation starts.
    pub reanimation_wait_secs: f32,
    /// Seconds of the ragdoll-to-animated pose blend.
    pub reanimation_blend_secs: f32,
    /// Lead-in at blend start during which the root is re-grounded.
    pub reanimation_lead_in_secs: f32,
}

impl Default for AgentTunables {
    fn default() -> AgentTunables {
        AgentTunables {
            health:                    100,
            stopping_distance:         1.0,
            sensor_offset:             Vec3 { x: 0.0, y: 1.5, z: 0.0 },
            upper_body_threshold:      30,
            limp_threshold:            30,
            crawl_threshold:           90,
            depletion_rate:            0.1,
            replenish_rate:            0.5,
            reanimation_wait_secs:     3.0,
            reanimation_blend_secs:    0.5,
            reanimation_lead_in_secs:  0.1,
        }
    }
}

// ── AgentBody ───────────────────────────────────────────────────────────────

/// Everything one agent owns: pose, perception, physiology, intent, and the
/// handles to its navigation and animation seams.
///
/// `AgentBody` implements [`AgentContext`], so behavioral states mutate it
/// directly; the controller orchestrates around it.  Both seam handles are
/// optional — a body without a nav mover or animator silently drops the
/// corresponding intent.
pub struct AgentBody {
    pub id: AgentId,

    position: Vec3,
    forward:  Vec3,
    now:      Tick,
    tick_secs: f32,

    perception:     Perception,
    profile:        SenseProfile,
    target:         Target,
    target_reached: bool,
    in_melee:       bool,

    // Intent accumulated by the states, flushed to the seams each tick.
    speed:          f32,
    seeking:        i32,
    feeding:        bool,
    attack_variant: i32,

    // Physiology.
    health:            i32,
    satisfaction:      f32,
    upper_body_damage: i32,
    lower_body_damage: i32,

    bone_control:     BoneControl,
    collider_enabled: bool,
    parts_released:   bool,
    pending_impulses: Vec<(BodyPartTag, Vec3)>,

    nav:       Option<Box<dyn NavAgent>>,
    animator:  Option<Box<dyn AnimatorSink>>,
    waypoints: Option<(Arc<WaypointNetwork>, WaypointCursor)>,

    tunables: AgentTunables,
    rng:      AgentRng,
}

impl AgentBody {
    pub fn new(id: AgentId, position: Vec3, global_seed: u64) -> AgentBody {
        AgentBody {
            id,
            position,
            forward: Vec3::FORWARD,
            now: Tick::ZERO,
            tick_secs: 0.02,
            perception: Perception::new(),
            profile: SenseProfile::default(),
            target: Target::empty(),
            target_reached: false,
            in_melee: false,
            speed: 0.0,
            seeking: 0,
            feeding: false,
            attack_variant: 0,
            health: AgentTunables::default().health,
            satisfaction: 1.0,
            upper_body_damage: 0,
            lower_body_damage: 0,
            bone_control: BoneControl::Animated,
            collider_enabled: true,
            parts_released: false,
            pending_impulses: Vec::new(),
            nav: None,
            animator: None,
            waypoints: None,
            tunables: AgentTunables::default(),
            rng: AgentRng::new(global_seed ^ WAYPOINT_SEED_SALT, id),
        }
    }

    // ── Builder-style wiring ──────────────────────────────────────────────

    pub fn with_profile(mut self, profile: SenseProfile) -> AgentBody {
        self.profile = profile;
        self
    }

    pub fn with_tunables(mut self, tunables: AgentTunables) -> AgentBody {
        self.health = tunables.health;
        self.tunables = tunables;
        self
    }

    pub fn with_nav(mut self, nav: Box<dyn NavAgent>) -> AgentBody {
        self.nav = Some(nav);
        self
    }

    pub fn with_animator(mut self, animator: Box<dyn AnimatorSink>) -> AgentBody {
        self.animator = Some(animator);
        self
    }

    pub fn with_waypoints(mut self, network: Arc<WaypointNetwork>, cursor: WaypointCursor) -> AgentBody {
        self.waypoints = Some((network, cursor));
        self
    }

    pub fn with_satisfaction(mut self, satisfaction: f32) -> AgentBody {
        self.satisfaction = satisfaction.clamp(0.0, 1.0);
        self
    }

    pub fn with_tick_duration(mut self, tick_secs: f32) -> AgentBody {
        self.tick_secs = tick_secs;
        self
    }

    // ── Readbacks for the controller, the host, and traces ────────────────

    pub fn profile(&self) -> &SenseProfile {
        &self.profile
    }

    pub fn tunables(&self) -> &AgentTunables {
        &self.tunables
    }

    pub fn tick_secs(&self) -> f32 {
        self.tick_secs
    }

    pub fn current_tick(&self) -> Tick {
        self.now
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn bone_control(&self) -> BoneControl {
        self.bone_control
    }

    pub fn is_animated(&self) -> bool {
        self.bone_control == BoneControl::Animated
    }

    pub fn is_crawling(&self) -> bool {
        self.lower_body_damage >= self.tunables.crawl_threshold
    }

    pub fn upper_body_damage(&self) -> i32 {
        self.upper_body_damage
    }

    pub fn lower_body_damage(&self) -> i32 {
        self.lower_body_damage
    }

    pub fn is_collider_enabled(&self) -> bool {
        self.collider_enabled
    }

    pub fn are_parts_released(&self) -> bool {
        self.parts_released
    }

    /// Impulses the host should apply to ragdolled body parts, in order.
    pub fn drain_impulses(&mut self) -> Vec<(BodyPartTag, Vec3)> {
        std::mem::take(&mut self.pending_impulses)
    }

    /// World position of the perception sensor.
    pub fn sensor_position(&self) -> Vec3 {
        self.position + self.tunables.sensor_offset
    }

    pub fn sensor_frame(&self) -> SensorFrame {
        SensorFrame {
            sensor_position: self.sensor_position(),
            forward:         self.forward,
            satisfaction:    self.satisfaction,
        }
    }

    pub fn perception(&self) -> &Perception {
        &self.perception
    }

    pub fn perception_mut(&mut self) -> &mut Perception {
        &mut self.perception
    }

    pub fn nav(&self) -> Option<&dyn NavAgent> {
        self.nav.as_deref()
    }

    pub fn nav_mut(&mut self) -> Option<&mut (dyn NavAgent + '_)> {
        self.nav.as_mut().map(|b| &mut **b as &mut dyn NavAgent)
    }

    pub fn animator(&self) -> Option<&dyn AnimatorSink> {
        self.animator.as_deref()
    }

    pub fn animator_mut(&mut self) -> Option<&mut (dyn AnimatorSink + '_)> {
        self.animator.as_mut().map(|b| &mut **b as &mut dyn AnimatorSink)
    }

    // ── Controller-side mutations ─────────────────────────────────────────

    pub(crate) fn begin_tick(&mut self, now: Tick) {
        self.now = now;
        self.perception.clear();
        self.target_reached = false;
    }

    /// Route one sensor event through perception.
    pub(crate) fn sense(
        &mut self,
        stimulus: Stimulus,
        phase: SensorPhase,
        scene: &dyn PhysicsQuery,
        registry: &BodyPartRegistry,
    ) {
        let frame = self.sensor_frame();
        self.perception.ingest(
            stimulus,
            phase,
            &self.profile,
            &frame,
            scene,
            registry,
            self.id,
            self.now,
        );
    }

    pub(crate) fn set_target_reached(&mut self, reached: bool) {
        self.target_reached = reached;
    }

    pub(crate) fn set_in_melee(&mut self, in_range: bool) {
        self.in_melee = in_range;
    }

    pub(crate) fn set_bone_control(&mut self, control: BoneControl) {
        self.bone_control = control;
    }

    pub(crate) fn set_collider_enabled(&mut self, enabled: bool) {
        self.collider_enabled = enabled;
    }

    pub(crate) fn set_parts_released(&mut self, released: bool) {
        self.parts_released = released;
    }

    pub(crate) fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub(crate) fn reduce_health(&mut self, damage: i32) {
        self.health = (self.health - damage).max(0);
    }

    pub(crate) fn add_upper_body_damage(&mut self, damage: i32) {
        self.upper_body_damage += damage;
    }

    pub(crate) fn add_lower_body_damage(&mut self, damage: i32) {
        self.lower_body_damage += damage;
    }

    pub(crate) fn push_impulse(&mut self, part: BodyPartTag, force: Vec3) {
        self.pending_impulses.push((part, force));
    }

    /// Refresh the stored distance of the committed target from this tick's
    /// position.
    pub(crate) fn refresh_target_distance(&mut self) {
        if self.target.kind != TargetKind::None {
            self.target.distance = self.position.distance(self.target.position);
        }
    }

    /// Satisfaction drains with movement, scaled by speed cubed: sprinting
    /// burns through a meal, shuffling barely registers.
    pub(crate) fn deplete_satisfaction(&mut self, dt: f32) {
        let drain = self.tunables.depletion_rate * dt / 100.0 * self.speed.powi(3);
        self.satisfaction = (self.satisfaction - drain).max(0.0);
    }

    /// Push the damage model into the animator: overlay layer weights, the
    /// crawl flag, and the raw damage integers.
    pub(crate) fn update_animator_damage(&mut self) {
        let lower = self.lower_body_damage;
        let upper = self.upper_body_damage;
        let limp = lower > self.tunables.limp_threshold && lower < self.tunables.crawl_threshold;
        let arms = upper > self.tunables.upper_body_threshold && lower < self.tunables.crawl_threshold;
        let crawling = self.is_crawling();

        if let Some(animator) = self.animator.as_deref_mut() {
            animator.set_layer_weight(AnimLayer::LowerBody, if limp { 1.0 } else { 0.0 });
            animator.set_layer_weight(AnimLayer::UpperBody, if arms { 1.0 } else { 0.0 });
            animator.set_bool(AnimParam::Crawling, crawling);
            animator.set_int(AnimParam::LowerBodyDamage, lower);
            animator.set_int(AnimParam::UpperBodyDamage, upper);
        }
    }

    /// Flush the tick's intent to the seams and integrate the mover.
    pub(crate) fn push_intent(&mut self, dt: f32) {
        if let Some(animator) = self.animator.as_deref_mut() {
            animator.set_float(AnimParam::Speed, self.speed);
            animator.set_int(AnimParam::Seeking, self.seeking);
            animator.set_bool(AnimParam::Feeding, self.feeding);
            animator.set_int(AnimParam::Attack, self.attack_variant);
        }
        self.update_animator_damage();

        if let Some(nav) = self.nav.as_deref_mut() {
            nav.set_speed(self.speed);
            nav.advance(dt);
            self.position = nav.position();
        }
    }
}

// ── AgentContext ────────────────────────────────────────────────────────────

impl AgentContext for AgentBody {
    fn now(&self) -> Tick {
        self.now
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn forward(&self) -> Vec3 {
        self.forward
    }

    fn set_forward(&mut self, forward: Vec3) {
        let flat = forward.horizontal().normalized();
        if flat != Vec3::ZERO {
            self.forward = flat;
        }
    }

    fn slerp_forward_towards(&mut self, point: Vec3, slerp_speed: f32, dt: f32) {
        let dir = (point - self.position).horizontal().normalized();
        if dir == Vec3::ZERO {
            return;
        }
        let step = self.forward.angle_deg(dir) * (slerp_speed * dt).min(1.0);
        self.forward = self.forward.rotated_towards(dir, step);
    }

    fn visual_threat(&self) -> Target {
        self.perception.visual_threat
    }

    fn audio_threat(&self) -> Target {
        self.perception.audio_threat
    }

    fn target(&self) -> Target {
        self.target
    }

    fn set_target(&mut self, kind: TargetKind, source: SourceId, position: Vec3, distance: f32) {
        self.target.set(kind, source, position, distance, self.now);
    }

    fn set_target_from(&mut self, threat: Target) {
        self.target = threat;
    }

    fn clear_target(&mut self) {
        self.target.clear();
    }

    fn is_target_reached(&self) -> bool {
        self.target_reached
    }

    fn in_melee_range(&self) -> bool {
        self.in_melee
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn set_seeking(&mut self, seeking: i32) {
        self.seeking = seeking.clamp(-1, 1);
    }

    fn set_feeding(&mut self, feeding: bool) {
        self.feeding = feeding;
    }

    fn set_attack_variant(&mut self, variant: i32) {
        self.attack_variant = variant;
    }

    fn look_at(&mut self, point: Vec3, weight: f32) {
        if let Some(animator) = self.animator.as_deref_mut() {
            animator.set_look_at(point, weight);
        }
    }

    fn set_nav_control(&mut self, position: bool, rotation: bool) {
        if let Some(nav) = self.nav.as_deref_mut() {
            nav.set_control(position, rotation);
        }
    }

    fn set_destination(&mut self, point: Vec3) {
        if let Some(nav) = self.nav.as_deref_mut() {
            nav.set_destination(point);
        }
    }

    fn stop_nav(&mut self) {
        if let Some(nav) = self.nav.as_deref_mut() {
            nav.stop();
        }
    }

    fn resume_nav(&mut self) {
        if let Some(nav) = self.nav.as_deref_mut() {
            nav.resume();
        }
    }

    fn has_path(&self) -> bool {
        self.nav.as_deref().is_some_and(|nav| nav.has_path())
    }

    fn is_path_pending(&self) -> bool {
        self.nav.as_deref().is_some_and(|nav| nav.is_pending())
    }

    fn is_path_stale(&self) -> bool {
        self.nav.as_deref().is_some_and(|nav| nav.is_path_stale())
    }

    fn path_status(&self) -> PathStatus {
        self.nav
            .as_deref()
            .map_or(PathStatus::Invalid, |nav| nav.path_status())
    }

    fn steering_target(&self) -> Vec3 {
        self.nav
            .as_deref()
            .map_or(self.position, |nav| nav.steering_target())
    }

    fn desired_velocity(&self) -> Vec3 {
        self.nav
            .as_deref()
            .map_or(Vec3::ZERO, |nav| nav.desired_velocity())
    }

    fn waypoint_position(&mut self, advance: bool) -> Option<Vec3> {
        let (network, cursor) = self.waypoints.as_mut()?;
        if advance {
            cursor.advance(network, &mut self.rng);
        }
        let position = cursor.position(network).ok()?;
        let distance = self.position.distance(position);
        self.target
            .set(TargetKind::Waypoint, SourceId::INVALID, position, distance, self.now);
        Some(position)
    }

    fn sensor_radius(&self) -> f32 {
        self.profile.sensor_radius
    }

    fn intelligence(&self) -> f32 {
        self.profile.intelligence
    }

    fn satisfaction(&self) -> f32 {
        self.satisfaction
    }

    fn set_satisfaction(&mut self, value: f32) {
        self.satisfaction = value.clamp(0.0, 1.0);
    }

    fn replenish_rate(&self) -> f32 {
        self.tunables.replenish_rate
    }

    fn is_feeding_clip_active(&self) -> bool {
        self.animator
            .as_deref()
            .is_some_and(|animator| animator.is_feeding_clip_active())
    }
}
