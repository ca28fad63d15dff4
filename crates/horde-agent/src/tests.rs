use std::sync::{Arc, Mutex};

use horde_anim::{AnimLayer, AnimParam, AnimatorSink, Bone, RecordingAnimator};
use horde_behavior::AgentContext;
use horde_core::{
    AgentId, BodyPartTag, BoneControl, ColliderId, StateKind, Tick, Vec3, WaypointId,
};
use horde_nav::{KinematicNav, NavAgent, WaypointCursor, WaypointNetwork};
use horde_sense::{BodyPartRegistry, Layer, SensorPhase, StaticScene, Stimulus};

use crate::body::AgentBody;
use crate::controller::Controller;
use crate::damage::{DamageSpec, hit_reaction};
use crate::states::StateSet;

const SELF: AgentId = AgentId(0);
const PLAYER: ColliderId = ColliderId(1);
const TICK_SECS: f32 = 0.1;

fn v(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3 { x, y, z }
}

/// Animator the test can keep a readback handle on after handing the sink to
/// the body.
#[derive(Clone)]
struct SharedAnimator(Arc<Mutex<RecordingAnimator>>);

impl SharedAnimator {
    fn new() -> SharedAnimator {
        SharedAnimator(Arc::new(Mutex::new(RecordingAnimator::new())))
    }
}

impl AnimatorSink for SharedAnimator {
    fn set_float(&mut self, param: AnimParam, value: f32) {
        self.0.lock().unwrap().set_float(param, value);
    }

    fn set_int(&mut self, param: AnimParam, value: i32) {
        self.0.lock().unwrap().set_int(param, value);
    }

    fn set_bool(&mut self, param: AnimParam, value: bool) {
        self.0.lock().unwrap().set_bool(param, value);
    }

    fn trigger(&mut self, param: AnimParam) {
        self.0.lock().unwrap().trigger(param);
    }

    fn set_layer_weight(&mut self, layer: AnimLayer, weight: f32) {
        self.0.lock().unwrap().set_layer_weight(layer, weight);
    }

    fn set_look_at(&mut self, position: Vec3, weight: f32) {
        self.0.lock().unwrap().set_look_at(position, weight);
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.0.lock().unwrap().set_enabled(enabled);
    }

    fn bone_world(&self, bone: Bone) -> Option<(Vec3, Vec3)> {
        self.0.lock().unwrap().bone_world(bone)
    }

    fn is_feeding_clip_active(&self) -> bool {
        self.0.lock().unwrap().is_feeding_clip_active()
    }
}

fn network() -> Arc<WaypointNetwork> {
    Arc::new(
        WaypointNetwork::from_points(vec![v(0.0, 0.0, 20.0), v(20.0, 0.0, 20.0), v(20.0, 0.0, 0.0)])
            .unwrap(),
    )
}

/// A fully wired controller at the origin, facing +z, plus the animator
/// readback handle.
fn controller() -> (Controller, SharedAnimator) {
    let animator = SharedAnimator::new();
    let body = AgentBody::new(SELF, Vec3::ZERO, 42)
        .with_tick_duration(TICK_SECS)
        .with_nav(Box::new(KinematicNav::new(Vec3::ZERO)))
        .with_animator(Box::new(animator.clone()))
        .with_waypoints(network(), WaypointCursor::new(WaypointId(0), false));
    let mut c = Controller::new(body, StateSet::standard(), 42);
    c.drain_transitions(); // discard the construction-time None → Idle
    (c, animator)
}

/// Scene with one player sphere straight ahead at sensor height.
fn player_scene(at: Vec3) -> StaticScene {
    StaticScene::from_spheres([(at, 0.5, PLAYER, Layer::Player)])
}

fn head_hit(damage: i32, force: Vec3, from: Vec3) -> DamageSpec {
    DamageSpec {
        position: v(0.0, 1.6, 0.3),
        force,
        damage,
        part: BodyPartTag::Head,
        attacker_position: from,
        hit_direction: 0,
    }
}

fn body_hit(part: BodyPartTag, damage: i32, force: Vec3, from: Vec3) -> DamageSpec {
    DamageSpec {
        position: v(0.0, 1.0, 0.3),
        force,
        damage,
        part,
        attacker_position: from,
        hit_direction: 0,
    }
}

/// Run `n` full ticks against an empty scene.
fn run_ticks(c: &mut Controller, scene: &StaticScene, from: Tick, n: u64) -> Tick {
    let mut now = from;
    for _ in 0..n {
        now = Tick(now.0 + 1);
        c.begin_tick(now);
        c.update(TICK_SECS);
        c.late_update(scene);
    }
    now
}

// ── Hit-reaction table ──────────────────────────────────────────────────────

mod reactions {
    use super::*;

    fn spec_at(position: Vec3, part: BodyPartTag, hit_direction: i32) -> DamageSpec {
        DamageSpec {
            position,
            force: v(0.0, 0.0, 0.5),
            damage: 10,
            part,
            attacker_position: v(0.0, 0.0, 5.0),
            hit_direction,
        }
    }

    #[test]
    fn head_variants_split_on_angle() {
        let fwd = Vec3::FORWARD;
        // Straight ahead.
        assert_eq!(hit_reaction(&spec_at(v(0.0, 1.6, 1.0), BodyPartTag::Head, 0), Vec3::ZERO, fwd), 2);
        // Well to the left (negative signed angle).
        assert_eq!(hit_reaction(&spec_at(v(-1.0, 1.6, 1.0), BodyPartTag::Head, 0), Vec3::ZERO, fwd), 1);
        // Well to the right.
        assert_eq!(hit_reaction(&spec_at(v(1.0, 1.6, 1.0), BodyPartTag::Head, 0), Vec3::ZERO, fwd), 3);
    }

    #[test]
    fn weapon_direction_hint_overrides_a_central_hit() {
        let fwd = Vec3::FORWARD;
        assert_eq!(hit_reaction(&spec_at(v(0.0, 1.6, 1.0), BodyPartTag::Head, -1), Vec3::ZERO, fwd), 1);
        assert_eq!(hit_reaction(&spec_at(v(0.0, 1.6, 1.0), BodyPartTag::Head, 1), Vec3::ZERO, fwd), 3);
    }

    #[test]
    fn weapon_direction_hint_beats_a_contradicting_angle() {
        let fwd = Vec3::FORWARD;
        // Impact lands well to the left, but the weapon insists on right.
        assert_eq!(hit_reaction(&spec_at(v(-1.0, 1.6, 1.0), BodyPartTag::Head, 1), Vec3::ZERO, fwd), 3);
        assert_eq!(hit_reaction(&spec_at(v(1.0, 1.0, 1.0), BodyPartTag::UpperBody, -1), Vec3::ZERO, fwd), 4);
    }

    #[test]
    fn upper_body_uses_the_wider_band() {
        let fwd = Vec3::FORWARD;
        // ~17° off axis: outside the head band, inside the torso band.
        let slight = v(0.3, 1.0, 1.0);
        assert_eq!(hit_reaction(&spec_at(slight, BodyPartTag::UpperBody, 0), Vec3::ZERO, fwd), 5);
        assert_eq!(hit_reaction(&spec_at(v(-1.0, 1.0, 1.0), BodyPartTag::UpperBody, 0), Vec3::ZERO, fwd), 4);
        assert_eq!(hit_reaction(&spec_at(v(1.0, 1.0, 1.0), BodyPartTag::UpperBody, 0), Vec3::ZERO, fwd), 6);
    }

    #[test]
    fn lower_body_has_no_reaction_clip() {
        assert_eq!(
            hit_reaction(&spec_at(v(0.0, 0.4, 1.0), BodyPartTag::LowerBody, 0), Vec3::ZERO, Vec3::FORWARD),
            0
        );
    }
}

// ── Damage without ragdoll ──────────────────────────────────────────────────

mod flinch {
    use super::*;

    #[test]
    fn weak_frontal_hit_plays_a_reaction_and_keeps_the_machine_running() {
        let (mut c, animator) = controller();
        c.take_damage(body_hit(BodyPartTag::UpperBody, 10, v(0.0, 0.0, 0.5), v(0.0, 0.0, 5.0)));

        assert_eq!(c.body().bone_control(), BoneControl::Animated);
        assert_eq!(c.current_state(), StateKind::Idle);
        assert_eq!(animator.0.lock().unwrap().int(AnimParam::HitType), Some(5));
        assert!(animator.0.lock().unwrap().drain_triggers().contains(&AnimParam::Hit));
    }

    #[test]
    fn upper_body_accumulation_drives_the_arm_layer() {
        let (mut c, animator) = controller();
        c.take_damage(body_hit(BodyPartTag::UpperBody, 40, v(0.0, 0.0, 0.5), v(0.0, 0.0, 5.0)));

        assert_eq!(c.body().upper_body_damage(), 40);
        let rec = animator.0.lock().unwrap();
        assert_eq!(rec.layer_weight(AnimLayer::UpperBody), Some(1.0));
        assert_eq!(rec.layer_weight(AnimLayer::LowerBody), Some(0.0));
        assert_eq!(rec.bool_param(AnimParam::Crawling), Some(false));
    }
}

// ── Ragdoll entry ───────────────────────────────────────────────────────────

mod ragdoll {
    use super::*;

    #[test]
    fn strong_hit_suspends_the_machine_and_releases_the_body() {
        let (mut c, animator) = controller();
        c.take_damage(body_hit(BodyPartTag::UpperBody, 10, v(0.0, 0.0, 2.0), v(0.0, 0.0, 5.0)));

        assert_eq!(c.body().bone_control(), BoneControl::Ragdoll);
        assert_eq!(c.current_state(), StateKind::None);
        assert!(!c.body().is_collider_enabled());
        assert!(c.body().are_parts_released());
        assert!(!animator.0.lock().unwrap().is_enabled());
        assert_eq!(c.drain_transitions(), vec![(StateKind::Idle, StateKind::None)]);

        let impulses = c.body_mut().drain_impulses();
        assert_eq!(impulses.len(), 1);
        assert_eq!(impulses[0].0, BodyPartTag::UpperBody);
    }

    #[test]
    fn lower_body_hits_always_drop_the_agent() {
        let (mut c, _) = controller();
        c.take_damage(body_hit(BodyPartTag::LowerBody, 10, v(0.0, 0.0, 0.2), v(0.0, 0.0, 5.0)));
        assert_eq!(c.body().bone_control(), BoneControl::Ragdoll);
        // Too weak to also impart an impulse.
        assert!(c.body_mut().drain_impulses().is_empty());
    }

    #[test]
    fn a_hit_from_behind_cannot_be_absorbed() {
        let (mut c, _) = controller();
        // Attacker standing behind (-z while the agent faces +z).
        c.take_damage(body_hit(BodyPartTag::UpperBody, 10, v(0.0, 0.0, 0.2), v(0.0, 0.0, -5.0)));
        assert_eq!(c.body().bone_control(), BoneControl::Ragdoll);
    }

    #[test]
    fn update_is_a_no_op_while_ragdolled() {
        let (mut c, _) = controller();
        let scene = StaticScene::new();
        c.take_damage(head_hit(10, v(0.0, 0.0, 2.0), v(0.0, 0.0, 5.0)));
        let pos = c.body().position();
        run_ticks(&mut c, &scene, Tick(0), 5);
        assert_eq!(c.body().position(), pos);
        assert_eq!(c.current_state(), StateKind::None);
    }

    #[test]
    fn fatal_headshot_never_reanimates() {
        let (mut c, _) = controller();
        let scene = StaticScene::new();
        c.take_damage(head_hit(100, v(0.0, 0.0, 2.0), v(0.0, 0.0, 5.0)));
        assert!(c.body().is_dead());
        assert_eq!(c.body().bone_control(), BoneControl::Ragdoll);

        run_ticks(&mut c, &scene, Tick(0), 200);
        assert_eq!(c.body().bone_control(), BoneControl::Ragdoll);
        assert_eq!(c.current_state(), StateKind::None);
    }
}

// ── Reanimation ─────────────────────────────────────────────────────────────

mod reanimation {
    use super::*;

    fn ragdoll_bones(animator: &SharedAnimator) {
        let mut rec = animator.0.lock().unwrap();
        rec.set_bone_world(Bone::Head, v(0.0, 0.2, -1.0), Vec3::UP);
        rec.set_bone_world(Bone::LeftFoot, v(-0.2, 0.1, 0.6), Vec3::UP);
        rec.set_bone_world(Bone::RightFoot, v(0.2, 0.1, 0.6), Vec3::UP);
        rec.set_bone_world(Bone::Root, v(0.0, 0.3, 0.0), Vec3::UP);
    }

    #[test]
    fn survivor_waits_blends_and_comes_back_alerted() {
        let (mut c, animator) = controller();
        let scene = StaticScene::new();
        ragdoll_bones(&animator);

        c.begin_tick(Tick(10));
        c.take_damage(body_hit(BodyPartTag::UpperBody, 10, v(0.0, 0.0, 2.0), v(0.0, 0.0, 5.0)));
        animator.0.lock().unwrap().drain_triggers();

        // Wait period: 3.0 s at 0.1 s ticks → deadline at tick 40.
        let now = run_ticks(&mut c, &scene, Tick(10), 29);
        assert_eq!(now, Tick(39));
        assert_eq!(c.body().bone_control(), BoneControl::Ragdoll);

        let now = run_ticks(&mut c, &scene, now, 1);
        assert_eq!(now, Tick(40));
        assert_eq!(c.body().bone_control(), BoneControl::RagdollToAnimated);
        assert!(animator.0.lock().unwrap().is_enabled());
        assert!(
            animator.0.lock().unwrap().drain_triggers().contains(&AnimParam::ReanimateFromBack)
        );

        // Lead-in re-grounds the root under the ragdoll hip; the head lay
        // towards -z, so the agent now faces -z.
        assert_eq!(c.body().position(), v(0.0, 0.0, 0.0));
        assert!(c.body().forward().z < -0.9);

        // Blend: 0.1 s lead-in + 0.5 s blend → complete by tick 46.
        let now = run_ticks(&mut c, &scene, now, 6);
        assert_eq!(now, Tick(46));
        assert_eq!(c.body().bone_control(), BoneControl::Animated);
        assert!(c.body().is_collider_enabled());
        assert_eq!(c.current_state(), StateKind::Alerted);
        assert!(
            c.drain_transitions().contains(&(StateKind::None, StateKind::Alerted))
        );
    }

    #[test]
    fn hits_while_down_reset_the_wait() {
        let (mut c, animator) = controller();
        let scene = StaticScene::new();
        ragdoll_bones(&animator);

        c.begin_tick(Tick(0));
        c.take_damage(body_hit(BodyPartTag::UpperBody, 10, v(0.0, 0.0, 2.0), v(0.0, 0.0, 5.0)));

        // Halfway through the wait, another hit lands on the corpse.
        let now = run_ticks(&mut c, &scene, Tick(0), 20);
        c.take_damage(body_hit(BodyPartTag::UpperBody, 5, v(0.0, 0.0, 0.3), v(0.0, 0.0, 5.0)));

        // The original deadline (tick 30) passes without a get-up.
        let now = run_ticks(&mut c, &scene, now, 15);
        assert_eq!(now, Tick(35));
        assert_eq!(c.body().bone_control(), BoneControl::Ragdoll);

        // The rescheduled one (tick 50) fires.
        run_ticks(&mut c, &scene, now, 15);
        assert_eq!(c.body().bone_control(), BoneControl::RagdollToAnimated);
        assert_eq!(c.body().upper_body_damage(), 15);
    }

    #[test]
    fn crawl_threshold_reached_while_down_sticks_after_getting_up() {
        let (mut c, animator) = controller();
        let scene = StaticScene::new();
        ragdoll_bones(&animator);

        c.begin_tick(Tick(0));
        c.take_damage(body_hit(BodyPartTag::LowerBody, 50, v(0.0, 0.0, 2.0), v(0.0, 0.0, 5.0)));
        c.take_damage(body_hit(BodyPartTag::LowerBody, 50, v(0.0, 0.0, 0.3), v(0.0, 0.0, 5.0)));
        assert!(c.body().is_crawling());

        run_ticks(&mut c, &scene, Tick(0), 60);
        assert_eq!(c.body().bone_control(), BoneControl::Animated);
        assert_eq!(animator.0.lock().unwrap().bool_param(AnimParam::Crawling), Some(true));

        // Any frontal tap now drops the crawler again.
        c.take_damage(body_hit(BodyPartTag::UpperBody, 1, v(0.0, 0.0, 0.1), v(0.0, 0.0, 5.0)));
        assert_eq!(c.body().bone_control(), BoneControl::Ragdoll);
    }
}

// ── Controller tick flow ────────────────────────────────────────────────────

mod tick_flow {
    use super::*;

    #[test]
    fn seams_hand_out_mutable_trait_objects() {
        let (mut c, animator) = controller();
        let body = c.body_mut();
        if let Some(nav) = body.nav_mut() {
            nav.set_speed(2.0);
        }
        if let Some(sink) = body.animator_mut() {
            sink.set_bool(AnimParam::Feeding, true);
        }
        assert!(body.nav().is_some());
        assert_eq!(animator.0.lock().unwrap().bool_param(AnimParam::Feeding), Some(true));

        let mut states = StateSet::standard();
        assert!(states.get_mut(StateKind::Idle).is_some());
        assert!(states.get_mut(StateKind::None).is_none());
    }

    #[test]
    fn starts_in_idle() {
        let animator = SharedAnimator::new();
        let body = AgentBody::new(SELF, Vec3::ZERO, 42).with_animator(Box::new(animator.clone()));
        let mut c = Controller::new(body, StateSet::standard(), 42);
        assert_eq!(c.current_state(), StateKind::Idle);
        assert_eq!(c.drain_transitions(), vec![(StateKind::None, StateKind::Idle)]);
    }

    #[test]
    fn sighted_player_pulls_idle_into_pursuit() {
        let (mut c, _) = controller();
        let player_at = v(0.0, 1.5, 3.0);
        let scene = player_scene(player_at);
        let registry = BodyPartRegistry::new();

        c.begin_tick(Tick(1));
        c.ingest(
            Stimulus::Player { collider: PLAYER, position: player_at },
            SensorPhase::Stay,
            &scene,
            &registry,
        );
        c.update(TICK_SECS);

        assert_eq!(c.current_state(), StateKind::Pursuit);
        assert_eq!(c.drain_transitions(), vec![(StateKind::Idle, StateKind::Pursuit)]);
    }

    #[test]
    fn begin_tick_forgets_last_ticks_threats_and_arrival() {
        let (mut c, _) = controller();
        let player_at = v(0.0, 1.5, 3.0);
        let scene = player_scene(player_at);
        let registry = BodyPartRegistry::new();

        c.begin_tick(Tick(1));
        c.ingest(
            Stimulus::Player { collider: PLAYER, position: player_at },
            SensorPhase::Stay,
            &scene,
            &registry,
        );
        c.set_destination_reached(true);
        assert!(!c.body().perception().visual_threat.is_empty());
        assert!(c.body().is_target_reached());

        c.begin_tick(Tick(2));
        assert!(c.body().perception().visual_threat.is_empty());
        assert!(!c.body().is_target_reached());
    }

    #[test]
    fn intent_reaches_the_animator_every_tick() {
        let (mut c, animator) = controller();
        c.begin_tick(Tick(1));
        c.update(TICK_SECS);

        let rec = animator.0.lock().unwrap();
        assert_eq!(rec.float(AnimParam::Speed), Some(0.0));
        assert_eq!(rec.int(AnimParam::Seeking), Some(0));
        assert_eq!(rec.bool_param(AnimParam::Feeding), Some(false));
    }

    #[test]
    fn movement_burns_satisfaction_by_speed_cubed() {
        let (mut c, _) = controller();
        c.body_mut().set_speed(3.0);
        c.begin_tick(Tick(1));
        c.update(TICK_SECS);

        // Idle leaves the pre-set speed alone, so one tick drains
        // 0.1 * 0.1 / 100 * 27.
        let expected = 1.0 - 0.1 * TICK_SECS / 100.0 * 27.0;
        assert!((c.body().satisfaction() - expected).abs() < 1e-6);
    }

    #[test]
    fn melee_flag_is_plumbed_through() {
        let (mut c, _) = controller();
        c.set_melee_range(true);
        assert!(c.body().in_melee_range());
        c.set_melee_range(false);
        assert!(!c.body().in_melee_range());
    }
}
