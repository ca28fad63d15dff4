//! In-memory animator for headless runs and assertions.

use rustc_hash::FxHashMap;

use horde_core::Vec3;

use crate::params::{AnimLayer, AnimParam, Bone};
use crate::sink::AnimatorSink;

/// An [`AnimatorSink`] that just remembers what was written.
///
/// Tests pre-load bone poses and the feeding-clip flag, run controller
/// ticks, then read the parameter maps back.  Triggers accumulate until
/// [`RecordingAnimator::drain_triggers`] so a test can assert "fired this
/// tick" without racing the controller.
#[derive(Debug, Default)]
pub struct RecordingAnimator {
    floats:   FxHashMap<AnimParam, f32>,
    ints:     FxHashMap<AnimParam, i32>,
    bools:    FxHashMap<AnimParam, bool>,
    triggers: Vec<AnimParam>,
    layers:   FxHashMap<AnimLayer, f32>,

    look_at:        Option<(Vec3, f32)>,
    enabled:        bool,
    feeding_active: bool,
    bones:          FxHashMap<Bone, (Vec3, Vec3)>,
}

impl RecordingAnimator {
    pub fn new() -> RecordingAnimator {
        RecordingAnimator { enabled: true, ..RecordingAnimator::default() }
    }

    // ── Fixture setup ─────────────────────────────────────────────────────

    pub fn set_feeding_clip_active(&mut self, active: bool) {
        self.feeding_active = active;
    }

    pub fn set_bone_world(&mut self, bone: Bone, position: Vec3, up: Vec3) {
        self.bones.insert(bone, (position, up));
    }

    // ── Readback ──────────────────────────────────────────────────────────

    pub fn float(&self, param: AnimParam) -> Option<f32> {
        self.floats.get(&param).copied()
    }

    pub fn int(&self, param: AnimParam) -> Option<i32> {
        self.ints.get(&param).copied()
    }

    pub fn bool_param(&self, param: AnimParam) -> Option<bool> {
        self.bools.get(&param).copied()
    }

    pub fn layer_weight(&self, layer: AnimLayer) -> Option<f32> {
        self.layers.get(&layer).copied()
    }

    pub fn look_at(&self) -> Option<(Vec3, f32)> {
        self.look_at
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Take the triggers fired since the last drain, in firing order.
    pub fn drain_triggers(&mut self) -> Vec<AnimParam> {
        std::mem::take(&mut self.triggers)
    }
}

impl AnimatorSink for RecordingAnimator {
    fn set_float(&mut self, param: AnimParam, value: f32) {
        self.floats.insert(param, value);
    }

    fn set_int(&mut self, param: AnimParam, value: i32) {
        self.ints.insert(param, value);
    }

    fn set_bool(&mut self, param: AnimParam, value: bool) {
        self.bools.insert(param, value);
    }

    fn trigger(&mut self, param: AnimParam) {
        self.triggers.push(param);
    }

    fn set_layer_weight(&mut self, layer: AnimLayer, weight: f32) {
        self.layers.insert(layer, weight.clamp(0.0, 1.0));
    }

    fn set_look_at(&mut self, position: Vec3, weight: f32) {
        self.look_at = Some((position, weight.clamp(0.0, 1.0)));
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn bone_world(&self, bone: Bone) -> Option<(Vec3, Vec3)> {
        self.bones.get(&bone).copied()
    }

    fn is_feeding_clip_active(&self) -> bool {
        self.feeding_active
    }
}
