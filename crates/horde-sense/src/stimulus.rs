//! Sensor-overlap stimuli and the collision-layer vocabulary.

use horde_core::{ColliderId, Vec3};

/// Which edge of the sensor overlap generated the event.
///
/// `Enter` and `Stay` are treated identically by perception (the sensor
/// re-reports every overlapping collider every tick); `Exit` events are
/// dropped on the floor.  The distinction is kept because sound emitters
/// and trace output care about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SensorPhase {
    Enter,
    Stay,
    Exit,
}

/// A single collider reported by an agent's spherical sensor this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stimulus {
    /// The player's aggregate collider.
    Player {
        collider: ColliderId,
        position: Vec3,
    },
    /// A flashlight cone.  `beam_length` scales the aggravation factor.
    Light {
        collider:    ColliderId,
        position:    Vec3,
        beam_length: f32,
    },
    /// An expanding sound sphere.  `radius` is the current audible radius.
    Sound {
        collider: ColliderId,
        center:   Vec3,
        radius:   f32,
    },
    /// A static food source (corpse, bait).
    Food {
        collider: ColliderId,
        position: Vec3,
    },
}

impl Stimulus {
    pub fn collider(&self) -> ColliderId {
        match *self {
            Stimulus::Player { collider, .. }
            | Stimulus::Light { collider, .. }
            | Stimulus::Sound { collider, .. }
            | Stimulus::Food { collider, .. } => collider,
        }
    }

    /// World position the stimulus is evaluated against.  For sounds this is
    /// the sphere center, not the closest point on the sphere.
    pub fn position(&self) -> Vec3 {
        match *self {
            Stimulus::Player { position, .. }
            | Stimulus::Light { position, .. }
            | Stimulus::Food { position, .. } => position,
            Stimulus::Sound { center, .. } => center,
        }
    }
}

// ── Collision layers ────────────────────────────────────────────────────────

/// Coarse occlusion categories for scene geometry and dynamic colliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Layer {
    /// Walls, terrain, props.  Always blocks sight.
    Default,
    /// The player's hull collider.
    Player,
    /// An AI body-part collider (owned by some agent).
    BodyPart,
    /// Visual aggravators (flashlights).  Never blocks sight.
    Aggravator,
}

/// Bit set of [`Layer`]s used to filter raycasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerMask(u8);

impl LayerMask {
    pub const EMPTY: LayerMask = LayerMask(0);

    /// Everything a sight ray can collide with: geometry, the player, and
    /// AI body parts.  Aggravators are intangible.
    pub const SIGHT: LayerMask =
        LayerMask(1 << Layer::Default as u8 | 1 << Layer::Player as u8 | 1 << Layer::BodyPart as u8);

    pub const fn single(layer: Layer) -> LayerMask {
        LayerMask(1 << layer as u8)
    }

    pub const fn with(self, layer: Layer) -> LayerMask {
        LayerMask(self.0 | 1 << layer as u8)
    }

    pub const fn contains(self, layer: Layer) -> bool {
        self.0 & (1 << layer as u8) != 0
    }
}
