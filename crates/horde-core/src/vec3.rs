//! Minimal 3D vector math.
//!
//! Single-precision is plenty for perception cones and reanimation blending,
//! and keeps per-agent state compact.  Only the operations the AI core
//! actually uses are provided — this is not a general linear-algebra library.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A 3D point or direction in world space (f32 components, Y is up).
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };
    /// Conventional "forward" for a freshly spawned agent.
    pub const FORWARD: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 1.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    #[inline]
    pub fn length_sq(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    /// Straight-line distance to `other`.
    #[inline]
    pub fn distance(self, other: Vec3) -> f32 {
        (other - self).length()
    }

    /// Unit-length copy, or `Vec3::ZERO` for degenerate inputs.
    pub fn normalized(self) -> Vec3 {
        let len = self.length();
        if len <= f32::EPSILON {
            Vec3::ZERO
        } else {
            self * (1.0 / len)
        }
    }

    /// Copy with the vertical component dropped — headings and reanimation
    /// alignment work in the ground plane.
    #[inline]
    pub fn horizontal(self) -> Vec3 {
        Vec3 { x: self.x, y: 0.0, z: self.z }
    }

    /// Component-wise linear interpolation, `t` clamped to [0, 1].
    pub fn lerp(self, other: Vec3, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        self + (other - self) * t
    }

    /// Unsigned angle between two directions, in degrees.
    ///
    /// Returns 0 when either vector is degenerate, matching the "no swing on
    /// zero steering" behavior the patrol turn test relies on.
    pub fn angle_deg(self, other: Vec3) -> f32 {
        let denom = (self.length_sq() * other.length_sq()).sqrt();
        if denom <= f32::EPSILON {
            return 0.0;
        }
        let cos = (self.dot(other) / denom).clamp(-1.0, 1.0);
        cos.acos().to_degrees()
    }

    /// Signed angle from `self` to `to` about the world up axis, in degrees.
    ///
    /// Positive means `to` lies clockwise (to the right) of `self` when
    /// viewed from above — the sign drives seek direction and the hit
    /// reaction table.
    pub fn signed_angle_deg(self, to: Vec3) -> f32 {
        if self == to {
            return 0.0;
        }
        let angle = self.angle_deg(to);
        angle * self.cross(to).y.signum()
    }

    /// Rotate about the world up axis by `degrees` (counter-clockwise viewed
    /// from above is positive, consistent with [`signed_angle_deg`]).
    ///
    /// [`signed_angle_deg`]: Vec3::signed_angle_deg
    pub fn rotated_y(self, degrees: f32) -> Vec3 {
        let r = degrees.to_radians();
        let (sin, cos) = (r.sin(), r.cos());
        Vec3 {
            x: self.x * cos + self.z * sin,
            y: self.y,
            z: -self.x * sin + self.z * cos,
        }
    }

    /// Rotate `self` toward `target` in the ground plane by at most
    /// `max_degrees`, preserving length.  This is the slerp-toward-heading
    /// primitive the states use instead of snapping to face a point.
    pub fn rotated_towards(self, target: Vec3, max_degrees: f32) -> Vec3 {
        let flat_self = self.horizontal();
        let flat_target = target.horizontal();
        if flat_self.length_sq() <= f32::EPSILON || flat_target.length_sq() <= f32::EPSILON {
            return self;
        }
        let signed = flat_self.signed_angle_deg(flat_target);
        let step = signed.abs().min(max_degrees.max(0.0)) * signed.signum();
        // rotated_y is CCW-positive; signed_angle is CW-positive.
        self.rotated_y(-step)
    }
}

// ── Operators ─────────────────────────────────────────────────────────────────

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}
