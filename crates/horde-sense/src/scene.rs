//! Raycast seam between perception and the host scene.
//!
//! # Design
//!
//! Perception never owns geometry.  It asks a [`PhysicsQuery`] for the
//! ordered hits along a sight ray and applies its own occlusion rules to the
//! answer.  Hosts embedding the framework in an engine implement the trait
//! against their physics world; [`StaticScene`] is the built-in
//! implementation for headless simulation and tests, backed by an R-tree
//! (via `rstar`) of tagged spheres.

use rstar::{RTree, RTreeObject, AABB};

use horde_core::{ColliderId, Vec3};

use crate::stimulus::{Layer, LayerMask};

// ── Query seam ──────────────────────────────────────────────────────────────

/// A single collider intersected by a ray, in hit order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub collider: ColliderId,
    pub layer:    Layer,
    pub distance: f32,
    pub point:    Vec3,
}

/// Read-only raycast access to the scene.
///
/// Implementations must return hits sorted by ascending `distance` and must
/// only report colliders whose layer is in `mask`.
pub trait PhysicsQuery {
    /// All hits along the segment `origin + t * direction, t ∈ [0, max_distance]`.
    fn raycast_all(
        &self,
        origin:       Vec3,
        direction:    Vec3,
        max_distance: f32,
        mask:         LayerMask,
    ) -> Vec<RayHit>;

    /// Downward ground probe.  Returns the `y` of the first `Default`-layer
    /// hit below `origin`, if any, searching `max_depth` units down.
    fn ground_height(&self, origin: Vec3, max_depth: f32) -> Option<f32> {
        let dir = Vec3 { x: 0.0, y: -1.0, z: 0.0 };
        self.raycast_all(origin, dir, max_depth, LayerMask::single(Layer::Default))
            .first()
            .map(|hit| hit.point.y)
    }
}

// ── StaticScene ─────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a tagged sphere with its 3-D AABB envelope.
#[derive(Clone)]
struct SphereEntry {
    center:   [f32; 3],
    radius:   f32,
    collider: ColliderId,
    layer:    Layer,
}

impl RTreeObject for SphereEntry {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        let r = self.radius;
        AABB::from_corners(
            [self.center[0] - r, self.center[1] - r, self.center[2] - r],
            [self.center[0] + r, self.center[1] + r, self.center[2] + r],
        )
    }
}

/// Sphere-soup scene with R-tree acceleration.
///
/// Colliders are approximated as spheres, which is exact enough for
/// occlusion tests between head-height rays and body/wall volumes.  The
/// tree is bulk-loaded once; dynamic colliders (body parts, the player) are
/// re-registered by rebuilding, which headless runs do at load time only.
pub struct StaticScene {
    tree: RTree<SphereEntry>,
}

impl StaticScene {
    pub fn new() -> StaticScene {
        StaticScene { tree: RTree::new() }
    }

    /// Bulk-load a scene from `(center, radius, collider, layer)` tuples.
    pub fn from_spheres<I>(spheres: I) -> StaticScene
    where
        I: IntoIterator<Item = (Vec3, f32, ColliderId, Layer)>,
    {
        let entries = spheres
            .into_iter()
            .map(|(c, r, collider, layer)| SphereEntry {
                center: [c.x, c.y, c.z],
                radius: r,
                collider,
                layer,
            })
            .collect();
        StaticScene { tree: RTree::bulk_load(entries) }
    }

    pub fn insert(&mut self, center: Vec3, radius: f32, collider: ColliderId, layer: Layer) {
        self.tree.insert(SphereEntry {
            center: [center.x, center.y, center.z],
            radius,
            collider,
            layer,
        });
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for StaticScene {
    fn default() -> StaticScene {
        StaticScene::new()
    }
}

/// Ray/sphere intersection.  Returns the smallest non-negative `t ≤ max_t`,
/// or `None` if the ray misses (rays starting inside a sphere hit at `t = 0`).
fn ray_sphere(origin: Vec3, dir: Vec3, max_t: f32, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.length_sq() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    if t >= 0.0 && t <= max_t { Some(t) } else { None }
}

impl PhysicsQuery for StaticScene {
    fn raycast_all(
        &self,
        origin:       Vec3,
        direction:    Vec3,
        max_distance: f32,
        mask:         LayerMask,
    ) -> Vec<RayHit> {
        let dir = direction.normalized();
        if dir == Vec3::ZERO || max_distance <= 0.0 {
            return Vec::new();
        }
        let end = origin + dir * max_distance;

        // Candidate pruning: query the tree with the segment's AABB, then
        // run the exact ray/sphere test on survivors.
        let lo = [
            origin.x.min(end.x),
            origin.y.min(end.y),
            origin.z.min(end.z),
        ];
        let hi = [
            origin.x.max(end.x),
            origin.y.max(end.y),
            origin.z.max(end.z),
        ];
        let envelope = AABB::from_corners(lo, hi);

        let mut hits: Vec<RayHit> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|e| mask.contains(e.layer))
            .filter_map(|e| {
                let center = Vec3 { x: e.center[0], y: e.center[1], z: e.center[2] };
                ray_sphere(origin, dir, max_distance, center, e.radius).map(|t| RayHit {
                    collider: e.collider,
                    layer:    e.layer,
                    distance: t,
                    point:    origin + dir * t,
                })
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}
