//! Pairwise collision testing and the collided-pair ledger
//!
//! The geometric predicate is symmetric and closed over the {box, sphere}
//! volume kinds. Gameplay response is deduplicated through a ledger of
//! normalized entity-id pairs: a pair that has already collided is still
//! re-tested geometrically every frame, but its response fires exactly once
//! over the entities' lifetimes.

use std::collections::HashSet;

use glam::Vec3;

use super::bounds::BoundingVolume;

/// Test two bounding volumes for overlap. Symmetric in its arguments.
///
/// Sphere-sphere overlap is strict: centers exactly `r1 + r2` apart do not
/// collide.
pub fn volumes_overlap(a: &BoundingVolume, b: &BoundingVolume) -> bool {
    use BoundingVolume::{Aabb, Sphere};
    match (*a, *b) {
        (
            Aabb {
                min: min_a,
                max: max_a,
            },
            Aabb {
                min: min_b,
                max: max_b,
            },
        ) => {
            min_a.x <= max_b.x
                && max_a.x >= min_b.x
                && min_a.y <= max_b.y
                && max_a.y >= min_b.y
                && min_a.z <= max_b.z
                && max_a.z >= min_b.z
        }
        (
            Sphere {
                center: c_a,
                radius: r_a,
            },
            Sphere {
                center: c_b,
                radius: r_b,
            },
        ) => c_a.distance_squared(c_b) < (r_a + r_b) * (r_a + r_b),
        (Aabb { min, max }, Sphere { center, radius })
        | (Sphere { center, radius }, Aabb { min, max }) => {
            // Clamp the sphere center into the box to find the closest point.
            let closest = Vec3::new(
                center.x.clamp(min.x, max.x),
                center.y.clamp(min.y, max.y),
                center.z.clamp(min.z, max.z),
            );
            closest.distance_squared(center) < radius * radius
        }
    }
}

/// Durable record of which entity pairs have already registered a collision.
///
/// Pairs are stored by id in normalized (low, high) order, so the record is
/// symmetric by construction and carries no references between entities.
/// Entity ids are never reused; pairs are pruned when an entity is retired.
#[derive(Debug, Clone, Default)]
pub struct CollisionLedger {
    pairs: HashSet<(u32, u32)>,
}

impl CollisionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(a: u32, b: u32) -> (u32, u32) {
        if a <= b { (a, b) } else { (b, a) }
    }

    /// Record a collision between two entities. Returns true if this is the
    /// first time the pair has collided (i.e. response should fire).
    pub fn record(&mut self, a: u32, b: u32) -> bool {
        self.pairs.insert(Self::key(a, b))
    }

    /// Whether the pair has already collided.
    pub fn contains(&self, a: u32, b: u32) -> bool {
        self.pairs.contains(&Self::key(a, b))
    }

    /// Drop every pair involving any of the given retired entities.
    pub fn forget_all(&mut self, retired: &[u32]) {
        if retired.is_empty() {
            return;
        }
        self.pairs
            .retain(|&(a, b)| !retired.contains(&a) && !retired.contains(&b));
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
