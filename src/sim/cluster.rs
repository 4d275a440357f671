//! Spatial cluster index over the balloon flight path
//!
//! Balloons share one scripted path, so progress ranges map to world regions
//! known at session start - no general grid or BVH needed. Each cluster owns a
//! static bounding box swept from its path-segment interval plus a transient
//! membership set refreshed every frame. Collision pruning is two-level:
//! cluster box vs projectile first, member balloons individually only when the
//! cluster-level test hits.

use glam::Vec3;

use super::bounds::BoundingVolume;
use super::entity::Balloon;
use super::path;
use crate::translation_of;

/// One static partition of the flight path.
#[derive(Debug, Clone)]
pub struct Cluster {
    /// Progress interval `[start, end)` this cluster covers.
    start: f32,
    end: f32,
    /// Fixed world-space box enclosing every path point in the interval,
    /// inflated by the balloon radius.
    bounds: BoundingVolume,
    /// Balloon indices currently inside the interval. Refreshed every frame,
    /// cleared after the collision pass.
    members: Vec<usize>,
}

impl Cluster {
    pub fn bounds(&self) -> &BoundingVolume {
        &self.bounds
    }

    pub fn members(&self) -> &[usize] {
        &self.members
    }
}

/// Static partitioning of the path into clusters, one per path segment.
#[derive(Debug, Clone)]
pub struct ClusterIndex {
    clusters: Vec<Cluster>,
}

impl ClusterIndex {
    /// Sweep the path once and build the fixed cluster boxes.
    pub fn build(inflate: f32) -> Self {
        let clusters = path::segment_bounds()
            .map(|(start, end)| {
                let mut min = Vec3::splat(f32::MAX);
                let mut max = Vec3::splat(f32::MIN);
                let mut progress = start;
                while progress <= end {
                    let p = translation_of(&path::path_transform(progress));
                    min = min.min(p);
                    max = max.max(p);
                    progress += 0.25;
                }
                Cluster {
                    start,
                    end,
                    bounds: BoundingVolume::Aabb {
                        min: min - Vec3::splat(inflate),
                        max: max + Vec3::splat(inflate),
                    },
                    members: Vec::new(),
                }
            })
            .collect();
        Self { clusters }
    }

    /// Assign every balloon to exactly one cluster by ordered range lookup,
    /// most advanced range first. Balloons past the last interval land in the
    /// final cluster (they retire this frame anyway).
    pub fn assign(&mut self, balloons: &[Balloon]) {
        for cluster in &mut self.clusters {
            cluster.members.clear();
        }
        for (idx, balloon) in balloons.iter().enumerate() {
            for cluster in self.clusters.iter_mut().rev() {
                if balloon.progress >= cluster.start {
                    cluster.members.push(idx);
                    break;
                }
            }
        }
    }

    /// Drop all transient membership. Must run after each frame's collision
    /// pass so no stale assignment survives into the next frame.
    pub fn clear_members(&mut self) {
        for cluster in &mut self.clusters {
            cluster.members.clear();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}
