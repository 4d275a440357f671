//! Bounding volumes derived from entity transforms
//!
//! Every collidable carries either an axis-aligned box or a sphere. The volume
//! is a pure function of the owning transform and a size descriptor, and is
//! recomputed synchronously whenever the transform is replaced - it must never
//! be stale across a frame boundary.

use glam::{Mat4, Vec3};

use crate::translation_of;

/// Shape of an entity's bounding volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeKind {
    Box,
    Sphere,
}

/// A world-space bounding volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundingVolume {
    Aabb { min: Vec3, max: Vec3 },
    Sphere { center: Vec3, radius: f32 },
}

impl BoundingVolume {
    /// Recompute the volume from a transform and size descriptor.
    ///
    /// Boxes use the translation component plus/minus the size's per-axis
    /// half-extents, optionally shifted by an additive offset for entities
    /// whose visual origin does not coincide with their bounding center
    /// (tree trunks vs canopies). Spheres use only the translation and the
    /// first size component as radius.
    pub fn recompute(transform: &Mat4, size: Vec3, kind: VolumeKind, offset: Vec3) -> Self {
        let center = translation_of(transform) + offset;
        match kind {
            VolumeKind::Box => Self::Aabb {
                min: center - size,
                max: center + size,
            },
            VolumeKind::Sphere => Self::Sphere {
                center,
                radius: size.x,
            },
        }
    }

    /// Center point of the volume.
    pub fn center(&self) -> Vec3 {
        match *self {
            Self::Aabb { min, max } => (min + max) * 0.5,
            Self::Sphere { center, .. } => center,
        }
    }
}

/// A transform + size descriptor pair with its derived bounding volume.
///
/// The transform is owned exclusively and replaced wholesale (never mutated
/// field by field); `set_transform` is the only mutation path so the volume
/// invariant holds by construction.
#[derive(Debug, Clone)]
pub struct Collider {
    transform: Mat4,
    size: Vec3,
    kind: VolumeKind,
    offset: Vec3,
    volume: BoundingVolume,
}

impl Collider {
    pub fn new(transform: Mat4, size: Vec3, kind: VolumeKind) -> Self {
        Self::with_offset(transform, size, kind, Vec3::ZERO)
    }

    /// Collider whose bounding volume is shifted by an additive offset from
    /// the transform's translation.
    pub fn with_offset(transform: Mat4, size: Vec3, kind: VolumeKind, offset: Vec3) -> Self {
        let volume = BoundingVolume::recompute(&transform, size, kind, offset);
        Self {
            transform,
            size,
            kind,
            offset,
            volume,
        }
    }

    /// Replace the transform and recompute the bounding volume.
    pub fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
        self.volume = BoundingVolume::recompute(&transform, self.size, self.kind, self.offset);
    }

    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    pub fn volume(&self) -> &BoundingVolume {
        &self.volume
    }

    pub fn kind(&self) -> VolumeKind {
        self.kind
    }

    pub fn size(&self) -> Vec3 {
        self.size
    }

    /// World position (translation component, without bound offset).
    pub fn position(&self) -> Vec3 {
        translation_of(&self.transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_recompute_follows_translation() {
        let m = Mat4::from_translation(Vec3::new(10.0, 5.0, -3.0));
        let vol = BoundingVolume::recompute(&m, Vec3::new(2.0, 1.0, 0.5), VolumeKind::Box, Vec3::ZERO);
        assert_eq!(
            vol,
            BoundingVolume::Aabb {
                min: Vec3::new(8.0, 4.0, -3.5),
                max: Vec3::new(12.0, 6.0, -2.5),
            }
        );
    }

    #[test]
    fn test_sphere_uses_first_size_component_only() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let vol =
            BoundingVolume::recompute(&m, Vec3::new(1.5, 99.0, 99.0), VolumeKind::Sphere, Vec3::ZERO);
        assert_eq!(
            vol,
            BoundingVolume::Sphere {
                center: Vec3::new(1.0, 2.0, 3.0),
                radius: 1.5,
            }
        );
    }

    #[test]
    fn test_box_offset_shifts_min_and_max() {
        let m = Mat4::from_translation(Vec3::ZERO);
        let offset = Vec3::new(0.0, 2.0, 0.0);
        let vol = BoundingVolume::recompute(&m, Vec3::ONE, VolumeKind::Box, offset);
        assert_eq!(
            vol,
            BoundingVolume::Aabb {
                min: Vec3::new(-1.0, 1.0, -1.0),
                max: Vec3::new(1.0, 3.0, 1.0),
            }
        );
    }

    #[test]
    fn test_set_transform_recomputes_volume() {
        let mut collider = Collider::new(Mat4::IDENTITY, Vec3::ONE, VolumeKind::Sphere);
        collider.set_transform(Mat4::from_translation(Vec3::new(0.0, 7.0, 0.0)));
        assert_eq!(collider.volume().center(), Vec3::new(0.0, 7.0, 0.0));
    }
}
