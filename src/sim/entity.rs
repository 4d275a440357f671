//! Entity kinds: player, projectile, balloon, nature
//!
//! Each kind owns a `Collider` and its own motion and lifecycle rules. All
//! moving entities share the implicit Active -> Retired lifecycle; retirement
//! is observed through `is_retired` and acted on by the frame loop's pruning
//! pass. Player and nature never retire.

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec2, Vec3};

use super::bounds::{Collider, VolumeKind};
use super::collision::volumes_overlap;
use super::path;
use crate::consts::*;

/// A fired projectile: box-bounded, ballistic, with a pierce budget.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub collider: Collider,
    pub velocity: Vec3,
    /// Remaining pierce capacity. Zero retires the projectile.
    pub durability: u32,
    /// Aim orientation at fire time, for rendering.
    pub pitch: f32,
    pub yaw: f32,
    pub out_of_bounds: bool,
}

impl Projectile {
    pub fn new(id: u32, origin: Vec3, dir: Vec3, speed: f32, pierce: u32, pitch: f32, yaw: f32) -> Self {
        Self {
            id,
            collider: Collider::new(
                Mat4::from_translation(origin),
                PROJECTILE_HALF_EXTENTS,
                VolumeKind::Box,
            ),
            velocity: dir.normalize_or_zero() * speed,
            durability: pierce,
            pitch,
            yaw,
            out_of_bounds: false,
        }
    }

    /// Advance by one timestep: translate, pull the vertical velocity down,
    /// and flag the projectile once it leaves the terrain envelope.
    pub fn integrate(&mut self, dt: f32) {
        let pos = self.collider.position() + self.velocity * dt;
        self.velocity.y -= PROJECTILE_GRAVITY * dt;
        self.collider.set_transform(Mat4::from_translation(pos));
        self.out_of_bounds = pos.y < TERRAIN_FLOOR
            || pos.y > TERRAIN_CEILING
            || pos.x.abs() > TERRAIN_HALF_EXTENT
            || pos.z.abs() > TERRAIN_HALF_EXTENT;
    }

    pub fn is_retired(&self) -> bool {
        self.durability == 0 || self.out_of_bounds
    }
}

/// A balloon riding the scripted flight path: sphere-bounded, with hit points.
#[derive(Debug, Clone)]
pub struct Balloon {
    pub id: u32,
    pub collider: Collider,
    /// Remaining hit points. Zero retires the balloon and awards currency.
    pub durability: u32,
    /// Hit points at spawn, for scoring.
    pub original_durability: u32,
    /// Path progress per second.
    pub speed: f32,
    pub progress: f32,
    pub reached_end: bool,
}

impl Balloon {
    pub fn new(id: u32, tier: u32, speed: f32) -> Self {
        let mut balloon = Self {
            id,
            collider: Collider::new(
                Mat4::from_translation(path::PATH_SPAWN),
                Vec3::splat(BALLOON_RADIUS),
                VolumeKind::Sphere,
            ),
            durability: tier,
            original_durability: tier,
            speed,
            progress: 0.0,
            reached_end: false,
        };
        balloon.follow_path();
        balloon
    }

    /// Accumulate progress and re-derive the transform from the path.
    pub fn advance(&mut self, dt: f32) {
        self.progress += dt * self.speed;
        self.follow_path();
    }

    /// Snap the transform (and bounding sphere) to the current progress.
    pub fn follow_path(&mut self) {
        self.collider.set_transform(path::path_transform(self.progress));
        self.reached_end = path::reached_end(self.progress);
    }

    pub fn is_retired(&self) -> bool {
        self.durability == 0 || self.reached_end
    }
}

/// Static scenery: an immobile box that fully blocks projectiles.
#[derive(Debug, Clone)]
pub struct Nature {
    pub id: u32,
    pub collider: Collider,
}

impl Nature {
    pub fn new(id: u32, position: Vec3, size: Vec3) -> Self {
        Self {
            id,
            collider: Collider::new(Mat4::from_translation(position), size, VolumeKind::Box),
        }
    }

    /// Scenery whose bounding box is shifted off its visual origin, e.g. a
    /// tree whose canopy centroid sits above the trunk base. The offset is
    /// additive on min/max, proportional to the size descriptor.
    pub fn with_bound_offset(id: u32, position: Vec3, size: Vec3, offset: Vec3) -> Self {
        Self {
            id,
            collider: Collider::with_offset(
                Mat4::from_translation(position),
                size,
                VolumeKind::Box,
                offset,
            ),
        }
    }
}

/// Upgradeable firing stats, bumped by shop purchases.
#[derive(Debug, Clone)]
pub struct PlayerStats {
    /// Pierce budget given to each projectile.
    pub pierce: u32,
    pub projectile_speed: f32,
    /// Seconds between shots.
    pub fire_interval: f32,
    /// Projectiles per shot, spread around the aim yaw.
    pub barrels: u32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            pierce: 1,
            projectile_speed: 50.0,
            fire_interval: 0.5,
            barrels: 1,
        }
    }
}

/// The player avatar: box-bounded, moved by tentative-then-validate steps.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: u32,
    pub collider: Collider,
    /// Vertical look angle, clamped to straight up/down.
    pub pitch: f32,
    /// Horizontal look angle, unbounded.
    pub yaw: f32,
    pub stats: PlayerStats,
    /// Cleared on fire, set again by the cooldown event.
    pub fire_ready: bool,
}

impl Player {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            collider: Collider::new(
                Mat4::from_translation(PLAYER_SPAWN),
                PLAYER_HALF_EXTENTS,
                VolumeKind::Box,
            ),
            pitch: 0.0,
            yaw: 0.0,
            stats: PlayerStats::default(),
            fire_ready: true,
        }
    }

    /// Apply a look delta from the input layer.
    pub fn look(&mut self, delta: Vec2) {
        self.yaw -= delta.x * LOOK_SENSITIVITY;
        self.pitch = (self.pitch - delta.y * LOOK_SENSITIVITY).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Walk-plane forward direction (ignores pitch).
    pub fn front(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Walk-plane strafe direction.
    pub fn right(&self) -> Vec3 {
        self.front().cross(Vec3::Y)
    }

    /// Full 3D aim direction including pitch.
    pub fn aim(&self) -> Vec3 {
        Vec3::new(
            -self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
    }

    pub fn position(&self) -> Vec3 {
        self.collider.position()
    }

    /// Tentatively move by `delta`, testing the candidate position against
    /// the nature set. On any hit the transform is rolled back and the move
    /// reports failure; there is no error path.
    pub fn try_move(&mut self, delta: Vec3, natures: &[Nature]) -> bool {
        let previous = self.collider.transform();
        let candidate = Mat4::from_translation(self.position() + delta);
        self.collider.set_transform(candidate);
        let blocked = natures
            .iter()
            .any(|n| volumes_overlap(self.collider.volume(), n.collider.volume()));
        if blocked {
            self.collider.set_transform(previous);
        }
        !blocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projectile_gravity_bends_velocity_down() {
        let mut p = Projectile::new(1, Vec3::new(0.0, 10.0, 0.0), -Vec3::Z, 50.0, 1, 0.0, 0.0);
        let vy0 = p.velocity.y;
        p.integrate(0.1);
        assert!((p.velocity.y - (vy0 - PROJECTILE_GRAVITY * 0.1)).abs() < 1e-5);
        assert!(p.collider.position().z < 0.0);
    }

    #[test]
    fn test_projectile_out_of_bounds_below_floor() {
        let mut p = Projectile::new(1, Vec3::new(0.0, TERRAIN_FLOOR + 0.5, 0.0), -Vec3::Y, 50.0, 1, 0.0, 0.0);
        p.integrate(0.1);
        assert!(p.out_of_bounds);
        assert!(p.is_retired());
    }

    #[test]
    fn test_balloon_spawns_on_path_and_advances() {
        let mut b = Balloon::new(1, 3, 2.0);
        let start = b.collider.position();
        b.advance(1.0);
        assert_ne!(b.collider.position(), start);
        assert!(!b.reached_end);
    }

    #[test]
    fn test_balloon_retires_at_terminal_progress() {
        let mut b = Balloon::new(1, 1, 1.0);
        b.progress = path::PATH_END;
        b.follow_path();
        assert!(b.reached_end);
        assert!(b.is_retired());
    }

    #[test]
    fn test_player_rollback_on_blocked_move() {
        let mut player = Player::new(0);
        let wall = Nature::new(
            1,
            player.position() + Vec3::new(0.0, 0.0, -3.0),
            Vec3::new(2.0, 4.0, 2.0),
        );
        let before = player.collider.transform();
        let moved = player.try_move(Vec3::new(0.0, 0.0, -2.0), std::slice::from_ref(&wall));
        assert!(!moved);
        assert_eq!(player.collider.transform(), before);
    }

    #[test]
    fn test_player_moves_freely_without_obstacles() {
        let mut player = Player::new(0);
        let before = player.position();
        assert!(player.try_move(Vec3::new(1.0, 0.0, 0.0), &[]));
        assert_eq!(player.position(), before + Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_front_and_right_are_orthonormal() {
        let mut player = Player::new(0);
        player.yaw = 1.2;
        assert!(player.front().dot(player.right()).abs() < 1e-6);
        assert!((player.front().length() - 1.0).abs() < 1e-6);
    }
}
