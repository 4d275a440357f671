//! Render-facing snapshot of the simulation
//!
//! The sim never talks to a renderer directly. Each frame the host captures a
//! [`RenderSnapshot`]: one instance per drawable entity plus the HUD scalars.
//! Everything here is plain data so a renderer (or a headless harness) can
//! consume it without touching [`GameState`].

use glam::Mat4;

use crate::sim::state::{GamePhase, GameState};

/// Logical material for an instance. The renderer owns the actual palette;
/// the snapshot only says what kind of thing it is drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    Player,
    Projectile,
    Tree,
    Rock,
    BalloonRed,
    BalloonBlue,
    BalloonGreen,
    BalloonYellow,
    BalloonPink,
}

impl Material {
    /// Balloon material for a remaining durability. Tiers above the palette
    /// reuse the top color.
    pub fn for_balloon(durability: u32) -> Self {
        match durability {
            0 | 1 => Material::BalloonRed,
            2 => Material::BalloonBlue,
            3 => Material::BalloonGreen,
            4 => Material::BalloonYellow,
            _ => Material::BalloonPink,
        }
    }

    /// Suggested linear RGB, for hosts that do not carry their own palette.
    pub fn color(&self) -> [f32; 3] {
        match self {
            Material::Player => [0.2, 0.2, 0.8],
            Material::Projectile => [0.9, 0.9, 0.3],
            Material::Tree => [0.1, 0.5, 0.1],
            Material::Rock => [0.5, 0.5, 0.5],
            Material::BalloonRed => [0.9, 0.1, 0.1],
            Material::BalloonBlue => [0.1, 0.3, 0.9],
            Material::BalloonGreen => [0.1, 0.8, 0.2],
            Material::BalloonYellow => [0.9, 0.8, 0.1],
            Material::BalloonPink => [0.95, 0.4, 0.7],
        }
    }
}

/// One drawable entity.
#[derive(Debug, Clone, Copy)]
pub struct Instance {
    pub transform: Mat4,
    pub material: Material,
}

/// HUD scalars for the overlay.
#[derive(Debug, Clone, Copy)]
pub struct Hud {
    pub cash: u64,
    pub health: u32,
    pub wave: usize,
    pub pops: u64,
    pub phase: GamePhase,
}

/// Flat per-frame capture of everything drawable.
#[derive(Debug, Clone)]
pub struct RenderSnapshot {
    pub instances: Vec<Instance>,
    pub hud: Hud,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let mut instances = Vec::with_capacity(
            1 + state.natures.len() + state.balloons.len() + state.projectiles.len(),
        );

        instances.push(Instance {
            transform: state.player.collider.transform(),
            material: Material::Player,
        });

        for nature in &state.natures {
            let material = if nature.collider.size().y >= 2.0 {
                Material::Tree
            } else {
                Material::Rock
            };
            instances.push(Instance {
                transform: nature.collider.transform(),
                material,
            });
        }

        for balloon in &state.balloons {
            instances.push(Instance {
                transform: balloon.collider.transform(),
                material: Material::for_balloon(balloon.durability),
            });
        }

        // Projectiles render oriented along their launch direction.
        for projectile in &state.projectiles {
            let transform = projectile.collider.transform()
                * Mat4::from_rotation_y(projectile.yaw)
                * Mat4::from_rotation_x(projectile.pitch);
            instances.push(Instance {
                transform,
                material: Material::Projectile,
            });
        }

        RenderSnapshot {
            instances,
            hud: Hud {
                cash: state.cash,
                health: state.health,
                wave: state.scheduler.wave_index() + 1,
                pops: state.pops,
                phase: state.phase,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn test_capture_covers_all_entities() {
        let state = GameState::new(1, GameConfig::default());
        let snap = RenderSnapshot::capture(&state);
        // Player plus scenery; nothing spawned yet.
        assert_eq!(snap.instances.len(), 1 + state.natures.len());
        assert_eq!(snap.instances[0].material, Material::Player);
        assert_eq!(snap.hud.health, state.health);
        assert_eq!(snap.hud.wave, 1);
    }

    #[test]
    fn test_balloon_palette_follows_remaining_durability() {
        assert_eq!(Material::for_balloon(1), Material::BalloonRed);
        assert_eq!(Material::for_balloon(4), Material::BalloonYellow);
        // Off the top of the palette.
        assert_eq!(Material::for_balloon(9), Material::BalloonPink);
    }
}
