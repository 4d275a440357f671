//! Balloon Barrage - a tower-defense/FPS hybrid simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collision, entity lifecycle, waves)
//! - `config`: Data-driven wave composition and upgrade catalog
//! - `snapshot`: Read-only per-frame handoff to a renderer
//!
//! Rendering, asset loading and raw input handling are external collaborators:
//! the core consumes per-frame derived input (look delta, move intent, fire
//! command) and exposes entity transforms plus resolved material state.

pub mod config;
pub mod sim;
pub mod snapshot;

pub use config::GameConfig;
pub use sim::{GameState, TickInput, tick};

use glam::{Mat4, Vec3};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;

    /// Terrain envelope: half extent on x/z, floor and ceiling on y.
    /// Anything outside is out of play.
    pub const TERRAIN_HALF_EXTENT: f32 = 120.0;
    pub const TERRAIN_FLOOR: f32 = -2.0;
    pub const TERRAIN_CEILING: f32 = 80.0;

    /// Player defaults
    pub const PLAYER_SPAWN: glam::Vec3 = glam::Vec3::new(0.0, 2.0, 40.0);
    pub const PLAYER_HALF_EXTENTS: glam::Vec3 = glam::Vec3::new(0.8, 1.8, 0.8);
    pub const PLAYER_MOVE_SPEED: f32 = 12.0;
    pub const LOOK_SENSITIVITY: f32 = 0.005;

    /// Projectile defaults
    pub const PROJECTILE_HALF_EXTENTS: glam::Vec3 = glam::Vec3::new(0.4, 0.4, 0.4);
    pub const PROJECTILE_GRAVITY: f32 = 9.8;

    /// Balloon bounding sphere radius
    pub const BALLOON_RADIUS: f32 = 1.5;

    /// Delay between a cleared wave and the next one spawning (seconds)
    pub const INTER_WAVE_DELAY: f32 = 3.0;

    /// Multishot angular spread between adjacent barrels (radians)
    pub const MULTISHOT_SPREAD: f32 = 0.12;
}

/// Convert a duration in seconds to whole simulation ticks (rounded up so a
/// nonzero delay never collapses to "due immediately").
#[inline]
pub fn secs_to_ticks(secs: f32) -> u64 {
    (secs / consts::SIM_DT).ceil() as u64
}

/// Translation component of an affine transform.
#[inline]
pub fn translation_of(m: &Mat4) -> Vec3 {
    m.w_axis.truncate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secs_to_ticks_rounds_up() {
        assert_eq!(secs_to_ticks(0.0), 0);
        assert_eq!(secs_to_ticks(consts::SIM_DT), 1);
        assert_eq!(secs_to_ticks(consts::SIM_DT * 1.5), 2);
        assert_eq!(secs_to_ticks(1.0), 120);
    }

    #[test]
    fn test_translation_of() {
        let m = Mat4::from_translation(Vec3::new(1.0, -2.0, 3.0));
        assert_eq!(translation_of(&m), Vec3::new(1.0, -2.0, 3.0));
    }
}
