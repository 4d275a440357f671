//! Deterministic simulation core
//!
//! All gameplay logic lives here, under a strict determinism discipline:
//! fixed timestep only, seeded RNG only, stable iteration order by entity id,
//! and no rendering or platform dependencies. Given the same seed, config,
//! and input sequence, two runs produce identical state.

pub mod bounds;
pub mod cluster;
pub mod collision;
pub mod entity;
pub mod events;
pub mod path;
pub mod state;
pub mod tick;
pub mod wave;

pub use bounds::{BoundingVolume, Collider, VolumeKind};
pub use cluster::ClusterIndex;
pub use collision::{CollisionLedger, volumes_overlap};
pub use entity::{Balloon, Nature, Player, PlayerStats, Projectile};
pub use events::{EventQueue, GameEvent};
pub use path::{PATH_END, PATH_SPAWN, path_transform, reached_end};
pub use state::{GamePhase, GameState, UpgradeKind};
pub use tick::{TickInput, tick};
pub use wave::{WavePhase, WaveScheduler};
