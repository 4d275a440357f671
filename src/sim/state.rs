//! Game state and session bookkeeping
//!
//! `GameState` owns every entity collection, the collision ledger, the
//! cluster index, the event queue, and the deterministic RNG. The frame loop
//! in `tick` is the sole mutator of the entity collections; event handlers
//! only append or flip flags.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::cluster::ClusterIndex;
use super::collision::CollisionLedger;
use super::entity::{Balloon, Nature, Player, Projectile};
use super::events::EventQueue;
use super::wave::WaveScheduler;
use crate::config::GameConfig;
use crate::consts::BALLOON_RADIUS;

/// Overall session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    /// Every configured wave spawned and drained.
    Won,
    /// Player health ran out.
    Lost,
}

/// The four purchasable upgrade tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeKind {
    Pierce,
    ProjectileSpeed,
    FireRate,
    Multishot,
}

/// Purchased tier count per track.
#[derive(Debug, Clone, Copy, Default)]
struct UpgradeLevels {
    pierce: usize,
    projectile_speed: usize,
    fire_rate: usize,
    multishot: usize,
}

/// Complete session state.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility.
    pub seed: u64,
    pub rng: Pcg32,
    pub config: GameConfig,
    /// Simulation tick counter; doubles as the game clock for the event
    /// queue.
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub balloons: Vec<Balloon>,
    pub natures: Vec<Nature>,
    pub ledger: CollisionLedger,
    pub clusters: ClusterIndex,
    pub scheduler: WaveScheduler,
    pub events: EventQueue,
    pub cash: u64,
    pub health: u32,
    /// Balloons destroyed this session.
    pub pops: u64,
    upgrade_levels: UpgradeLevels,
    next_id: u32,
}

impl GameState {
    pub fn new(seed: u64, config: GameConfig) -> Self {
        let mut next_id = 0;
        let mut alloc = || {
            let id = next_id;
            next_id += 1;
            id
        };
        let player = Player::new(alloc());
        let natures = default_scenery(&mut alloc);
        drop(alloc);

        let mut events = EventQueue::new();
        let scheduler = WaveScheduler::new();
        scheduler.start(&mut events, 0);

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            cash: config.starting_cash,
            health: config.starting_health,
            config,
            time_ticks: 0,
            phase: GamePhase::Playing,
            player,
            projectiles: Vec::new(),
            balloons: Vec::new(),
            natures,
            ledger: CollisionLedger::new(),
            clusters: ClusterIndex::build(BALLOON_RADIUS),
            scheduler,
            events,
            pops: 0,
            upgrade_levels: UpgradeLevels::default(),
            next_id,
        }
    }

    /// Allocate a fresh entity id. Ids are never reused.
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a balloon at the path start.
    pub fn spawn_balloon(&mut self, tier: u32, speed: f32) {
        let id = self.next_entity_id();
        log::debug!("spawn balloon id={id} tier={tier}");
        self.balloons.push(Balloon::new(id, tier, speed));
    }

    /// Purchased tier count on a track.
    pub fn upgrade_level(&self, kind: UpgradeKind) -> usize {
        match kind {
            UpgradeKind::Pierce => self.upgrade_levels.pierce,
            UpgradeKind::ProjectileSpeed => self.upgrade_levels.projectile_speed,
            UpgradeKind::FireRate => self.upgrade_levels.fire_rate,
            UpgradeKind::Multishot => self.upgrade_levels.multishot,
        }
    }

    /// Price of the next tier on a track, if any remains.
    pub fn next_upgrade_price(&self, kind: UpgradeKind) -> Option<u64> {
        self.next_tier(kind).map(|t| t.price)
    }

    fn next_tier(&self, kind: UpgradeKind) -> Option<crate::config::UpgradeTier> {
        let (track, level) = match kind {
            UpgradeKind::Pierce => (&self.config.upgrades.pierce, self.upgrade_levels.pierce),
            UpgradeKind::ProjectileSpeed => (
                &self.config.upgrades.projectile_speed,
                self.upgrade_levels.projectile_speed,
            ),
            UpgradeKind::FireRate => (
                &self.config.upgrades.fire_rate,
                self.upgrade_levels.fire_rate,
            ),
            UpgradeKind::Multishot => (
                &self.config.upgrades.multishot,
                self.upgrade_levels.multishot,
            ),
        };
        track.get(level).copied()
    }

    /// Buy the next tier of an upgrade track. Returns false if the track is
    /// maxed out or cash is short.
    pub fn try_purchase(&mut self, kind: UpgradeKind) -> bool {
        let Some(tier) = self.next_tier(kind) else {
            return false;
        };
        if self.cash < tier.price {
            return false;
        }
        self.cash -= tier.price;
        match kind {
            UpgradeKind::Pierce => {
                self.upgrade_levels.pierce += 1;
                self.player.stats.pierce = tier.value as u32;
            }
            UpgradeKind::ProjectileSpeed => {
                self.upgrade_levels.projectile_speed += 1;
                self.player.stats.projectile_speed = tier.value;
            }
            UpgradeKind::FireRate => {
                self.upgrade_levels.fire_rate += 1;
                self.player.stats.fire_interval = tier.value;
            }
            UpgradeKind::Multishot => {
                self.upgrade_levels.multishot += 1;
                self.player.stats.barrels = tier.value as u32;
            }
        }
        log::info!("purchased {kind:?}, cash left {}", self.cash);
        true
    }
}

/// Static obstacles placed at session start: a stand of trees and rocks in
/// the walkable area, clear of the flight path.
fn default_scenery(alloc: &mut impl FnMut() -> u32) -> Vec<Nature> {
    let tree = |id: u32, x: f32, z: f32| {
        let size = Vec3::new(1.5, 6.0, 1.5);
        // Canopy centroid sits above the trunk base.
        Nature::with_bound_offset(id, Vec3::new(x, 0.0, z), size, Vec3::new(0.0, size.y * 0.5, 0.0))
    };
    let rock = |id: u32, x: f32, z: f32| {
        Nature::new(id, Vec3::new(x, 1.0, z), Vec3::new(2.5, 1.5, 2.5))
    };
    vec![
        tree(alloc(), -15.0, 25.0),
        tree(alloc(), 14.0, 22.0),
        tree(alloc(), 8.0, 8.0),
        tree(alloc(), -25.0, 10.0),
        rock(alloc(), -8.0, 32.0),
        rock(alloc(), 20.0, 5.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::events::GameEvent;

    #[test]
    fn test_new_session_schedules_opening_wave() {
        let state = GameState::new(42, GameConfig::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.events.has_pending(GameEvent::AdvanceWave));
        assert!(state.balloons.is_empty());
        assert!(!state.natures.is_empty());
    }

    #[test]
    fn test_entity_ids_unique_across_kinds() {
        let mut state = GameState::new(42, GameConfig::default());
        let mut ids: Vec<u32> = state.natures.iter().map(|n| n.id).collect();
        ids.push(state.player.id);
        ids.push(state.next_entity_id());
        ids.push(state.next_entity_id());
        let mut deduped = ids.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(ids.len(), deduped.len());
    }

    #[test]
    fn test_purchase_deducts_cash_and_bumps_stats() {
        let mut state = GameState::new(42, GameConfig::default());
        state.cash = 10_000;
        let price = state.next_upgrade_price(UpgradeKind::Pierce).unwrap();
        assert!(state.try_purchase(UpgradeKind::Pierce));
        assert_eq!(state.cash, 10_000 - price);
        assert_eq!(state.player.stats.pierce, 2);
        assert_eq!(state.upgrade_level(UpgradeKind::Pierce), 1);
    }

    #[test]
    fn test_purchase_fails_when_broke_or_maxed() {
        let mut state = GameState::new(42, GameConfig::default());
        state.cash = 0;
        assert!(!state.try_purchase(UpgradeKind::FireRate));

        state.cash = 1_000_000;
        let track_len = state.config.upgrades.multishot.len();
        for _ in 0..track_len {
            assert!(state.try_purchase(UpgradeKind::Multishot));
        }
        assert!(!state.try_purchase(UpgradeKind::Multishot));
    }
}
