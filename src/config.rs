//! Data-driven game configuration
//!
//! Wave composition, pacing, and the upgrade catalog are static data loaded
//! once at session start, either from the built-in defaults or from JSON.
//! Nothing here is persisted back.

use serde::{Deserialize, Serialize};

/// One (durability tier, spawn count) entry of a wave's composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCount {
    pub tier: u32,
    pub count: u32,
}

/// Composition and pacing of one wave.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveConfig {
    /// Ordered (tier -> count) pairs, consumed in random order while
    /// spawning.
    pub composition: Vec<TierCount>,
    /// Seconds between spawns within this wave.
    pub spawn_interval: f32,
    /// Path progress per second for this wave's balloons.
    pub balloon_speed: f32,
}

impl WaveConfig {
    /// Total balloons this wave will spawn.
    pub fn total_count(&self) -> u32 {
        self.composition.iter().map(|tc| tc.count).sum()
    }
}

/// One purchasable step of an upgrade track.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UpgradeTier {
    pub price: u64,
    /// New stat value once purchased (meaning depends on the track).
    pub value: f32,
}

/// All four upgrade tracks, each an ordered list of tiers bought in sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeCatalog {
    /// Pierce budget per projectile.
    pub pierce: Vec<UpgradeTier>,
    /// Projectile launch speed.
    pub projectile_speed: Vec<UpgradeTier>,
    /// Seconds between shots (lower is faster).
    pub fire_rate: Vec<UpgradeTier>,
    /// Projectiles per shot.
    pub multishot: Vec<UpgradeTier>,
}

/// Complete static configuration surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub waves: Vec<WaveConfig>,
    pub upgrades: UpgradeCatalog,
    /// Cash awarded per point of a destroyed balloon's original durability.
    pub payout_per_hp: u64,
    pub starting_cash: u64,
    pub starting_health: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        let wave = |composition: &[(u32, u32)], spawn_interval: f32, balloon_speed: f32| WaveConfig {
            composition: composition
                .iter()
                .map(|&(tier, count)| TierCount { tier, count })
                .collect(),
            spawn_interval,
            balloon_speed,
        };
        let tiers = |entries: &[(u64, f32)]| {
            entries
                .iter()
                .map(|&(price, value)| UpgradeTier { price, value })
                .collect()
        };
        Self {
            waves: vec![
                wave(&[(1, 10)], 1.0, 4.0),
                wave(&[(1, 12), (2, 4)], 0.9, 4.5),
                wave(&[(1, 10), (2, 8), (3, 2)], 0.8, 5.0),
                wave(&[(2, 10), (3, 6)], 0.7, 5.5),
                wave(&[(3, 8), (4, 4), (5, 2)], 0.6, 6.0),
            ],
            upgrades: UpgradeCatalog {
                pierce: tiers(&[(150, 2.0), (400, 3.0), (900, 5.0)]),
                projectile_speed: tiers(&[(100, 60.0), (250, 75.0), (600, 95.0)]),
                fire_rate: tiers(&[(120, 0.35), (300, 0.25), (700, 0.15)]),
                multishot: tiers(&[(200, 2.0), (500, 3.0), (1200, 5.0)]),
            },
            payout_per_hp: 5,
            starting_cash: 200,
            starting_health: 100,
        }
    }
}

impl GameConfig {
    /// Parse a configuration from JSON. Missing fields fall back to the
    /// built-in defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_sane() {
        let config = GameConfig::default();
        assert!(!config.waves.is_empty());
        for w in &config.waves {
            assert!(w.total_count() > 0);
            assert!(w.spawn_interval > 0.0);
            assert!(w.balloon_speed > 0.0);
        }
        // Upgrade prices climb within each track.
        for track in [
            &config.upgrades.pierce,
            &config.upgrades.projectile_speed,
            &config.upgrades.fire_rate,
            &config.upgrades.multishot,
        ] {
            assert!(track.windows(2).all(|w| w[0].price < w[1].price));
        }
    }

    #[test]
    fn test_from_json_with_partial_fields() {
        let config = GameConfig::from_json(
            r#"{
                "waves": [
                    {
                        "composition": [{"tier": 1, "count": 2}, {"tier": 2, "count": 1}],
                        "spawn_interval": 0.5,
                        "balloon_speed": 3.0
                    }
                ],
                "starting_cash": 50
            }"#,
        )
        .unwrap();
        assert_eq!(config.waves.len(), 1);
        assert_eq!(config.waves[0].total_count(), 3);
        assert_eq!(config.starting_cash, 50);
        // Omitted fields come from the defaults.
        assert_eq!(config.payout_per_hp, GameConfig::default().payout_per_hp);
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        assert!(GameConfig::from_json("not json").is_err());
    }
}
