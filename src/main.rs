//! Balloon Barrage entry point
//!
//! Headless autopilot run: steps the simulation at the fixed timestep with a
//! scripted player that tracks the lead balloon, fires on cooldown, and buys
//! upgrades when it can afford them. Useful for balance passes and as a
//! reference host for the snapshot API.

use balloon_barrage::consts::{LOOK_SENSITIVITY, SIM_DT};
use balloon_barrage::sim::{GamePhase, TickInput, UpgradeKind, tick};
use balloon_barrage::snapshot::RenderSnapshot;
use balloon_barrage::{GameConfig, GameState};
use glam::Vec2;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xB411_0035);
    let config = match args.next() {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("failed to load config {path}: {err}");
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    log::info!("starting autopilot run, seed {seed}");
    let mut state = GameState::new(seed, config);

    // Upgrade shopping order for the autopilot.
    let shopping = [
        UpgradeKind::Pierce,
        UpgradeKind::FireRate,
        UpgradeKind::Multishot,
        UpgradeKind::ProjectileSpeed,
    ];

    // Hard cap so a stalled balance config cannot spin forever.
    let max_ticks = 120 * 60 * 30;
    for _ in 0..max_ticks {
        let input = autopilot(&state);
        tick(&mut state, &input, SIM_DT);

        for kind in shopping {
            while state.try_purchase(kind) {}
        }

        if state.phase != GamePhase::Playing {
            break;
        }
    }

    let snap = RenderSnapshot::capture(&state);
    match state.phase {
        GamePhase::Won => log::info!(
            "victory: {} pops, {} cash, {} health left",
            snap.hud.pops,
            snap.hud.cash,
            snap.hud.health
        ),
        GamePhase::Lost => log::info!("defeat on wave {}: {} pops", snap.hud.wave, snap.hud.pops),
        GamePhase::Playing => log::warn!("tick cap reached on wave {}", snap.hud.wave),
    }
}

fn load_config(path: &str) -> Result<GameConfig, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(GameConfig::from_json(&text)?)
}

/// Track the most advanced balloon and hold the trigger.
fn autopilot(state: &GameState) -> TickInput {
    let Some(target) = state
        .balloons
        .iter()
        .max_by(|a, b| a.progress.total_cmp(&b.progress))
    else {
        return TickInput::default();
    };

    let to_target = target.collider.position() - state.player.position();
    let flat = (to_target.x * to_target.x + to_target.z * to_target.z).sqrt();
    let want_yaw = (-to_target.x).atan2(-to_target.z);
    let want_pitch = to_target.y.atan2(flat);

    // look() subtracts sensitivity-scaled deltas.
    TickInput {
        look_delta: Vec2::new(
            (state.player.yaw - want_yaw) / LOOK_SENSITIVITY,
            (state.player.pitch - want_pitch) / LOOK_SENSITIVITY,
        ),
        move_intent: Vec2::ZERO,
        fire: true,
    }
}
