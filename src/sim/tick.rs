//! Frame update loop
//!
//! One call per fixed timestep, deterministic order: event poll, player
//! look/move, fire handling, motion integration (bounding volumes recompute
//! with each transform replacement), cluster refresh, collision pass,
//! lifecycle pruning, cluster clear, wave drain poll. Violating this order
//! produces stale collision results, so everything lives in one function.

use glam::{Vec2, Vec3};

use super::collision::volumes_overlap;
use super::entity::Projectile;
use super::events::GameEvent;
use super::state::{GamePhase, GameState};
use crate::consts::*;
use crate::secs_to_ticks;

/// Input commands for a single tick, already reduced from raw device events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Mouse-look delta for this frame.
    pub look_delta: Vec2,
    /// Movement intent on the walk plane: x strafe, y forward.
    pub move_intent: Vec2,
    /// Fire command.
    pub fire: bool,
}

/// Advance the game state by one fixed timestep.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    let now = state.time_ticks;

    // Deferred events come due against the game clock, never wall time.
    while let Some(event) = state.events.pop_due(now) {
        match event {
            GameEvent::FireReady => state.player.fire_ready = true,
            GameEvent::AdvanceWave => {
                state
                    .scheduler
                    .begin_wave(&state.config.waves, &mut state.events, now);
            }
            GameEvent::SpawnBalloon => {
                if let Some(tier) = state.scheduler.pop_spawn(&mut state.rng) {
                    let Some(wave) = state.scheduler.current(&state.config.waves) else {
                        continue;
                    };
                    let speed = wave.balloon_speed;
                    let interval = wave.spawn_interval;
                    state.spawn_balloon(tier, speed);
                    if state.scheduler.still_spawning() {
                        state
                            .events
                            .schedule_in(now, secs_to_ticks(interval), GameEvent::SpawnBalloon);
                    }
                }
            }
        }
    }

    // Player look, then tentative move with rollback against scenery.
    state.player.look(input.look_delta);
    if input.move_intent != Vec2::ZERO {
        let step = (state.player.front() * input.move_intent.y
            + state.player.right() * input.move_intent.x)
            * PLAYER_MOVE_SPEED
            * dt;
        state.player.try_move(step, &state.natures);
    }

    if input.fire && state.player.fire_ready {
        fire(state, now);
    }

    // Motion integration. Transform replacement recomputes each bounding
    // volume synchronously, so the collision pass below never sees a stale
    // volume.
    for projectile in &mut state.projectiles {
        projectile.integrate(dt);
    }
    for balloon in &mut state.balloons {
        balloon.advance(dt);
    }

    // Broad phase: balloons only get tested against projectiles whose volume
    // touches their cluster's box.
    state.clusters.assign(&state.balloons);
    let mut balloon_hits: Vec<(usize, usize)> = Vec::new();
    for cluster in state.clusters.iter() {
        if cluster.members().is_empty() {
            continue;
        }
        for (pi, projectile) in state.projectiles.iter().enumerate() {
            if !volumes_overlap(cluster.bounds(), projectile.collider.volume()) {
                continue;
            }
            for &bi in cluster.members() {
                if volumes_overlap(
                    state.balloons[bi].collider.volume(),
                    projectile.collider.volume(),
                ) {
                    balloon_hits.push((pi, bi));
                }
            }
        }
    }

    // Narrow-phase response: piercing spends min(pierce, hp) from both sides,
    // once per unordered pair over the entities' lifetimes.
    for (pi, bi) in balloon_hits {
        let projectile = &mut state.projectiles[pi];
        let balloon = &mut state.balloons[bi];
        if state.ledger.record(projectile.id, balloon.id) {
            let spent = projectile.durability.min(balloon.durability);
            projectile.durability = projectile.durability.saturating_sub(spent);
            balloon.durability = balloon.durability.saturating_sub(spent);
            log::debug!(
                "projectile {} pierced balloon {} for {spent}",
                projectile.id,
                balloon.id
            );
        }
    }

    // Scenery fully blocks: a nature hit consumes the projectile's whole
    // remaining pierce budget. Small static set, tested directly.
    for nature in &state.natures {
        for projectile in &mut state.projectiles {
            if volumes_overlap(nature.collider.volume(), projectile.collider.volume())
                && state.ledger.record(nature.id, projectile.id)
            {
                projectile.durability = 0;
            }
        }
    }

    // Lifecycle pruning: removal happens only here, never from event
    // handlers.
    let mut retired: Vec<u32> = Vec::new();
    state.projectiles.retain(|p| {
        if p.is_retired() {
            retired.push(p.id);
            false
        } else {
            true
        }
    });

    let payout = state.config.payout_per_hp;
    let mut cash_gain = 0u64;
    let mut pops = 0u64;
    let mut leaked = 0u32;
    state.balloons.retain(|b| {
        if b.durability == 0 {
            cash_gain += payout * u64::from(b.original_durability);
            pops += 1;
            retired.push(b.id);
            false
        } else if b.reached_end {
            leaked += b.durability;
            retired.push(b.id);
            false
        } else {
            true
        }
    });
    state.cash += cash_gain;
    state.pops += pops;
    if leaked > 0 {
        state.health = state.health.saturating_sub(leaked);
        log::info!("balloons escaped, -{leaked} health ({} left)", state.health);
    }
    state.ledger.forget_all(&retired);

    // Membership is only valid within this frame's collision pass.
    state.clusters.clear_members();

    state.scheduler.poll_drain(
        state.balloons.is_empty(),
        state.config.waves.len(),
        &mut state.events,
        now,
    );

    if state.health == 0 {
        log::info!("game over at tick {now}: health exhausted");
        state.phase = GamePhase::Lost;
    } else if state.scheduler.all_waves_cleared(state.config.waves.len())
        && state.balloons.is_empty()
    {
        log::info!("all waves cleared at tick {now}");
        state.phase = GamePhase::Won;
    }
}

/// Spawn one projectile per barrel, fanned around the aim yaw, and schedule
/// the cooldown event. The pending event always fires; firing is gated on the
/// `fire_ready` flag alone.
fn fire(state: &mut GameState, now: u64) {
    state.player.fire_ready = false;
    state.events.schedule_in(
        now,
        secs_to_ticks(state.player.stats.fire_interval),
        GameEvent::FireReady,
    );

    let barrels = state.player.stats.barrels.max(1);
    let pitch = state.player.pitch;
    let base_yaw = state.player.yaw;
    let origin = state.player.position() + state.player.aim() * 2.0;
    let speed = state.player.stats.projectile_speed;
    let pierce = state.player.stats.pierce;

    for barrel in 0..barrels {
        let offset = (barrel as f32 - (barrels - 1) as f32 * 0.5) * MULTISHOT_SPREAD;
        let yaw = base_yaw + offset;
        let dir = Vec3::new(
            -yaw.sin() * pitch.cos(),
            pitch.sin(),
            -yaw.cos() * pitch.cos(),
        );
        let id = state.next_entity_id();
        state
            .projectiles
            .push(Projectile::new(id, origin, dir, speed, pierce, pitch, yaw));
    }
    log::debug!("fired {barrels} projectile(s)");
}
