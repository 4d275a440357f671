//! Wave spawn scheduling
//!
//! State machine per wave: Idle -> Spawning -> Draining -> Idle(next), driven
//! by the scheduled-event queue. Composition entries are popped in random
//! order (unpredictable spawn order) but paced by the wave's single fixed
//! interval (legible difficulty). A wave only advances once every spawned
//! balloon is gone, so waves never stack. An exhausted wave list parks the
//! scheduler in Idle forever; that is the win condition, not an error.

use rand::Rng;
use rand_pcg::Pcg32;

use super::events::{EventQueue, GameEvent};
use crate::config::{TierCount, WaveConfig};
use crate::consts::INTER_WAVE_DELAY;
use crate::secs_to_ticks;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavePhase {
    /// Waiting for the next wave (or forever, once the list is exhausted).
    Idle,
    /// Consuming the current wave's composition.
    Spawning,
    /// All spawned; waiting for the field to clear.
    Draining,
}

#[derive(Debug, Clone)]
pub struct WaveScheduler {
    phase: WavePhase,
    wave_index: usize,
    remaining: Vec<TierCount>,
}

impl Default for WaveScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveScheduler {
    pub fn new() -> Self {
        Self {
            phase: WavePhase::Idle,
            wave_index: 0,
            remaining: Vec::new(),
        }
    }

    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    /// Index of the wave currently spawning/draining (0-based).
    pub fn wave_index(&self) -> usize {
        self.wave_index
    }

    /// Current wave's config, while one is in flight.
    pub fn current<'a>(&self, waves: &'a [WaveConfig]) -> Option<&'a WaveConfig> {
        waves.get(self.wave_index)
    }

    /// Schedule the opening wave after the standard inter-wave delay.
    pub fn start(&self, events: &mut EventQueue, now: u64) {
        events.schedule_in(now, secs_to_ticks(INTER_WAVE_DELAY), GameEvent::AdvanceWave);
    }

    /// Handle `AdvanceWave`: load the wave composition and schedule the first
    /// spawn. Out-of-range wave index means the list is exhausted and
    /// scheduling simply stops.
    pub fn begin_wave(&mut self, waves: &[WaveConfig], events: &mut EventQueue, now: u64) {
        let Some(wave) = waves.get(self.wave_index) else {
            return;
        };
        self.remaining = wave
            .composition
            .iter()
            .copied()
            .filter(|tc| tc.count > 0)
            .collect();
        if self.remaining.is_empty() {
            // Degenerate empty wave: nothing to spawn, nothing to drain.
            self.phase = WavePhase::Draining;
            return;
        }
        self.phase = WavePhase::Spawning;
        log::info!(
            "wave {} starting: {} balloons",
            self.wave_index + 1,
            wave.total_count()
        );
        events.schedule_at(now, GameEvent::SpawnBalloon);
    }

    /// Handle `SpawnBalloon`: pop one random remaining composition entry and
    /// return its tier. Moves to Draining once the composition is exhausted.
    pub fn pop_spawn(&mut self, rng: &mut Pcg32) -> Option<u32> {
        if self.remaining.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.remaining.len());
        let tier = self.remaining[idx].tier;
        self.remaining[idx].count -= 1;
        if self.remaining[idx].count == 0 {
            self.remaining.swap_remove(idx);
        }
        if self.remaining.is_empty() {
            self.phase = WavePhase::Draining;
        }
        Some(tier)
    }

    /// Whether another spawn should be scheduled after the current one.
    pub fn still_spawning(&self) -> bool {
        self.phase == WavePhase::Spawning
    }

    /// Per-frame drain poll: once Draining and the field is clear, advance to
    /// the next wave after the fixed inter-wave delay.
    pub fn poll_drain(
        &mut self,
        field_clear: bool,
        wave_count: usize,
        events: &mut EventQueue,
        now: u64,
    ) {
        if self.phase != WavePhase::Draining || !field_clear {
            return;
        }
        log::info!("wave {} cleared", self.wave_index + 1);
        self.wave_index += 1;
        self.phase = WavePhase::Idle;
        if self.wave_index < wave_count {
            events.schedule_in(now, secs_to_ticks(INTER_WAVE_DELAY), GameEvent::AdvanceWave);
        }
    }

    /// True once every configured wave has spawned and drained.
    pub fn all_waves_cleared(&self, wave_count: usize) -> bool {
        self.phase == WavePhase::Idle && self.wave_index >= wave_count
    }
}
