//! Scheduled-event queue keyed by game-clock ticks
//!
//! All deferred work - spawn pacing, fire cooldown, inter-wave delay - is an
//! explicit event ordered by due tick and polled once at the top of each
//! frame. No wall-clock timers: advancing the simulation clock advances the
//! schedule, which keeps deferred behavior deterministic and testable.
//! Scheduled events are never cancelled; a pending event always fires.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Deferred simulation events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GameEvent {
    /// Spawn one balloon from the current wave's remaining composition.
    SpawnBalloon,
    /// Begin the next wave's spawning phase.
    AdvanceWave,
    /// Player fire cooldown elapsed.
    FireReady,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Scheduled {
    due: u64,
    /// Insertion sequence, breaking ties so equal due-ticks pop in schedule
    /// order.
    seq: u64,
    event: GameEvent,
}

/// Min-heap of pending events ordered by (due tick, insertion order).
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<Scheduled>>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an event at an absolute tick.
    pub fn schedule_at(&mut self, due: u64, event: GameEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Scheduled { due, seq, event }));
    }

    /// Schedule an event `delay` ticks from `now`.
    pub fn schedule_in(&mut self, now: u64, delay: u64, event: GameEvent) {
        self.schedule_at(now + delay, event);
    }

    /// Pop the next event due at or before `now`, if any.
    pub fn pop_due(&mut self, now: u64) -> Option<GameEvent> {
        match self.heap.peek() {
            Some(Reverse(scheduled)) if scheduled.due <= now => {
                self.heap.pop().map(|Reverse(s)| s.event)
            }
            _ => None,
        }
    }

    /// Whether any pending event matches `event`.
    pub fn has_pending(&self, event: GameEvent) -> bool {
        self.heap.iter().any(|Reverse(s)| s.event == event)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_pop_in_due_order() {
        let mut q = EventQueue::new();
        q.schedule_at(30, GameEvent::AdvanceWave);
        q.schedule_at(10, GameEvent::SpawnBalloon);
        q.schedule_at(20, GameEvent::FireReady);

        assert_eq!(q.pop_due(100), Some(GameEvent::SpawnBalloon));
        assert_eq!(q.pop_due(100), Some(GameEvent::FireReady));
        assert_eq!(q.pop_due(100), Some(GameEvent::AdvanceWave));
        assert_eq!(q.pop_due(100), None);
    }

    #[test]
    fn test_future_events_stay_queued() {
        let mut q = EventQueue::new();
        q.schedule_in(5, 10, GameEvent::FireReady);
        assert_eq!(q.pop_due(14), None);
        assert_eq!(q.pop_due(15), Some(GameEvent::FireReady));
    }

    #[test]
    fn test_equal_due_ticks_pop_in_schedule_order() {
        let mut q = EventQueue::new();
        q.schedule_at(7, GameEvent::FireReady);
        q.schedule_at(7, GameEvent::SpawnBalloon);
        assert_eq!(q.pop_due(7), Some(GameEvent::FireReady));
        assert_eq!(q.pop_due(7), Some(GameEvent::SpawnBalloon));
    }

    #[test]
    fn test_has_pending() {
        let mut q = EventQueue::new();
        q.schedule_at(50, GameEvent::SpawnBalloon);
        assert!(q.has_pending(GameEvent::SpawnBalloon));
        assert!(!q.has_pending(GameEvent::FireReady));
    }
}
