//! Logical playback scheduler.
//!
//! Timer-driven scripted playback (chat typing delays, voice line
//! timings) is expressed as delayed events on a logical clock, keeping
//! the runner state machines synchronous and testable independent of
//! wall-clock timing. The presentation layer decides how logical time
//! maps to real time (the terminal front end sleeps until `next_due`).

use std::time::Duration;

/// A scheduled state-transition event inside a runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// The chat script's bot turn `index` becomes visible.
    BotMessage(usize),
    /// The voice script's line `index` becomes visible.
    VoiceLine(usize),
    /// Scripted playback has run to completion.
    PlaybackFinished,
}

#[derive(Debug, Clone)]
struct Entry {
    due: Duration,
    seq: u64,
    event: PlaybackEvent,
}

/// Delay-ordered event queue on a logical clock starting at zero.
///
/// Events scheduled for the same instant fire in insertion order.
#[derive(Debug, Default)]
pub struct LogicalScheduler {
    now: Duration,
    next_seq: u64,
    queue: Vec<Entry>,
}

impl LogicalScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current logical time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedules `event` to fire `delay` from the current logical time.
    pub fn schedule_in(&mut self, delay: Duration, event: PlaybackEvent) {
        self.schedule_at(self.now + delay, event);
    }

    /// Schedules `event` at an absolute logical instant. Instants in the
    /// past fire on the next `advance`.
    pub fn schedule_at(&mut self, due: Duration, event: PlaybackEvent) {
        let entry = Entry {
            due,
            seq: self.next_seq,
            event,
        };
        self.next_seq += 1;
        let position = self
            .queue
            .iter()
            .position(|e| (e.due, e.seq) > (entry.due, entry.seq))
            .unwrap_or(self.queue.len());
        self.queue.insert(position, entry);
    }

    /// Advances logical time by `dt` and returns every event that came
    /// due, in firing order.
    pub fn advance(&mut self, dt: Duration) -> Vec<PlaybackEvent> {
        self.now += dt;
        let still_pending = self.queue.iter().position(|e| e.due > self.now);
        let fired = match still_pending {
            Some(index) => self.queue.drain(..index),
            None => self.queue.drain(..),
        };
        fired.map(|e| e.event).collect()
    }

    /// Time until the next pending event, if any. Used by wall-clock
    /// front ends to size their sleeps.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue
            .first()
            .map(|e| e.due.saturating_sub(self.now))
    }

    /// True when nothing is pending.
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drops all pending events (used on playback restart).
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
