//! Deadline-driven timers for the event loop.
//!
//! Nothing here sleeps or spawns. The loop asks how long it may block
//! (`time_until_due`), and after waking passes the current `Instant` back in.

use std::time::{Duration, Instant};

use log::debug;

pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);
pub const REPLAY_PULSE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Armed {
    epoch: u64,
    next_due: Instant,
}

/// Repeating deadline that runs only while its owner says it should.
#[derive(Debug, Clone)]
pub struct RepeatingTimer {
    period: Duration,
    armed: Option<Armed>,
}

impl RepeatingTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            armed: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Re-evaluates the timer against the owner's current state.
    ///
    /// Arms a fresh schedule when `should_run` starts to hold or when the
    /// owner moved to a new `epoch`; cancels as soon as it stops holding.
    /// Calling it again with the same inputs changes nothing.
    pub fn sync(&mut self, should_run: bool, epoch: u64, now: Instant) {
        match self.armed {
            Some(armed) if should_run && armed.epoch == epoch => {}
            _ if should_run => {
                debug!("countdown armed for epoch {epoch}");
                self.armed = Some(Armed {
                    epoch,
                    next_due: now + self.period,
                });
            }
            Some(armed) => {
                debug!("countdown cancelled for epoch {}", armed.epoch);
                self.armed = None;
            }
            None => {}
        }
    }

    /// Fires at most one period. Callers loop to catch up after a late wake.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.armed.as_mut() {
            Some(armed) if now >= armed.next_due => {
                armed.next_due += self.period;
                true
            }
            _ => false,
        }
    }

    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.armed
            .map(|armed| armed.next_due.saturating_duration_since(now))
    }
}

/// One-shot window used for short cosmetic effects.
#[derive(Debug, Clone)]
pub struct Pulse {
    length: Duration,
    until: Option<Instant>,
}

impl Pulse {
    pub fn new(length: Duration) -> Self {
        Self {
            length,
            until: None,
        }
    }

    /// Starts the window, restarting it if one is already running.
    pub fn trigger(&mut self, now: Instant) {
        self.until = Some(now + self.length);
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.until.is_some_and(|until| now < until)
    }

    /// Clears the window once it has passed.
    pub fn expire(&mut self, now: Instant) {
        if !self.is_active(now) {
            self.until = None;
        }
    }

    pub fn time_until_expiry(&self, now: Instant) -> Option<Duration> {
        self.until
            .filter(|until| now < *until)
            .map(|until| until - now)
    }
}
