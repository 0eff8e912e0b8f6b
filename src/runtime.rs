use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEventKind};
use log::warn;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypingEvent {
    Key(KeyEvent),
    Click,
    Paste(String),
    Resize,
    Tick,
    /// The event source is gone; no further input will arrive.
    Closed,
}

/// Source of terminal events (keyboard, mouse, paste, resize)
pub trait TypingEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<TypingEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<TypingEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => TypingEvent::Key(key),
                Ok(CtEvent::Mouse(mouse)) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                    TypingEvent::Click
                }
                Ok(CtEvent::Paste(text)) => TypingEvent::Paste(text),
                Ok(CtEvent::Resize(_, _)) => TypingEvent::Resize,
                Ok(_) => continue,
                Err(e) => {
                    warn!("terminal event reader stopped: {e}");
                    break;
                }
            };
            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TypingEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TypingEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    /// Longest the runner blocks when no timer is due sooner.
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<TypingEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TypingEvent>) -> Self {
        Self { rx }
    }
}

impl TypingEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TypingEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: TypingEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: TypingEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks until the next event, or returns Tick once `wake_in` (capped by
    /// the ticker interval) has passed. Returns Closed once the source hangs up.
    pub fn step(&self, wake_in: Option<Duration>) -> TypingEvent {
        let timeout = match wake_in {
            Some(d) => d.min(self.ticker.interval()),
            None => self.ticker.interval(),
        };
        match self.event_source.recv_timeout(timeout) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => TypingEvent::Tick,
            Err(RecvTimeoutError::Disconnected) => TypingEvent::Closed,
        }
    }
}
