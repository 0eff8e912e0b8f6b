use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{info, warn};

use crate::duration::TestDuration;
use crate::input;
use crate::runtime::TypingEvent;
use crate::session::{FocusTrigger, TypingSession};
use crate::timer::{Pulse, RepeatingTimer, COUNTDOWN_PERIOD, REPLAY_PULSE};

/// Whether the main loop should keep going after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Presentation-side controller: turns terminal events into session
/// operations and keeps the countdown and replay pulse in step with it.
#[derive(Debug)]
pub struct App {
    session: TypingSession,
    countdown: RepeatingTimer,
    replay_pulse: Pulse,
}

impl App {
    pub fn new(session: TypingSession) -> Self {
        Self {
            session,
            countdown: RepeatingTimer::new(COUNTDOWN_PERIOD),
            replay_pulse: Pulse::new(REPLAY_PULSE),
        }
    }

    pub fn session(&self) -> &TypingSession {
        &self.session
    }

    pub fn is_counting_down(&self) -> bool {
        self.countdown.is_armed()
    }

    pub fn is_replay_pulse_active(&self, now: Instant) -> bool {
        self.replay_pulse.is_active(now)
    }

    pub fn handle_event(&mut self, event: TypingEvent, now: Instant) -> Control {
        // ticks that fell due before this event land first
        self.advance(now);
        let control = match event {
            TypingEvent::Key(key) => self.handle_key(key, now),
            TypingEvent::Click => {
                self.session.on_focus_trigger(FocusTrigger::Click);
                Control::Continue
            }
            TypingEvent::Paste(text) => {
                self.session.on_focus_trigger(FocusTrigger::Click);
                let value = input::pasted_value(self.session.input(), &text);
                self.session.on_input_change(&value);
                Control::Continue
            }
            TypingEvent::Resize | TypingEvent::Tick => Control::Continue,
            TypingEvent::Closed => {
                warn!("terminal input closed, quitting");
                Control::Quit
            }
        };
        self.advance(now);
        control
    }

    /// Fires every countdown period that has elapsed by `now` and retires a
    /// finished replay pulse.
    pub fn advance(&mut self, now: Instant) {
        self.sync_countdown(now);
        while self.countdown.fire(now) {
            self.session.on_tick();
            self.sync_countdown(now);
        }
        self.replay_pulse.expire(now);
    }

    /// How long the loop may sleep before a timer needs attention.
    pub fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        match (
            self.countdown.time_until_due(now),
            self.replay_pulse.time_until_expiry(now),
        ) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn replay(&mut self, now: Instant) {
        self.session.on_replay();
        self.replay_pulse.trigger(now);
        self.sync_countdown(now);
    }

    pub fn select_duration(&mut self, duration: TestDuration, now: Instant) {
        match self.session.on_duration_change(duration.as_secs()) {
            Ok(()) => {
                info!("duration set to {duration}s");
                self.replay_pulse.trigger(now);
            }
            Err(e) => warn!("{e}"),
        }
        self.sync_countdown(now);
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Control {
        if !input::is_key_down(&key) {
            return Control::Continue;
        }

        match key.code {
            KeyCode::Esc => return Control::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Control::Quit
            }
            KeyCode::Tab => {
                self.replay(now);
                return Control::Continue;
            }
            KeyCode::Left => {
                self.select_duration(self.session.duration().shorter(), now);
                return Control::Continue;
            }
            KeyCode::Right => {
                self.select_duration(self.session.duration().longer(), now);
                return Control::Continue;
            }
            _ => {}
        }

        self.session.on_focus_trigger(FocusTrigger::Key {
            caps_lock: input::caps_lock_engaged(&key),
        });
        if let Some(value) = input::edited_value(self.session.input(), &key) {
            self.session.on_input_change(&value);
        }
        Control::Continue
    }

    fn sync_countdown(&mut self, now: Instant) {
        self.countdown
            .sync(self.session.is_ticking(), self.session.epoch(), now);
    }
}
