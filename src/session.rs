use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::duration::{InvalidDuration, TestDuration};
use crate::passage::Corpus;
use crate::scoring::{self, Glyph};

/// Where a session sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Idle,
    Running,
    Completed,
}

/// What caused the user to (re)focus the test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTrigger {
    Key { caps_lock: bool },
    Click,
}

/// Results reported once the countdown has run out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Results {
    pub wpm: u32,
    pub accuracy: u32,
    pub mistakes: u32,
}

/// One timed typing test: passage, input, countdown and score.
#[derive(Debug)]
pub struct TypingSession<R: Rng = StdRng> {
    corpus: Corpus,
    rng: R,
    passage: String,
    input: String,
    prev_len: usize,
    mistakes: u32,
    duration: TestDuration,
    seconds_remaining: u64,
    completed: bool,
    focused: bool,
    caps_lock: bool,
    epoch: u64,
}

impl TypingSession<StdRng> {
    pub fn new(corpus: Corpus, duration: TestDuration) -> Self {
        Self::with_rng(corpus, duration, StdRng::from_entropy())
    }
}

impl<R: Rng> TypingSession<R> {
    pub fn with_rng(corpus: Corpus, duration: TestDuration, mut rng: R) -> Self {
        let passage = corpus.pick(&mut rng).to_owned();
        Self {
            corpus,
            rng,
            passage,
            input: String::new(),
            prev_len: 0,
            mistakes: 0,
            duration,
            seconds_remaining: duration.as_secs(),
            completed: false,
            focused: false,
            caps_lock: false,
            epoch: 0,
        }
    }

    pub fn passage(&self) -> &str {
        &self.passage
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn duration(&self) -> TestDuration {
        self.duration
    }

    pub fn seconds_remaining(&self) -> u64 {
        self.seconds_remaining
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn caps_lock(&self) -> bool {
        self.caps_lock
    }

    /// Bumped on every replay or duration change. Rotating passages mid-test
    /// keeps the epoch.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn phase(&self) -> Phase {
        if self.completed {
            Phase::Completed
        } else if self.focused {
            Phase::Running
        } else {
            Phase::Idle
        }
    }

    /// The countdown may only tick while this holds.
    pub fn is_ticking(&self) -> bool {
        self.focused && !self.completed && self.seconds_remaining > 0
    }

    pub fn on_focus_trigger(&mut self, trigger: FocusTrigger) {
        if let FocusTrigger::Key { caps_lock } = trigger {
            self.caps_lock = caps_lock;
        }
        if !self.completed && !self.focused {
            debug!("session focused via {trigger:?}");
            self.focused = true;
        }
    }

    /// Applies the new value of the text field.
    ///
    /// Only the most recently appended char is checked against the passage.
    /// Pasting several chars or deleting and retyping does not revalidate the
    /// rest of the input, and deleting never takes a mistake back.
    pub fn on_input_change(&mut self, new_value: &str) {
        if self.completed || self.seconds_remaining == 0 {
            return;
        }

        let new_len = new_value.chars().count();
        if new_len > self.prev_len {
            let typed = new_value.chars().last();
            let expected = self.passage.chars().nth(new_len - 1);
            if typed != expected {
                self.mistakes += 1;
            }
        }

        if self.input.chars().count() == self.passage.chars().count() {
            self.rotate_passage();
        } else {
            self.input = new_value.to_owned();
            self.prev_len = new_len;
        }
    }

    /// Advances the countdown by one second. Returns false when not running.
    pub fn on_tick(&mut self) -> bool {
        if !self.is_ticking() {
            return false;
        }

        self.seconds_remaining -= 1;
        if self.seconds_remaining == 0 {
            self.completed = true;
            let results = self.results();
            info!(
                "test completed: {} wpm, {}% accuracy, {} mistakes over {}s",
                results.wpm, results.accuracy, results.mistakes, self.duration
            );
        }
        true
    }

    /// Resets the session with a new passage, keeping the duration.
    pub fn on_replay(&mut self) {
        self.input.clear();
        self.prev_len = 0;
        self.mistakes = 0;
        self.completed = false;
        self.focused = false;
        self.seconds_remaining = self.duration.as_secs();
        self.passage = self.corpus.pick(&mut self.rng).to_owned();
        self.epoch += 1;
        debug!("session reset (epoch {}, {}s)", self.epoch, self.duration);
    }

    /// Switches to another duration from the fixed set and resets.
    pub fn on_duration_change(&mut self, secs: u64) -> Result<(), InvalidDuration> {
        self.duration = TestDuration::try_from(secs)?;
        self.on_replay();
        Ok(())
    }

    pub fn correct_chars(&self) -> usize {
        scoring::count_correct_chars(&self.input, &self.passage)
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.duration.as_secs() - self.seconds_remaining
    }

    pub fn live_wpm(&self) -> u32 {
        scoring::calculate_wpm(self.correct_chars(), self.elapsed_secs())
    }

    /// WPM over the whole duration, 0 until the countdown has run out.
    pub fn final_wpm(&self) -> u32 {
        if self.seconds_remaining > 0 {
            return 0;
        }
        scoring::calculate_wpm(self.correct_chars(), self.duration.as_secs())
    }

    /// Accuracy percentage, 0 until the countdown has run out.
    pub fn accuracy(&self) -> u32 {
        if self.seconds_remaining > 0 {
            return 0;
        }
        scoring::calculate_accuracy(self.correct_chars(), self.input.chars().count())
    }

    pub fn results(&self) -> Results {
        Results {
            wpm: self.final_wpm(),
            accuracy: self.accuracy(),
            mistakes: self.mistakes,
        }
    }

    pub fn glyphs(&self) -> Vec<Glyph> {
        scoring::classify(&self.input, &self.passage)
    }

    fn rotate_passage(&mut self) {
        self.passage = self.corpus.pick(&mut self.rng).to_owned();
        self.input.clear();
        self.prev_len = 0;
        debug!("passage finished, rotated to a new one");
    }
}
