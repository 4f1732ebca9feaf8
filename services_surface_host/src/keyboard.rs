//! Typematic key-repeat engine
//!
//! Emulates hardware auto-repeat for the remote protocol's named keys:
//! an initial delay after the press-edge, then a steady repeat interval.
//! Printable characters bypass the engine entirely and are forwarded as
//! text the tick they arrive.
//!
//! The whole machine is one explicit state value re-evaluated per tick
//! against the input sample — no ambient flags or global timers. It mirrors
//! a single hardware auto-repeat channel: one key tracked at a time, never
//! independent per-key repeat.

use std::time::Duration;

use input_types::{InputSample, Key, NAVIGATION_KEYS};

/// Repeat timing thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatConfig {
    /// Time before the first repeat after the initial press
    pub first_delay: Duration,
    /// Time between subsequent repeats
    pub repeat_interval: Duration,
}

impl Default for RepeatConfig {
    fn default() -> Self {
        Self {
            first_delay: Duration::from_millis(250),
            repeat_interval: Duration::from_millis(25),
        }
    }
}

/// Where the tracked key is in its repeat cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RepeatPhase {
    /// Pressed, waiting out the first delay
    FirstPress,
    /// Past the first repeat, on the steady interval
    Repeating,
}

#[derive(Debug)]
struct ActiveKey {
    key: Key,
    phase: RepeatPhase,
    elapsed: Duration,
}

/// What the engine wants forwarded this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEmission {
    /// A named-key down (press-edge or repeat)
    Key(Key),
    /// Printable character input
    Text(String),
}

/// The key-repeat state machine.
#[derive(Debug, Default)]
pub struct KeyRepeat {
    config: RepeatConfig,
    active: Option<ActiveKey>,
}

impl KeyRepeat {
    /// Creates an idle engine with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an idle engine with explicit thresholds
    pub fn with_config(config: RepeatConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    /// Returns the key currently being tracked, if any
    pub fn active_key(&self) -> Option<Key> {
        self.active.as_ref().map(|a| a.key)
    }

    /// Drops any tracked key and zeroes the timer
    pub fn reset(&mut self) {
        self.active = None;
    }

    /// Advances the machine one tick.
    ///
    /// `dt` is the wall time since the previous tick. Emissions come back
    /// in the order they should reach the connector.
    pub fn poll(&mut self, sample: &InputSample, dt: Duration) -> Vec<KeyEmission> {
        match self.active.take() {
            None => self.poll_idle(sample),
            Some(active) => self.poll_tracking(active, sample, dt),
        }
    }

    fn poll_idle(&mut self, sample: &InputSample) -> Vec<KeyEmission> {
        // Backspace outranks character input: deleting while text is
        // pending must not swallow the edit key.
        if sample.is_pressed(Key::Backspace) {
            return vec![self.track(Key::Backspace)];
        }

        if sample.has_text() {
            return vec![KeyEmission::Text(sample.text.clone())];
        }

        for &key in &NAVIGATION_KEYS {
            if sample.is_pressed(key) {
                return vec![self.track(key)];
            }
        }

        Vec::new()
    }

    fn poll_tracking(
        &mut self,
        mut active: ActiveKey,
        sample: &InputSample,
        dt: Duration,
    ) -> Vec<KeyEmission> {
        active.elapsed += dt;

        // Character input ends tracking and still gets forwarded.
        if sample.has_text() {
            return vec![KeyEmission::Text(sample.text.clone())];
        }

        // A fresh press-edge takes over the channel: the newest key
        // repeats, like hardware typematic.
        if sample.is_pressed(Key::Backspace) && active.key != Key::Backspace {
            return vec![self.track(Key::Backspace)];
        }
        for &key in &NAVIGATION_KEYS {
            if key != active.key && sample.is_pressed(key) {
                return vec![self.track(key)];
            }
        }

        // Released, or backspace took over the physical repeat channel.
        if !sample.is_held(active.key)
            || (sample.is_held(Key::Backspace) && active.key != Key::Backspace)
        {
            return Vec::new();
        }

        let threshold = match active.phase {
            RepeatPhase::FirstPress => self.config.first_delay,
            RepeatPhase::Repeating => self.config.repeat_interval,
        };

        let mut emissions = Vec::new();
        if active.elapsed >= threshold {
            emissions.push(KeyEmission::Key(active.key));
            active.elapsed = Duration::ZERO;
            active.phase = RepeatPhase::Repeating;
        }

        self.active = Some(active);
        emissions
    }

    fn track(&mut self, key: Key) -> KeyEmission {
        self.active = Some(ActiveKey {
            key,
            phase: RepeatPhase::FirstPress,
            elapsed: Duration::ZERO,
        });
        KeyEmission::Key(key)
    }
}
