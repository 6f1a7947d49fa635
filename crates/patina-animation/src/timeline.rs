//! Scalar animation driver.
//!
//! A [`TimeLine`] ramps a value through [0, 1] over a fixed duration. It owns
//! no timer and no thread: the host's idle or vsync dispatch advances it by
//! calling [`TimeLine::update`] with the current wall clock in milliseconds.
//! "Waiting" is simply not being called again; cancellation is [`TimeLine::stop`].

use std::fmt;

/// Ramp direction.
///
/// Forward maps progress to the value directly (0 → 1), Backward inverts it
/// (1 → 0), which is how fade-outs are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

type ValueCallback = Box<dyn FnMut(f32)>;

/// A single animatable scalar in [0, 1] driven by explicit timestamps.
pub struct TimeLine {
    duration_ms: u32,
    direction: Direction,
    running: bool,
    value: f32,
    started_at: u64,
    callback: Option<ValueCallback>,
}

impl TimeLine {
    pub fn new(duration_ms: u32) -> Self {
        TimeLine {
            duration_ms,
            direction: Direction::Forward,
            running: false,
            value: 0.0,
            started_at: 0,
            callback: None,
        }
    }

    pub fn set_duration(&mut self, duration_ms: u32) {
        self.duration_ms = duration_ms;
    }

    pub fn duration(&self) -> u32 {
        self.duration_ms
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Connect the value-changed callback, replacing any previous one.
    pub fn connect(&mut self, callback: impl FnMut(f32) + 'static) {
        self.callback = Some(Box::new(callback));
    }

    pub fn disconnect(&mut self) {
        self.callback = None;
    }

    /// Start (or restart) the ramp from its origin at `now`.
    ///
    /// A zero duration completes immediately: the value snaps to the final
    /// bound, the callback fires once, and the timeline is left stopped.
    /// Animations must never hang on a degenerate duration.
    pub fn start(&mut self, now: u64) {
        self.started_at = now;

        if self.duration_ms == 0 {
            self.value = match self.direction {
                Direction::Forward => 1.0,
                Direction::Backward => 0.0,
            };
            self.running = false;
            self.trigger();
            return;
        }

        self.value = match self.direction {
            Direction::Forward => 0.0,
            Direction::Backward => 1.0,
        };
        self.running = true;
    }

    /// Stop without touching the value. Does not fire the callback.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance to `now`, firing the callback if the value changed.
    ///
    /// Returns whether the timeline is still running afterwards.
    pub fn update(&mut self, now: u64) -> bool {
        if !self.running {
            return false;
        }

        let elapsed = now.saturating_sub(self.started_at);
        let progress = (elapsed as f32 / self.duration_ms as f32).min(1.0);
        let value = match self.direction {
            Direction::Forward => progress,
            Direction::Backward => 1.0 - progress,
        };

        if progress >= 1.0 {
            self.running = false;
        }

        if value != self.value {
            self.value = value;
            self.trigger();
        }

        self.running
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn trigger(&mut self) {
        let value = self.value;
        if let Some(callback) = &mut self.callback {
            callback(value);
        }
    }
}

impl fmt::Debug for TimeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeLine")
            .field("duration_ms", &self.duration_ms)
            .field("direction", &self.direction)
            .field("running", &self.running)
            .field("value", &self.value)
            .field("connected", &self.callback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_forward_ramp() {
        let mut timeline = TimeLine::new(100);
        timeline.start(1000);
        assert!(timeline.is_running());
        assert_eq!(timeline.value(), 0.0);

        assert!(timeline.update(1050));
        assert!((timeline.value() - 0.5).abs() < 1e-6);

        assert!(!timeline.update(1100));
        assert_eq!(timeline.value(), 1.0);
        assert!(!timeline.is_running());
    }

    #[test]
    fn test_backward_ramp() {
        let mut timeline = TimeLine::new(100);
        timeline.set_direction(Direction::Backward);
        timeline.start(0);
        assert_eq!(timeline.value(), 1.0);

        timeline.update(50);
        assert!((timeline.value() - 0.5).abs() < 1e-6);

        assert!(!timeline.update(100));
        assert_eq!(timeline.value(), 0.0);
    }

    #[test]
    fn test_monotonic_forward() {
        let mut timeline = TimeLine::new(200);
        timeline.start(0);
        let mut last = timeline.value();
        for t in (0..=250).step_by(10) {
            timeline.update(t);
            assert!(timeline.value() >= last);
            last = timeline.value();
        }
        assert_eq!(timeline.value(), 1.0);
        assert!(!timeline.is_running());
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut timeline = TimeLine::new(0);
        timeline.start(42);
        assert!(!timeline.is_running());
        assert_eq!(timeline.value(), 1.0);
        // a follow-up update is a no-op
        assert!(!timeline.update(43));
        assert_eq!(timeline.value(), 1.0);

        timeline.set_direction(Direction::Backward);
        timeline.start(44);
        assert!(!timeline.is_running());
        assert_eq!(timeline.value(), 0.0);
    }

    #[test]
    fn test_stop_keeps_value() {
        let mut timeline = TimeLine::new(100);
        timeline.start(0);
        timeline.update(30);
        let value = timeline.value();
        timeline.stop();
        assert!(!timeline.is_running());
        assert_eq!(timeline.value(), value);
        // stopped timelines do not advance
        assert!(!timeline.update(90));
        assert_eq!(timeline.value(), value);
    }

    #[test]
    fn test_restart_resets_origin() {
        let mut timeline = TimeLine::new(100);
        timeline.start(0);
        timeline.update(80);
        assert!((timeline.value() - 0.8).abs() < 1e-6);

        timeline.start(200);
        timeline.update(210);
        assert!((timeline.value() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_callback_fires_on_change() {
        let fired = Rc::new(Cell::new(0u32));
        let seen = fired.clone();

        let mut timeline = TimeLine::new(100);
        timeline.connect(move |_| seen.set(seen.get() + 1));
        timeline.start(0);

        timeline.update(50);
        timeline.update(50); // same timestamp, no value change
        timeline.update(100);
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn test_zero_duration_fires_callback_once() {
        let fired = Rc::new(Cell::new(0u32));
        let seen = fired.clone();

        let mut timeline = TimeLine::new(0);
        timeline.connect(move |_| seen.set(seen.get() + 1));
        timeline.start(0);
        assert_eq!(fired.get(), 1);
    }
}
