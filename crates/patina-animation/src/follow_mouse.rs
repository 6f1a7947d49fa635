//! Continuous rectangle interpolation.
//!
//! Follow-mouse mode replaces the discrete fade in/out with a rectangle that
//! glides from the previous target to the new one. When a new target arrives
//! mid-flight the start rectangle is re-derived so the animated rectangle's
//! velocity does not visibly jump at the hand-off.

use patina_core::Rect;

use crate::timeline::TimeLine;

#[derive(Debug)]
pub struct FollowMouse {
    timeline: TimeLine,
    start_rect: Rect,
    end_rect: Rect,
    animated_rect: Rect,
    dirty: Rect,
}

impl FollowMouse {
    pub fn new(duration_ms: u32) -> Self {
        FollowMouse {
            timeline: TimeLine::new(duration_ms),
            start_rect: Rect::INVALID,
            end_rect: Rect::INVALID,
            animated_rect: Rect::INVALID,
            dirty: Rect::INVALID,
        }
    }

    pub fn set_duration(&mut self, duration_ms: u32) {
        self.timeline.set_duration(duration_ms);
    }

    /// Begin (or re-target) an animation toward `end`.
    ///
    /// If the timeline is mid-flight, the start rectangle is shifted by
    /// `(animated - new_end) * v/(1-v)` so the interpolated rectangle reaches
    /// the new end without a discontinuity; otherwise the ramp restarts from
    /// `start`.
    pub fn start_animation(&mut self, start: Rect, end: Rect, now: u64) {
        self.end_rect = end;

        let value = self.timeline.value();
        if self.timeline.is_running() && value < 1.0 {
            self.dirty = self.dirty.union(&self.start_rect);

            let ratio = value / (1.0 - value);
            self.start_rect.x += shift(self.animated_rect.x, end.x, ratio);
            self.start_rect.y += shift(self.animated_rect.y, end.y, ratio);
            self.start_rect.width += shift(self.animated_rect.width, end.width, ratio);
            self.start_rect.height += shift(self.animated_rect.height, end.height, ratio);
        } else {
            self.timeline.stop();
            self.start_rect = start;
            self.timeline.start(now);
        }
    }

    /// Advance the interpolation. Returns whether it is still running, and
    /// whether the animated rectangle changed this tick.
    pub fn tick(&mut self, now: u64) -> (bool, bool) {
        if !self.timeline.is_running() {
            return (false, false);
        }
        let before = self.animated_rect;
        let running = self.timeline.update(now);
        self.update_animated_rect();
        if !running {
            // ramp finished; the rectangle settles on the end target
            self.dirty = self.dirty.union(&self.start_rect);
            self.start_rect = Rect::INVALID;
        }
        (running, self.animated_rect != before)
    }

    fn update_animated_rect(&mut self) {
        if self.timeline.is_running() && self.start_rect.is_valid() && self.end_rect.is_valid() {
            let value = self.timeline.value();
            self.animated_rect = Rect::new(
                lerp(self.start_rect.x, self.end_rect.x, value),
                lerp(self.start_rect.y, self.end_rect.y, value),
                lerp(self.start_rect.width, self.end_rect.width, value),
                lerp(self.start_rect.height, self.end_rect.height, value),
            );
        } else {
            self.animated_rect = Rect::INVALID;
        }
    }

    /// The interpolated rectangle, invalid when not animating.
    pub fn animated_rect(&self) -> Rect {
        self.animated_rect
    }

    pub fn is_animated(&self) -> bool {
        self.timeline.is_running()
    }

    /// Region touched by the interpolation since the last drain.
    pub fn dirty_rect(&mut self) -> Rect {
        let mut rect = self.start_rect.union(&self.animated_rect);
        if self.dirty.is_valid() {
            rect = rect.union(&self.dirty);
            self.dirty = Rect::INVALID;
        }
        rect
    }

    pub fn stop(&mut self) {
        self.timeline.stop();
        self.start_rect = Rect::INVALID;
        self.end_rect = Rect::INVALID;
        self.animated_rect = Rect::INVALID;
    }
}

fn lerp(start: i32, end: i32, value: f32) -> i32 {
    start + ((end - start) as f32 * value).round() as i32
}

fn shift(animated: i32, end: i32, ratio: f32) -> i32 {
    ((animated - end) as f32 * ratio).round() as i32
}
