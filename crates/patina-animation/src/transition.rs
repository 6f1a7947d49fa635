//! Current/previous state transitions.
//!
//! A [`TransitionEngine`] animates the switch between "no widget active" and
//! "widget X active" for one category of widget state (menu item prelight, tab
//! hover, and so on). It owns a pair of [`TimeLine`]s: the *current* slot fades
//! in, the *previous* slot fades out. A hand-off between siblings swaps the
//! slots without re-triggering the fade-in; only the very first entry into the
//! group animates.
//!
//! The engine holds a side table of tracked widgets (rect plus the last
//! toolkit-reported highlight state) and is advanced cooperatively through
//! [`TransitionEngine::tick`].

use patina_core::registry::{Hooks, WidgetRegistry};
use patina_core::{Rect, WidgetHandle};
use tracing::trace;

use crate::config::{AnimationMode, CategoryConfig};
use crate::event::RedrawRequest;
use crate::follow_mouse::FollowMouse;
use crate::timeline::{Direction, TimeLine};

/// Margin added around repaint regions to avoid fringe glitches.
const DIRTY_MARGIN: i32 = 3;

/// Deferred deactivation timeout used by follow-mouse mode, in milliseconds.
const CLEAR_DELAY_MS: u64 = 50;

/// Per-widget data tracked by a transition engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrackedData {
    rect: Rect,
    /// Last toolkit-reported visual highlight state. Guards against fading
    /// out a state that visually never engaged.
    highlighted: bool,
}

/// One target slot of a transition: a widget, its rect, and its timeline.
#[derive(Debug)]
pub struct TransitionData {
    widget: Option<WidgetHandle>,
    rect: Rect,
    timeline: TimeLine,
}

impl TransitionData {
    fn new(duration_ms: u32, direction: Direction) -> Self {
        let mut timeline = TimeLine::new(duration_ms);
        timeline.set_direction(direction);
        TransitionData {
            widget: None,
            rect: Rect::INVALID,
            timeline,
        }
    }

    pub fn widget(&self) -> Option<WidgetHandle> {
        self.widget
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn timeline(&self) -> &TimeLine {
        &self.timeline
    }

    /// Valid when it points at a widget with known geometry.
    pub fn is_valid(&self) -> bool {
        self.widget.is_some() && self.rect.is_valid()
    }

    fn assign(&mut self, widget: WidgetHandle, rect: Rect) {
        self.widget = Some(widget);
        self.rect = rect;
    }

    fn clear(&mut self) {
        self.widget = None;
        self.rect = Rect::INVALID;
    }

    fn copy_from(&mut self, other: &TransitionData) {
        self.widget = other.widget;
        self.rect = other.rect;
    }
}

/// Generic current/previous fade engine for one animation category.
#[derive(Debug)]
pub struct TransitionEngine {
    tracked: WidgetRegistry<TrackedData>,
    current: TransitionData,
    previous: TransitionData,
    /// Incidental dirty-rect accumulator, drained by [`Self::dirty_rect`].
    dirty: Rect,
    follow: FollowMouse,
    /// Deadline for a deferred follow-mouse deactivation.
    pending_clear: Option<u64>,
    duration_ms: u32,
    mode: AnimationMode,
    fade_out_on_handoff: bool,
    enabled: bool,
    redraws: Vec<RedrawRequest>,
}

impl TransitionEngine {
    pub fn new() -> Self {
        Self::with_config(&CategoryConfig::default())
    }

    pub fn with_config(config: &CategoryConfig) -> Self {
        TransitionEngine {
            tracked: WidgetRegistry::new(),
            current: TransitionData::new(config.duration_ms, Direction::Forward),
            previous: TransitionData::new(config.duration_ms, Direction::Backward),
            dirty: Rect::INVALID,
            follow: FollowMouse::new(config.duration_ms),
            pending_clear: None,
            duration_ms: config.duration_ms,
            mode: config.mode,
            fade_out_on_handoff: config.fade_out_on_handoff,
            enabled: true,
            redraws: Vec::new(),
        }
    }

    /// Apply a configuration snapshot. Switching the mode to `Disabled`
    /// clears in-flight animations immediately.
    pub fn configure(&mut self, config: &CategoryConfig) {
        self.duration_ms = config.duration_ms;
        self.current.timeline.set_duration(config.duration_ms);
        self.previous.timeline.set_duration(config.duration_ms);
        self.follow.set_duration(config.duration_ms);
        self.fade_out_on_handoff = config.fade_out_on_handoff;
        if self.mode != config.mode {
            self.mode = config.mode;
            if config.mode == AnimationMode::Disabled {
                self.clear_in_flight();
            }
        }
    }

    /// Global enable toggle. Disabling clears in-flight animations
    /// synchronously, not merely future starts.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if !enabled {
            self.clear_in_flight();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn mode(&self) -> AnimationMode {
        self.mode
    }

    /// Track a widget with its on-screen rect. Returns false if the handle is
    /// null or the widget is already tracked.
    ///
    /// The engine consumes the widget's enter/leave and motion notifications
    /// on top of the destroy channel, so all three are recorded in the entry's
    /// hook set.
    pub fn register(&mut self, widget: WidgetHandle, rect: Rect) -> bool {
        if !self
            .tracked
            .register_with_hooks(widget, Hooks::DESTROY | Hooks::ENTER_LEAVE | Hooks::MOTION)
        {
            return false;
        }
        self.tracked.value(widget).rect = rect;
        true
    }

    /// Drop a widget. Safe no-op when the widget was never tracked, so the
    /// destruction fan-out can hit every engine unconditionally.
    ///
    /// Any slot referencing the widget is stopped and its rect dropped, so no
    /// later redraw query can mention a destroyed widget.
    pub fn unregister(&mut self, widget: WidgetHandle) -> bool {
        if self.current.widget == Some(widget) {
            self.current.timeline.stop();
            self.current.clear();
            self.follow.stop();
            self.pending_clear = None;
        }
        if self.previous.widget == Some(widget) {
            self.previous.timeline.stop();
            self.previous.clear();
        }
        self.tracked.remove(widget).is_some()
    }

    pub fn contains(&self, widget: WidgetHandle) -> bool {
        self.tracked.contains(widget)
    }

    /// Update a tracked widget's geometry (the host reports allocation
    /// changes).
    pub fn set_rect(&mut self, widget: WidgetHandle, rect: Rect) {
        self.tracked.value(widget).rect = rect;
        if self.current.widget == Some(widget) {
            self.current.rect = rect;
        }
    }

    /// Record the toolkit-reported highlight state for a widget.
    pub fn set_highlighted(&mut self, widget: WidgetHandle, highlighted: bool) {
        if let Some(data) = self.tracked.get_mut(widget) {
            data.highlighted = highlighted;
        }
    }

    /// Drive the state machine: `active` means the widget entered the
    /// animated condition. Returns whether the call changed engine state.
    pub fn update_state(&mut self, widget: WidgetHandle, active: bool, now: u64) -> bool {
        self.update_state_impl(widget, active, false, now)
    }

    /// Like [`Self::update_state`], but a follow-mouse deactivation is
    /// deferred by a short timeout instead of applied immediately, so a quick
    /// hop between siblings does not tear the animation down.
    pub fn update_state_delayed(&mut self, widget: WidgetHandle, active: bool, now: u64) -> bool {
        self.update_state_impl(widget, active, true, now)
    }

    fn update_state_impl(&mut self, widget: WidgetHandle, active: bool, delayed: bool, now: u64) -> bool {
        if widget.is_null() {
            return false;
        }
        if !self.enabled || self.mode == AnimationMode::Disabled {
            return self.apply_instant(widget, active);
        }

        if active && self.current.widget != Some(widget) {
            self.pending_clear = None;

            // a demoted target fades out only if it is visually still
            // mid-transition; a settled one swaps with no animation
            let mid_fade =
                self.current.timeline.is_running() && self.current.timeline.value() < 1.0;
            if self.current.timeline.is_running() {
                self.current.timeline.stop();
            }

            let had_current = self.current.is_valid();
            if had_current {
                if self.previous.timeline.is_running() {
                    self.previous.timeline.stop();
                }
                if self.previous.is_valid() {
                    self.dirty = self.dirty.union(&self.previous.rect);
                }
                self.previous.copy_from(&self.current);
                if self.fade_out_on_handoff && self.previous.is_valid() && mid_fade {
                    self.previous.timeline.start(now);
                }
            }

            let start_rect = self.current.rect;
            let rect = self
                .tracked
                .get(widget)
                .map(|data| data.rect)
                .unwrap_or(Rect::INVALID);
            self.current.assign(widget, rect);
            trace!(%widget, handoff = had_current, "transition target");

            if self.current.is_valid() {
                if !had_current {
                    // cold start: the only entry that fades in
                    self.current.timeline.start(now);
                } else if self.mode == AnimationMode::FollowMouse {
                    self.follow.start_animation(start_rect, rect, now);
                } else {
                    // sibling hand-off swaps instantly
                    self.queue_repaint();
                }
            } else {
                // no geometry known, repaint the widget wholesale
                self.redraws.push(RedrawRequest::whole(widget));
            }
            true
        } else if !active && self.current.widget == Some(widget) {
            if self.mode == AnimationMode::FollowMouse && delayed {
                if self.pending_clear.is_none() {
                    self.pending_clear = Some(now + CLEAR_DELAY_MS);
                }
                return true;
            }
            self.pending_clear = None;
            self.demote_current(now);
            self.queue_repaint();
            true
        } else {
            false
        }
    }

    /// Route a pointer motion event: activates the tracked widget under the
    /// pointer, or deactivates the current one when the pointer is over none.
    pub fn pointer_motion(&mut self, x: i32, y: i32, now: u64) -> bool {
        let target = self
            .tracked
            .iter()
            .find(|(_, data)| data.rect.contains(x, y))
            .map(|(widget, _)| widget);

        match target {
            Some(widget) => {
                self.set_highlighted(widget, true);
                self.update_state(widget, true, now)
            }
            None => self.deactivate_current(now),
        }
    }

    /// The pointer left the widget group entirely.
    pub fn pointer_leave(&mut self, now: u64) -> bool {
        self.deactivate_current(now)
    }

    fn deactivate_current(&mut self, now: u64) -> bool {
        let Some(current) = self.current.widget else {
            return false;
        };
        // the fade-out guard reads the highlight flag, so demote first and
        // clear the flag after
        let handled = self.update_state_impl(current, false, true, now);
        self.set_highlighted(current, false);
        handled
    }

    /// Advance all timelines by one cooperative tick. Returns whether any
    /// animation is still in flight.
    pub fn tick(&mut self, now: u64) -> bool {
        let mut running = false;

        if let Some(deadline) = self.pending_clear {
            if now >= deadline {
                self.pending_clear = None;
                self.demote_current(now);
                self.queue_repaint();
            } else {
                running = true;
            }
        }

        let before = self.current.timeline.value();
        if self.current.timeline.update(now) {
            running = true;
        }
        if self.current.timeline.value() != before {
            self.queue_repaint();
        }

        let was_running = self.previous.timeline.is_running();
        let before = self.previous.timeline.value();
        if self.previous.timeline.update(now) {
            running = true;
        }
        if self.previous.timeline.value() != before {
            self.queue_repaint();
        }
        if was_running && !self.previous.timeline.is_running() {
            // fade-out finished; the previous slot self-clears
            if self.previous.is_valid() {
                self.dirty = self.dirty.union(&self.previous.rect);
            }
            self.previous.clear();
            self.queue_repaint();
        }

        let (follow_running, follow_changed) = self.follow.tick(now);
        if follow_changed {
            self.queue_repaint();
        }
        running |= follow_running;

        running
    }

    /// The union of the previous rect, the current rect, and the incidental
    /// dirty accumulator. Draining: the accumulator resets on every read.
    pub fn dirty_rect(&mut self) -> Rect {
        let mut rect = self.previous.rect.union(&self.current.rect);
        if self.dirty.is_valid() {
            rect = rect.union(&self.dirty);
            self.dirty = Rect::INVALID;
        }
        if self.mode == AnimationMode::FollowMouse {
            rect = rect.union(&self.follow.dirty_rect());
        }
        rect
    }

    /// Animation opacity for the widget: fade-in value while entering, 1 when
    /// steady, fade-out value while exiting, 0 otherwise.
    pub fn opacity(&self, widget: WidgetHandle) -> f32 {
        if self.current.widget == Some(widget) {
            if self.current.timeline.is_running() {
                self.current.timeline.value()
            } else {
                1.0
            }
        } else if self.previous.widget == Some(widget) {
            if self.previous.timeline.is_running() {
                self.previous.timeline.value()
            } else {
                0.0
            }
        } else {
            0.0
        }
    }

    pub fn is_animated(&self, widget: WidgetHandle) -> bool {
        if self.current.widget == Some(widget)
            && (self.current.timeline.is_running()
                || (self.mode == AnimationMode::FollowMouse && self.follow.is_animated()))
        {
            return true;
        }
        self.previous.widget == Some(widget) && self.previous.timeline.is_running()
    }

    /// True while any timeline or deferred clear is pending.
    pub fn has_running_animations(&self) -> bool {
        self.current.timeline.is_running()
            || self.previous.timeline.is_running()
            || self.follow.is_animated()
            || self.pending_clear.is_some()
    }

    /// The follow-mouse interpolated rect for the widget, if one is in
    /// flight.
    pub fn animated_rect(&self, widget: WidgetHandle) -> Option<Rect> {
        (self.mode == AnimationMode::FollowMouse
            && self.follow.is_animated()
            && self.current.widget == Some(widget))
        .then(|| self.follow.animated_rect())
    }

    pub fn current(&self) -> &TransitionData {
        &self.current
    }

    pub fn previous(&self) -> &TransitionData {
        &self.previous
    }

    /// Drain pending repaint requests.
    pub fn pop_redraws(&mut self) -> Vec<RedrawRequest> {
        std::mem::take(&mut self.redraws)
    }

    fn demote_current(&mut self, now: u64) {
        if self.current.timeline.is_running() {
            self.current.timeline.stop();
        }
        if self.previous.timeline.is_running() {
            self.previous.timeline.stop();
        }
        if self.previous.is_valid() {
            self.dirty = self.dirty.union(&self.previous.rect);
        }
        self.previous.copy_from(&self.current);
        self.current.clear();
        self.follow.stop();

        let highlighted = self
            .previous
            .widget
            .and_then(|widget| self.tracked.get(widget))
            .is_some_and(|data| data.highlighted);
        if self.previous.is_valid() && highlighted {
            self.previous.timeline.start(now);
        }
    }

    fn apply_instant(&mut self, widget: WidgetHandle, active: bool) -> bool {
        self.pending_clear = None;
        if active {
            if self.current.widget != Some(widget) {
                let rect = self
                    .tracked
                    .get(widget)
                    .map(|data| data.rect)
                    .unwrap_or(Rect::INVALID);
                self.previous.clear();
                self.current.assign(widget, rect);
                self.redraws.push(RedrawRequest::whole(widget));
            }
        } else if self.current.widget == Some(widget) {
            self.current.clear();
            self.redraws.push(RedrawRequest::whole(widget));
        }
        true
    }

    fn clear_in_flight(&mut self) {
        self.current.timeline.stop();
        self.previous.timeline.stop();
        if self.previous.is_valid() {
            self.dirty = self.dirty.union(&self.previous.rect);
        }
        self.previous.clear();
        self.follow.stop();
        self.pending_clear = None;
        self.queue_repaint();
    }

    fn queue_repaint(&mut self) {
        let Some(target) = self.current.widget.or(self.previous.widget) else {
            return;
        };
        let rect = self.dirty_rect();
        let region = rect.is_valid().then(|| rect.inflated(DIRTY_MARGIN));
        self.redraws.push(RedrawRequest { widget: target, region });
    }
}

impl Default for TransitionEngine {
    fn default() -> Self {
        Self::new()
    }
}
