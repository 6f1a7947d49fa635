//! Hover state tracking.
//!
//! [`HoverTracker`] keeps hover and focus booleans per widget, derived from
//! the host's enter/leave and focus notifications. The initial hover flag is
//! seeded from the live pointer position at connect time; waiting for the
//! first motion event would leave the widget reported as "not hovered" for one
//! event, which is a visible bug.
//!
//! [`CompositeHoverTracker`] aggregates hover and focus over the sub-widgets of
//! one logical widget (an editable combo box is a button plus an entry). The
//! composite reports hovered/focused if *any* child is, and a change to one
//! child's flag queues a redraw for its siblings so focus rings stay in sync.

use patina_core::registry::{Hooks, WidgetRegistry};
use patina_core::{Point, Rect, WidgetHandle};
use tracing::debug;

use crate::event::RedrawRequest;

#[derive(Debug, Default, Clone, Copy)]
struct HoverData {
    hovered: bool,
    focused: bool,
}

/// Per-widget hover and focus flags fed by enter/leave notifications.
#[derive(Debug, Default)]
pub struct HoverTracker {
    widgets: WidgetRegistry<HoverData>,
    redraws: Vec<RedrawRequest>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a widget, seeding the hover flag from the current pointer
    /// position against the widget's on-screen bounds.
    ///
    /// Returns false if the widget was already connected (no duplicate
    /// subscriptions).
    pub fn connect(&mut self, widget: WidgetHandle, bounds: Rect, pointer: Point) -> bool {
        if !self
            .widgets
            .register_with_hooks(widget, Hooks::ENTER_LEAVE)
        {
            return false;
        }
        let hovered = bounds.contains(pointer.x, pointer.y);
        self.widgets.value(widget).hovered = hovered;
        debug!(%widget, hovered, "hover connect");
        true
    }

    pub fn disconnect(&mut self, widget: WidgetHandle) -> bool {
        self.widgets.remove(widget).is_some()
    }

    pub fn contains(&self, widget: WidgetHandle) -> bool {
        self.widgets.contains(widget)
    }

    /// Update a widget's hover flag, queueing a redraw when it changes.
    ///
    /// Returns whether the flag changed.
    pub fn set_hovered(&mut self, widget: WidgetHandle, hovered: bool) -> bool {
        let Some(data) = self.widgets.get_mut(widget) else {
            return false;
        };
        if data.hovered == hovered {
            return false;
        }
        data.hovered = hovered;
        self.redraws.push(RedrawRequest::whole(widget));
        true
    }

    pub fn hovered(&self, widget: WidgetHandle) -> bool {
        self.widgets.get(widget).is_some_and(|data| data.hovered)
    }

    /// Update a widget's focus flag, queueing a redraw when it changes.
    ///
    /// Returns whether the flag changed.
    pub fn set_focused(&mut self, widget: WidgetHandle, focused: bool) -> bool {
        let Some(data) = self.widgets.get_mut(widget) else {
            return false;
        };
        if data.focused == focused {
            return false;
        }
        data.focused = focused;
        self.redraws.push(RedrawRequest::whole(widget));
        true
    }

    pub fn has_focus(&self, widget: WidgetHandle) -> bool {
        self.widgets.get(widget).is_some_and(|data| data.focused)
    }

    /// Drain pending repaint requests.
    pub fn pop_redraws(&mut self) -> Vec<RedrawRequest> {
        std::mem::take(&mut self.redraws)
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct ChildFlags {
    hovered: bool,
    focused: bool,
}

/// Hover and focus flags for the children of one composite widget.
#[derive(Debug, Default)]
pub struct CompositeData {
    children: Vec<(WidgetHandle, ChildFlags)>,
}

impl CompositeData {
    /// Hovered if any child is hovered.
    pub fn hovered(&self) -> bool {
        self.children.iter().any(|(_, flags)| flags.hovered)
    }

    /// Focused if any child has focus.
    pub fn has_focus(&self) -> bool {
        self.children.iter().any(|(_, flags)| flags.focused)
    }

    pub fn contains_child(&self, child: WidgetHandle) -> bool {
        self.children.iter().any(|(handle, _)| *handle == child)
    }
}

/// Composite widgets (combo boxes) whose hover/focus is the OR over children.
#[derive(Debug, Default)]
pub struct CompositeHoverTracker {
    composites: WidgetRegistry<CompositeData>,
    redraws: Vec<RedrawRequest>,
}

impl CompositeHoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a composite parent.
    pub fn register(&mut self, parent: WidgetHandle) -> bool {
        self.composites.register_with_hooks(parent, Hooks::DESTROY)
    }

    /// Destroying the parent cascades to all children.
    pub fn unregister(&mut self, parent: WidgetHandle) -> bool {
        self.composites.remove(parent).is_some()
    }

    pub fn contains(&self, parent: WidgetHandle) -> bool {
        self.composites.contains(parent)
    }

    /// Attach a child to a composite. Idempotent: attaching the same child
    /// twice keeps a single entry and a single set of subscriptions.
    pub fn add_child(&mut self, parent: WidgetHandle, child: WidgetHandle) -> bool {
        if child.is_null() || !self.composites.contains(parent) {
            return false;
        }
        let data = self.composites.value(parent);
        if data.contains_child(child) {
            return false;
        }
        data.children.push((child, ChildFlags::default()));
        true
    }

    pub fn remove_child(&mut self, parent: WidgetHandle, child: WidgetHandle) {
        if let Some(data) = self.composites.get_mut(parent) {
            data.children.retain(|(handle, _)| *handle != child);
        }
    }

    pub fn set_child_hovered(&mut self, parent: WidgetHandle, child: WidgetHandle, hovered: bool) {
        self.set_child_flag(parent, child, hovered, |flags| &mut flags.hovered);
    }

    pub fn set_child_focused(&mut self, parent: WidgetHandle, child: WidgetHandle, focused: bool) {
        self.set_child_flag(parent, child, focused, |flags| &mut flags.focused);
    }

    pub fn hovered(&self, parent: WidgetHandle) -> bool {
        self.composites
            .get(parent)
            .is_some_and(CompositeData::hovered)
    }

    pub fn has_focus(&self, parent: WidgetHandle) -> bool {
        self.composites
            .get(parent)
            .is_some_and(CompositeData::has_focus)
    }

    /// Drain pending repaint requests.
    pub fn pop_redraws(&mut self) -> Vec<RedrawRequest> {
        std::mem::take(&mut self.redraws)
    }

    /// Drop a destroyed child from whichever composite holds it.
    pub fn on_child_destroyed(&mut self, child: WidgetHandle) {
        self.composites
            .for_each(|_, data| data.children.retain(|(handle, _)| *handle != child));
    }

    fn set_child_flag(
        &mut self,
        parent: WidgetHandle,
        child: WidgetHandle,
        value: bool,
        field: impl Fn(&mut ChildFlags) -> &mut bool,
    ) {
        let Some(data) = self.composites.get_mut(parent) else {
            return;
        };
        let mut changed = false;
        for (handle, flags) in data.children.iter_mut() {
            if *handle == child {
                let flag = field(flags);
                if *flag != value {
                    *flag = value;
                    changed = true;
                }
            }
        }
        if !changed {
            return;
        }
        // Cross-invalidation: the focus ring drawn on one sub-widget reflects
        // the other's state, so the siblings must repaint.
        let siblings: Vec<WidgetHandle> = data
            .children
            .iter()
            .map(|(handle, _)| *handle)
            .filter(|handle| *handle != child)
            .collect();
        for sibling in siblings {
            self.redraws.push(RedrawRequest::whole(sibling));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(raw: u64) -> WidgetHandle {
        WidgetHandle::from_raw(raw)
    }

    #[test]
    fn test_connect_seeds_from_pointer() {
        let mut tracker = HoverTracker::new();
        let bounds = Rect::new(0, 0, 100, 30);

        assert!(tracker.connect(w(1), bounds, Point::new(10, 10)));
        assert!(tracker.hovered(w(1)));

        assert!(tracker.connect(w(2), bounds, Point::new(200, 10)));
        assert!(!tracker.hovered(w(2)));
    }

    #[test]
    fn test_connect_is_idempotent() {
        let mut tracker = HoverTracker::new();
        let bounds = Rect::new(0, 0, 10, 10);
        assert!(tracker.connect(w(1), bounds, Point::new(0, 0)));
        assert!(!tracker.connect(w(1), bounds, Point::new(0, 0)));
    }

    #[test]
    fn test_set_hovered_queues_redraw_on_change() {
        let mut tracker = HoverTracker::new();
        tracker.connect(w(1), Rect::new(0, 0, 10, 10), Point::new(50, 50));

        assert!(tracker.set_hovered(w(1), true));
        assert!(!tracker.set_hovered(w(1), true));
        let redraws = tracker.pop_redraws();
        assert_eq!(redraws, vec![RedrawRequest::whole(w(1))]);
        assert!(tracker.pop_redraws().is_empty());
    }

    #[test]
    fn test_focus_flag_tracked_per_widget() {
        let mut tracker = HoverTracker::new();
        tracker.connect(w(1), Rect::new(0, 0, 10, 10), Point::new(50, 50));
        assert!(!tracker.has_focus(w(1)));

        assert!(tracker.set_focused(w(1), true));
        assert!(tracker.has_focus(w(1)));
        assert_eq!(tracker.pop_redraws(), vec![RedrawRequest::whole(w(1))]);

        // unchanged flag, no redraw; untracked widget, no effect
        assert!(!tracker.set_focused(w(1), true));
        assert!(!tracker.set_focused(w(9), true));
        assert!(tracker.pop_redraws().is_empty());
    }

    #[test]
    fn test_composite_or_semantics() {
        let mut tracker = CompositeHoverTracker::new();
        let (parent, button, entry) = (w(1), w(2), w(3));
        tracker.register(parent);
        tracker.add_child(parent, button);
        tracker.add_child(parent, entry);

        assert!(!tracker.hovered(parent));
        tracker.set_child_hovered(parent, button, true);
        tracker.set_child_hovered(parent, entry, true);
        assert!(tracker.hovered(parent));

        // dropping one child's flag keeps the OR true
        tracker.set_child_hovered(parent, button, false);
        assert!(tracker.hovered(parent));
        tracker.set_child_hovered(parent, entry, false);
        assert!(!tracker.hovered(parent));
    }

    #[test]
    fn test_composite_cross_invalidation() {
        let mut tracker = CompositeHoverTracker::new();
        let (parent, button, entry) = (w(1), w(2), w(3));
        tracker.register(parent);
        tracker.add_child(parent, button);
        tracker.add_child(parent, entry);
        tracker.pop_redraws();

        tracker.set_child_focused(parent, button, true);
        let redraws = tracker.pop_redraws();
        assert_eq!(redraws, vec![RedrawRequest::whole(entry)]);

        // no change, no redraw
        tracker.set_child_focused(parent, button, true);
        assert!(tracker.pop_redraws().is_empty());
    }

    #[test]
    fn test_add_child_idempotent() {
        let mut tracker = CompositeHoverTracker::new();
        let (parent, button) = (w(1), w(2));
        tracker.register(parent);
        assert!(tracker.add_child(parent, button));
        assert!(!tracker.add_child(parent, button));
    }

    #[test]
    fn test_unregister_cascades() {
        let mut tracker = CompositeHoverTracker::new();
        let (parent, button) = (w(1), w(2));
        tracker.register(parent);
        tracker.add_child(parent, button);

        assert!(tracker.unregister(parent));
        assert!(!tracker.contains(parent));
        assert!(!tracker.hovered(parent));
    }
}
