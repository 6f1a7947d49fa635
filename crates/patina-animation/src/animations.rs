//! The animation registry.
//!
//! [`Animations`] owns one [`TransitionEngine`] per [`Category`], the hover
//! trackers, and the global widget lifecycle map. It is the single entry point
//! the host integration talks to: construct one per style instance at startup
//! and route every toolkit callback through it. There is deliberately no
//! process-wide singleton; tests instantiate independent registries.
//!
//! Widget registration is *not* fanned out automatically: the call site
//! decides which engines should track a widget (a button may also be a tree
//! row and live inside a combo box). Destruction, by contrast, is fanned out
//! to every engine unconditionally, and unregistering is a safe no-op for
//! engines that never tracked the widget.

use patina_core::registry::{Hooks, WidgetRegistry};
use patina_core::{Point, Rect, WidgetHandle};
use tracing::debug;

use crate::config::{AnimationConfig, AnimationMode, Category};
use crate::event::{RedrawRequest, WidgetEvent};
use crate::hover::{CompositeHoverTracker, HoverTracker};
use crate::transition::TransitionEngine;

/// Central registry owning all animation engines and lifecycle bookkeeping.
#[derive(Debug)]
pub struct Animations {
    /// Every widget known to any engine, with its destroy/style-change hooks.
    lifecycle: WidgetRegistry<()>,
    hover: HoverTracker,
    combo: CompositeHoverTracker,
    engines: [TransitionEngine; Category::COUNT],
    config: AnimationConfig,
    redraws: Vec<RedrawRequest>,
}

impl Animations {
    pub fn new() -> Self {
        Self::with_config(AnimationConfig::default())
    }

    pub fn with_config(config: AnimationConfig) -> Self {
        let engines =
            Category::ALL.map(|category| TransitionEngine::with_config(config.category(category)));
        let mut animations = Animations {
            lifecycle: WidgetRegistry::new(),
            hover: HoverTracker::new(),
            combo: CompositeHoverTracker::new(),
            engines,
            config: AnimationConfig::default(),
            redraws: Vec::new(),
        };
        animations.apply_configuration(&config);
        animations
    }

    /// Record a widget in the global lifecycle map, subscribing to its
    /// destroy and style-change notifications. Idempotent.
    pub fn register_widget(&mut self, widget: WidgetHandle) -> bool {
        let registered = self
            .lifecycle
            .register_with_hooks(widget, Hooks::DESTROY | Hooks::STYLE_CHANGE);
        if registered {
            debug!(%widget, "register widget");
        }
        registered
    }

    pub fn contains(&self, widget: WidgetHandle) -> bool {
        self.lifecycle.contains(widget)
    }

    pub fn engine(&self, category: Category) -> &TransitionEngine {
        &self.engines[category.index()]
    }

    pub fn engine_mut(&mut self, category: Category) -> &mut TransitionEngine {
        &mut self.engines[category.index()]
    }

    pub fn hover(&self) -> &HoverTracker {
        &self.hover
    }

    pub fn hover_mut(&mut self) -> &mut HoverTracker {
        &mut self.hover
    }

    pub fn combo(&self) -> &CompositeHoverTracker {
        &self.combo
    }

    pub fn combo_mut(&mut self) -> &mut CompositeHoverTracker {
        &mut self.combo
    }

    /// Route a foreign notification to the engines that care about it.
    pub fn dispatch(&mut self, widget: WidgetHandle, event: WidgetEvent, now: u64) {
        match event {
            WidgetEvent::Realized => {
                self.register_widget(widget);
            }
            WidgetEvent::Destroyed => self.on_destroy(widget),
            WidgetEvent::StyleChanged => self.on_style_change(widget),
            WidgetEvent::PointerEnter => self.on_pointer_enter(widget, now),
            WidgetEvent::PointerLeave => self.on_pointer_leave(widget, now),
            WidgetEvent::PointerMotion { x, y } => self.on_pointer_motion(widget, x, y, now),
        }
    }

    /// Destruction fan-out: every side table drops the widget, whether or not
    /// it ever tracked it. After this, no callback may reference the widget.
    pub fn on_destroy(&mut self, widget: WidgetHandle) {
        debug!(%widget, "unregister widget");
        self.lifecycle.remove(widget);
        self.hover.disconnect(widget);
        self.combo.unregister(widget);
        self.combo.on_child_destroyed(widget);
        for engine in &mut self.engines {
            engine.unregister(widget);
        }
        // drop any queued redraw that still references the dead widget
        self.collect_redraws();
        self.redraws.retain(|request| request.widget != widget);
    }

    /// The toolkit replaced the widget's style object without destroying the
    /// widget: eagerly unregister and treat it as brand new on next sight.
    pub fn on_style_change(&mut self, widget: WidgetHandle) {
        debug!(%widget, "style change, resetting engine data");
        self.on_destroy(widget);
    }

    /// Pointer entered a widget: the mirror of [`Self::on_pointer_leave`].
    /// Every engine tracking the widget gets its highlight flag set and its
    /// transition activated.
    pub fn on_pointer_enter(&mut self, widget: WidgetHandle, now: u64) {
        self.hover.set_hovered(widget, true);
        for engine in &mut self.engines {
            engine.set_highlighted(widget, true);
            if engine.contains(widget) {
                engine.update_state(widget, true, now);
            }
        }
    }

    pub fn on_pointer_leave(&mut self, widget: WidgetHandle, now: u64) {
        self.hover.set_hovered(widget, false);
        for engine in &mut self.engines {
            if engine.contains(widget) && engine.current().widget() == Some(widget) {
                engine.pointer_leave(now);
            }
            engine.set_highlighted(widget, false);
        }
    }

    /// Pointer motion in a container's coordinate space. Container-scoped
    /// engines re-resolve their active child from the tracked rects.
    pub fn on_pointer_motion(&mut self, _widget: WidgetHandle, x: i32, y: i32, now: u64) {
        for category in [Category::MenuItem, Category::ToolBarItem, Category::TabHover] {
            self.engines[category.index()].pointer_motion(x, y, now);
        }
    }

    /// Convenience for call sites that track hover with full geometry: seeds
    /// the hover flag and registers the widget with the category engine.
    pub fn track_hover(
        &mut self,
        widget: WidgetHandle,
        category: Category,
        bounds: Rect,
        pointer: Point,
    ) -> bool {
        self.register_widget(widget);
        self.hover.connect(widget, bounds, pointer);
        self.engines[category.index()].register(widget, bounds)
    }

    /// Global enable toggle, fanned out to every engine. Disabling clears
    /// in-flight animations synchronously.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
        for engine in &mut self.engines {
            engine.set_enabled(enabled);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Swap in a configuration snapshot wholesale and fan the per-category
    /// settings out to every engine.
    pub fn apply_configuration(&mut self, config: &AnimationConfig) {
        for category in Category::ALL {
            self.engines[category.index()].configure(config.category(category));
        }
        self.config = config.clone();
        self.set_enabled(config.enabled);
    }

    pub fn configuration(&self) -> &AnimationConfig {
        &self.config
    }

    /// Advance every engine by one cooperative tick. Returns whether any
    /// animation is still in flight; the host can stop scheduling ticks when
    /// this goes false.
    pub fn tick(&mut self, now: u64) -> bool {
        let mut running = false;
        for engine in &mut self.engines {
            running |= engine.tick(now);
        }
        self.collect_redraws();
        running
    }

    /// Drain the repaint requests produced since the last drain.
    pub fn drain_redraws(&mut self) -> Vec<RedrawRequest> {
        self.collect_redraws();
        std::mem::take(&mut self.redraws)
    }

    /// Animation opacity of a widget for one category, in [0, 1].
    pub fn opacity(&self, widget: WidgetHandle, category: Category) -> f32 {
        self.engines[category.index()].opacity(widget)
    }

    /// Combined widget-state opacity, hover taking precedence over focus.
    pub fn state_opacity(&self, widget: WidgetHandle) -> Option<(Category, f32)> {
        for category in [Category::Hover, Category::Focus] {
            let engine = &self.engines[category.index()];
            if engine.is_animated(widget) {
                return Some((category, engine.opacity(widget)));
            }
        }
        None
    }

    /// The follow-mouse interpolated rect for a widget, if one is in flight.
    pub fn animated_rect(&self, widget: WidgetHandle, category: Category) -> Option<Rect> {
        self.engines[category.index()].animated_rect(widget)
    }

    pub fn is_animated(&self, widget: WidgetHandle, category: Category) -> bool {
        self.engines[category.index()].is_animated(widget)
    }

    fn collect_redraws(&mut self) {
        self.redraws.extend(self.hover.pop_redraws());
        self.redraws.extend(self.combo.pop_redraws());
        for engine in &mut self.engines {
            self.redraws.extend(engine.pop_redraws());
        }
    }
}

impl Default for Animations {
    fn default() -> Self {
        Self::new()
    }
}
