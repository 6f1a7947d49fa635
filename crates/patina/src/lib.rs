//! Patina - a widget-toolkit theme engine animation core
//!
//! Patina tracks transient per-widget UI state (hover, focus, the current vs
//! previous hovered sibling) and drives time-based opacity and geometry
//! interpolation for a host toolkit's drawing layer. It is loaded inside the
//! host process and owns no thread and no widget; the host forwards lifecycle
//! and pointer notifications, ticks the engine from its own idle dispatch,
//! and drains redraw requests back out.
//!
//! # Crates
//!
//! - `patina-core` - geometry, widget handles, the lifecycle registry
//! - `patina-animation` - timelines, hover tracking, transition engines
//! - `patina-shadow` - window shadow tile caching and property sync
//!
//! # Quick Start
//!
//! ```
//! use patina::prelude::*;
//!
//! let mut animations = Animations::new();
//! let item = WidgetHandle::from_raw(1);
//!
//! animations.register_widget(item);
//! animations
//!     .engine_mut(Category::MenuItem)
//!     .register(item, Rect::new(0, 0, 120, 24));
//! animations.engine_mut(Category::MenuItem).update_state(item, true, 0);
//!
//! while animations.tick(16) {
//!     for request in animations.drain_redraws() {
//!         // forward to the toolkit's redraw queue
//!         let _ = request;
//!     }
//!     break;
//! }
//! ```

pub use patina_core as core;

#[cfg(feature = "animation")]
pub use patina_animation as animation;

#[cfg(feature = "shadow")]
pub use patina_shadow as shadow;

/// Commonly used types, re-exported for host integrations.
pub mod prelude {
    pub use patina_core::{Point, Rect, WidgetHandle, WidgetRegistry};

    #[cfg(feature = "animation")]
    pub use patina_animation::{
        AnimationConfig, AnimationMode, Animations, Category, RedrawRequest, TimeLine,
        TransitionEngine, WidgetEvent,
    };

    #[cfg(feature = "shadow")]
    pub use patina_shadow::{ShadowConfig, ShadowHelper, TileRenderer, WindowTypeHint};
}
