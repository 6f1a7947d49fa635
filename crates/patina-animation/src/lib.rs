//! Patina animation core - widget state tracking and transition scheduling.
//!
//! This crate is the heart of the Patina theme engine: it tracks transient
//! per-widget UI state (hover, focus, press, the current vs previous hovered
//! sibling) and drives time-based opacity and geometry interpolation for the
//! drawing layer to consume. It is loaded inside a host widget-toolkit
//! process and owns no thread, no event loop, and no widget:
//!
//! - The host forwards toolkit notifications ([`WidgetEvent`]) into the
//!   registry and advances animations by calling [`Animations::tick`] from
//!   its own idle/timer dispatch.
//! - The engine answers with drained [`RedrawRequest`]s and per-paint
//!   queries ([`Animations::opacity`], [`Animations::animated_rect`]).
//!
//! # Quick Start
//!
//! ```
//! use patina_animation::{Animations, Category};
//! use patina_core::{Rect, WidgetHandle};
//!
//! let mut animations = Animations::new();
//! let item = WidgetHandle::from_raw(1);
//!
//! animations.register_widget(item);
//! animations
//!     .engine_mut(Category::MenuItem)
//!     .register(item, Rect::new(0, 0, 120, 24));
//!
//! // toolkit reports the item as prelit
//! animations.engine_mut(Category::MenuItem).update_state(item, true, 0);
//!
//! // host tick loop
//! let still_running = animations.tick(16);
//! for request in animations.drain_redraws() {
//!     // queue a toolkit redraw for request.widget / request.region
//! }
//! # let _ = still_running;
//! ```

pub mod animations;
pub mod config;
pub mod event;
pub mod follow_mouse;
pub mod hover;
pub mod timeline;
pub mod transition;

pub use animations::Animations;
pub use config::{AnimationConfig, AnimationMode, Category, CategoryConfig};
pub use event::{RedrawRequest, WidgetEvent};
pub use follow_mouse::FollowMouse;
pub use hover::{CompositeHoverTracker, HoverTracker};
pub use timeline::{Direction, TimeLine};
pub use transition::{TransitionData, TransitionEngine};

// Re-export common types from dependencies
pub use patina_core::{Hooks, Point, Rect, WidgetHandle, WidgetRegistry};
