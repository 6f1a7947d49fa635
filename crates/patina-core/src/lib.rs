//! Core utilities shared across the Patina theme engine.
//!
//! This crate holds the leaf types every other Patina crate builds on:
//! integer geometry with invalid-rect semantics, the opaque foreign
//! [`WidgetHandle`], the lifecycle side-table registry, and logging
//! initialization.

pub mod geometry;
pub mod handle;
pub mod logging;
pub mod registry;

pub use geometry::{Point, Rect};
pub use handle::WidgetHandle;
pub use registry::{HookSet, Hooks, WidgetRegistry};
