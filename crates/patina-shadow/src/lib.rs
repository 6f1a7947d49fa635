//! Patina window shadows - border tile caching and property sync.
//!
//! A parallel subsystem to the animation core: it shares the widget-lifetime
//! registry pattern but none of the interpolation machinery. The helper
//! tracks accepted top-level windows (menus, dropdowns, popups, combo
//! popouts), caches rendered shadow tiles keyed by size, active state, and
//! border shape, and queues border-property updates for the host to write
//! into its external window state.
//!
//! Tile pixels are produced by a host-supplied [`TileRenderer`]; this crate
//! decides which tiles exist and when they are stale, never how they look.

pub mod config;
pub mod helper;
pub mod tile;

pub use config::{Rgba, ShadowConfig, ShadowGradient};
pub use helper::{
    BorderProperty, Margins, PropertyUpdate, ShadowHelper, WindowTypeHint,
};
pub use tile::{BorderFlags, Tile, TileCache, TileKey, TileRenderer, TILES_PER_SET};
