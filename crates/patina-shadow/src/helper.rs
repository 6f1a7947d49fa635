//! Shadow installation on host windows.
//!
//! [`ShadowHelper`] mirrors the animation registries' lifecycle pattern but
//! not their interpolation: it tracks accepted top-level windows, keeps the
//! rendered tile cache, and emits border-property updates for the host to
//! write into its external window state. Property updates are re-issued for
//! every tracked window whenever [`ShadowHelper::initialize`] regenerates the
//! cache, so windows never keep pointing at stale tiles.

use patina_core::registry::{Hooks, WidgetRegistry};
use patina_core::WidgetHandle;
use tracing::debug;

use crate::config::{Rgba, ShadowConfig};
use crate::tile::{BorderFlags, Tile, TileCache, TileKey, TileRenderer, TILES_PER_SET};

/// Menu shadows are shortened at top and bottom; the menu body is drawn flush
/// against the parent widget there.
const MENU_VERTICAL_OFFSET: u32 = 21;

/// The host toolkit's window-type hint for a top-level window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowTypeHint {
    #[default]
    Normal,
    Dialog,
    Menu,
    DropdownMenu,
    PopupMenu,
    Combo,
    Tooltip,
    Utility,
    Splash,
    Dock,
}

impl WindowTypeHint {
    /// Menus get the square tile set and shortened vertical margins.
    pub fn is_menu(self) -> bool {
        matches!(
            self,
            WindowTypeHint::Menu | WindowTypeHint::DropdownMenu | WindowTypeHint::PopupMenu
        )
    }

    /// Whether windows with this hint get a shadow at all.
    pub fn accepted(self) -> bool {
        self.is_menu() || self == WindowTypeHint::Combo
    }
}

/// Shadow margins around a window, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Margins {
    pub fn uniform(size: u32) -> Self {
        Margins {
            top: size,
            right: size,
            bottom: size,
            left: size,
        }
    }
}

/// The border property the host writes into its external window state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderProperty {
    pub widget: WidgetHandle,
    pub margins: Margins,
    pub borders: BorderFlags,
    /// Tile cache generation this property was issued against.
    pub generation: u64,
}

/// A pending change to the host's window properties, drained by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyUpdate {
    Install(BorderProperty),
    Remove(WidgetHandle),
}

#[derive(Debug, Default, Clone, Copy)]
struct WindowData {
    hint: WindowTypeHint,
}

#[derive(Debug, Clone, Copy)]
struct Palette {
    color: Rgba,
    config: ShadowConfig,
}

/// Tracks shadowed windows and keeps their border properties in sync with
/// the tile cache.
#[derive(Debug, Default)]
pub struct ShadowHelper {
    /// None until the first `initialize`; registration still works before
    /// that, properties are issued once the palette arrives.
    palette: Option<Palette>,
    windows: WidgetRegistry<WindowData>,
    cache: TileCache,
    updates: Vec<PropertyUpdate>,
}

impl ShadowHelper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.palette.is_some()
    }

    /// Install a palette and shadow configuration, regenerating everything.
    ///
    /// The tile cache is invalidated wholesale and the border property is
    /// re-issued for every tracked window against the new cache generation.
    pub fn initialize(&mut self, color: Rgba, config: ShadowConfig) {
        self.cache.invalidate();
        self.palette = Some(Palette { color, config });
        debug!(
            generation = self.cache.generation(),
            windows = self.windows.len(),
            "shadow configuration installed"
        );

        let reissued: Vec<(WidgetHandle, WindowTypeHint)> = self
            .windows
            .iter()
            .map(|(widget, data)| (widget, data.hint))
            .collect();
        for (widget, hint) in reissued {
            self.push_install(widget, hint);
        }
    }

    /// Track a top-level window, filtered by its window-type hint.
    ///
    /// Returns false for rejected hints, null handles, and duplicates. An
    /// accepted window immediately gets a border property queued if a
    /// configuration is already installed.
    pub fn register_window(&mut self, widget: WidgetHandle, hint: WindowTypeHint) -> bool {
        if !hint.accepted() {
            return false;
        }
        if !self.windows.register_with_hooks(widget, Hooks::DESTROY) {
            return false;
        }
        self.windows.value(widget).hint = hint;
        debug!(%widget, ?hint, "shadow window registered");

        if self.is_initialized() {
            self.push_install(widget, hint);
        }
        true
    }

    /// Stop tracking a window. Safe no-op when absent; queues a property
    /// removal when the window was tracked.
    pub fn unregister_window(&mut self, widget: WidgetHandle) {
        if self.windows.remove(widget).is_some() {
            debug!(%widget, "shadow window unregistered");
            self.updates.push(PropertyUpdate::Remove(widget));
        }
    }

    /// Destroy notification entry point.
    pub fn on_destroy(&mut self, widget: WidgetHandle) {
        self.unregister_window(widget);
    }

    pub fn contains(&self, widget: WidgetHandle) -> bool {
        self.windows.contains(widget)
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// The border property a tracked window should carry, or None when the
    /// helper is uninitialized or the window is not tracked.
    pub fn border_property(&self, widget: WidgetHandle) -> Option<BorderProperty> {
        let palette = self.palette.as_ref()?;
        let data = self.windows.get(widget)?;
        Some(Self::property_for(widget, data.hint, palette, self.cache.generation()))
    }

    /// The rendered tile set for one window state, rendering on first access.
    ///
    /// Returns None while uninitialized: there is no color to render with.
    pub fn tiles(
        &mut self,
        active: bool,
        borders: BorderFlags,
        renderer: &mut dyn TileRenderer,
    ) -> Option<&[Tile; TILES_PER_SET]> {
        let palette = self.palette.as_ref()?;
        let key = TileKey {
            size: palette.config.size,
            active,
            borders,
        };
        Some(self.cache.tiles(key, palette.color, renderer))
    }

    pub fn cache(&self) -> &TileCache {
        &self.cache
    }

    /// Drain the queued property updates for the host to apply.
    pub fn pop_property_updates(&mut self) -> Vec<PropertyUpdate> {
        std::mem::take(&mut self.updates)
    }

    fn push_install(&mut self, widget: WidgetHandle, hint: WindowTypeHint) {
        let palette = match self.palette.as_ref() {
            Some(palette) => palette,
            None => return,
        };
        let property = Self::property_for(widget, hint, palette, self.cache.generation());
        self.updates.push(PropertyUpdate::Install(property));
    }

    fn property_for(
        widget: WidgetHandle,
        hint: WindowTypeHint,
        palette: &Palette,
        generation: u64,
    ) -> BorderProperty {
        let margin = palette.config.margin();
        if hint.is_menu() {
            BorderProperty {
                widget,
                margins: Margins {
                    top: margin.saturating_sub(MENU_VERTICAL_OFFSET),
                    right: margin,
                    bottom: margin.saturating_sub(MENU_VERTICAL_OFFSET),
                    left: margin,
                },
                borders: BorderFlags::SQUARE,
                generation,
            }
        } else {
            BorderProperty {
                widget,
                margins: Margins::uniform(margin),
                borders: BorderFlags::ROUND,
                generation,
            }
        }
    }
}
