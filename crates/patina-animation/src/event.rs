//! Host boundary types.
//!
//! The engine is embedded in a widget-toolkit process and has no event loop of
//! its own. The host forwards toolkit notifications as [`WidgetEvent`]s and
//! drains [`RedrawRequest`]s after each call into the engine.

use patina_core::{Rect, WidgetHandle};

/// A foreign lifecycle or pointer notification forwarded by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The widget became real on screen.
    Realized,
    /// The widget is being destroyed; every side table must drop it.
    Destroyed,
    /// The toolkit replaced the widget's style object without destroying the
    /// widget. Treated as a soft reset of engine data.
    StyleChanged,
    PointerEnter,
    PointerLeave,
    PointerMotion { x: i32, y: i32 },
}

/// A repaint request produced by the engine.
///
/// `region == None` means the whole widget should be redrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedrawRequest {
    pub widget: WidgetHandle,
    pub region: Option<Rect>,
}

impl RedrawRequest {
    pub fn whole(widget: WidgetHandle) -> Self {
        RedrawRequest {
            widget,
            region: None,
        }
    }

    pub fn region(widget: WidgetHandle, rect: Rect) -> Self {
        RedrawRequest {
            widget,
            region: Some(rect),
        }
    }
}
