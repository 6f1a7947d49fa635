//! Opaque widget handles.
//!
//! The engine never owns a widget: the toolkit does. A [`WidgetHandle`] is a
//! foreign identifier used purely as a side-table key. Liveness is enforced by
//! the host forwarding destroy notifications, not by the handle itself.

use std::fmt;

/// A stable, foreign-owned identifier for a toolkit widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetHandle(u64);

impl WidgetHandle {
    /// The null handle. Registering it anywhere fails without side effects.
    pub const NULL: Self = Self(0);

    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for WidgetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WidgetHandle(0x{:016x})", self.0)
    }
}
