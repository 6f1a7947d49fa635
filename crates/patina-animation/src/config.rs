//! Animation configuration snapshot.
//!
//! The engine never parses configuration files; the host integration builds an
//! [`AnimationConfig`] from its own settings mechanism and pushes it wholesale
//! via [`Animations::apply_configuration`](crate::Animations::apply_configuration).
//! Snapshots are read-only once applied and are swapped atomically: a reload
//! replaces the whole struct, never individual fields in place.

/// The kinds of widget-state transitions the engine animates.
///
/// One transition engine instance exists per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Generic widget hover fade (buttons, checkboxes).
    Hover,
    /// Keyboard focus fade.
    Focus,
    /// Menu item prelight.
    MenuItem,
    /// Notebook tab hover.
    TabHover,
    /// Toolbar item prelight.
    ToolBarItem,
    /// Scrollbar slider hover.
    Scrollbar,
    /// Tree view row hover.
    TreeRow,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Hover,
        Category::Focus,
        Category::MenuItem,
        Category::TabHover,
        Category::ToolBarItem,
        Category::Scrollbar,
        Category::TreeRow,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// How a category animates its state switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationMode {
    /// No animation; state changes apply instantly.
    Disabled,
    /// Discrete opacity fade between states.
    Fade,
    /// Continuous rectangle interpolation toward the pointer target.
    FollowMouse,
}

/// Per-category animation settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryConfig {
    /// Transition duration in milliseconds.
    pub duration_ms: u32,
    pub mode: AnimationMode,
    /// Whether a sibling hand-off also fades out the previous target.
    ///
    /// The canonical behavior swaps instantly on hand-off; some toolkit
    /// variants fade the previous item out as well, so this is a knob rather
    /// than a fixed policy.
    pub fade_out_on_handoff: bool,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        CategoryConfig {
            duration_ms: 150,
            mode: AnimationMode::Fade,
            fade_out_on_handoff: false,
        }
    }
}

/// A complete, read-only animation configuration snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    /// Global kill switch; disabling clears in-flight animations immediately.
    pub enabled: bool,
    categories: [CategoryConfig; Category::COUNT],
}

impl AnimationConfig {
    pub fn category(&self, category: Category) -> &CategoryConfig {
        &self.categories[category.index()]
    }

    pub fn category_mut(&mut self, category: Category) -> &mut CategoryConfig {
        &mut self.categories[category.index()]
    }

    pub fn set_duration(&mut self, category: Category, duration_ms: u32) {
        self.categories[category.index()].duration_ms = duration_ms;
    }

    pub fn set_mode(&mut self, category: Category, mode: AnimationMode) {
        self.categories[category.index()].mode = mode;
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            enabled: true,
            categories: [CategoryConfig::default(); Category::COUNT],
        }
    }
}
