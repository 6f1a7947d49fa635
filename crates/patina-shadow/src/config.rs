//! Shadow configuration snapshots.
//!
//! The host reloads these wholesale from its settings mechanism and pushes
//! them into [`ShadowHelper::initialize`](crate::ShadowHelper::initialize).
//! Color values are opaque to this crate; only the renderer interprets them.

/// An opaque RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::BLACK
    }
}

/// Shadow gradient parameters for one window state (active or inactive).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowGradient {
    pub enabled: bool,
    /// Spread of the gradient, in pixels.
    pub size: u32,
    pub horizontal_offset: f32,
    pub vertical_offset: f32,
    pub inner_color: Rgba,
    pub outer_color: Rgba,
}

impl Default for ShadowGradient {
    fn default() -> Self {
        ShadowGradient {
            enabled: true,
            size: 25,
            horizontal_offset: 0.0,
            vertical_offset: 0.1,
            inner_color: Rgba::BLACK,
            outer_color: Rgba::BLACK,
        }
    }
}

/// A full shadow configuration snapshot.
///
/// `overlap` is subtracted from `size` when computing the margins installed
/// on the host window; the innermost ring of the shadow is drawn under the
/// window frame itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowConfig {
    /// Tile edge length, in pixels.
    pub size: u32,
    pub overlap: u32,
    pub active: ShadowGradient,
    pub inactive: ShadowGradient,
}

impl ShadowConfig {
    /// The shadow extent actually reported to the host, clamped at zero.
    pub fn margin(&self) -> u32 {
        self.size.saturating_sub(self.overlap)
    }
}

impl Default for ShadowConfig {
    fn default() -> Self {
        ShadowConfig {
            size: 29,
            overlap: 4,
            active: ShadowGradient::default(),
            inactive: ShadowGradient {
                vertical_offset: 0.2,
                ..ShadowGradient::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_is_size_minus_overlap() {
        let config = ShadowConfig::default();
        assert_eq!(config.margin(), 25);

        let degenerate = ShadowConfig {
            size: 2,
            overlap: 4,
            ..ShadowConfig::default()
        };
        assert_eq!(degenerate.margin(), 0);
    }
}
