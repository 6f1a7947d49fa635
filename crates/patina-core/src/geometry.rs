//! Integer geometry shared by the animation and shadow subsystems.
//!
//! Rectangles follow the toolkit convention: a rectangle with a non-positive
//! width or height is *invalid* and is skipped by union operations. Dirty-rect
//! bookkeeping relies on this so that "nothing to repaint" is just the invalid
//! rectangle.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// An axis-aligned rectangle in widget coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// The invalid rectangle, used as the "empty" element for unions.
    pub const INVALID: Self = Rect {
        x: 0,
        y: 0,
        width: -1,
        height: -1,
    };

    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle is valid when it has positive extent on both axes.
    pub const fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub const fn contains(&self, x: i32, y: i32) -> bool {
        self.is_valid()
            && x >= self.x
            && x < self.x + self.width
            && y >= self.y
            && y < self.y + self.height
    }

    /// Union of two rectangles, treating invalid rectangles as empty.
    ///
    /// Returns [`Rect::INVALID`] when both inputs are invalid.
    pub fn union(&self, other: &Rect) -> Rect {
        match (self.is_valid(), other.is_valid()) {
            (true, true) => {
                let x = self.x.min(other.x);
                let y = self.y.min(other.y);
                let right = (self.x + self.width).max(other.x + other.width);
                let bottom = (self.y + self.height).max(other.y + other.height);
                Rect::new(x, y, right - x, bottom - y)
            }
            (true, false) => *self,
            (false, true) => *other,
            (false, false) => Rect::INVALID,
        }
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Grow the rectangle by `margin` on every side.
    pub fn inflated(&self, margin: i32) -> Rect {
        Rect::new(
            self.x - margin,
            self.y - margin,
            self.width + 2 * margin,
            self.height + 2 * margin,
        )
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::INVALID
    }
}
