#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rectangle as drawn: origin plus signed size.
///
/// Width and height keep the sign of the drag direction, so `x`/`y` is the
/// drag origin rather than the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle spanned by a drag from `origin` to `current`.
    #[must_use]
    pub fn from_drag(origin: Point, current: Point) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: current.x - origin.x,
            height: current.y - origin.y,
        }
    }

    /// Axis-aligned bounds with the sign of the size folded away.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds {
            min_x: self.x.min(self.x + self.width),
            min_y: self.y.min(self.y + self.height),
            max_x: self.x.max(self.x + self.width),
            max_y: self.y.max(self.y + self.height),
        }
    }
}

/// Normalized bounding box (`min <= max` on both axes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Strict containment: points on the border are outside.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x > self.min_x && pt.x < self.max_x && pt.y > self.min_y && pt.y < self.max_y
    }
}
