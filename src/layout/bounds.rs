use super::geometry::Point;
use crate::circles::arena::Circle;

/// Axis-aligned box around every placed circle (center ± radius).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub bottom_left: Point,
    pub top_right: Point,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundingBox {
    /// Inverted extent: the first `update` snaps both corners to that circle.
    pub fn new() -> Self {
        Self {
            bottom_left: Point::new(f64::MAX, f64::MAX),
            top_right: Point::new(f64::MIN, f64::MIN),
        }
    }

    /// Widen the box to include `c`. Never shrinks.
    pub fn update(&mut self, c: &Circle) {
        self.bottom_left.x = self.bottom_left.x.min(c.x - c.radius);
        self.bottom_left.y = self.bottom_left.y.min(c.y - c.radius);
        self.top_right.x = self.top_right.x.max(c.x + c.radius);
        self.top_right.y = self.top_right.y.max(c.y + c.radius);
    }

    pub fn is_empty(&self) -> bool {
        self.bottom_left.x > self.top_right.x || self.bottom_left.y > self.top_right.y
    }

    pub fn width(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.top_right.x - self.bottom_left.x
        }
    }

    pub fn height(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.top_right.y - self.bottom_left.y
        }
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.bottom_left.x + self.top_right.x) / 2.0,
            (self.bottom_left.y + self.top_right.y) / 2.0,
        )
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        if self.is_empty() {
            return;
        }
        self.bottom_left.x += dx;
        self.bottom_left.y += dy;
        self.top_right.x += dx;
        self.top_right.y += dy;
    }
}
