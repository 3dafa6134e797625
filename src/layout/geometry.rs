use crate::circles::arena::Circle;

/// Two circles overlap when (r_a + r_b)² − d² exceeds this.
/// Positive so that tangent placements are not flagged.
pub const OVERLAP_EPSILON: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Euclidean distance of the circle's center from the origin.
pub fn distance_to_origin(c: &Circle) -> f64 {
    (c.x * c.x + c.y * c.y).sqrt()
}

/// Center for a circle of radius `radius` externally tangent to both `a` and `b`,
/// on the right-hand side of the direction a → b.
///
/// Law of cosines on the triangle of centers: sides |ab|, r_a + r, r_b + r.
/// The cosine is clamped to [-1, 1] so extreme radius ratios cannot yield NaN.
pub fn tangent_place(a: &Circle, b: &Circle, radius: f64) -> Point {
    let da = b.radius + radius;
    let db = a.radius + radius;
    let mut dx = b.x - a.x;
    let mut dy = b.y - a.y;
    let dc = (dx * dx + dy * dy).sqrt();

    if dc <= 0.0 {
        tracing::warn!(
            "Anchors #{} and #{} share a center, placing beside #{}",
            a.id.0,
            b.id.0,
            a.id.0
        );
        return Point::new(a.x + db, a.y);
    }

    let cos = ((db * db + dc * dc - da * da) / (2.0 * db * dc)).clamp(-1.0, 1.0);
    let theta = cos.acos();
    let along = cos * db;
    let h = theta.sin() * db;
    dx /= dc;
    dy /= dc;

    Point::new(a.x + along * dx + h * dy, a.y + along * dy - h * dx)
}

/// True when the circles overlap by more than `epsilon` in squared-gap terms.
pub fn overlaps(a: &Circle, b: &Circle, epsilon: f64) -> bool {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let dr = a.radius + b.radius;
    dr * dr - dx * dx - dy * dy > epsilon
}
