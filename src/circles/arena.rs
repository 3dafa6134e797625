use std::f64::consts::PI;

use compact_str::CompactString;

/// Index into the arena `Vec<Circle>`. Uses u32 to keep chain links small.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CircleId(pub u32);

impl CircleId {
    /// Sentinel for "no link" in index-based structures.
    pub const NONE: CircleId = CircleId(u32::MAX);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single circle, stored in insertion order in a flat arena.
#[derive(Debug, Clone)]
pub struct Circle {
    /// Insertion index
    pub id: CircleId,
    /// Input area; the source of truth for the circle's size
    pub area: u64,
    /// Derived once from the area: r = sqrt(A / π)
    pub radius: f64,
    /// Center, assigned once at placement time
    pub x: f64,
    pub y: f64,
    /// CSS fill color, opaque to the layout
    pub color: Option<CompactString>,
    /// Display name, opaque to the layout
    pub name: Option<CompactString>,
}

impl Circle {
    pub fn new(id: CircleId, area: u64) -> Self {
        Self {
            id,
            area,
            radius: (area as f64 / PI).sqrt(),
            x: 0.0,
            y: 0.0,
            color: None,
            name: None,
        }
    }
}

/// All circles of a run, in input order.
#[derive(Debug, Default)]
pub struct CircleStore {
    pub circles: Vec<Circle>,
}

impl CircleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            circles: Vec::with_capacity(capacity),
        }
    }

    /// Append a circle. Returns its ID (the insertion index).
    pub fn push(
        &mut self,
        area: u64,
        color: Option<CompactString>,
        name: Option<CompactString>,
    ) -> CircleId {
        let id = CircleId(self.circles.len() as u32);
        let mut circle = Circle::new(id, area);
        circle.color = color;
        circle.name = name;
        self.circles.push(circle);
        id
    }

    /// Get a circle by ID.
    pub fn get(&self, id: CircleId) -> &Circle {
        &self.circles[id.index()]
    }

    /// Get a mutable circle by ID.
    pub fn get_mut(&mut self, id: CircleId) -> &mut Circle {
        &mut self.circles[id.index()]
    }

    pub fn len(&self) -> usize {
        self.circles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }

    /// Iterate over circles in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Circle> {
        self.circles.iter()
    }

    /// Shift every circle by (dx, dy). Used once, for the final recentering.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        for c in &mut self.circles {
            c.x += dx;
            c.y += dy;
        }
    }
}
