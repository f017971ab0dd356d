//! Axis-aligned rectangles used as world bounds and quadtree node bounds.
//!
//! Coordinates follow the window convention: `(x, y)` is the top-left corner
//! and `y` grows downward, so the "north" half of a rectangle is the one with
//! the smaller `y`.

use crate::simulation::states::NVec2;

/// Axis-aligned rectangle `[x, x + width] × [y, y + height]`.
///
/// Invariant: `width >= 0` and `height >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundsRect {
    /// Negative extents are clamped to zero.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// World bounds for a window of the given size, anchored at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Rectangle centred on `center` extending `half_w`/`half_h` each way.
    pub fn centered(center: NVec2, half_w: f64, half_h: f64) -> Self {
        Self::new(center.x - half_w, center.y - half_h, 2.0 * half_w, 2.0 * half_h)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> NVec2 {
        NVec2::new(self.x + 0.5 * self.width, self.y + 0.5 * self.height)
    }

    /// Inclusive on every edge.
    pub fn contains(&self, p: &NVec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// AABB overlap; rectangles sharing an edge count as intersecting.
    pub fn intersects(&self, other: &BoundsRect) -> bool {
        !(other.x > self.right()
            || other.right() < self.x
            || other.y > self.bottom()
            || other.bottom() < self.y)
    }

    /// The four equal quadrants in NE, NW, SE, SW order.
    pub fn quadrants(&self) -> [BoundsRect; 4] {
        let hw = 0.5 * self.width;
        let hh = 0.5 * self.height;
        let mx = self.x + hw;
        let my = self.y + hh;
        [
            BoundsRect::new(mx, self.y, hw, hh),     // NE
            BoundsRect::new(self.x, self.y, hw, hh), // NW
            BoundsRect::new(mx, my, hw, hh),         // SE
            BoundsRect::new(self.x, my, hw, hh),     // SW
        ]
    }
}
