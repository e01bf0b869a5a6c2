//! Axis-aligned rectangle primitives.
//!
//! All page geometry in this crate uses a top-left origin: y grows
//! downward, so smaller `y0` means closer to the top of the page.
//! Adapters that read from a bottom-left-origin content model convert
//! at the boundary.

/// An axis-aligned rectangle `(x0, y0, x1, y1)` with `x0 <= x1` and
/// `y0 <= y1` by convention. Degenerate or inverted rectangles are
/// tolerated and have zero area, never negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Area of the rectangle. Inverted extents clamp to zero.
    pub fn area(&self) -> f64 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    /// Area of the overlap between `self` and `other`, zero when the
    /// rectangles are disjoint or touch only at an edge.
    pub fn intersection_area(&self, other: &Rect) -> f64 {
        let ix0 = self.x0.max(other.x0);
        let iy0 = self.y0.max(other.y0);
        let ix1 = self.x1.min(other.x1);
        let iy1 = self.y1.min(other.y1);
        if ix1 <= ix0 || iy1 <= iy0 {
            return 0.0;
        }
        (ix1 - ix0) * (iy1 - iy0)
    }

    /// Fraction of `self`'s area covered by `other`.
    ///
    /// Asymmetric: `a.overlap_fraction(&b)` measures how much of `a`
    /// lies under `b`, not the reverse. Zero-area rectangles yield 0
    /// rather than dividing by zero.
    pub fn overlap_fraction(&self, other: &Rect) -> f64 {
        let area = self.area();
        if area <= 0.0 {
            return 0.0;
        }
        self.intersection_area(other) / area
    }
}
