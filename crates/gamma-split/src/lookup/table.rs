//! Fixed-origin dense 2D table of coordinate pairs.

use super::forward::{Lookup2d, Point};

/// A fully populated reverse mapping over a bounding rectangle.
///
/// Owns an origin `(x0, y0)`, extents `(sx, sy)`, and a contiguous row-major
/// array of `sx * sy` points. Lookups are O(1) and fail closed: a query
/// outside `[x0, x0+sx) x [y0, y0+sy)` returns `None`.
///
/// Built once by [`Inverter::invert`](super::Inverter::invert), then
/// read-only; shared readers need no locking.
#[derive(Debug, Clone)]
pub struct DenseTable {
    x0: i32,
    y0: i32,
    sx: i32,
    sy: i32,
    data: Vec<Point>,
}

impl DenseTable {
    pub(crate) fn new(x0: i32, y0: i32, sx: i32, sy: i32) -> Self {
        debug_assert!(sx > 0 && sy > 0, "DenseTable extents must be positive");
        Self {
            x0,
            y0,
            sx,
            sy,
            data: vec![Point::new(0, 0); (sx as usize) * (sy as usize)],
        }
    }

    pub(crate) fn set(&mut self, x: i32, y: i32, value: Point) {
        let rx = (x - self.x0) as usize;
        let ry = (y - self.y0) as usize;
        self.data[rx + (self.sx as usize) * ry] = value;
    }

    /// The table origin `(x0, y0)`.
    #[inline]
    pub fn origin(&self) -> (i32, i32) {
        (self.x0, self.y0)
    }

    /// The table extents `(sx, sy)`.
    #[inline]
    pub fn extents(&self) -> (i32, i32) {
        (self.sx, self.sy)
    }
}

impl Lookup2d for DenseTable {
    fn range(&self) -> (i32, i32, i32, i32) {
        (
            self.x0,
            self.x0 + self.sx - 1,
            self.y0,
            self.y0 + self.sy - 1,
        )
    }

    fn lookup(&self, x: i32, y: i32) -> Option<Point> {
        if x < self.x0 || y < self.y0 {
            return None;
        }
        let rx = (x - self.x0) as usize;
        let ry = (y - self.y0) as usize;
        if rx >= self.sx as usize || ry >= self.sy as usize {
            return None;
        }
        Some(self.data[rx + (self.sx as usize) * ry])
    }
}
