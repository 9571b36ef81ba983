//! The forward map: a pair of 8-bit channel values to its two observable
//! averages.

use crate::gamma;

/// An integer coordinate, in either the domain (a channel-value pair) or the
/// output space (an average pair).
///
/// Equality and hashing are structural; the `Ord` impl gives the builder a
/// deterministic iteration order over sparse maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A pure function over a rectangular integer domain.
///
/// `lookup` returns `None` for domain points with no defined output; such
/// points are skipped during inversion. Implementations own no mutable
/// state, so a built [`DenseTable`](super::DenseTable) can be shared across
/// readers freely.
pub trait Lookup2d {
    /// The inclusive rectangle `(x0, x1, y0, y1)` of valid domain
    /// coordinates.
    fn range(&self) -> (i32, i32, i32, i32);

    /// The output coordinate for a domain point, if it has one.
    fn lookup(&self, x: i32, y: i32) -> Option<Point>;
}

/// The production forward map over the full 8-bit square.
///
/// For a pair `(x, y)` of channel values it produces:
///
/// - `u`: the naive average `(x + y) / 2`, computed in sRGB space with a
///   round-to-even correction before halving — what a simple box filter
///   reports.
/// - `v`: the gamma-aware average, re-encoded — what a colorimetrically
///   correct resize reports.
///
/// The map is total: every domain point has an output.
#[derive(Debug, Clone, Copy, Default)]
pub struct SrgbPairAverage;

impl Lookup2d for SrgbPairAverage {
    fn range(&self) -> (i32, i32, i32, i32) {
        (0, 255, 0, 255)
    }

    fn lookup(&self, x: i32, y: i32) -> Option<Point> {
        let mut sum = x + y;
        if sum & 3 == 3 {
            sum += 1; // Round to even.
        }
        let u = sum >> 1;
        let v = gamma::encode8((gamma::decode8(x as u8) + gamma::decode8(y as u8)) / 2.0);
        Some(Point::new(u, i32::from(v)))
    }
}
