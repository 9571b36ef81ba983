//! Per-pixel pair solving: pick two channel values whose gamma-aware and
//! naive averages land on the requested targets, then emit one of them.

mod bisect;
mod mode;
mod pattern;

pub use bisect::split;
pub use mode::FilterMode;
pub use pattern::DitherPattern;

use rand::Rng;

use crate::lookup::{DenseTable, Lookup2d};

/// How a [`PairSolver`] finds its candidate pair.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Direct numeric bisection per query. Darken-only: queries whose
    /// naive-average target is not below the visible value are no-ops.
    Bisect,
    /// Constant-time queries against a prebuilt inverse table; covers all
    /// filter modes, approximate where the table had to flood-fill a gap.
    Table(DenseTable),
}

/// Per-pixel solver combining filter mode, strength, dithering rule, and
/// solving strategy.
///
/// One solver serves a whole image run; [`solve`](Self::solve) takes `&self`
/// and the prebuilt table is read-only, so rows could be processed
/// concurrently if a caller wanted to.
///
/// # Example
///
/// ```
/// use gamma_split::{DitherPattern, FilterMode, PairSolver, Strategy};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let solver = PairSolver::new(Strategy::Bisect)
///     .mode(FilterMode::DarkenTowardLinear)
///     .strength(128)
///     .pattern(DitherPattern::Checkerboard);
///
/// let mut rng = StdRng::seed_from_u64(0);
/// let out = solver.solve(3, 7, 40000, 10000, &mut rng);
/// assert!(out <= 40000);
/// ```
#[derive(Debug, Clone)]
pub struct PairSolver {
    mode: FilterMode,
    d_max: u32,
    pattern: DitherPattern,
    strategy: Strategy,
}

impl PairSolver {
    /// Create a solver with full strength, the default filter mode, and
    /// checkerboard dithering.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            mode: FilterMode::default(),
            d_max: 65535,
            pattern: DitherPattern::Checkerboard,
            strategy,
        }
    }

    /// Set the filter mode.
    #[inline]
    pub fn mode(mut self, mode: FilterMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the filter strength (0 = no effect, 255 = full excursion).
    #[inline]
    pub fn strength(mut self, strength: u8) -> Self {
        self.d_max = u32::from(strength) * 257;
        self
    }

    /// Set the positional dithering rule.
    #[inline]
    pub fn pattern(mut self, pattern: DitherPattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Solve one channel of the pixel at `(x, y)`.
    ///
    /// `s` is the visible (sRGB-image) value and `l` the hidden
    /// (linear-image) value, both on the 16-bit scale. Returns the 16-bit
    /// channel value to emit at this position.
    ///
    /// # Panics
    ///
    /// Panics if the inverse table is missing an entry inside its own
    /// bounding rectangle. Construction guarantees that never happens; a
    /// panic here means a builder defect and must not be papered over.
    pub fn solve<R: Rng>(&self, x: u32, y: u32, s: u32, l: u32, rng: &mut R) -> u16 {
        let t = self.mode.target(s, l, self.d_max);
        let (a, b) = match &self.strategy {
            Strategy::Bisect => {
                if t >= s {
                    // This strategy can only darken.
                    return s as u16;
                }
                split(s, t)
            }
            Strategy::Table(table) => {
                if t == s {
                    return s as u16;
                }
                let u = to_8bit(t) as i32;
                let v = to_8bit(s) as i32;
                let Some(p) = table.lookup(u, v) else {
                    panic!("inverse table has no entry for (u={u}, v={v}) inside its own rectangle");
                };
                (p.x as u32 * 257, p.y as u32 * 257)
            }
        };
        self.pattern.select(x, y, a, b, rng) as u16
    }
}

/// Round a 16-bit value to the 8-bit scale.
#[inline]
fn to_8bit(value: u32) -> u32 {
    (value * 255 + 32767) / 65535
}
