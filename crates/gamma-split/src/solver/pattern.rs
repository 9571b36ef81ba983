//! Positional dithering rule: which pair member a pixel emits.

use rand::Rng;

/// Rule choosing between the two computed candidate values at a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DitherPattern {
    /// Deterministic checkerboard on `(x ^ y) & 1`. Required for
    /// reproducible output, and for 2x2 box-filter downsampling to recover
    /// the intended average (adjacent pixels must alternate).
    #[default]
    Checkerboard,
    /// Uniform coin flip from the injected RNG.
    Random,
}

impl DitherPattern {
    /// Pick `a` or `b` for the pixel at `(x, y)`.
    #[inline]
    pub fn select<R: Rng>(self, x: u32, y: u32, a: u32, b: u32, rng: &mut R) -> u32 {
        let high = match self {
            DitherPattern::Checkerboard => (x ^ y) & 1 == 1,
            DitherPattern::Random => rng.gen_range(0..2) == 1,
        };
        if high {
            b
        } else {
            a
        }
    }
}
