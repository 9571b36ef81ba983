//! Direct numeric solver: symmetric split in linear-light space.

use crate::gamma;

/// Convergence tolerance for the bisection interval, in linear-light units.
const TOLERANCE: f64 = 1e-8;

/// Find a pair `(a, b)` whose gamma-aware average equals `s` and whose
/// naive average is as close as possible to `t` (all 16-bit values).
///
/// The candidates are kept symmetric about `ss = srgb_to_linear(s)` in
/// linear space, so their gamma-aware average is `ss` by construction; the
/// split width `sd` is bisected over `[0, min(ss, 1 - ss)]` until the
/// interval is narrower than the tolerance, narrowing on whether `a + b`
/// overshoots `2 * t`. The interval halves every iteration, so this takes
/// at most ~26 iterations.
///
/// Requires `t < s`: spreading a symmetric pair can only lower the naive
/// average (the encode curve is concave), so callers treat `t >= s` as a
/// no-op before getting here.
pub fn split(s: u32, t: u32) -> (u32, u32) {
    debug_assert!(s <= 65535 && t < s, "split requires t < s <= 65535");
    let ss = gamma::srgb_to_linear(f64::from(s) / 65535.0);
    let mut sd_min = 0.0f64;
    let mut sd_max = ss.min(1.0 - ss);
    let (mut a, mut b) = (s, s);
    while sd_max - sd_min > TOLERANCE {
        let sd = (sd_max + sd_min) / 2.0;
        a = u32::from(gamma::encode16(ss - sd));
        b = u32::from(gamma::encode16(ss + sd));
        if a + b < 2 * t {
            sd_max = sd;
        } else {
            sd_min = sd;
        }
    }
    (a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Re-encode the gamma-aware average of the returned pair.
    fn correct_average(a: u32, b: u32) -> u32 {
        let avg = (gamma::decode16(a as u16) + gamma::decode16(b as u16)) / 2.0;
        u32::from(gamma::encode16(avg))
    }

    #[test]
    fn test_preserves_gamma_aware_average() {
        for s in (1000u32..=65000).step_by(1771) {
            for t in [0, s / 4, s / 2, s.saturating_sub(500)] {
                if t >= s {
                    continue;
                }
                let (a, b) = split(s, t);
                let avg = correct_average(a, b);
                let error = (avg as i64 - s as i64).abs();
                assert!(
                    error <= 1,
                    "split({s}, {t}) = ({a}, {b}): gamma-aware average {avg} drifted from {s}"
                );
            }
        }
    }

    #[test]
    fn test_naive_average_approaches_reachable_targets() {
        // For mid-range s, moderate darkening targets are reachable and the
        // naive average must land within quantization of 2t.
        for (s, t) in [(40000u32, 30000u32), (50000, 44000), (30000, 25000)] {
            let (a, b) = split(s, t);
            let error = (i64::from(a + b) - i64::from(2 * t)).abs();
            assert!(
                error <= 4,
                "split({s}, {t}) = ({a}, {b}): a+b={} missed 2t={}",
                a + b,
                2 * t
            );
        }
    }

    #[test]
    fn test_unreachable_target_saturates_at_max_split() {
        // t = 0 is usually below the widest achievable split; the solver
        // must converge to the maximum spread, with a at the floor.
        let (a, b) = split(40000, 0);
        assert!(a < 100, "expected a near zero, got {a}");
        assert!(b > 40000, "expected b above s, got {b}");
    }

    #[test]
    fn test_pair_brackets_the_visible_value() {
        for s in (2000..=63000).step_by(3571) {
            let (a, b) = split(s, s / 2);
            assert!(a <= s, "a={a} above s={s}");
            assert!(b >= s, "b={b} below s={s}");
            assert!(a <= b);
        }
    }

    #[test]
    fn test_extremes_terminate() {
        // Near-black and near-white leave almost no room for a split; the
        // solver must still terminate and keep the invariant.
        for s in [1u32, 2, 65534, 65535] {
            for t in [0u32, s.saturating_sub(1)] {
                if t >= s {
                    continue;
                }
                let (a, b) = split(s, t);
                assert!(a <= 65535 && b <= 65535);
                let error = (correct_average(a, b) as i64 - s as i64).abs();
                assert!(error <= 1, "split({s}, {t}) broke the average invariant");
            }
        }
    }
}
