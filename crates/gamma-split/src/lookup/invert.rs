//! Inverse-table construction: preimage collection, tie-break selection,
//! and exponential-step gap filling.

use std::collections::BTreeMap;

use rand::Rng;
use thiserror::Error;

use super::forward::{Lookup2d, Point};
use super::table::DenseTable;

/// Errors from inverse-table construction.
///
/// Both variants signal caller misconfiguration rather than data errors;
/// they are not recoverable at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvertError {
    /// Multiple candidates share the minimal tie-break score and random
    /// picking is disabled. The pick policy must fully determine an order,
    /// or accept randomness.
    #[error(
        "{count} candidates tied for output ({u}, {v}) and random tie-breaking is disabled"
    )]
    AmbiguousTie { u: i32, v: i32, count: usize },

    /// The forward map produced no outputs at all.
    #[error("forward map produced no outputs; nothing to invert")]
    EmptyMap,
}

/// Which output axis the gap-filling flood fill favors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisPreference {
    /// Keep filling along U until no more U-progress is possible, then V.
    #[default]
    UFirst,
    /// Keep filling along V until no more V-progress is possible, then U.
    VFirst,
    /// Switch axis every pass, starting with V.
    AlternateFromV,
    /// Switch axis every pass, starting with U.
    AlternateFromU,
}

/// Independent flags governing which representative domain point wins when
/// several map to the same output point.
///
/// When both members of an opposing pair are set, the negating flag
/// (`farthest`, `lightest`) wins. A policy that leaves a tie unresolved
/// without `random` makes [`Inverter::invert`] fail with
/// [`InvertError::AmbiguousTie`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PickPolicy {
    /// Prefer pairs whose members are close together.
    pub closest: bool,
    /// Prefer pairs whose members are far apart.
    pub farthest: bool,
    /// Prefer dark pairs (luminance weighs over closeness when both are on).
    pub darkest: bool,
    /// Prefer light pairs.
    pub lightest: bool,
    /// Break remaining ties uniformly at random.
    pub random: bool,
}

impl PickPolicy {
    /// Prefer the pair closest to the diagonal.
    pub fn closest() -> Self {
        Self {
            closest: true,
            ..Self::default()
        }
    }

    /// Prefer the pair farthest from the diagonal.
    pub fn farthest() -> Self {
        Self {
            farthest: true,
            ..Self::default()
        }
    }

    /// Prefer the darkest pair.
    pub fn darkest() -> Self {
        Self {
            darkest: true,
            ..Self::default()
        }
    }

    /// Prefer the lightest pair.
    pub fn lightest() -> Self {
        Self {
            lightest: true,
            ..Self::default()
        }
    }

    /// Allow random tie-breaking on top of the score terms.
    pub fn with_random(mut self) -> Self {
        self.random = true;
        self
    }

    /// Scalar score; the candidate with the strictly minimal score wins.
    fn score(&self, p: Point) -> i64 {
        let mut score = 0i64;
        if self.closest || self.farthest {
            let mut s = 2 * i64::from(p.x - p.y);
            if s < 0 {
                s = -s;
                s -= 1; // As arbitrary tie breaker, consider x<y "closer".
            }
            if self.farthest {
                s = -s;
            }
            score += s;
        }
        if self.darkest || self.lightest {
            let mut s = (i64::from(p.x) * 256 + i64::from(p.y)).abs();
            if self.lightest {
                s = -s;
            }
            score += s * 1024;
        }
        score
    }
}

/// Builds a [`DenseTable`] reverse mapping from a forward [`Lookup2d`].
///
/// The builder guarantees that after construction *every* coordinate in the
/// bounding rectangle of observed outputs resolves to a representative
/// domain point, even coordinates no domain point maps to exactly: known
/// entries are propagated into gaps one axis at a time at exponentially
/// increasing step sizes, so total coverage costs O(log extent) passes
/// instead of O(extent).
///
/// # Example
///
/// ```
/// use gamma_split::{AxisPreference, Inverter, Lookup2d, PickPolicy, SrgbPairAverage};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(0);
/// let table = Inverter::new(PickPolicy::closest())
///     .preference(AxisPreference::VFirst)
///     .invert(&SrgbPairAverage, &mut rng)
///     .unwrap();
/// assert!(table.lookup(125, 128).is_some());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Inverter {
    preference: AxisPreference,
    pick: PickPolicy,
}

impl Inverter {
    /// Create a builder with the given pick policy and the default axis
    /// preference ([`AxisPreference::UFirst`]).
    pub fn new(pick: PickPolicy) -> Self {
        Self {
            preference: AxisPreference::default(),
            pick,
        }
    }

    /// Set the axis preference for gap filling.
    #[inline]
    pub fn preference(mut self, preference: AxisPreference) -> Self {
        self.preference = preference;
        self
    }

    /// Invert the forward map into a dense table.
    ///
    /// The RNG is only consulted when the pick policy enables random
    /// tie-breaking; pass a seeded [`rand::rngs::StdRng`] for reproducible
    /// tables.
    pub fn invert<L, R>(&self, map: &L, rng: &mut R) -> Result<DenseTable, InvertError>
    where
        L: Lookup2d,
        R: Rng,
    {
        // Phase 1: collect preimages and the output bounding rectangle.
        // BTreeMap keeps iteration deterministic, so flood-fill results and
        // RNG consumption are identical run-to-run.
        let (x0, x1, y0, y1) = map.range();
        let mut preimages: BTreeMap<Point, Vec<Point>> = BTreeMap::new();
        let mut bounds: Option<(i32, i32, i32, i32)> = None;
        for x in x0..=x1 {
            for y in y0..=y1 {
                let Some(out) = map.lookup(x, y) else {
                    continue;
                };
                preimages.entry(out).or_default().push(Point::new(x, y));
                bounds = Some(match bounds {
                    None => (out.x, out.x, out.y, out.y),
                    Some((u0, u1, v0, v1)) => (
                        u0.min(out.x),
                        u1.max(out.x),
                        v0.min(out.y),
                        v1.max(out.y),
                    ),
                });
            }
        }
        let Some((u0, u1, v0, v1)) = bounds else {
            return Err(InvertError::EmptyMap);
        };
        let sx = u1 - u0 + 1;
        let sy = v1 - v0 + 1;
        tracing::debug!(
            outputs = preimages.len(),
            rect = ?(u0, u1, v0, v1),
            "collected preimages"
        );

        // Phase 2: pick one representative per known output point.
        let mut inverse: BTreeMap<Point, Point> = BTreeMap::new();
        for (&uv, candidates) in &preimages {
            let mut best = i64::MAX;
            let mut winners: Vec<Point> = Vec::new();
            for &p in candidates {
                let score = self.pick.score(p);
                if score < best {
                    best = score;
                    winners.clear();
                    winners.push(p);
                } else if score == best {
                    winners.push(p);
                }
            }
            let chosen = if self.pick.random {
                winners[rng.gen_range(0..winners.len())]
            } else if winners.len() == 1 {
                winners[0]
            } else {
                return Err(InvertError::AmbiguousTie {
                    u: uv.x,
                    v: uv.y,
                    count: winners.len(),
                });
            };
            inverse.insert(uv, chosen);
        }

        // Phase 3: flood-fill the gaps. Each pass spreads every filled cell
        // into unfilled neighbors along one axis at the axis's current step;
        // the step doubles while the pass makes progress. An axis retires
        // once its step reaches the table extent or a pass fills nothing.
        let mut need_u = true;
        let mut need_v = true;
        let mut step_u = 1;
        let mut step_v = 1;
        let mut passes = 0u32;
        while need_u || need_v {
            let spread_u = match self.preference {
                AxisPreference::UFirst => need_u,
                AxisPreference::VFirst => !need_v,
                AxisPreference::AlternateFromV => passes % 2 == 1,
                AxisPreference::AlternateFromU => passes % 2 == 0,
            };
            passes += 1;
            if spread_u {
                if !need_u {
                    continue;
                }
                need_u = false;
                let filled: Vec<(Point, Point)> =
                    inverse.iter().map(|(&uv, &xy)| (uv, xy)).collect();
                for (uv, xy) in filled {
                    let minus = Point::new(uv.x - step_u, uv.y);
                    if minus.x >= u0 && !inverse.contains_key(&minus) {
                        inverse.insert(minus, xy);
                        need_u = true;
                    }
                    let plus = Point::new(uv.x + step_u, uv.y);
                    if plus.x <= u1 && !inverse.contains_key(&plus) {
                        inverse.insert(plus, xy);
                        need_u = true;
                    }
                }
                step_u *= 2;
                if step_u >= sx {
                    need_u = false;
                }
            } else {
                if !need_v {
                    continue;
                }
                need_v = false;
                let filled: Vec<(Point, Point)> =
                    inverse.iter().map(|(&uv, &xy)| (uv, xy)).collect();
                for (uv, xy) in filled {
                    let minus = Point::new(uv.x, uv.y - step_v);
                    if minus.y >= v0 && !inverse.contains_key(&minus) {
                        inverse.insert(minus, xy);
                        need_v = true;
                    }
                    let plus = Point::new(uv.x, uv.y + step_v);
                    if plus.y <= v1 && !inverse.contains_key(&plus) {
                        inverse.insert(plus, xy);
                        need_v = true;
                    }
                }
                step_v *= 2;
                if step_v >= sy {
                    need_v = false;
                }
            }
        }
        tracing::debug!(passes, entries = inverse.len(), "flood fill complete");
        debug_assert_eq!(
            inverse.len(),
            (sx as usize) * (sy as usize),
            "flood fill left unfilled cells"
        );

        // Phase 4: materialize.
        let mut table = DenseTable::new(u0, v0, sx, sy);
        for (uv, xy) in &inverse {
            table.set(uv.x, uv.y, *xy);
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// A forward map defined by an explicit list of (domain, output) pairs.
    struct SparseMap {
        range: (i32, i32, i32, i32),
        entries: Vec<(Point, Point)>,
    }

    impl Lookup2d for SparseMap {
        fn range(&self) -> (i32, i32, i32, i32) {
            self.range
        }

        fn lookup(&self, x: i32, y: i32) -> Option<Point> {
            let p = Point::new(x, y);
            self.entries
                .iter()
                .find(|(domain, _)| *domain == p)
                .map(|&(_, out)| out)
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_single_entry_fills_whole_rectangle() {
        // One known output in a rectangle stretched by two far corners.
        let map = SparseMap {
            range: (0, 2, 0, 2),
            entries: vec![
                (Point::new(0, 0), Point::new(0, 0)),
                (Point::new(1, 1), Point::new(9, 5)),
                (Point::new(2, 2), Point::new(4, 2)),
            ],
        };
        let table = Inverter::new(PickPolicy::closest())
            .invert(&map, &mut rng())
            .unwrap();
        assert_eq!(table.range(), (0, 9, 0, 5));
        for u in 0..=9 {
            for v in 0..=5 {
                assert!(
                    table.lookup(u, v).is_some(),
                    "cell ({u}, {v}) left unfilled"
                );
            }
        }
        // The exact preimages survive flood filling.
        assert_eq!(table.lookup(0, 0), Some(Point::new(0, 0)));
        assert_eq!(table.lookup(9, 5), Some(Point::new(1, 1)));
        assert_eq!(table.lookup(4, 2), Some(Point::new(2, 2)));
    }

    #[test]
    fn test_ambiguous_tie_is_fatal_without_random() {
        // Two domain points with identical closeness scores (both have
        // |x - y| == 2 with x < y) collapse onto the same output point.
        let map = SparseMap {
            range: (0, 1, 2, 3),
            entries: vec![
                (Point::new(0, 2), Point::new(0, 0)),
                (Point::new(1, 3), Point::new(0, 0)),
            ],
        };
        let err = Inverter::new(PickPolicy::closest())
            .invert(&map, &mut rng())
            .unwrap_err();
        assert_eq!(
            err,
            InvertError::AmbiguousTie {
                u: 0,
                v: 0,
                count: 2
            }
        );
    }

    #[test]
    fn test_random_pick_resolves_ties() {
        let map = SparseMap {
            range: (0, 1, 2, 3),
            entries: vec![
                (Point::new(0, 2), Point::new(0, 0)),
                (Point::new(1, 3), Point::new(0, 0)),
            ],
        };
        let table = Inverter::new(PickPolicy::closest().with_random())
            .invert(&map, &mut rng())
            .unwrap();
        let picked = table.lookup(0, 0).unwrap();
        assert!(picked == Point::new(0, 2) || picked == Point::new(1, 3));
    }

    #[test]
    fn test_closeness_bias_favors_x_below_y() {
        // (10, 20) scores 2*10 - 1 = 19; (20, 10) scores 2*10 = 20.
        let map = SparseMap {
            range: (0, 30, 0, 30),
            entries: vec![
                (Point::new(10, 20), Point::new(0, 0)),
                (Point::new(20, 10), Point::new(0, 0)),
            ],
        };
        let table = Inverter::new(PickPolicy::closest())
            .invert(&map, &mut rng())
            .unwrap();
        assert_eq!(table.lookup(0, 0), Some(Point::new(10, 20)));
    }

    #[test]
    fn test_farthest_inverts_the_closeness_order() {
        let map = SparseMap {
            range: (0, 30, 0, 30),
            entries: vec![
                (Point::new(10, 20), Point::new(0, 0)),
                (Point::new(14, 16), Point::new(0, 0)),
            ],
        };
        let table = Inverter::new(PickPolicy::farthest())
            .invert(&map, &mut rng())
            .unwrap();
        assert_eq!(table.lookup(0, 0), Some(Point::new(10, 20)));
    }

    #[test]
    fn test_darkest_and_lightest() {
        let map = SparseMap {
            range: (0, 255, 0, 255),
            entries: vec![
                (Point::new(10, 10), Point::new(0, 0)),
                (Point::new(200, 200), Point::new(0, 0)),
            ],
        };
        let dark = Inverter::new(PickPolicy::darkest())
            .invert(&map, &mut rng())
            .unwrap();
        assert_eq!(dark.lookup(0, 0), Some(Point::new(10, 10)));

        let light = Inverter::new(PickPolicy::lightest())
            .invert(&map, &mut rng())
            .unwrap();
        assert_eq!(light.lookup(0, 0), Some(Point::new(200, 200)));
    }

    #[test]
    fn test_luminance_dominates_closeness() {
        // (0, 100) is darker but wider; (90, 100) is closer but brighter.
        // With both terms active the 1024x luminance weight must win.
        let map = SparseMap {
            range: (0, 255, 0, 255),
            entries: vec![
                (Point::new(0, 100), Point::new(0, 0)),
                (Point::new(90, 100), Point::new(0, 0)),
            ],
        };
        let pick = PickPolicy {
            closest: true,
            darkest: true,
            ..PickPolicy::default()
        };
        let table = Inverter::new(pick).invert(&map, &mut rng()).unwrap();
        assert_eq!(table.lookup(0, 0), Some(Point::new(0, 100)));
    }

    #[test]
    fn test_axis_preference_controls_gap_source() {
        // Two seeds at opposite corners of a 3x3 rectangle. The cell
        // (2, 0) is reached along U from (0, 0)'s row or along V from
        // (2, 2)'s column; which one wins depends on the fill order.
        let map = SparseMap {
            range: (0, 1, 0, 1),
            entries: vec![
                (Point::new(0, 0), Point::new(0, 0)),
                (Point::new(1, 1), Point::new(2, 2)),
            ],
        };

        let u_first = Inverter::new(PickPolicy::closest())
            .preference(AxisPreference::UFirst)
            .invert(&map, &mut rng())
            .unwrap();
        assert_eq!(u_first.lookup(2, 0), Some(Point::new(0, 0)));

        let v_first = Inverter::new(PickPolicy::closest())
            .preference(AxisPreference::VFirst)
            .invert(&map, &mut rng())
            .unwrap();
        assert_eq!(v_first.lookup(2, 0), Some(Point::new(1, 1)));
    }

    #[test]
    fn test_empty_map_is_an_error() {
        let map = SparseMap {
            range: (0, 3, 0, 3),
            entries: vec![],
        };
        let err = Inverter::new(PickPolicy::closest())
            .invert(&map, &mut rng())
            .unwrap_err();
        assert_eq!(err, InvertError::EmptyMap);
    }
}
