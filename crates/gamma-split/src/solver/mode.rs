//! Filter modes: how the naive-average target is derived from the visible
//! and hidden values.

/// Strength-scaled rule producing the naive-average target `t` from the
/// visible value `s` and the hidden value `l` (16-bit scale).
///
/// The *toward-linear* modes treat the hidden image as a darkening mask on
/// the naively downscaled appearance; the *toward-srgb* modes anchor the
/// target at the visible value instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Darken the naive appearance where the hidden image is dark
    /// (`t = s - d_max * (65535 - l) / 65535`). The hidden image acts as a
    /// delta from white.
    #[default]
    DarkenTowardLinear,
    /// Lighten the naive appearance where the hidden image is bright
    /// (`t = s + d_max * l / 65535`, saturating).
    LightenTowardSrgb,
    /// The hidden value is the goal itself, with the excursion from the
    /// visible value capped at `d_max`.
    MixTowardLinear,
    /// Strength-weighted blend from the visible value toward the hidden one
    /// (`t = s + (l - s) * d_max / 65535`).
    MixTowardSrgb,
}

impl FilterMode {
    /// Compute the naive-average target for one channel.
    ///
    /// All values are on the 16-bit scale; `d_max` is the maximum excursion
    /// (strength 255 maps to 65535). Saturation at 0/65535 is a defined
    /// clamped result.
    pub fn target(self, s: u32, l: u32, d_max: u32) -> u32 {
        debug_assert!(s <= 65535 && l <= 65535 && d_max <= 65535);
        match self {
            FilterMode::DarkenTowardLinear => {
                let d = d_max * (65535 - l) / 65535;
                if d < s {
                    s - d
                } else {
                    0
                }
            }
            FilterMode::LightenTowardSrgb => (s + d_max * l / 65535).min(65535),
            FilterMode::MixTowardLinear => {
                if d_max < s && l < s - d_max {
                    s - d_max
                } else {
                    l
                }
            }
            FilterMode::MixTowardSrgb => {
                let s = i64::from(s);
                let l = i64::from(l);
                (s + (l - s) * i64::from(d_max) / 65535).clamp(0, 65535) as u32
            }
        }
    }

    /// Whether this mode pins the gamma-aware average to the visible value.
    ///
    /// For these modes an inverse-table gap fill should spread along the U
    /// axis so the exact v row is preserved; the sRGB-anchored modes prefer
    /// the V axis.
    pub fn pins_correct_average(self) -> bool {
        matches!(
            self,
            FilterMode::DarkenTowardLinear | FilterMode::MixTowardLinear
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_darken_scales_with_hidden_darkness() {
        let mode = FilterMode::DarkenTowardLinear;
        // Hidden white: no change.
        assert_eq!(mode.target(40000, 65535, 65535), 40000);
        // Hidden black at full strength: saturates at zero.
        assert_eq!(mode.target(40000, 0, 65535), 0);
        // Half-strength hidden black darkens by d_max.
        assert_eq!(mode.target(40000, 0, 20000), 20000);
        // Never brightens.
        for l in (0..=65535).step_by(4096) {
            assert!(mode.target(30000, l, 50000) <= 30000);
        }
    }

    #[test]
    fn test_lighten_mirrors_darken() {
        let mode = FilterMode::LightenTowardSrgb;
        assert_eq!(mode.target(40000, 0, 65535), 40000);
        assert_eq!(mode.target(40000, 65535, 20000), 60000);
        // Saturates at white.
        assert_eq!(mode.target(60000, 65535, 65535), 65535);
        for l in (0..=65535).step_by(4096) {
            assert!(mode.target(30000, l, 50000) >= 30000);
        }
    }

    #[test]
    fn test_mix_toward_linear_caps_excursion() {
        let mode = FilterMode::MixTowardLinear;
        // Goal within reach: hidden value is the target.
        assert_eq!(mode.target(40000, 35000, 65535), 35000);
        assert_eq!(mode.target(40000, 45000, 65535), 45000);
        // Goal too far below: capped at s - d_max.
        assert_eq!(mode.target(40000, 1000, 10000), 30000);
        // Full strength never caps (d_max >= s - 0).
        assert_eq!(mode.target(40000, 0, 65535), 0);
    }

    #[test]
    fn test_mix_toward_srgb_blends() {
        let mode = FilterMode::MixTowardSrgb;
        // Zero strength: stays at the visible value.
        assert_eq!(mode.target(40000, 0, 0), 40000);
        // Full strength: reaches the hidden value.
        assert_eq!(mode.target(40000, 10000, 65535), 10000);
        // Half strength: midpoint (integer division).
        let t = mode.target(40000, 10000, 32768);
        assert!((24999..=25001).contains(&t), "unexpected midpoint {t}");
    }

    #[test]
    fn test_axis_pinning() {
        assert!(FilterMode::DarkenTowardLinear.pins_correct_average());
        assert!(FilterMode::MixTowardLinear.pins_correct_average());
        assert!(!FilterMode::LightenTowardSrgb.pins_correct_average());
        assert!(!FilterMode::MixTowardSrgb.pins_correct_average());
    }
}
