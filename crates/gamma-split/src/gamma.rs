//! The sRGB transfer curve (IEC 61966-2-1) and integer encode/decode.
//!
//! Everything here is pure `f64` arithmetic. The engine depends on exact,
//! reproducible rounding at table boundaries, so there is a single fixed
//! precision and encoding rounds to nearest with ties to even.

/// Convert a normalized sRGB-encoded value (0.0..=1.0) to linear light.
#[inline]
pub fn srgb_to_linear(encoded: f64) -> f64 {
    if encoded <= 0.04045 {
        encoded / 12.92
    } else {
        ((encoded + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert a normalized linear-light value (0.0..=1.0) to sRGB encoding.
#[inline]
pub fn linear_to_srgb(linear: f64) -> f64 {
    if linear <= 0.0031308 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Decode an 8-bit sRGB channel value to linear light.
#[inline]
pub fn decode8(encoded: u8) -> f64 {
    srgb_to_linear(f64::from(encoded) / 255.0)
}

/// Encode a linear-light value as an 8-bit sRGB channel value.
///
/// Rounds to nearest, ties to even. Callers keep the input inside 0.0..=1.0;
/// out-of-range inputs are clamped.
#[inline]
pub fn encode8(linear: f64) -> u8 {
    debug_assert!(
        (0.0..=1.0).contains(&linear),
        "encode8: input {linear} out of range 0.0..=1.0"
    );
    let linear = linear.clamp(0.0, 1.0);
    (linear_to_srgb(linear) * 255.0).round_ties_even() as u8
}

/// Decode a 16-bit sRGB channel value to linear light.
#[inline]
pub fn decode16(encoded: u16) -> f64 {
    srgb_to_linear(f64::from(encoded) / 65535.0)
}

/// Encode a linear-light value as a 16-bit sRGB channel value.
///
/// Rounds to nearest, ties to even, clamped like [`encode8`].
#[inline]
pub fn encode16(linear: f64) -> u16 {
    debug_assert!(
        (0.0..=1.0).contains(&linear),
        "encode16: input {linear} out of range 0.0..=1.0"
    );
    let linear = linear.clamp(0.0, 1.0);
    (linear_to_srgb(linear) * 65535.0).round_ties_even() as u16
}
