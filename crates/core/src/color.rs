//! Linear RGBA helpers.

use glam::DVec4;

/// Gamma used to move between stored (sRGB-ish) and linear color.
pub const GAMMA: f64 = 2.2;

/// Composite `src` over `dst` (standard src-over, non-premultiplied).
///
/// The color channels follow `dst * (1 - a_src) + src * a_src`; the result
/// alpha is `a_src + a_dst * (1 - a_src)`.
pub fn overlay(dst: DVec4, src: DVec4) -> DVec4 {
    let a = src.w;
    let rgb = dst.truncate() * (1.0 - a) + src.truncate() * a;
    rgb.extend(a + dst.w * (1.0 - a))
}

/// Convert one stored 8-bit channel to linear.
pub fn to_linear(channel: u8) -> f64 {
    (f64::from(channel) / 255.0).powf(GAMMA)
}

/// Convert one linear channel back to an 8-bit stored value, clamping.
pub fn to_srgb(linear: f64) -> u8 {
    let value = linear.max(0.0).powf(1.0 / GAMMA).min(1.0);
    (value * 255.0).round() as u8
}
