// SPDX-License-Identifier: MIT
//
// WCAG relative luminance and contrast ratio.
//
// The linearization uses the 0.03928 threshold from WCAG 2.x rather than
// the 0.04045 of the sRGB standard. For 8-bit inputs the two agree on
// every value, but the WCAG constant is what contrast checkers publish.

use crate::color::Rgb;

/// Readable near-black used against light backgrounds.
pub const NEAR_BLACK: Rgb = Rgb::from_u32(0x0b0f1a);

/// Readable white used against dark backgrounds.
pub const NEAR_WHITE: Rgb = Rgb::WHITE;

/// Convert a single sRGB component (0.0–1.0) to linear light.
#[inline]
#[must_use]
pub fn channel_to_linear(c: f64) -> f64 {
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance per WCAG 2.x.
///
///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
///
/// Returns a value in [0.0, 1.0] where 0 is black and 1 is white.
#[must_use]
pub fn relative_luminance(color: Rgb) -> f64 {
    let [r, g, b] = color.to_unit().map(channel_to_linear);
    0.2126f64.mul_add(r, 0.7152f64.mul_add(g, 0.0722 * b))
}

/// Contrast ratio between two colors, in [1.0, 21.0].
///
///   (`L_lighter` + 0.05) / (`L_darker` + 0.05)
///
/// Symmetric: argument order does not matter.
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Whichever of [`NEAR_WHITE`] or [`NEAR_BLACK`] reads better on `bg`.
///
/// Ties go to white.
#[must_use]
pub fn best_black_or_white(bg: Rgb) -> Rgb {
    if contrast_ratio(NEAR_WHITE, bg) >= contrast_ratio(NEAR_BLACK, bg) {
        NEAR_WHITE
    } else {
        NEAR_BLACK
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // ── Relative luminance ──────────────────────────────────────────

    #[test]
    fn luminance_black_is_zero() {
        let lum = relative_luminance(Rgb::BLACK);
        assert!(approx_eq(lum, 0.0, 1e-9), "Black luminance: {lum}");
    }

    #[test]
    fn luminance_white_is_one() {
        let lum = relative_luminance(Rgb::WHITE);
        assert!(approx_eq(lum, 1.0, 1e-9), "White luminance: {lum}");
    }

    #[test]
    fn luminance_channel_weights() {
        let red = relative_luminance(Rgb::new(255, 0, 0));
        let green = relative_luminance(Rgb::new(0, 255, 0));
        let blue = relative_luminance(Rgb::new(0, 0, 255));
        assert!(approx_eq(red, 0.2126, 1e-9), "Red luminance: {red}");
        assert!(approx_eq(green, 0.7152, 1e-9), "Green luminance: {green}");
        assert!(approx_eq(blue, 0.0722, 1e-9), "Blue luminance: {blue}");
    }

    #[test]
    fn linear_segment_below_threshold() {
        // 10/255 ≈ 0.0392 sits on the linear side of the curve.
        let c = 10.0 / 255.0;
        assert!(approx_eq(channel_to_linear(c), c / 12.92, 1e-12));
    }

    // ── Contrast ratio ──────────────────────────────────────────────

    #[test]
    fn contrast_black_white_is_21() {
        let ratio = contrast_ratio(Rgb::BLACK, Rgb::WHITE);
        assert!(approx_eq(ratio, 21.0, 1e-9), "B/W contrast: {ratio}");
    }

    #[test]
    fn contrast_same_color_is_1() {
        let c = Rgb::new(59, 130, 246);
        assert!(approx_eq(contrast_ratio(c, c), 1.0, 1e-9));
    }

    #[test]
    fn contrast_known_pair() {
        // #777777 on white is the classic "just fails AA" gray.
        let ratio = contrast_ratio(Rgb::from_u32(0x777777), Rgb::WHITE);
        assert!(ratio > 4.47 && ratio < 4.49, "#777 on white: {ratio}");
    }

    // ── Best black or white ─────────────────────────────────────────

    #[test]
    fn dark_background_gets_white() {
        assert_eq!(best_black_or_white(Rgb::from_u32(0x101a33)), NEAR_WHITE);
    }

    #[test]
    fn light_background_gets_near_black() {
        assert_eq!(best_black_or_white(Rgb::from_u32(0xf0f4f8)), NEAR_BLACK);
    }

    proptest! {
        #[test]
        fn contrast_is_symmetric_and_bounded(a: u32, b: u32) {
            let (a, b) = (Rgb::from_u32(a), Rgb::from_u32(b));
            let ab = contrast_ratio(a, b);
            let ba = contrast_ratio(b, a);
            prop_assert!((ab - ba).abs() < 1e-12);
            prop_assert!((1.0..=21.0 + 1e-9).contains(&ab));
        }

        #[test]
        fn best_black_or_white_is_never_worse(bg: u32) {
            let bg = Rgb::from_u32(bg);
            let best = best_black_or_white(bg);
            let other = if best == NEAR_WHITE { NEAR_BLACK } else { NEAR_WHITE };
            prop_assert!(contrast_ratio(best, bg) >= contrast_ratio(other, bg));
        }
    }
}
