//! HSB (a.k.a. HSV) conversions.
//!
//! All three components live in [0, 1]; hue wraps modulo 1 so callers can
//! feed slider positions or accumulated angles without normalizing first.

use crate::color::Rgb8;
use serde::{Deserialize, Serialize};

/// Hue, saturation and brightness, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsb {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

fn channel(n: f64, c: Hsb) -> f64 {
    let k = (n + c.h.rem_euclid(1.0) * 6.0).rem_euclid(6.0);
    c.v * (1.0 - c.s * k.min(4.0 - k).clamp(0.0, 1.0))
}

/// Converts HSB to unit-range RGB components (gamma-encoded, not linear).
pub fn hsb_to_unit_rgb(c: Hsb) -> (f64, f64, f64) {
    (channel(5.0, c), channel(3.0, c), channel(1.0, c))
}

/// Converts HSB to 8-bit sRGB.
pub fn hsb_to_rgb(c: Hsb) -> Rgb8 {
    let (r, g, b) = hsb_to_unit_rgb(c);
    let to_byte = |x: f64| (x.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgb8::new(to_byte(r), to_byte(g), to_byte(b))
}

/// Converts 8-bit sRGB to HSB.
///
/// Achromatic colors get hue 0; black gets saturation 0.
pub fn rgb_to_hsb(c: Rgb8) -> Hsb {
    let r = c.r as f64 / 255.0;
    let g = c.g as f64 / 255.0;
    let b = c.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let chroma = max - min;

    let s = if max > 0.0 { chroma / max } else { 0.0 };

    let sector = if chroma == 0.0 {
        0.0
    } else if max == r {
        ((g - b) / chroma).rem_euclid(6.0)
    } else if max == g {
        (b - r) / chroma + 2.0
    } else {
        (r - g) / chroma + 4.0
    };

    let mut h = sector / 6.0;
    // rem_euclid can round a tiny negative up to the modulus itself
    if h >= 1.0 {
        h -= 1.0;
    }

    Hsb { h, s, v: max }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn pure_red_to_hsb() {
        let hsb = rgb_to_hsb(Rgb8::new(255, 0, 0));
        assert!(approx_eq(hsb.h, 0.0), "h: {}", hsb.h);
        assert!(approx_eq(hsb.s, 1.0), "s: {}", hsb.s);
        assert!(approx_eq(hsb.v, 1.0), "v: {}", hsb.v);
    }

    #[test]
    fn hsb_zero_hue_full_saturation_is_red() {
        let rgb = hsb_to_rgb(Hsb {
            h: 0.0,
            s: 1.0,
            v: 1.0,
        });
        assert_eq!(rgb, Rgb8::new(255, 0, 0));
    }

    #[test]
    fn primary_and_secondary_hues() {
        let cases = [
            (1.0 / 6.0, Rgb8::new(255, 255, 0)),
            (2.0 / 6.0, Rgb8::new(0, 255, 0)),
            (3.0 / 6.0, Rgb8::new(0, 255, 255)),
            (4.0 / 6.0, Rgb8::new(0, 0, 255)),
            (5.0 / 6.0, Rgb8::new(255, 0, 255)),
        ];
        for (h, expected) in cases {
            let rgb = hsb_to_rgb(Hsb { h, s: 1.0, v: 1.0 });
            assert_eq!(rgb, expected, "hue {h}");
            let back = rgb_to_hsb(expected);
            assert!(approx_eq(back.h, h), "hue {h} came back as {}", back.h);
        }
    }

    #[test]
    fn grays_have_zero_saturation() {
        for k in [0u8, 1, 77, 128, 254, 255] {
            let hsb = rgb_to_hsb(Rgb8::new(k, k, k));
            assert_eq!(hsb.s, 0.0, "gray {k}");
            assert_eq!(hsb.h, 0.0, "gray {k}");
        }
    }

    #[test]
    fn zero_brightness_is_black_for_any_hue() {
        for h in [0.0, 0.3, 0.9] {
            assert_eq!(hsb_to_rgb(Hsb { h, s: 1.0, v: 0.0 }), Rgb8::BLACK);
        }
    }

    #[test]
    fn negative_hue_wraps() {
        let a = hsb_to_rgb(Hsb {
            h: -0.25,
            s: 0.8,
            v: 0.9,
        });
        let b = hsb_to_rgb(Hsb {
            h: 0.75,
            s: 0.8,
            v: 0.9,
        });
        assert_eq!(a, b);
    }

    #[test]
    fn hue_just_below_red_stays_below_one() {
        // Max is red with blue slightly above green: sector is just under 6.
        let hsb = rgb_to_hsb(Rgb8::new(255, 0, 1));
        assert!(hsb.h < 1.0 && hsb.h > 0.99, "h: {}", hsb.h);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn hue_wraps_modulo_one(h in 0.0_f64..1.0, s in 0.0_f64..=1.0, v in 0.0_f64..=1.0) {
                let a = hsb_to_rgb(Hsb { h, s, v });
                let b = hsb_to_rgb(Hsb { h: h + 1.0, s, v });
                prop_assert_eq!(a, b);
            }

            #[test]
            fn rgb_hsb_round_trip(r: u8, g: u8, b: u8) {
                let c = Rgb8::new(r, g, b);
                prop_assert_eq!(hsb_to_rgb(rgb_to_hsb(c)), c);
            }

            #[test]
            fn hsb_components_are_in_unit_range(r: u8, g: u8, b: u8) {
                let hsb = rgb_to_hsb(Rgb8::new(r, g, b));
                prop_assert!((0.0..1.0).contains(&hsb.h), "h = {}", hsb.h);
                prop_assert!((0.0..=1.0).contains(&hsb.s));
                prop_assert!((0.0..=1.0).contains(&hsb.v));
            }
        }
    }
}
