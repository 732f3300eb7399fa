//! Color-vision deficiency simulation.
//!
//! Dichromacy is simulated in LMS cone space: the response of the missing
//! cone type is rebuilt as a linear combination of the other two (Viénot,
//! Brettel and Mollon, 1999). Achromatopsia collapses the color to a single
//! weighted luminance.

use crate::color::{from_lab, linear_to_srgb, srgb_to_linear, to_lab, Lab, LinearRgb, Rgb8};
use crate::error::PickerError;
use serde::{Deserialize, Serialize};

/// All vision-mode names accepted by [`VisionMode::from_name`].
const MODE_NAMES: &[&str] = &[
    "normal",
    "protanopia",
    "deuteranopia",
    "tritanopia",
    "cone_achromatopsia",
    "rod_achromatopsia",
];

/// Which kind of color vision to simulate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisionMode {
    #[default]
    Normal,
    /// No long-wavelength (red) cones.
    Protanopia,
    /// No medium-wavelength (green) cones.
    Deuteranopia,
    /// No short-wavelength (blue) cones.
    Tritanopia,
    /// Blue-cone monochromacy.
    ConeAchromatopsia,
    /// Rod monochromacy: no functioning cones.
    RodAchromatopsia,
}

impl VisionMode {
    pub const ALL: [VisionMode; 6] = [
        VisionMode::Normal,
        VisionMode::Protanopia,
        VisionMode::Deuteranopia,
        VisionMode::Tritanopia,
        VisionMode::ConeAchromatopsia,
        VisionMode::RodAchromatopsia,
    ];

    /// Looks a mode up by its snake_case name; hyphens are accepted too.
    pub fn from_name(name: &str) -> Result<Self, PickerError> {
        let key = name.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|m| m.name() == key)
            .ok_or_else(|| PickerError::UnknownVisionMode(name.to_string()))
    }

    pub fn name(self) -> &'static str {
        match self {
            VisionMode::Normal => MODE_NAMES[0],
            VisionMode::Protanopia => MODE_NAMES[1],
            VisionMode::Deuteranopia => MODE_NAMES[2],
            VisionMode::Tritanopia => MODE_NAMES[3],
            VisionMode::ConeAchromatopsia => MODE_NAMES[4],
            VisionMode::RodAchromatopsia => MODE_NAMES[5],
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        MODE_NAMES
    }
}

struct Lms {
    l: f64,
    m: f64,
    s: f64,
}

fn linear_to_lms(c: LinearRgb) -> Lms {
    Lms {
        l: 17.8824 * c.r + 43.5161 * c.g + 4.11935 * c.b,
        m: 3.45565 * c.r + 27.1554 * c.g + 3.86714 * c.b,
        s: 0.0299566 * c.r + 0.184309 * c.g + 1.46709 * c.b,
    }
}

fn lms_to_linear(c: Lms) -> LinearRgb {
    LinearRgb {
        r: 0.0809444479 * c.l - 0.130504409 * c.m + 0.116721066 * c.s,
        g: -0.0102485335 * c.l + 0.0540193266 * c.m - 0.113614708 * c.s,
        b: -0.000365296938 * c.l - 0.00412161469 * c.m + 0.693511405 * c.s,
    }
}

fn dichromat(c: LinearRgb, project: impl Fn(Lms) -> Lms) -> LinearRgb {
    lms_to_linear(project(linear_to_lms(c))).clamped()
}

fn monochromat(c: LinearRgb, weights: [f64; 3]) -> LinearRgb {
    let y = (weights[0] * c.r + weights[1] * c.g + weights[2] * c.b).clamp(0.0, 1.0);
    LinearRgb { r: y, g: y, b: y }
}

/// Simulates how `color` appears under `mode`.
pub fn simulate(mode: VisionMode, color: Rgb8) -> Rgb8 {
    let linear = srgb_to_linear(color);
    let seen = match mode {
        VisionMode::Normal => return color,
        VisionMode::Protanopia => dichromat(linear, |c| Lms {
            l: 2.02344 * c.m - 2.52581 * c.s,
            ..c
        }),
        VisionMode::Deuteranopia => dichromat(linear, |c| Lms {
            m: 0.494207 * c.l + 1.24827 * c.s,
            ..c
        }),
        VisionMode::Tritanopia => dichromat(linear, |c| Lms {
            s: -0.395913 * c.l + 0.801109 * c.m,
            ..c
        }),
        VisionMode::ConeAchromatopsia => monochromat(linear, [0.299, 0.587, 0.114]),
        VisionMode::RodAchromatopsia => monochromat(linear, [0.212656, 0.715158, 0.072186]),
    };
    linear_to_srgb(seen)
}

/// Simulates `mode` on a Lab color by round-tripping through sRGB bytes.
pub fn simulate_lab(mode: VisionMode, color: Lab) -> Lab {
    to_lab(simulate(mode, from_lab(color)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for mode in VisionMode::ALL {
            assert_eq!(VisionMode::from_name(mode.name()).unwrap(), mode);
        }
        assert_eq!(
            VisionMode::from_name("Rod-Achromatopsia").unwrap(),
            VisionMode::RodAchromatopsia
        );
        assert_eq!(VisionMode::list_names().len(), VisionMode::ALL.len());
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = VisionMode::from_name("tetrachromacy").unwrap_err();
        assert!(matches!(err, PickerError::UnknownVisionMode(_)));
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&VisionMode::ConeAchromatopsia).unwrap();
        assert_eq!(json, "\"cone_achromatopsia\"");
    }

    #[test]
    fn dichromats_preserve_white_and_black() {
        for mode in [
            VisionMode::Protanopia,
            VisionMode::Deuteranopia,
            VisionMode::Tritanopia,
        ] {
            let white = simulate(mode, Rgb8::WHITE);
            assert!(
                white.r >= 254 && white.g >= 254 && white.b >= 254,
                "{mode:?} white became {white:?}"
            );
            assert_eq!(simulate(mode, Rgb8::BLACK), Rgb8::BLACK, "{mode:?}");
        }
    }

    #[test]
    fn red_and_green_collapse_under_protanopia() {
        let red = simulate(VisionMode::Protanopia, Rgb8::new(255, 0, 0));
        let green = simulate(VisionMode::Protanopia, Rgb8::new(0, 255, 0));
        // Both end up in the yellow-brown family: red and green channels
        // dominate blue.
        assert!(red.b < red.r && red.b < red.g, "{red:?}");
        assert!(green.b < green.r && green.b < green.g, "{green:?}");
    }

    #[test]
    fn tritanopia_keeps_blue_but_shifts_red() {
        let blue = Rgb8::new(0, 0, 255);
        assert_eq!(simulate(VisionMode::Tritanopia, blue), blue);
        let red = Rgb8::new(255, 0, 0);
        assert_ne!(simulate(VisionMode::Tritanopia, red), red);
    }

    #[test]
    fn rod_achromatopsia_of_white_is_white() {
        assert_eq!(
            simulate(VisionMode::RodAchromatopsia, Rgb8::WHITE),
            Rgb8::WHITE
        );
    }

    #[test]
    fn simulate_lab_normal_is_identity_up_to_quantization() {
        let lab = to_lab(Rgb8::new(40, 120, 200));
        let back = simulate_lab(VisionMode::Normal, lab);
        assert!((back.l - lab.l).abs() < 0.01);
        assert!((back.a - lab.a).abs() < 0.01);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn normal_vision_is_identity(r: u8, g: u8, b: u8) {
                let c = Rgb8::new(r, g, b);
                prop_assert_eq!(simulate(VisionMode::Normal, c), c);
            }

            #[test]
            fn achromatopsia_is_gray(r: u8, g: u8, b: u8) {
                for mode in [VisionMode::ConeAchromatopsia, VisionMode::RodAchromatopsia] {
                    let out = simulate(mode, Rgb8::new(r, g, b));
                    prop_assert!(out.r == out.g && out.g == out.b, "{:?}: {:?}", mode, out);
                }
            }

            #[test]
            fn grays_survive_dichromacy(k: u8) {
                let gray = Rgb8::new(k, k, k);
                for mode in [VisionMode::Protanopia, VisionMode::Deuteranopia, VisionMode::Tritanopia] {
                    let out = simulate(mode, gray);
                    for ch in [out.r, out.g, out.b] {
                        prop_assert!((ch as i16 - k as i16).abs() <= 1, "{:?}: {:?} from {}", mode, out, k);
                    }
                }
            }
        }
    }
}
