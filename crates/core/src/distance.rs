//! Perceptual color difference.
//!
//! The public functions take the rescaled [`Lab`] used everywhere else in
//! this crate and multiply by 100 before applying the textbook formulas, so
//! results are in the usual ΔE units (1.0 ≈ just noticeable).

use crate::color::Lab;
use std::f64::consts::PI;

/// 25^7, the chroma normalization constant shared by G and R_C.
const POW25_7: f64 = 6_103_515_625.0;

/// CIEDE2000 difference between two colors (kL = kC = kH = 1).
pub fn delta_e_2000(lab1: Lab, lab2: Lab) -> f64 {
    ciede2000(
        (lab1.l * 100.0, lab1.a * 100.0, lab1.b * 100.0),
        (lab2.l * 100.0, lab2.a * 100.0, lab2.b * 100.0),
    )
}

/// CIE76 difference: Euclidean distance in textbook Lab.
pub fn delta_e_76(lab1: Lab, lab2: Lab) -> f64 {
    let dl = (lab1.l - lab2.l) * 100.0;
    let da = (lab1.a - lab2.a) * 100.0;
    let db = (lab1.b - lab2.b) * 100.0;
    (dl * dl + da * da + db * db).sqrt()
}

/// CIEDE2000 on textbook-scale (L, a, b) triples.
fn ciede2000((l1, a1, b1): (f64, f64, f64), (l2, a2, b2): (f64, f64, f64)) -> f64 {
    let c_mean = (a1.hypot(b1) + a2.hypot(b2)) / 2.0;
    let c_mean7 = c_mean.powi(7);
    let g = 0.5 * (1.0 - (c_mean7 / (c_mean7 + POW25_7)).sqrt());

    let a1p = a1 * (1.0 + g);
    let a2p = a2 * (1.0 + g);
    let c1p = a1p.hypot(b1);
    let c2p = a2p.hypot(b2);
    let h1p = hue_degrees(a1p, b1);
    let h2p = hue_degrees(a2p, b2);

    let chroma_product = c1p * c2p;

    let dl = l2 - l1;
    let dc = c2p - c1p;
    let dh = if chroma_product == 0.0 {
        0.0
    } else {
        match h2p - h1p {
            d if d > 180.0 => d - 360.0,
            d if d < -180.0 => d + 360.0,
            d => d,
        }
    };
    let big_dh = 2.0 * chroma_product.sqrt() * (dh.to_radians() / 2.0).sin();

    let l_mean = (l1 + l2) / 2.0;
    let cp_mean = (c1p + c2p) / 2.0;
    let h_mean = if chroma_product == 0.0 {
        h1p + h2p
    } else if (h1p - h2p).abs() <= 180.0 {
        (h1p + h2p) / 2.0
    } else if h1p + h2p < 360.0 {
        (h1p + h2p + 360.0) / 2.0
    } else {
        (h1p + h2p - 360.0) / 2.0
    };

    let t = 1.0 - 0.17 * (h_mean - 30.0).to_radians().cos()
        + 0.24 * (2.0 * h_mean).to_radians().cos()
        + 0.32 * (3.0 * h_mean + 6.0).to_radians().cos()
        - 0.20 * (4.0 * h_mean - 63.0).to_radians().cos();

    let l50 = (l_mean - 50.0).powi(2);
    let sl = 1.0 + 0.015 * l50 / (20.0 + l50).sqrt();
    let sc = 1.0 + 0.045 * cp_mean;
    let sh = 1.0 + 0.015 * cp_mean * t;

    let d_theta = 30.0 * (-((h_mean - 275.0) / 25.0).powi(2)).exp();
    let cp_mean7 = cp_mean.powi(7);
    let rc = 2.0 * (cp_mean7 / (cp_mean7 + POW25_7)).sqrt();
    let rt = -(2.0 * d_theta * PI / 180.0).sin() * rc;

    let tl = dl / sl;
    let tc = dc / sc;
    let th = big_dh / sh;
    (tl * tl + tc * tc + th * th + rt * tc * th).sqrt()
}

/// Hue angle in degrees in [0, 360); zero for the achromatic axis.
fn hue_degrees(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        0.0
    } else {
        b.atan2(a).to_degrees().rem_euclid(360.0)
    }
}

/// Coarse perceptibility buckets for a ΔE00 value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaECategory {
    /// Below 1: not perceptible.
    Imperceptible,
    /// 1 to 2: perceptible on close inspection.
    BarelyPerceptible,
    /// 2 to 10: perceptible at a glance.
    Noticeable,
    /// 10 to 50: clearly different colors.
    Distinct,
    /// 50 and above.
    VeryDistinct,
}

impl DeltaECategory {
    pub fn from_delta_e(de: f64) -> Self {
        match de {
            d if d < 1.0 => Self::Imperceptible,
            d if d < 2.0 => Self::BarelyPerceptible,
            d if d < 10.0 => Self::Noticeable,
            d if d < 50.0 => Self::Distinct,
            _ => Self::VeryDistinct,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Imperceptible => "imperceptible",
            Self::BarelyPerceptible => "barely perceptible",
            Self::Noticeable => "noticeable",
            Self::Distinct => "distinct",
            Self::VeryDistinct => "very distinct",
        }
    }
}
