//! Contrasting-color search.
//!
//! Given a reference color, brute-force a grid of (lightness, hue) pairs at
//! the reference chroma and keep the candidate that is most distinct from
//! the reference for normal, protanope and deuteranope viewers combined.

use crate::color::{from_lab, lab_to_lch, lch_to_lab, to_lab, Lab, Lch, Rgb8};
use crate::distance::delta_e_2000;
use crate::params::param_usize_at_least;
use crate::vision::{simulate, VisionMode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::f64::consts::{LN_10, TAU};
use tracing::debug;

/// Grid resolution of the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContrastParams {
    pub lightness_steps: usize,
    pub hue_steps: usize,
}

impl Default for ContrastParams {
    fn default() -> Self {
        Self {
            lightness_steps: 51,
            hue_steps: 51,
        }
    }
}

impl ContrastParams {
    /// Reads `lightness_steps` and `hue_steps`; missing keys keep defaults.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            lightness_steps: param_usize_at_least(params, "lightness_steps", d.lightness_steps, 1),
            hue_steps: param_usize_at_least(params, "hue_steps", d.hue_steps, 1),
        }
    }
}

/// The winning candidate of a search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contrast {
    /// Displayable color of the candidate.
    pub srgb: Rgb8,
    /// Lab of `srgb` (after gamut clamping).
    pub lab: Lab,
    /// Summed CIEDE2000 over normal, protanopia and deuteranopia.
    pub score: f64,
}

/// Log-shaped easing of chroma: 1 at C = 0, flat near zero, 0 from C = 1 on.
pub fn chroma_ease(chroma: f64) -> f64 {
    (1.0 - (1.0 + 9.0 * chroma * chroma).ln() / LN_10).clamp(0.0, 1.0)
}

/// Lightness window searched for a reference of lightness `l` and chroma `c`.
pub fn lightness_range(l: f64, c: f64) -> (f64, f64) {
    let ease = chroma_ease(c);
    (l - l * ease, l + (1.0 - l) * ease)
}

struct Views {
    normal: Lab,
    protan: Lab,
    deutan: Lab,
}

impl Views {
    fn of(srgb: Rgb8, normal: Lab) -> Self {
        Self {
            normal,
            protan: to_lab(simulate(VisionMode::Protanopia, srgb)),
            deutan: to_lab(simulate(VisionMode::Deuteranopia, srgb)),
        }
    }

    fn score(&self, other: &Views) -> f64 {
        delta_e_2000(self.normal, other.normal)
            + delta_e_2000(self.protan, other.protan)
            + delta_e_2000(self.deutan, other.deutan)
    }
}

/// Searches with the default 51 × 51 grid.
pub fn contrasting_color(reference: Lab) -> Contrast {
    contrasting_color_with(reference, &ContrastParams::default())
}

/// Searches the grid described by `params`. Ties go to the later candidate.
pub fn contrasting_color_with(reference: Lab, params: &ContrastParams) -> Contrast {
    let Lch { l: l1, c, .. } = lab_to_lch(reference);
    let (min_l, max_l) = lightness_range(l1, c);
    let lightness_steps = params.lightness_steps.max(1);
    let hue_steps = params.hue_steps.max(1);

    let reference_views = Views::of(from_lab(reference), reference);

    let mut best: Option<Contrast> = None;
    for i in 0..lightness_steps {
        let l = if lightness_steps == 1 {
            min_l
        } else {
            min_l + (max_l - min_l) * i as f64 / (lightness_steps - 1) as f64
        };
        for j in 0..hue_steps {
            let h = TAU * j as f64 / hue_steps as f64;
            let srgb = from_lab(lch_to_lab(Lch { l, c, h }));
            let lab = to_lab(srgb);
            let score = reference_views.score(&Views::of(srgb, lab));
            if best.map_or(true, |b| score >= b.score) {
                best = Some(Contrast { srgb, lab, score });
            }
        }
    }

    // Both step counts are at least one, so the grid is never empty.
    let best = best.unwrap_or(Contrast {
        srgb: from_lab(reference),
        lab: reference,
        score: 0.0,
    });
    debug!(
        min_l,
        max_l,
        score = best.score,
        color = %best.srgb.to_hex(),
        "contrasting color found"
    );
    best
}
