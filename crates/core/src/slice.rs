//! Planar cross-sections of the Lab solid.
//!
//! A slice holds one Lab axis fixed and spans the other two across the
//! image: a to the right and b upward for L slices, and the remaining chroma
//! axis to the right with L upward for a and b slices.

use crate::color::{from_lab, from_lab_tolerant, Lab, Rgba8};
use crate::error::PickerError;
use crate::gamut_mask::gamut_mask;
use crate::raster::Raster;
use serde::{Deserialize, Serialize};

/// The Lab axis held constant by a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabAxis {
    L,
    A,
    B,
}

const AXIS_NAMES: &[&str] = &["l", "a", "b"];

impl LabAxis {
    pub const ALL: [LabAxis; 3] = [LabAxis::L, LabAxis::A, LabAxis::B];

    /// Parses "l", "a" or "b" (case insensitive).
    pub fn from_name(name: &str) -> Result<Self, PickerError> {
        match name.to_ascii_lowercase().as_str() {
            "l" => Ok(LabAxis::L),
            "a" => Ok(LabAxis::A),
            "b" => Ok(LabAxis::B),
            _ => Err(PickerError::InvalidColor(format!(
                "unknown Lab axis '{name}', expected one of {}",
                AXIS_NAMES.join(", ")
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LabAxis::L => "l",
            LabAxis::A => "a",
            LabAxis::B => "b",
        }
    }

    /// Displayed range of the axis: [0, 1] for L, [-1, 1] for a and b.
    pub fn range(self) -> (f64, f64) {
        match self {
            LabAxis::L => (0.0, 1.0),
            LabAxis::A | LabAxis::B => (-1.0, 1.0),
        }
    }

    /// Value of slice `index` out of `count` evenly spaced slices covering [`range`](Self::range).
    pub fn value_at(self, index: usize, count: usize) -> f64 {
        let (lo, hi) = self.range();
        if count <= 1 {
            return lo;
        }
        lo + (hi - lo) * index as f64 / (count - 1) as f64
    }

    /// Index of the slice nearest to `value` out of `count` slices.
    pub fn nearest_index(self, value: f64, count: usize) -> usize {
        let (lo, hi) = self.range();
        if count <= 1 {
            return 0;
        }
        let t = ((value - lo) / (hi - lo)).clamp(0.0, 1.0);
        (t * (count - 1) as f64).round() as usize
    }

    /// The component of `lab` along this axis.
    pub fn component(self, lab: Lab) -> f64 {
        match self {
            LabAxis::L => lab.l,
            LabAxis::A => lab.a,
            LabAxis::B => lab.b,
        }
    }
}

/// Maps normalized image coordinates (`u` right, `v` down, both in [0, 1])
/// on the slice `axis = value` to a Lab point.
pub fn slice_point(axis: LabAxis, value: f64, u: f64, v: f64) -> Lab {
    let across = -1.0 + 2.0 * u;
    match axis {
        LabAxis::L => Lab {
            l: value,
            a: across,
            b: 1.0 - 2.0 * v,
        },
        LabAxis::A => Lab {
            l: 1.0 - v,
            a: value,
            b: across,
        },
        LabAxis::B => Lab {
            l: 1.0 - v,
            a: across,
            b: value,
        },
    }
}

fn pixel_point(axis: LabAxis, value: f64, x: usize, y: usize, width: usize, height: usize) -> Lab {
    let u = (x as f64 + 0.5) / width as f64;
    let v = (y as f64 + 0.5) / height as f64;
    slice_point(axis, value, u, v)
}

/// Gamut membership of every pixel of a slice (255 = in gamut).
pub fn lab_slice_membership(
    axis: LabAxis,
    value: f64,
    width: usize,
    height: usize,
) -> Result<Raster, PickerError> {
    let mut raster = Raster::new(width, height)?;
    for y in 0..height {
        for x in 0..width {
            if from_lab_tolerant(pixel_point(axis, value, x, y, width, height)).a > 0 {
                raster.set(x as isize, y as isize, 255);
            }
        }
    }
    Ok(raster)
}

/// Renders a slice as RGBA8: in-gamut colors, a soft half-alpha band at the
/// gamut edge, transparency outside, and an inverted-color outline blended
/// through [`gamut_mask`].
pub fn render_lab_slice(
    axis: LabAxis,
    value: f64,
    width: usize,
    height: usize,
) -> Result<Vec<u8>, PickerError> {
    let membership = lab_slice_membership(axis, value, width, height)?;
    let mask = gamut_mask(&membership);

    let mut rgba = vec![0u8; width * height * 4];
    for (x, y, level) in mask.iter() {
        let lab = pixel_point(axis, value, x, y, width, height);
        let base = from_lab_tolerant(lab);
        let pixel = if level > 0 {
            composite_over(from_lab(lab).inverted().with_alpha(level), base)
        } else {
            base
        };
        let i = (y * width + x) * 4;
        pixel.write_to(&mut rgba[i..i + 4]);
    }
    Ok(rgba)
}

/// Porter-Duff "over" on straight (non-premultiplied) alpha.
fn composite_over(top: Rgba8, bottom: Rgba8) -> Rgba8 {
    let ta = top.a as f64 / 255.0;
    let ba = bottom.a as f64 / 255.0;
    let out_a = ta + ba * (1.0 - ta);
    if out_a <= 0.0 {
        return Rgba8::default();
    }
    let mix = |t: u8, b: u8| {
        let c = (t as f64 * ta + b as f64 * ba * (1.0 - ta)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };
    Rgba8 {
        r: mix(top.r, bottom.r),
        g: mix(top.g, bottom.g),
        b: mix(top.b, bottom.b),
        a: (out_a * 255.0).round() as u8,
    }
}
