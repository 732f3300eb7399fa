//! Resolution and shading parameters of the atlas build.

use lab_picker_core::error::PickerError;
use lab_picker_core::params::{param_f64, param_usize};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Edge length of every atlas image, in pixels.
const DEFAULT_SIZE: usize = 96;
/// Ray-march samples per pixel when rendering a slice.
const DEFAULT_DEPTH_STEPS: usize = 256;
/// Ray-march samples per pixel when locating the gamut surface.
const DEFAULT_SHAPE_STEPS: usize = 4096;
/// Slices per Lab axis.
const DEFAULT_SLICES: usize = 129;
/// Gray level of surface facing away from the light, as a fraction of white.
const DEFAULT_AMBIENT: f64 = 0.25;

/// Atlas build parameters. [`Default`] gives the shipped 96 × 96 × 129 × 3 asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtlasParams {
    pub size: usize,
    pub depth_steps: usize,
    pub shape_steps: usize,
    pub slices: usize,
    pub ambient: f64,
}

impl Default for AtlasParams {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            depth_steps: DEFAULT_DEPTH_STEPS,
            shape_steps: DEFAULT_SHAPE_STEPS,
            slices: DEFAULT_SLICES,
            ambient: DEFAULT_AMBIENT,
        }
    }
}

impl AtlasParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            size: param_usize(params, "size", DEFAULT_SIZE),
            depth_steps: param_usize(params, "depth_steps", DEFAULT_DEPTH_STEPS),
            shape_steps: param_usize(params, "shape_steps", DEFAULT_SHAPE_STEPS),
            slices: param_usize(params, "slices", DEFAULT_SLICES),
            ambient: param_f64(params, "ambient", DEFAULT_AMBIENT),
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "size": self.size,
            "depth_steps": self.depth_steps,
            "shape_steps": self.shape_steps,
            "slices": self.slices,
            "ambient": self.ambient,
        })
    }

    /// Rejects parameters that cannot produce an atlas.
    ///
    /// Every count must be non-zero, there must be at least two slices per
    /// axis so both ends of the range are covered, and `ambient` must lie
    /// in [0, 1].
    pub fn validate(&self) -> Result<(), PickerError> {
        if self.size == 0 || self.depth_steps == 0 || self.shape_steps == 0 || self.slices < 2 {
            return Err(PickerError::InvalidDimensions);
        }
        if !(0.0..=1.0).contains(&self.ambient) {
            return Err(PickerError::InvalidAtlas(format!(
                "ambient must be in [0, 1], got {}",
                self.ambient
            )));
        }
        self.total_len().map(|_| ())
    }

    /// Bytes in one RGBA8 image.
    pub fn image_len(&self) -> usize {
        self.size * self.size * 4
    }

    /// Bytes in the whole atlas: three blocks of `slices` images.
    pub fn total_len(&self) -> Result<usize, PickerError> {
        self.size
            .checked_mul(self.size)
            .and_then(|n| n.checked_mul(4))
            .and_then(|n| n.checked_mul(self.slices))
            .and_then(|n| n.checked_mul(3))
            .ok_or(PickerError::InvalidDimensions)
    }
}
