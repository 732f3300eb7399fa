#![deny(unsafe_code)]
//! Numerics core of the lab-picker color picker.
//!
//! Provides sRGB / linear RGB / XYZ / Lab / LCh / HSB conversions with gamut
//! signalling through alpha, the anti-aliased gamut outline mask for Lab
//! cross-sections, CIEDE2000, color-vision deficiency simulation, the
//! contrasting-color search, the palette text format, and parameter helpers.

pub mod color;
pub mod contrast;
pub mod distance;
pub mod error;
pub mod gamut_mask;
pub mod hsb;
pub mod palette;
pub mod params;
pub mod raster;
pub mod slice;
pub mod vision;

pub use color::{Lab, Lch, LinearRgb, Rgb8, Rgba8, Xyz};
pub use contrast::{contrasting_color, Contrast, ContrastParams};
pub use distance::{delta_e_2000, delta_e_76, DeltaECategory};
pub use error::PickerError;
pub use gamut_mask::gamut_mask;
pub use hsb::Hsb;
pub use palette::Palette;
pub use raster::Raster;
pub use slice::LabAxis;
pub use vision::{simulate, VisionMode};
