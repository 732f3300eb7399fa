//! Color types and conversion functions for lab-picker.
//!
//! Provides the byte-level sRGB types (`Rgb8`, `Rgba8`) and the floating-point
//! spaces (`LinearRgb`, `Xyz`, `Lab`, `Lch`) together with pure conversion
//! functions between them. Uses `f64` throughout for precision.
//!
//! `Lab` is stored in a rescaled form: L in [0, 1] and a/b roughly in
//! [-1, 1], i.e. the textbook CIELAB values divided by 100. Renderers that
//! want textbook numbers multiply by 100.
//!
//! Conversions are total. Lab points outside the sRGB gamut are clamped on
//! the way back to bytes; the `from_lab_strict` / `from_lab_tolerant` entry
//! points additionally report gamut membership through the alpha channel.

use crate::error::PickerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// D65 reference white X used by the Lab transform.
pub const WHITE_X: f64 = 0.950489;
/// D65 reference white Y used by the Lab transform.
pub const WHITE_Y: f64 = 1.0;
/// D65 reference white Z used by the Lab transform.
pub const WHITE_Z: f64 = 1.088840;

/// Distance outside [0, 1] (in linear RGB) still accepted by the tolerant
/// gamut policy.
pub const GAMUT_EPSILON: f64 = 0.001;

const LAB_DELTA: f64 = 6.0 / 29.0;

/// 8-bit gamma-encoded sRGB color.
///
/// Serializes as a hex string `"#rrggbb"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// 8-bit sRGB color with alpha.
///
/// Serializes as a hex string `"#rrggbbaa"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Linear RGB color (gamma-decoded).
///
/// Nominally in [0, 1], but values produced from Lab may fall outside;
/// that is how out-of-gamut colors are detected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// CIE 1931 XYZ relative to the D65 white point (Y of white = 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// CIELAB with L in [0, 1] and a/b scaled by 1/100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

/// Cylindrical form of [`Lab`]. Hue is in radians in [0, 2π).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Rgb8 {
    pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);
    pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Attaches an alpha channel.
    pub const fn with_alpha(self, a: u8) -> Rgba8 {
        Rgba8 {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// The color with every channel inverted, used for outlines drawn on top of it.
    pub const fn inverted(self) -> Rgb8 {
        Rgb8::new(255 - self.r, 255 - self.g, 255 - self.b)
    }

    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `PickerError::InvalidColor` if the input is not a valid 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Rgb8, PickerError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return Err(PickerError::InvalidColor(format!(
                "expected 6 hex digits, got {}",
                hex.len()
            )));
        }
        Ok(Rgb8 {
            r: hex_byte(hex, 0, "red")?,
            g: hex_byte(hex, 2, "green")?,
            b: hex_byte(hex, 4, "blue")?,
        })
    }

    /// Formats the color as `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Drops the alpha channel.
    pub const fn rgb(self) -> Rgb8 {
        Rgb8::new(self.r, self.g, self.b)
    }

    /// Parses `"#rrggbbaa"` or, with alpha 255, `"#rrggbb"`.
    pub fn from_hex(hex: &str) -> Result<Rgba8, PickerError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        match digits.len() {
            6 => Ok(Rgb8::from_hex(digits)?.with_alpha(255)),
            8 => {
                let rgb = digits
                    .get(..6)
                    .ok_or_else(|| PickerError::InvalidColor(format!("invalid color '{hex}'")))?;
                Ok(Rgb8::from_hex(rgb)?.with_alpha(hex_byte(digits, 6, "alpha")?))
            }
            n => Err(PickerError::InvalidColor(format!(
                "expected 6 or 8 hex digits, got {n}"
            ))),
        }
    }

    /// Formats the color as `"#rrggbbaa"`.
    pub fn to_hex(self) -> String {
        format!("{}{:02x}", self.rgb().to_hex(), self.a)
    }

    /// Writes the four channels into `out[0..4]`.
    pub fn write_to(self, out: &mut [u8]) {
        out[0] = self.r;
        out[1] = self.g;
        out[2] = self.b;
        out[3] = self.a;
    }
}

fn hex_byte(hex: &str, at: usize, channel: &str) -> Result<u8, PickerError> {
    let digits = hex
        .get(at..at + 2)
        .ok_or_else(|| PickerError::InvalidColor(format!("missing {channel} component")))?;
    u8::from_str_radix(digits, 16)
        .map_err(|e| PickerError::InvalidColor(format!("invalid {channel} component: {e}")))
}

impl Serialize for Rgb8 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb8::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Rgba8 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba8::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl LinearRgb {
    /// True if every channel lies in [0, 1].
    pub fn in_unit_cube(self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }

    /// Distance of the farthest channel outside [0, 1]; zero when inside.
    pub fn excursion(self) -> f64 {
        [self.r, self.g, self.b]
            .iter()
            .map(|&c| (-c).max(c - 1.0).max(0.0))
            .fold(0.0, f64::max)
    }

    pub fn clamped(self) -> LinearRgb {
        LinearRgb {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
        }
    }
}

// -- sRGB transfer function --

/// Decodes one gamma-encoded sRGB component in [0, 1] to linear light.
pub fn srgb_component_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c * 25.0 / 323.0
    } else {
        ((c * 200.0 + 11.0) / 211.0).powf(2.4)
    }
}

/// Encodes one linear component in [0, 1] with the sRGB transfer function.
pub fn linear_component_to_srgb(c: f64) -> f64 {
    if c <= 0.0031308 {
        c * 323.0 / 25.0
    } else {
        (211.0 * c.powf(1.0 / 2.4) - 11.0) / 200.0
    }
}

fn encode_byte(linear: f64) -> u8 {
    (linear_component_to_srgb(linear.clamp(0.0, 1.0)) * 255.0).round() as u8
}

/// Converts 8-bit sRGB to linear RGB.
pub fn srgb_to_linear(c: Rgb8) -> LinearRgb {
    LinearRgb {
        r: srgb_component_to_linear(c.r as f64 / 255.0),
        g: srgb_component_to_linear(c.g as f64 / 255.0),
        b: srgb_component_to_linear(c.b as f64 / 255.0),
    }
}

/// Converts linear RGB to 8-bit sRGB, clamping each channel to [0, 1] first.
pub fn linear_to_srgb(c: LinearRgb) -> Rgb8 {
    Rgb8 {
        r: encode_byte(c.r),
        g: encode_byte(c.g),
        b: encode_byte(c.b),
    }
}

// -- Linear RGB <-> XYZ --

/// Converts linear sRGB to XYZ. The matrix rows sum to the reference white.
pub fn linear_to_xyz(c: LinearRgb) -> Xyz {
    Xyz {
        x: 0.41247978 * c.r + 0.35756964 * c.g + 0.18043958 * c.b,
        y: 0.21268489 * c.r + 0.71513928 * c.g + 0.072175833 * c.b,
        z: 0.01933499 * c.r + 0.11918988 * c.g + 0.95031513 * c.b,
    }
}

/// Converts XYZ to linear sRGB. The result is not clamped.
pub fn xyz_to_linear(c: Xyz) -> LinearRgb {
    LinearRgb {
        r: 3.2402708 * c.x - 1.5370515 * c.y - 0.4985032 * c.z,
        g: -0.96928348 * c.x + 1.8760446 * c.y + 0.041556766 * c.z,
        b: 0.055642784 * c.x - 0.20402354 * c.y + 1.0572129 * c.z,
    }
}

// -- XYZ <-> Lab --

fn lab_f(t: f64) -> f64 {
    if t > LAB_DELTA * LAB_DELTA * LAB_DELTA {
        t.cbrt()
    } else {
        t / (3.0 * LAB_DELTA * LAB_DELTA) + 4.0 / 29.0
    }
}

fn lab_f_inv(t: f64) -> f64 {
    if t > LAB_DELTA {
        t * t * t
    } else {
        3.0 * LAB_DELTA * LAB_DELTA * (t - 4.0 / 29.0)
    }
}

/// Converts XYZ to the rescaled [`Lab`].
pub fn xyz_to_lab(c: Xyz) -> Lab {
    let fx = lab_f(c.x / WHITE_X);
    let fy = lab_f(c.y / WHITE_Y);
    let fz = lab_f(c.z / WHITE_Z);
    Lab {
        l: 1.16 * fy - 0.16,
        a: 5.0 * (fx - fy),
        b: 2.0 * (fy - fz),
    }
}

/// Converts the rescaled [`Lab`] to XYZ.
pub fn lab_to_xyz(c: Lab) -> Xyz {
    let fy = (c.l + 0.16) / 1.16;
    let fx = fy + c.a / 5.0;
    let fz = fy - c.b / 2.0;
    Xyz {
        x: WHITE_X * lab_f_inv(fx),
        y: WHITE_Y * lab_f_inv(fy),
        z: WHITE_Z * lab_f_inv(fz),
    }
}

// -- Convenience chains --

/// sRGB bytes to Lab via linear RGB and XYZ.
pub fn to_lab(c: Rgb8) -> Lab {
    xyz_to_lab(linear_to_xyz(srgb_to_linear(c)))
}

/// Lab to unclamped linear RGB. Channels outside [0, 1] mean out of gamut.
pub fn lab_to_linear(c: Lab) -> LinearRgb {
    xyz_to_linear(lab_to_xyz(c))
}

/// Lab to sRGB bytes, clamping out-of-gamut colors.
pub fn from_lab(c: Lab) -> Rgb8 {
    linear_to_srgb(lab_to_linear(c))
}

/// True if the Lab point maps into the sRGB gamut without clamping.
pub fn in_gamut(c: Lab) -> bool {
    lab_to_linear(c).in_unit_cube()
}

/// Strict gamut policy: 255 if linear RGB is inside [0, 1]³, else 0.
pub fn gamut_alpha_strict(c: LinearRgb) -> u8 {
    if c.in_unit_cube() {
        255
    } else {
        0
    }
}

/// Tolerant gamut policy: 255 inside, 128 within [`GAMUT_EPSILON`] of the
/// unit cube, 0 farther out.
pub fn gamut_alpha_tolerant(c: LinearRgb) -> u8 {
    match c.excursion() {
        e if e == 0.0 => 255,
        e if e <= GAMUT_EPSILON => 128,
        _ => 0,
    }
}

/// Lab to sRGB with alpha 255 in gamut and 0 outside (crisp masking).
pub fn from_lab_strict(c: Lab) -> Rgba8 {
    let linear = lab_to_linear(c);
    linear_to_srgb(linear).with_alpha(gamut_alpha_strict(linear))
}

/// Lab to sRGB with a half-transparent band just outside the gamut (soft edges).
pub fn from_lab_tolerant(c: Lab) -> Rgba8 {
    let linear = lab_to_linear(c);
    linear_to_srgb(linear).with_alpha(gamut_alpha_tolerant(linear))
}

// -- Lab <-> LCh --

/// Converts Lab to LCh. Achromatic colors get hue 0 instead of `atan2(0, 0)`.
pub fn lab_to_lch(c: Lab) -> Lch {
    let ch = c.a.hypot(c.b);
    let h = if ch < 1e-12 {
        0.0
    } else {
        c.b.atan2(c.a).rem_euclid(std::f64::consts::TAU)
    };
    Lch { l: c.l, c: ch, h }
}

pub fn lch_to_lab(c: Lch) -> Lab {
    Lab {
        l: c.l,
        a: c.c * c.h.cos(),
        b: c.c * c.h.sin(),
    }
}
