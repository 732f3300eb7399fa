//! Two-dimensional byte raster with bounds-checked access.
//!
//! A `Raster` stores `width * height` u8 values in row-major layout. Unlike a
//! wrapping grid, coordinates past the border have no value: `get` returns
//! `None`, which the gamut mask treats as "outside the gamut".

use crate::error::PickerError;

/// A 2D grid of bytes, used for gamut membership and mask levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Raster {
    /// Creates a zero-filled raster of the given dimensions.
    ///
    /// Returns `PickerError::InvalidDimensions` if either dimension is zero
    /// or if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, PickerError> {
        Self::filled(width, height, 0)
    }

    /// Creates a raster filled with `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Result<Self, PickerError> {
        if width == 0 || height == 0 {
            return Err(PickerError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .ok_or(PickerError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            data: vec![value; len],
        })
    }

    /// Creates a raster from a pre-built data vector, validating that
    /// `data.len() == width * height`.
    pub fn from_data(width: usize, height: usize, data: Vec<u8>) -> Result<Self, PickerError> {
        if width == 0 || height == 0 {
            return Err(PickerError::InvalidDimensions);
        }
        let expected = width
            .checked_mul(height)
            .ok_or(PickerError::InvalidDimensions)?;
        if data.len() != expected {
            return Err(PickerError::DimensionMismatch {
                lhs_w: width,
                lhs_h: height,
                rhs_w: data.len(),
                rhs_h: 1,
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Builds a membership raster from an RGBA8 buffer: 255 where alpha > 0.
    pub fn membership_from_rgba(
        width: usize,
        height: usize,
        rgba: &[u8],
    ) -> Result<Self, PickerError> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(PickerError::InvalidDimensions)?;
        if rgba.len() != expected {
            return Err(PickerError::DimensionMismatch {
                lhs_w: width,
                lhs_h: height,
                rhs_w: rgba.len() / 4,
                rhs_h: 1,
            });
        }
        let data = rgba
            .chunks_exact(4)
            .map(|px| if px[3] > 0 { 255 } else { 0 })
            .collect();
        Self::from_data(width, height, data)
    }

    /// A zero-filled raster with the same dimensions as `self`.
    pub fn zeroed_like(&self) -> Raster {
        Raster {
            width: self.width,
            height: self.height,
            data: vec![0; self.data.len()],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Read-only access to the underlying row-major data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn index(&self, x: isize, y: isize) -> Option<usize> {
        let in_x = x >= 0 && (x as usize) < self.width;
        let in_y = y >= 0 && (y as usize) < self.height;
        (in_x && in_y).then(|| y as usize * self.width + x as usize)
    }

    /// Value at `(x, y)`, or `None` off-raster.
    pub fn get(&self, x: isize, y: isize) -> Option<u8> {
        self.index(x, y).map(|i| self.data[i])
    }

    /// True if `(x, y)` is on-raster and non-zero.
    pub fn is_set(&self, x: isize, y: isize) -> bool {
        self.get(x, y).is_some_and(|v| v > 0)
    }

    /// Sets `(x, y)` to `value`. Writes off-raster are ignored.
    pub fn set(&mut self, x: isize, y: isize, value: u8) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = value;
        }
    }

    /// Raises `(x, y)` to at least `value`. Writes off-raster are ignored.
    pub fn raise(&mut self, x: isize, y: isize, value: u8) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = self.data[i].max(value);
        }
    }

    /// Iterates over all cells yielding `(x, y, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.data.iter().enumerate().map(|(i, &v)| {
            let x = i % self.width;
            let y = i / self.width;
            (x, y, v)
        })
    }
}
