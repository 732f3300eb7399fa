//! PNG export of RGBA8 buffers (atlas images, rendered Lab slices).
//!
//! Feature-gated behind `png` (default on) so the atlas can be built and
//! loaded without pulling in the `image` crate.

use lab_picker_core::error::PickerError;
use std::path::Path;

/// Writes a `width × height` RGBA8 buffer as a PNG file.
///
/// Returns `PickerError::InvalidDimensions` if a dimension overflows `u32`,
/// `PickerError::DimensionMismatch` if the buffer length is wrong, or
/// `PickerError::Io` on write failure.
pub fn write_png(rgba: &[u8], width: usize, height: usize, path: &Path) -> Result<(), PickerError> {
    let w = u32::try_from(width).map_err(|_| PickerError::InvalidDimensions)?;
    let h = u32::try_from(height).map_err(|_| PickerError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba.to_vec()).ok_or(
        PickerError::DimensionMismatch {
            lhs_w: width,
            lhs_h: height,
            rhs_w: rgba.len() / 4,
            rhs_h: 1,
        },
    )?;
    img.save(path).map_err(|e| PickerError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lab_picker_core::slice::{render_lab_slice, LabAxis};

    #[test]
    fn write_png_round_trip() {
        let rgba = render_lab_slice(LabAxis::L, 0.5, 16, 12).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slice.png");

        write_png(&rgba, 16, 12, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!((img.width(), img.height()), (16, 12));
        assert_eq!(img.into_raw(), rgba);
    }

    #[test]
    fn short_buffer_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_png(&[0; 12], 2, 2, &dir.path().join("x.png")).unwrap_err();
        assert!(matches!(err, PickerError::DimensionMismatch { .. }));
    }
}
