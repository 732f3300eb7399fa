//! Error types for the lab-picker core.
//!
//! Color conversions never fail: out-of-gamut is reported through alpha.
//! Errors only come from parsing, buffer shapes and I/O.

use thiserror::Error;

/// Errors produced by lab-picker operations.
#[derive(Debug, Error)]
pub enum PickerError {
    /// Width or height was zero when creating a raster or image.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A pixel buffer did not match the dimensions it was paired with.
    #[error("dimension mismatch: ({lhs_w}, {lhs_h}) vs ({rhs_w}, {rhs_h})")]
    DimensionMismatch {
        lhs_w: usize,
        lhs_h: usize,
        rhs_w: usize,
        rhs_h: usize,
    },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette file or palette definition was malformed.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// A color-vision mode name was not recognized.
    #[error("unknown vision mode: {0}")]
    UnknownVisionMode(String),

    /// A gamut atlas blob had the wrong size or could not be decompressed.
    #[error("invalid atlas: {0}")]
    InvalidAtlas(String),

    /// A file could not be read or written.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for PickerError {
    fn from(e: std::io::Error) -> Self {
        PickerError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let msg = PickerError::InvalidDimensions.to_string();
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn dimension_mismatch_reports_both_shapes() {
        let err = PickerError::DimensionMismatch {
            lhs_w: 96,
            lhs_h: 96,
            rhs_w: 96,
            rhs_h: 95,
        };
        assert_eq!(err.to_string(), "dimension mismatch: (96, 96) vs (96, 95)");
    }

    #[test]
    fn invalid_atlas_includes_reason() {
        let msg = PickerError::InvalidAtlas("expected 12 bytes, got 8".into()).to_string();
        assert!(msg.starts_with("invalid atlas"), "{msg}");
        assert!(msg.contains("got 8"));
    }

    #[test]
    fn invalid_palette_includes_message() {
        let msg = PickerError::InvalidPalette("line 3: bad byte".into()).to_string();
        assert!(msg.contains("line 3"), "missing message in: {msg}");
    }

    #[test]
    fn unknown_vision_mode_includes_name() {
        let msg = PickerError::UnknownVisionMode("xray".into()).to_string();
        assert!(msg.contains("xray"), "missing name in: {msg}");
    }

    #[test]
    fn io_error_converts_from_std() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = PickerError::from(io);
        assert!(matches!(err, PickerError::Io(_)));
        assert!(err.to_string().contains("no such file"));
    }

    #[test]
    fn picker_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PickerError>();
    }
}
