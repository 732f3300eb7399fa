//! The gamut atlas: every cut-away slice of the Lab solid in one buffer.
//!
//! Layout is three consecutive blocks (L, then a, then b) of `slices`
//! RGBA8 images each. Image `k` of a block shows the cut at
//! [`LabAxis::value_at`]`(k, slices)`. On disk the buffer is gzip-compressed
//! with no header of its own; the reader must know the build parameters.

use crate::params::AtlasParams;
use crate::render::render_slice;
use crate::shape::BasicShape;
use crate::view::View;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use lab_picker_core::error::PickerError;
use lab_picker_core::slice::LabAxis;
use rayon::prelude::*;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

/// File name the asset is written to by default.
pub const DEFAULT_FILE_NAME: &str = "LabColorSpace.bin";

/// Decompressed atlas plus the parameters it was built with.
#[derive(Debug, Clone, PartialEq)]
pub struct GamutAtlas {
    params: AtlasParams,
    data: Vec<u8>,
}

impl GamutAtlas {
    /// Renders all `3 × slices` images in parallel.
    pub fn build(params: &AtlasParams) -> Result<Self, PickerError> {
        params.validate()?;
        let total_len = params.total_len()?;
        let image_len = params.image_len();
        let total = params.slices * LabAxis::ALL.len();

        info!(
            size = params.size,
            slices = params.slices,
            depth_steps = params.depth_steps,
            shape_steps = params.shape_steps,
            "building gamut atlas"
        );

        let view = View::default();
        let shape = BasicShape::compute(&view, params);

        let mut data = vec![0u8; total_len];
        let progress = Mutex::new(0usize);
        data.par_chunks_mut(image_len)
            .enumerate()
            .for_each(|(i, chunk)| {
                let axis = LabAxis::ALL[i / params.slices];
                let value = axis.value_at(i % params.slices, params.slices);
                chunk.copy_from_slice(&render_slice(axis, value, &view, &shape, params));

                if let Ok(mut done) = progress.lock() {
                    *done += 1;
                    debug!(done = *done, total, axis = axis.name(), value, "slice rendered");
                }
            });

        info!(bytes = data.len(), "gamut atlas built");
        Ok(Self {
            params: *params,
            data,
        })
    }

    /// Wraps an already decompressed buffer, checking its length.
    pub fn from_bytes(data: Vec<u8>, params: &AtlasParams) -> Result<Self, PickerError> {
        params.validate()?;
        let expected = params.total_len()?;
        if data.len() != expected {
            return Err(PickerError::InvalidAtlas(format!(
                "expected {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            params: *params,
            data,
        })
    }

    pub fn params(&self) -> &AtlasParams {
        &self.params
    }

    /// The raw decompressed buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Gzip-compresses the buffer.
    pub fn encode(&self) -> Result<Vec<u8>, PickerError> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&self.data)?;
        Ok(encoder.finish()?)
    }

    /// Decompresses `bytes` and validates the length against `params`.
    pub fn decode(bytes: &[u8], params: &AtlasParams) -> Result<Self, PickerError> {
        let mut data = Vec::new();
        GzDecoder::new(bytes)
            .read_to_end(&mut data)
            .map_err(|e| PickerError::InvalidAtlas(format!("gzip: {e}")))?;
        Self::from_bytes(data, params)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), PickerError> {
        let path = path.as_ref();
        let encoded = self.encode()?;
        std::fs::write(path, &encoded)?;
        info!(path = %path.display(), bytes = encoded.len(), "atlas written");
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>, params: &AtlasParams) -> Result<Self, PickerError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        debug!(path = %path.display(), bytes = bytes.len(), "atlas read");
        Self::decode(&bytes, params)
    }

    /// RGBA8 pixels of image `index` in the `axis` block.
    pub fn image(&self, axis: LabAxis, index: usize) -> Option<&[u8]> {
        if index >= self.params.slices {
            return None;
        }
        let block = LabAxis::ALL.iter().position(|&a| a == axis)?;
        let len = self.params.image_len();
        let start = (block * self.params.slices + index) * len;
        self.data.get(start..start + len)
    }

    /// Image whose slice value is closest to `value`.
    pub fn nearest_image(&self, axis: LabAxis, value: f64) -> Option<&[u8]> {
        self.image(axis, axis.nearest_index(value, self.params.slices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> AtlasParams {
        AtlasParams {
            size: 16,
            depth_steps: 32,
            shape_steps: 64,
            slices: 5,
            ..AtlasParams::default()
        }
    }

    #[test]
    fn build_fills_every_block() {
        let params = small();
        let atlas = GamutAtlas::build(&params).unwrap();
        assert_eq!(atlas.as_bytes().len(), params.total_len().unwrap());
        for axis in LabAxis::ALL {
            let mid = atlas.image(axis, 2).unwrap();
            assert_eq!(mid.len(), params.image_len());
            assert!(
                mid.chunks_exact(4).any(|px| px[3] > 0),
                "{axis:?} middle slice is empty"
            );
        }
    }

    #[test]
    fn images_match_direct_render() {
        let params = small();
        let atlas = GamutAtlas::build(&params).unwrap();
        let view = View::default();
        let shape = BasicShape::compute(&view, &params);
        let direct = render_slice(LabAxis::B, LabAxis::B.value_at(3, 5), &view, &shape, &params);
        assert_eq!(atlas.image(LabAxis::B, 3).unwrap(), direct.as_slice());
    }

    #[test]
    fn build_rejects_bad_params() {
        let params = AtlasParams {
            slices: 1,
            ..small()
        };
        assert!(GamutAtlas::build(&params).is_err());
    }

    #[test]
    fn image_index_out_of_range_is_none() {
        let params = small();
        let atlas = GamutAtlas::from_bytes(vec![0; params.total_len().unwrap()], &params).unwrap();
        assert!(atlas.image(LabAxis::L, 5).is_none());
        assert!(atlas.image(LabAxis::B, 4).is_some());
    }

    #[test]
    fn image_addresses_blocks_in_order() {
        let params = AtlasParams {
            size: 1,
            slices: 2,
            ..small()
        };
        let data: Vec<u8> = (0..24).collect();
        let atlas = GamutAtlas::from_bytes(data, &params).unwrap();
        assert_eq!(atlas.image(LabAxis::L, 0).unwrap(), &[0, 1, 2, 3]);
        assert_eq!(atlas.image(LabAxis::A, 1).unwrap(), &[12, 13, 14, 15]);
        assert_eq!(atlas.image(LabAxis::B, 1).unwrap(), &[20, 21, 22, 23]);
    }

    #[test]
    fn nearest_image_snaps_to_slice() {
        let params = AtlasParams {
            size: 1,
            slices: 3,
            ..small()
        };
        let data: Vec<u8> = (0..36).collect();
        let atlas = GamutAtlas::from_bytes(data, &params).unwrap();
        // a slices are at -1, 0, 1.
        assert_eq!(atlas.nearest_image(LabAxis::A, 0.1), atlas.image(LabAxis::A, 1));
        assert_eq!(atlas.nearest_image(LabAxis::A, -7.0), atlas.image(LabAxis::A, 0));
        assert_eq!(atlas.nearest_image(LabAxis::L, 0.9), atlas.image(LabAxis::L, 2));
    }

    #[test]
    fn encode_decode_preserves_bytes() {
        let params = small();
        let atlas = GamutAtlas::build(&params).unwrap();
        let encoded = atlas.encode().unwrap();
        assert_eq!(&encoded[..2], &[0x1f, 0x8b], "gzip magic");
        assert!(encoded.len() < atlas.as_bytes().len());
        assert_eq!(GamutAtlas::decode(&encoded, &params).unwrap(), atlas);
    }

    #[test]
    fn decode_rejects_wrong_length() {
        let params = small();
        let short = GamutAtlas {
            params: AtlasParams {
                slices: 4,
                ..params
            },
            data: vec![7; params.image_len() * 4 * 3],
        };
        let err = GamutAtlas::decode(&short.encode().unwrap(), &params).unwrap_err();
        assert!(matches!(err, PickerError::InvalidAtlas(_)));
    }

    #[test]
    fn decode_rejects_non_gzip() {
        let err = GamutAtlas::decode(b"not gzip at all", &small()).unwrap_err();
        assert!(matches!(err, PickerError::InvalidAtlas(_)));
    }

    #[test]
    fn write_then_load() {
        let params = small();
        let atlas = GamutAtlas::build(&params).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_FILE_NAME);
        atlas.write(&path).unwrap();
        assert_eq!(GamutAtlas::load(&path, &params).unwrap(), atlas);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GamutAtlas::load(dir.path().join("missing.bin"), &small()).unwrap_err();
        assert!(matches!(err, PickerError::Io(_)));
    }
}
