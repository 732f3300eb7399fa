#![deny(unsafe_code)]
//! Offline gamut-surface rasterizer for lab-picker.
//!
//! Renders cut-away views of the sRGB gamut inside the Lab solid, one per
//! slice along each Lab axis, and packs them into a gzip-compressed
//! [`GamutAtlas`] that a picker can load instead of rendering at runtime.

pub mod atlas;
pub mod params;
pub mod render;
pub mod shape;
pub mod view;

#[cfg(feature = "png")]
pub mod snapshot;

pub use atlas::{GamutAtlas, DEFAULT_FILE_NAME};
pub use params::AtlasParams;
pub use render::render_slice;
pub use shape::BasicShape;
pub use view::View;
