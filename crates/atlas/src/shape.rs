//! Lit grayscale silhouette of the sRGB gamut surface.
//!
//! For every pixel the nearest in-gamut sample along the view ray is the
//! surface point. Its normal is the average of the triangles fanned out to
//! the eight neighboring surface points. The normal count doubles as
//! coverage, which anti-aliases the silhouette.

use crate::params::AtlasParams;
use crate::view::{lab_at, View};
use glam::DVec3;
use lab_picker_core::color::{from_lab_tolerant, Lab, Rgba8};
use rayon::prelude::*;
use tracing::debug;

/// Eight neighbors in angular order around a pixel.
const RING: [(isize, isize); 8] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Light direction in view space, before normalization.
const LIGHT: DVec3 = DVec3::new(-0.5, 0.5, 1.0);

/// True when a Lab point maps to a visible (alpha > 0) sRGB color.
pub(crate) fn visible(lab: Lab) -> bool {
    from_lab_tolerant(lab).a > 0
}

/// Surface points and shaded pixels of the gamut solid as seen by a [`View`].
#[derive(Debug, Clone)]
pub struct BasicShape {
    size: usize,
    surface: Vec<Option<DVec3>>,
    pixels: Vec<Rgba8>,
}

impl BasicShape {
    /// Locates the surface with `params.shape_steps` samples per ray and
    /// shades it.
    pub fn compute(view: &View, params: &AtlasParams) -> Self {
        let size = params.size;
        let steps = params.shape_steps;

        let surface: Vec<Option<DVec3>> = (0..size * size)
            .into_par_iter()
            .map(|i| {
                let (sx, sy) = view.screen(size, i % size, i / size);
                (0..steps)
                    .map(|k| view.depth(k, steps))
                    .find(|&depth| visible(lab_at(view.world(sx, sy, depth))))
                    .map(|depth| DVec3::new(sx, sy, depth))
            })
            .collect();

        let light = LIGHT.normalize();
        let pixels = (0..size * size)
            .map(|i| shade(&surface, size, i % size, i / size, light, params.ambient))
            .collect::<Vec<_>>();

        debug!(
            size,
            steps,
            covered = surface.iter().filter(|p| p.is_some()).count(),
            "basic shape computed"
        );
        Self {
            size,
            surface,
            pixels,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Shaded pixel at `(x, y)`: gray level with coverage alpha.
    pub fn pixel(&self, x: usize, y: usize) -> Rgba8 {
        self.pixels[y * self.size + x]
    }

    /// Surface point of pixel `(x, y)` in view coordinates, if the ray hits the gamut.
    pub fn surface(&self, x: usize, y: usize) -> Option<DVec3> {
        self.surface[y * self.size + x]
    }
}

fn surface_at(surface: &[Option<DVec3>], size: usize, x: isize, y: isize) -> Option<DVec3> {
    let in_range = |v: isize| v >= 0 && (v as usize) < size;
    if in_range(x) && in_range(y) {
        surface[y as usize * size + x as usize]
    } else {
        None
    }
}

/// Averaged fan normal at a pixel, oriented toward the viewer, and the
/// number of triangles that contributed.
fn fan_normal(surface: &[Option<DVec3>], size: usize, x: usize, y: usize) -> Option<(DVec3, usize)> {
    let (x, y) = (x as isize, y as isize);
    let center = surface_at(surface, size, x, y)?;
    let ring = RING.map(|(dx, dy)| surface_at(surface, size, x + dx, y + dy));

    let mut sum = DVec3::ZERO;
    let mut valid = 0;
    for i in 0..RING.len() {
        if let (Some(p), Some(q)) = (ring[i], ring[(i + 1) % RING.len()]) {
            let n = (p - center).cross(q - center);
            sum += if n.z < 0.0 { -n } else { n };
            valid += 1;
        }
    }
    let normal = sum.try_normalize()?;
    Some((normal, valid))
}

fn shade(
    surface: &[Option<DVec3>],
    size: usize,
    x: usize,
    y: usize,
    light: DVec3,
    ambient: f64,
) -> Rgba8 {
    match fan_normal(surface, size, x, y) {
        Some((normal, valid)) => {
            let lit = ambient + (1.0 - ambient) * normal.dot(light).max(0.0);
            let g = (255.0 * lit).round().clamp(0.0, 255.0) as u8;
            Rgba8::new(g, g, g, (255 * valid / RING.len()) as u8)
        }
        None => Rgba8::default(),
    }
}
