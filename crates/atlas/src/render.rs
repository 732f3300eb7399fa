//! Cut-away renders of the Lab solid.
//!
//! A slice `axis = value` removes everything on the viewer's side of the
//! plane. Rays that reach the exposed cut face take the Lab color there;
//! rays that first hit the uncut gamut surface show the [`BasicShape`]
//! shading instead. Compositing is front to back in premultiplied alpha.

use crate::params::AtlasParams;
use crate::shape::{visible, BasicShape};
use crate::view::{lab_at, View};
use lab_picker_core::color::{from_lab, Rgba8};
use lab_picker_core::slice::LabAxis;

/// Premultiplied RGBA accumulator with channels in [0, 1].
#[derive(Debug, Default, Clone, Copy)]
struct Accum {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

impl Accum {
    fn is_opaque(&self) -> bool {
        self.a >= 1.0 - 1e-9
    }

    /// Adds `color` at `weight` behind what is already accumulated.
    fn under(&mut self, color: Rgba8, weight: f64) {
        let w = (1.0 - self.a) * weight * color.a as f64 / 255.0;
        self.r += w * color.r as f64 / 255.0;
        self.g += w * color.g as f64 / 255.0;
        self.b += w * color.b as f64 / 255.0;
        self.a += w;
    }

    fn unpremultiplied(&self) -> Rgba8 {
        if self.a <= 0.0 {
            return Rgba8::default();
        }
        let byte = |c: f64| (c / self.a * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgba8::new(
            byte(self.r),
            byte(self.g),
            byte(self.b),
            (self.a * 255.0).round().clamp(0.0, 255.0) as u8,
        )
    }
}

/// Renders the slice `axis = value` as a `params.size`² RGBA8 image.
pub fn render_slice(
    axis: LabAxis,
    value: f64,
    view: &View,
    shape: &BasicShape,
    params: &AtlasParams,
) -> Vec<u8> {
    let size = params.size;
    let steps = params.depth_steps;
    let step = view.axis_rate(axis) * view.step_len(steps);

    let mut out = vec![0u8; size * size * 4];
    for (i, px) in out.chunks_exact_mut(4).enumerate() {
        let (x, y) = (i % size, i / size);
        let (sx, sy) = view.screen(size, x, y);
        let mut acc = Accum::default();

        for k in 0..steps {
            let lab = lab_at(view.world(sx, sy, view.depth(k, steps)));
            let below = value - axis.component(lab);
            if below < 0.0 || !visible(lab) {
                continue;
            }
            if below < step {
                acc.under(from_lab(lab).with_alpha(255), 1.0);
                break;
            }
            if below < 2.0 * step {
                acc.under(from_lab(lab).with_alpha(255), 0.5);
            } else {
                acc.under(shape.pixel(x, y), 1.0);
                break;
            }
            if acc.is_opaque() {
                break;
            }
        }
        acc.unpremultiplied().write_to(px);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (View, BasicShape, AtlasParams) {
        let params = AtlasParams {
            size: 25,
            depth_steps: 96,
            shape_steps: 96,
            slices: 3,
            ..AtlasParams::default()
        };
        let view = View::default();
        let shape = BasicShape::compute(&view, &params);
        (view, shape, params)
    }

    fn alpha_count(rgba: &[u8]) -> usize {
        rgba.chunks_exact(4).filter(|px| px[3] > 0).count()
    }

    #[test]
    fn output_has_image_size() {
        let (view, shape, params) = setup();
        let img = render_slice(LabAxis::A, 0.0, &view, &shape, &params);
        assert_eq!(img.len(), params.image_len());
    }

    #[test]
    fn mid_lightness_cut_shows_gray_at_center() {
        let (view, shape, params) = setup();
        let img = render_slice(LabAxis::L, 0.5, &view, &shape, &params);
        let i = (12 * 25 + 12) * 4;
        let px = &img[i..i + 4];
        assert_eq!(px[3], 255);
        let spread = px[..3].iter().max().unwrap() - px[..3].iter().min().unwrap();
        assert!(spread < 24, "center should be near neutral, got {px:?}");
    }

    #[test]
    fn bottom_cut_hides_most_of_the_solid() {
        let (view, shape, params) = setup();
        let bottom = render_slice(LabAxis::L, 0.0, &view, &shape, &params);
        let middle = render_slice(LabAxis::L, 0.5, &view, &shape, &params);
        assert!(alpha_count(&bottom) * 4 < alpha_count(&middle));
    }

    #[test]
    fn top_cut_matches_silhouette() {
        let (view, shape, params) = setup();
        let img = render_slice(LabAxis::L, 1.0, &view, &shape, &params);
        for y in 0..params.size {
            for x in 0..params.size {
                if shape.surface(x, y).is_none() {
                    let i = (y * params.size + x) * 4;
                    assert_eq!(img[i + 3], 0, "({x}, {y}) should be empty");
                }
            }
        }
        assert!(alpha_count(&img) > 0);
    }

    #[test]
    fn accum_half_weights_then_full() {
        let mut acc = Accum::default();
        acc.under(Rgba8::new(255, 0, 0, 255), 0.5);
        assert!(!acc.is_opaque());
        acc.under(Rgba8::new(0, 0, 255, 255), 1.0);
        assert!(acc.is_opaque());
        let px = acc.unpremultiplied();
        assert_eq!(px.a, 255);
        assert!((px.r as i16 - 128).abs() <= 1 && (px.b as i16 - 128).abs() <= 1);
    }

    #[test]
    fn empty_accum_is_transparent() {
        assert_eq!(Accum::default().unpremultiplied(), Rgba8::default());
    }
}
