//! Orthographic camera looking at the Lab solid.
//!
//! World space is `(a, b, 2L - 1)`, which puts the solid inside the cube
//! [-1, 1]³ with lightness along +Z. View space is `(right, up, toward
//! viewer)`. Depth is measured along the toward-viewer axis, so larger depth
//! is nearer.

use glam::DVec3;
use lab_picker_core::color::Lab;
use lab_picker_core::slice::LabAxis;

/// Direction from the solid toward the viewer, before normalization.
pub const VIEWER: DVec3 = DVec3::new(1.0, 1.0, 1.2);
/// Half the width of the visible square, and half the depth range marched.
pub const HALF_EXTENT: f64 = 1.8;

/// Orthonormal camera basis plus the visible extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    right: DVec3,
    up: DVec3,
    toward_viewer: DVec3,
    half_extent: f64,
}

impl Default for View {
    fn default() -> Self {
        Self::new(VIEWER, HALF_EXTENT)
    }
}

impl View {
    /// Builds a camera looking back along `toward_viewer`. The world Z axis
    /// (lightness) projects to screen-up.
    pub fn new(toward_viewer: DVec3, half_extent: f64) -> Self {
        let toward_viewer = toward_viewer.try_normalize().unwrap_or(DVec3::Z);
        let right = DVec3::Z
            .cross(toward_viewer)
            .try_normalize()
            .unwrap_or(DVec3::X);
        let up = toward_viewer.cross(right);
        Self {
            right,
            up,
            toward_viewer,
            half_extent,
        }
    }

    pub fn half_extent(&self) -> f64 {
        self.half_extent
    }

    /// Screen coordinates of the center of pixel `(px, py)` in a `size` image.
    /// Pixel rows run top to bottom.
    pub fn screen(&self, size: usize, px: usize, py: usize) -> (f64, f64) {
        let n = size as f64;
        let sx = (-1.0 + 2.0 * (px as f64 + 0.5) / n) * self.half_extent;
        let sy = (1.0 - 2.0 * (py as f64 + 0.5) / n) * self.half_extent;
        (sx, sy)
    }

    /// Depth of sample `k` out of `steps`, from nearest to farthest.
    pub fn depth(&self, k: usize, steps: usize) -> f64 {
        self.half_extent - 2.0 * self.half_extent * (k as f64 + 0.5) / steps as f64
    }

    /// Distance between consecutive samples of a `steps`-sample march.
    pub fn step_len(&self, steps: usize) -> f64 {
        2.0 * self.half_extent / steps as f64
    }

    /// World point at screen `(sx, sy)` and `depth`.
    pub fn world(&self, sx: f64, sy: f64, depth: f64) -> DVec3 {
        self.right * sx + self.up * sy + self.toward_viewer * depth
    }

    /// World point expressed in view coordinates.
    pub fn to_view(&self, world: DVec3) -> DVec3 {
        DVec3::new(
            world.dot(self.right),
            world.dot(self.up),
            world.dot(self.toward_viewer),
        )
    }

    /// How much `axis` decreases per unit of depth marched away from the viewer.
    pub fn axis_rate(&self, axis: LabAxis) -> f64 {
        match axis {
            LabAxis::L => self.toward_viewer.z / 2.0,
            LabAxis::A => self.toward_viewer.x,
            LabAxis::B => self.toward_viewer.y,
        }
    }
}

/// Lab color at a world point.
pub fn lab_at(world: DVec3) -> Lab {
    Lab {
        l: (world.z + 1.0) / 2.0,
        a: world.x,
        b: world.y,
    }
}

/// World point of a Lab color.
pub fn world_of(lab: Lab) -> DVec3 {
    DVec3::new(lab.a, lab.b, 2.0 * lab.l - 1.0)
}
