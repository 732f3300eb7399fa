//! Anti-aliased outline mask around the sRGB gamut in a Lab cross-section.
//!
//! The input is a membership raster (non-zero = in gamut). The output is a
//! mask with levels 0/64/128/255 encoding approximate proximity to the gamut
//! boundary; renderers use it as the alpha of an inverted-color stroke.
//!
//! Pixels past the raster border count as out of gamut. Marks that would land
//! off-raster are dropped, so a raster that is entirely in gamut produces an
//! all-zero mask even though its edge pixels face "missing" neighbors.

use crate::raster::Raster;

/// Left, top, right, bottom. Consecutive entries (cyclically) form a corner.
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

/// Mask level written next to the boundary.
pub const EDGE: u8 = 255;
/// Mask level written by the first relaxation pass.
pub const NEAR: u8 = 128;
/// Mask level written by the second relaxation pass.
pub const FAR: u8 = 64;

/// Computes the boundary mask of a membership raster.
pub fn gamut_mask(membership: &Raster) -> Raster {
    let mut mask = membership.zeroed_like();

    for (x, y, v) in membership.iter() {
        if v == 0 {
            continue;
        }
        let (x, y) = (x as isize, y as isize);
        let absent = DIRECTIONS.map(|(dx, dy)| !membership.is_set(x + dx, y + dy));

        for (i, &(dx, dy)) in DIRECTIONS.iter().enumerate() {
            if absent[i] {
                mask.set(x + dx, y + dy, EDGE);
                mask.set(x + 2 * dx, y + 2 * dy, EDGE);
            }
        }

        for i in 0..4 {
            let j = (i + 1) % 4;
            if absent[i] && absent[j] {
                let (dx, dy) = (
                    DIRECTIONS[i].0 + DIRECTIONS[j].0,
                    DIRECTIONS[i].1 + DIRECTIONS[j].1,
                );
                mask.set(x + dx, y + dy, EDGE);
            }
        }
    }

    let mask = relax(&mask, EDGE, NEAR);
    relax(&mask, NEAR, FAR)
}

/// Raises every pixel that sits in a corner of two neighbors at or above
/// `threshold` to at least `level`. Reads only from `src`.
fn relax(src: &Raster, threshold: u8, level: u8) -> Raster {
    let mut out = src.clone();
    for (x, y, _) in src.iter() {
        let (x, y) = (x as isize, y as isize);
        let at_least =
            |(dx, dy): (isize, isize)| src.get(x + dx, y + dy).is_some_and(|v| v >= threshold);
        let in_corner =
            (0..4).any(|i| at_least(DIRECTIONS[i]) && at_least(DIRECTIONS[(i + 1) % 4]));
        if in_corner {
            out.raise(x, y, level);
        }
    }
    out
}
