use crate::bounding_volume::Aabb;
use crate::config::MAX_SUBDIVISIONS;
use crate::math::{Real, DEFAULT_EPSILON};

/// The number of octree levels [`subdivide_bounds`] splits `bounds` into.
///
/// This is the number of halvings of each side needed for the pieces to
/// reach `min_volume`, rounded down, and clamped to `max_levels` (itself never
/// above [`MAX_SUBDIVISIONS`]). Boxes that are degenerate or already small
/// enough aren't subdivided at all.
pub fn subdivision_levels(bounds: &Aabb, max_levels: u32, min_volume: Real) -> u32 {
    let volume = bounds.volume();

    if volume < DEFAULT_EPSILON || volume <= min_volume {
        return 0;
    }

    // NaN and negative values saturate to 0, infinity to u32::MAX.
    let levels = (-(min_volume / volume).log2() / 3.0) as u32;
    levels.min(max_levels).min(MAX_SUBDIVISIONS)
}

/// Splits `bounds` into `8^n` boxes tiling it exactly, with `n` given by [`subdivision_levels`].
pub fn subdivide_bounds(bounds: &Aabb, max_levels: u32, min_volume: Real) -> Vec<Aabb> {
    let mut out = Vec::new();
    subdivide_bounds_into(bounds, max_levels, min_volume, &mut out);
    out
}

/// Appends to `out` the `8^n` boxes tiling `bounds`, with `n` given by [`subdivision_levels`].
///
/// The boxes are written depth-first: the first `8^(n-1)` boxes tile the first
/// octant of `bounds`, and so on.
pub fn subdivide_bounds_into(bounds: &Aabb, max_levels: u32, min_volume: Real, out: &mut Vec<Aabb>) {
    let levels = subdivision_levels(bounds, max_levels, min_volume);
    let count = 8usize.pow(levels);
    let start = out.len();
    out.resize(start + count, *bounds);

    let written = subdivide_recursive(bounds, levels, &mut out[start..]);

    debug_assert_eq!(written, count, "Unexpected number of subdivided boxes.");
    if written != count {
        log::warn!(
            "Subdivision into {} levels wrote {} boxes instead of {}.",
            levels,
            written,
            count
        );
    }
}

// `out.len()` must be `8^levels`.
fn subdivide_recursive(bounds: &Aabb, levels: u32, out: &mut [Aabb]) -> usize {
    if levels == 0 {
        return match out.first_mut() {
            Some(slot) => {
                *slot = *bounds;
                1
            }
            None => 0,
        };
    }

    let octants = bounds.split_at_center();
    let chunk_len = out.len() / 8;
    let mut written = 0;

    for (octant, chunk) in octants.iter().zip(out.chunks_exact_mut(chunk_len.max(1))) {
        written += subdivide_recursive(octant, levels - 1, chunk);
    }

    written
}

#[cfg(test)]
mod test {
    use super::{subdivide_bounds, subdivision_levels};
    use crate::bounding_volume::Aabb;
    use crate::math::{Point, Real};
    use approx::assert_relative_eq;

    fn cube(side: Real) -> Aabb {
        Aabb::new(Point::origin(), Point::new(side, side, side))
    }

    #[test]
    fn levels_follow_the_volume_ratio() {
        // 1000 / 125 = 8: exactly one level.
        assert_eq!(subdivision_levels(&cube(10.0), 4, 125.0), 1);
        // 4096 / 1 = 8^4, clamped to 2.
        assert_eq!(subdivision_levels(&cube(16.0), 2, 1.0), 2);
        assert_eq!(subdivision_levels(&cube(2.0), 4, 125.0), 0);
        assert_eq!(subdivision_levels(&cube(0.0), 4, 0.0), 0);
        assert_eq!(subdivision_levels(&cube(10.0), 100, 0.0), crate::config::MAX_SUBDIVISIONS);
    }

    #[test]
    fn small_boxes_are_returned_as_is() {
        let bounds = cube(2.0);
        assert_eq!(subdivide_bounds(&bounds, 3, 8.0), vec![bounds]);
    }

    #[test]
    fn depth_first_order() {
        let bounds = cube(4.0);
        let boxes = subdivide_bounds(&bounds, 2, 1.0);
        assert_eq!(boxes.len(), 64);

        // The first 8 boxes tile the first octant.
        let first_octant = bounds.split_at_center()[0];
        let mut merged = Aabb::new_invalid();
        for b in &boxes[..8] {
            merged.take_point(b.mins);
            merged.take_point(b.maxs);
        }
        assert_eq!(merged, first_octant);

        let total: Real = boxes.iter().map(|b| b.volume()).sum();
        assert_relative_eq!(total, bounds.volume());
    }
}
