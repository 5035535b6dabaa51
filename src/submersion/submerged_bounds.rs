use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, UnitVector, DEFAULT_EPSILON};
use arrayvec::ArrayVec;

// 8 corners minus those above water, plus at most one crossing per edge
// leaving a submerged corner. A box never exceeds 10.
const MAX_SUBMERGED_POINTS: usize = 10;

/// The bounding box of the part of `bounds` below the plane through `surface_point` with normal `surface_normal`.
///
/// A corner is submerged if it lies deeper than [`DEFAULT_EPSILON`] under the
/// plane. Returns `None` if no corner is submerged and `bounds` itself if all
/// of them are. Otherwise, the result bounds the submerged corners together
/// with the points where the plane crosses the box edges. This is an upper
/// bound of the submerged volume, not its exact shape.
pub fn submerged_bounds(
    surface_point: &Point<Real>,
    surface_normal: &UnitVector<Real>,
    bounds: &Aabb,
) -> Option<Aabb> {
    let vertices = bounds.vertices();
    let depths = vertices.map(|v| surface_normal.dot(&(surface_point - v)));
    let is_submerged = depths.map(|depth| depth > DEFAULT_EPSILON);

    match is_submerged.iter().filter(|s| **s).count() {
        0 => return None,
        8 => return Some(*bounds),
        _ => {}
    }

    let mut points = ArrayVec::<Point<Real>, MAX_SUBMERGED_POINTS>::new();
    points.extend(
        vertices
            .iter()
            .zip(is_submerged.iter())
            .filter(|(_, submerged)| **submerged)
            .map(|(v, _)| *v),
    );

    for (i1, i2) in Aabb::EDGES_VERTEX_IDS {
        if is_submerged[i1] == is_submerged[i2] {
            continue;
        }

        let (d1, d2) = (depths[i1], depths[i2]);
        let alpha = (d1 / (d1 - d2)).clamp(0.0, 1.0);
        let crossing = vertices[i1] + (vertices[i2] - vertices[i1]) * alpha;

        if points.try_push(crossing).is_err() {
            debug_assert!(false, "Too many submerged points on a box.");
            log::warn!("More than {MAX_SUBMERGED_POINTS} submerged points found on a box.");
            break;
        }
    }

    Some(Aabb::from_points(points))
}
