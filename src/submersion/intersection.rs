use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, UnitVector, DEFAULT_EPSILON};
use arrayvec::ArrayVec;
use na::RealField;
use ordered_float::OrderedFloat;

/// The polygon along which a plane cuts a box.
#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionRing {
    /// The crossing point of each box edge, indexed like [`Aabb::EDGES_VERTEX_IDS`].
    pub edge_points: [Option<Point<Real>>; 12],
    /// The distinct crossing points, counter-clockwise around the plane normal.
    pub points: ArrayVec<Point<Real>, 12>,
    /// The average of every crossing point.
    pub centroid: Point<Real>,
}

impl IntersectionRing {
    /// The number of distinct points of this ring.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Does the plane miss the box?
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The crossing point on the given box edge, if any.
    #[inline]
    pub fn edge_point(&self, edge: usize) -> Option<&Point<Real>> {
        self.edge_points.get(edge).and_then(Option::as_ref)
    }
}

/// Intersects the plane through `water_point` with normal `water_normal` with the edges of a box.
///
/// `world_vertices` are the box vertices in [`Aabb::vertices`] order. Edges
/// nearly parallel to the plane are ignored. The returned ring is ordered
/// with [`sort_points_by_angle`].
pub fn find_intersection_ring(
    water_point: &Point<Real>,
    water_normal: &UnitVector<Real>,
    world_vertices: &[Point<Real>; 8],
) -> IntersectionRing {
    let mut edge_points = [None; 12];
    let mut points = ArrayVec::new();
    let mut sum = Point::origin();

    for (edge, (i1, i2)) in Aabb::EDGES_VERTEX_IDS.iter().enumerate() {
        let origin = world_vertices[*i1];
        let dir = world_vertices[*i2] - origin;
        let dir_dot_n = water_normal.dot(&dir);

        if dir_dot_n.abs() <= DEFAULT_EPSILON {
            continue;
        }

        let t = water_normal.dot(&(water_point - origin)) / dir_dot_n;

        if t >= 0.0 && t <= 1.0 {
            let pt = origin + dir * t;
            edge_points[edge] = Some(pt);
            points.push(pt);
            sum += pt.coords;
        }
    }

    let centroid = if points.is_empty() {
        sum
    } else {
        sum / points.len() as Real
    };

    sort_points_by_angle(&mut points, &centroid, water_normal);

    IntersectionRing {
        edge_points,
        points,
        centroid,
    }
}

/// Sorts coplanar points counter-clockwise around `center`, seen from the tip of `normal`.
///
/// The first point gets the angle zero and stays first. Points closer than
/// `DEFAULT_EPSILON.sqrt()` to a point already kept are removed, so that a
/// plane passing exactly through a box corner yields that corner once.
pub fn sort_points_by_angle(
    points: &mut ArrayVec<Point<Real>, 12>,
    center: &Point<Real>,
    normal: &UnitVector<Real>,
) {
    let Some(first) = points.first() else {
        return;
    };

    let start = (first - center).try_normalize(DEFAULT_EPSILON);
    let angle_to_start = |pt: &Point<Real>| -> Real {
        let (Some(start), Some(dir)) = (start, (pt - center).try_normalize(DEFAULT_EPSILON)) else {
            return 0.0;
        };

        let angle = start.dot(&dir).clamp(-1.0, 1.0).acos();

        if normal.dot(&start.cross(&dir)) < 0.0 {
            Real::two_pi() - angle
        } else {
            angle
        }
    };

    let mut keyed: ArrayVec<(Real, Point<Real>), 12> = points
        .iter()
        .enumerate()
        .map(|(i, pt)| (if i == 0 { 0.0 } else { angle_to_start(pt) }, *pt))
        .collect();
    keyed.sort_by_key(|(angle, _)| OrderedFloat(*angle));

    points.clear();

    for (_, pt) in keyed {
        let is_duplicate = points
            .iter()
            .any(|kept| na::distance_squared(kept, &pt) <= DEFAULT_EPSILON);

        if !is_duplicate {
            points.push(pt);
        }
    }

    debug_assert!(points.len() <= 6, "A plane cuts a box along at most 6 points.");
    if points.len() > 6 {
        log::warn!(
            "Found {} distinct points where a plane cuts a box, expected at most 6.",
            points.len()
        );
    }
}
