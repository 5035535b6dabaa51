use crate::math::{Point, Real, Vector};
use crate::utils;

/// The geometric quantities of one triangle of a submerged fan.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TriangleIntegral {
    /// The barycenter of the triangle.
    pub barycenter: Point<Real>,
    /// The normal of the triangle, following the right-hand rule on its vertices.
    ///
    /// Zero for degenerate triangles.
    pub normal: Vector<Real>,
    /// The area of the triangle.
    pub area: Real,
    /// The (unsigned) volume of the tetrahedron formed by the triangle and the reference point.
    pub volume: Real,
}

/// Computes the area, normal, barycenter of `(a, b, c)`, and the volume of the tetrahedron `(a, b, c, reference)`.
///
/// Degenerate triangles aren't rejected: callers skip those with a
/// vanishingly small area.
#[inline]
pub fn integrate_triangle(
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
    reference: &Point<Real>,
) -> TriangleIntegral {
    let barycenter = Point::from((a.coords + b.coords + c.coords) / 3.0);
    let area = (b - a).cross(&(c - a)).norm() * 0.5;

    let ra = a - reference;
    let rb = b - reference;
    let rc = c - reference;
    let volume = (ra.cross(&rb).dot(&rc) / 6.0).abs();

    TriangleIntegral {
        barycenter,
        normal: utils::ccw_face_normal([a, b, c]).map_or_else(Vector::zeros, |n| n.into_inner()),
        area,
        volume,
    }
}
