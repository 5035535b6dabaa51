use crate::math::{Point, Real, Vector};

/// The average of `pts`, or `None` if there is none.
///
/// ```
/// # #[cfg(all(feature = "dim3", feature = "f32"))] {
/// use buoyant3d::math::Point;
/// use buoyant3d::utils::center;
///
/// let square = [
///     Point::new(0.0, 0.0, 1.0),
///     Point::new(2.0, 0.0, 1.0),
///     Point::new(2.0, 2.0, 1.0),
///     Point::new(0.0, 2.0, 1.0),
/// ];
/// assert_eq!(center(&square), Some(Point::new(1.0, 1.0, 1.0)));
/// assert_eq!(center(&[]), None);
/// # }
/// ```
#[inline]
pub fn center(pts: &[Point<Real>]) -> Option<Point<Real>> {
    if pts.is_empty() {
        return None;
    }

    let sum: Vector<Real> = pts.iter().map(|pt| pt.coords).sum();
    Some(Point::from(sum / pts.len() as Real))
}
