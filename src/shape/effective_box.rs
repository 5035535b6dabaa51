use crate::bounding_volume::{local_ball_aabb, Aabb};
use crate::math::{Isometry, Point, Real, Rotation, UnitVector, Vector};
use crate::shape::LeafShape;

/// The box actually clipped against the water for a leaf shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EffectiveBox {
    /// The box, in the shape's local-space.
    pub local_aabb: Aabb,
    /// The transform from the shape's local-space to world-space.
    pub transform: Isometry<Real>,
}

impl EffectiveBox {
    /// The world-space center of the box.
    pub fn world_center(&self) -> Point<Real> {
        self.transform * self.local_aabb.center()
    }

    /// The world-space positions of the eight box vertices, in [`Aabb::vertices`] order.
    pub fn world_vertices(&self) -> [Point<Real>; 8] {
        self.local_aabb.vertices().map(|v| self.transform * v)
    }
}

/// Computes the local box and shape-to-world transform of a leaf of a body placed at `body_pose`.
///
/// Balls are special-cased: their submerged volume doesn't depend on their
/// orientation, so the rotation is discarded and the local `+Z` axis is aimed
/// along `up` instead. This keeps the clipped box symmetric with respect to the
/// water plane and avoids spurious torques.
pub fn effective_box(
    leaf: &LeafShape,
    body_pose: &Isometry<Real>,
    up: &UnitVector<Real>,
) -> EffectiveBox {
    let shape_pose = body_pose * leaf.relative_transform;

    match leaf.shape.as_ball() {
        Some(ball) => {
            let rotation = Rotation::rotation_between(&Vector::z(), &**up).unwrap_or_else(|| {
                // `up` is -Z.
                Rotation::from_axis_angle(&Vector::x_axis(), core::f64::consts::PI as Real)
            });

            EffectiveBox {
                local_aabb: local_ball_aabb(ball.radius),
                transform: Isometry::from_parts(shape_pose.translation, rotation),
            }
        }
        None => EffectiveBox {
            local_aabb: leaf.shape.local_aabb(),
            transform: shape_pose,
        },
    }
}
