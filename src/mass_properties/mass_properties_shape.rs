use crate::mass_properties::MassProperties;
use crate::math::Real;
use crate::shape::{Shape, ShapeTree};

impl MassProperties {
    /// Computes the mass properties of a leaf shape with the given density.
    pub fn from_shape(density: Real, shape: &Shape) -> Self {
        match shape {
            Shape::Ball(s) => Self::from_ball(density, s.radius),
            Shape::Cuboid(s) => Self::from_cuboid(density, s.half_extents),
            Shape::Capsule(s) => Self::from_capsule(density, s.half_height, s.radius),
            Shape::Cylinder(s) => Self::from_cylinder(density, s.half_height, s.radius),
        }
    }

    /// Computes the mass properties of a whole shape tree with a uniform density.
    pub fn from_shape_tree(density: Real, tree: &ShapeTree) -> Self {
        tree.leaves()
            .map(|leaf| {
                Self::from_shape(density, leaf.shape).transform_by(&leaf.relative_transform)
            })
            .sum()
    }
}
