use crate::bounding_volume::Aabb;
use crate::math::Real;
use crate::shape::{Ball, Capsule, Cuboid, Cylinder};

/// Enum representing the narrow-phase type of a shape.
///
/// This is what collision filters are keyed on. Only the leaf primitives
/// ([`ShapeType::Ball`], [`ShapeType::Cuboid`], [`ShapeType::Capsule`] and
/// [`ShapeType::Cylinder`]) can be part of a [`ShapeTree`](crate::shape::ShapeTree);
/// the remaining variants describe water volumes or other external colliders.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShapeType {
    /// A ball shape.
    Ball = 0,
    /// A cuboid shape.
    Cuboid,
    /// A capsule shape.
    Capsule,
    /// A cylinder shape.
    Cylinder,
    /// A compound shape.
    Compound,
    /// A heightfield shape.
    HeightField,
    /// A triangle mesh shape.
    TriMesh,
    /// A custom user-defined shape.
    Custom,
}

/// A leaf primitive usable as part of a body's geometry.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Shape {
    /// A ball shape.
    Ball(Ball),
    /// A cuboid shape.
    Cuboid(Cuboid),
    /// A capsule shape.
    Capsule(Capsule),
    /// A cylinder shape.
    Cylinder(Cylinder),
}

impl Shape {
    /// The narrow-phase type of this shape.
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Shape::Ball(_) => ShapeType::Ball,
            Shape::Cuboid(_) => ShapeType::Cuboid,
            Shape::Capsule(_) => ShapeType::Capsule,
            Shape::Cylinder(_) => ShapeType::Cylinder,
        }
    }

    /// The bounding box of this shape, in its local-space.
    pub fn local_aabb(&self) -> Aabb {
        match self {
            Shape::Ball(s) => s.local_aabb(),
            Shape::Cuboid(s) => s.local_aabb(),
            Shape::Capsule(s) => s.local_aabb(),
            Shape::Cylinder(s) => s.local_aabb(),
        }
    }

    /// The exact volume of this shape.
    pub fn volume(&self) -> Real {
        match self {
            Shape::Ball(s) => s.volume(),
            Shape::Cuboid(s) => s.volume(),
            Shape::Capsule(s) => s.volume(),
            Shape::Cylinder(s) => s.volume(),
        }
    }

    /// Returns a reference to the ball if this shape is one.
    pub fn as_ball(&self) -> Option<&Ball> {
        match self {
            Shape::Ball(b) => Some(b),
            _ => None,
        }
    }
}

impl From<Ball> for Shape {
    fn from(s: Ball) -> Self {
        Shape::Ball(s)
    }
}

impl From<Cuboid> for Shape {
    fn from(s: Cuboid) -> Self {
        Shape::Cuboid(s)
    }
}

impl From<Capsule> for Shape {
    fn from(s: Capsule) -> Self {
        Shape::Capsule(s)
    }
}

impl From<Cylinder> for Shape {
    fn from(s: Cylinder) -> Self {
        Shape::Cylinder(s)
    }
}
