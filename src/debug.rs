//! Optional visualization of the intermediate geometry of buoyancy.
//!
//! Nothing here is ever read back by the kernel.

use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Point, Real, Vector};
use std::sync::Mutex;

/// An RGBA color.
pub type DebugColor = [f32; 4];

/// Color of the boxes found under water.
pub const SUBMERGED_COLOR: DebugColor = [0.1, 0.4, 1.0, 1.0];
/// Color of the water surface points and normals.
pub const WATER_COLOR: DebugColor = [0.2, 0.9, 1.0, 1.0];
/// Color of the submerged centers of mass.
pub const CENTER_COLOR: DebugColor = [1.0, 0.8, 0.0, 1.0];
/// Color of the applied forces.
pub const FORCE_COLOR: DebugColor = [1.0, 0.2, 0.2, 1.0];

/// A sink for debug geometry.
///
/// Methods take `&self` so one renderer can be shared by concurrent passes.
pub trait DebugRenderer: Send + Sync {
    /// Draws a point.
    fn draw_point(&self, position: Point<Real>, color: DebugColor);
    /// Draws a segment.
    fn draw_line(&self, a: Point<Real>, b: Point<Real>, color: DebugColor);
    /// Draws an oriented box: `aabb` expressed in the local-space of `transform`.
    fn draw_box(&self, aabb: Aabb, transform: Isometry<Real>, color: DebugColor);
    /// Draws a sphere.
    fn draw_sphere(&self, center: Point<Real>, radius: Real, color: DebugColor);
    /// Draws an arrow from `origin` to `origin + vector`.
    fn draw_arrow(&self, origin: Point<Real>, vector: Vector<Real>, color: DebugColor);
}

/// A primitive recorded by a [`DebugDrawQueue`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DebugPrimitive {
    /// A point.
    Point {
        /// Position of the point.
        position: Point<Real>,
        /// Color of the point.
        color: DebugColor,
    },
    /// A segment.
    Line {
        /// First endpoint.
        a: Point<Real>,
        /// Second endpoint.
        b: Point<Real>,
        /// Color of the segment.
        color: DebugColor,
    },
    /// An oriented box.
    Box {
        /// The box, in the local-space of `transform`.
        aabb: Aabb,
        /// The box's local-to-world transform.
        transform: Isometry<Real>,
        /// Color of the box.
        color: DebugColor,
    },
    /// A sphere.
    Sphere {
        /// Center of the sphere.
        center: Point<Real>,
        /// Radius of the sphere.
        radius: Real,
        /// Color of the sphere.
        color: DebugColor,
    },
    /// An arrow.
    Arrow {
        /// Start of the arrow.
        origin: Point<Real>,
        /// Direction and length of the arrow.
        vector: Vector<Real>,
        /// Color of the arrow.
        color: DebugColor,
    },
}

/// A [`DebugRenderer`] recording every primitive it receives.
#[derive(Debug, Default)]
pub struct DebugDrawQueue {
    primitives: Mutex<Vec<DebugPrimitive>>,
}

impl DebugDrawQueue {
    /// An empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, primitive: DebugPrimitive) {
        self.primitives
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(primitive);
    }

    /// The number of recorded primitives.
    pub fn len(&self) -> usize {
        self.primitives
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Is this queue empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes and returns all the recorded primitives.
    pub fn drain(&self) -> Vec<DebugPrimitive> {
        core::mem::take(
            &mut *self
                .primitives
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }
}

impl DebugRenderer for DebugDrawQueue {
    fn draw_point(&self, position: Point<Real>, color: DebugColor) {
        self.push(DebugPrimitive::Point { position, color });
    }

    fn draw_line(&self, a: Point<Real>, b: Point<Real>, color: DebugColor) {
        self.push(DebugPrimitive::Line { a, b, color });
    }

    fn draw_box(&self, aabb: Aabb, transform: Isometry<Real>, color: DebugColor) {
        self.push(DebugPrimitive::Box {
            aabb,
            transform,
            color,
        });
    }

    fn draw_sphere(&self, center: Point<Real>, radius: Real, color: DebugColor) {
        self.push(DebugPrimitive::Sphere {
            center,
            radius,
            color,
        });
    }

    fn draw_arrow(&self, origin: Point<Real>, vector: Vector<Real>, color: DebugColor) {
        self.push(DebugPrimitive::Arrow {
            origin,
            vector,
            color,
        });
    }
}
