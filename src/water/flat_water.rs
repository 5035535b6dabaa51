use crate::math::{Point, Real, UnitVector, Vector, DEFAULT_EPSILON};
use crate::water::{WaterField, WaterSample};

/// An infinite water plane with a uniform current.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlatWater {
    /// A point of the water plane.
    pub origin: Point<Real>,
    /// The outward normal of the water plane. Its `z` component must be positive.
    pub normal: UnitVector<Real>,
    /// The velocity of the water.
    pub velocity: Vector<Real>,
    /// The depth of the water column, everywhere.
    pub depth: Real,
}

impl FlatWater {
    /// Still, bottomless, horizontal water at the given height.
    pub fn new(height: Real) -> Self {
        Self {
            origin: Point::new(0.0, 0.0, height),
            normal: Vector::z_axis(),
            velocity: Vector::zeros(),
            depth: Real::MAX,
        }
    }

    /// Tilts the water plane around its origin.
    ///
    /// A normal with a non-positive `z` component describes no height field
    /// and is ignored.
    pub fn with_normal(mut self, normal: UnitVector<Real>) -> Self {
        if normal.z > DEFAULT_EPSILON {
            self.normal = normal;
        } else {
            log::warn!("Ignoring a water plane normal without upward component: {:?}", normal);
        }
        self
    }

    /// Sets the water current.
    pub fn with_velocity(mut self, velocity: Vector<Real>) -> Self {
        self.velocity = velocity;
        self
    }

    /// Sets the depth of the water column.
    pub fn with_depth(mut self, depth: Real) -> Self {
        self.depth = depth;
        self
    }

    /// The height of the plane at the vertical of `position`.
    pub fn height_at(&self, position: &Point<Real>) -> Real {
        let dx = position.x - self.origin.x;
        let dy = position.y - self.origin.y;

        if self.normal.z <= DEFAULT_EPSILON {
            return self.origin.z;
        }

        self.origin.z - (self.normal.x * dx + self.normal.y * dy) / self.normal.z
    }
}

impl WaterField for FlatWater {
    fn sample_at(&self, position: &Point<Real>) -> WaterSample {
        WaterSample {
            velocity: self.velocity,
            height: self.height_at(position),
            depth: self.depth,
        }
    }

    fn normal_at(&self, _position: &Point<Real>) -> UnitVector<Real> {
        self.normal
    }
}
