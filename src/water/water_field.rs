use crate::math::{Point, Real, UnitVector, Vector};

/// The state of the water column above or below a world-space point.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WaterSample {
    /// The velocity of the water.
    pub velocity: Vector<Real>,
    /// The world-space height of the water surface.
    pub height: Real,
    /// The depth of the water column, from the bed to the surface.
    pub depth: Real,
}

impl WaterSample {
    /// A sample where there is no water at all.
    pub fn dry() -> Self {
        Self {
            velocity: Vector::zeros(),
            height: -Real::MAX,
            depth: 0.0,
        }
    }
}

/// A queryable water surface.
///
/// Implementations must be cheap and safe to call many times per shape and per
/// step, from several threads at once.
pub trait WaterField: Send + Sync {
    /// Samples the water column at the vertical of `position`.
    fn sample_at(&self, position: &Point<Real>) -> WaterSample;
    /// The outward normal of the water surface at the vertical of `position`.
    fn normal_at(&self, position: &Point<Real>) -> UnitVector<Real>;
}

/// A point of a water surface together with its local properties.
///
/// This is a transient value: it is built for one evaluation and never stored.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WaterContact {
    /// A world-space point on the water surface.
    pub point: Point<Real>,
    /// The outward normal of the water surface at `point`.
    pub normal: UnitVector<Real>,
    /// The depth of the water column at `point`.
    pub depth: Real,
    /// The velocity of the water at `point`.
    pub velocity: Vector<Real>,
}

impl WaterContact {
    /// A contact with a flat water plane.
    pub fn new(point: Point<Real>, normal: UnitVector<Real>) -> Self {
        Self {
            point,
            normal,
            depth: Real::MAX,
            velocity: Vector::zeros(),
        }
    }

    /// Samples `field` at `position`, then moves `position` vertically onto the surface.
    pub fn sample(field: &dyn WaterField, position: &Point<Real>) -> Self {
        let sample = field.sample_at(position);
        let point = Point::new(position.x, position.y, sample.height);

        Self {
            point,
            normal: field.normal_at(&point),
            depth: sample.depth,
            velocity: sample.velocity,
        }
    }
}
