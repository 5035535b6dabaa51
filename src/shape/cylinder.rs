//! Support mapping based Cylinder shape.

use crate::math::Real;

/// Cylinder shape with its principal axis aligned with the `z` axis.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
#[repr(C)]
pub struct Cylinder {
    /// The half-height of the cylinder.
    pub half_height: Real,
    /// The radius of the cylinder.
    pub radius: Real,
}

impl Cylinder {
    /// Creates a new cylinder.
    ///
    /// # Arguments:
    /// * `half_height` - the half length of the cylinder along the `z` axis.
    /// * `radius` - the length of the cylinder along all the other axis.
    pub fn new(half_height: Real, radius: Real) -> Cylinder {
        assert!(half_height.is_sign_positive() && radius.is_sign_positive());

        Cylinder {
            half_height,
            radius,
        }
    }

    /// The volume of this cylinder.
    pub fn volume(&self) -> Real {
        let pi = core::f64::consts::PI as Real;
        pi * self.radius * self.radius * self.half_height * 2.0
    }
}
