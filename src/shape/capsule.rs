use crate::math::Real;

/// A capsule shape defined as a round segment.
///
/// The segment is aligned with the local Z axis and centered at the origin.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
#[repr(C)]
pub struct Capsule {
    /// Half the length of the capsule's principal segment.
    pub half_height: Real,
    /// The radius of the capsule.
    pub radius: Real,
}

impl Capsule {
    /// Creates a new capsule aligned with the `z` axis and with the given half-height and radius.
    pub fn new_z(half_height: Real, radius: Real) -> Self {
        Capsule {
            half_height,
            radius,
        }
    }

    /// The height of this capsule, not counting its spherical caps.
    pub fn height(&self) -> Real {
        self.half_height * 2.0
    }

    /// The volume of this capsule.
    pub fn volume(&self) -> Real {
        let pi = core::f64::consts::PI as Real;
        let cylinder = pi * self.radius * self.radius * self.height();
        let ball = pi * self.radius * self.radius * self.radius * 4.0 / 3.0;
        cylinder + ball
    }
}
