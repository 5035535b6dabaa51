use crate::math::Real;

/// A Ball shape.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
#[repr(C)]
pub struct Ball {
    /// The radius of the ball.
    pub radius: Real,
}

impl Ball {
    /// Creates a new ball from its radius and center.
    #[inline]
    pub fn new(radius: Real) -> Ball {
        Ball { radius }
    }

    /// The volume of this ball.
    #[inline]
    pub fn volume(&self) -> Real {
        let pi = core::f64::consts::PI as Real;
        pi * self.radius * self.radius * self.radius * 4.0 / 3.0
    }
}
