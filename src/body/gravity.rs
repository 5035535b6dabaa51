use crate::math::{Real, Vector};

/// The gravity magnitude used when a body's gravity group can't be resolved.
///
/// This is in centimeters per second squared, so hosts working in meters
/// should always register their own gravity group.
pub const DEFAULT_GRAVITY: Real = 980.0;

/// A table of gravity accelerations, indexed by gravity group.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GravityGroups {
    accelerations: Vec<Vector<Real>>,
}

impl GravityGroups {
    /// An empty table: every lookup falls back to the default gravity.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table with a single group `0`.
    pub fn uniform(acceleration: Vector<Real>) -> Self {
        Self {
            accelerations: vec![acceleration],
        }
    }

    /// Registers a new gravity group and returns its index.
    pub fn push(&mut self, acceleration: Vector<Real>) -> usize {
        self.accelerations.push(acceleration);
        self.accelerations.len() - 1
    }

    /// The default gravity: `-Z * 980`.
    pub fn default_acceleration() -> Vector<Real> {
        -Vector::z() * DEFAULT_GRAVITY
    }

    /// The gravity acceleration of the given group.
    ///
    /// Falls back to [`GravityGroups::default_acceleration`] if `group` is
    /// `None` or out of bounds.
    pub fn acceleration(&self, group: Option<usize>) -> Vector<Real> {
        group
            .and_then(|g| self.accelerations.get(g))
            .copied()
            .unwrap_or_else(Self::default_acceleration)
    }
}
