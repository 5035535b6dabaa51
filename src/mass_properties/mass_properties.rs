use crate::math::{AngVector, Isometry, Matrix, Point, Real, Rotation, Vector};
use crate::utils;
use core::iter::Sum;
use core::ops::{Add, AddAssign};
use num::Zero;

// Principal inertia below this is treated as zero when diagonalizing.
const INERTIA_EPSILON: Real = f32::EPSILON as Real;

/// The mass, center of mass and angular inertia of a rigid body.
///
/// Buoyancy turns forces into velocity changes, so only the inverse mass and
/// inverse principal inertia are kept. A zero inverse means infinite.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct MassProperties {
    /// The center of mass, in the body's local frame.
    pub local_com: Point<Real>,
    /// The inverse mass. Zero for bodies of infinite mass.
    pub inv_mass: Real,
    /// The inverse of the inertia along each principal axis.
    pub inv_principal_inertia: AngVector<Real>,
    /// The orientation of the principal axes in the body's local frame.
    pub principal_inertia_local_frame: Rotation<Real>,
}

impl MassProperties {
    /// Mass properties with principal axes aligned with the local axes.
    pub fn new(local_com: Point<Real>, mass: Real, principal_inertia: AngVector<Real>) -> Self {
        Self::with_frame(local_com, mass, principal_inertia, Rotation::identity())
    }

    /// Mass properties with principal axes oriented by `frame`.
    pub fn with_frame(
        local_com: Point<Real>,
        mass: Real,
        principal_inertia: AngVector<Real>,
        frame: Rotation<Real>,
    ) -> Self {
        Self {
            local_com,
            inv_mass: utils::inv(mass),
            inv_principal_inertia: principal_inertia.map(utils::inv),
            principal_inertia_local_frame: frame,
        }
    }

    /// Mass properties from a full inertia tensor, diagonalized into principal axes.
    pub fn from_inertia_tensor(local_com: Point<Real>, mass: Real, tensor: Matrix<Real>) -> Self {
        let eigen = tensor.symmetric_eigen();
        let frame = Rotation::from_matrix_eps(&eigen.eigenvectors, 1.0e-6, 10, Rotation::identity());
        let principal_inertia = eigen
            .eigenvalues
            .map(|e| if e < INERTIA_EPSILON { 0.0 } else { e });

        Self::with_frame(local_com, mass, principal_inertia, frame)
    }

    /// The mass. Zero for bodies of infinite mass.
    pub fn mass(&self) -> Real {
        utils::inv(self.inv_mass)
    }

    /// The center of mass of a body at `pos`.
    pub fn world_com(&self, pos: &Isometry<Real>) -> Point<Real> {
        pos * self.local_com
    }

    /// The inverse inertia tensor of a body rotated by `rot`, in world space.
    pub fn world_inv_inertia(&self, rot: &Rotation<Real>) -> Matrix<Real> {
        if self.inv_principal_inertia.is_zero() {
            return Matrix::zeros();
        }

        let axes = (rot * self.principal_inertia_local_frame).to_rotation_matrix();
        axes.matrix() * Matrix::from_diagonal(&self.inv_principal_inertia) * axes.matrix().transpose()
    }

    /// The inertia tensor around the center of mass, in the body's local frame.
    pub fn local_inertia_tensor(&self) -> Matrix<Real> {
        let axes = self.principal_inertia_local_frame.to_rotation_matrix();
        let principal_inertia = self.inv_principal_inertia.map(utils::inv);
        axes.matrix() * Matrix::from_diagonal(&principal_inertia) * axes.matrix().transpose()
    }

    // Parallel axis theorem: the inertia tensor around `local_com + offset`.
    fn inertia_tensor_about(&self, offset: &Vector<Real>) -> Matrix<Real> {
        let mass = self.mass();
        let shift = Matrix::from_diagonal_element(offset.norm_squared()) - offset * offset.transpose();
        self.local_inertia_tensor() + shift * mass
    }

    /// These mass properties, for a body placed at `m` inside a larger one.
    ///
    /// The principal axes rotate with `m`, so the inertia itself is unchanged.
    pub fn transform_by(&self, m: &Isometry<Real>) -> Self {
        Self {
            local_com: m * self.local_com,
            principal_inertia_local_frame: m.rotation * self.principal_inertia_local_frame,
            ..*self
        }
    }
}

impl Zero for MassProperties {
    fn zero() -> Self {
        Self::new(Point::origin(), 0.0, Vector::zeros())
    }

    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

impl Add<MassProperties> for MassProperties {
    type Output = Self;

    fn add(self, other: MassProperties) -> Self {
        if self.is_zero() {
            return other;
        }
        if other.is_zero() {
            return self;
        }

        let (m1, m2) = (self.mass(), other.mass());
        let mass = m1 + m2;
        let local_com = Point::from((self.local_com.coords * m1 + other.local_com.coords * m2) * utils::inv(mass));
        let tensor = self.inertia_tensor_about(&(local_com - self.local_com))
            + other.inertia_tensor_about(&(local_com - other.local_com));

        Self::from_inertia_tensor(local_com, mass, tensor)
    }
}

impl AddAssign<MassProperties> for MassProperties {
    fn add_assign(&mut self, rhs: MassProperties) {
        *self = *self + rhs
    }
}

impl Sum<MassProperties> for MassProperties {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = Self>,
    {
        iter.fold(Self::zero(), Add::add)
    }
}
