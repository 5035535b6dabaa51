use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Real, Vector};
use crate::shape::Cylinder;

impl Cylinder {
    /// Computes the world-space [`Aabb`] of this cylinder, transformed by `pos`.
    #[inline]
    pub fn aabb(&self, pos: &Isometry<Real>) -> Aabb {
        self.local_aabb().transform_by(pos)
    }

    /// Computes the local-space [`Aabb`] of this cylinder.
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        let half_extents = Vector::new(self.radius, self.radius, self.half_height);
        Aabb::new((-half_extents).into(), half_extents.into())
    }
}
