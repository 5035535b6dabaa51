use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Real, Vector};
use crate::shape::Capsule;

impl Capsule {
    /// The axis-aligned bounding box of this capsule.
    #[inline]
    pub fn aabb(&self, pos: &Isometry<Real>) -> Aabb {
        self.local_aabb().transform_by(pos)
    }

    /// The axis-aligned bounding box of this capsule, in its local-space.
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        let half_extents = Vector::new(self.radius, self.radius, self.half_height + self.radius);
        Aabb::new((-half_extents).into(), half_extents.into())
    }
}
