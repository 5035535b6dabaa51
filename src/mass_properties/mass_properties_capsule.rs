use crate::mass_properties::MassProperties;
use crate::math::{Point, Real};

impl MassProperties {
    /// Computes the mass properties of a capsule aligned with the `z` axis.
    pub fn from_capsule(density: Real, half_height: Real, radius: Real) -> Self {
        let (cyl_vol, cyl_unit_i) = Self::cylinder_z_volume_unit_inertia(half_height, radius);
        let (ball_vol, ball_unit_i) = Self::ball_volume_unit_angular_inertia(radius);
        let cap_vol = cyl_vol + ball_vol;
        let cap_mass = cap_vol * density;
        let mut cap_i = (cyl_unit_i * cyl_vol + ball_unit_i * ball_vol) * density;

        let h = half_height * 2.0;
        let extra = (h * h * 0.25 + h * radius * 3.0 / 8.0) * ball_vol * density;
        cap_i.x += extra;
        cap_i.y += extra;
        Self::new(Point::origin(), cap_mass, cap_i)
    }
}
