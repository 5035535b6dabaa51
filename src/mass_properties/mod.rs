//! Mass properties (mass, center of mass, angular inertia) of rigid bodies.

pub use self::mass_properties::MassProperties;

mod mass_properties;
mod mass_properties_ball;
mod mass_properties_capsule;
mod mass_properties_cuboid;
mod mass_properties_cylinder;
mod mass_properties_shape;
