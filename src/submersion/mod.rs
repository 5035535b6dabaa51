//! Submerged volume, submerged center of mass, and buoyancy forces.
//!
//! # Coarse and precise algorithms
//! Two independent estimators are provided:
//!
//! * [`submerged_volume()`] subdivides the bounding box of each leaf shape into
//!   octants and clips every octant against the water plane, keeping the
//!   bounding box of the submerged part. This overestimates the volume of
//!   non-box shapes, so [`submerged_volume_scaled()`] rescales the result
//!   toward the volume derived from the body's mass and density.
//! * [`submerged_volume_and_forces_for_shape()`] clips each leaf box exactly
//!   against a water plane sampled at the shape center, and integrates volume,
//!   drag and buoyancy over a fan of triangles covering the submerged solid.
//!
//! Both mark the leaves they find under water in a [`SubmergedShapes`] slot of
//! the [`SubmersionTracker`] so that a leaf overlapping several water bodies
//! contributes only once per simulation step.

pub use self::coarse::{submerged_volume, submerged_volume_scaled, SubmergedVolume};
pub use self::context::BuoyancyContext;
pub use self::forces::{
    buoyant_force_for_shape, buoyant_velocity_change, fluid_force_for_triangle, VelocityChange,
};
pub use self::intersection::{find_intersection_ring, sort_points_by_angle, IntersectionRing};
pub use self::precise::{
    submerged_volume_and_forces_for_body, submerged_volume_and_forces_for_shape, BodySubmersion,
    ShapeSubmersion,
};
pub use self::subdivide::{subdivide_bounds, subdivide_bounds_into, subdivision_levels};
pub use self::submerged_bounds::submerged_bounds;
pub use self::tracker::{SubmergedShapes, SubmersionTracker};
pub use self::triangle::{integrate_triangle, TriangleIntegral};
pub use self::volume::{
    particle_volume, scale_submerged_volume, shape_volume, ScaledVolume, UNKNOWN_VOLUME,
};

mod coarse;
mod context;
mod forces;
mod intersection;
mod precise;
mod subdivide;
mod submerged_bounds;
mod tracker;
mod triangle;
mod volume;
