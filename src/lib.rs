/*!
buoyant3d
========

**buoyant3d** computes how much of a rigid body is under water, where the
submerged volume is centered, and which buoyancy and drag forces result from
it. It is written in the rust programming language and is meant to be driven
once per simulation step by a host rigid-body solver.

Two submerged-volume algorithms are provided:

- a coarse one, subdividing each shape's bounding box into octants and clipping
  every octant against the water plane ([`submersion::submerged_volume`]);
- a precise one, clipping each shape's box exactly against a locally sampled
  water plane and integrating volume, drag and buoyancy over a triangle fan
  ([`submersion::submerged_volume_and_forces_for_body`]).

The [`pipeline::BuoyancyPass`] ties both to a per-tick
[`submersion::SubmersionTracker`] so that a shape overlapping several water
bodies contributes only once.
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)] // Maybe revisit this one later.
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.

#[cfg(all(feature = "f32", feature = "f64"))]
core::compile_error!("The `f32` and `f64` features are mutually exclusive.");

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod body;
pub mod bounding_volume;
pub mod config;
pub mod debug;
pub mod mass_properties;
pub mod pipeline;
pub mod query;
pub mod shape;
pub mod submersion;
pub mod utils;
pub mod water;

mod real {
    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub use f64 as Real;

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f32")]
    pub use f32 as Real;
}

/// Compilation flags dependent aliases for mathematical types.
#[cfg(feature = "dim3")]
pub mod math {
    pub use super::real::*;
    pub use na::{Isometry3, Matrix3, Point3, Translation3, UnitVector3, Vector3};
    use na::UnitQuaternion;

    /// The tolerance used by every "vanishingly small" test of the buoyancy kernel.
    pub const DEFAULT_EPSILON: Real = 1.0e-8;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The point type.
    pub use Point3 as Point;

    /// The angular vector type.
    pub type AngVector<N> = Vector3<N>;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The unit vector type.
    pub use UnitVector3 as UnitVector;

    /// The matrix type.
    pub use Matrix3 as Matrix;

    /// The transformation matrix type.
    pub use Isometry3 as Isometry;

    /// The rotation matrix type.
    pub type Rotation<N> = UnitQuaternion<N>;

    /// The translation type.
    pub use Translation3 as Translation;

    /// The principal angular inertia of a rigid body.
    pub type PrincipalAngularInertia<N> = Vector3<N>;
}
