//! Bounding volumes.

pub use crate::bounding_volume::aabb::{Aabb, AabbFace};
pub use crate::bounding_volume::aabb_ball::{ball_aabb, local_ball_aabb};

mod aabb;
mod aabb_ball;
mod aabb_capsule;
mod aabb_cuboid;
mod aabb_cylinder;
