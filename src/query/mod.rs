//! Narrow-phase filtering between body shapes and water volumes.
//!
//! Buoyancy doesn't compute contacts itself: the host decides which (body,
//! water) pairs are close to each other. The filter only decides whether a
//! given leaf shape is allowed to interact with water at all.

pub use self::collision_filter::{CollisionFilter, DefaultCollisionFilter};

mod collision_filter;
