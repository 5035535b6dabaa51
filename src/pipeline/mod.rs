//! Per-step evaluation of buoyancy for a set of bodies.
//!
//! The host collects, for each body touching water, the list of water bodies
//! it touches as [`BodyInteractions`], then runs one [`BuoyancyPass`] per
//! simulation step. The pass resets its [`SubmersionTracker`](crate::submersion::SubmersionTracker),
//! orders each body's water contacts from the highest to the lowest, and runs
//! the algorithm selected by the configuration.

pub use self::buoyancy_pass::{evaluate_body, BodyBuoyancy, BuoyancyOutput, BuoyancyPass};
pub use self::interactions::{BodyInteractions, WaterInteraction};

mod buoyancy_pass;
mod interactions;
