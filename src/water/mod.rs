//! Water surfaces, as seen by buoyancy.
//!
//! Buoyancy treats water as an oracle: it asks a [`WaterField`] for the surface
//! height, column depth, current and surface normal at a few world-space
//! points, and never caches the answers.

pub use self::flat_water::FlatWater;
pub use self::water_body::WaterBody;
pub use self::water_field::{WaterContact, WaterField, WaterSample};
pub use self::water_grid::{WaterGrid, WaterGridError};

mod flat_water;
mod water_body;
mod water_field;
mod water_grid;
