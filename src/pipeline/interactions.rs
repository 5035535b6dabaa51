use crate::body::BuoyantBody;
use crate::math::{Point, Real};
use crate::water::{WaterBody, WaterField};
use ordered_float::OrderedFloat;
use core::cmp::Reverse;

/// One water body touched by a rigid body.
#[derive(Copy, Clone)]
pub struct WaterInteraction<'a> {
    /// The collision descriptor of the water.
    pub water: WaterBody,
    /// The water surface.
    pub field: &'a dyn WaterField,
    /// The point of the water volume closest to the rigid body, as found by the host's broad-phase.
    pub closest_point: Point<Real>,
}

impl<'a> WaterInteraction<'a> {
    /// A new interaction with the given water.
    pub fn new(water: WaterBody, field: &'a dyn WaterField, closest_point: Point<Real>) -> Self {
        Self {
            water,
            field,
            closest_point,
        }
    }
}

/// A rigid body together with all the water bodies it touches.
#[derive(Clone)]
pub struct BodyInteractions<'a> {
    /// The rigid body.
    pub body: &'a dyn BuoyantBody,
    /// The water bodies it touches.
    pub waters: Vec<WaterInteraction<'a>>,
}

impl<'a> BodyInteractions<'a> {
    /// A body touching no water yet.
    pub fn new(body: &'a dyn BuoyantBody) -> Self {
        Self {
            body,
            waters: Vec::new(),
        }
    }

    /// Adds a water body to the interactions of this body.
    #[must_use]
    pub fn with_water(mut self, water: WaterInteraction<'a>) -> Self {
        self.waters.push(water);
        self
    }

    /// Orders the water bodies by descending height of their closest point.
    ///
    /// A leaf found under the highest water is then skipped by the ones below.
    /// The sort is stable: ties keep the insertion order.
    pub fn sort_waters(&mut self) {
        self.waters
            .sort_by_key(|w| Reverse(OrderedFloat(w.closest_point.z)));
    }
}
