use crate::shape::{ShapeFlags, ShapeInstance, ShapeType};

/// Decides whether shapes take part in narrow-phase interactions.
pub trait CollisionFilter: Send + Sync {
    /// Can a shape with this type and instance collide with anything at all?
    fn does_collide(&self, shape_type: ShapeType, instance: &ShapeInstance) -> bool;

    /// Can these two shapes interact with each other?
    fn does_collide_pair(
        &self,
        type1: ShapeType,
        instance1: &ShapeInstance,
        type2: ShapeType,
        instance2: &ShapeInstance,
    ) -> bool;
}

/// The filter used unless the host provides its own.
///
/// A shape collides if it carries the [`ShapeFlags::SIMULATION`] flag. A pair
/// collides if both shapes collide and their interaction groups are compatible.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultCollisionFilter;

impl CollisionFilter for DefaultCollisionFilter {
    fn does_collide(&self, _shape_type: ShapeType, instance: &ShapeInstance) -> bool {
        instance.flags.contains(ShapeFlags::SIMULATION)
    }

    fn does_collide_pair(
        &self,
        type1: ShapeType,
        instance1: &ShapeInstance,
        type2: ShapeType,
        instance2: &ShapeInstance,
    ) -> bool {
        self.does_collide(type1, instance1)
            && self.does_collide(type2, instance2)
            && instance1.groups.test(instance2.groups)
    }
}
