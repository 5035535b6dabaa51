use crate::shape::{ShapeInstance, ShapeType};

/// The collision descriptor of a water volume.
///
/// It is fed to the narrow-phase [`CollisionFilter`](crate::query::CollisionFilter)
/// together with each leaf shape of the bodies touching the water.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct WaterBody {
    /// The narrow-phase type of the water shape.
    pub shape_type: ShapeType,
    /// The collision data of the water shape.
    pub instance: ShapeInstance,
}

impl WaterBody {
    /// A water body with the given shape type and instance.
    pub fn new(shape_type: ShapeType, instance: ShapeInstance) -> Self {
        Self {
            shape_type,
            instance,
        }
    }
}

impl Default for WaterBody {
    fn default() -> Self {
        Self::new(ShapeType::HeightField, ShapeInstance::default())
    }
}
