//! Shapes supported by buoyant3d.

pub use self::ball::Ball;
pub use self::capsule::Capsule;
pub use self::cuboid::Cuboid;
pub use self::cylinder::Cylinder;
pub use self::effective_box::{effective_box, EffectiveBox};
pub use self::shape::{Shape, ShapeType};
pub use self::shape_instance::{Group, InteractionGroups, ShapeFlags, ShapeInstance};
pub use self::shape_tree::{LeafShape, Leaves, ShapeTree};

mod ball;
mod capsule;
mod cuboid;
mod cylinder;
mod effective_box;
mod shape;
mod shape_instance;
mod shape_tree;
