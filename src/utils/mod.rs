//! Various unsorted geometrical and logical operators.

pub use self::ccw_face_normal::ccw_face_normal;
pub use self::center::center;
pub(crate) use self::inv::inv;
pub use self::isometry_ops::IsometryOps;

mod ccw_face_normal;
mod center;
pub mod hashmap;
mod inv;
mod isometry_ops;
