//! Axis-aligned boxes and their topology.

use crate::math::{Isometry, Point, Real, Vector, DIM};
use crate::utils::IsometryOps;

/// An axis-aligned box.
///
/// Every leaf shape is reduced to one of these, in the shape's local frame,
/// before being subdivided and clipped (coarse path) or cut exactly by the
/// water plane (precise path).
///
/// # Example
///
/// ```rust
/// # #[cfg(all(feature = "dim3", feature = "f32"))] {
/// use buoyant3d::bounding_volume::Aabb;
/// use nalgebra::Point3;
///
/// let aabb = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
///
/// assert_eq!(aabb.center(), Point3::origin());
/// assert_eq!(aabb.volume(), 8.0);
/// assert_eq!(aabb.split_at_center().len(), 8);
/// # }
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The corner with the smallest coordinates.
    pub mins: Point<Real>,
    /// The corner with the largest coordinates.
    pub maxs: Point<Real>,
}

/// One face of an [`Aabb`], as indices into [`Aabb::vertices`] and
/// [`Aabb::EDGES_VERTEX_IDS`].
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct AabbFace {
    /// The face vertices, counter-clockwise when seen from outside the box.
    pub vertices: [usize; 4],
    /// The face edges: edge `k` joins `vertices[k]` and `vertices[(k + 1) % 4]`.
    pub edges: [usize; 4],
}

// Vertex `i` takes its x from `maxs` if bit 0 of `CORNER_BITS[i]` is set, its y
// if bit 1 is, and its z if bit 2 is.
const CORNER_BITS: [u8; 8] = [0b000, 0b001, 0b011, 0b010, 0b100, 0b101, 0b111, 0b110];

impl Aabb {
    /// The two vertices of each of the twelve edges, as indices into [`Aabb::vertices`].
    ///
    /// Edges 0 to 3 go around the `z = mins.z` face, edges 4 to 7 around the
    /// `z = maxs.z` face, and edges 8 to 11 join both faces.
    pub const EDGES_VERTEX_IDS: [(usize, usize); 12] = [
        (0, 1),
        (1, 2),
        (3, 2),
        (0, 3),
        (4, 5),
        (5, 6),
        (7, 6),
        (4, 7),
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
    ];

    /// The six faces, wound counter-clockwise when seen from outside.
    pub const FACES: [AabbFace; 6] = [
        // Face with normal +X
        AabbFace {
            vertices: [1, 2, 6, 5],
            edges: [1, 10, 5, 9],
        },
        // Face with normal -X
        AabbFace {
            vertices: [0, 4, 7, 3],
            edges: [8, 7, 11, 3],
        },
        // Face with normal +Y
        AabbFace {
            vertices: [3, 7, 6, 2],
            edges: [11, 6, 10, 2],
        },
        // Face with normal -Y
        AabbFace {
            vertices: [0, 1, 5, 4],
            edges: [0, 9, 4, 8],
        },
        // Face with normal +Z
        AabbFace {
            vertices: [4, 5, 6, 7],
            edges: [4, 5, 6, 7],
        },
        // Face with normal -Z
        AabbFace {
            vertices: [0, 3, 2, 1],
            edges: [3, 2, 1, 0],
        },
    ];

    /// A box from its two extreme corners.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// A box containing nothing, that any [`Aabb::take_point`] turns into a valid one.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Point::from(Vector::repeat(Real::MAX)),
            Point::from(Vector::repeat(-Real::MAX)),
        )
    }

    /// A box from its center and its half-extents.
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// The smallest box containing all of `pts`.
    ///
    /// This is [`Aabb::new_invalid`] if `pts` is empty.
    pub fn from_points<I>(pts: I) -> Self
    where
        I: IntoIterator<Item = Point<Real>>,
    {
        pts.into_iter().fold(Self::new_invalid(), |mut aabb, pt| {
            aabb.take_point(pt);
            aabb
        })
    }

    /// The center of this box.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// Half the side lengths of this box.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        self.extents() * 0.5
    }

    /// The side lengths of this box.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// The volume of this box. Negative for inverted boxes.
    #[inline]
    pub fn volume(&self) -> Real {
        self.extents().product()
    }

    /// Grows this box so it contains `pt`.
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = Point::from(self.mins.coords.inf(&pt.coords));
        self.maxs = Point::from(self.maxs.coords.sup(&pt.coords));
    }

    /// The box enclosing this one once moved by `m`.
    #[inline]
    pub fn transform_by(&self, m: &Isometry<Real>) -> Self {
        let center = m * self.center();
        let half_extents = m.absolute_transform_vector(&self.half_extents());
        Self::from_half_extents(center, half_extents)
    }

    /// Is `point` inside this box, boundary included?
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        (0..DIM).all(|i| point[i] >= self.mins[i] && point[i] <= self.maxs[i])
    }

    /// Is `other` entirely inside this box?
    #[inline]
    pub fn contains(&self, other: &Aabb) -> bool {
        self.contains_local_point(&other.mins) && self.contains_local_point(&other.maxs)
    }

    /// The eight corners of this box.
    ///
    /// Vertices 0 to 3 go counter-clockwise (seen from +Z) around the
    /// `z = mins.z` face starting at `mins`, and vertices 4 to 7 do the same
    /// on the `z = maxs.z` face:
    ///
    /// ```text
    ///        7 ------ 6
    ///       /|       /|
    ///      4 ------ 5 |
    ///      | 3 -----|-2      z  y
    ///      |/       |/       | /
    ///      0 ------ 1        |/___ x
    /// ```
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 8] {
        CORNER_BITS.map(|bits| self.corner(bits))
    }

    /// Splits this box at its center into eight octants, in the order of [`Aabb::vertices`].
    ///
    /// Octant `i` has vertex `i` of this box as a corner. The octants tile
    /// this box exactly.
    #[inline]
    pub fn split_at_center(&self) -> [Aabb; 8] {
        let center = self.center();
        self.vertices().map(|corner| {
            Aabb::new(
                Point::from(corner.coords.inf(&center.coords)),
                Point::from(corner.coords.sup(&center.coords)),
            )
        })
    }

    #[inline]
    fn corner(&self, bits: u8) -> Point<Real> {
        let pick = |axis: usize| {
            if bits & (1 << axis) != 0 {
                self.maxs[axis]
            } else {
                self.mins[axis]
            }
        };
        Point::new(pick(0), pick(1), pick(2))
    }
}
