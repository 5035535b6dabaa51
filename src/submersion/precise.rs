use crate::body::BuoyantBody;
use crate::bounding_volume::Aabb;
use crate::debug::{CENTER_COLOR, FORCE_COLOR, SUBMERGED_COLOR, WATER_COLOR};
use crate::math::{AngVector, Point, Real, UnitVector, Vector, DEFAULT_EPSILON};
use crate::shape::{effective_box, LeafShape};
use crate::submersion::{
    buoyant_force_for_shape, find_intersection_ring, fluid_force_for_triangle, integrate_triangle,
    BuoyancyContext, SubmergedShapes, SubmergedVolume, TriangleIntegral,
};
use crate::utils;
use crate::water::{WaterBody, WaterField};
use arrayvec::ArrayVec;

/// The submerged part of one leaf shape, and the forces the water applies on it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapeSubmersion {
    /// The point where the water surface was sampled, above or below the shape center.
    pub water_point: Point<Real>,
    /// The water surface normal at `water_point`.
    pub water_normal: UnitVector<Real>,
    /// The submerged volume.
    pub volume: Real,
    /// The world-space center of the submerged volume.
    pub center_of_mass: Point<Real>,
    /// The total force: buoyancy plus drag.
    pub force: Vector<Real>,
    /// The total torque around the body's center of mass.
    pub torque: AngVector<Real>,
}

/// The submerged part of a whole body, and the forces the water applies on it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BodySubmersion {
    /// The submerged volume.
    pub volume: Real,
    /// The world-space center of the submerged volume.
    pub center_of_mass: Point<Real>,
    /// The total force: buoyancy plus drag.
    pub force: Vector<Real>,
    /// The total torque around the body's center of mass.
    pub torque: AngVector<Real>,
}

struct Accumulator {
    volume: Real,
    // Volume-weighted.
    com: Vector<Real>,
    // Area-weighted.
    force: Vector<Real>,
    torque: AngVector<Real>,
    force_weight: Real,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            volume: 0.0,
            com: Vector::zeros(),
            force: Vector::zeros(),
            torque: Vector::zeros(),
            force_weight: 0.0,
        }
    }

    // The tetrahedra built on the fan triangles and the interior reference
    // point partition the submerged solid, so their centroids weighted by
    // their volumes give its exact center of mass.
    fn add_tetrahedron(
        &mut self,
        tri: &TriangleIntegral,
        a: &Point<Real>,
        b: &Point<Real>,
        c: &Point<Real>,
        reference: &Point<Real>,
    ) {
        let centroid = (a.coords + b.coords + c.coords + reference.coords) * 0.25;
        self.volume += tri.volume;
        self.com += centroid * tri.volume;
    }
}

/// Computes the submerged volume of one leaf of `body`, with the buoyancy and drag it undergoes.
///
/// The water surface is sampled once at the center of the leaf's box, and
/// treated as a plane through that sample with the local surface normal. The
/// box is clipped exactly against that plane: the boundary of the submerged
/// solid is triangulated (the submerged part of each box face, plus the
/// polygon cut by the plane) and integrated with [`integrate_triangle`].
/// Each face triangle receives a drag force from [`fluid_force_for_triangle`],
/// with the water velocity sampled at its barycenter. The drag forces are
/// averaged by area, then the buoyancy of [`buoyant_force_for_shape`] is added.
///
/// The center of mass of the submerged volume weights the centroid of each
/// tetrahedron of the fan by its volume, instead of weighting triangle
/// barycenters by area. This is the exact centroid of the solid. Both agree
/// for an upright box, but not once it is tilted against the surface.
///
/// Returns `None` if the body isn't dynamic, if there is no water at the box
/// center (even if a corner of the box is under water), or if the submerged
/// volume is vanishingly small.
pub fn submerged_volume_and_forces_for_shape(
    ctx: &BuoyancyContext,
    body: &dyn BuoyantBody,
    leaf: &LeafShape,
    field: &dyn WaterField,
    dt: Real,
) -> Option<ShapeSubmersion> {
    let dynamics = body.dynamics()?;
    // The water normal isn't known yet: balls are aligned with +Z.
    let bx = effective_box(leaf, body.position(), &Vector::z_axis());
    let box_center = bx.world_center();

    let center_sample = field.sample_at(&box_center);

    if center_sample.depth < DEFAULT_EPSILON {
        return None;
    }

    let water_point = Point::new(box_center.x, box_center.y, center_sample.height);
    let water_normal = field.normal_at(&water_point);

    let vertices = bx.world_vertices();
    let underwater = vertices.map(|v| water_normal.dot(&(v - water_point)) < 0.0);
    let ring = find_intersection_ring(&water_point, &water_normal, &vertices);

    // Any point inside the submerged solid works as the common apex of the
    // tetrahedra. Use the average of its vertices.
    let mut reference_sum = Vector::zeros();
    let mut reference_count = 0;

    for (v, _) in vertices.iter().zip(underwater.iter()).filter(|(_, u)| **u) {
        reference_sum += v.coords;
        reference_count += 1;
    }

    let num_edge_points = ring.edge_points.iter().flatten().count();
    reference_sum += ring.centroid.coords * num_edge_points as Real;
    reference_count += num_edge_points;

    if reference_count == 0 {
        return None;
    }

    let reference = Point::from(reference_sum / reference_count as Real);
    let world_com = body.world_com();
    let drag = ctx.config.triangle_drag();
    let mut acc = Accumulator::new();

    for face in &Aabb::FACES {
        let p0 = vertices[face.vertices[0]];
        let p1 = vertices[face.vertices[1]];
        let p2 = vertices[face.vertices[2]];

        if (p1 - p0).norm() * (p2 - p1).norm() < DEFAULT_EPSILON {
            continue;
        }

        // Walk the face counter-clockwise, keeping the plane crossings and the
        // submerged vertices.
        let mut face_points = ArrayVec::<Point<Real>, 8>::new();

        for k in 0..4 {
            if let Some(pt) = ring.edge_point(face.edges[k]) {
                face_points.push(*pt);
            }

            let next = face.vertices[(k + 1) % 4];

            if underwater[next] {
                face_points.push(vertices[next]);
            }
        }

        let Some(face_center) = utils::center(&face_points) else {
            continue;
        };

        let n = face_points.len();

        for i in 0..n {
            let (a, b) = (&face_points[i], &face_points[(i + 1) % n]);
            let tri = integrate_triangle(a, b, &face_center, &reference);

            if tri.area < DEFAULT_EPSILON {
                continue;
            }

            acc.add_tetrahedron(&tri, a, b, &face_center, &reference);

            let water_velocity = field.sample_at(&tri.barycenter).velocity;

            if let Some((force, torque)) = fluid_force_for_triangle(
                drag,
                dt,
                dynamics,
                &world_com,
                &tri,
                &water_velocity,
                &water_normal,
            ) {
                acc.force += force * tri.area;
                acc.torque += torque * tri.area;
            }

            acc.force_weight += tri.area;
        }
    }

    // Close the solid with the polygon cut by the water plane.
    let n = ring.len();

    for i in 0..n {
        let (a, b) = (&ring.points[i], &ring.points[(i + 1) % n]);
        let tri = integrate_triangle(a, b, &ring.centroid, &reference);

        if tri.area >= DEFAULT_EPSILON {
            acc.add_tetrahedron(&tri, a, b, &ring.centroid, &reference);
        }
    }

    if acc.volume <= DEFAULT_EPSILON {
        return None;
    }

    let center_of_mass = Point::from(acc.com / acc.volume);
    let (mut force, mut torque) = if acc.force_weight > DEFAULT_EPSILON {
        (acc.force / acc.force_weight, acc.torque / acc.force_weight)
    } else {
        (Vector::zeros(), Vector::zeros())
    };

    let submerged = SubmergedVolume {
        volume: acc.volume,
        center_of_mass,
    };

    if let Some((buoyant_force, buoyant_torque)) =
        buoyant_force_for_shape(ctx, body, &submerged, &water_normal)
    {
        force += buoyant_force;
        torque += buoyant_torque;
    }

    if let Some(debug) = ctx.debug_renderer() {
        debug.draw_box(bx.local_aabb, bx.transform, SUBMERGED_COLOR);
        debug.draw_arrow(water_point, *water_normal, WATER_COLOR);
        debug.draw_point(reference, WATER_COLOR);
        debug.draw_point(center_of_mass, CENTER_COLOR);
        debug.draw_arrow(center_of_mass, force, FORCE_COLOR);
    }

    Some(ShapeSubmersion {
        water_point,
        water_normal,
        volume: acc.volume,
        center_of_mass,
        force,
        torque,
    })
}

/// Runs [`submerged_volume_and_forces_for_shape`] on every leaf of `body` and sums the results.
///
/// Leaves rejected by the collision filter against `water`, or already in
/// `submerged`, are skipped. Leaves found under water are added to
/// `submerged`. Returns `None` if the total submerged volume is vanishingly
/// small.
pub fn submerged_volume_and_forces_for_body(
    ctx: &BuoyancyContext,
    submerged: &mut SubmergedShapes,
    body: &dyn BuoyantBody,
    water: &WaterBody,
    field: &dyn WaterField,
    dt: Real,
) -> Option<BodySubmersion> {
    let tree = body.geometry()?;
    let mut volume = 0.0;
    let mut weighted_com = Vector::zeros();
    let mut force = Vector::zeros();
    let mut torque = Vector::zeros();

    for leaf in tree.leaves() {
        let instance = tree.instance_for(&leaf);

        if !ctx.filter.does_collide_pair(
            leaf.shape_type,
            &instance,
            water.shape_type,
            &water.instance,
        ) {
            log::trace!(
                "Leaf {} of {:?} filtered out against the water.",
                leaf.leaf_index,
                body.handle()
            );
            continue;
        }

        if submerged.contains(leaf.leaf_index) {
            log::trace!(
                "Leaf {} of {:?} is already submerged.",
                leaf.leaf_index,
                body.handle()
            );
            continue;
        }

        let Some(shape) = submerged_volume_and_forces_for_shape(ctx, body, &leaf, field, dt) else {
            continue;
        };

        if shape.volume > DEFAULT_EPSILON {
            volume += shape.volume;
            weighted_com += shape.center_of_mass.coords * shape.volume;
            force += shape.force;
            torque += shape.torque;
            let _ = submerged.insert(leaf.leaf_index);
        }
    }

    if volume > DEFAULT_EPSILON {
        Some(BodySubmersion {
            volume,
            center_of_mass: Point::from(weighted_com / volume),
            force,
            torque,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use super::{submerged_volume_and_forces_for_body, submerged_volume_and_forces_for_shape};
    use crate::body::{BodyHandle, BuoyantBody, GravityGroups, RigidBodyBuilder};
    use crate::config::BuoyancyConfig;
    use crate::math::{Isometry, Point, Real, Vector};
    use crate::shape::{Ball, Cuboid, ShapeTree};
    use crate::submersion::{BuoyancyContext, SubmergedShapes};
    use crate::water::{FlatWater, WaterBody};
    use approx::assert_relative_eq;

    fn cube_at(z: Real) -> crate::body::RigidBody {
        RigidBodyBuilder::dynamic(BodyHandle(0))
            .geometry(ShapeTree::leaf(Cuboid::new(Vector::repeat(1.0))))
            .density(0.5e-3)
            .translation(Vector::new(0.0, 0.0, z))
            .build()
    }

    #[test]
    fn half_submerged_cube_is_exact() {
        let config = BuoyancyConfig::default();
        let gravity = GravityGroups::new();
        let ctx = BuoyancyContext::new(&config, &gravity);
        let body = cube_at(0.0);
        let leaf = body.geometry().unwrap().leaves().next().unwrap();

        let shape =
            submerged_volume_and_forces_for_shape(&ctx, &body, &leaf, &FlatWater::new(0.0), 1.0 / 60.0)
                .unwrap();

        assert_relative_eq!(shape.volume, 4.0, epsilon = 1.0e-4);
        assert_relative_eq!(shape.center_of_mass, Point::new(0.0, 0.0, -0.5), epsilon = 1.0e-4);
        assert_relative_eq!(shape.water_point, Point::origin(), epsilon = 1.0e-6);
        // Buoyancy only: the body and the water are at rest.
        assert_relative_eq!(shape.force, Vector::new(0.0, 0.0, 1.0e-3 * 4.0 * 980.0), epsilon = 1.0e-3);
        assert_relative_eq!(shape.torque, Vector::zeros(), epsilon = 1.0e-5);
    }

    #[test]
    fn tilted_cube_volume_is_exact() {
        let config = BuoyancyConfig::default();
        let gravity = GravityGroups::new();
        let ctx = BuoyancyContext::new(&config, &gravity);
        let body = RigidBodyBuilder::dynamic(BodyHandle(0))
            .geometry(ShapeTree::leaf(Cuboid::new(Vector::repeat(1.0))))
            .density(0.5e-3)
            .position(Isometry::rotation(Vector::new(0.3, -0.2, 0.5)))
            .build();
        let leaf = body.geometry().unwrap().leaves().next().unwrap();

        // A plane through the center of a cube always halves it.
        let shape =
            submerged_volume_and_forces_for_shape(&ctx, &body, &leaf, &FlatWater::new(0.0), 1.0 / 60.0)
                .unwrap();
        assert_relative_eq!(shape.volume, 4.0, epsilon = 1.0e-4);
    }

    #[test]
    fn center_of_mass_is_the_solid_centroid() {
        let config = BuoyancyConfig::default();
        let gravity = GravityGroups::new();
        let ctx = BuoyancyContext::new(&config, &gravity);
        let body = RigidBodyBuilder::dynamic(BodyHandle(0))
            .geometry(ShapeTree::leaf(Cuboid::new(Vector::repeat(1.0))))
            .density(0.5e-3)
            .position(Isometry::rotation(Vector::new(core::f64::consts::FRAC_PI_4 as Real, 0.0, 0.0)))
            .build();
        let leaf = body.geometry().unwrap().leaves().next().unwrap();

        // The submerged half is a triangular prism with its apex at -sqrt(2).
        // Weighting its faces by area would give -0.414 instead.
        let shape =
            submerged_volume_and_forces_for_shape(&ctx, &body, &leaf, &FlatWater::new(0.0), 1.0 / 60.0)
                .unwrap();
        assert_relative_eq!(shape.volume, 4.0, epsilon = 1.0e-4);
        assert_relative_eq!(
            shape.center_of_mass,
            Point::new(0.0, 0.0, -(2.0 as Real).sqrt() / 3.0),
            epsilon = 1.0e-4
        );
    }

    #[test]
    fn dry_column_is_ignored() {
        let config = BuoyancyConfig::default();
        let gravity = GravityGroups::new();
        let ctx = BuoyancyContext::new(&config, &gravity);
        let body = cube_at(0.5);
        let water = FlatWater::new(0.0).with_depth(0.0);
        let leaf = body.geometry().unwrap().leaves().next().unwrap();

        assert!(submerged_volume_and_forces_for_shape(&ctx, &body, &leaf, &water, 1.0 / 60.0).is_none());
    }

    #[test]
    fn current_drags_the_body_along() {
        let config = BuoyancyConfig::default();
        let gravity = GravityGroups::new();
        let ctx = BuoyancyContext::new(&config, &gravity);
        let body = cube_at(0.0);
        let water = FlatWater::new(0.0).with_velocity(Vector::new(50.0, 0.0, 0.0));
        let mut submerged = SubmergedShapes::new();

        let result = submerged_volume_and_forces_for_body(
            &ctx,
            &mut submerged,
            &body,
            &WaterBody::default(),
            &water,
            1.0 / 60.0,
        )
        .unwrap();

        assert!(result.force.x > 0.0);
        assert!(result.force.z > 0.0);
        assert!(submerged.contains(0));
    }

    #[test]
    fn compound_leaves_are_summed_once() {
        let config = BuoyancyConfig::default();
        let gravity = GravityGroups::new();
        let ctx = BuoyancyContext::new(&config, &gravity);
        let tree = ShapeTree::compound([
            (
                Isometry::translation(-3.0, 0.0, 0.0),
                ShapeTree::leaf(Cuboid::new(Vector::repeat(1.0))),
            ),
            (Isometry::translation(3.0, 0.0, 0.0), ShapeTree::leaf(Ball::new(1.0))),
        ]);
        let body = RigidBodyBuilder::dynamic(BodyHandle(3))
            .geometry(tree)
            .density(0.5e-3)
            .build();
        let water = FlatWater::new(10.0);
        let mut submerged = SubmergedShapes::new();

        let first =
            submerged_volume_and_forces_for_body(&ctx, &mut submerged, &body, &WaterBody::default(), &water, 0.01)
                .unwrap();
        assert_relative_eq!(first.volume, 16.0, epsilon = 1.0e-3);
        assert_relative_eq!(first.center_of_mass, Point::origin(), epsilon = 1.0e-4);
        assert_eq!(submerged.len(), 2);

        let second =
            submerged_volume_and_forces_for_body(&ctx, &mut submerged, &body, &WaterBody::default(), &water, 0.01);
        assert!(second.is_none());
    }
}
