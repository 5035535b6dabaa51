use approx::assert_relative_eq;
use buoyant3d::body::{BodyHandle, GravityGroups, RigidBody, RigidBodyBuilder};
use buoyant3d::config::{BuoyancyConfig, SubmersionAlgorithm};
use buoyant3d::mass_properties::MassProperties;
use buoyant3d::math::{Isometry, Point, Real, Vector};
use buoyant3d::shape::{Cuboid, ShapeTree};
use buoyant3d::submersion::{
    scale_submerged_volume, submerged_volume, submerged_volume_and_forces_for_body,
    BuoyancyContext, SubmergedShapes,
};
use buoyant3d::water::{FlatWater, WaterBody};

// A 2x2x2 cube, half as dense as water.
fn cube_at(z: Real) -> RigidBody {
    RigidBodyBuilder::dynamic(BodyHandle(0))
        .geometry(ShapeTree::leaf(Cuboid::new(Vector::repeat(1.0))))
        .translation(Vector::new(0.0, 0.0, z))
        .density(0.5e-3)
        .build()
}

fn coarse_config() -> BuoyancyConfig {
    BuoyancyConfig {
        algorithm: SubmersionAlgorithm::Coarse,
        ..Default::default()
    }
}

#[test]
fn fully_submerged_cube() {
    let gravity = GravityGroups::new();
    let water = FlatWater::new(5.0);
    let body = cube_at(0.0);

    let config = coarse_config();
    let ctx = BuoyancyContext::new(&config, &gravity);
    let coarse = submerged_volume(
        &ctx,
        &mut SubmergedShapes::new(),
        &body,
        &WaterBody::default(),
        &water.origin,
        &water.normal,
    )
    .unwrap();
    assert_relative_eq!(coarse.volume, 8.0, epsilon = 1.0e-4);
    assert_relative_eq!(coarse.center_of_mass, Point::origin(), epsilon = 1.0e-4);

    let config = BuoyancyConfig::default();
    let ctx = BuoyancyContext::new(&config, &gravity);
    let precise = submerged_volume_and_forces_for_body(
        &ctx,
        &mut SubmergedShapes::new(),
        &body,
        &WaterBody::default(),
        &water,
        1.0 / 60.0,
    )
    .unwrap();
    assert_relative_eq!(precise.volume, 8.0, epsilon = 1.0e-4);
    assert_relative_eq!(precise.center_of_mass, Point::origin(), epsilon = 1.0e-4);
}

#[test]
fn half_submerged_cube() {
    let gravity = GravityGroups::new();
    let water = FlatWater::new(0.0);
    let body = cube_at(0.0);

    for config in [coarse_config(), BuoyancyConfig::default()] {
        let ctx = BuoyancyContext::new(&config, &gravity);
        let (volume, com) = match config.algorithm {
            SubmersionAlgorithm::Coarse => {
                let res = submerged_volume(
                    &ctx,
                    &mut SubmergedShapes::new(),
                    &body,
                    &WaterBody::default(),
                    &water.origin,
                    &water.normal,
                )
                .unwrap();
                (res.volume, res.center_of_mass)
            }
            SubmersionAlgorithm::Precise => {
                let res = submerged_volume_and_forces_for_body(
                    &ctx,
                    &mut SubmergedShapes::new(),
                    &body,
                    &WaterBody::default(),
                    &water,
                    1.0 / 60.0,
                )
                .unwrap();
                assert!(res.force.z > 0.0);
                (res.volume, res.center_of_mass)
            }
        };

        assert_relative_eq!(volume, 4.0, epsilon = 1.0e-4);
        assert_relative_eq!(com, Point::new(0.0, 0.0, -0.5), epsilon = 1.0e-4);
    }
}

#[test]
fn dry_cube() {
    let gravity = GravityGroups::new();
    let water = FlatWater::new(-5.0);
    let body = cube_at(0.0);
    let mut submerged = SubmergedShapes::new();

    let config = coarse_config();
    let ctx = BuoyancyContext::new(&config, &gravity);
    assert!(submerged_volume(
        &ctx,
        &mut submerged,
        &body,
        &WaterBody::default(),
        &water.origin,
        &water.normal,
    )
    .is_none());

    let config = BuoyancyConfig::default();
    let ctx = BuoyancyContext::new(&config, &gravity);
    assert!(submerged_volume_and_forces_for_body(
        &ctx,
        &mut submerged,
        &body,
        &WaterBody::default(),
        &water,
        1.0 / 60.0,
    )
    .is_none());
    assert!(submerged.is_empty());
}

#[test]
fn precise_volume_is_invariant_under_rotation() {
    let mut rng = oorandom::Rand32::new(1234);
    let config = BuoyancyConfig::default();
    let gravity = GravityGroups::new();
    let ctx = BuoyancyContext::new(&config, &gravity);
    let water = FlatWater::new(0.0);

    for _ in 0..100 {
        let axis_angle = Vector::new(
            rng.rand_float() * 2.0 - 1.0,
            rng.rand_float() * 2.0 - 1.0,
            rng.rand_float() * 2.0 - 1.0,
        ) * 3.0;
        let body = RigidBodyBuilder::dynamic(BodyHandle(0))
            .geometry(ShapeTree::leaf(Cuboid::new(Vector::repeat(1.0))))
            .position(Isometry::new(Vector::zeros(), axis_angle))
            .density(0.5e-3)
            .build();

        let res = submerged_volume_and_forces_for_body(
            &ctx,
            &mut SubmergedShapes::new(),
            &body,
            &WaterBody::default(),
            &water,
            1.0 / 60.0,
        )
        .unwrap();

        // The cube is symmetric around its center, which lies on the water plane.
        assert_relative_eq!(res.volume, 4.0, epsilon = 1.0e-3);
        assert!(res.center_of_mass.z < 0.0);
        assert!(res.force.z > 0.0);
    }
}

#[test]
fn rescaling_is_monotonic_and_bounded() {
    let config = BuoyancyConfig::default();
    let gravity = GravityGroups::new();
    let ctx = BuoyancyContext::new(&config, &gravity);
    // Mass-derived volume of 4, box volume of 8.
    let body = RigidBodyBuilder::dynamic(BodyHandle(0))
        .geometry(ShapeTree::leaf(Cuboid::new(Vector::repeat(1.0))))
        .mass_properties(MassProperties::from_cuboid(0.5, Vector::repeat(1.0)))
        .density(1.0)
        .build();

    let mut last = 0.0;
    for i in 0..=24 {
        let raw = i as Real * 0.5;
        let scaled = scale_submerged_volume(&ctx, &body, raw);
        assert!(scaled.submerged_volume >= last);
        assert!(scaled.submerged_volume <= 4.0 + 1.0e-4);
        assert_relative_eq!(scaled.total_volume, 4.0, epsilon = 1.0e-4);
        last = scaled.submerged_volume;
    }
    assert_relative_eq!(last, 4.0, epsilon = 1.0e-4);
}
