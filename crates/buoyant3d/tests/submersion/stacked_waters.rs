use approx::assert_relative_eq;
use buoyant3d::body::{BodyHandle, BuoyantBody, GravityGroups, RigidBody, RigidBodyBuilder};
use buoyant3d::config::{BuoyancyConfig, SubmersionAlgorithm};
use buoyant3d::math::{Isometry, Point, Vector};
use buoyant3d::pipeline::{BodyInteractions, BuoyancyOutput, BuoyancyPass, WaterInteraction};
use buoyant3d::shape::{Cuboid, ShapeTree};
use buoyant3d::submersion::BuoyancyContext;
use buoyant3d::water::{FlatWater, WaterBody};

// Two 2x2x2 cubes side by side, centered on the origin.
fn twin_cubes(handle: u64) -> RigidBody {
    let cube = || ShapeTree::leaf(Cuboid::new(Vector::repeat(1.0)));
    RigidBodyBuilder::dynamic(BodyHandle(handle))
        .geometry(ShapeTree::compound([
            (Isometry::translation(-2.0, 0.0, 0.0), cube()),
            (Isometry::translation(2.0, 0.0, 0.0), cube()),
        ]))
        .density(0.5e-3)
        .build()
}

#[test]
fn overlapping_waters_count_each_leaf_once() {
    let gravity = GravityGroups::new();
    let body = twin_cubes(0);
    let surface = FlatWater::new(0.0);
    let flood = FlatWater::new(10.0);

    for algorithm in [SubmersionAlgorithm::Coarse, SubmersionAlgorithm::Precise] {
        let config = BuoyancyConfig {
            algorithm,
            ..Default::default()
        };
        let ctx = BuoyancyContext::new(&config, &gravity);
        // Listed bottom-up: the pass must process the flood first.
        let mut bodies = [BodyInteractions::new(&body)
            .with_water(WaterInteraction::new(WaterBody::default(), &surface, Point::origin()))
            .with_water(WaterInteraction::new(
                WaterBody::default(),
                &flood,
                Point::new(0.0, 0.0, 10.0),
            ))];

        let mut pass = BuoyancyPass::new();
        let results = pass.run(&ctx, 1.0 / 60.0, &mut bodies);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].handle, BodyHandle(0));
        assert_relative_eq!(results[0].submerged_volume, 16.0, epsilon = 1.0e-3);
        assert_relative_eq!(results[0].center_of_mass, Point::origin(), epsilon = 1.0e-3);

        let tracker = pass.tracker();
        assert!(tracker.is_submerged(BodyHandle(0), 0));
        assert!(tracker.is_submerged(BodyHandle(0), 1));
        assert_eq!(tracker.shapes(BodyHandle(0)).map(|s| s.len()), Some(2));
    }
}

#[test]
fn highest_water_takes_every_leaf_it_reaches() {
    let config = BuoyancyConfig::default();
    let gravity = GravityGroups::new();
    let ctx = BuoyancyContext::new(&config, &gravity);
    let body = twin_cubes(4);
    let deep = FlatWater::new(0.5);
    let shallow = FlatWater::new(0.0);

    let mut bodies = [BodyInteractions::new(&body)
        .with_water(WaterInteraction::new(WaterBody::default(), &shallow, Point::origin()))
        .with_water(WaterInteraction::new(WaterBody::default(), &deep, Point::new(2.0, 0.0, 0.5)))];

    let results = BuoyancyPass::new().run(&ctx, 1.0 / 60.0, &mut bodies);
    assert_eq!(results.len(), 1);
    // The deep water is processed first and takes both leaves, 6 each.
    assert_relative_eq!(results[0].submerged_volume, 12.0, epsilon = 1.0e-3);

    match results[0].output {
        BuoyancyOutput::Force { force, torque } => {
            assert!(force.z > 0.0);
            assert_relative_eq!(torque, Vector::zeros(), epsilon = 1.0e-3);
        }
        BuoyancyOutput::VelocityChange(_) => panic!("The precise algorithm outputs forces."),
    }
}

#[test]
fn floating_body_is_pushed_up() {
    let gravity = GravityGroups::new();
    let mut body = twin_cubes(9);
    let water = FlatWater::new(0.5);
    let dt = 1.0 / 60.0;

    for algorithm in [SubmersionAlgorithm::Coarse, SubmersionAlgorithm::Precise] {
        let config = BuoyancyConfig {
            algorithm,
            water_drag: 0.0,
            ..Default::default()
        };
        let ctx = BuoyancyContext::new(&config, &gravity);
        let result = {
            let mut bodies = [BodyInteractions::new(&body).with_water(WaterInteraction::new(
                WaterBody::default(),
                &water,
                Point::new(0.0, 0.0, 0.5),
            ))];
            BuoyancyPass::new().run(&ctx, dt, &mut bodies)[0]
        };

        let before = body.dynamics().map(|d| d.linvel).unwrap_or_else(Vector::zeros);
        result.apply_to(&mut body, dt);
        let after = body.dynamics().map(|d| d.linvel).unwrap_or_else(Vector::zeros);
        assert!(after.z > before.z);
    }
}
