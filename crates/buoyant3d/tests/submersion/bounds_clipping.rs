use buoyant3d::bounding_volume::Aabb;
use buoyant3d::math::{Point, Real, UnitVector, Vector};
use buoyant3d::submersion::{subdivide_bounds, submerged_bounds};

fn rand_normal(rng: &mut oorandom::Rand32) -> UnitVector<Real> {
    loop {
        let dir = Vector::new(
            rng.rand_float() * 2.0 - 1.0,
            rng.rand_float() * 2.0 - 1.0,
            rng.rand_float() * 2.0 - 1.0,
        );

        if let Some(normal) = UnitVector::try_new(dir, 1.0e-3) {
            return normal;
        }
    }
}

#[test]
fn subdivision_tiles_the_box() {
    let bounds = Aabb::new(Point::new(-3.0, 0.0, 1.0), Point::new(5.0, 4.0, 9.0));

    for levels in 0..4 {
        let boxes = subdivide_bounds(&bounds, levels, 0.0);
        assert_eq!(boxes.len(), 8usize.pow(levels));

        let total: Real = boxes.iter().map(|b| b.volume()).sum();
        approx::assert_relative_eq!(total, bounds.volume(), max_relative = 1.0e-5);

        let mut hull = Aabb::new_invalid();
        for b in &boxes {
            assert!(bounds.contains(b));
            hull.take_point(b.mins);
            hull.take_point(b.maxs);
        }
        assert_eq!(hull, bounds);
    }
}

#[test]
fn subdivision_without_levels_is_identity() {
    let bounds = Aabb::from_half_extents(Point::new(1.0, 2.0, 3.0), Vector::new(1.0, 2.0, 0.5));
    assert_eq!(subdivide_bounds(&bounds, 0, 0.0), vec![bounds]);
    // Already small enough.
    assert_eq!(subdivide_bounds(&bounds, 3, 1000.0), vec![bounds]);
}

#[test]
fn clipping_grows_with_the_water_level() {
    let mut rng = oorandom::Rand32::new(42);
    let bounds = Aabb::from_half_extents(Point::origin(), Vector::new(1.0, 2.0, 3.0));

    for _ in 0..200 {
        let normal = rand_normal(&mut rng);
        let mut last_volume = 0.0;

        for step in -10..=10 {
            let level = step as Real * 0.5;
            let surface = Point::origin() + *normal * level;
            let volume = submerged_bounds(&surface, &normal, &bounds)
                .map(|clipped| clipped.volume())
                .unwrap_or(0.0);

            assert!(volume <= bounds.volume() * (1.0 + 1.0e-5));

            assert!(
                volume >= last_volume - 1.0e-4,
                "The clipped volume shrank from {last_volume} to {volume} at level {level}."
            );
            last_volume = volume;
        }

        approx::assert_relative_eq!(last_volume, bounds.volume(), max_relative = 1.0e-5);
    }
}
