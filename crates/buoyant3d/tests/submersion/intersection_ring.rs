use buoyant3d::bounding_volume::Aabb;
use buoyant3d::math::{Point, Real, UnitVector, Vector};
use buoyant3d::submersion::{find_intersection_ring, integrate_triangle};

#[test]
fn random_cuts_yield_convex_rings() {
    let mut rng = oorandom::Rand32::new(7);
    let bounds = Aabb::from_half_extents(Point::origin(), Vector::new(1.0, 1.5, 0.75));
    let vertices = bounds.vertices();

    for _ in 0..1000 {
        let dir = Vector::new(
            rng.rand_float() * 2.0 - 1.0,
            rng.rand_float() * 2.0 - 1.0,
            rng.rand_float() * 2.0 - 1.0,
        );
        let Some(normal) = UnitVector::try_new(dir, 1.0e-3) else {
            continue;
        };
        // A point strictly inside the box, so the plane always cuts it.
        let water_point = Point::new(
            (rng.rand_float() * 2.0 - 1.0) * 0.9,
            (rng.rand_float() * 2.0 - 1.0) * 1.35,
            (rng.rand_float() * 2.0 - 1.0) * 0.675,
        );

        let ring = find_intersection_ring(&water_point, &normal, &vertices);
        assert!(
            (3..=6).contains(&ring.len()),
            "A plane cut a box along {} points.",
            ring.len()
        );

        let mut area: Real = 0.0;
        for i in 0..ring.len() {
            let a = ring.points[i] - ring.centroid;
            let b = ring.points[(i + 1) % ring.len()] - ring.centroid;
            let signed = normal.dot(&a.cross(&b)) * 0.5;
            assert!(signed >= -1.0e-5, "The ring isn't counter-clockwise.");
            area += signed;
        }
        assert!(area > 0.0);

        for pt in &ring.points {
            approx::assert_relative_eq!(normal.dot(&(pt - water_point)), 0.0, epsilon = 1.0e-4);
        }
    }
}

#[test]
fn triangle_fan_of_a_ring_matches_its_area() {
    let vertices = Aabb::from_half_extents(Point::origin(), Vector::repeat(1.0)).vertices();
    let ring = find_intersection_ring(&Point::new(0.0, 0.0, 0.25), &Vector::z_axis(), &vertices);
    assert_eq!(ring.len(), 4);

    let below = Point::new(0.0, 0.0, -0.75);
    let (mut area, mut volume) = (0.0, 0.0);

    for i in 0..ring.len() {
        let tri = integrate_triangle(
            &ring.points[i],
            &ring.points[(i + 1) % ring.len()],
            &ring.centroid,
            &below,
        );
        assert!(tri.area >= 0.0 && tri.volume >= 0.0);
        approx::assert_relative_eq!(tri.normal, Vector::z(), epsilon = 1.0e-5);
        area += tri.area;
        volume += tri.volume;
    }

    approx::assert_relative_eq!(area, 4.0, epsilon = 1.0e-4);
    // Pyramid of base 4 and height 1.
    approx::assert_relative_eq!(volume, 4.0 / 3.0, epsilon = 1.0e-4);
}
