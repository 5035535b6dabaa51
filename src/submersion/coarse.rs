use crate::body::BuoyantBody;
use crate::debug::{CENTER_COLOR, SUBMERGED_COLOR};
use crate::math::{Point, Real, UnitVector, Vector, DEFAULT_EPSILON};
use crate::shape::effective_box;
use crate::submersion::{
    scale_submerged_volume, subdivide_bounds_into, submerged_bounds, BuoyancyContext,
    ScaledVolume, SubmergedShapes,
};
use crate::water::WaterBody;

/// The volume of a body under water, and where it is centered.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SubmergedVolume {
    /// The submerged volume.
    pub volume: Real,
    /// The world-space center of the submerged volume.
    pub center_of_mass: Point<Real>,
}

/// Estimates the volume of `body` under the water plane through `water_point` with normal `water_normal`.
///
/// Each leaf accepted by the collision filter against `water` and not yet in
/// `submerged` has its bounding box subdivided (following
/// `max_subdivisions` and `min_subdivision_volume` of the configuration),
/// and every piece is clipped with [`submerged_bounds`]. Leaves with at least
/// one submerged piece are added to `submerged`.
///
/// Returns `None` if the total submerged volume is vanishingly small.
pub fn submerged_volume(
    ctx: &BuoyancyContext,
    submerged: &mut SubmergedShapes,
    body: &dyn BuoyantBody,
    water: &WaterBody,
    water_point: &Point<Real>,
    water_normal: &UnitVector<Real>,
) -> Option<SubmergedVolume> {
    let tree = body.geometry()?;
    let pose = body.position();
    let config = ctx.config;
    let debug = ctx.debug_renderer();

    let mut boxes = Vec::new();
    let mut volume = 0.0;
    let mut weighted_com = Vector::zeros();

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

        let bx = effective_box(&leaf, pose, water_normal);
        let leaf_max_volume = bx.local_aabb.volume() + DEFAULT_EPSILON;

        // Project the shape origin on the water plane to keep the local
        // plane point close to the box.
        let shape_pos = Point::from(bx.transform.translation.vector);
        let shape_diff = shape_pos - water_point;
        let surface_pos = shape_pos - **water_normal * water_normal.dot(&shape_diff);
        let local_surface_pos = bx.transform.inverse_transform_point(&surface_pos);
        let local_normal = bx.transform.inverse_transform_unit_vector(water_normal);

        boxes.clear();
        subdivide_bounds_into(
            &bx.local_aabb,
            config.max_subdivisions,
            config.min_subdivision_volume,
            &mut boxes,
        );

        let mut leaf_submerged = false;

        for sub_box in &boxes {
            let Some(clipped) = submerged_bounds(&local_surface_pos, &local_normal, sub_box)
            else {
                continue;
            };

            let clipped_volume = clipped.volume();
            let clipped_com = bx.transform * clipped.center();

            volume += clipped_volume;
            weighted_com += clipped_com.coords * clipped_volume;
            leaf_submerged = true;

            debug_assert!(
                clipped_volume <= leaf_max_volume,
                "The submerged part of a leaf box exceeds the volume of the box."
            );
            if clipped_volume > leaf_max_volume {
                log::warn!(
                    "Submerged volume {} exceeds the volume {} of leaf {} of {:?}.",
                    clipped_volume,
                    leaf_max_volume,
                    leaf.leaf_index,
                    body.handle()
                );
            }

            if let Some(debug) = debug {
                debug.draw_box(clipped, bx.transform, SUBMERGED_COLOR);
            }
        }

        if leaf_submerged {
            let _ = submerged.insert(leaf.leaf_index);
        }
    }

    if volume > DEFAULT_EPSILON {
        let center_of_mass = Point::from(weighted_com / volume);

        if let Some(debug) = debug {
            debug.draw_point(center_of_mass, CENTER_COLOR);
        }

        Some(SubmergedVolume {
            volume,
            center_of_mass,
        })
    } else {
        None
    }
}

/// Runs [`submerged_volume`], then rescales the result with [`scale_submerged_volume`].
///
/// The returned [`ScaledVolume::total_volume`] is the mass-derived volume of
/// the body, or a negative value if it is unknown.
pub fn submerged_volume_scaled(
    ctx: &BuoyancyContext,
    submerged: &mut SubmergedShapes,
    body: &dyn BuoyantBody,
    water: &WaterBody,
    water_point: &Point<Real>,
    water_normal: &UnitVector<Real>,
) -> Option<(SubmergedVolume, ScaledVolume)> {
    let raw = submerged_volume(ctx, submerged, body, water, water_point, water_normal)?;
    let scaled = scale_submerged_volume(ctx, body, raw.volume);

    Some((
        SubmergedVolume {
            volume: scaled.submerged_volume,
            center_of_mass: raw.center_of_mass,
        },
        scaled,
    ))
}
