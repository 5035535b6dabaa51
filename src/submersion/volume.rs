use crate::body::BuoyantBody;
use crate::math::{Real, DEFAULT_EPSILON};
use crate::query::CollisionFilter;
use crate::submersion::BuoyancyContext;

/// The volume reported when it can't be determined.
///
/// Every negative volume means "unknown", never "zero".
pub const UNKNOWN_VOLUME: Real = -1.0;

/// A submerged volume after rescaling, with the total volume of its body.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScaledVolume {
    /// The rescaled submerged volume.
    pub submerged_volume: Real,
    /// The volume of the body derived from its mass and density.
    pub total_volume: Real,
}

/// The theoretical volume of a body: its mass divided by its material density.
///
/// Returns `0` if the density is vanishingly small, and [`UNKNOWN_VOLUME`] if
/// the body isn't dynamic or has no material.
pub fn particle_volume(body: &dyn BuoyantBody) -> Real {
    let (Some(dynamics), Some(density)) = (body.dynamics(), body.material_density()) else {
        return UNKNOWN_VOLUME;
    };

    if density > DEFAULT_EPSILON {
        dynamics.mass_properties.mass() / density
    } else {
        0.0
    }
}

/// The sum of the local bounding-box volumes of the leaves of `body` accepted by `filter`.
///
/// This is the largest submerged volume the coarse algorithm can report for
/// this body. Returns [`UNKNOWN_VOLUME`] if the body has no geometry.
pub fn shape_volume(body: &dyn BuoyantBody, filter: &dyn CollisionFilter) -> Real {
    let Some(tree) = body.geometry().filter(|tree| !tree.is_empty()) else {
        return UNKNOWN_VOLUME;
    };

    tree.leaves()
        .filter(|leaf| filter.does_collide(leaf.shape_type, &tree.instance_for(leaf)))
        .map(|leaf| leaf.shape.local_aabb().volume())
        .sum()
}

/// Rescales a submerged volume computed from bounding boxes toward the body's mass-derived volume.
///
/// The volume is first clamped to the [`shape_volume`] of the body. Then, if
/// both the [`particle_volume`] and the shape volume are known and positive,
/// it is multiplied by their ratio. Unless
/// `allow_volume_ratio_over_one` is set, this only happens when the ratio
/// is below one, so the volume can only shrink.
pub fn scale_submerged_volume(
    ctx: &BuoyancyContext,
    body: &dyn BuoyantBody,
    submerged_volume: Real,
) -> ScaledVolume {
    let particle_vol = particle_volume(body);
    let shape_vol = shape_volume(body, ctx.filter);
    let mut submerged_volume = submerged_volume;

    if shape_vol >= 0.0 && submerged_volume - shape_vol > DEFAULT_EPSILON {
        submerged_volume = shape_vol;
    }

    if particle_vol > DEFAULT_EPSILON
        && shape_vol > DEFAULT_EPSILON
        && (ctx.config.allow_volume_ratio_over_one || particle_vol < shape_vol)
    {
        submerged_volume *= particle_vol / shape_vol;
    }

    ScaledVolume {
        submerged_volume,
        total_volume: particle_vol,
    }
}
