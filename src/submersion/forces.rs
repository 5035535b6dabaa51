use crate::body::{BuoyantBody, RigidDynamics};
use crate::math::{AngVector, Point, Real, UnitVector, Vector, DEFAULT_EPSILON};
use crate::submersion::{scale_submerged_volume, BuoyancyContext, SubmergedVolume, TriangleIntegral};

/// A change of velocity to add to a rigid body.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VelocityChange {
    /// The change of linear velocity.
    pub linvel: Vector<Real>,
    /// The change of angular velocity.
    pub angvel: AngVector<Real>,
}

// Buoyancy always pushes against -Z, whatever the gravity direction.
#[inline]
fn gravity_along_down(gravity: &Vector<Real>) -> Real {
    -gravity.z
}

/// The velocity change of `body` caused by buoyancy and water drag during `dt`.
///
/// The Archimedes force `water_density * volume * gravity` is applied along
/// `water_normal` at the submerged center of mass, and integrated over `dt`.
/// Drag then pulls the velocity of the submerged center of mass toward
/// `water_velocity`, and the angular velocity toward zero, by a factor
/// `1 - water_drag * dt` clamped to `[0, 1]`.
///
/// Returns `None` if the buoyant force is vanishingly small or the body isn't dynamic.
pub fn buoyant_velocity_change(
    ctx: &BuoyancyContext,
    body: &dyn BuoyantBody,
    dt: Real,
    submerged: &SubmergedVolume,
    water_velocity: &Vector<Real>,
    water_normal: &UnitVector<Real>,
) -> Option<VelocityChange> {
    let dynamics = body.dynamics()?;
    let gravity = ctx.gravity.acceleration(body.gravity_group());
    let buoyant_force = ctx.config.water_density * submerged.volume * gravity_along_down(&gravity);

    if buoyant_force < DEFAULT_EPSILON {
        return None;
    }

    let props = &dynamics.mass_properties;
    let world_com = body.world_com();
    let com_diff = submerged.center_of_mass - world_com;
    let world_inv_inertia = props.world_inv_inertia(&body.position().rotation);

    let force = **water_normal * buoyant_force;
    let torque = com_diff.cross(&force);

    let linvel = force * props.inv_mass * dt;
    let angvel = world_inv_inertia * torque * dt;

    let submerged_velocity = dynamics.linvel + dynamics.angvel.cross(&com_diff);
    let relative_velocity = submerged_velocity - water_velocity;
    let drag_factor = (1.0 - ctx.config.water_drag * dt).max(0.0);

    Some(VelocityChange {
        linvel: linvel * drag_factor + relative_velocity * (drag_factor - 1.0),
        angvel: angvel * drag_factor + dynamics.angvel * (drag_factor - 1.0),
    })
}

/// The drag force and torque applied by the water on one submerged triangle of a body surface.
///
/// The force matches, over `dt`, the velocity of the body at the triangle
/// barycenter with the water velocity projected on the water plane. It is
/// attenuated by how much the flow faces the triangle (back faces get
/// nothing) and multiplied by `drag`.
///
/// Returns `None` if the relative velocity is vanishingly small or `dt` is zero.
pub fn fluid_force_for_triangle(
    drag: Real,
    dt: Real,
    dynamics: &RigidDynamics,
    world_com: &Point<Real>,
    triangle: &TriangleIntegral,
    water_velocity: &Vector<Real>,
    water_normal: &UnitVector<Real>,
) -> Option<(Vector<Real>, AngVector<Real>)> {
    if dt <= DEFAULT_EPSILON {
        return None;
    }

    let com_to_triangle = triangle.barycenter - world_com;
    let water_velocity_on_plane = water_velocity - **water_normal * water_normal.dot(water_velocity);
    let body_velocity = dynamics.velocity_at_point(&triangle.barycenter, world_com);
    let relative_velocity = water_velocity_on_plane - body_velocity;
    let relative_speed = relative_velocity.norm();

    if relative_speed < DEFAULT_EPSILON {
        return None;
    }

    let facing = (relative_velocity.dot(&-triangle.normal) / relative_speed).max(0.0);
    let force = relative_velocity / dt * dynamics.mass_properties.mass() * facing * drag;
    let torque = com_to_triangle.cross(&force);

    Some((force, torque))
}

/// The Archimedes force and torque applied on a body by one of its submerged shapes.
///
/// The volume is first rescaled with [`scale_submerged_volume`], so the
/// force stays consistent with the body's mass-derived volume. The force is
/// applied along `water_normal` at the submerged center of mass.
///
/// Returns `None` if the force is vanishingly small.
pub fn buoyant_force_for_shape(
    ctx: &BuoyancyContext,
    body: &dyn BuoyantBody,
    submerged: &SubmergedVolume,
    water_normal: &UnitVector<Real>,
) -> Option<(Vector<Real>, AngVector<Real>)> {
    let gravity = ctx.gravity.acceleration(body.gravity_group());
    let scaled = scale_submerged_volume(ctx, body, submerged.volume);
    let magnitude =
        ctx.config.water_density * scaled.submerged_volume * gravity_along_down(&gravity);

    if magnitude < DEFAULT_EPSILON {
        return None;
    }

    let force = **water_normal * magnitude;
    let torque = (submerged.center_of_mass - body.world_com()).cross(&force);

    Some((force, torque))
}
