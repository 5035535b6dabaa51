use crate::body::{BodyHandle, BuoyantBody, RigidBody};
use crate::config::SubmersionAlgorithm;
use crate::math::{AngVector, Point, Real, Vector, DEFAULT_EPSILON};
use crate::pipeline::BodyInteractions;
use crate::submersion::{
    buoyant_velocity_change, submerged_volume_and_forces_for_body, submerged_volume_scaled,
    BuoyancyContext, SubmergedShapes, SubmersionTracker, VelocityChange,
};
use crate::water::WaterContact;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Required by `BuoyancyPass::run_parallel`.
static_assertions::assert_impl_all!(BuoyancyContext<'static>: Send, Sync);
static_assertions::assert_impl_all!(BodyInteractions<'static>: Send, Sync);
static_assertions::assert_impl_all!(SubmergedShapes: Send);

/// What the water does to a body during one step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BuoyancyOutput {
    /// A velocity change to add directly to the body (coarse algorithm).
    VelocityChange(VelocityChange),
    /// A force and a torque around the body's center of mass (precise algorithm).
    Force {
        /// The total force.
        force: Vector<Real>,
        /// The total torque.
        torque: AngVector<Real>,
    },
}

/// The buoyancy of one body for one step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BodyBuoyancy {
    /// The body this result applies to.
    pub handle: BodyHandle,
    /// The submerged volume, summed over every water body.
    pub submerged_volume: Real,
    /// The world-space center of the submerged volume.
    pub center_of_mass: Point<Real>,
    /// The effect of the water on the body.
    pub output: BuoyancyOutput,
}

impl BodyBuoyancy {
    /// This result expressed as a velocity change of `body` over `dt`.
    ///
    /// Returns `None` if a force has to be converted and `body` isn't dynamic.
    pub fn velocity_change(&self, body: &dyn BuoyantBody, dt: Real) -> Option<VelocityChange> {
        match self.output {
            BuoyancyOutput::VelocityChange(change) => Some(change),
            BuoyancyOutput::Force { force, torque } => {
                let props = &body.dynamics()?.mass_properties;
                let world_inv_inertia = props.world_inv_inertia(&body.position().rotation);
                Some(VelocityChange {
                    linvel: force * props.inv_mass * dt,
                    angvel: world_inv_inertia * torque * dt,
                })
            }
        }
    }

    /// Adds the velocity change of this result to `body`.
    ///
    /// Does nothing if `body` isn't dynamic.
    pub fn apply_to(&self, body: &mut RigidBody, dt: Real) {
        if let Some(change) = self.velocity_change(body, dt) {
            body.apply_velocity_change(change.linvel, change.angvel);
        }
    }
}

/// Evaluates the buoyancy of one body against all the water bodies it touches.
///
/// The water bodies are processed in the order of `interactions.waters`,
/// which should be sorted with [`BodyInteractions::sort_waters`] first. Leaves
/// already in `submerged` are skipped, and the leaves found under water are
/// added to it.
///
/// Returns `None` if no part of the body is under water.
pub fn evaluate_body(
    ctx: &BuoyancyContext,
    submerged: &mut SubmergedShapes,
    interactions: &BodyInteractions,
    dt: Real,
) -> Option<BodyBuoyancy> {
    let body = interactions.body;
    let mut volume = 0.0;
    let mut weighted_com = Vector::zeros();

    let output = match ctx.config.algorithm {
        SubmersionAlgorithm::Coarse => {
            let mut linvel = Vector::zeros();
            let mut angvel = Vector::zeros();

            for interaction in &interactions.waters {
                let contact = WaterContact::sample(interaction.field, &interaction.closest_point);

                if contact.depth < DEFAULT_EPSILON {
                    log::trace!("No water column under {:?}.", body.handle());
                    continue;
                }

                let Some((part, _)) = submerged_volume_scaled(
                    ctx,
                    submerged,
                    body,
                    &interaction.water,
                    &contact.point,
                    &contact.normal,
                ) else {
                    continue;
                };

                volume += part.volume;
                weighted_com += part.center_of_mass.coords * part.volume;

                if let Some(change) = buoyant_velocity_change(
                    ctx,
                    body,
                    dt,
                    &part,
                    &contact.velocity,
                    &contact.normal,
                ) {
                    linvel += change.linvel;
                    angvel += change.angvel;
                }
            }

            BuoyancyOutput::VelocityChange(VelocityChange { linvel, angvel })
        }
        SubmersionAlgorithm::Precise => {
            let mut force = Vector::zeros();
            let mut torque = Vector::zeros();

            for interaction in &interactions.waters {
                let Some(part) = submerged_volume_and_forces_for_body(
                    ctx,
                    submerged,
                    body,
                    &interaction.water,
                    interaction.field,
                    dt,
                ) else {
                    continue;
                };

                volume += part.volume;
                weighted_com += part.center_of_mass.coords * part.volume;
                force += part.force;
                torque += part.torque;
            }

            BuoyancyOutput::Force { force, torque }
        }
    };

    (volume > DEFAULT_EPSILON).then(|| BodyBuoyancy {
        handle: body.handle(),
        submerged_volume: volume,
        center_of_mass: Point::from(weighted_com / volume),
        output,
    })
}

/// Runs buoyancy for every body touching water, once per step.
///
/// The pass owns the [`SubmersionTracker`] so that the set of submerged
/// leaves of a body persists across all its water contacts of one step, and
/// is reset at the beginning of the next one.
#[derive(Clone, Debug, Default)]
pub struct BuoyancyPass {
    tracker: SubmersionTracker,
}

impl BuoyancyPass {
    /// A pass that has seen no body yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The submerged leaves found by the last run.
    pub fn tracker(&self) -> &SubmersionTracker {
        &self.tracker
    }

    /// Evaluates the buoyancy of every body of `bodies` for a step of length `dt`.
    ///
    /// The water bodies of each body are sorted top-down first. Bodies with
    /// nothing under water produce no result; the others produce one result
    /// each, in the order of `bodies`.
    pub fn run(
        &mut self,
        ctx: &BuoyancyContext,
        dt: Real,
        bodies: &mut [BodyInteractions],
    ) -> Vec<BodyBuoyancy> {
        self.tracker.reset();
        let mut results = Vec::with_capacity(bodies.len());

        for interactions in bodies.iter_mut() {
            interactions.sort_waters();
            let submerged = self.tracker.shapes_mut(interactions.body.handle());

            if let Some(result) = evaluate_body(ctx, submerged, interactions, dt) {
                results.push(result);
            }
        }

        log::debug!(
            "Buoyancy pass: {} of {} bodies under water.",
            results.len(),
            bodies.len()
        );
        results
    }

    /// Same as [`BuoyancyPass::run`], evaluating bodies in parallel.
    ///
    /// Each body handle must appear at most once in `bodies`: the submerged
    /// leaves of a body are moved out of the tracker for the duration of its
    /// evaluation.
    #[cfg(feature = "parallel")]
    pub fn run_parallel(
        &mut self,
        ctx: &BuoyancyContext,
        dt: Real,
        bodies: &mut [BodyInteractions],
    ) -> Vec<BodyBuoyancy> {
        self.tracker.reset();
        let mut slots: Vec<_> = bodies
            .iter()
            .map(|interactions| self.tracker.take_shapes(interactions.body.handle()))
            .collect();

        let results: Vec<_> = bodies
            .par_iter_mut()
            .zip(slots.par_iter_mut())
            .map(|(interactions, submerged)| {
                interactions.sort_waters();
                evaluate_body(ctx, submerged, interactions, dt)
            })
            .collect();

        for (interactions, submerged) in bodies.iter().zip(slots) {
            self.tracker
                .restore_shapes(interactions.body.handle(), submerged);
        }

        let results: Vec<_> = results.into_iter().flatten().collect();
        log::debug!(
            "Parallel buoyancy pass: {} of {} bodies under water.",
            results.len(),
            bodies.len()
        );
        results
    }
}

#[cfg(test)]
mod test {
    use super::{evaluate_body, BuoyancyOutput, BuoyancyPass};
    use crate::body::{BodyHandle, BuoyantBody, GravityGroups, RigidBodyBuilder};
    use crate::config::{BuoyancyConfig, SubmersionAlgorithm};
    use crate::math::{Point, Vector};
    use crate::pipeline::{BodyInteractions, WaterInteraction};
    use crate::shape::{Cuboid, ShapeTree};
    use crate::submersion::{BuoyancyContext, SubmergedShapes};
    use crate::water::{FlatWater, WaterBody};
    use approx::assert_relative_eq;

    fn cube(handle: u64) -> crate::body::RigidBody {
        RigidBodyBuilder::dynamic(BodyHandle(handle))
            .geometry(ShapeTree::leaf(Cuboid::new(Vector::repeat(1.0))))
            .density(0.5e-3)
            .build()
    }

    #[test]
    fn coarse_half_submerged_cube() {
        let config = BuoyancyConfig {
            algorithm: SubmersionAlgorithm::Coarse,
            water_drag: 0.0,
            ..Default::default()
        };
        let gravity = GravityGroups::new();
        let ctx = BuoyancyContext::new(&config, &gravity);
        let body = cube(0);
        let water = FlatWater::new(0.0);
        let interactions = BodyInteractions::new(&body).with_water(WaterInteraction::new(
            WaterBody::default(),
            &water,
            Point::origin(),
        ));

        let mut submerged = SubmergedShapes::new();
        let result = evaluate_body(&ctx, &mut submerged, &interactions, 0.1).unwrap();
        assert_relative_eq!(result.submerged_volume, 4.0, epsilon = 1.0e-4);
        assert_relative_eq!(result.center_of_mass.z, -0.5, epsilon = 1.0e-4);

        match result.output {
            BuoyancyOutput::VelocityChange(change) => assert!(change.linvel.z > 0.0),
            BuoyancyOutput::Force { .. } => panic!("The coarse algorithm outputs velocity changes."),
        }
    }

    #[test]
    fn stacked_waters_count_each_leaf_once() {
        let config = BuoyancyConfig::default();
        let gravity = GravityGroups::new();
        let ctx = BuoyancyContext::new(&config, &gravity);
        let body = cube(0);
        let high = FlatWater::new(10.0);
        let low = FlatWater::new(0.0);
        let mut bodies = [BodyInteractions::new(&body)
            .with_water(WaterInteraction::new(WaterBody::default(), &low, Point::origin()))
            .with_water(WaterInteraction::new(
                WaterBody::default(),
                &high,
                Point::new(0.0, 0.0, 10.0),
            ))];

        let mut pass = BuoyancyPass::new();
        let results = pass.run(&ctx, 1.0 / 60.0, &mut bodies);
        assert_eq!(results.len(), 1);
        // Fully under the high water, which is processed first.
        assert_relative_eq!(results[0].submerged_volume, 8.0, epsilon = 1.0e-3);
        assert!(pass.tracker().is_submerged(BodyHandle(0), 0));

        // The next run starts from a clean tracker.
        let again = pass.run(&ctx, 1.0 / 60.0, &mut bodies);
        assert_eq!(again, results);
    }

    #[test]
    fn dry_bodies_produce_nothing() {
        let config = BuoyancyConfig::default();
        let gravity = GravityGroups::new();
        let ctx = BuoyancyContext::new(&config, &gravity);
        let body = cube(3);
        let water = FlatWater::new(-10.0);
        let mut bodies = [BodyInteractions::new(&body).with_water(WaterInteraction::new(
            WaterBody::default(),
            &water,
            Point::new(0.0, 0.0, -10.0),
        ))];

        let mut pass = BuoyancyPass::new();
        assert!(pass.run(&ctx, 1.0 / 60.0, &mut bodies).is_empty());
        assert_eq!(pass.tracker().num_bodies(), 1);
        assert!(!pass.tracker().is_submerged(BodyHandle(3), 0));
    }

    #[test]
    fn precise_force_lifts_the_body() {
        let config = BuoyancyConfig {
            water_drag: 0.0,
            ..Default::default()
        };
        let gravity = GravityGroups::new();
        let ctx = BuoyancyContext::new(&config, &gravity);
        let mut body = cube(1);
        let water = FlatWater::new(0.0);
        let result = {
            let mut bodies = [BodyInteractions::new(&body).with_water(WaterInteraction::new(
                WaterBody::default(),
                &water,
                Point::origin(),
            ))];
            BuoyancyPass::new().run(&ctx, 0.1, &mut bodies)[0]
        };

        let dt = 0.1;
        let change = result.velocity_change(&body, dt).unwrap();
        assert!(change.linvel.z > 0.0);

        result.apply_to(&mut body, dt);
        assert_relative_eq!(body.dynamics().unwrap().linvel, change.linvel);
    }

    #[cfg(feature = "parallel")]
    fn interactions<'a>(
        bodies: &'a [crate::body::RigidBody],
        water: &'a FlatWater,
    ) -> Vec<BodyInteractions<'a>> {
        bodies
            .iter()
            .map(|body| {
                BodyInteractions::new(body).with_water(WaterInteraction::new(
                    WaterBody::default(),
                    water,
                    body.world_com(),
                ))
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_run_matches_sequential_run() {
        use crate::math::Real;

        let config = BuoyancyConfig::default();
        let gravity = GravityGroups::new();
        let ctx = BuoyancyContext::new(&config, &gravity);
        let water = FlatWater::new(0.0);
        let bodies: Vec<_> = (0..16u64)
            .map(|i| {
                RigidBodyBuilder::dynamic(BodyHandle(i))
                    .geometry(ShapeTree::leaf(Cuboid::new(Vector::repeat(1.0))))
                    .translation(Vector::new(i as Real * 3.0, 0.0, i as Real * 0.1 - 0.8))
                    .density(0.5e-3)
                    .build()
            })
            .collect();

        let sequential = BuoyancyPass::new().run(&ctx, 0.1, &mut interactions(&bodies, &water));
        let mut pass = BuoyancyPass::new();
        let parallel = pass.run_parallel(&ctx, 0.1, &mut interactions(&bodies, &water));
        assert_eq!(sequential, parallel);
        assert_eq!(pass.tracker().num_bodies(), 16);
    }
}
