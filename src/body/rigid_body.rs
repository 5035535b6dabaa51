use crate::mass_properties::MassProperties;
use crate::math::{AngVector, Isometry, Point, Real, Vector};
use crate::shape::ShapeTree;

/// A stable, opaque identifier of a body.
///
/// Handles must be unique among the bodies processed by one buoyancy pass.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub u64);

/// The velocity state and mass properties of a dynamic body.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RigidDynamics {
    /// The local mass properties of the body.
    pub mass_properties: MassProperties,
    /// The linear velocity of the center of mass.
    pub linvel: Vector<Real>,
    /// The angular velocity.
    pub angvel: AngVector<Real>,
}

impl RigidDynamics {
    /// Dynamics at rest.
    pub fn new(mass_properties: MassProperties) -> Self {
        Self {
            mass_properties,
            linvel: Vector::zeros(),
            angvel: Vector::zeros(),
        }
    }

    /// The velocity of the world-space point `point` if it were attached to a body
    /// with its center of mass at `world_com`.
    #[inline]
    pub fn velocity_at_point(&self, point: &Point<Real>, world_com: &Point<Real>) -> Vector<Real> {
        let dpt = point - world_com;
        self.linvel + self.angvel.cross(&dpt)
    }
}

/// The interface buoyancy needs from a rigid body of the host simulation.
pub trait BuoyantBody: Send + Sync {
    /// The stable identifier of this body.
    fn handle(&self) -> BodyHandle;
    /// The world-space position of the body.
    fn position(&self) -> &Isometry<Real>;
    /// The collision geometry, if the body has any.
    fn geometry(&self) -> Option<&ShapeTree>;
    /// The density of the body's material, if it has a material.
    fn material_density(&self) -> Option<Real>;
    /// The velocity state and mass properties, if this is a dynamic rigid body.
    fn dynamics(&self) -> Option<&RigidDynamics>;
    /// The gravity group of this body.
    fn gravity_group(&self) -> Option<usize>;

    /// The world-space center of mass of this body.
    ///
    /// Bodies without dynamics use their position's origin.
    fn world_com(&self) -> Point<Real> {
        match self.dynamics() {
            Some(dynamics) => dynamics.mass_properties.world_com(self.position()),
            None => Point::from(self.position().translation.vector),
        }
    }
}

/// The simulation status of a [`RigidBody`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RigidBodyType {
    /// A body affected by forces, and thus by buoyancy.
    Dynamic,
    /// A body that never moves.
    Fixed,
    /// A body moved by the user only.
    Kinematic,
}

/// A self-contained rigid body implementing [`BuoyantBody`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct RigidBody {
    handle: BodyHandle,
    body_type: RigidBodyType,
    position: Isometry<Real>,
    geometry: Option<ShapeTree>,
    density: Option<Real>,
    dynamics: RigidDynamics,
    gravity_group: Option<usize>,
}

impl RigidBody {
    /// The simulation status of this body.
    pub fn body_type(&self) -> RigidBodyType {
        self.body_type
    }

    /// Sets the world-space position of this body.
    pub fn set_position(&mut self, position: Isometry<Real>) {
        self.position = position;
    }

    /// Sets the linear velocity of this body.
    pub fn set_linvel(&mut self, linvel: Vector<Real>) {
        self.dynamics.linvel = linvel;
    }

    /// Sets the angular velocity of this body.
    pub fn set_angvel(&mut self, angvel: AngVector<Real>) {
        self.dynamics.angvel = angvel;
    }

    /// Adds a velocity change to the velocity of this body.
    ///
    /// Does nothing if the body isn't dynamic.
    pub fn apply_velocity_change(&mut self, linvel: Vector<Real>, angvel: AngVector<Real>) {
        if self.body_type == RigidBodyType::Dynamic {
            self.dynamics.linvel += linvel;
            self.dynamics.angvel += angvel;
        }
    }
}

impl BuoyantBody for RigidBody {
    fn handle(&self) -> BodyHandle {
        self.handle
    }

    fn position(&self) -> &Isometry<Real> {
        &self.position
    }

    fn geometry(&self) -> Option<&ShapeTree> {
        self.geometry.as_ref()
    }

    fn material_density(&self) -> Option<Real> {
        self.density
    }

    fn dynamics(&self) -> Option<&RigidDynamics> {
        match self.body_type {
            RigidBodyType::Dynamic => Some(&self.dynamics),
            RigidBodyType::Fixed | RigidBodyType::Kinematic => None,
        }
    }

    fn gravity_group(&self) -> Option<usize> {
        self.gravity_group
    }
}

/// A builder of [`RigidBody`].
///
/// Unless explicit mass properties are given, they are computed from the
/// geometry and the material density.
#[derive(Clone, Debug)]
#[must_use = "Builder functions return the updated builder"]
pub struct RigidBodyBuilder {
    handle: BodyHandle,
    body_type: RigidBodyType,
    position: Isometry<Real>,
    geometry: Option<ShapeTree>,
    density: Option<Real>,
    mass_properties: Option<MassProperties>,
    linvel: Vector<Real>,
    angvel: AngVector<Real>,
    gravity_group: Option<usize>,
}

impl RigidBodyBuilder {
    /// Initialize a new builder for a rigid body of the given type.
    pub fn new(handle: BodyHandle, body_type: RigidBodyType) -> Self {
        Self {
            handle,
            body_type,
            position: Isometry::identity(),
            geometry: None,
            density: None,
            mass_properties: None,
            linvel: Vector::zeros(),
            angvel: Vector::zeros(),
            gravity_group: None,
        }
    }

    /// Initializes the builder of a new dynamic rigid body.
    pub fn dynamic(handle: BodyHandle) -> Self {
        Self::new(handle, RigidBodyType::Dynamic)
    }

    /// Initializes the builder of a new fixed rigid body.
    pub fn fixed(handle: BodyHandle) -> Self {
        Self::new(handle, RigidBodyType::Fixed)
    }

    /// Initializes the builder of a new kinematic rigid body.
    pub fn kinematic(handle: BodyHandle) -> Self {
        Self::new(handle, RigidBodyType::Kinematic)
    }

    /// Sets the initial world-space position of the rigid body.
    pub fn position(mut self, pos: Isometry<Real>) -> Self {
        self.position = pos;
        self
    }

    /// Sets the initial translation of the rigid body.
    pub fn translation(mut self, translation: Vector<Real>) -> Self {
        self.position.translation.vector = translation;
        self
    }

    /// Sets the collision geometry of the rigid body.
    pub fn geometry(mut self, geometry: ShapeTree) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Sets the material density of the rigid body.
    pub fn density(mut self, density: Real) -> Self {
        self.density = Some(density);
        self
    }

    /// Overrides the mass properties computed from geometry and density.
    pub fn mass_properties(mut self, props: MassProperties) -> Self {
        self.mass_properties = Some(props);
        self
    }

    /// Sets the initial linear velocity of the rigid body.
    pub fn linvel(mut self, linvel: Vector<Real>) -> Self {
        self.linvel = linvel;
        self
    }

    /// Sets the initial angular velocity of the rigid body.
    pub fn angvel(mut self, angvel: AngVector<Real>) -> Self {
        self.angvel = angvel;
        self
    }

    /// Sets the gravity group of the rigid body.
    pub fn gravity_group(mut self, group: usize) -> Self {
        self.gravity_group = Some(group);
        self
    }

    /// Builds the rigid body.
    pub fn build(self) -> RigidBody {
        let mass_properties = self.mass_properties.unwrap_or_else(|| {
            match (self.geometry.as_ref(), self.density) {
                (Some(geometry), Some(density)) => {
                    MassProperties::from_shape_tree(density, geometry)
                }
                _ => num::Zero::zero(),
            }
        });

        RigidBody {
            handle: self.handle,
            body_type: self.body_type,
            position: self.position,
            geometry: self.geometry,
            density: self.density,
            dynamics: RigidDynamics {
                mass_properties,
                linvel: self.linvel,
                angvel: self.angvel,
            },
            gravity_group: self.gravity_group,
        }
    }
}

impl From<RigidBodyBuilder> for RigidBody {
    fn from(val: RigidBodyBuilder) -> RigidBody {
        val.build()
    }
}
