//! The rigid-body side of buoyancy.
//!
//! Buoyancy never owns bodies: it reads them through the [`BuoyantBody`]
//! trait and hands velocity changes or forces back to the host solver. The
//! [`RigidBody`] type is a self-contained implementation of that trait,
//! convenient for hosts that don't have their own body representation and for
//! tests.

pub use self::gravity::{GravityGroups, DEFAULT_GRAVITY};
pub use self::rigid_body::{
    BodyHandle, BuoyantBody, RigidBody, RigidBodyBuilder, RigidBodyType, RigidDynamics,
};

mod gravity;
mod rigid_body;
