mod body;
mod plane;
mod world;

use glam::Vec3;
use rapier3d::prelude::RigidBodyHandle;

pub use body::CharacterBody;
pub use plane::PlaneMover;
pub use world::PhysicsWorld;

/// Collision shape used to represent the character's body.
///
/// `center` is measured from the feet, so a standing envelope of height 2
/// usually has its center at `(0, 1, 0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub height: f32,
    pub center: Vec3,
}

impl Envelope {
    pub fn new(height: f32, center: Vec3) -> Self {
        Self { height, center }
    }

    /// Envelope resting on the feet: center at half height.
    pub fn grounded(height: f32) -> Self {
        Self::new(height, Vec3::new(0.0, height / 2.0, 0.0))
    }
}

/// Swept movement and ground queries supplied by the host physics.
pub trait CollisionMover {
    /// Moves the body by `displacement` with collision response and returns
    /// the displacement that was actually applied.
    fn move_by(&mut self, displacement: Vec3) -> Vec3;

    fn is_grounded(&self) -> bool;

    fn envelope(&self) -> Envelope;

    /// Called only on crouch/stand transitions.
    fn set_envelope(&mut self, envelope: Envelope);

    /// True if nothing blocks the space `distance` above the feet.
    fn has_headroom(&self, _distance: f32) -> bool {
        true
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PhysicsError {
    #[error("no rigid body for handle {0:?}")]
    MissingBody(RigidBodyHandle),
    #[error("rigid body {0:?} has no collider")]
    MissingCollider(RigidBodyHandle),
}
