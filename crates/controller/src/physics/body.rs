use glam::Vec3;
use rapier3d::prelude::*;

use super::{CollisionMover, Envelope, PhysicsWorld};

/// Collision view over one kinematic character in a [`PhysicsWorld`].
///
/// The rigid body sits at the envelope center; the feet are at
/// `translation - envelope.center`.
pub struct CharacterBody<'w> {
    world: &'w mut PhysicsWorld,
    handle: RigidBodyHandle,
}

impl<'w> CharacterBody<'w> {
    pub(super) fn new(world: &'w mut PhysicsWorld, handle: RigidBodyHandle) -> Self {
        Self { world, handle }
    }

    pub fn handle(&self) -> RigidBodyHandle {
        self.handle
    }

    pub fn feet_position(&self) -> Option<Vec3> {
        let center = self.envelope().center;
        self.world.body_position(self.handle).map(|pos| pos - center)
    }
}

impl CollisionMover for CharacterBody<'_> {
    fn move_by(&mut self, displacement: Vec3) -> Vec3 {
        let Some(rig) = self.world.characters.get(&self.handle).copied() else {
            return Vec3::ZERO;
        };
        let Some(pose) = self.world.body(self.handle).map(|b| *b.position()) else {
            return Vec3::ZERO;
        };

        let shape = SharedShape::cylinder(rig.envelope.height / 2.0, rig.radius);
        let corrected = self.world.move_character(
            self.handle,
            &shape,
            pose,
            Vector::new(displacement.x, displacement.y, displacement.z),
        );

        let applied = Vec3::new(
            corrected.translation.x,
            corrected.translation.y,
            corrected.translation.z,
        );

        self.world.translate_body(self.handle, applied);
        if let Some(rig) = self.world.characters.get_mut(&self.handle) {
            rig.grounded = corrected.grounded;
        }

        applied
    }

    fn is_grounded(&self) -> bool {
        self.world
            .characters
            .get(&self.handle)
            .is_some_and(|rig| rig.grounded)
    }

    fn envelope(&self) -> Envelope {
        self.world
            .characters
            .get(&self.handle)
            .map(|rig| rig.envelope)
            .unwrap_or_else(|| Envelope::grounded(0.0))
    }

    fn set_envelope(&mut self, envelope: Envelope) {
        self.world.reshape_character(self.handle, envelope);
    }

    fn has_headroom(&self, distance: f32) -> bool {
        const SKIN: f32 = 0.05;

        let Some(feet) = self.feet_position() else {
            return true;
        };

        let origin = feet + Vec3::Y * SKIN;
        self.world
            .raycast_excluding(self.handle, origin, Vec3::Y, (distance - SKIN).max(0.0))
            .is_none()
    }
}
