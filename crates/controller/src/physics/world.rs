use std::collections::HashMap;

use glam::Vec3;
use rapier3d::control::{
    CharacterAutostep, CharacterLength, EffectiveCharacterMovement, KinematicCharacterController,
};
use rapier3d::prelude::*;

use super::{CharacterBody, Envelope, PhysicsError};

/// Per-body data the character view needs between frames.
#[derive(Debug, Clone, Copy)]
pub(super) struct CharacterRig {
    pub radius: Real,
    pub envelope: Envelope,
    pub grounded: bool,
}

pub struct PhysicsWorld {
    pipeline: PhysicsPipeline,
    integration_parameters: IntegrationParameters,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    gravity: Vector,
    character_controller: KinematicCharacterController,
    pub(super) characters: HashMap<RigidBodyHandle, CharacterRig>,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    const TICK_RATE: Real = 1.0 / 60.0;

    pub fn new() -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = Self::TICK_RATE;
        integration_parameters.min_ccd_dt = Self::TICK_RATE / 100.0;

        let mut character_controller = KinematicCharacterController::default();
        character_controller.offset = CharacterLength::Absolute(0.02);
        character_controller.up = Vector::Y;
        character_controller.max_slope_climb_angle = 50_f32.to_radians();
        character_controller.min_slope_slide_angle = 35_f32.to_radians();
        character_controller.snap_to_ground = Some(CharacterLength::Absolute(0.2));
        character_controller.autostep = Some(CharacterAutostep {
            max_height: CharacterLength::Absolute(0.35),
            min_width: CharacterLength::Absolute(0.15),
            include_dynamic_bodies: false,
        });

        Self {
            pipeline: PhysicsPipeline::new(),
            integration_parameters,
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            gravity: Vector::new(0.0, -9.81, 0.0),
            character_controller,
            characters: HashMap::new(),
        }
    }

    /// Sets the step size used by `step` and by swept character moves.
    pub fn set_dt(&mut self, dt: Real) {
        self.integration_parameters.dt = dt;
        self.integration_parameters.min_ccd_dt = dt / 100.0;
    }

    /// Advances the simulation. Colliders added since the last step only
    /// become visible to queries after this runs.
    pub fn step(&mut self) {
        self.pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    /// Spawns a kinematic character whose feet rest at `feet`.
    pub fn add_player(&mut self, feet: Vec3, radius: Real, height: Real) -> RigidBodyHandle {
        let envelope = Envelope::grounded(height);
        let origin = feet + envelope.center;

        let body = RigidBodyBuilder::kinematic_position_based()
            .translation(Vector::new(origin.x, origin.y, origin.z))
            .lock_rotations()
            .build();

        let handle = self.bodies.insert(body);

        let collider = ColliderBuilder::cylinder(height / 2.0, radius)
            .friction(0.0)
            .build();

        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        self.characters.insert(
            handle,
            CharacterRig {
                radius,
                envelope,
                grounded: false,
            },
        );

        handle
    }

    pub fn add_static_box(&mut self, position: Vec3, half_extents: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(Vector::new(position.x, position.y, position.z))
            .build();
        self.colliders.insert(collider)
    }

    /// Flat slab whose top face sits at `y`.
    pub fn add_ground(&mut self, y: Real, half_size: Real) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_size, 0.1, half_size)
            .translation(Vector::new(0.0, y - 0.1, 0.0))
            .build();
        self.colliders.insert(collider)
    }

    pub fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.characters.remove(&handle);
        self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    pub fn body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    /// Borrowed collision view over a character spawned with `add_player`.
    pub fn character(
        &mut self,
        handle: RigidBodyHandle,
    ) -> Result<CharacterBody<'_>, PhysicsError> {
        let body = self
            .bodies
            .get(handle)
            .ok_or(PhysicsError::MissingBody(handle))?;

        if body.colliders().is_empty() || !self.characters.contains_key(&handle) {
            return Err(PhysicsError::MissingCollider(handle));
        }

        Ok(CharacterBody::new(self, handle))
    }

    /// Shifts a body by `delta`, keeping its rotation.
    pub fn translate_body(&mut self, handle: RigidBodyHandle, delta: Vec3) {
        let Some(body) = self.bodies.get_mut(handle) else {
            return;
        };

        let t = body.translation();
        let moved = Vector::new(t.x + delta.x, t.y + delta.y, t.z + delta.z);
        let pose = Pose::from_parts(moved, *body.rotation());
        body.set_position(pose, true);
    }

    pub fn body_position(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.bodies.get(handle).map(|b| {
            let t = b.translation();
            Vec3::new(t.x, t.y, t.z)
        })
    }

    /// Swaps a character's cylinder for one matching `envelope` and moves the
    /// body by the change in center so the feet stay where they were.
    pub(super) fn reshape_character(&mut self, handle: RigidBodyHandle, envelope: Envelope) {
        let Some(rig) = self.characters.get_mut(&handle) else {
            return;
        };
        let shift = envelope.center - rig.envelope.center;
        let shape = SharedShape::cylinder(envelope.height / 2.0, rig.radius);
        rig.envelope = envelope;

        if let Some(body) = self.bodies.get(handle) {
            for &collider in body.colliders() {
                if let Some(collider) = self.colliders.get_mut(collider) {
                    collider.set_shape(shape.clone());
                }
            }
        }

        self.translate_body(handle, shift);
    }

    /// Sweeps `shape` from `position` by `desired_translation`, sliding along
    /// and stepping over anything but the character's own colliders.
    pub fn move_character(
        &self,
        handle: RigidBodyHandle,
        shape: &SharedShape,
        position: Pose,
        desired_translation: Vector,
    ) -> EffectiveCharacterMovement {
        self.character_controller.move_shape(
            self.integration_parameters.dt,
            &self.query_pipeline(handle),
            shape.as_ref(),
            &position,
            desired_translation,
            |_collision| {},
        )
    }

    /// Casts a ray that ignores the colliders of `exclude`.
    pub fn raycast_excluding(
        &self,
        exclude: RigidBodyHandle,
        origin: Vec3,
        direction: Vec3,
        max_distance: Real,
    ) -> Option<(Vec3, Real)> {
        let ray = Ray::new(
            Vector::new(origin.x, origin.y, origin.z),
            Vector::new(direction.x, direction.y, direction.z),
        );

        self.query_pipeline(exclude)
            .cast_ray(&ray, max_distance, true)
            .map(|(_, toi)| (origin + direction * toi, toi))
    }

    /// Scene queries as seen by the character `exclude`.
    fn query_pipeline(&self, exclude: RigidBodyHandle) -> QueryPipeline<'_> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            QueryFilter::default().exclude_rigid_body(exclude),
        )
    }
}
