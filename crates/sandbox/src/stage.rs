use anyhow::{Context, Result};
use glam::Vec3;
use rapier3d::prelude::RigidBodyHandle;

use fpcontroller::{
    ControllerConfig, Envelope, FpController, InputSnapshot, PhysicsWorld, PlaneMover,
    TickOutput,
};

/// The collision backend the controller runs against.
pub enum Stage {
    Rapier {
        physics: PhysicsWorld,
        handle: RigidBodyHandle,
    },
    Plane(PlaneMover),
}

impl Stage {
    pub fn rapier(config: &ControllerConfig, dt: f32) -> Self {
        let mut physics = PhysicsWorld::new();
        physics.set_dt(dt);
        physics.add_ground(0.0, 200.0);
        physics.add_static_box(Vec3::new(0.0, 0.25, 40.0), Vec3::new(4.0, 0.25, 1.0));

        let handle = physics.add_player(Vec3::new(0.0, 0.2, 0.0), 0.3, config.stand_height);
        physics.step();

        Self::Rapier { physics, handle }
    }

    pub fn plane(config: &ControllerConfig) -> Self {
        Self::Plane(PlaneMover::new(
            Vec3::new(0.0, 0.2, 0.0),
            0.0,
            Envelope::grounded(config.stand_height),
        ))
    }

    pub fn spawn(&mut self, config: ControllerConfig) -> Result<FpController> {
        match self {
            Self::Rapier { physics, handle } => {
                let body = physics
                    .character(*handle)
                    .context("player body was not spawned")?;
                Ok(FpController::new(config, &body))
            }
            Self::Plane(mover) => Ok(FpController::new(config, mover)),
        }
    }

    pub fn tick(
        &mut self,
        controller: &mut FpController,
        input: &InputSnapshot,
        dt: f32,
    ) -> Result<TickOutput> {
        match self {
            Self::Rapier { physics, handle } => {
                let mut body = physics.character(*handle)?;
                let output = controller.tick(input, dt, &mut body);
                physics.step();
                Ok(output)
            }
            Self::Plane(mover) => Ok(controller.tick(input, dt, mover)),
        }
    }

    pub fn feet(&mut self) -> Result<Vec3> {
        match self {
            Self::Rapier { physics, handle } => physics
                .character(*handle)?
                .feet_position()
                .context("player body disappeared"),
            Self::Plane(mover) => Ok(mover.feet_position()),
        }
    }
}
