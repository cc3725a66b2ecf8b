use fpcontroller::{
    CollisionMover, ControllerConfig, FpController, InputSnapshot, PhysicsError, PhysicsWorld,
    StandPolicy,
};
use glam::{Vec2, Vec3};
use rapier3d::prelude::RigidBodyHandle;

const DT: f32 = 1.0 / 60.0;

fn world_with_player() -> (PhysicsWorld, RigidBodyHandle) {
    let mut physics = PhysicsWorld::new();
    physics.set_dt(DT);
    physics.add_ground(0.0, 50.0);
    let handle = physics.add_player(Vec3::new(0.0, 0.5, 0.0), 0.3, 2.0);
    physics.step();
    (physics, handle)
}

fn spawn(
    physics: &mut PhysicsWorld,
    handle: RigidBodyHandle,
    config: ControllerConfig,
) -> FpController {
    let body = physics.character(handle).unwrap();
    FpController::new(config, &body)
}

fn run(
    controller: &mut FpController,
    physics: &mut PhysicsWorld,
    handle: RigidBodyHandle,
    input: &InputSnapshot,
    frames: usize,
) {
    for _ in 0..frames {
        let mut body = physics.character(handle).unwrap();
        controller.tick(input, DT, &mut body);
        physics.step();
    }
}

fn feet(physics: &mut PhysicsWorld, handle: RigidBodyHandle) -> Vec3 {
    physics.character(handle).unwrap().feet_position().unwrap()
}

#[test]
fn lands_then_walks_forward() {
    let (mut physics, handle) = world_with_player();
    let mut controller = spawn(&mut physics, handle, ControllerConfig::default());

    run(&mut controller, &mut physics, handle, &InputSnapshot::default(), 60);

    assert!(physics.character(handle).unwrap().is_grounded());
    let landed = feet(&mut physics, handle);
    assert!(landed.y.abs() < 0.1, "feet at {landed:?}");

    let walk = InputSnapshot {
        move_axis: Vec2::new(0.0, 1.0),
        ..Default::default()
    };
    run(&mut controller, &mut physics, handle, &walk, 60);

    let walked = feet(&mut physics, handle);
    assert!(walked.z > 2.0, "feet at {walked:?}");
    assert!(walked.y.abs() < 0.1, "feet at {walked:?}");
    assert!((controller.current_speed() - 3.5).abs() < 1e-4);
}

#[test]
fn crouch_keeps_feet_planted() {
    let (mut physics, handle) = world_with_player();
    let mut controller = spawn(&mut physics, handle, ControllerConfig::default());
    run(&mut controller, &mut physics, handle, &InputSnapshot::default(), 60);

    let before = feet(&mut physics, handle);
    let crouch = InputSnapshot {
        crouch_held: true,
        ..Default::default()
    };
    run(&mut controller, &mut physics, handle, &crouch, 10);

    let body = physics.character(handle).unwrap();
    assert!(controller.is_crouching());
    assert_eq!(body.envelope().height, 1.0);
    assert!((body.feet_position().unwrap().y - before.y).abs() < 0.05);
}

#[test]
fn ceiling_blocks_standing_under_headroom_policy() {
    let (mut physics, handle) = world_with_player();
    let config = ControllerConfig {
        stand_policy: StandPolicy::RequireHeadroom,
        ..Default::default()
    };
    let mut controller = spawn(&mut physics, handle, config);
    run(&mut controller, &mut physics, handle, &InputSnapshot::default(), 60);

    let crouch = InputSnapshot {
        crouch_held: true,
        ..Default::default()
    };
    run(&mut controller, &mut physics, handle, &crouch, 10);

    // Slab whose underside sits just above the crouched head.
    physics.add_static_box(Vec3::new(0.0, 1.15, 0.0), Vec3::new(5.0, 0.1, 5.0));
    physics.step();

    run(&mut controller, &mut physics, handle, &InputSnapshot::default(), 5);

    assert!(controller.is_crouching());
    assert!(controller.state().stand_pending);
    assert!(!controller.can_stand(&physics.character(handle).unwrap()));
}

#[test]
fn missing_body_fails_fast() {
    let (mut physics, handle) = world_with_player();
    physics.remove_body(handle);

    assert!(matches!(
        physics.character(handle),
        Err(PhysicsError::MissingBody(h)) if h == handle
    ));
}
