pub mod camera;
pub mod input;
pub mod physics;
pub mod player;

pub use camera::{CameraPose, CameraRig};
pub use input::{InputEvent, InputSnapshot, InputState};
pub use physics::{CharacterBody, CollisionMover, Envelope, PhysicsError, PhysicsWorld, PlaneMover};
pub use player::{
    ConfigError, ControllerConfig, FeatureSet, FpController, MotionState, StandPolicy, TickOutput,
};
