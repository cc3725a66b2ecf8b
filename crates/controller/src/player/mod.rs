mod config;
mod controller;
mod state;

pub use config::{ConfigError, ControllerConfig, FeatureSet, StandPolicy};
pub use controller::{FpController, TickOutput};
pub use state::MotionState;
