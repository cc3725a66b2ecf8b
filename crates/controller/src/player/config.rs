use glam::Vec2;
use serde::Deserialize;

/// Which of the controller's abilities are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureSet {
    /// Move, look, jump, crouch and slide.
    #[default]
    Full,
    /// Legacy controller: move, look and gravity only.
    Basic,
}

/// What happens when crouch is released under a low ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandPolicy {
    /// Stand up unconditionally.
    #[default]
    Always,
    /// Stay crouched until there is clearance above the head.
    RequireHeadroom,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub acceleration: f32,

    pub jump_height: f32,

    /// Degrees of rotation per unit of look input, (yaw, pitch).
    pub look_sensitivity: Vec2,
    pub pitch_limit: f32,

    pub camera_normal_fov: f32,
    pub camera_sprint_fov: f32,
    pub camera_fov_smoothing: f32,
    /// Clamp the sprint FOV blend to [0, 1] so slide overspeed cannot push
    /// the FOV past `camera_sprint_fov`.
    pub clamp_fov_ratio: bool,

    pub crouch_height: f32,
    pub stand_height: f32,
    pub crouch_speed: f32,
    pub slide_start_force: f32,
    pub slide_decay: f32,

    pub camera_stand_height: f32,
    pub camera_crouch_height: f32,
    pub camera_lerp_speed: f32,

    /// World gravity along Y, negative is down.
    pub gravity: f32,
    pub gravity_scale: f32,
    /// Vertical velocity held while grounded so the body stays seated.
    pub ground_stick_velocity: f32,

    pub features: FeatureSet,
    pub stand_policy: StandPolicy,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            walk_speed: 3.5,
            sprint_speed: 8.0,
            acceleration: 15.0,

            jump_height: 2.0,

            look_sensitivity: Vec2::new(0.1, 0.1),
            pitch_limit: 85.0,

            camera_normal_fov: 60.0,
            camera_sprint_fov: 80.0,
            camera_fov_smoothing: 1.0,
            clamp_fov_ratio: false,

            crouch_height: 1.0,
            stand_height: 2.0,
            crouch_speed: 2.0,
            slide_start_force: 10.0,
            slide_decay: 8.0,

            camera_stand_height: 1.8,
            camera_crouch_height: 1.0,
            camera_lerp_speed: 10.0,

            gravity: -9.81,
            gravity_scale: 3.0,
            ground_stick_velocity: -3.0,

            features: FeatureSet::Full,
            stand_policy: StandPolicy::Always,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("gravity must be non-zero")]
    ZeroGravity,
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ControllerConfig {
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the controller cannot integrate sensibly. The
    /// controller itself never calls this.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("walk_speed", self.walk_speed),
            ("sprint_speed", self.sprint_speed),
            ("acceleration", self.acceleration),
            ("jump_height", self.jump_height),
            ("pitch_limit", self.pitch_limit),
            ("camera_normal_fov", self.camera_normal_fov),
            ("camera_sprint_fov", self.camera_sprint_fov),
            ("camera_fov_smoothing", self.camera_fov_smoothing),
            ("crouch_height", self.crouch_height),
            ("stand_height", self.stand_height),
            ("crouch_speed", self.crouch_speed),
            ("slide_start_force", self.slide_start_force),
            ("slide_decay", self.slide_decay),
            ("camera_stand_height", self.camera_stand_height),
            ("camera_crouch_height", self.camera_crouch_height),
            ("camera_lerp_speed", self.camera_lerp_speed),
            ("gravity_scale", self.gravity_scale),
        ];

        for (field, value) in non_negative {
            check_finite(field, value)?;
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        check_finite("look_sensitivity.x", self.look_sensitivity.x)?;
        check_finite("look_sensitivity.y", self.look_sensitivity.y)?;
        check_finite("gravity", self.gravity)?;
        check_finite("ground_stick_velocity", self.ground_stick_velocity)?;

        if self.gravity == 0.0 || self.gravity_scale == 0.0 {
            return Err(ConfigError::ZeroGravity);
        }

        Ok(())
    }

    /// Launch speed that reaches `jump_height` under the configured gravity.
    pub fn jump_velocity(&self) -> f32 {
        (self.jump_height * 2.0 * self.gravity.abs() * self.gravity_scale).sqrt()
    }
}

fn check_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}
