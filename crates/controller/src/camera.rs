use glam::{EulerRot, Quat, Vec3};

use crate::player::ControllerConfig;

/// Camera placement relative to the character's feet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub local_offset: Vec3,
    /// Pitch only, relative to the body.
    pub local_rotation: Quat,
    /// Body yaw followed by camera pitch.
    pub world_rotation: Quat,
}

/// Speed-reactive field of view and crouch-aware eye height.
///
/// Both values chase their targets with a frame-rate scaled lerp; neither
/// ever settles into a terminal state.
#[derive(Debug, Clone)]
pub struct CameraRig {
    normal_fov: f32,
    sprint_fov: f32,
    fov_smoothing: f32,
    clamp_fov_ratio: bool,

    stand_height: f32,
    crouch_height: f32,
    lerp_speed: f32,

    current_fov: f32,
    current_height: f32,
}

impl CameraRig {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            normal_fov: config.camera_normal_fov,
            sprint_fov: config.camera_sprint_fov,
            fov_smoothing: config.camera_fov_smoothing,
            clamp_fov_ratio: config.clamp_fov_ratio,
            stand_height: config.camera_stand_height,
            crouch_height: config.camera_crouch_height,
            lerp_speed: config.camera_lerp_speed,
            current_fov: config.camera_normal_fov,
            current_height: config.camera_stand_height,
        }
    }

    pub fn current_fov(&self) -> f32 {
        self.current_fov
    }

    pub fn current_height(&self) -> f32 {
        self.current_height
    }

    pub fn target_fov(&self, current_speed: f32, sprint_speed: f32, sprinting: bool) -> f32 {
        if !sprinting || sprint_speed <= 0.0 {
            return self.normal_fov;
        }

        let mut ratio = current_speed / sprint_speed;
        if self.clamp_fov_ratio {
            ratio = ratio.clamp(0.0, 1.0);
        }

        lerp(self.normal_fov, self.sprint_fov, ratio)
    }

    pub fn update_fov(&mut self, current_speed: f32, sprint_speed: f32, sprinting: bool, dt: f32) {
        let target = self.target_fov(current_speed, sprint_speed, sprinting);
        self.current_fov = lerp(self.current_fov, target, smoothing(self.fov_smoothing, dt));
    }

    pub fn update_height(&mut self, is_crouching: bool, dt: f32) {
        let target = if is_crouching {
            self.crouch_height
        } else {
            self.stand_height
        };
        self.current_height = lerp(self.current_height, target, smoothing(self.lerp_speed, dt));
    }

    pub fn pose(&self, pitch: f32, yaw: f32) -> CameraPose {
        let pitch = pitch.to_radians();
        let yaw = yaw.to_radians();

        CameraPose {
            fov: self.current_fov,
            local_offset: Vec3::new(0.0, self.current_height, 0.0),
            local_rotation: Quat::from_rotation_x(pitch),
            world_rotation: Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0),
        }
    }
}

fn smoothing(rate: f32, dt: f32) -> f32 {
    (rate * dt).clamp(0.0, 1.0)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn starts_at_rest_targets() {
        let rig = CameraRig::new(&ControllerConfig::default());
        assert_eq!(rig.current_fov(), 60.0);
        assert_eq!(rig.current_height(), 1.8);
    }

    #[test]
    fn fov_ignores_speed_unless_sprinting() {
        let rig = CameraRig::new(&ControllerConfig::default());
        assert_eq!(rig.target_fov(8.0, 8.0, false), 60.0);
        assert_eq!(rig.target_fov(8.0, 8.0, true), 80.0);
        assert_eq!(rig.target_fov(4.0, 8.0, true), 70.0);
    }

    #[test]
    fn slide_overspeed_extrapolates_unless_clamped() {
        let mut config = ControllerConfig::default();
        let rig = CameraRig::new(&config);
        assert_eq!(rig.target_fov(16.0, 8.0, true), 100.0);

        config.clamp_fov_ratio = true;
        let rig = CameraRig::new(&config);
        assert_eq!(rig.target_fov(16.0, 8.0, true), 80.0);
    }

    #[test]
    fn fov_approaches_target_without_overshoot() {
        let mut rig = CameraRig::new(&ControllerConfig::default());

        let mut previous = rig.current_fov();
        for _ in 0..600 {
            rig.update_fov(8.0, 8.0, true, DT);
            assert!(rig.current_fov() >= previous);
            assert!(rig.current_fov() <= 80.0);
            previous = rig.current_fov();
        }

        assert!((rig.current_fov() - 80.0).abs() < 0.01);
    }

    #[test]
    fn height_follows_crouch() {
        let mut rig = CameraRig::new(&ControllerConfig::default());

        rig.update_height(true, DT);
        let first = rig.current_height();
        assert!(first < 1.8 && first > 1.0);

        for _ in 0..120 {
            rig.update_height(true, DT);
        }
        assert!((rig.current_height() - 1.0).abs() < 1e-3);

        for _ in 0..120 {
            rig.update_height(false, DT);
        }
        assert!((rig.current_height() - 1.8).abs() < 1e-3);
    }

    #[test]
    fn large_dt_snaps_instead_of_overshooting() {
        let mut rig = CameraRig::new(&ControllerConfig::default());
        rig.update_height(true, 1.0);
        assert_eq!(rig.current_height(), 1.0);
    }

    #[test]
    fn pose_carries_height_and_pitch() {
        let rig = CameraRig::new(&ControllerConfig::default());
        let pose = rig.pose(30.0, 0.0);

        assert_eq!(pose.local_offset, Vec3::new(0.0, 1.8, 0.0));
        assert!(pose.local_rotation.abs_diff_eq(Quat::from_rotation_x(30_f32.to_radians()), 1e-6));
        assert!(pose.world_rotation.abs_diff_eq(pose.local_rotation, 1e-6));
    }
}
