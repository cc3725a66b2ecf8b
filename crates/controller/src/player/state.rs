use glam::Vec3;

/// Everything the controller integrates from one tick to the next.
#[derive(Debug, Clone)]
pub struct MotionState {
    /// Ground-plane velocity; y is always zero.
    pub horizontal_velocity: Vec3,
    pub vertical_velocity: f32,
    /// Degrees, positive looks down.
    pub pitch: f32,
    /// Degrees around +Y.
    pub yaw: f32,
    pub is_crouching: bool,
    pub is_sliding: bool,
    /// Only meaningful while `is_sliding`.
    pub slide_velocity: Vec3,
    pub standing_center: Vec3,
    pub current_speed: f32,
    pub sprint_held: bool,
    pub crouch_held: bool,
    /// Stand-up requested but blocked by a low ceiling.
    pub stand_pending: bool,
}

impl MotionState {
    pub fn new(standing_center: Vec3) -> Self {
        Self {
            horizontal_velocity: Vec3::ZERO,
            vertical_velocity: 0.0,
            pitch: 0.0,
            yaw: 0.0,
            is_crouching: false,
            is_sliding: false,
            slide_velocity: Vec3::ZERO,
            standing_center,
            current_speed: 0.0,
            sprint_held: false,
            crouch_held: false,
            stand_pending: false,
        }
    }

    /// Unit forward vector on the ground plane for the current yaw.
    pub fn forward(&self) -> Vec3 {
        let (sin, cos) = self.yaw.to_radians().sin_cos();
        Vec3::new(sin, 0.0, cos)
    }

    pub fn right(&self) -> Vec3 {
        let (sin, cos) = self.yaw.to_radians().sin_cos();
        Vec3::new(cos, 0.0, -sin)
    }

    pub fn velocity(&self) -> Vec3 {
        Vec3::new(
            self.horizontal_velocity.x,
            self.vertical_velocity,
            self.horizontal_velocity.z,
        )
    }

    pub fn is_sprinting(&self) -> bool {
        self.sprint_held && self.current_speed > 0.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basis_follows_yaw() {
        let mut state = MotionState::new(Vec3::Y);
        assert!(state.forward().abs_diff_eq(Vec3::Z, 1e-6));
        assert!(state.right().abs_diff_eq(Vec3::X, 1e-6));

        state.yaw = 90.0;
        assert!(state.forward().abs_diff_eq(Vec3::X, 1e-6));
        assert!(state.right().abs_diff_eq(Vec3::NEG_Z, 1e-6));
    }

    #[test]
    fn sprinting_needs_motion() {
        let mut state = MotionState::new(Vec3::Y);
        state.sprint_held = true;
        assert!(!state.is_sprinting());

        state.current_speed = 1.0;
        assert!(state.is_sprinting());
    }
}
