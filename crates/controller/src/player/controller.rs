use glam::{Vec2, Vec3};

use crate::camera::{CameraPose, CameraRig};
use crate::input::InputSnapshot;
use crate::physics::{CollisionMover, Envelope};

use super::{ControllerConfig, FeatureSet, MotionState, StandPolicy};

/// Vertical speed at or below which a grounded body gets pinned.
const GROUNDED_RISE_EPSILON: f32 = 0.01;
/// Slides end once they drop below this speed.
const SLIDE_STOP_SPEED: f32 = 0.2;
/// Crouching above `walk_speed * SLIDE_SPEED_FACTOR` while sprinting slides.
const SLIDE_SPEED_FACTOR: f32 = 1.2;
/// Extra clearance checked above the crouched body before standing.
const HEADROOM_MARGIN: f32 = 0.1;
const MIN_MOVE_INPUT_SQ: f32 = 0.01;

/// Result of one controller tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutput {
    /// Displacement handed to the mover.
    pub displacement: Vec3,
    /// Displacement the mover reported after collision.
    pub applied: Vec3,
    pub pitch: f32,
    pub yaw: f32,
    /// Grounded state sampled at the start of the tick.
    pub grounded: bool,
    pub camera: CameraPose,
}

pub struct FpController {
    config: ControllerConfig,
    state: MotionState,
    camera: CameraRig,
}

impl FpController {
    /// Captures the mover's current envelope as the standing shape.
    pub fn new(config: ControllerConfig, mover: &impl CollisionMover) -> Self {
        let state = MotionState::new(mover.envelope().center);
        let camera = CameraRig::new(&config);

        Self {
            config,
            state,
            camera,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn pitch(&self) -> f32 {
        self.state.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.state.yaw
    }

    pub fn current_speed(&self) -> f32 {
        self.state.current_speed
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.state.vertical_velocity
    }

    /// Carried velocity. Slide motion shows up in `current_speed` and the
    /// tick displacement instead.
    pub fn velocity(&self) -> Vec3 {
        self.state.velocity()
    }

    pub fn is_crouching(&self) -> bool {
        self.state.is_crouching
    }

    pub fn is_sliding(&self) -> bool {
        self.state.is_sliding
    }

    pub fn is_sprinting(&self) -> bool {
        self.state.is_sprinting()
    }

    pub fn forward(&self) -> Vec3 {
        self.state.forward()
    }

    pub fn right(&self) -> Vec3 {
        self.state.right()
    }

    /// Top speed for uncrouched movement given the sprint input.
    pub fn max_speed(&self) -> f32 {
        if self.state.sprint_held {
            self.config.sprint_speed
        } else {
            self.config.walk_speed
        }
    }

    pub fn target_fov(&self) -> f32 {
        self.camera.target_fov(
            self.state.current_speed,
            self.config.sprint_speed,
            self.state.is_sprinting(),
        )
    }

    pub fn camera_pose(&self) -> CameraPose {
        self.camera.pose(self.state.pitch, self.state.yaw)
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        let limit = self.config.pitch_limit.abs();
        if pitch.is_finite() {
            self.state.pitch = pitch.max(-limit).min(limit);
        }
    }

    /// Runs one frame: edge actions, motion integration, collision, look and
    /// camera smoothing, in that order.
    pub fn tick(
        &mut self,
        input: &InputSnapshot,
        dt: f32,
        mover: &mut impl CollisionMover,
    ) -> TickOutput {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let grounded = mover.is_grounded();

        self.state.sprint_held = input.sprint_held;
        if input.jump_pressed {
            self.jump(grounded);
        }
        self.tick_crouch_input(input.crouch_held, mover);

        let motion = self.tick_horizontal(input.move_axis, dt);
        self.tick_vertical(grounded, dt);

        let displacement = Vec3::new(motion.x, self.state.vertical_velocity, motion.z) * dt;
        let applied = mover.move_by(displacement);
        self.state.current_speed = motion.length();

        self.tick_look(input.look_delta);
        self.tick_camera(dt);

        log::trace!(
            "tick dt={:.4} grounded={} motion={:?} pitch={:.1} yaw={:.1}",
            dt,
            grounded,
            motion,
            self.state.pitch,
            self.state.yaw
        );

        TickOutput {
            displacement,
            applied,
            pitch: self.state.pitch,
            yaw: self.state.yaw,
            grounded,
            camera: self.camera_pose(),
        }
    }

    /// Launches upward if the mover reports ground. Returns whether it did.
    pub fn try_jump(&mut self, mover: &impl CollisionMover) -> bool {
        self.jump(mover.is_grounded())
    }

    fn jump(&mut self, grounded: bool) -> bool {
        if self.config.features == FeatureSet::Basic {
            log::debug!("jump ignored: basic feature set");
            return false;
        }
        if !grounded {
            return false;
        }

        self.state.vertical_velocity = self.config.jump_velocity();
        log::debug!("jump at {:.2} m/s", self.state.vertical_velocity);
        true
    }

    /// Crouches, sliding instead when sprinting fast enough.
    pub fn start_crouch(&mut self, mover: &mut impl CollisionMover) {
        if self.config.features == FeatureSet::Basic {
            log::debug!("crouch ignored: basic feature set");
            return;
        }

        self.state.stand_pending = false;

        let slide_threshold = self.config.walk_speed * SLIDE_SPEED_FACTOR;
        if self.state.is_sprinting() && self.state.current_speed > slide_threshold {
            self.state.is_sliding = true;
            self.state.slide_velocity = self.state.horizontal_velocity
                + self.state.forward() * self.config.slide_start_force;
            log::debug!(
                "slide started at {:.2} m/s",
                self.state.slide_velocity.length()
            );
        }

        self.state.is_crouching = true;

        let standing = self.state.standing_center;
        let height = self.config.crouch_height;
        mover.set_envelope(Envelope::new(
            height,
            Vec3::new(standing.x, height / 2.0, standing.z),
        ));
    }

    /// Stands up and restores the standing envelope. Under
    /// [`StandPolicy::RequireHeadroom`] this fails while something is
    /// overhead, and the stand is retried on later ticks.
    pub fn stop_crouch(&mut self, mover: &mut impl CollisionMover) -> bool {
        if self.config.stand_policy == StandPolicy::RequireHeadroom && !self.can_stand(&*mover) {
            if !self.state.stand_pending {
                log::debug!("stand blocked by ceiling");
            }
            self.state.stand_pending = true;
            return false;
        }

        if self.state.is_crouching {
            log::debug!("standing up");
        }

        self.state.stand_pending = false;
        self.state.is_crouching = false;
        self.state.is_sliding = false;
        self.state.slide_velocity = Vec3::ZERO;

        mover.set_envelope(Envelope::new(
            self.config.stand_height,
            self.state.standing_center,
        ));
        true
    }

    pub fn can_stand(&self, mover: &impl CollisionMover) -> bool {
        mover.has_headroom(self.config.stand_height - self.config.crouch_height + HEADROOM_MARGIN)
    }

    fn tick_crouch_input(&mut self, crouch_held: bool, mover: &mut impl CollisionMover) {
        if self.config.features == FeatureSet::Basic {
            return;
        }

        if crouch_held != self.state.crouch_held {
            self.state.crouch_held = crouch_held;
            if crouch_held {
                self.start_crouch(mover);
            } else {
                self.stop_crouch(mover);
            }
        } else if self.state.stand_pending && !crouch_held {
            self.stop_crouch(mover);
        }
    }

    /// Returns the horizontal motion for this frame. While sliding that is the
    /// slide velocity; `horizontal_velocity` is left untouched so the slide
    /// boost never carries over once the slide ends.
    fn tick_horizontal(&mut self, move_axis: Vec2, dt: f32) -> Vec3 {
        if self.state.is_sliding {
            // Slides ignore move input until they run out.
            let motion = self.state.slide_velocity;
            let decay = (self.config.slide_decay * dt).clamp(0.0, 1.0);
            self.state.slide_velocity = self.state.slide_velocity.lerp(Vec3::ZERO, decay);

            if self.state.slide_velocity.length() < SLIDE_STOP_SPEED {
                self.state.is_sliding = false;
                log::debug!("slide ended");
            }

            return Vec3::new(motion.x, 0.0, motion.z);
        }

        let direction = self.move_direction(move_axis);
        let target_speed = if self.state.is_crouching {
            self.config.crouch_speed
        } else {
            self.max_speed()
        };

        self.state.horizontal_velocity = move_towards(
            self.state.horizontal_velocity,
            direction * target_speed,
            self.config.acceleration * dt,
        );
        self.state.horizontal_velocity
    }

    fn move_direction(&self, move_axis: Vec2) -> Vec3 {
        let mut direction = self.state.forward() * move_axis.y + self.state.right() * move_axis.x;
        direction.y = 0.0;

        let direction = direction.normalize_or_zero();
        if direction.length_squared() >= MIN_MOVE_INPUT_SQ {
            direction
        } else {
            Vec3::ZERO
        }
    }

    fn tick_vertical(&mut self, grounded: bool, dt: f32) {
        if grounded && self.state.vertical_velocity <= GROUNDED_RISE_EPSILON {
            self.state.vertical_velocity = self.config.ground_stick_velocity;
        } else {
            self.state.vertical_velocity += self.config.gravity * self.config.gravity_scale * dt;
        }
    }

    fn tick_look(&mut self, look_delta: Vec2) {
        if !look_delta.is_finite() {
            return;
        }

        let scaled = look_delta * self.config.look_sensitivity;
        self.set_pitch(self.state.pitch - scaled.y);
        self.state.yaw = (self.state.yaw + scaled.x) % 360.0;
    }

    fn tick_camera(&mut self, dt: f32) {
        self.camera.update_fov(
            self.state.current_speed,
            self.config.sprint_speed,
            self.state.is_sprinting(),
            dt,
        );
        self.camera.update_height(self.state.is_crouching, dt);
    }
}

/// Linear approach of `current` toward `target`, never overshooting.
fn move_towards(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let delta = target - current;
    let distance = delta.length();

    if distance <= max_delta {
        target
    } else {
        current + delta / distance * max_delta
    }
}
